pub mod map_view;
pub mod status_panel;
