pub mod radar_map;
