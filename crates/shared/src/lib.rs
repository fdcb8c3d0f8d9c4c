pub mod catalog;
pub mod config;
pub mod controller;
pub mod geo;
pub mod loader;
pub mod models;
pub mod scene;
pub mod session;
pub mod view;
