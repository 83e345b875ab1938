pub mod camera;
pub mod config;
pub mod overlay;
pub mod pipeline;
pub mod pose;
pub mod render;
