pub mod controls;
pub mod description;
pub mod engine;
pub mod palette;
pub mod point;
pub mod point_store;
pub mod render;
pub mod state;
