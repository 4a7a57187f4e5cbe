pub mod enums;
pub mod scene;
