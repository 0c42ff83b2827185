pub mod contracts;
pub mod edge;
pub mod render;
pub mod time;
