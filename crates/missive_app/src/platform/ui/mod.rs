pub mod compose;
pub mod constants;
pub mod layout;
pub mod render;
