pub mod comment;
pub mod render;
pub mod sha;
