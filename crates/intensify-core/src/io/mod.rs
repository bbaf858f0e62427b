pub mod discover;
pub mod image_io;
