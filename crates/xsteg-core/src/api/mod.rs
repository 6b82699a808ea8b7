//! Builders for hiding data in and reading data from image files.

pub mod decode;
pub mod encode;
