pub mod error;
pub mod parse;
pub mod render;
pub mod source;

pub use error::{FormatError, Result};
