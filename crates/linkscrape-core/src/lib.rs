pub mod error;
pub mod export;
pub mod extract;
pub mod input;
pub mod profile;

pub use error::{Error, Result};
