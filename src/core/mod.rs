pub mod error;

pub use error::{NemesiaError, Result};
