pub mod catalog;
pub mod config;
pub mod error;
pub mod types;

pub use catalog::Catalogs;
pub use config::CarwiseConfig;
pub use error::{CarwiseError, LoadError, Result};
pub use types::*;
