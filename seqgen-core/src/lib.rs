pub mod association;
pub mod config;
pub mod constants;
pub mod datatype;
pub mod diagnostics;
pub mod error;
pub mod generator;
pub mod naming;
pub mod schema;
pub mod value;

pub use error::{GenError, Result};
