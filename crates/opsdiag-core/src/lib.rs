pub mod assess;
pub mod classify;
pub mod config;
pub mod document;
pub mod error;
pub mod feedback;
pub mod io;
pub mod paths;
pub mod ranking;
pub mod registry;
pub mod roadmap;
pub mod rollup;
pub mod source;
pub mod types;

pub use error::{OpsdiagError, Result};
