pub mod config;
pub mod cookies;
pub mod document;
pub mod errors;
pub mod greet;

pub use document::*;
