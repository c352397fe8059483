pub mod api;
pub mod args;
pub mod commands;
mod config;
mod error;
pub mod model;
pub mod store;
pub mod view;
mod utils;

#[cfg(test)]
mod test;

pub use config::Config;
pub use error::{Error, ErrorType, Result};
