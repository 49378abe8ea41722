//! Configuration and directory layout for plugctl
//!
//! The other crates never build paths by hand; they go through [`Paths`] or
//! anything else implementing [`PathProvider`].

pub mod config;
pub mod paths;

pub use config::{Config, ConfigError};
pub use paths::{PathProvider, Paths};
