//! Library side of the `tom-city-edition` binary.

pub mod config;
pub mod driver;
pub mod logging;
pub mod surface;
