#![cfg_attr(not(test), no_std)]

#[macro_use]
mod fmt;

mod config;
mod error;
mod peripherals;

pub use config::*;
pub use error::*;
pub use peripherals::*;
