//! Request handlers

mod health;

pub use health::*;
