// ABOUTME: Configuration constants shared by the daylog packages
// ABOUTME: Environment variable names plus the defaults applied when they are unset

pub mod constants;

pub use constants::*;
