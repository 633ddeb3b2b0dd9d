//! Helpers shared by the Madoguchi binaries: logger bootstrap and wall-clock time.

pub mod logger;
pub mod time;
