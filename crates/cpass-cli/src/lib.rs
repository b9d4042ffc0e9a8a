//! CLI library components for the `cpass` binary.

#![deny(unsafe_code)]

pub mod logging;
pub mod report;
