//! Command-line front end for the withholding calculator and the
//! transaction detail table.

pub mod app;
pub mod cli;
pub mod config;
pub mod logging;
