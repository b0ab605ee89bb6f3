//! Diapason CLI library.
//!
//! Command implementations, WAV analysis and logging setup for the
//! `diapason` binary.

pub mod analysis;
pub mod commands;
pub mod logging;
