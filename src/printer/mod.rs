//! # Printer Module
//!
//! Printer hardware configuration.
//!
//! ## Modules
//!
//! - [`config`]: Paper and resolution settings

pub mod config;

pub use config::PrinterConfig;
