//! Concrete adapter implementations for ports.

pub mod csv_adapter;
pub mod yahoo_adapter;
pub mod file_config_adapter;
pub mod console_report;
pub mod json_report;
