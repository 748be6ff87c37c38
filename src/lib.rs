//! Environmental impact dashboard: load a production spreadsheet, filter it
//! by company, product type and year, and summarise what is left.
//!
//! The rendering side lives in the `eco-impact` binary; this library holds
//! everything that can be exercised without a window.

pub mod color;
pub mod config;
pub mod data;
pub mod format;
pub mod state;
pub mod theme;
