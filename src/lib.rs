//! Housing data explorer: load a table of listings once, narrow it with
//! range and membership filters, and summarize what is left.

pub mod config;
pub mod data;
