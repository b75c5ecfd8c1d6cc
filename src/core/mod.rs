pub mod cleanup;
pub mod config;
pub mod export;
pub mod import;
pub mod log;
pub mod redistribute;
pub mod stats;
