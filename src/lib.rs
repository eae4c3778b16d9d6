pub mod cli;
pub mod client;
pub mod mcp;
pub mod models;
pub mod serde_utils;
