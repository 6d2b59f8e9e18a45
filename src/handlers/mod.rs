//! MCP tool handlers for the task dashboard
//!
//! Each handler lives in its own file; the `#[mcp_server]` impl in `lib.rs`
//! only forwards to them.

pub mod add_task;
pub mod evaluation;
pub mod import;
pub mod list;
pub mod predict;
pub mod summary;
