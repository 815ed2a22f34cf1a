//! MCP stdio server
//!
//! Hand-rolled Model Context Protocol over stdin/stdout: newline-delimited
//! JSON-RPC, tools only.

pub mod server;
pub mod tools;
pub mod types;
