// MCP surface: protocol framing, tool catalog, validation and dispatch.
pub mod envelope;
pub mod error;
pub mod handler;
pub mod methods;
pub mod protocol;
pub mod registry;
pub mod schema;
pub mod tools;
