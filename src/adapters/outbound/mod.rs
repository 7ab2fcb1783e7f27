/// Outbound adapters - Infrastructure implementations of outbound ports
pub mod console;
pub mod extractors;
pub mod filesystem;
pub mod formatters;
