/// Shared kernel - errors, result alias, and cross-cutting helpers
pub mod checksum;
pub mod error;
pub mod result;
pub mod security;

pub use result::Result;
