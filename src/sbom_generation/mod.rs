/// Domain layer - installer file model, license policies, and pure services
///
/// Nothing in this layer touches processes or the console; file I/O is
/// limited to the ports it is handed.
pub mod domain;
pub mod policies;
pub mod services;
