mod formatter_factory;

pub use formatter_factory::{FormatterFactory, FormatterSource};
