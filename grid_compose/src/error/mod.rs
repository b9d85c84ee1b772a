//! Error types produced while discovering and composing configuration.

mod constructors;
mod types;

pub use types::ComposeError;

#[cfg(test)]
mod tests;
