//! # letrades_core
//!
//! Core domain logic for the letrades chat relay: chat turns, the business
//! directory, prompt construction, the upstream completion client and the
//! relay operation that ties them together.

pub mod business;
pub mod completion;
pub mod message;
pub mod prompt;
pub mod relay;

/// Returns the crate version.
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn version_is_not_empty() {
        assert!(!version().is_empty());
    }
}
