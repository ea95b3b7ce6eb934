//! Version and build metadata.

use std::sync::OnceLock;

/// Crate version from Cargo.toml.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// User-Agent for outbound HTTP requests.
pub fn user_agent() -> &'static str {
    static USER_AGENT: OnceLock<String> = OnceLock::new();
    USER_AGENT.get_or_init(|| format!("actguard/{VERSION}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn user_agent_carries_the_version() {
        assert_eq!(user_agent(), format!("actguard/{VERSION}"));
    }
}
