//! Tri-state result for UI features the application may or may not ship.
//!
//! Pagination, sorting and search are "if available" behaviors: their
//! absence is not a failure, but a present-and-broken feature must not pass
//! silently.

/// Outcome of probing an optional UI capability.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Capability {
    /// The feature is present and behaved as expected.
    Verified,
    /// The feature is not present in this build of the application.
    Absent,
    /// The feature is present but misbehaved.
    Failed(String),
}

impl Capability {
    /// True unless the capability is present and broken.
    pub fn is_acceptable(&self) -> bool {
        !matches!(self, Capability::Failed(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn absent_and_verified_are_acceptable() {
        assert!(Capability::Verified.is_acceptable());
        assert!(Capability::Absent.is_acceptable());
        assert!(!Capability::Failed("stale rows".into()).is_acceptable());
    }
}
