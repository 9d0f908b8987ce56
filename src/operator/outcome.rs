use std::fmt;

/// Result of a single node pool mutation, consumed by the caller's reconcile loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Outcome {
    /// A mutation was applied
    Changed,
    /// The resource was already in the desired state (e.g. already gone)
    NotChanged,
    /// The control plane is busy with another operation; re-invoke later
    Retry,
}

impl Outcome {
    /// Whether the caller should requeue the resource
    pub fn requeue(&self) -> bool {
        matches!(self, Outcome::Retry)
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Outcome::Changed => "changed",
            Outcome::NotChanged => "not-changed",
            Outcome::Retry => "retry",
        };
        f.write_str(s)
    }
}
