use serde::{Deserialize, Serialize};
use std::fmt;

/// Strength of a constraint, used by the engine to pick which constraints
/// to relax when they conflict.
///
/// Values are passed through to the engine untouched. `REQUIRED` (the
/// default) marks a constraint that must never be broken.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Priority(pub f32);

impl Priority {
    pub const REQUIRED: Priority = Priority(1000.0);
    pub const DEFAULT_HIGH: Priority = Priority(750.0);
    pub const DEFAULT_LOW: Priority = Priority(250.0);
    pub const FITTING_SIZE: Priority = Priority(50.0);

    pub fn is_required(self) -> bool {
        self.0 >= Self::REQUIRED.0
    }
}

impl Default for Priority {
    fn default() -> Self {
        Priority::REQUIRED
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_priority_default_is_required() {
        assert_eq!(Priority::default(), Priority::REQUIRED);
        assert!(Priority::default().is_required());
        assert!(!Priority::DEFAULT_HIGH.is_required());
    }

    #[test]
    fn test_priority_ordering() {
        assert!(Priority::FITTING_SIZE < Priority::DEFAULT_LOW);
        assert!(Priority::DEFAULT_HIGH < Priority::REQUIRED);
    }
}
