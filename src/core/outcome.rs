//! Soft-failure results returned by mutations
//!
//! Mutations report validation failures as data (`success = false` plus a
//! message) instead of raising them across the API boundary.

/// Result of a single-record mutation.
#[derive(Debug, Clone, PartialEq)]
pub struct Outcome<T> {
    pub success: bool,
    pub payload: Option<T>,
    pub message: String,
}

impl<T> Outcome<T> {
    pub fn ok(payload: T, message: impl Into<String>) -> Self {
        Self {
            success: true,
            payload: Some(payload),
            message: message.into(),
        }
    }

    pub fn fail(message: impl Into<String>) -> Self {
        Self {
            success: false,
            payload: None,
            message: message.into(),
        }
    }

    /// A failure that still carries the partial result
    pub fn fail_with(payload: T, message: impl Into<String>) -> Self {
        Self {
            success: false,
            payload: Some(payload),
            message: message.into(),
        }
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Outcome<U> {
        Outcome {
            success: self.success,
            payload: self.payload.map(f),
            message: self.message,
        }
    }
}

/// Result of a mutation over many independent rows.
///
/// Every row either lands in `created` or contributes one entry to `errors`.
#[derive(Debug, Clone, PartialEq)]
pub struct BulkOutcome<T> {
    pub created: Vec<T>,
    pub errors: Vec<String>,
}

impl<T> BulkOutcome<T> {
    pub fn new() -> Self {
        Self {
            created: Vec::new(),
            errors: Vec::new(),
        }
    }

    /// True iff at least one row was created.
    pub fn success(&self) -> bool {
        !self.created.is_empty()
    }
}

impl<T> Default for BulkOutcome<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_outcome_constructors() {
        let ok = Outcome::ok(7, "done");
        assert!(ok.success);
        assert_eq!(ok.payload, Some(7));

        let failed: Outcome<i32> = Outcome::fail("nope");
        assert!(!failed.success);
        assert_eq!(failed.payload, None);
        assert_eq!(failed.message, "nope");
    }

    #[test]
    fn test_outcome_map_keeps_flags() {
        let mapped = Outcome::ok(2, "x").map(|n| n * 10);
        assert_eq!(mapped, Outcome::ok(20, "x"));
    }

    #[test]
    fn test_bulk_success_needs_one_created_row() {
        let mut bulk: BulkOutcome<u8> = BulkOutcome::new();
        bulk.errors.push("Row 1: bad".into());
        assert!(!bulk.success());

        bulk.created.push(1);
        assert!(bulk.success());
    }
}
