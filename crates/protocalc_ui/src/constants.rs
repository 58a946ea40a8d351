//! Shared constants for input handling.

/// Maximum entries kept on an undo stack before the oldest is evicted
pub const UNDO_STACK_LIMIT: usize = 50;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn undo_limit_is_positive() {
        assert!(UNDO_STACK_LIMIT > 0);
    }
}
