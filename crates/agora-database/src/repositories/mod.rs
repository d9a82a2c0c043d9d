//! PostgreSQL repository implementations of the store traits.

pub mod activity;
pub mod directory;
pub mod subscription;

pub use activity::ActivityRepository;
pub use directory::UserDirectoryRepository;
pub use subscription::SubscriptionRepository;

/// Escape LIKE wildcards in a user-supplied prefix so that prefix
/// matching stays literal.
pub(crate) fn escape_like(prefix: &str) -> String {
    prefix
        .replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape_like_escapes_wildcards() {
        assert_eq!(escape_like("forum/3"), "forum/3");
        assert_eq!(escape_like("a%b_c"), "a\\%b\\_c");
        assert_eq!(escape_like("a\\b"), "a\\\\b");
    }
}
