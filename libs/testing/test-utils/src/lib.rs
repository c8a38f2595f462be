//! Shared test utilities for domain testing
//!
//! - `TestDatabase`: PostgreSQL container with the workspace migrations applied (feature: "postgres")
//! - `TestDataBuilder`: deterministic test data (always available)
//! - `assertions`: custom assertion helpers (always available)
//!
//! ```rust,ignore
//! use test_utils::{TestDatabase, TestDataBuilder};
//!
//! #[tokio::test]
//! async fn my_postgres_test() {
//!     let db = TestDatabase::new().await;
//!     let builder = TestDataBuilder::from_test_name("my_test");
//!
//!     let email = builder.email("main");
//!     let name = builder.name("employee", "main");
//! }
//! ```

#[cfg(feature = "postgres")]
mod postgres;

#[cfg(feature = "postgres")]
pub use postgres::TestDatabase;

/// Builder for test data seeded from the test name.
///
/// Tests sharing one database stay independent as long as each uses its own
/// builder, since generated emails never collide across seeds.
pub struct TestDataBuilder {
    seed: u64,
}

impl TestDataBuilder {
    pub fn new(seed: u64) -> Self {
        Self { seed }
    }

    /// Seed from a hash of the test name
    ///
    /// ```
    /// use test_utils::TestDataBuilder;
    ///
    /// let builder = TestDataBuilder::from_test_name("test_create_employee");
    /// ```
    pub fn from_test_name(name: &str) -> Self {
        use std::collections::hash_map::DefaultHasher;
        use std::hash::{Hash, Hasher};

        let mut hasher = DefaultHasher::new();
        name.hash(&mut hasher);
        Self::new(hasher.finish())
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// ```
    /// use test_utils::TestDataBuilder;
    ///
    /// let builder = TestDataBuilder::new(7);
    /// assert_eq!(builder.name("employee", "main"), "test-employee-7-main");
    /// ```
    pub fn name(&self, prefix: &str, suffix: &str) -> String {
        format!("test-{}-{}-{}", prefix, self.seed, suffix)
    }

    /// Unique email address for this seed and suffix
    ///
    /// ```
    /// use test_utils::TestDataBuilder;
    ///
    /// let builder = TestDataBuilder::new(7);
    /// assert_eq!(builder.email("main"), "test-7-main@example.com");
    /// ```
    pub fn email(&self, suffix: &str) -> String {
        format!("test-{}-{}@example.com", self.seed, suffix)
    }
}

pub mod assertions {
    /// Assert that an optional value is Some and return it
    pub fn assert_some<T>(value: Option<T>, context: &str) -> T {
        value.unwrap_or_else(|| panic!("{}: expected Some, got None", context))
    }

    /// Assert that ids come back in strictly ascending order
    pub fn assert_ascending_ids(ids: &[i64], context: &str) {
        for pair in ids.windows(2) {
            assert!(
                pair[0] < pair[1],
                "{}: ids not strictly ascending: {:?}",
                context,
                ids
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_data_builder_deterministic() {
        let builder1 = TestDataBuilder::new(42);
        let builder2 = TestDataBuilder::new(42);

        assert_eq!(builder1.email("a"), builder2.email("a"));
        assert_eq!(
            builder1.name("employee", "test"),
            builder2.name("employee", "test")
        );
    }

    #[test]
    fn test_data_builder_different_names() {
        let builder1 = TestDataBuilder::from_test_name("test1");
        let builder2 = TestDataBuilder::from_test_name("test2");

        assert_ne!(builder1.seed(), builder2.seed());
        assert_ne!(builder1.email("main"), builder2.email("main"));
    }

    #[test]
    fn test_assert_ascending_ids() {
        assertions::assert_ascending_ids(&[1, 2, 5], "ok");
        assertions::assert_ascending_ids(&[], "empty");
    }

    #[test]
    #[should_panic(expected = "not strictly ascending")]
    fn test_assert_ascending_ids_panics_on_duplicates() {
        assertions::assert_ascending_ids(&[1, 1], "dup");
    }
}
