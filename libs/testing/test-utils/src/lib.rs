//! Shared test utilities for domain testing
//!
//! - `TestDatabase`: PostgreSQL container with every migration applied
//! - `TestDataBuilder`: reproducible, per-test unique emails and names
//!
//! # Usage
//!
//! ```rust,no_run
//! use test_utils::{TestDatabase, TestDataBuilder};
//!
//! #[tokio::test]
//! #[ignore = "requires Docker"]
//! async fn my_postgres_test() {
//!     let db = TestDatabase::new().await;
//!     let builder = TestDataBuilder::from_test_name("my_test");
//!
//!     db.allow_email(&builder.email("allowed")).await;
//! }
//! ```

mod postgres;

pub use postgres::TestDatabase;

/// Per-test unique emails and names.
///
/// Values depend only on the seed, so a failing test reproduces with the same
/// data, and two tests seeded from different names never collide in a shared
/// database.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TestDataBuilder {
    seed: u32,
}

impl TestDataBuilder {
    pub fn new(seed: u32) -> Self {
        Self { seed }
    }

    /// Seed from the test name with FNV-1a, stable across toolchains
    pub fn from_test_name(name: &str) -> Self {
        let seed = name.bytes().fold(0x811c_9dc5_u32, |hash, byte| {
            (hash ^ u32::from(byte)).wrapping_mul(0x0100_0193)
        });
        Self::new(seed)
    }

    /// `<local>-<seed>@test.example`
    pub fn email(&self, local: &str) -> String {
        format!("{}-{}@test.example", local, self.seed)
    }

    /// `test-<prefix>-<seed>-<suffix>`
    ///
    /// ```
    /// use test_utils::TestDataBuilder;
    ///
    /// let builder = TestDataBuilder::new(7);
    /// assert_eq!(builder.name("make", "ford"), "test-make-7-ford");
    /// ```
    pub fn name(&self, prefix: &str, suffix: &str) -> String {
        format!("test-{}-{}-{}", prefix, self.seed, suffix)
    }
}
