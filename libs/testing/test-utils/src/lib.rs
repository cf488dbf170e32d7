//! Shared test utilities for domain testing
//!
//! - `TestDataBuilder`: deterministic ids, titles and dates derived from a test name
//! - `assertions`: assertion helpers with readable failure messages
//! - `init_test_tracing`: route domain logs to the test output once per process
//!
//! # Usage
//!
//! ```rust
//! use test_utils::TestDataBuilder;
//!
//! let builder = TestDataBuilder::from_test_name("add_product");
//! let title = builder.title("product", "main");
//! assert!(title.starts_with("test-product-"));
//! ```

use chrono::{DateTime, Duration, TimeZone, Utc};
use core_config::{tracing::init_tracing, FromEnv, TracingConfig};
use std::sync::Once;
use uuid::Uuid;

static TRACING: Once = Once::new();

/// Initialize tracing for tests
///
/// Honors `APP_ENV`, `LOG_LEVEL` and `RUST_LOG`; falls back to the
/// development defaults when the environment cannot be parsed.
pub fn init_test_tracing() {
    TRACING.call_once(|| {
        let config = TracingConfig::from_env().unwrap_or_default();
        init_tracing(&config);
    });
}

/// Builder for test data with deterministic randomization
///
/// This ensures tests are reproducible by deriving everything from a seed.
pub struct TestDataBuilder {
    seed: u64,
}

impl TestDataBuilder {
    /// Create a new builder with a seed (for deterministic tests)
    pub fn new(seed: u64) -> Self {
        Self { seed }
    }

    /// Create from test name (generates seed from test name hash)
    ///
    /// ```
    /// use test_utils::TestDataBuilder;
    ///
    /// let builder = TestDataBuilder::from_test_name("test_cancel_invoice");
    /// ```
    pub fn from_test_name(name: &str) -> Self {
        use std::collections::hash_map::DefaultHasher;
        use std::hash::{Hash, Hasher};

        let mut hasher = DefaultHasher::new();
        name.hash(&mut hasher);
        Self::new(hasher.finish())
    }

    /// Deterministic id, distinct for each `n`
    ///
    /// Useful for ids that must not exist in any repository.
    pub fn id(&self, n: u64) -> Uuid {
        let mut uuid_bytes = [0u8; 16];
        uuid_bytes[..8].copy_from_slice(&self.seed.to_le_bytes());
        uuid_bytes[8..].copy_from_slice(&n.to_le_bytes());
        Uuid::from_bytes(uuid_bytes)
    }

    /// Generate a unique title for testing
    ///
    /// ```
    /// use test_utils::TestDataBuilder;
    ///
    /// let builder = TestDataBuilder::from_test_name("my_test");
    /// let title = builder.title("stock", "main");
    /// assert!(title.ends_with("-main"));
    /// ```
    pub fn title(&self, prefix: &str, suffix: &str) -> String {
        format!("test-{}-{}-{}", prefix, self.seed, suffix)
    }

    /// Fixed reference instant, 2024-01-01T00:00:00Z
    pub fn epoch(&self) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0)
            .single()
            .unwrap_or_default()
    }

    /// Reference instant shifted by whole days
    pub fn day(&self, offset: i64) -> DateTime<Utc> {
        self.epoch() + Duration::days(offset)
    }
}

/// Test assertion helpers
pub mod assertions {
    use uuid::Uuid;

    /// Assert that two UUIDs are equal with a nice error message
    pub fn assert_uuid_eq(actual: Uuid, expected: Uuid, context: &str) {
        assert_eq!(
            actual, expected,
            "{}: expected UUID {}, got {}",
            context, expected, actual
        );
    }

    /// Assert that an optional value is Some
    pub fn assert_some<T>(value: Option<T>, context: &str) -> T {
        value.unwrap_or_else(|| panic!("{}: expected Some, got None", context))
    }

    /// Assert that two amounts are equal within a cent
    pub fn assert_close(actual: f64, expected: f64, context: &str) {
        assert!(
            (actual - expected).abs() < 0.01,
            "{}: expected {}, got {}",
            context,
            expected,
            actual
        );
    }
}
