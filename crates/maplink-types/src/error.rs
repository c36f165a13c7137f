//! Unified error interface for maplink.
//!
//! This module provides the [`ErrorCode`] trait for standardized
//! error handling across all maplink crates.
//!
//! # Design
//!
//! Every maplink error type implements [`ErrorCode`] to provide:
//!
//! - **Machine-readable codes**: a stable string code and a numeric code
//!   (the numeric form is what host platforms usually surface, e.g. as an
//!   error domain code)
//! - **Recoverability info**: for retry logic and user feedback
//!
//! # Example
//!
//! ```
//! use maplink_types::ErrorCode;
//!
//! #[derive(Debug)]
//! enum MyError {
//!     NotFound(String),
//!     Timeout,
//! }
//!
//! impl ErrorCode for MyError {
//!     fn code(&self) -> &'static str {
//!         match self {
//!             Self::NotFound(_) => "MY_NOT_FOUND",
//!             Self::Timeout => "MY_TIMEOUT",
//!         }
//!     }
//!
//!     fn numeric_code(&self) -> u32 {
//!         match self {
//!             Self::NotFound(_) => 9001,
//!             Self::Timeout => 9002,
//!         }
//!     }
//!
//!     fn is_recoverable(&self) -> bool {
//!         matches!(self, Self::Timeout)
//!     }
//! }
//!
//! let err = MyError::Timeout;
//! assert_eq!(err.code(), "MY_TIMEOUT");
//! assert_eq!(err.numeric_code(), 9002);
//! assert!(err.is_recoverable());
//! ```

/// Unified error code interface for maplink errors.
///
/// # Code Format
///
/// String codes are:
///
/// - **UPPER_SNAKE_CASE**: e.g., `"BRIDGE_NOT_LOADED"`
/// - **Namespace-prefixed**: `BRIDGE_`, `STYLE_`, `EVENT_`, `CONFIG_`
/// - **Stable**: codes do not change once defined (API contract)
///
/// Numeric codes are grouped per layer:
///
/// | Range | Layer |
/// |-------|-------|
/// | 1000-1999 | Bridge / executor |
/// | 2000-2999 | Style mutation queue |
/// | 3000-3999 | Inbound events |
/// | 4000-4999 | Configuration |
///
/// # Recoverability
///
/// An error is recoverable if retrying the operation may succeed
/// (the peer was not attached yet, a deadline expired). Caller misuse
/// such as duplicate identifiers is never recoverable.
pub trait ErrorCode {
    /// Returns a machine-readable error code in UPPER_SNAKE_CASE.
    fn code(&self) -> &'static str;

    /// Returns the numeric form of the error code.
    ///
    /// Two variants with different [`code`](Self::code) values must not
    /// share a numeric code.
    fn numeric_code(&self) -> u32;

    /// Returns whether the error is recoverable.
    ///
    /// - `true`: retry may succeed
    /// - `false`: retry will not help
    fn is_recoverable(&self) -> bool;
}

/// Validates that an error code follows maplink conventions.
///
/// # Checks
///
/// 1. Code is not empty
/// 2. Code starts with the expected prefix
/// 3. Code is UPPER_SNAKE_CASE
/// 4. Numeric code is non-zero
///
/// # Panics
///
/// Panics with a descriptive message if validation fails.
///
/// # Example
///
/// ```
/// use maplink_types::{ErrorCode, assert_error_code};
///
/// #[derive(Debug)]
/// enum MyError { Timeout }
///
/// impl ErrorCode for MyError {
///     fn code(&self) -> &'static str { "MY_TIMEOUT" }
///     fn numeric_code(&self) -> u32 { 9001 }
///     fn is_recoverable(&self) -> bool { true }
/// }
///
/// assert_error_code(&MyError::Timeout, "MY_");
/// ```
pub fn assert_error_code<E: ErrorCode>(err: &E, expected_prefix: &str) {
    let code = err.code();

    assert!(!code.is_empty(), "Error code must not be empty");

    assert!(
        code.starts_with(expected_prefix),
        "Error code '{}' must start with prefix '{}'",
        code,
        expected_prefix
    );

    assert!(
        is_upper_snake_case(code),
        "Error code '{}' must be UPPER_SNAKE_CASE",
        code
    );

    assert!(
        err.numeric_code() != 0,
        "Error code '{}' must have a non-zero numeric code",
        code
    );
}

/// Validates multiple error codes at once.
///
/// Besides the per-error checks of [`assert_error_code`], this verifies
/// that string codes and numeric codes map one-to-one across the given
/// errors. Use it with one value per variant of an error enum.
///
/// # Panics
///
/// Panics if any error fails validation or if two different string
/// codes share a numeric code (or vice versa).
pub fn assert_error_codes<E: ErrorCode>(errors: &[E], expected_prefix: &str) {
    let mut seen: Vec<(&'static str, u32)> = Vec::with_capacity(errors.len());

    for err in errors {
        assert_error_code(err, expected_prefix);

        let (code, numeric) = (err.code(), err.numeric_code());
        for &(other_code, other_numeric) in &seen {
            assert!(
                (other_code == code) == (other_numeric == numeric),
                "Error codes '{}' ({}) and '{}' ({}) are not one-to-one",
                code,
                numeric,
                other_code,
                other_numeric
            );
        }
        seen.push((code, numeric));
    }
}

/// Checks if a string is UPPER_SNAKE_CASE.
fn is_upper_snake_case(s: &str) -> bool {
    if s.is_empty() {
        return false;
    }

    if s.starts_with('_') || s.ends_with('_') {
        return false;
    }

    if s.contains("__") {
        return false;
    }

    s.chars()
        .all(|c| c.is_ascii_uppercase() || c.is_ascii_digit() || c == '_')
}
