//! Fallible construction.
//!
//! | Pattern | Use When |
//! |---------|----------|
//! | `new()` | Construction always succeeds |
//! | [`TryNew`] | Construction requires validation |
//! | `TryFrom<T>` | Converting from another type |
//!
//! Types implementing [`TryNew`] do not also offer a plain `new()` that
//! performs the same validation. The `try_` prefix keeps fallibility
//! visible at the call site.

/// Trait for fallible construction with validation.
///
/// # Example
///
/// ```
/// use maplink_types::TryNew;
///
/// struct Zoom(f64);
///
/// #[derive(Debug, PartialEq)]
/// struct OutOfRange;
///
/// impl TryNew for Zoom {
///     type Error = OutOfRange;
///     type Args = f64;
///
///     fn try_new(value: f64) -> Result<Self, Self::Error> {
///         if !(0.0..=24.0).contains(&value) {
///             return Err(OutOfRange);
///         }
///         Ok(Zoom(value))
///     }
/// }
///
/// assert!(Zoom::try_new(3.5).is_ok());
/// assert_eq!(Zoom::try_new(40.0).err(), Some(OutOfRange));
/// ```
pub trait TryNew: Sized {
    /// Error returned when validation fails.
    type Error;

    /// Arguments required for construction (use a tuple for several).
    type Args;

    /// Attempts to construct a new instance.
    ///
    /// # Errors
    ///
    /// Returns [`Self::Error`] if validation fails.
    fn try_new(args: Self::Args) -> Result<Self, Self::Error>;
}
