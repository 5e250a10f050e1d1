//! Numeric constraints enforced when a value is constructed.
//!
//! Physical inputs to the thermal models carry simple invariants: an area
//! must be strictly positive, an incident flux must not be negative, and an
//! emissivity must lie in `[0, 1]`.
//! Wrapping a value in [`Constrained<T, C>`] checks the invariant once, so the
//! solvers downstream never need to re-validate it.
//!
//! # Provided constraints
//!
//! - [`NonNegative`]: Zero or greater
//! - [`StrictlyPositive`]: Greater than zero
//! - [`UnitInterval`]: Closed unit interval `0 ≤ x ≤ 1`
//!
//! Each marker provides an associated `new()` constructor
//! (e.g., `StrictlyPositive::new(0.6)`).

mod non_negative;
mod strictly_positive;
mod unit_interval;

use std::marker::PhantomData;

use thiserror::Error;

pub use non_negative::NonNegative;
pub use strictly_positive::StrictlyPositive;
pub use unit_interval::{UnitBounds, UnitInterval};

/// A numeric invariant checked at construction time.
pub trait Constraint<T> {
    /// Checks that the given value satisfies this constraint.
    ///
    /// # Errors
    ///
    /// Returns a [`ConstraintError`] if the value does not satisfy the constraint.
    fn check(value: &T) -> Result<(), ConstraintError>;
}

/// An error returned when a [`Constraint`] is violated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum ConstraintError {
    #[error("value must not be negative")]
    Negative,
    #[error("value must not be zero")]
    Zero,
    #[error("value is not a number")]
    NotANumber,
    #[error("value is below the minimum allowed")]
    BelowMinimum,
    #[error("value is above the maximum allowed")]
    AboveMaximum,
    #[error("value must be finite")]
    Infinite,
}

/// A value known to satisfy the constraint `C`.
///
/// # Example
///
/// ```
/// use twine_satellite_thermal::support::constraint::{Constrained, StrictlyPositive};
/// use uom::si::{area::square_meter, f64::Area};
///
/// let area = Constrained::<_, StrictlyPositive>::new(Area::new::<square_meter>(0.6)).unwrap();
/// assert_eq!(area.into_inner().get::<square_meter>(), 0.6);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub struct Constrained<T, C: Constraint<T>> {
    value: T,
    _marker: PhantomData<C>,
}

impl<T, C: Constraint<T>> Constrained<T, C> {
    /// Constructs a new constrained value.
    ///
    /// # Errors
    ///
    /// Returns an error if the value does not satisfy the constraint.
    pub fn new(value: T) -> Result<Self, ConstraintError> {
        C::check(&value)?;
        Ok(Self {
            value,
            _marker: PhantomData,
        })
    }

    /// Consumes the wrapper and returns the inner value.
    pub fn into_inner(self) -> T {
        self.value
    }
}
