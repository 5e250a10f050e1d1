use std::cmp::Ordering;

use num_traits::Zero;
use uom::si::f64::Time;

use super::{Constrained, Constraint, ConstraintError};

/// Marker type for values that are zero or greater.
///
/// Incident flux densities use this constraint: a face in deep-space view
/// receives no flux, but never a negative one.
///
/// # Examples
///
/// ```
/// use twine_satellite_thermal::support::constraint::NonNegative;
/// use uom::si::{f64::HeatFluxDensity, heat_flux_density::watt_per_square_meter};
///
/// let dark = NonNegative::new(HeatFluxDensity::new::<watt_per_square_meter>(0.0));
/// assert!(dark.is_ok());
///
/// assert!(NonNegative::new(-1.0).is_err());
/// assert!(NonNegative::new(f64::NAN).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct NonNegative;

impl NonNegative {
    /// Constructs a [`Constrained<T, NonNegative>`] if the value is non-negative.
    ///
    /// # Errors
    ///
    /// Returns an error if the value is negative or not a number (`NaN`).
    pub fn new<T: PartialOrd + Zero>(
        value: T,
    ) -> Result<Constrained<T, NonNegative>, ConstraintError> {
        Constrained::<T, NonNegative>::new(value)
    }

    /// Checks a span of simulated time: zero or longer, and finite.
    ///
    /// Integration loops step through the whole span, so an infinite one
    /// would never end.
    ///
    /// # Errors
    ///
    /// Returns an error if the span is negative, infinite, or `NaN`.
    pub fn duration(value: Time) -> Result<Time, ConstraintError> {
        let value = Self::new(value)?.into_inner();
        if value.is_finite() {
            Ok(value)
        } else {
            Err(ConstraintError::Infinite)
        }
    }
}

impl<T: PartialOrd + Zero> Constraint<T> for NonNegative {
    fn check(value: &T) -> Result<(), ConstraintError> {
        match value.partial_cmp(&T::zero()) {
            Some(Ordering::Greater | Ordering::Equal) => Ok(()),
            Some(Ordering::Less) => Err(ConstraintError::Negative),
            None => Err(ConstraintError::NotANumber),
        }
    }
}
