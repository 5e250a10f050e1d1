use std::cmp::Ordering;

use num_traits::Zero;
use uom::si::{f64::ThermodynamicTemperature, thermodynamic_temperature::kelvin};

use super::{Constrained, Constraint, ConstraintError};

/// Marker type for values greater than zero.
///
/// Used for face and radiator areas, absolute temperatures, heat capacities
/// and integration time steps.
///
/// # Examples
///
/// ```
/// use twine_satellite_thermal::support::constraint::StrictlyPositive;
/// use uom::si::{f64::ThermodynamicTemperature, thermodynamic_temperature::kelvin};
///
/// let t = StrictlyPositive::temperature(ThermodynamicTemperature::new::<kelvin>(298.15)).unwrap();
/// assert_eq!(t.get::<kelvin>(), 298.15);
///
/// assert!(StrictlyPositive::new(0.0).is_err());
/// assert!(StrictlyPositive::new(-1.0).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct StrictlyPositive;

impl StrictlyPositive {
    /// Constructs a [`Constrained<T, StrictlyPositive>`] if the value is strictly positive.
    ///
    /// # Errors
    ///
    /// Returns an error if the value is zero, negative, or not a number (`NaN`).
    pub fn new<T: PartialOrd + Zero>(
        value: T,
    ) -> Result<Constrained<T, StrictlyPositive>, ConstraintError> {
        Constrained::<T, StrictlyPositive>::new(value)
    }

    /// Checks that an absolute temperature lies above absolute zero.
    ///
    /// Absolute temperatures can't be added to each other in [`uom`], so they
    /// have no [`Zero`] and are checked in kelvin instead.
    ///
    /// # Errors
    ///
    /// Returns an error if the temperature is at or below absolute zero, or `NaN`.
    pub fn temperature(
        value: ThermodynamicTemperature,
    ) -> Result<ThermodynamicTemperature, ConstraintError> {
        Self::new(value.get::<kelvin>()).map(|_| value)
    }
}

impl<T: PartialOrd + Zero> Constraint<T> for StrictlyPositive {
    fn check(value: &T) -> Result<(), ConstraintError> {
        match value.partial_cmp(&T::zero()) {
            Some(Ordering::Greater) => Ok(()),
            Some(Ordering::Equal) => Err(ConstraintError::Zero),
            Some(Ordering::Less) => Err(ConstraintError::Negative),
            None => Err(ConstraintError::NotANumber),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use uom::si::{area::square_meter, f64::Area, thermodynamic_temperature::degree_celsius};

    #[test]
    fn floats() {
        assert!(StrictlyPositive::new(0.1).is_ok());
        assert_eq!(StrictlyPositive::new(0.0), Err(ConstraintError::Zero));
        assert_eq!(StrictlyPositive::new(-5.0), Err(ConstraintError::Negative));
        assert_eq!(
            StrictlyPositive::new(f64::NAN),
            Err(ConstraintError::NotANumber)
        );
    }

    #[test]
    fn areas() {
        assert!(StrictlyPositive::new(Area::new::<square_meter>(1.09)).is_ok());
        assert!(StrictlyPositive::new(Area::new::<square_meter>(0.0)).is_err());
    }

    #[test]
    fn absolute_temperatures() {
        // Sub-zero Celsius is still a positive absolute temperature.
        let cold = ThermodynamicTemperature::new::<degree_celsius>(-40.0);
        assert_eq!(StrictlyPositive::temperature(cold), Ok(cold));

        let absolute_zero = ThermodynamicTemperature::new::<kelvin>(0.0);
        assert_eq!(
            StrictlyPositive::temperature(absolute_zero),
            Err(ConstraintError::Zero)
        );
    }
}
