//! Extensions to [`uom`].
//!
//! This crate uses [`uom`] for all physical units (e.g., temperature, heat flux, power).
//!
//! ## Absolute temperatures and intervals
//!
//! [`uom`] keeps absolute temperatures ([`ThermodynamicTemperature`]) and
//! temperature differences ([`TemperatureInterval`]) as distinct kinds, but
//! doesn't provide arithmetic between them.
//! The [`TemperatureDifference`] trait fills that gap:
//!
//! ```
//! use uom::si::{
//!     f64::{TemperatureInterval, ThermodynamicTemperature},
//!     temperature_interval::kelvin as delta_kelvin,
//!     thermodynamic_temperature::kelvin,
//! };
//! use twine_satellite_thermal::support::units::TemperatureDifference;
//!
//! let nominal = ThermodynamicTemperature::new::<kelvin>(298.15);
//! let target = nominal.plus(TemperatureInterval::new::<delta_kelvin>(0.1));
//! assert!((target.minus(nominal).get::<delta_kelvin>() - 0.1).abs() < 1e-12);
//! ```
//!
//! [`ThermodynamicTemperature`]: uom::si::f64::ThermodynamicTemperature
//! [`TemperatureInterval`]: uom::si::f64::TemperatureInterval

mod temperature_difference;

pub use temperature_difference::TemperatureDifference;
