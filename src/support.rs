//! Supporting utilities used by the thermal models.
//!
//! - [`constraint`]: Type-level numeric constraints checked at construction.
//! - [`radiation`]: Stefan–Boltzmann radiative exchange helpers.
//! - [`units`]: Extensions to [`uom`] for absolute temperatures.

pub mod constraint;
pub mod radiation;
pub mod units;
