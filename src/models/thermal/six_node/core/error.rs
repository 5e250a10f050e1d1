use thiserror::Error;
use twine_solvers::transient::euler;
use uom::si::f64::{Area, HeatFluxDensity, Power, ThermodynamicTemperature, Time};

use crate::support::constraint::ConstraintError;

/// Errors raised by the six-node thermal calculations.
///
/// Every variant is terminal for the calculation that raised it.
/// Results are deterministic functions of their inputs, so a retry would
/// fail the same way.
#[derive(Debug, Error)]
pub enum ThermalError {
    /// An input violates a physical invariant.
    ///
    /// Examples: a non-positive temperature or area, a negative flux, or an
    /// optical property outside `[0, 1]`.
    #[error("invalid physical parameter `{parameter}`")]
    InvalidPhysicalParameter {
        /// Name of the offending parameter.
        parameter: &'static str,

        /// The violated constraint.
        #[source]
        source: ConstraintError,
    },

    /// The radiator sizing balance has no physical solution.
    ///
    /// Either the radiator can't reject more than the insulation it replaces
    /// (`denominator ≤ 0`), or the required area falls outside
    /// `(0, available_area]`.
    #[error(
        "infeasible radiator sizing: required area {required_area:?} \
         outside (0, {available_area:?}]"
    )]
    InfeasibleSizing {
        /// Right-hand side of the area balance.
        numerator: Power,

        /// Net rejection of one square meter of radiator over insulation.
        denominator: HeatFluxDensity,

        /// Candidate area, possibly negative or non-finite.
        required_area: Area,

        /// Face area available for the radiator.
        available_area: Area,
    },

    /// The recovery phase hit its safety cap before reaching the target.
    #[error(
        "recovery not reached after {elapsed:?}: temperature {temperature:?} \
         still above target {target:?}"
    )]
    RecoveryNotReached {
        /// Simulated time when the cap was hit.
        elapsed: Time,

        /// Temperature when the cap was hit.
        temperature: ThermodynamicTemperature,

        /// Temperature the recovery was meant to reach.
        target: ThermodynamicTemperature,
    },

    /// The forward Euler integration of the internal node failed.
    #[error("transient integration failed")]
    Integration(#[from] euler::Error),
}

impl ThermalError {
    /// Returns a mapper from a [`ConstraintError`] to an invalid parameter error.
    pub(crate) fn invalid(parameter: &'static str) -> impl FnOnce(ConstraintError) -> Self {
        move |source| Self::InvalidPhysicalParameter { parameter, source }
    }
}
