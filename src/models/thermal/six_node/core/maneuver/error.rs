use thiserror::Error;
use twine_solvers::equation::bisection;
use uom::si::f64::TemperatureInterval;

use crate::models::thermal::six_node::core::ThermalError;

/// Errors that can occur while searching for the longest allowed maneuver.
#[derive(Debug, Error)]
pub enum MaxDurationError {
    /// A heating simulation failed.
    #[error("heating simulation failed")]
    Thermal(#[from] ThermalError),

    /// The bisection solver encountered an error.
    #[error("bisection solver error")]
    Bisection(#[from] bisection::Error),

    /// The solver reached the iteration limit without converging.
    #[error("solver hit iteration limit: residual={residual:?}")]
    MaxIters {
        /// Best peak temperature residual achieved.
        residual: TemperatureInterval,

        /// Iteration count performed by the solver.
        iters: usize,
    },
}
