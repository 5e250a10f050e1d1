use twine_solvers::equation::bisection;
use uom::si::{
    f64::{TemperatureInterval, Time},
    temperature_interval::kelvin as delta_kelvin,
    time::second,
};

/// Solver configuration for the maximum maneuver duration search.
#[derive(Debug, Clone, Copy)]
pub struct MaxDurationConfig {
    /// Maximum iteration count for the bisection solve.
    pub max_iters: usize,

    /// Absolute tolerance on the maneuver duration.
    pub duration_tol: Time,

    /// Absolute tolerance on the peak temperature residual (peak - limit).
    pub peak_tol: TemperatureInterval,
}

impl Default for MaxDurationConfig {
    fn default() -> Self {
        Self {
            max_iters: 100,
            duration_tol: Time::new::<second>(1e-6),
            peak_tol: TemperatureInterval::new::<delta_kelvin>(1e-9),
        }
    }
}

impl MaxDurationConfig {
    /// Converts this configuration into a bisection solver configuration.
    pub(super) fn bisection(&self) -> bisection::Config {
        bisection::Config {
            max_iters: self.max_iters,
            x_abs_tol: self.duration_tol.get::<second>(),
            x_rel_tol: 0.0,
            residual_tol: self.peak_tol.get::<delta_kelvin>(),
        }
    }
}
