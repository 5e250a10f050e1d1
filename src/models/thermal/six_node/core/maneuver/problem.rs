//! Problem formulation for the maximum maneuver duration search.

use std::convert::Infallible;

use twine_core::{EquationProblem, Model};
use uom::si::{
    f64::{Power, ThermodynamicTemperature, Time},
    thermodynamic_temperature::kelvin,
    time::second,
};

use crate::models::thermal::six_node::core::{ThermalError, TransientSimulator};

/// Peak temperature reached by a maneuver of a given duration.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(super) struct PeakAtDuration {
    pub(super) duration: Time,
    pub(super) peak: ThermodynamicTemperature,
}

/// Model adapter exposing the maneuver duration as the sole input.
pub(super) struct PeakModel<'a> {
    simulator: &'a TransientSimulator,
    start: ThermodynamicTemperature,
    load: Power,
}

impl<'a> PeakModel<'a> {
    pub(super) fn new(
        simulator: &'a TransientSimulator,
        start: ThermodynamicTemperature,
        load: Power,
    ) -> Self {
        Self {
            simulator,
            start,
            load,
        }
    }
}

impl Model for PeakModel<'_> {
    type Input = Time;
    type Output = PeakAtDuration;
    type Error = ThermalError;

    fn call(&self, input: &Self::Input) -> Result<Self::Output, Self::Error> {
        let load = self.load;
        let peak = self.simulator.peak(self.start, move |_| load, *input)?;
        Ok(PeakAtDuration {
            duration: *input,
            peak,
        })
    }
}

/// Equation problem driving the peak temperature to a limit.
///
/// Computes the residual as `peak - limit`.
pub(super) struct PeakLimitProblem {
    limit: ThermodynamicTemperature,
}

impl PeakLimitProblem {
    pub(super) fn new(limit: ThermodynamicTemperature) -> Self {
        Self { limit }
    }
}

impl EquationProblem<1> for PeakLimitProblem {
    type Input = Time;
    type Output = PeakAtDuration;
    type Error = Infallible;

    fn input(&self, x: &[f64; 1]) -> Result<Self::Input, Self::Error> {
        Ok(Time::new::<second>(x[0]))
    }

    fn residuals(
        &self,
        _input: &Self::Input,
        output: &Self::Output,
    ) -> Result<[f64; 1], Self::Error> {
        Ok([output.peak.get::<kelvin>() - self.limit.get::<kelvin>()])
    }
}
