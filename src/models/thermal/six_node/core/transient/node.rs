//! Internal node expressed as a model and an ODE problem for the Euler solver.

use std::convert::Infallible;

use twine_core::{DerivativeOf, Model, OdeProblem, StepIntegrable};
use uom::si::{
    f64::{HeatCapacity, Power, TemperatureInterval, ThermodynamicTemperature, Time},
    heat_capacity::joule_per_kelvin,
    power::watt,
    temperature_interval::kelvin as delta_kelvin,
    thermodynamic_temperature::kelvin,
    time::second,
};

use crate::support::units::TemperatureDifference;

use super::{Sample, TransientSimulator};

/// Heat flows into and out of the internal node at one instant.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(super) struct NodeBalance {
    pub(super) heat_input: Power,
    pub(super) rejection: Power,
}

impl NodeBalance {
    fn net(&self) -> Power {
        self.heat_input - self.rejection
    }
}

/// Evaluates the heat balance of the internal node under a load `Q_in(t)`.
pub(super) struct NodeModel<'a, F> {
    simulator: &'a TransientSimulator,
    load: F,
}

impl<'a, F> NodeModel<'a, F>
where
    F: Fn(Time) -> Power,
{
    pub(super) fn new(simulator: &'a TransientSimulator, load: F) -> Self {
        Self { simulator, load }
    }

    pub(super) fn with_load<G>(self, load: G) -> NodeModel<'a, G>
    where
        G: Fn(Time) -> Power,
    {
        NodeModel {
            simulator: self.simulator,
            load,
        }
    }
}

impl<F> Model for NodeModel<'_, F>
where
    F: Fn(Time) -> Power,
{
    type Input = Sample;
    type Output = NodeBalance;
    type Error = Infallible;

    fn call(&self, input: &Self::Input) -> Result<Self::Output, Self::Error> {
        Ok(NodeBalance {
            heat_input: (self.load)(input.time),
            rejection: self.simulator.rejection(input.temperature),
        })
    }
}

/// Temperature of the internal node, stepped by the solver.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(super) struct NodeTemperature(ThermodynamicTemperature);

/// Temperature change of the internal node per second.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(super) struct TemperatureRate(TemperatureInterval);

impl StepIntegrable<Time> for NodeTemperature {
    type Derivative = TemperatureRate;

    fn step(&self, derivative: TemperatureRate, delta: Time) -> Self {
        Self(self.0.plus(derivative.0 * delta.get::<second>()))
    }
}

/// ODE problem `C·dT/dt = Q_in − Q_out` over the node temperature.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(super) struct NodeProblem {
    heat_capacity: HeatCapacity,
}

impl NodeProblem {
    pub(super) fn new(heat_capacity: HeatCapacity) -> Self {
        Self { heat_capacity }
    }
}

impl OdeProblem for NodeProblem {
    type Input = Sample;
    type Output = NodeBalance;
    type Delta = Time;
    type State = NodeTemperature;
    type Error = Infallible;

    fn state(&self, input: &Self::Input) -> Result<Self::State, Self::Error> {
        Ok(NodeTemperature(input.temperature))
    }

    fn derivative(
        &self,
        input: &Self::Input,
        output: &Self::Output,
    ) -> Result<DerivativeOf<Self::State, Self::Delta>, Self::Error> {
        let net = output.net().get::<watt>();

        log::trace!(
            "t = {:.1} s, T = {:.4} K, Q_net = {net:.3} W",
            input.time.get::<second>(),
            input.temperature.get::<kelvin>(),
        );

        let rate = net / self.heat_capacity.get::<joule_per_kelvin>();
        Ok(TemperatureRate(TemperatureInterval::new::<delta_kelvin>(rate)))
    }

    fn build_input(
        &self,
        base: &Self::Input,
        state: &Self::State,
        delta: &Self::Delta,
    ) -> Result<Self::Input, Self::Error> {
        Ok(Sample {
            time: base.time + *delta,
            temperature: state.0,
        })
    }
}
