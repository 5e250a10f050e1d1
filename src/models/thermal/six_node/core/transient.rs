//! Lumped transient of the internal thermal mass.
//!
//! The interior is a single node of heat capacity `C = m·c_p` that rejects
//! heat only through the radiator:
//!
//! ```text
//! C·dT/dt = Q_in(t) − σ·ε·A·T⁴
//! ```
//!
//! The node is posed as a [`twine_core::Model`] and an
//! [`twine_core::OdeProblem`] and integrated with the fixed-step forward
//! Euler solver from [`twine_solvers::transient::euler`].
//! There is no step-size control: the scheme is only adequate while the
//! step is much shorter than the radiative time constant
//! `τ = C / (4·σ·ε·A·T³)`, which is about an hour for the reference design
//! against a one-second step.
//! Every integration logs a warning when `dt > τ/10`.

mod node;

use twine_solvers::transient::euler::{self, Action, Event, Status};
use uom::si::{
    area::square_meter,
    f64::{
        Area, HeatCapacity, Mass, Power, Ratio, SpecificHeatCapacity, ThermodynamicTemperature,
        Time,
    },
    heat_capacity::joule_per_kelvin,
    mass::kilogram,
    ratio::ratio,
    specific_heat_capacity::joule_per_kilogram_kelvin,
    thermodynamic_temperature::kelvin,
    time::second,
};

use crate::support::{
    constraint::{NonNegative, StrictlyPositive, UnitInterval},
    radiation::StefanBoltzmann,
};

use self::node::{NodeBalance, NodeModel, NodeProblem};

use super::ThermalError;

/// Full steps handed to the solver per call, bounding its history buffer.
const CHUNK_STEPS: usize = 4096;

/// Temperature of the internal node at a point in time.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sample {
    /// Time since the start of the trajectory.
    pub time: Time,

    /// Internal temperature.
    pub temperature: ThermodynamicTemperature,
}

/// Outcome of a fixed-duration heating phase.
#[derive(Debug, Clone, PartialEq)]
pub struct Heating {
    /// Every sample, starting with the initial state.
    pub samples: Vec<Sample>,

    /// Hottest sample.
    pub peak: Sample,

    /// Final sample.
    pub end: Sample,
}

/// Outcome of a recovery phase.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Recovery {
    /// Time needed to reach the target.
    pub time: Time,

    /// Temperature when the target was reached.
    pub temperature: ThermodynamicTemperature,
}

/// Forward Euler integrator for the internal node temperature.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TransientSimulator {
    sigma: StefanBoltzmann,
    radiator_area: Area,
    radiator_emissivity: Ratio,
    heat_capacity: HeatCapacity,
    time_step: Time,
}

impl TransientSimulator {
    /// Creates a simulator for a radiator of the given area and emissivity.
    ///
    /// # Errors
    ///
    /// Returns [`ThermalError::InvalidPhysicalParameter`] if the area, heat
    /// capacity or time step isn't strictly positive, or if the emissivity
    /// lies outside `[0, 1]`.
    pub fn new(
        sigma: StefanBoltzmann,
        radiator_area: Area,
        radiator_emissivity: Ratio,
        heat_capacity: HeatCapacity,
        time_step: Time,
    ) -> Result<Self, ThermalError> {
        let radiator_area = StrictlyPositive::new(radiator_area)
            .map_err(ThermalError::invalid("radiator area"))?;
        let radiator_emissivity = UnitInterval::new(radiator_emissivity)
            .map_err(ThermalError::invalid("radiator emissivity"))?;
        let heat_capacity = StrictlyPositive::new(heat_capacity)
            .map_err(ThermalError::invalid("heat capacity"))?;
        let time_step =
            StrictlyPositive::new(time_step).map_err(ThermalError::invalid("time step"))?;

        Ok(Self {
            sigma,
            radiator_area: radiator_area.into_inner(),
            radiator_emissivity: radiator_emissivity.into_inner(),
            heat_capacity: heat_capacity.into_inner(),
            time_step: time_step.into_inner(),
        })
    }

    /// Creates a simulator whose thermal mass is `mass·specific_heat`.
    ///
    /// # Errors
    ///
    /// Same as [`TransientSimulator::new`].
    pub fn with_mass(
        sigma: StefanBoltzmann,
        radiator_area: Area,
        radiator_emissivity: Ratio,
        mass: Mass,
        specific_heat: SpecificHeatCapacity,
        time_step: Time,
    ) -> Result<Self, ThermalError> {
        let heat_capacity = HeatCapacity::new::<joule_per_kelvin>(
            mass.get::<kilogram>() * specific_heat.get::<joule_per_kilogram_kelvin>(),
        );
        Self::new(
            sigma,
            radiator_area,
            radiator_emissivity,
            heat_capacity,
            time_step,
        )
    }

    /// Returns the fixed integration step.
    #[must_use]
    pub fn time_step(&self) -> Time {
        self.time_step
    }

    /// Returns the heat rejected by the radiator at `temperature`.
    #[must_use]
    pub fn rejection(&self, temperature: ThermodynamicTemperature) -> Power {
        let emissivity = self.radiator_emissivity;
        self.radiator_area * self.sigma.emitted_flux(emissivity, temperature)
    }

    /// Returns the radiative time constant `C / (4·σ·ε·A·T³)` at `temperature`.
    #[must_use]
    pub fn time_constant(&self, temperature: ThermodynamicTemperature) -> Time {
        let conductance = 4.0
            * self.sigma.value()
            * self.radiator_emissivity.get::<ratio>()
            * self.radiator_area.get::<square_meter>()
            * temperature.get::<kelvin>().powi(3);
        Time::new::<second>(self.heat_capacity.get::<joule_per_kelvin>() / conductance)
    }

    /// Starts a trajectory from `initial` under the heat input `load(t)`.
    ///
    /// The trajectory is an endless iterator of samples, one per time step;
    /// callers decide when to stop.
    ///
    /// # Errors
    ///
    /// Returns [`ThermalError::InvalidPhysicalParameter`] if `initial` isn't
    /// strictly positive.
    pub fn trajectory<F>(
        &self,
        initial: ThermodynamicTemperature,
        load: F,
    ) -> Result<Trajectory<'_, F>, ThermalError>
    where
        F: Fn(Time) -> Power,
    {
        Ok(Trajectory {
            current: self.start(initial)?,
            model: NodeModel::new(self, load),
            problem: self.problem(),
            time_step: self.time_step,
        })
    }

    /// Integrates a heating phase of fixed `duration`.
    ///
    /// Takes `⌊duration/dt⌋` full steps plus one partial step for any
    /// remainder, so the peak varies continuously with `duration`.
    ///
    /// # Errors
    ///
    /// Returns [`ThermalError::InvalidPhysicalParameter`] for a negative or
    /// non-finite duration, or a non-positive initial temperature.
    pub fn heat<F>(
        &self,
        initial: ThermodynamicTemperature,
        load: F,
        duration: Time,
    ) -> Result<Heating, ThermalError>
    where
        F: Fn(Time) -> Power,
    {
        let mut samples = Vec::new();
        let end = self.heating_phase(initial, load, duration, |sample| samples.push(sample))?;

        let peak = samples
            .iter()
            .copied()
            .reduce(|hottest, sample| {
                if sample.temperature > hottest.temperature {
                    sample
                } else {
                    hottest
                }
            })
            .unwrap_or(end);

        Ok(Heating { samples, peak, end })
    }

    /// Returns the peak temperature of a heating phase without keeping samples.
    ///
    /// # Errors
    ///
    /// Same as [`TransientSimulator::heat`].
    pub fn peak<F>(
        &self,
        initial: ThermodynamicTemperature,
        load: F,
        duration: Time,
    ) -> Result<ThermodynamicTemperature, ThermalError>
    where
        F: Fn(Time) -> Power,
    {
        let mut peak = initial;
        self.heating_phase(initial, load, duration, |sample| {
            if sample.temperature > peak {
                peak = sample.temperature;
            }
        })?;
        Ok(peak)
    }

    /// Integrates until the temperature falls to `target`.
    ///
    /// Returns zero time if `initial` is already at or below `target`.
    /// The integration never runs past `cap`: a cap that isn't a whole
    /// number of steps ends with a partial step.
    ///
    /// # Errors
    ///
    /// - [`ThermalError::RecoveryNotReached`] if `cap` elapses first.
    /// - [`ThermalError::InvalidPhysicalParameter`] for non-positive
    ///   temperatures or a negative or non-finite cap.
    pub fn recover<F>(
        &self,
        initial: ThermodynamicTemperature,
        load: F,
        target: ThermodynamicTemperature,
        cap: Time,
    ) -> Result<Recovery, ThermalError>
    where
        F: Fn(Time) -> Power,
    {
        let target = StrictlyPositive::temperature(target)
            .map_err(ThermalError::invalid("target temperature"))?;
        let cap = NonNegative::duration(cap).map_err(ThermalError::invalid("safety cap"))?;

        let start = self.start(initial)?;
        if start.temperature <= target {
            return Ok(Recovery {
                time: start.time,
                temperature: start.temperature,
            });
        }

        let mut reached = None;
        let (status, last) = self.integrate(load, start, cap, |sample| {
            if sample.temperature <= target {
                reached = Some(sample);
                Some(Action::StopEarly)
            } else {
                None
            }
        })?;

        match (status, reached) {
            (Status::StoppedByObserver, Some(sample)) => {
                log::debug!(
                    "recovered to {:.2} K in {:.0} s",
                    target.get::<kelvin>(),
                    sample.time.get::<second>(),
                );
                Ok(Recovery {
                    time: sample.time,
                    temperature: sample.temperature,
                })
            }
            _ => Err(ThermalError::RecoveryNotReached {
                elapsed: last.time,
                temperature: last.temperature,
                target,
            }),
        }
    }

    fn heating_phase<F>(
        &self,
        initial: ThermodynamicTemperature,
        load: F,
        duration: Time,
        mut observe: impl FnMut(Sample),
    ) -> Result<Sample, ThermalError>
    where
        F: Fn(Time) -> Power,
    {
        let duration =
            NonNegative::duration(duration).map_err(ThermalError::invalid("duration"))?;

        let start = self.start(initial)?;
        observe(start);

        let (_, end) = self.integrate(load, start, duration, |sample| {
            observe(sample);
            None
        })?;
        Ok(end)
    }

    /// Validates the initial temperature and checks the step against `τ`.
    fn start(&self, initial: ThermodynamicTemperature) -> Result<Sample, ThermalError> {
        let initial = StrictlyPositive::temperature(initial)
            .map_err(ThermalError::invalid("initial temperature"))?;

        let tau = self.time_constant(initial).get::<second>();
        let dt = self.time_step.get::<second>();
        if dt > tau / 10.0 {
            log::warn!(
                "time step {dt} s is not small against the radiative time constant {tau:.1} s; \
                 explicit Euler results may be inaccurate",
            );
        }

        Ok(Sample {
            time: Time::new::<second>(0.0),
            temperature: initial,
        })
    }

    fn problem(&self) -> NodeProblem {
        NodeProblem::new(self.heat_capacity)
    }

    /// Integrates from `start` over exactly `span`.
    ///
    /// Runs `⌊span/dt⌋` full steps in chunks, then one partial step for any
    /// remainder. Stops as soon as `observe` asks to.
    fn integrate<F>(
        &self,
        load: F,
        start: Sample,
        span: Time,
        mut observe: impl FnMut(Sample) -> Option<Action>,
    ) -> Result<(Status, Sample), ThermalError>
    where
        F: Fn(Time) -> Power,
    {
        let model = NodeModel::new(self, load);
        let problem = self.problem();
        let dt = self.time_step;

        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        let full_steps = (span.get::<second>() / dt.get::<second>()).floor() as usize;

        let mut current = start;
        let mut remaining = full_steps;
        while remaining > 0 {
            let steps = remaining.min(CHUNK_STEPS);
            let (status, end) = advance(&model, &problem, current, dt, steps, &mut observe)?;
            current = end;
            if status == Status::StoppedByObserver {
                return Ok((status, current));
            }
            remaining -= steps;
        }

        #[allow(clippy::cast_precision_loss)]
        let remainder = span - dt * full_steps as f64;
        if remainder > dt * 1e-9 {
            return advance(&model, &problem, current, remainder, 1, &mut observe);
        }

        Ok((Status::Complete, current))
    }
}

/// Runs `steps` Euler steps of size `dt` from `start`.
///
/// The observer sees every sample after `start`.
fn advance<F>(
    model: &NodeModel<'_, F>,
    problem: &NodeProblem,
    start: Sample,
    dt: Time,
    steps: usize,
    observe: &mut impl FnMut(Sample) -> Option<Action>,
) -> Result<(Status, Sample), ThermalError>
where
    F: Fn(Time) -> Power,
{
    let solution = euler::solve(
        model,
        problem,
        start,
        dt,
        steps,
        |event: &Event<Sample, NodeBalance>| {
            if event.step == 0 {
                None
            } else {
                observe(event.snapshot.input)
            }
        },
    )?;

    let end = solution
        .history
        .last()
        .map_or(start, |snapshot| snapshot.input);
    Ok((solution.status, end))
}

/// A lazily integrated temperature history.
///
/// Each call to [`Iterator::next`] advances one fixed time step and never
/// returns `None`.
/// The trajectory can switch heat inputs mid-flight with
/// [`Trajectory::with_load`], keeping its time and temperature.
pub struct Trajectory<'a, F> {
    model: NodeModel<'a, F>,
    problem: NodeProblem,
    current: Sample,
    time_step: Time,
}

impl<'a, F> Trajectory<'a, F>
where
    F: Fn(Time) -> Power,
{
    /// Returns the current state without advancing.
    #[must_use]
    pub fn current(&self) -> Sample {
        self.current
    }

    /// Continues from the current state under a different heat input.
    pub fn with_load<G>(self, load: G) -> Trajectory<'a, G>
    where
        G: Fn(Time) -> Power,
    {
        Trajectory {
            model: self.model.with_load(load),
            problem: self.problem,
            current: self.current,
            time_step: self.time_step,
        }
    }
}

impl<F> Iterator for Trajectory<'_, F>
where
    F: Fn(Time) -> Power,
{
    type Item = Sample;

    fn next(&mut self) -> Option<Sample> {
        let (_, next) = advance(
            &self.model,
            &self.problem,
            self.current,
            self.time_step,
            1,
            &mut |_| None,
        )
        .ok()?;
        self.current = next;
        Some(next)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;
    use uom::si::time::minute;

    use crate::{
        models::thermal::six_node::core::test_support::{
            constant, kelvins, reference_simulator, watts,
        },
        support::constraint::ConstraintError,
    };

    #[test]
    fn ten_minute_maneuver_warms_slightly() {
        let simulator = reference_simulator();
        let heating = simulator
            .heat(
                kelvins(298.15),
                constant(watts(262.4)),
                Time::new::<minute>(10.0),
            )
            .unwrap();

        let end = heating.end.temperature.get::<kelvin>();
        assert!(end > 298.15 && end < 310.0);
        assert_relative_eq!(end, 300.2554, epsilon = 1e-3);
        assert_eq!(heating.samples.len(), 601);
        assert_relative_eq!(heating.end.time.get::<second>(), 600.0);
        assert_eq!(heating.peak, heating.end);
    }

    #[test]
    fn direction_follows_initial_balance() {
        let simulator = reference_simulator();
        let initial = kelvins(298.15);
        let q_out = simulator.rejection(initial);

        let mut warming = simulator
            .trajectory(initial, constant(q_out + watts(10.0)))
            .unwrap();
        assert!(warming.next().unwrap().temperature > initial);

        let mut cooling = simulator
            .trajectory(initial, constant(q_out - watts(10.0)))
            .unwrap();
        assert!(cooling.next().unwrap().temperature < initial);
    }

    #[test]
    fn recovery_is_finite_and_grows_with_start_temperature() {
        let simulator = reference_simulator();
        let target = kelvins(298.25);
        let cap = Time::new::<second>(50_000.0);

        let mut previous = Time::new::<second>(0.0);
        for start in [298.4, 300.0, 302.0, 305.0] {
            let recovery = simulator
                .recover(kelvins(start), constant(watts(214.2)), target, cap)
                .unwrap();

            assert!(recovery.time > Time::new::<second>(0.0));
            assert!(recovery.time < cap);
            assert!(recovery.temperature <= target);
            assert!(recovery.time >= previous);
            previous = recovery.time;
        }
    }

    #[test]
    fn recovery_below_target_takes_no_time() {
        let recovery = reference_simulator()
            .recover(
                kelvins(298.0),
                constant(watts(214.2)),
                kelvins(298.25),
                Time::new::<second>(100.0),
            )
            .unwrap();

        assert_eq!(recovery.time, Time::new::<second>(0.0));
    }

    #[test]
    fn unreachable_target_hits_the_cap() {
        // 214.2 W holds the interior near 297.85 K, above this target.
        let err = reference_simulator()
            .recover(
                kelvins(300.0),
                constant(watts(214.2)),
                kelvins(297.0),
                Time::new::<second>(5_000.0),
            )
            .unwrap_err();

        match err {
            ThermalError::RecoveryNotReached {
                elapsed,
                temperature,
                target,
            } => {
                assert_relative_eq!(elapsed.get::<second>(), 5_000.0);
                assert!(temperature > target);
            }
            other => panic!("Expected RecoveryNotReached, got: {other:?}"),
        }
    }

    #[test]
    fn cap_shorter_than_a_step_is_honored() {
        let err = reference_simulator()
            .recover(
                kelvins(300.0),
                constant(watts(214.2)),
                kelvins(297.0),
                Time::new::<second>(0.25),
            )
            .unwrap_err();

        match err {
            ThermalError::RecoveryNotReached { elapsed, .. } => {
                assert_relative_eq!(elapsed.get::<second>(), 0.25);
            }
            other => panic!("Expected RecoveryNotReached, got: {other:?}"),
        }
    }

    #[test]
    fn cap_is_not_rounded_up_to_a_whole_step() {
        let err = reference_simulator()
            .recover(
                kelvins(300.0),
                constant(watts(214.2)),
                kelvins(297.0),
                Time::new::<second>(10.5),
            )
            .unwrap_err();

        match err {
            ThermalError::RecoveryNotReached { elapsed, .. } => {
                assert_relative_eq!(elapsed.get::<second>(), 10.5);
            }
            other => panic!("Expected RecoveryNotReached, got: {other:?}"),
        }
    }

    #[test]
    fn rejects_non_finite_spans() {
        let simulator = reference_simulator();
        let infinite = Time::new::<second>(f64::INFINITY);

        let err = simulator
            .heat(kelvins(298.15), constant(watts(262.4)), infinite)
            .unwrap_err();
        assert!(matches!(
            err,
            ThermalError::InvalidPhysicalParameter {
                parameter: "duration",
                source: ConstraintError::Infinite,
            }
        ));

        let err = simulator
            .recover(
                kelvins(300.0),
                constant(watts(214.2)),
                kelvins(298.25),
                infinite,
            )
            .unwrap_err();
        assert!(matches!(
            err,
            ThermalError::InvalidPhysicalParameter {
                parameter: "safety cap",
                source: ConstraintError::Infinite,
            }
        ));
    }

    #[test]
    fn long_recovery_spans_several_solver_calls() {
        let simulator = reference_simulator();
        let recovery = simulator
            .recover(
                kelvins(305.0),
                constant(watts(214.2)),
                kelvins(298.25),
                Time::new::<second>(50_000.0),
            )
            .unwrap();

        let mut trajectory = simulator
            .trajectory(kelvins(305.0), constant(watts(214.2)))
            .unwrap();
        let stepped = trajectory
            .find(|sample| sample.temperature <= kelvins(298.25))
            .unwrap();

        assert!(recovery.time.get::<second>() > 4096.0);
        assert_eq!(recovery.time, stepped.time);
        assert_eq!(recovery.temperature, stepped.temperature);
    }

    #[test]
    fn partial_step_keeps_peak_continuous() {
        let simulator = reference_simulator();
        let load = watts(262.4);

        let whole = simulator
            .peak(kelvins(298.15), constant(load), Time::new::<second>(100.0))
            .unwrap();
        let partial = simulator
            .peak(kelvins(298.15), constant(load), Time::new::<second>(100.5))
            .unwrap();
        let next = simulator
            .peak(kelvins(298.15), constant(load), Time::new::<second>(101.0))
            .unwrap();

        assert!(whole < partial && partial < next);
    }

    #[test]
    fn switching_load_continues_from_current_state() {
        let simulator = reference_simulator();
        let mut heating = simulator
            .trajectory(kelvins(298.15), constant(watts(262.4)))
            .unwrap();
        let hot = heating.nth(59).unwrap();

        let mut cooling = heating.with_load(constant(watts(100.0)));
        assert_eq!(cooling.current(), hot);

        let next = cooling.next().unwrap();
        assert_relative_eq!(next.time.get::<second>(), 61.0);
        assert!(next.temperature < hot.temperature);
    }

    #[test]
    fn time_constant_dwarfs_the_step() {
        let simulator = reference_simulator();
        let tau = simulator.time_constant(kelvins(298.15));

        assert_relative_eq!(tau.get::<second>(), 4366.99, epsilon = 0.01);
        assert!(simulator.time_step() < tau / 1000.0);
    }

    #[test]
    fn rejects_invalid_configuration() {
        let err = TransientSimulator::new(
            StefanBoltzmann::default(),
            Area::new::<square_meter>(0.6),
            Ratio::new::<ratio>(1.5),
            HeatCapacity::new::<joule_per_kelvin>(12_600.0),
            Time::new::<second>(1.0),
        )
        .unwrap_err();

        assert!(matches!(
            err,
            ThermalError::InvalidPhysicalParameter {
                parameter: "radiator emissivity",
                ..
            }
        ));
    }
}
