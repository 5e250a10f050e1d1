//! Attitude maneuver heating and recovery.
//!
//! During a maneuver the radiator faces the Sun and the interior heats up
//! under a constant maneuver load. Once the nominal attitude is restored the
//! interior cools under the nominal load until it is back within a margin of
//! its nominal temperature.

mod config;
mod error;
mod problem;

pub use config::MaxDurationConfig;
pub use error::MaxDurationError;

use twine_core::Model;
use twine_solvers::equation::bisection;
use uom::si::{
    area::square_meter,
    f64::{
        Area, Mass, Power, Ratio, SpecificHeatCapacity, TemperatureInterval,
        ThermodynamicTemperature, Time,
    },
    mass::kilogram,
    power::watt,
    ratio::ratio,
    specific_heat_capacity::joule_per_kilogram_kelvin,
    temperature_interval::kelvin as delta_kelvin,
    thermodynamic_temperature::kelvin,
    time::second,
};

use crate::support::{
    constraint::NonNegative, radiation::StefanBoltzmann, units::TemperatureDifference,
};

use super::{ThermalError, TransientSimulator};

use problem::{PeakLimitProblem, PeakModel};

/// Loads and limits of a maneuver recovery.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RecoveryScenario {
    /// Temperature before the maneuver.
    pub nominal_temperature: ThermodynamicTemperature,

    /// Constant heat input during the maneuver.
    pub maneuver_load: Power,

    /// Constant heat input after the maneuver.
    pub nominal_load: Power,

    /// Recovery ends within this margin above the nominal temperature.
    pub recovery_margin: TemperatureInterval,

    /// Longest recovery simulated before giving up.
    pub safety_cap: Time,
}

impl Default for RecoveryScenario {
    /// 25 °C nominal, 262.4 W during and 214.2 W after the maneuver.
    fn default() -> Self {
        Self {
            nominal_temperature: ThermodynamicTemperature::new::<kelvin>(298.15),
            maneuver_load: Power::new::<watt>(262.4),
            nominal_load: Power::new::<watt>(214.2),
            recovery_margin: TemperatureInterval::new::<delta_kelvin>(0.1),
            safety_cap: Time::new::<second>(50_000.0),
        }
    }
}

/// Outcome of one maneuver followed by its recovery.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ManeuverRecovery {
    /// Length of the maneuver.
    pub duration: Time,

    /// Hottest temperature reached during the maneuver.
    pub peak_temperature: ThermodynamicTemperature,

    /// Time after the maneuver to get back within the margin.
    pub recovery_time: Time,
}

/// Longest maneuver keeping the peak temperature under a limit.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DurationLimit {
    /// Maneuvers longer than this exceed the limit.
    Limited(Time),

    /// No maneuver up to the search cap reaches the limit.
    Unbounded,
}

/// Maneuver recovery calculations on one radiator and thermal mass.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ManeuverStudy {
    simulator: TransientSimulator,
    scenario: RecoveryScenario,
}

impl ManeuverStudy {
    /// Creates a study of `scenario` on `simulator`.
    #[must_use]
    pub fn new(simulator: TransientSimulator, scenario: RecoveryScenario) -> Self {
        Self {
            simulator,
            scenario,
        }
    }

    /// The stand-alone recovery study: a 0.6 m² radiator at ε 0.8 over
    /// 14 kg of aluminum, stepped every second, with the default scenario.
    ///
    /// # Errors
    ///
    /// Never fails for these values; the result mirrors
    /// [`TransientSimulator::with_mass`].
    pub fn reference() -> Result<Self, ThermalError> {
        let simulator = TransientSimulator::with_mass(
            StefanBoltzmann::default(),
            Area::new::<square_meter>(0.6),
            Ratio::new::<ratio>(0.8),
            Mass::new::<kilogram>(14.0),
            SpecificHeatCapacity::new::<joule_per_kilogram_kelvin>(900.0),
            Time::new::<second>(1.0),
        )?;
        Ok(Self::new(simulator, RecoveryScenario::default()))
    }

    /// Returns the simulator.
    #[must_use]
    pub fn simulator(&self) -> &TransientSimulator {
        &self.simulator
    }

    /// Returns the scenario.
    #[must_use]
    pub fn scenario(&self) -> &RecoveryScenario {
        &self.scenario
    }

    /// Returns the temperature that ends a recovery.
    #[must_use]
    pub fn recovery_target(&self) -> ThermodynamicTemperature {
        self.scenario
            .nominal_temperature
            .plus(self.scenario.recovery_margin)
    }

    /// Simulates a maneuver of `duration` and the recovery after it.
    ///
    /// # Errors
    ///
    /// - [`ThermalError::RecoveryNotReached`] if the recovery hits the
    ///   safety cap, for instance when the nominal load holds the interior
    ///   above the recovery target. The reported elapsed time equals the cap.
    /// - [`ThermalError::InvalidPhysicalParameter`] for a negative or
    ///   non-finite duration, or an invalid scenario.
    pub fn recovery(&self, duration: Time) -> Result<ManeuverRecovery, ThermalError> {
        let scenario = &self.scenario;
        let maneuver_load = scenario.maneuver_load;
        let nominal_load = scenario.nominal_load;

        let peak_temperature = self.simulator.peak(
            scenario.nominal_temperature,
            move |_| maneuver_load,
            duration,
        )?;
        let recovery = self.simulator.recover(
            peak_temperature,
            move |_| nominal_load,
            self.recovery_target(),
            scenario.safety_cap,
        )?;

        log::debug!(
            "maneuver of {:.0} s: peak {:.3} K, recovery {:.0} s",
            duration.get::<second>(),
            peak_temperature.get::<kelvin>(),
            recovery.time.get::<second>(),
        );

        Ok(ManeuverRecovery {
            duration,
            peak_temperature,
            recovery_time: recovery.time,
        })
    }

    /// Runs [`ManeuverStudy::recovery`] for each duration.
    ///
    /// # Errors
    ///
    /// Returns the first error raised by any run.
    pub fn sweep(
        &self,
        durations: impl IntoIterator<Item = Time>,
    ) -> Result<Vec<ManeuverRecovery>, ThermalError> {
        durations
            .into_iter()
            .map(|duration| self.recovery(duration))
            .collect()
    }

    /// Finds the longest maneuver whose peak stays at or below `limit`.
    ///
    /// Searches durations in `[0, search_cap]` by bisection on the peak
    /// temperature. Returns [`DurationLimit::Limited`] with zero duration if
    /// the interior already starts at or above `limit`, and
    /// [`DurationLimit::Unbounded`] if a maneuver of `search_cap` stays under it.
    ///
    /// # Errors
    ///
    /// Returns [`MaxDurationError`] if a heating simulation fails, if the
    /// search cap is negative or infinite, or if the solver fails to converge.
    pub fn max_duration(
        &self,
        limit: ThermodynamicTemperature,
        search_cap: Time,
        config: &MaxDurationConfig,
    ) -> Result<DurationLimit, MaxDurationError> {
        let search_cap =
            NonNegative::duration(search_cap).map_err(ThermalError::invalid("search cap"))?;
        let start = self.scenario.nominal_temperature;

        if start >= limit {
            return Ok(DurationLimit::Limited(Time::new::<second>(0.0)));
        }

        let model = PeakModel::new(&self.simulator, start, self.scenario.maneuver_load);
        if model.call(&search_cap)?.peak <= limit {
            log::debug!(
                "peak stays under {:.2} K for {:.0} s",
                limit.get::<kelvin>(),
                search_cap.get::<second>(),
            );
            return Ok(DurationLimit::Unbounded);
        }

        let problem = PeakLimitProblem::new(limit);

        let solution = bisection::solve(
            &model,
            &problem,
            [0.0, search_cap.get::<second>()],
            &config.bisection(),
            |event: &bisection::Event<'_, _, _>| {
                // A failed run has no peak; treat it as too long.
                if event.result().is_err() {
                    return Some(bisection::Action::assume_positive());
                }
                None
            },
        )?;

        if solution.status != bisection::Status::Converged {
            return Err(MaxDurationError::MaxIters {
                residual: TemperatureInterval::new::<delta_kelvin>(solution.residual),
                iters: solution.iters,
            });
        }

        Ok(DurationLimit::Limited(solution.snapshot.output.duration))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;
    use uom::si::time::minute;

    use crate::{
        models::thermal::six_node::core::test_support::{kelvins, reference_simulator},
        support::constraint::ConstraintError,
    };

    fn study() -> ManeuverStudy {
        ManeuverStudy::reference().unwrap()
    }

    fn minutes(value: f64) -> Time {
        Time::new::<minute>(value)
    }

    #[test]
    fn ten_minute_maneuver() {
        let recovery = study().recovery(minutes(10.0)).unwrap();

        assert_relative_eq!(
            recovery.peak_temperature.get::<kelvin>(),
            300.2554,
            epsilon = 1e-3
        );
        assert_relative_eq!(
            recovery.recovery_time.get::<minute>(),
            130.35,
            epsilon = 0.1
        );
    }

    #[test]
    fn twenty_minute_maneuver_peak() {
        let recovery = study().recovery(minutes(20.0)).unwrap();

        assert_relative_eq!(
            recovery.peak_temperature.get::<kelvin>(),
            302.0852,
            epsilon = 1e-3
        );
    }

    #[test]
    fn reference_matches_the_shared_fixture() {
        let study = study();

        assert_eq!(study.simulator(), &reference_simulator());
        assert_relative_eq!(
            study.recovery_target().get::<kelvin>(),
            298.25,
            epsilon = 1e-9
        );
    }

    #[test]
    fn no_maneuver_needs_no_recovery() {
        let recovery = study().recovery(minutes(0.0)).unwrap();

        assert_relative_eq!(recovery.peak_temperature.get::<kelvin>(), 298.15);
        assert_relative_eq!(recovery.recovery_time.get::<second>(), 0.0);
    }

    #[test]
    fn longer_maneuvers_run_hotter_and_recover_later() {
        let runs = study().sweep([5.0, 10.0, 20.0, 30.0].map(minutes)).unwrap();

        assert_eq!(runs.len(), 4);
        for pair in runs.windows(2) {
            assert!(pair[1].peak_temperature > pair[0].peak_temperature);
            assert!(pair[1].recovery_time >= pair[0].recovery_time);
        }
        assert_eq!(runs[1], study().recovery(minutes(10.0)).unwrap());
    }

    #[test]
    fn recovery_fails_when_nominal_load_runs_too_hot() {
        let scenario = RecoveryScenario {
            nominal_load: Power::new::<watt>(262.4),
            safety_cap: Time::new::<second>(2_000.0),
            ..RecoveryScenario::default()
        };
        let err = ManeuverStudy::new(reference_simulator(), scenario)
            .recovery(minutes(10.0))
            .unwrap_err();

        let ThermalError::RecoveryNotReached { elapsed, .. } = err else {
            panic!("expected RecoveryNotReached, got {err:?}");
        };
        assert_relative_eq!(elapsed.get::<second>(), 2_000.0);
    }

    #[test]
    fn max_duration_under_300_kelvin() {
        let limit = kelvins(300.0);
        let found = study()
            .max_duration(limit, minutes(60.0), &MaxDurationConfig::default())
            .unwrap();

        let DurationLimit::Limited(duration) = found else {
            panic!("expected a limited duration, got {found:?}");
        };
        assert_relative_eq!(duration.get::<second>(), 522.605, epsilon = 1e-2);

        let peak = study().recovery(duration).unwrap().peak_temperature;
        assert_relative_eq!(peak.get::<kelvin>(), 300.0, epsilon = 1e-6);
    }

    #[test]
    fn max_duration_edge_cases() {
        let config = MaxDurationConfig::default();

        assert_eq!(
            study()
                .max_duration(kelvins(298.0), minutes(60.0), &config)
                .unwrap(),
            DurationLimit::Limited(Time::new::<second>(0.0))
        );

        // The maneuver load settles near 313.4 K.
        assert_eq!(
            study()
                .max_duration(kelvins(320.0), minutes(60.0), &config)
                .unwrap(),
            DurationLimit::Unbounded
        );
    }

    #[test]
    fn max_duration_rejects_negative_cap() {
        let err = study()
            .max_duration(kelvins(300.0), minutes(-1.0), &MaxDurationConfig::default())
            .unwrap_err();

        assert!(matches!(
            err,
            MaxDurationError::Thermal(ThermalError::InvalidPhysicalParameter {
                parameter: "search cap",
                ..
            })
        ));
    }

    #[test]
    fn max_duration_rejects_infinite_cap() {
        let err = study()
            .max_duration(
                kelvins(300.0),
                Time::new::<second>(f64::INFINITY),
                &MaxDurationConfig::default(),
            )
            .unwrap_err();

        assert!(matches!(
            err,
            MaxDurationError::Thermal(ThermalError::InvalidPhysicalParameter {
                parameter: "search cap",
                source: ConstraintError::Infinite,
            })
        ));
    }

    #[test]
    fn infinite_safety_cap_is_rejected() {
        let scenario = RecoveryScenario {
            safety_cap: Time::new::<second>(f64::INFINITY),
            ..RecoveryScenario::default()
        };
        let err = ManeuverStudy::new(reference_simulator(), scenario)
            .recovery(minutes(10.0))
            .unwrap_err();

        assert!(matches!(
            err,
            ThermalError::InvalidPhysicalParameter {
                parameter: "safety cap",
                source: ConstraintError::Infinite,
            }
        ));
    }
}
