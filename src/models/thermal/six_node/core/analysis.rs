//! End-to-end six-node analysis.
//!
//! Runs the hot case to size the radiator, the cold case to size heaters,
//! and a maneuver transient on the sized radiator.
//!
//! Heat loads for the transient are frozen at the case target temperature:
//! every face leak, the uncovered part of the radiator face and the flux
//! absorbed by the radiator are evaluated once, so the transient only sees
//! the radiator emission vary with temperature. With this convention the
//! hot-case load is rejected exactly at the hot-case target.

use uom::si::{
    area::square_meter,
    f64::{Area, Power, ThermodynamicTemperature},
    power::watt,
    ratio::ratio,
};

use crate::support::constraint::{ConstraintError, NonNegative, StrictlyPositive};

use super::{
    CaseKind, FaceBalance, FaceBalanceSolver, FaceId, FaceKind, HeaterSizing, Heating,
    ManeuverStudy, RadiatorFace, RadiatorSizer, RadiatorSizing, RecoveryScenario, SixNodeConfig,
    ThermalCase, ThermalError, TransientSimulator,
};

/// Balance of one non-radiator face.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FaceReport {
    /// Which face.
    pub face: FaceId,

    /// What covers it.
    pub kind: FaceKind,

    /// Equilibrium against the case target.
    pub balance: FaceBalance,
}

/// Face balances of one case.
#[derive(Debug, Clone, PartialEq)]
pub struct CaseBalance {
    /// Which case.
    pub kind: CaseKind,

    /// Every face except the radiator face, in reporting order.
    pub faces: Vec<FaceReport>,

    /// Sum of the face leaks, positive into the satellite.
    pub total_leak: Power,
}

impl CaseBalance {
    /// Returns the leaks of every reported face.
    pub fn leaks(&self) -> impl Iterator<Item = Power> + '_ {
        self.faces.iter().map(|report| report.balance.leak)
    }
}

/// Constant heat inputs bracketing a maneuver.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ManeuverLoads {
    /// Heat input in the nominal (hot case) attitude.
    pub nominal: Power,

    /// Heat input while the radiator faces the Sun.
    pub maneuver: Power,
}

/// Everything a six-node analysis produces.
#[derive(Debug, Clone, PartialEq)]
pub struct SixNodeReport {
    /// Hot case face balances.
    pub hot: CaseBalance,

    /// Radiator sized on the hot case.
    pub sizing: RadiatorSizing,

    /// Cold case face balances.
    pub cold: CaseBalance,

    /// Heater power for the cold case with the sized radiator.
    pub heaters: HeaterSizing,

    /// Loads before and during the maneuver.
    pub loads: ManeuverLoads,

    /// Heating during the reference maneuver.
    pub maneuver: Heating,
}

/// Runs the six-node calculations for a configuration.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct SixNodeAnalysis {
    config: SixNodeConfig,
}

impl SixNodeAnalysis {
    /// Creates an analysis of the given configuration.
    #[must_use]
    pub fn new(config: SixNodeConfig) -> Self {
        Self { config }
    }

    /// Returns the configuration being analyzed.
    #[must_use]
    pub fn config(&self) -> &SixNodeConfig {
        &self.config
    }

    /// Runs every case and the reference maneuver.
    ///
    /// # Errors
    ///
    /// Returns a [`ThermalError`] if any stage fails; see the individual
    /// stage methods.
    pub fn run(&self) -> Result<SixNodeReport, ThermalError> {
        let (hot, sizing) = self.size_radiator()?;
        let (cold, heaters) = self.size_heaters(sizing.area)?;
        let loads = self.maneuver_loads(sizing.area)?;

        let maneuver_load = loads.maneuver;
        let maneuver = self.simulator(sizing.area)?.heat(
            self.config.hot.target,
            move |_| maneuver_load,
            self.config.maneuver_duration,
        )?;

        log::debug!(
            "six-node analysis: radiator {:.4} m², heaters {:.2} W, maneuver {:.2} W -> {:.2} W",
            sizing.area.get::<square_meter>(),
            heaters.heater_power.get::<watt>(),
            loads.nominal.get::<watt>(),
            loads.maneuver.get::<watt>(),
        );

        Ok(SixNodeReport {
            hot,
            sizing,
            cold,
            heaters,
            loads,
            maneuver,
        })
    }

    /// Solves every non-radiator face of `case` at the case target.
    ///
    /// # Errors
    ///
    /// Returns [`ThermalError::InvalidPhysicalParameter`] for invalid fluxes,
    /// optics, target or geometry.
    pub fn balance(&self, case: &ThermalCase) -> Result<CaseBalance, ThermalError> {
        let solver = self.face_solver();
        let area = self.config.geometry.face_area();

        let faces = self
            .config
            .layout
            .others()
            .map(|(face, kind)| {
                let optics = self.config.materials.covering(kind);
                let balance = solver.solve(&case.fluxes[face], &optics, case.target, area)?;
                Ok(FaceReport {
                    face,
                    kind,
                    balance,
                })
            })
            .collect::<Result<Vec<_>, ThermalError>>()?;

        let total_leak = faces.iter().map(|report| report.balance.leak).sum();

        Ok(CaseBalance {
            kind: case.kind,
            faces,
            total_leak,
        })
    }

    /// Sizes the radiator on the hot case.
    ///
    /// # Errors
    ///
    /// Returns [`ThermalError::InfeasibleSizing`] when no area on the
    /// radiator face balances the hot case, or
    /// [`ThermalError::InvalidPhysicalParameter`] for invalid inputs.
    pub fn size_radiator(&self) -> Result<(CaseBalance, RadiatorSizing), ThermalError> {
        let case = &self.config.hot;
        let balance = self.balance(case)?;
        let sizing = self.sizer().size(
            case.dissipation,
            balance.leaks(),
            &self.radiator_face(case),
            case.target,
        )?;
        Ok((balance, sizing))
    }

    /// Computes the cold-case heater power with a radiator of `radiator_area`.
    ///
    /// # Errors
    ///
    /// Returns [`ThermalError::InvalidPhysicalParameter`] for invalid inputs
    /// or a radiator larger than its face.
    pub fn size_heaters(
        &self,
        radiator_area: Area,
    ) -> Result<(CaseBalance, HeaterSizing), ThermalError> {
        let case = &self.config.cold;
        let balance = self.balance(case)?;
        let heaters = self.sizer().heater_power(
            case.dissipation,
            balance.leaks(),
            &self.radiator_face(case),
            radiator_area,
            case.target,
        )?;
        Ok((balance, heaters))
    }

    /// Returns the constant heat input of `case` with a radiator of
    /// `radiator_area`, evaluated at the case target.
    ///
    /// Includes dissipation, every face leak, the leak through the uncovered
    /// part of the radiator face and the flux absorbed by the radiator.
    ///
    /// # Errors
    ///
    /// Returns [`ThermalError::InvalidPhysicalParameter`] for invalid inputs
    /// or a radiator area outside `[0, A_face]`.
    pub fn heat_input(
        &self,
        case: &ThermalCase,
        radiator_area: Area,
    ) -> Result<Power, ThermalError> {
        let face_area = self.config.geometry.face_area();
        let radiator_area = NonNegative::new(radiator_area)
            .map_err(ThermalError::invalid("radiator area"))?
            .into_inner();
        if radiator_area > face_area {
            return Err(ThermalError::InvalidPhysicalParameter {
                parameter: "radiator area",
                source: ConstraintError::AboveMaximum,
            });
        }

        let solver = self.face_solver();
        let radiator = self.radiator_face(case);
        let absorbed = solver.scheme().absorbed(&radiator.flux, &radiator.coating)?;
        let (_, uncovered) =
            solver.solve_density(&radiator.flux, &radiator.insulation, case.target)?;

        let leaks = self.balance(case)?.total_leak;
        let uncovered_area = face_area - radiator_area;

        let heat_input =
            case.dissipation + leaks + uncovered_area * uncovered + radiator_area * absorbed;
        Ok(heat_input)
    }

    /// Returns the nominal and maneuver heat inputs for a radiator of
    /// `radiator_area`.
    ///
    /// # Errors
    ///
    /// Same as [`SixNodeAnalysis::heat_input`].
    pub fn maneuver_loads(&self, radiator_area: Area) -> Result<ManeuverLoads, ThermalError> {
        Ok(ManeuverLoads {
            nominal: self.heat_input(&self.config.hot, radiator_area)?,
            maneuver: self.heat_input(&self.config.maneuver, radiator_area)?,
        })
    }

    /// Returns the transient simulator of the internal mass behind a
    /// radiator of `radiator_area` with the hot-case coating.
    ///
    /// # Errors
    ///
    /// Returns [`ThermalError::InvalidPhysicalParameter`] for a non-positive
    /// area, mass, specific heat or time step.
    pub fn simulator(&self, radiator_area: Area) -> Result<TransientSimulator, ThermalError> {
        let thermal_mass = &self.config.thermal_mass;
        let coating = self.config.materials.radiator(self.config.hot.coating_life);

        TransientSimulator::with_mass(
            self.config.sigma,
            radiator_area,
            coating.emissivity(),
            thermal_mass.mass,
            thermal_mass.specific_heat,
            thermal_mass.time_step,
        )
    }

    /// Builds a maneuver study on the radiator and loads of `report`.
    ///
    /// Recovery margin and safety cap keep their defaults.
    ///
    /// # Errors
    ///
    /// Same as [`SixNodeAnalysis::simulator`].
    pub fn maneuver_study(&self, report: &SixNodeReport) -> Result<ManeuverStudy, ThermalError> {
        let scenario = RecoveryScenario {
            nominal_temperature: self.config.hot.target,
            maneuver_load: report.loads.maneuver,
            nominal_load: report.loads.nominal,
            ..RecoveryScenario::default()
        };
        Ok(ManeuverStudy::new(self.simulator(report.sizing.area)?, scenario))
    }

    /// Temperature the nominal load holds with a radiator of `radiator_area`.
    ///
    /// # Errors
    ///
    /// Returns [`ThermalError::InvalidPhysicalParameter`] for a radiator area
    /// that isn't strictly positive, a nominal load the radiator would have
    /// to absorb rather than reject, or any error of
    /// [`SixNodeAnalysis::heat_input`].
    pub fn nominal_equilibrium(
        &self,
        radiator_area: Area,
    ) -> Result<ThermodynamicTemperature, ThermalError> {
        let radiator_area = StrictlyPositive::new(radiator_area)
            .map_err(ThermalError::invalid("radiator area"))?
            .into_inner();
        let load = self.heat_input(&self.config.hot, radiator_area)?;
        let load = NonNegative::new(load)
            .map_err(ThermalError::invalid("nominal load"))?
            .into_inner();

        let coating = self.config.materials.radiator(self.config.hot.coating_life);
        let density = load / radiator_area / coating.emissivity().get::<ratio>();

        Ok(self.config.sigma.temperature_for(density))
    }

    fn face_solver(&self) -> FaceBalanceSolver {
        FaceBalanceSolver::new(self.config.sigma, self.config.scheme)
    }

    fn sizer(&self) -> RadiatorSizer {
        RadiatorSizer::new(self.face_solver())
    }

    fn radiator_face(&self, case: &ThermalCase) -> RadiatorFace {
        let materials = &self.config.materials;
        RadiatorFace {
            flux: case.fluxes[self.config.layout.radiator()],
            coating: materials.radiator(case.coating_life),
            insulation: materials.covering(FaceKind::Radiator),
            area: self.config.geometry.face_area(),
        }
    }
}
