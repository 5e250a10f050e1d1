//! Six-node satellite thermal models.
//!
//! This module provides [`twine_core::Model`] implementations for the
//! six-node balance. The computational core is in the internal `core` module;
//! its types are re-exported here.

mod core;

pub use self::core::{
    CaseBalance, CaseKind, CoatingLife, DurationLimit, Environment, FaceBalance, FaceBalanceSolver,
    FaceId, FaceKind, FaceReport, FluxScheme, Geometry, HeaterSizing, Heating, IncidentFlux, Layout,
    ManeuverLoads, ManeuverRecovery, ManeuverStudy, Materials, MaxDurationConfig, MaxDurationError,
    OpticalProperties, PerFace, RadiatorFace, RadiatorSizer, RadiatorSizing, Recovery,
    RecoveryScenario, Sample, SixNodeAnalysis, SixNodeConfig, SixNodeReport, ThermalCase,
    ThermalError, ThermalMass, Trajectory, TransientSimulator,
};

use twine_core::Model;
use uom::si::f64::{Area, ThermodynamicTemperature, Time};

/// Input of a [`FaceBalanceModel`] call.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FaceInput {
    /// Flux incident on the face.
    pub flux: IncidentFlux,

    /// Surface and insulation properties.
    pub optics: OpticalProperties,

    /// Internal node temperature.
    pub internal: ThermodynamicTemperature,

    /// Face area.
    pub area: Area,
}

/// Radiative equilibrium of one face.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct FaceBalanceModel {
    solver: FaceBalanceSolver,
}

impl FaceBalanceModel {
    /// Creates a model around `solver`.
    #[must_use]
    pub fn new(solver: FaceBalanceSolver) -> Self {
        Self { solver }
    }
}

impl Model for FaceBalanceModel {
    type Input = FaceInput;
    type Output = FaceBalance;
    type Error = ThermalError;

    fn call(&self, input: &Self::Input) -> Result<Self::Output, Self::Error> {
        self.solver
            .solve(&input.flux, &input.optics, input.internal, input.area)
    }
}

/// Full hot, cold and maneuver analysis of a configuration.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct SixNodeModel;

impl Model for SixNodeModel {
    type Input = SixNodeConfig;
    type Output = SixNodeReport;
    type Error = ThermalError;

    fn call(&self, input: &Self::Input) -> Result<Self::Output, Self::Error> {
        SixNodeAnalysis::new(*input).run()
    }
}

/// Recovery after a maneuver, keyed by the maneuver duration.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RecoveryModel {
    study: ManeuverStudy,
}

impl RecoveryModel {
    /// Creates a model around `study`.
    #[must_use]
    pub fn new(study: ManeuverStudy) -> Self {
        Self { study }
    }
}

impl Model for RecoveryModel {
    type Input = Time;
    type Output = ManeuverRecovery;
    type Error = ThermalError;

    fn call(&self, input: &Self::Input) -> Result<Self::Output, Self::Error> {
        self.study.recovery(*input)
    }
}
