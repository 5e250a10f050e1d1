//! Six-node thermal balance of a cube satellite.
//!
//! One node per external face plus a single internal node.
//! Face skin temperatures and leaks follow in closed form from radiative
//! equilibrium, the radiator area and heater power follow from linear
//! balances, and the internal node's transient is integrated with the
//! fixed-step forward Euler solver of `twine-solvers`.

mod analysis;
mod case;
mod config;
mod error;
mod face;
mod face_balance;
mod flux;
mod maneuver;
mod optics;
mod radiator;
mod transient;

#[cfg(test)]
mod test_support;

pub use analysis::{CaseBalance, FaceReport, ManeuverLoads, SixNodeAnalysis, SixNodeReport};
pub use case::{CaseKind, CoatingLife, ThermalCase};
pub use config::{Environment, Geometry, Layout, Materials, SixNodeConfig, ThermalMass};
pub use error::ThermalError;
pub use face::{FaceId, FaceKind, PerFace};
pub use face_balance::{FaceBalance, FaceBalanceSolver};
pub use flux::{FluxScheme, IncidentFlux};
pub use maneuver::{
    DurationLimit, ManeuverRecovery, ManeuverStudy, MaxDurationConfig, MaxDurationError,
    RecoveryScenario,
};
pub use optics::OpticalProperties;
pub use radiator::{HeaterSizing, RadiatorFace, RadiatorSizer, RadiatorSizing};
pub use transient::{Heating, Recovery, Sample, Trajectory, TransientSimulator};
