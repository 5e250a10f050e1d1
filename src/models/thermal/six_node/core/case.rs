use uom::si::{
    f64::{Power, ThermodynamicTemperature},
    power::watt,
    thermodynamic_temperature::degree_celsius,
};

use super::{Environment, FaceId, IncidentFlux, PerFace};

/// Which orbital scenario a case represents.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CaseKind {
    /// Worst-case hot orbit, used to size the radiator.
    Hot,
    /// Worst-case cold orbit (safe mode), used to size heaters.
    Cold,
    /// Attitude maneuver pointing the radiator at the Sun.
    Maneuver,
}

/// Which radiator coating properties apply to a case.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CoatingLife {
    /// Beginning of life: lowest solar absorptivity.
    Beginning,
    /// End of life: degraded, highest solar absorptivity.
    End,
}

/// A named thermal scenario.
///
/// Fluxes and coating life belong to one case and are never mixed with
/// another case's values.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ThermalCase {
    /// Scenario identity.
    pub kind: CaseKind,

    /// Internal temperature to hold.
    pub target: ThermodynamicTemperature,

    /// Internal dissipation.
    pub dissipation: Power,

    /// Flux incident on each face.
    pub fluxes: PerFace<IncidentFlux>,

    /// Radiator coating properties to use.
    pub coating_life: CoatingLife,
}

impl ThermalCase {
    /// Worst-case hot orbit.
    ///
    /// The `+Y` solar array faces the Sun, the nadir face sees Earth
    /// infrared, the side faces see grazing infrared, and the zenith
    /// radiator faces deep space. The interior is held at 25 °C with
    /// 117.5 W of dissipation.
    #[must_use]
    pub fn hot(environment: &Environment) -> Self {
        Self {
            kind: CaseKind::Hot,
            target: ThermodynamicTemperature::new::<degree_celsius>(25.0),
            dissipation: Power::new::<watt>(117.5),
            fluxes: PerFace::from_fn(|face| hot_flux(environment, face)),
            coating_life: CoatingLife::End,
        }
    }

    /// Safe mode in the dark at 0 °C with 20 W of dissipation.
    #[must_use]
    pub fn cold() -> Self {
        Self {
            kind: CaseKind::Cold,
            target: ThermodynamicTemperature::new::<degree_celsius>(0.0),
            dissipation: Power::new::<watt>(20.0),
            fluxes: PerFace::from_fn(|_| IncidentFlux::dark()),
            coating_life: CoatingLife::Beginning,
        }
    }

    /// Hot-case attitude rotated so the zenith radiator faces the Sun.
    ///
    /// The solar array is turned away; Earth and grazing infrared remain.
    #[must_use]
    pub fn maneuver(environment: &Environment) -> Self {
        Self {
            kind: CaseKind::Maneuver,
            fluxes: PerFace::from_fn(|face| match face {
                FaceId::PlusY => IncidentFlux::dark(),
                FaceId::MinusZ => IncidentFlux::from_solar(environment.solar_constant),
                _ => hot_flux(environment, face),
            }),
            ..Self::hot(environment)
        }
    }
}

fn hot_flux(environment: &Environment, face: FaceId) -> IncidentFlux {
    match face {
        FaceId::PlusY => IncidentFlux::from_solar(environment.solar_constant),
        FaceId::PlusZ => IncidentFlux::from_infrared(environment.earth_infrared),
        FaceId::MinusY => IncidentFlux::from_infrared(environment.anti_sun_infrared),
        FaceId::PlusX | FaceId::MinusX => IncidentFlux::from_infrared(environment.side_infrared),
        FaceId::MinusZ => IncidentFlux::dark(),
    }
}
