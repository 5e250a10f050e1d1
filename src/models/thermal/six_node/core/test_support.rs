use uom::si::{
    area::square_meter,
    f64::{Area, Mass, Power, Ratio, SpecificHeatCapacity, ThermodynamicTemperature, Time},
    mass::kilogram,
    power::watt,
    ratio::ratio,
    specific_heat_capacity::joule_per_kilogram_kelvin,
    thermodynamic_temperature::kelvin,
    time::second,
};

use crate::support::radiation::StefanBoltzmann;

use super::{FaceBalanceSolver, IncidentFlux, OpticalProperties, RadiatorFace, TransientSimulator};

pub(super) fn kelvins(value: f64) -> ThermodynamicTemperature {
    ThermodynamicTemperature::new::<kelvin>(value)
}

pub(super) fn watts(value: f64) -> Power {
    Power::new::<watt>(value)
}

/// Area of one face of the 1.044 m reference cube.
pub(super) fn face_area() -> Area {
    Area::new::<square_meter>(1.044 * 1.044)
}

pub(super) fn mli() -> OpticalProperties {
    OpticalProperties::new_unchecked(0.5, 0.8, 0.03)
}

/// Dark zenith face with an OSR radiator of the given absorptivity.
pub(super) fn zenith(absorptivity: f64) -> RadiatorFace {
    RadiatorFace {
        flux: IncidentFlux::dark(),
        coating: OpticalProperties::new_unchecked(absorptivity, 0.80, 0.0),
        insulation: mli(),
        area: face_area(),
    }
}

/// Leaks through the five non-radiator faces of the hot case at 25 °C.
pub(super) fn hot_leaks() -> Vec<Power> {
    let solver = FaceBalanceSolver::default();
    let cells = OpticalProperties::new_unchecked(0.92, 0.85, 0.03);
    let internal = kelvins(298.15);

    [
        (IncidentFlux::solar(1418.0), cells),
        (IncidentFlux::infrared(258.0), mli()),
        (IncidentFlux::infrared(40.0), mli()),
        (IncidentFlux::infrared(60.0), mli()),
        (IncidentFlux::infrared(60.0), mli()),
    ]
    .iter()
    .map(|(flux, optics)| {
        solver
            .solve(flux, optics, internal, face_area())
            .expect("reference face balance should solve")
            .leak
    })
    .collect()
}

pub(super) fn constant(load: Power) -> impl Fn(Time) -> Power + Copy {
    move |_| load
}

/// Radiator of 0.6 m² at ε 0.8 over 14 kg of aluminum, stepped every second.
pub(super) fn reference_simulator() -> TransientSimulator {
    TransientSimulator::with_mass(
        StefanBoltzmann::default(),
        Area::new::<square_meter>(0.6),
        Ratio::new::<ratio>(0.8),
        Mass::new::<kilogram>(14.0),
        SpecificHeatCapacity::new::<joule_per_kilogram_kelvin>(900.0),
        Time::new::<second>(1.0),
    )
    .expect("reference simulator should be valid")
}
