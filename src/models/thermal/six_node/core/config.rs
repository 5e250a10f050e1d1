use uom::si::{
    f64::{Area, HeatFluxDensity, Length, Mass, SpecificHeatCapacity, Time},
    heat_flux_density::watt_per_square_meter,
    length::meter,
    mass::kilogram,
    specific_heat_capacity::joule_per_kilogram_kelvin,
    time::{minute, second},
};

use crate::support::radiation::StefanBoltzmann;

use super::{CoatingLife, FaceId, FaceKind, FluxScheme, OpticalProperties, PerFace, ThermalCase};

/// Cube geometry.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Geometry {
    /// Edge length of the cube.
    pub side: Length,
}

impl Default for Geometry {
    /// A cube of about one cubic meter.
    fn default() -> Self {
        Self {
            side: Length::new::<meter>(1.044),
        }
    }
}

impl Geometry {
    /// Returns the area of one face.
    #[must_use]
    pub fn face_area(&self) -> Area {
        self.side * self.side
    }
}

/// Surface finishes used on the external faces.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Materials {
    /// Body-mounted solar cells.
    pub solar_array: OpticalProperties,

    /// Multilayer insulation blankets.
    pub mli: OpticalProperties,

    /// Radiator coating at beginning of life.
    pub radiator_bol: OpticalProperties,

    /// Radiator coating at end of life.
    pub radiator_eol: OpticalProperties,
}

impl Default for Materials {
    /// Silicon cells, MLI with `ε_eff = 0.03` and an optical solar reflector.
    fn default() -> Self {
        Self {
            solar_array: OpticalProperties::new_unchecked(0.92, 0.85, 0.03),
            mli: OpticalProperties::new_unchecked(0.50, 0.80, 0.03),
            radiator_bol: OpticalProperties::new_unchecked(0.08, 0.80, 0.0),
            radiator_eol: OpticalProperties::new_unchecked(0.12, 0.80, 0.0),
        }
    }
}

impl Materials {
    /// Returns the radiator coating for the given stage of life.
    #[must_use]
    pub fn radiator(&self, life: CoatingLife) -> OpticalProperties {
        match life {
            CoatingLife::Beginning => self.radiator_bol,
            CoatingLife::End => self.radiator_eol,
        }
    }

    /// Returns the covering of a non-radiator face.
    ///
    /// Radiator faces are covered by insulation around the radiator itself,
    /// so [`FaceKind::Radiator`] maps to the MLI properties.
    #[must_use]
    pub fn covering(&self, kind: FaceKind) -> OpticalProperties {
        match kind {
            FaceKind::SolarArray => self.solar_array,
            FaceKind::Mli | FaceKind::Radiator => self.mli,
        }
    }
}

/// Orbital environment of the worst hot case.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Environment {
    /// Solar constant.
    pub solar_constant: HeatFluxDensity,

    /// Earth infrared flux on the nadir face.
    pub earth_infrared: HeatFluxDensity,

    /// Grazing infrared flux on the anti-Sun face.
    pub anti_sun_infrared: HeatFluxDensity,

    /// Grazing infrared flux on the velocity and anti-velocity faces.
    pub side_infrared: HeatFluxDensity,
}

impl Default for Environment {
    /// Winter solstice, dusk-dawn orbit at 600 km.
    fn default() -> Self {
        Self {
            solar_constant: HeatFluxDensity::new::<watt_per_square_meter>(1418.0),
            earth_infrared: HeatFluxDensity::new::<watt_per_square_meter>(258.0),
            anti_sun_infrared: HeatFluxDensity::new::<watt_per_square_meter>(40.0),
            side_infrared: HeatFluxDensity::new::<watt_per_square_meter>(60.0),
        }
    }
}

/// Which face carries what.
///
/// Exactly one face is the radiator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Layout {
    radiator: FaceId,
    kinds: PerFace<FaceKind>,
}

impl Layout {
    /// Creates a layout with the given radiator face and solar array faces.
    ///
    /// Every other face is insulated. A face listed as both radiator and
    /// solar array carries the radiator.
    #[must_use]
    pub fn new(radiator: FaceId, solar_arrays: &[FaceId]) -> Self {
        let kinds = PerFace::from_fn(|face| {
            if face == radiator {
                FaceKind::Radiator
            } else if solar_arrays.contains(&face) {
                FaceKind::SolarArray
            } else {
                FaceKind::Mli
            }
        });
        Self { radiator, kinds }
    }

    /// Returns the face carrying the radiator.
    #[must_use]
    pub fn radiator(&self) -> FaceId {
        self.radiator
    }

    /// Returns the classification of a face.
    #[must_use]
    pub fn kind(&self, face: FaceId) -> FaceKind {
        self.kinds[face]
    }

    /// Iterates over every face except the radiator face.
    pub fn others(&self) -> impl Iterator<Item = (FaceId, FaceKind)> + '_ {
        self.kinds
            .iter()
            .filter(|(face, _)| *face != self.radiator)
            .map(|(face, kind)| (face, *kind))
    }
}

impl Default for Layout {
    /// Solar array on `+Y`, radiator on `-Z`.
    fn default() -> Self {
        Self::new(FaceId::MinusZ, &[FaceId::PlusY])
    }
}

/// Internal thermal mass and integration settings.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ThermalMass {
    /// Mass participating in the transient.
    pub mass: Mass,

    /// Average specific heat of that mass.
    pub specific_heat: SpecificHeatCapacity,

    /// Fixed integration step.
    pub time_step: Time,
}

impl Default for ThermalMass {
    /// Structure and electronics boxes, mostly aluminum.
    fn default() -> Self {
        Self {
            mass: Mass::new::<kilogram>(10.0),
            specific_heat: SpecificHeatCapacity::new::<joule_per_kilogram_kelvin>(900.0),
            time_step: Time::new::<second>(1.0),
        }
    }
}

/// Complete input of a six-node analysis.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SixNodeConfig {
    /// Stefan–Boltzmann constant.
    pub sigma: StefanBoltzmann,

    /// How incident flux is absorbed.
    pub scheme: FluxScheme,

    /// Cube geometry.
    pub geometry: Geometry,

    /// Surface finishes.
    pub materials: Materials,

    /// Face assignments.
    pub layout: Layout,

    /// Case used to size the radiator.
    pub hot: ThermalCase,

    /// Case used to size heaters.
    pub cold: ThermalCase,

    /// Case applied during the attitude maneuver.
    pub maneuver: ThermalCase,

    /// Internal thermal mass for the maneuver transient.
    pub thermal_mass: ThermalMass,

    /// Length of the reference maneuver.
    pub maneuver_duration: Time,
}

impl Default for SixNodeConfig {
    fn default() -> Self {
        let environment = Environment::default();
        Self {
            sigma: StefanBoltzmann::default(),
            scheme: FluxScheme::default(),
            geometry: Geometry::default(),
            materials: Materials::default(),
            layout: Layout::default(),
            hot: ThermalCase::hot(&environment),
            cold: ThermalCase::cold(),
            maneuver: ThermalCase::maneuver(&environment),
            thermal_mass: ThermalMass::default(),
            maneuver_duration: Time::new::<minute>(10.0),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;
    use uom::si::area::square_meter;

    #[test]
    fn reference_geometry() {
        let geometry = Geometry::default();

        assert_relative_eq!(geometry.face_area().get::<square_meter>(), 1.089_936);
    }

    #[test]
    fn default_materials_are_valid() {
        let materials = Materials::default();

        for optics in [
            materials.solar_array,
            materials.mli,
            materials.radiator_bol,
            materials.radiator_eol,
        ] {
            let checked = OpticalProperties::from_quantities(
                optics.absorptivity(),
                optics.emissivity(),
                optics.coupling(),
            )
            .unwrap();
            assert_eq!(checked, optics);
        }

        assert!(
            materials.radiator(CoatingLife::End).absorptivity()
                > materials.radiator(CoatingLife::Beginning).absorptivity()
        );
    }

    #[test]
    fn layout_has_one_radiator() {
        let layout = Layout::default();

        assert_eq!(layout.radiator(), FaceId::MinusZ);
        assert_eq!(layout.kind(FaceId::PlusY), FaceKind::SolarArray);
        assert_eq!(layout.kind(FaceId::PlusZ), FaceKind::Mli);
        assert_eq!(layout.others().count(), 5);
        assert!(
            layout
                .others()
                .all(|(face, kind)| face != FaceId::MinusZ && kind != FaceKind::Radiator)
        );

        let overlapping = Layout::new(FaceId::PlusY, &[FaceId::PlusY]);
        assert_eq!(overlapping.kind(FaceId::PlusY), FaceKind::Radiator);
    }
}
