use uom::si::{f64::HeatFluxDensity, heat_flux_density::watt_per_square_meter};

use crate::support::constraint::NonNegative;

use super::{OpticalProperties, ThermalError};

/// Environmental flux incident on one face.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IncidentFlux {
    /// Direct solar flux.
    pub solar: HeatFluxDensity,

    /// Solar flux reflected by the Earth.
    pub albedo: HeatFluxDensity,

    /// Earth infrared flux.
    pub infrared: HeatFluxDensity,
}

impl IncidentFlux {
    /// Creates an incident flux from values in W/m².
    #[must_use]
    pub fn new(solar: f64, albedo: f64, infrared: f64) -> Self {
        Self {
            solar: HeatFluxDensity::new::<watt_per_square_meter>(solar),
            albedo: HeatFluxDensity::new::<watt_per_square_meter>(albedo),
            infrared: HeatFluxDensity::new::<watt_per_square_meter>(infrared),
        }
    }

    /// A face in full shadow with a deep-space view.
    #[must_use]
    pub fn dark() -> Self {
        Self::new(0.0, 0.0, 0.0)
    }

    /// Direct solar flux only, in W/m².
    #[must_use]
    pub fn solar(solar: f64) -> Self {
        Self::from_solar(HeatFluxDensity::new::<watt_per_square_meter>(solar))
    }

    /// Earth infrared flux only, in W/m².
    #[must_use]
    pub fn infrared(infrared: f64) -> Self {
        Self::from_infrared(HeatFluxDensity::new::<watt_per_square_meter>(infrared))
    }

    /// Direct solar flux only.
    #[must_use]
    pub fn from_solar(solar: HeatFluxDensity) -> Self {
        Self {
            solar,
            ..Self::dark()
        }
    }

    /// Earth infrared flux only.
    #[must_use]
    pub fn from_infrared(infrared: HeatFluxDensity) -> Self {
        Self {
            infrared,
            ..Self::dark()
        }
    }

    fn checked(&self) -> Result<[HeatFluxDensity; 3], ThermalError> {
        let solar = NonNegative::new(self.solar).map_err(ThermalError::invalid("solar flux"))?;
        let albedo = NonNegative::new(self.albedo).map_err(ThermalError::invalid("albedo flux"))?;
        let infrared =
            NonNegative::new(self.infrared).map_err(ThermalError::invalid("infrared flux"))?;

        Ok([solar, albedo, infrared].map(|q| q.into_inner()))
    }
}

/// How incident flux components combine into absorbed flux.
///
/// Thermal budgets differ in whether albedo is tracked separately or has
/// already been folded into the solar term.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum FluxScheme {
    /// `q_abs = α·q_solar + ε·q_ir`; the albedo component is ignored.
    #[default]
    TwoTerm,

    /// `q_abs = α·(q_solar + q_albedo) + ε·q_ir`.
    WithAlbedo,
}

impl FluxScheme {
    /// Returns the flux absorbed by a surface.
    ///
    /// # Errors
    ///
    /// Returns [`ThermalError::InvalidPhysicalParameter`] if any flux
    /// component is negative or NaN.
    pub fn absorbed(
        self,
        flux: &IncidentFlux,
        optics: &OpticalProperties,
    ) -> Result<HeatFluxDensity, ThermalError> {
        let [solar, albedo, infrared] = flux.checked()?;

        let shortwave = match self {
            FluxScheme::TwoTerm => solar,
            FluxScheme::WithAlbedo => solar + albedo,
        };

        let absorbed = optics.absorptivity() * shortwave + optics.emissivity() * infrared;
        Ok(absorbed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;

    #[test]
    fn two_term_ignores_albedo() {
        let mli = OpticalProperties::new(0.5, 0.8, 0.03).unwrap();
        let flux = IncidentFlux::new(100.0, 50.0, 200.0);

        let absorbed = FluxScheme::TwoTerm.absorbed(&flux, &mli).unwrap();
        assert_relative_eq!(
            absorbed.get::<watt_per_square_meter>(),
            0.5 * 100.0 + 0.8 * 200.0
        );
    }

    #[test]
    fn albedo_is_absorbed_like_sunlight() {
        let mli = OpticalProperties::new(0.5, 0.8, 0.03).unwrap();
        let flux = IncidentFlux::new(100.0, 50.0, 200.0);

        let absorbed = FluxScheme::WithAlbedo.absorbed(&flux, &mli).unwrap();
        assert_relative_eq!(
            absorbed.get::<watt_per_square_meter>(),
            0.5 * 150.0 + 0.8 * 200.0
        );
    }

    #[test]
    fn typed_constructors_match_scalars() {
        let q = HeatFluxDensity::new::<watt_per_square_meter>(258.0);

        assert_eq!(
            IncidentFlux::from_infrared(q),
            IncidentFlux::infrared(258.0)
        );
        assert_eq!(
            IncidentFlux::from_solar(q),
            IncidentFlux::new(258.0, 0.0, 0.0)
        );
    }

    #[test]
    fn rejects_negative_flux() {
        let mli = OpticalProperties::new(0.5, 0.8, 0.03).unwrap();
        let err = FluxScheme::TwoTerm
            .absorbed(&IncidentFlux::infrared(-1.0), &mli)
            .unwrap_err();

        assert!(matches!(
            err,
            ThermalError::InvalidPhysicalParameter {
                parameter: "infrared flux",
                ..
            }
        ));
    }
}
