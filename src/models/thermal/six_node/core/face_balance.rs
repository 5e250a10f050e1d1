//! Radiative equilibrium of a single external face.
//!
//! The skin is treated as an infinitely thin node exchanging heat with space
//! (emission), with the environment (absorbed flux) and with the internal
//! node through the insulation coupling `ε_eff`:
//!
//! ```text
//! q_abs + σ·ε_eff·T_int⁴ = σ·(ε + ε_eff)·T_skin⁴
//! ```
//!
//! The balance is linear in `T_skin⁴`, so the skin temperature follows in
//! closed form and no iteration is needed.

use uom::si::{
    f64::{Area, HeatFluxDensity, Power, ThermodynamicTemperature},
    power::watt,
    ratio::ratio,
    thermodynamic_temperature::kelvin,
};

use crate::support::{constraint::StrictlyPositive, radiation::StefanBoltzmann};

use super::{FluxScheme, IncidentFlux, OpticalProperties, ThermalError};

/// Equilibrium of one face against a fixed internal temperature.
///
/// Leaks are positive when heat flows into the satellite.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FaceBalance {
    /// Equilibrium skin temperature.
    pub skin_temperature: ThermodynamicTemperature,

    /// Heat leak per unit face area.
    pub leak_density: HeatFluxDensity,

    /// Heat leak through the whole face.
    pub leak: Power,
}

/// Closed-form solver for face skin temperatures and heat leaks.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct FaceBalanceSolver {
    sigma: StefanBoltzmann,
    scheme: FluxScheme,
}

impl FaceBalanceSolver {
    /// Creates a solver with the given constant and flux scheme.
    #[must_use]
    pub fn new(sigma: StefanBoltzmann, scheme: FluxScheme) -> Self {
        Self { sigma, scheme }
    }

    /// Returns the Stefan–Boltzmann constant used by this solver.
    #[must_use]
    pub fn sigma(&self) -> StefanBoltzmann {
        self.sigma
    }

    /// Returns the flux decomposition scheme used by this solver.
    #[must_use]
    pub fn scheme(&self) -> FluxScheme {
        self.scheme
    }

    /// Solves the balance of a face of the given area.
    ///
    /// # Errors
    ///
    /// Returns [`ThermalError::InvalidPhysicalParameter`] if the internal
    /// temperature or area isn't strictly positive, or if a flux is negative.
    pub fn solve(
        &self,
        flux: &IncidentFlux,
        optics: &OpticalProperties,
        internal: ThermodynamicTemperature,
        area: Area,
    ) -> Result<FaceBalance, ThermalError> {
        let area = StrictlyPositive::new(area)
            .map_err(ThermalError::invalid("face area"))?
            .into_inner();

        let (skin_temperature, leak_density) = self.solve_density(flux, optics, internal)?;
        let leak = leak_density * area;

        log::debug!(
            "face balance: T_skin = {:.2} K, leak = {:.3} W",
            skin_temperature.get::<kelvin>(),
            leak.get::<watt>(),
        );

        Ok(FaceBalance {
            skin_temperature,
            leak_density,
            leak,
        })
    }

    /// Solves the balance per unit area, returning `(T_skin, q_leak)`.
    ///
    /// # Errors
    ///
    /// Returns [`ThermalError::InvalidPhysicalParameter`] if the internal
    /// temperature isn't strictly positive or if a flux is negative.
    pub fn solve_density(
        &self,
        flux: &IncidentFlux,
        optics: &OpticalProperties,
        internal: ThermodynamicTemperature,
    ) -> Result<(ThermodynamicTemperature, HeatFluxDensity), ThermalError> {
        let internal = StrictlyPositive::temperature(internal)
            .map_err(ThermalError::invalid("internal temperature"))?;

        let absorbed = self.scheme.absorbed(flux, optics)?;
        let coupling = optics.coupling();
        let interior = self.sigma.black_body(internal);
        let total_emissivity = (optics.emissivity() + coupling).get::<ratio>();

        // σ·T_skin⁴, straight from the balance.
        let skin = (absorbed + coupling * interior) / total_emissivity;

        Ok((
            self.sigma.temperature_for(skin),
            coupling * (skin - interior),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;
    use uom::si::{area::square_meter, heat_flux_density::watt_per_square_meter};

    use crate::models::thermal::six_node::core::test_support::{face_area, kelvins, mli};

    fn solver() -> FaceBalanceSolver {
        FaceBalanceSolver::default()
    }

    #[test]
    fn sunlit_solar_array_runs_hot_and_leaks_in() {
        let cells = OpticalProperties::new(0.92, 0.85, 0.03).unwrap();
        let balance = solver()
            .solve(
                &IncidentFlux::solar(1418.0),
                &cells,
                kelvins(298.15),
                face_area(),
            )
            .unwrap();

        assert_relative_eq!(
            balance.skin_temperature.get::<kelvin>(),
            403.146,
            epsilon = 1e-3
        );
        assert_relative_eq!(
            balance.leak_density.get::<watt_per_square_meter>(),
            31.4905,
            epsilon = 1e-3
        );
        assert_relative_eq!(balance.leak.get::<watt>(), 34.3226, epsilon = 1e-3);
    }

    #[test]
    fn dark_face_loses_heat() {
        for internal in [200.0, 273.15, 298.15, 350.0] {
            let (skin, leak) = solver()
                .solve_density(&IncidentFlux::dark(), &mli(), kelvins(internal))
                .unwrap();

            assert!(skin.get::<kelvin>() < internal);
            assert!(leak.get::<watt_per_square_meter>() < 0.0);
        }
    }

    #[test]
    fn more_flux_means_hotter_skin_and_more_leak() {
        let mut previous: Option<(f64, f64)> = None;

        for infrared in [0.0, 40.0, 60.0, 258.0, 600.0] {
            let (skin, leak) = solver()
                .solve_density(&IncidentFlux::infrared(infrared), &mli(), kelvins(298.15))
                .unwrap();
            let current = (skin.get::<kelvin>(), leak.get::<watt_per_square_meter>());

            if let Some((skin_before, leak_before)) = previous {
                assert!(current.0 > skin_before);
                assert!(current.1 > leak_before);
            }
            previous = Some(current);
        }
    }

    #[test]
    fn skin_follows_interior_when_external_emission_vanishes() {
        let internal = 298.15;

        for emissivity in [1e-3, 1e-6, 1e-9] {
            let optics = OpticalProperties::new(0.5, emissivity, 0.03).unwrap();
            let (skin, leak) = solver()
                .solve_density(&IncidentFlux::dark(), &optics, kelvins(internal))
                .unwrap();

            let tolerance = emissivity * 1e4;
            assert_relative_eq!(skin.get::<kelvin>(), internal, epsilon = tolerance);
            assert!(leak.get::<watt_per_square_meter>().abs() < tolerance);
        }
    }

    #[test]
    fn zero_coupling_has_no_leak() {
        let paint = OpticalProperties::surface(0.3, 0.9).unwrap();
        let (_, leak) = solver()
            .solve_density(&IncidentFlux::solar(1418.0), &paint, kelvins(298.15))
            .unwrap();

        assert_relative_eq!(leak.get::<watt_per_square_meter>(), 0.0);
    }

    #[test]
    fn rejects_non_positive_inputs() {
        let err = solver()
            .solve_density(&IncidentFlux::dark(), &mli(), kelvins(0.0))
            .unwrap_err();
        assert!(matches!(
            err,
            ThermalError::InvalidPhysicalParameter {
                parameter: "internal temperature",
                ..
            }
        ));

        let err = solver()
            .solve(
                &IncidentFlux::dark(),
                &mli(),
                kelvins(298.15),
                Area::new::<square_meter>(-1.0),
            )
            .unwrap_err();
        assert!(matches!(
            err,
            ThermalError::InvalidPhysicalParameter {
                parameter: "face area",
                ..
            }
        ));
    }

    #[test]
    fn repeated_solves_are_identical() {
        let flux = IncidentFlux::infrared(258.0);
        let first = solver()
            .solve(&flux, &mli(), kelvins(298.15), face_area())
            .unwrap();
        let second = solver()
            .solve(&flux, &mli(), kelvins(298.15), face_area())
            .unwrap();

        assert_eq!(first, second);
    }
}
