//! Stefan–Boltzmann radiative exchange.
//!
//! Radiative terms scale with the fourth power of absolute temperature, which
//! [`uom`] can't express for [`ThermodynamicTemperature`].
//! [`StefanBoltzmann`] performs the `σ·T⁴` arithmetic in kelvin and returns
//! [`HeatFluxDensity`] values.

use uom::si::{
    f64::{HeatFluxDensity, Ratio, ThermodynamicTemperature},
    heat_flux_density::watt_per_square_meter,
    ratio::ratio,
    thermodynamic_temperature::kelvin,
};

/// The Stefan–Boltzmann constant, in W/(m²·K⁴).
///
/// The default is the rounded value `5.67e-8` used by the reference thermal
/// budget; supply [`StefanBoltzmann::CODATA`] for the exact value.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StefanBoltzmann(f64);

impl StefanBoltzmann {
    /// The CODATA 2018 exact value.
    pub const CODATA: Self = Self(5.670_374_419e-8);

    /// Creates a constant from a value in W/(m²·K⁴).
    #[must_use]
    pub const fn new(watt_per_square_meter_kelvin4: f64) -> Self {
        Self(watt_per_square_meter_kelvin4)
    }

    /// Returns the constant in W/(m²·K⁴).
    #[must_use]
    pub fn value(self) -> f64 {
        self.0
    }

    /// Returns the black-body flux `σ·T⁴`.
    #[must_use]
    pub fn black_body(self, temperature: ThermodynamicTemperature) -> HeatFluxDensity {
        HeatFluxDensity::new::<watt_per_square_meter>(self.0 * temperature.get::<kelvin>().powi(4))
    }

    /// Returns the flux emitted by a grey surface, `ε·σ·T⁴`.
    #[must_use]
    pub fn emitted_flux(
        self,
        emissivity: Ratio,
        temperature: ThermodynamicTemperature,
    ) -> HeatFluxDensity {
        self.black_body(temperature) * emissivity.get::<ratio>()
    }

    /// Returns the temperature whose black-body flux `σ·T⁴` equals `flux`.
    ///
    /// The result is NaN for negative `flux`.
    #[must_use]
    pub fn temperature_for(self, flux: HeatFluxDensity) -> ThermodynamicTemperature {
        ThermodynamicTemperature::new::<kelvin>(
            (flux.get::<watt_per_square_meter>() / self.0).powf(0.25),
        )
    }
}

impl Default for StefanBoltzmann {
    fn default() -> Self {
        Self(5.67e-8)
    }
}
