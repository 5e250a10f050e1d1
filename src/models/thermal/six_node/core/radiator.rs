//! Radiator sizing and heater power.
//!
//! The radiator occupies part of one face (the zenith face in the reference
//! design); the rest of that face stays covered by insulation.
//! The uncovered remainder is assumed to leak exactly like the whole face
//! would if it were insulation at the same target temperature, so its loss
//! density is computed once, independent of the radiator area.
//! This keeps the area balance linear:
//!
//! ```text
//! A·(capacity − loss) = Q_diss + ΣQ_leak − A_face·loss
//! ```
//!
//! where `capacity` is the net rejection of one square meter of radiator and
//! `loss` is the heat lost through one square meter of uncovered insulation.

use uom::{
    ConstZero,
    si::{
        area::square_meter,
        f64::{Area, HeatFluxDensity, Power, Ratio, ThermodynamicTemperature},
        heat_flux_density::watt_per_square_meter,
        power::watt,
    },
};

use crate::support::constraint::{ConstraintError, NonNegative, StrictlyPositive};

use super::{FaceBalanceSolver, IncidentFlux, OpticalProperties, ThermalError};

/// The face carrying the radiator.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RadiatorFace {
    /// Flux incident on the face.
    pub flux: IncidentFlux,

    /// Radiator coating properties (coupling unused).
    pub coating: OpticalProperties,

    /// Insulation covering the rest of the face.
    pub insulation: OpticalProperties,

    /// Total area of the face.
    pub area: Area,
}

/// Radiator area balancing the hot case.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RadiatorSizing {
    /// Required radiator area.
    pub area: Area,

    /// Net rejection of one square meter of radiator at the target temperature.
    pub net_capacity: HeatFluxDensity,

    /// Dissipation plus the leaks through all other faces.
    pub heat_to_reject: Power,

    /// Heat lost through one square meter of uncovered insulation.
    pub uncovered_loss: HeatFluxDensity,

    /// Total area of the radiator face.
    pub face_area: Area,
}

impl RadiatorSizing {
    /// Returns the imbalance `A·capacity − (Q_reject − (A_face − A)·loss)`.
    ///
    /// Zero up to rounding for any sizing produced by [`RadiatorSizer::size`].
    #[must_use]
    pub fn residual(&self) -> Power {
        let uncovered = (self.face_area - self.area) * self.uncovered_loss;
        self.area * self.net_capacity - (self.heat_to_reject - uncovered)
    }

    /// Returns the fraction of the face covered by the radiator.
    #[must_use]
    pub fn coverage(&self) -> Ratio {
        self.area / self.face_area
    }
}

/// Loss balance for a case that must be held warm with heaters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HeaterSizing {
    /// Net heat rejected by the radiator.
    pub radiator_loss: Power,

    /// Net heat lost through the other faces.
    pub other_loss: Power,

    /// Heat lost through the uncovered part of the radiator face.
    pub uncovered_loss: Power,

    /// Sum of all losses.
    pub total_loss: Power,

    /// Internal dissipation available to offset the losses.
    pub dissipation: Power,

    /// Heater power needed: `total_loss − dissipation`.
    ///
    /// Zero or negative when dissipation alone holds the temperature.
    pub heater_power: Power,
}

impl HeaterSizing {
    /// Returns true when dissipation alone can't hold the temperature.
    #[must_use]
    pub fn heaters_required(&self) -> bool {
        self.heater_power > Power::ZERO
    }
}

/// Sizes radiators and heaters from face leaks.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct RadiatorSizer {
    faces: FaceBalanceSolver,
}

impl RadiatorSizer {
    /// Creates a sizer sharing the constant and flux scheme of `faces`.
    #[must_use]
    pub fn new(faces: FaceBalanceSolver) -> Self {
        Self { faces }
    }

    /// Solves for the radiator area holding `target` with the given loads.
    ///
    /// `other_leaks` are the total leaks of every face except the radiator
    /// face, positive into the satellite.
    ///
    /// # Errors
    ///
    /// - [`ThermalError::InvalidPhysicalParameter`] for negative dissipation,
    ///   a non-positive face area or target, or a negative flux.
    /// - [`ThermalError::InfeasibleSizing`] when the balance has no area in
    ///   `(0, A_face]`.
    pub fn size(
        &self,
        dissipation: Power,
        other_leaks: impl IntoIterator<Item = Power>,
        radiator: &RadiatorFace,
        target: ThermodynamicTemperature,
    ) -> Result<RadiatorSizing, ThermalError> {
        let dissipation = NonNegative::new(dissipation)
            .map_err(ThermalError::invalid("dissipation"))?
            .into_inner();
        let face_area = StrictlyPositive::new(radiator.area)
            .map_err(ThermalError::invalid("radiator face area"))?
            .into_inner();

        let heat_to_reject = dissipation + other_leaks.into_iter().sum::<Power>();

        let capacity = self.net_capacity(radiator, target)?;
        let loss = self.uncovered_loss(radiator, target)?;

        let numerator = heat_to_reject - face_area * loss;
        let denominator = capacity - loss;
        let area: Area = numerator / denominator;

        let feasible = denominator > HeatFluxDensity::ZERO && area > Area::ZERO;
        if !(feasible && area <= face_area) {
            return Err(ThermalError::InfeasibleSizing {
                numerator,
                denominator,
                required_area: area,
                available_area: face_area,
            });
        }

        log::debug!(
            "radiator sizing: {:.4} m² of {:.4} m², rejecting {:.2} W at {:.2} W/m²",
            area.get::<square_meter>(),
            face_area.get::<square_meter>(),
            heat_to_reject.get::<watt>(),
            capacity.get::<watt_per_square_meter>(),
        );

        Ok(RadiatorSizing {
            area,
            net_capacity: capacity,
            heat_to_reject,
            uncovered_loss: loss,
            face_area,
        })
    }

    /// Computes the heater power holding `temperature` with a radiator of
    /// fixed area.
    ///
    /// `other_leaks` are the total leaks of every face except the radiator
    /// face, evaluated at `temperature`.
    ///
    /// # Errors
    ///
    /// Returns [`ThermalError::InvalidPhysicalParameter`] for negative
    /// dissipation, a radiator area outside `(0, A_face]`, a non-positive
    /// temperature, or a negative flux.
    pub fn heater_power(
        &self,
        dissipation: Power,
        other_leaks: impl IntoIterator<Item = Power>,
        radiator: &RadiatorFace,
        radiator_area: Area,
        temperature: ThermodynamicTemperature,
    ) -> Result<HeaterSizing, ThermalError> {
        let dissipation = NonNegative::new(dissipation)
            .map_err(ThermalError::invalid("dissipation"))?
            .into_inner();
        let radiator_area = StrictlyPositive::new(radiator_area)
            .map_err(ThermalError::invalid("radiator area"))?
            .into_inner();
        if radiator_area > radiator.area {
            return Err(ThermalError::InvalidPhysicalParameter {
                parameter: "radiator area",
                source: ConstraintError::AboveMaximum,
            });
        }

        let uncovered = radiator.area - radiator_area;

        let radiator_loss = radiator_area * self.net_capacity(radiator, temperature)?;
        let other_loss = -other_leaks.into_iter().sum::<Power>();
        let uncovered_loss = uncovered * self.uncovered_loss(radiator, temperature)?;
        let total_loss = radiator_loss + other_loss + uncovered_loss;
        let heater_power = total_loss - dissipation;

        log::debug!(
            "heater sizing: losses {:.2} W, heaters {:.2} W",
            total_loss.get::<watt>(),
            heater_power.get::<watt>(),
        );

        Ok(HeaterSizing {
            radiator_loss,
            other_loss,
            uncovered_loss,
            total_loss,
            dissipation,
            heater_power,
        })
    }

    /// Net rejection per square meter of radiator: `σ·ε·T⁴ − q_abs`.
    fn net_capacity(
        &self,
        radiator: &RadiatorFace,
        temperature: ThermodynamicTemperature,
    ) -> Result<HeatFluxDensity, ThermalError> {
        let temperature = StrictlyPositive::temperature(temperature)
            .map_err(ThermalError::invalid("target temperature"))?;

        let emitted = self
            .faces
            .sigma()
            .emitted_flux(radiator.coating.emissivity(), temperature);
        let absorbed = self
            .faces
            .scheme()
            .absorbed(&radiator.flux, &radiator.coating)?;

        Ok(emitted - absorbed)
    }

    /// Loss per square meter of the radiator face covered in insulation.
    fn uncovered_loss(
        &self,
        radiator: &RadiatorFace,
        temperature: ThermodynamicTemperature,
    ) -> Result<HeatFluxDensity, ThermalError> {
        let (_, leak) = self
            .faces
            .solve_density(&radiator.flux, &radiator.insulation, temperature)?;
        Ok(-leak)
    }
}
