use uom::si::{f64::Ratio, ratio::ratio};

use crate::support::constraint::{ConstraintError, UnitInterval};

use super::ThermalError;

/// Thermo-optical properties of a face.
///
/// - `absorptivity` (α): fraction of incident solar and albedo flux absorbed.
/// - `emissivity` (ε): infrared emissivity of the external surface, which
///   also sets the absorbed fraction of incident infrared flux.
/// - `coupling` (`ε_eff`): effective emissivity coupling the external skin to
///   the internal node. Near zero for good insulation.
///
/// Each property lies in `[0, 1]` and `ε + ε_eff` is strictly positive.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OpticalProperties {
    absorptivity: Ratio,
    emissivity: Ratio,
    coupling: Ratio,
}

impl OpticalProperties {
    /// Constructs validated optical properties from scalar fractions.
    ///
    /// # Errors
    ///
    /// Returns [`ThermalError::InvalidPhysicalParameter`] if a property lies
    /// outside `[0, 1]` or if both emissivities are zero.
    pub fn new(absorptivity: f64, emissivity: f64, coupling: f64) -> Result<Self, ThermalError> {
        Self::from_quantities(
            Ratio::new::<ratio>(absorptivity),
            Ratio::new::<ratio>(emissivity),
            Ratio::new::<ratio>(coupling),
        )
    }

    /// Constructs validated optical properties from ratio quantities.
    ///
    /// # Errors
    ///
    /// Same as [`OpticalProperties::new`].
    pub fn from_quantities(
        absorptivity: Ratio,
        emissivity: Ratio,
        coupling: Ratio,
    ) -> Result<Self, ThermalError> {
        let absorptivity = unit("absorptivity", absorptivity)?;
        let emissivity = unit("emissivity", emissivity)?;
        let coupling = unit("coupling emissivity", coupling)?;

        if (emissivity + coupling).get::<ratio>() <= 0.0 {
            return Err(ThermalError::InvalidPhysicalParameter {
                parameter: "emissivity + coupling emissivity",
                source: ConstraintError::Zero,
            });
        }

        Ok(Self {
            absorptivity,
            emissivity,
            coupling,
        })
    }

    /// Constructs properties for a bare radiating surface with no insulation
    /// coupling (`ε_eff = 0`).
    ///
    /// # Errors
    ///
    /// Returns [`ThermalError::InvalidPhysicalParameter`] if a property lies
    /// outside `[0, 1]` or if the emissivity is zero.
    pub fn surface(absorptivity: f64, emissivity: f64) -> Result<Self, ThermalError> {
        Self::new(absorptivity, emissivity, 0.0)
    }

    /// Constructs optical properties without validation.
    ///
    /// # Warning
    ///
    /// The caller must ensure every property lies in `[0, 1]` and that
    /// `emissivity + coupling > 0`.
    /// Violating this invariant produces NaN or infinite skin temperatures.
    #[must_use]
    pub fn new_unchecked(absorptivity: f64, emissivity: f64, coupling: f64) -> Self {
        Self {
            absorptivity: Ratio::new::<ratio>(absorptivity),
            emissivity: Ratio::new::<ratio>(emissivity),
            coupling: Ratio::new::<ratio>(coupling),
        }
    }

    /// Returns the solar absorptivity α.
    #[must_use]
    pub fn absorptivity(&self) -> Ratio {
        self.absorptivity
    }

    /// Returns the external infrared emissivity ε.
    #[must_use]
    pub fn emissivity(&self) -> Ratio {
        self.emissivity
    }

    /// Returns the skin-to-interior coupling emissivity `ε_eff`.
    #[must_use]
    pub fn coupling(&self) -> Ratio {
        self.coupling
    }
}

fn unit(parameter: &'static str, value: Ratio) -> Result<Ratio, ThermalError> {
    let value = UnitInterval::new(value).map_err(ThermalError::invalid(parameter))?;
    Ok(value.into_inner())
}
