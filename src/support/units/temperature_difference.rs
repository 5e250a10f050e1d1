use uom::si::{
    f64::{TemperatureInterval, ThermodynamicTemperature},
    temperature_interval::kelvin as delta_kelvin,
    thermodynamic_temperature::kelvin as abs_kelvin,
};

/// Extension trait for arithmetic between absolute temperatures and intervals.
///
/// For background on why [`uom`] needs this extension:
/// [#380](https://github.com/iliekturtles/uom/issues/380),
/// [#289](https://github.com/iliekturtles/uom/issues/289).
pub trait TemperatureDifference {
    /// Returns the temperature difference `self - other`.
    fn minus(self, other: Self) -> TemperatureInterval;

    /// Returns the absolute temperature shifted by `delta`.
    fn plus(self, delta: TemperatureInterval) -> Self;
}

impl TemperatureDifference for ThermodynamicTemperature {
    fn minus(self, other: Self) -> TemperatureInterval {
        TemperatureInterval::new::<delta_kelvin>(
            self.get::<abs_kelvin>() - other.get::<abs_kelvin>(),
        )
    }

    fn plus(self, delta: TemperatureInterval) -> Self {
        ThermodynamicTemperature::new::<abs_kelvin>(
            self.get::<abs_kelvin>() + delta.get::<delta_kelvin>(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;
    use uom::si::thermodynamic_temperature::degree_celsius;

    #[test]
    fn heating_rise() {
        let start = ThermodynamicTemperature::new::<degree_celsius>(25.0);
        let peak = ThermodynamicTemperature::new::<abs_kelvin>(300.25);

        assert_relative_eq!(
            peak.minus(start).get::<delta_kelvin>(),
            2.1,
            epsilon = 1e-12
        );
        assert_relative_eq!(
            start.minus(peak).get::<delta_kelvin>(),
            -2.1,
            epsilon = 1e-12
        );
    }

    #[test]
    fn recovery_margin() {
        let nominal = ThermodynamicTemperature::new::<degree_celsius>(25.0);
        let target = nominal.plus(TemperatureInterval::new::<delta_kelvin>(0.1));

        assert_relative_eq!(target.get::<degree_celsius>(), 25.1, epsilon = 1e-12);
    }
}
