//! Gas concentration estimator trait

use super::SensorError;

/// Gases estimated by the MQ-2 sensor
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Gas {
    /// Liquefied petroleum gas
    Lpg,
    /// Carbon monoxide
    Co,
    /// Smoke
    Smoke,
}

impl Gas {
    /// All gases in refresh order
    pub const ALL: [Gas; 3] = [Gas::Lpg, Gas::Co, Gas::Smoke];

    /// Name used by the sensor calibration tables
    pub fn name(self) -> &'static str {
        match self {
            Gas::Lpg => "LPG",
            Gas::Co => "CO",
            Gas::Smoke => "Smoke",
        }
    }
}

/// Trait for gas-concentration estimators
///
/// Implementations own their calibration; the sampler only asks for a
/// concentration in parts per million.
pub trait GasReader {
    /// Estimate the concentration of `gas` in ppm
    fn read_ppm(&mut self, gas: Gas) -> Result<f32, SensorError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gas_names() {
        assert_eq!(Gas::Lpg.name(), "LPG");
        assert_eq!(Gas::Co.name(), "CO");
        assert_eq!(Gas::Smoke.name(), "Smoke");
    }
}
