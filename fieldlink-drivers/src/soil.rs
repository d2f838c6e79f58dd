//! Capacitive soil moisture sensor
//!
//! The sensor output falls as moisture rises. Conversion to percent is done
//! by the sampler against its dry/wet calibration; this driver only
//! delivers the raw reading.

use fieldlink_core::traits::SensorError;
use fieldlink_hal::adc::AnalogInput;

/// Soil sensor on one ADC channel
pub struct SoilSensor<A> {
    adc: A,
}

impl<A: AnalogInput> SoilSensor<A> {
    /// Create a sensor taking a single conversion per reading
    pub fn new(adc: A) -> Self {
        Self { adc }
    }

    /// Raw ADC reading
    pub fn read_raw(&mut self) -> Result<u16, SensorError> {
        self.adc
            .read_raw()
            .map_err(|_| SensorError::ConversionError)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fieldlink_hal::adc::AdcError;

    struct Ramp {
        next: u16,
    }

    impl AnalogInput for Ramp {
        fn read_raw(&mut self) -> Result<u16, AdcError> {
            let v = self.next;
            self.next += 10;
            Ok(v)
        }
    }

    struct Broken;

    impl AnalogInput for Broken {
        fn read_raw(&mut self) -> Result<u16, AdcError> {
            Err(AdcError::Conversion)
        }
    }

    #[test]
    fn test_single_read() {
        let mut soil = SoilSensor::new(Ramp { next: 2500 });
        assert_eq!(soil.read_raw(), Ok(2500));
        assert_eq!(soil.read_raw(), Ok(2510));
    }

    #[test]
    fn test_failure_maps_to_conversion_error() {
        let mut soil = SoilSensor::new(Broken);
        assert_eq!(soil.read_raw(), Err(SensorError::ConversionError));
    }
}
