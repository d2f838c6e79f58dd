//! MQ-2 combustible gas sensor
//!
//! The sensing element is a tin-dioxide resistor in series with a load
//! resistor; the ADC samples the load side.
//!
//! Circuit: VCC -- Rs -- ADC_PIN -- RL -- GND
//! Rs = RL * (ADC_MAX - adc) / adc
//!
//! Calibration in clean air gives R0 = Rs / 9.83. Concentration follows
//! from the datasheet sensitivity curves, which are straight lines on a
//! log-log plot of Rs/R0 against ppm:
//!
//! ppm = 10 ^ ((log10(Rs/R0) - y) / slope + x)
//!
//! where (x, y) is a point on the curve and `slope` its gradient.

use fieldlink_core::traits::{Gas, GasReader, SensorError};
use fieldlink_hal::adc::{AnalogInput, ADC_MAX};
use libm::{log10f, powf};

/// Rs/R0 in clean air
pub const CLEAN_AIR_RATIO: f32 = 9.83;

/// Load resistor on the breakout board, kΩ
pub const LOAD_RESISTANCE_KOHM: f32 = 5.0;

/// Readings below this are treated as a disconnected sensor
const MIN_RAW: u16 = 4;

/// One sensitivity curve: a point (log10 ppm, log10 Rs/R0) and the slope
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Curve {
    pub x: f32,
    pub y: f32,
    pub slope: f32,
}

impl Curve {
    /// Concentration in ppm for a resistance ratio
    pub fn ppm(&self, ratio: f32) -> f32 {
        powf(10.0, (log10f(ratio) - self.y) / self.slope + self.x)
    }
}

/// Datasheet curve for `gas`
pub const fn curve(gas: Gas) -> Curve {
    match gas {
        Gas::Lpg => Curve {
            x: 2.3,
            y: 0.21,
            slope: -0.47,
        },
        Gas::Co => Curve {
            x: 2.3,
            y: 0.72,
            slope: -0.34,
        },
        Gas::Smoke => Curve {
            x: 2.3,
            y: 0.53,
            slope: -0.44,
        },
    }
}

/// MQ-2 gas concentration estimator
pub struct Mq2<A> {
    adc: A,
    /// Sensor resistance in clean air, kΩ
    r0: Option<f32>,
    /// Samples averaged per reading
    samples: u16,
}

impl<A: AnalogInput> Mq2<A> {
    /// Create an uncalibrated sensor
    pub fn new(adc: A) -> Self {
        Self {
            adc,
            r0: None,
            samples: 5,
        }
    }

    /// Clean-air resistance, if calibrated
    pub fn r0(&self) -> Option<f32> {
        self.r0
    }

    /// Calibrate in clean air
    ///
    /// Averages `samples` readings and stores R0. Returns R0 in kΩ.
    pub fn calibrate(&mut self, samples: u16) -> Result<f32, SensorError> {
        let raw = self
            .adc
            .read_averaged(samples)
            .map_err(|_| SensorError::ConversionError)?;
        let r0 = resistance_kohm(raw)? / CLEAN_AIR_RATIO;
        self.r0 = Some(r0);
        Ok(r0)
    }

    /// Current Rs/R0
    pub fn ratio(&mut self) -> Result<f32, SensorError> {
        let r0 = self.r0.ok_or(SensorError::NotCalibrated)?;
        let raw = self
            .adc
            .read_averaged(self.samples)
            .map_err(|_| SensorError::ConversionError)?;
        Ok(resistance_kohm(raw)? / r0)
    }
}

impl<A: AnalogInput> GasReader for Mq2<A> {
    fn read_ppm(&mut self, gas: Gas) -> Result<f32, SensorError> {
        let ratio = self.ratio()?;
        let ppm = curve(gas).ppm(ratio);
        if ppm.is_finite() {
            Ok(ppm)
        } else {
            Err(SensorError::OutOfRange)
        }
    }
}

/// Sensor resistance for a raw reading, kΩ
fn resistance_kohm(raw: u16) -> Result<f32, SensorError> {
    if raw < MIN_RAW {
        return Err(SensorError::OutOfRange);
    }
    let raw = raw.min(ADC_MAX) as f32;
    Ok(LOAD_RESISTANCE_KOHM * (ADC_MAX as f32 - raw) / raw)
}

#[cfg(test)]
mod tests {
    use super::*;
    use core::cell::Cell;
    use fieldlink_hal::adc::AdcError;

    /// ADC returning whatever the test sets
    struct DummyAdc<'a> {
        value: &'a Cell<Result<u16, AdcError>>,
    }

    impl AnalogInput for DummyAdc<'_> {
        fn read_raw(&mut self) -> Result<u16, AdcError> {
            self.value.get()
        }
    }

    #[test]
    fn test_uncalibrated_read_fails() {
        let value = Cell::new(Ok(1000));
        let mut mq2 = Mq2::new(DummyAdc { value: &value });
        assert_eq!(mq2.read_ppm(Gas::Lpg), Err(SensorError::NotCalibrated));
    }

    #[test]
    fn test_calibrate_sets_r0() {
        let value = Cell::new(Ok(1000));
        let mut mq2 = Mq2::new(DummyAdc { value: &value });
        let r0 = mq2.calibrate(50).unwrap();

        let expected = 5.0 * 3095.0 / 1000.0 / CLEAN_AIR_RATIO;
        assert!((r0 - expected).abs() < 1e-4);
        assert_eq!(mq2.r0(), Some(r0));
    }

    #[test]
    fn test_clean_air_ratio() {
        let value = Cell::new(Ok(1000));
        let mut mq2 = Mq2::new(DummyAdc { value: &value });
        mq2.calibrate(50).unwrap();
        assert!((mq2.ratio().unwrap() - CLEAN_AIR_RATIO).abs() < 1e-3);
    }

    #[test]
    fn test_clean_air_reads_low() {
        let value = Cell::new(Ok(1000));
        let mut mq2 = Mq2::new(DummyAdc { value: &value });
        mq2.calibrate(50).unwrap();

        for gas in Gas::ALL {
            let ppm = mq2.read_ppm(gas).unwrap();
            assert!(ppm > 0.0 && ppm < 50.0, "{:?} read {}", gas, ppm);
        }
    }

    #[test]
    fn test_more_gas_reads_higher() {
        let value = Cell::new(Ok(1000));
        let mut mq2 = Mq2::new(DummyAdc { value: &value });
        mq2.calibrate(50).unwrap();
        let clean = mq2.read_ppm(Gas::Smoke).unwrap();

        // Lower Rs pulls the divider output up
        value.set(Ok(2500));
        let dirty = mq2.read_ppm(Gas::Smoke).unwrap();
        assert!(dirty > clean);
    }

    #[test]
    fn test_curve_reference_point() {
        // At log10(ratio) == y the curve returns 10^x
        let c = curve(Gas::Co);
        let ppm = c.ppm(powf(10.0, c.y));
        assert!((ppm - powf(10.0, c.x)).abs() < 0.5);
    }

    #[test]
    fn test_disconnected_sensor() {
        let value = Cell::new(Ok(1000));
        let mut mq2 = Mq2::new(DummyAdc { value: &value });
        mq2.calibrate(50).unwrap();

        value.set(Ok(0));
        assert_eq!(mq2.read_ppm(Gas::Co), Err(SensorError::OutOfRange));
        assert_eq!(mq2.calibrate(10), Err(SensorError::OutOfRange));
    }

    #[test]
    fn test_adc_failure() {
        let value = Cell::new(Ok(1000));
        let mut mq2 = Mq2::new(DummyAdc { value: &value });
        mq2.calibrate(50).unwrap();

        value.set(Err(AdcError::Conversion));
        assert_eq!(mq2.read_ppm(Gas::Lpg), Err(SensorError::ConversionError));
    }

    #[test]
    fn test_full_scale_is_infinite_concentration() {
        let value = Cell::new(Ok(1000));
        let mut mq2 = Mq2::new(DummyAdc { value: &value });
        mq2.calibrate(50).unwrap();

        value.set(Ok(ADC_MAX));
        assert_eq!(mq2.read_ppm(Gas::Lpg), Err(SensorError::OutOfRange));
    }
}
