//! Analog input abstractions
//!
//! Both nodes sample analog sensors with the ESP32 12-bit ADC at 11 dB
//! attenuation (0-3.3 V mapped to 0-4095).

/// Full-scale reading of a 12-bit ADC
pub const ADC_MAX: u16 = 4095;

/// Errors from an ADC conversion
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum AdcError {
    /// The conversion did not complete
    Conversion,
    /// Channel is not configured
    NotConfigured,
}

/// A single ADC channel read in one-shot mode
pub trait AnalogInput {
    /// Take one raw reading (0..=ADC_MAX)
    fn read_raw(&mut self) -> Result<u16, AdcError>;

    /// Average `samples` consecutive readings
    ///
    /// Failed conversions are skipped; returns an error only if every
    /// sample failed.
    fn read_averaged(&mut self, samples: u16) -> Result<u16, AdcError> {
        let mut sum: u32 = 0;
        let mut ok: u32 = 0;
        for _ in 0..samples.max(1) {
            if let Ok(raw) = self.read_raw() {
                sum += raw as u32;
                ok += 1;
            }
        }
        if ok == 0 {
            return Err(AdcError::Conversion);
        }
        Ok((sum / ok) as u16)
    }
}
