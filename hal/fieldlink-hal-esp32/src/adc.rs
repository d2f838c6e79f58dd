//! ADC channel implementation
//!
//! Several channels of ADC1 are read from the same task, so the converter
//! sits in a `RefCell` and each channel borrows it for one conversion.

use core::cell::RefCell;

use esp_hal::analog::adc::{Adc, AdcChannel, AdcPin};
use esp_hal::peripherals::ADC1;
use fieldlink_hal::adc::{AdcError, AnalogInput};

/// One ADC1 channel
pub struct AdcInput<'a, PIN> {
    adc: &'a RefCell<Adc<'static, ADC1>>,
    pin: AdcPin<PIN, ADC1>,
}

impl<'a, PIN: AdcChannel> AdcInput<'a, PIN> {
    /// Wrap a pin enabled on the shared converter
    pub fn new(adc: &'a RefCell<Adc<'static, ADC1>>, pin: AdcPin<PIN, ADC1>) -> Self {
        Self { adc, pin }
    }
}

impl<PIN: AdcChannel> AnalogInput for AdcInput<'_, PIN> {
    fn read_raw(&mut self) -> Result<u16, AdcError> {
        let mut adc = self
            .adc
            .try_borrow_mut()
            .map_err(|_| AdcError::NotConfigured)?;
        nb::block!(adc.read_oneshot(&mut self.pin)).map_err(|_| AdcError::Conversion)
    }
}
