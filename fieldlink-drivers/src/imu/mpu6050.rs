//! MPU6050 6-axis IMU (I2C)
//!
//! Only the default full-scale ranges are used: ±2 g and ±500 °/s. A read
//! fetches the whole accel/temp/gyro block in one burst so the three
//! quantities come from the same sample.
//!
//! # Register block at 0x3B (big-endian i16)
//!
//! | Offset | Field        |
//! |--------|--------------|
//! | 0..6   | ACCEL X/Y/Z  |
//! | 6..8   | TEMP         |
//! | 8..14  | GYRO X/Y/Z   |

use embedded_hal_async::i2c::I2c;
use fieldlink_core::traits::{MotionSample, MotionSensor, SensorError};

/// MPU6050 register addresses
pub mod reg {
    /// Sample rate divider
    pub const SMPLRT_DIV: u8 = 0x19;
    /// Gyro full-scale range
    pub const GYRO_CONFIG: u8 = 0x1B;
    /// Accel full-scale range
    pub const ACCEL_CONFIG: u8 = 0x1C;
    /// First byte of the sample block
    pub const ACCEL_XOUT_H: u8 = 0x3B;
    /// Power management; bit 6 is SLEEP
    pub const PWR_MGMT_1: u8 = 0x6B;
    /// Device identity
    pub const WHO_AM_I: u8 = 0x75;
}

/// Default address with AD0 low
pub const DEFAULT_ADDRESS: u8 = 0x68;

/// Value of WHO_AM_I on a genuine part
const DEVICE_ID: u8 = 0x68;

/// GYRO_CONFIG FS_SEL for ±500 °/s
const GYRO_FS_500: u8 = 0x08;
/// ACCEL_CONFIG AFS_SEL for ±2 g
const ACCEL_FS_2G: u8 = 0x00;

/// LSB per g at ±2 g
const ACCEL_LSB_PER_G: f32 = 16384.0;
/// LSB per °/s at ±500 °/s
const GYRO_LSB_PER_DPS: f32 = 65.5;

const STANDARD_GRAVITY: f32 = 9.80665;
const DEG_TO_RAD: f32 = core::f32::consts::PI / 180.0;

/// Sample block length
const BLOCK_LEN: usize = 14;

/// Die temperature from the raw TEMP register
pub fn temperature_celsius(raw: i16) -> f32 {
    raw as f32 / 340.0 + 36.53
}

/// MPU6050 driver
pub struct Mpu6050<I> {
    i2c: I,
    address: u8,
}

impl<I: I2c> Mpu6050<I> {
    /// Create a driver at the default address
    ///
    /// The device stays asleep until [`Mpu6050::init`] is called.
    pub fn new(i2c: I) -> Self {
        Self::with_address(i2c, DEFAULT_ADDRESS)
    }

    /// Create a driver at a custom address (AD0 high: 0x69)
    pub fn with_address(i2c: I, address: u8) -> Self {
        Self { i2c, address }
    }

    /// Check identity, wake the device and set the ranges
    pub async fn init(&mut self) -> Result<(), SensorError> {
        let id = self.read_register(reg::WHO_AM_I).await?;
        if id != DEVICE_ID {
            return Err(SensorError::WrongDevice);
        }

        // Clear SLEEP, internal oscillator
        self.write_register(reg::PWR_MGMT_1, 0x00).await?;
        self.write_register(reg::SMPLRT_DIV, 0x00).await?;
        self.write_register(reg::ACCEL_CONFIG, ACCEL_FS_2G).await?;
        self.write_register(reg::GYRO_CONFIG, GYRO_FS_500).await?;
        Ok(())
    }

    /// Release the bus
    pub fn release(self) -> I {
        self.i2c
    }

    async fn read_register(&mut self, register: u8) -> Result<u8, SensorError> {
        let mut buf = [0u8; 1];
        self.i2c
            .write_read(self.address, &[register], &mut buf)
            .await
            .map_err(|_| SensorError::NotResponding)?;
        Ok(buf[0])
    }

    async fn write_register(&mut self, register: u8, value: u8) -> Result<(), SensorError> {
        self.i2c
            .write(self.address, &[register, value])
            .await
            .map_err(|_| SensorError::Bus)
    }
}

/// Decode a raw sample block
fn decode_block(block: &[u8; BLOCK_LEN]) -> MotionSample {
    let word = |i: usize| i16::from_be_bytes([block[i], block[i + 1]]);

    let mut sample = MotionSample {
        temperature_c: temperature_celsius(word(6)),
        ..MotionSample::default()
    };
    for axis in 0..3 {
        sample.accel[axis] = word(axis * 2) as f32 / ACCEL_LSB_PER_G * STANDARD_GRAVITY;
        sample.gyro[axis] = word(8 + axis * 2) as f32 / GYRO_LSB_PER_DPS * DEG_TO_RAD;
    }
    sample
}

impl<I: I2c> MotionSensor for Mpu6050<I> {
    async fn read(&mut self) -> Result<MotionSample, SensorError> {
        let mut block = [0u8; BLOCK_LEN];
        self.i2c
            .write_read(self.address, &[reg::ACCEL_XOUT_H], &mut block)
            .await
            .map_err(|_| SensorError::Bus)?;
        Ok(decode_block(&block))
    }
}

#[cfg(test)]
mod tests {
    extern crate std;

    use super::*;
    use embassy_futures::block_on;
    use embedded_hal_async::i2c::{ErrorKind, ErrorType, Operation, SevenBitAddress};
    use std::vec::Vec;

    /// Register-file fake answering write-then-read transactions
    struct FakeBus {
        address: u8,
        regs: [u8; 128],
        writes: Vec<(u8, u8)>,
        present: bool,
    }

    impl FakeBus {
        fn new() -> Self {
            let mut regs = [0u8; 128];
            regs[reg::WHO_AM_I as usize] = DEVICE_ID;
            regs[reg::PWR_MGMT_1 as usize] = 0x40;
            Self {
                address: DEFAULT_ADDRESS,
                regs,
                writes: Vec::new(),
                present: true,
            }
        }

        fn set_word(&mut self, register: u8, value: i16) {
            let [hi, lo] = value.to_be_bytes();
            self.regs[register as usize] = hi;
            self.regs[register as usize + 1] = lo;
        }
    }

    impl ErrorType for FakeBus {
        type Error = ErrorKind;
    }

    impl I2c<SevenBitAddress> for FakeBus {
        async fn transaction(
            &mut self,
            address: u8,
            operations: &mut [Operation<'_>],
        ) -> Result<(), Self::Error> {
            if !self.present || address != self.address {
                return Err(ErrorKind::Other);
            }
            let mut pointer = 0usize;
            for op in operations {
                match op {
                    Operation::Write(bytes) => {
                        pointer = bytes[0] as usize;
                        if let Some(&value) = bytes.get(1) {
                            self.regs[pointer] = value;
                            self.writes.push((bytes[0], value));
                        }
                    }
                    Operation::Read(buf) => {
                        for (i, b) in buf.iter_mut().enumerate() {
                            *b = self.regs[pointer + i];
                        }
                    }
                }
            }
            Ok(())
        }
    }

    #[test]
    fn test_init_wakes_device() {
        let mut imu = Mpu6050::new(FakeBus::new());
        block_on(imu.init()).unwrap();

        let bus = imu.release();
        assert_eq!(bus.regs[reg::PWR_MGMT_1 as usize], 0x00);
        assert_eq!(bus.regs[reg::GYRO_CONFIG as usize], GYRO_FS_500);
        assert_eq!(bus.writes[0], (reg::PWR_MGMT_1, 0x00));
    }

    #[test]
    fn test_init_wrong_device() {
        let mut bus = FakeBus::new();
        bus.regs[reg::WHO_AM_I as usize] = 0x70;
        let mut imu = Mpu6050::new(bus);
        assert_eq!(block_on(imu.init()), Err(SensorError::WrongDevice));
    }

    #[test]
    fn test_init_absent_device() {
        let mut bus = FakeBus::new();
        bus.present = false;
        let mut imu = Mpu6050::new(bus);
        assert_eq!(block_on(imu.init()), Err(SensorError::NotResponding));
    }

    #[test]
    fn test_read_sample() {
        let mut bus = FakeBus::new();
        // 1 g on Z, +2 °C over offset, 10 °/s on gyro X
        bus.set_word(0x3F, 16384);
        bus.set_word(0x41, 340 * 2);
        bus.set_word(0x43, 655);
        let mut imu = Mpu6050::new(bus);
        block_on(imu.init()).unwrap();

        let sample = block_on(imu.read()).unwrap();
        assert!((sample.accel[2] - STANDARD_GRAVITY).abs() < 1e-3);
        assert_eq!(sample.accel[0], 0.0);
        assert!((sample.temperature_c - 38.53).abs() < 1e-3);
        assert!((sample.gyro[0] - 10.0 * DEG_TO_RAD).abs() < 1e-4);
    }

    #[test]
    fn test_read_bus_error() {
        let mut imu = Mpu6050::new(FakeBus::new());
        block_on(imu.init()).unwrap();
        let mut bus = imu.release();
        bus.present = false;
        let mut imu = Mpu6050::new(bus);
        assert_eq!(block_on(imu.read()), Err(SensorError::Bus));
    }

    #[test]
    fn test_temperature_conversion() {
        assert!((temperature_celsius(0) - 36.53).abs() < 1e-4);
        assert!((temperature_celsius(-3400) - 26.53).abs() < 1e-3);
    }
}
