//! Configuration type definitions
//!
//! All tunables are compile-time constants. The firmware crates generate
//! their values from `node.toml` at build time; the `DEFAULT` constants
//! here are the values the link was commissioned with.

/// Raw ADC readings at the soil sensor's calibration points
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct SoilCalibration {
    /// Reading in dry soil (maps to 0 %)
    pub dry_raw: u16,
    /// Reading in saturated soil (maps to 100 %)
    pub wet_raw: u16,
}

impl SoilCalibration {
    pub const DEFAULT: Self = Self {
        dry_raw: 3700,
        wet_raw: 1300,
    };
}

impl Default for SoilCalibration {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// Sampler node configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct SamplerConfig {
    /// Marker written into every record
    pub tag: &'static str,
    /// Hardware address of the presenter
    pub peer: [u8; 6],
    /// How long each cycle drains the GPS stream
    pub gps_window_ms: u32,
    /// Gas estimate refresh period
    pub gas_refresh_ms: u32,
    /// Record transmit period
    pub send_interval_ms: u32,
    /// Fixed offset from GPS UTC to local time
    pub utc_offset_hours: i8,
    /// Soil sensor calibration points
    pub soil: SoilCalibration,
    /// ADC samples averaged for the gas sensor clean-air calibration
    pub gas_calibration_samples: u16,
}

impl SamplerConfig {
    pub const DEFAULT: Self = Self {
        tag: "RTF TOP",
        peer: [0x00, 0x11, 0x22, 0x33, 0x44, 0x55],
        gps_window_ms: 1000,
        gas_refresh_ms: 5000,
        send_interval_ms: 1000,
        utc_offset_hours: 3,
        soil: SoilCalibration::DEFAULT,
        gas_calibration_samples: 50,
    };
}

impl Default for SamplerConfig {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// Joystick axis thresholds in raw ADC counts
///
/// An axis reading below the low threshold or above the high threshold
/// counts as a deflection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct JoystickThresholds {
    pub left: u16,
    pub right: u16,
    pub up: u16,
    pub down: u16,
}

impl JoystickThresholds {
    pub const DEFAULT: Self = Self {
        left: 1000,
        right: 3000,
        up: 1000,
        down: 3000,
    };
}

impl Default for JoystickThresholds {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// Presenter node configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PresenterConfig {
    /// Delay between rendered frames
    pub frame_ms: u32,
    /// Joystick deflection thresholds
    pub joystick: JoystickThresholds,
    /// Minimum interval between recognized joystick transitions
    pub joystick_gate_ms: u32,
    /// Button debounce time
    pub button_debounce_ms: u32,
}

impl PresenterConfig {
    pub const DEFAULT: Self = Self {
        frame_ms: 200,
        joystick: JoystickThresholds::DEFAULT,
        joystick_gate_ms: 150,
        button_debounce_ms: 30,
    };
}

impl Default for PresenterConfig {
    fn default() -> Self {
        Self::DEFAULT
    }
}
