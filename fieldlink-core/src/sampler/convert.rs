//! Reading conversions applied before a record is sent

use crate::config::SoilCalibration;

/// Integer linear re-mapping with truncating division
///
/// Same arithmetic as the Arduino `map()` helper: no clamping, so inputs
/// outside `[in_min, in_max]` extrapolate. A degenerate input range maps
/// everything to `out_min`.
pub fn map_range(x: i32, in_min: i32, in_max: i32, out_min: i32, out_max: i32) -> i32 {
    let run = in_max - in_min;
    if run == 0 {
        return out_min;
    }
    (x - in_min) * (out_max - out_min) / run + out_min
}

/// Soil humidity in percent from a raw sensor reading
///
/// Capacitive sensors read lower when wetter, so `dry_raw` maps to 0 and
/// `wet_raw` to 100. Not clamped: readings beyond the calibration points
/// produce values outside 0..=100, which flags a drifted calibration.
pub fn soil_percent(raw: u16, calibration: &SoilCalibration) -> i32 {
    map_range(
        raw as i32,
        calibration.dry_raw as i32,
        calibration.wet_raw as i32,
        0,
        100,
    )
}

/// Local hour from a GPS UTC hour and a fixed offset, wrapped to 0..=23
pub fn local_hour(utc_hour: u8, offset_hours: i8) -> i32 {
    (utc_hour as i32 + offset_hours as i32).rem_euclid(24)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    const CAL: SoilCalibration = SoilCalibration::DEFAULT;

    #[test]
    fn test_soil_endpoints() {
        assert_eq!(soil_percent(3700, &CAL), 0);
        assert_eq!(soil_percent(1300, &CAL), 100);
        assert_eq!(soil_percent(2500, &CAL), 50);
    }

    #[test]
    fn test_soil_unclamped() {
        // Drier than the dry point
        assert_eq!(soil_percent(4095, &CAL), -16);
        // Wetter than the wet point
        assert_eq!(soil_percent(0, &CAL), 154);
        assert_eq!(soil_percent(1000, &CAL), 112);
    }

    #[test]
    fn test_map_degenerate_range() {
        assert_eq!(map_range(5, 10, 10, 0, 100), 0);
    }

    #[test]
    fn test_local_hour_wraps() {
        assert_eq!(local_hour(12, 3), 15);
        assert_eq!(local_hour(21, 3), 0);
        assert_eq!(local_hour(23, 3), 2);
        assert_eq!(local_hour(1, -3), 22);
    }

    proptest! {
        #[test]
        fn prop_local_hour_in_range(h in 0u8..24) {
            let local = local_hour(h, 3);
            prop_assert!((0..24).contains(&local));
            prop_assert_eq!(local, (h as i32 + 3) % 24);
        }

        #[test]
        fn prop_soil_is_monotonic_decreasing(a in 0u16..=4095, b in 0u16..=4095) {
            let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
            prop_assert!(soil_percent(lo, &CAL) >= soil_percent(hi, &CAL));
        }

        #[test]
        fn prop_soil_inside_calibration_is_percent(raw in 1300u16..=3700) {
            let pct = soil_percent(raw, &CAL);
            prop_assert!((0..=100).contains(&pct));
        }
    }
}
