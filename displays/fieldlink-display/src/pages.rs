//! Telemetry page layouts
//!
//! Each page has a coloured header band drawn once when the page is
//! selected, and data rows rebuilt from the latest record every frame.
//! Rows are placed on the 10 px grid of the [`Screen`].

use core::fmt::Write;

use fieldlink_core::presenter::{Navigation, Page};
use fieldlink_protocol::{TelemetryRecord, RECORD_SIZE};
use heapless::String;

use crate::backend::{DisplayBackend, DisplayError, Tone};
use crate::screen::{Align, Screen};

/// Rows covered by the header band
pub const HEADER_ROWS: u8 = 3;

/// Row holding the header title
const TITLE_ROW: usize = 1;

/// Left margin for list pages
const MARGIN: Align = Align::Left(1);

/// Formatting scratch; the screen cuts anything past a row
type Text = String<48>;

/// Title and band colour of a page
pub fn header(page: Page) -> (&'static str, Tone) {
    match page {
        Page::Link => ("ESP-NOW DATA", Tone::Navy),
        Page::Gps => ("GPS DATA", Tone::DarkGreen),
        Page::Gas => ("MQ-2 DATA", Tone::Maroon),
    }
}

/// Clear the screen and draw the header of `page`
pub fn draw_header(screen: &mut Screen, page: Page) {
    let (title, tone) = header(page);
    screen.clear();
    screen.set_band(HEADER_ROWS, tone);
    screen.set_line(TITLE_ROW, title, Tone::White, Align::Center);
}

/// Rebuild the data rows of `page` from `record`
pub fn draw_data(screen: &mut Screen, page: Page, record: &TelemetryRecord) {
    screen.clear_rows(HEADER_ROWS as usize);
    match page {
        Page::Link => draw_link(screen, record),
        Page::Gps => draw_gps(screen, record),
        Page::Gas => draw_gas(screen, record),
    }
}

/// Date as DD/MM/YYYY, or "No date" before the receiver has one
pub fn format_date(record: &TelemetryRecord) -> Text {
    let mut text = Text::new();
    if record.year > 2000 {
        let _ = write!(
            text,
            "{:02}/{:02}/{:04}",
            record.day, record.month, record.year
        );
    } else {
        let _ = text.push_str("No date");
    }
    text
}

/// Time as HH:MM:SS, or "No time" for a negative hour
pub fn format_time(record: &TelemetryRecord) -> Text {
    let mut text = Text::new();
    if record.hour >= 0 {
        let _ = write!(
            text,
            "{:02}:{:02}:{:02}",
            record.hour, record.minute, record.second
        );
    } else {
        let _ = text.push_str("No time");
    }
    text
}

fn line(args: core::fmt::Arguments<'_>) -> Text {
    let mut text = Text::new();
    let _ = text.write_fmt(args);
    text
}

fn draw_link(screen: &mut Screen, record: &TelemetryRecord) {
    screen.set_line(6, &format_date(record), Tone::Yellow, Align::Center);
    screen.set_line(9, &format_time(record), Tone::Cyan, Align::Center);
    screen.set_line(
        14,
        &line(format_args!("Temp: {:.1} C", record.temperature)),
        Tone::Orange,
        Align::Center,
    );
}

fn draw_gps(screen: &mut Screen, record: &TelemetryRecord) {
    let rows = [
        (5, line(format_args!("Lat: {:.6}", record.latitude)), Tone::Cyan),
        (7, line(format_args!("Lon: {:.6}", record.longitude)), Tone::Cyan),
        (9, line(format_args!("Alt: {:.1} m", record.altitude)), Tone::Yellow),
        (11, line(format_args!("Spd: {:.1} km/h", record.speed)), Tone::Magenta),
        (13, line(format_args!("Sat: {}", record.satellites)), Tone::Orange),
    ];
    for (row, text, tone) in rows.iter() {
        screen.set_line(*row, text, *tone, MARGIN);
    }
}

fn draw_gas(screen: &mut Screen, record: &TelemetryRecord) {
    let rows = [
        (4, line(format_args!("CO: {:.2} ppm", record.co)), Tone::Orange),
        (6, line(format_args!("Smoke: {:.2} ppm", record.smoke)), Tone::Red),
        (8, line(format_args!("LPG: {:.2} ppm", record.lpg)), Tone::Yellow),
        (
            10,
            line(format_args!("HumiditySoil: {}%", record.soil_humidity)),
            Tone::Cyan,
        ),
    ];
    for (row, text, tone) in rows.iter() {
        screen.set_line(*row, text, *tone, MARGIN);
    }
    screen.set_line(
        13,
        &line(format_args!("Struct size: {}", RECORD_SIZE)),
        Tone::Green,
        Align::Left(3),
    );
}

/// Draw the boot splash shown until the first frame
pub fn draw_splash(screen: &mut Screen) {
    screen.clear();
    screen.set_band(HEADER_ROWS, Tone::Navy);
    screen.set_line(TITLE_ROW, "FIELDLINK", Tone::White, Align::Center);
    screen.set_line(7, "Presenter", Tone::Cyan, Align::Center);
    screen.set_line(9, "Waiting for link", Tone::Yellow, Align::Center);
}

/// Frame composer for the presenter loop
pub struct PageRenderer {
    screen: Screen,
}

impl Default for PageRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl PageRenderer {
    pub fn new() -> Self {
        Self {
            screen: Screen::new(),
        }
    }

    /// Off-screen buffer
    pub fn screen(&self) -> &Screen {
        &self.screen
    }

    /// Compose the boot splash
    pub fn splash(&mut self) {
        draw_splash(&mut self.screen);
    }

    /// Compose one frame
    ///
    /// The header is rebuilt only when navigation asks for it.
    pub fn frame(&mut self, nav: &Navigation, record: &TelemetryRecord) {
        if nav.redraw_header {
            draw_header(&mut self.screen, nav.page);
        }
        draw_data(&mut self.screen, nav.page, record);
    }

    /// Push the composed frame to the panel
    pub fn push<B: DisplayBackend>(&mut self, backend: &mut B) -> Result<(), DisplayError> {
        self.screen.render(backend)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fieldlink_core::config::{PresenterConfig, SamplerConfig};
    use fieldlink_core::presenter::{InputSample, Navigator};
    use fieldlink_core::sampler::{CycleInputs, Sampler};
    use fieldlink_core::traits::{FixDecoder, Gas, GasReader, SensorError};
    use fieldlink_drivers::gps::NmeaDecoder;
    use fieldlink_protocol::RECORD_TAG;
    use proptest::prelude::*;

    fn nav(page: Page, redraw_header: bool) -> Navigation {
        Navigation {
            page,
            redraw_header,
            button_pressed: false,
            direction: None,
        }
    }

    fn sample() -> TelemetryRecord {
        TelemetryRecord {
            temperature: 24.5,
            latitude: 50.45,
            longitude: 30.52,
            speed: 18.52,
            satellites: 7,
            altitude: 180.2,
            year: 2024,
            month: 6,
            day: 1,
            hour: 15,
            minute: 4,
            second: 9,
            lpg: 4.25,
            co: 31.5,
            smoke: 17.75,
            soil_humidity: 50,
            ..TelemetryRecord::with_tag(RECORD_TAG)
        }
    }

    fn rendered(page: Page, record: &TelemetryRecord) -> Screen {
        let mut renderer = PageRenderer::new();
        renderer.frame(&nav(page, true), record);
        renderer.screen().clone()
    }

    #[test]
    fn test_link_page() {
        let screen = rendered(Page::Link, &sample());
        assert_eq!(screen.get_line(1), Some("ESP-NOW DATA"));
        assert_eq!(screen.band(), Some((HEADER_ROWS, Tone::Navy)));
        assert_eq!(screen.get_line(6), Some("01/06/2024"));
        assert_eq!(screen.get_line(9), Some("15:04:09"));
        assert_eq!(screen.get_line(14), Some("Temp: 24.5 C"));
        assert_eq!(screen.line_tone(9), Some(Tone::Cyan));
    }

    #[test]
    fn test_link_page_without_date_or_time() {
        let mut record = sample();
        record.year = 2000;
        record.hour = -1;
        let screen = rendered(Page::Link, &record);
        assert_eq!(screen.get_line(6), Some("No date"));
        assert_eq!(screen.get_line(9), Some("No time"));
    }

    #[test]
    fn test_gps_page() {
        let screen = rendered(Page::Gps, &sample());
        assert_eq!(screen.get_line(1), Some("GPS DATA"));
        assert_eq!(screen.get_line(5), Some("Lat: 50.450001"));
        assert_eq!(screen.get_line(7), Some("Lon: 30.520000"));
        assert_eq!(screen.get_line(9), Some("Alt: 180.2 m"));
        assert_eq!(screen.get_line(11), Some("Spd: 18.5 km/h"));
        assert_eq!(screen.get_line(13), Some("Sat: 7"));
    }

    #[test]
    fn test_gps_page_sentinels() {
        let mut record = sample();
        record.satellites = -1;
        record.altitude = -1.0;
        record.latitude = 0.0;
        let screen = rendered(Page::Gps, &record);
        assert_eq!(screen.get_line(5), Some("Lat: 0.000000"));
        assert_eq!(screen.get_line(9), Some("Alt: -1.0 m"));
        assert_eq!(screen.get_line(13), Some("Sat: -1"));
    }

    #[test]
    fn test_gas_page() {
        let screen = rendered(Page::Gas, &sample());
        assert_eq!(screen.get_line(1), Some("MQ-2 DATA"));
        assert_eq!(screen.get_line(4), Some("CO: 31.50 ppm"));
        assert_eq!(screen.get_line(6), Some("Smoke: 17.75 ppm"));
        assert_eq!(screen.get_line(8), Some("LPG: 4.25 ppm"));
        assert_eq!(screen.get_line(10), Some("HumiditySoil: 50%"));
        assert_eq!(screen.get_line(13), Some("Struct size: 96"));
        assert_eq!(screen.line_tone(6), Some(Tone::Red));
    }

    #[test]
    fn test_unclamped_soil_shown_as_is() {
        let mut record = sample();
        record.soil_humidity = 117;
        let screen = rendered(Page::Gas, &record);
        assert_eq!(screen.get_line(10), Some("HumiditySoil: 117%"));
    }

    #[test]
    fn test_header_kept_between_frames() {
        let mut renderer = PageRenderer::new();
        renderer.frame(&nav(Page::Gps, true), &sample());

        let mut record = sample();
        record.satellites = 9;
        renderer.frame(&nav(Page::Gps, false), &record);

        assert_eq!(renderer.screen().get_line(1), Some("GPS DATA"));
        assert_eq!(renderer.screen().get_line(13), Some("Sat: 9"));
    }

    #[test]
    fn test_page_switch_clears_previous_rows() {
        let mut renderer = PageRenderer::new();
        renderer.frame(&nav(Page::Gps, true), &sample());
        renderer.frame(&nav(Page::Link, true), &sample());

        let screen = renderer.screen();
        assert_eq!(screen.find("Lat:"), None);
        assert_eq!(screen.get_line(1), Some("ESP-NOW DATA"));
    }

    #[test]
    fn test_splash() {
        let mut renderer = PageRenderer::new();
        renderer.splash();
        assert_eq!(renderer.screen().get_line(1), Some("FIELDLINK"));
        assert!(renderer.screen().find("Waiting").is_some());
    }

    #[test]
    fn test_empty_record_before_first_frame() {
        let screen = rendered(Page::Link, &TelemetryRecord::EMPTY);
        assert_eq!(screen.get_line(6), Some("No date"));
        assert_eq!(screen.get_line(9), Some("00:00:00"));
        assert_eq!(screen.get_line(14), Some("Temp: 0.0 C"));
    }

    #[test]
    fn test_pages_navigable_before_any_record() {
        let mut navigator = Navigator::new(&PresenterConfig::DEFAULT);
        let mut renderer = PageRenderer::new();
        let record = TelemetryRecord::EMPTY;
        let idle = InputSample {
            x: 2048,
            y: 2048,
            button_down: false,
        };
        let right = InputSample { x: 4000, ..idle };

        renderer.frame(&navigator.poll(0, idle), &record);
        assert_eq!(renderer.screen().get_line(1), Some("ESP-NOW DATA"));

        renderer.frame(&navigator.poll(1000, right), &record);
        assert_eq!(renderer.screen().get_line(1), Some("GPS DATA"));
        assert_eq!(renderer.screen().get_line(13), Some("Sat: 0"));

        renderer.frame(&navigator.poll(1200, idle), &record);
        renderer.frame(&navigator.poll(1400, right), &record);
        assert_eq!(renderer.screen().get_line(1), Some("MQ-2 DATA"));
        assert_eq!(renderer.screen().get_line(4), Some("CO: 0.00 ppm"));
    }

    struct FixedGas;

    impl GasReader for FixedGas {
        fn read_ppm(&mut self, gas: Gas) -> Result<f32, SensorError> {
            Ok(match gas {
                Gas::Lpg => 4.25,
                Gas::Co => 31.5,
                Gas::Smoke => 17.75,
            })
        }
    }

    #[test]
    fn test_sampler_to_screen() {
        let mut gps = NmeaDecoder::new();
        gps.feed_bytes(
            b"$GPGGA,120000.00,5027.0000,N,03031.2000,E,1,07,1.0,180.2,M,27.0,M,,*64\r\n",
        );
        gps.feed_bytes(b"$GPRMC,120000.00,A,5027.0000,N,03031.2000,E,10.0,0.0,010624,,,A*6E\r\n");

        let mut sampler = Sampler::new(SamplerConfig::DEFAULT);
        let inputs = CycleInputs {
            fix: gps.fix(),
            temperature_c: Some(24.5),
            soil_raw: Some(2500),
        };
        let outcome = sampler.cycle(5000, &inputs, &mut FixedGas);
        let frame = outcome.frame.unwrap();

        // Over the air and back
        let record = TelemetryRecord::decode(&frame).unwrap();
        assert_eq!(record.tag(), RECORD_TAG);

        let link = rendered(Page::Link, &record);
        assert_eq!(link.get_line(6), Some("01/06/2024"));
        assert_eq!(link.get_line(9), Some("15:00:00"));
        assert_eq!(link.get_line(14), Some("Temp: 24.5 C"));

        let gps_page = rendered(Page::Gps, &record);
        assert!(gps_page.get_line(5).unwrap().starts_with("Lat: 50.45"));
        assert!(gps_page.get_line(7).unwrap().starts_with("Lon: 30.52"));
        assert_eq!(gps_page.get_line(9), Some("Alt: 180.2 m"));
        assert_eq!(gps_page.get_line(11), Some("Spd: 18.5 km/h"));
        assert_eq!(gps_page.get_line(13), Some("Sat: 7"));

        let gas_page = rendered(Page::Gas, &record);
        assert_eq!(gas_page.get_line(4), Some("CO: 31.50 ppm"));
        assert_eq!(gas_page.get_line(10), Some("HumiditySoil: 50%"));
        assert_eq!(gas_page.get_line(13), Some("Struct size: 96"));
    }

    proptest! {
        #[test]
        fn prop_any_record_renders_every_page(bytes in prop::collection::vec(any::<u8>(), RECORD_SIZE)) {
            let record = TelemetryRecord::decode(&bytes).unwrap();
            for page in Page::ALL {
                let screen = rendered(page, &record);
                prop_assert_eq!(screen.get_line(1), Some(header(page).0));
                prop_assert!(screen.lines().all(|l| l.len() <= crate::SCREEN_COLS));
            }
        }
    }
}
