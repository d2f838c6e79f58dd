//! ST7735 TFT driver
//!
//! Driver for 128x160 ST7735 panels over SPI, portrait orientation.
//! Drawing goes to an RGB565 frame buffer through embedded-graphics; the
//! whole buffer is streamed to the panel on flush.

use core::convert::Infallible;

use embedded_graphics::mono_font::ascii::FONT_6X10;
use embedded_graphics::mono_font::MonoTextStyleBuilder;
use embedded_graphics::pixelcolor::raw::RawU16;
use embedded_graphics::pixelcolor::{IntoStorage, Rgb565};
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::{PrimitiveStyle, Rectangle};
use embedded_graphics::text::{Baseline, Text};
use embedded_hal::delay::DelayNs;
use embedded_hal::digital::OutputPin;
use embedded_hal::spi::SpiDevice;

use fieldlink_display::{DisplayBackend, DisplayError, Tone, SCREEN_COLS, SCREEN_ROWS};

/// Panel dimensions in pixels
pub const WIDTH: usize = 128;
pub const HEIGHT: usize = 160;

/// Character cell size (FONT_6X10)
const CELL_W: i32 = 6;
const CELL_H: i32 = 10;

/// Pixels sent per SPI transfer during flush
const FLUSH_CHUNK: usize = 256;

/// ST7735 commands
#[allow(dead_code)]
mod cmd {
    pub const SWRESET: u8 = 0x01;
    pub const SLPOUT: u8 = 0x11;
    pub const NORON: u8 = 0x13;
    pub const INVOFF: u8 = 0x20;
    pub const DISPON: u8 = 0x29;
    pub const CASET: u8 = 0x2A;
    pub const RASET: u8 = 0x2B;
    pub const RAMWR: u8 = 0x2C;
    pub const MADCTL: u8 = 0x36;
    pub const COLMOD: u8 = 0x3A;
    pub const FRMCTR1: u8 = 0xB1;
}

/// MADCTL: BGR order, rows and columns in panel order
const MADCTL_PORTRAIT_BGR: u8 = 0x08;

/// COLMOD: 16 bits per pixel
const COLMOD_RGB565: u8 = 0x05;

/// RGB565 frame buffer covering the whole panel
pub struct FrameBuffer {
    pixels: [u16; WIDTH * HEIGHT],
}

impl Default for FrameBuffer {
    fn default() -> Self {
        Self::new()
    }
}

impl FrameBuffer {
    pub const fn new() -> Self {
        Self {
            pixels: [0; WIDTH * HEIGHT],
        }
    }
}

impl OriginDimensions for FrameBuffer {
    fn size(&self) -> Size {
        Size::new(WIDTH as u32, HEIGHT as u32)
    }
}

impl DrawTarget for FrameBuffer {
    type Color = Rgb565;
    type Error = Infallible;

    fn draw_iter<I>(&mut self, pixels: I) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pixel<Self::Color>>,
    {
        for Pixel(point, color) in pixels {
            let (Ok(x), Ok(y)) = (usize::try_from(point.x), usize::try_from(point.y)) else {
                continue;
            };
            if x < WIDTH && y < HEIGHT {
                self.pixels[y * WIDTH + x] = color.into_storage();
            }
        }
        Ok(())
    }

    fn clear(&mut self, color: Self::Color) -> Result<(), Self::Error> {
        self.pixels.fill(color.into_storage());
        Ok(())
    }
}

fn color(tone: Tone) -> Rgb565 {
    Rgb565::from(RawU16::new(tone.rgb565()))
}

/// ST7735 TFT driver
pub struct St7735<'a, SPI, DC> {
    spi: SPI,
    dc: DC,
    frame: &'a mut FrameBuffer,
    ready: bool,
}

impl<'a, SPI, DC> St7735<'a, SPI, DC>
where
    SPI: SpiDevice,
    DC: OutputPin,
{
    /// Create a driver drawing into `frame`
    pub fn new(spi: SPI, dc: DC, frame: &'a mut FrameBuffer) -> Self {
        Self {
            spi,
            dc,
            frame,
            ready: false,
        }
    }

    /// Run the power-up sequence
    pub fn init<D: DelayNs>(&mut self, delay: &mut D) -> Result<(), DisplayError> {
        self.command(cmd::SWRESET, &[])?;
        delay.delay_ms(150);
        self.command(cmd::SLPOUT, &[])?;
        delay.delay_ms(255);

        self.command(cmd::FRMCTR1, &[0x01, 0x2C, 0x2D])?;
        self.command(cmd::INVOFF, &[])?;
        self.command(cmd::MADCTL, &[MADCTL_PORTRAIT_BGR])?;
        self.command(cmd::COLMOD, &[COLMOD_RGB565])?;
        self.command(cmd::NORON, &[])?;
        delay.delay_ms(10);
        self.command(cmd::DISPON, &[])?;
        delay.delay_ms(100);

        self.ready = true;
        Ok(())
    }

    /// Send a command byte followed by its parameters
    fn command(&mut self, cmd: u8, args: &[u8]) -> Result<(), DisplayError> {
        self.dc.set_low().map_err(|_| DisplayError::Communication)?;
        self.spi
            .write(&[cmd])
            .map_err(|_| DisplayError::Communication)?;
        if !args.is_empty() {
            self.dc.set_high().map_err(|_| DisplayError::Communication)?;
            self.spi
                .write(args)
                .map_err(|_| DisplayError::Communication)?;
        }
        Ok(())
    }

    /// Address the whole panel for a RAM write
    fn full_window(&mut self) -> Result<(), DisplayError> {
        let x_end = (WIDTH - 1) as u16;
        let y_end = (HEIGHT - 1) as u16;
        self.command(cmd::CASET, &[0, 0, (x_end >> 8) as u8, x_end as u8])?;
        self.command(cmd::RASET, &[0, 0, (y_end >> 8) as u8, y_end as u8])?;
        self.command(cmd::RAMWR, &[])
    }
}

impl<SPI, DC> DisplayBackend for St7735<'_, SPI, DC>
where
    SPI: SpiDevice,
    DC: OutputPin,
{
    fn clear(&mut self) -> Result<(), DisplayError> {
        self.frame.pixels.fill(Tone::Black.rgb565());
        Ok(())
    }

    fn fill_rows(&mut self, first_row: u8, rows: u8, tone: Tone) -> Result<(), DisplayError> {
        if first_row as usize + rows as usize > SCREEN_ROWS {
            return Err(DisplayError::InvalidCoordinates);
        }
        let top = Point::new(0, first_row as i32 * CELL_H);
        let size = Size::new(WIDTH as u32, rows as u32 * CELL_H as u32);
        let _ = Rectangle::new(top, size)
            .into_styled(PrimitiveStyle::with_fill(color(tone)))
            .draw(&mut *self.frame);
        Ok(())
    }

    fn draw_text(
        &mut self,
        row: u8,
        col: u8,
        text: &str,
        fg: Tone,
        bg: Tone,
    ) -> Result<(), DisplayError> {
        if row as usize >= SCREEN_ROWS || col as usize >= SCREEN_COLS {
            return Err(DisplayError::InvalidCoordinates);
        }
        let style = MonoTextStyleBuilder::new()
            .font(&FONT_6X10)
            .text_color(color(fg))
            .background_color(color(bg))
            .build();
        let origin = Point::new(col as i32 * CELL_W, row as i32 * CELL_H);
        let _ = Text::with_baseline(text, origin, style, Baseline::Top).draw(&mut *self.frame);
        Ok(())
    }

    fn flush(&mut self) -> Result<(), DisplayError> {
        if !self.ready {
            return Err(DisplayError::NotInitialized);
        }
        self.full_window()?;
        self.dc.set_high().map_err(|_| DisplayError::Communication)?;

        let mut bytes = [0u8; FLUSH_CHUNK * 2];
        for chunk in self.frame.pixels.chunks(FLUSH_CHUNK) {
            for (out, px) in bytes.chunks_exact_mut(2).zip(chunk) {
                out.copy_from_slice(&px.to_be_bytes());
            }
            self.spi
                .write(&bytes[..chunk.len() * 2])
                .map_err(|_| DisplayError::Communication)?;
        }
        Ok(())
    }

    fn is_ready(&self) -> bool {
        self.ready
    }
}
