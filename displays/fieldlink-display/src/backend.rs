//! Display backend trait
//!
//! Defines the interface the renderer needs from a panel.

/// Display backend errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DisplayError {
    /// Communication error with display
    Communication,
    /// Invalid coordinates or dimensions
    InvalidCoordinates,
    /// Display not initialized
    NotInitialized,
}

/// Semantic text and fill colours
///
/// Backends map these to whatever their panel supports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Tone {
    #[default]
    Black,
    White,
    Navy,
    DarkGreen,
    Maroon,
    Yellow,
    Cyan,
    Orange,
    Magenta,
    Red,
    Green,
}

impl Tone {
    /// RGB565 value, as used by most SPI TFT controllers
    pub const fn rgb565(self) -> u16 {
        match self {
            Tone::Black => 0x0000,
            Tone::White => 0xFFFF,
            Tone::Navy => 0x000F,
            Tone::DarkGreen => 0x03E0,
            Tone::Maroon => 0x7800,
            Tone::Yellow => 0xFFE0,
            Tone::Cyan => 0x07FF,
            Tone::Orange => 0xFDA0,
            Tone::Magenta => 0xF81F,
            Tone::Red => 0xF800,
            Tone::Green => 0x07E0,
        }
    }
}

/// Display backend trait
///
/// Provides a hardware-agnostic interface for rendering character rows.
/// Drawing calls may be buffered; nothing is guaranteed to be visible
/// before [`DisplayBackend::flush`].
pub trait DisplayBackend {
    /// Fill the entire display with black
    fn clear(&mut self) -> Result<(), DisplayError>;

    /// Fill `rows` full-width character rows starting at `first_row`
    fn fill_rows(&mut self, first_row: u8, rows: u8, tone: Tone) -> Result<(), DisplayError>;

    /// Draw text at the specified row and column
    ///
    /// - `row`: Row number (0-based)
    /// - `col`: Column number in characters (0-based)
    /// - `text`: Text to display
    /// - `fg`, `bg`: glyph and cell colours
    fn draw_text(
        &mut self,
        row: u8,
        col: u8,
        text: &str,
        fg: Tone,
        bg: Tone,
    ) -> Result<(), DisplayError>;

    /// Flush buffered content to the display
    fn flush(&mut self) -> Result<(), DisplayError>;

    /// Check if the display is ready
    fn is_ready(&self) -> bool;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_tone_is_black() {
        assert_eq!(Tone::default(), Tone::Black);
        assert_eq!(Tone::default().rgb565(), 0);
    }

    #[test]
    fn test_primary_colours() {
        assert_eq!(Tone::Red.rgb565() >> 11, 0x1F);
        assert_eq!((Tone::Green.rgb565() >> 5) & 0x3F, 0x3F);
        assert_eq!(Tone::Cyan.rgb565() & 0x1F, 0x1F);
    }
}
