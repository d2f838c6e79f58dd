//! Screen buffer types
//!
//! Provides a character-based screen buffer sized for a 128x160 panel in
//! portrait orientation with a 6x10 font.

use heapless::String;

use crate::backend::{DisplayBackend, DisplayError, Tone};

/// Number of character rows (160 px / 10 px)
pub const SCREEN_ROWS: usize = 16;

/// Number of character columns (128 px / 6 px)
pub const SCREEN_COLS: usize = 21;

/// Maximum characters per line
pub const LINE_LEN: usize = SCREEN_COLS;

/// Horizontal placement of a line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Align {
    /// Start at a fixed column
    Left(u8),
    /// Centre on the row
    Center,
}

impl Align {
    /// Starting column for text of `len` characters
    pub fn column(self, len: usize) -> u8 {
        match self {
            Align::Left(col) => col,
            Align::Center => (SCREEN_COLS.saturating_sub(len) / 2) as u8,
        }
    }
}

/// One row of text
#[derive(Clone)]
struct Line {
    text: String<LINE_LEN>,
    fg: Tone,
    bg: Tone,
    align: Align,
}

impl Line {
    const fn blank() -> Self {
        Self {
            text: String::new(),
            fg: Tone::White,
            bg: Tone::Black,
            align: Align::Left(0),
        }
    }
}

/// Screen buffer for text-mode rendering
///
/// Holds everything needed to redraw the panel from scratch, so a frame
/// can be pushed to any `DisplayBackend` in one go.
#[derive(Clone)]
pub struct Screen {
    lines: [Line; SCREEN_ROWS],
    /// Filled band at the top: (rows, colour)
    band: Option<(u8, Tone)>,
    /// Whether the screen needs to be redrawn
    dirty: bool,
}

impl Default for Screen {
    fn default() -> Self {
        Self::new()
    }
}

impl Screen {
    /// Create a new empty screen
    pub fn new() -> Self {
        Self {
            lines: core::array::from_fn(|_| Line::blank()),
            band: None,
            dirty: true,
        }
    }

    /// Clear the entire screen, band included
    pub fn clear(&mut self) {
        self.clear_rows(0);
        self.band = None;
    }

    /// Blank every row from `first` to the bottom
    pub fn clear_rows(&mut self, first: usize) {
        for line in self.lines.iter_mut().skip(first) {
            *line = Line::blank();
        }
        self.dirty = true;
    }

    /// Fill the top `rows` rows with a colour band
    pub fn set_band(&mut self, rows: u8, tone: Tone) {
        self.band = Some((rows.min(SCREEN_ROWS as u8), tone));
        self.dirty = true;
    }

    /// Top band, if any
    pub fn band(&self) -> Option<(u8, Tone)> {
        self.band
    }

    /// Set the content of a specific row
    ///
    /// Text longer than a row is cut. The cell background follows the
    /// band when the row lies inside it.
    pub fn set_line(&mut self, row: usize, text: &str, fg: Tone, align: Align) {
        if row >= SCREEN_ROWS {
            return;
        }
        let bg = match self.band {
            Some((rows, tone)) if row < rows as usize => tone,
            _ => Tone::Black,
        };

        let line = &mut self.lines[row];
        line.text.clear();
        for ch in text.chars() {
            if line.text.push(ch).is_err() {
                break;
            }
        }
        line.fg = fg;
        line.bg = bg;
        line.align = align;
        self.dirty = true;
    }

    /// Get the content of a specific row
    pub fn get_line(&self, row: usize) -> Option<&str> {
        self.lines.get(row).map(|l| l.text.as_str())
    }

    /// Text colour of a row
    pub fn line_tone(&self, row: usize) -> Option<Tone> {
        self.lines.get(row).map(|l| l.fg)
    }

    /// Find the first row whose text starts with `prefix`
    pub fn find(&self, prefix: &str) -> Option<usize> {
        self.lines
            .iter()
            .position(|l| l.text.as_str().starts_with(prefix))
    }

    /// Get all lines as an iterator
    pub fn lines(&self) -> impl Iterator<Item = &str> {
        self.lines.iter().map(|l| l.text.as_str())
    }

    /// Check if screen needs redrawing
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Mark screen as clean (after rendering)
    pub fn mark_clean(&mut self) {
        self.dirty = false;
    }

    /// Draw the whole buffer to a backend and flush it
    pub fn render<B: DisplayBackend>(&mut self, backend: &mut B) -> Result<(), DisplayError> {
        if !backend.is_ready() {
            return Err(DisplayError::NotInitialized);
        }

        backend.clear()?;
        if let Some((rows, tone)) = self.band {
            backend.fill_rows(0, rows, tone)?;
        }
        for (row, line) in self.lines.iter().enumerate() {
            if line.text.is_empty() {
                continue;
            }
            let col = line.align.column(line.text.chars().count());
            backend.draw_text(row as u8, col, line.text.as_str(), line.fg, line.bg)?;
        }
        backend.flush()?;

        self.mark_clean();
        Ok(())
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for Screen {
    fn format(&self, f: defmt::Formatter) {
        defmt::write!(f, "Screen[");
        for (i, line) in self.lines.iter().enumerate() {
            if i > 0 {
                defmt::write!(f, ", ");
            }
            defmt::write!(f, "{}", line.text.as_str());
        }
        defmt::write!(f, "]");
    }
}

#[cfg(test)]
mod tests {
    extern crate std;

    use super::*;
    use std::string::String as StdString;
    use std::vec::Vec;

    #[derive(Debug, PartialEq)]
    enum Op {
        Clear,
        Fill(u8, u8, Tone),
        Text(u8, u8, StdString, Tone, Tone),
        Flush,
    }

    struct Recorder {
        ops: Vec<Op>,
        ready: bool,
    }

    impl DisplayBackend for Recorder {
        fn clear(&mut self) -> Result<(), DisplayError> {
            self.ops.push(Op::Clear);
            Ok(())
        }

        fn fill_rows(&mut self, first_row: u8, rows: u8, tone: Tone) -> Result<(), DisplayError> {
            self.ops.push(Op::Fill(first_row, rows, tone));
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
            self.ops.push(Op::Text(row, col, text.into(), fg, bg));
            Ok(())
        }

        fn flush(&mut self) -> Result<(), DisplayError> {
            self.ops.push(Op::Flush);
            Ok(())
        }

        fn is_ready(&self) -> bool {
            self.ready
        }
    }

    #[test]
    fn test_set_line_truncates() {
        let mut screen = Screen::new();
        screen.set_line(0, "0123456789012345678901234", Tone::White, Align::Left(0));
        assert_eq!(screen.get_line(0).unwrap().len(), LINE_LEN);
    }

    #[test]
    fn test_out_of_range_row_ignored() {
        let mut screen = Screen::new();
        screen.set_line(SCREEN_ROWS, "x", Tone::White, Align::Left(0));
        assert!(screen.lines().all(|l| l.is_empty()));
    }

    #[test]
    fn test_center_alignment() {
        assert_eq!(Align::Center.column(9), 6);
        assert_eq!(Align::Center.column(21), 0);
        assert_eq!(Align::Center.column(30), 0);
        assert_eq!(Align::Left(3).column(30), 3);
    }

    #[test]
    fn test_band_sets_background() {
        let mut screen = Screen::new();
        screen.set_band(3, Tone::Navy);
        screen.set_line(1, "TITLE", Tone::White, Align::Center);
        screen.set_line(5, "body", Tone::Cyan, Align::Left(1));

        let mut backend = Recorder {
            ops: Vec::new(),
            ready: true,
        };
        screen.render(&mut backend).unwrap();

        assert_eq!(
            backend.ops,
            [
                Op::Clear,
                Op::Fill(0, 3, Tone::Navy),
                Op::Text(1, 8, "TITLE".into(), Tone::White, Tone::Navy),
                Op::Text(5, 1, "body".into(), Tone::Cyan, Tone::Black),
                Op::Flush,
            ]
        );
        assert!(!screen.is_dirty());
    }

    #[test]
    fn test_clear_rows_keeps_header() {
        let mut screen = Screen::new();
        screen.set_band(3, Tone::Maroon);
        screen.set_line(1, "HEAD", Tone::White, Align::Center);
        screen.set_line(6, "old", Tone::Red, Align::Left(0));
        screen.clear_rows(3);

        assert_eq!(screen.get_line(1), Some("HEAD"));
        assert_eq!(screen.get_line(6), Some(""));
        assert_eq!(screen.band(), Some((3, Tone::Maroon)));
    }

    #[test]
    fn test_render_requires_ready_backend() {
        let mut screen = Screen::new();
        let mut backend = Recorder {
            ops: Vec::new(),
            ready: false,
        };
        assert_eq!(
            screen.render(&mut backend),
            Err(DisplayError::NotInitialized)
        );
        assert!(backend.ops.is_empty());
    }
}
