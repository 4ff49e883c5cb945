//! LcdDisplay: an in-memory HD44780-style character display.
//!
//! Holds the eight user-defined glyphs (CGRAM) and the 2x16 character codes
//! (DDRAM) written through the [`Display`] trait. The view reads pixels back
//! out of it, so what the terminal shows is exactly what was written.

use anyhow::{bail, Result};

use crate::engine::Display;
use crate::types::{BLANK_CODE, GLYPH_COUNT, GLYPH_HEIGHT, GLYPH_WIDTH, LCD_COLUMNS, LCD_LINES};

/// Only the low five bits of a glyph row are pixels.
const ROW_MASK: u8 = (1 << GLYPH_WIDTH) - 1;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LcdDisplay {
    cgram: [[u8; GLYPH_HEIGHT]; GLYPH_COUNT],
    ddram: [[u8; LCD_COLUMNS]; LCD_LINES],
    /// (line, column); column may sit one past the end after a full line
    cursor: (usize, usize),
}

impl LcdDisplay {
    pub fn new() -> Self {
        Self {
            cgram: [[0; GLYPH_HEIGHT]; GLYPH_COUNT],
            ddram: [[BLANK_CODE; LCD_COLUMNS]; LCD_LINES],
            cursor: (0, 0),
        }
    }

    pub fn cursor(&self) -> (usize, usize) {
        self.cursor
    }

    pub fn glyph(&self, index: usize) -> Option<&[u8; GLYPH_HEIGHT]> {
        self.cgram.get(index)
    }

    /// Character code at (`line`, `column`)
    pub fn code_at(&self, line: usize, column: usize) -> Option<u8> {
        self.ddram.get(line)?.get(column).copied()
    }

    pub fn line(&self, line: usize) -> Option<&[u8; LCD_COLUMNS]> {
        self.ddram.get(line)
    }

    /// Whether pixel (`x`, `y`) of the character at (`line`, `column`) is lit.
    ///
    /// `x` counts from the left (0-4), `y` from the top (0-7). Codes 0-7 use
    /// the uploaded glyphs; every other code draws as blank, since the
    /// built-in character ROM is not emulated.
    pub fn pixel(&self, line: usize, column: usize, x: usize, y: usize) -> bool {
        if x >= GLYPH_WIDTH || y >= GLYPH_HEIGHT {
            return false;
        }
        match self.code_at(line, column) {
            Some(code) if (code as usize) < GLYPH_COUNT => {
                self.cgram[code as usize][y] & (1 << (GLYPH_WIDTH - 1 - x)) != 0
            }
            _ => false,
        }
    }
}

impl Default for LcdDisplay {
    fn default() -> Self {
        Self::new()
    }
}

impl Display for LcdDisplay {
    fn upload_glyph(&mut self, index: u8, bitmap: &[u8; GLYPH_HEIGHT]) -> Result<()> {
        let Some(slot) = self.cgram.get_mut(index as usize) else {
            bail!("glyph index {} out of range (0-{})", index, GLYPH_COUNT - 1);
        };
        for (dst, src) in slot.iter_mut().zip(bitmap) {
            *dst = src & ROW_MASK;
        }
        Ok(())
    }

    fn set_cursor(&mut self, line: u8, column: u8) -> Result<()> {
        let (line, column) = (line as usize, column as usize);
        if line >= LCD_LINES || column >= LCD_COLUMNS {
            bail!("cursor ({}, {}) outside {}x{} display", line, column, LCD_LINES, LCD_COLUMNS);
        }
        self.cursor = (line, column);
        Ok(())
    }

    fn write_glyph(&mut self, code: u8) -> Result<()> {
        let (line, column) = self.cursor;
        if column >= LCD_COLUMNS {
            bail!("write past end of line {}", line);
        }
        self.ddram[line][column] = code;
        self.cursor.1 += 1;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_display_is_blank() {
        let lcd = LcdDisplay::new();
        assert_eq!(lcd.line(0), Some(&[b' '; LCD_COLUMNS]));
        assert!(!lcd.pixel(0, 0, 0, 0));
    }

    #[test]
    fn write_advances_cursor() {
        let mut lcd = LcdDisplay::new();
        lcd.set_cursor(1, 14).unwrap();
        lcd.write_glyph(3).unwrap();
        lcd.write_glyph(4).unwrap();
        assert_eq!(lcd.cursor(), (1, 16));
        assert_eq!(lcd.code_at(1, 14), Some(3));
        assert_eq!(lcd.code_at(1, 15), Some(4));
        assert!(lcd.write_glyph(5).is_err());
    }

    #[test]
    fn bad_indices_are_errors() {
        let mut lcd = LcdDisplay::new();
        assert!(lcd.upload_glyph(8, &[0; GLYPH_HEIGHT]).is_err());
        assert!(lcd.set_cursor(2, 0).is_err());
        assert!(lcd.set_cursor(0, 16).is_err());
        assert_eq!(lcd.cursor(), (0, 0));
    }

    #[test]
    fn pixels_come_from_uploaded_glyphs() {
        let mut lcd = LcdDisplay::new();
        lcd.upload_glyph(2, &[0b10000, 0, 0, 0, 0, 0, 0, 0b11100001])
            .unwrap();
        assert_eq!(lcd.glyph(2).map(|g| g[7]), Some(0b00001));
        lcd.set_cursor(0, 3).unwrap();
        lcd.write_glyph(2).unwrap();
        assert!(lcd.pixel(0, 3, 0, 0));
        assert!(!lcd.pixel(0, 3, 1, 0));
        assert!(lcd.pixel(0, 3, 4, 7));
        assert!(!lcd.pixel(0, 3, 0, 7));
    }
}
