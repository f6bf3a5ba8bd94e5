/*
 *  display/color.rs
 *
 *  serialtft - Hobbytronics serial TFT driver
 *  (c) 2020-26 Stuart Hunter
 *
 *  Symbolic palette ids and 5-6-5 color packing
 *
 *  This program is free software: you can redistribute it and/or modify
 *  it under the terms of the GNU General Public License as published by
 *  the Free Software Foundation, either version 3 of the License, or
 *  (at your option) any later version.
 *
 *  This program is distributed in the hope that it will be useful,
 *  but WITHOUT ANY WARRANTY; without even the implied warranty of
 *  MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
 *  GNU General Public License for more details.
 *
 *  See <http://www.gnu.org/licenses/> to get a copy of the GNU General
 *  Public License.
 *
 */

use serde::{Deserialize, Serialize};

use crate::display::error::TftError;
use crate::protocol::codec::Param;

/// Palette entry as understood by the controller
///
/// Ids 0-7 are the stock hues. Ids 8-15 are user slots that themes and
/// `set_color_*` redefine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "snake_case")]
#[repr(u8)]
pub enum Color {
    Black = 0,
    Blue = 1,
    Red = 2,
    Green = 3,
    Cyan = 4,
    Magenta = 5,
    Yellow = 6,
    White = 7,
    User1 = 8,
    User2 = 9,
    User3 = 10,
    User4 = 11,
    User5 = 12,
    User6 = 13,
    User7 = 14,
    User8 = 15,
}

/// User slots named after the hue the built-in themes put in them
impl Color {
    pub const USER_BLACK: Color = Color::User1;
    pub const USER_BLUE: Color = Color::User2;
    pub const USER_RED: Color = Color::User3;
    pub const USER_GREEN: Color = Color::User4;
    pub const USER_CYAN: Color = Color::User5;
    pub const USER_MAGENTA: Color = Color::User6;
    pub const USER_YELLOW: Color = Color::User7;
    pub const USER_WHITE: Color = Color::User8;
}

impl Color {
    pub const ALL: [Color; 16] = [
        Color::Black, Color::Blue, Color::Red, Color::Green,
        Color::Cyan, Color::Magenta, Color::Yellow, Color::White,
        Color::User1, Color::User2, Color::User3, Color::User4,
        Color::User5, Color::User6, Color::User7, Color::User8,
    ];

    /// The eight redefinable slots, in slot order
    pub const USER_SLOTS: [Color; 8] = [
        Color::User1, Color::User2, Color::User3, Color::User4,
        Color::User5, Color::User6, Color::User7, Color::User8,
    ];

    #[inline]
    pub const fn id(self) -> u8 {
        self as u8
    }

    pub fn from_id(id: u8) -> Option<Color> {
        Self::ALL.get(id as usize).copied()
    }

    pub const fn is_user_slot(self) -> bool {
        self.id() >= 8
    }
}

impl Param for Color {
    #[inline]
    fn to_param(self) -> u8 {
        self.id()
    }
}

/// 16-bit 5-6-5 color as stored in a palette slot
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Rgb565(u16);

impl Rgb565 {
    pub const fn new(value: u16) -> Self {
        Rgb565(value)
    }

    /// Pack 8-bit channels, keeping the top 5/6/5 bits of each
    pub const fn from_rgb(r: u8, g: u8, b: u8) -> Self {
        let r = (r & 0xF8) as u16;
        let g = (g & 0xFC) as u16;
        let b = (b >> 3) as u16;
        Rgb565((r << 8) | (g << 3) | b)
    }

    pub fn from_hex(hex: &str) -> Result<Self, TftError> {
        let (r, g, b) = hex_to_rgb(hex)?;
        Ok(Self::from_rgb(r, g, b))
    }

    pub const fn value(self) -> u16 {
        self.0
    }

    /// Base-256 split as sent on the wire: (low, high)
    pub const fn bytes(self) -> (u8, u8) {
        ((self.0 % 256) as u8, (self.0 / 256) as u8)
    }
}

/// Pack 8-bit channels into 5-6-5 and split into (low, high) bytes
pub const fn pack_rgb565(r: u8, g: u8, b: u8) -> (u8, u8) {
    Rgb565::from_rgb(r, g, b).bytes()
}

/// Parse `#rrggbb` (or `#rgb`) into 8-bit channels.
///
/// The digits are split into three equal runs; `#rgb` yields one-digit
/// channels (`f` is 15, not 255).
pub fn hex_to_rgb(hex: &str) -> Result<(u8, u8, u8), TftError> {
    let digits = hex.trim_start_matches('#');
    let len = digits.len();
    if len == 0 || len % 3 != 0 || len > 6 || !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
        return Err(TftError::InvalidHex(hex.to_string()));
    }
    let step = len / 3;
    let channel = |i: usize| {
        u8::from_str_radix(&digits[i * step..(i + 1) * step], 16)
            .map_err(|_| TftError::InvalidHex(hex.to_string()))
    };
    Ok((channel(0)?, channel(1)?, channel(2)?))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn formula(r: u8, g: u8, b: u8) -> u16 {
        (((r as u16) & 0xF8) << 8) | (((g as u16) & 0xFC) << 3) | ((b as u16) >> 3)
    }

    #[test]
    fn test_ids() {
        assert_eq!(Color::Black.id(), 0);
        assert_eq!(Color::White.id(), 7);
        assert_eq!(Color::USER_BLACK.id(), 8);
        assert_eq!(Color::USER_WHITE.id(), 15);
        for (idx, color) in Color::ALL.iter().enumerate() {
            assert_eq!(color.id() as usize, idx);
            assert_eq!(Color::from_id(idx as u8), Some(*color));
        }
        assert_eq!(Color::from_id(16), None);
    }

    #[test]
    fn test_user_slots() {
        assert!(!Color::White.is_user_slot());
        assert!(Color::User1.is_user_slot());
        assert!(Color::USER_SLOTS.iter().all(|c| c.is_user_slot()));
    }

    #[test]
    fn test_pack_extremes() {
        assert_eq!(Rgb565::from_rgb(0xFF, 0xFF, 0xFF).value(), 0xFFFF);
        assert_eq!(Rgb565::from_rgb(0, 0, 0).value(), 0);
        assert_eq!(Rgb565::from_rgb(0xFF, 0, 0).value(), 0xF800);
        assert_eq!(Rgb565::from_rgb(0, 0xFF, 0).value(), 0x07E0);
        assert_eq!(Rgb565::from_rgb(0, 0, 0xFF).value(), 0x001F);
    }

    #[test]
    fn test_pack_matches_mask_formula() {
        let samples = [(0xF8, 0xFC, 0xF8), (0x12, 0x34, 0x56), (0x07, 0x03, 0x07), (200, 100, 50)];
        for (r, g, b) in samples {
            let value = formula(r, g, b);
            assert_eq!(Rgb565::from_rgb(r, g, b).value(), value);
            assert_eq!(pack_rgb565(r, g, b), ((value % 256) as u8, (value / 256) as u8));
        }
        // low bits below the masks are discarded
        assert_eq!(Rgb565::from_rgb(0x07, 0x03, 0x07).value(), 0);
    }

    #[test]
    fn test_bytes_order() {
        assert_eq!(Rgb565::new(0xF81F).bytes(), (0x1F, 0xF8));
    }

    #[test]
    fn test_hex_parsing() {
        assert_eq!(hex_to_rgb("#ff8000").unwrap(), (0xFF, 0x80, 0x00));
        assert_eq!(hex_to_rgb("268bd2").unwrap(), (0x26, 0x8B, 0xD2));
        assert_eq!(hex_to_rgb("#fff").unwrap(), (15, 15, 15));
        assert_eq!(Rgb565::from_hex("#ffffff").unwrap().value(), 0xFFFF);
    }

    #[test]
    fn test_malformed_hex_is_rejected() {
        for bad in ["", "#", "#12345", "#gg0000", "#1234567", "#12345678", "+f+f+f"] {
            assert!(matches!(hex_to_rgb(bad), Err(TftError::InvalidHex(_))), "{}", bad);
        }
    }
}
