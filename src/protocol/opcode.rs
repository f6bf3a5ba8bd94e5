/*
 *  protocol/opcode.rs
 *
 *  serialtft - Hobbytronics serial TFT driver
 *  (c) 2020-26 Stuart Hunter
 *
 *  Controller opcode catalogue
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

use std::fmt;

/// Every command the controller firmware understands.
///
/// Clearing the screen is not an opcode: the clear frame carries a bare `0`
/// where the opcode would sit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Opcode {
    FgColor = 1,
    BgColor = 2,
    ScreenRotation = 3,
    FontSize = 4,
    LineStart = 5,
    PosText = 6,
    PosPixel = 7,
    DrawLine = 8,
    DrawBox = 9,
    DrawFilledBox = 10,
    DrawCircle = 11,
    DrawFilledCircle = 12,
    DisplayBitmap = 13,
    Brightness = 14,
    SetColor = 15,
    DrawPixel = 16,
}

impl Opcode {
    pub const ALL: [Opcode; 16] = [
        Opcode::FgColor,
        Opcode::BgColor,
        Opcode::ScreenRotation,
        Opcode::FontSize,
        Opcode::LineStart,
        Opcode::PosText,
        Opcode::PosPixel,
        Opcode::DrawLine,
        Opcode::DrawBox,
        Opcode::DrawFilledBox,
        Opcode::DrawCircle,
        Opcode::DrawFilledCircle,
        Opcode::DisplayBitmap,
        Opcode::Brightness,
        Opcode::SetColor,
        Opcode::DrawPixel,
    ];

    /// Wire byte for this opcode
    #[inline]
    pub const fn byte(self) -> u8 {
        self as u8
    }

    pub fn from_byte(byte: u8) -> Option<Opcode> {
        Self::ALL.iter().copied().find(|op| op.byte() == byte)
    }

    /// Whether the modified firmware accepts a trailing per-call color byte
    pub const fn accepts_color(self) -> bool {
        matches!(
            self,
            Opcode::DrawPixel
                | Opcode::DrawLine
                | Opcode::DrawBox
                | Opcode::DrawFilledBox
                | Opcode::DrawCircle
                | Opcode::DrawFilledCircle
        )
    }

    pub const fn name(self) -> &'static str {
        match self {
            Opcode::FgColor => "fg_color",
            Opcode::BgColor => "bg_color",
            Opcode::ScreenRotation => "screen_rotation",
            Opcode::FontSize => "font_size",
            Opcode::LineStart => "line_start",
            Opcode::PosText => "pos_text",
            Opcode::PosPixel => "pos_pixel",
            Opcode::DrawLine => "draw_line",
            Opcode::DrawBox => "draw_box",
            Opcode::DrawFilledBox => "draw_filled_box",
            Opcode::DrawCircle => "draw_circle",
            Opcode::DrawFilledCircle => "draw_filled_circle",
            Opcode::DisplayBitmap => "display_bitmap",
            Opcode::Brightness => "brightness",
            Opcode::SetColor => "set_color",
            Opcode::DrawPixel => "draw_pixel",
        }
    }
}

impl fmt::Display for Opcode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}({})", self.name(), self.byte())
    }
}
