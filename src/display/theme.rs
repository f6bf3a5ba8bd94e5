/*
 *  display/theme.rs
 *
 *  serialtft - Hobbytronics serial TFT driver
 *  (c) 2020-26 Stuart Hunter
 *
 *  Pre-built palette themes for the eight user color slots
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

//! A theme is an opaque blob written to the controller as-is. The blobs are
//! baked at compile time from 24-bit palettes listed in slot order
//! (user_black, user_blue, user_red, user_green, user_cyan, user_magenta,
//! user_yellow, user_white).

use serde::{Deserialize, Serialize};

use crate::constants::{CMD_BEGIN, CMD_END};
use crate::display::color::pack_rgb565;
use crate::protocol::opcode::Opcode;

const SLOT_FRAME_LEN: usize = 6;
const FIRST_USER_SLOT: u8 = 8;
pub const THEME_BLOB_LEN: usize = SLOT_FRAME_LEN * 8;

const fn bake(palette: [u32; 8]) -> [u8; THEME_BLOB_LEN] {
    let mut out = [0u8; THEME_BLOB_LEN];
    let mut i = 0;
    while i < 8 {
        let rgb = palette[i];
        let (low, high) = pack_rgb565((rgb >> 16) as u8, (rgb >> 8) as u8, rgb as u8);
        let at = i * SLOT_FRAME_LEN;
        out[at] = CMD_BEGIN;
        out[at + 1] = Opcode::SetColor.byte();
        out[at + 2] = FIRST_USER_SLOT + i as u8;
        out[at + 3] = low;
        out[at + 4] = high;
        out[at + 5] = CMD_END;
        i += 1;
    }
    out
}

const PALETTE_DEFAULT: [u32; 8] = [
    0x000000, 0x0000FF, 0xFF0000, 0x00FF00, 0x00FFFF, 0xFF00FF, 0xFFFF00, 0xFFFFFF,
];
const PALETTE_RED: [u32; 8] = [
    0x1A0000, 0x800000, 0xFF0000, 0xB22222, 0xFF6347, 0xDC143C, 0xFFA07A, 0xFFE4E1,
];
const PALETTE_MATRIX: [u32; 8] = [
    0x000000, 0x003B00, 0x008F11, 0x00FF41, 0x0D2B0D, 0x00C832, 0x80FF80, 0xD0FFD0,
];
const PALETTE_LIGHT: [u32; 8] = [
    0xFAFAFA, 0x1E88E5, 0xE53935, 0x43A047, 0x00ACC1, 0x8E24AA, 0xFDD835, 0x212121,
];
const PALETTE_DARK: [u32; 8] = [
    0x121212, 0x3F51B5, 0xB71C1C, 0x1B5E20, 0x006064, 0x4A148C, 0xF57F17, 0xE0E0E0,
];
const PALETTE_FLAT_UI: [u32; 8] = [
    0x2C3E50, 0x3498DB, 0xE74C3C, 0x2ECC71, 0x1ABC9C, 0x9B59B6, 0xF1C40F, 0xECF0F1,
];
const PALETTE_SOLARIZED: [u32; 8] = [
    0x002B36, 0x268BD2, 0xDC322F, 0x859900, 0x2AA198, 0xD33682, 0xB58900, 0xFDF6E3,
];

static THEME_DEFAULT: [u8; THEME_BLOB_LEN] = bake(PALETTE_DEFAULT);
static THEME_RED: [u8; THEME_BLOB_LEN] = bake(PALETTE_RED);
static THEME_MATRIX: [u8; THEME_BLOB_LEN] = bake(PALETTE_MATRIX);
static THEME_LIGHT: [u8; THEME_BLOB_LEN] = bake(PALETTE_LIGHT);
static THEME_DARK: [u8; THEME_BLOB_LEN] = bake(PALETTE_DARK);
static THEME_FLAT_UI: [u8; THEME_BLOB_LEN] = bake(PALETTE_FLAT_UI);
static THEME_SOLARIZED: [u8; THEME_BLOB_LEN] = bake(PALETTE_SOLARIZED);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum Theme {
    Default,
    Red,
    Matrix,
    Light,
    Dark,
    FlatUi,
    Solarized,
}

impl Theme {
    pub const ALL: [Theme; 7] = [
        Theme::Default,
        Theme::Red,
        Theme::Matrix,
        Theme::Light,
        Theme::Dark,
        Theme::FlatUi,
        Theme::Solarized,
    ];

    /// Bytes to write verbatim
    pub fn blob(self) -> &'static [u8] {
        match self {
            Theme::Default => &THEME_DEFAULT,
            Theme::Red => &THEME_RED,
            Theme::Matrix => &THEME_MATRIX,
            Theme::Light => &THEME_LIGHT,
            Theme::Dark => &THEME_DARK,
            Theme::FlatUi => &THEME_FLAT_UI,
            Theme::Solarized => &THEME_SOLARIZED,
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            Theme::Default => "default",
            Theme::Red => "red",
            Theme::Matrix => "matrix",
            Theme::Light => "light",
            Theme::Dark => "dark",
            Theme::FlatUi => "flat_ui",
            Theme::Solarized => "solarized",
        }
    }
}
