/*
 *  protocol/codec.rs
 *
 *  serialtft - Hobbytronics serial TFT driver
 *  (c) 2020-26 Stuart Hunter
 *
 *  Single-byte parameter encoding
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

//! Every parameter travels as exactly one byte. Values outside 0..=255 are
//! wrapped (`value mod 256`), never rejected: callers range-check first.

use serde::{Deserialize, Serialize};

/// A value that can be placed in a frame as a single parameter byte.
pub trait Param {
    fn to_param(self) -> u8;
}

/// Encode an integer parameter by truncation to its low byte.
#[inline]
pub fn encode(value: i64) -> u8 {
    value.rem_euclid(256) as u8
}

impl Param for u8 {
    #[inline]
    fn to_param(self) -> u8 {
        self
    }
}

impl Param for i32 {
    #[inline]
    fn to_param(self) -> u8 {
        encode(self as i64)
    }
}

/// Screen orientation as understood by the firmware
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "snake_case")]
#[repr(u8)]
pub enum Rotation {
    PortraitLeft = 0,
    LandscapeUpsidedown = 1,
    PortraitRight = 2,
    Landscape = 3,
}

impl Param for Rotation {
    #[inline]
    fn to_param(self) -> u8 {
        self as u8
    }
}

/// Built-in font sizes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "snake_case")]
#[repr(u8)]
pub enum FontSize {
    Small = 1,
    Medium = 2,
    Large = 3,
}

impl Param for FontSize {
    #[inline]
    fn to_param(self) -> u8 {
        self as u8
    }
}
