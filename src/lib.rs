/*
 *  lib.rs
 *
 *  serialtft - Hobbytronics serial TFT driver
 *  (c) 2020-26 Stuart Hunter
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

//! Driver for the Hobbytronics serial TFT: a 160x128 controller fed over a
//! slow UART with no flow control and no replies.
//!
//! ```no_run
//! use serialtft::display::{Color, SerialTft};
//!
//! # fn main() -> Result<(), serialtft::display::TftError> {
//! let mut tft = SerialTft::open("/dev/ttyAMA0", 9600, true, true)?;
//! tft.clear_screen()?;
//! tft.draw_circle(80, 64, 30, Some(Color::Yellow))?;
//! tft.write("Hello")?;
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod constants;
pub mod demo;
pub mod display;
pub mod pacer;
pub mod protocol;
pub mod trig;

pub use display::{Color, Link, SerialTft, TftError, TftOptions, Theme};
pub use protocol::{Command, FontSize, Rotation};
