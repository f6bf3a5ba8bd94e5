/*
 *  display/mod.rs
 *
 *  serialtft - Hobbytronics serial TFT driver
 *  (c) 2020-26 Stuart Hunter
 *
 *  Display subsystem - connection, links, palette and themes
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

// Core trait definitions
pub mod traits;
pub mod error;
pub mod color;
pub mod theme;

// Link implementations
pub mod drivers;

// The connection itself
pub mod tft;

// Re-exports for convenience
pub use traits::{Link, BoxedLink};
pub use error::TftError;
pub use color::{Color, Rgb565, pack_rgb565, hex_to_rgb};
pub use theme::Theme;
pub use tft::{SerialTft, TftOptions};
pub use drivers::mock::{MockLink, LinkEvent};

#[cfg(unix)]
pub use drivers::serial::SerialLink;
