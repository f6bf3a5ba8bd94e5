/*
 *  constants.rs
 *
 *  serialtft - Hobbytronics serial TFT driver
 *  (c) 2020-26 Stuart Hunter
 *
 *  Wire constants and screen geometry shared across the driver
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

//! This module contains global constants used across the protocol and display modules.

/// First byte of every command frame.
pub const CMD_BEGIN: u8 = 27;
/// Last byte of every command frame.
pub const CMD_END: u8 = 255;
/// Byte sent in place of an opcode to clear the screen.
pub const CMD_CLEAR: u8 = 0;
/// Carriage return, appended by `write_line`.
pub const RETURN: u8 = 13;

/// Complete clear-screen frame.
pub const CLEAR_SCREEN: [u8; 3] = [CMD_BEGIN, CMD_CLEAR, CMD_END];

/// The total width of the TFT in pixels.
pub const SCREEN_WIDTH: i32 = 160;
/// The total height of the TFT in pixels.
pub const SCREEN_HEIGHT: i32 = 128;
pub const SCREEN_WIDTH_HALF: i32 = SCREEN_WIDTH / 2;
pub const SCREEN_HEIGHT_HALF: i32 = SCREEN_HEIGHT / 2;

/// Maximum number of text bytes the controller accepts in one write.
pub const TEXT_PACKET_SIZE: usize = 16;

/// Radius of the stub left blank at the centre of an analog hand.
pub const HAND_STUB_RADIUS: f64 = 6.0;

/// Factory defaults for a Raspberry Pi UART.
pub const DEFAULT_DEVICE: &str = "/dev/ttyAMA0";
pub const DEFAULT_BAUD_RATE: u32 = 9600;
