/*
 *  display/error.rs
 *
 *  serialtft - Hobbytronics serial TFT driver
 *  (c) 2020-26 Stuart Hunter
 *
 *  Unified error type for the TFT connection
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

use std::error::Error;
use std::fmt;
use std::io;

/// Unified error type for all TFT operations
///
/// Only local failures can be reported: the controller never answers, so a
/// command it drops is invisible here.
#[derive(Debug)]
pub enum TftError {
    /// Serial device could not be opened or configured
    OpenFailed { device: String, source: io::Error },

    /// Baud rate has no termios equivalent
    UnsupportedBaudRate(u32),

    /// Write or flush on the byte stream failed
    Io(io::Error),

    /// Hex color string is not three equal runs of hex digits
    InvalidHex(String),
}

impl fmt::Display for TftError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TftError::OpenFailed { device, source } =>
                write!(f, "Failed to open {}: {}", device, source),
            TftError::UnsupportedBaudRate(baud) =>
                write!(f, "Unsupported baud rate: {}", baud),
            TftError::Io(err) =>
                write!(f, "Serial I/O error: {}", err),
            TftError::InvalidHex(value) =>
                write!(f, "Invalid hex color: {:?}", value),
        }
    }
}

impl Error for TftError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            TftError::OpenFailed { source, .. } => Some(source),
            TftError::Io(err) => Some(err),
            _ => None,
        }
    }
}

impl From<io::Error> for TftError {
    fn from(err: io::Error) -> Self {
        TftError::Io(err)
    }
}
