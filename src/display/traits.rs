/*
 *  display/traits.rs
 *
 *  serialtft - Hobbytronics serial TFT driver
 *  (c) 2020-26 Stuart Hunter
 *
 *  Byte-stream abstraction underneath the TFT connection
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

use std::time::Duration;

use crate::display::error::TftError;

/// Minimal write-only link - every transport carrying frames implements this
///
/// There is no read side: the controller never replies. Implementations
/// must not buffer across calls in a way that reorders bytes.
pub trait Link: Send {
    /// Short human readable name for logging
    fn name(&self) -> &str;

    /// Queue raw bytes for transmission
    fn write(&mut self, bytes: &[u8]) -> Result<(), TftError>;

    /// Block until every queued byte has left the host
    fn flush(&mut self) -> Result<(), TftError>;

    /// Wait out a pacing delay
    ///
    /// The default blocks the calling thread. Test links record the delay
    /// instead of sleeping.
    fn pause(&mut self, delay: Duration) {
        std::thread::sleep(delay);
    }
}

impl<L: Link + ?Sized> Link for Box<L> {
    fn name(&self) -> &str {
        (**self).name()
    }

    fn write(&mut self, bytes: &[u8]) -> Result<(), TftError> {
        (**self).write(bytes)
    }

    fn flush(&mut self) -> Result<(), TftError> {
        (**self).flush()
    }

    fn pause(&mut self, delay: Duration) {
        (**self).pause(delay)
    }
}

/// A boxed link chosen at runtime (serial device or dry-run recorder)
pub type BoxedLink = Box<dyn Link>;
