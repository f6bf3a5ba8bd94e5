/*
 *  display/drivers/serial.rs
 *
 *  serialtft - Hobbytronics serial TFT driver
 *  (c) 2020-26 Stuart Hunter
 *
 *  UART link: raw 8N1 tty configured through termios
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

use std::fs::{File, OpenOptions};
use std::io::{self, Write};
use std::os::unix::fs::OpenOptionsExt;
use std::os::unix::io::{AsRawFd, RawFd};

use log::{debug, info};

use crate::display::error::TftError;
use crate::display::traits::Link;

/// Baud rates the controller jumpers support, with their termios codes
const BAUD_RATES: [(u32, libc::speed_t); 8] = [
    (1200, libc::B1200),
    (2400, libc::B2400),
    (4800, libc::B4800),
    (9600, libc::B9600),
    (19200, libc::B19200),
    (38400, libc::B38400),
    (57600, libc::B57600),
    (115200, libc::B115200),
];

pub fn baud_supported(baud: u32) -> bool {
    speed_for(baud).is_some()
}

fn speed_for(baud: u32) -> Option<libc::speed_t> {
    BAUD_RATES.iter().find(|(b, _)| *b == baud).map(|(_, s)| *s)
}

/// Serial port link
///
/// Write-only: the controller never talks back, so the receiver is left
/// enabled but never read.
pub struct SerialLink {
    port: File,
    device: String,
    baud_rate: u32,
}

impl SerialLink {
    /// Open and configure a tty
    ///
    /// # Arguments
    ///
    /// * `device` - Path to the tty (e.g., "/dev/ttyAMA0")
    /// * `baud_rate` - Line speed, must match the controller's jumper setting
    pub fn open(device: &str, baud_rate: u32) -> Result<Self, TftError> {
        let speed = speed_for(baud_rate).ok_or(TftError::UnsupportedBaudRate(baud_rate))?;

        info!("Opening {} at {} baud", device, baud_rate);

        let port = OpenOptions::new()
            .read(true)
            .write(true)
            .custom_flags(libc::O_NOCTTY)
            .open(device)
            .map_err(|source| TftError::OpenFailed { device: device.to_string(), source })?;

        configure_raw(port.as_raw_fd(), speed)
            .map_err(|source| TftError::OpenFailed { device: device.to_string(), source })?;

        debug!("{} configured raw 8N1", device);

        Ok(Self { port, device: device.to_string(), baud_rate })
    }

    pub fn baud_rate(&self) -> u32 {
        self.baud_rate
    }
}

fn configure_raw(fd: RawFd, speed: libc::speed_t) -> io::Result<()> {
    // SAFETY: fd is an open descriptor owned by the caller's File and the
    // termios struct is fully initialised by tcgetattr before use
    unsafe {
        let mut tio: libc::termios = std::mem::zeroed();
        if libc::tcgetattr(fd, &mut tio) != 0 {
            return Err(io::Error::last_os_error());
        }
        libc::cfmakeraw(&mut tio);
        tio.c_cflag &= !(libc::CSTOPB | libc::CRTSCTS);
        tio.c_cflag |= libc::CLOCAL | libc::CREAD;
        if libc::cfsetispeed(&mut tio, speed) != 0 || libc::cfsetospeed(&mut tio, speed) != 0 {
            return Err(io::Error::last_os_error());
        }
        if libc::tcsetattr(fd, libc::TCSANOW, &tio) != 0 {
            return Err(io::Error::last_os_error());
        }
        libc::tcflush(fd, libc::TCIOFLUSH);
    }
    Ok(())
}

impl Link for SerialLink {
    fn name(&self) -> &str {
        &self.device
    }

    fn write(&mut self, bytes: &[u8]) -> Result<(), TftError> {
        self.port.write_all(bytes)?;
        Ok(())
    }

    /// Wait for the UART to drain, not just the kernel buffer
    fn flush(&mut self) -> Result<(), TftError> {
        self.port.flush()?;
        // SAFETY: descriptor is valid for the lifetime of self.port
        if unsafe { libc::tcdrain(self.port.as_raw_fd()) } != 0 {
            return Err(TftError::Io(io::Error::last_os_error()));
        }
        Ok(())
    }
}

impl Drop for SerialLink {
    fn drop(&mut self) {
        debug!("Closing {}", self.device);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_supported_baud_rates() {
        assert!(baud_supported(9600));
        assert!(baud_supported(115200));
        assert!(!baud_supported(9601));
        assert!(!baud_supported(0));
    }

    #[test]
    fn test_open_rejects_unknown_baud_before_touching_device() {
        let err = SerialLink::open("/nonexistent/tty", 1234).err();
        assert!(matches!(err, Some(TftError::UnsupportedBaudRate(1234))));
    }

    #[test]
    fn test_open_missing_device() {
        let err = SerialLink::open("/nonexistent/tty", 9600).err();
        assert!(matches!(err, Some(TftError::OpenFailed { .. })));
    }
}
