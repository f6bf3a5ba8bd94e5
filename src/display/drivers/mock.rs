/*
 *  display/drivers/mock.rs
 *
 *  serialtft - Hobbytronics serial TFT driver
 *  (c) 2020-26 Stuart Hunter
 *
 *  Recording link for tests and dry runs without hardware
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

use std::io;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use crate::display::error::TftError;
use crate::display::traits::Link;

/// One observable action on the link, in order
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LinkEvent {
    Write(Vec<u8>),
    Flush,
    Pause(Duration),
}

/// Mock link for testing
///
/// This link simulates a serial device without requiring hardware. It's useful for:
/// - Unit tests
/// - Integration tests
/// - `--dry-run` from the command line
///
/// Every write, flush and pause is recorded instead of performed; pauses
/// never sleep.
#[derive(Debug, Clone, Default)]
pub struct MockLink {
    /// Shared state for testing
    state: Arc<Mutex<MockLinkState>>,
}

/// Internal state for the mock link (shared for inspection in tests)
#[derive(Debug, Default)]
pub struct MockLinkState {
    /// Everything that happened, in order
    pub events: Vec<LinkEvent>,

    /// Total bytes written
    pub bytes_written: usize,

    /// Number of times flush() was called
    pub flush_count: usize,

    /// Sum of all requested pauses
    pub paused: Duration,

    /// Simulate failures (for error testing)
    pub simulate_write_failure: bool,
    pub simulate_flush_failure: bool,
}

impl MockLink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Get reference to state for inspection in tests
    pub fn state(&self) -> Arc<Mutex<MockLinkState>> {
        Arc::clone(&self.state)
    }

    fn lock(&self) -> MutexGuard<'_, MockLinkState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Reset state (useful between tests)
    pub fn reset_state(&self) {
        *self.lock() = MockLinkState::default();
    }

    pub fn events(&self) -> Vec<LinkEvent> {
        self.lock().events.clone()
    }

    /// Each write call as sent
    pub fn writes(&self) -> Vec<Vec<u8>> {
        self.lock()
            .events
            .iter()
            .filter_map(|e| match e {
                LinkEvent::Write(bytes) => Some(bytes.clone()),
                _ => None,
            })
            .collect()
    }

    /// The byte stream as the controller would see it
    pub fn written(&self) -> Vec<u8> {
        self.writes().concat()
    }

    pub fn pauses(&self) -> Vec<Duration> {
        self.lock()
            .events
            .iter()
            .filter_map(|e| match e {
                LinkEvent::Pause(d) => Some(*d),
                _ => None,
            })
            .collect()
    }

    pub fn flush_count(&self) -> usize {
        self.lock().flush_count
    }

    pub fn total_paused(&self) -> Duration {
        self.lock().paused
    }

    /// Render the recorded session one event per line
    pub fn transcript(&self) -> Vec<String> {
        self.lock()
            .events
            .iter()
            .map(|e| match e {
                LinkEvent::Write(bytes) => {
                    let hex: Vec<String> = bytes.iter().map(|b| format!("{:02x}", b)).collect();
                    format!("write {:>3}  {}", bytes.len(), hex.join(" "))
                }
                LinkEvent::Flush => "flush".to_string(),
                LinkEvent::Pause(d) => format!("pause {:>9.3}ms", d.as_secs_f64() * 1000.0),
            })
            .collect()
    }
}

impl Link for MockLink {
    fn name(&self) -> &str {
        "mock"
    }

    fn write(&mut self, bytes: &[u8]) -> Result<(), TftError> {
        let mut state = self.lock();
        if state.simulate_write_failure {
            return Err(TftError::Io(io::Error::new(io::ErrorKind::BrokenPipe, "simulated write failure")));
        }
        state.bytes_written += bytes.len();
        state.events.push(LinkEvent::Write(bytes.to_vec()));
        Ok(())
    }

    fn flush(&mut self) -> Result<(), TftError> {
        let mut state = self.lock();
        if state.simulate_flush_failure {
            return Err(TftError::Io(io::Error::new(io::ErrorKind::BrokenPipe, "simulated flush failure")));
        }
        state.flush_count += 1;
        state.events.push(LinkEvent::Flush);
        Ok(())
    }

    fn pause(&mut self, delay: Duration) {
        let mut state = self.lock();
        state.paused += delay;
        state.events.push(LinkEvent::Pause(delay));
    }
}
