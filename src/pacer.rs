/*
 *  pacer.rs
 *
 *  serialtft - Hobbytronics serial TFT driver
 *	(c) 2020-26 Stuart Hunter
 *
 *	Post-command delays that stand in for the flow control the
 *	controller does not have
 *
 *	This program is free software: you can redistribute it and/or modify
 *	it under the terms of the GNU General Public License as published by
 *	the Free Software Foundation, either version 3 of the License, or
 *	(at your option) any later version.
 *
 *	This program is distributed in the hope that it will be useful,
 *	but WITHOUT ANY WARRANTY; without even the implied warranty of
 *	MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
 *	GNU General Public License for more details.
 *
 *	See <http://www.gnu.org/licenses/> to get a copy of the GNU General
 *	Public License.
 *
 */
use std::time::Duration;

use serde::{Deserialize, Serialize};

// All timings below were measured by brute force against the stock ATMega
// controller at 9600 baud. They are part of the protocol, not tuning: a
// different firmware or baud rate needs them measured again on hardware.

/// Settle time after a clear; anything sooner is dropped
pub const CLEAR_SETTLE: Duration = Duration::from_millis(200);
pub const PIXEL_DELAY: Duration = Duration::from_micros(4_500);
// ~116 lines per second
pub const LINE_DELAY: Duration = Duration::from_millis(7);
pub const BOX_DELAY: Duration = Duration::from_millis(7);
pub const FILLED_BOX_DELAY: Duration = Duration::from_millis(60);
pub const CIRCLE_BASE_DELAY: Duration = Duration::from_micros(100);
pub const CIRCLE_LOG_DIVISOR: f64 = 220.0;
pub const FILLED_CIRCLE_LOG_DIVISOR: f64 = 120.0;
pub const TEXT_PACKET_DELAY: Duration = Duration::from_millis(50);

/// What kind of work a frame asks of the controller
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pace {
    /// Cheap configuration commands, never delayed
    None,
    Clear,
    Pixel,
    Line,
    Box,
    FilledBox,
    Circle(i32),
    FilledCircle(i32),
    TextPacket,
}

/// Delay table for one firmware / baud rate pairing
#[derive(Debug, Clone, PartialEq)]
pub struct PacingProfile {
    pub clear_settle: Duration,
    pub pixel: Duration,
    pub line: Duration,
    pub outline_box: Duration,
    pub filled_box: Duration,
    pub circle_base: Duration,
    pub circle_log_divisor: f64,
    pub filled_circle_log_divisor: f64,
    pub text_packet: Duration,
}

impl Default for PacingProfile {
    fn default() -> Self {
        Self {
            clear_settle: CLEAR_SETTLE,
            pixel: PIXEL_DELAY,
            line: LINE_DELAY,
            outline_box: BOX_DELAY,
            filled_box: FILLED_BOX_DELAY,
            circle_base: CIRCLE_BASE_DELAY,
            circle_log_divisor: CIRCLE_LOG_DIVISOR,
            filled_circle_log_divisor: FILLED_CIRCLE_LOG_DIVISOR,
            text_packet: TEXT_PACKET_DELAY,
        }
    }
}

impl PacingProfile {
    /// Delay owed after a frame of kind `pace`.
    ///
    /// With `immediate_flush` the serial driver already blocks until the
    /// bytes are out, so only clears and text packets still wait.
    pub fn delay_after(&self, pace: Pace, immediate_flush: bool) -> Option<Duration> {
        match pace {
            Pace::None => None,
            Pace::Clear => Some(self.clear_settle),
            Pace::TextPacket => Some(self.text_packet),
            _ if immediate_flush => None,
            Pace::Pixel => Some(self.pixel),
            Pace::Line => Some(self.line),
            Pace::Box => Some(self.outline_box),
            Pace::FilledBox => Some(self.filled_box),
            Pace::Circle(r) => Some(self.circle_delay(r, self.circle_log_divisor)),
            Pace::FilledCircle(r) => Some(self.circle_delay(r, self.filled_circle_log_divisor)),
        }
    }

    // base + ln(r)/k seconds; radii below 1 only pay the base
    fn circle_delay(&self, radius: i32, divisor: f64) -> Duration {
        let log = (radius.max(1) as f64).ln();
        self.circle_base + Duration::try_from_secs_f64(log / divisor).unwrap_or_default()
    }

    /// Apply the optional overrides from configuration
    pub fn with_overrides(mut self, cfg: &PacingConfig) -> Self {
        if let Some(ms) = cfg.clear_settle_ms { self.clear_settle = millis(ms); }
        if let Some(ms) = cfg.pixel_ms { self.pixel = millis(ms); }
        if let Some(ms) = cfg.line_ms { self.line = millis(ms); }
        if let Some(ms) = cfg.box_ms { self.outline_box = millis(ms); }
        if let Some(ms) = cfg.filled_box_ms { self.filled_box = millis(ms); }
        if let Some(ms) = cfg.circle_base_ms { self.circle_base = millis(ms); }
        if let Some(k) = cfg.circle_log_divisor { self.circle_log_divisor = k; }
        if let Some(k) = cfg.filled_circle_log_divisor { self.filled_circle_log_divisor = k; }
        if let Some(ms) = cfg.text_packet_ms { self.text_packet = millis(ms); }
        self
    }
}

fn millis(ms: f64) -> Duration {
    Duration::try_from_secs_f64(ms / 1000.0).unwrap_or_default()
}

/// Pacing overrides as they appear in the YAML config, in milliseconds
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct PacingConfig {
    pub clear_settle_ms: Option<f64>,
    pub pixel_ms: Option<f64>,
    pub line_ms: Option<f64>,
    pub box_ms: Option<f64>,
    pub filled_box_ms: Option<f64>,
    pub circle_base_ms: Option<f64>,
    pub circle_log_divisor: Option<f64>,
    pub filled_circle_log_divisor: Option<f64>,
    pub text_packet_ms: Option<f64>,
}

impl PacingConfig {
    pub fn delays_ms(&self) -> [(&'static str, Option<f64>); 7] {
        [
            ("clear_settle_ms", self.clear_settle_ms),
            ("pixel_ms", self.pixel_ms),
            ("line_ms", self.line_ms),
            ("box_ms", self.box_ms),
            ("filled_box_ms", self.filled_box_ms),
            ("circle_base_ms", self.circle_base_ms),
            ("text_packet_ms", self.text_packet_ms),
        ]
    }

    pub fn divisors(&self) -> [(&'static str, Option<f64>); 2] {
        [
            ("circle_log_divisor", self.circle_log_divisor),
            ("filled_circle_log_divisor", self.filled_circle_log_divisor),
        ]
    }
}
