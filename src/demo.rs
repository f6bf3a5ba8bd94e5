/*
 *  demo.rs
 *
 *  serialtft - Hobbytronics serial TFT driver
 *  (c) 2020-26 Stuart Hunter
 *
 *  Clock, rain and bar chart demos used to tune the pacing delays
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

use chrono::{Local, NaiveTime, Timelike};
use log::{debug, info};
use rand::Rng;

use crate::constants::{SCREEN_HEIGHT, SCREEN_HEIGHT_HALF, SCREEN_WIDTH, SCREEN_WIDTH_HALF};
use crate::display::{Color, Link, SerialTft, TftError, Theme};
use crate::protocol::Rotation;
use crate::trig;

const FACE_RADIUS: i32 = 58;
const TICK_INNER_RADIUS: f64 = 52.0;
const HOUR_HAND: i32 = 28;
const MINUTE_HAND: i32 = 42;
const SECOND_HAND: i32 = 50;
const CLOCK_TICK: Duration = Duration::from_secs(1);

const RAIN_COLORS: [Color; 7] = [
    Color::USER_BLUE,
    Color::USER_RED,
    Color::USER_GREEN,
    Color::USER_CYAN,
    Color::USER_MAGENTA,
    Color::USER_YELLOW,
    Color::USER_WHITE,
];
pub const RAIN_DROPS: usize = 32;
const RAIN_FLOOR: i32 = 120;
const HUE_PER_COLOR: f64 = 17.0;
const RAIN_FRAME: Duration = Duration::from_millis(100);

const BAR_WIDTH: i32 = 4;
const BAR_MARGIN: i32 = 1;
const BAR_MAX_HEIGHT: i32 = 119;

/// Landscape, black background, blank screen, then the demo's palette
pub fn prepare<L: Link>(tft: &mut SerialTft<L>, theme: Theme) -> Result<(), TftError> {
    tft.screen_rotation(Rotation::Landscape)?;
    tft.bg_color(Color::Black)?;
    tft.clear_screen()?;
    tft.set_theme(theme)
}

// ---------- clock ----------

/// Dial positions (0..60) for the hour, minute and second hands
pub fn hand_values(time: NaiveTime) -> (f64, f64, f64) {
    let seconds = time.second() as f64;
    let minutes = time.minute() as f64 + seconds / 60.0;
    let hours = (time.hour() % 12) as f64 * 5.0 + minutes / 12.0;
    (hours, minutes, seconds)
}

/// Analog clock that erases its previous hands before drawing new ones
#[derive(Debug, Default)]
pub struct ClockFace {
    shown: Option<NaiveTime>,
}

impl ClockFace {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn draw_dial<L: Link>(&self, tft: &mut SerialTft<L>) -> Result<(), TftError> {
        let (cx, cy) = (SCREEN_WIDTH_HALF, SCREEN_HEIGHT_HALF);
        tft.draw_circle(cx, cy, FACE_RADIUS, Some(Color::USER_WHITE))?;
        for hour in 0..12 {
            let angle = trig::dial_to_radians(hour as f64 * 5.0);
            let (x1, y1) = trig::polar_point(cx, cy, TICK_INNER_RADIUS, angle);
            let (x2, y2) = trig::polar_point(cx, cy, FACE_RADIUS as f64, angle);
            tft.draw_line(x1, y1, x2, y2, Some(Color::USER_CYAN))?;
        }
        Ok(())
    }

    /// Redraw for `now`; a repeat of the time already shown sends nothing
    pub fn tick<L: Link>(&mut self, tft: &mut SerialTft<L>, now: NaiveTime) -> Result<(), TftError> {
        let now = now.with_nanosecond(0).unwrap_or(now);
        if self.shown == Some(now) {
            return Ok(());
        }
        if let Some(previous) = self.shown {
            self.draw_hands(tft, previous, None)?;
        }
        self.draw_hands(tft, now, Some([Color::USER_WHITE, Color::USER_GREEN, Color::USER_RED]))?;

        tft.goto_char(0, 0)?;
        tft.fg_color(Color::USER_YELLOW)?;
        tft.write(&now.format("%H:%M:%S").to_string())?;

        self.shown = Some(now);
        Ok(())
    }

    // `None` paints the hands out in black
    fn draw_hands<L: Link>(&self, tft: &mut SerialTft<L>, time: NaiveTime, colors: Option<[Color; 3]>) -> Result<(), TftError> {
        let (cx, cy) = (SCREEN_WIDTH_HALF, SCREEN_HEIGHT_HALF);
        let [hour_color, minute_color, second_color] = colors.unwrap_or([Color::Black; 3]);
        let (hours, minutes, seconds) = hand_values(time);
        tft.analog_hand(cx, cy, HOUR_HAND, hours, Some(hour_color))?;
        tft.analog_hand(cx, cy, MINUTE_HAND, minutes, Some(minute_color))?;
        tft.analog_hand(cx, cy, SECOND_HAND, seconds, Some(second_color))
    }
}

/// Run the clock for `seconds` ticks of local time
pub fn run_clock<L: Link>(tft: &mut SerialTft<L>, seconds: u32) -> Result<(), TftError> {
    info!("clock for {}s", seconds);
    prepare(tft, Theme::Default)?;
    let mut face = ClockFace::new();
    face.draw_dial(tft)?;
    for _ in 0..seconds {
        face.tick(tft, Local::now().time())?;
        tft.idle(CLOCK_TICK);
    }
    Ok(())
}

// ---------- rain ----------

#[derive(Debug, Clone, PartialEq)]
pub struct Raindrop {
    pub x: i32,
    pub y: i32,
    /// drifts upwards as the drop falls; selects the colour
    pub hue: i32,
    /// drawn in black, punching holes in the trails
    pub dark: bool,
    pub radius: i32,
}

impl Raindrop {
    fn spawn<R: Rng + ?Sized>(rng: &mut R, y: i32) -> Self {
        Self {
            x: rng.random_range(0..=150),
            y,
            hue: rng.random_range(0..=60),
            dark: rng.random_bool(0.5),
            radius: rng.random_range(3..=6),
        }
    }

    pub fn color(&self) -> Color {
        if self.dark {
            return Color::Black;
        }
        let idx = (self.hue as f64 / HUE_PER_COLOR).round() as usize;
        RAIN_COLORS[idx.min(RAIN_COLORS.len() - 1)]
    }

    fn fall<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        self.y += rng.random_range(3..=6);
        self.hue += rng.random_range(3..=6);
        if self.y > RAIN_FLOOR {
            *self = Self::spawn(rng, 0);
        }
    }
}

pub struct Rain {
    drops: Vec<Raindrop>,
}

impl Rain {
    pub fn new<R: Rng + ?Sized>(rng: &mut R, count: usize) -> Self {
        let drops = (0..count)
            .map(|_| {
                let y = rng.random_range(0..=110);
                Raindrop::spawn(rng, y)
            })
            .collect();
        Self { drops }
    }

    pub fn drops(&self) -> &[Raindrop] {
        &self.drops
    }

    pub fn step<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        for drop in &mut self.drops {
            drop.fall(rng);
        }
    }

    pub fn draw<L: Link>(&self, tft: &mut SerialTft<L>) -> Result<(), TftError> {
        for drop in &self.drops {
            tft.draw_circle(drop.x, drop.y, drop.radius, Some(drop.color()))?;
        }
        Ok(())
    }
}

pub fn run_rain<L: Link, R: Rng + ?Sized>(tft: &mut SerialTft<L>, frames: u32, rng: &mut R) -> Result<(), TftError> {
    info!("rain for {} frames", frames);
    prepare(tft, Theme::Matrix)?;
    let mut rain = Rain::new(rng, RAIN_DROPS);
    for frame in 0..frames {
        rain.step(rng);
        rain.draw(tft)?;
        debug!("rain frame {}", frame);
        tft.idle(RAIN_FRAME);
    }
    Ok(())
}

// ---------- bars ----------

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bar {
    pub left: i32,
    pub height: i32,
    pub color: Color,
}

/// Bars packed left to right across the screen, colours cycling
pub fn bar_layout<R: Rng + ?Sized>(rng: &mut R) -> Vec<Bar> {
    let mut bars = Vec::new();
    let mut left = BAR_MARGIN;
    let mut colors = RAIN_COLORS.iter().copied().cycle();
    while left + BAR_MARGIN < SCREEN_WIDTH {
        let color = colors.next().unwrap_or(Color::USER_WHITE);
        bars.push(Bar { left, height: rng.random_range(1..=BAR_MAX_HEIGHT), color });
        left += BAR_MARGIN + BAR_WIDTH;
    }
    bars
}

pub fn run_bars<L: Link, R: Rng + ?Sized>(tft: &mut SerialTft<L>, rng: &mut R) -> Result<(), TftError> {
    prepare(tft, Theme::Default)?;
    let bars = bar_layout(rng);
    info!("{} bars", bars.len());
    for bar in bars {
        tft.fg_color(bar.color)?;
        tft.draw_filled_rect(bar.left, 1, BAR_WIDTH, bar.height.min(SCREEN_HEIGHT - 2), None)?;
    }
    Ok(())
}
