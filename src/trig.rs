/*
 *  trig.rs
 *
 *  serialtft - Hobbytronics serial TFT driver
 *	(c) 2020-26 Stuart Hunter
 *
 *	Polar to screen projection for clock hands and pie dividers
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
//! Angles are expressed as a fraction of 60 (minutes on a clock face):
//! 0 points straight up, 15 to the right. Screen y grows downwards, hence
//! the negated cosine.

use core::f64::consts::TAU;

use crate::constants::HAND_STUB_RADIUS;

/// Convert a 0..60 dial value to radians, clockwise from 12 o'clock
#[inline]
pub fn dial_to_radians(value: f64) -> f64 {
    (value / 60.0) * TAU
}

/// Project `radius` along `angle` from the origin, rounded to whole pixels
pub fn polar_point(origin_x: i32, origin_y: i32, radius: f64, angle: f64) -> (i32, i32) {
    let x = origin_x as f64 + radius * angle.sin();
    let y = origin_y as f64 - radius * angle.cos();
    (x.round() as i32, y.round() as i32)
}

/// Segment for an analog hand: from the stub near the origin to the tip
pub fn hand_segment(origin_x: i32, origin_y: i32, radius: f64, value: f64) -> ((i32, i32), (i32, i32)) {
    let angle = dial_to_radians(value);
    let stub = polar_point(origin_x, origin_y, HAND_STUB_RADIUS, angle);
    let tip = polar_point(origin_x, origin_y, radius, angle);
    (stub, tip)
}
