/*
 *  protocol/command.rs
 *
 *  serialtft - Hobbytronics serial TFT driver
 *  (c) 2020-26 Stuart Hunter
 *
 *  Command frames: sentinel, opcode, parameters, optional color, sentinel
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

use crate::constants::{CMD_BEGIN, CMD_CLEAR, CMD_END};
use crate::display::color::{Color, Rgb565};
use crate::pacer::Pace;
use crate::protocol::codec::{FontSize, Param, Rotation};
use crate::protocol::opcode::Opcode;
use crate::protocol::text;

/// One logical controller command, ready to be framed.
///
/// `opcode` is `None` only for the clear-screen frame, which carries a bare
/// `0` in the opcode position.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Command {
    opcode: Option<Opcode>,
    params: Vec<u8>,
    color: Option<u8>,
    pace: Pace,
}

impl Command {
    fn new(opcode: Opcode, params: Vec<u8>) -> Self {
        Self { opcode: Some(opcode), params, color: None, pace: Pace::None }
    }

    fn with_color(mut self, color: Option<Color>) -> Self {
        self.color = color.map(Param::to_param);
        self
    }

    fn paced(mut self, pace: Pace) -> Self {
        self.pace = pace;
        self
    }

    pub fn clear() -> Self {
        Self { opcode: None, params: Vec::new(), color: None, pace: Pace::Clear }
    }

    pub fn fg_color(color: Color) -> Self {
        Self::new(Opcode::FgColor, vec![color.to_param()])
    }

    pub fn bg_color(color: Color) -> Self {
        Self::new(Opcode::BgColor, vec![color.to_param()])
    }

    pub fn screen_rotation(rotation: Rotation) -> Self {
        Self::new(Opcode::ScreenRotation, vec![rotation.to_param()])
    }

    pub fn font_size(size: FontSize) -> Self {
        Self::new(Opcode::FontSize, vec![size.to_param()])
    }

    /// Return the text cursor to the start of the current line
    pub fn line_start() -> Self {
        Self::new(Opcode::LineStart, Vec::new())
    }

    /// Move the text cursor to a character cell (depends on font size)
    pub fn goto_char(col: i32, row: i32) -> Self {
        Self::new(Opcode::PosText, vec![col.to_param(), row.to_param()])
    }

    pub fn goto_pixel(x: i32, y: i32) -> Self {
        Self::new(Opcode::PosPixel, vec![x.to_param(), y.to_param()])
    }

    pub fn pixel(x: i32, y: i32, color: Option<Color>) -> Self {
        Self::new(Opcode::DrawPixel, vec![x.to_param(), y.to_param()])
            .with_color(color)
            .paced(Pace::Pixel)
    }

    pub fn line(x1: i32, y1: i32, x2: i32, y2: i32, color: Option<Color>) -> Self {
        Self::new(Opcode::DrawLine, corners(x1, y1, x2, y2))
            .with_color(color)
            .paced(Pace::Line)
    }

    pub fn outline_box(x1: i32, y1: i32, x2: i32, y2: i32, color: Option<Color>) -> Self {
        Self::new(Opcode::DrawBox, corners(x1, y1, x2, y2))
            .with_color(color)
            .paced(Pace::Box)
    }

    pub fn filled_box(x1: i32, y1: i32, x2: i32, y2: i32, color: Option<Color>) -> Self {
        Self::new(Opcode::DrawFilledBox, corners(x1, y1, x2, y2))
            .with_color(color)
            .paced(Pace::FilledBox)
    }

    // paced on the wrapped radius, which is what the controller draws
    pub fn circle(x: i32, y: i32, radius: i32, color: Option<Color>) -> Self {
        let r = radius.to_param();
        Self::new(Opcode::DrawCircle, vec![x.to_param(), y.to_param(), r])
            .with_color(color)
            .paced(Pace::Circle(i32::from(r)))
    }

    pub fn filled_circle(x: i32, y: i32, radius: i32, color: Option<Color>) -> Self {
        let r = radius.to_param();
        Self::new(Opcode::DrawFilledCircle, vec![x.to_param(), y.to_param(), r])
            .with_color(color)
            .paced(Pace::FilledCircle(i32::from(r)))
    }

    /// Show a bitmap already stored on the controller's SD card.
    /// The filename is passed through as normalized text, unchecked.
    pub fn bitmap(file: &str, x: i32, y: i32) -> Self {
        let mut params = vec![x.to_param(), y.to_param()];
        params.extend(text::normalize(file));
        Self::new(Opcode::DisplayBitmap, params)
    }

    pub fn brightness(level: u8) -> Self {
        Self::new(Opcode::Brightness, vec![level.to_param()])
    }

    /// Redefine a palette slot; the packed color goes out low byte first.
    /// The controller firmware expects this order.
    pub fn set_color(slot: Color, value: Rgb565) -> Self {
        let (low, high) = value.bytes();
        Self::new(Opcode::SetColor, vec![slot.to_param(), low, high])
    }

    pub fn opcode(&self) -> Option<Opcode> {
        self.opcode
    }

    pub fn params(&self) -> &[u8] {
        &self.params
    }

    pub fn color(&self) -> Option<u8> {
        self.color
    }

    pub fn pace(&self) -> Pace {
        self.pace
    }

    /// Framed length in bytes; depends on whether a color was supplied
    pub fn frame_len(&self) -> usize {
        2 + 1 + self.params.len() + usize::from(self.color.is_some())
    }

    /// Whether any payload byte collides with a frame sentinel.
    /// The controller has no escaping, so such frames may be misparsed.
    pub fn has_sentinel_payload(&self) -> bool {
        self.params
            .iter()
            .chain(self.color.iter())
            .any(|&b| b == CMD_BEGIN || b == CMD_END)
    }

    pub fn encode(&self) -> Vec<u8> {
        let mut frame = Vec::with_capacity(self.frame_len());
        self.encode_into(&mut frame);
        frame
    }

    pub fn encode_into(&self, out: &mut Vec<u8>) {
        out.push(CMD_BEGIN);
        out.push(self.opcode.map_or(CMD_CLEAR, Opcode::byte));
        out.extend_from_slice(&self.params);
        if let Some(color) = self.color {
            out.push(color);
        }
        out.push(CMD_END);
    }
}

fn corners(x1: i32, y1: i32, x2: i32, y2: i32) -> Vec<u8> {
    vec![x1.to_param(), y1.to_param(), x2.to_param(), y2.to_param()]
}
