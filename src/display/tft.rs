/*
 *  display/tft.rs
 *
 *  serialtft - Hobbytronics serial TFT driver
 *  (c) 2020-26 Stuart Hunter
 *
 *  The connection: one method per controller action, paced writes and
 *  guaranteed teardown
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

use log::{debug, info, trace, warn};

use crate::constants::RETURN;
use crate::display::color::{hex_to_rgb, Color, Rgb565};
use crate::display::error::TftError;
use crate::display::theme::Theme;
use crate::display::traits::Link;
use crate::pacer::{Pace, PacingProfile};
use crate::protocol::codec::{FontSize, Rotation};
use crate::protocol::command::Command;
use crate::protocol::text::{self, TextPayload};
use crate::trig;

/// Connection behaviour chosen at construction
#[derive(Debug, Clone, PartialEq)]
pub struct TftOptions {
    /// Blank the screen when the connection is torn down
    pub clear_on_exit: bool,
    /// Drain the link after every write. When off, drawing commands are
    /// followed by their pacing delay instead.
    pub flush: bool,
    pub pacing: PacingProfile,
}

impl Default for TftOptions {
    fn default() -> Self {
        Self { clear_on_exit: true, flush: true, pacing: PacingProfile::default() }
    }
}

/// A write-only session with one serial TFT controller.
///
/// Every call is blocking and strictly sequential. Nothing is read back, so
/// a command the controller drops cannot be detected here; the pacing
/// delays are the only protection against overrunning it.
///
/// Dropping the connection runs the teardown sequence (flush, clear, flush)
/// unless [`SerialTft::close`] already did.
pub struct SerialTft<L: Link> {
    link: L,
    options: TftOptions,
    closed: bool,
}

#[cfg(unix)]
impl SerialTft<crate::display::drivers::serial::SerialLink> {
    /// Open a serial device and wrap it
    ///
    /// # Arguments
    ///
    /// * `device` - Path to the tty (e.g., "/dev/ttyAMA0")
    /// * `baud_rate` - Line speed (9600 on a stock controller)
    /// * `clear_on_exit` - Blank the screen on teardown
    /// * `flush` - Drain after every write instead of pacing drawing commands
    pub fn open(device: &str, baud_rate: u32, clear_on_exit: bool, flush: bool) -> Result<Self, TftError> {
        let link = crate::display::drivers::serial::SerialLink::open(device, baud_rate)?;
        let options = TftOptions { clear_on_exit, flush, ..TftOptions::default() };
        Ok(Self::with_link(link, options))
    }
}

impl<L: Link> SerialTft<L> {
    pub fn with_link(link: L, options: TftOptions) -> Self {
        info!(
            "TFT on {} (flush: {}, clear on exit: {})",
            link.name(),
            options.flush,
            options.clear_on_exit
        );
        Self { link, options, closed: false }
    }

    pub fn options(&self) -> &TftOptions {
        &self.options
    }

    pub fn link(&self) -> &L {
        &self.link
    }

    /// Wait between frames; goes through the link so recording links
    /// don't actually sleep
    pub fn idle(&mut self, delay: Duration) {
        self.link.pause(delay);
    }

    /// Raw write path, no framing. Flushes when immediate flush is on.
    fn write_raw(&mut self, bytes: &[u8]) -> Result<(), TftError> {
        if bytes.is_empty() {
            return Ok(());
        }
        trace!("-> {:02x?}", bytes);
        self.link.write(bytes)?;
        if self.options.flush {
            self.link.flush()?;
        }
        Ok(())
    }

    fn pace(&mut self, pace: Pace) {
        if let Some(delay) = self.options.pacing.delay_after(pace, self.options.flush) {
            self.link.pause(delay);
        }
    }

    /// Frame and send one command, then wait out its pacing delay
    pub fn send(&mut self, cmd: &Command) -> Result<(), TftError> {
        match cmd.opcode() {
            Some(op) => debug!("{} {:?}", op, cmd.params()),
            None => debug!("clear"),
        }
        if cmd.has_sentinel_payload() {
            debug!("frame payload contains a sentinel byte: {:?}", cmd.params());
        }
        self.write_raw(&cmd.encode())?;
        self.pace(cmd.pace());
        Ok(())
    }

    /// Drain whatever is queued on the link
    pub fn flush(&mut self) -> Result<(), TftError> {
        self.link.flush()
    }

    /// Clear to the background color. Always followed by the settle delay:
    /// drawing too soon after a clear gets dropped.
    pub fn clear_screen(&mut self) -> Result<(), TftError> {
        self.send(&Command::clear())
    }

    /// Change user colours to a specific theme
    pub fn set_theme(&mut self, theme: Theme) -> Result<(), TftError> {
        debug!("theme {}", theme.name());
        self.write_raw(theme.blob())
    }

    /// Write a pre-built blob verbatim, bypassing framing
    pub fn write_blob(&mut self, blob: &[u8]) -> Result<(), TftError> {
        self.write_raw(blob)
    }

    /// Write a text string at the cursor
    ///
    /// Text is normalized to ASCII first; anything unencodable is dropped.
    /// Payloads longer than one packet are sliced, and every slice is
    /// flushed and paced regardless of the flush setting.
    pub fn write(&mut self, text: &str) -> Result<(), TftError> {
        let bytes = text::normalize(text);
        self.write_bytes(&bytes)
    }

    /// Write a text string followed by a carriage return
    pub fn write_line(&mut self, text: &str) -> Result<(), TftError> {
        let mut bytes = text::normalize(text);
        bytes.push(RETURN);
        self.write_bytes(&bytes)
    }

    fn write_bytes(&mut self, bytes: &[u8]) -> Result<(), TftError> {
        match TextPayload::split(bytes) {
            TextPayload::Empty => Ok(()),
            TextPayload::Single(packet) => self.write_raw(packet),
            TextPayload::Packets(packets) => {
                debug!("text in {} packets", packets.len());
                for packet in packets {
                    self.write_raw(packet)?;
                    self.link.flush()?;
                    self.pace(Pace::TextPacket);
                }
                Ok(())
            }
        }
    }

    pub fn font_size(&mut self, size: FontSize) -> Result<(), TftError> {
        self.send(&Command::font_size(size))
    }

    pub fn screen_rotation(&mut self, rotation: Rotation) -> Result<(), TftError> {
        self.send(&Command::screen_rotation(rotation))
    }

    /// Set the active foreground colour
    pub fn fg_color(&mut self, color: Color) -> Result<(), TftError> {
        self.send(&Command::fg_color(color))
    }

    pub fn bg_color(&mut self, color: Color) -> Result<(), TftError> {
        self.send(&Command::bg_color(color))
    }

    pub fn brightness(&mut self, level: u8) -> Result<(), TftError> {
        self.send(&Command::brightness(level))
    }

    /// Carriage back to the start of the current text line
    pub fn line_start(&mut self) -> Result<(), TftError> {
        self.send(&Command::line_start())
    }

    /// Text cursor to the top left cell
    pub fn text_home(&mut self) -> Result<(), TftError> {
        self.goto_char(0, 0)
    }

    /// Draw a bitmap from the SD card
    pub fn draw_bitmap(&mut self, file: &str, x: i32, y: i32) -> Result<(), TftError> {
        self.send(&Command::bitmap(file, x, y))
    }

    pub fn goto_pixel(&mut self, x: i32, y: i32) -> Result<(), TftError> {
        self.send(&Command::goto_pixel(x, y))
    }

    /// Go to character position, depends on font size
    pub fn goto_char(&mut self, col: i32, row: i32) -> Result<(), TftError> {
        self.send(&Command::goto_char(col, row))
    }

    pub fn draw_pixel(&mut self, x: i32, y: i32, color: Option<Color>) -> Result<(), TftError> {
        self.send(&Command::pixel(x, y, color))
    }

    pub fn draw_line(&mut self, x1: i32, y1: i32, x2: i32, y2: i32, color: Option<Color>) -> Result<(), TftError> {
        self.send(&Command::line(x1, y1, x2, y2, color))
    }

    /// Rectangle outline as four lines: top, right, bottom, left
    pub fn draw_box_fast(&mut self, x1: i32, y1: i32, x2: i32, y2: i32, color: Option<Color>) -> Result<(), TftError> {
        self.draw_line(x1, y1, x2, y1, color)?;
        self.draw_line(x2, y1, x2, y2, color)?;
        self.draw_line(x2, y2, x1, y2, color)?;
        self.draw_line(x1, y2, x1, y1, color)
    }

    pub fn draw_box(&mut self, x1: i32, y1: i32, x2: i32, y2: i32, color: Option<Color>) -> Result<(), TftError> {
        self.send(&Command::outline_box(x1, y1, x2, y2, color))
    }

    /// Outline at `x,y` of size `width,height`
    pub fn draw_rect(&mut self, x: i32, y: i32, width: i32, height: i32, color: Option<Color>) -> Result<(), TftError> {
        self.draw_box(x, y, x + width, y + height, color)
    }

    pub fn draw_filled_box(&mut self, x1: i32, y1: i32, x2: i32, y2: i32, color: Option<Color>) -> Result<(), TftError> {
        self.send(&Command::filled_box(x1, y1, x2, y2, color))
    }

    /// Draw a filled rectangle at x,y of size width,height
    pub fn draw_filled_rect(&mut self, x: i32, y: i32, width: i32, height: i32, color: Option<Color>) -> Result<(), TftError> {
        self.draw_filled_box(x, y, x + width, y + height, color)
    }

    pub fn draw_circle(&mut self, x: i32, y: i32, radius: i32, color: Option<Color>) -> Result<(), TftError> {
        self.send(&Command::circle(x, y, radius, color))
    }

    pub fn draw_filled_circle(&mut self, x: i32, y: i32, radius: i32, color: Option<Color>) -> Result<(), TftError> {
        self.send(&Command::filled_circle(x, y, radius, color))
    }

    /// Line from near the origin out to `radius` at dial position `value`
    /// (0..60, clockwise from 12). Useful for clock hands or pie charts.
    pub fn analog_hand(&mut self, origin_x: i32, origin_y: i32, radius: i32, value: f64, color: Option<Color>) -> Result<(), TftError> {
        let ((x1, y1), (x2, y2)) = trig::hand_segment(origin_x, origin_y, radius as f64, value);
        self.draw_line(x1, y1, x2, y2, color)
    }

    /// Redefine a user slot from a `#rrggbb` string
    pub fn set_color_hex(&mut self, slot: Color, hex: &str) -> Result<(), TftError> {
        let (r, g, b) = hex_to_rgb(hex)?;
        self.set_color_rgb(slot, r, g, b)
    }

    pub fn set_color_rgb(&mut self, slot: Color, r: u8, g: u8, b: u8) -> Result<(), TftError> {
        self.set_color_packed(slot, Rgb565::from_rgb(r, g, b))
    }

    pub fn set_color_packed(&mut self, slot: Color, value: Rgb565) -> Result<(), TftError> {
        if !slot.is_user_slot() {
            debug!("redefining stock color {:?}", slot);
        }
        self.send(&Command::set_color(slot, value))
    }

    fn teardown(&mut self) -> Result<(), TftError> {
        if self.closed {
            return Ok(());
        }
        if self.options.clear_on_exit {
            self.link.flush()?;
            self.clear_screen()?;
        }
        self.link.flush()?;
        self.closed = true;
        info!("TFT on {} closed", self.link.name());
        Ok(())
    }

    /// Tear down explicitly and surface any error; the link is released
    /// when `self` is dropped on return
    pub fn close(mut self) -> Result<(), TftError> {
        let result = self.teardown();
        // don't retry a failed teardown from Drop
        self.closed = true;
        result
    }
}

impl<L: Link> Drop for SerialTft<L> {
    fn drop(&mut self) {
        if let Err(e) = self.teardown() {
            warn!("TFT teardown on {} failed: {}", self.link.name(), e);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::display::drivers::mock::{LinkEvent, MockLink};
    use std::time::Duration;

    fn tft(flush: bool) -> (SerialTft<MockLink>, MockLink) {
        let link = MockLink::new();
        let options = TftOptions { clear_on_exit: false, flush, ..TftOptions::default() };
        (SerialTft::with_link(link.clone(), options), link)
    }

    #[test]
    fn test_clear_emits_frame_and_settles_with_flush() {
        let (mut tft, link) = tft(true);
        tft.clear_screen().unwrap();
        assert_eq!(
            link.events(),
            vec![
                LinkEvent::Write(vec![27, 0, 255]),
                LinkEvent::Flush,
                LinkEvent::Pause(Duration::from_millis(200)),
            ]
        );
    }

    #[test]
    fn test_clear_settles_without_flush() {
        let (mut tft, link) = tft(false);
        tft.clear_screen().unwrap();
        assert_eq!(
            link.events(),
            vec![LinkEvent::Write(vec![27, 0, 255]), LinkEvent::Pause(Duration::from_millis(200))]
        );
    }

    #[test]
    fn test_drawing_with_flush_is_not_paced() {
        let (mut tft, link) = tft(true);
        tft.draw_line(0, 0, 10, 10, None).unwrap();
        tft.draw_filled_circle(50, 50, 20, Some(Color::Red)).unwrap();
        assert!(link.pauses().is_empty());
        assert_eq!(link.flush_count(), 2);
    }

    #[test]
    fn test_drawing_without_flush_is_paced() {
        let (mut tft, link) = tft(false);
        tft.draw_pixel(1, 1, None).unwrap();
        tft.draw_line(0, 0, 10, 10, None).unwrap();
        tft.draw_box(0, 0, 10, 10, None).unwrap();
        tft.draw_filled_box(0, 0, 10, 10, None).unwrap();
        tft.draw_circle(50, 50, 20, None).unwrap();
        tft.fg_color(Color::White).unwrap();
        let pauses = link.pauses();
        assert_eq!(pauses.len(), 5);
        assert_eq!(pauses[0], Duration::from_micros(4500));
        assert_eq!(pauses[1], Duration::from_millis(7));
        assert_eq!(pauses[2], Duration::from_millis(7));
        assert_eq!(pauses[3], Duration::from_millis(60));
        let expected = 0.0001 + 20f64.ln() / 220.0;
        assert!((pauses[4].as_secs_f64() - expected).abs() < 1e-8);
        assert_eq!(link.flush_count(), 0);
    }

    #[test]
    fn test_short_text_single_write() {
        let (mut tft, link) = tft(false);
        tft.write("0123456789abcdef").unwrap();
        assert_eq!(link.events(), vec![LinkEvent::Write(b"0123456789abcdef".to_vec())]);
    }

    #[test]
    fn test_long_text_packets_flushed_and_paced() {
        let (mut tft, link) = tft(false);
        tft.write("0123456789abcdefX").unwrap();
        let packet_delay = Duration::from_millis(50);
        assert_eq!(
            link.events(),
            vec![
                LinkEvent::Write(b"0123456789abcdef".to_vec()),
                LinkEvent::Flush,
                LinkEvent::Pause(packet_delay),
                LinkEvent::Write(b"X".to_vec()),
                LinkEvent::Flush,
                LinkEvent::Pause(packet_delay),
            ]
        );
    }

    #[test]
    fn test_long_text_with_flush_enabled() {
        let (mut tft, link) = tft(true);
        tft.write(&"a".repeat(20)).unwrap();
        // write, flush (global), flush (per packet), pause
        assert_eq!(link.writes().len(), 2);
        assert_eq!(link.flush_count(), 4);
        assert_eq!(link.pauses().len(), 2);
    }

    #[test]
    fn test_write_line_appends_return() {
        let (mut tft, link) = tft(false);
        tft.write_line("hi").unwrap();
        assert_eq!(link.written(), vec![b'h', b'i', 13]);
    }

    #[test]
    fn test_empty_text_sends_nothing() {
        let (mut tft, link) = tft(true);
        tft.write("").unwrap();
        tft.write("☃").unwrap();
        assert!(link.events().is_empty());
    }

    #[test]
    fn test_circle_paced_on_wrapped_radius() {
        let (mut tft, link) = tft(false);
        tft.draw_filled_circle(80, 64, -200, None).unwrap();
        tft.draw_filled_circle(80, 64, 56, None).unwrap();
        let writes = link.writes();
        assert_eq!(writes[0], writes[1]);
        assert_eq!(writes[0], vec![27, 12, 80, 64, 56, 255]);
        let pauses = link.pauses();
        assert_eq!(pauses[0], pauses[1]);
        assert!(pauses[0] > Duration::from_millis(33));

        // 256 goes out as 0, so only the base delay is owed
        link.reset_state();
        tft.draw_circle(80, 64, 256, None).unwrap();
        assert_eq!(link.written(), vec![27, 11, 80, 64, 0, 255]);
        assert_eq!(link.pauses(), vec![Duration::from_micros(100)]);
    }

    #[test]
    fn test_rect_is_box_with_extent() {
        let (mut tft, link) = tft(true);
        tft.draw_rect(10, 20, 30, 40, None).unwrap();
        tft.draw_box(10, 20, 40, 60, None).unwrap();
        let writes = link.writes();
        assert_eq!(writes[0], writes[1]);
        assert_eq!(writes[0], vec![27, 9, 10, 20, 40, 60, 255]);

        let cases = [(0, 0, 0, 0), (0, 0, 255, 255), (1, 2, 254, 253), (100, 127, 155, 128), (255, 255, 0, 0), (128, 64, 127, 191)];
        for (x, y, w, h) in cases {
            link.reset_state();
            tft.draw_rect(x, y, w, h, None).unwrap();
            tft.draw_box(x, y, x + w, y + h, None).unwrap();
            tft.draw_filled_rect(x, y, w, h, Some(Color::Red)).unwrap();
            tft.draw_filled_box(x, y, x + w, y + h, Some(Color::Red)).unwrap();
            let writes = link.writes();
            assert_eq!(writes[0], writes[1], "rect {:?}", (x, y, w, h));
            assert_eq!(writes[2], writes[3], "filled rect {:?}", (x, y, w, h));
        }

        link.reset_state();
        tft.draw_filled_rect(1, 2, 3, 4, Some(Color::Blue)).unwrap();
        assert_eq!(link.written(), vec![27, 10, 1, 2, 4, 6, 1, 255]);
    }

    #[test]
    fn test_box_fast_is_four_lines() {
        let (mut tft, link) = tft(true);
        tft.draw_box_fast(0, 0, 10, 5, None).unwrap();
        assert_eq!(
            link.writes(),
            vec![
                vec![27, 8, 0, 0, 10, 0, 255],
                vec![27, 8, 10, 0, 10, 5, 255],
                vec![27, 8, 10, 5, 0, 5, 255],
                vec![27, 8, 0, 5, 0, 0, 255],
            ]
        );
    }

    #[test]
    fn test_analog_hand() {
        let (mut tft, link) = tft(true);
        tft.analog_hand(80, 64, 40, 0.0, None).unwrap();
        tft.analog_hand(80, 64, 40, 15.0, Some(Color::Red)).unwrap();
        assert_eq!(
            link.writes(),
            vec![vec![27, 8, 80, 58, 80, 24, 255], vec![27, 8, 86, 64, 120, 64, 2, 255]]
        );
    }

    #[test]
    fn test_theme_written_verbatim() {
        let (mut tft, link) = tft(true);
        tft.set_theme(Theme::Matrix).unwrap();
        assert_eq!(link.writes(), vec![Theme::Matrix.blob().to_vec()]);
    }

    #[test]
    fn test_palette_helpers_agree() {
        let (mut tft, link) = tft(true);
        tft.set_color_hex(Color::User1, "#ff8000").unwrap();
        tft.set_color_rgb(Color::User1, 0xFF, 0x80, 0x00).unwrap();
        tft.set_color_packed(Color::User1, Rgb565::from_rgb(0xFF, 0x80, 0x00)).unwrap();
        let writes = link.writes();
        assert_eq!(writes[0], writes[1]);
        assert_eq!(writes[1], writes[2]);
        assert!(tft.set_color_hex(Color::User1, "#zz").is_err());
        assert_eq!(link.writes().len(), 3);
    }

    #[test]
    fn test_teardown_clears_on_exit() {
        let link = MockLink::new();
        {
            let _tft = SerialTft::with_link(link.clone(), TftOptions::default());
        }
        assert_eq!(
            link.events(),
            vec![
                LinkEvent::Flush,
                LinkEvent::Write(vec![27, 0, 255]),
                LinkEvent::Flush,
                LinkEvent::Pause(Duration::from_millis(200)),
                LinkEvent::Flush,
            ]
        );
    }

    #[test]
    fn test_teardown_without_clear() {
        let (tft, link) = tft(false);
        tft.close().unwrap();
        assert_eq!(link.events(), vec![LinkEvent::Flush]);
    }

    #[test]
    fn test_teardown_runs_once() {
        let link = MockLink::new();
        let tft = SerialTft::with_link(link.clone(), TftOptions::default());
        tft.close().unwrap();
        let after_close = link.events().len();
        assert_eq!(after_close, 5);
    }

    #[test]
    fn test_write_failure_is_surfaced() {
        let (mut tft, link) = tft(true);
        link.state().lock().unwrap().simulate_write_failure = true;
        assert!(matches!(tft.draw_pixel(0, 0, None), Err(TftError::Io(_))));
        link.state().lock().unwrap().simulate_write_failure = false;
    }

    #[test]
    fn test_failed_close_does_not_retry_in_drop() {
        let link = MockLink::new();
        let tft = SerialTft::with_link(link.clone(), TftOptions::default());
        link.state().lock().unwrap().simulate_flush_failure = true;
        assert!(tft.close().is_err());
        assert!(link.events().is_empty());
    }
}
