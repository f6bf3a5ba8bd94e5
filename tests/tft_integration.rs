//! End-to-end checks of the public API against a recording link.

use std::time::Duration;

use serialtft::display::{Color, LinkEvent, MockLink, SerialTft, TftError, TftOptions, Theme};
use serialtft::pacer::PacingProfile;
use serialtft::{FontSize, Rotation};

fn connect(clear_on_exit: bool, flush: bool) -> (SerialTft<MockLink>, MockLink) {
    let link = MockLink::new();
    let options = TftOptions { clear_on_exit, flush, pacing: PacingProfile::default() };
    (SerialTft::with_link(link.clone(), options), link)
}

#[test]
fn test_session_byte_stream() {
    let (mut tft, link) = connect(false, true);
    tft.screen_rotation(Rotation::Landscape).unwrap();
    tft.bg_color(Color::Black).unwrap();
    tft.clear_screen().unwrap();
    tft.font_size(FontSize::Medium).unwrap();
    tft.fg_color(Color::Yellow).unwrap();
    tft.goto_char(2, 3).unwrap();
    tft.write("Hi").unwrap();
    tft.draw_circle(80, 64, 30, Some(Color::Red)).unwrap();
    tft.close().unwrap();

    let expected: Vec<u8> = [
        &[27, 3, 3, 255][..],
        &[27, 2, 0, 255],
        &[27, 0, 255],
        &[27, 4, 2, 255],
        &[27, 1, 6, 255],
        &[27, 6, 2, 3, 255],
        b"Hi",
        &[27, 11, 80, 64, 30, 2, 255],
    ]
    .concat();
    assert_eq!(link.written(), expected);
}

#[test]
fn test_drop_tears_down_with_clear() {
    let link = MockLink::new();
    {
        let mut tft = SerialTft::with_link(link.clone(), TftOptions::default());
        tft.draw_pixel(1, 2, None).unwrap();
    }
    let writes = link.writes();
    assert_eq!(writes.last().unwrap(), &vec![27, 0, 255]);
    // flush, clear (+ its own flush), final flush
    let events = link.events();
    let tail = &events[events.len() - 5..];
    assert_eq!(tail[0], LinkEvent::Flush);
    assert_eq!(tail[1], LinkEvent::Write(vec![27, 0, 255]));
    assert_eq!(tail[2], LinkEvent::Flush);
    assert_eq!(tail[3], LinkEvent::Pause(Duration::from_millis(200)));
    assert_eq!(tail[4], LinkEvent::Flush);
}

#[test]
fn test_close_then_drop_runs_teardown_once() {
    let (tft, link) = connect(true, true);
    tft.close().unwrap();
    let clears = link.writes().iter().filter(|w| w.as_slice() == [27, 0, 255]).count();
    assert_eq!(clears, 1);
}

#[test]
fn test_no_clear_on_exit_only_flushes() {
    let (tft, link) = connect(false, false);
    drop(tft);
    assert_eq!(link.events(), vec![LinkEvent::Flush]);
}

#[test]
fn test_paced_drawing_without_flush() {
    let (mut tft, link) = connect(false, false);
    tft.draw_line(0, 0, 10, 10, None).unwrap();
    tft.draw_filled_rect(0, 0, 10, 10, None).unwrap();
    tft.draw_pixel(3, 3, None).unwrap();
    assert_eq!(
        link.pauses(),
        vec![Duration::from_millis(7), Duration::from_millis(60), Duration::from_micros(4_500)]
    );
    assert_eq!(link.flush_count(), 0);
}

#[test]
fn test_long_text_is_packetized() {
    let (mut tft, link) = connect(false, false);
    let text = "The quick brown fox jumps over the lazy dog";
    tft.write(text).unwrap();
    let writes = link.writes();
    assert_eq!(writes.len(), 3);
    assert!(writes.iter().all(|w| w.len() <= 16));
    assert_eq!(writes.concat(), text.as_bytes());
    assert_eq!(link.flush_count(), 3);
    assert_eq!(link.total_paused(), Duration::from_millis(150));
}

#[test]
fn test_accented_text_is_folded_to_ascii() {
    let (mut tft, link) = connect(false, true);
    tft.write_line("café").unwrap();
    assert_eq!(link.written(), b"cafe\r".to_vec());
}

#[test]
fn test_theme_and_palette() {
    let (mut tft, link) = connect(false, true);
    tft.set_theme(Theme::Solarized).unwrap();
    tft.set_color_hex(Color::User1, "#ffffff").unwrap();
    let writes = link.writes();
    assert_eq!(writes[0].len(), 48);
    assert_eq!(writes[1], vec![27, 15, 8, 0xff, 0xff, 255]);
}

#[test]
fn test_bad_hex_is_rejected_before_writing() {
    let (mut tft, link) = connect(false, true);
    let err = tft.set_color_hex(Color::User2, "#12345").unwrap_err();
    assert!(matches!(err, TftError::InvalidHex(_)));
    assert!(link.writes().is_empty());
}

#[test]
fn test_link_failure_surfaces() {
    let (mut tft, link) = connect(false, true);
    link.state().lock().unwrap().simulate_write_failure = true;
    assert!(matches!(tft.clear_screen(), Err(TftError::Io(_))));
}

#[test]
fn test_parameters_wrap_modulo_256() {
    let (mut tft, link) = connect(false, true);
    tft.goto_pixel(300, -1).unwrap();
    assert_eq!(link.written(), vec![27, 7, 44, 255, 255]);
}
