/*
 *  protocol/text.rs
 *
 *  serialtft - Hobbytronics serial TFT driver
 *  (c) 2020-26 Stuart Hunter
 *
 *  Text normalization and packet slicing
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

use unicode_normalization::UnicodeNormalization;

use crate::constants::TEXT_PACKET_SIZE;

/// Reduce text to the controller's single-byte character set.
///
/// Compatibility decomposition first (so `é` becomes `e` + combining accent),
/// then anything outside ASCII is dropped. Lossy on purpose: the controller
/// font has nothing else to draw.
pub fn normalize(text: &str) -> Vec<u8> {
    text.nfkd()
        .filter(char::is_ascii)
        .map(|c| c as u8)
        .collect()
}

/// How a normalized payload goes out on the wire
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TextPayload<'a> {
    /// Nothing survived normalization
    Empty,
    /// Fits one packet, sent as a single unpaced write
    Single(&'a [u8]),
    /// Sliced into packets, each written, flushed and paced on its own
    Packets(Vec<&'a [u8]>),
}

impl<'a> TextPayload<'a> {
    pub fn split(bytes: &'a [u8]) -> Self {
        match bytes.len() {
            0 => TextPayload::Empty,
            n if n <= TEXT_PACKET_SIZE => TextPayload::Single(bytes),
            _ => TextPayload::Packets(bytes.chunks(TEXT_PACKET_SIZE).collect()),
        }
    }

    pub fn packet_count(&self) -> usize {
        match self {
            TextPayload::Empty => 0,
            TextPayload::Single(_) => 1,
            TextPayload::Packets(p) => p.len(),
        }
    }
}
