/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! Reading bits from the entropy coded segment
//!
//! The reader keeps up to 64 bits buffered, most significant bit first.
//! Stuffed `0xFF 0x00` pairs are collapsed into a single `0xFF`, and reading stops
//! at the first marker. Past that point (or past the end of the data) zeroes
//! are fed into the buffer and counted, so running out of data is detected
//! without bounds checks in the hot path.

use alloc::format;

use crate::errors::DecodeErrors;
use crate::huffman::{HuffmanTable, HUFF_LOOKAHEAD};
use crate::marker::Marker;

pub(crate) struct BitStream<'a> {
    data:                  &'a [u8],
    /// Next unread byte in `data`
    position:              usize,
    buffer:                u64,
    bits_left:             u8,
    /// Marker which stopped the reader, `position` points at its `0xFF`
    pub(crate) marker:     Option<Marker>,
    /// Number of zero bytes fed in place of data
    pub(crate) overread_by: usize
}

impl<'a> BitStream<'a> {
    /// Create a reader over `data` starting at `position`
    pub fn new(data: &'a [u8], position: usize) -> BitStream<'a> {
        BitStream {
            data,
            position,
            buffer: 0,
            bits_left: 0,
            marker: None,
            overread_by: 0
        }
    }

    /// Position of the next unread byte
    pub const fn position(&self) -> usize {
        self.position
    }

    fn next_byte(&mut self) -> u8 {
        loop {
            if self.marker.is_some() {
                self.overread_by += 1;
                return 0;
            }
            let Some(&byte) = self.data.get(self.position) else {
                self.overread_by += 1;
                return 0;
            };

            if byte != 0xFF {
                self.position += 1;
                return byte;
            }
            match self.data.get(self.position + 1) {
                Some(0x00) => {
                    // stuffed byte
                    self.position += 2;
                    return 0xFF;
                }
                Some(0xFF) => {
                    // fill byte before a marker
                    self.position += 1;
                }
                Some(&next) => {
                    self.marker = Marker::from_u8(next);

                    if self.marker.is_none() {
                        // not a marker, treat it as garbage and keep the pair out of the stream
                        self.position += 2;
                    }
                }
                None => {
                    self.position += 1;
                }
            }
        }
    }

    #[inline(always)]
    fn refill(&mut self) {
        while self.bits_left <= 56 {
            let byte = u64::from(self.next_byte());

            self.buffer |= byte << (56 - self.bits_left);
            self.bits_left += 8;
        }
    }

    #[inline(always)]
    fn peek_bits(&self, bits: u8) -> u32 {
        (self.buffer >> (64 - bits)) as u32
    }

    #[inline(always)]
    fn drop_bits(&mut self, bits: u8) {
        self.buffer <<= bits;
        self.bits_left -= bits;
    }

    /// Read `bits` raw bits, at most 16
    #[inline(always)]
    pub fn get_bits(&mut self, bits: u8) -> i32 {
        if bits == 0 {
            return 0;
        }
        self.refill();
        let value = self.peek_bits(bits);
        self.drop_bits(bits);
        value as i32
    }

    /// Read `bits` bits and sign extend them as described in `F.2.2.1`
    #[inline(always)]
    pub fn receive_extend(&mut self, bits: u8) -> i32 {
        let value = self.get_bits(bits);
        extend(value, bits)
    }

    /// Decode one Huffman coded symbol
    pub fn decode_symbol(&mut self, table: &HuffmanTable) -> Result<u8, DecodeErrors> {
        self.refill();

        let (symbol, length) = table.lookup[self.peek_bits(HUFF_LOOKAHEAD) as usize];

        if length != 0 {
            self.drop_bits(length);
            return Ok(symbol);
        }
        // slow path, codes longer than the lookahead
        for length in HUFF_LOOKAHEAD + 1..=16 {
            let code = self.peek_bits(length) as i32;

            if code <= table.maxcode[usize::from(length)] {
                let index = code + table.offset[usize::from(length)];
                self.drop_bits(length);

                return Ok(table.values[(index as usize) & 255]);
            }
        }
        Err(DecodeErrors::HuffmanDecode(format!(
            "Bad Huffman code {:#018b} near byte {}",
            self.peek_bits(16),
            self.position
        )))
    }

    /// Whether bits that were not in the stream have been consumed
    ///
    /// Every fed zero byte sits at the bottom of the buffer, once more of them
    /// were fed than bits remain, some were decoded as data.
    pub fn consumed_padding(&self) -> bool {
        self.overread_by * 8 > usize::from(self.bits_left)
    }

    /// Drop buffered bits and move past the restart marker that should follow
    ///
    /// Returns the restart number found, `None` if the next marker is not a restart marker
    pub fn reset_at_restart(&mut self) -> Option<u8> {
        self.buffer = 0;
        self.bits_left = 0;
        self.overread_by = 0;
        self.marker = None;

        // skip anything up to the next marker
        while self.position + 1 < self.data.len() {
            if self.data[self.position] == 0xFF {
                let next = self.data[self.position + 1];

                if let Some(Marker::RST(n)) = Marker::from_u8(next) {
                    self.position += 2;
                    return Some(n);
                }
                if next != 0x00 && next != 0xFF {
                    return None;
                }
            }
            self.position += 1;
        }
        None
    }
}

/// Sign extend a value of `bits` magnitude bits
#[inline(always)]
pub(crate) fn extend(value: i32, bits: u8) -> i32 {
    if bits == 0 {
        return 0;
    }
    if value < (1 << (bits - 1)) {
        value - (1 << bits) + 1
    } else {
        value
    }
}
