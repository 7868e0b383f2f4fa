/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

use pixway_core::bytestream::ByteWriter;

/// Writes entropy coded data, most significant bit first
///
/// Every 0xFF byte produced is followed by a stuffed zero byte
pub(crate) struct BitWriter<'a> {
    writer:      &'a mut ByteWriter,
    accumulator: u32,
    bits:        u8
}

impl<'a> BitWriter<'a> {
    pub fn new(writer: &'a mut ByteWriter) -> BitWriter<'a> {
        BitWriter {
            writer,
            accumulator: 0,
            bits: 0
        }
    }

    /// Write the low `length` bits of `value`, at most 16
    #[inline]
    pub fn write_bits(&mut self, value: u32, length: u8) {
        if length == 0 {
            return;
        }
        debug_assert!(length <= 16);

        self.accumulator = (self.accumulator << length) | (value & ((1 << length) - 1));
        self.bits += length;

        while self.bits >= 8 {
            self.bits -= 8;

            let byte = (self.accumulator >> self.bits) as u8;
            self.emit(byte);
        }
        self.accumulator &= (1 << self.bits) - 1;
    }

    #[inline]
    fn emit(&mut self, byte: u8) {
        self.writer.write_u8(byte);

        if byte == 0xFF {
            self.writer.write_u8(0x00);
        }
    }

    /// Pad the last byte with one bits
    pub fn flush(&mut self) {
        if self.bits > 0 {
            let pad = 8 - self.bits;
            self.write_bits((1 << pad) - 1, pad);
        }
    }

    /// Write a marker, the stream must have been flushed
    pub fn write_marker(&mut self, marker: u8) {
        debug_assert_eq!(self.bits, 0);
        self.writer.write_all(&[0xFF, marker]);
    }
}
