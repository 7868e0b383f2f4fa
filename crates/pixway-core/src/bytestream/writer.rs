/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

use alloc::vec::Vec;
use core::mem::size_of;

enum Mode {
    // Big endian
    BE,
    // Little Endian
    LE
}

/// Encapsulates a simple growable byte writer with
/// support for endian aware writes
#[derive(Default)]
pub struct ByteWriter {
    buffer: Vec<u8>
}

impl ByteWriter {
    /// Create a new writer
    pub fn new() -> ByteWriter {
        ByteWriter { buffer: Vec::new() }
    }
    /// Create a new writer which can hold `capacity`
    /// bytes without reallocating
    pub fn with_capacity(capacity: usize) -> ByteWriter {
        ByteWriter {
            buffer: Vec::with_capacity(capacity)
        }
    }
    /// Return the number of bytes the writer has written
    pub fn bytes_written(&self) -> usize {
        self.buffer.len()
    }

    #[inline(always)]
    pub fn write_u8(&mut self, byte: u8) {
        self.buffer.push(byte);
    }

    pub fn write_all(&mut self, buf: &[u8]) {
        self.buffer.extend_from_slice(buf);
    }

    /// Write `count` copies of `byte`
    pub fn write_repeated(&mut self, byte: u8, count: usize) {
        self.buffer.resize(self.buffer.len() + count, byte);
    }

    /// Overwrite already written bytes starting at `position`
    ///
    /// Returns `false` and writes nothing if the range
    /// was not written yet
    pub fn patch(&mut self, position: usize, buf: &[u8]) -> bool {
        match self.buffer.get_mut(position..position + buf.len()) {
            Some(dest) => {
                dest.copy_from_slice(buf);
                true
            }
            None => false
        }
    }

    /// All bytes written so far
    pub fn as_slice(&self) -> &[u8] {
        &self.buffer
    }

    /// Destroy the writer returning the written bytes
    pub fn into_inner(self) -> Vec<u8> {
        self.buffer
    }
}

macro_rules! write_single_type {
    ($name:tt,$name2:tt,$name3:tt,$int_type:tt) => {
        impl ByteWriter {
            #[inline(always)]
            fn $name(&mut self, byte: $int_type, mode: Mode) {
                const SIZE: usize = size_of::<$int_type>();

                let bytes: [u8; SIZE] = match mode {
                    Mode::BE => byte.to_be_bytes(),
                    Mode::LE => byte.to_le_bytes()
                };
                self.buffer.extend_from_slice(&bytes);
            }

            #[doc=concat!("Write ",stringify!($int_type)," as a big endian integer")]
            #[inline]
            pub fn $name2(&mut self, byte: $int_type) {
                self.$name(byte, Mode::BE)
            }

            #[doc=concat!("Write ",stringify!($int_type)," as a little endian integer")]
            #[inline]
            pub fn $name3(&mut self, byte: $int_type) {
                self.$name(byte, Mode::LE)
            }
        }
    };
}

write_single_type!(write_u16_inner, write_u16_be, write_u16_le, u16);
write_single_type!(write_u32_inner, write_u32_be, write_u32_le, u32);
write_single_type!(write_i32_inner, write_i32_be, write_i32_le, i32);

#[cfg(test)]
mod tests {
    use super::ByteWriter;

    #[test]
    fn patching_written_bytes() {
        let mut writer = ByteWriter::new();
        writer.write_u32_le(0);
        writer.write_u16_be(0xABCD);

        assert!(writer.patch(0, &7_u32.to_le_bytes()));
        assert!(!writer.patch(5, &[1, 2]));
        assert_eq!(writer.as_slice(), &[7, 0, 0, 0, 0xAB, 0xCD]);
    }
}
