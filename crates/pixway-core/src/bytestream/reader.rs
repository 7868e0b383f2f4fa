/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

use core::fmt::{Debug, Display, Formatter};

/// Errors raised by the byte reader
pub enum ByteIoError {
    /// Not enough bytes to satisfy a read
    ///
    /// # Arguments
    /// - 1st argument is the number of bytes requested
    /// - 2nd argument is the number of bytes left
    NotEnoughBytes(usize, usize),
    /// Attempted to move before the start of the stream
    SeekError(&'static str)
}

impl Debug for ByteIoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        match self {
            ByteIoError::NotEnoughBytes(expected, found) => {
                writeln!(f, "Not enough bytes, expected {expected} but found {found}")
            }
            ByteIoError::SeekError(err) => {
                writeln!(f, "Seek error: {err}")
            }
        }
    }
}

impl Display for ByteIoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        write!(f, "{:?}", self)
    }
}

#[cfg(feature = "std")]
impl std::error::Error for ByteIoError {}

/// An encapsulation of a byte stream
///
/// The lifetime parameter ties slices handed out by the
/// reader to the buffer it reads from, so no copies are needed.
pub struct ByteReader<'a> {
    /// Data stream
    stream:   &'a [u8],
    position: usize
}

enum Mode {
    // Big endian
    BE,
    // Little Endian
    LE
}

impl<'a> ByteReader<'a> {
    pub const fn new(buf: &'a [u8]) -> ByteReader<'a> {
        ByteReader {
            stream:   buf,
            position: 0
        }
    }
    /// Skip `bytes` ahead of the stream, erroring out
    /// if that would move past the end.
    pub fn skip(&mut self, bytes: usize) -> Result<(), ByteIoError> {
        if !self.has(bytes) {
            return Err(ByteIoError::NotEnoughBytes(bytes, self.bytes_left()));
        }
        self.position += bytes;
        Ok(())
    }
    /// Move `bytes` back
    pub fn rewind(&mut self, bytes: usize) -> Result<(), ByteIoError> {
        self.position = self
            .position
            .checked_sub(bytes)
            .ok_or(ByteIoError::SeekError("Cannot rewind past the start"))?;
        Ok(())
    }

    pub fn set_position(&mut self, position: usize) -> Result<(), ByteIoError> {
        if position > self.stream.len() {
            return Err(ByteIoError::NotEnoughBytes(position, self.stream.len()));
        }
        self.position = position;
        Ok(())
    }

    pub const fn bytes_left(&self) -> usize {
        // Must be saturating to prevent underflow
        self.stream.len().saturating_sub(self.position)
    }

    pub const fn len(&self) -> usize {
        self.stream.len()
    }

    pub const fn is_empty(&self) -> bool {
        self.stream.is_empty()
    }

    pub const fn position(&self) -> usize {
        self.position
    }

    pub const fn eof(&self) -> bool {
        self.position >= self.stream.len()
    }
    /// Check if the stream has `bytes` more bytes
    pub const fn has(&self, bytes: usize) -> bool {
        self.position.saturating_add(bytes) <= self.stream.len()
    }

    /// Read a single byte, returning `0` at the end of the stream
    #[inline(always)]
    pub fn get_u8(&mut self) -> u8 {
        match self.stream.get(self.position) {
            Some(byte) => {
                self.position += 1;
                *byte
            }
            None => 0
        }
    }

    #[inline(always)]
    pub fn get_u8_err(&mut self) -> Result<u8, ByteIoError> {
        match self.stream.get(self.position) {
            Some(byte) => {
                self.position += 1;
                Ok(*byte)
            }
            None => Err(ByteIoError::NotEnoughBytes(1, 0))
        }
    }

    /// Look ahead `position` bytes and return a reference
    /// to `num_bytes` from that position, or an error if the
    /// peek would be out of bounds.
    ///
    /// This doesn't increment the position
    pub fn peek_at(&self, position: usize, num_bytes: usize) -> Result<&'a [u8], ByteIoError> {
        let start = self.position.saturating_add(position);
        let end = start.saturating_add(num_bytes);

        self.stream
            .get(start..end)
            .ok_or(ByteIoError::NotEnoughBytes(end - self.position, self.bytes_left()))
    }

    /// Return a reference to the next `num_bytes` and move past them
    pub fn get_as_ref(&mut self, num_bytes: usize) -> Result<&'a [u8], ByteIoError> {
        let bytes = self.peek_at(0, num_bytes)?;
        self.position += num_bytes;
        Ok(bytes)
    }

    #[inline]
    pub fn read_fixed_bytes_or_error<const N: usize>(&mut self) -> Result<[u8; N], ByteIoError> {
        let mut byte_store: [u8; N] = [0; N];
        byte_store.copy_from_slice(self.get_as_ref(N)?);
        Ok(byte_store)
    }

    /// Everything from the current position to the end
    pub fn remaining_bytes(&self) -> &'a [u8] {
        self.stream.get(self.position..).unwrap_or(&[])
    }
}

macro_rules! get_single_type {
    ($name:tt,$name2:tt,$name3:tt,$name4:tt,$int_type:tt) => {
        impl<'a> ByteReader<'a> {
            #[inline(always)]
            fn $name(&mut self, mode: Mode) -> Result<$int_type, ByteIoError> {
                const SIZE_OF_VAL: usize = core::mem::size_of::<$int_type>();

                let mut space = [0; SIZE_OF_VAL];

                match self.stream.get(self.position..self.position + SIZE_OF_VAL) {
                    Some(position) => {
                        space.copy_from_slice(position);
                        self.position += SIZE_OF_VAL;

                        match mode {
                            Mode::LE => Ok($int_type::from_le_bytes(space)),
                            Mode::BE => Ok($int_type::from_be_bytes(space))
                        }
                    }
                    None => Err(ByteIoError::NotEnoughBytes(
                        SIZE_OF_VAL,
                        self.bytes_left()
                    ))
                }
            }

            #[doc=concat!("Read ",stringify!($int_type)," as a big endian integer")]
            #[doc=concat!("Returning an error if the underlying buffer cannot support a ",stringify!($int_type)," read.")]
            #[inline]
            pub fn $name2(&mut self) -> Result<$int_type, ByteIoError> {
                self.$name(Mode::BE)
            }

            #[doc=concat!("Read ",stringify!($int_type)," as a little endian integer")]
            #[doc=concat!("Returning an error if the underlying buffer cannot support a ",stringify!($int_type)," read.")]
            #[inline]
            pub fn $name3(&mut self) -> Result<$int_type, ByteIoError> {
                self.$name(Mode::LE)
            }

            #[doc=concat!("Read ",stringify!($int_type)," as a big endian integer")]
            #[doc=concat!("Returning 0 if the underlying buffer does not have enough bytes for a ",stringify!($int_type)," read.")]
            #[inline(always)]
            pub fn $name4(&mut self) -> $int_type {
                self.$name(Mode::BE).unwrap_or(0)
            }
        }
    };
}

get_single_type!(get_u16_inner, get_u16_be_err, get_u16_le_err, get_u16_be, u16);
get_single_type!(get_u32_inner, get_u32_be_err, get_u32_le_err, get_u32_be, u32);
