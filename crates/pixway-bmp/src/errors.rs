/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

use core::fmt::{Debug, Display, Formatter};

use pixway_core::bytestream::ByteIoError;
use pixway_core::errors::ErrorKind;
use pixway_core::midway::MidwayErrors;
use pixway_core::options::DimensionError;

/// BMP errors that can occur during decoding
#[non_exhaustive]
pub enum BmpDecoderErrors {
    /// The file/bytes do not start with `BM`
    InvalidMagicBytes,
    /// The buffer is too small to hold the pixels the
    /// header declares
    ///
    /// # Arguments
    /// - 1st argument is the number of bytes needed
    /// - 2nd argument is the buffer length
    TooSmallBuffer(usize, usize),
    /// The output buffer passed to `decode_into` is too small
    TooSmallOutput(usize, usize),
    /// Malformed header
    GenericStatic(&'static str),
    /// Compression other than uncompressed RGB
    UnsupportedCompression(u32),
    /// Bit depths other than 24 and 32
    UnsupportedDepth(u16),
    /// Too large dimensions for a given width or
    /// height
    TooLargeDimensions(&'static str, usize, usize),
    /// A calculation overflowed
    OverFlowOccurred,
    InvalidImage(MidwayErrors),
    IoErrors(ByteIoError)
}

impl BmpDecoderErrors {
    /// Classify this error
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::InvalidMagicBytes | Self::GenericStatic(_) | Self::InvalidImage(_) => {
                ErrorKind::Format
            }
            Self::UnsupportedCompression(_) | Self::UnsupportedDepth(_) => {
                ErrorKind::UnsupportedFeature
            }
            Self::TooSmallBuffer(..) | Self::IoErrors(_) => ErrorKind::Corruption,
            Self::TooSmallOutput(..) | Self::TooLargeDimensions(..) | Self::OverFlowOccurred => {
                ErrorKind::Resource
            }
        }
    }
}

impl Debug for BmpDecoderErrors {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::InvalidMagicBytes => {
                writeln!(f, "Invalid magic bytes, file does not start with BM")
            }
            Self::TooSmallBuffer(expected, found) => {
                writeln!(
                    f,
                    "Truncated file, pixel data needs {expected} bytes but file has {found}"
                )
            }
            Self::TooSmallOutput(expected, found) => {
                writeln!(
                    f,
                    "Too small of output buffer, expected {expected} but found {found}"
                )
            }
            Self::GenericStatic(header) => {
                writeln!(f, "{}", header)
            }
            Self::UnsupportedCompression(method) => {
                writeln!(
                    f,
                    "Unsupported compression method {method}, only uncompressed images are supported"
                )
            }
            Self::UnsupportedDepth(depth) => {
                writeln!(f, "Unsupported bit depth {depth}, expected 24 or 32")
            }
            Self::TooLargeDimensions(dimension, expected, found) => {
                writeln!(
                    f,
                    "Too large dimensions for {dimension} , {found} exceeds {expected}"
                )
            }
            Self::OverFlowOccurred => {
                writeln!(f, "Overflow occurred")
            }
            Self::InvalidImage(err) => {
                writeln!(f, "{:?}", err)
            }
            Self::IoErrors(err) => {
                writeln!(f, "{:?}", err)
            }
        }
    }
}

impl Display for BmpDecoderErrors {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        write!(f, "{:?}", self)
    }
}

#[cfg(feature = "std")]
impl std::error::Error for BmpDecoderErrors {}

impl From<ByteIoError> for BmpDecoderErrors {
    fn from(value: ByteIoError) -> Self {
        BmpDecoderErrors::IoErrors(value)
    }
}

impl From<MidwayErrors> for BmpDecoderErrors {
    fn from(value: MidwayErrors) -> Self {
        BmpDecoderErrors::InvalidImage(value)
    }
}

impl From<DimensionError> for BmpDecoderErrors {
    fn from(value: DimensionError) -> Self {
        BmpDecoderErrors::TooLargeDimensions(value.dimension, value.limit, value.found)
    }
}

/// Errors that can occur during encoding
pub enum BmpEncoderErrors {
    /// A dimension does not fit in the signed 32 bit header field
    TooLargeDimensions(&'static str, usize),
    /// The encoded file would be larger than 4 GiB
    TooLargeFile(usize)
}

impl BmpEncoderErrors {
    pub const fn kind(&self) -> ErrorKind {
        ErrorKind::Resource
    }
}

impl Debug for BmpEncoderErrors {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::TooLargeDimensions(dimension, value) => {
                writeln!(f, "Too large {dimension} {value}, bmp stores at most 2^31-1")
            }
            Self::TooLargeFile(size) => {
                writeln!(f, "Encoded size {size} does not fit the 32 bit file size field")
            }
        }
    }
}

impl Display for BmpEncoderErrors {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        write!(f, "{:?}", self)
    }
}

#[cfg(feature = "std")]
impl std::error::Error for BmpEncoderErrors {}
