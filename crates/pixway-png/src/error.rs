/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

use std::fmt::{Debug, Display, Formatter};

use pixway_core::bytestream::ByteIoError;
use pixway_core::errors::ErrorKind;
use pixway_core::midway::MidwayErrors;
use pixway_core::options::DimensionError;
use zune_inflate::errors::InflateDecodeErrors;

use crate::enums::PngColor;

/// Errors possible during png decoding
#[non_exhaustive]
pub enum PngDecodeErrors {
    /// The file does not start with the 8 byte png signature
    BadSignature,
    /// A chunk crc does not match its contents
    ///
    /// # Arguments
    /// - stored crc
    /// - calculated crc
    BadCrc(u32, u32),
    /// Malformed chunk layout or header values
    GenericStatic(&'static str),
    /// Malformed chunk layout or header values
    Generic(String),
    /// Interlaced images are not decoded
    InterlacedImage,
    /// Color type and depth combination not decoded
    UnsupportedColor(PngColor, u8),
    /// Too large dimensions for a given width or
    /// height
    TooLargeDimensions(&'static str, usize, usize),
    /// The stream ended before the data the headers promise
    NotEnoughData(String),
    /// A scanline starts with an unknown filter byte
    InvalidFilter(u8),
    /// The output buffer passed to `decode_into` is too small
    TooSmallOutput(usize, usize),
    ZlibDecodeErrors(InflateDecodeErrors),
    InvalidImage(MidwayErrors),
    IoErrors(ByteIoError)
}

impl PngDecodeErrors {
    /// Classify this error
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::BadSignature
            | Self::GenericStatic(_)
            | Self::Generic(_)
            | Self::InvalidImage(_) => ErrorKind::Format,
            Self::InterlacedImage | Self::UnsupportedColor(..) => ErrorKind::UnsupportedFeature,
            Self::BadCrc(..)
            | Self::NotEnoughData(_)
            | Self::InvalidFilter(_)
            | Self::ZlibDecodeErrors(_)
            | Self::IoErrors(_) => ErrorKind::Corruption,
            Self::TooLargeDimensions(..) | Self::TooSmallOutput(..) => ErrorKind::Resource
        }
    }
}

impl Debug for PngDecodeErrors {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::BadSignature => writeln!(f, "Bad PNG signature, not a png"),
            Self::BadCrc(expected, found) => writeln!(
                f,
                "CRC does not match, expected {expected:#010x} but found {found:#010x}"
            ),
            Self::GenericStatic(val) => writeln!(f, "{val}"),
            Self::Generic(val) => writeln!(f, "{val}"),
            Self::InterlacedImage => writeln!(f, "Interlaced images are not supported"),
            Self::UnsupportedColor(color, depth) => writeln!(
                f,
                "Unsupported color type {color:?} with depth {depth}, only 8 bit gray and truecolor images are supported"
            ),
            Self::TooLargeDimensions(dimension, expected, found) => writeln!(
                f,
                "Too large dimensions for {dimension}, {found} exceeds {expected}"
            ),
            Self::NotEnoughData(val) => writeln!(f, "{val}"),
            Self::InvalidFilter(filter) => writeln!(f, "Unknown filter type {filter}"),
            Self::TooSmallOutput(expected, found) => writeln!(
                f,
                "Too small output, expected buffer with at least {expected} bytes but got one with {found} bytes"
            ),
            Self::ZlibDecodeErrors(err) => writeln!(f, "Error decoding idat chunks {err:?}"),
            Self::InvalidImage(err) => writeln!(f, "{err:?}"),
            Self::IoErrors(err) => writeln!(f, "{err:?}")
        }
    }
}

impl Display for PngDecodeErrors {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}", self)
    }
}

impl std::error::Error for PngDecodeErrors {}

impl From<&'static str> for PngDecodeErrors {
    fn from(val: &'static str) -> Self {
        Self::GenericStatic(val)
    }
}

impl From<String> for PngDecodeErrors {
    fn from(val: String) -> Self {
        Self::Generic(val)
    }
}

impl From<ByteIoError> for PngDecodeErrors {
    fn from(val: ByteIoError) -> Self {
        Self::IoErrors(val)
    }
}

impl From<MidwayErrors> for PngDecodeErrors {
    fn from(val: MidwayErrors) -> Self {
        Self::InvalidImage(val)
    }
}

impl From<DimensionError> for PngDecodeErrors {
    fn from(value: DimensionError) -> Self {
        Self::TooLargeDimensions(value.dimension, value.limit, value.found)
    }
}

/// Errors possible during png encoding
pub enum PngEncodeErrors {
    /// A dimension does not fit in the 31 bits png allows
    TooLargeDimensions(&'static str, usize),
    /// The deflate stream could not be written
    CompressionError(std::io::Error)
}

impl PngEncodeErrors {
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::TooLargeDimensions(..) => ErrorKind::Resource,
            Self::CompressionError(_) => ErrorKind::Corruption
        }
    }
}

impl Debug for PngEncodeErrors {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::TooLargeDimensions(dimension, value) => {
                writeln!(f, "Too large {dimension} {value}, png stores at most 2^31-1")
            }
            Self::CompressionError(err) => writeln!(f, "Compression failed {err}")
        }
    }
}

impl Display for PngEncodeErrors {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}", self)
    }
}

impl std::error::Error for PngEncodeErrors {}

impl From<std::io::Error> for PngEncodeErrors {
    fn from(val: std::io::Error) -> Self {
        Self::CompressionError(val)
    }
}
