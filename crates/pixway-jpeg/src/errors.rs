/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! Contains most common errors that may be encountered in decoding a JPEG
//! image, and the errors the encoder reports

use alloc::string::String;
use core::fmt::{Debug, Display, Formatter};

use pixway_core::bytestream::ByteIoError;
use pixway_core::errors::ErrorKind;
use pixway_core::midway::MidwayErrors;
use pixway_core::options::DimensionError;

use crate::misc::{
    START_OF_FRAME_EXT_AR, START_OF_FRAME_EXT_SEQ, START_OF_FRAME_LOS_SEQ,
    START_OF_FRAME_LOS_SEQ_AR, START_OF_FRAME_PROG_DCT, START_OF_FRAME_PROG_DCT_AR
};

/// Common Decode errors
#[allow(clippy::module_name_repetitions)]
#[non_exhaustive]
pub enum DecodeErrors {
    /// Any other thing we do not know
    Format(String),
    /// Any other thing we do not know but we
    /// don't need to allocate space on the heap
    FormatStatic(&'static str),
    /// Illegal Magic Bytes
    IllegalMagicBytes(u16),
    /// A Huffman code in the entropy coded data matches no table entry
    HuffmanDecode(String),
    /// Image has zero width or height
    ZeroError,
    /// Discrete Quantization Tables error
    DqtError(String),
    /// Start of scan errors
    SosError(String),
    /// Start of frame errors
    SofError(String),
    /// UnsupportedImages
    Unsupported(UnsupportedSchemes),
    /// MCU errors
    MCUError(String),
    /// Exhausted data
    ExhaustedData,
    /// Too large dimensions for a given width or
    /// height
    TooLargeDimensions(&'static str, usize, usize),
    /// The output buffer passed to `decode_into` is too small
    TooSmallOutput(usize, usize),
    InvalidImage(MidwayErrors),
    IoErrors(ByteIoError)
}

impl DecodeErrors {
    /// Classify this error
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::Format(_)
            | Self::FormatStatic(_)
            | Self::IllegalMagicBytes(_)
            | Self::ZeroError
            | Self::DqtError(_)
            | Self::SosError(_)
            | Self::SofError(_)
            | Self::InvalidImage(_) => ErrorKind::Format,
            Self::Unsupported(_) => ErrorKind::UnsupportedFeature,
            Self::HuffmanDecode(_)
            | Self::MCUError(_)
            | Self::ExhaustedData
            | Self::IoErrors(_) => ErrorKind::Corruption,
            Self::TooLargeDimensions(..) | Self::TooSmallOutput(..) => ErrorKind::Resource
        }
    }
}

impl Debug for DecodeErrors {
    fn fmt(&self, f: &mut Formatter) -> core::fmt::Result {
        match &self {
            Self::Format(ref a) => write!(f, "{a}"),
            Self::FormatStatic(a) => write!(f, "{a}"),

            Self::HuffmanDecode(ref reason) => {
                write!(f, "Error decoding huffman values: {reason}")
            }
            Self::ZeroError => write!(f, "Image width or height is set to zero, cannot continue"),
            Self::DqtError(ref reason) => write!(f, "Error parsing DQT segment. Reason:{reason}"),
            Self::SosError(ref reason) => write!(f, "Error parsing SOS Segment. Reason:{reason}"),
            Self::SofError(ref reason) => write!(f, "Error parsing SOF segment. Reason:{reason}"),
            Self::IllegalMagicBytes(bytes) => {
                write!(f, "Error parsing image. Illegal start bytes:{bytes:X}")
            }
            Self::MCUError(ref reason) => write!(f, "Error in decoding MCU. Reason {reason}"),
            Self::Unsupported(ref image_type) => {
                write!(f, "{image_type:?}")
            }
            Self::ExhaustedData => write!(f, "Exhausted data in the image, the file is truncated"),
            Self::TooLargeDimensions(dimension, expected, found) => write!(
                f,
                "Too large dimensions for {dimension}, {found} exceeds {expected}"
            ),
            Self::TooSmallOutput(expected, found) => write!(
                f,
                "Too small output, expected buffer with at least {expected} bytes but got one with {found} bytes"
            ),
            Self::InvalidImage(err) => write!(f, "{err:?}"),
            Self::IoErrors(err) => write!(f, "{err:?}")
        }
    }
}

impl Display for DecodeErrors {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        write!(f, "{self:?}")
    }
}

#[cfg(feature = "std")]
impl std::error::Error for DecodeErrors {}

impl From<ByteIoError> for DecodeErrors {
    fn from(value: ByteIoError) -> Self {
        DecodeErrors::IoErrors(value)
    }
}

impl From<MidwayErrors> for DecodeErrors {
    fn from(value: MidwayErrors) -> Self {
        DecodeErrors::InvalidImage(value)
    }
}

impl From<DimensionError> for DecodeErrors {
    fn from(value: DimensionError) -> Self {
        DecodeErrors::TooLargeDimensions(value.dimension, value.limit, value.found)
    }
}

/// Contains Unsupported/Yet-to-be supported Decoder image encoding types.
#[derive(Eq, PartialEq, Copy, Clone)]
pub enum UnsupportedSchemes {
    /// SOF_1 Extended sequential DCT,Huffman coding
    ExtendedSequentialHuffman,
    /// SOF_2 Progressive DCT, Huffman coding
    ProgressiveDctHuffman,
    /// Lossless (sequential), huffman coding,
    LosslessHuffman,
    /// Differential sequential, progressive or lossless, huffman coding
    DifferentialHuffman,
    /// Extended sequential DEC, arithmetic coding
    ExtendedSequentialDctArithmetic,
    /// Progressive DCT, arithmetic coding,
    ProgressiveDctArithmetic,
    /// Lossless ( sequential), arithmetic coding
    LosslessArithmetic,
    /// Differential sequential, progressive or lossless, arithmetic coding
    DifferentialArithmetic,
    /// A DAC segment, conditioning tables for arithmetic coding
    ArithmeticConditioning,
    /// Sample precision other than 8 bits
    Precision(u8),
    /// Images with a component count other than one or three
    ComponentCount(u8),
    /// Horizontal and vertical sampling factors above 2
    SamplingFactors(u8, u8)
}

impl Debug for UnsupportedSchemes {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        match &self {
            Self::ExtendedSequentialHuffman => {
                write!(f, "The library cannot yet decode images encoded using Extended Sequential Huffman encoding scheme yet.")
            }
            Self::ProgressiveDctHuffman => {
                write!(f, "The library cannot decode progressive images, only baseline images are supported")
            }
            Self::LosslessHuffman => {
                write!(f, "The library cannot yet decode images encoded with Lossless Huffman encoding scheme")
            }
            Self::DifferentialHuffman | Self::DifferentialArithmetic => {
                write!(f, "The library cannot decode hierarchical (differential) images")
            }
            Self::ExtendedSequentialDctArithmetic => {
                write!(f,"The library cannot yet decode Images Encoded with Extended Sequential DCT Arithmetic scheme")
            }
            Self::ProgressiveDctArithmetic => {
                write!(f,"The library cannot yet decode images encoded with Progressive DCT Arithmetic scheme")
            }
            Self::LosslessArithmetic => {
                write!(f,"The library cannot yet decode images encoded with Lossless Arithmetic encoding scheme")
            }
            Self::ArithmeticConditioning => {
                write!(f, "Arithmetic coding conditioning tables (DAC) are not supported")
            }
            Self::Precision(precision) => {
                write!(f, "The library can only decode 8-bit images, the image has {precision} bits of precision")
            }
            Self::ComponentCount(count) => {
                write!(f, "Images with {count} components are not supported, expected 1 or 3")
            }
            Self::SamplingFactors(h, v) => {
                write!(f, "Sampling factors {h}x{v} are not supported, at most 2x2")
            }
        }
    }
}

impl UnsupportedSchemes {
    #[must_use]
    /// Create an unsupported scheme from an integer
    ///
    /// # Returns
    /// `Some(UnsupportedScheme)` if the int refers to a specific scheme,
    /// otherwise returns `None`
    pub fn from_int(int: u8) -> Option<UnsupportedSchemes> {
        let int = u16::from_be_bytes([0xff, int]);

        match int {
            START_OF_FRAME_PROG_DCT => Some(Self::ProgressiveDctHuffman),
            START_OF_FRAME_PROG_DCT_AR => Some(Self::ProgressiveDctArithmetic),
            START_OF_FRAME_LOS_SEQ => Some(Self::LosslessHuffman),
            START_OF_FRAME_LOS_SEQ_AR => Some(Self::LosslessArithmetic),
            START_OF_FRAME_EXT_SEQ => Some(Self::ExtendedSequentialHuffman),
            START_OF_FRAME_EXT_AR => Some(Self::ExtendedSequentialDctArithmetic),
            0xffc5..=0xffc7 => Some(Self::DifferentialHuffman),
            0xffcd..=0xffcf => Some(Self::DifferentialArithmetic),
            _ => None
        }
    }
}

/// Errors that can occur during encoding
pub enum EncodeErrors {
    /// A dimension does not fit in the 16 bit frame header fields
    TooLargeDimensions(&'static str, usize),
    /// A supplied quantization table holds a value outside `1..=255`
    InvalidQuantizationTable(String),
    /// A supplied Huffman table does not describe a valid prefix code
    InvalidHuffmanTable(String),
    /// A symbol the image needs has no code in the supplied Huffman table
    MissingHuffmanSymbol(u8)
}

impl EncodeErrors {
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::TooLargeDimensions(..) => ErrorKind::Resource,
            Self::InvalidQuantizationTable(_)
            | Self::InvalidHuffmanTable(_)
            | Self::MissingHuffmanSymbol(_) => ErrorKind::Format
        }
    }
}

impl Debug for EncodeErrors {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::TooLargeDimensions(dimension, value) => {
                writeln!(f, "Too large {dimension} {value}, jpeg stores at most 65535")
            }
            Self::InvalidQuantizationTable(reason) => {
                writeln!(f, "Invalid quantization table: {reason}")
            }
            Self::InvalidHuffmanTable(reason) => writeln!(f, "Invalid huffman table: {reason}"),
            Self::MissingHuffmanSymbol(symbol) => {
                writeln!(f, "Symbol {symbol:#04X} has no code in the huffman table")
            }
        }
    }
}

impl Display for EncodeErrors {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        write!(f, "{self:?}")
    }
}

#[cfg(feature = "std")]
impl std::error::Error for EncodeErrors {}
