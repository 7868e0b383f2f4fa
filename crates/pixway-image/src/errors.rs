/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! Errors possible during image processing
use std::fmt::{Debug, Display, Formatter};

use pixway_core::errors::ErrorKind;

use crate::codecs::ImageFormat;

/// All possible image errors that can occur.
///
/// Codec errors are carried as is, use [`kind`](ImageErrors::kind) to
/// classify them without matching on every codec.
#[non_exhaustive]
pub enum ImageErrors {
    #[cfg(feature = "bmp")]
    BmpDecodeErrors(pixway_bmp::BmpDecoderErrors),
    #[cfg(feature = "bmp")]
    BmpEncodeErrors(pixway_bmp::BmpEncoderErrors),
    #[cfg(feature = "png")]
    PngDecodeErrors(pixway_png::PngDecodeErrors),
    #[cfg(feature = "png")]
    PngEncodeErrors(pixway_png::PngEncodeErrors),
    #[cfg(feature = "jpeg")]
    JpegDecodeErrors(pixway_jpeg::DecodeErrors),
    #[cfg(feature = "jpeg")]
    JpegEncodeErrors(pixway_jpeg::EncodeErrors),
    /// Fewer bytes than needed to tell formats apart
    TooShortToGuess(usize),
    /// The magic bytes match no known format
    UnknownFormat([u8; 4]),
    /// No format is known for the extension
    UnknownExtension(String),
    /// The codec for the format was not compiled in
    CodecNotIncluded(ImageFormat),
    IoErrors(std::io::Error)
}

impl ImageErrors {
    /// Classify the error
    ///
    /// Returns `None` for I/O errors, which do not come from a codec
    pub fn kind(&self) -> Option<ErrorKind> {
        match self {
            #[cfg(feature = "bmp")]
            Self::BmpDecodeErrors(err) => Some(err.kind()),
            #[cfg(feature = "bmp")]
            Self::BmpEncodeErrors(err) => Some(err.kind()),
            #[cfg(feature = "png")]
            Self::PngDecodeErrors(err) => Some(err.kind()),
            #[cfg(feature = "png")]
            Self::PngEncodeErrors(err) => Some(err.kind()),
            #[cfg(feature = "jpeg")]
            Self::JpegDecodeErrors(err) => Some(err.kind()),
            #[cfg(feature = "jpeg")]
            Self::JpegEncodeErrors(err) => Some(err.kind()),
            Self::TooShortToGuess(_) | Self::UnknownFormat(_) | Self::UnknownExtension(_) => {
                Some(ErrorKind::Format)
            }
            Self::CodecNotIncluded(_) => Some(ErrorKind::UnsupportedFeature),
            Self::IoErrors(_) => None
        }
    }
}

impl Debug for ImageErrors {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            #[cfg(feature = "bmp")]
            Self::BmpDecodeErrors(err) => write!(f, "bmp: {err:?}"),
            #[cfg(feature = "bmp")]
            Self::BmpEncodeErrors(err) => write!(f, "bmp: {err:?}"),
            #[cfg(feature = "png")]
            Self::PngDecodeErrors(err) => write!(f, "png: {err:?}"),
            #[cfg(feature = "png")]
            Self::PngEncodeErrors(err) => write!(f, "png: {err:?}"),
            #[cfg(feature = "jpeg")]
            Self::JpegDecodeErrors(err) => write!(f, "jpeg: {err:?}"),
            #[cfg(feature = "jpeg")]
            Self::JpegEncodeErrors(err) => write!(f, "jpeg: {err:?}"),
            Self::TooShortToGuess(length) => {
                write!(f, "Cannot guess the format of a {length} byte buffer, at least 4 bytes are needed")
            }
            Self::UnknownFormat(magic) => {
                write!(f, "Unknown image format, magic bytes {magic:02X?}")
            }
            Self::UnknownExtension(extension) => {
                write!(f, "No image format is known for the extension {extension:?}")
            }
            Self::CodecNotIncluded(format) => {
                write!(f, "The {format:?} codec was not included in this build")
            }
            Self::IoErrors(err) => write!(f, "I/O error: {err}")
        }
    }
}

impl Display for ImageErrors {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{self:?}")
    }
}

impl std::error::Error for ImageErrors {}

impl From<std::io::Error> for ImageErrors {
    fn from(value: std::io::Error) -> Self {
        ImageErrors::IoErrors(value)
    }
}

#[cfg(feature = "bmp")]
impl From<pixway_bmp::BmpDecoderErrors> for ImageErrors {
    fn from(value: pixway_bmp::BmpDecoderErrors) -> Self {
        ImageErrors::BmpDecodeErrors(value)
    }
}

#[cfg(feature = "bmp")]
impl From<pixway_bmp::BmpEncoderErrors> for ImageErrors {
    fn from(value: pixway_bmp::BmpEncoderErrors) -> Self {
        ImageErrors::BmpEncodeErrors(value)
    }
}

#[cfg(feature = "png")]
impl From<pixway_png::PngDecodeErrors> for ImageErrors {
    fn from(value: pixway_png::PngDecodeErrors) -> Self {
        ImageErrors::PngDecodeErrors(value)
    }
}

#[cfg(feature = "png")]
impl From<pixway_png::PngEncodeErrors> for ImageErrors {
    fn from(value: pixway_png::PngEncodeErrors) -> Self {
        ImageErrors::PngEncodeErrors(value)
    }
}

#[cfg(feature = "jpeg")]
impl From<pixway_jpeg::DecodeErrors> for ImageErrors {
    fn from(value: pixway_jpeg::DecodeErrors) -> Self {
        ImageErrors::JpegDecodeErrors(value)
    }
}

#[cfg(feature = "jpeg")]
impl From<pixway_jpeg::EncodeErrors> for ImageErrors {
    fn from(value: pixway_jpeg::EncodeErrors) -> Self {
        ImageErrors::JpegEncodeErrors(value)
    }
}
