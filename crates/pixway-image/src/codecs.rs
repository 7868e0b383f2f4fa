/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! Entry point for all supported codecs
//!
//! Each codec lives in its own module and is only compiled when its
//! feature is enabled.
use pixway_core::log::{debug, trace};
use pixway_core::midway::Midway;
use pixway_core::options::{DecoderOptions, EncoderOptions};

use crate::errors::ImageErrors;
use crate::traits::{DecoderTrait, EncoderTrait};

#[cfg(feature = "bmp")]
pub mod bmp;
#[cfg(feature = "jpeg")]
pub mod jpeg;
#[cfg(feature = "png")]
pub mod png;

/// All image formats pixway knows about
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
#[allow(clippy::upper_case_acronyms)]
pub enum ImageFormat {
    /// Windows bitmap
    BMP,
    /// Portable Network Graphics
    PNG,
    /// Baseline JPEG
    JPEG
}

/// Magic bytes identifying each format, matched against the start of a file
static MAGIC_BYTES: [(&[u8], ImageFormat); 3] = [
    (&[0x89, 0x50, 0x4E, 0x47], ImageFormat::PNG),
    (&[0xFF, 0xD8], ImageFormat::JPEG),
    (b"BM", ImageFormat::BMP)
];

impl ImageFormat {
    /// Guess the format of an encoded image from its first bytes
    ///
    /// At least four bytes are needed, shorter buffers are rejected even
    /// when a two byte signature would match.
    pub fn guess_format(bytes: &[u8]) -> Result<ImageFormat, ImageErrors> {
        let Some(magic) = bytes.get(..4) else {
            return Err(ImageErrors::TooShortToGuess(bytes.len()));
        };

        for (signature, format) in MAGIC_BYTES.iter() {
            if magic.starts_with(signature) {
                trace!("Guessed format {:?}", format);
                return Ok(*format);
            }
        }
        Err(ImageErrors::UnknownFormat([
            magic[0], magic[1], magic[2], magic[3]
        ]))
    }

    /// Map a file extension to a format
    ///
    /// The comparison ignores ASCII case, a leading dot is accepted.
    pub fn from_extension(extension: &str) -> Result<ImageFormat, ImageErrors> {
        let trimmed = extension.strip_prefix('.').unwrap_or(extension);

        match trimmed.to_ascii_lowercase().as_str() {
            "bmp" => Ok(ImageFormat::BMP),
            "png" => Ok(ImageFormat::PNG),
            "jpg" | "jpeg" => Ok(ImageFormat::JPEG),
            _ => Err(ImageErrors::UnknownExtension(extension.to_string()))
        }
    }

    /// Whether this build can decode the format
    pub const fn has_decoder(&self) -> bool {
        match self {
            ImageFormat::BMP => cfg!(feature = "bmp"),
            ImageFormat::PNG => cfg!(feature = "png"),
            ImageFormat::JPEG => cfg!(feature = "jpeg")
        }
    }

    /// Whether this build can encode the format
    pub const fn has_encoder(&self) -> bool {
        self.has_decoder()
    }

    /// Create a decoder for `data` with default options
    pub fn decoder<'a>(&self, data: &'a [u8]) -> Result<Box<dyn DecoderTrait + 'a>, ImageErrors> {
        self.decoder_with_options(data, DecoderOptions::default())
    }

    /// Create a decoder for `data`
    #[allow(unused_variables)]
    pub fn decoder_with_options<'a>(
        &self, data: &'a [u8], options: DecoderOptions
    ) -> Result<Box<dyn DecoderTrait + 'a>, ImageErrors> {
        match self {
            ImageFormat::BMP => {
                #[cfg(feature = "bmp")]
                {
                    Ok(Box::new(pixway_bmp::BmpDecoder::new_with_options(
                        data, options
                    )))
                }
                #[cfg(not(feature = "bmp"))]
                {
                    Err(ImageErrors::CodecNotIncluded(*self))
                }
            }
            ImageFormat::PNG => {
                #[cfg(feature = "png")]
                {
                    Ok(Box::new(pixway_png::PngDecoder::new_with_options(
                        data, options
                    )))
                }
                #[cfg(not(feature = "png"))]
                {
                    Err(ImageErrors::CodecNotIncluded(*self))
                }
            }
            ImageFormat::JPEG => {
                #[cfg(feature = "jpeg")]
                {
                    Ok(Box::new(pixway_jpeg::JpegDecoder::new_with_options(
                        data, options
                    )))
                }
                #[cfg(not(feature = "jpeg"))]
                {
                    Err(ImageErrors::CodecNotIncluded(*self))
                }
            }
        }
    }

    /// Create an encoder for this format
    #[allow(unused_variables)]
    pub fn encoder(&self, options: EncoderOptions) -> Result<Box<dyn EncoderTrait>, ImageErrors> {
        match self {
            ImageFormat::BMP => {
                #[cfg(feature = "bmp")]
                {
                    Ok(Box::new(bmp::BmpEncoder::new_with_options(options)))
                }
                #[cfg(not(feature = "bmp"))]
                {
                    Err(ImageErrors::CodecNotIncluded(*self))
                }
            }
            ImageFormat::PNG => {
                #[cfg(feature = "png")]
                {
                    Ok(Box::new(png::PngEncoder::new_with_options(options)))
                }
                #[cfg(not(feature = "png"))]
                {
                    Err(ImageErrors::CodecNotIncluded(*self))
                }
            }
            ImageFormat::JPEG => {
                #[cfg(feature = "jpeg")]
                {
                    Ok(Box::new(jpeg::JpegEncoder::new_with_options(options)))
                }
                #[cfg(not(feature = "jpeg"))]
                {
                    Err(ImageErrors::CodecNotIncluded(*self))
                }
            }
        }
    }

    /// Decode `data`, which must be in this format
    pub fn decode(&self, data: &[u8], options: DecoderOptions) -> Result<Midway, ImageErrors> {
        let mut decoder = self.decoder_with_options(data, options)?;

        debug!("Decoding with the {} decoder", decoder.name());

        decoder.decode()
    }

    /// Encode `image` into this format
    pub fn encode(&self, image: &Midway, options: EncoderOptions) -> Result<Vec<u8>, ImageErrors> {
        let mut encoder = self.encoder(options)?;

        debug!("Encoding with the {} encoder", encoder.name());

        encoder.encode(image)
    }
}

/// Decode an image of any supported format
///
/// The format is guessed from the first bytes of `data`
pub fn decode(data: &[u8], options: DecoderOptions) -> Result<Midway, ImageErrors> {
    ImageFormat::guess_format(data)?.decode(data, options)
}
