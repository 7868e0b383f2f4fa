/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

#![cfg(feature = "png")]
//! Portable Network Graphics support
use pixway_core::colorspace::{ColorModel, ALL_COLOR_MODELS};
use pixway_core::midway::Midway;
use pixway_core::options::EncoderOptions;
use pixway_png::PngDecoder;

use crate::codecs::ImageFormat;
use crate::errors::ImageErrors;
use crate::traits::{DecoderTrait, EncoderTrait};

impl<'a> DecoderTrait for PngDecoder<'a> {
    fn decode(&mut self) -> Result<Midway, ImageErrors> {
        Ok(self.decode()?)
    }

    fn read_headers(&mut self) -> Result<(), ImageErrors> {
        Ok(self.decode_headers()?)
    }

    fn dimensions(&self) -> Option<(usize, usize)> {
        self.dimensions()
    }

    fn out_color_model(&self) -> Option<ColorModel> {
        self.color_model()
    }

    fn name(&self) -> &'static str {
        "PNG Decoder"
    }
}

/// Deflate level used by [`PngEncoder`] unless changed
const DEFAULT_COMPRESSION_LEVEL: u32 = 6;

/// Png encoder
#[derive(Copy, Clone)]
pub struct PngEncoder {
    options:           EncoderOptions,
    compression_level: u32
}

impl Default for PngEncoder {
    fn default() -> Self {
        PngEncoder::new_with_options(EncoderOptions::default())
    }
}

impl PngEncoder {
    pub fn new() -> PngEncoder {
        PngEncoder::default()
    }

    pub fn new_with_options(options: EncoderOptions) -> PngEncoder {
        PngEncoder {
            options,
            compression_level: DEFAULT_COMPRESSION_LEVEL
        }
    }

    /// Set the deflate level, see [`pixway_png::PngEncoder::set_compression_level`]
    pub fn set_compression_level(mut self, level: u32) -> Self {
        self.compression_level = level;
        self
    }

    pub const fn options(&self) -> EncoderOptions {
        self.options
    }
}

impl EncoderTrait for PngEncoder {
    fn name(&self) -> &'static str {
        "PNG Encoder"
    }

    fn format(&self) -> ImageFormat {
        ImageFormat::PNG
    }

    fn supported_color_models(&self) -> &'static [ColorModel] {
        &ALL_COLOR_MODELS
    }

    fn set_options(&mut self, options: EncoderOptions) {
        self.options = options;
    }

    fn encode_inner(&mut self, image: &Midway) -> Result<Vec<u8>, ImageErrors> {
        let encoder =
            pixway_png::PngEncoder::new(image).set_compression_level(self.compression_level);

        Ok(encoder.encode()?)
    }
}
