/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

#![cfg(feature = "bmp")]
//! Windows bitmap support
use pixway_bmp::BmpDecoder;
use pixway_core::colorspace::ColorModel;
use pixway_core::midway::Midway;
use pixway_core::options::EncoderOptions;

use crate::codecs::ImageFormat;
use crate::errors::ImageErrors;
use crate::traits::{DecoderTrait, EncoderTrait};

impl<'a> DecoderTrait for BmpDecoder<'a> {
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
        "BMP Decoder"
    }
}

/// Bitmap encoder
///
/// Bitmaps carry no options, the stored options are kept only to
/// satisfy [`EncoderTrait`].
#[derive(Copy, Clone, Default)]
pub struct BmpEncoder {
    options: EncoderOptions
}

impl BmpEncoder {
    pub fn new() -> BmpEncoder {
        BmpEncoder::default()
    }

    pub fn new_with_options(options: EncoderOptions) -> BmpEncoder {
        BmpEncoder { options }
    }

    pub const fn options(&self) -> EncoderOptions {
        self.options
    }
}

impl EncoderTrait for BmpEncoder {
    fn name(&self) -> &'static str {
        "BMP Encoder"
    }

    fn format(&self) -> ImageFormat {
        ImageFormat::BMP
    }

    fn supported_color_models(&self) -> &'static [ColorModel] {
        &[ColorModel::RGB, ColorModel::RGBA]
    }

    fn set_options(&mut self, options: EncoderOptions) {
        self.options = options;
    }

    fn encode_inner(&mut self, image: &Midway) -> Result<Vec<u8>, ImageErrors> {
        Ok(pixway_bmp::BmpEncoder::new(image).encode()?)
    }
}
