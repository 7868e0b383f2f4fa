/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

#![cfg(feature = "jpeg")]
//! Baseline JPEG support
use pixway_core::colorspace::ColorModel;
use pixway_core::midway::Midway;
use pixway_core::options::EncoderOptions;
use pixway_jpeg::JpegDecoder;

use crate::codecs::ImageFormat;
use crate::errors::ImageErrors;
use crate::traits::{DecoderTrait, EncoderTrait};

impl<'a> DecoderTrait for JpegDecoder<'a> {
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
        "JPEG Decoder"
    }
}

/// Baseline JPEG encoder
///
/// Quality and chroma subsampling come from the [`EncoderOptions`],
/// alpha is not stored.
#[derive(Copy, Clone, Default)]
pub struct JpegEncoder {
    options: EncoderOptions
}

impl JpegEncoder {
    pub fn new() -> JpegEncoder {
        JpegEncoder::default()
    }

    pub fn new_with_options(options: EncoderOptions) -> JpegEncoder {
        JpegEncoder { options }
    }

    pub const fn options(&self) -> EncoderOptions {
        self.options
    }
}

impl EncoderTrait for JpegEncoder {
    fn name(&self) -> &'static str {
        "JPEG Encoder"
    }

    fn format(&self) -> ImageFormat {
        ImageFormat::JPEG
    }

    fn supported_color_models(&self) -> &'static [ColorModel] {
        &[ColorModel::Grayscale, ColorModel::RGB]
    }

    fn set_options(&mut self, options: EncoderOptions) {
        self.options = options;
    }

    fn encode_inner(&mut self, image: &Midway) -> Result<Vec<u8>, ImageErrors> {
        Ok(pixway_jpeg::JpegEncoder::new(image, self.options).encode()?)
    }
}
