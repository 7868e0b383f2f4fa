/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

/// Chroma subsampling applied by the jpeg encoder
#[derive(Debug, Copy, Clone, Eq, PartialEq, Default)]
pub enum ChromaSubsampling {
    /// Chroma is stored at quarter resolution, one sample per 2x2 luma block
    #[default]
    Yuv420,
    /// Chroma is stored at full resolution
    Yuv444
}

impl ChromaSubsampling {
    /// Horizontal and vertical sampling factors of the luma component
    ///
    /// Chroma components always use `(1, 1)`
    pub const fn luma_sampling_factors(self) -> (usize, usize) {
        match self {
            ChromaSubsampling::Yuv420 => (2, 2),
            ChromaSubsampling::Yuv444 => (1, 1)
        }
    }
}

/// Options respected by the jpeg encoder only
#[derive(Debug, Copy, Clone, Default)]
pub struct JpegEncodeOptions {
    subsampling: ChromaSubsampling
}

impl JpegEncodeOptions {
    pub const fn get_subsampling(&self) -> ChromaSubsampling {
        self.subsampling
    }

    pub fn set_subsampling(mut self, subsampling: ChromaSubsampling) -> Self {
        self.subsampling = subsampling;
        self
    }
}

/// Encoder options that are flags
///
/// Dimensions and color model travel with the image,
/// these only steer how it is written.
#[derive(Debug, Copy, Clone)]
pub struct EncoderOptions {
    quality:      u8,
    jpeg_options: JpegEncodeOptions
}

impl Default for EncoderOptions {
    fn default() -> Self {
        Self {
            quality:      50,
            jpeg_options: JpegEncodeOptions::default()
        }
    }
}

impl EncoderOptions {
    /// Get the quality for lossy encoders, in `1..=100`
    ///
    /// A quality of 50 uses the standard quantization tables as is
    ///
    /// - Respected by: `jpeg`
    pub const fn get_quality(&self) -> u8 {
        self.quality
    }

    /// Set the quality for lossy encoders
    ///
    /// Values are clamped into `1..=100`
    pub fn set_quality(mut self, quality: u8) -> Self {
        self.quality = quality.clamp(1, 100);
        self
    }

    pub const fn jpeg_get_subsampling(&self) -> ChromaSubsampling {
        self.jpeg_options.get_subsampling()
    }

    pub fn jpeg_set_subsampling(mut self, subsampling: ChromaSubsampling) -> Self {
        self.jpeg_options = self.jpeg_options.set_subsampling(subsampling);
        self
    }

    pub const fn jpeg_encode_options(&self) -> JpegEncodeOptions {
        self.jpeg_options
    }
}
