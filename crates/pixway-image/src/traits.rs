/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! Traits every codec wrapper implements
use pixway_core::colorspace::ColorModel;
use pixway_core::log::trace;
use pixway_core::midway::Midway;
use pixway_core::options::EncoderOptions;

use crate::codecs::ImageFormat;
use crate::errors::ImageErrors;

/// Decode an image into a [`Midway`]
pub trait DecoderTrait {
    /// Decode the whole image, reading headers first if needed
    fn decode(&mut self) -> Result<Midway, ImageErrors>;

    /// Read image headers without decoding pixels
    ///
    /// After a successful call [`dimensions`](DecoderTrait::dimensions) and
    /// [`out_color_model`](DecoderTrait::out_color_model) return `Some`
    fn read_headers(&mut self) -> Result<(), ImageErrors>;

    /// Image width and height, `None` before headers are read
    fn dimensions(&self) -> Option<(usize, usize)>;

    /// Color model the decoded image will have, `None` before headers are read
    fn out_color_model(&self) -> Option<ColorModel>;

    /// Name of the decoder
    fn name(&self) -> &'static str;
}

/// Encode a [`Midway`] into a file format
pub trait EncoderTrait {
    /// Name of the encoder
    fn name(&self) -> &'static str;

    /// Format this encoder writes
    fn format(&self) -> ImageFormat;

    /// Color models the encoder accepts without conversion
    fn supported_color_models(&self) -> &'static [ColorModel];

    /// Replace the options used by the next encode
    fn set_options(&mut self, options: EncoderOptions);

    /// Encode an image whose color model is known to be supported
    fn encode_inner(&mut self, image: &Midway) -> Result<Vec<u8>, ImageErrors>;

    /// Encode an image
    ///
    /// Images in a color model the encoder does not accept are converted
    /// to the closest supported model, gray stays gray where possible and
    /// alpha is dropped or added only when no better match exists.
    fn encode(&mut self, image: &Midway) -> Result<Vec<u8>, ImageErrors> {
        let model = image.color_model();
        let supported = self.supported_color_models();

        if supported.contains(&model) {
            return self.encode_inner(image);
        }
        let same_gray = |x: &ColorModel| x.is_grayscale() == model.is_grayscale();

        let target = supported
            .iter()
            .copied()
            .find(|x| same_gray(x) && x.has_alpha() == model.has_alpha())
            .or_else(|| supported.iter().copied().find(same_gray))
            .or_else(|| supported.first().copied())
            .unwrap_or(model);

        trace!(
            "{} encoder: converting {:?} to {:?} before encoding",
            self.name(),
            model,
            target
        );
        let converted = image.to_color_model(target);

        self.encode_inner(&converted)
    }
}
