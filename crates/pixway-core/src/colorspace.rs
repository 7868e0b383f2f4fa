/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! Image color model information.

/// All color models a [`Midway`](crate::midway::Midway) buffer can hold.
///
/// Every model stores 8 bits per sample, samples of a pixel are interleaved.
#[allow(clippy::upper_case_acronyms)]
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum ColorModel {
    /// Single luminance channel
    Grayscale,
    /// Red, Green, Blue
    RGB,
    /// Red, Green, Blue, Alpha
    RGBA
}

impl ColorModel {
    /// Number of color channels present for a certain color model
    ///
    /// E.g. RGB returns 3 since it contains R,G and B colors to make up a pixel
    pub const fn num_components(&self) -> usize {
        match self {
            Self::Grayscale => 1,
            Self::RGB => 3,
            Self::RGBA => 4
        }
    }

    pub const fn has_alpha(&self) -> bool {
        matches!(self, Self::RGBA)
    }

    pub const fn is_grayscale(&self) -> bool {
        matches!(self, Self::Grayscale)
    }

    /// Map a channel count to the model storing that many samples per pixel
    pub const fn from_components(components: usize) -> Option<ColorModel> {
        match components {
            1 => Some(Self::Grayscale),
            3 => Some(Self::RGB),
            4 => Some(Self::RGBA),
            _ => None
        }
    }
}

/// Encapsulates all color models supported by the library
pub static ALL_COLOR_MODELS: [ColorModel; 3] =
    [ColorModel::Grayscale, ColorModel::RGB, ColorModel::RGBA];
