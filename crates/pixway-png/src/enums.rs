/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */
#![allow(clippy::upper_case_acronyms, non_camel_case_types)]

use pixway_core::colorspace::ColorModel;

/// Chunk types the decoder acts on, see
/// table 5.3 of <https://www.w3.org/TR/2003/REC-PNG-20031110/>
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum PngChunkType {
    IHDR,
    PLTE,
    IDAT,
    IEND,
    unkn
}

impl PngChunkType {
    pub fn from_bytes(chunk: &[u8; 4]) -> PngChunkType {
        match chunk {
            b"IHDR" => PngChunkType::IHDR,
            b"PLTE" => PngChunkType::PLTE,
            b"IDAT" => PngChunkType::IDAT,
            b"IEND" => PngChunkType::IEND,
            _ => PngChunkType::unkn
        }
    }
}

/// Filter types applied to a single scanline
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum FilterMethod {
    None,
    Sub,
    Up,
    Average,
    Paeth
}

impl FilterMethod {
    /// All filters in the order they are tried when encoding,
    /// ties are resolved in favour of the earlier one
    pub const ALL: [FilterMethod; 5] = [
        FilterMethod::None,
        FilterMethod::Sub,
        FilterMethod::Up,
        FilterMethod::Average,
        FilterMethod::Paeth
    ];

    pub fn from_int(int: u8) -> Option<FilterMethod> {
        match int {
            0 => Some(FilterMethod::None),
            1 => Some(FilterMethod::Sub),
            2 => Some(FilterMethod::Up),
            3 => Some(FilterMethod::Average),
            4 => Some(FilterMethod::Paeth),
            _ => None
        }
    }

    pub const fn to_int(self) -> u8 {
        match self {
            FilterMethod::None => 0,
            FilterMethod::Sub => 1,
            FilterMethod::Up => 2,
            FilterMethod::Average => 3,
            FilterMethod::Paeth => 4
        }
    }
}

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum InterlaceMethod {
    Standard,
    Adam7
}

impl InterlaceMethod {
    pub fn from_int(int: u8) -> Option<InterlaceMethod> {
        match int {
            0 => Some(Self::Standard),
            1 => Some(Self::Adam7),
            _ => None
        }
    }
}

/// Color types a png header can declare
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum PngColor {
    Luma,
    Palette,
    LumaA,
    RGB,
    RGBA
}

impl PngColor {
    /// Samples per pixel stored in the file
    pub const fn num_components(self) -> usize {
        match self {
            PngColor::Luma | PngColor::Palette => 1,
            PngColor::LumaA => 2,
            PngColor::RGB => 3,
            PngColor::RGBA => 4
        }
    }

    pub fn from_int(int: u8) -> Option<PngColor> {
        match int {
            0 => Some(Self::Luma),
            2 => Some(Self::RGB),
            3 => Some(Self::Palette),
            4 => Some(Self::LumaA),
            6 => Some(Self::RGBA),
            _ => None
        }
    }

    pub const fn to_int(self) -> u8 {
        match self {
            Self::Luma => 0,
            Self::RGB => 2,
            Self::Palette => 3,
            Self::LumaA => 4,
            Self::RGBA => 6
        }
    }

    /// The model decoded pixels are handed out in
    ///
    /// Gray with alpha has no model of its own and is widened to RGBA,
    /// palette images are never decoded.
    pub const fn output_model(self) -> ColorModel {
        match self {
            PngColor::Luma => ColorModel::Grayscale,
            PngColor::RGB | PngColor::Palette => ColorModel::RGB,
            PngColor::LumaA | PngColor::RGBA => ColorModel::RGBA
        }
    }

    /// The color type used to store a model
    pub const fn from_model(model: ColorModel) -> PngColor {
        match model {
            ColorModel::Grayscale => PngColor::Luma,
            ColorModel::RGB => PngColor::RGB,
            ColorModel::RGBA => PngColor::RGBA
        }
    }
}
