/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! The decoded pixel buffer shared by every codec
//!
//! A [`Midway`] is what a decoder hands out and what an encoder takes in,
//! it carries the dimensions, the color model and the raw interleaved
//! 8-bit samples stored row by row, top row first.
use alloc::vec::Vec;
use core::fmt::{Debug, Display, Formatter};
use core::slice::ChunksExact;

use crate::colorspace::ColorModel;
use crate::errors::ErrorKind;

/// Errors raised when constructing a [`Midway`] from parts
pub enum MidwayErrors {
    /// Width or height is zero
    ZeroDimensions(usize, usize),
    /// `width*height*components` does not fit in a usize
    DimensionsOverflow(usize, usize),
    /// Pixel buffer length does not match the dimensions
    ///
    /// # Arguments
    /// - 1st argument is the expected length
    /// - 2nd argument is the length found
    BufferSizeMismatch(usize, usize),
    /// A row has a different length from `width*components`
    ///
    /// # Arguments
    /// - row index
    /// - expected length
    /// - found length
    RaggedRow(usize, usize, usize)
}

impl MidwayErrors {
    pub const fn kind(&self) -> ErrorKind {
        match self {
            MidwayErrors::DimensionsOverflow(..) => ErrorKind::Resource,
            _ => ErrorKind::Format
        }
    }
}

impl Debug for MidwayErrors {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        match self {
            MidwayErrors::ZeroDimensions(w, h) => {
                writeln!(f, "Image dimensions must be non zero, found {w}x{h}")
            }
            MidwayErrors::DimensionsOverflow(w, h) => {
                writeln!(f, "Dimensions {w}x{h} overflow the addressable size")
            }
            MidwayErrors::BufferSizeMismatch(expected, found) => {
                writeln!(
                    f,
                    "Pixel buffer has {found} bytes but the dimensions require {expected}"
                )
            }
            MidwayErrors::RaggedRow(row, expected, found) => {
                writeln!(f, "Row {row} has {found} bytes, expected {expected}")
            }
        }
    }
}

impl Display for MidwayErrors {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        write!(f, "{:?}", self)
    }
}

#[cfg(feature = "std")]
impl std::error::Error for MidwayErrors {}

/// A decoded image
///
/// Invariants upheld by every constructor
/// - `width` and `height` are non zero
/// - `pixels.len() == width * height * model.num_components()`
///
/// Hence the buffer always holds exactly `height` rows of identical length.
#[derive(Clone, PartialEq, Eq)]
pub struct Midway {
    width:  usize,
    height: usize,
    model:  ColorModel,
    pixels: Vec<u8>
}

impl Midway {
    /// Create an image from an interleaved buffer
    ///
    /// # Arguments
    /// - width, height: Image dimensions, must be non zero
    /// - model: Color model of the pixels
    /// - pixels: Row-major interleaved samples, top row first
    pub fn new(
        width: usize, height: usize, model: ColorModel, pixels: Vec<u8>
    ) -> Result<Midway, MidwayErrors> {
        let expected = Self::buffer_size(width, height, model)?;

        if pixels.len() != expected {
            return Err(MidwayErrors::BufferSizeMismatch(expected, pixels.len()));
        }
        Ok(Midway {
            width,
            height,
            model,
            pixels
        })
    }

    /// Create an image from a list of rows
    ///
    /// Every row must hold `width * model.num_components()` bytes
    pub fn from_rows<R: AsRef<[u8]>>(
        width: usize, model: ColorModel, rows: &[R]
    ) -> Result<Midway, MidwayErrors> {
        let height = rows.len();
        let expected = Self::buffer_size(width, height, model)?;
        let stride = width * model.num_components();

        let mut pixels = Vec::with_capacity(expected);

        for (pos, row) in rows.iter().enumerate() {
            let row = row.as_ref();

            if row.len() != stride {
                return Err(MidwayErrors::RaggedRow(pos, stride, row.len()));
            }
            pixels.extend_from_slice(row);
        }
        Self::new(width, height, model, pixels)
    }

    /// Create an image where every pixel has the same value
    ///
    /// `pixel` must have `model.num_components()` samples
    pub fn from_pixel(
        width: usize, height: usize, model: ColorModel, pixel: &[u8]
    ) -> Result<Midway, MidwayErrors> {
        let expected = Self::buffer_size(width, height, model)?;

        if pixel.len() != model.num_components() {
            return Err(MidwayErrors::BufferSizeMismatch(
                model.num_components(),
                pixel.len()
            ));
        }
        let pixels = pixel.iter().copied().cycle().take(expected).collect();

        Self::new(width, height, model, pixels)
    }

    /// Number of bytes a `width` by `height` image in `model` occupies
    pub fn buffer_size(
        width: usize, height: usize, model: ColorModel
    ) -> Result<usize, MidwayErrors> {
        if width == 0 || height == 0 {
            return Err(MidwayErrors::ZeroDimensions(width, height));
        }
        width
            .checked_mul(height)
            .and_then(|x| x.checked_mul(model.num_components()))
            .ok_or(MidwayErrors::DimensionsOverflow(width, height))
    }

    pub const fn width(&self) -> usize {
        self.width
    }

    pub const fn height(&self) -> usize {
        self.height
    }

    /// Return `(width, height)`
    pub const fn dimensions(&self) -> (usize, usize) {
        (self.width, self.height)
    }

    pub const fn color_model(&self) -> ColorModel {
        self.model
    }

    /// Length of a single row in bytes
    pub const fn row_stride(&self) -> usize {
        self.width * self.model.num_components()
    }

    /// Return row `y`, `None` if `y` is out of bounds
    pub fn row(&self, y: usize) -> Option<&[u8]> {
        let stride = self.row_stride();
        self.pixels.get(y * stride..(y + 1) * stride)
    }

    /// Iterate over rows from top to bottom
    pub fn rows(&self) -> ChunksExact<'_, u8> {
        self.pixels.chunks_exact(self.row_stride())
    }

    /// Return the samples of pixel `(x, y)`
    pub fn pixel(&self, x: usize, y: usize) -> Option<&[u8]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let comps = self.model.num_components();
        let start = y * self.row_stride() + x * comps;
        self.pixels.get(start..start + comps)
    }

    /// All samples, row-major
    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }

    /// Destroy the image returning the underlying samples
    pub fn into_pixels(self) -> Vec<u8> {
        self.pixels
    }

    /// Return a copy of this image in a different color model
    ///
    /// - Grayscale is replicated into every color channel
    /// - Color to grayscale uses BT.601 luma weights
    /// - Added alpha is fully opaque, removed alpha is discarded
    pub fn to_color_model(&self, model: ColorModel) -> Midway {
        if model == self.model {
            return self.clone();
        }
        let in_comps = self.model.num_components();
        let out_comps = model.num_components();

        let mut pixels = Vec::with_capacity(self.width * self.height * out_comps);

        for pix in self.pixels.chunks_exact(in_comps) {
            let (r, g, b, a) = match self.model {
                ColorModel::Grayscale => (pix[0], pix[0], pix[0], 255),
                ColorModel::RGB => (pix[0], pix[1], pix[2], 255),
                ColorModel::RGBA => (pix[0], pix[1], pix[2], pix[3])
            };
            match model {
                ColorModel::Grayscale => pixels.push(luma(r, g, b)),
                ColorModel::RGB => pixels.extend_from_slice(&[r, g, b]),
                ColorModel::RGBA => pixels.extend_from_slice(&[r, g, b, a])
            }
        }
        Midway {
            width: self.width,
            height: self.height,
            model,
            pixels
        }
    }
}

/// BT.601 luma with 8 bits of fixed point precision
#[inline]
fn luma(r: u8, g: u8, b: u8) -> u8 {
    ((77 * u32::from(r) + 150 * u32::from(g) + 29 * u32::from(b) + 128) >> 8) as u8
}

impl Debug for Midway {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Midway")
            .field("width", &self.width)
            .field("height", &self.height)
            .field("model", &self.model)
            .field("bytes", &self.pixels.len())
            .finish()
    }
}
