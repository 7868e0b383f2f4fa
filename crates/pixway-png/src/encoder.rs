/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

use std::io::Write;

use flate2::write::ZlibEncoder;
use flate2::Compression;
use pixway_core::bytestream::ByteWriter;
use pixway_core::log::trace;
use pixway_core::midway::Midway;

use crate::constants::{IDAT_CHUNK_SIZE, PNG_SIGNATURE};
use crate::enums::PngColor;
use crate::error::PngEncodeErrors;
use crate::filters::{choose_compression_filter, filter_scanline};
use crate::headers::writers::{write_chunk, write_iend, write_ihdr};

const PNG_MAX_DIMENSION: usize = (1 << 31) - 1;

/// A PNG encoder
///
/// Writes 8 bit non-interlaced images, choosing a filter per scanline
///
/// # Usage
/// ```
/// use pixway_core::colorspace::ColorModel;
/// use pixway_core::midway::Midway;
/// use pixway_png::PngEncoder;
///
/// let image = Midway::from_pixel(2, 2, ColorModel::Grayscale, &[128]).unwrap();
/// let bytes = PngEncoder::new(&image).encode().unwrap();
///
/// assert_eq!(&bytes[1..4], b"PNG");
/// ```
pub struct PngEncoder<'a> {
    image:             &'a Midway,
    compression_level: u32
}

impl<'a> PngEncoder<'a> {
    /// Create a new encoder for the image
    pub fn new(image: &'a Midway) -> PngEncoder<'a> {
        PngEncoder {
            image,
            compression_level: 6
        }
    }

    /// Set the deflate compression level, clamped to `0..=9`
    ///
    /// Does not affect the decoded pixels, only file size and speed
    pub fn set_compression_level(mut self, level: u32) -> Self {
        self.compression_level = level.min(9);
        self
    }

    /// Filter every row, each filtered row is prefixed with its filter byte
    fn add_filters(&self) -> Vec<u8> {
        let stride = self.image.row_stride();
        let components = self.image.color_model().num_components();
        let height = self.image.height();

        let mut filtered = vec![0; (stride + 1) * height];
        let mut scratch = Vec::with_capacity(stride + 1);

        // one row above the current processing row
        let mut previous_scanline: &[u8] = &[];

        for (current_scanline, filter_s) in self
            .image
            .rows()
            .zip(filtered.chunks_exact_mut(stride + 1))
        {
            let filter =
                choose_compression_filter(previous_scanline, current_scanline, components, &mut scratch);

            filter_scanline(
                current_scanline,
                previous_scanline,
                filter_s,
                filter,
                components
            );
            previous_scanline = current_scanline;
        }
        filtered
    }

    fn write_idat_chunks(&self, compressed: &[u8], writer: &mut ByteWriter) {
        for chunk in compressed.chunks(IDAT_CHUNK_SIZE) {
            write_chunk(b"IDAT", chunk, writer);
        }
        trace!(
            "Wrote {} bytes of image data in {} IDAT chunks",
            compressed.len(),
            compressed.len().div_ceil(IDAT_CHUNK_SIZE)
        );
    }

    /// Encode the image, returning the png file
    pub fn encode(&self) -> Result<Vec<u8>, PngEncodeErrors> {
        let (width, height) = self.image.dimensions();

        if width > PNG_MAX_DIMENSION {
            return Err(PngEncodeErrors::TooLargeDimensions("width", width));
        }
        if height > PNG_MAX_DIMENSION {
            return Err(PngEncodeErrors::TooLargeDimensions("height", height));
        }
        let color = PngColor::from_model(self.image.color_model());

        let filtered = self.add_filters();

        let mut deflater = ZlibEncoder::new(
            Vec::with_capacity(filtered.len() / 2),
            Compression::new(self.compression_level)
        );
        deflater.write_all(&filtered)?;
        let compressed = deflater.finish()?;

        let mut writer = ByteWriter::with_capacity(compressed.len() + 64);

        writer.write_all(&PNG_SIGNATURE.to_be_bytes());
        write_ihdr(width as u32, height as u32, color, &mut writer);
        self.write_idat_chunks(&compressed, &mut writer);
        write_iend(&mut writer);

        Ok(writer.into_inner())
    }
}
