/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! Encoding support for uncompressed BMP files
use alloc::borrow::Cow;
use alloc::vec::Vec;

use pixway_core::bytestream::ByteWriter;
use pixway_core::colorspace::ColorModel;
use pixway_core::log::trace;
use pixway_core::midway::Midway;

use crate::common::{row_stride, FILE_HEADER_SIZE, INFO_HEADER_SIZE, PIXELS_PER_METRE};
use crate::BmpEncoderErrors;

/// A BMP encoder
///
/// RGB images are written as 24 bit files, RGBA as 32 bit files.
/// Grayscale images are expanded to 24 bit since
/// the decoder understands no paletted files.
///
/// Rows are written bottom-up, each padded with zeroes to a multiple of 4 bytes.
pub struct BmpEncoder<'a> {
    image: &'a Midway
}

impl<'a> BmpEncoder<'a> {
    /// Create a new encoder which will encode `image`
    pub fn new(image: &'a Midway) -> BmpEncoder<'a> {
        BmpEncoder { image }
    }

    /// Encode the image returning the encoded file
    pub fn encode(&self) -> Result<Vec<u8>, BmpEncoderErrors> {
        let (width, height) = self.image.dimensions();

        if width > i32::MAX as usize {
            return Err(BmpEncoderErrors::TooLargeDimensions("width", width));
        }
        if height > i32::MAX as usize {
            return Err(BmpEncoderErrors::TooLargeDimensions("height", height));
        }

        let image = match self.image.color_model() {
            ColorModel::Grayscale => Cow::Owned(self.image.to_color_model(ColorModel::RGB)),
            _ => Cow::Borrowed(self.image)
        };
        let components = image.color_model().num_components();
        let depth = components * 8;

        let stride = row_stride(width, depth)
            .ok_or(BmpEncoderErrors::TooLargeDimensions("width", width))?;
        let header_size = FILE_HEADER_SIZE + INFO_HEADER_SIZE;

        let file_size = stride
            .checked_mul(height)
            .and_then(|x| x.checked_add(header_size))
            .ok_or(BmpEncoderErrors::TooLargeFile(usize::MAX))?;

        if file_size > u32::MAX as usize {
            return Err(BmpEncoderErrors::TooLargeFile(file_size));
        }
        trace!("Encoding {}x{} bmp with depth {}", width, height, depth);

        let mut writer = ByteWriter::with_capacity(file_size);

        // file header
        writer.write_all(b"BM");
        writer.write_u32_le(file_size as u32);
        writer.write_u32_le(0);
        writer.write_u32_le(header_size as u32);
        // info header
        writer.write_u32_le(INFO_HEADER_SIZE as u32);
        writer.write_i32_le(width as i32);
        // positive height means bottom-up
        writer.write_i32_le(height as i32);
        writer.write_u16_le(1);
        writer.write_u16_le(depth as u16);
        writer.write_u32_le(0);
        writer.write_u32_le((stride * height) as u32);
        writer.write_i32_le(PIXELS_PER_METRE);
        writer.write_i32_le(PIXELS_PER_METRE);
        // colors used and important colors
        writer.write_u32_le(0);
        writer.write_u32_le(0);

        let padding = stride - width * components;

        for row in image.rows().rev() {
            for pixel in row.chunks_exact(components) {
                writer.write_u8(pixel[2]);
                writer.write_u8(pixel[1]);
                writer.write_u8(pixel[0]);

                if components == 4 {
                    writer.write_u8(pixel[3]);
                }
            }
            writer.write_repeated(0, padding);
        }
        debug_assert_eq!(writer.bytes_written(), file_size);

        Ok(writer.into_inner())
    }
}
