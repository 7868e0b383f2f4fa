/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

/// Size of the `BITMAPFILEHEADER`
pub(crate) const FILE_HEADER_SIZE: usize = 14;
/// Size of the `BITMAPINFOHEADER`, the smallest info header we accept
pub(crate) const INFO_HEADER_SIZE: usize = 40;
/// 72 DPI expressed in pixels per metre
pub(crate) const PIXELS_PER_METRE: i32 = 2835;

#[derive(Debug, Eq, PartialEq, Copy, Clone)]
pub enum BmpCompression {
    RGB,
    RLE8,
    RLE4,
    BITFIELDS,
    JPEG,
    PNG,
    ALPHABITFIELDS
}

impl BmpCompression {
    pub fn from_u32(num: u32) -> Option<BmpCompression> {
        match num {
            0 => Some(BmpCompression::RGB),
            1 => Some(BmpCompression::RLE8),
            2 => Some(BmpCompression::RLE4),
            3 => Some(BmpCompression::BITFIELDS),
            4 => Some(BmpCompression::JPEG),
            5 => Some(BmpCompression::PNG),
            6 => Some(BmpCompression::ALPHABITFIELDS),
            _ => None
        }
    }
}

/// Length in bytes of one stored row
///
/// Rows are padded to a multiple of four bytes, i.e
/// `ceil(width * bits_per_pixel / 32) * 4`.
///
/// Returns `None` if the computation overflows
pub const fn row_stride(width: usize, bits_per_pixel: usize) -> Option<usize> {
    match width.checked_mul(bits_per_pixel) {
        Some(bits) => match bits.checked_add(31) {
            Some(bits) => Some((bits / 32) * 4),
            None => None
        },
        None => None
    }
}
