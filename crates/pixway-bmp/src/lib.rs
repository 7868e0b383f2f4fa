/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */
//! An uncompressed BMP decoder and encoder
//!
//! # Supported formats
//! - 24 bit BGR images
//! - 32 bit BGRA images
//! - Bottom-up (the common case) and top-down row orders
//! - Info headers of 40 bytes or more (`BITMAPINFOHEADER` and its V4/V5 extensions)
//!
//! # Unsupported formats
//! - Compressed images (RLE, bitfields, embedded PNG and JPEGs)
//! - Paletted and 16 bit images
//!
//! Unsupported images are reported as errors, never decoded partially.
//!
//! # Example
//! ```
//! use pixway_bmp::{BmpDecoder, BmpEncoder};
//! use pixway_core::colorspace::ColorModel;
//! use pixway_core::midway::Midway;
//!
//! let image = Midway::from_pixel(2, 2, ColorModel::RGB, &[255, 0, 0]).unwrap();
//! let bytes = BmpEncoder::new(&image).encode().unwrap();
//!
//! let decoded = BmpDecoder::new(&bytes).decode().unwrap();
//! assert_eq!(decoded, image);
//! ```
#![cfg_attr(not(feature = "std"), no_std)]
#![macro_use]
extern crate alloc;

pub use crate::common::row_stride;
pub use crate::decoder::{probe_bmp, BmpDecoder};
pub use crate::encoder::BmpEncoder;
pub use crate::errors::{BmpDecoderErrors, BmpEncoderErrors};

mod common;
mod decoder;
mod encoder;
mod errors;
