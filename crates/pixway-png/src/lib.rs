/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! A png decoder and encoder
//!
//! This features a simple PNG reader and writer for 8 bit
//! grayscale and truecolor images, with or without alpha.
//!
//! # Features
//! - CRC-32 confirmation of every chunk
//! - Adaptive per-scanline filter selection when encoding
//! - Gray with alpha images are expanded to RGBA on decode
//!
//! # Unsupported
//! - Interlaced images
//! - Paletted images
//! - Bit depths other than 8
//!
//! These are reported as errors, never decoded partially.
//!
//! # Example
//! ```
//! use pixway_core::colorspace::ColorModel;
//! use pixway_core::midway::Midway;
//! use pixway_png::{PngDecoder, PngEncoder};
//!
//! let image = Midway::from_pixel(4, 3, ColorModel::RGBA, &[1, 2, 3, 4]).unwrap();
//! let bytes = PngEncoder::new(&image).encode().unwrap();
//!
//! let decoded = PngDecoder::new(&bytes).decode().unwrap();
//! assert_eq!(decoded, image);
//! ```

pub use decoder::{PngDecoder, PngInfo};
pub use encoder::PngEncoder;
pub use enums::{FilterMethod, InterlaceMethod, PngColor};
pub use error::{PngDecodeErrors, PngEncodeErrors};
pub use filters::{filter_scanline, unfilter_scanline};

mod constants;
pub mod crc;
mod decoder;
mod encoder;
mod enums;
mod error;
mod filters;
mod headers;
