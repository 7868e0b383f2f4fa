/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! One interface over the pixway codecs
//!
//! Every codec decodes into and encodes from a [`Midway`](pixway_core::midway::Midway).
//! This crate picks the codec, either from the first bytes of a file
//! or from a file extension, and hands the work to it.
//!
//! # Example
//! ```
//! use pixway_core::colorspace::ColorModel;
//! use pixway_core::midway::Midway;
//! use pixway_core::options::{DecoderOptions, EncoderOptions};
//! use pixway_image::codecs::ImageFormat;
//!
//! let image = Midway::from_pixel(2, 2, ColorModel::RGB, &[255, 0, 0]).unwrap();
//!
//! let format = ImageFormat::from_extension("png").unwrap();
//! let bytes = format.encode(&image, EncoderOptions::default()).unwrap();
//!
//! let decoded = pixway_image::codecs::decode(&bytes, DecoderOptions::default()).unwrap();
//! assert_eq!(decoded, image);
//! ```
//!
//! # Features
//! Each codec sits behind a feature of the same name, all are enabled by default.
//! - `bmp`
//! - `png`
//! - `jpeg`
pub mod codecs;
pub mod errors;
pub mod traits;
