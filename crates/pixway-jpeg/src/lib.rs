/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! A baseline JPEG decoder and encoder
//!
//! This crate reads and writes ITU-T T.81 (JPEG-1) images that use
//! sequential DCT with Huffman coding and 8 bit samples.
//!
//! # Features
//! - Grayscale and YCbCr images, with sampling factors up to 2
//! - Restart intervals when decoding and encoding
//! - Multiple scans in a sequential image
//! - 4:2:0 or 4:4:4 chroma subsampling when encoding
//! - Caller supplied quantization and Huffman tables
//!
//! # Unsupported
//! - Progressive, lossless, hierarchical and arithmetic coded images
//! - 12 bit precision
//! - CMYK and other four component images
//!
//! These are reported as [`UnsupportedSchemes`], never decoded partially.
//!
//! # Examples
//!
//! ## Encode and decode an image
//! ```
//! use pixway_core::colorspace::ColorModel;
//! use pixway_core::midway::Midway;
//! use pixway_core::options::EncoderOptions;
//! use pixway_jpeg::{JpegDecoder, JpegEncoder};
//!
//! let image = Midway::from_pixel(20, 10, ColorModel::RGB, &[40, 90, 200]).unwrap();
//! let bytes = JpegEncoder::new(&image, EncoderOptions::default()).encode().unwrap();
//!
//! let decoded = JpegDecoder::new(&bytes).decode().unwrap();
//! assert_eq!(decoded.dimensions(), (20, 10));
//! ```
//!
//! ## Read image information without decoding
//! ```no_run
//! use pixway_jpeg::JpegDecoder;
//!
//! let data = std::fs::read("a_jpeg_file").unwrap();
//! let mut decoder = JpegDecoder::new(&data);
//!
//! decoder.decode_headers().unwrap();
//! let info = decoder.info().unwrap();
//! println!("{},{}", info.width, info.height);
//! ```
//!
//! The decoder tries to decode images that bend the standard in harmless ways,
//! such as extra bytes between segments or a missing restart marker, logging a
//! warning. Enable strict mode in `DecoderOptions` to reject them instead.
//! A stream without an EOI marker is always rejected.
#![cfg_attr(not(feature = "std"), no_std)]
#![allow(
    clippy::needless_return,
    clippy::similar_names,
    clippy::module_name_repetitions
)]

extern crate alloc;

pub use decoder::{ImageInfo, JpegDecoder};
pub use encoder::huffman::{HuffmanSpec, HuffmanTables};
pub use encoder::JpegEncoder;
pub use errors::{DecodeErrors, EncodeErrors, UnsupportedSchemes};

mod bitstream;
mod color_convert;
mod components;
mod decoder;
mod encoder;
pub mod errors;
mod headers;
mod huffman;
mod idct;
mod marker;
mod mcu;
mod misc;
mod upsampler;
