/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! Decoder and encoder options
//!
//! This module exposes structs for which all implemented
//! decoders and encoders get shared options
//!
//! All supported options are put into one struct per direction to allow for global
//! configurations, i.e the same `DecoderOptions` can be reused for all decoders
//!
pub use decoder::{DecoderOptions, DimensionError};
pub use encoder::{ChromaSubsampling, EncoderOptions, JpegEncodeOptions};

mod decoder;
mod encoder;
