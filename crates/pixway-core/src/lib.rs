/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! Core routines shared by all pixway codecs
//!
//! This crate provides a set of core routines shared
//! by the decoders and encoders under the `pixway` umbrella
//!
//! It currently contains
//!
//! - [`Midway`](midway::Midway), the decoded pixel buffer every decoder produces
//!   and every encoder consumes
//! - A bytestream reader and writer with endian aware reads and writes
//! - Color model information shared by images
//! - Image decoder and encoder options
//! - A classification of codec errors shared by all codecs
//!
#![cfg_attr(not(feature = "std"), no_std)]
#![macro_use]
extern crate alloc;

pub mod bytestream;
pub mod colorspace;
pub mod errors;
pub mod log;
pub mod midway;
pub mod options;
