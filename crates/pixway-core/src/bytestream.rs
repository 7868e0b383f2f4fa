/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! A simple implementation of a bytestream reader
//! and writer.
//!
//! The reader walks an in memory buffer with bounds checked,
//! endian aware reads, the writer appends to a growable vector
//! and can patch bytes it has already written.
pub use reader::{ByteIoError, ByteReader};
pub use writer::ByteWriter;

mod reader;
mod writer;
