/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! Classification shared by all codec errors
//!
//! Each codec has its own error enum carrying the details of what went wrong,
//! and every one of them can be classified into an [`ErrorKind`] so callers
//! can react to a failure without knowing which codec produced it.
use core::fmt::{Display, Formatter};

/// Broad category of a codec failure
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum ErrorKind {
    /// Malformed container, bad signature or markers in the wrong order
    Format,
    /// A syntactically valid file using a variant the codecs do not implement,
    /// e.g progressive jpeg, interlaced png or compressed bmp
    UnsupportedFeature,
    /// Checksum mismatch, invalid entropy coded data or a truncated buffer
    Corruption,
    /// Declared dimensions exceed the configured limits
    Resource
}

impl Display for ErrorKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        let name = match self {
            ErrorKind::Format => "format error",
            ErrorKind::UnsupportedFeature => "unsupported feature",
            ErrorKind::Corruption => "corrupt data",
            ErrorKind::Resource => "resource limit exceeded"
        };
        f.write_str(name)
    }
}
