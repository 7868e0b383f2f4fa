/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

use std::fmt::{Debug, Display, Formatter};
use std::path::PathBuf;

use pixway_image::errors::ImageErrors;

/// Errors the command line driver reports
pub enum CmdErrors {
    /// Decoding or encoding failed
    ImageErrors(ImageErrors),
    /// Reading or writing a file failed
    IoErrors(PathBuf, std::io::Error),
    /// A required argument was not given
    MissingArgument(&'static str),
    /// The output path has no extension to choose an encoder from
    NoExtension(PathBuf),
    /// Input and output point to the same file
    SameFile(PathBuf)
}

impl Debug for CmdErrors {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::ImageErrors(err) => write!(f, "{err:?}"),
            Self::IoErrors(path, err) => write!(f, "{}: {err}", path.display()),
            Self::MissingArgument(name) => {
                write!(f, "Missing {name} file, pass it with --{name} or as a positional argument")
            }
            Self::NoExtension(path) => write!(
                f,
                "Cannot tell output format of {}, it has no extension",
                path.display()
            ),
            Self::SameFile(path) => write!(
                f,
                "Cannot use {} as both input and output",
                path.display()
            )
        }
    }
}

impl Display for CmdErrors {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{self:?}")
    }
}

impl std::error::Error for CmdErrors {}

impl From<ImageErrors> for CmdErrors {
    fn from(value: ImageErrors) -> Self {
        CmdErrors::ImageErrors(value)
    }
}
