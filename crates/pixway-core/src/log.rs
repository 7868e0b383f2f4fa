/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! Logging macros used by the codecs
//!
//! All codecs log via the `log` facade, this module re-exports
//! its macros so that codec crates share one path for them.
pub use log::{debug, error, info, log_enabled, trace, warn, Level};
