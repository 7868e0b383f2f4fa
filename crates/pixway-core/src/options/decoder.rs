/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

/// A dimension which went above its configured limit
///
/// Decoders convert this into their own error type
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct DimensionError {
    /// Which dimension failed, `"width"`, `"height"` or `"pixels"`
    pub dimension: &'static str,
    /// The configured limit
    pub limit:     usize,
    /// The value declared by the image
    pub found:     usize
}

/// Decoder options
///
/// Not all options are respected by decoders
/// Each option specifies decoders that respect it
#[derive(Debug, Copy, Clone)]
pub struct DecoderOptions {
    /// Maximum width for which decoders will
    /// not try to decode images larger than
    /// the specified width.
    ///
    /// - Default value: 16384
    /// - Respected by: `all decoders`
    max_width:            usize,
    /// Maximum height for which decoders will not
    /// try to decode images larger than the
    /// specified height
    ///
    /// - Default value: 16384
    /// - Respected by: `all decoders`
    max_height:           usize,
    /// Maximum value of `width*height`
    ///
    /// - Default value: 2^28
    /// - Respected by: `all decoders`
    max_pixels:           usize,
    /// treat some warnings as errors
    ///
    /// Some images may have recoverable errors
    /// but sometimes decoders may wish to have a more standard
    /// conforming decoder which would error out on encountering such images
    ///
    /// When set to false, this logs errors via the log crate.
    ///
    /// - Default value: false,
    /// - Respected by: `bmp`, `jpeg`, `png`
    strict_mode:          bool,
    /// Whether the png decoder verifies chunk crc's
    ///
    /// - Default value: true
    /// - Respected by: `png`
    png_confirm_crc:      bool,
    /// Whether the png decoder verifies the zlib adler32 checksum
    ///
    /// - Default value: false, always confirmed in strict mode
    /// - Respected by: `png`
    inflate_confirm_adler: bool
}

impl Default for DecoderOptions {
    fn default() -> Self {
        Self {
            max_width:             1 << 14,
            max_height:            1 << 14,
            max_pixels:            1 << 28,
            strict_mode:           false,
            png_confirm_crc:       true,
            inflate_confirm_adler: false
        }
    }
}

impl DecoderOptions {
    /// Options used by the command line driver
    ///
    /// Strict mode is turned off, limits are left at their defaults
    pub fn new_cmd() -> DecoderOptions {
        DecoderOptions::default()
    }

    pub const fn get_max_width(&self) -> usize {
        self.max_width
    }

    pub const fn get_max_height(&self) -> usize {
        self.max_height
    }

    pub const fn get_max_pixels(&self) -> usize {
        self.max_pixels
    }

    pub const fn get_strict_mode(&self) -> bool {
        self.strict_mode
    }

    /// Set maximum width for which the decoder should not try
    /// decoding images greater than that width
    pub fn set_max_width(mut self, width: usize) -> Self {
        self.max_width = width;
        self
    }

    /// Set maximum height for which the decoder should not try
    /// decoding images greater than that height
    pub fn set_max_height(mut self, height: usize) -> Self {
        self.max_height = height;
        self
    }

    /// Set the maximum number of pixels an image may declare
    pub fn set_max_pixels(mut self, pixels: usize) -> Self {
        self.max_pixels = pixels;
        self
    }

    /// Set whether the decoder should be in strict mode
    ///
    /// In strict mode recoverable oddities in a file become errors
    pub fn set_strict_mode(mut self, yes: bool) -> Self {
        self.strict_mode = yes;
        self
    }

    pub const fn png_get_confirm_crc(&self) -> bool {
        self.png_confirm_crc
    }

    pub fn png_set_confirm_crc(mut self, yes: bool) -> Self {
        self.png_confirm_crc = yes;
        self
    }

    pub const fn inflate_get_confirm_adler(&self) -> bool {
        self.inflate_confirm_adler || self.strict_mode
    }

    pub fn inflate_set_confirm_adler(mut self, yes: bool) -> Self {
        self.inflate_confirm_adler = yes;
        self
    }

    /// Check declared image dimensions against the configured limits
    ///
    /// Decoders call this before allocating any buffer sized from the header
    pub fn check_dimensions(&self, width: usize, height: usize) -> Result<(), DimensionError> {
        if width > self.max_width {
            return Err(DimensionError {
                dimension: "width",
                limit:     self.max_width,
                found:     width
            });
        }
        if height > self.max_height {
            return Err(DimensionError {
                dimension: "height",
                limit:     self.max_height,
                found:     height
            });
        }
        let pixels = width.saturating_mul(height);

        if pixels > self.max_pixels {
            return Err(DimensionError {
                dimension: "pixels",
                limit:     self.max_pixels,
                found:     pixels
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::DecoderOptions;

    #[test]
    fn dimension_limits() {
        let options = DecoderOptions::default()
            .set_max_width(100)
            .set_max_height(50)
            .set_max_pixels(1000);

        assert!(options.check_dimensions(100, 10).is_ok());
        assert_eq!(options.check_dimensions(101, 1).unwrap_err().dimension, "width");
        assert_eq!(options.check_dimensions(1, 51).unwrap_err().dimension, "height");
        assert_eq!(options.check_dimensions(40, 40).unwrap_err().dimension, "pixels");
    }
}
