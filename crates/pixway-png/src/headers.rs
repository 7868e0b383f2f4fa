/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

use pixway_core::log::{info, trace, warn};

use crate::decoder::PngChunk;
use crate::enums::{InterlaceMethod, PngColor};
use crate::error::PngDecodeErrors;
use crate::PngDecoder;

pub(crate) mod writers;

/// Largest value png allows for lengths and dimensions
const PNG_MAX_U31: usize = (1 << 31) - 1;

impl<'a> PngDecoder<'a> {
    pub(crate) fn parse_ihdr(&mut self, chunk: PngChunk) -> Result<(), PngDecodeErrors> {
        if self.seen_hdr {
            return Err(PngDecodeErrors::GenericStatic("Multiple IHDR, corrupt PNG"));
        }

        if chunk.length != 13 {
            return Err(PngDecodeErrors::GenericStatic("BAD IHDR length"));
        }

        let width = self.stream.get_u32_be_err()? as usize;
        let height = self.stream.get_u32_be_err()? as usize;

        if width == 0 || height == 0 {
            return Err(PngDecodeErrors::GenericStatic(
                "Width or height cannot be zero"
            ));
        }
        if width > PNG_MAX_U31 || height > PNG_MAX_U31 {
            return Err(PngDecodeErrors::GenericStatic(
                "Width or height exceeds 2^31-1"
            ));
        }

        self.options.check_dimensions(width, height)?;

        let depth = self.stream.get_u8_err()?;
        let color_int = self.stream.get_u8_err()?;

        let color = PngColor::from_int(color_int).ok_or_else(|| {
            PngDecodeErrors::Generic(format!("Unknown color value {color_int}"))
        })?;

        // verify colors plus bit depths, first for validity
        // then for what we can decode
        let valid = match depth {
            1 | 2 | 4 => matches!(color, PngColor::Luma | PngColor::Palette),
            8 => true,
            16 => color != PngColor::Palette,
            _ => false
        };
        if !valid {
            return Err(PngDecodeErrors::Generic(format!(
                "Bit depth {depth} is not allowed for color type {color:?}"
            )));
        }
        if depth != 8 || color == PngColor::Palette {
            return Err(PngDecodeErrors::UnsupportedColor(color, depth));
        }

        if self.stream.get_u8_err()? != 0 {
            return Err(PngDecodeErrors::GenericStatic("Unknown compression method"));
        }

        let filter_method = self.stream.get_u8_err()?;

        if filter_method != 0 {
            return Err(PngDecodeErrors::Generic(format!(
                "Unknown filter method {filter_method}"
            )));
        }

        let interlace_method = self.stream.get_u8_err()?;

        match InterlaceMethod::from_int(interlace_method) {
            Some(InterlaceMethod::Standard) => (),
            Some(InterlaceMethod::Adam7) => return Err(PngDecodeErrors::InterlacedImage),
            None => {
                return Err(PngDecodeErrors::Generic(format!(
                    "Unknown interlace method {interlace_method}",
                )));
            }
        }

        // skip crc
        self.stream.skip(4)?;

        self.png_info.width = width;
        self.png_info.height = height;
        self.png_info.depth = depth;
        self.png_info.color = color;

        info!("Width: {}", width);
        info!("Height: {}", height);
        info!("Color type: {:?}", color);
        info!("Depth: {:?}", depth);

        self.seen_hdr = true;

        Ok(())
    }

    pub(crate) fn parse_idat(&mut self, png_chunk: PngChunk) -> Result<(), PngDecodeErrors> {
        if !self.seen_hdr {
            return Err(PngDecodeErrors::GenericStatic("IDAT before IHDR, corrupt PNG"));
        }
        let idat_stream = self.stream.get_as_ref(png_chunk.length)?;

        self.idat_chunks.extend_from_slice(idat_stream);
        self.seen_idat = true;

        // skip crc
        self.stream.skip(4)?;

        Ok(())
    }

    /// Skip a chunk we do not act on
    pub(crate) fn skip_chunk(&mut self, chunk: PngChunk) -> Result<(), PngDecodeErrors> {
        // bit 5 of the first byte clear marks chunks a decoder must understand
        let critical = chunk.chunk[0] & 32 == 0;
        let name = core::str::from_utf8(&chunk.chunk).unwrap_or("????");

        if critical {
            if self.options.get_strict_mode() {
                return Err(PngDecodeErrors::Generic(format!(
                    "Unknown critical chunk {name}"
                )));
            }
            warn!("Skipping unknown critical chunk {}", name);
        } else {
            trace!("Skipping chunk {}, length {}", name, chunk.length);
        }
        self.stream.skip(chunk.length + 4)?;

        Ok(())
    }
}
