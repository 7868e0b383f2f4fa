/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

// Layout of the files we understand
//
// - A 14 byte file header: the magic number ("BM"), file size, two reserved
//   u16's and the offset to the pixel data.
// - An info header whose first u32 is its own size. We need the 40 byte
//   WinBMPv3 fields, larger V4 (108) and V5 (124) headers only add masks and
//   color management data which uncompressed images do not use.
// - Optionally a gap, then the pixel data, rows padded to 4 bytes and
//   stored bottom-up unless the height is negative.

use alloc::vec;
use alloc::vec::Vec;

use pixway_core::bytestream::ByteReader;
use pixway_core::colorspace::ColorModel;
use pixway_core::log::{trace, warn};
use pixway_core::midway::Midway;
use pixway_core::options::DecoderOptions;

use crate::common::{row_stride, BmpCompression, FILE_HEADER_SIZE, INFO_HEADER_SIZE};
use crate::BmpDecoderErrors;

/// Probe some bytes to see
/// if they consist of a BMP image
pub fn probe_bmp(bytes: &[u8]) -> bool {
    if let Some(magic_bytes) = bytes.get(0..2) {
        if magic_bytes == b"BM" {
            // skip file_size   -> 4
            // skip reserved    -> 4
            // skip data offset -> 4
            // read info header size
            if let Some(sz) = bytes.get(14..18) {
                let sz = u32::from_le_bytes([sz[0], sz[1], sz[2], sz[3]]);

                return sz == 40 || sz == 52 || sz == 56 || sz == 108 || sz == 124;
            }
        }
    }
    false
}

/// A BMP decoder.
///
/// # Usage
/// The decoder can be used to read image information and or get the pixels out of a valid bmp
/// image.
///
/// ## Extracting image metadata
/// - use `decode_headers`+ utility functions to get information
/// ```no_run
/// use pixway_bmp::BmpDecoder;
///
/// fn main()->Result<(),pixway_bmp::BmpDecoderErrors>{
///     let data = std::fs::read("image.bmp").unwrap();
///     let mut decoder = BmpDecoder::new(&data);
///     decoder.decode_headers()?;
///     // after decoding headers, we can safely access the image metadata
///     // unwrap won't panic
///     let (w,h) = decoder.dimensions().unwrap();
///     println!("Image width: {}\t Image height: {}",w,h);
///     println!("Color model: {:?}\t",decoder.color_model().unwrap());
///
///     Ok(())
/// }
/// ```
pub struct BmpDecoder<'a> {
    bytes:           ByteReader<'a>,
    options:         DecoderOptions,
    width:           usize,
    height:          usize,
    flip_vertically: bool,
    decoded_headers: bool,
    data_offset:     usize,
    depth:           u16
}

impl<'a> BmpDecoder<'a> {
    /// Create a new bmp decoder that reads data from
    /// `data`
    ///
    /// # Arguments
    /// - `data`: The buffer from which we will read bytes from
    ///
    /// # Returns
    /// - A BMP decoder instance
    pub fn new(data: &'a [u8]) -> BmpDecoder<'a> {
        BmpDecoder::new_with_options(data, DecoderOptions::default())
    }
    /// Create a new decoder instance with specified options
    ///
    /// # Arguments
    ///
    /// * `data`: The buffer from which we will read data from
    /// * `options`:  Specialized options for this decoder
    ///
    /// returns: A BMP Decoder instance
    ///
    pub fn new_with_options(data: &'a [u8], options: DecoderOptions) -> BmpDecoder<'a> {
        BmpDecoder {
            bytes: ByteReader::new(data),
            options,
            decoded_headers: false,
            width: 0,
            height: 0,
            flip_vertically: false,
            data_offset: 0,
            depth: 0
        }
    }

    /// Decode headers stored in the bmp file and store
    /// information in the decode context
    ///
    /// After calling this, most information fields will be filled
    /// except the actual decoding bytes
    ///
    /// # Returns
    /// - Ok(()) Indicates everything was okay during header parsing
    /// - Err: Error that occurred when decoding headers
    pub fn decode_headers(&mut self) -> Result<(), BmpDecoderErrors> {
        if self.decoded_headers {
            return Ok(());
        }
        if self.bytes.len() < 2 || self.bytes.get_u8() != b'B' || self.bytes.get_u8() != b'M' {
            return Err(BmpDecoderErrors::InvalidMagicBytes);
        }
        if self.bytes.len() < FILE_HEADER_SIZE + INFO_HEADER_SIZE {
            return Err(BmpDecoderErrors::GenericStatic(
                "File too small to hold the BMP headers"
            ));
        }

        let file_size = self.bytes.get_u32_le_err()? as usize;
        // skip 4 reserved bytes
        self.bytes.skip(4)?;

        let data_offset = self.bytes.get_u32_le_err()? as usize;
        let ihsize = self.bytes.get_u32_le_err()? as usize;

        if ihsize < INFO_HEADER_SIZE {
            return Err(BmpDecoderErrors::GenericStatic(
                "Unsupported information header size, expected at least 40 bytes"
            ));
        }
        if ihsize.saturating_add(FILE_HEADER_SIZE) > data_offset {
            return Err(BmpDecoderErrors::GenericStatic(
                "Pixel data offset points inside the headers"
            ));
        }

        let width = self.bytes.get_u32_le_err()? as i32;
        let height = self.bytes.get_u32_le_err()? as i32;

        if width <= 0 {
            return Err(BmpDecoderErrors::GenericStatic(
                "Width is zero or negative, invalid image"
            ));
        }
        if height == 0 {
            return Err(BmpDecoderErrors::GenericStatic(
                "Height is zero, invalid image"
            ));
        }
        // positive heights are stored bottom-up
        self.flip_vertically = height > 0;

        self.height = height.unsigned_abs() as usize;
        self.width = width as usize;

        self.options.check_dimensions(self.width, self.height)?;

        trace!("Width: {}", self.width);
        trace!("Height: {}", self.height);

        // planes
        if self.bytes.get_u16_le_err()? != 1 {
            return Err(BmpDecoderErrors::GenericStatic(
                "Invalid BMP header, planes must be 1"
            ));
        }

        let depth = self.bytes.get_u16_le_err()?;
        let compression = self.bytes.get_u32_le_err()?;

        if compression != 0 {
            if let Some(method) = BmpCompression::from_u32(compression) {
                trace!("Compression: {:?}", method);
            }
            return Err(BmpDecoderErrors::UnsupportedCompression(compression));
        }
        if depth != 24 && depth != 32 {
            return Err(BmpDecoderErrors::UnsupportedDepth(depth));
        }
        trace!("Depth: {}", depth);
        trace!("Bottom up: {}", self.flip_vertically);

        // everything remaining in the info header is unused for
        // uncompressed truecolor images
        self.depth = depth;
        self.data_offset = data_offset;

        let stride = row_stride(self.width, usize::from(depth))
            .ok_or(BmpDecoderErrors::OverFlowOccurred)?;

        let pixel_end = stride
            .checked_mul(self.height)
            .and_then(|x| x.checked_add(data_offset))
            .ok_or(BmpDecoderErrors::OverFlowOccurred)?;

        if pixel_end > self.bytes.len() {
            return Err(BmpDecoderErrors::TooSmallBuffer(pixel_end, self.bytes.len()));
        }
        if file_size > self.bytes.len() {
            if self.options.get_strict_mode() {
                return Err(BmpDecoderErrors::TooSmallBuffer(file_size, self.bytes.len()));
            }
            warn!(
                "Header declares a file size of {} bytes but only {} are present",
                file_size,
                self.bytes.len()
            );
        }

        self.decoded_headers = true;

        Ok(())
    }

    /// Return the image dimensions as `(width, height)`
    /// or `None` if the headers haven't been decoded
    pub fn dimensions(&self) -> Option<(usize, usize)> {
        if !self.decoded_headers {
            return None;
        }
        Some((self.width, self.height))
    }

    /// Return the color model of the decoded pixels
    ///
    /// 24 bit images decode to RGB, 32 bit images to RGBA
    pub fn color_model(&self) -> Option<ColorModel> {
        if !self.decoded_headers {
            return None;
        }
        match self.depth {
            32 => Some(ColorModel::RGBA),
            _ => Some(ColorModel::RGB)
        }
    }

    /// Return the bits per pixel of the stored image
    pub fn depth(&self) -> Option<u16> {
        if !self.decoded_headers {
            return None;
        }
        Some(self.depth)
    }

    /// Get output buffer size needed to hold the decoded pixels
    ///
    /// Returns `None` if headers haven't been decoded or if the calculation overflows
    pub fn output_buf_size(&self) -> Option<usize> {
        let model = self.color_model()?;

        self.width
            .checked_mul(self.height)?
            .checked_mul(model.num_components())
    }

    /// Decode an image returning the decoded pixels as a [`Midway`]
    pub fn decode(&mut self) -> Result<Midway, BmpDecoderErrors> {
        self.decode_headers()?;

        let size = self
            .output_buf_size()
            .ok_or(BmpDecoderErrors::OverFlowOccurred)?;

        let mut output = vec![0_u8; size];

        self.decode_into(&mut output)?;

        let model = self
            .color_model()
            .ok_or(BmpDecoderErrors::GenericStatic("Headers not decoded"))?;

        Ok(Midway::new(self.width, self.height, model, output)?)
    }

    /// Decode an image into a pre-allocated buffer
    ///
    /// Pixels are written top row first, in RGB or RGBA order
    ///
    /// # Arguments
    /// - `buf`: The output buffer, must be at least [`output_buf_size`](Self::output_buf_size)
    ///  bytes
    pub fn decode_into(&mut self, buf: &mut [u8]) -> Result<(), BmpDecoderErrors> {
        self.decode_headers()?;

        let output_size = self
            .output_buf_size()
            .ok_or(BmpDecoderErrors::OverFlowOccurred)?;

        if buf.len() < output_size {
            return Err(BmpDecoderErrors::TooSmallOutput(output_size, buf.len()));
        }
        let buf = &mut buf[..output_size];

        let in_comps = usize::from(self.depth / 8);
        let out_stride = self.width * in_comps;
        let in_stride = row_stride(self.width, usize::from(self.depth))
            .ok_or(BmpDecoderErrors::OverFlowOccurred)?;

        self.bytes.set_position(self.data_offset)?;
        // bounds were confirmed when decoding headers
        let pixels = self.bytes.get_as_ref(in_stride * self.height)?;

        let mut rows: Vec<(&mut [u8], &[u8])> = Vec::with_capacity(self.height);

        if self.flip_vertically {
            // first stored row is the bottom row
            rows.extend(
                buf.rchunks_exact_mut(out_stride)
                    .zip(pixels.chunks_exact(in_stride))
            );
        } else {
            rows.extend(
                buf.chunks_exact_mut(out_stride)
                    .zip(pixels.chunks_exact(in_stride))
            );
        }

        for (out_row, in_row) in rows {
            for (out_px, in_px) in out_row
                .chunks_exact_mut(in_comps)
                .zip(in_row.chunks_exact(in_comps))
            {
                // stored as BGR(A)
                out_px[0] = in_px[2];
                out_px[1] = in_px[1];
                out_px[2] = in_px[0];

                if in_comps == 4 {
                    out_px[3] = in_px[3];
                }
            }
        }
        if in_comps == 4 && buf.chunks_exact(4).all(|px| px[3] == 0) {
            // writers commonly leave the fourth byte unused, a fully
            // transparent image is indistinguishable from that
            warn!("Alpha channel is zero for every pixel, treating image as opaque");

            buf.chunks_exact_mut(4).for_each(|px| px[3] = 255);
        }
        Ok(())
    }
}
