/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

use pixway_core::bytestream::ByteReader;
use pixway_core::colorspace::ColorModel;
use pixway_core::log::{trace, warn};
use pixway_core::midway::Midway;
use pixway_core::options::DecoderOptions;
use zune_inflate::{DeflateDecoder, DeflateOptions};

use crate::constants::PNG_SIGNATURE;
use crate::crc::calc_crc_with_bytes;
use crate::enums::{FilterMethod, InterlaceMethod, PngChunkType, PngColor};
use crate::error::PngDecodeErrors;
use crate::filters::unfilter_scanline;

/// A chunk header, the stream sits at the start of the
/// chunk payload once this has been read
#[derive(Copy, Clone)]
pub(crate) struct PngChunk {
    pub length:     usize,
    pub chunk_type: PngChunkType,
    pub chunk:      [u8; 4],
    pub crc:        u32
}

/// Image information as declared by the IHDR chunk
#[derive(Copy, Clone, Debug)]
pub struct PngInfo {
    pub width:     usize,
    pub height:    usize,
    pub depth:     u8,
    pub color:     PngColor,
    pub interlace: InterlaceMethod
}

impl Default for PngInfo {
    fn default() -> Self {
        PngInfo {
            width:     0,
            height:    0,
            depth:     0,
            color:     PngColor::Luma,
            interlace: InterlaceMethod::Standard
        }
    }
}

/// A PNG decoder
///
/// Decodes 8 bit non-interlaced grayscale and truecolor images,
/// gray with alpha is handed out as RGBA.
///
/// # Usage
/// ```no_run
/// use pixway_png::PngDecoder;
///
/// let data = std::fs::read("image.png").unwrap();
/// let mut decoder = PngDecoder::new(&data);
///
/// decoder.decode_headers().unwrap();
/// println!("{:?}", decoder.dimensions());
///
/// let image = decoder.decode().unwrap();
/// ```
pub struct PngDecoder<'a> {
    pub(crate) stream:      ByteReader<'a>,
    pub(crate) options:     DecoderOptions,
    pub(crate) png_info:    PngInfo,
    pub(crate) idat_chunks: Vec<u8>,
    pub(crate) seen_hdr:    bool,
    pub(crate) seen_idat:   bool,
    pub(crate) seen_iend:   bool,
    seen_headers:           bool
}

impl<'a> PngDecoder<'a> {
    /// Create a new decoder with default options
    pub fn new(data: &'a [u8]) -> PngDecoder<'a> {
        PngDecoder::new_with_options(data, DecoderOptions::default())
    }

    /// Create a new decoder with the given options
    pub fn new_with_options(data: &'a [u8], options: DecoderOptions) -> PngDecoder<'a> {
        PngDecoder {
            stream: ByteReader::new(data),
            options,
            png_info: PngInfo::default(),
            idat_chunks: Vec::new(),
            seen_hdr: false,
            seen_idat: false,
            seen_iend: false,
            seen_headers: false
        }
    }

    /// Read the next chunk header and confirm its crc
    ///
    /// Leaves the stream at the start of the chunk payload
    fn read_chunk_header(&mut self) -> Result<PngChunk, PngDecodeErrors> {
        if !self.stream.has(8) {
            return Err(PngDecodeErrors::NotEnoughData(format!(
                "Expected a chunk header but only {} bytes are left",
                self.stream.bytes_left()
            )));
        }
        let chunk_length = self.stream.get_u32_be_err()? as usize;
        let chunk = self.stream.read_fixed_bytes_or_error::<4>()?;
        let chunk_type = PngChunkType::from_bytes(&chunk);

        if chunk_length > (1 << 31) - 1 {
            return Err(PngDecodeErrors::GenericStatic(
                "Chunk length larger than 2^31-1, corrupt PNG"
            ));
        }

        // payload plus crc
        if !self.stream.has(chunk_length + 4) {
            return Err(PngDecodeErrors::NotEnoughData(format!(
                "Chunk {:?} needs {} bytes but only {} are left",
                chunk_type,
                chunk_length + 4,
                self.stream.bytes_left()
            )));
        }
        // offsets are relative to the start of the payload
        let payload = self.stream.peek_at(0, chunk_length)?;
        let crc_bytes = self.stream.peek_at(chunk_length, 4)?;
        let crc = u32::from_be_bytes([crc_bytes[0], crc_bytes[1], crc_bytes[2], crc_bytes[3]]);

        if self.options.png_get_confirm_crc() {
            // crc covers the chunk name and the payload
            let running = calc_crc_with_bytes(payload, calc_crc_with_bytes(&chunk, u32::MAX));
            let calculated = !running;

            if calculated != crc {
                return Err(PngDecodeErrors::BadCrc(crc, calculated));
            }
        }

        Ok(PngChunk {
            length: chunk_length,
            chunk_type,
            chunk,
            crc
        })
    }

    /// Handle one chunk, returning whether it was the IEND chunk
    fn handle_chunk(&mut self, header: PngChunk) -> Result<bool, PngDecodeErrors> {
        trace!(
            "Chunk {:?}, length {}, crc {:#010X}",
            header.chunk_type,
            header.length,
            header.crc
        );

        match header.chunk_type {
            PngChunkType::IHDR => self.parse_ihdr(header)?,
            PngChunkType::IDAT => self.parse_idat(header)?,
            PngChunkType::IEND => {
                self.stream.skip(header.length + 4)?;
                self.seen_iend = true;
                return Ok(true);
            }
            PngChunkType::PLTE => {
                // only a suggested palette for the color types we decode
                trace!("Skipping PLTE chunk");
                self.stream.skip(header.length + 4)?;
            }
            PngChunkType::unkn => self.skip_chunk(header)?
        }
        Ok(false)
    }

    /// Read the signature and every chunk up to the image data
    ///
    /// After this, [`dimensions`](Self::dimensions) and [`color_model`](Self::color_model)
    /// return the image properties.
    ///
    /// Calling it more than once is a no-op.
    pub fn decode_headers(&mut self) -> Result<(), PngDecodeErrors> {
        if self.seen_headers {
            return Ok(());
        }
        let signature = self
            .stream
            .read_fixed_bytes_or_error::<8>()
            .map_err(|_| PngDecodeErrors::BadSignature)?;

        if u64::from_be_bytes(signature) != PNG_SIGNATURE {
            return Err(PngDecodeErrors::BadSignature);
        }

        // the first chunk must be IHDR
        match self.stream.peek_at(4, 4) {
            Ok(name) if name == b"IHDR" => (),
            _ => return Err(PngDecodeErrors::GenericStatic("First chunk not IHDR, Corrupt PNG"))
        }

        while !self.seen_idat && !self.seen_iend {
            let header = self.read_chunk_header()?;
            self.handle_chunk(header)?;
        }
        self.seen_headers = true;

        Ok(())
    }

    /// Read the remaining chunks, collecting all image data
    fn read_remaining_chunks(&mut self) -> Result<(), PngDecodeErrors> {
        while !self.seen_iend {
            if self.stream.eof() {
                return Err(PngDecodeErrors::GenericStatic("No IEND chunk, corrupt PNG"));
            }
            let header = self.read_chunk_header()?;
            self.handle_chunk(header)?;
        }
        if !self.seen_idat {
            return Err(PngDecodeErrors::GenericStatic("No IDAT chunks, corrupt PNG"));
        }
        Ok(())
    }

    /// Image information, `None` if headers haven't been decoded
    pub fn info(&self) -> Option<PngInfo> {
        self.seen_hdr.then_some(self.png_info)
    }

    /// Image width and height, `None` if headers haven't been decoded
    pub const fn dimensions(&self) -> Option<(usize, usize)> {
        if !self.seen_hdr {
            return None;
        }
        Some((self.png_info.width, self.png_info.height))
    }

    /// The color model pixels will be returned in
    pub const fn color_model(&self) -> Option<ColorModel> {
        if !self.seen_hdr {
            return None;
        }
        Some(self.png_info.color.output_model())
    }

    /// Bytes needed to hold the decoded image,
    /// `None` if headers haven't been decoded or the size overflows
    pub fn output_buf_size(&self) -> Option<usize> {
        let model = self.color_model()?;

        self.png_info
            .width
            .checked_mul(self.png_info.height)?
            .checked_mul(model.num_components())
    }

    fn inflate(&self, size_hint: usize) -> Result<Vec<u8>, PngDecodeErrors> {
        let options = DeflateOptions::default()
            .set_size_hint(size_hint)
            .set_limit(size_hint.saturating_mul(2).max(1 << 16))
            .set_confirm_checksum(self.options.inflate_get_confirm_adler());

        let mut decoder = DeflateDecoder::new_with_options(&self.idat_chunks, options);

        decoder.decode_zlib().map_err(PngDecodeErrors::ZlibDecodeErrors)
    }

    /// Decode into a caller supplied buffer
    ///
    /// The buffer must be at least [`output_buf_size`](Self::output_buf_size) bytes
    pub fn decode_into(&mut self, out: &mut [u8]) -> Result<(), PngDecodeErrors> {
        self.decode_headers()?;
        self.read_remaining_chunks()?;

        let info = self.png_info;
        let expected = self
            .output_buf_size()
            .ok_or(PngDecodeErrors::GenericStatic("Image dimensions overflow"))?;

        if out.len() < expected {
            return Err(PngDecodeErrors::TooSmallOutput(expected, out.len()));
        }
        let components = info.color.num_components();
        let stride = info.width * components;
        let filtered_size = (stride + 1) * info.height;

        let data = self.inflate(filtered_size)?;

        if data.len() < filtered_size {
            return Err(PngDecodeErrors::NotEnoughData(format!(
                "Inflated data is {} bytes, expected {}",
                data.len(),
                filtered_size
            )));
        }
        if data.len() > filtered_size {
            warn!(
                "{} extra bytes after image data, ignoring",
                data.len() - filtered_size
            );
        }

        if info.color == PngColor::LumaA {
            let mut scratch = vec![0; stride * info.height];
            unfilter_image(&data, &mut scratch, stride, components)?;
            expand_luma_alpha(&scratch, &mut out[..expected]);
        } else {
            unfilter_image(&data, &mut out[..expected], stride, components)?;
        }
        Ok(())
    }

    /// Decode the image
    pub fn decode(&mut self) -> Result<Midway, PngDecodeErrors> {
        self.decode_headers()?;

        let size = self
            .output_buf_size()
            .ok_or(PngDecodeErrors::GenericStatic("Image dimensions overflow"))?;
        let mut out = vec![0; size];

        self.decode_into(&mut out)?;

        let model = self.png_info.color.output_model();

        Ok(Midway::new(
            self.png_info.width,
            self.png_info.height,
            model,
            out
        )?)
    }
}

/// Undo scanline filters for every row
///
/// `data` holds rows of one filter byte followed by `stride` filtered bytes
fn unfilter_image(
    data: &[u8], out: &mut [u8], stride: usize, components: usize
) -> Result<(), PngDecodeErrors> {
    let mut prev_row: &[u8] = &[];
    let mut rest = out;

    for raw_row in data.chunks_exact(stride + 1).take(rest.len() / stride) {
        let filter_byte = raw_row[0];
        let filter =
            FilterMethod::from_int(filter_byte).ok_or(PngDecodeErrors::InvalidFilter(filter_byte))?;

        let (current, remaining) = core::mem::take(&mut rest).split_at_mut(stride);

        unfilter_scanline(&raw_row[1..], prev_row, current, filter, components);

        prev_row = current;
        rest = remaining;
    }
    Ok(())
}

/// Widen gray + alpha pixels to RGBA
fn expand_luma_alpha(input: &[u8], out: &mut [u8]) {
    for (pixel, rgba) in input.chunks_exact(2).zip(out.chunks_exact_mut(4)) {
        rgba[0] = pixel[0];
        rgba[1] = pixel[0];
        rgba[2] = pixel[0];
        rgba[3] = pixel[1];
    }
}
