/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! Main image logic.
#![allow(clippy::doc_markdown)]

use alloc::vec;
use alloc::vec::Vec;

use pixway_core::bytestream::ByteReader;
use pixway_core::colorspace::ColorModel;
use pixway_core::log::{debug, trace, warn};
use pixway_core::midway::Midway;
use pixway_core::options::DecoderOptions;

use crate::color_convert::{ycbcr_to_rgb, write_rgb};
use crate::components::Components;
use crate::errors::{DecodeErrors, UnsupportedSchemes};
use crate::headers::{
    parse_app14, parse_dqt, parse_huffman, parse_sos, parse_start_of_frame, skip_segment
};
use crate::huffman::HuffmanTable;
use crate::marker::Marker;
use crate::upsampler::upsample_row;

/// Maximum components
pub(crate) const MAX_COMPONENTS: usize = 4;

/// Image information as read from the frame header
#[derive(Default, Clone, Copy, Debug, Eq, PartialEq)]
pub struct ImageInfo {
    /// Width of the image
    pub width:            usize,
    /// Height of image
    pub height:           usize,
    /// Number of components, 1 or 3
    pub components:       u8,
    /// MCUs between restart markers, 0 if the image has none
    pub restart_interval: usize
}

/// A JPEG Decoder Instance.
///
/// Decodes baseline (sequential, Huffman coded, 8 bit) images with one or
/// three components.
///
/// # Usage
/// ```no_run
/// use pixway_jpeg::JpegDecoder;
///
/// let data = std::fs::read("image.jpg").unwrap();
/// let mut decoder = JpegDecoder::new(&data);
///
/// let image = decoder.decode().unwrap();
/// println!("{:?}", image.dimensions());
/// ```
pub struct JpegDecoder<'a> {
    /// Struct to hold image information from SOI
    pub(crate) info:               ImageInfo,
    /// Quantization tables, in natural order
    pub(crate) qt_tables:          [Option<[i32; 64]>; MAX_COMPONENTS],
    /// DC Huffman Tables with a maximum of 4 tables for each  component
    pub(crate) dc_huffman_tables:  [Option<HuffmanTable>; MAX_COMPONENTS],
    /// AC Huffman Tables with a maximum of 4 tables for each component
    pub(crate) ac_huffman_tables:  [Option<HuffmanTable>; MAX_COMPONENTS],
    /// Image components, holds information like DC prediction and quantization
    /// tables of a component
    pub(crate) components:         Vec<Components>,
    /// maximum horizontal component of all channels in the image
    pub(crate) h_max:              usize,
    /// maximum vertical component of all channels in the image
    pub(crate) v_max:              usize,
    /// Number of MCU's in the x plane
    pub(crate) mcu_x:              usize,
    /// Number of MCU's in the y plane
    pub(crate) mcu_y:              usize,
    /// Component indices of the current scan, in scan order
    pub(crate) z_order:            [usize; MAX_COMPONENTS],
    /// Number of components in the current scan
    pub(crate) num_scans:          usize,
    /// Number of MCUs between restart markers
    pub(crate) restart_interval:   usize,
    /// Color transform from an Adobe APP14 segment
    pub(crate) adobe_transform:    Option<u8>,
    pub(crate) seen_sof:           bool,
    pub(crate) options:            DecoderOptions,
    pub(crate) stream:             ByteReader<'a>,
    pub(crate) headers_decoded:    bool
}

impl<'a> JpegDecoder<'a> {
    /// Create a new decoder with default options
    pub fn new(stream: &'a [u8]) -> JpegDecoder<'a> {
        JpegDecoder::new_with_options(stream, DecoderOptions::default())
    }

    /// Create a new decoder with the specified options
    pub fn new_with_options(stream: &'a [u8], options: DecoderOptions) -> JpegDecoder<'a> {
        JpegDecoder {
            info: ImageInfo::default(),
            qt_tables: [None, None, None, None],
            dc_huffman_tables: [None, None, None, None],
            ac_huffman_tables: [None, None, None, None],
            components: vec![],
            h_max: 1,
            v_max: 1,
            mcu_x: 0,
            mcu_y: 0,
            z_order: [0; MAX_COMPONENTS],
            num_scans: 0,
            restart_interval: 0,
            adobe_transform: None,
            seen_sof: false,
            options,
            stream: ByteReader::new(stream),
            headers_decoded: false
        }
    }

    /// Decode headers up to and including the first start of scan
    ///
    /// After this returns, `dimensions`, `color_model` and `info` are
    /// available
    pub fn decode_headers(&mut self) -> Result<(), DecodeErrors> {
        if self.headers_decoded {
            trace!("Headers decoded!");
            return Ok(());
        }
        let magic_bytes = self
            .stream
            .get_u16_be_err()
            .map_err(|_| DecodeErrors::FormatStatic("Not a jpeg image, too short"))?;

        if magic_bytes != 0xffd8 {
            return Err(DecodeErrors::IllegalMagicBytes(magic_bytes));
        }

        loop {
            let Some(marker) = self.next_marker()? else {
                return Err(DecodeErrors::FormatStatic(
                    "Premature end of file, no start of scan found"
                ));
            };
            self.parse_marker_inner(marker)?;

            if marker == Marker::SOS {
                self.headers_decoded = true;
                return Ok(());
            }
        }
    }

    /// Find the next marker in the stream
    ///
    /// Returns `None` once the stream runs out
    pub(crate) fn next_marker(&mut self) -> Result<Option<Marker>, DecodeErrors> {
        let mut bytes_before_marker = 0;

        loop {
            if self.stream.eof() {
                return Ok(None);
            }
            if self.stream.get_u8() != 0xFF {
                bytes_before_marker += 1;
                continue;
            }
            // skip fill bytes
            let mut m = self.stream.get_u8();

            while m == 0xFF && !self.stream.eof() {
                m = self.stream.get_u8();
            }
            if m == 0x00 || m == 0xFF {
                bytes_before_marker += 2;
                continue;
            }
            if bytes_before_marker > 0 {
                if self.options.get_strict_mode() {
                    return Err(DecodeErrors::FormatStatic(
                        "[strict-mode]: Extra bytes between headers"
                    ));
                }
                warn!(
                    "Extra bytes {} before marker 0xFF{:X}",
                    bytes_before_marker, m
                );
                bytes_before_marker = 0;
            }

            match Marker::from_u8(m) {
                Some(marker) => return Ok(Some(marker)),
                None => {
                    warn!("Marker 0xFF{:X} not known", m);
                    skip_segment(self)?;
                }
            }
        }
    }

    pub(crate) fn parse_marker_inner(&mut self, m: Marker) -> Result<(), DecodeErrors> {
        match m {
            Marker::SOF(0) => {
                trace!("Image encoding scheme =`Baseline DCT`");
                parse_start_of_frame(self)?;
            }
            Marker::SOF(v) => {
                let feature = UnsupportedSchemes::from_int(0xC0 + v);

                return match feature {
                    Some(feature) => Err(DecodeErrors::Unsupported(feature)),
                    None => Err(DecodeErrors::Format(alloc::format!(
                        "Unknown start of frame marker 0xFFC{v:X}"
                    )))
                };
            }
            Marker::DAC => {
                return Err(DecodeErrors::Unsupported(
                    UnsupportedSchemes::ArithmeticConditioning
                ));
            }
            Marker::DHT => {
                parse_huffman(self)?;
            }
            Marker::DQT => {
                parse_dqt(self)?;
            }
            Marker::SOS => {
                parse_sos(self)?;
            }
            Marker::DRI => {
                trace!("DRI marker present");

                if self.stream.get_u16_be_err()? != 4 {
                    return Err(DecodeErrors::FormatStatic(
                        "Bad DRI length, Corrupt JPEG"
                    ));
                }
                self.restart_interval = usize::from(self.stream.get_u16_be_err()?);
                self.info.restart_interval = self.restart_interval;
            }
            Marker::APP(14) => {
                parse_app14(self)?;
            }
            Marker::APP(_) | Marker::COM | Marker::DNL => {
                trace!("Skipping {:?} segment", m);
                skip_segment(self)?;
            }
            Marker::RST(n) => {
                // restart markers carry no payload
                warn!("Stray restart marker RST{} outside of entropy coded data", n);
            }
            Marker::SOI => {
                return Err(DecodeErrors::FormatStatic("Unexpected start of image marker"));
            }
            Marker::EOI => {
                return Err(DecodeErrors::FormatStatic("Premature End of image"));
            }
        }
        Ok(())
    }

    /// Image dimensions, `None` before headers are decoded
    pub const fn dimensions(&self) -> Option<(usize, usize)> {
        if !self.headers_decoded {
            return None;
        }
        Some((self.info.width, self.info.height))
    }

    /// Color model of decoded pixels, `None` before headers are decoded
    pub const fn color_model(&self) -> Option<ColorModel> {
        if !self.headers_decoded {
            return None;
        }
        if self.info.components == 1 {
            Some(ColorModel::Grayscale)
        } else {
            Some(ColorModel::RGB)
        }
    }

    /// Frame information, `None` before headers are decoded
    pub const fn info(&self) -> Option<ImageInfo> {
        if !self.headers_decoded {
            return None;
        }
        Some(self.info)
    }

    /// Size of the buffer `decode_into` needs, `None` before headers are decoded
    pub fn output_buf_size(&self) -> Option<usize> {
        let (width, height) = self.dimensions()?;
        let model = self.color_model()?;

        width
            .checked_mul(height)?
            .checked_mul(model.num_components())
    }

    /// Decode the image into `out`
    ///
    /// `out` must hold at least [`output_buf_size`](Self::output_buf_size) bytes
    pub fn decode_into(&mut self, out: &mut [u8]) -> Result<(), DecodeErrors> {
        self.decode_headers()?;

        let size = self
            .output_buf_size()
            .ok_or(DecodeErrors::FormatStatic("Image dimensions overflow"))?;

        if out.len() < size {
            return Err(DecodeErrors::TooSmallOutput(size, out.len()));
        }
        self.setup_component_params()?;
        self.decode_scans()?;

        if let Some(missing) = self.components.iter().find(|c| !c.decoded) {
            return Err(DecodeErrors::Format(alloc::format!(
                "Component {} never appeared in a scan",
                missing.id
            )));
        }
        self.post_process(&mut out[..size]);

        Ok(())
    }

    /// Decode the whole image
    pub fn decode(&mut self) -> Result<Midway, DecodeErrors> {
        self.decode_headers()?;

        let size = self
            .output_buf_size()
            .ok_or(DecodeErrors::FormatStatic("Image dimensions overflow"))?;
        let mut out = vec![0; size];

        self.decode_into(&mut out)?;

        let model = self.color_model().unwrap_or(ColorModel::RGB);

        Ok(Midway::new(self.info.width, self.info.height, model, out)?)
    }

    /// Allocate a plane covering whole MCUs for every component
    fn setup_component_params(&mut self) -> Result<(), DecodeErrors> {
        for component in &mut self.components {
            component.width_stride = self.mcu_x * component.horizontal_sample * 8;

            let rows = self.mcu_y * component.vertical_sample * 8;
            let size = component
                .width_stride
                .checked_mul(rows)
                .ok_or(DecodeErrors::FormatStatic("Image dimensions overflow"))?;

            component.plane = vec![0; size];
        }
        debug!(
            "MCU layout {}x{}, maximum sampling factors {}x{}",
            self.mcu_x, self.mcu_y, self.h_max, self.v_max
        );
        Ok(())
    }

    /// Whether a three component image holds RGB rather than YCbCr samples
    fn is_rgb_input(&self) -> bool {
        if let Some(transform) = self.adobe_transform {
            return transform == 0;
        }
        let ids: Vec<u8> = self.components.iter().map(|c| c.id).collect();

        ids == [b'R', b'G', b'B']
    }

    /// Upsample and color convert the decoded planes into `out`
    fn post_process(&self, out: &mut [u8]) {
        let width = self.info.width;

        if self.components.len() == 1 {
            let component = &self.components[0];

            for (y, out_row) in out.chunks_exact_mut(width).enumerate() {
                let start = y * component.width_stride;
                out_row.copy_from_slice(&component.plane[start..start + width]);
            }
            return;
        }

        let rgb_input = self.is_rgb_input();

        let mut rows = [vec![0_u8; width], vec![0_u8; width], vec![0_u8; width]];

        for (y, out_row) in out.chunks_exact_mut(width * 3).enumerate() {
            for (component, row) in self.components.iter().zip(rows.iter_mut()) {
                let v_factor = self.v_max / component.vertical_sample;
                let h_factor = self.h_max / component.horizontal_sample;

                let source_y = y / v_factor;
                let start = source_y * component.width_stride;
                let source = &component.plane[start..start + component.width_stride];

                upsample_row(source, h_factor, row);
            }
            let [c0, c1, c2] = &rows;

            if rgb_input {
                write_rgb(c0, c1, c2, out_row);
            } else {
                ycbcr_to_rgb(c0, c1, c2, out_row);
            }
        }
    }
}
