/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! A baseline JPEG encoder
//!
//! Images are converted to YCbCr, chroma is optionally subsampled, and every
//! 8x8 block goes through a forward DCT, quantization and Huffman coding
//! with fixed tables.
use alloc::format;
use alloc::vec;
use alloc::vec::Vec;

use pixway_core::bytestream::ByteWriter;
use pixway_core::log::{debug, trace};
use pixway_core::midway::Midway;
use pixway_core::options::{ChromaSubsampling, EncoderOptions};

use crate::encoder::fdct::fdct;
use crate::encoder::huffman::{HuffmanCodes, HuffmanSpec, HuffmanTables};
use crate::encoder::tables::{
    scale_quantization_table, STD_CHROMA_QUANTIZATION, STD_LUMA_QUANTIZATION
};
use crate::encoder::writer::BitWriter;
use crate::errors::EncodeErrors;
use crate::marker::Marker;
use crate::misc::UN_ZIGZAG;

mod fdct;
pub(crate) mod huffman;
pub(crate) mod tables;
mod writer;

/// Largest dimension a frame header can carry
const MAX_DIMENSION: usize = 65535;

/// A plane of samples padded to whole MCUs
struct Plane {
    samples: Vec<u8>,
    width:   usize
}

/// A component as laid out in the frame
struct EncodeComponent<'p> {
    id:          u8,
    plane:       &'p Plane,
    h:           usize,
    v:           usize,
    /// quantization and Huffman table slot
    table:       u8,
    quantizer:   &'p [u16; 64],
    dc_codes:    &'p HuffmanCodes,
    ac_codes:    &'p HuffmanCodes
}

/// A JPEG encoder
///
/// # Usage
/// ```
/// use pixway_core::colorspace::ColorModel;
/// use pixway_core::midway::Midway;
/// use pixway_core::options::{ChromaSubsampling, EncoderOptions};
/// use pixway_jpeg::JpegEncoder;
///
/// let image = Midway::from_pixel(16, 16, ColorModel::RGB, &[255, 0, 0]).unwrap();
/// let options = EncoderOptions::default().jpeg_set_subsampling(ChromaSubsampling::Yuv444);
///
/// let bytes = JpegEncoder::new(&image, options).encode().unwrap();
/// assert_eq!(&bytes[..2], &[0xFF, 0xD8]);
/// ```
pub struct JpegEncoder<'a> {
    image:               &'a Midway,
    options:             EncoderOptions,
    quantization_tables: Option<([u16; 64], [u16; 64])>,
    huffman_tables:      Option<HuffmanTables>,
    restart_interval:    u16
}

impl<'a> JpegEncoder<'a> {
    /// Create an encoder for `image`
    ///
    /// `options` carries quality and the chroma subsampling mode
    pub fn new(image: &'a Midway, options: EncoderOptions) -> JpegEncoder<'a> {
        JpegEncoder {
            image,
            options,
            quantization_tables: None,
            huffman_tables: None,
            restart_interval: 0
        }
    }

    /// Use the given quantization tables instead of the scaled standard ones
    ///
    /// Tables are in natural (row-major) order, every entry must lie in `1..=255`.
    /// Quality has no effect on supplied tables.
    pub fn set_quantization_tables(mut self, luma: [u16; 64], chroma: [u16; 64]) -> Self {
        self.quantization_tables = Some((luma, chroma));
        self
    }

    /// Use the given Huffman tables instead of the standard ones
    pub fn set_huffman_tables(mut self, tables: HuffmanTables) -> Self {
        self.huffman_tables = Some(tables);
        self
    }

    /// Emit a restart marker every `interval` MCUs, 0 disables them
    pub fn set_restart_interval(mut self, interval: u16) -> Self {
        self.restart_interval = interval;
        self
    }

    fn quantization_tables(&self) -> Result<([u16; 64], [u16; 64]), EncodeErrors> {
        match self.quantization_tables {
            Some((luma, chroma)) => {
                for (name, table) in [("luma", &luma), ("chroma", &chroma)] {
                    if let Some((i, value)) = table
                        .iter()
                        .enumerate()
                        .find(|(_, v)| !(1..=255).contains(*v))
                    {
                        return Err(EncodeErrors::InvalidQuantizationTable(format!(
                            "{name} table entry {i} is {value}, expected a value in 1..=255"
                        )));
                    }
                }
                Ok((luma, chroma))
            }
            None => {
                let quality = self.options.get_quality();

                Ok((
                    scale_quantization_table(&STD_LUMA_QUANTIZATION, quality),
                    scale_quantization_table(&STD_CHROMA_QUANTIZATION, quality)
                ))
            }
        }
    }

    /// Encode the image, returning the whole file
    pub fn encode(&self) -> Result<Vec<u8>, EncodeErrors> {
        let (width, height) = self.image.dimensions();

        if width > MAX_DIMENSION {
            return Err(EncodeErrors::TooLargeDimensions("width", width));
        }
        if height > MAX_DIMENSION {
            return Err(EncodeErrors::TooLargeDimensions("height", height));
        }

        let (luma_q, chroma_q) = self.quantization_tables()?;

        let default_tables;
        let tables = match &self.huffman_tables {
            Some(tables) => tables,
            None => {
                default_tables = HuffmanTables::default();
                &default_tables
            }
        };
        let luma_dc = HuffmanCodes::new(&tables.luma_dc)?;
        let luma_ac = HuffmanCodes::new(&tables.luma_ac)?;
        let chroma_dc = HuffmanCodes::new(&tables.chroma_dc)?;
        let chroma_ac = HuffmanCodes::new(&tables.chroma_ac)?;

        let grayscale = self.image.color_model().is_grayscale();

        let (h, v) = if grayscale {
            (1, 1)
        } else {
            self.options.jpeg_get_subsampling().luma_sampling_factors()
        };
        let mcu_x = width.div_ceil(8 * h);
        let mcu_y = height.div_ceil(8 * v);

        debug!(
            "Encoding {}x{} image, {} MCUs of {}x{} pixels",
            width,
            height,
            mcu_x * mcu_y,
            8 * h,
            8 * v
        );

        let planes = self.build_planes(mcu_x * 8 * h, mcu_y * 8 * v, grayscale);

        let mut components = vec![EncodeComponent {
            id:        1,
            plane:     &planes[0],
            h,
            v,
            table:     0,
            quantizer: &luma_q,
            dc_codes:  &luma_dc,
            ac_codes:  &luma_ac
        }];

        for (id, plane) in (2..).zip(planes.iter().skip(1)) {
            components.push(EncodeComponent {
                id,
                plane,
                h: 1,
                v: 1,
                table: 1,
                quantizer: &chroma_q,
                dc_codes: &chroma_dc,
                ac_codes: &chroma_ac
            });
        }

        let mut writer = ByteWriter::with_capacity(width * height / 2 + 1024);

        writer.write_u16_be(0xFF00 | u16::from(Marker::SOI.to_u8()));
        write_app0(&mut writer);
        write_dqt(&mut writer, 0, &luma_q);

        if !grayscale {
            write_dqt(&mut writer, 1, &chroma_q);
        }
        write_sof0(&mut writer, width, height, &components);

        write_dht(&mut writer, 0x00, &tables.luma_dc);
        write_dht(&mut writer, 0x10, &tables.luma_ac);

        if !grayscale {
            write_dht(&mut writer, 0x01, &tables.chroma_dc);
            write_dht(&mut writer, 0x11, &tables.chroma_ac);
        }
        if self.restart_interval > 0 {
            writer.write_u16_be(0xFF00 | u16::from(Marker::DRI.to_u8()));
            writer.write_u16_be(4);
            writer.write_u16_be(self.restart_interval);
        }
        write_sos(&mut writer, &components);

        self.write_scan(&mut writer, &components, mcu_x, mcu_y)?;

        writer.write_u16_be(0xFF00 | u16::from(Marker::EOI.to_u8()));

        trace!("Wrote {} bytes", writer.bytes_written());

        Ok(writer.into_inner())
    }

    /// Convert the image into YCbCr planes covering whole MCUs
    ///
    /// Edge pixels are replicated into the padding, chroma planes
    /// are subsampled when requested.
    fn build_planes(&self, padded_width: usize, padded_height: usize, grayscale: bool) -> Vec<Plane> {
        let (width, height) = self.image.dimensions();
        let components = self.image.color_model().num_components();
        let pixels = self.image.pixels();

        let size = padded_width * padded_height;

        if grayscale {
            let mut luma = vec![0; size];

            for (y, row) in luma.chunks_exact_mut(padded_width).enumerate() {
                let source = &pixels[y.min(height - 1) * width..][..width];

                for (x, out) in row.iter_mut().enumerate() {
                    *out = source[x.min(width - 1)];
                }
            }
            return vec![Plane {
                samples: luma,
                width:   padded_width
            }];
        }

        let mut luma = vec![0; size];
        let mut cb = vec![0; size];
        let mut cr = vec![0; size];

        for y in 0..padded_height {
            let source = &pixels[y.min(height - 1) * width * components..][..width * components];
            let start = y * padded_width;

            for x in 0..padded_width {
                let pixel = &source[x.min(width - 1) * components..];
                let (y_c, cb_c, cr_c) = rgb_to_ycbcr(pixel[0], pixel[1], pixel[2]);

                luma[start + x] = y_c;
                cb[start + x] = cb_c;
                cr[start + x] = cr_c;
            }
        }

        let chroma = match self.options.jpeg_get_subsampling() {
            ChromaSubsampling::Yuv444 => [cb, cr].map(|samples| Plane {
                samples,
                width: padded_width
            }),
            ChromaSubsampling::Yuv420 => [cb, cr].map(|samples| Plane {
                samples: downsample_2x2(&samples, padded_width, padded_height),
                width:   padded_width / 2
            })
        };
        let [cb, cr] = chroma;

        vec![
            Plane {
                samples: luma,
                width:   padded_width
            },
            cb,
            cr,
        ]
    }

    fn write_scan(
        &self, writer: &mut ByteWriter, components: &[EncodeComponent], mcu_x: usize, mcu_y: usize
    ) -> Result<(), EncodeErrors> {
        let mut bits = BitWriter::new(writer);

        let mut dc_pred = [0_i32; 3];
        let mut block = [0_i32; 64];
        let mut zigzag = [0_i32; 64];

        let restart_interval = usize::from(self.restart_interval);
        let mut next_restart = 0_u8;
        let mut mcu_index = 0;

        for mcu_row in 0..mcu_y {
            for mcu_col in 0..mcu_x {
                if restart_interval > 0 && mcu_index > 0 && mcu_index % restart_interval == 0 {
                    bits.flush();
                    bits.write_marker(Marker::RST(next_restart).to_u8());

                    next_restart = (next_restart + 1) & 7;
                    dc_pred = [0; 3];
                }

                for (component, pred) in components.iter().zip(dc_pred.iter_mut()) {
                    for y in 0..component.v {
                        for x in 0..component.h {
                            load_block(
                                component.plane,
                                mcu_col * component.h + x,
                                mcu_row * component.v + y,
                                &mut block
                            );
                            fdct(&mut block);
                            quantize(&block, component.quantizer, &mut zigzag);

                            encode_block(
                                &mut bits,
                                &zigzag,
                                pred,
                                component.dc_codes,
                                component.ac_codes
                            )?;
                        }
                    }
                }
                mcu_index += 1;
            }
        }
        bits.flush();

        Ok(())
    }
}

/// JFIF full range RGB to YCbCr, 16 bit fixed point
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn rgb_to_ycbcr(r: u8, g: u8, b: u8) -> (u8, u8, u8) {
    let (r, g, b) = (i32::from(r), i32::from(g), i32::from(b));

    let y = (19595 * r + 38470 * g + 7471 * b + 32768) >> 16;
    let cb = (-11059 * r - 21709 * g + 32768 * b + (128 << 16) + 32767) >> 16;
    let cr = (32768 * r - 27439 * g - 5329 * b + (128 << 16) + 32767) >> 16;

    (y as u8, cb as u8, cr as u8)
}

/// Average every 2x2 neighbourhood, dimensions must be even
#[allow(clippy::cast_possible_truncation)]
fn downsample_2x2(samples: &[u8], width: usize, height: usize) -> Vec<u8> {
    let out_width = width / 2;
    let mut output = vec![0; out_width * (height / 2)];

    for (y, out_row) in output.chunks_exact_mut(out_width).enumerate() {
        let top = &samples[2 * y * width..][..width];
        let bottom = &samples[(2 * y + 1) * width..][..width];

        for ((out, t), b) in out_row
            .iter_mut()
            .zip(top.chunks_exact(2))
            .zip(bottom.chunks_exact(2))
        {
            let sum = u32::from(t[0]) + u32::from(t[1]) + u32::from(b[0]) + u32::from(b[1]);
            *out = ((sum + 2) >> 2) as u8;
        }
    }
    output
}

/// Copy a level shifted 8x8 block out of a plane
fn load_block(plane: &Plane, block_x: usize, block_y: usize, block: &mut [i32; 64]) {
    for (y, row) in block.chunks_exact_mut(8).enumerate() {
        let start = (block_y * 8 + y) * plane.width + block_x * 8;

        for (out, &sample) in row.iter_mut().zip(&plane.samples[start..start + 8]) {
            *out = i32::from(sample) - 128;
        }
    }
}

/// Quantize DCT output into zigzag order
///
/// The DCT output is scaled by 8 so every divisor is too
fn quantize(block: &[i32; 64], table: &[u16; 64], output: &mut [i32; 64]) {
    for (k, out) in output.iter_mut().enumerate() {
        let position = UN_ZIGZAG[k];
        let divisor = i32::from(table[position]) * 8;
        let value = block[position];

        let quantized = if value < 0 {
            -((-value + divisor / 2) / divisor)
        } else {
            (value + divisor / 2) / divisor
        };
        // AC categories stop at 10 bits
        *out = if k == 0 {
            quantized
        } else {
            quantized.clamp(-1023, 1023)
        };
    }
}

/// Magnitude category and the additional bits of a coefficient
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn category(value: i32) -> (u8, u32) {
    let size = (32 - value.unsigned_abs().leading_zeros()) as u8;
    // negative values are written as one's complement
    let bits = if value < 0 { (value - 1) as u32 } else { value as u32 };

    (size, bits)
}

/// Huffman code one quantized block in zigzag order
///
/// Section F.1.2
fn encode_block(
    writer: &mut BitWriter, block: &[i32; 64], dc_pred: &mut i32, dc_codes: &HuffmanCodes,
    ac_codes: &HuffmanCodes
) -> Result<(), EncodeErrors> {
    let diff = block[0] - *dc_pred;
    *dc_pred = block[0];

    let (size, bits) = category(diff);
    let (code, length) = dc_codes.get(size)?;

    writer.write_bits(u32::from(code), length);
    writer.write_bits(bits, size);

    let mut run = 0;

    for &coefficient in &block[1..] {
        if coefficient == 0 {
            run += 1;
            continue;
        }
        while run > 15 {
            let (code, length) = ac_codes.get(0xF0)?;
            writer.write_bits(u32::from(code), length);
            run -= 16;
        }
        let (size, bits) = category(coefficient);
        let (code, length) = ac_codes.get((run << 4) | size)?;

        writer.write_bits(u32::from(code), length);
        writer.write_bits(bits, size);

        run = 0;
    }
    if run > 0 {
        let (code, length) = ac_codes.get(0x00)?;
        writer.write_bits(u32::from(code), length);
    }
    Ok(())
}

fn write_app0(writer: &mut ByteWriter) {
    writer.write_u16_be(0xFF00 | u16::from(Marker::APP(0).to_u8()));
    writer.write_u16_be(16);
    writer.write_all(b"JFIF\0");
    // version 1.01
    writer.write_all(&[1, 1]);
    // no units, 1:1 aspect ratio
    writer.write_u8(0);
    writer.write_u16_be(1);
    writer.write_u16_be(1);
    // no thumbnail
    writer.write_all(&[0, 0]);
}

/// Write a quantization table, stored in zigzag order
#[allow(clippy::cast_possible_truncation)]
fn write_dqt(writer: &mut ByteWriter, id: u8, table: &[u16; 64]) {
    writer.write_u16_be(0xFF00 | u16::from(Marker::DQT.to_u8()));
    writer.write_u16_be(2 + 1 + 64);
    // 8 bit precision
    writer.write_u8(id);

    for &position in &UN_ZIGZAG[..64] {
        writer.write_u8(table[position] as u8);
    }
}

#[allow(clippy::cast_possible_truncation)]
fn write_sof0(writer: &mut ByteWriter, width: usize, height: usize, components: &[EncodeComponent]) {
    writer.write_u16_be(0xFF00 | u16::from(Marker::SOF(0).to_u8()));
    writer.write_u16_be(8 + 3 * components.len() as u16);
    // precision
    writer.write_u8(8);
    writer.write_u16_be(height as u16);
    writer.write_u16_be(width as u16);
    writer.write_u8(components.len() as u8);

    for component in components {
        writer.write_u8(component.id);
        writer.write_u8(((component.h as u8) << 4) | component.v as u8);
        writer.write_u8(component.table);
    }
}

#[allow(clippy::cast_possible_truncation)]
fn write_dht(writer: &mut ByteWriter, class_and_id: u8, spec: &HuffmanSpec) {
    writer.write_u16_be(0xFF00 | u16::from(Marker::DHT.to_u8()));
    writer.write_u16_be((2 + 1 + 16 + spec.values.len()) as u16);
    writer.write_u8(class_and_id);
    writer.write_all(&spec.bits);
    writer.write_all(&spec.values);
}

#[allow(clippy::cast_possible_truncation)]
fn write_sos(writer: &mut ByteWriter, components: &[EncodeComponent]) {
    writer.write_u16_be(0xFF00 | u16::from(Marker::SOS.to_u8()));
    writer.write_u16_be(6 + 2 * components.len() as u16);
    writer.write_u8(components.len() as u8);

    for component in components {
        writer.write_u8(component.id);
        writer.write_u8((component.table << 4) | component.table);
    }
    // spectral selection covers every coefficient, no successive approximation
    writer.write_all(&[0, 63, 0]);
}

#[cfg(test)]
mod tests {
    use super::{category, downsample_2x2, rgb_to_ycbcr};

    #[test]
    fn categories() {
        assert_eq!(category(0), (0, 0));
        assert_eq!(category(1), (1, 1));
        assert_eq!(category(-1).0, 1);
        assert_eq!(category(-1).1 & 1, 0);
        assert_eq!(category(-3).1 & 0b11, 0b00);
        assert_eq!(category(1023).0, 10);
    }

    #[test]
    fn primaries_to_ycbcr() {
        assert_eq!(rgb_to_ycbcr(0, 0, 0), (0, 128, 128));
        assert_eq!(rgb_to_ycbcr(255, 255, 255), (255, 128, 128));

        let (y, cb, cr) = rgb_to_ycbcr(255, 0, 0);
        assert_eq!(y, 76);
        assert!(cb < 90 && cr == 255, "{cb} {cr}");
    }

    #[test]
    fn averaging() {
        #[rustfmt::skip]
        let samples = [
            0, 4, 10, 10,
            4, 4, 10, 11,
        ];
        assert_eq!(downsample_2x2(&samples, 4, 2), [3, 10]);
    }
}
