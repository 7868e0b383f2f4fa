/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! Decoding of entropy coded segments
//!
//! A scan is decoded block by block straight into the planes of the
//! components it carries. Interleaved scans walk the MCU grid of the frame,
//! a scan with a single component walks that component's own block grid.
use alloc::format;

use pixway_core::log::{trace, warn};

use crate::bitstream::BitStream;
use crate::components::Components;
use crate::decoder::JpegDecoder;
use crate::errors::DecodeErrors;
use crate::huffman::HuffmanTable;
use crate::idct::idct_int;
use crate::marker::Marker;
use crate::misc::{blocks_for, UN_ZIGZAG};

impl<'a> JpegDecoder<'a> {
    /// Decode every scan in the image
    ///
    /// The first start of scan must have been parsed, subsequent scans and
    /// table definitions between them are handled here.
    pub(crate) fn decode_scans(&mut self) -> Result<(), DecodeErrors> {
        loop {
            self.decode_scan()?;

            // table definitions may sit between scans
            loop {
                let Some(marker) = self.next_marker()? else {
                    return Err(DecodeErrors::FormatStatic(
                        "No EOI marker at the end of the image"
                    ));
                };
                match marker {
                    Marker::EOI => {
                        trace!("Reached EOI");
                        return Ok(());
                    }
                    Marker::SOS => {
                        self.parse_marker_inner(marker)?;
                        break;
                    }
                    _ => self.parse_marker_inner(marker)?
                }
            }
        }
    }

    /// Copy tables into the scan's components and reset their predictors
    fn prepare_scan(&mut self) -> Result<(), DecodeErrors> {
        for &k in &self.z_order[..self.num_scans] {
            let component = &mut self.components[k];
            let qt_number = usize::from(component.quantization_table_number);

            component.quantization_table =
                self.qt_tables[qt_number].ok_or_else(|| {
                    DecodeErrors::Format(format!(
                        "No quantization table {qt_number} for component {}",
                        component.id
                    ))
                })?;

            if self.dc_huffman_tables[component.dc_huff_table].is_none() {
                return Err(DecodeErrors::Format(format!(
                    "No DC Huffman table {} for component {}",
                    component.dc_huff_table, component.id
                )));
            }
            if self.ac_huffman_tables[component.ac_huff_table].is_none() {
                return Err(DecodeErrors::Format(format!(
                    "No AC Huffman table {} for component {}",
                    component.ac_huff_table, component.id
                )));
            }
            component.dc_pred = 0;
            component.decoded = true;
        }
        Ok(())
    }

    /// Decode the entropy coded data of the scan the stream sits at
    fn decode_scan(&mut self) -> Result<(), DecodeErrors> {
        self.prepare_scan()?;

        let mut stream = BitStream::new(self.stream.remaining_bytes(), 0);

        let single = self.num_scans == 1;

        let (blocks_x, blocks_y) = if single {
            let component = &self.components[self.z_order[0]];
            // samples of this component that cover the image
            let width = (self.info.width * component.horizontal_sample).div_ceil(self.h_max);
            let height = (self.info.height * component.vertical_sample).div_ceil(self.v_max);

            (blocks_for(width), blocks_for(height))
        } else {
            (self.mcu_x, self.mcu_y)
        };

        trace!(
            "Decoding scan with {} components over {}x{} units",
            self.num_scans,
            blocks_x,
            blocks_y
        );

        let mut block = [0_i32; 64];
        let mut todo = self.restart_interval;
        let mut expected_rst: u8 = 0;

        for unit_y in 0..blocks_y {
            for unit_x in 0..blocks_x {
                if self.restart_interval > 0 {
                    if todo == 0 {
                        self.handle_restart(&mut stream, expected_rst)?;
                        expected_rst = (expected_rst + 1) & 7;
                        todo = self.restart_interval;
                    }
                    todo -= 1;
                }

                for &k in &self.z_order[..self.num_scans] {
                    let component = &mut self.components[k];

                    let (dc_table, ac_table) = match (
                        &self.dc_huffman_tables[component.dc_huff_table],
                        &self.ac_huffman_tables[component.ac_huff_table]
                    ) {
                        (Some(dc), Some(ac)) => (dc, ac),
                        _ => return Err(DecodeErrors::FormatStatic("Missing Huffman table"))
                    };

                    let (h, v) = if single {
                        (1, 1)
                    } else {
                        (component.horizontal_sample, component.vertical_sample)
                    };

                    for y in 0..v {
                        for x in 0..h {
                            decode_block(&mut stream, dc_table, ac_table, component, &mut block)?;

                            let block_x = unit_x * h + x;
                            let block_y = unit_y * v + y;
                            let offset = block_y * 8 * component.width_stride + block_x * 8;

                            idct_int(
                                &mut block,
                                &mut component.plane[offset..],
                                component.width_stride
                            );
                        }
                    }
                }

                if stream.consumed_padding() {
                    return Err(DecodeErrors::ExhaustedData);
                }
            }
        }
        if let Some(marker) = stream.marker {
            trace!("Scan ended at marker {:?}", marker);
        }
        self.stream.skip(stream.position())?;

        Ok(())
    }

    /// Move past a restart marker and reset the DC predictors
    fn handle_restart(&mut self, stream: &mut BitStream, expected: u8) -> Result<(), DecodeErrors> {
        match stream.reset_at_restart() {
            Some(n) if n == expected => {}
            Some(n) => {
                warn!("Expected restart marker RST{}, found RST{}", expected, n);
            }
            None => {
                if self.options.get_strict_mode() {
                    return Err(DecodeErrors::MCUError(format!(
                        "Expected restart marker RST{expected}, found none"
                    )));
                }
                warn!("Expected restart marker RST{}, found none", expected);
            }
        }
        for &k in &self.z_order[..self.num_scans] {
            self.components[k].dc_pred = 0;
        }
        Ok(())
    }
}

/// Decode one block and dequantize it into `block`, in natural order
///
/// Section F.2.2
fn decode_block(
    stream: &mut BitStream, dc_table: &HuffmanTable, ac_table: &HuffmanTable,
    component: &mut Components, block: &mut [i32; 64]
) -> Result<(), DecodeErrors> {
    block.fill(0);

    let qt = &component.quantization_table;

    let magnitude = stream.decode_symbol(dc_table)?;

    if magnitude > 11 {
        return Err(DecodeErrors::HuffmanDecode(format!(
            "Invalid DC difference magnitude {magnitude}"
        )));
    }
    let diff = stream.receive_extend(magnitude);

    component.dc_pred = component.dc_pred.wrapping_add(diff);
    block[0] = component.dc_pred.wrapping_mul(qt[0]);

    let mut k = 1;

    while k < 64 {
        let rs = stream.decode_symbol(ac_table)?;

        let run = usize::from(rs >> 4);
        let size = rs & 0x0F;

        if size == 0 {
            if run == 15 {
                // ZRL, sixteen zeroes
                k += 16;
                continue;
            }
            // EOB
            break;
        }
        k += run;

        if k > 63 {
            return Err(DecodeErrors::MCUError(format!(
                "Coefficient index {k} out of bounds"
            )));
        }
        let pos = UN_ZIGZAG[k];

        block[pos] = stream.receive_extend(size).wrapping_mul(qt[pos]);

        k += 1;
    }
    Ok(())
}
