/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! Decode Decoder markers/segments
//!
//! This file deals with decoding header information in a jpeg file
//!
use alloc::format;
use alloc::string::ToString;
use alloc::vec::Vec;

use pixway_core::log::{debug, trace};

use crate::components::Components;
use crate::decoder::{JpegDecoder, MAX_COMPONENTS};
use crate::errors::{DecodeErrors, UnsupportedSchemes};
use crate::huffman::HuffmanTable;
use crate::misc::UN_ZIGZAG;

///**B.2.4.2 Huffman table-specification syntax**
#[allow(clippy::similar_names, clippy::cast_sign_loss)]
pub(crate) fn parse_huffman(decoder: &mut JpegDecoder) -> Result<(), DecodeErrors> {
    // Read the length of the Huffman table
    let mut dht_length = i32::from(decoder.stream.get_u16_be_err()?.checked_sub(2).ok_or(
        DecodeErrors::FormatStatic("Invalid Huffman length in image")
    )?);

    while dht_length > 16 {
        // HT information
        let ht_info = decoder.stream.get_u8_err()?;
        // upper nibble indicates whether the table is DC or AC type
        let dc_or_ac = (ht_info >> 4) & 0xF;
        // Indicate the position of this table, should be less than 4;
        let index = (ht_info & 0xF) as usize;

        if index >= MAX_COMPONENTS {
            return Err(DecodeErrors::Format(format!(
                "Invalid DHT index {index}, expected between 0 and 3"
            )));
        }

        if dc_or_ac > 1 {
            return Err(DecodeErrors::Format(format!(
                "Invalid DHT position {dc_or_ac}, should be 0 or 1"
            )));
        }
        // read the number of symbols
        let num_symbols = decoder.stream.read_fixed_bytes_or_error::<16>()?;

        dht_length -= 1 + 16;

        let symbols_sum: i32 = num_symbols.iter().map(|f| i32::from(*f)).sum();

        // The sum of the number of symbols cannot be greater than 256;
        if symbols_sum > 256 {
            return Err(DecodeErrors::FormatStatic(
                "Encountered Huffman table with excessive length in DHT"
            ));
        }
        if symbols_sum > dht_length {
            return Err(DecodeErrors::Format(format!(
                "Excessive Huffman table of length {symbols_sum} found when header length is {dht_length}"
            )));
        }
        dht_length -= symbols_sum;
        // A table containing symbols in increasing code length
        let symbols = decoder.stream.get_as_ref(symbols_sum as usize)?;

        let table = HuffmanTable::new(&num_symbols, symbols)?;

        trace!(
            "Assigning {} huffman table {index} with {symbols_sum} symbols",
            if dc_or_ac == 0 { "DC" } else { "AC" }
        );
        // store
        match dc_or_ac {
            0 => decoder.dc_huffman_tables[index] = Some(table),
            _ => decoder.ac_huffman_tables[index] = Some(table)
        }
    }

    if dht_length > 0 {
        return Err(DecodeErrors::FormatStatic("Bogus Huffman table definition"));
    }

    Ok(())
}

///**B.2.4.1 Quantization table-specification syntax**
#[allow(clippy::cast_possible_truncation, clippy::needless_range_loop)]
pub(crate) fn parse_dqt(img: &mut JpegDecoder) -> Result<(), DecodeErrors> {
    // read length
    let mut qt_length =
        img.stream
            .get_u16_be_err()?
            .checked_sub(2)
            .ok_or(DecodeErrors::FormatStatic(
                "Invalid DQT length. Length should be greater than 2"
            ))?;
    // A single DQT header may have multiple QT's
    while qt_length > 0 {
        let qt_info = img.stream.get_u8_err()?;
        // 0 = 8 bit otherwise 16 bit dqt
        let precision = (qt_info >> 4) as usize;
        // last 4 bits give us position
        let table_position = (qt_info & 0x0f) as usize;
        let precision_value = 64 * (precision + 1);

        if (precision_value + 1) as u16 > qt_length {
            return Err(DecodeErrors::DqtError(format!("Invalid QT table bytes left :{}. Too small to construct a valid qt table which should be {} long", qt_length, precision_value + 1)));
        }

        let mut qt_values = [0_i32; 64];

        match precision {
            0 => {
                for i in 0..64 {
                    qt_values[i] = i32::from(img.stream.get_u8_err()?);
                }
            }
            1 => {
                // 16 bit quantization tables
                for i in 0..64 {
                    qt_values[i] = i32::from(img.stream.get_u16_be_err()?);
                }
            }
            _ => {
                return Err(DecodeErrors::DqtError(format!(
                    "Expected QT precision value of either 0 or 1, found {precision:?}"
                )));
            }
        }
        qt_length -= (precision_value as u16) + 1 /*QT BIT*/;

        if table_position >= MAX_COMPONENTS {
            return Err(DecodeErrors::DqtError(format!(
                "Too large table position for QT :{table_position}, expected between 0 and 3"
            )));
        }

        trace!("Assigning qt table {table_position} with precision {precision}");
        img.qt_tables[table_position] = Some(un_zig_zag(&qt_values));
    }

    Ok(())
}

/// Section:`B.2.2 Frame header syntax`
pub(crate) fn parse_start_of_frame(img: &mut JpegDecoder) -> Result<(), DecodeErrors> {
    if img.seen_sof {
        return Err(DecodeErrors::SofError(
            "Two Start of Frame Markers".to_string()
        ));
    }
    // Get length of the frame header
    let length = img.stream.get_u16_be_err()?;
    // usually 8, but can be 12 and 16, we currently support only 8
    let dt_precision = img.stream.get_u8_err()?;

    if dt_precision != 8 {
        return Err(DecodeErrors::Unsupported(UnsupportedSchemes::Precision(
            dt_precision
        )));
    }

    let img_height = usize::from(img.stream.get_u16_be_err()?);
    let img_width = usize::from(img.stream.get_u16_be_err()?);

    trace!("Image width  :{}", img_width);
    trace!("Image height :{}", img_height);

    // Check image width or height is zero
    if img_width == 0 || img_height == 0 {
        return Err(DecodeErrors::ZeroError);
    }

    img.options.check_dimensions(img_width, img_height)?;

    // Number of components for the image.
    let num_components = img.stream.get_u8_err()?;

    if num_components == 0 {
        return Err(DecodeErrors::SofError(
            "Number of components cannot be zero.".to_string()
        ));
    }

    let expected = 8 + 3 * u16::from(num_components);
    // length should be equal to num components
    if length != expected {
        return Err(DecodeErrors::SofError(format!(
            "Length of start of frame differs from expected {expected},value is {length}"
        )));
    }

    if num_components != 1 && num_components != 3 {
        return Err(DecodeErrors::Unsupported(UnsupportedSchemes::ComponentCount(
            num_components
        )));
    }

    trace!("Image components : {}", num_components);

    let mut components: Vec<Components> = Vec::with_capacity(usize::from(num_components));

    for pos in 0..num_components {
        // read 3 bytes for each component
        let temp = img.stream.read_fixed_bytes_or_error::<3>()?;

        // create a component.
        let component = Components::from(temp, pos)?;

        if components.iter().any(|c| c.id == component.id) {
            return Err(DecodeErrors::SofError(format!(
                "Duplicate component id {}",
                component.id
            )));
        }
        components.push(component);
    }

    if num_components == 1 {
        // a lone component is never interleaved, its sampling factors
        // carry no meaning
        debug!("Grayscale image, resetting sampling factors to 1x1");
        components[0].horizontal_sample = 1;
        components[0].vertical_sample = 1;
    }

    img.h_max = components
        .iter()
        .map(|c| c.horizontal_sample)
        .max()
        .unwrap_or(1);
    img.v_max = components
        .iter()
        .map(|c| c.vertical_sample)
        .max()
        .unwrap_or(1);

    img.mcu_x = (img_width + 8 * img.h_max - 1) / (8 * img.h_max);
    img.mcu_y = (img_height + 8 * img.v_max - 1) / (8 * img.v_max);

    img.info.width = img_width;
    img.info.height = img_height;
    img.info.components = num_components;

    img.components = components;
    img.seen_sof = true;

    Ok(())
}

/// Parse a start of scan data
pub(crate) fn parse_sos(image: &mut JpegDecoder) -> Result<(), DecodeErrors> {
    if !image.seen_sof {
        return Err(DecodeErrors::FormatStatic(
            "Start of scan found before start of frame"
        ));
    }
    // Scan header length
    let ls = usize::from(image.stream.get_u16_be_err()?);
    // Number of image components in scan
    let ns = image.stream.get_u8_err()?;

    let smallest_size = 6 + 2 * usize::from(ns);

    if ls != smallest_size {
        return Err(DecodeErrors::SosError(format!(
            "Bad SOS length {ls},corrupt jpeg"
        )));
    }

    // Check number of components.
    if ns == 0 || usize::from(ns) > image.components.len() {
        return Err(DecodeErrors::SosError(format!(
            "Invalid number of components in start of scan {ns}, expected in range 1..={}",
            image.components.len()
        )));
    }

    let mut seen = [false; MAX_COMPONENTS];

    for i in 0..usize::from(ns) {
        let id = image.stream.get_u8_err()?;
        // DC and AC huffman table position
        // top 4 bits contain dc huffman destination table
        // lower four bits contain ac huffman destination table
        let y = image.stream.get_u8_err()?;

        let j = image
            .components
            .iter()
            .position(|c| c.id == id)
            .ok_or_else(|| {
                DecodeErrors::SosError(format!(
                    "Invalid component id {}, expected one one of {:?}",
                    id,
                    image.components.iter().map(|c| c.id).collect::<Vec<_>>()
                ))
            })?;

        if seen[j] {
            return Err(DecodeErrors::SosError(format!(
                "Duplicate ID {id} seen twice in the same scan"
            )));
        }
        seen[j] = true;

        let dc_table = usize::from(y >> 4);
        let ac_table = usize::from(y & 0xF);

        if dc_table >= MAX_COMPONENTS || ac_table >= MAX_COMPONENTS {
            return Err(DecodeErrors::SosError(format!(
                "Invalid huffman table destination {dc_table}/{ac_table} for component {id}"
            )));
        }

        let component = &mut image.components[j];
        component.dc_huff_table = dc_table;
        component.ac_huff_table = ac_table;
        image.z_order[i] = j;

        trace!(
            "Assigned huffman tables {}/{} to component {j}, id={}",
            dc_table,
            ac_table,
            id
        );
    }
    image.num_scans = usize::from(ns);

    // Start of spectral / predictor selection. (between 0 and 63)
    let spec_start = image.stream.get_u8_err()?;
    // End of spectral selection
    let spec_end = image.stream.get_u8_err()?;
    // successive approximation bit positions
    let bit_approx = image.stream.get_u8_err()?;

    // sequential images code all coefficients in one go
    if spec_start != 0 || spec_end != 63 || bit_approx != 0 {
        return Err(DecodeErrors::SosError(format!(
            "Invalid Ss={spec_start}, Se={spec_end}, Ah/Al={bit_approx:#04X} for a sequential image"
        )));
    }

    Ok(())
}

/// Parse Adobe App14 segment
pub(crate) fn parse_app14(decoder: &mut JpegDecoder) -> Result<(), DecodeErrors> {
    let length = usize::from(decoder.stream.get_u16_be_err()?);

    if length < 2 {
        return Err(DecodeErrors::FormatStatic("Too small APP14 length"));
    }
    let payload = decoder.stream.get_as_ref(length - 2)?;

    // "Adobe", version, flags0, flags1, transform
    if payload.len() >= 12 && payload.starts_with(b"Adobe") {
        let transform = payload[11];

        debug!("Adobe APP14 segment, color transform {}", transform);
        decoder.adobe_transform = Some(transform);
    }
    Ok(())
}

/// Skip a segment whose contents we don't need
pub(crate) fn skip_segment(decoder: &mut JpegDecoder) -> Result<(), DecodeErrors> {
    let length = decoder.stream.get_u16_be_err()?;

    if length < 2 {
        return Err(DecodeErrors::Format(format!(
            "Found a marker with invalid length : {length}"
        )));
    }
    decoder.stream.skip(usize::from(length - 2))?;

    Ok(())
}

/// Small utility function to print Un-zig-zagged quantization tables
fn un_zig_zag(a: &[i32; 64]) -> [i32; 64] {
    let mut output = [0; 64];

    for (value, &position) in a.iter().zip(UN_ZIGZAG.iter()) {
        output[position] = *value;
    }
    output
}
