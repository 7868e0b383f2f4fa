/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! This module exports a single struct to store information about
//! JPEG image components
//!
//! The data is extracted from a SOF header.

use alloc::format;
use alloc::vec::Vec;

use crate::errors::{DecodeErrors, UnsupportedSchemes};

/// Component Data from start of frame
#[derive(Clone)]
pub(crate) struct Components {
    /// The type of component that has the metadata below, can be Y,Cb or Cr
    pub id:                        u8,
    /// Sub-sampling ratio of this component in the x-plane
    pub horizontal_sample:         usize,
    /// Sub-sampling ratio of this component in the y-plane
    pub vertical_sample:           usize,
    /// Quantization table number
    pub quantization_table_number: u8,
    /// Specifies quantization table to use with this component
    pub quantization_table:        [i32; 64],
    /// dc prediction for the component
    pub dc_pred:                   i32,
    /// DC huffman table position
    pub dc_huff_table:             usize,
    /// AC huffman table position for this element.
    pub ac_huff_table:             usize,
    /// Width of the decoded plane, a whole number of MCUs
    pub width_stride:              usize,
    /// Decoded samples of this component, before upsampling
    pub plane:                     Vec<u8>,
    /// Whether a scan carried this component
    pub decoded:                   bool
}

impl Components {
    /// Create a new instance from three bytes from the start of frame
    pub fn from(a: [u8; 3], pos: u8) -> Result<Components, DecodeErrors> {
        let id = a[0];

        let horizontal_sample = a[1] >> 4;
        let vertical_sample = a[1] & 0x0f;

        if !(1..=4).contains(&horizontal_sample) || !(1..=4).contains(&vertical_sample) {
            return Err(DecodeErrors::SofError(format!(
                "Invalid sampling factors {horizontal_sample}x{vertical_sample} for component {pos}"
            )));
        }
        if horizontal_sample > 2 || vertical_sample > 2 {
            return Err(DecodeErrors::Unsupported(UnsupportedSchemes::SamplingFactors(
                horizontal_sample,
                vertical_sample
            )));
        }

        let quantization_table_number = a[2];

        // confirm quantization number is between 0 and MAX_COMPONENTS
        if usize::from(quantization_table_number) >= 4 {
            return Err(DecodeErrors::SofError(format!(
                "Too large quantization number :{quantization_table_number}, expected value between 0 and 3"
            )));
        }

        Ok(Components {
            id,
            horizontal_sample: usize::from(horizontal_sample),
            vertical_sample: usize::from(vertical_sample),
            quantization_table_number,
            quantization_table: [0; 64],
            dc_pred: 0,
            dc_huff_table: 0,
            ac_huff_table: 0,
            width_stride: 0,
            plane: Vec::new(),
            decoded: false
        })
    }
}
