/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! Scanline filtering and un-filtering
//!
//! Every filter predicts a byte from its neighbours, `a` the byte one pixel to the left,
//! `b` the byte above and `c` the byte above and to the left. Neighbours outside the image
//! are zero.
pub(crate) use de_filter::{
    handle_avg, handle_avg_first, handle_paeth, handle_paeth_first, handle_sub, handle_up
};
pub(crate) use filter::choose_compression_filter;

use crate::enums::FilterMethod;

mod de_filter;
mod filter;

/// The paeth predictor
///
/// Picks whichever of `a`, `b` and `c` is closest to `a + b - c`,
/// ties are resolved in the order `a`, `b`, `c`
#[inline(always)]
pub(crate) fn paeth(a: u8, b: u8, c: u8) -> u8 {
    let a = i16::from(a);
    let b = i16::from(b);
    let c = i16::from(c);

    let p = a + b - c;

    let pa = (p - a).abs();
    let pb = (p - b).abs();
    let pc = (p - c).abs();

    if pa <= pb && pa <= pc {
        a as u8
    } else if pb <= pc {
        b as u8
    } else {
        c as u8
    }
}

/// Filter a single scanline
///
/// # Arguments
/// - `current`: Unfiltered bytes of the row
/// - `previous`: Unfiltered bytes of the row above, empty for the first row
/// - `output`: Receives the filter type byte followed by the filtered row,
///    must be `current.len() + 1` bytes
/// - `filter`: The filter to apply
/// - `components`: Bytes per pixel
pub fn filter_scanline(
    current: &[u8], previous: &[u8], output: &mut [u8], filter: FilterMethod, components: usize
) {
    filter::filter_scanline(current, previous, output, filter, components)
}

/// Reverse [`filter_scanline`]
///
/// # Arguments
/// - `raw`: Filtered bytes of the row, without the filter type byte
/// - `previous`: Reconstructed row above, empty for the first row
/// - `current`: Receives the reconstructed row, must be `raw.len()` bytes
/// - `filter`: The filter the row was stored with
/// - `components`: Bytes per pixel
pub fn unfilter_scanline(
    raw: &[u8], previous: &[u8], current: &mut [u8], filter: FilterMethod, components: usize
) {
    let first_row = previous.is_empty();

    match filter {
        FilterMethod::None => current.copy_from_slice(raw),
        FilterMethod::Sub => handle_sub(raw, current, components),
        // up for the first row becomes a memcpy
        FilterMethod::Up if first_row => current.copy_from_slice(raw),
        FilterMethod::Up => handle_up(previous, raw, current),
        FilterMethod::Average if first_row => handle_avg_first(raw, current, components),
        FilterMethod::Average => handle_avg(previous, raw, current, components),
        FilterMethod::Paeth if first_row => handle_paeth_first(raw, current, components),
        FilterMethod::Paeth => handle_paeth(previous, raw, current, components)
    }
}
