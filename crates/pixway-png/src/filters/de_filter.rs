/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

use crate::filters::paeth;

#[allow(clippy::manual_memcpy)]
pub fn handle_sub(raw: &[u8], current: &mut [u8], components: usize) {
    if current.len() < components || raw.len() < components {
        return;
    }
    // handle leftmost byte explicitly
    for i in 0..components {
        current[i] = raw[i];
    }
    // raw length is one row,so always keep it in check
    let end = current.len().min(raw.len());

    for i in components..end {
        let a = current[i - components];
        current[i] = raw[i].wrapping_add(a);
    }
}

pub fn handle_up(prev_row: &[u8], raw: &[u8], current: &mut [u8]) {
    for ((filt, above), out_px) in raw.iter().zip(prev_row).zip(current.iter_mut()) {
        *out_px = filt.wrapping_add(*above);
    }
}

pub fn handle_avg(prev_row: &[u8], raw: &[u8], current: &mut [u8], components: usize) {
    if raw.len() < components || current.len() < components || prev_row.len() < components {
        return;
    }
    // handle leftmost byte explicitly
    for i in 0..components {
        current[i] = raw[i].wrapping_add(prev_row[i] >> 1);
    }
    let end = current.len().min(raw.len()).min(prev_row.len());

    for i in components..end {
        // this needs to be performed with at least 9 bits of precision, so bump
        // it up to 16.
        let a = u16::from(current[i - components]);
        let b = u16::from(prev_row[i]);

        let c = ((a + b) >> 1) as u8;

        current[i] = raw[i].wrapping_add(c);
    }
}

/// Average filter for the first row, the row above is all zeroes
pub fn handle_avg_first(raw: &[u8], current: &mut [u8], components: usize) {
    if raw.len() < components || current.len() < components {
        return;
    }
    for i in 0..components {
        current[i] = raw[i];
    }
    let end = current.len().min(raw.len());

    for i in components..end {
        let a = current[i - components];
        current[i] = raw[i].wrapping_add(a >> 1);
    }
}

pub fn handle_paeth(prev_row: &[u8], raw: &[u8], current: &mut [u8], components: usize) {
    if raw.len() < components || current.len() < components || prev_row.len() < components {
        return;
    }
    // handle leftmost byte explicitly, a and c are zero
    // so the predictor is always b
    for i in 0..components {
        current[i] = raw[i].wrapping_add(paeth(0, prev_row[i], 0));
    }
    let end = current.len().min(raw.len()).min(prev_row.len());

    for i in components..end {
        let a = current[i - components];
        let b = prev_row[i];
        let c = prev_row[i - components];

        current[i] = raw[i].wrapping_add(paeth(a, b, c));
    }
}

/// Paeth filter for the first row
///
/// With `b` and `c` zero the predictor always picks `a`,
/// making this the same as the sub filter
pub fn handle_paeth_first(raw: &[u8], current: &mut [u8], components: usize) {
    handle_sub(raw, current, components);
}
