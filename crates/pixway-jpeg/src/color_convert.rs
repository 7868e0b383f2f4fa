/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! Color conversion of decoded rows
//!
//! JFIF YCbCr is full range BT.601, the inverse transform runs with 14 bits
//! of fixed point precision.

// Bt.601 Full Range inverse coefficients computed with 14 bits of precision
const Y_CF: i32 = 16384;
const CR_CF: i32 = 22970;
const CB_CF: i32 = 29032;
const C_G_CR_COEF_1: i32 = -11700;
const C_G_CB_COEF_2: i32 = -5638;
const YUV_PREC: i32 = 14;
// Rounding const for YUV -> RGB conversion: floating equivalent 0.499(9).
const YUV_RND: i32 = (1 << (YUV_PREC - 1)) - 1;

/// Limit values to 0 and 255
#[inline]
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn clamp(a: i32) -> u8 {
    a.clamp(0, 255) as u8
}

/// Convert a row of YCbCr samples to interleaved RGB
pub(crate) fn ycbcr_to_rgb(y: &[u8], cb: &[u8], cr: &[u8], output: &mut [u8]) {
    for (((&y, &cb), &cr), out) in y
        .iter()
        .zip(cb)
        .zip(cr)
        .zip(output.chunks_exact_mut(3))
    {
        let cr = i32::from(cr) - 128;
        let cb = i32::from(cb) - 128;

        let y0 = i32::from(y) * Y_CF + YUV_RND;

        let r = (y0 + cr * CR_CF) >> YUV_PREC;
        let g = (y0 + cr * C_G_CR_COEF_1 + cb * C_G_CB_COEF_2) >> YUV_PREC;
        let b = (y0 + cb * CB_CF) >> YUV_PREC;

        out[0] = clamp(r);
        out[1] = clamp(g);
        out[2] = clamp(b);
    }
}

/// Interleave three planes that already hold RGB
pub(crate) fn write_rgb(r: &[u8], g: &[u8], b: &[u8], output: &mut [u8]) {
    for (((&r, &g), &b), out) in r.iter().zip(g).zip(b).zip(output.chunks_exact_mut(3)) {
        out[0] = r;
        out[1] = g;
        out[2] = b;
    }
}
