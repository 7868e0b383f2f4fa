/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! Platform independent IDCT algorithm
//!
//! An integer implementation of the separable 8x8 inverse DCT with
//! 12 bits of fixed point precision, the level shift by 128 and clamping
//! to `0..=255` are folded into the final pass.

const SCALE_BITS: i32 = 512 + 65536 + (128 << 17);

#[inline(always)]
fn wa(a: i32, b: i32) -> i32 {
    a.wrapping_add(b)
}

#[inline(always)]
fn ws(a: i32, b: i32) -> i32 {
    a.wrapping_sub(b)
}

#[inline(always)]
fn wm(a: i32, b: i32) -> i32 {
    a.wrapping_mul(b)
}

/// Multiply a number by 4096
#[inline]
fn fsh(x: i32) -> i32 {
    x << 12
}

/// Clamp values between 0 and 255
#[inline]
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn clamp(a: i32) -> u8 {
    a.clamp(0, 255) as u8
}

/// A block where only the DC coefficient is set is a flat block
#[inline]
fn idct_int_1x1(in_vector: &[i32; 64], out_vector: &mut [u8], stride: usize) {
    let coeff = clamp(wa(wa(in_vector[0], 4), 1024) >> 3);

    for row in out_vector.chunks_mut(stride).take(8) {
        row[..8].fill(coeff);
    }
}

/// Inverse DCT of a dequantized block in natural order
///
/// # Arguments
/// - `in_vector`: Coefficients, clobbered during the transform
/// - `out_vector`: Receives 8 rows of 8 samples, rows are `stride` apart
/// - `stride`: Distance between rows in `out_vector`
#[allow(clippy::too_many_lines, clippy::cast_possible_truncation)]
pub fn idct_int(in_vector: &mut [i32; 64], out_vector: &mut [u8], stride: usize) {
    if in_vector[1..] == [0_i32; 63] {
        return idct_int_1x1(in_vector, out_vector, stride);
    }

    // vertical pass
    for ptr in 0..8 {
        let p2 = in_vector[ptr + 16];
        let p3 = in_vector[ptr + 48];

        let p1 = wm(wa(p2, p3), 2217);

        let t2 = wa(p1, wm(p3, -7567));
        let t3 = wa(p1, wm(p2, 3135));

        let p2 = in_vector[ptr];
        let p3 = in_vector[32 + ptr];

        let t0 = fsh(wa(p2, p3));
        let t1 = fsh(ws(p2, p3));

        let x0 = wa(wa(t0, t3), 512);
        let x3 = wa(ws(t0, t3), 512);
        let x1 = wa(wa(t1, t2), 512);
        let x2 = wa(ws(t1, t2), 512);

        let (t0, t1, t2, t3) = odd_part(
            in_vector[ptr + 56],
            in_vector[ptr + 40],
            in_vector[ptr + 24],
            in_vector[ptr + 8]
        );

        in_vector[ptr] = wa(x0, t3) >> 10;
        in_vector[ptr + 8] = wa(x1, t2) >> 10;
        in_vector[ptr + 16] = wa(x2, t1) >> 10;
        in_vector[ptr + 24] = wa(x3, t0) >> 10;
        in_vector[ptr + 32] = ws(x3, t0) >> 10;
        in_vector[ptr + 40] = ws(x2, t1) >> 10;
        in_vector[ptr + 48] = ws(x1, t2) >> 10;
        in_vector[ptr + 56] = ws(x0, t3) >> 10;
    }

    // horizontal pass
    for (row, out) in in_vector
        .chunks_exact(8)
        .zip(out_vector.chunks_mut(stride))
    {
        let p2 = row[2];
        let p3 = row[6];

        let p1 = wm(wa(p2, p3), 2217);
        let t2 = wa(p1, wm(p3, -7567));
        let t3 = wa(p1, wm(p2, 3135));

        let p2 = row[0];
        let p3 = row[4];

        let t0 = fsh(wa(p2, p3));
        let t1 = fsh(ws(p2, p3));

        let x0 = wa(wa(t0, t3), SCALE_BITS);
        let x3 = wa(ws(t0, t3), SCALE_BITS);
        let x1 = wa(wa(t1, t2), SCALE_BITS);
        let x2 = wa(ws(t1, t2), SCALE_BITS);

        let (t0, t1, t2, t3) = odd_part(row[7], row[5], row[3], row[1]);

        out[0] = clamp(wa(x0, t3) >> 17);
        out[1] = clamp(wa(x1, t2) >> 17);
        out[2] = clamp(wa(x2, t1) >> 17);
        out[3] = clamp(wa(x3, t0) >> 17);
        out[4] = clamp(ws(x3, t0) >> 17);
        out[5] = clamp(ws(x2, t1) >> 17);
        out[6] = clamp(ws(x1, t2) >> 17);
        out[7] = clamp(ws(x0, t3) >> 17);
    }
}

/// Odd half of the butterfly, shared by both passes
#[inline(always)]
fn odd_part(mut t0: i32, mut t1: i32, mut t2: i32, mut t3: i32) -> (i32, i32, i32, i32) {
    let p3 = wa(t0, t2);
    let p4 = wa(t1, t3);
    let p1 = wa(t0, t3);
    let p2 = wa(t1, t2);
    let p5 = wm(wa(p3, p4), 4816);

    t0 = wm(t0, 1223);
    t1 = wm(t1, 8410);
    t2 = wm(t2, 12586);
    t3 = wm(t3, 6149);

    let p1 = wa(p5, wm(p1, -3685));
    let p2 = wa(p5, wm(p2, -10497));
    let p3 = wm(p3, -8034);
    let p4 = wm(p4, -1597);

    t3 = wa(t3, wa(p1, p4));
    t2 = wa(t2, wa(p2, p3));
    t1 = wa(t1, wa(p2, p4));
    t0 = wa(t0, wa(p1, p3));

    (t0, t1, t2, t3)
}
