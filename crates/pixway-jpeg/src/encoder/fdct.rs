/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! Integer forward DCT
//!
//! A slow but accurate integer transform in the style of libjpeg's `jfdctint`.
//! Constants carry 13 fractional bits, the row pass keeps 2 extra bits
//! of precision for the column pass.
//!
//! Outputs are scaled up by 8 relative to the true DCT, the quantizer
//! removes that factor.

const CONST_BITS: i32 = 13;
const PASS1_BITS: i32 = 2;

const FIX_0_298631336: i32 = 2446;
const FIX_0_390180644: i32 = 3196;
const FIX_0_541196100: i32 = 4433;
const FIX_0_765366865: i32 = 6270;
const FIX_0_899976223: i32 = 7373;
const FIX_1_175875602: i32 = 9633;
const FIX_1_501321110: i32 = 12299;
const FIX_1_847759065: i32 = 15137;
const FIX_1_961570560: i32 = 16069;
const FIX_2_053119869: i32 = 16819;
const FIX_2_562915447: i32 = 20995;
const FIX_3_072711026: i32 = 25172;

#[inline(always)]
const fn descale(x: i32, n: i32) -> i32 {
    (x + (1 << (n - 1))) >> n
}

/// One dimensional transform of 8 values `stride` apart
///
/// `final_pass` selects the descaling of the column pass
#[inline(always)]
fn fdct_1d(data: &mut [i32; 64], start: usize, stride: usize, final_pass: bool) {
    let at = |i: usize| start + i * stride;

    let tmp0 = data[at(0)] + data[at(7)];
    let tmp7 = data[at(0)] - data[at(7)];
    let tmp1 = data[at(1)] + data[at(6)];
    let tmp6 = data[at(1)] - data[at(6)];
    let tmp2 = data[at(2)] + data[at(5)];
    let tmp5 = data[at(2)] - data[at(5)];
    let tmp3 = data[at(3)] + data[at(4)];
    let tmp4 = data[at(3)] - data[at(4)];

    // even part
    let tmp10 = tmp0 + tmp3;
    let tmp13 = tmp0 - tmp3;
    let tmp11 = tmp1 + tmp2;
    let tmp12 = tmp1 - tmp2;

    let odd_shift = if final_pass {
        CONST_BITS + PASS1_BITS
    } else {
        CONST_BITS - PASS1_BITS
    };

    if final_pass {
        data[at(0)] = descale(tmp10 + tmp11, PASS1_BITS);
        data[at(4)] = descale(tmp10 - tmp11, PASS1_BITS);
    } else {
        data[at(0)] = (tmp10 + tmp11) << PASS1_BITS;
        data[at(4)] = (tmp10 - tmp11) << PASS1_BITS;
    }

    let z1 = (tmp12 + tmp13) * FIX_0_541196100;

    data[at(2)] = descale(z1 + tmp13 * FIX_0_765366865, odd_shift);
    data[at(6)] = descale(z1 - tmp12 * FIX_1_847759065, odd_shift);

    // odd part
    let z1 = tmp4 + tmp7;
    let z2 = tmp5 + tmp6;
    let z3 = tmp4 + tmp6;
    let z4 = tmp5 + tmp7;
    let z5 = (z3 + z4) * FIX_1_175875602;

    let tmp4 = tmp4 * FIX_0_298631336;
    let tmp5 = tmp5 * FIX_2_053119869;
    let tmp6 = tmp6 * FIX_3_072711026;
    let tmp7 = tmp7 * FIX_1_501321110;

    let z1 = -z1 * FIX_0_899976223;
    let z2 = -z2 * FIX_2_562915447;
    let z3 = -z3 * FIX_1_961570560 + z5;
    let z4 = -z4 * FIX_0_390180644 + z5;

    data[at(7)] = descale(tmp4 + z1 + z3, odd_shift);
    data[at(5)] = descale(tmp5 + z2 + z4, odd_shift);
    data[at(3)] = descale(tmp6 + z2 + z3, odd_shift);
    data[at(1)] = descale(tmp7 + z1 + z4, odd_shift);
}

/// Forward DCT of a level shifted block, in place
///
/// Input samples are in `-128..=127`, the output is in natural order
pub(crate) fn fdct(block: &mut [i32; 64]) {
    for row in 0..8 {
        fdct_1d(block, row * 8, 1, false);
    }
    for column in 0..8 {
        fdct_1d(block, column, 8, true);
    }
}

#[cfg(test)]
mod tests {
    use nanorand::Rng;

    use super::fdct;
    use crate::idct::idct_int;

    #[test]
    fn flat_block_has_only_dc() {
        let mut block = [37; 64];
        fdct(&mut block);

        assert_eq!(block[0], 64 * 37);
        assert!(block[1..].iter().all(|x| *x == 0), "{block:?}");
    }

    /// Forward then inverse transform, undoing the level shift and scaling
    fn round_trip(original: &[u8; 64]) -> [u8; 64] {
        let mut block = [0_i32; 64];

        for (out, &value) in block.iter_mut().zip(original) {
            *out = i32::from(value) - 128;
        }
        fdct(&mut block);
        // remove the scale factor of 8
        for value in &mut block {
            *value = (*value + 4).div_euclid(8);
        }
        let mut output = [0_u8; 64];
        idct_int(&mut block, &mut output, 8);

        output
    }

    #[test]
    fn inverse_recovers_block() {
        let mut original = [0_u8; 64];

        for (i, value) in original.iter_mut().enumerate() {
            let (x, y) = (i % 8, i / 8);
            *value = (x * 20 + y * 9 + (x * y) % 7) as u8;
        }
        let output = round_trip(&original);

        for (a, b) in original.iter().zip(&output) {
            assert!(a.abs_diff(*b) <= 2, "{original:?} vs {output:?}");
        }
    }

    #[test]
    fn inverse_recovers_random_blocks() {
        let mut rand = nanorand::WyRand::new_seed(0xdc7);

        for _ in 0..4000 {
            let mut original = [0_u8; 64];
            rand.fill(&mut original);

            let output = round_trip(&original);

            for (a, b) in original.iter().zip(&output) {
                assert!(a.abs_diff(*b) <= 2, "{original:?} vs {output:?}");
            }
        }
        for flat in [0_u8, 255] {
            let output = round_trip(&[flat; 64]);
            assert!(output.iter().all(|x| x.abs_diff(flat) <= 1), "{output:?}");
        }
    }
}
