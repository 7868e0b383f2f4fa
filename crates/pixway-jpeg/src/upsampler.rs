/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! Up-sampling routines
//!
//! Chroma planes are brought up to luma resolution by replicating samples.
//! Vertical upsampling picks the source row, so only rows need widening here.

/// Widen `input` by `factor` into `output`
///
/// Every input sample is repeated `factor` times, `output` decides how many
/// samples are produced and `input` must cover them.
pub(crate) fn upsample_row(input: &[u8], factor: usize, output: &mut [u8]) {
    if factor == 1 {
        output.copy_from_slice(&input[..output.len()]);
        return;
    }
    for (out_chunk, &sample) in output.chunks_mut(factor).zip(input) {
        out_chunk.fill(sample);
    }
}

#[cfg(test)]
mod tests {
    use super::upsample_row;

    #[test]
    fn factor_one_copies() {
        let input = [1, 2, 3, 4, 5];
        let mut output = [0; 3];

        upsample_row(&input, 1, &mut output);
        assert_eq!(output, [1, 2, 3]);
    }

    #[test]
    fn factor_two_replicates() {
        let input = [10, 20, 30];
        let mut output = [0; 5];

        upsample_row(&input, 2, &mut output);
        assert_eq!(output, [10, 10, 20, 20, 30]);
    }
}
