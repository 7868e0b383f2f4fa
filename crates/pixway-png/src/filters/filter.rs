/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

use crate::enums::FilterMethod;
use crate::filters::paeth;

/// Byte above position `i`, zero for the first row
#[inline(always)]
fn above(previous: &[u8], i: usize) -> u8 {
    previous.get(i).copied().unwrap_or(0)
}

pub fn filter_scanline(
    current: &[u8], previous: &[u8], output: &mut [u8], filter: FilterMethod, components: usize
) {
    let (filter_byte, output) = output.split_at_mut(1);
    filter_byte[0] = filter.to_int();

    for (i, (out, x)) in output.iter_mut().zip(current).enumerate() {
        let a = if i >= components { current[i - components] } else { 0 };
        let b = above(previous, i);
        let c = if i >= components {
            above(previous, i - components)
        } else {
            0
        };

        let prediction = match filter {
            FilterMethod::None => 0,
            FilterMethod::Sub => a,
            FilterMethod::Up => b,
            FilterMethod::Average => ((u16::from(a) + u16::from(b)) >> 1) as u8,
            FilterMethod::Paeth => paeth(a, b, c)
        };
        *out = x.wrapping_sub(prediction);
    }
}

/// Sum of filtered bytes interpreted as signed values
///
/// Small magnitudes around zero compress best,
/// so a lower score is better
fn score(filtered: &[u8]) -> u64 {
    filtered
        .iter()
        .map(|x| u64::from((*x as i8).unsigned_abs()))
        .sum()
}

/// Choose the filter giving the smallest sum of absolute filtered values
///
/// Ties resolve to the filter tried first, starting with `None`.
///
/// # Arguments
/// - `previous`: The row above, empty for the first row
/// - `current`: The row to filter
/// - `components`: Bytes per pixel
/// - `scratch`: Reused buffer, resized to `current.len() + 1`
pub fn choose_compression_filter(
    previous: &[u8], current: &[u8], components: usize, scratch: &mut Vec<u8>
) -> FilterMethod {
    scratch.resize(current.len() + 1, 0);

    let mut best_filter = FilterMethod::None;
    let mut best_score = u64::MAX;

    for filter in FilterMethod::ALL {
        filter_scanline(current, previous, scratch, filter, components);

        let filter_score = score(&scratch[1..]);

        if filter_score < best_score {
            best_score = filter_score;
            best_filter = filter;
        }
    }
    best_filter
}

#[cfg(test)]
mod tests {
    use crate::enums::FilterMethod;
    use crate::filters::filter::choose_compression_filter;

    #[test]
    fn flat_rows_pick_none() {
        // every filter of a zero row scores zero, the tie goes to none
        let mut scratch = vec![];
        let filter = choose_compression_filter(&[0; 12], &[0; 12], 3, &mut scratch);
        assert_eq!(filter, FilterMethod::None);
    }

    #[test]
    fn gradients_pick_a_predictor() {
        let mut scratch = vec![];
        let row: Vec<u8> = (0..32).map(|x| x * 4).collect();

        // horizontal ramp, sub leaves 4's everywhere
        let filter = choose_compression_filter(&[], &row, 1, &mut scratch);
        assert_eq!(filter, FilterMethod::Sub);

        // identical rows, up leaves zeroes
        let noisy: Vec<u8> = (0..32).map(|x: u8| x.wrapping_mul(97)).collect();
        let filter = choose_compression_filter(&noisy, &noisy, 1, &mut scratch);
        assert_eq!(filter, FilterMethod::Up);
    }
}
