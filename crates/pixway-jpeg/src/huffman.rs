/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! Huffman tables
//!
//! Tables are built from the `BITS` and `HUFFVAL` lists of a DHT segment
//! (or the encoder's specifications), codes are assigned canonically as
//! described in Annex C of the JPEG specification.

use alloc::format;
use alloc::vec::Vec;

use crate::errors::DecodeErrors;

/// Number of bits resolved by a single table lookup
pub(crate) const HUFF_LOOKAHEAD: u8 = 9;

/// Assign canonical codes to every symbol
///
/// Returns `(code, length)` pairs in the order symbols appear in `HUFFVAL`
/// or an error string when the counts describe more codes than fit
pub(crate) fn canonical_codes(bits: &[u8; 16]) -> Result<Vec<(u16, u8)>, &'static str> {
    let total: usize = bits.iter().map(|x| usize::from(*x)).sum();

    if total > 256 {
        return Err("More than 256 symbols in huffman table");
    }
    let mut codes = Vec::with_capacity(total);
    let mut code = 0_u32;

    for (length, &count) in (1_u8..=16).zip(bits.iter()) {
        for _ in 0..count {
            codes.push((code as u16, length));
            code += 1;
        }
        // the all ones code of every length is reserved
        if code >= (1 << length) {
            return Err("Huffman code lengths are oversubscribed");
        }
        code <<= 1;
    }
    Ok(codes)
}

/// A decoding table
#[derive(Clone)]
pub(crate) struct HuffmanTable {
    /// Symbol and code length for every `HUFF_LOOKAHEAD` bit prefix,
    /// zero length means the code is longer than the lookahead
    pub(crate) lookup:   [(u8, u8); 1 << HUFF_LOOKAHEAD],
    /// Largest code of each length, -1 if there are no codes of that length
    pub(crate) maxcode:  [i32; 17],
    /// Offset to subtract from a code of a given length to get its index in `values`
    pub(crate) offset:   [i32; 17],
    pub(crate) values:   [u8; 256]
}

impl HuffmanTable {
    pub fn new(bits: &[u8; 16], values: &[u8]) -> Result<HuffmanTable, DecodeErrors> {
        let codes = canonical_codes(bits).map_err(DecodeErrors::FormatStatic)?;

        if codes.len() != values.len() {
            return Err(DecodeErrors::Format(format!(
                "Huffman table declares {} symbols but carries {}",
                codes.len(),
                values.len()
            )));
        }

        let mut table = HuffmanTable {
            lookup:  [(0, 0); 1 << HUFF_LOOKAHEAD],
            maxcode: [-1; 17],
            offset:  [0; 17],
            values:  [0; 256]
        };
        table.values[..values.len()].copy_from_slice(values);

        let mut index = 0;

        for length in 1..=16_usize {
            let count = usize::from(bits[length - 1]);

            if count == 0 {
                continue;
            }
            let first_code = i32::from(codes[index].0);

            table.offset[length] = index as i32 - first_code;
            index += count;
            table.maxcode[length] = i32::from(codes[index - 1].0);
        }

        for (&(code, length), &symbol) in codes.iter().zip(values) {
            if length > HUFF_LOOKAHEAD {
                continue;
            }
            // fill every lookahead pattern starting with this code
            let shift = HUFF_LOOKAHEAD - length;
            let start = usize::from(code) << shift;

            for entry in &mut table.lookup[start..start + (1 << shift)] {
                *entry = (symbol, length);
            }
        }

        Ok(table)
    }
}

#[cfg(test)]
mod tests {
    use crate::huffman::{canonical_codes, HuffmanTable};

    #[test]
    fn canonical_assignment() {
        // one code each of length 1, 2 and 3
        let mut bits = [0; 16];
        bits[0] = 1;
        bits[1] = 1;
        bits[2] = 1;

        let codes = canonical_codes(&bits).unwrap();
        assert_eq!(codes, [(0b0, 1), (0b10, 2), (0b110, 3)]);
    }

    #[test]
    fn oversubscribed_lengths_are_rejected() {
        let mut bits = [0; 16];
        bits[0] = 3;
        assert!(canonical_codes(&bits).is_err());
    }

    #[test]
    fn lookup_table_entries() {
        let mut bits = [0; 16];
        bits[1] = 1;
        bits[2] = 1;
        let table = HuffmanTable::new(&bits, &[7, 9]).unwrap();

        // 00 -> 7
        assert_eq!(table.lookup[0b0000_0000_0], (7, 2));
        assert_eq!(table.lookup[0b0011_1111_1], (7, 2));
        // 010 -> 9
        assert_eq!(table.lookup[0b0100_0000_0], (9, 3));
        // nothing starts with 1
        assert_eq!(table.lookup[0b1000_0000_0], (0, 0));
    }

    #[test]
    fn symbol_count_must_match() {
        let mut bits = [0; 16];
        bits[1] = 2;
        assert!(HuffmanTable::new(&bits, &[1]).is_err());
    }
}
