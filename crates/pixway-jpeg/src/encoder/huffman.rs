/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! Huffman table specifications and the code lookup the encoder uses
use alloc::format;
use alloc::vec::Vec;

use crate::encoder::tables::{
    STD_AC_CHROMA_BITS, STD_AC_CHROMA_VALUES, STD_AC_LUMA_BITS, STD_AC_LUMA_VALUES,
    STD_DC_CHROMA_BITS, STD_DC_CHROMA_VALUES, STD_DC_LUMA_BITS, STD_DC_LUMA_VALUES
};
use crate::errors::EncodeErrors;
use crate::huffman::canonical_codes;

/// A Huffman table as written in a DHT segment
///
/// `bits[i]` counts the codes of length `i + 1`, `values` lists the
/// symbols in order of increasing code length.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct HuffmanSpec {
    pub bits:   [u8; 16],
    pub values: Vec<u8>
}

impl HuffmanSpec {
    /// Create a specification from code length counts and symbols
    pub fn new(bits: [u8; 16], values: &[u8]) -> HuffmanSpec {
        HuffmanSpec {
            bits,
            values: values.to_vec()
        }
    }
}

/// The four tables a color image is encoded with
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct HuffmanTables {
    pub luma_dc:   HuffmanSpec,
    pub luma_ac:   HuffmanSpec,
    pub chroma_dc: HuffmanSpec,
    pub chroma_ac: HuffmanSpec
}

impl Default for HuffmanTables {
    /// The typical tables of Annex K
    fn default() -> Self {
        HuffmanTables {
            luma_dc:   HuffmanSpec::new(STD_DC_LUMA_BITS, &STD_DC_LUMA_VALUES),
            luma_ac:   HuffmanSpec::new(STD_AC_LUMA_BITS, &STD_AC_LUMA_VALUES),
            chroma_dc: HuffmanSpec::new(STD_DC_CHROMA_BITS, &STD_DC_CHROMA_VALUES),
            chroma_ac: HuffmanSpec::new(STD_AC_CHROMA_BITS, &STD_AC_CHROMA_VALUES)
        }
    }
}

/// Code and length for every symbol of a table
pub(crate) struct HuffmanCodes {
    /// zero length marks a symbol without a code
    codes: [(u16, u8); 256]
}

impl HuffmanCodes {
    pub fn new(spec: &HuffmanSpec) -> Result<HuffmanCodes, EncodeErrors> {
        let assigned = canonical_codes(&spec.bits)
            .map_err(|e| EncodeErrors::InvalidHuffmanTable(e.into()))?;

        if assigned.len() != spec.values.len() {
            return Err(EncodeErrors::InvalidHuffmanTable(format!(
                "Table declares {} codes but lists {} symbols",
                assigned.len(),
                spec.values.len()
            )));
        }
        let mut codes = [(0, 0); 256];

        for (&code, &symbol) in assigned.iter().zip(&spec.values) {
            if codes[usize::from(symbol)].1 != 0 {
                return Err(EncodeErrors::InvalidHuffmanTable(format!(
                    "Symbol {symbol:#04X} appears twice"
                )));
            }
            codes[usize::from(symbol)] = code;
        }
        Ok(HuffmanCodes { codes })
    }

    /// Code and code length of `symbol`
    #[inline]
    pub fn get(&self, symbol: u8) -> Result<(u16, u8), EncodeErrors> {
        let code = self.codes[usize::from(symbol)];

        if code.1 == 0 {
            return Err(EncodeErrors::MissingHuffmanSymbol(symbol));
        }
        Ok(code)
    }
}

#[cfg(test)]
mod tests {
    use super::{HuffmanCodes, HuffmanSpec, HuffmanTables};
    use crate::errors::EncodeErrors;

    #[test]
    fn standard_tables_build() {
        let tables = HuffmanTables::default();

        for spec in [
            &tables.luma_dc,
            &tables.luma_ac,
            &tables.chroma_dc,
            &tables.chroma_ac
        ] {
            assert!(HuffmanCodes::new(spec).is_ok());
        }
        let dc = HuffmanCodes::new(&tables.luma_dc).unwrap();
        // category 0 has the only code of length 2
        assert_eq!(dc.get(0).unwrap(), (0b00, 2));
    }

    #[test]
    fn missing_symbol() {
        let spec = HuffmanSpec::new([1, 1, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0], &[0, 5]);
        let codes = HuffmanCodes::new(&spec).unwrap();

        assert_eq!(codes.get(5).unwrap(), (0b10, 2));
        assert!(matches!(
            codes.get(3),
            Err(EncodeErrors::MissingHuffmanSymbol(3))
        ));
    }

    #[test]
    fn mismatched_counts() {
        let spec = HuffmanSpec::new([2, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0], &[0]);
        assert!(matches!(
            HuffmanCodes::new(&spec),
            Err(EncodeErrors::InvalidHuffmanTable(_))
        ));
    }
}
