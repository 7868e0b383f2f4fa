/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

#![allow(clippy::upper_case_acronyms)]

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Marker {
    /// Start Of Frame markers
    ///
    /// - SOF(0), baseline DCT, the only one we decode
    /// - SOF(1), extended sequential DCT, Huffman coding
    /// - SOF(2), progressive DCT, Huffman coding
    /// - SOF(3), lossless (sequential), Huffman coding
    /// - SOF(5..=7), differential frames, Huffman coding
    /// - SOF(9..=11), arithmetic coding counterparts of the above
    /// - SOF(13..=15), differential frames, arithmetic coding
    SOF(u8),
    /// Define Huffman table(s)
    DHT,
    /// Define arithmetic coding conditioning(s)
    DAC,
    /// Restart with modulo 8 count `m`
    RST(u8),
    /// Start of image
    SOI,
    /// End of image
    EOI,
    /// Start of scan
    SOS,
    /// Define quantization table(s)
    DQT,
    /// Define number of lines
    DNL,
    /// Define restart interval
    DRI,
    /// Reserved for application segments
    APP(u8),
    /// Comment
    COM
}

impl Marker {
    pub fn from_u8(n: u8) -> Option<Marker> {
        use self::Marker::{APP, COM, DAC, DHT, DNL, DQT, DRI, EOI, RST, SOF, SOI, SOS};

        match n {
            0xFE => Some(COM),
            0xC0..=0xC3 | 0xC5..=0xC7 | 0xC9..=0xCB | 0xCD..=0xCF => Some(SOF(n - 0xC0)),
            0xC4 => Some(DHT),
            0xCC => Some(DAC),
            0xD0..=0xD7 => Some(RST(n - 0xD0)),
            0xD8 => Some(SOI),
            0xD9 => Some(EOI),
            0xDA => Some(SOS),
            0xDB => Some(DQT),
            0xDC => Some(DNL),
            0xDD => Some(DRI),
            0xE0..=0xEF => Some(APP(n - 0xE0)),
            _ => None
        }
    }

    /// The byte following `0xFF` in the stream
    pub const fn to_u8(self) -> u8 {
        match self {
            Marker::SOF(n) => 0xC0 + n,
            Marker::DHT => 0xC4,
            Marker::DAC => 0xCC,
            Marker::RST(n) => 0xD0 + n,
            Marker::SOI => 0xD8,
            Marker::EOI => 0xD9,
            Marker::SOS => 0xDA,
            Marker::DQT => 0xDB,
            Marker::DNL => 0xDC,
            Marker::DRI => 0xDD,
            Marker::APP(n) => 0xE0 + n,
            Marker::COM => 0xFE
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::marker::Marker;

    #[test]
    fn markers_map_both_ways() {
        for byte in 0xC0..=0xFE_u8 {
            if let Some(marker) = Marker::from_u8(byte) {
                assert_eq!(marker.to_u8(), byte, "{marker:?}");
            }
        }
        assert_eq!(Marker::from_u8(0xC8), None);
        assert_eq!(Marker::from_u8(0x00), None);
    }
}
