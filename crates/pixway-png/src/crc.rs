/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! CRC-32 (ISO-HDLC, polynomial `0xEDB88320`) as used by png chunks
//!
//! Uses slice-by-8, eight table lookups per 8 input bytes.

/// Eight 256 entry tables, table `n` advances a crc by `n+1` zero bytes
const CRC_TABLES: [[u32; 256]; 8] = {
    let mut tables = [[0_u32; 256]; 8];
    let mut i = 0;

    while i < 256 {
        let mut crc = i as u32;
        let mut j = 0;

        while j < 8 {
            if crc & 1 != 0 {
                crc = (crc >> 1) ^ 0xEDB8_8320;
            } else {
                crc >>= 1;
            }
            j += 1;
        }
        tables[0][i] = crc;
        i += 1;
    }

    i = 0;
    while i < 256 {
        let mut crc = tables[0][i];
        let mut j = 1;

        while j < 8 {
            crc = (crc >> 8) ^ tables[0][(crc & 0xFF) as usize];
            tables[j][i] = crc;
            j += 1;
        }
        i += 1;
    }
    tables
};

/// Update a running crc with `data`
///
/// The running value is not inverted, start with `u32::MAX`
/// and invert the final result, or use [`calc_crc`]
pub fn crc32_slice8(data: &[u8], mut crc: u32) -> u32 {
    let mut chunks = data.chunks_exact(8);

    for chunk in chunks.by_ref() {
        let lo = u32::from_le_bytes([chunk[0], chunk[1], chunk[2], chunk[3]]) ^ crc;
        let hi = u32::from_le_bytes([chunk[4], chunk[5], chunk[6], chunk[7]]);

        crc = CRC_TABLES[7][(lo & 0xFF) as usize]
            ^ CRC_TABLES[6][((lo >> 8) & 0xFF) as usize]
            ^ CRC_TABLES[5][((lo >> 16) & 0xFF) as usize]
            ^ CRC_TABLES[4][(lo >> 24) as usize]
            ^ CRC_TABLES[3][(hi & 0xFF) as usize]
            ^ CRC_TABLES[2][((hi >> 8) & 0xFF) as usize]
            ^ CRC_TABLES[1][((hi >> 16) & 0xFF) as usize]
            ^ CRC_TABLES[0][(hi >> 24) as usize];
    }
    for byte in chunks.remainder() {
        crc = (crc >> 8) ^ CRC_TABLES[0][((crc ^ u32::from(*byte)) & 0xFF) as usize];
    }
    crc
}

/// Update a running crc with `data`
///
/// Lets a crc span separate buffers, such as a chunk name and its payload.
/// Same conventions as [`crc32_slice8`].
#[inline]
pub fn calc_crc_with_bytes(data: &[u8], crc: u32) -> u32 {
    crc32_slice8(data, crc)
}

/// Calculate the finished crc of `data`
#[inline]
pub fn calc_crc(data: &[u8]) -> u32 {
    !crc32_slice8(data, u32::MAX)
}
