/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

use pixway_core::bytestream::ByteWriter;

use crate::crc::calc_crc;
use crate::enums::{FilterMethod, InterlaceMethod, PngColor};

/// Write a whole chunk: length, name, payload and the crc over name + payload
pub(crate) fn write_chunk(name: &[u8; 4], payload: &[u8], writer: &mut ByteWriter) {
    writer.write_u32_be(payload.len() as u32);

    let start = writer.bytes_written();
    writer.write_all(name);
    writer.write_all(payload);

    let crc = calc_crc(&writer.as_slice()[start..]);
    writer.write_u32_be(crc);
}

pub(crate) fn write_ihdr(width: u32, height: u32, color: PngColor, writer: &mut ByteWriter) {
    let mut payload = ByteWriter::with_capacity(13);

    payload.write_u32_be(width);
    payload.write_u32_be(height);
    payload.write_u8(8); // depth
    payload.write_u8(color.to_int());
    payload.write_u8(0); // compression, always deflate
    payload.write_u8(FilterMethod::None.to_int()); // filter method zero, adaptive
    payload.write_u8(InterlaceMethod::Standard as u8);

    write_chunk(b"IHDR", payload.as_slice(), writer);
}

pub(crate) fn write_iend(writer: &mut ByteWriter) {
    write_chunk(b"IEND", &[], writer);
}

#[cfg(test)]
mod tests {
    use pixway_core::bytestream::ByteWriter;

    use super::write_iend;

    #[test]
    fn iend_matches_known_bytes() {
        let mut writer = ByteWriter::new();
        write_iend(&mut writer);
        assert_eq!(
            writer.as_slice(),
            &[0, 0, 0, 0, b'I', b'E', b'N', b'D', 0xAE, 0x42, 0x60, 0x82]
        );
    }
}
