/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

use pixway_bmp::{BmpDecoder, BmpDecoderErrors};
use pixway_core::errors::ErrorKind;
use pixway_core::options::DecoderOptions;

/// Build a bmp file with a 40 byte info header
fn bmp_file(width: i32, height: i32, depth: u16, compression: u32, pixels: &[u8]) -> Vec<u8> {
    let mut out = vec![];
    let offset = 54_u32;

    out.extend_from_slice(b"BM");
    out.extend_from_slice(&(offset + pixels.len() as u32).to_le_bytes());
    out.extend_from_slice(&[0; 4]);
    out.extend_from_slice(&offset.to_le_bytes());
    out.extend_from_slice(&40_u32.to_le_bytes());
    out.extend_from_slice(&width.to_le_bytes());
    out.extend_from_slice(&height.to_le_bytes());
    out.extend_from_slice(&1_u16.to_le_bytes());
    out.extend_from_slice(&depth.to_le_bytes());
    out.extend_from_slice(&compression.to_le_bytes());
    out.extend_from_slice(&[0; 20]);
    out.extend_from_slice(pixels);
    out
}

#[test]
fn wrong_magic_bytes() {
    let mut data = bmp_file(1, 1, 24, 0, &[0; 4]);
    data[0] = b'P';

    let err = BmpDecoder::new(&data).decode().unwrap_err();
    assert!(matches!(err, BmpDecoderErrors::InvalidMagicBytes));
    assert_eq!(err.kind(), ErrorKind::Format);
}

#[test]
fn header_only_file() {
    let err = BmpDecoder::new(b"BM\x00\x00").decode().unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Format);
}

#[test]
fn compressed_images_are_unsupported() {
    for method in [1, 2, 3] {
        let data = bmp_file(2, 2, 24, method, &[0; 16]);
        let err = BmpDecoder::new(&data).decode().unwrap_err();

        assert!(matches!(err, BmpDecoderErrors::UnsupportedCompression(m) if m == method));
        assert_eq!(err.kind(), ErrorKind::UnsupportedFeature);
    }
}

#[test]
fn paletted_images_are_unsupported() {
    let data = bmp_file(2, 2, 8, 0, &[0; 8]);
    let err = BmpDecoder::new(&data).decode().unwrap_err();

    assert!(matches!(err, BmpDecoderErrors::UnsupportedDepth(8)));
    assert_eq!(err.kind(), ErrorKind::UnsupportedFeature);
}

#[test]
fn truncated_pixel_data() {
    // 2x2 24 bit needs two rows of 8 bytes
    let data = bmp_file(2, 2, 24, 0, &[0; 12]);
    let err = BmpDecoder::new(&data).decode().unwrap_err();

    assert!(matches!(err, BmpDecoderErrors::TooSmallBuffer(70, 66)));
    assert_eq!(err.kind(), ErrorKind::Corruption);
}

#[test]
fn dimensions_above_limits() {
    let data = bmp_file(5000, 1, 24, 0, &[]);
    let options = DecoderOptions::default().set_max_width(4096);
    let err = BmpDecoder::new_with_options(&data, options)
        .decode()
        .unwrap_err();

    assert!(matches!(
        err,
        BmpDecoderErrors::TooLargeDimensions("width", 4096, 5000)
    ));
    assert_eq!(err.kind(), ErrorKind::Resource);
}

#[test]
fn huge_declared_dimensions_fail_before_allocating() {
    let data = bmp_file(20000, 20000, 32, 0, &[]);
    let err = BmpDecoder::new(&data).decode().unwrap_err();

    assert_eq!(err.kind(), ErrorKind::Resource);
}

#[test]
fn zero_width() {
    let data = bmp_file(0, 2, 24, 0, &[]);
    let err = BmpDecoder::new(&data).decode().unwrap_err();

    assert_eq!(err.kind(), ErrorKind::Format);
}
