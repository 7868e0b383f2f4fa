/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! Malformed and unsupported files must fail with the right error class
use pixway_core::colorspace::ColorModel;
use pixway_core::errors::ErrorKind;
use pixway_core::midway::Midway;
use pixway_core::options::{DecoderOptions, EncoderOptions};
use pixway_jpeg::{DecodeErrors, JpegDecoder, JpegEncoder, UnsupportedSchemes};

fn valid_file(model: ColorModel) -> Vec<u8> {
    let mut pixels = Vec::new();

    for i in 0..(32 * 24 * model.num_components()) {
        pixels.push((i % 251) as u8);
    }
    let image = Midway::new(32, 24, model, pixels).unwrap();

    JpegEncoder::new(&image, EncoderOptions::default())
        .encode()
        .unwrap()
}

/// Position of the first `0xFF marker` pair
fn find_marker(data: &[u8], marker: u8) -> usize {
    data.windows(2)
        .position(|w| w == [0xFF, marker])
        .unwrap()
}

/// Offset of the first byte of entropy coded data
fn scan_start(data: &[u8]) -> usize {
    let sos = find_marker(data, 0xDA);
    let length = usize::from(u16::from_be_bytes([data[sos + 2], data[sos + 3]]));
    sos + 2 + length
}

fn decode_err(data: &[u8]) -> DecodeErrors {
    match JpegDecoder::new(data).decode() {
        Ok(_) => panic!("decoding should fail"),
        Err(e) => e
    }
}

#[test]
fn reference_file_decodes() {
    let data = valid_file(ColorModel::RGB);
    assert!(JpegDecoder::new(&data).decode().is_ok());
}

#[test]
fn not_a_jpeg() {
    let err = decode_err(&[0x89, b'P', b'N', b'G']);
    assert!(matches!(err, DecodeErrors::IllegalMagicBytes(0x8950)));
    assert_eq!(err.kind(), ErrorKind::Format);

    let err = decode_err(&[0xFF]);
    assert_eq!(err.kind(), ErrorKind::Format);
}

#[test]
fn start_of_image_only() {
    let err = decode_err(&[0xFF, 0xD8]);
    assert_eq!(err.kind(), ErrorKind::Format);
}

#[test]
fn progressive_is_unsupported() {
    let mut data = valid_file(ColorModel::RGB);
    let sof = find_marker(&data, 0xC0);
    data[sof + 1] = 0xC2;

    let err = decode_err(&data);
    assert!(matches!(
        err,
        DecodeErrors::Unsupported(UnsupportedSchemes::ProgressiveDctHuffman)
    ));
    assert_eq!(err.kind(), ErrorKind::UnsupportedFeature);
}

#[test]
fn arithmetic_coding_is_unsupported() {
    for marker in [0xC9, 0xCA, 0xCB] {
        let mut data = valid_file(ColorModel::Grayscale);
        let sof = find_marker(&data, 0xC0);
        data[sof + 1] = marker;

        assert_eq!(decode_err(&data).kind(), ErrorKind::UnsupportedFeature);
    }
    // conditioning tables right after SOI
    let mut data = valid_file(ColorModel::Grayscale);
    data.splice(2..2, [0xFF, 0xCC, 0x00, 0x04, 0x00, 0x00]);

    assert!(matches!(
        decode_err(&data),
        DecodeErrors::Unsupported(UnsupportedSchemes::ArithmeticConditioning)
    ));
}

#[test]
fn twelve_bit_precision() {
    let mut data = valid_file(ColorModel::RGB);
    let sof = find_marker(&data, 0xC0);
    data[sof + 4] = 12;

    let err = decode_err(&data);
    assert!(matches!(
        err,
        DecodeErrors::Unsupported(UnsupportedSchemes::Precision(12))
    ));
}

#[test]
fn four_components() {
    #[rustfmt::skip]
    let data = [
        0xFF, 0xD8,
        0xFF, 0xC0, 0x00, 0x14, 0x08, 0x00, 0x10, 0x00, 0x10, 0x04,
        0x01, 0x11, 0x00,
        0x02, 0x11, 0x00,
        0x03, 0x11, 0x00,
        0x04, 0x11, 0x00,
    ];
    let err = decode_err(&data);
    assert!(matches!(
        err,
        DecodeErrors::Unsupported(UnsupportedSchemes::ComponentCount(4))
    ));
}

#[test]
fn large_sampling_factors() {
    #[rustfmt::skip]
    let data = [
        0xFF, 0xD8,
        0xFF, 0xC0, 0x00, 0x11, 0x08, 0x00, 0x10, 0x00, 0x10, 0x03,
        0x01, 0x31, 0x00,
        0x02, 0x11, 0x00,
        0x03, 0x11, 0x00,
    ];
    let err = decode_err(&data);
    assert!(matches!(
        err,
        DecodeErrors::Unsupported(UnsupportedSchemes::SamplingFactors(3, 1))
    ));
}

#[test]
fn zero_height() {
    let mut data = valid_file(ColorModel::Grayscale);
    let sof = find_marker(&data, 0xC0);
    data[sof + 5] = 0;
    data[sof + 6] = 0;

    let err = decode_err(&data);
    assert!(matches!(err, DecodeErrors::ZeroError));
    assert_eq!(err.kind(), ErrorKind::Format);
}

#[test]
fn scan_before_frame() {
    let data = valid_file(ColorModel::Grayscale);
    let sof = find_marker(&data, 0xC0);
    let sos = find_marker(&data, 0xDA);

    // drop the frame header
    let mut broken = data[..sof].to_vec();
    broken.extend_from_slice(&data[sof + 2 + 11..sos]);
    broken.extend_from_slice(&data[sos..]);

    assert_eq!(decode_err(&broken).kind(), ErrorKind::Format);
}

#[test]
fn invalid_huffman_table_index() {
    let mut data = valid_file(ColorModel::Grayscale);
    let dht = find_marker(&data, 0xC4);
    // class 0, destination 5
    data[dht + 4] = 0x05;

    let err = decode_err(&data);
    assert_eq!(err.kind(), ErrorKind::Format);
}

#[test]
fn invalid_quantization_table_index() {
    let mut data = valid_file(ColorModel::Grayscale);
    let dqt = find_marker(&data, 0xDB);
    data[dqt + 4] = 0x04;

    let err = decode_err(&data);
    assert!(matches!(err, DecodeErrors::DqtError(_)));
}

#[test]
fn bad_huffman_code() {
    let data = valid_file(ColorModel::RGB);
    let start = scan_start(&data);

    // a run of one bits matches no code in the standard tables
    let mut broken = data[..start].to_vec();
    for _ in 0..64 {
        broken.extend_from_slice(&[0xFF, 0x00]);
    }
    broken.extend_from_slice(&[0xFF, 0xD9]);

    let err = decode_err(&broken);
    assert!(matches!(err, DecodeErrors::HuffmanDecode(_)), "{err:?}");
    assert_eq!(err.kind(), ErrorKind::Corruption);
}

#[test]
fn truncated_scan() {
    let data = valid_file(ColorModel::RGB);
    let start = scan_start(&data);

    let err = decode_err(&data[..start + 10]);
    assert_eq!(err.kind(), ErrorKind::Corruption, "{err:?}");
}

#[test]
fn truncated_header() {
    let data = valid_file(ColorModel::RGB);
    let dht = find_marker(&data, 0xC4);

    let err = decode_err(&data[..dht + 10]);
    assert_eq!(err.kind(), ErrorKind::Corruption, "{err:?}");
}

#[test]
fn dimension_limits() {
    let data = valid_file(ColorModel::RGB);
    let options = DecoderOptions::default().set_max_width(16);

    let err = JpegDecoder::new_with_options(&data, options)
        .decode()
        .err()
        .unwrap();

    assert!(matches!(err, DecodeErrors::TooLargeDimensions("width", 16, 32)));
    assert_eq!(err.kind(), ErrorKind::Resource);
}

#[test]
fn small_output_buffer() {
    let data = valid_file(ColorModel::RGB);
    let mut decoder = JpegDecoder::new(&data);
    let mut out = vec![0; 100];

    let err = decoder.decode_into(&mut out).err().unwrap();
    assert!(matches!(err, DecodeErrors::TooSmallOutput(2304, 100)));
    assert_eq!(err.kind(), ErrorKind::Resource);
}

#[test]
fn missing_end_of_image() {
    let data = valid_file(ColorModel::RGB);
    let trimmed = &data[..data.len() - 2];

    let err = JpegDecoder::new(trimmed).decode().err().unwrap();
    assert_eq!(err.kind(), ErrorKind::Format);

    let options = DecoderOptions::default().set_strict_mode(true);
    let err = JpegDecoder::new_with_options(trimmed, options)
        .decode()
        .err()
        .unwrap();
    assert_eq!(err.kind(), ErrorKind::Format);
}

#[test]
fn comments_and_unknown_app_segments_are_skipped() {
    let data = valid_file(ColorModel::RGB);
    let reference = JpegDecoder::new(&data).decode().unwrap();

    let mut extended = data.clone();
    // a comment and an APP5 segment after SOI
    extended.splice(
        2..2,
        [
            0xFF, 0xFE, 0x00, 0x07, b'h', b'e', b'l', b'l', b'o', 0xFF, 0xE5, 0x00, 0x03, 0x00
        ]
    );
    assert_eq!(JpegDecoder::new(&extended).decode().unwrap(), reference);
}

#[test]
fn fill_bytes_before_markers() {
    let data = valid_file(ColorModel::RGB);
    let reference = JpegDecoder::new(&data).decode().unwrap();

    let dqt = find_marker(&data, 0xDB);
    let mut padded = data.clone();
    padded.splice(dqt..dqt, [0xFF, 0xFF, 0xFF]);

    assert_eq!(JpegDecoder::new(&padded).decode().unwrap(), reference);
}

#[test]
fn missing_restart_marker_in_strict_mode() {
    let mut pixels = Vec::new();
    for i in 0..(32 * 32) {
        pixels.push((i % 199) as u8);
    }
    let image = Midway::new(32, 32, ColorModel::Grayscale, pixels).unwrap();
    let data = JpegEncoder::new(&image, EncoderOptions::default())
        .set_restart_interval(2)
        .encode()
        .unwrap();

    // turn the first restart marker into a stray marker
    let start = scan_start(&data);
    let rst = start + find_marker(&data[start..], 0xD0);
    let mut broken = data.clone();
    broken[rst + 1] = 0xFE;

    let options = DecoderOptions::default().set_strict_mode(true);
    let err = JpegDecoder::new_with_options(&broken, options)
        .decode()
        .err()
        .unwrap();
    assert!(matches!(err, DecodeErrors::MCUError(_)), "{err:?}");
    assert_eq!(err.kind(), ErrorKind::Corruption);
}
