/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! Malformed and unsupported files must fail with the right error class
use std::io::Write;

use flate2::write::ZlibEncoder;
use flate2::Compression;
use pixway_core::errors::ErrorKind;
use pixway_core::options::DecoderOptions;
use pixway_png::crc::calc_crc;
use pixway_png::{PngDecodeErrors, PngDecoder};

const SIGNATURE: [u8; 8] = [0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A];

fn chunk(name: &[u8; 4], payload: &[u8]) -> Vec<u8> {
    let mut out = Vec::new();
    out.extend_from_slice(&(payload.len() as u32).to_be_bytes());
    out.extend_from_slice(name);
    out.extend_from_slice(payload);

    let crc = calc_crc(&out[4..]);
    out.extend_from_slice(&crc.to_be_bytes());
    out
}

fn ihdr(width: u32, height: u32, depth: u8, color: u8, interlace: u8) -> Vec<u8> {
    let mut payload = Vec::new();
    payload.extend_from_slice(&width.to_be_bytes());
    payload.extend_from_slice(&height.to_be_bytes());
    payload.extend_from_slice(&[depth, color, 0, 0, interlace]);
    chunk(b"IHDR", &payload)
}

fn zlib(data: &[u8]) -> Vec<u8> {
    let mut encoder = ZlibEncoder::new(Vec::new(), Compression::default());
    encoder.write_all(data).unwrap();
    encoder.finish().unwrap()
}

/// A 2x2 8 bit gray image, every row unfiltered
fn gray_file() -> Vec<u8> {
    let mut file = SIGNATURE.to_vec();
    file.extend(ihdr(2, 2, 8, 0, 0));
    file.extend(chunk(b"IDAT", &zlib(&[0, 10, 20, 0, 30, 40])));
    file.extend(chunk(b"IEND", &[]));
    file
}

fn decode_err(data: &[u8]) -> PngDecodeErrors {
    PngDecoder::new(data).decode().unwrap_err()
}

#[test]
fn valid_reference_file_decodes() {
    let image = PngDecoder::new(&gray_file()).decode().unwrap();
    assert_eq!(image.pixels(), &[10, 20, 30, 40]);
}

#[test]
fn signature_prefix_only() {
    let err = decode_err(&[0x89, 0x50, 0x4E, 0x47]);
    assert!(matches!(err, PngDecodeErrors::BadSignature));
    assert_eq!(err.kind(), ErrorKind::Format);
}

#[test]
fn full_signature_without_chunks() {
    let err = decode_err(&SIGNATURE);
    assert_eq!(err.kind(), ErrorKind::Format);
}

#[test]
fn wrong_signature() {
    let mut file = gray_file();
    file[1] = b'Q';
    assert!(matches!(decode_err(&file), PngDecodeErrors::BadSignature));
}

#[test]
fn flipped_bit_is_a_crc_error() {
    let mut file = gray_file();
    // last byte of the IHDR height
    file[8 + 8 + 7] ^= 1;

    let err = decode_err(&file);
    assert!(matches!(err, PngDecodeErrors::BadCrc(..)), "{err:?}");
    assert_eq!(err.kind(), ErrorKind::Corruption);
}

#[test]
fn crc_covers_later_chunks() {
    let mut file = gray_file();
    // first byte of the IDAT payload, after signature, IHDR and the IDAT header
    file[8 + 25 + 8] ^= 0x40;

    let err = decode_err(&file);
    assert!(matches!(err, PngDecodeErrors::BadCrc(..)), "{err:?}");
    assert_eq!(err.kind(), ErrorKind::Corruption);
}

#[test]
fn stored_crc_follows_the_payload() {
    let reference = gray_file();
    let stored = u32::from_be_bytes(reference[29..33].try_into().unwrap());

    let mut file = reference.clone();
    file[32] ^= 0xFF;

    match decode_err(&file) {
        PngDecodeErrors::BadCrc(found, calculated) => {
            assert_eq!(found, stored ^ 0xFF);
            assert_eq!(calculated, stored);
        }
        err => panic!("Expected a crc error, got {err:?}")
    }
}

#[test]
fn crc_check_can_be_disabled() {
    let mut file = gray_file();
    // corrupt the crc of IEND, pixels stay intact
    let len = file.len();
    file[len - 1] ^= 0xFF;

    let options = DecoderOptions::default().png_set_confirm_crc(false);
    let image = PngDecoder::new_with_options(&file, options).decode().unwrap();
    assert_eq!(image.pixels(), &[10, 20, 30, 40]);

    assert!(matches!(decode_err(&file), PngDecodeErrors::BadCrc(..)));
}

#[test]
fn idat_before_ihdr() {
    let mut file = SIGNATURE.to_vec();
    file.extend(chunk(b"IDAT", &zlib(&[0, 10, 20, 0, 30, 40])));
    file.extend(ihdr(2, 2, 8, 0, 0));
    file.extend(chunk(b"IEND", &[]));

    assert_eq!(decode_err(&file).kind(), ErrorKind::Format);
}

#[test]
fn interlaced_is_unsupported() {
    let mut file = SIGNATURE.to_vec();
    file.extend(ihdr(2, 2, 8, 0, 1));
    file.extend(chunk(b"IEND", &[]));

    let err = decode_err(&file);
    assert!(matches!(err, PngDecodeErrors::InterlacedImage));
    assert_eq!(err.kind(), ErrorKind::UnsupportedFeature);
}

#[test]
fn palette_and_sixteen_bit_are_unsupported() {
    for (depth, color) in [(8, 3), (4, 3), (16, 2), (16, 0), (1, 0)] {
        let mut file = SIGNATURE.to_vec();
        file.extend(ihdr(2, 2, depth, color, 0));
        file.extend(chunk(b"IEND", &[]));

        let err = decode_err(&file);
        assert!(
            matches!(err, PngDecodeErrors::UnsupportedColor(..)),
            "depth {depth} color {color}: {err:?}"
        );
        assert_eq!(err.kind(), ErrorKind::UnsupportedFeature);
    }
}

#[test]
fn invalid_depth_is_a_format_error() {
    let mut file = SIGNATURE.to_vec();
    file.extend(ihdr(2, 2, 4, 2, 0));
    file.extend(chunk(b"IEND", &[]));

    assert_eq!(decode_err(&file).kind(), ErrorKind::Format);
}

#[test]
fn dimensions_above_limit() {
    let mut file = SIGNATURE.to_vec();
    file.extend(ihdr(5000, 10, 8, 2, 0));
    file.extend(chunk(b"IEND", &[]));

    let options = DecoderOptions::default().set_max_width(4096);
    let err = PngDecoder::new_with_options(&file, options)
        .decode()
        .unwrap_err();

    assert!(matches!(
        err,
        PngDecodeErrors::TooLargeDimensions("width", 4096, 5000)
    ));
    assert_eq!(err.kind(), ErrorKind::Resource);
}

#[test]
fn unknown_filter_byte() {
    let mut file = SIGNATURE.to_vec();
    file.extend(ihdr(2, 2, 8, 0, 0));
    file.extend(chunk(b"IDAT", &zlib(&[0, 10, 20, 7, 30, 40])));
    file.extend(chunk(b"IEND", &[]));

    let err = decode_err(&file);
    assert!(matches!(err, PngDecodeErrors::InvalidFilter(7)));
    assert_eq!(err.kind(), ErrorKind::Corruption);
}

#[test]
fn truncated_image_data() {
    let mut file = SIGNATURE.to_vec();
    file.extend(ihdr(2, 2, 8, 0, 0));
    file.extend(chunk(b"IDAT", &zlib(&[0, 10, 20])));
    file.extend(chunk(b"IEND", &[]));

    assert_eq!(decode_err(&file).kind(), ErrorKind::Corruption);
}

#[test]
fn truncated_chunk() {
    let file = gray_file();
    // cut inside the IDAT chunk
    let err = decode_err(&file[..8 + 25 + 10]);
    assert_eq!(err.kind(), ErrorKind::Corruption);
}

#[test]
fn ancillary_chunks_are_skipped() {
    let reference = gray_file();
    let mut file = reference[..8 + 25].to_vec();
    file.extend(chunk(b"tEXt", b"Comment\0hello"));
    file.extend_from_slice(&reference[8 + 25..]);

    let image = PngDecoder::new(&file).decode().unwrap();
    assert_eq!(image.pixels(), &[10, 20, 30, 40]);
}

#[test]
fn missing_iend() {
    let reference = gray_file();
    let file = &reference[..reference.len() - 12];

    // headers are all present, only the full decode notices
    let mut decoder = PngDecoder::new(file);
    decoder.decode_headers().unwrap();
    assert_eq!(decoder.dimensions(), Some((2, 2)));

    let err = decoder.decode().unwrap_err();
    assert!(matches!(err, PngDecodeErrors::GenericStatic(_)));
    assert_eq!(err.kind(), ErrorKind::Format);
}
