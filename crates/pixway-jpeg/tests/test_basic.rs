/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

use nanorand::Rng;
use pixway_core::colorspace::ColorModel;
use pixway_core::midway::Midway;
use pixway_core::options::{ChromaSubsampling, EncoderOptions};
use pixway_jpeg::{EncodeErrors, HuffmanSpec, HuffmanTables, JpegDecoder, JpegEncoder};

/// Smooth content, jpeg handles it well
fn gradient_image(width: usize, height: usize, model: ColorModel) -> Midway {
    let components = model.num_components();
    let mut pixels = Vec::with_capacity(width * height * components);

    for y in 0..height {
        for x in 0..width {
            for c in 0..components {
                let value = (x * 200) / width + (y * 50) / height + c * 2;
                pixels.push(value as u8);
            }
        }
    }
    Midway::new(width, height, model, pixels).unwrap()
}

fn mean_absolute_error(a: &[u8], b: &[u8]) -> f64 {
    assert_eq!(a.len(), b.len());
    let total: u64 = a
        .iter()
        .zip(b)
        .map(|(x, y)| u64::from(x.abs_diff(*y)))
        .sum();

    total as f64 / a.len() as f64
}

fn options(subsampling: ChromaSubsampling) -> EncoderOptions {
    EncoderOptions::default().jpeg_set_subsampling(subsampling)
}

fn roundtrip(image: &Midway, options: EncoderOptions) -> Midway {
    let bytes = JpegEncoder::new(image, options).encode().unwrap();
    JpegDecoder::new(&bytes).decode().unwrap()
}

#[test]
fn solid_red_444() {
    let image = Midway::from_pixel(2, 2, ColorModel::RGB, &[255, 0, 0]).unwrap();
    let decoded = roundtrip(&image, options(ChromaSubsampling::Yuv444));

    assert_eq!(decoded.dimensions(), (2, 2));
    assert_eq!(decoded.color_model(), ColorModel::RGB);

    for pixel in decoded.pixels().chunks_exact(3) {
        assert!(pixel[0] >= 245, "{pixel:?}");
        assert!(pixel[1] <= 10, "{pixel:?}");
        assert!(pixel[2] <= 10, "{pixel:?}");
    }
}

#[test]
fn gradient_both_subsamplings() {
    let image = gradient_image(64, 48, ColorModel::RGB);

    for subsampling in [ChromaSubsampling::Yuv420, ChromaSubsampling::Yuv444] {
        let decoded = roundtrip(&image, options(subsampling));
        let error = mean_absolute_error(image.pixels(), decoded.pixels());

        assert!(error < 10.0, "{subsampling:?} error {error}");
    }
}

#[test]
fn odd_dimensions() {
    for (width, height) in [(1, 1), (17, 13), (9, 31), (33, 2)] {
        let image = gradient_image(width, height, ColorModel::RGB);

        for subsampling in [ChromaSubsampling::Yuv420, ChromaSubsampling::Yuv444] {
            let decoded = roundtrip(&image, options(subsampling));

            assert_eq!(decoded.dimensions(), (width, height));
            let error = mean_absolute_error(image.pixels(), decoded.pixels());
            assert!(error < 10.0, "{width}x{height} {subsampling:?} error {error}");
        }
    }
}

#[test]
fn grayscale_stays_grayscale() {
    let image = gradient_image(40, 24, ColorModel::Grayscale);
    let bytes = JpegEncoder::new(&image, EncoderOptions::default())
        .encode()
        .unwrap();

    let mut decoder = JpegDecoder::new(&bytes);
    decoder.decode_headers().unwrap();

    let info = decoder.info().unwrap();
    assert_eq!(info.components, 1);
    assert_eq!(decoder.color_model(), Some(ColorModel::Grayscale));

    let decoded = decoder.decode().unwrap();
    let error = mean_absolute_error(image.pixels(), decoded.pixels());
    assert!(error < 5.0, "error {error}");
}

#[test]
fn alpha_is_dropped() {
    let image = Midway::from_pixel(8, 8, ColorModel::RGBA, &[0, 0, 255, 7]).unwrap();
    let decoded = roundtrip(&image, options(ChromaSubsampling::Yuv444));

    assert_eq!(decoded.color_model(), ColorModel::RGB);

    let expected = image.to_color_model(ColorModel::RGB);
    assert!(mean_absolute_error(expected.pixels(), decoded.pixels()) < 6.0);
}

#[test]
fn headers_before_decode() {
    let image = gradient_image(30, 20, ColorModel::RGB);
    let bytes = JpegEncoder::new(&image, EncoderOptions::default())
        .encode()
        .unwrap();

    let mut decoder = JpegDecoder::new(&bytes);
    assert_eq!(decoder.dimensions(), None);

    decoder.decode_headers().unwrap();
    assert_eq!(decoder.dimensions(), Some((30, 20)));
    assert_eq!(decoder.output_buf_size(), Some(30 * 20 * 3));

    let mut out = vec![0; 30 * 20 * 3];
    decoder.decode_into(&mut out).unwrap();
}

#[test]
fn higher_quality_is_closer() {
    let mut rand = nanorand::WyRand::new_seed(7);
    let mut pixels = vec![0_u8; 32 * 32 * 3];
    rand.fill(&mut pixels);

    let image = Midway::new(32, 32, ColorModel::RGB, pixels).unwrap();

    let low = roundtrip(&image, options(ChromaSubsampling::Yuv444).set_quality(10));
    let high = roundtrip(&image, options(ChromaSubsampling::Yuv444).set_quality(95));

    let low_error = mean_absolute_error(image.pixels(), low.pixels());
    let high_error = mean_absolute_error(image.pixels(), high.pixels());

    assert!(high_error < low_error, "{high_error} vs {low_error}");
}

#[test]
fn unit_quantization_is_near_lossless() {
    let image = gradient_image(24, 24, ColorModel::Grayscale);

    let bytes = JpegEncoder::new(&image, EncoderOptions::default())
        .set_quantization_tables([1; 64], [1; 64])
        .encode()
        .unwrap();
    let decoded = JpegDecoder::new(&bytes).decode().unwrap();

    for (a, b) in image.pixels().iter().zip(decoded.pixels()) {
        assert!(a.abs_diff(*b) <= 3, "{a} vs {b}");
    }
}

#[test]
fn quantization_table_values_are_checked() {
    let image = gradient_image(8, 8, ColorModel::RGB);
    let mut chroma = [10; 64];
    chroma[5] = 0;

    let result = JpegEncoder::new(&image, EncoderOptions::default())
        .set_quantization_tables([10; 64], chroma)
        .encode();

    assert!(matches!(result, Err(EncodeErrors::InvalidQuantizationTable(_))));
}

#[test]
fn explicit_standard_huffman_tables() {
    let image = gradient_image(16, 16, ColorModel::RGB);

    let implicit = JpegEncoder::new(&image, EncoderOptions::default())
        .encode()
        .unwrap();
    let explicit = JpegEncoder::new(&image, EncoderOptions::default())
        .set_huffman_tables(HuffmanTables::default())
        .encode()
        .unwrap();

    assert_eq!(implicit, explicit);
}

#[test]
fn incomplete_huffman_table() {
    let image = gradient_image(16, 16, ColorModel::RGB);
    let mut tables = HuffmanTables::default();
    // only category 0 for the luma DC differences
    tables.luma_dc = HuffmanSpec::new([1, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0], &[0]);

    let result = JpegEncoder::new(&image, EncoderOptions::default())
        .set_huffman_tables(tables)
        .encode();

    assert!(matches!(result, Err(EncodeErrors::MissingHuffmanSymbol(_))));
}

#[test]
fn restart_intervals_do_not_change_pixels() {
    let image = gradient_image(70, 50, ColorModel::RGB);

    for subsampling in [ChromaSubsampling::Yuv420, ChromaSubsampling::Yuv444] {
        let plain = roundtrip(&image, options(subsampling));

        for interval in [1, 3, 7] {
            let bytes = JpegEncoder::new(&image, options(subsampling))
                .set_restart_interval(interval)
                .encode()
                .unwrap();

            let mut decoder = JpegDecoder::new(&bytes);
            decoder.decode_headers().unwrap();
            assert_eq!(decoder.info().unwrap().restart_interval, usize::from(interval));

            let decoded = decoder.decode().unwrap();
            assert_eq!(decoded, plain, "interval {interval}");
        }
    }
}

#[test]
fn reference_decoder_reads_output() {
    let image = gradient_image(48, 40, ColorModel::RGB);

    for subsampling in [ChromaSubsampling::Yuv420, ChromaSubsampling::Yuv444] {
        let bytes = JpegEncoder::new(&image, options(subsampling))
            .set_restart_interval(4)
            .encode()
            .unwrap();

        let mut decoder = jpeg_decoder::Decoder::new(&bytes[..]);
        let pixels = decoder.decode().unwrap();
        let info = decoder.info().unwrap();

        assert_eq!((info.width, info.height), (48, 40));
        assert_eq!(info.pixel_format, jpeg_decoder::PixelFormat::RGB24);

        let error = mean_absolute_error(image.pixels(), &pixels);
        assert!(error < 10.0, "{subsampling:?} error {error}");
    }
}

#[test]
fn reference_decoder_reads_grayscale() {
    let image = gradient_image(20, 20, ColorModel::Grayscale);
    let bytes = JpegEncoder::new(&image, EncoderOptions::default())
        .encode()
        .unwrap();

    let mut decoder = jpeg_decoder::Decoder::new(&bytes[..]);
    let pixels = decoder.decode().unwrap();

    assert_eq!(
        decoder.info().unwrap().pixel_format,
        jpeg_decoder::PixelFormat::L8
    );
    assert!(mean_absolute_error(image.pixels(), &pixels) < 5.0);
}
