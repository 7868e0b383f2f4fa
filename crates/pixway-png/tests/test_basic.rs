/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

use nanorand::Rng;
use pixway_core::colorspace::{ColorModel, ALL_COLOR_MODELS};
use pixway_core::midway::Midway;
use pixway_png::{PngDecoder, PngEncoder};

fn random_image(width: usize, height: usize, model: ColorModel, seed: u64) -> Midway {
    let mut rand = nanorand::WyRand::new_seed(seed);
    let mut pixels = vec![0_u8; width * height * model.num_components()];
    rand.fill(&mut pixels);

    Midway::new(width, height, model, pixels).unwrap()
}

/// Smooth content, predictors other than `None` get picked here
fn gradient_image(width: usize, height: usize, model: ColorModel) -> Midway {
    let components = model.num_components();
    let mut pixels = Vec::with_capacity(width * height * components);

    for y in 0..height {
        for x in 0..width {
            for c in 0..components {
                pixels.push(((x * 3 + y * 5 + c * 40) & 255) as u8);
            }
        }
    }
    Midway::new(width, height, model, pixels).unwrap()
}

#[test]
fn solid_red_roundtrip() {
    let image = Midway::from_pixel(2, 2, ColorModel::RGB, &[255, 0, 0]).unwrap();
    let bytes = PngEncoder::new(&image).encode().unwrap();

    let decoded = PngDecoder::new(&bytes).decode().unwrap();

    assert_eq!(decoded.dimensions(), (2, 2));
    assert_eq!(decoded.color_model(), ColorModel::RGB);
    assert_eq!(decoded.pixels(), &[255, 0, 0, 255, 0, 0, 255, 0, 0, 255, 0, 0]);
}

#[test]
fn random_images_roundtrip() {
    for (seed, model) in ALL_COLOR_MODELS.into_iter().enumerate() {
        for (width, height) in [(1, 1), (7, 3), (33, 17), (128, 5)] {
            let image = random_image(width, height, model, seed as u64 + width as u64);
            let bytes = PngEncoder::new(&image).encode().unwrap();

            let decoded = PngDecoder::new(&bytes).decode().unwrap();
            assert_eq!(decoded, image, "{model:?} {width}x{height}");
        }
    }
}

#[test]
fn gradients_roundtrip() {
    for model in ALL_COLOR_MODELS {
        let image = gradient_image(97, 41, model);
        let bytes = PngEncoder::new(&image).encode().unwrap();

        assert_eq!(PngDecoder::new(&bytes).decode().unwrap(), image);
    }
}

#[test]
fn large_image_spans_several_idat_chunks() {
    let image = random_image(200, 100, ColorModel::RGBA, 42);
    let bytes = PngEncoder::new(&image).encode().unwrap();

    let idat_count = bytes.windows(4).filter(|w| *w == b"IDAT").count();
    assert!(idat_count > 1, "only {idat_count} IDAT chunks");

    assert_eq!(PngDecoder::new(&bytes).decode().unwrap(), image);
}

#[test]
fn headers_before_decode() {
    let image = random_image(13, 9, ColorModel::RGBA, 3);
    let bytes = PngEncoder::new(&image).encode().unwrap();

    let mut decoder = PngDecoder::new(&bytes);
    assert_eq!(decoder.dimensions(), None);

    decoder.decode_headers().unwrap();

    assert_eq!(decoder.dimensions(), Some((13, 9)));
    assert_eq!(decoder.color_model(), Some(ColorModel::RGBA));
    assert_eq!(decoder.output_buf_size(), Some(13 * 9 * 4));

    let mut out = vec![0; 13 * 9 * 4];
    decoder.decode_into(&mut out).unwrap();
    assert_eq!(out, image.pixels());
}

#[test]
fn decode_into_small_buffer() {
    let image = random_image(4, 4, ColorModel::RGB, 9);
    let bytes = PngEncoder::new(&image).encode().unwrap();

    let mut out = vec![0; 10];
    assert!(PngDecoder::new(&bytes).decode_into(&mut out).is_err());
}

#[test]
fn output_is_readable_by_the_png_crate() {
    let cases = [
        (ColorModel::Grayscale, png::ColorType::Grayscale),
        (ColorModel::RGB, png::ColorType::Rgb),
        (ColorModel::RGBA, png::ColorType::Rgba)
    ];
    for (model, expected_color) in cases {
        let image = gradient_image(45, 30, model);
        let bytes = PngEncoder::new(&image).encode().unwrap();

        let decoder = png::Decoder::new(bytes.as_slice());
        let mut reader = decoder.read_info().unwrap();
        let mut out = vec![0; reader.output_buffer_size()];
        let info = reader.next_frame(&mut out).unwrap();

        assert_eq!(info.color_type, expected_color);
        assert_eq!(info.bit_depth, png::BitDepth::Eight);
        assert_eq!((info.width, info.height), (45, 30));
        assert_eq!(&out[..info.buffer_size()], image.pixels());
    }
}

#[test]
fn reads_files_from_the_png_crate() {
    let image = gradient_image(31, 19, ColorModel::RGB);

    let mut bytes = Vec::new();
    {
        let mut encoder = png::Encoder::new(&mut bytes, 31, 19);
        encoder.set_color(png::ColorType::Rgb);
        encoder.set_depth(png::BitDepth::Eight);
        encoder.set_filter(png::FilterType::Paeth);
        let mut writer = encoder.write_header().unwrap();
        writer.write_image_data(image.pixels()).unwrap();
        writer.finish().unwrap();
    }
    assert_eq!(PngDecoder::new(&bytes).decode().unwrap(), image);
}

#[test]
fn gray_alpha_is_expanded_to_rgba() {
    let gray_alpha = [10_u8, 255, 20, 128, 30, 0, 40, 64];

    let mut bytes = Vec::new();
    {
        let mut encoder = png::Encoder::new(&mut bytes, 2, 2);
        encoder.set_color(png::ColorType::GrayscaleAlpha);
        encoder.set_depth(png::BitDepth::Eight);
        let mut writer = encoder.write_header().unwrap();
        writer.write_image_data(&gray_alpha).unwrap();
        writer.finish().unwrap();
    }

    let mut decoder = PngDecoder::new(&bytes);
    decoder.decode_headers().unwrap();
    assert_eq!(decoder.color_model(), Some(ColorModel::RGBA));
    assert_eq!(decoder.info().unwrap().color, pixway_png::PngColor::LumaA);

    let image = decoder.decode().unwrap();
    assert_eq!(
        image.pixels(),
        &[10, 10, 10, 255, 20, 20, 20, 128, 30, 30, 30, 0, 40, 40, 40, 64]
    );
}

#[test]
fn every_color_type_and_filter_from_the_png_crate() {
    let kinds = [
        (png::ColorType::Grayscale, 1),
        (png::ColorType::GrayscaleAlpha, 2),
        (png::ColorType::Rgb, 3),
        (png::ColorType::Rgba, 4)
    ];
    let filters = [
        png::FilterType::NoFilter,
        png::FilterType::Sub,
        png::FilterType::Up,
        png::FilterType::Avg,
        png::FilterType::Paeth
    ];
    let (width, height) = (67, 41);
    let mut rand = nanorand::WyRand::new_seed(67);

    for (color, components) in kinds {
        let mut raw = vec![0_u8; width * height * components];
        rand.fill(&mut raw);

        // what pixway hands out, gray + alpha becomes RGBA
        let expected: Vec<u8> = if components == 2 {
            raw.chunks_exact(2)
                .flat_map(|p| [p[0], p[0], p[0], p[1]])
                .collect()
        } else {
            raw.clone()
        };

        for filter in filters {
            let mut bytes = Vec::new();
            {
                let mut encoder = png::Encoder::new(&mut bytes, width as u32, height as u32);
                encoder.set_color(color);
                encoder.set_depth(png::BitDepth::Eight);
                encoder.set_filter(filter);
                let mut writer = encoder.write_header().unwrap();
                writer.write_image_data(&raw).unwrap();
                writer.finish().unwrap();
            }
            let image = PngDecoder::new(&bytes).decode().unwrap();

            assert_eq!(image.dimensions(), (width, height));
            assert!(image.pixels() == expected.as_slice(), "{color:?} {filter:?}");
        }
    }
}
