/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

use nanorand::Rng;
use pixway_bmp::{BmpDecoder, BmpEncoder};
use pixway_core::colorspace::ColorModel;
use pixway_core::midway::Midway;

fn random_image(width: usize, height: usize, model: ColorModel, seed: u64) -> Midway {
    let mut rand = nanorand::WyRand::new_seed(seed);
    let mut pixels = vec![0_u8; width * height * model.num_components()];
    rand.fill(&mut pixels);

    if model == ColorModel::RGBA {
        // keep at least one opaque pixel so alpha is not treated as unused
        pixels[3] = 255;
    }
    Midway::new(width, height, model, pixels).unwrap()
}

#[test]
fn solid_red_round_trip() {
    let image = Midway::from_pixel(2, 2, ColorModel::RGB, &[255, 0, 0]).unwrap();
    let encoded = BmpEncoder::new(&image).encode().unwrap();

    let mut decoder = BmpDecoder::new(&encoded);
    let decoded = decoder.decode().unwrap();

    assert_eq!(decoder.dimensions(), Some((2, 2)));
    assert_eq!(decoder.depth(), Some(24));
    assert_eq!(decoded, image);
    for y in 0..2 {
        for x in 0..2 {
            assert_eq!(decoded.pixel(x, y), Some(&[255, 0, 0][..]));
        }
    }
}

#[test]
fn random_rgb_round_trip() {
    // widths covering every padding amount
    for (seed, width) in [1, 2, 3, 4, 5, 17, 33].into_iter().enumerate() {
        let image = random_image(width, 7, ColorModel::RGB, seed as u64);
        let encoded = BmpEncoder::new(&image).encode().unwrap();
        let decoded = BmpDecoder::new(&encoded).decode().unwrap();

        assert_eq!(decoded, image, "width {width}");
    }
}

#[test]
fn random_rgba_round_trip() {
    let image = random_image(13, 9, ColorModel::RGBA, 42);
    let encoded = BmpEncoder::new(&image).encode().unwrap();
    let decoded = BmpDecoder::new(&encoded).decode().unwrap();

    assert_eq!(decoded.color_model(), ColorModel::RGBA);
    assert_eq!(decoded, image);
}

#[test]
fn zero_alpha_is_opaque() {
    let image = Midway::from_pixel(3, 3, ColorModel::RGBA, &[10, 20, 30, 0]).unwrap();
    let encoded = BmpEncoder::new(&image).encode().unwrap();
    let decoded = BmpDecoder::new(&encoded).decode().unwrap();

    assert!(decoded.pixels().chunks_exact(4).all(|p| p == [10, 20, 30, 255]));
}

#[test]
fn top_down_images() {
    let image = random_image(5, 4, ColorModel::RGB, 7);
    let mut encoded = BmpEncoder::new(&image).encode().unwrap();

    // negate the height and store the rows top first
    encoded[22..26].copy_from_slice(&(-4_i32).to_le_bytes());
    let stride = 16;
    let rows: Vec<Vec<u8>> = encoded[54..].chunks(stride).map(|x| x.to_vec()).collect();
    for (pos, row) in rows.iter().rev().enumerate() {
        encoded[54 + pos * stride..54 + (pos + 1) * stride].copy_from_slice(row);
    }

    let decoded = BmpDecoder::new(&encoded).decode().unwrap();
    assert_eq!(decoded, image);
}

#[test]
fn decode_into_small_buffer() {
    let image = Midway::from_pixel(2, 2, ColorModel::RGB, &[1, 2, 3]).unwrap();
    let encoded = BmpEncoder::new(&image).encode().unwrap();
    let mut out = [0; 11];

    assert!(BmpDecoder::new(&encoded).decode_into(&mut out).is_err());
}
