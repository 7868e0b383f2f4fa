/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

use clap::ArgMatches;
use log::{info, Level};
use pixway_core::options::{DecoderOptions, EncoderOptions};

use crate::cmd_args::ISubsampling;

/// Set up logging options
///
/// When several level flags are given the most verbose one wins
pub fn setup_logger(options: &ArgMatches) {
    let log_level = if options.get_flag("trace") {
        Level::Trace
    } else if options.get_flag("debug") {
        Level::Debug
    } else if options.get_flag("info") {
        Level::Info
    } else {
        Level::Warn
    };

    if let Err(err) = simple_logger::init_with_level(log_level) {
        eprintln!("Could not initialize logger: {err}");
        return;
    }
    info!("Initialized logger");
    info!("Log level: {}", log_level);
}

pub fn get_decoder_options(options: &ArgMatches) -> DecoderOptions {
    let mut decoder_options = DecoderOptions::new_cmd().set_strict_mode(options.get_flag("strict"));

    if let Some(width) = options.get_one::<usize>("max-width") {
        decoder_options = decoder_options.set_max_width(*width);
    }
    if let Some(height) = options.get_one::<usize>("max-height") {
        decoder_options = decoder_options.set_max_height(*height);
    }
    decoder_options
}

pub fn get_encoder_options(options: &ArgMatches) -> EncoderOptions {
    let mut encoder_options = EncoderOptions::default();

    if let Some(quality) = options.get_one::<u8>("quality") {
        encoder_options = encoder_options.set_quality(*quality);
    }
    if let Some(subsampling) = options.get_one::<ISubsampling>("subsampling") {
        encoder_options = encoder_options.jpeg_set_subsampling(subsampling.to_subsampling());
    }
    encoder_options
}

#[cfg(test)]
mod tests {
    use pixway_core::options::ChromaSubsampling;

    use super::*;
    use crate::cmd_args::create_cmd_args;

    #[test]
    fn defaults() {
        let matches = create_cmd_args()
            .try_get_matches_from(["pixway", "a.png", "b.jpg"])
            .unwrap();

        let decoder = get_decoder_options(&matches);
        assert_eq!(decoder.get_max_width(), 16384);
        assert_eq!(decoder.get_max_height(), 16384);
        assert!(!decoder.get_strict_mode());

        let encoder = get_encoder_options(&matches);
        assert_eq!(encoder.get_quality(), 50);
        assert_eq!(encoder.jpeg_get_subsampling(), ChromaSubsampling::Yuv420);
    }

    #[test]
    fn values_are_forwarded() {
        let matches = create_cmd_args()
            .try_get_matches_from([
                "pixway",
                "-i",
                "a.png",
                "-o",
                "b.jpg",
                "--quality",
                "90",
                "--subsampling",
                "444",
                "--max-width",
                "100",
                "--max-height",
                "20",
                "--strict"
            ])
            .unwrap();

        let decoder = get_decoder_options(&matches);
        assert_eq!(decoder.get_max_width(), 100);
        assert_eq!(decoder.get_max_height(), 20);
        assert!(decoder.get_strict_mode());

        let encoder = get_encoder_options(&matches);
        assert_eq!(encoder.get_quality(), 90);
        assert_eq!(encoder.jpeg_get_subsampling(), ChromaSubsampling::Yuv444);
    }
}
