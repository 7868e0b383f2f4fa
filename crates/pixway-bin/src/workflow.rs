/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

use std::fs;
use std::path::{Path, PathBuf};

use clap::ArgMatches;
use log::{debug, info};
use pixway_core::options::{DecoderOptions, EncoderOptions};
use pixway_image::codecs::ImageFormat;

use crate::cmd_parsers::{get_decoder_options, get_encoder_options};
use crate::errors::CmdErrors;

/// Pick input and output paths from either the flags or the positionals
fn file_paths(args: &ArgMatches) -> Result<(PathBuf, PathBuf), CmdErrors> {
    let input = args
        .get_one::<String>("in")
        .or_else(|| args.get_one::<String>("input-file"))
        .ok_or(CmdErrors::MissingArgument("input"))?;

    let output = args
        .get_one::<String>("out")
        .or_else(|| args.get_one::<String>("output-file"))
        .ok_or(CmdErrors::MissingArgument("output"))?;

    Ok((PathBuf::from(input), PathBuf::from(output)))
}

pub(crate) fn convert_from_cmd(args: &ArgMatches) -> Result<(), CmdErrors> {
    let (input, output) = file_paths(args)?;

    convert_file(
        &input,
        &output,
        get_decoder_options(args),
        get_encoder_options(args)
    )
}

/// Convert one file into another
///
/// The decoder is chosen from the input's magic bytes, the encoder from
/// the output's extension. The output is only created once encoding succeeded.
pub(crate) fn convert_file(
    input: &Path, output: &Path, decoder_options: DecoderOptions,
    encoder_options: EncoderOptions
) -> Result<(), CmdErrors> {
    if input == output {
        return Err(CmdErrors::SameFile(input.to_path_buf()));
    }
    // pick the encoder before touching the input
    let extension = output
        .extension()
        .and_then(|x| x.to_str())
        .ok_or_else(|| CmdErrors::NoExtension(output.to_path_buf()))?;

    let out_format = ImageFormat::from_extension(extension)?;

    info!("Reading {}", input.display());
    let data = fs::read(input).map_err(|err| CmdErrors::IoErrors(input.to_path_buf(), err))?;

    let in_format = ImageFormat::guess_format(&data)?;
    debug!("Treating {} as a {:?} file", input.display(), in_format);

    let image = in_format.decode(&data, decoder_options)?;

    let (width, height) = image.dimensions();
    info!(
        "Decoded {}x{} image, color model {:?}",
        width,
        height,
        image.color_model()
    );
    debug!("Treating {} as a {:?} file", output.display(), out_format);

    let bytes = out_format.encode(&image, encoder_options)?;

    info!("Writing {} bytes to {}", bytes.len(), output.display());
    fs::write(output, bytes).map_err(|err| CmdErrors::IoErrors(output.to_path_buf(), err))?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use pixway_core::colorspace::ColorModel;
    use pixway_core::midway::Midway;
    use pixway_core::options::{DecoderOptions, EncoderOptions};
    use pixway_image::codecs::ImageFormat;
    use pixway_image::errors::ImageErrors;

    use super::{convert_file, file_paths};
    use crate::cmd_args::create_cmd_args;
    use crate::errors::CmdErrors;

    fn scratch_path(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!("pixway-{}-{name}", std::process::id()))
    }

    fn write_red_bmp(path: &PathBuf) {
        let image = Midway::from_pixel(2, 2, ColorModel::RGB, &[255, 0, 0]).unwrap();
        let bytes = ImageFormat::BMP
            .encode(&image, EncoderOptions::default())
            .unwrap();
        std::fs::write(path, bytes).unwrap();
    }

    #[test]
    fn paths_from_flags_or_positionals() {
        let matches = create_cmd_args()
            .try_get_matches_from(["pixway", "-i", "a.bmp", "-o", "b.png"])
            .unwrap();
        let (input, output) = file_paths(&matches).unwrap();
        assert_eq!(input, PathBuf::from("a.bmp"));
        assert_eq!(output, PathBuf::from("b.png"));

        let matches = create_cmd_args()
            .try_get_matches_from(["pixway", "a.bmp", "b.png"])
            .unwrap();
        let (input, output) = file_paths(&matches).unwrap();
        assert_eq!(input, PathBuf::from("a.bmp"));
        assert_eq!(output, PathBuf::from("b.png"));
    }

    #[test]
    fn missing_output() {
        let matches = create_cmd_args()
            .try_get_matches_from(["pixway", "a.bmp"])
            .unwrap();

        assert!(matches!(
            file_paths(&matches),
            Err(CmdErrors::MissingArgument("output"))
        ));
    }

    #[test]
    fn bmp_to_png_file() {
        let input = scratch_path("red.bmp");
        let output = scratch_path("red.png");
        write_red_bmp(&input);

        convert_file(
            &input,
            &output,
            DecoderOptions::default(),
            EncoderOptions::default()
        )
        .unwrap();

        let bytes = std::fs::read(&output).unwrap();
        let image = ImageFormat::PNG
            .decode(&bytes, DecoderOptions::default())
            .unwrap();
        let expected: Vec<u8> = [255, 0, 0].repeat(4);
        assert_eq!(image.pixels(), &expected[..]);

        let _ = std::fs::remove_file(input);
        let _ = std::fs::remove_file(output);
    }

    #[test]
    fn unknown_extension_writes_nothing() {
        let input = scratch_path("ext.bmp");
        let output = scratch_path("ext.tiff");
        write_red_bmp(&input);

        let err = convert_file(
            &input,
            &output,
            DecoderOptions::default(),
            EncoderOptions::default()
        )
        .unwrap_err();

        assert!(matches!(
            err,
            CmdErrors::ImageErrors(ImageErrors::UnknownExtension(_))
        ));
        assert!(!output.exists());

        let _ = std::fs::remove_file(input);
    }

    #[test]
    fn failed_decode_writes_nothing() {
        let input = scratch_path("garbage.bmp");
        let output = scratch_path("garbage.png");
        std::fs::write(&input, b"BM\x00\x00\x00\x00").unwrap();

        let err = convert_file(
            &input,
            &output,
            DecoderOptions::default(),
            EncoderOptions::default()
        )
        .unwrap_err();

        assert!(matches!(err, CmdErrors::ImageErrors(_)));
        assert!(!output.exists());

        let _ = std::fs::remove_file(input);
    }

    #[test]
    fn same_file_is_rejected() {
        let path = scratch_path("same.png");

        let err = convert_file(
            &path,
            &path,
            DecoderOptions::default(),
            EncoderOptions::default()
        )
        .unwrap_err();

        assert!(matches!(err, CmdErrors::SameFile(_)));
    }

    #[test]
    fn missing_input_file() {
        let err = convert_file(
            &scratch_path("does-not-exist.bmp"),
            &scratch_path("does-not-exist.png"),
            DecoderOptions::default(),
            EncoderOptions::default()
        )
        .unwrap_err();

        assert!(matches!(err, CmdErrors::IoErrors(..)));
    }
}
