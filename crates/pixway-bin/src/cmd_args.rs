/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

use clap::builder::PossibleValue;
use clap::{value_parser, Arg, ArgAction, Command, ValueEnum};
use pixway_core::options::ChromaSubsampling;

/// Chroma subsampling as spelled on the command line
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum ISubsampling {
    S420,
    S444
}

impl ISubsampling {
    pub const fn to_subsampling(self) -> ChromaSubsampling {
        match self {
            ISubsampling::S420 => ChromaSubsampling::Yuv420,
            ISubsampling::S444 => ChromaSubsampling::Yuv444
        }
    }
}

impl ValueEnum for ISubsampling {
    fn value_variants<'a>() -> &'a [Self] {
        &[Self::S420, Self::S444]
    }

    fn to_possible_value(&self) -> Option<PossibleValue> {
        Some(match self {
            Self::S420 => PossibleValue::new("420").help("Halve chroma resolution in both directions"),
            Self::S444 => PossibleValue::new("444").help("Keep full chroma resolution")
        })
    }
}

#[rustfmt::skip]
pub fn create_cmd_args() -> Command {
    Command::new("pixway")
        .about("Convert images between BMP, PNG and JPEG")
        .long_about("Convert images between BMP, PNG and JPEG.\nThe input format is detected from the file contents, the output format from the output file extension.")
        .arg(Arg::new("in")
            .short('i')
            .long("input")
            .help("Input file to read data from")
            .conflicts_with("input-file"))
        .arg(Arg::new("out")
            .short('o')
            .long("output")
            .help("Output file to write the image to")
            .conflicts_with("output-file"))
        .arg(Arg::new("input-file")
            .index(1)
            .value_name("INPUT")
            .help("Input file, same as --input"))
        .arg(Arg::new("output-file")
            .index(2)
            .value_name("OUTPUT")
            .help("Output file, same as --output"))
        .arg(Arg::new("quality")
            .long("quality")
            .help_heading("ENCODER")
            .help("JPEG quality, 1 to 100")
            .value_parser(value_parser!(u8).range(1..=100))
            .default_value("50"))
        .arg(Arg::new("subsampling")
            .long("subsampling")
            .help_heading("ENCODER")
            .help("JPEG chroma subsampling")
            .value_parser(value_parser!(ISubsampling))
            .default_value("420"))
        .arg(Arg::new("max-width")
            .long("max-width")
            .help_heading("DECODER")
            .help("Maximum width of images accepted by decoders")
            .value_parser(value_parser!(usize))
            .default_value("16384"))
        .arg(Arg::new("max-height")
            .long("max-height")
            .help_heading("DECODER")
            .help("Maximum height of images accepted by decoders")
            .value_parser(value_parser!(usize))
            .default_value("16384"))
        .arg(Arg::new("strict")
            .long("strict")
            .action(ArgAction::SetTrue)
            .help_heading("DECODER")
            .help("Treat recoverable decoding oddities as errors"))
        .arg(Arg::new("debug")
            .long("debug")
            .action(ArgAction::SetTrue)
            .help_heading("LOGGING")
            .help("Display debug information and higher"))
        .arg(Arg::new("trace")
            .long("trace")
            .action(ArgAction::SetTrue)
            .help_heading("LOGGING")
            .help("Display very verbose information"))
        .arg(Arg::new("warn")
            .long("warn")
            .action(ArgAction::SetTrue)
            .help_heading("LOGGING")
            .help("Display warnings and errors"))
        .arg(Arg::new("info")
            .long("info")
            .action(ArgAction::SetTrue)
            .help_heading("LOGGING")
            .help("Display information about the decoding options"))
}

#[cfg(test)]
mod tests {
    use pixway_core::options::ChromaSubsampling;

    use super::{create_cmd_args, ISubsampling};

    #[test]
    fn verify_cmd() {
        create_cmd_args().debug_assert();
    }

    #[test]
    fn subsampling_parses() {
        let matches = create_cmd_args()
            .try_get_matches_from(["pixway", "a.bmp", "b.jpg", "--subsampling", "444"])
            .unwrap();

        let value = *matches.get_one::<ISubsampling>("subsampling").unwrap();
        assert_eq!(value, ISubsampling::S444);
        assert_eq!(value.to_subsampling(), ChromaSubsampling::Yuv444);
    }

    #[test]
    fn quality_range_is_checked() {
        let result = create_cmd_args().try_get_matches_from(["pixway", "a.bmp", "b.jpg", "--quality", "101"]);

        assert!(result.is_err());
    }

    #[test]
    fn flag_and_positional_input_conflict() {
        let result = create_cmd_args().try_get_matches_from(["pixway", "-i", "a.bmp", "c.bmp"]);

        assert!(result.is_err());
    }
}
