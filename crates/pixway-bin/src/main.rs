/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

use std::process::exit;

use log::error;

use crate::workflow::convert_from_cmd;

mod cmd_args;
mod cmd_parsers;
mod errors;
mod workflow;

fn main() {
    let cmd = cmd_args::create_cmd_args();
    let options = cmd.get_matches();

    cmd_parsers::setup_logger(&options);

    if let Err(err) = convert_from_cmd(&options) {
        error!("Could not convert image, reason: {err}");
        exit(1);
    }
    println!("done");
}
