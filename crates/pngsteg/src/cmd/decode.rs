use pngsteg_frame::FrameConfig;
use pngsteg_image::load_png;
use pngsteg_pixel::decode_with_config;
use serde::Serialize;

use crate::cmd::DecodeArgs;
use crate::exit::{image_error, steg_error, CliResult, SUCCESS};
use crate::output::{print_fields, print_json, print_raw, OutputFormat};

#[derive(Serialize)]
struct DecodeOutput {
    input: String,
    payload_bytes: usize,
    message: String,
}

pub fn run(args: DecodeArgs, format: OutputFormat) -> CliResult<i32> {
    let grid = load_png(&args.input).map_err(|err| image_error("invalid input", err))?;
    let config = frame_config(&args);

    let message =
        decode_with_config(&grid, config).map_err(|err| steg_error("decode failed", err))?;
    tracing::info!(payload_bytes = message.len(), "message recovered");

    let out = DecodeOutput {
        input: args.input.display().to_string(),
        payload_bytes: message.len(),
        message,
    };
    print_decode(&out, format);
    Ok(SUCCESS)
}

fn frame_config(args: &DecodeArgs) -> FrameConfig {
    match args.max_payload {
        Some(max_payload_size) => FrameConfig { max_payload_size },
        None => FrameConfig::default(),
    }
}

fn print_decode(out: &DecodeOutput, format: OutputFormat) {
    match format {
        OutputFormat::Json => print_json(out),
        OutputFormat::Table => print_fields(&[
            ("input", out.input.clone()),
            ("payload bytes", out.payload_bytes.to_string()),
            ("message", out.message.clone()),
        ]),
        OutputFormat::Pretty => {
            println!("Here is the decoded hidden message from the image:");
            println!("{}", out.message);
        }
        OutputFormat::Raw => print_raw(out.message.as_bytes()),
    }
}
