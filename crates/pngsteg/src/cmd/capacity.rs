use pngsteg_frame::max_payload_bytes;
use pngsteg_image::load_png;
use serde::Serialize;

use crate::cmd::CapacityArgs;
use crate::exit::{image_error, CliResult, SUCCESS};
use crate::output::{print_fields, print_json, OutputFormat};

#[derive(Serialize)]
struct CapacityOutput {
    input: String,
    width: u32,
    height: u32,
    layout: String,
    capacity_bits: usize,
    max_payload_bytes: usize,
}

pub fn run(args: CapacityArgs, format: OutputFormat) -> CliResult<i32> {
    let grid = load_png(&args.input).map_err(|err| image_error("invalid input", err))?;
    let capacity_bits = grid.capacity();

    let out = CapacityOutput {
        input: args.input.display().to_string(),
        width: grid.width(),
        height: grid.height(),
        layout: grid.layout().to_string(),
        capacity_bits,
        max_payload_bytes: max_payload_bytes(capacity_bits),
    };
    print_capacity(&out, format);
    Ok(SUCCESS)
}

fn print_capacity(out: &CapacityOutput, format: OutputFormat) {
    match format {
        OutputFormat::Json => print_json(out),
        OutputFormat::Table => print_fields(&[
            ("input", out.input.clone()),
            ("size", format!("{}x{} {}", out.width, out.height, out.layout)),
            ("capacity bits", out.capacity_bits.to_string()),
            ("max payload bytes", out.max_payload_bytes.to_string()),
        ]),
        OutputFormat::Pretty => {
            println!("Capacity:");
            println!("  Image:        {}x{} {}", out.width, out.height, out.layout);
            println!("  LSB slots:    {} bits", out.capacity_bits);
            println!("  Max message:  {} bytes", out.max_payload_bytes);
        }
        OutputFormat::Raw => println!("{}", out.max_payload_bytes),
    }
}
