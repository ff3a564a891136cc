use std::fs;
use std::path::Path;

use pngsteg_frame::FrameError;
use pngsteg_image::{load_png, save_png};
use pngsteg_pixel::{encode, EncodeReport, PixelGrid};
use serde::Serialize;

use crate::cmd::EncodeArgs;
use crate::exit::{
    frame_error, image_error, io_error, steg_error, CliError, CliResult, SUCCESS, USAGE,
};
use crate::output::{percent, print_fields, print_json, OutputFormat};

#[derive(Serialize)]
struct EncodeOutput {
    input: String,
    output: String,
    width: u32,
    height: u32,
    layout: String,
    payload_bytes: usize,
    bits_written: usize,
    capacity_bits: usize,
    utilization: f64,
}

pub fn run(args: EncodeArgs, format: OutputFormat) -> CliResult<i32> {
    let grid = load_png(&args.input).map_err(|err| image_error("invalid input", err))?;
    check_output_dir(&args.output)?;
    let message = resolve_message(&args)?;

    let (encoded, report) =
        encode(&grid, &message).map_err(|err| steg_error("encode failed", err))?;
    save_png(&encoded, &args.output).map_err(|err| {
        image_error(&format!("failed writing {}", args.output.display()), err)
    })?;

    tracing::info!(
        output = %args.output.display(),
        payload_bytes = report.payload_bytes,
        bits_written = report.bits_written,
        "message hidden"
    );

    let out = encode_output(&args, &grid, &report);
    print_encode(&out, format);
    Ok(SUCCESS)
}

fn resolve_message(args: &EncodeArgs) -> CliResult<String> {
    if let Some(text) = &args.text {
        return Ok(text.clone());
    }
    if let Some(path) = &args.file {
        if !path.is_file() {
            return Err(CliError::new(
                USAGE,
                format!("message file does not exist: {}", path.display()),
            ));
        }
        let bytes = fs::read(path)
            .map_err(|err| io_error(&format!("failed reading {}", path.display()), err))?;
        return String::from_utf8(bytes).map_err(|err| {
            frame_error(
                &format!("invalid message file {}", path.display()),
                FrameError::EncodingError(err.utf8_error()),
            )
        });
    }
    Err(CliError::new(USAGE, "one of --text or --file is required"))
}

fn check_output_dir(output: &Path) -> CliResult<()> {
    match output.parent() {
        Some(dir) if !dir.as_os_str().is_empty() && !dir.is_dir() => Err(CliError::new(
            USAGE,
            format!("output path does not exist: {}", dir.display()),
        )),
        _ => Ok(()),
    }
}

fn encode_output(args: &EncodeArgs, grid: &PixelGrid, report: &EncodeReport) -> EncodeOutput {
    EncodeOutput {
        input: args.input.display().to_string(),
        output: args.output.display().to_string(),
        width: grid.width(),
        height: grid.height(),
        layout: grid.layout().to_string(),
        payload_bytes: report.payload_bytes,
        bits_written: report.bits_written,
        capacity_bits: report.capacity_bits,
        utilization: report.utilization(),
    }
}

fn print_encode(out: &EncodeOutput, format: OutputFormat) {
    match format {
        OutputFormat::Json => print_json(out),
        OutputFormat::Table => print_fields(&[
            ("input", out.input.clone()),
            ("output", out.output.clone()),
            ("size", format!("{}x{} {}", out.width, out.height, out.layout)),
            ("payload bytes", out.payload_bytes.to_string()),
            (
                "bits used",
                format!("{} / {}", out.bits_written, out.capacity_bits),
            ),
            ("utilization", percent(out.utilization)),
        ]),
        OutputFormat::Pretty => {
            println!(
                "Hid {} bytes in {} ({} of {} bits, {})",
                out.payload_bytes,
                out.output,
                out.bits_written,
                out.capacity_bits,
                percent(out.utilization)
            );
        }
        OutputFormat::Raw => println!("{}", out.output),
    }
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use super::*;
    use crate::exit::DATA_INVALID;

    fn args(text: Option<&str>, file: Option<PathBuf>) -> EncodeArgs {
        EncodeArgs {
            input: PathBuf::from("in.png"),
            output: PathBuf::from("out.png"),
            text: text.map(str::to_string),
            file,
        }
    }

    #[test]
    fn text_wins_when_given() {
        assert_eq!(resolve_message(&args(Some("hi"), None)).unwrap(), "hi");
    }

    #[test]
    fn message_file_is_read_as_utf8() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("msg.txt");
        fs::write(&path, "from a file\n").unwrap();

        assert_eq!(
            resolve_message(&args(None, Some(path))).unwrap(),
            "from a file\n"
        );
    }

    #[test]
    fn message_file_must_exist() {
        let dir = tempfile::tempdir().unwrap();
        let err = resolve_message(&args(None, Some(dir.path().join("missing.txt")))).unwrap_err();
        assert_eq!(err.code, USAGE);
    }

    #[test]
    fn message_file_must_be_utf8() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("msg.bin");
        fs::write(&path, [0x66, 0xFF, 0xFE]).unwrap();

        let err = resolve_message(&args(None, Some(path))).unwrap_err();
        assert_eq!(err.code, DATA_INVALID);
    }

    #[test]
    fn output_dir_must_exist() {
        let dir = tempfile::tempdir().unwrap();
        assert!(check_output_dir(&dir.path().join("out.png")).is_ok());
        assert!(check_output_dir(Path::new("out.png")).is_ok());

        let err = check_output_dir(&dir.path().join("missing").join("out.png")).unwrap_err();
        assert_eq!(err.code, USAGE);
    }
}
