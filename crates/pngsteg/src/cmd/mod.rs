use clap::{ArgGroup, Args, Subcommand};
use std::path::PathBuf;

use crate::exit::CliResult;
use crate::output::OutputFormat;

pub mod capacity;
pub mod decode;
pub mod encode;
pub mod version;

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Hide a text message in a PNG image.
    Encode(EncodeArgs),
    /// Extract a hidden text message from a PNG image.
    Decode(DecodeArgs),
    /// Show how much text a PNG image can hold.
    Capacity(CapacityArgs),
    /// Show version information.
    Version(VersionArgs),
}

pub fn run(command: Command, format: OutputFormat) -> CliResult<i32> {
    match command {
        Command::Encode(args) => encode::run(args, format),
        Command::Decode(args) => decode::run(args, format),
        Command::Capacity(args) => capacity::run(args, format),
        Command::Version(args) => version::run(args),
    }
}

#[derive(Args, Debug)]
#[command(group(ArgGroup::new("message").required(true).args(["text", "file"])))]
pub struct EncodeArgs {
    /// Input PNG image (RGB or RGBA).
    #[arg(long, short = 'i', value_name = "PNG")]
    pub input: PathBuf,
    /// Output file path.
    #[arg(long, short = 'o', value_name = "PNG", default_value = "output.png")]
    pub output: PathBuf,
    /// Text message to hide.
    #[arg(long, short = 't')]
    pub text: Option<String>,
    /// File containing the text message to hide.
    #[arg(long, short = 'f', value_name = "FILE")]
    pub file: Option<PathBuf>,
}

#[derive(Args, Debug)]
pub struct DecodeArgs {
    /// Input PNG image (RGB or RGBA).
    #[arg(long, short = 'i', value_name = "PNG")]
    pub input: PathBuf,
    /// Reject hidden messages longer than this many bytes.
    #[arg(long, value_name = "BYTES", env = "PNGSTEG_MAX_PAYLOAD")]
    pub max_payload: Option<usize>,
}

#[derive(Args, Debug)]
pub struct CapacityArgs {
    /// Input PNG image (RGB or RGBA).
    #[arg(long, short = 'i', value_name = "PNG")]
    pub input: PathBuf,
}

#[derive(Args, Debug)]
pub struct VersionArgs {
    /// Show extended build provenance.
    #[arg(long)]
    pub extended: bool,
}
