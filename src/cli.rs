//! Command line definition.
//!
//! Parsing never exits the process; the binary decides what to do with a
//! [`CliError`] (clap errors carry their own usage text and exit code).

use std::ffi::OsString;
use std::path::PathBuf;

use clap::{value_parser, Arg, ArgAction, Command};
use thiserror::Error;

use crate::config::{ConfigError, RenderConfig};
use crate::engine::RenderMode;

#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Args(#[from] clap::Error),

    #[error(transparent)]
    Config(#[from] ConfigError),
}

/// Everything one invocation of the binary needs.
#[derive(Debug, Clone, PartialEq)]
pub struct Options {
    pub obj: PathBuf,
    pub config: RenderConfig,
    /// Passes to render, in order, without duplicates.
    pub modes: Vec<RenderMode>,
    pub out_dir: PathBuf,
    pub use_rle: bool,
    pub png: bool,
    pub seed: u64,
}

fn parse_mode(s: &str) -> Result<RenderMode, String> {
    s.parse()
}

pub fn command() -> Command {
    Command::new("tinyraster")
        .about("Renders a Wavefront OBJ mesh to TGA images on the CPU")
        .disable_help_flag(true)
        .arg(
            Arg::new("help")
                .short('H')
                .long("help")
                .help("Print help")
                .action(ArgAction::Help),
        )
        .arg(
            Arg::new("obj")
                .short('o')
                .long("obj")
                .value_name("FILE")
                .help("Wavefront .obj file to render")
                .required(true)
                .value_parser(value_parser!(PathBuf)),
        )
        .arg(
            Arg::new("width")
                .short('w')
                .long("width")
                .value_name("PIXELS")
                .help("Output width; defaults to the height, or 3200")
                .value_parser(value_parser!(u32).range(1..)),
        )
        .arg(
            Arg::new("height")
                .short('h')
                .long("height")
                .value_name("PIXELS")
                .help("Output height; defaults to the width, or 3200")
                .value_parser(value_parser!(u32).range(1..)),
        )
        .arg(
            Arg::new("rotate")
                .short('r')
                .long("rotate")
                .value_name("RADIANS")
                .help("Rotate the mesh about the Y axis before rendering")
                .allow_negative_numbers(true)
                .value_parser(value_parser!(f32)),
        )
        .arg(
            Arg::new("mode")
                .short('m')
                .long("mode")
                .value_name("MODE")
                .help("Render pass: wireframe, flat, zbuffer or random [default: zbuffer]")
                .action(ArgAction::Append)
                .value_delimiter(',')
                .value_parser(parse_mode),
        )
        .arg(
            Arg::new("out-dir")
                .long("out-dir")
                .value_name("DIR")
                .help("Directory for output-<mode>.tga files")
                .default_value(".")
                .value_parser(value_parser!(PathBuf)),
        )
        .arg(
            Arg::new("raw")
                .long("raw")
                .help("Write uncompressed TGA instead of RLE")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("png")
                .long("png")
                .help("Also write each pass as PNG")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("seed")
                .long("seed")
                .value_name("N")
                .help("Seed for the random color pass")
                .default_value("0")
                .value_parser(value_parser!(u64)),
        )
}

/// Parses a full argument list, program name first.
pub fn parse_from<I, T>(args: I) -> Result<Options, CliError>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    let matches = command().try_get_matches_from(args)?;

    let config = RenderConfig::from_dimensions(
        matches.get_one::<u32>("width").copied(),
        matches.get_one::<u32>("height").copied(),
        matches.get_one::<f32>("rotate").copied(),
    )?;

    let mut modes: Vec<RenderMode> = Vec::new();
    for mode in matches
        .get_many::<RenderMode>("mode")
        .into_iter()
        .flatten()
        .copied()
    {
        if !modes.contains(&mode) {
            modes.push(mode);
        }
    }
    if modes.is_empty() {
        modes.push(RenderMode::default());
    }

    Ok(Options {
        obj: matches
            .get_one::<PathBuf>("obj")
            .cloned()
            .unwrap_or_default(),
        config,
        modes,
        out_dir: matches
            .get_one::<PathBuf>("out-dir")
            .cloned()
            .unwrap_or_else(|| PathBuf::from(".")),
        use_rle: !matches.get_flag("raw"),
        png: matches.get_flag("png"),
        seed: matches.get_one::<u64>("seed").copied().unwrap_or(0),
    })
}
