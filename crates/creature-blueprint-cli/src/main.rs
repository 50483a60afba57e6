//! Command-line tool for inspecting and editing creature blueprint URLs.

mod render;

use std::fs;
use std::io::Read;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{ArgAction, Parser, Subcommand, ValueEnum};
use creature_blueprint::{
    decode_blueprint, encode_blueprint, encode_url, payload_from_url, url_from_payload, Blueprint,
};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "blueprint", version, about = "Decode, edit and re-encode creature blueprint URLs")]
struct Cli {
    /// Increase log verbosity (-v debug, -vv trace). RUST_LOG takes precedence.
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the contents of a blueprint URL
    Decode {
        /// Blueprint URL or bare payload; `-` or omitted reads stdin
        url: Option<String>,
        #[arg(long, value_enum, default_value_t = Format::Text)]
        format: Format,
    },
    /// Build a blueprint URL from JSON produced by `decode --format json`
    Encode {
        /// JSON file; `-` or omitted reads stdin
        file: Option<String>,
    },
    /// Check that a blueprint re-encodes to the identical payload
    Roundtrip {
        /// Blueprint URL or bare payload; `-` or omitted reads stdin
        url: Option<String>,
    },
    /// Apply simple edits and print the new URL
    Set {
        /// Blueprint URL or bare payload; `-` or omitted reads stdin
        url: Option<String>,
        #[arg(long, conflicts_with = "unset_name")]
        name: Option<String>,
        /// Mark the name as never set
        #[arg(long)]
        unset_name: bool,
        /// Current hit points
        #[arg(long)]
        hp: Option<f32>,
        /// Maximum hit points
        #[arg(long)]
        hp_max: Option<f32>,
        #[arg(long)]
        torch: Option<bool>,
        #[arg(long)]
        hidden: Option<bool>,
        #[arg(long)]
        flying: Option<bool>,
    },
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum Format {
    Text,
    Json,
}

fn init_tracing(verbose: u8) {
    let default = match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn read_input(arg: Option<&str>) -> Result<String> {
    match arg {
        None | Some("-") => {
            let mut buf = String::new();
            std::io::stdin()
                .read_to_string(&mut buf)
                .context("failed to read stdin")?;
            Ok(buf)
        }
        Some(value) => Ok(value.to_string()),
    }
}

fn read_file_or_stdin(arg: Option<&str>) -> Result<String> {
    match arg {
        None | Some("-") => read_input(None),
        Some(path) => fs::read_to_string(path).with_context(|| format!("failed to read {path}")),
    }
}

fn load(url: Option<&str>) -> Result<(Vec<u8>, Blueprint)> {
    let input = read_input(url)?;
    let payload = payload_from_url(&input).context("invalid blueprint URL")?;
    debug!(bytes = payload.len(), "extracted payload");
    let blueprint = decode_blueprint(&payload).context("failed to decode blueprint")?;
    Ok((payload, blueprint))
}

fn run(cli: Cli) -> Result<ExitCode> {
    match cli.command {
        Command::Decode { url, format } => {
            let (_, blueprint) = load(url.as_deref())?;
            match format {
                Format::Text => print!("{}", render::render_text(&blueprint)?),
                Format::Json => println!("{}", serde_json::to_string_pretty(&blueprint)?),
            }
        }
        Command::Encode { file } => {
            let json = read_file_or_stdin(file.as_deref())?;
            let blueprint: Blueprint =
                serde_json::from_str(&json).context("invalid blueprint JSON")?;
            println!("{}", encode_url(&blueprint)?);
        }
        Command::Roundtrip { url } => {
            let (payload, blueprint) = load(url.as_deref())?;
            let encoded = encode_blueprint(&blueprint)?;
            if encoded != payload {
                let at = payload
                    .iter()
                    .zip(&encoded)
                    .position(|(a, b)| a != b)
                    .unwrap_or(payload.len().min(encoded.len()));
                eprintln!(
                    "mismatch at byte {at}: original {} bytes, re-encoded {} bytes",
                    payload.len(),
                    encoded.len()
                );
                println!("{}", url_from_payload(&encoded));
                return Ok(ExitCode::FAILURE);
            }
            info!(bytes = payload.len(), "round trip identical");
            println!("ok ({} bytes)", payload.len());
        }
        Command::Set {
            url,
            name,
            unset_name,
            hp,
            hp_max,
            torch,
            hidden,
            flying,
        } => {
            let (_, mut blueprint) = load(url.as_deref())?;
            if name.is_some() || unset_name {
                blueprint.name = name;
            }
            if let Some(value) = hp {
                blueprint.hit_points_mut().value = value;
            }
            if let Some(max) = hp_max {
                blueprint.hit_points_mut().max = max;
            }
            if let Some(torch) = torch {
                blueprint.torch_enabled = torch;
            }
            if let Some(hidden) = hidden {
                blueprint.explicitly_hidden = hidden;
            }
            if let Some(flying) = flying {
                blueprint.flying_enabled = flying;
            }
            println!("{}", encode_url(&blueprint)?);
        }
    }
    Ok(ExitCode::SUCCESS)
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    match run(cli) {
        Ok(code) => code,
        Err(err) => {
            eprintln!("error: {err:#}");
            ExitCode::FAILURE
        }
    }
}
