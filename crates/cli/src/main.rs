#![deny(unsafe_code)]
//! CLI binary for fractal-lab.
//!
//! Subcommands:
//! - `render <fractal>` - render a fractal and write an image file
//! - `list` - print available fractals (with parameter schemas in JSON mode)

mod error;

use clap::{Parser, Subcommand};
use error::CliError;
use fractal_lab_core::Fractal;
use fractal_lab_fractals::{snapshot, FractalKind};
use std::path::PathBuf;
use std::process;

#[derive(Parser)]
#[command(name = "fractal-lab", about = "Fractal renderer CLI")]
struct Cli {
    /// Output as JSON instead of human-readable text.
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Render a fractal and write it as a square image.
    Render {
        /// Fractal name ("hilbert" or "pythagoras").
        fractal: String,

        /// Output image side length in pixels.
        #[arg(short, long, default_value_t = 1000)]
        size: u32,

        /// Output file path; the extension picks the format (png, jpg, bmp, gif).
        #[arg(short, long, default_value = "output.png")]
        output: PathBuf,

        /// Fractal parameters as a JSON string.
        #[arg(long, default_value = "{}")]
        params: String,
    },
    /// List available fractals.
    List,
}

fn run(cli: Cli) -> Result<(), CliError> {
    match cli.command {
        Command::List => {
            let fractals = FractalKind::list_fractals();
            if cli.json {
                let schemas: Result<Vec<serde_json::Value>, CliError> = fractals
                    .iter()
                    .map(|name| {
                        let kind = FractalKind::from_name(name, &serde_json::json!({}))?;
                        Ok(serde_json::json!({
                            "name": name,
                            "params": kind.param_schema(),
                        }))
                    })
                    .collect();
                let info = serde_json::json!({ "fractals": schemas? });
                println!("{}", serde_json::to_string_pretty(&info)?);
            } else {
                println!("Fractals:");
                for name in fractals {
                    println!("  {name}");
                }
            }
        }
        Command::Render {
            fractal,
            size,
            output,
            params,
        } => {
            let params: serde_json::Value = serde_json::from_str(&params)
                .map_err(|e| CliError::Input(format!("invalid --params JSON: {e}")))?;

            let kind = FractalKind::from_name(&fractal, &params)?;
            let fitted = kind.fitted_to(size)?;

            snapshot::export(&fitted, size, &output)?;

            if cli.json {
                let info = serde_json::json!({
                    "fractal": fractal,
                    "size": size,
                    "output": output.display().to_string(),
                    "params": fitted.params(),
                });
                println!("{}", serde_json::to_string_pretty(&info)?);
            } else {
                eprintln!(
                    "rendered {fractal} ({size}x{size}) -> {}",
                    output.display()
                );
            }
        }
    }

    Ok(())
}

fn main() {
    let cli = Cli::parse();
    let json_mode = cli.json;
    if let Err(e) = run(cli) {
        if json_mode {
            let j = serde_json::json!({"error": e.to_string(), "exit_code": e.exit_code()});
            eprintln!("{}", serde_json::to_string_pretty(&j).unwrap_or_default());
        } else {
            eprintln!("error: {e}");
        }
        process::exit(e.exit_code());
    }
}
