use clap::Parser;
use std::path::PathBuf;

use diva_cli::{convert_script, init_logging, ScriptOptions};
use diva_core::Game;

/// Convert DSC scripts between binary and text form.
///
/// A `.txt` input is parsed and encoded to binary; anything else is decoded
/// and rendered as text.
#[derive(Debug, Parser)]
#[command(name = "dsc", version, about = "DSC script converter")]
struct Args {
    /// Game title: the title of a text script, or forced for a binary one
    #[arg(short, long)]
    game: Option<Game>,

    /// Render raw integer values without names or indentation
    #[arg(long)]
    compat: bool,

    /// Output path
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Overwrite an existing output
    #[arg(short, long)]
    force: bool,

    /// Print nothing
    #[arg(short, long)]
    silent: bool,

    /// Log decoding details
    #[arg(short, long)]
    verbose: bool,

    input: PathBuf,
}

fn main() {
    let args = Args::parse();
    if let Err(err) = init_logging(args.verbose, args.silent) {
        eprintln!("Failed to set up logging: {err}");
    }

    let opts = ScriptOptions {
        game: args.game,
        compat: args.compat,
        output: args.output.clone(),
        force: args.force,
    };
    match convert_script(&args.input, &opts) {
        Ok(out) => log::info!("Wrote \"{}\"", out.display()),
        Err(err) => {
            if !args.silent {
                eprintln!("Error: {err}");
            }
            std::process::exit(1);
        }
    }
}
