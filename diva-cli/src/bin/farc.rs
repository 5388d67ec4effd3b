use clap::Parser;
use std::path::PathBuf;

use diva_cli::{init_logging, pack_dir, unpack_file, CliError, PackOptions};
use diva_core::farc::{IvMode, VARIANT_NAMES};

/// Pack a directory into a FARC archive, or unpack an archive into a
/// directory.
#[derive(Debug, Parser)]
#[command(name = "farc", version, about = "FARC archive packer and unpacker")]
struct Args {
    /// Archive type to build
    #[arg(short = 't', long = "type", default_value = "FArC", value_parser = clap::builder::PossibleValuesParser::new(VARIANT_NAMES.iter().copied()))]
    kind: String,

    /// Compress output (FARC and FARC_FT only)
    #[arg(short, long)]
    compress: bool,

    /// Encrypt output (FARC and FARC_FT only)
    #[arg(short, long)]
    encrypt: bool,

    /// Entry alignment of the output archive
    #[arg(short, long, default_value_t = 16)]
    alignment: u32,

    /// Use all-zero encryption IVs for reproducible output
    #[arg(long)]
    null_iv: bool,

    /// Overwrite existing files or directories
    #[arg(short, long)]
    force: bool,

    /// Print nothing
    #[arg(short, long)]
    silent: bool,

    /// Log layout details
    #[arg(short, long)]
    verbose: bool,

    /// Archive to extract or directory to pack
    input: PathBuf,
}

fn run(args: &Args) -> Result<PathBuf, CliError> {
    if !args.input.exists() {
        return Err(CliError::Missing(args.input.clone()));
    }
    if args.input.is_file() {
        return unpack_file(&args.input, args.force);
    }

    let opts = PackOptions {
        variant: args.kind.clone(),
        compress: args.compress,
        encrypt: args.encrypt,
        alignment: args.alignment,
        iv: if args.null_iv { IvMode::Zero } else { IvMode::Random },
        force: args.force,
    };
    pack_dir(&args.input, &opts)
}

fn main() {
    let args = Args::parse();
    if let Err(err) = init_logging(args.verbose, args.silent) {
        eprintln!("Failed to set up logging: {err}");
    }

    match run(&args) {
        Ok(out) => log::info!("Wrote \"{}\"", out.display()),
        Err(err) => {
            if !args.silent {
                eprintln!("Error: {err}");
            }
            std::process::exit(1);
        }
    }
}
