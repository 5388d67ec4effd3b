//! Filesystem front end for the `farc` and `dsc` binaries.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use diva_core::dsc::{self, DscError};
use diva_core::farc::{Farc, FarcError, Flags, IvMode, WriteOptions};
use diva_core::{build_schema_index, Game};
use log::{debug, info, LevelFilter};
use thiserror::Error;
use walkdir::WalkDir;

#[derive(Debug, Error)]
pub enum CliError {
    #[error("can't find file or directory \"{0}\"")]
    Missing(PathBuf),
    #[error("\"{0}\" already exists. Use -f/--force to overwrite it.")]
    Exists(PathBuf),
    #[error("can't output because \"{0}\" is a file, not a directory")]
    NotADirectory(PathBuf),
    #[error("can't output because \"{0}\" is a directory, not a file")]
    NotAFile(PathBuf),
    #[error("refusing to extract entry with unsafe name \"{0}\"")]
    UnsafeEntryName(String),
    #[error(transparent)]
    Farc(#[from] FarcError),
    #[error(transparent)]
    Dsc(#[from] DscError),
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
    #[error("IO error while walking directory: {0}")]
    Walk(#[from] walkdir::Error),
}

pub type Result<T> = std::result::Result<T, CliError>;

/// Route log output to stderr with timestamps.
pub fn init_logging(verbose: bool, silent: bool) -> std::result::Result<(), log::SetLoggerError> {
    let level = if silent {
        LevelFilter::Off
    } else if verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };
    fern::Dispatch::new()
        .format(|out, message, record| {
            out.finish(format_args!(
                "[{} {}] {}",
                chrono::Local::now().format("%H:%M:%S"),
                record.level(),
                message
            ))
        })
        .level(level)
        .chain(io::stderr())
        .apply()
}

#[derive(Debug, Clone)]
pub struct PackOptions {
    /// One of `FArc`, `FArC`, `FARC` or `FARC_FT`.
    pub variant: String,
    pub compress: bool,
    pub encrypt: bool,
    pub alignment: u32,
    pub iv: IvMode,
    pub force: bool,
}

impl Default for PackOptions {
    fn default() -> Self {
        PackOptions {
            variant: "FArC".to_string(),
            compress: false,
            encrypt: false,
            alignment: 16,
            iv: IvMode::Random,
            force: false,
        }
    }
}

/// `dir` with `.farc` appended, ignoring any trailing separator.
pub fn packed_path(dir: &Path) -> PathBuf {
    let mut name = dir.components().as_path().as_os_str().to_owned();
    name.push(".farc");
    PathBuf::from(name)
}

/// `file` with every extension stripped.
pub fn unpacked_path(file: &Path) -> PathBuf {
    let mut out = file.to_path_buf();
    while out.extension().is_some() {
        out.set_extension("");
    }
    out
}

fn check_output_file(path: &Path, force: bool) -> Result<()> {
    if path.exists() {
        if !force {
            return Err(CliError::Exists(path.to_path_buf()));
        }
        if path.is_dir() {
            return Err(CliError::NotAFile(path.to_path_buf()));
        }
    }
    Ok(())
}

/// Pack the files directly inside `dir`, in name order, into a sibling
/// `.farc` file.
pub fn pack_dir(dir: &Path, opts: &PackOptions) -> Result<PathBuf> {
    let out_path = packed_path(dir);
    check_output_file(&out_path, opts.force)?;
    info!("Building farc from directory \"{}\"", dir.display());

    let mut farc = Farc::from_variant_name(&opts.variant)?
        .with_alignment(opts.alignment)
        .with_flags(Flags {
            compressed: opts.compress,
            encrypted: opts.encrypt,
        });
    for entry in WalkDir::new(dir).min_depth(1).max_depth(1).sort_by_file_name() {
        let entry = entry?;
        if !entry.file_type().is_file() {
            continue;
        }
        let name = entry.file_name().to_string_lossy().into_owned();
        debug!("adding {name}");
        farc.insert(name, fs::read(entry.path())?);
    }

    let bytes = farc.into_bytes(WriteOptions { iv: opts.iv })?;
    fs::write(&out_path, bytes)?;
    Ok(out_path)
}

/// Extract every entry of `file` into a directory named after it.
pub fn unpack_file(file: &Path, force: bool) -> Result<PathBuf> {
    info!("Extracting \"{}\" to directory", file.display());
    let farc = Farc::from_bytes(&fs::read(file)?)?;

    let out_dir = unpacked_path(file);
    if out_dir.exists() {
        if !force {
            return Err(CliError::Exists(out_dir));
        }
        if !out_dir.is_dir() {
            return Err(CliError::NotADirectory(out_dir));
        }
        for entry in fs::read_dir(&out_dir)? {
            let entry = entry?;
            if entry.file_type()?.is_file() {
                fs::remove_file(entry.path())?;
            }
        }
    } else {
        fs::create_dir_all(&out_dir)?;
    }

    for entry in farc.entries() {
        let safe = Path::new(&entry.name).file_name().map_or(false, |n| n == entry.name.as_str());
        if !safe {
            return Err(CliError::UnsafeEntryName(entry.name.clone()));
        }
        fs::write(out_dir.join(&entry.name), &entry.data)?;
    }
    Ok(out_dir)
}

#[derive(Debug, Clone, Default)]
pub struct ScriptOptions {
    /// Title of a text script, or forced title of a binary one.
    pub game: Option<Game>,
    pub compat: bool,
    pub output: Option<PathBuf>,
    pub force: bool,
}

fn is_text_script(path: &Path) -> bool {
    path.extension()
        .map_or(false, |ext| ext.eq_ignore_ascii_case("txt"))
}

/// Convert a binary script to text or a `.txt` script to binary.
pub fn convert_script(input: &Path, opts: &ScriptOptions) -> Result<PathBuf> {
    let index = build_schema_index();

    if is_text_script(input) {
        let out_path = opts.output.clone().unwrap_or_else(|| input.with_extension(""));
        check_output_file(&out_path, opts.force)?;
        let game = opts.game.unwrap_or(Game::FT);
        info!("Encoding {game} script \"{}\"", input.display());

        let text = fs::read_to_string(input)?;
        let ops = dsc::parse_script(&index, game, &text)?;
        fs::write(&out_path, dsc::encode_stream(&ops)?)?;
        Ok(out_path)
    } else {
        let out_path = opts.output.clone().unwrap_or_else(|| {
            let mut name = input.as_os_str().to_owned();
            name.push(".txt");
            PathBuf::from(name)
        });
        check_output_file(&out_path, opts.force)?;
        info!("Decoding script \"{}\"", input.display());

        let bytes = fs::read(input)?;
        let ops = dsc::decode_stream(&index, &bytes, opts.game)?;
        let mut text = dsc::render_text(&ops, opts.compat, true);
        text.push('\n');
        fs::write(&out_path, text)?;
        Ok(out_path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn output_paths() {
        assert_eq!(packed_path(Path::new("data/fonts/")), PathBuf::from("data/fonts.farc"));
        assert_eq!(unpacked_path(Path::new("data/fonts.tar.farc")), PathBuf::from("data/fonts"));
        assert_eq!(unpacked_path(Path::new("fonts")), PathBuf::from("fonts"));
    }

    #[test]
    fn text_scripts_by_extension() {
        assert!(is_text_script(Path::new("pv_001.dsc.TXT")));
        assert!(!is_text_script(Path::new("pv_001.dsc")));
    }
}
