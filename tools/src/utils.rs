use anyhow::{Context, Result};
use clap::Parser;
use log::{debug, LevelFilter};
use simple_logger::SimpleLogger;
use std::{fs, path::Path, process};

/// Parse the command line, exiting with status 1 on usage errors
///
/// `--help` and `--version` still exit successfully.
pub fn parse_args<P>() -> P
where
    P: Parser,
{
    match P::try_parse_from(wild::args()) {
        Ok(args) => args,
        Err(error) if error.use_stderr() => {
            error.print().ok();
            process::exit(1)
        }
        Err(error) => error.exit(),
    }
}

/// Log warnings and errors, or everything down to debug when `verbose` is set
///
/// `RUST_LOG` overrides either level.
pub fn init_logger(verbose: bool) -> Result<()> {
    let level = if verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Warn
    };

    SimpleLogger::new()
        .with_level(level)
        .env()
        .without_timestamps()
        .init()
        .context("Could not initialize logging")
}

/// Write a finished output file, creating its folder if needed
///
/// Any existing file is overwritten.
pub fn write_output(path: &Path, contents: &[u8]) -> Result<()> {
    if let Some(parent) = path.parent().filter(|parent| !parent.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .context(format!("Could not create folder at {}", parent.display()))?;
    }

    fs::write(path, contents).context(format!("Could not write to {}", path.display()))?;
    debug!("Wrote {} bytes to {}", contents.len(), path.display());

    Ok(())
}
