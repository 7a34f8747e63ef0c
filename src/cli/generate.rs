//! Generate command implementation.
//!
//! Reads the source image, runs the favicon pipeline with live progress,
//! and writes the resulting archive.

use std::fs;
use std::io::{self, Read};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};

use crate::cli::GenerateArgs;
use crate::config::FaviconConfig;
use crate::image::{MediaType, SourceImage};
use crate::logger;
use crate::pipeline::{self, LogObserver, PipelineOptions};
use crate::{debug, log};

/// Execute generate command
pub fn generate(args: &GenerateArgs, config: &FaviconConfig) -> Result<()> {
    let source = load_source(args, config)?;
    debug!("generate"; "{} source, {} bytes", source.media_type(), source.len());

    let options = PipelineOptions::from(config);
    let observer: &LogObserver<'_> = &|line: &str| log!("favicon"; "{}", line);

    let output = match pipeline::run(&source, &options, Some(observer)) {
        Ok(output) => output,
        Err(failure) => {
            debug!("generate"; "run failed after {} log lines", failure.logs.len());
            logger::failure("favicon generation failed", failure.error.kind());
            bail!(failure);
        }
    };

    debug!("generate"; "run completed with {} log lines", output.logs.len());

    let path = output_path(args, config);
    write_archive(&path, &output.archive)?;
    logger::success(&format!(
        "wrote {} ({} bytes)",
        path.display(),
        output.archive.len()
    ));
    Ok(())
}

/// Read the source and enforce the configured boundary checks.
fn load_source(args: &GenerateArgs, config: &FaviconConfig) -> Result<SourceImage> {
    let bytes = if args.reads_stdin() {
        let mut buf = Vec::new();
        io::stdin()
            .lock()
            .read_to_end(&mut buf)
            .context("Failed to read source image from stdin")?;
        buf
    } else {
        fs::read(&args.input)
            .with_context(|| format!("Failed to read `{}`", args.input.display()))?
    };

    let source = match &args.media_type {
        Some(mime) => SourceImage::new(bytes, MediaType::from_mime(mime))?,
        None => SourceImage::detect(bytes)?,
    };
    source.check_size(config.input.max_size_bytes())?;
    Ok(source)
}

fn output_path(args: &GenerateArgs, config: &FaviconConfig) -> PathBuf {
    args.output.clone().unwrap_or_else(|| config.default_output())
}

fn write_archive(path: &Path, bytes: &[u8]) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create `{}`", parent.display()))?;
    }
    fs::write(path, bytes).with_context(|| format!("Failed to write `{}`", path.display()))
}
