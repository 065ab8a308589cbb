//! Whole-file processing: stream lines through the engine.

use crate::engine::TemplateEngine;
use secretsub_core::{Error, Result, SecretSource};
use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::Path;
use tracing::info;

/// Rewrite `input` into `output`, substituting placeholders through
/// `source`.
///
/// I/O failures abort immediately. Unresolved placeholders do not: the
/// output is always written in full, line order preserved, and only
/// after the final flush does a non-zero failure count turn into an
/// `Unresolved` error. Rolling back or deleting the partial output is
/// the caller's decision.
pub async fn process_template_file<S: SecretSource>(
    input: &Path,
    output: &Path,
    source: &S,
) -> Result<()> {
    if !input.exists() {
        return Err(Error::filesystem(input, "open", "input file not found"));
    }

    let input_file =
        File::open(input).map_err(|err| Error::filesystem(input, "open", err))?;
    let output_file =
        File::create(output).map_err(|err| Error::filesystem(output, "create", err))?;

    let reader = BufReader::new(input_file);
    let mut writer = BufWriter::new(output_file);
    let mut engine = TemplateEngine::new(source);
    let mut lines = 0usize;

    for line in reader.lines() {
        let line = line.map_err(|err| Error::filesystem(input, "read", err))?;
        let processed = engine.substitute_line(&line).await;
        writeln!(writer, "{processed}")
            .map_err(|err| Error::filesystem(output, "write", err))?;
        lines += 1;
    }

    // Flush before reporting unresolved items: the promise is a fully
    // written best-effort file even when the pass fails.
    writer
        .flush()
        .map_err(|err| Error::filesystem(output, "flush", err))?;

    info!(lines, failed = engine.failed(), "template pass finished");

    if engine.failed() > 0 {
        return Err(Error::unresolved(engine.failed()));
    }

    Ok(())
}
