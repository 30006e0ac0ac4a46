//! Extract one input file and emit a story per component.

use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::Context;
use scoop_parser::{
    Diagnostic, ExtractOptions, FileExtraction, Severity, SourceCache, extract_file,
};
use scoop_render::{StoryOptions, render_story, story_file_name};

use crate::cli::{OutputMode, Settings};

/// Story files produced by one run.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct Outcome {
    /// Written, printed, or (on a dry run) would have been written.
    pub written: Vec<PathBuf>,
    /// Already existed and were left alone.
    pub skipped: Vec<PathBuf>,
}

/// Run extraction for `input` and send stories to `out` or the file system
/// according to `settings.mode`.
///
/// # Errors
/// Fails on an unreadable or unsupported input file, an invalid props
/// format or wrap spec, or an I/O error on `out`. A story file that cannot
/// be written is reported and skipped.
pub fn generate(input: &Path, settings: &Settings, out: &mut impl Write) -> anyhow::Result<Outcome> {
    let options = ExtractOptions {
        props_format: settings.props_format.clone(),
    };
    let extraction = extract_file(input, &options, &mut SourceCache::default())
        .with_context(|| format!("failed to read components from '{}'", input.display()))?;
    report(&extraction.diagnostics);

    if settings.mode == OutputMode::Json {
        serde_json::to_writer_pretty(&mut *out, &extraction)?;
        writeln!(out)?;
        return Ok(Outcome::default());
    }

    let story_options =
        StoryOptions::new(&extraction.file_stem, &settings.wrap).context("invalid --wrap")?;
    emit_stories(input, &extraction, &story_options, settings, out)
}

fn emit_stories(
    input: &Path,
    extraction: &FileExtraction,
    story_options: &StoryOptions,
    settings: &Settings,
    out: &mut impl Write,
) -> anyhow::Result<Outcome> {
    let dir = input.parent().unwrap_or_else(|| Path::new(""));
    let mut outcome = Outcome::default();

    for schema in &extraction.components {
        let target = dir.join(story_file_name(&schema.name));
        if settings.mode == OutputMode::Write && !settings.overwrite && target.exists() {
            tracing::warn!(
                path = %target.display(),
                "story file already exists; use --overwrite to replace it"
            );
            outcome.skipped.push(target);
            continue;
        }

        let story = render_story(schema, story_options);
        match settings.mode {
            OutputMode::Stdout => writeln!(out, "{story}")?,
            OutputMode::Write => {
                if let Err(error) = std::fs::write(&target, &story) {
                    tracing::warn!(path = %target.display(), %error, "failed to write story");
                    continue;
                }
            }
            OutputMode::DryRun | OutputMode::Json => {}
        }
        tracing::debug!(component = %schema.name, path = %target.display(), "story generated");
        outcome.written.push(target);
    }

    Ok(outcome)
}

fn report(diagnostics: &[Diagnostic]) {
    for diagnostic in diagnostics {
        let component = diagnostic.component.as_deref().unwrap_or_default();
        match diagnostic.severity {
            Severity::Warning => tracing::warn!(component, "{}", diagnostic.message),
            Severity::Info => tracing::info!(component, "{}", diagnostic.message),
        }
    }
}

/// Closing summary for file-producing modes; `None` when stories went to
/// stdout or JSON was printed.
#[must_use]
pub fn summary(outcome: &Outcome, mode: OutputMode) -> Option<String> {
    let verb = match mode {
        OutputMode::Write => "Wrote",
        OutputMode::DryRun => "Did not write",
        OutputMode::Stdout | OutputMode::Json => return None,
    };
    if outcome.written.is_empty() {
        return Some("No files written.".to_string());
    }
    let plural = if outcome.written.len() > 1 { "s" } else { "" };
    let paths = outcome
        .written
        .iter()
        .map(|path| path.display().to_string())
        .collect::<Vec<_>>()
        .join("\n");
    Some(format!("{verb} the following file{plural}:\n{paths}"))
}
