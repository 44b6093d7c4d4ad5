use std::{
    fs,
    io::{self, Write},
    path::Path,
};

use anyhow::{Context, Result, bail};

use super::{CommandResult, CommandSummary, ExtractSummary};
use crate::{
    cli::args::ExtractCommand,
    config::load_config,
    extract::{Extractor, TargetFunction},
    files::files_from_patterns,
    output::{render_json, render_template},
};

/// Run an extraction from `cwd`.
///
/// The whole output is rendered before anything is written, so a failure
/// leaves no partial output behind.
pub fn extract(cmd: ExtractCommand, cwd: &Path) -> Result<CommandResult> {
    let config = load_config(cwd)?.config;

    let func = cmd.func.unwrap_or(config.func);
    let target = TargetFunction::parse(&func).context("Invalid '--func'")?;

    let files = files_from_patterns(&cmd.patterns, cwd, &config.ignores)?;
    if files.is_empty() {
        bail!("Found 0 files in patterns {:?}", cmd.patterns);
    }
    tracing::info!(files = files.len(), target = %target, "scanning");

    let mut extractor = Extractor::with_target(target);
    extractor.process_files(&files)?;

    let (rendered, collisions) = if cmd.json {
        let (json, build) = render_json(&extractor.vars(), cmd.native_name.as_deref())?;
        (json, build.collisions)
    } else {
        let template = cmd.template.unwrap_or(config.template);
        (render_template(&template, &extractor.strings()), Vec::new())
    };

    match &cmd.output {
        Some(path) => {
            let path = cwd.join(path);
            fs::write(&path, &rendered)
                .with_context(|| format!("Failed to write output file: {}", path.display()))?;
        }
        None => {
            let mut stdout = io::stdout().lock();
            stdout
                .write_all(rendered.as_bytes())
                .and_then(|()| stdout.flush())
                .context("Failed to write output")?;
        }
    }

    Ok(CommandResult::new(CommandSummary::Extract(ExtractSummary {
        files_scanned: extractor.files_scanned(),
        call_sites: extractor.call_site_count(),
        string_count: extractor.strings().len(),
        output: cmd.output,
        collisions,
    })))
}
