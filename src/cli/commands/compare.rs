use std::path::Path;

use anyhow::Result;

use super::{CommandResult, CommandSummary};
use crate::{cli::args::CompareCommand, compare::compare_catalogs};

pub fn compare(cmd: CompareCommand, cwd: &Path) -> Result<CommandResult> {
    let reference = cwd.join(&cmd.reference);
    let mut report = compare_catalogs(&reference)?;

    // Report paths relative to where the user pointed us.
    if let Some(dir) = cmd.reference.parent() {
        report.reference = cmd.reference.clone();
        for path in report.compared.iter_mut().chain(
            report
                .missing
                .iter_mut()
                .map(|missing| &mut missing.file_path),
        ) {
            if let Some(name) = path.file_name() {
                *path = dir.join(name);
            }
        }
    }

    Ok(CommandResult::new(CommandSummary::Compare(report)))
}
