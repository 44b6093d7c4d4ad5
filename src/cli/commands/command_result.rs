use std::path::PathBuf;

use crate::compare::CompareReport;
use crate::extract::KeyCollision;

#[derive(Debug)]
pub enum CommandSummary {
    Extract(ExtractSummary),
    Compare(CompareReport),
    Init(InitSummary),
}

#[derive(Debug)]
pub struct ExtractSummary {
    pub files_scanned: usize,
    pub call_sites: usize,
    /// Distinct strings written.
    pub string_count: usize,
    /// Output file, or `None` for stdout.
    pub output: Option<PathBuf>,
    pub collisions: Vec<KeyCollision>,
}

#[derive(Debug)]
pub struct InitSummary {
    pub created: bool,
}

/// Result of running xtract commands
#[derive(Debug)]
pub struct CommandResult {
    pub summary: CommandSummary,
    /// Problems found by the command (missing keys, existing config).
    /// A non-zero count maps to a failure exit status.
    pub error_count: usize,
}

impl CommandResult {
    pub fn new(summary: CommandSummary) -> Self {
        let error_count = match &summary {
            CommandSummary::Extract(_) => 0,
            CommandSummary::Compare(report) => report.missing.len(),
            CommandSummary::Init(init) => usize::from(!init.created),
        };
        Self {
            summary,
            error_count,
        }
    }
}
