use anyhow::{Context, Result};
use log::{debug, warn};
use mdscan_config::Config;
use mdscan_engine::{ParseOptions, Tokenizer};
use mdscan_rules::{PluginManager, RuleError};
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

/// Result of a whole run, mapped onto the process exit code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Clean,
    Violations,
    Failed,
}

impl Outcome {
    pub fn exit_code(self) -> i32 {
        match self {
            Outcome::Clean => 0,
            Outcome::Violations => 1,
            Outcome::Failed => 2,
        }
    }
}

/// Expands directories through the config's include/exclude globs.
/// Plain files are kept as given.
pub fn collect_files(paths: &[PathBuf], config: &Config) -> Result<Vec<PathBuf>> {
    let mut files = vec![];
    for path in paths {
        if path.is_dir() {
            let found = config
                .resolve_files(path)
                .with_context(|| format!("Failed to list files under {}", path.display()))?;
            debug!("{} files under {}", found.len(), path.display());
            files.extend(found);
        } else {
            files.push(path.clone());
        }
    }
    Ok(files)
}

pub struct Scanner {
    manager: PluginManager,
    tokenizer: Tokenizer,
    continue_on_error: bool,
    show_tokens: bool,
}

impl Scanner {
    pub fn new(config: &Config, show_tokens: bool) -> Result<Self> {
        let options = ParseOptions {
            front_matter: config.front_matter,
        };
        let mut manager = PluginManager::with_builtin_rules(options);
        manager
            .apply_configuration(&config.rules.enable, &config.rules.disable)
            .context("Invalid rule configuration")?;
        Ok(Self {
            manager,
            tokenizer: Tokenizer::new(options),
            continue_on_error: config.continue_on_error,
            show_tokens,
        })
    }

    pub fn manager(&self) -> &PluginManager {
        &self.manager
    }

    /// Scans each file, writing findings to `out` and per-file failures to `err`.
    pub fn run(
        &mut self,
        files: &[PathBuf],
        out: &mut dyn Write,
        err: &mut dyn Write,
    ) -> Result<Outcome> {
        let mut outcome = Outcome::Clean;
        for path in files {
            match self.scan_file(path, out) {
                Ok(found) => {
                    if found && outcome == Outcome::Clean {
                        outcome = Outcome::Violations;
                    }
                }
                Err(e) => {
                    writeln!(err, "{}: {e:#}", path.display())?;
                    outcome = Outcome::Failed;
                    if !self.continue_on_error {
                        warn!("Stopping after failure in {}", path.display());
                        break;
                    }
                }
            }
        }
        Ok(outcome)
    }

    /// Returns true if the file has violations.
    fn scan_file(&mut self, path: &Path, out: &mut dyn Write) -> Result<bool> {
        let source = fs::read_to_string(path).context("Failed to read file")?;

        if self.show_tokens {
            let document = self.tokenizer.tokenize(&source).map_err(RuleError::from)?;
            for line in document.serialized() {
                writeln!(out, "{line}")?;
            }
            return Ok(false);
        }

        let violations = self.manager.scan_document(&source)?;
        for violation in &violations {
            writeln!(out, "{}:{violation}", path.display())?;
        }
        Ok(!violations.is_empty())
    }
}

/// One line per registered rule: id, name, state and description.
pub fn list_rules(manager: &PluginManager, out: &mut dyn Write) -> Result<()> {
    for (details, enabled) in manager.rules() {
        let state = if enabled { "enabled" } else { "disabled" };
        writeln!(
            out,
            "{:<6} {:<26} {:<8} {}",
            details.id, details.name, state, details.description
        )?;
    }
    Ok(())
}
