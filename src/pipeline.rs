//! The bundler: for each (target, type), concatenate a manifest of source
//! files between a pre and post wrapper, then optionally minify the result.
//!
//! When a transpile tool is configured, sources are first copied into a
//! private staging tree and transpiled there, so the checked-in sources are
//! never touched.

use crate::classify::Mode;
use crate::config::{post_wrapper, pre_wrapper, BuildConfig, Target, ToolPolicy, ToolSpec};
use crate::error::BuildError;
use crate::fileio::{read_file, read_files, write_file, Contents};
use crate::logger::Logger;
use crate::tool::{self, Outcome};
use crate::tree::{copy_tree, make_tree};
use std::io::{ErrorKind, Result, Write};
use std::path::{Path, PathBuf};
use strum_macros::{Display, EnumIter};
use tempfile::TempDir;

const INSTALL_HINT: &str = "Install it using `npm install` (see README.md)";

/// The steps one (target, type) unit goes through, in order.
#[derive(Debug, PartialEq, Clone, Copy, EnumIter, Display)]
#[strum(serialize_all = "kebab-case")]
pub enum Stage {
    ResolveManifest,
    Stage,
    Transpile,
    Concatenate,
    WriteRaw,
    Minify,
}

/// Which targets to build.
#[derive(Debug, PartialEq, Clone)]
pub enum Selection {
    All,
    Only(String),
}

impl Selection {
    /// `None` and `"all"` both mean everything.
    pub fn from_arg(arg: Option<&str>) -> Self {
        match arg {
            None | Some("all") => Self::All,
            Some(name) => Self::Only(name.to_owned()),
        }
    }
}

/// What got written for one (target, type).
#[derive(Debug, PartialEq, Clone)]
pub struct Artifact {
    pub target: String,
    pub kind: String,
    pub raw: PathBuf,
    /// Absent when there is no minifier, or it couldn't be found.
    pub minified: Option<PathBuf>,
}

/// The manifest for `target`/`kind`, bracketed by the wrapper paths.
///
/// Entries are relative to whichever source root ends up in use. Lines that
/// are empty or only whitespace are skipped.
pub fn resolve_manifest(cfg: &BuildConfig, target: &str, kind: &str) -> Result<Vec<String>> {
    let path = cfg.manifest_path(target, kind);
    let listing = match read_file(&path, Some(Mode::Text)) {
        Ok(Contents::Text(s)) => s,
        Ok(Contents::Binary(_)) => unreachable!("read in text mode"),
        Err(e) if e.kind() == ErrorKind::NotFound => {
            return Err(BuildError::MissingManifest {
                target: target.into(),
                kind: kind.into(),
                path,
            }
            .into())
        }
        Err(e) => return Err(e),
    };

    let mut entries = vec![pre_wrapper(kind)];
    entries.extend(
        listing
            .lines()
            .filter(|line| !line.trim().is_empty())
            .map(|line| line.to_owned()),
    );
    entries.push(post_wrapper(kind));
    Ok(entries)
}

pub struct Pipeline<'a> {
    cfg: &'a BuildConfig,
    log: &'a mut Logger,
}

impl<'a> Pipeline<'a> {
    pub fn new(cfg: &'a BuildConfig, log: &'a mut Logger) -> Self {
        Self { cfg: cfg, log: log }
    }

    /// Wipe the output directory and build the selected targets into it.
    pub fn build(&mut self, sel: &Selection) -> Result<Vec<Artifact>> {
        let cfg = self.cfg;
        let output = cfg.output_path();
        write!(self.log.step(), "--- Prepare {} ---\n", output.display())?;
        make_tree(&output)?;

        let targets: Vec<&Target> = match sel {
            Selection::All => cfg.targets.iter().collect(),
            Selection::Only(name) => vec![cfg
                .target(name)
                .ok_or_else(|| BuildError::UnknownTarget(name.clone()))?],
        };

        let staging = match cfg.transpile {
            Some(_) => Some(
                tempfile::Builder::new()
                    .prefix(".seabuild-")
                    .tempdir_in(&cfg.root)?,
            ),
            None => None,
        };

        let mut artifacts = vec![];
        for target in targets {
            for kind in &target.types {
                artifacts.push(self.build_unit(&target.name, kind, staging.as_ref())?);
            }
        }
        write!(self.log.step(), "--- Built {} target(s) ---\n", artifacts.len())?;
        Ok(artifacts)
    }

    fn header(&mut self, target: &str, kind: &str, stage: Stage) -> Result<()> {
        write!(self.log.step(), "--- {}/{}: {} ---\n", target, kind, stage)
    }

    fn build_unit(&mut self, target: &str, kind: &str, staging: Option<&TempDir>) -> Result<Artifact> {
        let cfg = self.cfg;
        self.header(target, kind, Stage::ResolveManifest)?;
        let entries = resolve_manifest(cfg, target, kind)?;

        let src_root = match (&cfg.transpile, staging) {
            (Some(tool), Some(tmp)) => {
                let staged = tmp.path().join("staging");
                self.header(target, kind, Stage::Stage)?;
                self.stage(&staged)?;

                self.header(target, kind, Stage::Transpile)?;
                let root = std::path::absolute(&cfg.root)?;
                let staged = std::path::absolute(&staged)?;
                let outcome = tool::run(
                    tool,
                    &cfg.root,
                    &[("root", root.as_path()), ("staging", staged.as_path())],
                )?;
                self.settle(tool, outcome)?;
                staged.join("src")
            }
            _ => cfg.src_path(),
        };

        let paths: Vec<PathBuf> = entries.iter().map(|e| src_root.join(e)).collect();
        for wrapper in [&paths[0], &paths[paths.len() - 1]] {
            if !wrapper.is_file() {
                return Err(BuildError::MissingWrapper(wrapper.clone()).into());
            }
        }

        self.header(target, kind, Stage::Concatenate)?;
        let contents = read_files(&paths, None)?;

        self.header(target, kind, Stage::WriteRaw)?;
        let raw = cfg.output_file(target, kind, "");
        write_file(&raw, &contents, None)?;
        write!(self.log.file(), "{}\n", raw.display())?;

        let minified = match &cfg.minify {
            Some(tool) => {
                self.header(target, kind, Stage::Minify)?;
                self.minify(tool, &raw, &cfg.output_file(target, kind, "-min"))?
            }
            None => None,
        };

        Ok(Artifact {
            target: target.into(),
            kind: kind.into(),
            raw: raw,
            minified: minified,
        })
    }

    /// Recreate the staging tree from the app and src directories.
    fn stage(&mut self, staged: &Path) -> Result<()> {
        let cfg = self.cfg;
        make_tree(staged)?;
        let app = copy_tree(cfg.app_path(), staged.join("app"), None, None)?;
        let src = copy_tree(cfg.src_path(), staged.join("src"), None, None)?;
        write!(self.log.file(), "Staged {} file(s)\n", app + src)?;
        Ok(())
    }

    fn minify(&mut self, tool: &ToolSpec, raw: &Path, min: &Path) -> Result<Option<PathBuf>> {
        let cfg = self.cfg;
        let root = std::path::absolute(&cfg.root)?;
        let input = std::path::absolute(raw)?;
        let output = std::path::absolute(min)?;
        let outcome = tool::run(
            tool,
            &cfg.root,
            &[("root", root.as_path()), ("input", input.as_path()), ("output", output.as_path())],
        )?;
        Ok(match self.settle(tool, outcome)? {
            true => {
                write!(self.log.file(), "{}\n", min.display())?;
                Some(min.to_owned())
            }
            false => None,
        })
    }

    /// Turn a tool outcome into "it ran", "skipped with a warning", or an error.
    fn settle(&mut self, tool: &ToolSpec, outcome: Outcome) -> Result<bool> {
        match (outcome, tool.policy) {
            (Outcome::Success, _) => Ok(true),
            (Outcome::NotFound, ToolPolicy::Optional) => {
                write!(
                    self.log.warning(),
                    "Warning: {} could not be run ({:?} not found). {}\n",
                    tool.name,
                    tool.program,
                    INSTALL_HINT
                )?;
                Ok(false)
            }
            (Outcome::NotFound, ToolPolicy::Required) => Err(BuildError::ToolNotFound {
                tool: tool.name.clone(),
                program: tool.program.clone(),
            }
            .into()),
            (Outcome::Failed(code), _) => Err(BuildError::ToolFailed {
                tool: tool.name.clone(),
                code: code,
            }
            .into()),
        }
    }
}
