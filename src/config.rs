//! The immutable description of a build: where things live, what to build,
//! and which external tools to run.
//!
//! The defaults describe the Seajax v2 tree. A `seabuild.json` can override
//! any subset of fields:
//!
//! ```
//! use seabuild::config::BuildConfig;
//!
//! let cfg = BuildConfig::from_json(r#"{
//!     "output_dir": "out",
//!     "targets": [{"name": "utils", "types": ["standalone"]}],
//!     "minify": null
//! }"#)?;
//! assert_eq!(cfg.targets.len(), 1);
//! assert_eq!(cfg.src_dir.to_str(), Some("v2/src"));
//! assert!(cfg.minify.is_none());
//! # Ok::<(), std::io::Error>(())
//! ```

use crate::error::BuildError;
use serde::{Deserialize, Serialize};
use std::io::Result;
use std::path::{Path, PathBuf};

pub const CONFIG_FILE: &str = "seabuild.json";

/// What to do when a tool can't be launched at all.
#[derive(Debug, PartialEq, Clone, Copy, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ToolPolicy {
    /// The build fails.
    Required,
    /// Print a warning and keep going.
    Optional,
}

/// An external program, run with the build root as working directory.
///
/// Arguments may use `{root}`, `{staging}`, `{input}` and `{output}`.
#[derive(Debug, PartialEq, Clone, Serialize, Deserialize)]
pub struct ToolSpec {
    pub name: String,
    pub program: String,
    #[serde(default)]
    pub args: Vec<String>,
    #[serde(default = "ToolSpec::default_policy")]
    pub policy: ToolPolicy,
}

impl ToolSpec {
    fn default_policy() -> ToolPolicy {
        ToolPolicy::Required
    }

    pub fn new<S>(name: &str, program: &str, args: impl IntoIterator<Item = S>) -> Self
    where
        S: AsRef<str>,
    {
        Self {
            name: name.into(),
            program: program.into(),
            args: args.into_iter().map(|a| a.as_ref().to_owned()).collect(),
            policy: ToolPolicy::Required,
        }
    }

    pub fn optional(mut self) -> Self {
        self.policy = ToolPolicy::Optional;
        self
    }

    pub fn babel() -> Self {
        Self::new(
            "babel",
            "npx",
            [
                "babel",
                "{staging}",
                "--config-file",
                "./.babelrc.json",
                "--extensions",
                ".jsx",
                "--quiet",
                "--out-dir",
                "{staging}",
            ],
        )
    }

    pub fn uglifyjs() -> Self {
        Self::new(
            "uglifyjs",
            "npx",
            ["uglifyjs", "{input}", "--mangle", "--output", "{output}"],
        )
        .optional()
    }
}

/// A named artifact group and the packaging types it is built in.
#[derive(Debug, PartialEq, Clone, Serialize, Deserialize)]
pub struct Target {
    pub name: String,
    pub types: Vec<String>,
}

impl Target {
    pub fn new(name: &str, types: &[&str]) -> Self {
        Self {
            name: name.into(),
            types: types.iter().map(|t| t.to_string()).collect(),
        }
    }
}

#[derive(Debug, PartialEq, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BuildConfig {
    /// Everything else is relative to this.
    pub root: PathBuf,
    pub src_dir: PathBuf,
    pub app_dir: PathBuf,
    /// Holds `<target>/<type>.txt` file lists.
    pub manifest_dir: PathBuf,
    pub output_dir: PathBuf,
    pub output_prefix: String,
    /// Built in this order.
    pub targets: Vec<Target>,
    pub transpile: Option<ToolSpec>,
    pub minify: Option<ToolSpec>,
}

impl Default for BuildConfig {
    fn default() -> Self {
        Self {
            root: ".".into(),
            src_dir: "v2/src".into(),
            app_dir: "v2/app".into(),
            manifest_dir: "v2/build".into(),
            output_dir: "bin/v2".into(),
            output_prefix: "seadragon".into(),
            targets: [
                "image",
                "zoom",
                "zoomimage",
                "ajax",
                "utils",
                "pivot",
                "collegevine",
                "collegevine-hub",
            ]
            .iter()
            .map(|name| Target::new(name, &["standalone"]))
            .collect(),
            transpile: Some(ToolSpec::babel()),
            minify: Some(ToolSpec::uglifyjs()),
        }
    }
}

impl BuildConfig {
    /// Defaults, rooted somewhere specific.
    pub fn rooted(root: impl AsRef<Path>) -> Self {
        Self {
            root: root.as_ref().into(),
            ..Self::default()
        }
    }

    pub fn from_json(txt: &str) -> Result<Self> {
        serde_json::from_str(txt).map_err(|e| std::io::Error::other(e))
    }

    /// Load a config file. A relative `root` is taken relative to the file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let txt = std::fs::read_to_string(path)?;
        let mut cfg: Self = serde_json::from_str(&txt).map_err(|e| BuildError::BadConfig {
            path: path.into(),
            reason: e.to_string(),
        })?;
        if cfg.root.is_relative() {
            let dir = path.parent().unwrap_or(Path::new("."));
            cfg.root = dir.join(&cfg.root);
        }
        Ok(cfg)
    }

    /// Use `dir/seabuild.json` if there is one, otherwise defaults rooted at `dir`.
    pub fn discover(dir: impl AsRef<Path>) -> Result<Self> {
        let candidate = dir.as_ref().join(CONFIG_FILE);
        if candidate.is_file() {
            Self::load(candidate)
        } else {
            Ok(Self::rooted(dir))
        }
    }

    pub fn target(&self, name: &str) -> Option<&Target> {
        self.targets.iter().find(|t| t.name == name)
    }

    fn at_root(&self, rel: &Path) -> PathBuf {
        self.root.join(rel)
    }

    pub fn src_path(&self) -> PathBuf {
        self.at_root(&self.src_dir)
    }

    pub fn app_path(&self) -> PathBuf {
        self.at_root(&self.app_dir)
    }

    pub fn output_path(&self) -> PathBuf {
        self.at_root(&self.output_dir)
    }

    pub fn manifest_path(&self, target: &str, kind: &str) -> PathBuf {
        self.at_root(&self.manifest_dir)
            .join(target)
            .join(format!("{}.txt", kind))
    }

    /// `<output>/<prefix>-<target>-<type><suffix>.js`
    pub fn output_file(&self, target: &str, kind: &str, suffix: &str) -> PathBuf {
        self.output_path().join(format!(
            "{}-{}-{}{}.js",
            self.output_prefix, target, kind, suffix
        ))
    }
}

/// Wrapper paths, relative to whichever source root is in use.
pub fn pre_wrapper(kind: &str) -> String {
    format!("_pre/{}.txt", kind)
}

pub fn post_wrapper(kind: &str) -> String {
    format!("_post/{}.txt", kind)
}
