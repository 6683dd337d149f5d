//! Running the external transpiler and minifier.
//!
//! Tools are opaque: we expand their arguments, run them to completion with
//! inherited stdio, and report back what happened. There is no timeout.

use crate::config::ToolSpec;
use crate::error::BuildError;
use regex::Regex;
use std::io::{ErrorKind, Result};
use std::path::Path;
use std::process::Command;

/// How a tool run ended.
#[derive(Debug, PartialEq, Clone, Copy)]
pub enum Outcome {
    Success,
    /// The program could not be found, so it never ran.
    NotFound,
    /// It ran and exited unsuccessfully. `None` means killed by a signal.
    Failed(Option<i32>),
}

/// Substitute `{name}` placeholders in one argument.
pub fn expand(tool: &str, arg: &str, vars: &[(&str, &Path)]) -> std::result::Result<String, BuildError> {
    let re = Regex::new(r"\{([a-z_]+)\}").expect("placeholder regex is valid");
    let mut out = String::new();
    let mut last = 0;
    for caps in re.captures_iter(arg) {
        let Some(whole) = caps.get(0) else { continue };
        let name = &caps[1];
        let value = vars
            .iter()
            .find(|(k, _)| *k == name)
            .map(|(_, v)| v.to_string_lossy())
            .ok_or_else(|| BuildError::UnknownPlaceholder {
                tool: tool.into(),
                placeholder: name.into(),
            })?;
        out.push_str(&arg[last..whole.start()]);
        out.push_str(&value);
        last = whole.end();
    }
    out.push_str(&arg[last..]);
    Ok(out)
}

/// Run `spec` in `cwd` and classify the result.
///
/// Launch failures other than "not found" (permissions, say) are returned
/// as errors rather than folded into an `Outcome`.
pub fn run(spec: &ToolSpec, cwd: &Path, vars: &[(&str, &Path)]) -> Result<Outcome> {
    let args = spec
        .args
        .iter()
        .map(|a| expand(&spec.name, a, vars))
        .collect::<std::result::Result<Vec<String>, BuildError>>()?;

    let status = match Command::new(&spec.program)
        .args(&args)
        .current_dir(cwd)
        .status()
    {
        Ok(status) => status,
        Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Outcome::NotFound),
        Err(e) => return Err(e),
    };

    Ok(match status.success() {
        true => Outcome::Success,
        false => Outcome::Failed(status.code()),
    })
}
