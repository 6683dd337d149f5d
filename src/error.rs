use std::path::PathBuf;

/// Build failures that are not plain I/O trouble.
///
/// Everything in this crate speaks `std::io::Result`, so these are converted
/// into `std::io::Error` at the boundary.
#[derive(Debug)]
pub enum BuildError {
    UnknownTarget(String),
    MissingManifest {
        target: String,
        kind: String,
        path: PathBuf,
    },
    MissingWrapper(PathBuf),
    ToolNotFound {
        tool: String,
        program: String,
    },
    ToolFailed {
        tool: String,
        code: Option<i32>,
    },
    UnknownPlaceholder {
        tool: String,
        placeholder: String,
    },
    BadConfig {
        path: PathBuf,
        reason: String,
    },
}

impl std::fmt::Display for BuildError {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            Self::UnknownTarget(name) => write!(f, "Unknown build target {:?}", name),
            Self::MissingManifest { target, kind, path } => write!(
                f,
                "No file list for {}/{} at {}",
                target,
                kind,
                path.display()
            ),
            Self::MissingWrapper(path) => write!(f, "Missing wrapper file {}", path.display()),
            Self::ToolNotFound { tool, program } => {
                write!(f, "Could not launch {} ({:?} not found)", tool, program)
            }
            Self::ToolFailed { tool, code } => match code {
                Some(code) => write!(f, "{} failed with status {}", tool, code),
                None => write!(f, "{} was terminated by a signal", tool),
            },
            Self::UnknownPlaceholder { tool, placeholder } => write!(
                f,
                "Unknown placeholder {{{}}} in arguments for {}",
                placeholder, tool
            ),
            Self::BadConfig { path, reason } => {
                write!(f, "Invalid config {}: {}", path.display(), reason)
            }
        }
    }
}

impl std::error::Error for BuildError {}

impl From<BuildError> for std::io::Error {
    fn from(e: BuildError) -> Self {
        Self::other(e)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn display() {
        assert_eq!(
            BuildError::UnknownTarget("nope".into()).to_string(),
            "Unknown build target \"nope\""
        );
        assert_eq!(
            BuildError::ToolFailed {
                tool: "babel".into(),
                code: Some(2)
            }
            .to_string(),
            "babel failed with status 2"
        );
        assert_eq!(
            BuildError::UnknownPlaceholder {
                tool: "uglifyjs".into(),
                placeholder: "nope".into()
            }
            .to_string(),
            "Unknown placeholder {nope} in arguments for uglifyjs"
        );
    }

    #[test]
    fn into_io_error() {
        let e: std::io::Error = BuildError::MissingWrapper("_pre/x.txt".into()).into();
        assert_eq!(e.kind(), std::io::ErrorKind::Other);
        assert_eq!(e.to_string(), "Missing wrapper file _pre/x.txt");

        // The original error is still reachable for callers that care.
        let inner = e.into_inner().expect("has inner error");
        assert!(inner.downcast_ref::<BuildError>().is_some());
    }
}
