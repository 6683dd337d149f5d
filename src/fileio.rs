//! Whole-file reads and writes, in binary or text mode.
//!
//! Mode comes from [`crate::classify`] unless forced by the caller. Text mode
//! validates UTF-8 and folds `\r\n` and lone `\r` into `\n` on the way in;
//! on Windows it writes `\r\n` on the way out. Binary mode is byte-exact.

use crate::classify::{mode_for, Mode};
use std::io::{Error, ErrorKind, Result};
use std::path::Path;

/// The contents of one file, as read in a particular mode.
#[derive(Debug, PartialEq, Clone)]
pub enum Contents {
    Binary(Vec<u8>),
    Text(String),
}

/// Rewrites contents on their way from source to destination.
pub type Transform<'a> = &'a dyn Fn(Contents) -> Contents;

impl Contents {
    pub fn mode(&self) -> Mode {
        match self {
            Self::Binary(_) => Mode::Binary,
            Self::Text(_) => Mode::Text,
        }
    }

    pub fn as_bytes(&self) -> &[u8] {
        match self {
            Self::Binary(b) => b,
            Self::Text(s) => s.as_bytes(),
        }
    }

    pub fn into_bytes(self) -> Vec<u8> {
        match self {
            Self::Binary(b) => b,
            Self::Text(s) => s.into_bytes(),
        }
    }

    /// Join with a single newline between parts.
    ///
    /// Stays text only if every part is text. Otherwise a literal newline
    /// byte is spliced between the raw bytes of each part.
    pub fn join(parts: Vec<Contents>) -> Contents {
        if parts.iter().all(|c| c.mode() == Mode::Text) {
            let texts: Vec<String> = parts
                .into_iter()
                .map(|c| match c {
                    Self::Text(s) => s,
                    Self::Binary(_) => unreachable!("checked above"),
                })
                .collect();
            Self::Text(texts.join("\n"))
        } else {
            let bytes: Vec<Vec<u8>> = parts.into_iter().map(|c| c.into_bytes()).collect();
            Self::Binary(bytes.join(&b'\n'))
        }
    }
}

impl From<&str> for Contents {
    fn from(s: &str) -> Self {
        Self::Text(s.to_owned())
    }
}

impl From<String> for Contents {
    fn from(s: String) -> Self {
        Self::Text(s)
    }
}

impl From<Vec<u8>> for Contents {
    fn from(b: Vec<u8>) -> Self {
        Self::Binary(b)
    }
}

fn with_path(path: &Path, e: Error) -> Error {
    Error::new(e.kind(), format!("{}: {}", path.display(), e))
}

fn normalize_newlines(s: String) -> String {
    if s.contains('\r') {
        s.replace("\r\n", "\n").replace('\r', "\n")
    } else {
        s
    }
}

#[cfg(windows)]
fn platform_newlines(s: &str) -> std::borrow::Cow<str> {
    s.replace('\n', "\r\n").into()
}

#[cfg(not(windows))]
fn platform_newlines(s: &str) -> std::borrow::Cow<str> {
    s.into()
}

pub fn read_file(path: impl AsRef<Path>, forced: Option<Mode>) -> Result<Contents> {
    let path = path.as_ref();
    let bytes = std::fs::read(path).map_err(|e| with_path(path, e))?;
    Ok(match mode_for(path, forced) {
        Mode::Binary => Contents::Binary(bytes),
        Mode::Text => {
            let text = String::from_utf8(bytes).map_err(|e| {
                Error::new(
                    ErrorKind::InvalidData,
                    format!("{}: not valid UTF-8 text ({})", path.display(), e),
                )
            })?;
            Contents::Text(normalize_newlines(text))
        }
    })
}

/// Read each path in order and join the results with newlines.
pub fn read_files<P>(paths: impl IntoIterator<Item = P>, forced: Option<Mode>) -> Result<Contents>
where
    P: AsRef<Path>,
{
    let parts = paths
        .into_iter()
        .map(|p| read_file(p, forced))
        .collect::<Result<Vec<Contents>>>()?;
    Ok(Contents::join(parts))
}

pub fn write_file(path: impl AsRef<Path>, contents: &Contents, forced: Option<Mode>) -> Result<()> {
    let path = path.as_ref();
    let res = match (mode_for(path, forced), contents) {
        (Mode::Text, Contents::Text(s)) => std::fs::write(path, platform_newlines(s).as_bytes()),
        (Mode::Text, Contents::Binary(b)) => match std::str::from_utf8(b) {
            Ok(s) => std::fs::write(path, platform_newlines(s).as_bytes()),
            Err(_) => std::fs::write(path, b),
        },
        (Mode::Binary, c) => std::fs::write(path, c.as_bytes()),
    };
    res.map_err(|e| with_path(path, e))
}

/// Copy one file by reading and rewriting its contents.
///
/// Never uses an OS-level copy, so permission bits (like the read-only flag
/// source control likes to set) are not carried over to the destination.
pub fn copy_file(
    src: impl AsRef<Path>,
    dst: impl AsRef<Path>,
    forced: Option<Mode>,
    transform: Option<Transform>,
) -> Result<()> {
    let mut contents = read_file(src.as_ref(), forced)?;
    if let Some(t) = transform {
        contents = t(contents);
    }
    write_file(dst.as_ref(), &contents, forced)
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn read_text_and_binary() -> Result<()> {
        let dir = tempfile::tempdir()?;
        std::fs::write(dir.path().join("a.js"), "var a;\r\nvar b;\r")?;
        std::fs::write(dir.path().join("a.png"), b"\x89PNG\r\n")?;

        assert_eq!(
            read_file(dir.path().join("a.js"), None)?,
            Contents::Text("var a;\nvar b;\n".into())
        );
        assert_eq!(
            read_file(dir.path().join("a.png"), None)?,
            Contents::Binary(b"\x89PNG\r\n".to_vec())
        );
        // Forcing binary keeps the carriage returns.
        assert_eq!(
            read_file(dir.path().join("a.js"), Some(Mode::Binary))?,
            Contents::Binary(b"var a;\r\nvar b;\r".to_vec())
        );
        Ok(())
    }

    #[test]
    fn read_missing() {
        let err = read_file("./definitely/not/here.js", None).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NotFound);
        assert!(err.to_string().contains("here.js"), "Got: {}", err);
    }

    #[test]
    fn read_text_rejects_bad_utf8() -> Result<()> {
        let dir = tempfile::tempdir()?;
        let path = dir.path().join("bad.txt");
        std::fs::write(&path, b"\xff\xfe")?;
        assert_eq!(
            read_file(&path, None).unwrap_err().kind(),
            ErrorKind::InvalidData
        );
        Ok(())
    }

    #[test]
    fn read_files_joins_with_newline() -> Result<()> {
        let dir = tempfile::tempdir()?;
        let (a, b) = (dir.path().join("a.js"), dir.path().join("b.js"));
        std::fs::write(&a, "A\n")?;
        std::fs::write(&b, "B")?;
        assert_eq!(read_files([&a, &b], None)?, Contents::Text("A\n\nB".into()));
        assert_eq!(read_files([&a], None)?, Contents::Text("A\n".into()));
        assert_eq!(
            read_files(Vec::<&Path>::new(), None)?,
            Contents::Text("".into())
        );
        Ok(())
    }

    #[test]
    fn read_files_mixed_is_binary() -> Result<()> {
        let dir = tempfile::tempdir()?;
        let (a, b) = (dir.path().join("a.txt"), dir.path().join("b.png"));
        std::fs::write(&a, "text")?;
        std::fs::write(&b, [0u8, 1, 2])?;
        assert_eq!(
            read_files([&a, &b], None)?,
            Contents::Binary(vec![b't', b'e', b'x', b't', b'\n', 0, 1, 2])
        );
        Ok(())
    }

    #[test]
    fn write_overwrites() -> Result<()> {
        let dir = tempfile::tempdir()?;
        let path = dir.path().join("out.js");
        write_file(&path, &"first version, quite long".into(), None)?;
        write_file(&path, &"second".into(), None)?;
        assert_eq!(read_file(&path, None)?, Contents::Text("second".into()));
        Ok(())
    }

    #[test]
    fn write_needs_parent() -> Result<()> {
        let dir = tempfile::tempdir()?;
        let path = dir.path().join("missing/out.js");
        assert!(write_file(&path, &"x".into(), None).is_err());
        Ok(())
    }

    #[test]
    fn copy_with_transform() -> Result<()> {
        let dir = tempfile::tempdir()?;
        let (src, dst) = (dir.path().join("in.js"), dir.path().join("out.js"));
        std::fs::write(&src, "alert('hi');")?;

        let shout = |c: Contents| match c {
            Contents::Text(s) => Contents::Text(s.to_uppercase()),
            other => other,
        };
        copy_file(&src, &dst, None, Some(&shout))?;
        assert_eq!(std::fs::read_to_string(&dst)?, "ALERT('HI');");
        Ok(())
    }

    #[test]
    fn copy_binary_exact() -> Result<()> {
        let dir = tempfile::tempdir()?;
        let (src, dst) = (dir.path().join("in.png"), dir.path().join("out.png"));
        let bytes: Vec<u8> = (0..=255).collect();
        std::fs::write(&src, &bytes)?;
        copy_file(&src, &dst, None, None)?;
        assert_eq!(std::fs::read(&dst)?, bytes);
        Ok(())
    }

    #[cfg(unix)]
    #[test]
    fn copy_does_not_carry_read_only() -> Result<()> {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempfile::tempdir()?;
        let (src, dst) = (dir.path().join("locked.js"), dir.path().join("copy.js"));
        std::fs::write(&src, "locked")?;
        std::fs::set_permissions(&src, std::fs::Permissions::from_mode(0o444))?;

        copy_file(&src, &dst, None, None)?;
        copy_file(&src, &dst, None, None)?;
        let mode = std::fs::metadata(&dst)?.permissions().mode();
        assert_ne!(mode & 0o200, 0, "destination should stay writable");
        Ok(())
    }
}
