use super::conclude;
use crate::logger::Logger;
use crate::tree::copy_tree;
use indoc::indoc;
use std::io::Write;
use std::process::ExitCode;

const USAGE: &'static str = indoc! {"

    Usage:
    filetree {command} [{args...}]

    Example:
    filetree copytree foo/bar foo/baz

    Only copytree is available from the command line currently.
"};

/// What we decide to do based on CLI arguments
#[derive(PartialEq, Debug)]
pub enum Behavior {
    Usage,
    UnrecognizedCommand(String),
    MissingArgs,
    ExtraArgs,
    CopyTree { src: String, dst: String },
}

pub fn parse<S>(args: impl Iterator<Item = S>) -> Behavior
where
    S: AsRef<str>,
{
    let args: Vec<String> = args.map(|a| a.as_ref().to_owned()).collect();
    match args.as_slice() {
        [] => Behavior::Usage,
        [cmd, ..] if cmd != "copytree" => Behavior::UnrecognizedCommand(cmd.clone()),
        [_, src, dst] => Behavior::CopyTree {
            src: src.clone(),
            dst: dst.clone(),
        },
        [_] | [_, _] => Behavior::MissingArgs,
        _ => Behavior::ExtraArgs,
    }
}

/// Usage problems are reported, but still count as success.
pub fn execute(behavior: Behavior, log: &mut Logger) -> ExitCode {
    let result = match behavior {
        Behavior::Usage => write!(log.stdout, "{}", USAGE),
        Behavior::UnrecognizedCommand(_) => write!(
            log.stdout,
            "Error: unrecognized command. Currently, only copytree is supported. Sorry!\n"
        ),
        Behavior::MissingArgs => {
            write!(log.stdout, "Error: copytree requires {{src}} and {{dst}} args.\n")
        }
        Behavior::ExtraArgs => write!(
            log.stdout,
            "Error: copytree via the command line doesn't support the {{binary}} or {{transform}} args.\n"
        ),
        Behavior::CopyTree { src, dst } => execute_copy(&src, &dst, log),
    };
    conclude(result, log)
}

fn execute_copy(src: &str, dst: &str, log: &mut Logger) -> std::io::Result<()> {
    let copied = copy_tree(src, dst, None, None)?;
    write!(log.file(), "Copied {} file(s)\n", copied)
}
