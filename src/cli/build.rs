use super::conclude;
use crate::config::BuildConfig;
use crate::logger::Logger;
use crate::pipeline::{Pipeline, Selection};
use indoc::indoc;
use std::io::Write;
use std::process::ExitCode;

const USAGE: &'static str = indoc! {"
    usage: seabuild [--help|--version|target]

    Builds each target's file list into a single script, then minifies it.
    With no target (or `all`), every configured target is built in order.

    Settings are read from ./seabuild.json when present:

    # Only build the utilities bundle
     seabuild utils

    # Build everything
     seabuild all
"};

/// What we decide to do based on CLI arguments
#[derive(PartialEq, Debug)]
pub enum Behavior {
    Help,
    Version,
    UnexpectedArg(String),
    Build(Selection),
}

pub fn parse<S>(args: impl Iterator<Item = S>) -> Behavior
where
    S: AsRef<str>,
{
    let mut positional: Vec<String> = vec![];
    for arg in args {
        match arg.as_ref() {
            "--version" => return Behavior::Version,
            "--help" => return Behavior::Help,
            other => positional.push(other.to_owned()),
        }
    }

    match positional.len() {
        0 | 1 => Behavior::Build(Selection::from_arg(positional.first().map(|s| s.as_str()))),
        _ => Behavior::UnexpectedArg(positional.swap_remove(1)),
    }
}

pub fn execute(behavior: Behavior, log: &mut Logger) -> ExitCode {
    let result = match behavior {
        Behavior::Help => write!(log.stdout, "{}", USAGE),
        Behavior::Version => write!(log.stdout, "{}\n", env!("CARGO_PKG_VERSION")),
        Behavior::UnexpectedArg(a) => write!(log.stdout, "Unexpected argument: {}\n", a),
        Behavior::Build(sel) => execute_build(sel, log),
    };
    conclude(result, log)
}

fn execute_build(sel: Selection, log: &mut Logger) -> std::io::Result<()> {
    let cfg = BuildConfig::discover(".")?;
    Pipeline::new(&cfg, log).build(&sel)?;
    Ok(())
}

#[cfg(test)]
mod test {
    use super::*;
    use rusty_fork::rusty_fork_test;

    #[test]
    fn parse_empty() {
        assert_eq!(
            parse(Vec::<String>::new().iter()),
            Behavior::Build(Selection::All)
        );
    }

    #[test]
    fn parse_help() {
        assert_eq!(parse(vec!["--help"].iter()), Behavior::Help);
        assert_eq!(parse(vec!["zoom", "--help"].iter()), Behavior::Help);
    }

    #[test]
    fn parse_version() {
        assert_eq!(parse(vec!["--version"].iter()), Behavior::Version);
    }

    #[test]
    fn parse_conflict() {
        assert_eq!(parse(vec!["--help", "--version"].iter()), Behavior::Help);
        assert_eq!(parse(vec!["--version", "--help"].iter()), Behavior::Version);
    }

    #[test]
    fn parse_target() {
        assert_eq!(
            parse(vec!["all"].iter()),
            Behavior::Build(Selection::All)
        );
        assert_eq!(
            parse(vec!["zoomimage"].iter()),
            Behavior::Build(Selection::Only("zoomimage".into()))
        );
    }

    #[test]
    fn parse_too_many() {
        assert_eq!(
            parse(vec!["zoom", "ajax", "utils"].iter()),
            Behavior::UnexpectedArg("ajax".into())
        );
    }

    #[test]
    fn execute_help() {
        let mut log = Logger::new_vec();
        execute(Behavior::Help, &mut log);
        assert_eq!(log.recorded().0, USAGE);
    }

    #[test]
    fn execute_version() {
        let mut log = Logger::new_vec();
        execute(Behavior::Version, &mut log);
        assert_eq!(
            log.recorded().0,
            env!("CARGO_PKG_VERSION").to_owned() + "\n"
        );
    }

    #[test]
    fn execute_unexpected_arg() {
        let mut log = Logger::new_vec();
        execute(Behavior::UnexpectedArg("xyz".into()), &mut log);
        assert_eq!(log.recorded().0, "Unexpected argument: xyz\n");
    }

    fn project() -> std::io::Result<tempfile::TempDir> {
        let dir = tempfile::tempdir()?;
        let root = dir.path();
        for sub in ["v2/src/_pre", "v2/src/_post", "v2/build/utils"] {
            std::fs::create_dir_all(root.join(sub))?;
        }
        std::fs::write(root.join("v2/src/_pre/standalone.txt"), "(function(){")?;
        std::fs::write(root.join("v2/src/_post/standalone.txt"), "})();")?;
        std::fs::write(root.join("v2/src/Utils.js"), "var Utils = {};")?;
        std::fs::write(root.join("v2/build/utils/standalone.txt"), "Utils.js\n")?;
        std::fs::write(
            root.join("seabuild.json"),
            indoc! {r#"
                {
                    "targets": [{"name": "utils", "types": ["standalone"]}],
                    "transpile": null,
                    "minify": null
                }
            "#},
        )?;
        Ok(dir)
    }

    rusty_fork_test! {
        #[test]
        fn execute_build_in_cwd() {
            let dir = project().expect("Failed to set up project");
            std::env::set_current_dir(dir.path()).expect("Failed to change directory");

            let mut log = Logger::new_vec();
            let code = execute(Behavior::Build(Selection::All), &mut log);
            assert_eq!(format!("{:?}", code), format!("{:?}", ExitCode::SUCCESS));
            assert_eq!(
                std::fs::read_to_string(dir.path().join("bin/v2/seadragon-utils-standalone.js"))
                    .expect("Output was not written"),
                "(function(){\nvar Utils = {};\n})();"
            );
        }

        #[test]
        fn execute_build_unknown_target() {
            let dir = project().expect("Failed to set up project");
            std::env::set_current_dir(dir.path()).expect("Failed to change directory");

            let mut log = Logger::new_vec();
            let code = execute(Behavior::Build(Selection::Only("pivot".into())), &mut log);
            assert_eq!(format!("{:?}", code), format!("{:?}", ExitCode::from(1)));
            assert!(
                log.recorded().0.ends_with("Failed to execute: Unknown build target \"pivot\"\n"),
                "Got: {:?}",
                log.recorded()
            );
        }
    }
}
