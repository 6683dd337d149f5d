use seabuild::cli::build;
use seabuild::logger::Logger;
use std::env::args;
use std::process::ExitCode;

fn main() -> ExitCode {
    let mut logger = Logger::new_real();
    let behavior = build::parse(args().skip(1));
    build::execute(behavior, &mut logger)
}
