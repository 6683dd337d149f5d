use seabuild::cli::filetree;
use seabuild::logger::Logger;
use std::env::args;
use std::process::ExitCode;

fn main() -> ExitCode {
    let mut logger = Logger::new_real();
    let behavior = filetree::parse(args().skip(1));
    filetree::execute(behavior, &mut logger)
}
