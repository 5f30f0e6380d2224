use clap::{Arg, ArgAction, Command};
use phpx_cli::config::PhpxConfig;
use phpx_cli::logger::Logger;
use phpx_cli::walker::Walker;
use std::path::Path;
use std::process::ExitCode;

fn main() -> ExitCode {
    let matches = Command::new("phpx")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Compiles JSX-style templates into PHP")
        .arg(
            Arg::new("dir")
                .help("Directory to scan for templates")
                .default_value("."),
        )
        .arg(
            Arg::new("config")
                .short('c')
                .long("config")
                .value_name("PATH")
                .help("Path to a phpx.json configuration file"),
        )
        .arg(
            Arg::new("debug")
                .long("debug")
                .action(ArgAction::SetTrue)
                .help("Print tracing output"),
        )
        .get_matches();

    let explicit = matches.get_one::<String>("config").map(Path::new);
    let mut config = match PhpxConfig::discover(explicit) {
        Ok(config) => config,
        Err(error) => {
            eprintln!("❗ {error:#}");
            return ExitCode::FAILURE;
        }
    };

    if matches.get_flag("debug") {
        config.debug = true;
    }

    let logger = Logger::new(config.debug);
    let dir = matches
        .get_one::<String>("dir")
        .map(String::as_str)
        .unwrap_or(".");
    let walker = Walker::new(config, logger);

    match walker.walk(Path::new(dir)) {
        Ok(0) => ExitCode::SUCCESS,
        Ok(failures) => {
            eprintln!("❗ {failures} template(s) failed to compile");
            ExitCode::FAILURE
        }
        Err(error) => {
            eprintln!("❗ {error:#}");
            ExitCode::FAILURE
        }
    }
}
