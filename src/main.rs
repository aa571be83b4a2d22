use clap::{Arg, ArgAction, ArgMatches, Command};
use owo_colors::OwoColorize;
use std::io::IsTerminal;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing::debug;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use crosscheck::checking::{self, Layout};
use crosscheck::loading::{Filesystem, Source};
use crosscheck::rendering::{Identity, Terminal};

mod output;

fn path_arg(name: &'static str, help: &'static str) -> Arg {
    Arg::new(name)
        .long(name)
        .value_name("PATH")
        .value_parser(clap::value_parser!(PathBuf))
        .help(help)
}

fn raw_control_chars() -> Arg {
    Arg::new("raw-control-chars")
        .short('R')
        .long("raw-control-chars")
        .action(ArgAction::SetTrue)
        .help("Emit ANSI escape codes for highlighting even if output is redirected to a pipe or file.")
}

fn layout_from(submatches: &ArgMatches) -> Layout {
    let mut layout = Layout::default();

    let fields: [(&str, &mut PathBuf); 6] = [
        ("catalog", &mut layout.catalog),
        ("cards", &mut layout.cards),
        ("client", &mut layout.client),
        ("server", &mut layout.server),
        ("manifest", &mut layout.manifest),
        ("sources", &mut layout.sources),
    ];
    for (name, field) in fields {
        if let Some(path) = submatches.get_one::<PathBuf>(name) {
            *field = path.clone();
        }
    }

    layout
}

fn colourize(submatches: &ArgMatches) -> bool {
    submatches.get_flag("raw-control-chars")
        || std::io::stdout().is_terminal()
}

fn emit(rendered: Result<String, tinytemplate::error::Error>, code: u8) -> ExitCode {
    match rendered {
        Ok(text) => {
            print!("{}", text);
            ExitCode::from(code)
        }
        Err(error) => {
            eprintln!("{}: {}", "error".bright_red(), error);
            ExitCode::FAILURE
        }
    }
}

fn main() -> ExitCode {
    const VERSION: &str = concat!("v", env!("CARGO_PKG_VERSION"));

    let matches = Command::new("crosscheck")
        .version(VERSION)
        .propagate_version(true)
        .author("Andrew Cowie")
        .about("Audit the command catalog, UI contract, and permission manifest for consistency.")
        .disable_help_subcommand(true)
        .arg(
            Arg::new("verbose")
                .long("verbose")
                .global(true)
                .action(ArgAction::SetTrue)
                .help("Log what each check found to standard error."),
        )
        .subcommand(
            Command::new("check")
                .about("Cross-check the catalog, cards, contract, and permissions")
                .arg(path_arg("catalog", "The source file declaring the command catalog."))
                .arg(path_arg("cards", "The JSON file listing religion cards."))
                .arg(path_arg("client", "The UI client source that sends requests."))
                .arg(path_arg("server", "The server source that handles requests."))
                .arg(path_arg("manifest", "The plugin manifest declaring permissions."))
                .arg(path_arg("sources", "The plugin source tree scanned for permission checks."))
                .arg(raw_control_chars()),
        )
        .subcommand(
            Command::new("recipes")
                .about("Validate the crafting recipe overrides")
                .arg(raw_control_chars())
                .arg(
                    Arg::new("filename")
                        .value_parser(clap::value_parser!(PathBuf))
                        .default_value("balance_config/recipes.json")
                        .help("The JSON file containing the recipe overrides."),
                ),
        )
        .get_matches();

    let level = if matches.get_flag("verbose") {
        "debug"
    } else {
        "warn"
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();

    match matches.subcommand() {
        Some(("check", submatches)) => {
            let layout = layout_from(submatches);
            debug!(?layout);

            let report = checking::audit(&Filesystem, &layout);

            let rendered = if colourize(submatches) {
                output::summary(&Terminal, &report)
            } else {
                output::summary(&Identity, &report)
            };
            emit(rendered, report.exit_code())
        }
        Some(("recipes", submatches)) => {
            let filename: &Path = match submatches.get_one::<PathBuf>("filename") {
                Some(filename) => filename,
                None => Path::new("balance_config/recipes.json"),
            };

            let text = match Filesystem.read(filename) {
                Ok(text) => text,
                Err(error) => {
                    debug!(?error);
                    println!("ERROR: {}: {}", filename.display(), error);
                    return ExitCode::FAILURE;
                }
            };

            let recipes = checking::validate_recipes(&text, &checking::label(filename));

            let rendered = if colourize(submatches) {
                output::recipes(&Terminal, &recipes)
            } else {
                output::recipes(&Identity, &recipes)
            };
            let code = if recipes.errors() > 0 { 1 } else { 0 };
            emit(rendered, code)
        }
        Some(_) => {
            println!("No valid subcommand was used");
            ExitCode::FAILURE
        }
        None => {
            println!("usage: crosscheck [COMMAND] ...");
            println!("Try '--help' for more information.");
            ExitCode::FAILURE
        }
    }
}
