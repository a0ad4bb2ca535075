mod args;
mod scan;

use anyhow::{Context, Result, bail};
use args::{Args, USAGE};
use mdscan_config::Config;
use scan::{Outcome, Scanner};
use std::{env, io, process};

fn main() {
    let args = match Args::parse(env::args().skip(1)) {
        Ok(args) => args,
        Err(e) => {
            eprintln!("Error: {e}");
            eprintln!("{USAGE}");
            process::exit(Outcome::Failed.exit_code());
        }
    };

    if args.help {
        println!("{USAGE}");
        return;
    }

    env_logger::Builder::from_default_env()
        .filter_level(if args.verbose {
            log::LevelFilter::Debug
        } else {
            log::LevelFilter::Info
        })
        .init();

    match run(&args) {
        Ok(outcome) => process::exit(outcome.exit_code()),
        Err(e) => {
            eprintln!("Error: {e:#}");
            process::exit(Outcome::Failed.exit_code());
        }
    }
}

fn run(args: &Args) -> Result<Outcome> {
    let mut config = load_config(args)?;
    if let Some(continue_on_error) = args.continue_on_error {
        config.continue_on_error = continue_on_error;
    }
    if args.front_matter {
        config.front_matter = true;
    }

    let mut scanner = Scanner::new(&config, args.tokens)?;
    if args.list_rules {
        scan::list_rules(scanner.manager(), &mut io::stdout())?;
        return Ok(Outcome::Clean);
    }

    let files = scan::collect_files(&args.paths, &config)?;
    log::info!("Scanning {} files", files.len());
    scanner.run(&files, &mut io::stdout(), &mut io::stderr())
}

/// `--config FILE`, else `.mdscan.toml` in the working directory, else the
/// user config, else defaults.
fn load_config(args: &Args) -> Result<Config> {
    if let Some(path) = &args.config {
        return match Config::load_from_path(path)? {
            Some(config) => Ok(config),
            None => bail!("Config file '{}' not found", path.display()),
        };
    }

    let cwd = env::current_dir().context("Failed to determine the working directory")?;
    if let Some(config) = Config::discover(&cwd)? {
        log::debug!("Using {}", cwd.join(Config::PROJECT_FILE).display());
        return Ok(config);
    }
    if let Some(config) = Config::load()? {
        log::debug!("Using {}", Config::config_path().display());
        return Ok(config);
    }
    Ok(Config::default())
}
