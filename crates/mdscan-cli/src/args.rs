use anyhow::{Result, bail};
use std::path::PathBuf;

pub const USAGE: &str = "\
Usage: mdscan [OPTIONS] PATH...

Options:
  --config FILE          Read configuration from FILE
  --continue-on-error    Keep scanning after a file fails to process
  --stop-on-error        Stop at the first file that fails to process
  --front-matter         Recognise a leading front matter block
  --list-rules           List the available rules and exit
  --tokens               Print each file's token stream instead of checking it
  -v, --verbose          Log debug output
  -h, --help             Show this message";

#[derive(Debug, Default, PartialEq, Eq)]
pub struct Args {
    pub config: Option<PathBuf>,
    /// `None` leaves the configured behaviour alone.
    pub continue_on_error: Option<bool>,
    pub front_matter: bool,
    pub list_rules: bool,
    pub tokens: bool,
    pub verbose: bool,
    pub help: bool,
    pub paths: Vec<PathBuf>,
}

impl Args {
    /// Parses everything after the program name.
    pub fn parse<I: IntoIterator<Item = String>>(args: I) -> Result<Self> {
        let mut parsed = Args::default();
        let mut args = args.into_iter();
        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--config" => {
                    let Some(path) = args.next() else {
                        bail!("--config needs a file argument");
                    };
                    parsed.config = Some(PathBuf::from(path));
                }
                "--continue-on-error" => parsed.continue_on_error = Some(true),
                "--stop-on-error" => parsed.continue_on_error = Some(false),
                "--front-matter" => parsed.front_matter = true,
                "--list-rules" => parsed.list_rules = true,
                "--tokens" => parsed.tokens = true,
                "-v" | "--verbose" => parsed.verbose = true,
                "-h" | "--help" => parsed.help = true,
                "--" => parsed.paths.extend(args.by_ref().map(PathBuf::from)),
                flag if flag.starts_with('-') && flag.len() > 1 => {
                    bail!("unknown option '{flag}'")
                }
                path => parsed.paths.push(PathBuf::from(path)),
            }
        }

        if parsed.paths.is_empty() && !parsed.list_rules && !parsed.help {
            bail!("no paths to scan");
        }
        Ok(parsed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    fn parse(args: &[&str]) -> Result<Args> {
        Args::parse(args.iter().map(|a| a.to_string()))
    }

    #[test]
    fn full_command_line() {
        let args = parse(&[
            "--config",
            "cfg.toml",
            "--stop-on-error",
            "--front-matter",
            "-v",
            "docs",
            "README.md",
        ])
        .unwrap();
        assert_eq!(
            args,
            Args {
                config: Some(PathBuf::from("cfg.toml")),
                continue_on_error: Some(false),
                front_matter: true,
                verbose: true,
                paths: vec![PathBuf::from("docs"), PathBuf::from("README.md")],
                ..Args::default()
            }
        );
    }

    #[test]
    fn last_error_mode_wins() {
        let args = parse(&["--stop-on-error", "--continue-on-error", "a.md"]).unwrap();
        assert_eq!(args.continue_on_error, Some(true));
    }

    #[test]
    fn paths_after_double_dash() {
        let args = parse(&["--", "--weird.md", "-"]).unwrap();
        assert_eq!(
            args.paths,
            vec![PathBuf::from("--weird.md"), PathBuf::from("-")]
        );
    }

    #[rstest]
    #[case(&["--list-rules"])]
    #[case(&["--help"])]
    fn no_paths_needed(#[case] args: &[&str]) {
        assert!(parse(args).is_ok());
    }

    #[rstest]
    #[case(&[], "no paths to scan")]
    #[case(&["--bogus", "a.md"], "unknown option '--bogus'")]
    #[case(&["a.md", "--config"], "--config needs a file argument")]
    fn rejected(#[case] args: &[&str], #[case] message: &str) {
        assert_eq!(parse(args).unwrap_err().to_string(), message);
    }
}
