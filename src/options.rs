//! Parsing Options.
//! `ndrtosn [-l|-c] [-n] [--config FILE] [--dump-model FILE] [in-file] [out-file]`,
//! `-` or a missing file name means standard input/output.

use clap::{Arg, ArgAction, Command};
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::config::{DEFAULT_CONFIG_FILE, TranslatorConfig};
use crate::translate::OutputFormat;

/// Stands for standard input or standard output.
pub const STDIO: &str = "-";

#[derive(Debug, Error)]
pub enum OptionsError {
    #[error("malformed flags: {0}")]
    Split(#[from] shellwords::MismatchedQuotes),
    #[error(transparent)]
    Clap(#[from] clap::Error),
}

impl OptionsError {
    /// `-h` and `-V` surface as errors from clap but are not failures.
    pub fn is_informational(&self) -> bool {
        matches!(self, OptionsError::Clap(err) if !err.use_stderr())
    }
}

fn make_options_parser() -> clap::Command {
    let parser = Command::new("ndrtosn")
        .no_binary_name(true)
        .version(env!("CARGO_PKG_VERSION"))
        .about("Converts an .ndr net into .lsn/.hsn text or a C language header")
        .arg(
            Arg::new("lsn")
                .short('l')
                .long("lsn")
                .help("Output as .lsn/.hsn (default)")
                .action(ArgAction::SetTrue)
                .overrides_with("matrix"),
        )
        .arg(
            Arg::new("matrix")
                .short('c')
                .long("c-header")
                .help("Output as C header with dense matrices")
                .action(ArgAction::SetTrue)
                .overrides_with("lsn"),
        )
        .arg(
            Arg::new("name-tables")
                .short('n')
                .long("name-tables")
                .help("Also write <out-file>.nmp and <out-file>.nmt")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("config")
                .long("config")
                .value_name("FILE")
                .help("Configuration file")
                .value_parser(clap::value_parser!(PathBuf)),
        )
        .arg(
            Arg::new("dump-model")
                .long("dump-model")
                .value_name("FILE")
                .help("Write the parsed net as RON (.ron) or JSON")
                .value_parser(clap::value_parser!(PathBuf)),
        )
        .arg(
            Arg::new("input")
                .value_name("NDR_FILE")
                .help("Net in .ndr format")
                .default_value(STDIO),
        )
        .arg(
            Arg::new("output")
                .value_name("OUT_FILE")
                .help("LSN/HSN file or C header")
                .default_value(STDIO),
        );
    parser
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Options {
    /// `None` when neither `-l` nor `-c` was given.
    pub format: Option<OutputFormat>,
    pub name_tables: bool,
    pub config: Option<PathBuf>,
    pub dump_model: Option<PathBuf>,
    pub input: String,
    pub output: String,
}

impl Default for Options {
    fn default() -> Self {
        Options {
            format: None,
            name_tables: false,
            config: None,
            dump_model: None,
            input: STDIO.to_owned(),
            output: STDIO.to_owned(),
        }
    }
}

impl Options {
    /// Shell-splits `env_flags` and puts them before `args`, so the command line wins.
    pub fn parse_with_env(env_flags: &str, args: &[String]) -> Result<Self, OptionsError> {
        let mut flags = shellwords::split(env_flags)?;
        flags.extend_from_slice(args);
        Self::parse_from_args(&flags)
    }

    pub fn parse_from_args(flags: &[String]) -> Result<Self, OptionsError> {
        let app = make_options_parser();
        let matches = app.try_get_matches_from(flags.iter())?;

        let format = if matches.get_flag("matrix") {
            Some(OutputFormat::Matrix)
        } else if matches.get_flag("lsn") {
            Some(OutputFormat::Lsn)
        } else {
            None
        };

        let input = matches
            .get_one::<String>("input")
            .cloned()
            .unwrap_or_else(|| STDIO.to_owned());
        let output = matches
            .get_one::<String>("output")
            .cloned()
            .unwrap_or_else(|| STDIO.to_owned());

        Ok(Options {
            format,
            name_tables: matches.get_flag("name-tables"),
            config: matches.get_one::<PathBuf>("config").cloned(),
            dump_model: matches.get_one::<PathBuf>("dump-model").cloned(),
            input,
            output,
        })
    }

    pub fn config_path(&self) -> PathBuf {
        self.config
            .clone()
            .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_FILE))
    }

    /// Command-line choice first, then the configuration file.
    pub fn format(&self, config: &TranslatorConfig) -> OutputFormat {
        self.format.unwrap_or(config.format)
    }

    pub fn name_tables(&self, config: &TranslatorConfig) -> bool {
        self.name_tables || config.name_tables
    }

    pub fn dump_model<'a>(&'a self, config: &'a TranslatorConfig) -> Option<&'a Path> {
        self.dump_model
            .as_deref()
            .or(config.dump_model.as_deref())
    }

    pub fn reads_stdin(&self) -> bool {
        self.input == STDIO
    }

    pub fn writes_stdout(&self) -> bool {
        self.output == STDIO
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(line: &str) -> Vec<String> {
        line.split_whitespace().map(str::to_owned).collect()
    }

    #[test]
    fn test_defaults_to_stdio() {
        let options = Options::parse_with_env("", &[]).unwrap();
        assert_eq!(options, Options::default());
        assert!(options.reads_stdin());
        assert!(options.writes_stdout());
        assert_eq!(options.format(&TranslatorConfig::default()), OutputFormat::Lsn);
    }

    #[test]
    fn test_last_format_flag_wins() {
        let options = Options::parse_with_env("", &args("-l -c net.ndr net.h")).unwrap();
        assert_eq!(options.format, Some(OutputFormat::Matrix));
        assert_eq!(options.input, "net.ndr");
        assert_eq!(options.output, "net.h");

        let options = Options::parse_with_env("", &args("-c -l")).unwrap();
        assert_eq!(options.format, Some(OutputFormat::Lsn));
    }

    #[test]
    fn test_env_flags_come_first() {
        let options = Options::parse_with_env("-c -n", &args("-l in.ndr")).unwrap();
        assert_eq!(options.format, Some(OutputFormat::Lsn));
        assert!(options.name_tables);
        assert_eq!(options.input, "in.ndr");

        let options = Options::parse_with_env("'my net.ndr'", &[]).unwrap();
        assert_eq!(options.input, "my net.ndr");
    }

    #[test]
    fn test_dash_is_stdio() {
        let options = Options::parse_with_env("", &args("- out.lsn")).unwrap();
        assert!(options.reads_stdin());
        assert_eq!(options.output, "out.lsn");
    }

    #[test]
    fn test_cli_overrides_config() {
        let config = TranslatorConfig {
            format: OutputFormat::Matrix,
            name_tables: true,
            dump_model: Some(PathBuf::from("cfg.json")),
        };
        let options = Options::parse_with_env("--dump-model 'my net.ron'", &args("-l")).unwrap();
        assert_eq!(options.format(&config), OutputFormat::Lsn);
        assert!(options.name_tables(&config));
        assert_eq!(options.dump_model(&config), Some(Path::new("my net.ron")));

        let options = Options::parse_with_env("", &[]).unwrap();
        assert_eq!(options.format(&config), OutputFormat::Matrix);
        assert_eq!(options.dump_model(&config), Some(Path::new("cfg.json")));
    }

    #[test]
    fn test_config_path() {
        let options = Options::parse_with_env("", &args("--config other.toml")).unwrap();
        assert_eq!(options.config_path(), PathBuf::from("other.toml"));
        assert_eq!(
            Options::default().config_path(),
            PathBuf::from(DEFAULT_CONFIG_FILE)
        );
    }

    #[test]
    fn test_parse_with_env_err() {
        let err = Options::parse_with_env("", &args("a.ndr b.lsn c.extra")).unwrap_err();
        assert!(!err.is_informational());

        let err = Options::parse_with_env("-x", &[]).unwrap_err();
        assert!(matches!(err, OptionsError::Clap(_)));

        let err = Options::parse_with_env("'unbalanced", &args("a.ndr")).unwrap_err();
        assert!(matches!(err, OptionsError::Split(_)));
    }

    #[test]
    fn test_help_is_informational() {
        let err = Options::parse_from_args(&["-h".to_owned()]).unwrap_err();
        assert!(err.is_informational());
    }
}
