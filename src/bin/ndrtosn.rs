use std::fs::File;
use std::io::{self, BufReader, BufWriter};
use std::path::Path;
use std::process;

use log::{debug, warn};

use ndrtosn::config::TranslatorConfig;
use ndrtosn::error::{Result, TranslateError};
use ndrtosn::export::write_side_tables;
use ndrtosn::ndr::parse_ndr;
use ndrtosn::net::io::{NetSnapshot, write_dump};
use ndrtosn::options::{Options, OptionsError};
use ndrtosn::translate::Translation;

/// Exit status for command-line and configuration errors.
const EXIT_USAGE: i32 = 4;

fn main() {
    if std::env::var("NDRTOSN_LOG").is_ok() {
        let e = env_logger::Env::new()
            .filter("NDRTOSN_LOG")
            .write_style("NDRTOSN_LOG_STYLE");
        env_logger::init_from_env(e);
    }

    let options = match parse_options() {
        Ok(options) => options,
        Err(err) if err.is_informational() => {
            if let OptionsError::Clap(err) = err {
                let _ = err.print();
            }
            process::exit(0);
        }
        Err(err) => {
            match err {
                OptionsError::Clap(err) => {
                    let _ = err.print();
                }
                other => eprintln!("*** {}", other),
            }
            process::exit(EXIT_USAGE);
        }
    };
    debug!("options: {:?}", options);

    let config_path = options.config_path();
    if options.config.is_some() && !config_path.exists() {
        eprintln!("*** error open file {}", config_path.display());
        process::exit(EXIT_USAGE);
    }
    let config = match TranslatorConfig::load_from_file(&config_path) {
        Ok(config) => config,
        Err(err) => {
            eprintln!("*** {:#}", err);
            process::exit(EXIT_USAGE);
        }
    };
    debug!("config: {:?}", config);

    if let Err(err) = run(&options, &config) {
        eprintln!("*** {}", err);
        process::exit(err.exit_code());
    }
}

/// `NDRTOSN_FLAGS` merged with the real arguments.
fn parse_options() -> std::result::Result<Options, OptionsError> {
    let env_flags = std::env::var("NDRTOSN_FLAGS").unwrap_or_default();
    let mut args = Vec::new();
    for (i, arg) in std::env::args_os().enumerate().skip(1) {
        match arg.into_string() {
            Ok(arg) => args.push(arg),
            Err(arg) => {
                eprintln!("*** argument {} is not valid Unicode: {:?}", i, arg);
                process::exit(EXIT_USAGE);
            }
        }
    }
    Options::parse_with_env(&env_flags, &args)
}

fn run(options: &Options, config: &TranslatorConfig) -> Result<()> {
    let net = if options.reads_stdin() {
        parse_ndr(io::stdin().lock())?
    } else {
        let file = File::open(&options.input).map_err(|source| TranslateError::Open {
            path: options.input.clone(),
            source,
        })?;
        parse_ndr(BufReader::new(file))?
    };

    let translation = Translation::new(net, options.format(config))?;

    if let Some(path) = options.dump_model(config) {
        let snapshot = NetSnapshot::new(&translation.net, &translation.labels);
        write_dump(path, &snapshot).map_err(|source| TranslateError::Dump {
            path: path.display().to_string(),
            source,
        })?;
        debug!("model dumped to {:?}", path);
    }

    if options.writes_stdout() {
        translation.render(&mut io::stdout().lock())?;
    } else {
        let file = File::create(&options.output).map_err(|source| TranslateError::Open {
            path: options.output.clone(),
            source,
        })?;
        translation.render(&mut BufWriter::new(file))?;
    }

    if options.name_tables(config) {
        if options.writes_stdout() {
            warn!("name tables need an output file name, skipped");
        } else {
            write_side_tables(&translation.net, Path::new(&options.output))?;
        }
    }
    Ok(())
}
