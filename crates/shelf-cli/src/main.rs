// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

mod config;
mod runtime;

use anyhow::{Context, Result, anyhow};
use config::Config;
use runtime::{DEMO_SEED, FetchRuntime, RecordSource};
use shelf_app::{Snapshot, ViewState};
use shelf_testkit::RecordFaker;
use shelf_tui::AppRuntime;
use std::env;
use std::fs::OpenOptions;
use std::io;
use std::path::PathBuf;
use std::sync::Mutex;
use tracing::debug;
use tracing_subscriber::EnvFilter;

fn main() {
    if let Err(error) = run() {
        eprintln!("{error:#}");
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let options = parse_cli_args(env::args().skip(1), Config::default_path()?)?;
    if options.show_help {
        print_help();
        return Ok(());
    }

    if options.print_config_path {
        println!("{}", options.config_path.display());
        return Ok(());
    }

    if options.print_example {
        print!("{}", Config::example_config(&options.config_path));
        return Ok(());
    }

    let config = Config::load(&options.config_path).with_context(|| {
        format!(
            "load config {}; run `shelf --print-example-config` to generate a v1 template",
            options.config_path.display()
        )
    })?;
    init_logging(&config)?;
    debug!(path = %options.config_path.display(), "config resolved");

    let source = resolve_source(&options, &config)?;
    let mut runtime = FetchRuntime::new(source, config.placeholder_label());

    if options.check_only {
        let snapshot = runtime.load_snapshot()?;
        println!("ok: {}", snapshot.summary());
        return Ok(());
    }

    if options.dump {
        let snapshot = runtime.load_snapshot()?;
        for line in dump_lines(&snapshot, runtime.placeholder_label()) {
            println!("{line}");
        }
        return Ok(());
    }

    let mut state = ViewState::default();
    shelf_tui::run_app(&mut state, &mut runtime)
}

fn resolve_source(options: &CliOptions, config: &Config) -> Result<RecordSource> {
    if options.demo {
        return Ok(RecordSource::Demo(RecordFaker::new(DEMO_SEED)));
    }

    if let Some(path) = options.file.clone().or_else(|| config.source_file()) {
        return Ok(RecordSource::File(path));
    }

    let client = shelf_fetch::Client::new(config.source_url(), config.source_timeout()?)
        .with_context(|| {
            format!(
                "invalid [source] config in {}; fix url/timeout values or pass --file",
                options.config_path.display()
            )
        })?;
    Ok(RecordSource::Url(client))
}

fn init_logging(config: &Config) -> Result<()> {
    let filter = match env::var("SHELF_LOG") {
        Ok(directives) if !directives.trim().is_empty() => EnvFilter::try_new(&directives)
            .with_context(|| format!("invalid SHELF_LOG filter {directives:?}"))?,
        _ => EnvFilter::try_new(config.log_level())
            .with_context(|| format!("invalid [log].level {:?}", config.log_level()))?,
    };

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false);
    let installed = match config.log_file() {
        Some(path) => {
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(&path)
                .with_context(|| format!("open log file {}", path.display()))?;
            builder
                .with_ansi(false)
                .with_writer(Mutex::new(file))
                .try_init()
        }
        None => builder.with_writer(io::stderr).try_init(),
    };
    installed.map_err(|error| anyhow!("initialize logging: {error}"))
}

fn dump_lines(snapshot: &Snapshot, placeholder: &str) -> Vec<String> {
    snapshot
        .sequence
        .iter()
        .map(|entry| entry.render_line(placeholder))
        .collect()
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct CliOptions {
    config_path: PathBuf,
    file: Option<PathBuf>,
    print_config_path: bool,
    print_example: bool,
    demo: bool,
    dump: bool,
    check_only: bool,
    show_help: bool,
}

fn parse_cli_args<I, S>(args: I, default_config_path: PathBuf) -> Result<CliOptions>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut options = CliOptions {
        config_path: default_config_path,
        file: None,
        print_config_path: false,
        print_example: false,
        demo: false,
        dump: false,
        check_only: false,
        show_help: false,
    };

    let mut iter = args.into_iter();
    while let Some(arg) = iter.next() {
        match arg.as_ref() {
            "--config" => {
                let value = iter
                    .next()
                    .ok_or_else(|| anyhow!("--config requires a file path"))?;
                options.config_path = PathBuf::from(value.as_ref());
            }
            "--file" => {
                let value = iter
                    .next()
                    .ok_or_else(|| anyhow!("--file requires a JSON file path"))?;
                options.file = Some(PathBuf::from(value.as_ref()));
            }
            "--print-config-path" => {
                options.print_config_path = true;
            }
            "--print-example-config" => {
                options.print_example = true;
            }
            "--demo" => {
                options.demo = true;
            }
            "--dump" => {
                options.dump = true;
            }
            "--check" => {
                options.check_only = true;
            }
            "--help" | "-h" => {
                options.show_help = true;
            }
            unknown => {
                return Err(anyhow!(
                    "unknown argument {unknown:?}; run with --help to see supported options"
                ));
            }
        }
    }

    Ok(options)
}

fn print_help() {
    println!("shelf: grouped, naturally ordered record lists");
    println!("  --config <path>          Use a specific config path");
    println!("  --file <path>            Read records from a local JSON file");
    println!("  --demo                   Launch with generated demo records (no network)");
    println!("  --dump                   Print the grouped list to stdout and exit");
    println!("  --check                  Validate config and load records, then exit");
    println!("  --print-config-path      Print resolved config path");
    println!("  --print-example-config   Print a v1 config template");
    println!("  --help                   Show this help");
}
