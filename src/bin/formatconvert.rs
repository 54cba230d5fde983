use std::path::PathBuf;
use std::process::ExitCode;

use clap::{ArgAction, Parser};
use mapconvert::{Config, ConfigPlugins, Converter, FormatRegistry, MapFormat};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(
    name = "formatconvert",
    about = "Convert tile maps between formats, detected from file extensions",
    version
)]
struct Cli {
    /// Map file to read
    #[arg(required_unless_present = "list_formats")]
    source: Option<PathBuf>,
    /// Map file to write
    #[arg(required_unless_present = "list_formats")]
    destination: Option<PathBuf>,
    /// Config file (defaults to $MAPCONVERT_CONFIG, then formatconvert.yaml in the working directory)
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,
    /// Increase log output (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,
    /// Print the registered formats in resolution order and exit
    #[arg(long, default_value_t = false)]
    list_formats: bool,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("formatconvert: {err}");
            ExitCode::FAILURE
        }
    }
}

fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn run(cli: &Cli) -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::discover(cli.config.as_deref())?;
    let default = config.default_format()?;

    let mut registry = FormatRegistry::with_builtins();
    let report = registry.load_plugins(&ConfigPlugins::new(config.plugins));
    for name in &report.loaded {
        info!("Loaded plugin {name}");
    }

    // clap only lets the positionals be absent together with --list-formats.
    match (&cli.source, &cli.destination) {
        (Some(source), Some(destination)) if !cli.list_formats => {
            let converter = Converter::with_default(&registry, default);
            let report = converter.convert(source, destination)?;
            info!(
                reader = report.reader.format_name(),
                writer = report.writer.format_name(),
                "converted {} to {}",
                source.display(),
                destination.display()
            );
        }
        _ => print_formats(&registry, default.as_ref()),
    }
    Ok(())
}

fn print_formats(registry: &FormatRegistry, default: &dyn MapFormat) {
    for (index, format) in registry.handlers().iter().enumerate() {
        let caps = format.capabilities();
        let access = match (caps.read, caps.write) {
            (true, true) => "read/write",
            (true, false) => "read",
            (false, true) => "write",
            (false, false) => "-",
        };
        println!("{:>2}. {} [{access}]", index + 1, format.name_filter());
    }
    println!("default: {}", default.name_filter());
}
