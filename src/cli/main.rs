use std::path::PathBuf;
use std::time::Instant;

use clap::Parser;

use imgorient::action::ActionKind;
use imgorient::error::Error;
use imgorient::pipeline::{self, RunOptions};

#[derive(Parser, Debug)]
#[command(
    name = "imgorient",
    version,
    about = "Rotate, mirror, or flip an image, optionally keeping its metadata tags",
    disable_help_flag = true
)]
struct Cli {
    /// The input image.
    #[arg(value_name = "INPUT")]
    input: PathBuf,

    /// The result of the action.
    #[arg(value_name = "OUTPUT")]
    output: PathBuf,

    /// Action to take
    #[arg(short, long, value_enum, ignore_case = true)]
    action: ActionKind,

    /// Keep any metadata tags
    #[arg(short = 't', long = "keep-tags")]
    keep_tags: bool,

    /// Verbose output
    #[arg(short, long)]
    verbose: bool,

    /// Print help
    #[arg(short = '?', long = "help", action = clap::ArgAction::Help)]
    help: Option<bool>,
}

#[tokio::main]
async fn main() {
    // The stopwatch spans the whole run and feeds the final report line,
    // printed on success and failure alike.
    let stopwatch = Instant::now();
    let code = execute().await;
    println!("Completed in {}ms.", stopwatch.elapsed().as_millis());
    std::process::exit(code);
}

async fn execute() -> i32 {
    let cli = Cli::parse();

    let log_level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level))
        .format_timestamp(None)
        .init();

    let options = RunOptions {
        input: cli.input,
        output: cli.output,
        action: cli.action,
        keep_tags: cli.keep_tags,
    };

    let outcome = tokio::select! {
        outcome = pipeline::run(&options) => outcome,
        _ = tokio::signal::ctrl_c() => {
            println!("Interrupted; '{}' may be partially written", options.output.display());
            return -500;
        }
    };

    match outcome {
        Ok(report) => {
            log::info!(
                "{}: wrote {}x{} {:?} image to '{}'",
                options.action,
                report.output_width,
                report.output_height,
                report.format,
                options.output.display()
            );
            if let Some(copied) = report.tags_copied {
                log::info!("Copied {copied} metadata tag blocks");
            }
            0
        }
        Err(error) => {
            let code = error.exit_code();
            match error {
                Error::InputNotFound(_) | Error::NotAnImage(_) | Error::UnsupportedMetadata(_) => {
                    println!("{error}");
                }
                Error::Io(fault) => {
                    println!("Encountered I/O error:");
                    println!("{fault}");
                }
                Error::Other(fault) => {
                    println!("Encountered unexpected error:");
                    println!("{fault:?}");
                }
            }
            code
        }
    }
}
