use clap::{Parser, Subcommand};
use docmodel::config::RunnerConfig;
use docmodel::subprocess::SubprocessRunner;
use harness::project::load_project;
use harness::report::{run_program_tests, ConsoleReporter, RunSummary};
use std::path::{Path, PathBuf};
use std::time::Instant;
use tracing::info;

#[derive(Parser)]
#[command(name = "doctest")]
#[command(about = "Runs documentation examples through an external evaluator")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run all doctests for the package at the given path
    Run {
        /// Directory to search for the package manifest
        #[arg(default_value = ".")]
        path: PathBuf,
        /// Linked model document (defaults to the manifest's doctestModel
        /// field, then docmodel.json beside the manifest)
        #[arg(short, long)]
        model: Option<PathBuf>,
        /// Evaluator command invoked once per test unit
        #[arg(short, long)]
        runner: Option<String>,
        /// Extra argument passed to the evaluator (repeatable)
        #[arg(long = "runner-arg")]
        runner_args: Vec<String>,
    },
    /// List extracted doctests without running them
    List {
        /// Directory to search for the package manifest
        #[arg(default_value = ".")]
        path: PathBuf,
        /// Linked model document override
        #[arg(short, long)]
        model: Option<PathBuf>,
        /// Emit the extracted tree as JSON
        #[arg(long)]
        json: bool,
    },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Run {
            path,
            model,
            runner,
            runner_args,
        } => {
            let summary = run_doctests(&path, model.as_deref(), runner, runner_args).await?;
            if summary.has_failures() {
                std::process::exit(1);
            }
        }
        Commands::List { path, model, json } => {
            list_doctests(&path, model.as_deref(), json)?;
        }
    }

    Ok(())
}

async fn run_doctests(
    path: &Path,
    model: Option<&Path>,
    runner_command: Option<String>,
    runner_args: Vec<String>,
) -> Result<RunSummary, Box<dyn std::error::Error>> {
    let (descriptor, tests) = load_project(path, model)?;

    let mut config = RunnerConfig::default();
    if let Some(command) = runner_command {
        config = config.with_command(command);
    }
    if !runner_args.is_empty() {
        config = config.with_args(runner_args);
    }
    let runner = SubprocessRunner::new(config)?;

    let package = descriptor
        .manifest
        .name
        .clone()
        .unwrap_or_else(|| descriptor.root().display().to_string());
    info!(
        "Running doctests for {} ({} files, {} test units)",
        package,
        tests.files.len(),
        tests.total_units()
    );

    let reporter = ConsoleReporter;
    let started = Instant::now();
    let summary = run_program_tests(&tests, &runner, &reporter).await;
    let elapsed = started.elapsed();

    println!();
    println!(
        "{} passed, {} failed, {} skipped across {} files in {:.2?}",
        summary.symbols_passed,
        summary.symbols_failed,
        summary.symbols_skipped,
        tests.files.len(),
        elapsed
    );

    Ok(summary)
}

fn list_doctests(
    path: &Path,
    model: Option<&Path>,
    json: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let (_descriptor, tests) = load_project(path, model)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&tests)?);
        return Ok(());
    }

    for file in &tests.files {
        if !file.has_tests() {
            println!("{}: no doctests", file.module_name);
            continue;
        }
        println!("{}:", file.module_name);
        for symbol in &file.symbols {
            let noun = if symbol.units.len() == 1 { "test" } else { "tests" };
            println!("  {} ({} {})", symbol.name, symbol.units.len(), noun);
        }
    }

    println!();
    println!(
        "{} symbols, {} test units",
        tests.total_symbols(),
        tests.total_units()
    );

    Ok(())
}
