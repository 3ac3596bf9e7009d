use anyhow::{Context, Result};
use clap::{Arg, ArgMatches, Command, ValueHint};
use log::LevelFilter;
use std::path::PathBuf;
use std::sync::Arc;

use oncopredict_classifiers::persistence::ArtifactStore;
use oncopredict_classifiers::report::training_report;
use oncopredict_cli::bootstrap::{load_or_train, train_and_persist};
use oncopredict_cli::config::AppConfig;
use oncopredict_cli::server;

fn config_arg() -> Arg {
    Arg::new("config")
        .short('c')
        .long("config")
        .help("Path to a JSON configuration file")
        .value_parser(clap::value_parser!(PathBuf))
        .value_hint(ValueHint::FilePath)
}

fn data_arg() -> Arg {
    Arg::new("data")
        .short('d')
        .long("data")
        .help(
            "Path to the labelled dataset (*.csv, *.tsv or UCI wdbc.data). \
             Overrides the dataset specified in the configuration file.",
        )
        .value_parser(clap::value_parser!(PathBuf))
        .value_hint(ValueHint::FilePath)
}

fn models_dir_arg() -> Arg {
    Arg::new("models_dir")
        .short('m')
        .long("models-dir")
        .help("Directory holding scaler.json and model.json")
        .value_parser(clap::value_parser!(PathBuf))
        .value_hint(ValueHint::DirPath)
}

fn main() -> Result<()> {
    env_logger::Builder::default()
        .filter_level(LevelFilter::Error)
        .parse_env(env_logger::Env::default().filter_or("ONCOPREDICT_LOG", "error,oncopredict=info"))
        .init();

    let matches = Command::new("oncopredict")
        .version(clap::crate_version!())
        .about("Breast cancer diagnosis classifier: train, inspect and serve predictions")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .subcommand(
            Command::new("serve")
                .about("Load the saved model (training it first if needed) and serve the web app")
                .arg(config_arg())
                .arg(data_arg())
                .arg(models_dir_arg())
                .arg(
                    Arg::new("port")
                        .short('p')
                        .long("port")
                        .help("Port to listen on. Overrides PORT and the configuration file.")
                        .value_parser(clap::value_parser!(u16)),
                )
                .arg(
                    Arg::new("host")
                        .long("host")
                        .help("Address to bind")
                        .value_parser(clap::builder::NonEmptyStringValueParser::new())
                        .value_hint(ValueHint::Hostname),
                ),
        )
        .subcommand(
            Command::new("train")
                .about("Train every candidate, keep the best and overwrite the saved model")
                .arg(config_arg())
                .arg(data_arg())
                .arg(models_dir_arg())
                .arg(
                    Arg::new("report")
                        .short('r')
                        .long("report")
                        .help("Write an HTML training report to this path")
                        .value_parser(clap::value_parser!(PathBuf))
                        .value_hint(ValueHint::FilePath),
                ),
        )
        .subcommand(
            Command::new("inspect")
                .about("Print the type and feature count of the saved model")
                .arg(models_dir_arg()),
        )
        .get_matches();

    match matches.subcommand() {
        Some(("serve", sub_m)) => run_serve(sub_m),
        Some(("train", sub_m)) => run_train(sub_m),
        Some(("inspect", sub_m)) => run_inspect(sub_m),
        _ => unreachable!("Subcommand is required by CLI configuration"),
    }
}

fn run_serve(matches: &ArgMatches) -> Result<()> {
    let config = AppConfig::from_arguments(matches)?;
    let address = config.bind_address();

    let runtime = tokio::runtime::Runtime::new().context("Failed to start async runtime")?;
    runtime.block_on(async move {
        let ctx = tokio::task::spawn_blocking(move || load_or_train(&config))
            .await
            .context("Startup task panicked")??;
        server::serve(Arc::new(ctx), &address).await
    })
}

fn run_train(matches: &ArgMatches) -> Result<()> {
    let config = AppConfig::from_arguments(matches)?;
    log::info!("Training on {}", config.dataset_path.display());

    let (predictor, report) = match train_and_persist(&config) {
        Ok(trained) => trained,
        Err(e) => {
            log::error!("Training failed: {:#}", e);
            std::process::exit(1)
        }
    };

    if let Some(path) = matches.get_one::<PathBuf>("report") {
        training_report(&report, clap::crate_version!())
            .save_to_file(path)
            .with_context(|| format!("Failed to write report {}", path.display()))?;
        log::info!("Report written to {}", path.display());
    }

    println!(
        "Selected {} (test accuracy {:.3}, test F1 {:.3}); saved to {}",
        predictor.model_type(),
        report.test.accuracy,
        report.test.f1,
        config.models_dir.display()
    );
    Ok(())
}

fn run_inspect(matches: &ArgMatches) -> Result<()> {
    let dir = matches
        .get_one::<PathBuf>("models_dir")
        .cloned()
        .unwrap_or_else(|| AppConfig::default().models_dir);
    let store = ArtifactStore::new(dir);
    if !store.exists() {
        anyhow::bail!("No saved model in {}", store.dir().display());
    }

    let (scaler, model) = store.load()?;
    println!("Currently saved model type: {}", model.kind());
    println!("Features: {}", scaler.n_features());
    Ok(())
}
