mod server;
mod template;

use anyhow::Result;
use hwp_autofill_config::Config;
use hwp_autofill_engine::{DocumentModel, EngineOptions, Session, SimulatedConnector};
use std::io::{self, BufWriter};
use std::path::{Path, PathBuf};
use std::{env, process};

use server::{Defaults, Server};

fn usage(program: &str) {
    eprintln!("Usage:");
    eprintln!("  {program} serve [document.json]");
    eprintln!("  {program} template <template.json> <data.json | inline-json> <output.json>");
    eprintln!("  {program} fields <document.json>");
    eprintln!("  {program} init-config");
}

fn main() {
    let args: Vec<String> = env::args().collect();
    let program = args.first().map_or("hwp-autofill", String::as_str);
    let config_path = Config::config_path();

    let config = match Config::load_or_default() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: Failed to load config file: {e}");
            eprintln!("Fix or remove {}", config_path.display());
            process::exit(1);
        }
    };

    // stdout carries protocol responses, so logs go to stderr
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(&config.log_filter))
        .target(env_logger::Target::Stderr)
        .init();

    let result = match args.get(1).map(String::as_str) {
        Some("serve") if args.len() <= 3 => serve(args.get(2).map(PathBuf::from), &config),
        Some("template") if args.len() == 5 => {
            template::run(Path::new(&args[2]), &args[3], Path::new(&args[4])).map(|count| {
                println!("Filled {count} fields into {}", args[4]);
            })
        }
        Some("fields") if args.len() == 3 => list_fields(Path::new(&args[2])),
        Some("init-config") if args.len() == 2 => init_config(&config_path),
        _ => {
            usage(program);
            process::exit(1);
        }
    };

    if let Err(e) = result {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}

fn serve(document: Option<PathBuf>, config: &Config) -> Result<()> {
    let defaults = match Defaults::from_config(config) {
        Ok(defaults) => defaults,
        Err(e) => anyhow::bail!(
            "Invalid defaults in config file '{}': {e}",
            Config::config_path().display()
        ),
    };

    let connector = match document.or_else(|| config.document_path.clone()) {
        Some(path) => {
            log::info!("Serving {}", path.display());
            SimulatedConnector::from_path(&path)?
        }
        None => {
            log::info!("Serving an empty document; use the 'open' tool to load one");
            SimulatedConnector::new(DocumentModel::default())
        }
    };

    let options = EngineOptions {
        detect_table_edges: config.detect_table_edges,
    };
    let mut server = Server::new(Session::with_options(connector, options), defaults);

    let stdin = io::stdin();
    let stdout = io::stdout();
    server.run(stdin.lock(), BufWriter::new(stdout.lock()))
}

fn list_fields(document: &Path) -> Result<()> {
    let model = DocumentModel::load(document)?;
    let mut session = Session::new(SimulatedConnector::new(model));

    for name in session.list_fields()? {
        println!("{name}");
    }
    Ok(())
}

fn init_config(config_path: &Path) -> Result<()> {
    if config_path.exists() {
        anyhow::bail!("Config file already exists at {}", config_path.display());
    }
    Config::default().save()?;
    log::info!("Created default config file at {}", config_path.display());
    println!("Wrote default config to {}", config_path.display());
    Ok(())
}
