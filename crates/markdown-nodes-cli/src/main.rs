use anyhow::{Context, Result};
use markdown_nodes_config::Config;
use markdown_nodes_engine::generate_nodes_with;
use std::{env, path::PathBuf, process};

mod outline;

struct Args {
    file: PathBuf,
    config: Option<PathBuf>,
    debug: bool,
}

fn usage(program: &str) -> ! {
    eprintln!("Usage: {program} <markdown-file> [--config <path>] [--debug]");
    process::exit(1);
}

fn parse_args() -> Args {
    let mut args = env::args();
    let program = args.next().unwrap_or_else(|| "markdown-nodes".to_string());

    let mut file = None;
    let mut config = None;
    let mut debug = false;
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--config" => match args.next() {
                Some(path) => config = Some(PathBuf::from(path)),
                None => usage(&program),
            },
            "--debug" => debug = true,
            _ if file.is_none() && !arg.starts_with("--") => file = Some(PathBuf::from(arg)),
            _ => usage(&program),
        }
    }

    match file {
        Some(file) => Args {
            file,
            config,
            debug,
        },
        None => usage(&program),
    }
}

fn load_config(path: Option<PathBuf>) -> Result<Config> {
    let config_path = match path {
        Some(path) => Config::expand_path(&path).unwrap_or(path),
        None => Config::config_path(),
    };
    log::debug!("Config path: {}", config_path.display());

    let config = Config::load_from_path(&config_path)
        .with_context(|| format!("Failed to load config file '{}'", config_path.display()))?;
    Ok(config.unwrap_or_default())
}

fn main() -> Result<()> {
    env_logger::Builder::new()
        .filter_level(log::LevelFilter::Info)
        .parse_default_env()
        .init();

    let args = parse_args();
    let config = load_config(args.config)?;

    let markdown = std::fs::read_to_string(&args.file)
        .with_context(|| format!("Failed to read '{}'", args.file.display()))?;
    let nodes = generate_nodes_with(&markdown, &config.generator)
        .with_context(|| format!("Failed to generate nodes for '{}'", args.file.display()))?;

    if args.debug {
        println!("{nodes:#?}");
    } else {
        println!("{}", outline::render(&nodes));
    }
    Ok(())
}
