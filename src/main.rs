use anyhow::Result;
use clap::Parser;
use colored::Colorize;
use tracing_subscriber::EnvFilter;

use tend::cli::args::{Cli, Commands};
use tend::cli::commands::{self, Context};
use tend::config::{ColorSetting, Config, Paths};
use tend::core::SystemClock;
use tend::storage::Database;

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    if let Err(e) = run(cli) {
        eprintln!("{}: {:#}", "error".red().bold(), e);
        std::process::exit(1);
    }
}

/// Logs go to stderr so JSON on stdout stays parseable.
fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn open_store(paths: &Paths) -> Result<Database> {
    paths.ensure_dirs()?;
    Ok(Database::open_at(&paths.database)?)
}

fn run(cli: Cli) -> Result<()> {
    if let Commands::Completions { shell } = cli.command {
        print!("{}", commands::completions(shell)?);
        return Ok(());
    }

    let paths = Paths::resolve(cli.home)?;
    let config = Config::load_from_path(&paths.config_file)?;

    match config.general.color {
        ColorSetting::Always => colored::control::set_override(true),
        ColorSetting::Never => colored::control::set_override(false),
        ColorSetting::Auto => {},
    }

    let format = cli.output.unwrap_or(config.general.default_output);
    let ctx = Context::new(config, format, SystemClock);

    let output = match cli.command {
        Commands::Parse { text } => commands::parse(&ctx, &text)?,
        Commands::Suggest { partial } => commands::suggest(&ctx, &partial)?,
        Commands::Extract { text } => commands::extract(&ctx, &text)?,
        Commands::Add(args) => commands::add(&mut open_store(&paths)?, &ctx, args)?,
        Commands::List { all } => commands::list(&open_store(&paths)?, &ctx, all)?,
        Commands::Show { id } => commands::show(&open_store(&paths)?, &ctx, &id)?,
        Commands::Done { id } => commands::done(&mut open_store(&paths)?, &ctx, &id)?,
        Commands::Reopen { id } => commands::reopen(&mut open_store(&paths)?, &ctx, &id)?,
        Commands::Delete { id } => commands::delete(&mut open_store(&paths)?, &ctx, &id)?,
        Commands::Completions { .. } => String::new(),
    };

    if !output.is_empty() {
        println!("{output}");
    }
    Ok(())
}
