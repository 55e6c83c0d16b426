use anyhow::Result;
use clap::{CommandFactory, Parser};

use scene_outliner::cli::{Cli, Command};
use scene_outliner::commands;
use scene_outliner::config::Config;

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging based on verbosity
    init_logging(cli.verbose, cli.quiet);

    // Load configuration
    let mut config = Config::load(cli.config.as_deref())?;

    tracing::debug!(?config, "Loaded configuration");

    // Dispatch to subcommand
    match cli.command {
        Command::Show(args) => {
            tracing::info!(?args, "Printing outline");
            commands::show::run(args, &config)?;
        }
        Command::New(args) => {
            tracing::info!(?args, "Writing sample project");
            commands::new::run(args)?;
        }
        Command::Tui(args) => {
            tracing::info!(?args, "Starting TUI");
            if args.no_mouse {
                config.tui.mouse = false;
            }
            scene_outliner::tui::run(args.path, config)?;
        }
        Command::Completions(args) => {
            let mut cmd = Cli::command();
            let name = cmd.get_name().to_string();
            clap_complete::generate(args.shell, &mut cmd, name, &mut std::io::stdout());
        }
        Command::Man => {
            clap_mangen::Man::new(Cli::command()).render(&mut std::io::stdout())?;
        }
    }

    Ok(())
}

fn init_logging(verbosity: u8, quiet: bool) {
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    let level = if quiet {
        "warn"
    } else {
        match verbosity {
            0 => "warn",
            1 => "info",
            2 => "debug",
            _ => "trace",
        }
    };

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("scene_outliner={}", level)));

    tracing_subscriber::registry()
        .with(fmt::layer().with_target(false).with_writer(std::io::stderr))
        .with(filter)
        .init();
}
