use anyhow::{Context, Result};
use clap::Parser;

use distguard::cli::args::{Cli, Commands, OutputFormat};
use distguard::cli::output;
use distguard::common::config::DistConfig;
use distguard::guard::{
    self, manifest, CollectingNotifier, ConsoleNotifier, Notice, Notify, SilentNotifier,
};

fn main() -> Result<()> {
    let cli = Cli::parse();

    if cli.no_color {
        colored::control::set_override(false);
    }

    if cli.verbose {
        tracing_subscriber::fmt()
            .with_env_filter("distguard=debug")
            .with_writer(std::io::stderr)
            .init();
    }

    match cli.command {
        Commands::Check => cmd_check(&cli),
        Commands::Status => cmd_status(&cli),

        Commands::Completions { ref shell } => {
            use clap::CommandFactory;
            let mut cmd = Cli::command();
            let shell = match shell {
                distguard::cli::args::CompletionShell::Bash => clap_complete::Shell::Bash,
                distguard::cli::args::CompletionShell::Zsh => clap_complete::Shell::Zsh,
                distguard::cli::args::CompletionShell::Fish => clap_complete::Shell::Fish,
            };
            clap_complete::generate(shell, &mut cmd, "distguard", &mut std::io::stdout());
            Ok(())
        }
    }
}

fn resolve(cli: &Cli) -> Result<(DistConfig, String)> {
    cli.resolve().context("Failed to load configuration")
}

/// Manifest location, if the config names a cache dir
fn manifest_path_for(config: &DistConfig) -> Option<std::path::PathBuf> {
    config
        .has_required_dirs()
        .then(|| manifest::manifest_path(&config.cache_dir))
}

// ─── Check ────────────────────────────────────────────────────────────────────

fn cmd_check(cli: &Cli) -> Result<()> {
    let (config, version) = resolve(cli)?;
    let manifest_path = manifest_path_for(&config);

    match cli.format {
        OutputFormat::Json => {
            let notifier = CollectingNotifier::new();
            let outcome = run_check(&config, &version, &notifier)?;
            output::print_check_json(&outcome, manifest_path.as_deref(), &notifier.notices());
        }
        OutputFormat::Quiet => {
            let outcome = run_check(&config, &version, &SilentNotifier)?;
            output::print_check_quiet(&outcome);
        }
        OutputFormat::Human if cli.quiet => {
            run_check(&config, &version, &SilentNotifier)?;
        }
        OutputFormat::Human => {
            let outcome = run_check(&config, &version, &ConsoleNotifier)?;
            output::print_check_result(&outcome, manifest_path.as_deref());
        }
    }

    Ok(())
}

fn run_check(config: &DistConfig, version: &str, notifier: &dyn Notify) -> Result<guard::Outcome> {
    guard::validate_dist_with(config, version, notifier).with_context(|| {
        format!(
            "Failed to validate dist folder: {}",
            config.dist_dir.display()
        )
    })
}

// ─── Status ───────────────────────────────────────────────────────────────────

fn cmd_status(cli: &Cli) -> Result<()> {
    let (config, version) = resolve(cli)?;

    let Some(inspection) = guard::inspect(&config, &version) else {
        if !cli.is_quiet() {
            ConsoleNotifier.notify(&Notice::MissingDirs);
        }
        return Ok(());
    };
    let manifest_path = manifest::manifest_path(&config.cache_dir);

    match cli.format {
        OutputFormat::Json => {
            output::print_status_json(&inspection, &config.dist_dir, &manifest_path)
        }
        OutputFormat::Quiet => {
            println!("{}", if inspection.staleness.is_stale() { "stale" } else { "fresh" })
        }
        OutputFormat::Human if cli.quiet => {}
        OutputFormat::Human => output::print_status(&inspection, &config.dist_dir, &manifest_path),
    }

    Ok(())
}
