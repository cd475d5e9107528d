//! CODEOWNERS Resolver CLI
//!
//! A command-line tool that shows which CODEOWNERS rule owns each file.

use clap::Parser;
use std::io::{self, IsTerminal};
use std::path::Path;
use std::process::ExitCode as StdExitCode;
use tracing::{debug, error, info, warn, Level};
use tracing_subscriber::EnvFilter;

mod cli;

use cli::Args;
use cli::config::{ExitCode, Targets, ValidatedConfig};
use cli::output::{FileOwnership, HumanOutput, OwnershipResults, State};
use codeowners_resolver_core::walk::list_project_files;
use codeowners_resolver_core::{CodeOwnersResolver, ResolutionOutcome};

fn main() -> StdExitCode {
    // Parse command-line arguments
    let args = Args::parse();

    // Initialize tracing
    init_tracing(args.verbose, args.json);

    let exit_code = run(args);
    StdExitCode::from(i32::from(exit_code) as u8)
}

/// Initialize tracing based on verbosity level.
fn init_tracing(verbosity: u8, json_output: bool) {
    // Don't output logs when using JSON output mode
    if json_output {
        return;
    }

    let level = match verbosity {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    };

    let filter = EnvFilter::from_default_env()
        .add_directive(level.into())
        .add_directive("ignore=warn".parse().unwrap())
        .add_directive("globset=warn".parse().unwrap());

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(io::stderr)
        .with_ansi(io::stderr().is_terminal())
        .init();
}

/// Run the resolver with the given arguments.
fn run(args: Args) -> ExitCode {
    let mut stdout = io::stdout().lock();
    let mut stderr = io::stderr().lock();

    // Validate configuration
    let config = match ValidatedConfig::from_args(&args) {
        Ok(config) => config,
        Err(e) => {
            let use_colors = !args.json && io::stderr().is_terminal();
            let _ = HumanOutput::new(&mut stderr, use_colors).write_error(&e.to_string());
            return ExitCode::StartupFailure;
        }
    };

    let use_colors = !config.json_output && io::stdout().is_terminal();

    debug!("Validated configuration: {:?}", config);
    info!("Project path: {}", config.project_path.display());

    let files = match &config.targets {
        Targets::Paths(paths) => paths.clone(),
        Targets::Project(walk_config) => list_project_files(&config.project_path, walk_config),
    };
    info!("Resolving owners of {} file(s)", files.len());

    let mut resolver = CodeOwnersResolver::with_config(config.resolver_config.clone());
    let mut results = OwnershipResults::new();

    for file in &files {
        let outcome = resolver.get_file_code_owner_state(&config.project_path, file);
        results.add(describe(&resolver, &config, file, &outcome));
    }

    if results
        .files()
        .iter()
        .all(|f| f.state == State::NoRuleFile)
        && !files.is_empty()
    {
        warn!(
            "No CODEOWNERS file found in '{}'",
            config.project_path.display()
        );
    }

    // Output results
    let written = if config.json_output {
        results.write_json(&mut stdout, config.unowned_only)
    } else {
        results.write_human(&mut stdout, use_colors, config.unowned_only)
    };
    if let Err(e) = written {
        error!("Failed to write output: {}", e);
        return ExitCode::StartupFailure;
    }

    // Determine exit code
    config.exit_code_for_results(results.unowned_count())
}

/// Builds the printable ownership of one file.
fn describe(
    resolver: &CodeOwnersResolver,
    config: &ValidatedConfig,
    file: &Path,
    outcome: &ResolutionOutcome,
) -> FileOwnership {
    let path = file
        .strip_prefix(&config.project_path)
        .unwrap_or(file)
        .display()
        .to_string();

    let Some(rule) = outcome.rule() else {
        return FileOwnership {
            path,
            owners: Vec::new(),
            pattern: None,
            rule_file: None,
            line: None,
            state: State::from(outcome),
        };
    };

    let owners = if config.abbreviate {
        rule.owners.clone()
    } else {
        resolver.true_owners(rule)
    };

    FileOwnership {
        path,
        owners,
        pattern: Some(rule.pattern.clone()),
        rule_file: resolver.get_code_owner_file_for_rule(rule),
        line: Some(rule.line_number + 1),
        state: State::Owned,
    }
}
