//! phpcheck CLI binary entry point.
//! Resolves settings, expands targets, runs the checker and prints results.

use clap::Parser;
use phpcheck::cli::{Cli, Commands};
use phpcheck::commands::Checker;
use phpcheck::config::{self, Overrides, Settings};
use phpcheck::models::Target;
use phpcheck::output::{self, FileReport};
use phpcheck::runner::SystemRunner;
use phpcheck::terminal::TerminalSurface;
use phpcheck::utils;
use rayon::prelude::*;
use std::path::PathBuf;
use std::sync::Arc;

fn main() {
    let cli = Cli::parse();
    match cli.cmd {
        Commands::Version => {
            println!("{}", env!("CARGO_PKG_VERSION"));
        }
        Commands::Config { repo_root } => {
            let (settings, _, _) = resolve_or_exit(repo_root.as_deref(), &Overrides::default());
            match serde_json::to_string_pretty(&settings) {
                Ok(s) => println!("{}", s),
                Err(e) => {
                    eprintln!("{} {}", utils::error_prefix(), e);
                    std::process::exit(2);
                }
            }
        }
        Commands::Sniff {
            repo_root,
            output,
            pick,
            on_save,
            debug,
            no_syntax,
            no_style,
            no_complexity,
            paths,
        } => {
            let output = output.unwrap_or_else(|| "human".to_string());
            let interactive = pick && output != "json";
            let ov = Overrides {
                debug: debug.then_some(true),
                syntax: no_syntax.then_some(false),
                style: no_style.then_some(false),
                complexity: no_complexity.then_some(false),
                // the numbered list only makes sense when a choice is read back
                quick_panel: if interactive { None } else { Some(false) },
            };
            let (settings, _, found) = resolve_or_exit(repo_root.as_deref(), &ov);
            utils::init_logging(settings.debug);
            if !found && output != "json" {
                eprintln!(
                    "{} {}",
                    utils::note_prefix(),
                    "No phpcheck.toml found; using defaults."
                );
            }

            let files = expand_paths(&paths);
            let fallback = settings.fallback_encoding.clone();
            let gutter = settings.display.gutter_marks;
            let checker = Checker::new(settings, Arc::new(SystemRunner));

            let targets: Vec<Target> = files
                .into_iter()
                .map(|p| Target::for_file(p, fallback.clone()))
                .filter(|t| {
                    let ok = checker.should_execute(t);
                    if !ok {
                        log::info!("skipping {}: extension not enabled", t.id);
                    }
                    ok
                })
                .collect();
            if targets.is_empty() {
                eprintln!("{} {}", utils::info_prefix(), "No matching files to check.");
                return;
            }

            let check_one = |t: &Target| check_file(&checker, t, interactive, on_save, gutter);
            // prompts must not interleave, so interactive runs stay sequential
            let results: Vec<FileReport> = if interactive {
                targets.iter().filter_map(check_one).collect()
            } else {
                targets.par_iter().filter_map(check_one).collect()
            };

            output::print_reports(&results, &output);
            if output::summarize(&results).total() > 0 {
                std::process::exit(1);
            }
        }
    }
}

fn resolve_or_exit(repo_root: Option<&str>, ov: &Overrides) -> (Settings, PathBuf, bool) {
    match config::resolve_settings(repo_root, ov) {
        Ok(r) => r,
        Err(e) => {
            eprintln!("{} {}", utils::error_prefix(), e);
            std::process::exit(2);
        }
    }
}

/// Expand glob patterns; plain paths pass through untouched.
fn expand_paths(args: &[String]) -> Vec<PathBuf> {
    let mut out = Vec::new();
    for arg in args {
        if !arg.contains(['*', '?', '[']) {
            out.push(PathBuf::from(arg));
            continue;
        }
        match glob::glob(arg) {
            Ok(entries) => out.extend(entries.flatten()),
            Err(e) => {
                eprintln!(
                    "{} {}",
                    utils::error_prefix(),
                    format!("invalid pattern '{}': {}", arg, e)
                );
                std::process::exit(2);
            }
        }
    }
    out
}

fn check_file(
    checker: &Checker,
    target: &Target,
    interactive: bool,
    on_save: bool,
    gutter: bool,
) -> Option<FileReport> {
    let path = target.path()?;
    let label = utils::rel_to_wd(path);
    let surface = match TerminalSurface::open(path, label.clone(), interactive) {
        Ok(s) => Arc::new(s),
        Err(e) => {
            eprintln!(
                "{} {}",
                utils::error_prefix(),
                format!("cannot read {}: {}", label, e)
            );
            return None;
        }
    };
    let report = if on_save {
        match checker.on_post_save(target, surface.clone()) {
            Some(handle) => handle.join()?,
            None => {
                eprintln!(
                    "{} {}",
                    utils::note_prefix(),
                    "run_on_save is disabled; nothing to do."
                );
                return None;
            }
        }
    } else {
        checker.sniff_file(target, surface.as_ref())?
    };
    Some(FileReport {
        file: label,
        report,
        gutter: gutter.then(|| surface.render_gutter()),
    })
}
