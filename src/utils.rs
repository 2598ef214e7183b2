//! Supporting helpers: message prefixes, path handling and logging setup.

use owo_colors::OwoColorize;
use std::io::Write;
use std::path::{Component, Path, PathBuf};

fn colors() -> bool {
    std::env::var_os("NO_COLOR").is_none()
}

pub fn error_prefix() -> String {
    if colors() {
        "error:".red().bold().to_string()
    } else {
        "error:".to_string()
    }
}

pub fn note_prefix() -> String {
    if colors() {
        "note:".yellow().bold().to_string()
    } else {
        "note:".to_string()
    }
}

pub fn info_prefix() -> String {
    if colors() {
        "info:".blue().bold().to_string()
    } else {
        "info:".to_string()
    }
}

/// Lexically normalize a path: drop `.` segments and fold `..` into the
/// preceding segment. The filesystem is not consulted.
pub fn normalize_path(path: &Path) -> PathBuf {
    let mut out: Vec<Component> = Vec::new();
    for comp in path.components() {
        match comp {
            Component::CurDir => {}
            Component::ParentDir => match out.last() {
                Some(Component::Normal(_)) => {
                    out.pop();
                }
                Some(Component::RootDir) | Some(Component::Prefix(_)) => {}
                _ => out.push(comp),
            },
            other => out.push(other),
        }
    }
    if out.is_empty() {
        return PathBuf::from(".");
    }
    out.iter().collect()
}

/// Path shown to the user: relative to the working directory when possible.
pub fn rel_to_wd(path: &Path) -> String {
    let rel = std::env::current_dir()
        .ok()
        .and_then(|wd| pathdiff::diff_paths(path, wd))
        .filter(|p| !p.as_os_str().is_empty() && !p.starts_with(".."));
    rel.as_deref()
        .unwrap_or(path)
        .to_string_lossy()
        .to_string()
}

/// Install the `env_logger` backend. `debug` raises the default level from
/// `warn` to `debug`; `RUST_LOG` still wins when set.
pub fn init_logging(debug: bool) {
    let level = if debug {
        log::LevelFilter::Debug
    } else {
        log::LevelFilter::Warn
    };
    let _ = env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .format(|buf, record| writeln!(buf, "[phpcheck] {}", record.args()))
        .try_init();
}
