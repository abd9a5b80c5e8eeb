//! Config file location.

use std::path::{Path, PathBuf};

use anyhow::{Result, bail};

/// File name inside the config directory.
const CONFIG_FILE: &str = "config.toml";

/// Application directory under the user config root.
const APP_DIR: &str = "reelmeta";

/// Resolves the config file path from the process environment.
///
/// # Errors
///
/// Returns an error if `dir` is `None` and neither `XDG_CONFIG_HOME` nor
/// `HOME` is set.
pub fn resolve_config_path(dir: Option<&Path>) -> Result<PathBuf> {
    resolve_with(dir, |name| std::env::var_os(name).map(PathBuf::from))
}

/// Picks the first of `{dir}`, `$XDG_CONFIG_HOME/reelmeta` and
/// `$HOME/.config/reelmeta`, then appends [`CONFIG_FILE`].
///
/// Empty variables count as unset.
fn resolve_with(dir: Option<&Path>, lookup: impl Fn(&str) -> Option<PathBuf>) -> Result<PathBuf> {
    let set = |name: &str| lookup(name).filter(|p| !p.as_os_str().is_empty());
    let base = match dir {
        Some(dir) => dir.to_path_buf(),
        None => match (set("XDG_CONFIG_HOME"), set("HOME")) {
            (Some(xdg), _) => xdg.join(APP_DIR),
            (None, Some(home)) => home.join(".config").join(APP_DIR),
            (None, None) => bail!("cannot locate the config directory: set HOME or pass --dir"),
        },
    };
    Ok(base.join(CONFIG_FILE))
}
