//! Browser executable discovery.
//!
//! Locates a Chromium-family binary to launch, in the following order:
//!
//! 1. `EXTLAUNCH_BROWSER` environment variable (runtime override)
//! 2. Well-known binary names on `PATH`
//! 3. Platform-specific install locations
//!
//! The runtime override takes precedence so environments with unusual
//! installs (containers, Nix, portable builds) can point at any binary.

use crate::error::{Error, Result};
use std::path::{Path, PathBuf};
use tracing::warn;

/// Binary names probed on `PATH`, most specific first.
const PATH_CANDIDATES: &[&str] = &[
    "chromium",
    "chromium-browser",
    "google-chrome",
    "google-chrome-stable",
    "chrome",
];

/// Locate a browser executable to launch.
///
/// # Errors
///
/// Returns `Error::BrowserNotFound` if no candidate exists in any of the
/// search locations.
pub fn find_browser_executable() -> Result<PathBuf> {
    if let Ok(override_path) = std::env::var("EXTLAUNCH_BROWSER") {
        let path = PathBuf::from(override_path);
        if path.is_file() {
            return Ok(path);
        }
        warn!(
            target: "extlaunch",
            path = %path.display(),
            "EXTLAUNCH_BROWSER is set but does not point at a file; falling back"
        );
    }

    if let Some(path) = find_on_path() {
        return Ok(path);
    }

    if let Some(path) = find_in_known_locations() {
        return Ok(path);
    }

    Err(Error::BrowserNotFound)
}

fn find_on_path() -> Option<PathBuf> {
    let path_var = std::env::var_os("PATH")?;
    for dir in std::env::split_paths(&path_var) {
        for name in PATH_CANDIDATES {
            let candidate = dir.join(name);
            if is_executable(&candidate) {
                return Some(candidate);
            }
        }
    }
    None
}

fn find_in_known_locations() -> Option<PathBuf> {
    let locations: &[&str] = {
        #[cfg(target_os = "linux")]
        {
            &[
                "/usr/bin/chromium",
                "/usr/bin/chromium-browser",
                "/usr/bin/google-chrome",
                "/usr/bin/google-chrome-stable",
                "/snap/bin/chromium",
                "/usr/local/bin/chromium",
            ]
        }
        #[cfg(target_os = "macos")]
        {
            &[
                "/Applications/Chromium.app/Contents/MacOS/Chromium",
                "/Applications/Google Chrome.app/Contents/MacOS/Google Chrome",
            ]
        }
        #[cfg(windows)]
        {
            &[
                "C:\\Program Files\\Google\\Chrome\\Application\\chrome.exe",
                "C:\\Program Files (x86)\\Google\\Chrome\\Application\\chrome.exe",
                "C:\\Program Files\\Chromium\\Application\\chrome.exe",
            ]
        }
        #[cfg(not(any(target_os = "linux", target_os = "macos", windows)))]
        {
            &[]
        }
    };

    locations.iter().map(PathBuf::from).find(|p| p.is_file())
}

#[cfg(unix)]
fn is_executable(path: &Path) -> bool {
    use std::os::unix::fs::PermissionsExt;
    path.metadata()
        .map(|meta| meta.is_file() && meta.permissions().mode() & 0o111 != 0)
        .unwrap_or(false)
}

#[cfg(not(unix))]
fn is_executable(path: &Path) -> bool {
    path.is_file()
}
