//! Launch configuration and derived browser arguments.

use crate::{Error, Result};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Default time allowed for the browser to start and announce its endpoint.
pub const DEFAULT_LAUNCH_TIMEOUT: Duration = Duration::from_secs(30);

/// Default time allowed for a navigation to be acknowledged.
pub const DEFAULT_NAVIGATION_TIMEOUT: Duration = Duration::from_secs(30);

/// Configuration for launching a browser that carries one unpacked extension.
///
/// Built once, validated before launch, never mutated afterwards.
#[derive(Debug, Clone)]
pub struct LaunchOptions {
    /// Path to the unpacked extension directory.
    pub extension_path: PathBuf,
    /// Run without a visible window. Off by default so the extension UI
    /// stays visible, matching the usual interactive use of this tool.
    pub headless: bool,
    /// Explicit browser executable; discovered when unset.
    pub executable: Option<PathBuf>,
    /// Extra command-line flags appended verbatim after the derived ones.
    pub extra_args: Vec<String>,
    /// Maximum time to wait for the browser to announce its endpoint.
    pub launch_timeout: Duration,
    /// Maximum time to wait for a navigation to be acknowledged.
    pub navigation_timeout: Duration,
}

impl LaunchOptions {
    /// Options for loading the extension at `extension_path`, headed.
    pub fn new(extension_path: impl Into<PathBuf>) -> Self {
        Self {
            extension_path: extension_path.into(),
            headless: false,
            executable: None,
            extra_args: Vec::new(),
            launch_timeout: DEFAULT_LAUNCH_TIMEOUT,
            navigation_timeout: DEFAULT_NAVIGATION_TIMEOUT,
        }
    }

    /// Sets headless mode.
    pub fn headless(mut self, headless: bool) -> Self {
        self.headless = headless;
        self
    }

    /// Sets an explicit browser executable.
    pub fn executable(mut self, path: impl Into<PathBuf>) -> Self {
        self.executable = Some(path.into());
        self
    }

    /// Appends one extra browser flag.
    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.extra_args.push(arg.into());
        self
    }

    /// Appends several extra browser flags.
    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.extra_args.extend(args.into_iter().map(Into::into));
        self
    }

    /// Sets the launch timeout.
    pub fn launch_timeout(mut self, timeout: Duration) -> Self {
        self.launch_timeout = timeout;
        self
    }

    /// Sets the navigation timeout.
    pub fn navigation_timeout(mut self, timeout: Duration) -> Self {
        self.navigation_timeout = timeout;
        self
    }

    /// The two flags that load the extension and disable every other one.
    pub fn extension_args(path: &Path) -> [String; 2] {
        let path = path.display();
        [
            format!("--disable-extensions-except={path}"),
            format!("--load-extension={path}"),
        ]
    }

    /// Full argument list handed to the browser binary.
    ///
    /// The caller appends a per-launch `--user-data-dir`; everything else is
    /// derived here so it can be inspected without launching anything.
    pub fn to_args(&self) -> Vec<String> {
        let mut args = Vec::from(Self::extension_args(&self.extension_path));
        if self.headless {
            args.push("--headless=new".to_string());
        }
        // Port 0 lets the browser pick a free port; the chosen endpoint is
        // read back from stderr.
        args.push("--remote-debugging-port=0".to_string());
        args.push("--no-first-run".to_string());
        args.push("--no-default-browser-check".to_string());
        args.extend(self.extra_args.iter().cloned());
        args
    }

    /// Check the extension directory before any process is spawned.
    ///
    /// # Errors
    ///
    /// Returns `Error::InvalidExtension` when the path is missing, is not a
    /// directory, or has no `manifest.json`.
    pub fn validate(&self) -> Result<()> {
        let path = &self.extension_path;
        if !path.exists() {
            return Err(Error::InvalidExtension {
                path: path.clone(),
                reason: "directory does not exist".to_string(),
            });
        }
        if !path.is_dir() {
            return Err(Error::InvalidExtension {
                path: path.clone(),
                reason: "not a directory".to_string(),
            });
        }
        if !path.join("manifest.json").is_file() {
            return Err(Error::InvalidExtension {
                path: path.clone(),
                reason: "missing manifest.json".to_string(),
            });
        }
        Ok(())
    }
}

/// Check a navigation target before issuing anything to the browser.
pub(crate) fn validate_url(raw: &str) -> Result<()> {
    if raw.trim().is_empty() {
        return Err(Error::InvalidUrl(raw.to_string()));
    }
    url::Url::parse(raw).map_err(|_| Error::InvalidUrl(raw.to_string()))?;
    Ok(())
}
