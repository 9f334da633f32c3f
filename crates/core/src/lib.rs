//! extlaunch: launch a Chromium-family browser with one unpacked extension
//! loaded, open a page, and navigate it.
//!
//! The browser only honors `--load-extension` at process start, so the
//! extension directory is part of [`LaunchOptions`] rather than a runtime
//! call. Everything the extension does once loaded is its own business;
//! this crate only gets it into the browser and points a page somewhere.
//!
//! # Example
//!
//! ```ignore
//! use extlaunch::{LaunchOptions, Session};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let options = LaunchOptions::new("/path/to/unpacked_extension");
//!     let session = Session::open(options, "https://example.com").await?;
//!     // The browser stays up while `session` is alive.
//!     session.close().await?;
//!     Ok(())
//! }
//! ```

pub mod browser;
pub mod options;
pub mod page;
pub mod session;

#[cfg(test)]
pub(crate) mod test_support;

pub use browser::Browser;
pub use options::{DEFAULT_LAUNCH_TIMEOUT, DEFAULT_NAVIGATION_TIMEOUT, LaunchOptions};
pub use page::Page;
pub use session::Session;

pub use extlaunch_runtime::{Error, Result};
