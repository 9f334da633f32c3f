//! One-shot launch-then-navigate session with scoped cleanup.

use crate::browser::Browser;
use crate::options::{LaunchOptions, validate_url};
use crate::page::Page;
use crate::Result;
use tracing::{debug, warn};

/// A launched browser with one navigated page.
///
/// The sequence is strictly linear: browser start settles before the page is
/// created, the page settles before navigation is issued. A failure at any
/// step closes whatever was already started and surfaces the step's error.
#[derive(Debug)]
pub struct Session {
    browser: Browser,
    page: Page,
}

impl Session {
    /// Launch the browser, open one page, and navigate it to `url`.
    ///
    /// Both inputs are validated before any process is spawned, so an
    /// invalid extension directory or URL costs nothing.
    pub async fn open(options: LaunchOptions, url: &str) -> Result<Self> {
        options.validate()?;
        validate_url(url)?;

        let browser = Browser::launch(options).await?;

        let page = match browser.new_page().await {
            Ok(page) => page,
            Err(e) => {
                warn!(target: "extlaunch", error = %e, "page creation failed; closing browser");
                let _ = browser.close().await;
                return Err(e);
            }
        };

        if let Err(e) = page.goto(url).await {
            warn!(target: "extlaunch", error = %e, "navigation failed; closing browser");
            let _ = browser.close().await;
            return Err(e);
        }

        debug!(target: "extlaunch", %url, "session open");
        Ok(Self { browser, page })
    }

    pub fn browser(&self) -> &Browser {
        &self.browser
    }

    pub fn page(&self) -> &Page {
        &self.page
    }

    /// Close the page's browser and release every held resource.
    pub async fn close(self) -> Result<()> {
        self.browser.close().await
    }
}
