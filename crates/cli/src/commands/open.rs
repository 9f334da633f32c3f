use std::time::Duration;

use tracing::info;

use crate::cli::OpenArgs;
use crate::error::Result;
use extlaunch::{LaunchOptions, Session};

pub async fn execute(args: OpenArgs) -> Result<()> {
    let mut options = LaunchOptions::new(&args.extension)
        .headless(args.headless)
        .navigation_timeout(Duration::from_millis(args.timeout_ms))
        .args(args.browser_args.iter().cloned());
    if let Some(browser) = &args.browser {
        options = options.executable(browser);
    }

    info!(
        target = "extlaunch",
        url = %args.url,
        extension = %args.extension.display(),
        "opening session"
    );
    let session = Session::open(options, &args.url).await?;

    if let Some(version) = session.browser().version() {
        info!(target = "extlaunch", product = %version.product, "browser running");
    }
    info!(target = "extlaunch", page = %session.page().url(), "navigation issued");

    if args.hold {
        info!(target = "extlaunch", "holding session open; press Ctrl-C to close");
        tokio::signal::ctrl_c().await?;
    }

    session.close().await?;
    info!(target = "extlaunch", "session closed");
    Ok(())
}
