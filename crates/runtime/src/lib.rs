//! extlaunch runtime - browser lifecycle, transport, and connection
//!
//! This crate provides the low-level infrastructure for talking to a
//! Chromium-family browser over the DevTools protocol:
//!
//! - **Finder**: Locating a browser executable to launch
//! - **Process**: Spawning the browser and discovering its DevTools endpoint
//! - **Transport**: Bidirectional communication over WebSocket
//! - **Connection**: Request/response correlation by message id
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────┐
//! │    extlaunch     │  API objects (Browser, Page, Session)
//! └────────┬─────────┘
//!          │ uses ConnectionLike
//! ┌────────▼─────────┐
//! │ extlaunch-runtime│  This crate
//! │  ┌────────────┐  │
//! │  │ Connection │  │  id correlation, error mapping
//! │  └────────────┘  │
//! │  ┌────────────┐  │
//! │  │ Transport  │  │  WebSocket frames
//! │  └────────────┘  │
//! │  ┌────────────┐  │
//! │  │  Process   │  │  browser process management
//! │  └────────────┘  │
//! └──────────────────┘
//! ```
//!
//! The [`ConnectionLike`] trait decouples API objects from the concrete
//! [`Connection`], so they can be exercised against a recording
//! implementation in tests without a running browser.

pub mod connection;
pub mod error;
pub mod finder;
pub mod process;
pub mod transport;

pub use connection::{Connection, ConnectionLike};
pub use error::{Error, Result};
pub use finder::find_browser_executable;
pub use process::BrowserProcess;
pub use transport::{TransportReceiver, TransportSender};
