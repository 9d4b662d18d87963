//! webdriver-rs: client-side element bindings for the WebDriver wire protocol
//!
//! This crate models the element proxy of a remote browsing session: an
//! [`ElementHandle`] holds an opaque id and a non-owning reference to the
//! session that discovered it, and realizes every operation (click, read,
//! geometry, screenshot, child search, file upload) as one wire command sent
//! through that session.
//!
//! The session itself (transport, dialect negotiation, response parsing)
//! lives behind the [`SessionLike`](session::SessionLike) trait and is
//! provided by the embedding driver.
//!
//! # Examples
//!
//! ## Interacting with a form
//!
//! ```ignore
//! use webdriver_rs::By;
//!
//! # async fn example(form: webdriver_rs::ElementHandle) -> webdriver_rs::Result<()> {
//! let email = form.find_element(&By::name("email")).await?;
//! email.clear().await?;
//! email.send_keys(&["user@example.com"]).await?;
//!
//! assert!(email.is_displayed().await?);
//! form.submit().await?;
//! # Ok(())
//! # }
//! ```
//!
//! ## Uploading a file through a file input
//!
//! ```ignore
//! use std::sync::Arc;
//! use webdriver_rs::LocalFileDetector;
//!
//! # async fn example(mut input: webdriver_rs::ElementHandle) -> webdriver_rs::Result<()> {
//! // Resolve typed paths against the local filesystem; the file is
//! // transferred to the remote machine and its remote path typed instead.
//! input.set_file_detector(Arc::new(LocalFileDetector));
//! input.send_keys(&["/home/user/avatar.png"]).await?;
//! # Ok(())
//! # }
//! ```
//!
//! ## Element screenshots
//!
//! ```ignore
//! use webdriver_rs::BytesOutput;
//!
//! # async fn example(element: webdriver_rs::ElementHandle) -> webdriver_rs::Result<()> {
//! let png = element.screenshot_as(&BytesOutput).await?;
//! assert!(!png.is_empty());
//! # Ok(())
//! # }
//! ```

pub mod protocol;
pub mod session;

mod error;

// Re-export error types
pub use error::{Error, Result};

// Re-export the element API
pub use protocol::{By, Coordinates, ElementHandle, ShadowRoot, Unwrappable};

// Re-export geometry types
pub use protocol::{Dimension, Point, Rect};

// Re-export screenshot output types
pub use protocol::{Base64Output, BytesOutput, OutputType};

// Re-export upload policy types
pub use protocol::{FileDetector, LocalFileDetector, UselessFileDetector};

// Re-export the session boundary
pub use session::{Command, Dialect, Response, SessionLike, SessionRef};
