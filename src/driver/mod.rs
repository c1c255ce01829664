//! Page-automation driver seam.
//!
//! The navigation engine never talks to a browser directly; it speaks to the
//! [`PageDriver`] trait, which exposes exactly the primitives the engine
//! needs: navigate with a bound, query elements by CSS selector (page- or
//! node-scoped), wait for an element, read text, click, probe enabled and
//! visible states, settle, scroll, and pause. Every operation may fail by
//! timeout; callers treat each such failure as a recoverable skip.
//!
//! Backends:
//! - [`chrome`]: production backend over `chromiumoxide` (one page per
//!   player, closed after the player in all outcomes).
//! - [`scripted`]: deterministic in-memory backend for tests.

pub mod chrome;
pub mod scripted;

use std::time::Duration;

use async_trait::async_trait;
use thiserror::Error;

pub use chrome::{ChromeBrowser, ChromeSession};
pub use scripted::{ScriptedDriver, ScriptedPageBuilder};

pub type DriverResult<T> = std::result::Result<T, DriverError>;

/// Opaque handle to an element located by a query. Valid until the next
/// navigation or data reload on the same session.
pub type NodeId = u64;

/// Where a query starts matching: the whole page, or inside one element.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scope {
    Page,
    Node(NodeId),
}

#[derive(Error, Debug)]
pub enum DriverError {
    #[error("no element matched `{selector}`")]
    NotFound { selector: String },

    #[error("timed out after {timeout:?} waiting for `{selector}`")]
    WaitTimeout { selector: String, timeout: Duration },

    #[error("stale element handle {0}")]
    StaleNode(NodeId),

    #[error("navigation to {url} failed: {message}")]
    Navigation { url: String, message: String },

    #[error("browser backend error: {message}")]
    Backend { message: String },
}

impl DriverError {
    pub(crate) fn backend(err: impl std::fmt::Display) -> Self {
        DriverError::Backend {
            message: err.to_string(),
        }
    }
}

/// One live page session for one player.
///
/// All methods take `&self`; the engine is strictly sequential, so backends
/// may use interior mutability without contention.
#[async_trait]
pub trait PageDriver: Send + Sync {
    /// Navigate the page to `url`, bounded by `timeout`.
    async fn goto(&self, url: &str, timeout: Duration) -> DriverResult<()>;

    /// All elements matching `selector` within `scope`, in document order.
    /// An empty match is `Ok(vec![])`, not an error.
    async fn query(&self, scope: Scope, selector: &str) -> DriverResult<Vec<NodeId>>;

    /// Wait until at least one element matches `selector`, bounded by
    /// `timeout`. Absence after the bound is `WaitTimeout`.
    async fn wait_for(&self, selector: &str, timeout: Duration) -> DriverResult<()>;

    /// Inner text of an element.
    async fn text(&self, node: NodeId) -> DriverResult<String>;

    /// Click an element.
    async fn click(&self, node: NodeId) -> DriverResult<()>;

    /// Whether an element accepts interaction (not disabled).
    async fn is_enabled(&self, node: NodeId) -> DriverResult<bool>;

    /// Whether an element is rendered with a clickable point.
    async fn is_visible(&self, node: NodeId) -> DriverResult<bool>;

    /// Wait for network/UI settle after a data-reloading interaction,
    /// bounded by `timeout`. Settling late is not an error.
    async fn settle(&self, timeout: Duration) -> DriverResult<()>;

    /// Scroll the page vertically by `delta_y` pixels.
    async fn scroll_by(&self, delta_y: i64) -> DriverResult<()>;

    /// Fixed cooperative pause. Test backends may make this instant.
    async fn pause(&self, duration: Duration);
}

/// Read the trimmed text of every element matching `selector`.
pub async fn texts_of(
    driver: &dyn PageDriver,
    scope: Scope,
    selector: &str,
) -> DriverResult<Vec<String>> {
    let mut out = Vec::new();
    for node in driver.query(scope, selector).await? {
        out.push(driver.text(node).await?.trim().to_string());
    }
    Ok(out)
}

/// First element matching `selector` under `scope`, or `NotFound`.
pub async fn first(
    driver: &dyn PageDriver,
    scope: Scope,
    selector: &str,
) -> DriverResult<NodeId> {
    driver
        .query(scope, selector)
        .await?
        .into_iter()
        .next()
        .ok_or_else(|| DriverError::NotFound {
            selector: selector.to_string(),
        })
}
