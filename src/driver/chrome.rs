//! Production [`PageDriver`] backend over `chromiumoxide`.
//!
//! One [`ChromeBrowser`] per run, one [`ChromeSession`] (page) per player.
//! Sessions must be closed after each player regardless of outcome so that
//! one player's page state can never leak into the next.

use std::time::{Duration, Instant};

use async_trait::async_trait;
use chromiumoxide::browser::{Browser, BrowserConfig};
use chromiumoxide::element::Element;
use chromiumoxide::page::Page;
use futures::StreamExt;
use tokio::sync::Mutex;
use tokio::task::JoinHandle;

use super::{DriverError, DriverResult, NodeId, PageDriver, Scope};

const POLL_INTERVAL: Duration = Duration::from_millis(250);

/// A running Chromium process plus its CDP event loop.
pub struct ChromeBrowser {
    browser: Browser,
    handler: JoinHandle<()>,
}

impl ChromeBrowser {
    /// Launch a browser. Fatal on failure; the run cannot proceed without it.
    pub async fn launch(headless: bool) -> DriverResult<Self> {
        let builder = if headless {
            BrowserConfig::builder()
        } else {
            BrowserConfig::builder().with_head()
        };
        let config = builder
            .build()
            .map_err(|message| DriverError::Backend { message })?;

        let (browser, mut events) = Browser::launch(config)
            .await
            .map_err(DriverError::backend)?;

        // Drive CDP events for the lifetime of the browser.
        let handler = tokio::spawn(async move {
            while let Some(event) = events.next().await {
                if event.is_err() {
                    break;
                }
            }
        });

        Ok(Self { browser, handler })
    }

    /// Open a fresh page for one player.
    pub async fn new_session(&self) -> DriverResult<ChromeSession> {
        let page = self
            .browser
            .new_page("about:blank")
            .await
            .map_err(DriverError::backend)?;
        Ok(ChromeSession {
            page,
            nodes: Mutex::new(Vec::new()),
        })
    }

    /// Shut the browser down and reap the event loop.
    pub async fn shutdown(mut self) -> DriverResult<()> {
        self.browser
            .close()
            .await
            .map_err(DriverError::backend)?;
        let _ = self.browser.wait().await;
        self.handler.abort();
        Ok(())
    }
}

/// One browser page, scoped to one player.
pub struct ChromeSession {
    page: Page,
    // Element handles live here; NodeId is an index. Handles go stale on
    // navigation, so `goto` clears the table.
    nodes: Mutex<Vec<Element>>,
}

impl ChromeSession {
    /// Close the underlying page. Called after every player, success or not.
    pub async fn close(self) -> DriverResult<()> {
        self.page.close().await.map_err(DriverError::backend)
    }

    async fn register(&self, elements: Vec<Element>) -> Vec<NodeId> {
        let mut nodes = self.nodes.lock().await;
        let mut ids = Vec::with_capacity(elements.len());
        for el in elements {
            ids.push(nodes.len() as NodeId);
            nodes.push(el);
        }
        ids
    }
}

#[async_trait]
impl PageDriver for ChromeSession {
    async fn goto(&self, url: &str, timeout: Duration) -> DriverResult<()> {
        self.nodes.lock().await.clear();
        let nav = async {
            self.page.goto(url).await?;
            self.page.wait_for_navigation().await?;
            Ok::<_, chromiumoxide::error::CdpError>(())
        };
        match tokio::time::timeout(timeout, nav).await {
            Ok(Ok(())) => Ok(()),
            Ok(Err(err)) => Err(DriverError::Navigation {
                url: url.to_string(),
                message: err.to_string(),
            }),
            Err(_) => Err(DriverError::Navigation {
                url: url.to_string(),
                message: format!("timed out after {timeout:?}"),
            }),
        }
    }

    async fn query(&self, scope: Scope, selector: &str) -> DriverResult<Vec<NodeId>> {
        // The CDP lookup reports zero matches as an error in some versions;
        // the trait contract wants an empty result instead.
        let found = match scope {
            Scope::Page => self.page.find_elements(selector).await.unwrap_or_default(),
            Scope::Node(id) => {
                let nodes = self.nodes.lock().await;
                let parent = nodes.get(id as usize).ok_or(DriverError::StaleNode(id))?;
                parent.find_elements(selector).await.unwrap_or_default()
            }
        };
        Ok(self.register(found).await)
    }

    async fn wait_for(&self, selector: &str, timeout: Duration) -> DriverResult<()> {
        let deadline = Instant::now() + timeout;
        loop {
            let found = self.page.find_elements(selector).await.unwrap_or_default();
            if !found.is_empty() {
                return Ok(());
            }
            if Instant::now() >= deadline {
                return Err(DriverError::WaitTimeout {
                    selector: selector.to_string(),
                    timeout,
                });
            }
            tokio::time::sleep(POLL_INTERVAL).await;
        }
    }

    async fn text(&self, node: NodeId) -> DriverResult<String> {
        let nodes = self.nodes.lock().await;
        let el = nodes.get(node as usize).ok_or(DriverError::StaleNode(node))?;
        let text = el
            .inner_text()
            .await
            .map_err(DriverError::backend)?
            .unwrap_or_default();
        Ok(text)
    }

    async fn click(&self, node: NodeId) -> DriverResult<()> {
        let nodes = self.nodes.lock().await;
        let el = nodes.get(node as usize).ok_or(DriverError::StaleNode(node))?;
        el.click().await.map_err(DriverError::backend)?;
        Ok(())
    }

    async fn is_enabled(&self, node: NodeId) -> DriverResult<bool> {
        let nodes = self.nodes.lock().await;
        let el = nodes.get(node as usize).ok_or(DriverError::StaleNode(node))?;
        let disabled = el.attribute("disabled").await.map_err(DriverError::backend)?;
        if disabled.is_some() {
            return Ok(false);
        }
        let aria = el
            .attribute("aria-disabled")
            .await
            .map_err(DriverError::backend)?;
        Ok(aria.as_deref() != Some("true"))
    }

    async fn is_visible(&self, node: NodeId) -> DriverResult<bool> {
        let nodes = self.nodes.lock().await;
        let el = nodes.get(node as usize).ok_or(DriverError::StaleNode(node))?;
        // An element without a clickable point is collapsed or off-layout;
        // both route to the same skip paths as absence.
        Ok(el.clickable_point().await.is_ok())
    }

    async fn settle(&self, timeout: Duration) -> DriverResult<()> {
        // Late settle is not an error; the caller's next wait_for re-checks.
        let _ = tokio::time::timeout(timeout, self.page.wait_for_navigation()).await;
        Ok(())
    }

    async fn scroll_by(&self, delta_y: i64) -> DriverResult<()> {
        self.page
            .evaluate(format!("window.scrollBy(0, {delta_y})"))
            .await
            .map_err(DriverError::backend)?;
        Ok(())
    }

    async fn pause(&self, duration: Duration) {
        tokio::time::sleep(duration).await;
    }
}
