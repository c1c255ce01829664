//! Deterministic [`PageDriver`] backend for tests.
//!
//! A scripted page is a set of named UI states. Each state maps
//! (scope, selector) pairs to element handles; clicking an element may
//! transition the page to another state, modeling dropdowns opening and the
//! site re-rendering after a selection. Waits resolve against the current
//! state instantly, so tests run without any real delays.

use std::collections::HashMap;
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;

use super::{DriverError, DriverResult, NodeId, PageDriver, Scope};

#[derive(Debug, Clone)]
struct ScriptedNode {
    text: String,
    enabled: bool,
    visible: bool,
    goto_state: Option<String>,
}

type PlacementKey = (Option<NodeId>, String);

#[derive(Debug, Default, Clone)]
struct UiState {
    placements: HashMap<PlacementKey, Vec<NodeId>>,
}

/// Builder for a scripted page. See the integration tests for full walks.
#[derive(Debug, Default)]
pub struct ScriptedPageBuilder {
    nodes: Vec<ScriptedNode>,
    states: HashMap<String, UiState>,
    initial: Option<String>,
    refuse_navigation: bool,
}

impl ScriptedPageBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// A visible, enabled element with the given text.
    pub fn node(&mut self, text: &str) -> NodeId {
        self.push(text, true, true)
    }

    /// An element whose `is_enabled` probe reports false.
    pub fn disabled_node(&mut self, text: &str) -> NodeId {
        self.push(text, false, true)
    }

    /// An element whose `is_visible` probe reports false.
    pub fn hidden_node(&mut self, text: &str) -> NodeId {
        self.push(text, true, false)
    }

    fn push(&mut self, text: &str, enabled: bool, visible: bool) -> NodeId {
        let id = self.nodes.len() as NodeId;
        self.nodes.push(ScriptedNode {
            text: text.to_string(),
            enabled,
            visible,
            goto_state: None,
        });
        id
    }

    /// Clicking `node` transitions the page to `state`.
    pub fn on_click_goto(&mut self, node: NodeId, state: &str) {
        self.nodes[node as usize].goto_state = Some(state.to_string());
    }

    /// In `state`, a page-scoped query for `selector` yields `nodes`.
    pub fn place(&mut self, state: &str, selector: &str, nodes: &[NodeId]) {
        self.states
            .entry(state.to_string())
            .or_default()
            .placements
            .insert((None, selector.to_string()), nodes.to_vec());
    }

    /// In `state`, a query for `selector` scoped under `parent` yields `nodes`.
    pub fn place_under(&mut self, state: &str, parent: NodeId, selector: &str, nodes: &[NodeId]) {
        self.states
            .entry(state.to_string())
            .or_default()
            .placements
            .insert((Some(parent), selector.to_string()), nodes.to_vec());
    }

    /// State the page enters after `goto`.
    pub fn initial_state(&mut self, state: &str) {
        self.initial = Some(state.to_string());
    }

    /// Make every `goto` fail, modeling an unreachable profile page.
    pub fn refuse_navigation(&mut self) {
        self.refuse_navigation = true;
    }

    pub fn build(self) -> ScriptedDriver {
        let initial = self.initial.unwrap_or_else(|| "initial".to_string());
        ScriptedDriver {
            nodes: self.nodes,
            states: self.states,
            refuse_navigation: self.refuse_navigation,
            inner: Mutex::new(Runtime {
                current: initial.clone(),
                log: Vec::new(),
            }),
            initial,
        }
    }
}

#[derive(Debug)]
struct Runtime {
    current: String,
    log: Vec<String>,
}

/// The scripted page at runtime. Cheap to construct per test.
#[derive(Debug)]
pub struct ScriptedDriver {
    nodes: Vec<ScriptedNode>,
    states: HashMap<String, UiState>,
    initial: String,
    refuse_navigation: bool,
    inner: Mutex<Runtime>,
}

impl ScriptedDriver {
    fn node(&self, id: NodeId) -> DriverResult<&ScriptedNode> {
        self.nodes
            .get(id as usize)
            .ok_or(DriverError::StaleNode(id))
    }

    fn record(&self, entry: String) {
        self.inner.lock().unwrap().log.push(entry);
    }

    /// Every driver interaction so far, in order. Lets tests assert that,
    /// for example, no navigation happened past a goalkeeper's profile.
    pub fn interaction_log(&self) -> Vec<String> {
        self.inner.lock().unwrap().log.clone()
    }

    /// Name of the UI state the page is currently in.
    pub fn current_state(&self) -> String {
        self.inner.lock().unwrap().current.clone()
    }
}

#[async_trait]
impl PageDriver for ScriptedDriver {
    async fn goto(&self, url: &str, _timeout: Duration) -> DriverResult<()> {
        self.record(format!("goto:{url}"));
        if self.refuse_navigation {
            return Err(DriverError::Navigation {
                url: url.to_string(),
                message: "scripted refusal".to_string(),
            });
        }
        self.inner.lock().unwrap().current = self.initial.clone();
        Ok(())
    }

    async fn query(&self, scope: Scope, selector: &str) -> DriverResult<Vec<NodeId>> {
        let current = self.current_state();
        let key = match scope {
            Scope::Page => (None, selector.to_string()),
            Scope::Node(parent) => (Some(parent), selector.to_string()),
        };
        Ok(self
            .states
            .get(&current)
            .and_then(|state| state.placements.get(&key))
            .cloned()
            .unwrap_or_default())
    }

    async fn wait_for(&self, selector: &str, timeout: Duration) -> DriverResult<()> {
        if self.query(Scope::Page, selector).await?.is_empty() {
            Err(DriverError::WaitTimeout {
                selector: selector.to_string(),
                timeout,
            })
        } else {
            Ok(())
        }
    }

    async fn text(&self, node: NodeId) -> DriverResult<String> {
        Ok(self.node(node)?.text.clone())
    }

    async fn click(&self, node: NodeId) -> DriverResult<()> {
        let scripted = self.node(node)?.clone();
        self.record(format!("click:{}", scripted.text));
        if let Some(state) = scripted.goto_state {
            self.inner.lock().unwrap().current = state;
        }
        Ok(())
    }

    async fn is_enabled(&self, node: NodeId) -> DriverResult<bool> {
        Ok(self.node(node)?.enabled)
    }

    async fn is_visible(&self, node: NodeId) -> DriverResult<bool> {
        Ok(self.node(node)?.visible)
    }

    async fn settle(&self, _timeout: Duration) -> DriverResult<()> {
        Ok(())
    }

    async fn scroll_by(&self, delta_y: i64) -> DriverResult<()> {
        self.record(format!("scroll:{delta_y}"));
        Ok(())
    }

    async fn pause(&self, _duration: Duration) {}
}
