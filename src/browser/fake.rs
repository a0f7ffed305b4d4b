//! Scripted in-memory browser used by the tests.

use super::{BrowserSession, ContextHandle, EXTENT_SCRIPT, READY_STATE_SCRIPT, SCROLL_SCRIPT};
use crate::error::{Result, ScrapeError};
use crate::parsers::{PAGE_STATE_SCRIPT, PLAYER_STATE_SCRIPT};
use async_trait::async_trait;
use serde_json::Value;
use std::collections::{HashMap, HashSet, VecDeque};
use std::time::Duration;

pub(crate) struct FakeSession {
    /// Value of `window.ytInitialData` on every page
    pub page_state: Value,
    /// Extent before any scroll
    pub extent: u64,
    /// Extents observed after each successive scroll
    pub extents_after_scroll: VecDeque<u64>,
    pub scrolls: usize,
    pub settles: Vec<Duration>,
    /// Number of readiness polls before the document reports complete
    pub ready_after: usize,
    pub ready_polls: usize,
    /// Sleep for real in `settle` instead of recording
    pub real_settle: bool,
    pub consent_fails: bool,
    pub consent_attempts: usize,
    /// HTML source per URL
    pub sources: HashMap<String, String>,
    /// Player state per URL
    pub player_states: HashMap<String, Value>,
    /// URLs whose navigation fails
    pub failing_urls: HashSet<String>,
    pub fail_open: bool,
    /// Closing a tab fails and leaves it open
    pub fail_close: bool,
    pub visited: Vec<String>,
    pub opened: Vec<ContextHandle>,
    pub closed: Vec<ContextHandle>,
    /// Open contexts and the URL each one shows
    contexts: Vec<(ContextHandle, Option<String>)>,
    active: ContextHandle,
    next_handle: usize,
}

impl FakeSession {
    pub fn new() -> Self {
        let main = ContextHandle("main".to_string());
        Self {
            page_state: Value::Null,
            extent: 0,
            extents_after_scroll: VecDeque::new(),
            scrolls: 0,
            settles: Vec::new(),
            ready_after: 0,
            ready_polls: 0,
            real_settle: false,
            consent_fails: false,
            consent_attempts: 0,
            sources: HashMap::new(),
            player_states: HashMap::new(),
            failing_urls: HashSet::new(),
            fail_open: false,
            fail_close: false,
            visited: Vec::new(),
            opened: Vec::new(),
            closed: Vec::new(),
            contexts: vec![(main.clone(), None)],
            active: main,
            next_handle: 0,
        }
    }

    pub fn with_page_state(page_state: Value) -> Self {
        let mut session = Self::new();
        session.page_state = page_state;
        session
    }

    pub fn active(&self) -> &ContextHandle {
        &self.active
    }

    pub fn open_contexts(&self) -> Vec<ContextHandle> {
        self.contexts.iter().map(|(h, _)| h.clone()).collect()
    }

    fn active_url(&self) -> Option<String> {
        self.contexts
            .iter()
            .find(|(h, _)| *h == self.active)
            .and_then(|(_, url)| url.clone())
    }

    fn ensure_active(&self, command: &'static str) -> Result<()> {
        if self.contexts.iter().any(|(h, _)| *h == self.active) {
            Ok(())
        } else {
            Err(ScrapeError::command(command, "no such window"))
        }
    }
}

#[async_trait]
impl BrowserSession for FakeSession {
    async fn navigate(&mut self, url: &str) -> Result<()> {
        self.ensure_active("navigate")?;
        self.visited.push(url.to_string());
        if self.failing_urls.contains(url) {
            return Err(ScrapeError::command("navigate", "net::ERR_CONNECTION_RESET"));
        }
        let active = self.active.clone();
        if let Some((_, current)) = self.contexts.iter_mut().find(|(h, _)| *h == active) {
            *current = Some(url.to_string());
        }
        Ok(())
    }

    async fn execute(&mut self, script: &str, _args: Vec<Value>) -> Result<Value> {
        self.ensure_active("execute")?;
        match script {
            READY_STATE_SCRIPT => {
                self.ready_polls += 1;
                if self.ready_polls >= self.ready_after {
                    Ok(Value::from("complete"))
                } else {
                    Ok(Value::from("loading"))
                }
            }
            EXTENT_SCRIPT => Ok(Value::from(self.extent)),
            SCROLL_SCRIPT => {
                self.scrolls += 1;
                if let Some(next) = self.extents_after_scroll.pop_front() {
                    self.extent = next;
                }
                Ok(Value::Null)
            }
            PAGE_STATE_SCRIPT => Ok(self.page_state.clone()),
            PLAYER_STATE_SCRIPT => Ok(self
                .active_url()
                .and_then(|url| self.player_states.get(&url).cloned())
                .unwrap_or(Value::Null)),
            other => Err(ScrapeError::command("execute", format!("unexpected script {other}"))),
        }
    }

    async fn source(&mut self) -> Result<String> {
        self.ensure_active("source")?;
        Ok(self
            .active_url()
            .and_then(|url| self.sources.get(&url).cloned())
            .unwrap_or_else(|| "<html><head></head><body></body></html>".to_string()))
    }

    async fn settle(&mut self, delay: Duration) {
        if self.real_settle {
            tokio::time::sleep(delay).await;
        } else {
            self.settles.push(delay);
        }
    }

    async fn current_context(&mut self) -> Result<ContextHandle> {
        Ok(self.active.clone())
    }

    async fn open_context(&mut self) -> Result<ContextHandle> {
        if self.fail_open {
            return Err(ScrapeError::command("open_context", "window limit reached"));
        }
        self.next_handle += 1;
        let handle = ContextHandle(format!("tab-{}", self.next_handle));
        self.contexts.push((handle.clone(), None));
        self.opened.push(handle.clone());
        Ok(handle)
    }

    async fn switch_context(&mut self, handle: &ContextHandle) -> Result<()> {
        if !self.contexts.iter().any(|(h, _)| h == handle) {
            return Err(ScrapeError::command("switch_context", "no such window"));
        }
        self.active = handle.clone();
        Ok(())
    }

    async fn close_context(&mut self, handle: &ContextHandle) -> Result<()> {
        if self.fail_close {
            return Err(ScrapeError::command("close_context", "target window already gone"));
        }
        let before = self.contexts.len();
        self.contexts.retain(|(h, _)| h != handle);
        if self.contexts.len() == before {
            return Err(ScrapeError::command("close_context", "no such window"));
        }
        self.closed.push(handle.clone());
        Ok(())
    }

    async fn click_when_ready(&mut self, _selector: &str, _wait: Duration) -> Result<bool> {
        self.consent_attempts += 1;
        if self.consent_fails {
            return Err(ScrapeError::command("click", "element not interactable"));
        }
        Ok(false)
    }

    async fn quit(&mut self) -> Result<()> {
        Ok(())
    }
}
