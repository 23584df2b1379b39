use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};
use std::time::Duration;

use ego_tree::{NodeId, NodeRef};
use scraper::{ElementRef, Html, Node, Selector};
use url::Url;

use crate::{DriverError, ElementHandle, PageDriver, WaitState};

/// A fixed set of HTML documents keyed by URL.
#[derive(Debug, Clone, Default)]
pub struct StaticSite {
    pages: HashMap<String, String>,
}

impl StaticSite {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_page(mut self, url: &str, html: impl Into<String>) -> Self {
        self.insert(url, html);
        self
    }

    pub fn insert(&mut self, url: &str, html: impl Into<String>) {
        self.pages.insert(normalize(url), html.into());
    }

    pub fn get(&self, url: &str) -> Option<&str> {
        self.pages.get(&normalize(url)).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.pages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pages.is_empty()
    }
}

fn normalize(url: &str) -> String {
    Url::parse(url)
        .map(|u| u.to_string())
        .unwrap_or_else(|_| url.to_string())
}

/// Side effects requested from a [`StaticSiteDriver`], in call order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DriverCall {
    Navigate(String),
    /// Click on an element, with its `href` if it had one.
    Click(Option<String>),
    Fill(String),
    WaitFor(String),
    Delay(Duration),
    Reload,
}

#[derive(Debug, Default)]
struct Session {
    url: Option<String>,
    html: String,
    generation: u64,
    nodes: Vec<NodeId>,
    calls: Vec<DriverCall>,
    clicks: usize,
}

/// Replays a [`StaticSite`] as if it were a live browser page.
///
/// Waits resolve immediately against the current document and delays are
/// only recorded. Clicking an element with an `href` follows it; clicking
/// anything else does nothing. Unknown URLs never settle and surface as
/// navigation timeouts.
#[derive(Debug)]
pub struct StaticSiteDriver {
    site: StaticSite,
    session: Mutex<Session>,
    fail_clicks_after: Option<usize>,
}

impl StaticSiteDriver {
    pub fn new(site: StaticSite) -> Self {
        Self {
            site,
            session: Mutex::new(Session::default()),
            fail_clicks_after: None,
        }
    }

    /// Makes every click after the first `clicks` ones time out.
    pub fn fail_clicks_after(mut self, clicks: usize) -> Self {
        self.fail_clicks_after = Some(clicks);
        self
    }

    pub fn calls(&self) -> Vec<DriverCall> {
        self.lock().map(|s| s.calls.clone()).unwrap_or_default()
    }

    pub fn navigation_count(&self) -> usize {
        self.calls()
            .iter()
            .filter(|call| matches!(call, DriverCall::Navigate(_)))
            .count()
    }

    pub fn click_count(&self) -> usize {
        self.calls()
            .iter()
            .filter(|call| matches!(call, DriverCall::Click(_)))
            .count()
    }

    fn lock(&self) -> Result<MutexGuard<'_, Session>, DriverError> {
        self.session
            .lock()
            .map_err(|_| DriverError::Protocol("driver state poisoned".into()))
    }

    fn load(&self, session: &mut Session, url: &str, timeout: Duration) -> Result<(), DriverError> {
        let html = self
            .site
            .get(url)
            .ok_or_else(|| DriverError::NavigationTimeout {
                url: url.to_string(),
                timeout_ms: timeout.as_millis() as u64,
            })?;
        session.url = Some(normalize(url));
        session.html = html.to_string();
        session.generation += 1;
        session.nodes.clear();
        Ok(())
    }

    fn matches(&self, selector: &str) -> Result<usize, DriverError> {
        let selector = parse_selector(selector)?;
        let session = self.lock()?;
        let doc = Html::parse_document(&session.html);
        let count = doc.select(&selector).count();
        Ok(count)
    }
}

fn parse_selector(selector: &str) -> Result<Selector, DriverError> {
    Selector::parse(selector).map_err(|_| DriverError::InvalidSelector(selector.to_string()))
}

fn node_id(element: ElementRef<'_>) -> NodeId {
    let node: &NodeRef<'_, Node> = &element;
    node.id()
}

fn register(session: &mut Session, ids: Vec<NodeId>) -> Vec<ElementHandle> {
    ids.into_iter()
        .map(|id| {
            session.nodes.push(id);
            ElementHandle::new(session.generation, session.nodes.len() - 1)
        })
        .collect()
}

fn resolve<'a>(
    doc: &'a Html,
    session: &Session,
    handle: &ElementHandle,
) -> Result<ElementRef<'a>, DriverError> {
    if handle.generation() != session.generation {
        return Err(DriverError::StaleElement);
    }
    let id = session
        .nodes
        .get(handle.index())
        .ok_or(DriverError::StaleElement)?;
    doc.tree
        .get(*id)
        .and_then(ElementRef::wrap)
        .ok_or(DriverError::StaleElement)
}

#[async_trait::async_trait]
impl PageDriver for StaticSiteDriver {
    async fn current_url(&self) -> Result<Option<String>, DriverError> {
        Ok(self.lock()?.url.clone())
    }

    async fn navigate(&self, url: &str, timeout: Duration) -> Result<(), DriverError> {
        let mut session = self.lock()?;
        session.calls.push(DriverCall::Navigate(url.to_string()));
        self.load(&mut session, url, timeout)
    }

    async fn count(&self, selector: &str) -> Result<usize, DriverError> {
        self.matches(selector)
    }

    async fn locate_all(&self, selector: &str) -> Result<Vec<ElementHandle>, DriverError> {
        let selector = parse_selector(selector)?;
        let mut session = self.lock()?;
        let doc = Html::parse_document(&session.html);
        let ids = doc.select(&selector).map(node_id).collect();
        Ok(register(&mut session, ids))
    }

    async fn locate_within(
        &self,
        parent: &ElementHandle,
        selector: &str,
    ) -> Result<Vec<ElementHandle>, DriverError> {
        let selector = parse_selector(selector)?;
        let mut session = self.lock()?;
        let doc = Html::parse_document(&session.html);
        let ids = resolve(&doc, &session, parent)?
            .select(&selector)
            .map(node_id)
            .collect();
        Ok(register(&mut session, ids))
    }

    async fn attribute(
        &self,
        element: &ElementHandle,
        name: &str,
    ) -> Result<Option<String>, DriverError> {
        let session = self.lock()?;
        let doc = Html::parse_document(&session.html);
        let element = resolve(&doc, &session, element)?;
        Ok(element.value().attr(name).map(str::to_string))
    }

    async fn text(&self, element: &ElementHandle) -> Result<String, DriverError> {
        let session = self.lock()?;
        let doc = Html::parse_document(&session.html);
        let element = resolve(&doc, &session, element)?;
        Ok(element.text().collect())
    }

    async fn click(&self, element: &ElementHandle, timeout: Duration) -> Result<(), DriverError> {
        let mut session = self.lock()?;
        if let Some(limit) = self.fail_clicks_after {
            if session.clicks >= limit {
                return Err(DriverError::ClickTimeout {
                    timeout_ms: timeout.as_millis() as u64,
                });
            }
        }
        let href = {
            let doc = Html::parse_document(&session.html);
            let element = resolve(&doc, &session, element)?;
            element.value().attr("href").map(str::to_string)
        };
        session.clicks += 1;
        session.calls.push(DriverCall::Click(href.clone()));

        let Some(href) = href else {
            return Ok(());
        };
        let target = match session.url.as_deref().map(Url::parse) {
            Some(Ok(base)) => base.join(&href),
            _ => Url::parse(&href),
        }
        .map_err(|err| DriverError::Navigation(format!("{href}: {err}")))?;
        self.load(&mut session, target.as_str(), timeout)
    }

    async fn fill(&self, element: &ElementHandle, value: &str) -> Result<(), DriverError> {
        let mut session = self.lock()?;
        {
            let doc = Html::parse_document(&session.html);
            resolve(&doc, &session, element)?;
        }
        session.calls.push(DriverCall::Fill(value.to_string()));
        Ok(())
    }

    async fn wait_for_selector(
        &self,
        selector: &str,
        state: WaitState,
        timeout: Duration,
    ) -> Result<(), DriverError> {
        self.lock()?
            .calls
            .push(DriverCall::WaitFor(selector.to_string()));
        let present = self.matches(selector)? > 0;
        let satisfied = match state {
            WaitState::Attached => present,
            WaitState::Detached => !present,
        };
        if satisfied {
            Ok(())
        } else {
            Err(DriverError::WaitTimeout {
                selector: selector.to_string(),
                timeout_ms: timeout.as_millis() as u64,
            })
        }
    }

    async fn wait_delay(&self, delay: Duration) {
        if let Ok(mut session) = self.lock() {
            session.calls.push(DriverCall::Delay(delay));
        }
    }

    async fn reload(&self, timeout: Duration) -> Result<(), DriverError> {
        let mut session = self.lock()?;
        session.calls.push(DriverCall::Reload);
        let url = session
            .url
            .clone()
            .ok_or_else(|| DriverError::Navigation("nothing to reload".into()))?;
        self.load(&mut session, &url, timeout)
    }
}
