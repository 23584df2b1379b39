//! Chromium-backed page driver using chromiumoxide.
//!
//! Network settlement is approximated by the page load event that
//! `Page::goto` and `Page::reload` already wait for.

use std::time::Duration;

use chromiumoxide::browser::{Browser, BrowserConfig};
use chromiumoxide::element::Element;
use chromiumoxide::page::Page;
use engine_logging::{engine_debug, engine_info};
use futures_util::StreamExt;
use tokio::sync::Mutex;
use tokio::task::JoinHandle;
use tokio::time::{sleep, timeout as within, Instant};

use crate::{DriverError, ElementHandle, PageDriver, WaitState};

const POLL_INTERVAL: Duration = Duration::from_millis(250);

#[derive(Default)]
struct Registry {
    generation: u64,
    elements: Vec<Element>,
}

impl Registry {
    fn reset(&mut self) {
        self.generation += 1;
        self.elements.clear();
    }

    fn register(&mut self, elements: Vec<Element>) -> Vec<ElementHandle> {
        elements
            .into_iter()
            .map(|element| {
                self.elements.push(element);
                ElementHandle::new(self.generation, self.elements.len() - 1)
            })
            .collect()
    }

    fn get(&self, handle: &ElementHandle) -> Result<&Element, DriverError> {
        if handle.generation() != self.generation {
            return Err(DriverError::StaleElement);
        }
        self.elements
            .get(handle.index())
            .ok_or(DriverError::StaleElement)
    }
}

/// A single Chromium tab driven over the DevTools protocol.
pub struct ChromiumDriver {
    browser: Browser,
    page: Page,
    registry: Mutex<Registry>,
    handler: JoinHandle<()>,
}

impl ChromiumDriver {
    /// Launches Chromium and opens a blank tab.
    pub async fn launch(headless: bool) -> Result<Self, DriverError> {
        let mut builder = BrowserConfig::builder()
            .arg("--disable-gpu")
            .arg("--disable-dev-shm-usage")
            .arg("--disable-extensions");
        if !headless {
            builder = builder.with_head();
        }
        let config = builder.build().map_err(DriverError::Protocol)?;

        let (browser, mut handler) = Browser::launch(config)
            .await
            .map_err(|err| DriverError::Protocol(format!("failed to launch Chromium: {err}")))?;
        let handler = tokio::spawn(async move {
            while let Some(event) = handler.next().await {
                if let Err(err) = event {
                    engine_debug!("browser handler event error: {}", err);
                }
            }
        });

        let page = browser.new_page("about:blank").await.map_err(protocol)?;
        engine_info!("chromium launched (headless: {})", headless);
        Ok(Self {
            browser,
            page,
            registry: Mutex::new(Registry::default()),
            handler,
        })
    }

    /// Closes the browser and stops the protocol handler.
    pub async fn close(mut self) -> Result<(), DriverError> {
        self.browser.close().await.map_err(protocol)?;
        self.handler.abort();
        Ok(())
    }

    async fn find(&self, selector: &str) -> Result<Vec<Element>, DriverError> {
        self.page.find_elements(selector).await.map_err(protocol)
    }
}

fn protocol(err: impl std::fmt::Display) -> DriverError {
    DriverError::Protocol(err.to_string())
}

fn millis(duration: Duration) -> u64 {
    duration.as_millis() as u64
}

#[async_trait::async_trait]
impl PageDriver for ChromiumDriver {
    async fn current_url(&self) -> Result<Option<String>, DriverError> {
        let url = self.page.url().await.map_err(protocol)?;
        Ok(url.filter(|u| u != "about:blank"))
    }

    async fn navigate(&self, url: &str, timeout: Duration) -> Result<(), DriverError> {
        let mut registry = self.registry.lock().await;
        registry.reset();
        match within(timeout, self.page.goto(url)).await {
            Ok(Ok(_)) => Ok(()),
            Ok(Err(err)) => Err(DriverError::Navigation(err.to_string())),
            Err(_) => Err(DriverError::NavigationTimeout {
                url: url.to_string(),
                timeout_ms: millis(timeout),
            }),
        }
    }

    async fn count(&self, selector: &str) -> Result<usize, DriverError> {
        Ok(self.find(selector).await?.len())
    }

    async fn locate_all(&self, selector: &str) -> Result<Vec<ElementHandle>, DriverError> {
        let elements = self.find(selector).await?;
        Ok(self.registry.lock().await.register(elements))
    }

    async fn locate_within(
        &self,
        parent: &ElementHandle,
        selector: &str,
    ) -> Result<Vec<ElementHandle>, DriverError> {
        let mut registry = self.registry.lock().await;
        let elements = registry
            .get(parent)?
            .find_elements(selector)
            .await
            .map_err(protocol)?;
        Ok(registry.register(elements))
    }

    async fn attribute(
        &self,
        element: &ElementHandle,
        name: &str,
    ) -> Result<Option<String>, DriverError> {
        let registry = self.registry.lock().await;
        registry
            .get(element)?
            .attribute(name)
            .await
            .map_err(protocol)
    }

    async fn text(&self, element: &ElementHandle) -> Result<String, DriverError> {
        let registry = self.registry.lock().await;
        let text = registry
            .get(element)?
            .inner_text()
            .await
            .map_err(protocol)?;
        Ok(text.unwrap_or_default())
    }

    async fn click(&self, element: &ElementHandle, timeout: Duration) -> Result<(), DriverError> {
        let registry = self.registry.lock().await;
        let element = registry.get(element)?;
        match within(timeout, element.click()).await {
            Ok(Ok(_)) => Ok(()),
            Ok(Err(err)) => Err(protocol(err)),
            Err(_) => Err(DriverError::ClickTimeout {
                timeout_ms: millis(timeout),
            }),
        }
    }

    async fn fill(&self, element: &ElementHandle, value: &str) -> Result<(), DriverError> {
        let registry = self.registry.lock().await;
        let element = registry.get(element)?;
        element.click().await.map_err(protocol)?;
        element.type_str(value).await.map_err(protocol)?;
        Ok(())
    }

    async fn wait_for_selector(
        &self,
        selector: &str,
        state: WaitState,
        timeout: Duration,
    ) -> Result<(), DriverError> {
        let deadline = Instant::now() + timeout;
        loop {
            let present = !self.find(selector).await?.is_empty();
            let satisfied = match state {
                WaitState::Attached => present,
                WaitState::Detached => !present,
            };
            if satisfied {
                return Ok(());
            }
            if Instant::now() >= deadline {
                return Err(DriverError::WaitTimeout {
                    selector: selector.to_string(),
                    timeout_ms: millis(timeout),
                });
            }
            sleep(POLL_INTERVAL).await;
        }
    }

    async fn wait_delay(&self, delay: Duration) {
        sleep(delay).await;
    }

    async fn reload(&self, timeout: Duration) -> Result<(), DriverError> {
        let mut registry = self.registry.lock().await;
        registry.reset();
        match within(timeout, self.page.reload()).await {
            Ok(Ok(_)) => Ok(()),
            Ok(Err(err)) => Err(DriverError::Navigation(err.to_string())),
            Err(_) => Err(DriverError::NavigationTimeout {
                url: self
                    .page
                    .url()
                    .await
                    .ok()
                    .flatten()
                    .unwrap_or_default(),
                timeout_ms: millis(timeout),
            }),
        }
    }
}
