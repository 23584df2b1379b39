use std::time::Duration;

use crate::DriverError;

/// Opaque reference to an element of the document a driver currently shows.
///
/// Handles carry the generation of the document they were located in; a
/// driver rejects handles from an earlier navigation or reload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ElementHandle {
    generation: u64,
    index: usize,
}

impl ElementHandle {
    pub fn new(generation: u64, index: usize) -> Self {
        Self { generation, index }
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn index(&self) -> usize {
        self.index
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WaitState {
    /// At least one match is present in the DOM.
    Attached,
    /// No match is present in the DOM.
    Detached,
}

/// Capabilities the harvester needs from a single browser page.
///
/// Every call is a suspension point. Implementations own the page exclusively
/// for the duration of a run.
#[async_trait::async_trait]
pub trait PageDriver: Send + Sync {
    /// URL of the current document, `None` before the first navigation.
    async fn current_url(&self) -> Result<Option<String>, DriverError>;

    /// Navigates and waits for the network to settle.
    async fn navigate(&self, url: &str, timeout: Duration) -> Result<(), DriverError>;

    async fn count(&self, selector: &str) -> Result<usize, DriverError>;

    /// All matches in document order.
    async fn locate_all(&self, selector: &str) -> Result<Vec<ElementHandle>, DriverError>;

    /// Matches among the descendants of `parent`, in document order.
    async fn locate_within(
        &self,
        parent: &ElementHandle,
        selector: &str,
    ) -> Result<Vec<ElementHandle>, DriverError>;

    async fn attribute(
        &self,
        element: &ElementHandle,
        name: &str,
    ) -> Result<Option<String>, DriverError>;

    async fn text(&self, element: &ElementHandle) -> Result<String, DriverError>;

    async fn click(&self, element: &ElementHandle, timeout: Duration) -> Result<(), DriverError>;

    async fn fill(&self, element: &ElementHandle, value: &str) -> Result<(), DriverError>;

    async fn wait_for_selector(
        &self,
        selector: &str,
        state: WaitState,
        timeout: Duration,
    ) -> Result<(), DriverError>;

    /// Unconditional settle delay.
    async fn wait_delay(&self, delay: Duration);

    /// Reloads the current document and waits for the network to settle.
    async fn reload(&self, timeout: Duration) -> Result<(), DriverError>;

    /// First match of `selector`, if any.
    async fn locate_one(&self, selector: &str) -> Result<Option<ElementHandle>, DriverError> {
        Ok(self.locate_all(selector).await?.into_iter().next())
    }
}
