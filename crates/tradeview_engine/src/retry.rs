use std::future::Future;
use std::time::Duration;

use engine_logging::engine_debug;
use serde::{Deserialize, Serialize};

use crate::PageDriver;

/// Bounded attempts with a fixed pause between them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RetryPolicy {
    pub max_attempts: u32,
    pub delay_ms: u64,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 1,
            delay_ms: 15_000,
        }
    }
}

impl RetryPolicy {
    pub fn delay(&self) -> Duration {
        Duration::from_millis(self.delay_ms)
    }
}

/// Runs `op` until it succeeds or `policy.max_attempts` is used up.
///
/// `op` always runs at least once. Pauses go through the driver so fakes can
/// record them instead of sleeping. The last error is returned.
pub async fn with_attempts<T, E, F, Fut>(
    driver: &dyn PageDriver,
    policy: &RetryPolicy,
    mut op: F,
) -> Result<T, E>
where
    F: FnMut(u32) -> Fut,
    Fut: Future<Output = Result<T, E>>,
    E: std::fmt::Display,
{
    let attempts = policy.max_attempts.max(1);
    let mut attempt = 1;
    loop {
        match op(attempt).await {
            Ok(value) => return Ok(value),
            Err(err) if attempt < attempts => {
                engine_debug!("attempt {}/{} failed: {}", attempt, attempts, err);
                driver.wait_delay(policy.delay()).await;
                attempt += 1;
            }
            Err(err) => return Err(err),
        }
    }
}
