use std::cell::Cell;
use std::time::Duration;

use tradeview_engine::{with_attempts, DriverCall, RetryPolicy, StaticSite, StaticSiteDriver};

#[tokio::test]
async fn succeeds_on_a_later_attempt_and_pauses_between() {
    let driver = StaticSiteDriver::new(StaticSite::new());
    let policy = RetryPolicy {
        max_attempts: 3,
        delay_ms: 10,
    };
    let seen = Cell::new(0);

    let result: Result<u32, String> = with_attempts(&driver, &policy, |attempt| {
        seen.set(attempt);
        async move {
            if attempt < 3 {
                Err(format!("attempt {attempt} not ready"))
            } else {
                Ok(attempt)
            }
        }
    })
    .await;

    assert_eq!(result, Ok(3));
    assert_eq!(seen.get(), 3);
    assert_eq!(
        driver.calls(),
        vec![
            DriverCall::Delay(Duration::from_millis(10)),
            DriverCall::Delay(Duration::from_millis(10)),
        ]
    );
}

#[tokio::test]
async fn returns_last_error_once_attempts_are_used_up() {
    let driver = StaticSiteDriver::new(StaticSite::new());
    let policy = RetryPolicy {
        max_attempts: 2,
        delay_ms: 0,
    };

    let result: Result<(), String> = with_attempts(&driver, &policy, |attempt| async move {
        Err(format!("failure {attempt}"))
    })
    .await;

    assert_eq!(result, Err("failure 2".to_string()));
}

#[tokio::test]
async fn zero_attempts_still_runs_once() {
    let driver = StaticSiteDriver::new(StaticSite::new());
    let policy = RetryPolicy {
        max_attempts: 0,
        delay_ms: 0,
    };
    let runs = Cell::new(0);

    let result: Result<(), String> = with_attempts(&driver, &policy, |_| {
        runs.set(runs.get() + 1);
        async { Err("nope".to_string()) }
    })
    .await;

    assert!(result.is_err());
    assert_eq!(runs.get(), 1);
    assert!(driver.calls().is_empty());
}
