use std::fmt;

use engine_logging::{engine_debug, engine_info};

use crate::{DriverError, ElementHandle, HarvestSettings, PageDriver, Selectors, WaitState};

#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Clicks the cookie-consent button if it shows up. Never fails.
pub async fn dismiss_consent(
    driver: &dyn PageDriver,
    selectors: &Selectors,
    settings: &HarvestSettings,
) {
    let result = click_consent(driver, selectors, settings).await;
    match result {
        Ok(true) => engine_info!("cookie consent handled"),
        Ok(false) => engine_debug!("no cookie consent button found"),
        Err(err) => engine_debug!("cookie consent could not be dismissed: {}", err),
    }
}

async fn click_consent(
    driver: &dyn PageDriver,
    selectors: &Selectors,
    settings: &HarvestSettings,
) -> Result<bool, DriverError> {
    let appeared = driver
        .wait_for_selector(
            &selectors.consent_button,
            WaitState::Attached,
            settings.consent_timeout(),
        )
        .await;
    if appeared.is_err() {
        return Ok(false);
    }
    let Some(button) = driver.locate_one(&selectors.consent_button).await? else {
        return Ok(false);
    };
    driver.click(&button, settings.consent_timeout()).await?;
    Ok(true)
}

/// Signs in through the login form and waits until the form is gone.
pub async fn login(
    driver: &dyn PageDriver,
    credentials: &Credentials,
    login_url: &str,
    selectors: &Selectors,
    settings: &HarvestSettings,
) -> Result<(), DriverError> {
    driver.navigate(login_url, settings.navigation_timeout()).await?;
    engine_info!("opened login page");
    dismiss_consent(driver, selectors, settings).await;

    let email = required(driver, &selectors.login_email).await?;
    driver.fill(&email, &credentials.email).await?;
    let password = required(driver, &selectors.login_password).await?;
    driver.fill(&password, &credentials.password).await?;
    let submit = required(driver, &selectors.login_submit).await?;
    driver.click(&submit, settings.click_timeout()).await?;
    engine_info!("login form submitted");

    driver
        .wait_for_selector(
            &selectors.login_submit,
            WaitState::Detached,
            settings.navigation_timeout(),
        )
        .await?;
    engine_info!("login navigation completed");
    Ok(())
}

async fn required(
    driver: &dyn PageDriver,
    selector: &str,
) -> Result<ElementHandle, DriverError> {
    driver
        .locate_one(selector)
        .await?
        .ok_or_else(|| DriverError::Navigation(format!("login page has no {selector:?}")))
}
