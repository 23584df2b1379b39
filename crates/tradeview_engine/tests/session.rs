use tradeview_engine::{
    dismiss_consent, login, Credentials, DriverCall, DriverError, HarvestSettings, Selectors,
    StaticSite, StaticSiteDriver,
};

const LOGIN_URL: &str = "https://example.test/account/login";
const HOME_URL: &str = "https://example.test/home";

fn login_page(with_consent: bool) -> String {
    let consent = if with_consent {
        r#"<button id="onetrust-accept-btn-handler">Accept</button>"#
    } else {
        ""
    };
    format!(
        r#"<html><body>{consent}<form>
        <input name="email"><input name="password" type="password">
        <a id="main_login_signin" href="{HOME_URL}">Sign in</a>
        </form></body></html>"#
    )
}

fn credentials() -> Credentials {
    Credentials {
        email: "analyst@example.test".into(),
        password: "hunter2".into(),
    }
}

#[tokio::test]
async fn login_fills_form_and_waits_for_it_to_go_away() {
    let site = StaticSite::new()
        .with_page(LOGIN_URL, login_page(true))
        .with_page(HOME_URL, "<html><body>Welcome</body></html>");
    let driver = StaticSiteDriver::new(site);

    login(
        &driver,
        &credentials(),
        LOGIN_URL,
        &Selectors::default(),
        &HarvestSettings::default(),
    )
    .await
    .unwrap();

    let calls = driver.calls();
    assert!(calls.contains(&DriverCall::Fill("analyst@example.test".into())));
    assert!(calls.contains(&DriverCall::Fill("hunter2".into())));
    assert!(calls.contains(&DriverCall::Click(Some(HOME_URL.to_string()))));
    // Consent button plus submit.
    assert_eq!(driver.click_count(), 2);
}

#[tokio::test]
async fn login_without_form_is_an_error() {
    let site = StaticSite::new().with_page(LOGIN_URL, "<html><body>Maintenance</body></html>");
    let driver = StaticSiteDriver::new(site);

    let err = login(
        &driver,
        &credentials(),
        LOGIN_URL,
        &Selectors::default(),
        &HarvestSettings::default(),
    )
    .await
    .unwrap_err();
    assert!(matches!(err, DriverError::Navigation(_)));
}

#[tokio::test]
async fn missing_consent_button_is_ignored() {
    let site = StaticSite::new().with_page(LOGIN_URL, login_page(false));
    let driver = StaticSiteDriver::new(site);
    use tradeview_engine::PageDriver;
    driver
        .navigate(LOGIN_URL, std::time::Duration::from_secs(1))
        .await
        .unwrap();

    dismiss_consent(&driver, &Selectors::default(), &HarvestSettings::default()).await;
    assert_eq!(driver.click_count(), 0);
}

#[test]
fn credentials_debug_redacts_password() {
    let rendered = format!("{:?}", credentials());
    assert!(rendered.contains("analyst@example.test"));
    assert!(!rendered.contains("hunter2"));
}
