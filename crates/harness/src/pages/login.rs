//! Login (and registration) page object.

use crate::dom::Locator;
use crate::driver::PageDriver;
use crate::error::HarnessResult;
use crate::models::User;

pub struct LoginPage {
    driver: PageDriver,
    url: String,
}

impl LoginPage {
    pub fn new(driver: &PageDriver) -> Self {
        Self {
            url: driver.settings().login_url(),
            driver: driver.clone(),
        }
    }

    fn email_input() -> Locator {
        Locator::css(r#"input[type="email"]"#)
    }

    fn password_input() -> Locator {
        Locator::css(r#"input[type="password"]"#)
    }

    fn submit_button() -> Locator {
        Locator::css(r#"button[type="submit"]"#)
    }

    fn error_message() -> Locator {
        Locator::text_any(&["invalid credentials", "user not found", "invalid password"])
    }

    fn register_link() -> Locator {
        Locator::link_any(&["sign up", "register", "create account"])
    }

    fn login_link() -> Locator {
        Locator::link_any(&["sign in", "login", "already have"])
    }

    fn register_name_input() -> Locator {
        Locator::css(r#"input[name="name"]"#)
    }

    pub async fn navigate(&self) -> HarnessResult<()> {
        self.driver.goto(&self.url).await?;
        self.driver.wait_for_url("/login").await?;
        self.driver.expect_visible(&Self::email_input()).await
    }

    /// Fill credentials, submit, and wait for the dashboard redirect.
    pub async fn login(&self, user: &User) -> HarnessResult<()> {
        self.driver.fill(&Self::email_input(), &user.email).await?;
        self.driver
            .fill(&Self::password_input(), &user.password)
            .await?;
        self.driver.click(&Self::submit_button()).await?;
        self.driver.wait_for_url("/dashboard").await
    }

    /// Submit credentials that must be rejected; passes once the error
    /// state is visible and no redirect happened.
    pub async fn login_expecting_failure(
        &self,
        email: &str,
        password: &str,
    ) -> HarnessResult<()> {
        self.driver.fill(&Self::email_input(), email).await?;
        self.driver.fill(&Self::password_input(), password).await?;
        self.driver.click(&Self::submit_button()).await?;
        self.driver.expect_visible(&Self::error_message()).await?;
        self.expect_on_login_page().await
    }

    pub async fn submit_empty(&self) -> HarnessResult<()> {
        self.driver.click(&Self::submit_button()).await
    }

    pub async fn error_message_text(&self) -> HarnessResult<Option<String>> {
        self.driver.get_text(&Self::error_message()).await
    }

    pub async fn goto_register(&self) -> HarnessResult<()> {
        self.driver.click(&Self::register_link()).await?;
        self.driver.wait_for_url("/register").await
    }

    pub async fn back_to_login(&self) -> HarnessResult<()> {
        self.driver.click(&Self::login_link()).await?;
        self.driver.wait_for_url("/login").await
    }

    // Assertions

    pub async fn expect_loaded(&self) -> HarnessResult<()> {
        self.driver.expect_visible(&Self::email_input()).await?;
        self.driver.expect_visible(&Self::password_input()).await?;
        self.driver.expect_visible(&Self::submit_button()).await
    }

    pub async fn expect_error_message(&self) -> HarnessResult<()> {
        self.driver.expect_visible(&Self::error_message()).await
    }

    pub async fn expect_on_login_page(&self) -> HarnessResult<()> {
        self.driver.expect_url("/login").await
    }

    /// The registration form carries a name field on top of the login ones.
    pub async fn expect_register_form(&self) -> HarnessResult<()> {
        self.driver
            .expect_visible(&Self::register_name_input())
            .await?;
        self.driver.expect_visible(&Self::email_input()).await?;
        self.driver.expect_visible(&Self::password_input()).await?;
        self.driver.expect_visible(&Self::submit_button()).await
    }
}
