//! Login flow: reuse a cached session when the site still accepts it,
//! otherwise fill in the login form and hand over to the operator for
//! two-factor verification.

use crate::driver::PageDriver;
use crate::pacing::Pacing;
use crate::session::{Session, SessionStore};
use crate::{Error, Result};
use async_trait::async_trait;
use std::fmt;
use std::time::Duration;
use url::Url;

pub const LOGIN_URL: &str = "https://www.linkedin.com/login";
pub const FEED_URL: &str = "https://www.linkedin.com/feed/";

const USERNAME_FIELD: &str = "#username";
const PASSWORD_FIELD: &str = "#password";
const SUBMIT_BUTTON: &str = "button[type='submit']";
const PASSWORD_ERROR: &str = "#error-for-password";
const FEED_ITEM: &str = ".feed-shared-update-v2";

const FORM_TIMEOUT: Duration = Duration::from_secs(10);
const FEED_TIMEOUT: Duration = Duration::from_secs(10);
const DEFAULT_POST_LOGIN_WAIT: Duration = Duration::from_secs(5);

pub const VERIFICATION_INSTRUCTIONS: &str = "Security verification required. \
Complete the challenge in the browser window (enter the code or approve the sign-in), \
then press Enter here to continue.";

#[derive(Clone)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

impl Credentials {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthState {
    LoggedOut,
    AwaitingVerification,
    LoggedIn,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoginOutcome {
    /// Cached cookies were accepted
    Resumed,
    /// The login form was submitted and the new session cached
    FreshLogin,
}

/// Blocks until the operator has dealt with a verification challenge
#[async_trait]
pub trait VerificationPrompt: Send + Sync {
    async fn wait_for_operator(&self, instructions: &str) -> Result<()>;
}

/// Where the browser ended up after a login step
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Landing {
    Feed,
    Verification,
    LoginForm,
    Other,
}

fn classify_landing(current_url: &str) -> Landing {
    let Ok(url) = Url::parse(current_url) else {
        return Landing::Other;
    };
    let path = url.path();

    if path.starts_with("/feed") || path.starts_with("/mynetwork") {
        Landing::Feed
    } else if path.contains("/checkpoint") || path.contains("/challenge") {
        Landing::Verification
    } else if path.starts_with("/login") || path.starts_with("/uas/login") {
        Landing::LoginForm
    } else {
        Landing::Other
    }
}

pub struct Authenticator<'a> {
    driver: &'a dyn PageDriver,
    store: &'a SessionStore,
    pacing: Pacing,
    state: AuthState,
    post_login_wait: Duration,
}

impl<'a> Authenticator<'a> {
    pub fn new(driver: &'a dyn PageDriver, store: &'a SessionStore, pacing: Pacing) -> Self {
        Self {
            driver,
            store,
            pacing,
            state: AuthState::LoggedOut,
            post_login_wait: DEFAULT_POST_LOGIN_WAIT,
        }
    }

    /// Time allowed for the site to redirect after submitting the form
    pub fn with_post_login_wait(mut self, wait: Duration) -> Self {
        self.post_login_wait = wait;
        self
    }

    pub fn state(&self) -> AuthState {
        self.state
    }

    fn transition(&mut self, next: AuthState) {
        if self.state != next {
            tracing::info!("Authentication state: {:?} -> {:?}", self.state, next);
            self.state = next;
        }
    }

    /// Reach the logged-in state, reusing the cached session if possible
    pub async fn login(
        &mut self,
        credentials: Option<&Credentials>,
        prompt: &dyn VerificationPrompt,
    ) -> Result<LoginOutcome> {
        if let Some(session) = self.store.load() {
            tracing::info!("Trying cached session from {}", self.store.path().display());
            self.driver.set_cookies(&session.cookies).await?;

            if self.session_is_live().await? {
                tracing::info!("Cached session accepted");
                self.transition(AuthState::LoggedIn);
                return Ok(LoginOutcome::Resumed);
            }

            tracing::warn!("Cached session was rejected, logging in again");
            self.driver.clear_cookies().await?;
        }

        let credentials = credentials.ok_or_else(|| {
            Error::Authentication(
                "no valid cached session and no credentials supplied \
                 (use --username/--password or LINKEDIN_USERNAME/LINKEDIN_PASSWORD)"
                    .to_string(),
            )
        })?;

        self.fresh_login(credentials, prompt).await?;
        Ok(LoginOutcome::FreshLogin)
    }

    /// Open the feed and check the site did not bounce us to a login page
    pub async fn session_is_live(&self) -> Result<bool> {
        self.driver.goto(FEED_URL).await?;
        self.pacing.pause(2.0, 4.0).await;

        let url = self.driver.current_url().await?;
        tracing::debug!("Session check landed on {}", url);
        Ok(classify_landing(&url) == Landing::Feed)
    }

    async fn fresh_login(
        &mut self,
        credentials: &Credentials,
        prompt: &dyn VerificationPrompt,
    ) -> Result<()> {
        tracing::info!("Logging in as {}", credentials.username);
        self.driver.goto(LOGIN_URL).await?;

        if !self.driver.wait_for_selector(USERNAME_FIELD, FORM_TIMEOUT).await? {
            return Err(Error::Timeout("login form did not appear".to_string()));
        }

        self.driver
            .type_into(USERNAME_FIELD, &credentials.username, self.pacing.key_delay())
            .await?;
        self.pacing.pause(0.5, 1.0).await;
        self.driver
            .type_into(PASSWORD_FIELD, &credentials.password, self.pacing.key_delay())
            .await?;
        self.pacing.pause(0.5, 1.0).await;
        self.driver.click(SUBMIT_BUTTON).await?;

        tokio::time::sleep(self.post_login_wait).await;
        let url = self.driver.current_url().await?;
        tracing::debug!("Login submitted, landed on {}", url);

        match classify_landing(&url) {
            Landing::Feed => {}
            Landing::Verification => self.complete_verification(prompt).await?,
            Landing::LoginForm => {
                let message = self
                    .driver
                    .text_of(PASSWORD_ERROR)
                    .await?
                    .map(|text| text.trim().to_string())
                    .filter(|text| !text.is_empty())
                    .unwrap_or_else(|| "still on the login page, check your credentials".to_string());
                return Err(Error::Authentication(message));
            }
            Landing::Other => {
                tracing::warn!("Unexpected page after login ({}), assuming success", url);
            }
        }

        self.transition(AuthState::LoggedIn);

        let cookies = self.driver.cookies().await?;
        self.store.save(&Session::new(self.store.account(), cookies))?;
        Ok(())
    }

    async fn complete_verification(&mut self, prompt: &dyn VerificationPrompt) -> Result<()> {
        self.transition(AuthState::AwaitingVerification);
        prompt.wait_for_operator(VERIFICATION_INSTRUCTIONS).await?;

        let url = self.driver.current_url().await?;
        if classify_landing(&url) == Landing::Feed {
            return Ok(());
        }

        self.driver.goto(FEED_URL).await?;
        if !self.driver.wait_for_selector(FEED_ITEM, FEED_TIMEOUT).await? {
            tracing::warn!("Feed content did not appear after verification");
        }

        let url = self.driver.current_url().await?;
        if classify_landing(&url) != Landing::Feed {
            return Err(Error::Authentication(format!(
                "verification not completed, browser is at {}",
                url
            )));
        }
        Ok(())
    }
}
