//! Page-level browser operations used by login and navigation.
//!
//! `PageDriver` is the seam between the scraping flow and Chrome. The live
//! implementation wraps a chromiumoxide [`Page`]; tests substitute a fake.

use crate::session::SessionCookie;
use crate::{Error, Result};
use async_trait::async_trait;
use chromiumoxide::Page;
use chromiumoxide::cdp::browser_protocol::network::{
    ClearBrowserCookiesParams, Cookie, CookieParam, CookieSameSite, SetCookiesParams,
    TimeSinceEpoch,
};
use serde_json::Value;
use std::time::Duration;
use tokio::time::Instant;

const POLL_INTERVAL: Duration = Duration::from_millis(250);

#[async_trait]
pub trait PageDriver: Send + Sync {
    async fn goto(&self, url: &str) -> Result<()>;

    async fn current_url(&self) -> Result<String>;

    async fn title(&self) -> Result<String>;

    /// Serialised DOM of the current document
    async fn content(&self) -> Result<String>;

    /// Evaluate a JS expression; `None` when it yields nothing serialisable
    async fn evaluate(&self, expression: &str) -> Result<Option<Value>>;

    /// Poll until `selector` matches; false on timeout
    async fn wait_for_selector(&self, selector: &str, timeout: Duration) -> Result<bool>;

    async fn text_of(&self, selector: &str) -> Result<Option<String>>;

    /// Type `text` into the element one key at a time
    async fn type_into(&self, selector: &str, text: &str, key_delay: Duration) -> Result<()>;

    async fn click(&self, selector: &str) -> Result<()>;

    async fn cookies(&self) -> Result<Vec<SessionCookie>>;

    async fn set_cookies(&self, cookies: &[SessionCookie]) -> Result<()>;

    async fn clear_cookies(&self) -> Result<()>;
}

/// `PageDriver` over a live CDP page
#[derive(Clone)]
pub struct CdpPage {
    page: Page,
}

impl CdpPage {
    pub fn new(page: Page) -> Self {
        Self { page }
    }
}

#[async_trait]
impl PageDriver for CdpPage {
    async fn goto(&self, url: &str) -> Result<()> {
        tracing::debug!("Navigating to {}", url);
        self.page.goto(url).await?;
        Ok(())
    }

    async fn current_url(&self) -> Result<String> {
        Ok(self.page.url().await?.unwrap_or_default())
    }

    async fn title(&self) -> Result<String> {
        Ok(self.page.get_title().await?.unwrap_or_default())
    }

    async fn content(&self) -> Result<String> {
        Ok(self.page.content().await?)
    }

    async fn evaluate(&self, expression: &str) -> Result<Option<Value>> {
        let result = self.page.evaluate(expression).await?;
        Ok(result.into_value::<Value>().ok())
    }

    async fn wait_for_selector(&self, selector: &str, timeout: Duration) -> Result<bool> {
        let deadline = Instant::now() + timeout;
        loop {
            if self.page.find_element(selector).await.is_ok() {
                return Ok(true);
            }
            if Instant::now() >= deadline {
                tracing::debug!("Selector {} not found within {:?}", selector, timeout);
                return Ok(false);
            }
            tokio::time::sleep(POLL_INTERVAL).await;
        }
    }

    async fn text_of(&self, selector: &str) -> Result<Option<String>> {
        match self.page.find_element(selector).await {
            Ok(element) => Ok(element.inner_text().await?),
            Err(_) => Ok(None),
        }
    }

    async fn type_into(&self, selector: &str, text: &str, key_delay: Duration) -> Result<()> {
        let element = self.page.find_element(selector).await?;
        element.click().await?;

        let mut buf = [0u8; 4];
        for c in text.chars() {
            element.type_str(c.encode_utf8(&mut buf)).await?;
            tokio::time::sleep(key_delay).await;
        }
        Ok(())
    }

    async fn click(&self, selector: &str) -> Result<()> {
        self.page.find_element(selector).await?.click().await?;
        Ok(())
    }

    async fn cookies(&self) -> Result<Vec<SessionCookie>> {
        let cookies = self.page.get_cookies().await?;
        Ok(cookies.iter().map(session_cookie).collect())
    }

    async fn set_cookies(&self, cookies: &[SessionCookie]) -> Result<()> {
        let params: Vec<CookieParam> = cookies.iter().map(cookie_param).collect();
        tracing::debug!("Injecting {} cookies", params.len());
        self.page.execute(SetCookiesParams::new(params)).await?;
        Ok(())
    }

    async fn clear_cookies(&self) -> Result<()> {
        self.page
            .execute(ClearBrowserCookiesParams::default())
            .await
            .map_err(|e| Error::Cdp(format!("Failed to clear cookies: {}", e)))?;
        Ok(())
    }
}

fn session_cookie(cookie: &Cookie) -> SessionCookie {
    SessionCookie {
        name: cookie.name.clone(),
        value: cookie.value.clone(),
        domain: cookie.domain.clone(),
        path: cookie.path.clone(),
        // CDP reports -1 for session cookies
        expires: (cookie.expires > 0.0).then_some(cookie.expires),
        http_only: cookie.http_only,
        secure: cookie.secure,
        same_site: cookie.same_site.as_ref().map(|s| same_site_name(s).to_string()),
    }
}

fn cookie_param(cookie: &SessionCookie) -> CookieParam {
    let mut param = CookieParam::new(cookie.name.clone(), cookie.value.clone());
    param.domain = Some(cookie.domain.clone());
    param.path = Some(cookie.path.clone());
    param.secure = Some(cookie.secure);
    param.http_only = Some(cookie.http_only);
    param.expires = cookie.expires.map(TimeSinceEpoch::new);
    param.same_site = cookie.same_site.as_deref().and_then(parse_same_site);
    param
}

fn same_site_name(value: &CookieSameSite) -> &'static str {
    match value {
        CookieSameSite::Strict => "Strict",
        CookieSameSite::Lax => "Lax",
        CookieSameSite::None => "None",
    }
}

fn parse_same_site(value: &str) -> Option<CookieSameSite> {
    match value.to_ascii_lowercase().as_str() {
        "strict" => Some(CookieSameSite::Strict),
        "lax" => Some(CookieSameSite::Lax),
        "none" => Some(CookieSameSite::None),
        _ => None,
    }
}
