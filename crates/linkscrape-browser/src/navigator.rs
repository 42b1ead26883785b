use crate::driver::PageDriver;
use crate::pacing::Pacing;
use crate::{Error, Result};

pub const DEFAULT_MAX_SCROLL_ROUNDS: usize = 25;

const SCROLL_HEIGHT: &str = "document.body.scrollHeight";
const SCROLL_TO_BOTTOM: &str = "window.scrollTo(0, document.body.scrollHeight)";
const SCROLL_UP: &str = "window.scrollBy(0, -100)";
const SCROLL_DOWN: &str = "window.scrollBy(0, 300)";
const OUTER_HTML: &str = "document.documentElement.outerHTML";

/// Rendered markup of one profile
#[derive(Debug, Clone)]
pub struct ProfilePage {
    pub url: String,
    pub html: String,
    /// Contact-info overlay markup; `None` when the overlay could not be opened
    pub contact_html: Option<String>,
}

/// Opens profiles and gets the lazy-loaded sections rendered
pub struct Navigator<'a> {
    driver: &'a dyn PageDriver,
    pacing: Pacing,
    max_scroll_rounds: usize,
}

impl<'a> Navigator<'a> {
    pub fn new(driver: &'a dyn PageDriver, pacing: Pacing) -> Self {
        Self {
            driver,
            pacing,
            max_scroll_rounds: DEFAULT_MAX_SCROLL_ROUNDS,
        }
    }

    pub fn with_max_scroll_rounds(mut self, rounds: usize) -> Self {
        self.max_scroll_rounds = rounds.max(1);
        self
    }

    pub async fn visit(&self, url: &str) -> Result<ProfilePage> {
        tracing::info!("Visiting {}", url);
        self.driver.goto(url).await?;
        self.pacing.pause(2.0, 4.0).await;
        self.check_blocked(url).await?;

        let rounds = self.load_lazy_sections().await?;
        tracing::debug!("Lazy loading finished after {} scroll rounds", rounds);

        let html = self.snapshot().await?;

        let contact_html = match self.open_contact_overlay(url).await {
            Ok(html) => Some(html),
            Err(e) => {
                tracing::warn!("Contact info overlay unavailable for {}: {}", url, e);
                None
            }
        };

        Ok(ProfilePage {
            url: url.to_string(),
            html,
            contact_html,
        })
    }

    async fn check_blocked(&self, url: &str) -> Result<()> {
        let title = self.driver.title().await?;
        if title.contains("404") {
            return Err(Error::Blocked(format!("{} returned a 404 page", url)));
        }

        let current = self.driver.current_url().await?;
        if current.contains("authwall") {
            return Err(Error::Blocked(format!("{} redirected to the auth wall", url)));
        }
        Ok(())
    }

    /// Scroll until the document stops growing; returns the rounds used
    pub async fn load_lazy_sections(&self) -> Result<usize> {
        let mut height = self.scroll_height().await?;

        for round in 1..=self.max_scroll_rounds {
            self.driver.evaluate(SCROLL_TO_BOTTOM).await?;
            self.pacing.pause(1.5, 3.0).await;

            // Small jiggle so intersection observers fire
            self.driver.evaluate(SCROLL_UP).await?;
            self.pacing.pause(0.5, 1.0).await;
            self.driver.evaluate(SCROLL_DOWN).await?;

            let new_height = self.scroll_height().await?;
            tracing::trace!("Scroll round {}: height {} -> {}", round, height, new_height);
            if new_height == height {
                return Ok(round);
            }
            height = new_height;
        }

        tracing::debug!("Stopped scrolling after {} rounds", self.max_scroll_rounds);
        Ok(self.max_scroll_rounds)
    }

    async fn scroll_height(&self) -> Result<u64> {
        Ok(self
            .driver
            .evaluate(SCROLL_HEIGHT)
            .await?
            .and_then(|v| v.as_f64())
            .map(|h| h.max(0.0) as u64)
            .unwrap_or(0))
    }

    async fn snapshot(&self) -> Result<String> {
        match self.driver.evaluate(OUTER_HTML).await? {
            Some(serde_json::Value::String(html)) => Ok(html),
            _ => self.driver.content().await,
        }
    }

    async fn open_contact_overlay(&self, url: &str) -> Result<String> {
        let overlay = contact_overlay_url(url);
        self.driver.goto(&overlay).await?;
        self.pacing.pause(1.0, 2.0).await;
        let html = self.snapshot().await;

        if let Err(e) = self.driver.goto(url).await {
            tracing::warn!("Failed to return to {}: {}", url, e);
        }
        html
    }
}

pub fn contact_overlay_url(profile_url: &str) -> String {
    format!("{}/overlay/contact-info/", profile_url.trim_end_matches('/'))
}
