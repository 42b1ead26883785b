//! Scraping a list of profiles into one batch.
//!
//! A profile that cannot be loaded, or whose record fails validation, is
//! recorded as a failure and the batch moves on to the next target.

use crate::navigator::Navigator;
use crate::pacing::Pacing;
use linkscrape_core::extract::ProfileExtractor;
use linkscrape_core::profile::{BatchResult, FailedProfile, ProfileRecord, Validate};

/// Seconds between two consecutive profiles
const PROFILE_GAP: (f64, f64) = (2.0, 5.0);

pub struct ProfileScraper<'a> {
    navigator: Navigator<'a>,
    extractor: &'a ProfileExtractor,
    pacing: Pacing,
}

impl<'a> ProfileScraper<'a> {
    pub fn new(navigator: Navigator<'a>, extractor: &'a ProfileExtractor, pacing: Pacing) -> Self {
        Self {
            navigator,
            extractor,
            pacing,
        }
    }

    /// Visit every target in order; `on_start` sees the index and URL first
    pub async fn scrape_all(
        &self,
        targets: &[String],
        mut on_start: impl FnMut(usize, &str),
    ) -> BatchResult {
        let mut profiles = Vec::new();
        let mut failures = Vec::new();

        for (index, url) in targets.iter().enumerate() {
            on_start(index, url);

            match self.scrape_one(url).await {
                Ok(record) => profiles.push(record),
                Err(error) => {
                    tracing::error!("Failed to scrape {}: {}", url, error);
                    failures.push(FailedProfile {
                        url: url.clone(),
                        error,
                    });
                }
            }

            if index + 1 < targets.len() {
                self.pacing.pause(PROFILE_GAP.0, PROFILE_GAP.1).await;
            }
        }

        BatchResult::new(profiles, failures)
    }

    async fn scrape_one(&self, url: &str) -> Result<ProfileRecord, String> {
        let page = self.navigator.visit(url).await.map_err(|e| e.to_string())?;

        let mut record = self.extractor.extract_profile(&page.html, &page.url);
        record.contact_info = page
            .contact_html
            .as_deref()
            .and_then(|html| self.extractor.extract_contact_info(html));

        record.validate().map_err(|e| e.to_string())?;
        tracing::info!(
            "Extracted {} ({} experience, {} education, {} skills)",
            record.basic.full_name.as_deref().unwrap_or("unnamed profile"),
            record.experience.len(),
            record.education.len(),
            record.skills.len()
        );
        Ok(record)
    }
}
