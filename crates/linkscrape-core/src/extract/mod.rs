//! Best-effort HTML extraction for profile pages.
//!
//! Every lookup is structural and tied to the site's current markup. A missing
//! or relocated element produces a `None` field or an empty list. Nothing in
//! this module returns an error once the extractor has been built, so a layout
//! change degrades the output instead of aborting a run.
//!
//! ```
//! use linkscrape_core::extract::ProfileExtractor;
//!
//! let extractor = ProfileExtractor::new().unwrap();
//! let html = r#"<html><body><h1 class="text-heading-xlarge">Jane Doe</h1></body></html>"#;
//! let record = extractor.extract_profile(html, "https://www.linkedin.com/in/jdoe");
//!
//! assert_eq!(record.basic.full_name.as_deref(), Some("Jane Doe"));
//! assert!(record.about.is_none());
//! ```

mod contact;
mod sections;
mod selectors;
mod text;
mod top_card;

pub use text::parse_count;

use crate::Result;
use crate::profile::{ContactInfo, ProfileRecord};
use scraper::Html;
use selectors::Selectors;

pub struct ProfileExtractor {
    selectors: Selectors,
}

impl ProfileExtractor {
    pub fn new() -> Result<Self> {
        Ok(Self {
            selectors: Selectors::compile()?,
        })
    }

    /// Parse a fully scrolled profile page. `contact_info` is left empty.
    pub fn extract_profile(&self, html: &str, url: &str) -> ProfileRecord {
        let doc = Html::parse_document(html);
        let sel = &self.selectors;

        let record = ProfileRecord {
            profile_url: url.to_string(),
            basic: top_card::basic_profile(sel, &doc, url),
            about: top_card::about(sel, &doc),
            experience: sections::experience(sel, &doc),
            education: sections::education(sel, &doc),
            skills: sections::skills(sel, &doc),
            certifications: sections::certifications(sel, &doc),
            projects: sections::projects(sel, &doc),
            contact_info: None,
        };

        tracing::debug!(
            "Extracted {}: {} experience, {} education, {} skills, {} certifications, {} projects",
            url,
            record.experience.len(),
            record.education.len(),
            record.skills.len(),
            record.certifications.len(),
            record.projects.len()
        );

        record
    }

    /// Parse the contact-info overlay. `None` when no dialog is present.
    pub fn extract_contact_info(&self, html: &str) -> Option<ContactInfo> {
        let doc = Html::parse_document(html);
        let info = contact::contact_info(&self.selectors, &doc);
        if info.is_none() {
            tracing::warn!("Contact info dialog not found");
        }
        info
    }
}
