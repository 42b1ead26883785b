use crate::{Error, Result};
use scraper::Selector;

/// Compiled CSS selectors for the current profile page layout
pub(crate) struct Selectors {
    pub name_heading: Selector,
    pub any_heading: Selector,
    pub headline: Selector,
    pub location: Selector,
    pub picture: Selector,
    pub bold_span: Selector,
    pub about_anchor: Selector,
    pub about_text: Selector,
    pub about_fallback: Selector,
    pub list_item: Selector,
    pub visible_span: Selector,
    pub link: Selector,
    pub dialog: Selector,
    pub section: Selector,
    pub section_heading: Selector,
    pub mailto: Selector,
    pub phone: Selector,
    pub contact_type_link: Selector,
    pub experience: Selector,
    pub education: Selector,
    pub skills: Selector,
    pub certifications: Selector,
    pub projects: Selector,
}

impl Selectors {
    pub fn compile() -> Result<Self> {
        Ok(Self {
            name_heading: parse("h1.text-heading-xlarge")?,
            any_heading: parse("h1")?,
            headline: parse("div.text-body-medium")?,
            location: parse("span.text-body-small.inline.t-black--light.break-words")?,
            picture: parse(".pv-top-card-profile-picture img")?,
            bold_span: parse("span.t-bold")?,
            about_anchor: parse("div#about")?,
            about_text: parse("div.display-flex.ph5.pv3")?,
            about_fallback: parse("div.inline-show-more-text span[aria-hidden=\"true\"]")?,
            list_item: parse("li.artdeco-list__item")?,
            visible_span: parse("span[aria-hidden=\"true\"]")?,
            link: parse("a[href]")?,
            dialog: parse("dialog, [role=\"dialog\"]")?,
            section: parse("section")?,
            section_heading: parse("h3")?,
            mailto: parse("a[href^=\"mailto:\"]")?,
            phone: parse("span.t-14")?,
            contact_type_link: parse("section.pv-contact-info__contact-type a[href]")?,
            experience: parse("div#experience")?,
            education: parse("div#education")?,
            skills: parse("div#skills")?,
            certifications: parse("div#licenses_and_certifications")?,
            projects: parse("div#projects")?,
        })
    }
}

fn parse(css: &'static str) -> Result<Selector> {
    Selector::parse(css).map_err(|e| Error::Selector(format!("{}: {:?}", css, e)))
}
