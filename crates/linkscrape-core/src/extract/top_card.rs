use super::selectors::Selectors;
use super::text::{element_text, non_empty_text, parse_count};
use crate::profile::BasicProfile;
use scraper::{ElementRef, Html};

const OPEN_TO_WORK_MARKER: &str = "#OPEN_TO_WORK";
const OPEN_TO_WORK_PREFIX: &str = "[OPEN TO WORK] ";

pub(crate) fn basic_profile(sel: &Selectors, doc: &Html, url: &str) -> BasicProfile {
    let full_name = doc
        .select(&sel.name_heading)
        .next()
        .or_else(|| doc.select(&sel.any_heading).next())
        .and_then(non_empty_text);

    let picture = doc.select(&sel.picture).next();
    let open_to_work = picture
        .and_then(|img| img.value().attr("title"))
        .is_some_and(|title| title.to_uppercase().contains(OPEN_TO_WORK_MARKER));

    let headline = doc
        .select(&sel.headline)
        .next()
        .and_then(non_empty_text)
        .map(|h| {
            if open_to_work {
                format!("{}{}", OPEN_TO_WORK_PREFIX, h)
            } else {
                h
            }
        });

    BasicProfile {
        profile_url: url.to_string(),
        full_name,
        headline,
        profile_picture: picture
            .and_then(|img| img.value().attr("src"))
            .map(str::to_string),
        location: doc.select(&sel.location).next().and_then(non_empty_text),
        connection_count: find_count(sel, doc, "connection"),
        follower_count: find_count(sel, doc, "follower"),
    }
}

/// Count from a bold span whose own text, or whose parent's text, names `keyword`
fn find_count(sel: &Selectors, doc: &Html, keyword: &str) -> Option<u64> {
    let spans: Vec<ElementRef<'_>> = doc.select(&sel.bold_span).collect();

    let own = spans
        .iter()
        .map(|span| element_text(*span))
        .find(|text| text.to_lowercase().contains(keyword))
        .and_then(|text| parse_count(&text));
    if own.is_some() {
        return own;
    }

    spans.iter().find_map(|span| {
        let parent = span.parent().and_then(ElementRef::wrap)?;
        if element_text(parent).to_lowercase().contains(keyword) {
            parse_count(&element_text(*span))
        } else {
            None
        }
    })
}

pub(crate) fn about(sel: &Selectors, doc: &Html) -> Option<String> {
    let anchor = doc.select(&sel.about_anchor).next()?;
    let section = enclosing_section(anchor)?;

    section
        .select(&sel.about_text)
        .next()
        .or_else(|| section.select(&sel.about_fallback).next())
        .and_then(non_empty_text)
}

/// Nearest `<section>` ancestor of an anchor element
pub(crate) fn enclosing_section(anchor: ElementRef<'_>) -> Option<ElementRef<'_>> {
    anchor
        .ancestors()
        .filter_map(ElementRef::wrap)
        .find(|el| el.value().name() == "section")
}
