use super::selectors::Selectors;
use super::text::{collapse, element_text, non_empty, non_empty_text};
use crate::profile::ContactInfo;
use scraper::{ElementRef, Html};

/// Heading-classified block of the contact-info dialog
enum ContactSection {
    Email,
    Website,
    Phone,
    Birthday,
    Connected,
    Other,
}

impl ContactSection {
    fn classify(heading: &str) -> Self {
        if heading.contains("Email") {
            Self::Email
        } else if heading.contains("Website") {
            Self::Website
        } else if heading.contains("Phone") {
            Self::Phone
        } else if heading.contains("Birthday") {
            Self::Birthday
        } else if heading.contains("Connected") {
            Self::Connected
        } else {
            Self::Other
        }
    }
}

pub(crate) fn contact_info(sel: &Selectors, doc: &Html) -> Option<ContactInfo> {
    let dialog = doc.select(&sel.dialog).next()?;
    let mut info = ContactInfo::default();

    for section in dialog.select(&sel.section) {
        let Some(heading) = section.select(&sel.section_heading).next() else {
            continue;
        };
        let heading_text = element_text(heading);

        match ContactSection::classify(&heading_text) {
            ContactSection::Email => {
                if info.email.is_none() {
                    info.email = section.select(&sel.mailto).next().and_then(|a| {
                        non_empty_text(a).or_else(|| {
                            a.value()
                                .attr("href")
                                .and_then(|h| non_empty(h.trim_start_matches("mailto:")))
                        })
                    });
                }
            }
            ContactSection::Website => {
                for link in section.select(&sel.link) {
                    if let Some(href) = link.value().attr("href") {
                        push_unique(&mut info.websites, href);
                    }
                }
            }
            ContactSection::Phone => {
                if info.phone.is_none() {
                    info.phone = section
                        .select(&sel.phone)
                        .next()
                        .and_then(non_empty_text)
                        .or_else(|| text_after_heading(section, &heading_text));
                }
            }
            ContactSection::Birthday => {
                info.birthday = text_after_heading(section, &heading_text);
            }
            ContactSection::Connected => {
                info.connected_at = text_after_heading(section, &heading_text);
            }
            ContactSection::Other => {}
        }
    }

    let social: Vec<String> = dialog
        .select(&sel.contact_type_link)
        .filter_map(|a| a.value().attr("href"))
        .filter(|href| !href.contains("linkedin.com/in/") && !href.starts_with("mailto:"))
        .filter(|href| !info.websites.iter().any(|w| w.as_str() == *href))
        .map(str::to_string)
        .collect();
    for href in social {
        push_unique(&mut info.social_links, &href);
    }

    Some(info)
}

fn text_after_heading(section: ElementRef<'_>, heading: &str) -> Option<String> {
    let full = element_text(section);
    non_empty(&collapse(&full.replacen(heading, "", 1)))
}

fn push_unique(list: &mut Vec<String>, value: &str) {
    if !list.iter().any(|v| v == value) {
        list.push(value.to_string());
    }
}
