use super::selectors::Selectors;
use super::text::{element_text, looks_like_date_range, non_empty, split_bullet, split_range};
use super::top_card::enclosing_section;
use crate::profile::{Certification, Education, Experience, Project, Skill};
use scraper::{ElementRef, Html, Selector};

/// Visible texts of each list item in the section anchored by `anchor`
///
/// The site duplicates text for screen readers; only `aria-hidden` spans
/// carry the copy that is rendered on screen.
fn section_items<'a>(sel: &Selectors, doc: &'a Html, anchor: &Selector) -> Vec<Item<'a>> {
    let Some(section) = doc.select(anchor).next().and_then(enclosing_section) else {
        return Vec::new();
    };

    section
        .select(&sel.list_item)
        .map(|li| Item {
            element: li,
            texts: li
                .select(&sel.visible_span)
                .map(element_text)
                .filter(|t| !t.is_empty())
                .collect(),
        })
        .filter(|item| !item.texts.is_empty())
        .collect()
}

struct Item<'a> {
    element: ElementRef<'a>,
    texts: Vec<String>,
}

fn rest(texts: &[String], from: usize) -> Option<String> {
    if texts.len() > from {
        non_empty(&texts[from..].join(" "))
    } else {
        None
    }
}

pub(crate) fn experience(sel: &Selectors, doc: &Html) -> Vec<Experience> {
    section_items(sel, doc, &sel.experience)
        .into_iter()
        .filter(|item| item.texts.len() >= 3)
        .map(|item| {
            let texts = item.texts;
            let (company, employment_type) = split_bullet(&texts[1]);
            let (range, _) = split_bullet(&texts[2]);
            let (start_date, end_date) = match split_range(&range) {
                Some((start, end)) => (Some(start), end),
                None => (None, None),
            };

            Experience {
                role: texts[0].clone(),
                company,
                employment_type,
                start_date,
                end_date,
                duration: Some(texts[2].clone()),
                location: None,
                description: rest(&texts, 3),
            }
        })
        .collect()
}

pub(crate) fn education(sel: &Selectors, doc: &Html) -> Vec<Education> {
    section_items(sel, doc, &sel.education)
        .into_iter()
        .map(|item| {
            let texts = item.texts;
            let (degree, field_of_study) = match texts.get(1) {
                Some(raw) => match raw.split_once(", ") {
                    Some((degree, field)) => (non_empty(degree), non_empty(field)),
                    None => (Some(raw.clone()), None),
                },
                None => (None, None),
            };
            let (start_year, end_year) = match texts.get(2) {
                Some(raw) => match split_range(raw) {
                    Some((start, end)) => (Some(start), end),
                    None => (Some(raw.clone()), None),
                },
                None => (None, None),
            };

            Education {
                institute: texts[0].clone(),
                degree,
                field_of_study,
                start_year,
                end_year,
                ..Default::default()
            }
        })
        .collect()
}

pub(crate) fn skills(sel: &Selectors, doc: &Html) -> Vec<Skill> {
    let mut skills: Vec<Skill> = Vec::new();
    for item in section_items(sel, doc, &sel.skills) {
        let name = item.texts[0].clone();
        if !skills.iter().any(|s| s.name == name) {
            skills.push(Skill { name });
        }
    }
    skills
}

pub(crate) fn certifications(sel: &Selectors, doc: &Html) -> Vec<Certification> {
    section_items(sel, doc, &sel.certifications)
        .into_iter()
        .map(|item| {
            let texts = &item.texts;
            let credential_id = texts
                .iter()
                .find_map(|t| t.strip_prefix("Credential ID "))
                .and_then(non_empty);

            let (issue_date, expiration_date) = match texts.get(2) {
                Some(raw) if !raw.starts_with("Credential ID ") => {
                    let (issued, expires) = split_bullet(raw);
                    (
                        non_empty(issued.trim_start_matches("Issued ")),
                        expires.and_then(|e| non_empty(e.trim_start_matches("Expires "))),
                    )
                }
                _ => (None, None),
            };

            let credential_url = item
                .element
                .select(&sel.link)
                .find(|a| element_text(*a).to_lowercase().contains("credential"))
                .and_then(|a| a.value().attr("href"))
                .map(str::to_string);

            Certification {
                name: texts[0].clone(),
                issuer: texts.get(1).cloned(),
                issue_date,
                expiration_date,
                credential_id,
                credential_url,
            }
        })
        .collect()
}

pub(crate) fn projects(sel: &Selectors, doc: &Html) -> Vec<Project> {
    section_items(sel, doc, &sel.projects)
        .into_iter()
        .map(|item| {
            let texts = item.texts;
            let dated = texts.get(1).filter(|t| looks_like_date_range(t));
            let (start_date, end_date, description) = match dated.and_then(|t| split_range(t)) {
                Some((start, end)) => (Some(start), end, rest(&texts, 2)),
                None => (None, None, rest(&texts, 1)),
            };

            let url = item
                .element
                .select(&sel.link)
                .filter_map(|a| a.value().attr("href"))
                .find(|href| !href.contains("linkedin.com"))
                .map(str::to_string);

            Project {
                name: texts[0].clone(),
                description,
                start_date,
                end_date,
                url,
            }
        })
        .collect()
}
