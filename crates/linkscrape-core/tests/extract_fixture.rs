use linkscrape_core::extract::ProfileExtractor;
use linkscrape_core::profile::{BatchResult, Validate};
use std::path::PathBuf;

const URL: &str = "https://www.linkedin.com/in/jdoe";

fn fixture(name: &str) -> String {
    let path = PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name);
    std::fs::read_to_string(path).unwrap()
}

#[test]
fn test_extracts_top_card() {
    let extractor = ProfileExtractor::new().unwrap();
    let record = extractor.extract_profile(&fixture("profile.html"), URL);

    assert_eq!(record.profile_url, URL);
    assert_eq!(record.basic.profile_url, URL);
    assert_eq!(record.basic.full_name.as_deref(), Some("Jane Doe"));
    assert_eq!(
        record.basic.headline.as_deref(),
        Some("Staff Engineer at Acme | Distributed systems")
    );
    assert_eq!(record.basic.location.as_deref(), Some("Berlin, Germany"));
    assert_eq!(
        record.basic.profile_picture.as_deref(),
        Some("https://media.example.com/jane.jpg")
    );
    assert_eq!(record.basic.connection_count, Some(500));
    assert_eq!(record.basic.follower_count, Some(2345));
    assert_eq!(
        record.about.as_deref(),
        Some("I build reliable backend systems. Mostly in Rust.")
    );
}

#[test]
fn test_extracts_experience() {
    let extractor = ProfileExtractor::new().unwrap();
    let record = extractor.extract_profile(&fixture("profile.html"), URL);

    assert_eq!(record.experience.len(), 2);

    let latest = &record.experience[0];
    assert_eq!(latest.role, "Staff Engineer");
    assert_eq!(latest.company, "Acme Corp");
    assert_eq!(latest.employment_type.as_deref(), Some("Full-time"));
    assert_eq!(latest.start_date.as_deref(), Some("Jan 2020"));
    assert_eq!(latest.end_date.as_deref(), Some("Present"));
    assert_eq!(
        latest.duration.as_deref(),
        Some("Jan 2020 - Present · 4 yrs 2 mos")
    );
    assert_eq!(
        latest.description.as_deref(),
        Some("Led the storage team. Skills: Rust")
    );

    let previous = &record.experience[1];
    assert_eq!(previous.company, "Initech");
    assert_eq!(previous.employment_type, None);
    assert_eq!(previous.end_date.as_deref(), Some("2019"));
    assert_eq!(previous.description, None);
}

#[test]
fn test_extracts_education_certifications_projects_skills() {
    let extractor = ProfileExtractor::new().unwrap();
    let record = extractor.extract_profile(&fixture("profile.html"), URL);

    assert_eq!(record.education.len(), 2);
    assert_eq!(record.education[0].institute, "Technical University");
    assert_eq!(record.education[0].degree.as_deref(), Some("Master of Science"));
    assert_eq!(
        record.education[0].field_of_study.as_deref(),
        Some("Computer Science")
    );
    assert_eq!(record.education[0].start_year.as_deref(), Some("2014"));
    assert_eq!(record.education[0].end_year.as_deref(), Some("2016"));
    assert_eq!(record.education[1].institute, "City College");
    assert_eq!(record.education[1].degree, None);

    assert_eq!(record.certifications.len(), 1);
    let cert = &record.certifications[0];
    assert_eq!(cert.name, "Certified Kubernetes Administrator");
    assert_eq!(cert.issuer.as_deref(), Some("The Linux Foundation"));
    assert_eq!(cert.issue_date.as_deref(), Some("Mar 2022"));
    assert_eq!(cert.expiration_date.as_deref(), Some("Mar 2025"));
    assert_eq!(cert.credential_id.as_deref(), Some("ABC-123"));
    assert_eq!(
        cert.credential_url.as_deref(),
        Some("https://creds.example.com/abc-123")
    );

    assert_eq!(record.projects.len(), 2);
    assert_eq!(record.projects[0].name, "tinykv");
    assert_eq!(record.projects[0].start_date.as_deref(), Some("Jan 2021"));
    assert_eq!(record.projects[0].end_date.as_deref(), Some("Mar 2021"));
    assert_eq!(
        record.projects[0].description.as_deref(),
        Some("An embedded key-value store.")
    );
    assert_eq!(
        record.projects[0].url.as_deref(),
        Some("https://github.com/jdoe/tinykv")
    );
    assert_eq!(record.projects[1].name, "dotfiles");
    assert_eq!(record.projects[1].description, None);

    let skills: Vec<&str> = record.skills.iter().map(|s| s.name.as_str()).collect();
    assert_eq!(skills, vec!["Rust", "Distributed Systems", "PostgreSQL"]);
}

#[test]
fn test_extraction_is_deterministic_and_idempotent() {
    let html = fixture("profile.html");
    let extractor = ProfileExtractor::new().unwrap();

    let first = extractor.extract_profile(&html, URL);
    let second = extractor.extract_profile(&html, URL);
    let fresh = ProfileExtractor::new().unwrap().extract_profile(&html, URL);

    assert_eq!(first, second);
    assert_eq!(first, fresh);
}

#[test]
fn test_extracts_contact_overlay() {
    let extractor = ProfileExtractor::new().unwrap();
    let contact = extractor
        .extract_contact_info(&fixture("contact_overlay.html"))
        .unwrap();

    assert_eq!(contact.email.as_deref(), Some("jane@example.com"));
    assert_eq!(contact.phone.as_deref(), Some("+49 30 1234567"));
    assert_eq!(
        contact.websites,
        vec!["https://jane.example.com", "https://blog.example.com"]
    );
    assert_eq!(contact.social_links, vec!["https://twitter.com/janedoe"]);
    assert_eq!(contact.birthday.as_deref(), Some("March 3"));
    assert_eq!(contact.connected_at.as_deref(), Some("Jun 12, 2023"));
}

#[test]
fn test_extracted_record_passes_validation() {
    let extractor = ProfileExtractor::new().unwrap();
    let mut record = extractor.extract_profile(&fixture("profile.html"), URL);
    record.contact_info = extractor.extract_contact_info(&fixture("contact_overlay.html"));

    assert!(record.validate().is_ok());

    let batch = BatchResult::new(vec![record], Vec::new());
    assert!(batch.validate().is_ok());
}
