use crate::Result;
use crate::profile::ProfileRecord;
use serde::Serialize;
use std::io::Write;
use std::path::Path;

/// Upper bound on skills, certifications and projects flattened into one cell
pub const MAX_LIST_ITEMS: usize = 10;

/// One CSV row per profile; only the latest experience and education are kept
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FlatProfileRow {
    #[serde(rename = "Profile URL")]
    pub profile_url: String,
    #[serde(rename = "Full Name")]
    pub full_name: String,
    #[serde(rename = "Headline")]
    pub headline: String,
    #[serde(rename = "Location")]
    pub location: String,
    #[serde(rename = "Connection Count")]
    pub connection_count: Option<u64>,
    #[serde(rename = "Follower Count")]
    pub follower_count: Option<u64>,
    #[serde(rename = "About")]
    pub about: String,
    #[serde(rename = "Email")]
    pub email: String,
    #[serde(rename = "Phone")]
    pub phone: String,
    #[serde(rename = "Birthday")]
    pub birthday: String,
    #[serde(rename = "Connected At")]
    pub connected_at: String,
    #[serde(rename = "Websites")]
    pub websites: String,
    #[serde(rename = "Social Links")]
    pub social_links: String,
    #[serde(rename = "Skills")]
    pub skills: String,
    #[serde(rename = "Certifications")]
    pub certifications: String,
    #[serde(rename = "Projects")]
    pub projects: String,
    #[serde(rename = "Latest Company")]
    pub latest_company: String,
    #[serde(rename = "Latest Role")]
    pub latest_role: String,
    #[serde(rename = "Latest Duration")]
    pub latest_duration: String,
    #[serde(rename = "Latest Education")]
    pub latest_education: String,
    #[serde(rename = "Latest Degree")]
    pub latest_degree: String,
}

impl From<&ProfileRecord> for FlatProfileRow {
    fn from(p: &ProfileRecord) -> Self {
        let contact = p.contact_info.clone().unwrap_or_default();
        let latest_exp = p.experience.first();
        let latest_edu = p.education.first();

        Self {
            profile_url: p.profile_url.clone(),
            full_name: text(&p.basic.full_name),
            headline: text(&p.basic.headline),
            location: text(&p.basic.location),
            connection_count: p.basic.connection_count,
            follower_count: p.basic.follower_count,
            about: text(&p.about),
            email: text(&contact.email),
            phone: text(&contact.phone),
            birthday: text(&contact.birthday),
            connected_at: text(&contact.connected_at),
            websites: contact.websites.join(", "),
            social_links: contact.social_links.join(", "),
            skills: join_bounded(p.skills.iter().map(|s| s.name.as_str())),
            certifications: join_bounded(p.certifications.iter().map(|c| c.name.as_str())),
            projects: join_bounded(p.projects.iter().map(|pr| pr.name.as_str())),
            latest_company: latest_exp.map(|e| e.company.clone()).unwrap_or_default(),
            latest_role: latest_exp.map(|e| e.role.clone()).unwrap_or_default(),
            latest_duration: latest_exp.and_then(|e| e.duration.clone()).unwrap_or_default(),
            latest_education: latest_edu.map(|e| e.institute.clone()).unwrap_or_default(),
            latest_degree: latest_edu.and_then(|e| e.degree.clone()).unwrap_or_default(),
        }
    }
}

fn text(value: &Option<String>) -> String {
    value.clone().unwrap_or_default()
}

fn join_bounded<'a>(names: impl Iterator<Item = &'a str>) -> String {
    names.take(MAX_LIST_ITEMS).collect::<Vec<_>>().join(", ")
}

pub struct CsvExporter;

impl CsvExporter {
    /// Flatten profiles into CSV rows on any writer
    pub fn write<W: Write>(profiles: &[ProfileRecord], writer: W) -> Result<()> {
        let mut csv_writer = csv::Writer::from_writer(writer);
        for profile in profiles {
            csv_writer.serialize(FlatProfileRow::from(profile))?;
        }
        csv_writer.flush()?;
        Ok(())
    }

    /// Write the flattened CSV file. Returns `false` when there was nothing to write.
    pub fn to_file(profiles: &[ProfileRecord], path: &Path) -> Result<bool> {
        if profiles.is_empty() {
            tracing::warn!("No profiles scraped, skipping CSV export");
            return Ok(false);
        }

        let file = std::fs::File::create(path)?;
        Self::write(profiles, std::io::BufWriter::new(file))?;

        tracing::info!("Exported {} rows to {}", profiles.len(), path.display());
        Ok(true)
    }
}
