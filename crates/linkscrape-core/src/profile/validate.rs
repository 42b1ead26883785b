use super::types::{BatchResult, ProfileRecord};
use crate::{Error, Result};
use url::Url;

/// Schema checks that serde's type checks cannot express
pub trait Validate {
    fn validate(&self) -> Result<()>;
}

impl Validate for ProfileRecord {
    fn validate(&self) -> Result<()> {
        let url = Url::parse(&self.profile_url).map_err(|e| {
            Error::Validation(format!("profile_url '{}' is not a URL: {}", self.profile_url, e))
        })?;
        if url.scheme() != "http" && url.scheme() != "https" {
            return Err(Error::Validation(format!(
                "profile_url '{}' must use http or https",
                self.profile_url
            )));
        }

        if self.basic.profile_url != self.profile_url {
            return Err(Error::Validation(format!(
                "basic.profile_url '{}' does not match profile_url '{}'",
                self.basic.profile_url, self.profile_url
            )));
        }

        for (idx, exp) in self.experience.iter().enumerate() {
            require(&exp.company, || format!("experience[{}].company", idx))?;
            require(&exp.role, || format!("experience[{}].role", idx))?;
        }
        for (idx, edu) in self.education.iter().enumerate() {
            require(&edu.institute, || format!("education[{}].institute", idx))?;
        }
        for (idx, skill) in self.skills.iter().enumerate() {
            require(&skill.name, || format!("skills[{}].name", idx))?;
        }
        for (idx, cert) in self.certifications.iter().enumerate() {
            require(&cert.name, || format!("certifications[{}].name", idx))?;
        }
        for (idx, project) in self.projects.iter().enumerate() {
            require(&project.name, || format!("projects[{}].name", idx))?;
        }

        Ok(())
    }
}

impl Validate for BatchResult {
    fn validate(&self) -> Result<()> {
        tracing::debug!("Validating batch of {} profiles", self.profiles.len());

        if self.metadata.total_profiles != self.profiles.len() {
            return Err(Error::Validation(format!(
                "metadata.total_profiles is {} but {} profiles are present",
                self.metadata.total_profiles,
                self.profiles.len()
            )));
        }

        for (idx, profile) in self.profiles.iter().enumerate() {
            profile.validate().map_err(|e| match e {
                Error::Validation(msg) => Error::Validation(format!("profiles[{}]: {}", idx, msg)),
                other => other,
            })?;
        }

        Ok(())
    }
}

fn require(value: &str, field: impl FnOnce() -> String) -> Result<()> {
    if value.trim().is_empty() {
        return Err(Error::Validation(format!("{} must not be empty", field())));
    }
    Ok(())
}
