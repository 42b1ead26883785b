//! Session cache: browser cookies persisted per account so a run can skip
//! the login form.

use crate::Result;
use serde::{Deserialize, Serialize};
use std::io::Write;
use std::path::{Path, PathBuf};

/// Slug used when no username is known
pub const DEFAULT_ACCOUNT: &str = "default";

/// One browser cookie as persisted in the session cache
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionCookie {
    pub name: String,
    pub value: String,
    pub domain: String,
    pub path: String,
    /// Unix seconds; absent for browser-session cookies
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expires: Option<f64>,
    #[serde(default)]
    pub http_only: bool,
    #[serde(default)]
    pub secure: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub same_site: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Session {
    pub account: String,
    pub saved_at: String,
    pub cookies: Vec<SessionCookie>,
}

impl Session {
    pub fn new(account: impl Into<String>, cookies: Vec<SessionCookie>) -> Self {
        Self {
            account: account.into(),
            saved_at: chrono::Local::now().to_rfc3339(),
            cookies,
        }
    }

    pub fn cookie(&self, name: &str) -> Option<&SessionCookie> {
        self.cookies.iter().find(|c| c.name == name)
    }
}

/// Loads and saves the session cache for one account
#[derive(Debug, Clone)]
pub struct SessionStore {
    path: PathBuf,
    account: String,
}

impl SessionStore {
    pub fn new(path: impl Into<PathBuf>, account: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            account: account.into(),
        }
    }

    /// Store at `~/.linkscrape/sessions/<slug>.json`
    pub fn for_account(account: Option<&str>) -> Result<Self> {
        Ok(Self::in_dir(&default_dir()?, account))
    }

    /// Store for `account` inside `dir`
    ///
    /// Without an account the single session cached in `dir` is picked up,
    /// so a run that logged in with a username can be resumed without one.
    /// With zero or several cached sessions the `default` slot is used.
    pub fn in_dir(dir: &Path, account: Option<&str>) -> Self {
        if let Some(account) = account {
            return Self::new(dir.join(format!("{}.json", account_slug(account))), account);
        }

        match Self::sole_cached(dir) {
            Some(store) => {
                tracing::debug!(
                    "No account given, using the cached session for '{}'",
                    store.account
                );
                store
            }
            None => Self::new(dir.join(format!("{}.json", DEFAULT_ACCOUNT)), DEFAULT_ACCOUNT),
        }
    }

    /// Store for an explicit cache file; without an account, the one recorded
    /// in the file is used
    pub fn at_path(path: impl Into<PathBuf>, account: Option<&str>) -> Self {
        let path = path.into();
        let account = match account {
            Some(account) => account.to_string(),
            None => recorded_account(&path).unwrap_or_else(|| DEFAULT_ACCOUNT.to_string()),
        };
        Self::new(path, account)
    }

    fn sole_cached(dir: &Path) -> Option<Self> {
        let mut found: Vec<Self> = std::fs::read_dir(dir)
            .ok()?
            .filter_map(|entry| entry.ok().map(|e| e.path()))
            .filter(|path| path.extension().is_some_and(|ext| ext == "json"))
            .filter_map(|path| recorded_account(&path).map(|account| Self::new(path, account)))
            .collect();

        if found.len() == 1 { found.pop() } else { None }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn account(&self) -> &str {
        &self.account
    }

    /// Cached session, or `None` when missing, corrupt or for another account
    pub fn load(&self) -> Option<Session> {
        let contents = match std::fs::read_to_string(&self.path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!("No session cache at {}", self.path.display());
                return None;
            }
            Err(e) => {
                tracing::warn!("Cannot read session cache {}: {}", self.path.display(), e);
                return None;
            }
        };

        let session: Session = match serde_json::from_str(&contents) {
            Ok(session) => session,
            Err(e) => {
                tracing::warn!("Ignoring corrupt session cache {}: {}", self.path.display(), e);
                return None;
            }
        };

        if session.account != self.account {
            tracing::warn!(
                "Session cache {} belongs to '{}', not '{}'",
                self.path.display(),
                session.account,
                self.account
            );
            return None;
        }

        tracing::debug!(
            "Loaded session for '{}' ({} cookies, saved {})",
            session.account,
            session.cookies.len(),
            session.saved_at
        );
        Some(session)
    }

    /// Overwrite the cache with `session`
    pub fn save(&self, session: &Session) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let json = serde_json::to_string_pretty(session)?;

        let mut options = std::fs::OpenOptions::new();
        options.write(true).create(true).truncate(true);
        #[cfg(unix)]
        {
            use std::os::unix::fs::OpenOptionsExt;
            options.mode(0o600);
        }
        let mut file = options.open(&self.path)?;

        // `mode` only applies to newly created files
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            file.set_permissions(std::fs::Permissions::from_mode(0o600))?;
        }
        file.write_all(json.as_bytes())?;

        tracing::info!("Session saved to {}", self.path.display());
        Ok(())
    }

    /// Delete the cache file; false when there was nothing to delete
    pub fn clear(&self) -> Result<bool> {
        match std::fs::remove_file(&self.path) {
            Ok(()) => {
                tracing::info!("Session cache removed: {}", self.path.display());
                Ok(true)
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(false),
            Err(e) => Err(e.into()),
        }
    }
}

fn recorded_account(path: &Path) -> Option<String> {
    let contents = std::fs::read_to_string(path).ok()?;
    serde_json::from_str::<Session>(&contents)
        .ok()
        .map(|session| session.account)
}

pub fn default_dir() -> Result<PathBuf> {
    let home = dirs::home_dir().ok_or_else(|| {
        std::io::Error::new(
            std::io::ErrorKind::NotFound,
            "Could not determine home directory",
        )
    })?;
    Ok(home.join(".linkscrape").join("sessions"))
}

/// File-name-safe form of an account name
pub fn account_slug(account: &str) -> String {
    let slug: String = account
        .trim()
        .to_lowercase()
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() || c == '-' { c } else { '_' })
        .collect();

    if slug.is_empty() {
        DEFAULT_ACCOUNT.to_string()
    } else {
        slug
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn cookie(name: &str) -> SessionCookie {
        SessionCookie {
            name: name.to_string(),
            value: "v".to_string(),
            domain: ".linkedin.com".to_string(),
            path: "/".to_string(),
            expires: Some(1_900_000_000.0),
            http_only: true,
            secure: true,
            same_site: Some("None".to_string()),
        }
    }

    #[test]
    fn test_save_then_load() {
        let temp = TempDir::new().unwrap();
        let store = SessionStore::new(temp.path().join("nested/a.json"), "alice@example.com");

        let session = Session::new("alice@example.com", vec![cookie("li_at"), cookie("JSESSIONID")]);
        store.save(&session).unwrap();

        let loaded = store.load().unwrap();
        assert_eq!(loaded, session);
        assert!(loaded.cookie("li_at").is_some());
    }

    #[cfg(unix)]
    #[test]
    fn test_save_restricts_permissions() {
        use std::os::unix::fs::PermissionsExt;
        let temp = TempDir::new().unwrap();
        let store = SessionStore::new(temp.path().join("s.json"), "a");

        store.save(&Session::new("a", vec![])).unwrap();

        let mode = std::fs::metadata(store.path()).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o600);
    }

    #[cfg(unix)]
    #[test]
    fn test_save_tightens_existing_file() {
        use std::os::unix::fs::PermissionsExt;
        let temp = TempDir::new().unwrap();
        let store = SessionStore::new(temp.path().join("s.json"), "a");
        std::fs::write(store.path(), "old contents that are longer than the new session").unwrap();
        std::fs::set_permissions(store.path(), std::fs::Permissions::from_mode(0o644)).unwrap();

        store.save(&Session::new("a", vec![cookie("li_at")])).unwrap();

        let mode = std::fs::metadata(store.path()).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o600);
        assert!(store.load().is_some());
    }

    #[test]
    fn test_missing_and_corrupt_files_load_as_none() {
        let temp = TempDir::new().unwrap();
        let store = SessionStore::new(temp.path().join("s.json"), "a");
        assert!(store.load().is_none());

        std::fs::write(store.path(), "{ not json").unwrap();
        assert!(store.load().is_none());
    }

    #[test]
    fn test_other_account_is_ignored() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("s.json");

        SessionStore::new(&path, "bob").save(&Session::new("bob", vec![cookie("li_at")])).unwrap();

        assert!(SessionStore::new(&path, "alice").load().is_none());
        assert!(SessionStore::new(&path, "bob").load().is_some());
    }

    #[test]
    fn test_clear() {
        let temp = TempDir::new().unwrap();
        let store = SessionStore::new(temp.path().join("s.json"), "a");

        assert!(!store.clear().unwrap());
        store.save(&Session::new("a", vec![])).unwrap();
        assert!(store.clear().unwrap());
        assert!(!store.path().exists());
    }

    #[test]
    fn test_in_dir_without_account_finds_the_only_session() {
        let temp = TempDir::new().unwrap();
        let saved = SessionStore::in_dir(temp.path(), Some("Alice@Example.com"));
        saved
            .save(&Session::new("Alice@Example.com", vec![cookie("li_at")]))
            .unwrap();

        let resumed = SessionStore::in_dir(temp.path(), None);
        assert_eq!(resumed.account(), "Alice@Example.com");
        assert_eq!(resumed.path(), saved.path());
        assert!(resumed.load().is_some());
    }

    #[test]
    fn test_in_dir_without_account_is_default_when_ambiguous() {
        let temp = TempDir::new().unwrap();
        assert_eq!(SessionStore::in_dir(temp.path(), None).account(), DEFAULT_ACCOUNT);

        for account in ["alice", "bob"] {
            SessionStore::in_dir(temp.path(), Some(account))
                .save(&Session::new(account, vec![]))
                .unwrap();
        }
        std::fs::write(temp.path().join("notes.txt"), "ignored").unwrap();

        let store = SessionStore::in_dir(temp.path(), None);
        assert_eq!(store.account(), DEFAULT_ACCOUNT);
        assert_eq!(store.path(), temp.path().join("default.json"));
    }

    #[test]
    fn test_at_path_reads_recorded_account() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("custom.json");
        SessionStore::new(&path, "carol").save(&Session::new("carol", vec![])).unwrap();

        assert_eq!(SessionStore::at_path(&path, None).account(), "carol");
        assert_eq!(SessionStore::at_path(&path, Some("dave")).account(), "dave");
        assert_eq!(
            SessionStore::at_path(temp.path().join("missing.json"), None).account(),
            DEFAULT_ACCOUNT
        );
    }

    #[test]
    fn test_account_slug() {
        assert_eq!(account_slug("Alice.Smith@Example.com"), "alice_smith_example_com");
        assert_eq!(account_slug("  "), "default");
        assert_eq!(account_slug("team-lead"), "team-lead");
    }

    #[test]
    fn test_optional_cookie_fields_default() {
        let json = r#"{"account":"a","saved_at":"2024-01-01T00:00:00Z",
            "cookies":[{"name":"li_at","value":"x","domain":".linkedin.com","path":"/"}]}"#;
        let session: Session = serde_json::from_str(json).unwrap();

        let c = &session.cookies[0];
        assert_eq!(c.expires, None);
        assert!(!c.http_only);
        assert_eq!(c.same_site, None);
    }
}
