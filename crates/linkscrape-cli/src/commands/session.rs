use crate::OutputFormat;
use anyhow::Result;
use chrono::{DateTime, Utc};
use console::style;
use linkscrape_browser::{Session, SessionStore};
use std::path::PathBuf;

/// Cookie whose presence marks a logged-in session
const AUTH_COOKIE: &str = "li_at";

/// Session store for an explicit file, or the per-account default
pub fn store_for(session_file: Option<PathBuf>, account: Option<&str>) -> Result<SessionStore> {
    Ok(match session_file {
        Some(path) => SessionStore::at_path(path, account),
        None => SessionStore::for_account(account)?,
    })
}

pub fn show(store: &SessionStore, format: OutputFormat) -> Result<()> {
    let session = store.load();

    match format {
        OutputFormat::Json => {
            let summary = serde_json::json!({
                "path": store.path(),
                "account": store.account(),
                "cached": session.is_some(),
                "saved_at": session.as_ref().map(|s| s.saved_at.clone()),
                "cookies": session.as_ref().map(|s| s.cookies.len()).unwrap_or(0),
                "auth_cookie_expires": session.as_ref().and_then(auth_cookie_expiry).map(|t| t.to_rfc3339()),
            });
            println!("{}", serde_json::to_string_pretty(&summary)?);
        }
        OutputFormat::Pretty => match session {
            Some(session) => print_session(store, &session),
            None => println!(
                "No saved session for '{}' at {}",
                store.account(),
                store.path().display()
            ),
        },
    }

    Ok(())
}

fn print_session(store: &SessionStore, session: &Session) {
    println!("\n{}", style("Saved Session").bold().cyan());
    println!("  Account:  {}", session.account);
    println!("  File:     {}", store.path().display());
    println!("  Saved at: {}", session.saved_at);
    println!("  Cookies:  {}", session.cookies.len());

    match auth_cookie_expiry(session) {
        Some(expires) if expires < Utc::now() => println!(
            "  Login:    {}",
            style(format!("expired {}", expires.format("%Y-%m-%d %H:%M UTC"))).red()
        ),
        Some(expires) => println!(
            "  Login:    {}",
            style(format!("valid until {}", expires.format("%Y-%m-%d %H:%M UTC"))).green()
        ),
        None if session.cookie(AUTH_COOKIE).is_some() => {
            println!("  Login:    present (browser-session cookie)")
        }
        None => println!("  Login:    {}", style("no auth cookie").yellow()),
    }
    println!();
}

fn auth_cookie_expiry(session: &Session) -> Option<DateTime<Utc>> {
    let expires = session.cookie(AUTH_COOKIE)?.expires?;
    DateTime::from_timestamp(expires as i64, 0)
}

pub fn clear(store: &SessionStore) -> Result<()> {
    if store.clear()? {
        println!("🗑️  Removed session cache: {}", store.path().display());
    } else {
        println!("No session cache at {}", store.path().display());
    }
    Ok(())
}
