//! Browser side of linkscrape: finding and launching Chrome, the CDP
//! connection, the session cache, login and profile navigation.

mod auth;
mod batch;
mod browser_session;
mod chrome_finder;
mod driver;
mod error;
mod launcher;
mod navigator;
mod pacing;
mod profile;
mod proxy;
mod session;

pub use auth::{
    AuthState, Authenticator, Credentials, FEED_URL, LOGIN_URL, LoginOutcome,
    VERIFICATION_INSTRUCTIONS, VerificationPrompt,
};
pub use batch::ProfileScraper;
pub use browser_session::BrowserSession;
pub use chrome_finder::{CHROME_ENV, ChromeFinder};
pub use driver::{CdpPage, PageDriver};
pub use error::{Error, Result};
pub use launcher::{ChromeLauncher, DEFAULT_DEBUGGING_PORT, LaunchOptions};
pub use navigator::{DEFAULT_MAX_SCROLL_ROUNDS, Navigator, ProfilePage, contact_overlay_url};
pub use pacing::{Pacing, ScrapeMode};
pub use profile::UserDataDir;
pub use proxy::ProxyConfig;
pub use session::{DEFAULT_ACCOUNT, Session, SessionCookie, SessionStore, account_slug};
