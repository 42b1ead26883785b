#![allow(dead_code)]

use async_trait::async_trait;
use linkscrape_browser::{
    Error, FEED_URL, LOGIN_URL, PageDriver, Result, SessionCookie, VerificationPrompt,
};
use serde_json::Value;
use std::collections::{HashMap, HashSet, VecDeque};
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

pub const VALID_TOKEN: &str = "valid-token";

pub fn auth_cookie(value: &str) -> SessionCookie {
    SessionCookie {
        name: "li_at".to_string(),
        value: value.to_string(),
        domain: ".linkedin.com".to_string(),
        path: "/".to_string(),
        expires: Some(1_900_000_000.0),
        http_only: true,
        secure: true,
        same_site: Some("None".to_string()),
    }
}

#[derive(Default)]
struct State {
    url: String,
    logged_in: bool,
    cookies: Vec<SessionCookie>,
    visited: Vec<String>,
    typed: Vec<(String, String)>,
    clicks: Vec<String>,
    cookie_clears: usize,
    scripts: Vec<String>,
    heights: VecDeque<u64>,
    last_height: u64,
    after_submit: String,
    redirects: HashMap<String, String>,
    titles: HashMap<String, String>,
    pages: HashMap<String, String>,
    texts: HashMap<String, String>,
    present: HashSet<String>,
    failing: HashSet<String>,
}

/// Scripted stand-in for a Chrome page
pub struct FakeDriver {
    state: Mutex<State>,
}

impl FakeDriver {
    pub fn new() -> Self {
        let state = State {
            url: "about:blank".to_string(),
            after_submit: FEED_URL.to_string(),
            present: ["#username", ".feed-shared-update-v2"]
                .into_iter()
                .map(String::from)
                .collect(),
            ..State::default()
        };
        Self {
            state: Mutex::new(state),
        }
    }

    /// URL the browser lands on after the login form is submitted
    pub fn landing_after_submit(self, url: &str) -> Self {
        self.state.lock().unwrap().after_submit = url.to_string();
        self
    }

    pub fn redirect(self, from: &str, to: &str) -> Self {
        self.state
            .lock()
            .unwrap()
            .redirects
            .insert(from.to_string(), to.to_string());
        self
    }

    pub fn page_title(self, url: &str, title: &str) -> Self {
        self.state
            .lock()
            .unwrap()
            .titles
            .insert(url.to_string(), title.to_string());
        self
    }

    pub fn page(self, url: &str, html: &str) -> Self {
        self.state
            .lock()
            .unwrap()
            .pages
            .insert(url.to_string(), html.to_string());
        self
    }

    pub fn text(self, selector: &str, text: &str) -> Self {
        self.state
            .lock()
            .unwrap()
            .texts
            .insert(selector.to_string(), text.to_string());
        self
    }

    pub fn failing(self, url: &str) -> Self {
        self.state.lock().unwrap().failing.insert(url.to_string());
        self
    }

    /// Successive values of `document.body.scrollHeight`; the last one repeats
    pub fn heights(self, heights: &[u64]) -> Self {
        self.state.lock().unwrap().heights = heights.iter().copied().collect();
        self
    }

    /// Pretend the operator finished a verification challenge
    pub fn complete_verification(&self) {
        let mut state = self.state.lock().unwrap();
        state.logged_in = true;
        state.cookies = vec![auth_cookie(VALID_TOKEN)];
        state.url = FEED_URL.to_string();
    }

    pub fn visited(&self) -> Vec<String> {
        self.state.lock().unwrap().visited.clone()
    }

    pub fn typed(&self) -> Vec<(String, String)> {
        self.state.lock().unwrap().typed.clone()
    }

    pub fn clicks(&self) -> Vec<String> {
        self.state.lock().unwrap().clicks.clone()
    }

    pub fn cookie_clears(&self) -> usize {
        self.state.lock().unwrap().cookie_clears
    }

    pub fn scripts(&self) -> Vec<String> {
        self.state.lock().unwrap().scripts.clone()
    }
}

#[async_trait]
impl PageDriver for FakeDriver {
    async fn goto(&self, url: &str) -> Result<()> {
        let mut state = self.state.lock().unwrap();
        state.visited.push(url.to_string());

        if state.failing.contains(url) {
            return Err(Error::Cdp(format!("net::ERR_ABORTED at {}", url)));
        }

        state.url = if url == FEED_URL && !state.logged_in {
            format!("{}?session_redirect=%2Ffeed%2F", LOGIN_URL)
        } else {
            state.redirects.get(url).cloned().unwrap_or_else(|| url.to_string())
        };
        Ok(())
    }

    async fn current_url(&self) -> Result<String> {
        Ok(self.state.lock().unwrap().url.clone())
    }

    async fn title(&self) -> Result<String> {
        let state = self.state.lock().unwrap();
        Ok(state
            .titles
            .get(&state.url)
            .cloned()
            .unwrap_or_else(|| "Profile | LinkedIn".to_string()))
    }

    async fn content(&self) -> Result<String> {
        let state = self.state.lock().unwrap();
        Ok(state
            .pages
            .get(&state.url)
            .cloned()
            .unwrap_or_else(|| "<html><body></body></html>".to_string()))
    }

    async fn evaluate(&self, expression: &str) -> Result<Option<Value>> {
        let mut state = self.state.lock().unwrap();
        state.scripts.push(expression.to_string());

        if expression == "document.body.scrollHeight" {
            if let Some(height) = state.heights.pop_front() {
                state.last_height = height;
            }
            return Ok(Some(Value::from(state.last_height)));
        }
        if expression == "document.documentElement.outerHTML" {
            return Ok(state.pages.get(&state.url).cloned().map(Value::String));
        }
        Ok(None)
    }

    async fn wait_for_selector(&self, selector: &str, _timeout: Duration) -> Result<bool> {
        Ok(self.state.lock().unwrap().present.contains(selector))
    }

    async fn text_of(&self, selector: &str) -> Result<Option<String>> {
        Ok(self.state.lock().unwrap().texts.get(selector).cloned())
    }

    async fn type_into(&self, selector: &str, text: &str, _key_delay: Duration) -> Result<()> {
        self.state
            .lock()
            .unwrap()
            .typed
            .push((selector.to_string(), text.to_string()));
        Ok(())
    }

    async fn click(&self, selector: &str) -> Result<()> {
        let mut state = self.state.lock().unwrap();
        state.clicks.push(selector.to_string());

        state.url = state.after_submit.clone();
        if state.url.starts_with(FEED_URL) {
            state.logged_in = true;
            state.cookies = vec![auth_cookie(VALID_TOKEN)];
        }
        Ok(())
    }

    async fn cookies(&self) -> Result<Vec<SessionCookie>> {
        Ok(self.state.lock().unwrap().cookies.clone())
    }

    async fn set_cookies(&self, cookies: &[SessionCookie]) -> Result<()> {
        let mut state = self.state.lock().unwrap();
        state.cookies = cookies.to_vec();
        state.logged_in = cookies
            .iter()
            .any(|c| c.name == "li_at" && c.value == VALID_TOKEN);
        Ok(())
    }

    async fn clear_cookies(&self) -> Result<()> {
        let mut state = self.state.lock().unwrap();
        state.cookies.clear();
        state.logged_in = false;
        state.cookie_clears += 1;
        Ok(())
    }
}

/// Operator prompt that resolves the challenge on the fake page
pub struct CompletingPrompt<'a> {
    driver: &'a FakeDriver,
    calls: AtomicUsize,
}

impl<'a> CompletingPrompt<'a> {
    pub fn new(driver: &'a FakeDriver) -> Self {
        Self {
            driver,
            calls: AtomicUsize::new(0),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl VerificationPrompt for CompletingPrompt<'_> {
    async fn wait_for_operator(&self, _instructions: &str) -> Result<()> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.driver.complete_verification();
        Ok(())
    }
}

/// Prompt that must never be reached
pub struct UnreachablePrompt;

#[async_trait]
impl VerificationPrompt for UnreachablePrompt {
    async fn wait_for_operator(&self, _instructions: &str) -> Result<()> {
        panic!("verification prompt should not be shown");
    }
}
