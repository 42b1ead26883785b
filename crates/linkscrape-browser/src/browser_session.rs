use crate::driver::CdpPage;
use crate::launcher::ChromeLauncher;
use crate::proxy::{self, ProxyConfig};
use crate::{Error, Result};
use chromiumoxide::browser::Browser;
use chromiumoxide::cdp::browser_protocol::page::AddScriptToEvaluateOnNewDocumentParams;
use futures::StreamExt;
use std::process::Child;
use std::time::Duration;
use tokio::task::JoinHandle;

const CONNECT_ATTEMPTS: u32 = 5;
const CONNECT_BACKOFF: Duration = Duration::from_millis(500);

const HIDE_WEBDRIVER_SCRIPT: &str =
    "Object.defineProperty(navigator, 'webdriver', { get: () => undefined });";

/// A launched Chrome process plus the CDP connection driving its page
pub struct BrowserSession {
    browser: Browser,
    page: CdpPage,
    chrome: Child,
    handler_task: JoinHandle<()>,
    proxy_task: Option<JoinHandle<()>>,
}

impl BrowserSession {
    /// Launch Chrome and attach to its first page
    pub async fn start(
        launcher: &ChromeLauncher,
        stealth: bool,
        proxy: Option<&ProxyConfig>,
    ) -> Result<Self> {
        let mut chrome = launcher.launch()?;
        tracing::info!("Chrome started (pid {})", chrome.id());

        match Self::attach(launcher.debugging_port(), stealth, proxy).await {
            Ok((browser, page, handler_task, proxy_task)) => Ok(Self {
                browser,
                page,
                chrome,
                handler_task,
                proxy_task,
            }),
            Err(e) => {
                let _ = chrome.kill();
                let _ = chrome.wait();
                Err(e)
            }
        }
    }

    async fn attach(
        port: u16,
        stealth: bool,
        proxy: Option<&ProxyConfig>,
    ) -> Result<(Browser, CdpPage, JoinHandle<()>, Option<JoinHandle<()>>)> {
        let endpoint = format!("http://localhost:{}", port);

        // Chrome may not be listening yet
        let mut attempts_left = CONNECT_ATTEMPTS;
        let (browser, mut handler) = loop {
            tracing::debug!("Attempting CDP connection to {}...", endpoint);
            match Browser::connect(&endpoint).await {
                Ok(connected) => {
                    tracing::info!("CDP connection established");
                    break connected;
                }
                Err(e) => {
                    attempts_left -= 1;
                    if attempts_left == 0 {
                        return Err(Error::Cdp(format!(
                            "Failed to connect to Chrome after {} attempts: {}",
                            CONNECT_ATTEMPTS, e
                        )));
                    }
                    tracing::debug!("CDP connection failed, retrying ({} left)", attempts_left);
                    tokio::time::sleep(CONNECT_BACKOFF).await;
                }
            }
        };

        // The handler must be polled for any command to complete
        let handler_task = tokio::spawn(async move {
            while let Some(event) = handler.next().await {
                if let Err(e) = event {
                    tracing::debug!("CDP handler event error (continuing): {}", e);
                }
            }
        });

        tokio::time::sleep(CONNECT_BACKOFF).await;
        let page = match browser.pages().await?.into_iter().next() {
            Some(page) => page,
            None => browser.new_page("about:blank").await?,
        };

        if stealth {
            page.execute(AddScriptToEvaluateOnNewDocumentParams::new(
                HIDE_WEBDRIVER_SCRIPT,
            ))
            .await?;
            tracing::debug!("Stealth script installed");
        }

        let proxy_task = match proxy.filter(|p| p.has_credentials()) {
            Some(proxy) => Some(proxy::spawn_auth_responder(&page, proxy).await?),
            None => None,
        };

        Ok((browser, CdpPage::new(page), handler_task, proxy_task))
    }

    pub fn page(&self) -> &CdpPage {
        &self.page
    }

    /// Close the browser and reap the Chrome process
    pub async fn close(mut self) {
        if let Err(e) = self.browser.close().await {
            tracing::debug!("Browser close command failed: {}", e);
        }
        if let Some(task) = self.proxy_task.take() {
            task.abort();
        }
        self.handler_task.abort();

        if let Err(e) = self.chrome.kill() {
            tracing::debug!("Chrome already exited: {}", e);
        }
        match self.chrome.wait() {
            Ok(status) => tracing::info!("Chrome stopped (exit code: {})", status.code().unwrap_or(-1)),
            Err(e) => tracing::warn!("Failed to wait for Chrome: {}", e),
        }
    }
}
