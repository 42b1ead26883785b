use crate::proxy::ProxyConfig;
use crate::{Error, Result};
use std::path::PathBuf;
use std::process::{Child, Command, Stdio};

pub const DEFAULT_DEBUGGING_PORT: u16 = 9222;

const USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 \
                          (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";

/// Options that shape the Chrome command line
#[derive(Debug, Clone)]
pub struct LaunchOptions {
    pub headless: bool,
    pub stealth: bool,
    pub debugging_port: u16,
    pub proxy: Option<ProxyConfig>,
}

impl Default for LaunchOptions {
    fn default() -> Self {
        Self {
            headless: false,
            stealth: false,
            debugging_port: DEFAULT_DEBUGGING_PORT,
            proxy: None,
        }
    }
}

/// Spawns Chrome with remote debugging enabled
pub struct ChromeLauncher {
    chrome_path: PathBuf,
    user_data_dir: PathBuf,
    options: LaunchOptions,
}

impl ChromeLauncher {
    pub fn new(chrome_path: PathBuf, user_data_dir: PathBuf, options: LaunchOptions) -> Self {
        Self {
            chrome_path,
            user_data_dir,
            options,
        }
    }

    pub fn launch(&self) -> Result<Child> {
        let args = self.build_args();
        tracing::debug!("Launching {} {}", self.chrome_path.display(), args.join(" "));

        Command::new(&self.chrome_path)
            .args(&args)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()
            .map_err(|e| Error::Browser(format!("Failed to launch Chrome: {}", e)))
    }

    fn build_args(&self) -> Vec<String> {
        let mut args = vec![
            format!("--remote-debugging-port={}", self.options.debugging_port),
            format!("--user-data-dir={}", self.user_data_dir.display()),
            "--no-first-run".to_string(),
            "--no-default-browser-check".to_string(),
            format!("--user-agent={}", USER_AGENT),
            "--lang=en-US".to_string(),
        ];

        if self.options.headless {
            args.push("--headless=new".to_string());
        }

        if self.options.stealth {
            args.push("--disable-blink-features=AutomationControlled".to_string());
            args.push("--disable-infobars".to_string());
            args.push("--start-maximized".to_string());
        } else {
            args.push("--window-size=1280,720".to_string());
        }

        if let Some(proxy) = &self.options.proxy {
            args.push(format!("--proxy-server={}", proxy.server_arg()));
        }

        args.push("about:blank".to_string());
        args
    }

    pub fn debugging_port(&self) -> u16 {
        self.options.debugging_port
    }
}
