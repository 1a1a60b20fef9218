//! spacetraveling: a blog server backed by a headless CMS
//!
//! Posts are authored in a Prismic-style content store; this crate
//! fetches them, shapes the raw documents into typed view models,
//! renders HTML with embedded Tera templates, and serves the pages with
//! time-based revalidation.

pub mod cache;
pub mod cms;
pub mod comments;
pub mod config;
pub mod content;
pub mod helpers;
pub mod pipeline;
pub mod server;
pub mod templates;

use anyhow::{Context, Result};
use std::path::Path;

use cms::CmsClient;
use config::SiteConfig;

/// The main application: site configuration plus the content store client
#[derive(Clone)]
pub struct App {
    /// Site configuration
    pub config: SiteConfig,
    /// Base directory
    pub base_dir: std::path::PathBuf,
    /// Content store client
    pub client: CmsClient,
}

impl App {
    /// Create an application from a directory holding `_config.yml`
    pub fn new<P: AsRef<Path>>(base_dir: P) -> Result<Self> {
        let base_dir = base_dir.as_ref().to_path_buf();
        let config_path = base_dir.join("_config.yml");

        let config = if config_path.exists() {
            SiteConfig::load(&config_path)?
        } else {
            SiteConfig::default()
        };

        if config.cms.api_url.is_empty() {
            anyhow::bail!("cms.api_url is not configured; set it in _config.yml");
        }

        let client = CmsClient::new(&config.cms.api_url, config.cms.access_token.clone());

        Ok(Self {
            config,
            base_dir,
            client,
        })
    }

    /// Serve the blog
    pub async fn serve(&self, ip: &str, port: u16) -> Result<()> {
        server::start(self, ip, port)
            .await
            .context("server terminated")
    }
}
