//! Site configuration (_config.yml)

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::Path;

use crate::helpers::{DateFormat, Locale};

/// Main site configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    // Site
    pub title: String,
    pub subtitle: String,
    pub description: String,
    pub author: String,
    pub language: String,

    // Content store
    pub cms: CmsConfig,

    // Date display
    pub date_format: String,

    // Pagination
    pub pagination: PaginationConfig,

    // Page revalidation
    pub revalidate: RevalidateConfig,

    // Comment widget
    pub comments: CommentsConfig,

    // HTTP server
    pub server: ServerConfig,

    // Store any additional fields
    #[serde(flatten)]
    pub extra: HashMap<String, serde_yaml::Value>,
}

/// Content store connection settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CmsConfig {
    /// API endpoint, e.g. https://repo.cdn.prismic.io/api/v2
    pub api_url: String,
    /// Optional access token appended to every request
    pub access_token: Option<String>,
    /// Document type holding blog posts
    pub post_type: String,
}

/// Listing pagination settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PaginationConfig {
    pub page_size: usize,
}

/// Time-based staleness windows, in seconds
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RevalidateConfig {
    pub index_secs: u64,
    pub post_secs: u64,
}

/// Comment widget settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CommentsConfig {
    /// GitHub repository backing the comment threads
    pub repo: String,
    pub theme: String,
    pub issue_term: String,
}

/// HTTP server bind settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub ip: String,
    pub port: u16,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            title: "Spacetraveling".to_string(),
            subtitle: String::new(),
            description: String::new(),
            author: String::new(),
            language: "pt-br".to_string(),
            cms: CmsConfig::default(),
            date_format: "dd MMM yyyy".to_string(),
            pagination: PaginationConfig::default(),
            revalidate: RevalidateConfig::default(),
            comments: CommentsConfig::default(),
            server: ServerConfig::default(),
            extra: HashMap::new(),
        }
    }
}

impl Default for CmsConfig {
    fn default() -> Self {
        Self {
            api_url: String::new(),
            access_token: None,
            post_type: "post".to_string(),
        }
    }
}

impl Default for PaginationConfig {
    fn default() -> Self {
        // The original ships with a demo-sized page; override in _config.yml
        Self { page_size: 2 }
    }
}

impl Default for RevalidateConfig {
    fn default() -> Self {
        Self {
            index_secs: 10,
            post_secs: 1800,
        }
    }
}

impl Default for CommentsConfig {
    fn default() -> Self {
        Self {
            repo: String::new(),
            theme: "github-dark".to_string(),
            issue_term: "pathname".to_string(),
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            ip: "localhost".to_string(),
            port: 4000,
        }
    }
}

impl SiteConfig {
    /// Load configuration from a YAML file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path.as_ref())?;
        let config: SiteConfig = serde_yaml::from_str(&content)?;
        Ok(config)
    }

    /// The display date format for this site
    pub fn date_format(&self) -> DateFormat {
        let locale = self.language.parse().unwrap_or(Locale::PtBr);
        DateFormat::new(self.date_format.clone(), locale)
    }
}
