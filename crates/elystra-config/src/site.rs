//! Page metadata and the static 404 page.
//!
//! Relative paths in [`SiteConfig`] are resolved against `base_url` so the
//! emitted metadata only ever carries absolute URLs.

use elystra_common::ConfigError;
use serde::Serialize;
use url::Url;

use crate::schema::SiteConfig;

/// Fully resolved metadata for every page of the site.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SiteMetadata {
    pub base_url: String,
    pub title: String,
    pub description: String,
    pub open_graph: OpenGraph,
    pub twitter: TwitterCard,
    pub icons: Icons,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OpenGraph {
    pub title: String,
    pub description: String,
    pub url: String,
    pub site_name: String,
    pub images: Vec<OgImage>,
    pub locale: String,
    #[serde(rename = "type")]
    pub kind: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OgImage {
    pub url: String,
    pub width: u32,
    pub height: u32,
    pub alt: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TwitterCard {
    pub card: String,
    pub title: String,
    pub description: String,
    pub images: Vec<String>,
    pub creator: String,
    pub site: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Icons {
    pub icon: String,
    pub shortcut: String,
    pub apple: String,
}

impl SiteMetadata {
    /// Resolve metadata from site config.
    pub fn resolve(site: &SiteConfig) -> Result<Self, ConfigError> {
        let base = Url::parse(&site.base_url).map_err(|e| {
            ConfigError::ValidationError(format!("site.base_url = {}: {e}", site.base_url))
        })?;
        let icon = base
            .join(&site.icon)
            .map_err(|e| ConfigError::ValidationError(format!("site.icon = {}: {e}", site.icon)))?
            .to_string();

        Ok(Self {
            base_url: base.to_string(),
            title: site.title.clone(),
            description: site.description.clone(),
            open_graph: OpenGraph {
                title: site.title.clone(),
                description: site.description.clone(),
                url: base.to_string(),
                site_name: site.site_name.clone(),
                images: vec![OgImage {
                    url: icon.clone(),
                    width: site.icon_size,
                    height: site.icon_size,
                    alt: format!("{} Icon", site.site_name),
                }],
                locale: site.locale.clone(),
                kind: "website".into(),
            },
            twitter: TwitterCard {
                card: "summary".into(),
                title: site.title.clone(),
                description: site.description.clone(),
                images: vec![icon.clone()],
                creator: site.twitter_handle.clone(),
                site: site.twitter_handle.clone(),
            },
            icons: Icons {
                icon: icon.clone(),
                shortcut: icon.clone(),
                apple: icon,
            },
        })
    }
}

/// Content of the "page not found" view.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NotFoundPage {
    pub code: u16,
    pub heading: &'static str,
    pub link_label: &'static str,
    pub link_href: &'static str,
}

impl Default for NotFoundPage {
    fn default() -> Self {
        Self {
            code: 404,
            heading: "Page Not Found",
            link_label: "Go Home",
            link_href: "/",
        }
    }
}

impl std::fmt::Display for NotFoundPage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "{}", self.code)?;
        writeln!(f, "{}", self.heading)?;
        write!(f, "[{}]({})", self.link_label, self.link_href)
    }
}
