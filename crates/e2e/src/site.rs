//! Declarative YAML site fixtures served by the stub browser

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::{BrowsingError, BrowsingResult};
use crate::target::{Strategy, Target};

/// A set of pages parsed from YAML
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Site {
    /// Prefix for relative URLs
    #[serde(default)]
    pub base_url: Option<String>,

    /// Pages reachable by URL
    #[serde(default)]
    pub pages: Vec<Page>,
}

/// One page of the site
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Page {
    /// Absolute URL or path relative to the base URL
    pub url: String,

    /// Document title
    #[serde(default)]
    pub title: String,

    /// Elements on the page
    #[serde(default)]
    pub elements: Vec<Element>,
}

/// A single element
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Element {
    /// CSS selector matching this element
    pub css: String,

    #[serde(default)]
    pub id: Option<String>,

    #[serde(default)]
    pub name: Option<String>,

    #[serde(default)]
    pub xpath: Option<String>,

    /// Visible text
    #[serde(default)]
    pub text: String,

    /// Current input value
    #[serde(default)]
    pub value: String,

    /// Whether text can be typed into it
    #[serde(default)]
    pub editable: bool,

    #[serde(default = "default_enabled")]
    pub enabled: bool,

    /// URL opened when the element is clicked
    #[serde(default)]
    pub link_to: Option<String>,
}

fn default_enabled() -> bool {
    true
}

impl Element {
    /// Whether `target` addresses this element
    pub fn matches(&self, target: &Target) -> bool {
        let locator = target.locator.as_str();
        match target.strategy {
            Strategy::Css => self.css == locator,
            Strategy::Id => self.id.as_deref() == Some(locator),
            Strategy::Name => self.name.as_deref() == Some(locator),
            Strategy::Xpath => self.xpath.as_deref() == Some(locator),
            Strategy::LinkText => self.link_to.is_some() && self.text == locator,
        }
    }
}

impl Page {
    pub fn new(url: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            title: title.into(),
            elements: Vec::new(),
        }
    }

    /// Builder-style element addition
    pub fn with_element(mut self, element: Element) -> Self {
        self.elements.push(element);
        self
    }

    pub fn find(&self, target: &Target) -> Option<&Element> {
        self.elements.iter().find(|e| e.matches(target))
    }

    pub fn find_mut(&mut self, target: &Target) -> Option<&mut Element> {
        self.elements.iter_mut().find(|e| e.matches(target))
    }
}

impl Site {
    /// Parse a site from a YAML string
    pub fn from_yaml(yaml: &str) -> BrowsingResult<Self> {
        let site: Self = serde_yaml::from_str(yaml)?;
        site.validate()?;
        Ok(site)
    }

    /// Parse a site from a YAML file
    pub fn from_file(path: &Path) -> BrowsingResult<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_yaml(&content)
    }

    /// Merge every YAML site under a directory into one
    pub fn load_all(dir: &Path) -> BrowsingResult<Self> {
        let mut merged = Site::default();

        for entry in walkdir::WalkDir::new(dir)
            .sort_by_file_name()
            .into_iter()
            .filter_map(|e| e.ok())
            .filter(|e| {
                e.path()
                    .extension()
                    .map(|ext| ext == "yaml" || ext == "yml")
                    .unwrap_or(false)
            })
        {
            let site = Self::from_file(entry.path())?;
            if merged.base_url.is_none() {
                merged.base_url = site.base_url;
            }
            merged.pages.extend(site.pages);
        }

        merged.validate()?;
        Ok(merged)
    }

    /// Resolve a possibly relative URL against the base URL
    pub fn resolve(&self, url: &str) -> String {
        if url.contains("://") {
            return url.to_string();
        }
        match &self.base_url {
            Some(base) => format!(
                "{}/{}",
                base.trim_end_matches('/'),
                url.trim_start_matches('/')
            ),
            None => url.to_string(),
        }
    }

    /// Add a page, rejecting one whose resolved URL is already served
    pub fn add_page(&mut self, page: Page) -> BrowsingResult<()> {
        if self.page(&page.url).is_some() {
            return Err(BrowsingError::SiteParse(format!(
                "Page served twice: {}",
                page.url
            )));
        }
        self.pages.push(page);
        Ok(())
    }

    /// The page served at `url`, after resolution
    pub fn page(&self, url: &str) -> Option<&Page> {
        let wanted = self.resolve(url);
        self.pages.iter().find(|p| self.resolve(&p.url) == wanted)
    }

    fn validate(&self) -> BrowsingResult<()> {
        let mut seen = std::collections::HashSet::new();
        for page in &self.pages {
            if !seen.insert(self.resolve(&page.url)) {
                return Err(BrowsingError::SiteParse(format!(
                    "Page served twice: {}",
                    page.url
                )));
            }
        }
        Ok(())
    }
}
