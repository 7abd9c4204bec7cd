//! In-memory browser ability

use std::cell::Cell;
use std::path::Path;

use screenplay_core::Ability;
use tracing::debug;

use crate::error::{BrowsingError, BrowsingResult};
use crate::site::{Element, Page, Site};
use crate::target::Target;

/// A browser that serves pages from a [`Site`] fixture instead of a network.
///
/// Granted empty; serve a site before opening anything. Each visit gets a
/// fresh copy of the page, so typed values do not leak between visits.
#[derive(Debug, Default)]
pub struct StubBrowsing {
    site: Site,
    current: Option<OpenPage>,
    history: Vec<String>,
    clicks: Vec<String>,
    touches: Cell<usize>,
}

#[derive(Debug)]
struct OpenPage {
    url: String,
    page: Page,
}

impl Ability for StubBrowsing {
    fn construct() -> anyhow::Result<Self> {
        Ok(Self::default())
    }
}

impl StubBrowsing {
    /// Serve `site`, closing whatever page was open
    pub fn serve(&mut self, site: Site) -> &mut Self {
        self.site = site;
        self.current = None;
        self
    }

    /// Serve one more page alongside the current site
    pub fn serve_page(&mut self, page: Page) -> BrowsingResult<&mut Self> {
        self.site.add_page(page)?;
        Ok(self)
    }

    /// Serve a YAML site fixture
    pub fn serve_file(&mut self, path: &Path) -> BrowsingResult<&mut Self> {
        let site = Site::from_file(path)?;
        Ok(self.serve(site))
    }

    pub fn visit(&mut self, url: &str) -> BrowsingResult<()> {
        self.touch();
        let resolved = self.site.resolve(url);
        let page = self
            .site
            .page(&resolved)
            .cloned()
            .ok_or_else(|| BrowsingError::PageNotServed(resolved.clone()))?;

        debug!("Visiting {}", resolved);
        self.history.push(resolved.clone());
        self.current = Some(OpenPage {
            url: resolved,
            page,
        });
        Ok(())
    }

    pub fn click(&mut self, target: &Target) -> BrowsingResult<()> {
        self.touch();
        let element = self.element_mut(target)?;
        if !element.enabled {
            return Err(BrowsingError::NotInteractable(target.to_string()));
        }
        let link = element.link_to.clone();

        self.clicks.push(target.to_string());
        match link {
            Some(url) => self.visit(&url),
            None => Ok(()),
        }
    }

    /// Append `text` to the element's value, like key presses would
    pub fn send_keys(&mut self, target: &Target, text: &str) -> BrowsingResult<()> {
        self.touch();
        let element = self.element_mut(target)?;
        if !element.enabled || !element.editable {
            return Err(BrowsingError::NotInteractable(target.to_string()));
        }
        element.value.push_str(text);
        Ok(())
    }

    pub fn title(&self) -> BrowsingResult<String> {
        self.touch();
        Ok(self.open()?.page.title.clone())
    }

    pub fn current_url(&self) -> BrowsingResult<String> {
        self.touch();
        Ok(self.open()?.url.clone())
    }

    pub fn text_of(&self, target: &Target) -> BrowsingResult<String> {
        self.touch();
        Ok(self.element(target)?.text.clone())
    }

    pub fn value_of(&self, target: &Target) -> BrowsingResult<String> {
        self.touch();
        Ok(self.element(target)?.value.clone())
    }

    /// Whether `target` exists on the open page; absence is not an error
    pub fn is_present(&self, target: &Target) -> BrowsingResult<bool> {
        self.touch();
        Ok(self.open()?.page.find(target).is_some())
    }

    /// Every URL visited, in order
    pub fn history(&self) -> &[String] {
        &self.history
    }

    /// Descriptions of every clicked target, in order
    pub fn clicks(&self) -> &[String] {
        &self.clicks
    }

    /// How many browser operations have been made
    pub fn touches(&self) -> usize {
        self.touches.get()
    }

    fn touch(&self) {
        self.touches.set(self.touches.get() + 1);
    }

    fn open(&self) -> BrowsingResult<&OpenPage> {
        self.current.as_ref().ok_or(BrowsingError::NoPageOpen)
    }

    fn element(&self, target: &Target) -> BrowsingResult<&Element> {
        let open = self.open()?;
        open.page
            .find(target)
            .ok_or_else(|| BrowsingError::TargetNotFound {
                target: target.to_string(),
                url: open.url.clone(),
            })
    }

    fn element_mut(&mut self, target: &Target) -> BrowsingResult<&mut Element> {
        let open = self.current.as_mut().ok_or(BrowsingError::NoPageOpen)?;
        let url = open.url.clone();
        open.page
            .find_mut(target)
            .ok_or_else(|| BrowsingError::TargetNotFound {
                target: target.to_string(),
                url,
            })
    }
}
