//! Catalog records and the content bundle loaded at startup.
//!
//! Content ships embedded as TOML and may be replaced by a user file. Items
//! never change after load.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;
use tracing::{debug, info};

use crate::course::Course;
use crate::filter::{categories_of, Categorized, FilterState};
use crate::share::SharePayload;
use crate::Result;

const EMBEDDED_CATALOG: &str = include_str!("../data/catalog.toml");

#[derive(Error, Debug, PartialEq, Eq)]
pub enum CatalogError {
    #[error("duplicate id '{id}' in {catalog}")]
    DuplicateId { catalog: String, id: String },
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Category(String);

impl Category {
    pub fn new(label: impl Into<String>) -> Self {
        Self(label.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ItemId(String);

impl ItemId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for ItemId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// What an item supports beyond being listed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Capabilities {
    #[serde(default)]
    pub detail: bool,
    #[serde(default)]
    pub qr: bool,
    #[serde(default)]
    pub share: bool,
}

/// Card presentation. Both variants render through the same card.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CardVariant {
    #[default]
    Standard,
    Featured,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ItemStatus {
    Available,
    Beta,
    ComingSoon,
}

impl ItemStatus {
    pub fn label(self) -> &'static str {
        match self {
            Self::Available => "available",
            Self::Beta => "beta",
            Self::ComingSoon => "coming soon",
        }
    }
}

/// In-app places an item or desktop icon can lead to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Destination {
    Launcher,
    Television,
    ArtStudio,
    Projects,
    Course,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ItemStats {
    #[serde(default)]
    pub views: Option<u32>,
    #[serde(default)]
    pub users: Option<u32>,
    #[serde(default)]
    pub last_updated: Option<NaiveDate>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CatalogItem {
    pub id: ItemId,
    pub title: String,
    pub description: String,
    pub category: Category,
    pub tags: Vec<String>,
    pub features: Vec<String>,
    pub glyph: String,
    pub url: Option<String>,
    pub rating: Option<f32>,
    pub price: Option<String>,
    pub platform: Option<String>,
    pub status: Option<ItemStatus>,
    pub stats: Option<ItemStats>,
    pub opens: Option<Destination>,
    pub capabilities: Capabilities,
    pub variant: CardVariant,
}

impl CatalogItem {
    pub fn has_detail(&self) -> bool {
        self.capabilities.detail
    }

    /// Whole stars out of five, rounded down.
    pub fn star_count(&self) -> Option<u8> {
        self.rating.map(|r| r.clamp(0.0, 5.0).floor() as u8)
    }

    pub fn share_payload(&self) -> Option<SharePayload> {
        let url = self.url.as_ref()?;
        Some(SharePayload {
            title: self.title.clone(),
            text: self.description.clone(),
            url: url.clone(),
        })
    }
}

impl Categorized for CatalogItem {
    fn category(&self) -> &Category {
        &self.category
    }
}

/// An ordered, id-unique list of items with its filter tabs.
#[derive(Debug, Clone)]
pub struct Catalog {
    title: String,
    categories: Vec<Category>,
    items: Vec<CatalogItem>,
}

impl Catalog {
    pub fn new(
        title: impl Into<String>,
        categories: Vec<Category>,
        items: Vec<CatalogItem>,
    ) -> std::result::Result<Self, CatalogError> {
        let title = title.into();
        let mut seen = std::collections::HashSet::new();
        for item in &items {
            if !seen.insert(item.id.as_str()) {
                return Err(CatalogError::DuplicateId {
                    catalog: title,
                    id: item.id.to_string(),
                });
            }
        }
        let categories = if categories.is_empty() {
            categories_of(&items)
        } else {
            categories
        };
        Ok(Self {
            title,
            categories,
            items,
        })
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn items(&self) -> &[CatalogItem] {
        &self.items
    }

    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    pub fn get(&self, id: &ItemId) -> Option<&CatalogItem> {
        self.items.iter().find(|item| item.id == *id)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// A fresh filter with `All` plus this catalog's categories.
    pub fn filter_state(&self) -> FilterState {
        FilterState::new(self.categories.iter().cloned())
    }
}

/// A learning resource listed under the art studio.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Tutorial {
    pub title: String,
    pub description: String,
    pub duration_min: u32,
    pub level: String,
}

/// One entry of the TV playlist.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Channel {
    pub id: String,
    pub title: String,
}

impl Channel {
    pub fn watch_url(&self) -> String {
        format!("https://www.youtube.com/watch?v={}", self.id)
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct DesktopIcon {
    pub glyph: String,
    pub label: String,
    #[serde(default)]
    pub opens: Option<Destination>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct LabStat {
    pub value: String,
    pub label: String,
}

/// Who runs the lab and where to find it.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct LabInfo {
    pub name: String,
    pub tagline: String,
    pub location: String,
    pub hours: String,
    #[serde(default, rename = "stat")]
    pub stats: Vec<LabStat>,
}

/// Everything the showcase displays.
#[derive(Debug, Clone)]
pub struct Content {
    pub lab: LabInfo,
    pub launcher: Catalog,
    pub art_studio: Catalog,
    pub tutorials: Vec<Tutorial>,
    pub projects: Catalog,
    pub course: Course,
    pub playlist: Vec<Channel>,
    pub desktop: Vec<DesktopIcon>,
}

impl Content {
    pub fn embedded() -> Result<Self> {
        Self::from_toml_str(EMBEDDED_CATALOG)
    }

    /// Read `path` when it exists, otherwise use the embedded content.
    pub fn load(path: &Path) -> Result<Self> {
        if path.exists() {
            info!("loading catalog override from {}", path.display());
            let content = std::fs::read_to_string(path)?;
            return Self::from_toml_str(&content);
        }
        debug!("no catalog override at {}, using embedded", path.display());
        Self::embedded()
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let file: TomlContentFile = toml::from_str(content)?;
        Ok(Self {
            lab: file.lab,
            launcher: file.launcher.into_catalog()?,
            art_studio: file.art_studio.into_catalog()?,
            tutorials: file.art_studio_tutorial,
            projects: file.projects.into_catalog()?,
            course: file.course,
            playlist: file.channel,
            desktop: file.desktop_icon,
        })
    }
}

// ── TOML schema ───────────────────────────────────────────────────────────────

/// On-disk layout. Kept apart from the public types so sections can carry
/// defaults (`capabilities`) that individual items inherit.
#[derive(Debug, Deserialize)]
struct TomlContentFile {
    lab: LabInfo,
    launcher: TomlCatalog,
    art_studio: TomlCatalog,
    #[serde(default)]
    art_studio_tutorial: Vec<Tutorial>,
    projects: TomlCatalog,
    course: Course,
    #[serde(default)]
    channel: Vec<Channel>,
    #[serde(default)]
    desktop_icon: Vec<DesktopIcon>,
}

#[derive(Debug, Deserialize)]
struct TomlCatalog {
    title: String,
    #[serde(default)]
    categories: Vec<Category>,
    #[serde(default)]
    capabilities: Capabilities,
    #[serde(default)]
    item: Vec<TomlItem>,
}

#[derive(Debug, Deserialize)]
struct TomlItem {
    id: String,
    title: String,
    #[serde(default)]
    description: String,
    #[serde(default)]
    category: Option<Category>,
    #[serde(default)]
    tags: Vec<String>,
    #[serde(default)]
    features: Vec<String>,
    #[serde(default)]
    glyph: String,
    #[serde(default)]
    url: Option<String>,
    #[serde(default)]
    rating: Option<f32>,
    #[serde(default)]
    price: Option<String>,
    #[serde(default)]
    platform: Option<String>,
    #[serde(default)]
    status: Option<ItemStatus>,
    #[serde(default)]
    stats: Option<ItemStats>,
    #[serde(default)]
    opens: Option<Destination>,
    #[serde(default)]
    capabilities: Option<Capabilities>,
    #[serde(default)]
    variant: CardVariant,
}

impl TomlCatalog {
    fn into_catalog(self) -> std::result::Result<Catalog, CatalogError> {
        let defaults = self.capabilities;
        let items = self
            .item
            .into_iter()
            .map(|t| CatalogItem {
                id: ItemId(t.id),
                title: t.title,
                description: t.description,
                category: t.category.unwrap_or_else(|| Category::new("General")),
                tags: t.tags,
                features: t.features,
                glyph: t.glyph,
                url: t.url,
                rating: t.rating,
                price: t.price,
                platform: t.platform,
                status: t.status,
                stats: t.stats,
                opens: t.opens,
                capabilities: t.capabilities.unwrap_or(defaults),
                variant: t.variant,
            })
            .collect();
        Catalog::new(self.title, self.categories, items)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filter::CategoryFilter;

    const SMALL: &str = r#"
        [lab]
        name = "VR Lab"
        tagline = "Explore"
        location = "Room 112"
        hours = "Mon-Fri"

        [launcher]
        title = "Gateway"
        [[launcher.item]]
        id = "modeling"
        title = "3D Modeling"
        category = "Create"

        [art_studio]
        title = "Art Studio"
        categories = ["Professional", "Free"]
        capabilities = { detail = true }
        [[art_studio.item]]
        id = "quill"
        title = "Quill"
        category = "Professional"
        rating = 4.8
        [[art_studio.item]]
        id = "openbrush"
        title = "OpenBrush"
        category = "Free"
        capabilities = { detail = false }

        [projects]
        title = "Gallery"
        capabilities = { qr = true, share = true }
        [[projects.item]]
        id = "hangar"
        title = "Hangar Bay"
        category = "VR"
        url = "https://example.org/hangar"
        stats = { views = 11, last_updated = "2024-12-10" }

        [course]
        title = "The Hawk"
        tagline = "Learn VR"
        url = "https://example.org/course"
        stats = { students = 45, completion_rate = 78, rating = 4.8 }

        [[channel]]
        id = "abc"
        title = "Video 1"
    "#;

    #[test]
    fn test_embedded_catalog_parses() {
        let content = Content::embedded().unwrap();
        assert_eq!(content.playlist.len(), 3);
        assert_eq!(content.projects.len(), 4);
        assert_eq!(content.art_studio.len(), 8);
        assert_eq!(content.course.modules.len(), 6);
        assert!(content.art_studio.items().iter().all(|i| i.has_detail()));
        assert!(content.projects.items().iter().all(|i| i.url.is_some()));
        assert!(!content.desktop.is_empty());
        assert_eq!(content.lab.stats.len(), 3);
    }

    #[test]
    fn test_capability_defaults_are_inherited() {
        let content = Content::from_toml_str(SMALL).unwrap();
        let quill = content.art_studio.get(&ItemId::new("quill")).unwrap();
        let brush = content.art_studio.get(&ItemId::new("openbrush")).unwrap();
        assert!(quill.has_detail());
        assert!(!brush.has_detail());
        assert_eq!(quill.star_count(), Some(4));
    }

    #[test]
    fn test_declared_and_derived_categories() {
        let content = Content::from_toml_str(SMALL).unwrap();
        assert_eq!(content.art_studio.categories().len(), 2);
        assert_eq!(content.projects.categories(), &[Category::new("VR")]);
        let filter = content.projects.filter_state();
        assert_eq!(filter.tabs()[0], CategoryFilter::All);
    }

    #[test]
    fn test_stats_date_parses() {
        let content = Content::from_toml_str(SMALL).unwrap();
        let hangar = &content.projects.items()[0];
        let stats = hangar.stats.as_ref().unwrap();
        assert_eq!(stats.views, Some(11));
        assert_eq!(stats.last_updated, NaiveDate::from_ymd_opt(2024, 12, 10));
        let payload = hangar.share_payload().unwrap();
        assert_eq!(payload.url, "https://example.org/hangar");
    }

    #[test]
    fn test_duplicate_ids_rejected() {
        let toml = SMALL.replace("id = \"openbrush\"", "id = \"quill\"");
        let err = Content::from_toml_str(&toml).unwrap_err();
        assert!(matches!(
            err,
            crate::Error::Catalog(CatalogError::DuplicateId { .. })
        ));
    }

    #[test]
    fn test_missing_override_falls_back_to_embedded() {
        let path = crate::platform::temp_dir().join("vrlab-no-such-catalog.toml");
        let content = Content::load(&path).unwrap();
        assert_eq!(content.playlist.len(), 3);
    }
}
