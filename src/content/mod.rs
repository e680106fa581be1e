//! Portfolio content: the data the site renders, and its startup checks.
//!
//! Content is authored as TOML (or JSON) and parsed leniently: every field
//! has a default, so a missing value surfaces as a validation error with a
//! path rather than a parse failure.

pub mod repos;
pub mod validation;

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::MotionError;

pub use repos::{extract_github_username, RepoFetchError, RepoListing, Repository};
pub use validation::{validate, ValidationReport};

/// Everything the portfolio site shows.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Portfolio {
    /// Owner details.
    pub personal: PersonalInfo,
    /// Social profile links.
    pub social: Vec<SocialLink>,
    /// Links to other published work.
    pub work_links: Vec<WorkLink>,
    /// Showcased projects.
    pub projects: Vec<Project>,
    /// About page sections.
    pub about: About,
}

impl Portfolio {
    /// Parse content from TOML.
    ///
    /// # Errors
    ///
    /// [`MotionError::ContentParse`] if the TOML is malformed.
    pub fn from_toml(content: &str) -> Result<Self, MotionError> {
        toml::from_str(content).map_err(|e| MotionError::ContentParse(e.to_string()))
    }

    /// Parse content from JSON.
    ///
    /// # Errors
    ///
    /// [`MotionError::ContentParse`] if the JSON is malformed.
    pub fn from_json(content: &str) -> Result<Self, MotionError> {
        serde_json::from_str(content)
            .map_err(|e| MotionError::ContentParse(e.to_string()))
    }

    /// Load content from a `.toml` or `.json` file (by extension; anything
    /// else is read as TOML).
    ///
    /// # Errors
    ///
    /// Fails if the file cannot be read or parsed.
    pub fn load(path: &Path) -> Result<Self, MotionError> {
        let content = std::fs::read_to_string(path)?;
        let is_json = path
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));
        if is_json {
            Self::from_json(&content)
        } else {
            Self::from_toml(&content)
        }
    }

    /// Load and validate, logging the report. Fails if validation found
    /// errors; warnings alone pass.
    ///
    /// # Errors
    ///
    /// Read and parse failures, or [`MotionError::InvalidContent`].
    pub fn load_validated(path: &Path) -> Result<Self, MotionError> {
        let portfolio = Self::load(path)?;
        let report = validate(&portfolio);
        report.log();
        report.into_result()?;
        Ok(portfolio)
    }

    /// Projects flagged as featured, in authored order.
    pub fn featured_projects(&self) -> impl Iterator<Item = &Project> {
        self.projects.iter().filter(|p| p.featured)
    }

    /// Social links sorted by display order.
    #[must_use]
    pub fn social_in_order(&self) -> Vec<&SocialLink> {
        let mut links: Vec<_> = self.social.iter().collect();
        links.sort_by_key(|l| l.display_order.unwrap_or(i64::MAX));
        links
    }
}

/// Owner details.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PersonalInfo {
    /// Full name.
    pub name: String,
    /// Professional title.
    pub title: String,
    /// Hero and about blurbs.
    pub bio: Bio,
    /// Where the owner is based.
    pub location: Location,
    /// How to get in touch.
    pub contact: Contact,
    /// Profile picture.
    pub avatar: Avatar,
    /// Downloadable CV.
    pub resume: Option<Resume>,
}

/// Hero and about blurbs.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Bio {
    /// One-liner for the hero.
    pub short: String,
    /// Longer text for the about section.
    pub long: String,
}

/// Where the owner is based.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Location {
    /// City.
    pub city: String,
    /// Country.
    pub country: String,
    /// IANA timezone name.
    pub timezone: Option<String>,
}

/// Contact details.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Contact {
    /// Email address.
    pub email: String,
    /// Phone number.
    pub phone: Option<String>,
    /// Availability note.
    pub availability: Option<String>,
}

/// Profile picture.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Avatar {
    /// Absolute URL or site-relative path.
    pub url: String,
    /// Alt text.
    pub alt: Option<String>,
}

/// Downloadable CV.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Resume {
    /// Absolute URL or site-relative path.
    pub url: String,
    /// Link label.
    pub label: Option<String>,
}

/// One social profile.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SocialLink {
    /// Platform keyword (`github`, `linkedin`, ...).
    pub platform: String,
    /// Profile URL.
    pub url: String,
    /// Link label.
    pub label: Option<String>,
    /// Sort key; must be non-negative.
    pub display_order: Option<i64>,
}

/// A link to other published work.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WorkLink {
    /// Link kind (`blog`, `case-study`, ...).
    #[serde(rename = "type")]
    pub kind: String,
    /// Target URL.
    pub url: String,
    /// Link label.
    pub label: String,
}

/// One showcased project.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Project {
    /// Stable identifier.
    pub id: String,
    /// Display title.
    pub title: String,
    /// Full description.
    pub description: String,
    /// Card blurb.
    pub short_description: String,
    /// Screenshots; the first is the cover.
    pub images: Vec<ProjectImage>,
    /// Technologies used.
    pub tech_stack: Vec<String>,
    /// Demo, source and documentation links.
    pub links: Vec<ProjectLink>,
    /// Category keyword (`web`, `library`, ...).
    pub category: String,
    /// Lifecycle keyword (`completed`, `in-progress`, ...).
    pub status: String,
    /// Shown in the featured row.
    pub featured: bool,
    /// Start date (`YYYY`, `YYYY-MM` or `YYYY-MM-DD`).
    pub date: String,
    /// End date, absent while ongoing.
    pub end_date: Option<String>,
    /// Free-form tags.
    pub tags: Vec<String>,
}

/// A project screenshot.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProjectImage {
    /// Absolute URL or site-relative path.
    pub url: String,
    /// Alt text.
    pub alt: String,
}

/// A project link.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProjectLink {
    /// Link kind (`demo`, `github`, ...).
    #[serde(rename = "type")]
    pub kind: String,
    /// Absolute URL or site-relative path.
    pub url: String,
    /// Link label.
    pub label: String,
}

/// The about page.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct About {
    /// Sections in authored order.
    pub sections: Vec<AboutSection>,
}

/// One about section.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AboutSection {
    /// Section kind (`text`, `skills`, `timeline`, ...).
    #[serde(rename = "type")]
    pub kind: String,
    /// Heading.
    pub title: String,
    /// Body text for text sections.
    pub content: Option<String>,
    /// Sort key.
    pub order: Option<i64>,
}
