//! Typed content models.
//!
//! These mirror the stored document fields (camelCase in JSON, matching the
//! admin console payloads). Unknown fields are preserved only at the store
//! level; these types are used to validate section saves.

use serde::{Deserialize, Serialize};

/// Profile section (singleton).
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct Profile {
    pub name: String,
    pub title: String,
    pub bio: String,
    pub email: String,
    pub github: String,
    pub linkedin: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
}

/// One entry of the skills section (list).
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct Skill {
    pub subject: String,
    pub score: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub full_mark: Option<u32>,
}

/// One entry of the projects section (list).
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct Project {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    pub name: String,
    pub description: String,
    pub language: String,
    pub language_color: String,
    pub stars: i64,
    pub forks: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<String>,
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
}

/// One entry of the experience section (list).
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct ExperienceEntry {
    pub role: String,
    pub company: String,
    pub period: String,
    pub description: String,
}

/// One entry of the stats section (list).
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct Stat {
    pub label: String,
    pub value: String,
    pub trend: String,
}

/// Settings section (singleton): site chrome and copy.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct SiteSettings {
    pub site_name: String,
    pub hero_badge: String,
    pub hero_title1: String,
    pub hero_title2: String,
    pub hero_github_url: String,
    pub hero_gitlab_url: String,
    pub about_title: String,
    pub about_description: Vec<String>,
    pub about_image: String,
    pub arsenal_title: String,
    pub arsenal_description: String,
    pub whatsapp_number: String,
    pub whatsapp_greeting: String,
    pub whatsapp_message: String,
    pub footer_text: String,
    pub copyright: String,
}
