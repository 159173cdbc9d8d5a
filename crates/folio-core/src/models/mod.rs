//! Domain models for the portfolio content documents.

pub mod content;
pub mod section;

pub use content::{ExperienceEntry, Profile, Project, SiteSettings, Skill, Stat};
pub use section::{Section, SectionKind};
