//! Content catalog loading

use std::collections::HashSet;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{ContentError, Result};
use crate::model::{Project, SkillCategory, SocialLink, TimelineEntry};

const BUILTIN_CATALOG: &str = include_str!("../data/catalog.toml");

/// Everything the page sections display
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Catalog {
    #[serde(default)]
    pub projects: Vec<Project>,
    #[serde(default)]
    pub skill_categories: Vec<SkillCategory>,
    #[serde(default)]
    pub journey: Vec<TimelineEntry>,
    #[serde(default)]
    pub courses: Vec<TimelineEntry>,
    #[serde(default)]
    pub achievements: Vec<TimelineEntry>,
    #[serde(default)]
    pub social: Vec<SocialLink>,
}

impl Catalog {
    /// Parse and validate a catalog from TOML text
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let catalog: Catalog = toml::from_str(content)?;
        catalog.check()?;
        Ok(catalog)
    }

    /// Load a catalog file
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|source| ContentError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let catalog = Self::from_toml_str(&content)?;
        tracing::info!(
            "loaded catalog from {}: {} project(s), {} skill categories",
            path.display(),
            catalog.projects.len(),
            catalog.skill_categories.len()
        );
        Ok(catalog)
    }

    /// The catalog compiled into the crate
    pub fn builtin() -> Result<Self> {
        Self::from_toml_str(BUILTIN_CATALOG)
    }

    pub fn project(&self, id: u32) -> Option<&Project> {
        self.projects.iter().find(|project| project.id == id)
    }

    pub fn skill_count(&self) -> usize {
        self.skill_categories
            .iter()
            .map(|category| category.skills.len())
            .sum()
    }

    fn check(&self) -> Result<()> {
        let mut ids = HashSet::new();
        for project in &self.projects {
            if !ids.insert(project.id) {
                return Err(ContentError::DuplicateProject(project.id));
            }
        }

        for skill in self.skill_categories.iter().flat_map(|c| &c.skills) {
            if skill.level > 100 {
                return Err(ContentError::InvalidLevel {
                    skill: skill.name.clone(),
                    level: skill.level,
                });
            }
        }
        Ok(())
    }
}
