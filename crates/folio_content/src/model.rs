//! Content records shown by the page sections

use std::fmt;

use serde::{Deserialize, Serialize};

/// Placeholder link used by projects without a live deployment
const NO_LINK: &str = "#";

/// A portfolio project card
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Project {
    pub id: u32,
    pub title: String,
    pub description: String,
    pub image: String,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default = "default_link")]
    pub link: String,
    #[serde(default)]
    pub github: Option<String>,
}

fn default_link() -> String {
    NO_LINK.to_string()
}

impl Project {
    /// Live demo URL, if the project has one
    pub fn live_link(&self) -> Option<&str> {
        match self.link.as_str() {
            "" | NO_LINK => None,
            link => Some(link),
        }
    }

    /// Stable key for reveal tracking
    pub fn key(&self) -> String {
        format!("project-{}", self.id)
    }
}

/// A single skill with its proficiency (0-100)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Skill {
    pub name: String,
    pub icon: String,
    pub level: u8,
}

impl Skill {
    pub fn level_label(&self) -> SkillLevel {
        SkillLevel::from_level(self.level)
    }
}

/// Named group of skills; one skills tab per category
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkillCategory {
    pub name: String,
    #[serde(default)]
    pub skills: Vec<Skill>,
}

/// Proficiency band shown next to a skill bar
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum SkillLevel {
    Beginner,
    Intermediate,
    Proficient,
    Advanced,
    Expert,
}

impl SkillLevel {
    pub fn from_level(level: u8) -> Self {
        match level {
            90.. => SkillLevel::Expert,
            80..=89 => SkillLevel::Advanced,
            70..=79 => SkillLevel::Proficient,
            60..=69 => SkillLevel::Intermediate,
            _ => SkillLevel::Beginner,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SkillLevel::Beginner => "Beginner",
            SkillLevel::Intermediate => "Intermediate",
            SkillLevel::Proficient => "Proficient",
            SkillLevel::Advanced => "Advanced",
            SkillLevel::Expert => "Expert",
        }
    }
}

impl fmt::Display for SkillLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Icon shown on a timeline marker
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TimelineIcon {
    #[default]
    Book,
    Award,
    Graduation,
}

/// Entry of the journey, courses or achievements timeline
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimelineEntry {
    pub year: String,
    pub title: String,
    /// School, employer or issuing platform
    pub organization: String,
    pub description: String,
    #[serde(default)]
    pub icon: TimelineIcon,
    #[serde(default)]
    pub certificate: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SocialLink {
    pub name: String,
    pub url: String,
    pub icon: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_skill_level_bands() {
        let cases = [
            (100, SkillLevel::Expert),
            (90, SkillLevel::Expert),
            (89, SkillLevel::Advanced),
            (80, SkillLevel::Advanced),
            (79, SkillLevel::Proficient),
            (70, SkillLevel::Proficient),
            (60, SkillLevel::Intermediate),
            (59, SkillLevel::Beginner),
            (0, SkillLevel::Beginner),
        ];
        for (level, expected) in cases {
            assert_eq!(SkillLevel::from_level(level), expected, "level {level}");
        }
        assert_eq!(SkillLevel::Proficient.to_string(), "Proficient");
    }

    #[test]
    fn test_placeholder_link_is_not_live() {
        let mut project = Project {
            id: 7,
            title: "Demo".into(),
            description: String::new(),
            image: String::new(),
            tags: vec![],
            link: "#".into(),
            github: None,
        };
        assert_eq!(project.live_link(), None);
        assert_eq!(project.key(), "project-7");

        project.link = "https://example.com".into();
        assert_eq!(project.live_link(), Some("https://example.com"));
    }
}
