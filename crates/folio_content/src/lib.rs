//! Folio content
//!
//! Static records rendered by the portfolio sections: projects, skill
//! categories, the about timelines and social links. A catalog is read from
//! TOML; [`Catalog::builtin`] returns the one compiled into the crate.

pub mod catalog;
pub mod error;
pub mod model;

pub use catalog::Catalog;
pub use error::{ContentError, Result};
pub use model::{Project, Skill, SkillCategory, SkillLevel, SocialLink, TimelineEntry, TimelineIcon};
