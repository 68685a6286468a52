//! Data models for the portfolio.
//!
//! Every entity is a flat record loaded from one export of the data module.
//! Nothing here is mutated after loading; citation counts only change when the
//! updater rewrites the data file.

use crate::datafile::{read_optional_export, DataError};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Export names used in the data module.
pub const EXPERIENCE_EXPORT: &str = "experienceData";
pub const PROJECTS_EXPORT: &str = "projectsData";
pub const SKILLS_EXPORT: &str = "skillsData";
pub const EDUCATION_EXPORT: &str = "educationData";
pub const CERTIFICATIONS_EXPORT: &str = "certificationsData";
pub const PUBLICATIONS_EXPORT: &str = "publicationsData";
pub const BLOG_EXPORT: &str = "blogData";

/// Value used by the data file for "no link".
pub const NO_LINK: &str = "#";

// ============================================================================
// Entries
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ExperienceEntry {
    pub title: String,
    #[serde(alias = "organization")]
    pub company: String,
    pub location: String,
    pub period: String,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub bullets: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ProjectEntry {
    pub id: u32,
    pub title: String,
    pub description: String,
    #[serde(default)]
    pub technologies: Vec<String>,
    #[serde(default)]
    pub categories: Vec<String>,
    #[serde(default)]
    pub metrics: String,
    pub github: Option<String>,
    pub demo: Option<String>,
}

impl ProjectEntry {
    pub fn github_link(&self) -> Option<&str> {
        real_link(self.github.as_deref())
    }

    pub fn demo_link(&self) -> Option<&str> {
        real_link(self.demo.as_deref())
    }
}

fn real_link(link: Option<&str>) -> Option<&str> {
    link.map(str::trim)
        .filter(|l| !l.is_empty() && *l != NO_LINK)
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SkillGroup {
    pub name: String,
    pub skills: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SkillCategory {
    pub name: String,
    pub groups: Vec<SkillGroup>,
}

impl SkillCategory {
    /// Union of every group, in declaration order, first occurrence wins.
    pub fn all_skills(&self) -> Vec<&str> {
        let mut seen = HashSet::new();
        self.groups
            .iter()
            .flat_map(|g| g.skills.iter())
            .map(String::as_str)
            .filter(|s| seen.insert(*s))
            .collect()
    }
}

/// `skillsData` is an object keyed by category name, each holding an object
/// of named skill lists. Declaration order is kept.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(try_from = "serde_json::Map<String, serde_json::Value>")]
pub struct SkillCatalog {
    pub categories: Vec<SkillCategory>,
}

impl TryFrom<serde_json::Map<String, serde_json::Value>> for SkillCatalog {
    type Error = String;

    fn try_from(map: serde_json::Map<String, serde_json::Value>) -> Result<Self, Self::Error> {
        let mut categories = Vec::with_capacity(map.len());
        for (name, groups) in map {
            let groups = groups
                .as_object()
                .ok_or_else(|| format!("skill category {} is not an object", name))?;
            let groups = groups
                .iter()
                .map(|(group, skills)| {
                    let skills: Vec<String> = serde_json::from_value(skills.clone())
                        .map_err(|e| format!("skill group {}.{}: {}", name, group, e))?;
                    Ok(SkillGroup {
                        name: group.clone(),
                        skills,
                    })
                })
                .collect::<Result<Vec<_>, String>>()?;
            categories.push(SkillCategory { name, groups });
        }
        Ok(SkillCatalog { categories })
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct EducationEntry {
    pub degree: String,
    pub school: String,
    pub location: String,
    pub period: String,
    pub gpa: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CertificationEntry {
    pub name: String,
    pub issuer: String,
    pub year: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PublicationEntry {
    pub title: String,
    pub authors: String,
    pub venue: String,
    pub year: String,
    pub url: String,
    #[serde(default)]
    pub citations: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BlogEntry {
    pub title: String,
    pub url: String,
    pub platform: String,
    pub date: String,
    #[serde(default)]
    pub excerpt: String,
}

// ============================================================================
// Portfolio
// ============================================================================

/// Everything the renderer needs, loaded once per page build.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Portfolio {
    pub experience: Vec<ExperienceEntry>,
    pub projects: Vec<ProjectEntry>,
    pub skills: SkillCatalog,
    pub education: Vec<EducationEntry>,
    pub certifications: Vec<CertificationEntry>,
    pub publications: Vec<PublicationEntry>,
    pub blog: Vec<BlogEntry>,
}

impl Portfolio {
    /// Parse the data module text. Missing exports become empty sections;
    /// malformed ones are errors.
    pub fn from_data_module(text: &str) -> Result<Self, DataError> {
        let portfolio = Portfolio {
            experience: read_optional_export(text, EXPERIENCE_EXPORT)?,
            projects: read_optional_export(text, PROJECTS_EXPORT)?,
            skills: read_optional_export(text, SKILLS_EXPORT)?,
            education: read_optional_export(text, EDUCATION_EXPORT)?,
            certifications: read_optional_export(text, CERTIFICATIONS_EXPORT)?,
            publications: read_optional_export(text, PUBLICATIONS_EXPORT)?,
            blog: read_optional_export(text, BLOG_EXPORT)?,
        };
        portfolio.warn_duplicates();
        Ok(portfolio)
    }

    fn warn_duplicates(&self) {
        let mut ids = HashSet::new();
        for project in &self.projects {
            if !ids.insert(project.id) {
                tracing::warn!("duplicate project id {} ({})", project.id, project.title);
            }
        }
        let mut titles = HashSet::new();
        for publication in &self.publications {
            if !titles.insert(publication.title.as_str()) {
                tracing::warn!("duplicate publication title: {}", publication.title);
            }
        }
    }

    /// Distinct project categories in first-seen order.
    pub fn project_categories(&self) -> Vec<&str> {
        let mut seen = HashSet::new();
        self.projects
            .iter()
            .flat_map(|p| p.categories.iter())
            .map(String::as_str)
            .filter(|c| seen.insert(*c))
            .collect()
    }

    pub fn total_citations(&self) -> u64 {
        self.publications.iter().map(|p| u64::from(p.citations)).sum()
    }
}
