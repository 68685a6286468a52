//! Card markup for each portfolio section.
//!
//! Every function returns the inner HTML for one section container. All
//! data-file text passes through `html_escape`.

use super::html_escape;
use crate::filter::{project_visible, ALL_FILTER, CATEGORY_DELIMITER};
use crate::models::{
    BlogEntry, CertificationEntry, EducationEntry, ExperienceEntry, ProjectEntry,
    PublicationEntry, SkillCatalog,
};

const EXTERNAL: &str = r#"target="_blank" rel="noopener noreferrer""#;

fn tags(class: &str, items: &[String], with_category: bool) -> String {
    items
        .iter()
        .map(|item| {
            let item = html_escape(item);
            if with_category {
                format!(r#"<span class="{class}" data-category="{item}">{item}</span>"#)
            } else {
                format!(r#"<span class="{class}">{item}</span>"#)
            }
        })
        .collect()
}

// ============================================================================
// Skills
// ============================================================================

pub fn render_skills(skills: &SkillCatalog) -> String {
    skills
        .categories
        .iter()
        .map(|category| {
            let tags: String = category
                .all_skills()
                .into_iter()
                .map(|s| format!(r#"<span class="skill-tag">{}</span>"#, html_escape(s)))
                .collect();
            format!(
                r#"<div class="skill-category"><h3 class="skill-category-title">{}</h3><div class="skill-tags">{}</div></div>"#,
                html_escape(&category.name),
                tags
            )
        })
        .collect()
}

// ============================================================================
// Experience
// ============================================================================

pub fn render_experience(experience: &[ExperienceEntry]) -> String {
    experience
        .iter()
        .enumerate()
        .map(|(index, exp)| {
            let bullets: String = exp
                .bullets
                .iter()
                .map(|b| format!("<li>{}</li>", html_escape(b)))
                .collect();
            format!(
                r#"<div class="timeline-item" style="animation-delay: {delay}s"><div class="timeline-card"><div class="timeline-header"><h3 class="timeline-title">{title}</h3><div class="timeline-company">{company}</div><div class="timeline-meta">{location} • {period}</div></div><div class="timeline-tags">{tags}</div><ul class="timeline-bullets">{bullets}</ul></div></div>"#,
                delay = animation_delay(index),
                title = html_escape(&exp.title),
                company = html_escape(&exp.company),
                location = html_escape(&exp.location),
                period = html_escape(&exp.period),
                tags = tags("timeline-tag", &exp.tags, true),
                bullets = bullets,
            )
        })
        .collect()
}

/// Stagger of `index × 0.1s`, formatted without float noise.
fn animation_delay(index: usize) -> String {
    match index % 10 {
        0 => format!("{}", index / 10),
        tenth => format!("{}.{}", index / 10, tenth),
    }
}

// ============================================================================
// Projects
// ============================================================================

/// Project cards. Cards hidden by `filter` are still emitted, marked
/// `filtered`, so the client-side filter can bring them back.
pub fn render_projects(projects: &[ProjectEntry], filter: Option<&str>) -> String {
    projects
        .iter()
        .map(|project| render_project(project, project_visible(project, filter)))
        .collect()
}

fn render_project(project: &ProjectEntry, visible: bool) -> String {
    let mut links = String::new();
    if let Some(github) = project.github_link() {
        links.push_str(&format!(
            r#"<a href="{}" {EXTERNAL} class="project-link">GitHub →</a>"#,
            html_escape(github)
        ));
    }
    if let Some(demo) = project.demo_link() {
        links.push_str(&format!(
            r#"<a href="{}" {EXTERNAL} class="project-link">Live Demo →</a>"#,
            html_escape(demo)
        ));
    }
    let links = if links.is_empty() {
        String::new()
    } else {
        format!(r#"<div class="project-links">{links}</div>"#)
    };

    format!(
        r#"<div class="project-card{hidden}" data-categories="{categories}"><div class="project-header"><h3 class="project-title">{title}</h3><div class="project-badges">{badges}</div></div><div class="project-body"><p class="project-description">{description}</p><div class="project-metrics">📊 {metrics}</div><div class="project-technologies">{tech}</div>{links}</div></div>"#,
        hidden = if visible { "" } else { " filtered" },
        categories = html_escape(&project.categories.join(CATEGORY_DELIMITER)),
        title = html_escape(&project.title),
        badges = tags("project-badge", &project.categories, true),
        description = html_escape(&project.description),
        metrics = html_escape(&project.metrics),
        tech = tags("project-tech-tag", &project.technologies, false),
        links = links,
    )
}

/// One button for `all` plus one per distinct category. Each button is also
/// a plain link to the server-filtered page.
pub fn render_filter_buttons(categories: &[&str], active: Option<&str>) -> String {
    let active = active.unwrap_or(ALL_FILTER);
    std::iter::once((ALL_FILTER, "All"))
        .chain(categories.iter().map(|c| (*c, *c)))
        .map(|(value, label)| {
            let href = if value == ALL_FILTER {
                "/".to_string()
            } else {
                format!("/?filter={}", urlencoding::encode(value))
            };
            format!(
                r#"<a class="filter-btn{}" href="{}" data-filter="{}">{}</a>"#,
                if value == active { " active" } else { "" },
                html_escape(&href),
                html_escape(value),
                html_escape(label)
            )
        })
        .collect()
}

// ============================================================================
// Education & Certifications
// ============================================================================

pub fn render_education(education: &[EducationEntry]) -> String {
    education
        .iter()
        .map(|edu| {
            let gpa = edu
                .gpa
                .as_deref()
                .filter(|g| !g.trim().is_empty())
                .map(|g| format!(r#"<div class="education-gpa">GPA: {}</div>"#, html_escape(g)))
                .unwrap_or_default();
            format!(
                r#"<div class="education-card"><div class="education-degree">{}</div><div class="education-school">{}</div><div class="education-meta">{} • {}</div>{}</div>"#,
                html_escape(&edu.degree),
                html_escape(&edu.school),
                html_escape(&edu.location),
                html_escape(&edu.period),
                gpa
            )
        })
        .collect()
}

pub fn render_certifications(certifications: &[CertificationEntry]) -> String {
    certifications
        .iter()
        .map(|cert| {
            format!(
                r#"<div class="certification-card"><div class="certification-name">{}</div><div class="certification-issuer">{}</div><div class="certification-year">{}</div></div>"#,
                html_escape(&cert.name),
                html_escape(&cert.issuer),
                html_escape(&cert.year)
            )
        })
        .collect()
}

// ============================================================================
// Publications & Blog
// ============================================================================

pub fn render_publications(publications: &[PublicationEntry]) -> String {
    if publications.is_empty() {
        return String::new();
    }
    let total: u64 = publications.iter().map(|p| u64::from(p.citations)).sum();
    let summary = format!(
        r#"<p class="publications-summary">{} publications • {} citations</p>"#,
        publications.len(),
        total
    );

    let cards: String = publications
        .iter()
        .map(|p| {
            format!(
                r#"<div class="publication-card"><h3 class="publication-title"><a href="{}" {EXTERNAL}>{}</a></h3><div class="publication-authors">{}</div><div class="publication-venue">{} • {}</div><div class="publication-citations">Cited by {}</div></div>"#,
                html_escape(&p.url),
                html_escape(&p.title),
                html_escape(&p.authors),
                html_escape(&p.venue),
                html_escape(&p.year),
                p.citations
            )
        })
        .collect();

    summary + &cards
}

pub fn render_blog(posts: &[BlogEntry]) -> String {
    posts
        .iter()
        .map(|post| {
            let excerpt = if post.excerpt.is_empty() {
                String::new()
            } else {
                format!(r#"<p class="blog-excerpt">{}</p>"#, html_escape(&post.excerpt))
            };
            format!(
                r#"<div class="blog-card"><h3 class="blog-title"><a href="{}" {EXTERNAL}>{}</a></h3><div class="blog-meta">{} • {}</div>{}</div>"#,
                html_escape(&post.url),
                html_escape(&post.title),
                html_escape(&post.platform),
                html_escape(&post.date),
                excerpt
            )
        })
        .collect()
}
