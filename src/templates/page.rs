//! Full page assembly: sections into the shell, then style and script.

use super::components::{default_shell, inject_container, insert_before};
use super::scripts::{render_interaction_js, InteractionConfig};
use super::sections::{
    render_blog, render_certifications, render_education, render_experience,
    render_filter_buttons, render_projects, render_publications, render_skills,
};
use super::styles::STYLE;
use crate::filter::normalize;
use crate::models::Portfolio;
use tracing::debug;

/// Container ids the renderer fills.
pub const SKILLS_CONTAINER: &str = "skills-grid";
pub const EXPERIENCE_CONTAINER: &str = "timeline";
pub const PROJECTS_CONTAINER: &str = "projects-grid";
pub const FILTERS_CONTAINER: &str = "project-filters";
pub const EDUCATION_CONTAINER: &str = "education-grid";
pub const CERTIFICATIONS_CONTAINER: &str = "certifications-grid";
pub const PUBLICATIONS_CONTAINER: &str = "publications-list";
pub const BLOG_CONTAINER: &str = "blog-grid";

#[derive(Debug, Clone)]
pub struct PageOptions {
    pub title: String,
    /// Server-side project filter; `None` or `all` shows everything.
    pub filter: Option<String>,
    pub interaction: InteractionConfig,
    /// Embed the stylesheet. Custom shells usually bring their own.
    pub inline_style: bool,
}

impl Default for PageOptions {
    fn default() -> Self {
        Self {
            title: "Portfolio".to_string(),
            filter: None,
            interaction: InteractionConfig::default(),
            inline_style: true,
        }
    }
}

/// Render `portfolio` into `shell`, or into the built-in shell when `None`.
pub fn render_page(portfolio: &Portfolio, shell: Option<&str>, options: &PageOptions) -> String {
    let filter = normalize(options.filter.as_deref());
    let categories = portfolio.project_categories();

    let sections = [
        (SKILLS_CONTAINER, render_skills(&portfolio.skills)),
        (EXPERIENCE_CONTAINER, render_experience(&portfolio.experience)),
        (FILTERS_CONTAINER, render_filter_buttons(&categories, filter)),
        (PROJECTS_CONTAINER, render_projects(&portfolio.projects, filter)),
        (EDUCATION_CONTAINER, render_education(&portfolio.education)),
        (CERTIFICATIONS_CONTAINER, render_certifications(&portfolio.certifications)),
        (PUBLICATIONS_CONTAINER, render_publications(&portfolio.publications)),
        (BLOG_CONTAINER, render_blog(&portfolio.blog)),
    ];

    let mut page = match shell {
        Some(shell) => shell.to_string(),
        None => default_shell(&options.title),
    };

    for (id, html) in sections {
        match inject_container(&page, id, &html) {
            Some(next) => page = next,
            None => debug!("No #{} container in page shell, skipping section", id),
        }
    }

    if options.inline_style {
        page = insert_before(&page, "</head>", &format!("<style>{STYLE}</style>\n"));
    }
    let script = render_interaction_js(&options.interaction);
    insert_before(&page, "</body>", &format!("<script>{script}</script>\n"))
}
