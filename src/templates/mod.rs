//! HTML templates and styling for the portfolio page.
//!
//! ## Module Structure
//!
//! - `styles` - CSS constants and theme definitions
//! - `scripts` - Client-side interaction script
//! - `components` - Navbar, default page shell, container injection
//! - `sections` - Card markup per section
//! - `page` - Full page assembly

mod components;
mod page;
mod scripts;
mod sections;
mod styles;

pub use components::{default_shell, inject_container, nav_bar};
pub use page::{render_page, PageOptions};
pub use scripts::{render_interaction_js, InteractionConfig};
pub use sections::{
    render_blog, render_certifications, render_education, render_experience,
    render_filter_buttons, render_projects, render_publications, render_skills,
};
pub use styles::STYLE;

pub fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}
