//! CSS styles for the portfolio page.
//!
//! Contains the main STYLE constant with all CSS for the rendered page.

// ============================================================================
// CSS Styles
// ============================================================================

pub const STYLE: &str = r#"
/* Solarized Light Theme */
:root {
    --base03: #002b36;
    --base02: #073642;
    --base01: #586e75;
    --base00: #657b83;
    --base1: #93a1a1;
    --base2: #eee8d5;
    --base3: #fdf6e3;

    --yellow: #b58900;
    --orange: #cb4b16;
    --magenta: #d33682;
    --violet: #6c71c4;
    --blue: #268bd2;
    --cyan: #2aa198;
    --green: #859900;

    --bg: var(--base3);
    --fg: var(--base00);
    --heading: var(--base02);
    --muted: var(--base1);
    --border: var(--base2);
    --link: var(--blue);
    --link-hover: var(--cyan);
    --card-bg: #fffaf0;
    --nav-height: 64px;
}

* { box-sizing: border-box; margin: 0; padding: 0; }

html { scroll-behavior: smooth; }

body {
    font-family: -apple-system, BlinkMacSystemFont, "Segoe UI", Roboto, "Helvetica Neue", Arial, sans-serif;
    line-height: 1.6;
    color: var(--fg);
    background: var(--bg);
}

a { color: var(--link); text-decoration: none; }
a:hover { color: var(--link-hover); text-decoration: underline; }

h2 { color: var(--heading); font-size: 1.6rem; margin-bottom: 1.25rem; }
h3 { color: var(--heading); font-size: 1.05rem; font-weight: 600; }

.container {
    max-width: 1080px;
    margin: 0 auto;
    padding: 0 1rem;
}

/* Navigation */
.navbar {
    position: sticky;
    top: 0;
    height: var(--nav-height);
    background: var(--bg);
    border-bottom: 1px solid transparent;
    z-index: 100;
    transition: border-color 0.3s, box-shadow 0.3s;
}
.navbar.scrolled {
    border-bottom-color: var(--border);
    box-shadow: 0 2px 8px rgba(0, 43, 54, 0.08);
}
.navbar .container {
    display: flex;
    align-items: center;
    gap: 1.25rem;
    height: 100%;
}
.navbar .brand { font-weight: 700; color: var(--heading); }
.navbar .spacer { flex: 1; }
.navbar a { font-size: 0.9rem; }

section {
    padding: 4rem 0 2rem;
    scroll-margin-top: var(--nav-height);
}

/* Reveal */
.skill-category, .timeline-item, .project-card, .education-card,
.certification-card, .publication-card, .blog-card {
    opacity: 0;
    transform: translateY(16px);
    transition: opacity 0.5s ease, transform 0.5s ease;
}
.fade-in { opacity: 1 !important; transform: none !important; }

/* Skills */
.skills-grid {
    display: grid;
    grid-template-columns: repeat(auto-fill, minmax(280px, 1fr));
    gap: 1rem;
}
.skill-category {
    background: var(--card-bg);
    border: 1px solid var(--border);
    border-radius: 8px;
    padding: 1rem;
}
.skill-tags { display: flex; flex-wrap: wrap; gap: 0.4rem; margin-top: 0.6rem; }
.skill-tag {
    font-size: 0.8rem;
    padding: 0.15rem 0.55rem;
    border-radius: 999px;
    background: var(--border);
    color: var(--base01);
}

/* Experience */
.timeline { border-left: 2px solid var(--border); padding-left: 1.25rem; }
.timeline-item { margin-bottom: 1.25rem; }
.timeline-card {
    background: var(--card-bg);
    border: 1px solid var(--border);
    border-radius: 8px;
    padding: 1rem 1.25rem;
}
.timeline-company { color: var(--violet); font-weight: 500; }
.timeline-meta { color: var(--muted); font-size: 0.85rem; }
.timeline-tags { display: flex; flex-wrap: wrap; gap: 0.4rem; margin: 0.6rem 0; }
.timeline-tag, .project-badge {
    font-size: 0.75rem;
    padding: 0.1rem 0.5rem;
    border-radius: 4px;
    border: 1px solid var(--cyan);
    color: var(--cyan);
}
.timeline-bullets { padding-left: 1.1rem; font-size: 0.92rem; }
.timeline-bullets li { margin-bottom: 0.25rem; }

/* Projects */
.project-filters { display: flex; flex-wrap: wrap; gap: 0.5rem; margin-bottom: 1.25rem; }
.filter-btn {
    padding: 0.35rem 0.9rem;
    border: 1px solid var(--border);
    border-radius: 999px;
    background: var(--bg);
    color: var(--fg);
    font-size: 0.85rem;
    cursor: pointer;
}
.filter-btn:hover { text-decoration: none; border-color: var(--blue); }
.filter-btn.active { background: var(--blue); border-color: var(--blue); color: var(--base3); }

.projects-grid {
    display: grid;
    grid-template-columns: repeat(auto-fill, minmax(300px, 1fr));
    gap: 1rem;
}
.project-card {
    display: block;
    background: var(--card-bg);
    border: 1px solid var(--border);
    border-radius: 8px;
    padding: 1rem;
}
.project-card.filtered { display: none; }
.project-header { display: flex; flex-direction: column; gap: 0.4rem; margin-bottom: 0.6rem; }
.project-badges { display: flex; flex-wrap: wrap; gap: 0.3rem; }
.project-description { font-size: 0.92rem; }
.project-metrics { font-size: 0.85rem; color: var(--green); margin: 0.6rem 0; }
.project-technologies { display: flex; flex-wrap: wrap; gap: 0.3rem; }
.project-tech-tag {
    font-size: 0.75rem;
    padding: 0.1rem 0.45rem;
    border-radius: 4px;
    background: var(--border);
}
.project-links { display: flex; gap: 1rem; margin-top: 0.75rem; font-size: 0.9rem; }

/* Education & certifications */
.education-grid, .certifications-grid, .blog-grid {
    display: grid;
    grid-template-columns: repeat(auto-fill, minmax(280px, 1fr));
    gap: 1rem;
}
.education-card, .certification-card, .blog-card {
    background: var(--card-bg);
    border: 1px solid var(--border);
    border-radius: 8px;
    padding: 1rem;
}
.education-degree, .certification-name { font-weight: 600; color: var(--heading); }
.education-school, .certification-issuer { color: var(--violet); }
.education-meta, .certification-year, .blog-meta { color: var(--muted); font-size: 0.85rem; }
.education-gpa { font-size: 0.85rem; color: var(--green); }

/* Publications */
.publications-summary { color: var(--muted); margin-bottom: 1rem; }
.publication-card {
    border-left: 3px solid var(--yellow);
    padding: 0.5rem 0 0.5rem 1rem;
    margin-bottom: 1rem;
}
.publication-authors { font-size: 0.88rem; }
.publication-venue { color: var(--muted); font-size: 0.85rem; font-style: italic; }
.publication-citations { font-size: 0.85rem; color: var(--orange); }

.blog-excerpt { font-size: 0.9rem; margin-top: 0.4rem; }

footer {
    padding: 2rem 0;
    color: var(--muted);
    font-size: 0.85rem;
    text-align: center;
}

@media (max-width: 640px) {
    .navbar .links { display: none; }
    section { padding-top: 3rem; }
}

@media (prefers-reduced-motion: reduce) {
    .skill-category, .timeline-item, .project-card, .education-card,
    .certification-card, .publication-card, .blog-card {
        transition: none;
    }
}
"#;
