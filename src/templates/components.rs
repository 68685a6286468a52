//! Page shell and the helpers that place rendered sections into it.

// ============================================================================
// Navigation Bar
// ============================================================================

/// In-page sections linked from the navbar: (anchor, label).
pub const NAV_SECTIONS: &[(&str, &str)] = &[
    ("skills", "Skills"),
    ("experience", "Experience"),
    ("projects", "Projects"),
    ("education", "Education"),
    ("publications", "Publications"),
    ("blog", "Blog"),
];

pub fn nav_bar(brand: &str) -> String {
    let links: String = NAV_SECTIONS
        .iter()
        .map(|(anchor, label)| format!(r##"<a href="#{}">{}</a>"##, anchor, label))
        .collect::<Vec<_>>()
        .join("\n                ");

    format!(
        r##"<nav class="navbar" id="navbar">
        <div class="container">
            <a class="brand" href="#">{}</a>
            <span class="spacer"></span>
            <div class="links">
                {}
            </div>
        </div>
    </nav>"##,
        super::html_escape(brand),
        links
    )
}

// ============================================================================
// Default Shell
// ============================================================================

/// Built-in page shell holding every section container.
pub fn default_shell(title: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>{title}</title>
</head>
<body>
    {nav}
    <main>
        <section id="skills">
            <div class="container">
                <h2>Skills</h2>
                <div class="skills-grid" id="skills-grid"></div>
            </div>
        </section>
        <section id="experience">
            <div class="container">
                <h2>Experience</h2>
                <div class="timeline" id="timeline"></div>
            </div>
        </section>
        <section id="projects">
            <div class="container">
                <h2>Projects</h2>
                <div class="project-filters" id="project-filters"></div>
                <div class="projects-grid" id="projects-grid"></div>
            </div>
        </section>
        <section id="education">
            <div class="container">
                <h2>Education</h2>
                <div class="education-grid" id="education-grid"></div>
                <h2>Certifications</h2>
                <div class="certifications-grid" id="certifications-grid"></div>
            </div>
        </section>
        <section id="publications">
            <div class="container">
                <h2>Publications</h2>
                <div class="publications-list" id="publications-list"></div>
            </div>
        </section>
        <section id="blog">
            <div class="container">
                <h2>Blog</h2>
                <div class="blog-grid" id="blog-grid"></div>
            </div>
        </section>
    </main>
    <footer>
        <div class="container">Built with Rust</div>
    </footer>
</body>
</html>
"#,
        title = super::html_escape(title),
        nav = nav_bar(title),
    )
}

// ============================================================================
// Injection
// ============================================================================

/// Insert `html` as the first child of the element whose id is `id`.
/// Returns `None` when the shell has no such element.
pub fn inject_container(shell: &str, id: &str, html: &str) -> Option<String> {
    let open_end = find_open_tag_end(shell, id)?;
    let mut out = String::with_capacity(shell.len() + html.len());
    out.push_str(&shell[..open_end]);
    out.push_str(html);
    out.push_str(&shell[open_end..]);
    Some(out)
}

/// Byte offset just past the `>` of the opening tag carrying `id="<id>"`.
fn find_open_tag_end(shell: &str, id: &str) -> Option<usize> {
    for quote in ['"', '\''] {
        let needle = format!("id={quote}{id}{quote}");
        let mut from = 0;
        while let Some(rel) = shell[from..].find(&needle) {
            let at = from + rel;
            from = at + needle.len();
            // Must be a whole attribute, not the tail of e.g. `data-id=`.
            let preceded_by_space = shell[..at]
                .chars()
                .next_back()
                .is_some_and(char::is_whitespace);
            if !preceded_by_space {
                continue;
            }
            if let Some(close) = shell[from..].find('>') {
                return Some(from + close + 1);
            }
        }
    }
    None
}

/// Insert `html` right before the first `marker`, or append it when the
/// marker is absent.
pub fn insert_before(doc: &str, marker: &str, html: &str) -> String {
    match doc.find(marker) {
        Some(at) => format!("{}{}{}", &doc[..at], html, &doc[at..]),
        None => format!("{}{}", doc, html),
    }
}
