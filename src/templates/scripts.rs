//! Client-side interaction script.
//!
//! The page works without it (filtering is also applied server side); the
//! script adds smooth in-page navigation, the navbar scroll state, animated
//! project filtering and the one-shot scroll reveal.

use serde::Serialize;

/// Tunables baked into the rendered script.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InteractionConfig {
    /// Navbar height subtracted from anchor scroll targets, in px.
    pub nav_offset: u32,
    /// Scroll distance after which the navbar gets the `scrolled` class.
    pub scroll_threshold: u32,
    pub show_delay_ms: u32,
    pub hide_delay_ms: u32,
    /// Intersection ratio that triggers the reveal.
    pub reveal_threshold: f32,
    pub root_margin: String,
}

impl Default for InteractionConfig {
    fn default() -> Self {
        Self {
            nav_offset: 80,
            scroll_threshold: 50,
            show_delay_ms: 10,
            hide_delay_ms: 300,
            reveal_threshold: 0.1,
            root_margin: "0px 0px -50px 0px".to_string(),
        }
    }
}

/// Selector for every card observed by the reveal.
pub const REVEAL_SELECTOR: &str = ".skill-category, .timeline-item, .project-card, .education-card, .certification-card, .publication-card, .blog-card";

pub fn render_interaction_js(config: &InteractionConfig) -> String {
    let config_json = serde_json::to_string(config).unwrap_or_else(|_| "{}".to_string());

    format!(
        r##"(function () {{
    const cfg = {config_json};

    function setupNavigation() {{
        document.querySelectorAll('a[href^="#"]').forEach(anchor => {{
            anchor.addEventListener('click', function (e) {{
                const targetId = this.getAttribute('href');
                if (targetId === '#') return;
                const target = document.querySelector(targetId);
                if (!target) return;
                e.preventDefault();
                window.scrollTo({{ top: target.offsetTop - cfg.nav_offset, behavior: 'smooth' }});
            }});
        }});

        const navbar = document.getElementById('navbar');
        if (!navbar) return;
        const onScroll = () => {{
            navbar.classList.toggle('scrolled', window.pageYOffset > cfg.scroll_threshold);
        }};
        window.addEventListener('scroll', onScroll);
        onScroll();
    }}

    function setupFiltering() {{
        const buttons = document.querySelectorAll('.filter-btn');
        const cards = document.querySelectorAll('.project-card');

        buttons.forEach(button => {{
            button.addEventListener('click', e => {{
                e.preventDefault();
                buttons.forEach(b => b.classList.remove('active'));
                button.classList.add('active');

                const filter = button.getAttribute('data-filter');
                cards.forEach(card => {{
                    const categories = (card.getAttribute('data-categories') || '').split(',');
                    if (filter === 'all' || categories.includes(filter)) {{
                        card.classList.remove('filtered');
                        card.style.display = 'block';
                        setTimeout(() => {{
                            card.style.opacity = '1';
                            card.style.transform = 'scale(1)';
                        }}, cfg.show_delay_ms);
                    }} else {{
                        card.style.opacity = '0';
                        card.style.transform = 'scale(0.95)';
                        setTimeout(() => {{
                            card.style.display = 'none';
                        }}, cfg.hide_delay_ms);
                    }}
                }});

                if (window.history && window.history.replaceState) {{
                    const url = filter === 'all' ? '/' : '/?filter=' + encodeURIComponent(filter);
                    window.history.replaceState(null, '', url);
                }}
            }});
        }});
    }}

    function setupScrollReveal() {{
        const targets = document.querySelectorAll('{REVEAL_SELECTOR}');
        if (!('IntersectionObserver' in window)) {{
            targets.forEach(el => el.classList.add('fade-in'));
            return;
        }}
        const observer = new IntersectionObserver(entries => {{
            entries.forEach(entry => {{
                if (entry.isIntersecting) {{
                    entry.target.classList.add('fade-in');
                    observer.unobserve(entry.target);
                }}
            }});
        }}, {{ threshold: cfg.reveal_threshold, rootMargin: cfg.root_margin }});
        targets.forEach(el => observer.observe(el));
    }}

    document.addEventListener('DOMContentLoaded', () => {{
        setupNavigation();
        setupFiltering();
        setupScrollReveal();
    }});
}})();
"##
    )
}
