//! HTML rendering for the related-tools panel and the tool index page.
//!
//! One render path serves both panel layouts: each [`Variant`] maps to a
//! layout spec (title line, item cap, CSS classes) instead of duplicating the
//! markup loop per variant. Rendering is one-shot over the resolved list; a
//! panel with fewer than [`MIN_RESULTS`] entries renders as nothing at all
//! rather than showing one or two weak suggestions.

use crate::catalog::{CatalogIndex, ToolSlug};
use crate::resolver::{RelatedTool, RelatedToolsResolver};
use anyhow::{Result, bail};
use rand::Rng;
use std::fmt::Write;

/// A panel is suppressed entirely below this many resolved entries.
pub const MIN_RESULTS: usize = 3;
/// The sidebar layout shows at most this many entries, independent of the
/// resolver's own caps.
pub const SIDEBAR_MAX_ITEMS: usize = 5;

const PANEL_TITLE: &str = "🔗 関連ツール";
const CTA_LABEL: &str = "ツールを使う";
const INDEX_CTA_LABEL: &str = "使ってみる";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
/// Layout variant for the related-tools panel.
pub enum Variant {
    /// Compact vertical list for page sidebars.
    Sidebar,
    /// Full-width responsive card grid.
    Default,
}

impl Variant {
    pub fn as_str(&self) -> &'static str {
        match self {
            Variant::Sidebar => "sidebar",
            Variant::Default => "default",
        }
    }

    pub fn parse(raw: &str) -> Result<Self> {
        match raw {
            "sidebar" => Ok(Variant::Sidebar),
            "default" => Ok(Variant::Default),
            other => bail!("unknown variant '{other}' (expected sidebar|default)"),
        }
    }

    fn layout(&self) -> Layout {
        match self {
            Variant::Sidebar => Layout {
                max_items: Some(SIDEBAR_MAX_ITEMS),
                section_class: "",
                header_class: "mb-4",
                title_class: "text-lg font-bold text-gray-800 mb-2",
                subtitle: "あなたの作業に役立つ関連ツール",
                subtitle_class: "text-gray-600 text-xs",
                list_class: "space-y-3",
                link_class: "block p-3 bg-gray-50 rounded-lg border border-gray-100 hover:bg-blue-50 hover:border-blue-300",
                name_class: "font-medium text-gray-800 text-sm mb-1",
                with_icon: false,
            },
            Variant::Default => Layout {
                max_items: None,
                section_class: "mt-8 p-6 bg-gradient-to-br from-blue-50 to-indigo-50 rounded-xl border border-blue-100",
                header_class: "text-center mb-6",
                title_class: "text-2xl font-bold text-gray-800 mb-2",
                subtitle: "あなたの作業に役立つ関連ツールをご紹介",
                subtitle_class: "text-gray-600 text-sm",
                list_class: "grid grid-cols-1 sm:grid-cols-2 lg:grid-cols-3 gap-4",
                link_class: "block p-4 bg-white rounded-lg shadow-sm border border-gray-200 hover:shadow-md hover:border-blue-300",
                name_class: "font-semibold text-gray-800 mb-1",
                with_icon: true,
            },
        }
    }
}

/// Per-variant layout parameters consumed by the shared render loop.
struct Layout {
    max_items: Option<usize>,
    section_class: &'static str,
    header_class: &'static str,
    title_class: &'static str,
    subtitle: &'static str,
    subtitle_class: &'static str,
    list_class: &'static str,
    link_class: &'static str,
    name_class: &'static str,
    with_icon: bool,
}

/// Render the related-tools panel for an already-resolved list.
///
/// Returns `None` when the list is too short to show (the suppression rule),
/// otherwise a self-contained `<section>` fragment.
pub fn render_panel(tools: &[RelatedTool], variant: Variant) -> Option<String> {
    if tools.len() < MIN_RESULTS {
        return None;
    }

    let layout = variant.layout();
    let shown = match layout.max_items {
        Some(cap) => &tools[..tools.len().min(cap)],
        None => tools,
    };

    let mut html = String::new();
    push_open_tag(&mut html, "section", layout.section_class);
    push_open_tag(&mut html, "div", layout.header_class);
    let _ = writeln!(
        html,
        "<h2 class=\"{}\">{}</h2>",
        layout.title_class,
        escape_html(PANEL_TITLE)
    );
    let _ = writeln!(
        html,
        "<p class=\"{}\">{}</p>",
        layout.subtitle_class,
        escape_html(layout.subtitle)
    );
    html.push_str("</div>\n");

    push_open_tag(&mut html, "div", layout.list_class);
    for tool in shown {
        html.push_str("<div class=\"group\">\n");
        let _ = writeln!(
            html,
            "<a href=\"{}\" class=\"{}\">",
            escape_html(&tool.path),
            layout.link_class
        );
        if layout.with_icon {
            html.push_str("<span class=\"text-blue-600 text-lg\">🛠️</span>\n");
        }
        let _ = writeln!(
            html,
            "<h3 class=\"{}\">{}</h3>",
            layout.name_class,
            escape_html(&tool.name)
        );
        let _ = writeln!(
            html,
            "<span class=\"text-xs text-gray-500\">{} →</span>",
            escape_html(CTA_LABEL)
        );
        html.push_str("</a>\n</div>\n");
    }
    html.push_str("</div>\n</section>\n");
    Some(html)
}

/// Resolve `current` and render its panel in one step.
///
/// The random tier draws from the process entropy source; use
/// [`render_related_with`] to inject one.
pub fn render_related(index: &CatalogIndex, current: &ToolSlug, variant: Variant) -> Option<String> {
    render_related_with(index, current, variant, &mut rand::rng())
}

/// Resolve with an explicit entropy source, then render.
pub fn render_related_with<R: Rng + ?Sized>(
    index: &CatalogIndex,
    current: &ToolSlug,
    variant: Variant,
    rng: &mut R,
) -> Option<String> {
    let resolved = RelatedToolsResolver::new(index).resolve_with(current, rng);
    render_panel(&resolved, variant)
}

/// Render the full tool index page: every catalog tool as a linked card under
/// the site header, in stable slug order.
pub fn render_index_page(index: &CatalogIndex) -> String {
    let mut html = String::new();
    html.push_str("<!DOCTYPE html>\n<html lang=\"ja\">\n<head>\n");
    html.push_str("<meta charset=\"utf-8\">\n");
    html.push_str("<meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">\n");
    html.push_str("<title>Pokoro Tools</title>\n</head>\n");
    html.push_str("<body class=\"min-h-screen bg-gradient-to-br from-blue-50 to-indigo-100\">\n");

    html.push_str("<header class=\"bg-white shadow-sm\">\n");
    html.push_str("<div class=\"max-w-7xl mx-auto px-4 sm:px-6 lg:px-8 py-6\">\n");
    html.push_str(
        "<h1 class=\"text-3xl font-bold text-gray-900 text-center\"><span class=\"text-indigo-600\">Pokoro</span> Tools</h1>\n",
    );
    html.push_str("<p class=\"text-center text-gray-600 mt-2\">便利なWebツール集</p>\n");
    html.push_str("</div>\n</header>\n");

    html.push_str("<main class=\"max-w-7xl mx-auto px-4 sm:px-6 lg:px-8 py-12\">\n");
    html.push_str("<div class=\"grid grid-cols-1 sm:grid-cols-2 lg:grid-cols-3 gap-6\">\n");
    for (slug, entry) in &index.catalog().tools {
        html.push_str("<div class=\"bg-white rounded-xl shadow-md hover:shadow-xl overflow-hidden group\">\n<div class=\"p-6\">\n");
        let _ = writeln!(
            html,
            "<h2 class=\"text-xl font-semibold text-gray-900\" id=\"{}\">{}</h2>",
            escape_html(slug.as_str()),
            escape_html(&entry.name)
        );
        let _ = writeln!(
            html,
            "<a href=\"{}\" class=\"inline-flex items-center px-4 py-2 bg-indigo-600 text-white font-medium rounded-lg hover:bg-indigo-700\">{} →</a>",
            escape_html(&entry.path),
            escape_html(INDEX_CTA_LABEL)
        );
        html.push_str("</div>\n</div>\n");
    }
    html.push_str("</div>\n</main>\n");

    html.push_str("<footer class=\"bg-white border-t border-gray-200 mt-16\">\n");
    html.push_str("<div class=\"max-w-7xl mx-auto px-4 sm:px-6 lg:px-8 py-8 text-center\">\n");
    html.push_str("<p class=\"text-gray-500\">© Pokoro 2025. All rights reserved.</p>\n");
    html.push_str("<p class=\"text-gray-400 text-sm mt-2\">Simple tools for everyday tasks</p>\n");
    html.push_str("</div>\n</footer>\n</body>\n</html>\n");
    html
}

fn push_open_tag(html: &mut String, tag: &str, class: &str) {
    if class.is_empty() {
        let _ = writeln!(html, "<{tag}>");
    } else {
        let _ = writeln!(html, "<{tag} class=\"{class}\">");
    }
}

/// Escape text for use in HTML content and double-quoted attribute values.
pub fn escape_html(raw: &str) -> String {
    let mut acc = String::with_capacity(raw.len());
    for ch in raw.chars() {
        match ch {
            '&' => acc.push_str("&amp;"),
            '<' => acc.push_str("&lt;"),
            '>' => acc.push_str("&gt;"),
            '"' => acc.push_str("&quot;"),
            '\'' => acc.push_str("&#39;"),
            other => acc.push(other),
        }
    }
    acc
}
