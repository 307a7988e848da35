// Bootstrap `ul.pagination` markup.
use std::fmt;

use serde::Serialize;

use super::link::PageLink;
use super::window::PageItem;

/// Markup that may be embedded into an HTML document without escaping.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct SafeHtml(String);

impl SafeHtml {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SafeHtml {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

const ELLIPSIS_ITEM: &str = "<li class=\"disabled\"><a href=\"#\">&hellip;</a></li>\n";

pub fn render(links: &[PageLink]) -> SafeHtml {
    let mut html = String::from("<ul class=\"pagination\">\n");
    for link in links {
        match (&link.item, &link.href) {
            (PageItem::Ellipsis, _) | (_, None) => html.push_str(ELLIPSIS_ITEM),
            (item, Some(href)) => push_item(&mut html, item, href),
        }
    }
    html.push_str("</ul>\n");
    SafeHtml(html)
}

fn push_item(html: &mut String, item: &PageItem, href: &str) {
    let classes = if item.is_active() {
        "active"
    } else if item.is_disabled() {
        "disabled"
    } else {
        ""
    };
    let label = match item {
        PageItem::Previous { .. } => "&laquo;".to_string(),
        PageItem::Next { .. } => "&raquo;".to_string(),
        PageItem::Page { page, .. } => page.to_string(),
        PageItem::Ellipsis => "&hellip;".to_string(),
    };
    html.push_str(&format!(
        "<li class=\"{}\"><a href=\"{}\">{}</a></li>\n",
        classes,
        escape_attr(href),
        label
    ));
}

/// Escape a value for a double-quoted attribute.
pub fn escape_attr(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for ch in value.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            c => out.push(c),
        }
    }
    out
}
