use serde::Serialize;

use crate::pagination::Pagination;

/// Pages shown on either side of the current one.
const SURROUNDING: u64 = 2;

/// One control in a pagination bar, before any URL is attached.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum PageItem {
    Previous { page: u64, disabled: bool },
    Page { page: u64, active: bool },
    Ellipsis,
    Next { page: u64, disabled: bool },
}

impl PageItem {
    /// Page the control points at; ellipses point nowhere.
    ///
    /// Previous/next targets are not clamped, so they can be 0 or one past
    /// the last page while flagged disabled.
    pub fn target(&self) -> Option<u64> {
        match *self {
            PageItem::Previous { page, .. }
            | PageItem::Page { page, .. }
            | PageItem::Next { page, .. } => Some(page),
            PageItem::Ellipsis => None,
        }
    }

    pub fn is_active(&self) -> bool {
        matches!(self, PageItem::Page { active: true, .. })
    }

    pub fn is_disabled(&self) -> bool {
        match *self {
            PageItem::Previous { disabled, .. } | PageItem::Next { disabled, .. } => disabled,
            PageItem::Ellipsis => true,
            PageItem::Page { .. } => false,
        }
    }
}

/// Lay out the bar: prev, optional first page and gap, up to five pages
/// around the current one, optional gap and last page, next.
pub fn page_window(pagination: &Pagination) -> Vec<PageItem> {
    let current = pagination.current_page();
    let total_pages = pagination.total_pages();
    let start = current.saturating_sub(SURROUNDING).max(1);
    let end = total_pages.min(current.saturating_add(SURROUNDING));

    let mut items = Vec::with_capacity(9);
    items.push(PageItem::Previous {
        page: current - 1,
        disabled: !pagination.has_previous(),
    });

    if start > 1 {
        items.push(PageItem::Page {
            page: 1,
            active: false,
        });
    }
    if start > 2 {
        items.push(PageItem::Ellipsis);
    }

    if total_pages > 0 {
        for page in start..=end {
            items.push(PageItem::Page {
                page,
                active: page == current,
            });
        }
    }

    if end < total_pages.saturating_sub(1) {
        items.push(PageItem::Ellipsis);
    }
    if end < total_pages {
        items.push(PageItem::Page {
            page: total_pages,
            active: false,
        });
    }

    items.push(PageItem::Next {
        page: current.saturating_add(1),
        disabled: !pagination.has_next(),
    });
    items
}
