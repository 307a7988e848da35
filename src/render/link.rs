use serde::Serialize;

use super::routing::{ReferenceType, RouteError, RouteParams, UrlGenerator};
use super::window::PageItem;

/// A pagination control with its resolved destination. Ellipses carry no href.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PageLink {
    pub item: PageItem,
    pub href: Option<String>,
}

/// Attach a URL to every linkable item, merging its target page into
/// `params` under `page`.
pub fn resolve<G: UrlGenerator + ?Sized>(
    items: &[PageItem],
    generator: &G,
    route: &str,
    params: &RouteParams,
    reference: ReferenceType,
) -> Result<Vec<PageLink>, RouteError> {
    items
        .iter()
        .map(|item| {
            let href = match item.target() {
                Some(page) => {
                    let mut params = params.clone();
                    params.insert("page".to_string(), page.to_string());
                    Some(generator.generate(route, &params, reference)?)
                }
                None => None,
            };
            Ok(PageLink { item: *item, href })
        })
        .collect()
}
