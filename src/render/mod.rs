//! Pagination controls: window layout, link resolution, output formats.
//!
//! [`window::page_window`] decides which controls appear, [`link::resolve`]
//! attaches URLs through a [`routing::UrlGenerator`], and [`html::render`]
//! (or serde, for JSON clients) turns the result into output.

pub mod extension;
pub mod html;
pub mod link;
pub mod routing;
pub mod window;

pub use extension::{BootstrapPaginationExtension, PaginationRenderer, RenderError};
pub use html::SafeHtml;
pub use link::PageLink;
pub use routing::{ReferenceType, RouteError, RouteParams, RouteTable, UrlGenerator};
pub use window::{page_window, PageItem};
