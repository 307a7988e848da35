use thiserror::Error;

use crate::pagination::Pagination;

use super::html::{self, SafeHtml};
use super::link::{self, PageLink};
use super::routing::{ReferenceType, RouteError, RouteParams, UrlGenerator};
use super::window::page_window;

#[derive(Debug, Error)]
pub enum RenderError {
    #[error(transparent)]
    Route(#[from] RouteError),
}

/// What a template or response layer needs to draw pagination controls.
///
/// Handed to consumers explicitly; nothing registers itself globally.
pub trait PaginationRenderer: Send + Sync {
    /// Name the callable is exposed under to templates.
    fn function_name(&self) -> &'static str;

    /// Output contexts the returned markup is safe for.
    fn is_safe(&self) -> &'static [&'static str];

    /// `pagination(pagination, route, params)` as HTML.
    fn pagination(
        &self,
        pagination: &Pagination,
        route: &str,
        params: &RouteParams,
    ) -> Result<SafeHtml, RenderError>;

    /// The same controls as data, for non-HTML clients.
    fn links(
        &self,
        pagination: &Pagination,
        route: &str,
        params: &RouteParams,
    ) -> Result<Vec<PageLink>, RenderError>;
}

pub struct BootstrapPaginationExtension<G> {
    generator: G,
    reference: ReferenceType,
}

impl<G: UrlGenerator> BootstrapPaginationExtension<G> {
    pub const NAME: &'static str = "bootstrap_pagination";
    pub const FUNCTION: &'static str = "pagination";

    pub fn new(generator: G) -> Self {
        Self {
            generator,
            reference: ReferenceType::AbsolutePath,
        }
    }

    /// Emit links relative to the current request path.
    pub fn relative(mut self) -> Self {
        self.reference = ReferenceType::RelativePath;
        self
    }

    pub fn name(&self) -> &'static str {
        Self::NAME
    }

    pub fn get_path(
        &self,
        route: &str,
        params: &RouteParams,
        relative: bool,
    ) -> Result<String, RouteError> {
        let reference = if relative {
            ReferenceType::RelativePath
        } else {
            ReferenceType::AbsolutePath
        };
        self.generator.generate(route, params, reference)
    }
}

impl<G: UrlGenerator + Send + Sync> PaginationRenderer for BootstrapPaginationExtension<G> {
    fn function_name(&self) -> &'static str {
        Self::FUNCTION
    }

    fn is_safe(&self) -> &'static [&'static str] {
        &["html"]
    }

    fn pagination(
        &self,
        pagination: &Pagination,
        route: &str,
        params: &RouteParams,
    ) -> Result<SafeHtml, RenderError> {
        let links = self.links(pagination, route, params)?;
        Ok(html::render(&links))
    }

    fn links(
        &self,
        pagination: &Pagination,
        route: &str,
        params: &RouteParams,
    ) -> Result<Vec<PageLink>, RenderError> {
        let items = page_window(pagination);
        Ok(link::resolve(
            &items,
            &self.generator,
            route,
            params,
            self.reference,
        )?)
    }
}
