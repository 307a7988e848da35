use indexmap::IndexMap;
use percent_encoding::{utf8_percent_encode, AsciiSet, CONTROLS};
use thiserror::Error;
use url::form_urlencoded;

/// Characters escaped inside one path segment.
const PATH_SEGMENT: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'%')
    .add(b'/')
    .add(b'<')
    .add(b'>')
    .add(b'?')
    .add(b'`')
    .add(b'{')
    .add(b'}');

/// Route parameters in the order the caller supplied them.
pub type RouteParams = IndexMap<String, String>;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ReferenceType {
    /// `/rows?page=2`
    #[default]
    AbsolutePath,
    /// `../rows?page=2`, relative to the current request path.
    RelativePath,
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RouteError {
    #[error("route {0} does not exist")]
    UnknownRoute(String),
    #[error("missing parameter {parameter} for route {route}")]
    MissingParameter { route: String, parameter: String },
}

/// Turns a route name plus parameters into a link target.
pub trait UrlGenerator {
    fn generate(
        &self,
        route: &str,
        params: &RouteParams,
        reference: ReferenceType,
    ) -> Result<String, RouteError>;
}

impl<G: UrlGenerator + ?Sized> UrlGenerator for std::sync::Arc<G> {
    fn generate(
        &self,
        route: &str,
        params: &RouteParams,
        reference: ReferenceType,
    ) -> Result<String, RouteError> {
        (**self).generate(route, params, reference)
    }
}

/// Named path patterns such as `/tables/{table}/rows`.
///
/// Placeholders are filled from the parameters; whatever is left over goes
/// into the query string.
#[derive(Clone, Debug)]
pub struct RouteTable {
    routes: IndexMap<String, String>,
    context_path: String,
}

impl Default for RouteTable {
    fn default() -> Self {
        Self::new()
    }
}

impl RouteTable {
    pub fn new() -> Self {
        Self {
            routes: IndexMap::new(),
            context_path: "/".to_string(),
        }
    }

    pub fn with_route(mut self, name: impl Into<String>, pattern: impl Into<String>) -> Self {
        self.routes.insert(name.into(), pattern.into());
        self
    }

    /// Path of the page the links will be embedded in; only used for
    /// [`ReferenceType::RelativePath`].
    pub fn with_context_path(mut self, path: impl Into<String>) -> Self {
        self.context_path = path.into();
        self
    }

    /// Fill the pattern; returns the path and the query string, if any.
    fn expand(
        &self,
        route: &str,
        params: &RouteParams,
    ) -> Result<(String, Option<String>), RouteError> {
        let pattern = self
            .routes
            .get(route)
            .ok_or_else(|| RouteError::UnknownRoute(route.to_string()))?;

        let mut path = String::new();
        let mut used = Vec::new();
        for segment in pattern.split('/').filter(|s| !s.is_empty()) {
            path.push('/');
            match segment.strip_prefix('{').and_then(|s| s.strip_suffix('}')) {
                Some(name) => {
                    let value = params.get(name).ok_or_else(|| RouteError::MissingParameter {
                        route: route.to_string(),
                        parameter: name.to_string(),
                    })?;
                    path.extend(utf8_percent_encode(value, PATH_SEGMENT));
                    used.push(name);
                }
                None => path.extend(utf8_percent_encode(segment, PATH_SEGMENT)),
            }
        }
        if path.is_empty() || (pattern.len() > 1 && pattern.ends_with('/')) {
            path.push('/');
        }

        let mut extra = params
            .iter()
            .filter(|(name, _)| !used.contains(&name.as_str()))
            .peekable();
        let query = extra.peek().is_some().then(|| {
            form_urlencoded::Serializer::new(String::new())
                .extend_pairs(extra)
                .finish()
        });
        Ok((path, query))
    }
}

impl UrlGenerator for RouteTable {
    fn generate(
        &self,
        route: &str,
        params: &RouteParams,
        reference: ReferenceType,
    ) -> Result<String, RouteError> {
        let (path, query) = self.expand(route, params)?;
        let path = match reference {
            ReferenceType::AbsolutePath => path,
            ReferenceType::RelativePath => relative_path(&self.context_path, &path),
        };
        Ok(match query {
            Some(query) => format!("{path}?{query}"),
            None => path,
        })
    }
}

/// Shortest relative reference from `base` to `target`, both absolute paths.
fn relative_path(base: &str, target: &str) -> String {
    if base == target {
        return String::new();
    }

    let mut source_dirs: Vec<&str> = base.strip_prefix('/').unwrap_or(base).split('/').collect();
    let mut target_dirs: Vec<&str> = target
        .strip_prefix('/')
        .unwrap_or(target)
        .split('/')
        .collect();
    source_dirs.pop();
    let target_file = target_dirs.pop().unwrap_or_default();

    let common = source_dirs
        .iter()
        .zip(target_dirs.iter())
        .take_while(|(a, b)| a == b)
        .count();
    let ups = source_dirs.len() - common;
    let mut rest: Vec<&str> = target_dirs[common..].to_vec();
    rest.push(target_file);

    let path = format!("{}{}", "../".repeat(ups), rest.join("/"));
    let colon_first = match (path.find(':'), path.find('/')) {
        (Some(colon), Some(slash)) => colon < slash,
        (Some(_), None) => true,
        _ => false,
    };
    if path.is_empty() || path.starts_with('/') || colon_first {
        format!("./{path}")
    } else {
        path
    }
}
