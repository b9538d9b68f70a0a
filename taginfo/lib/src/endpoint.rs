//! Endpoint definitions.
//!
//! An [`Endpoint`] is a compile-time constant describing one API path. It is
//! parameterized by its parameter set `P` and its [`ResponseFormat`] `F`, so
//! the generic dispatcher can only ever be called with matching parameters
//! and always decodes the right payload type.

use std::fmt;
use std::marker::PhantomData;

use serde::Serialize;
use url::Url;

use crate::error::CallError;
use crate::params::QueryParams;
use crate::response::ResponseFormat;

/// A taginfo API endpoint definition.
///
/// ## Type Parameters
///
/// - `P`: The parameter set accepted by this endpoint.
/// - `F`: The [`ResponseFormat`] of this endpoint's response.
///
/// ## Examples
///
/// ```rust
/// use taginfo::Endpoint;
/// use taginfo::response::PngFormat;
///
/// const MAP: Endpoint<(), PngFormat> =
///     Endpoint::new("example_map", "example/map", "An example map");
///
/// assert_eq!(MAP.path(), "example/map");
/// assert_eq!(MAP.info().content_type, "image/png");
/// ```
pub struct Endpoint<P, F> {
    id: &'static str,
    path: &'static str,
    description: &'static str,
    paginated: bool,
    _marker: PhantomData<fn(&P) -> F>,
}

// Manual Clone/Copy - the marker is Copy regardless of P and F
impl<P, F> Clone for Endpoint<P, F> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<P, F> Copy for Endpoint<P, F> {}

impl<P, F> fmt::Debug for Endpoint<P, F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Endpoint")
            .field("id", &self.id)
            .field("path", &self.path)
            .field("paginated", &self.paginated)
            .finish()
    }
}

impl<P, F> Endpoint<P, F> {
    /// Defines an endpoint.
    ///
    /// `path` is relative to the API base and must not start with `/`.
    pub const fn new(id: &'static str, path: &'static str, description: &'static str) -> Self {
        Self {
            id,
            path,
            description,
            paginated: false,
            _marker: PhantomData,
        }
    }

    /// Marks the endpoint as accepting `page`/`rp` parameters.
    pub const fn paginated(mut self) -> Self {
        self.paginated = true;
        self
    }

    /// Returns the endpoint's unique identifier.
    pub fn id(&self) -> &'static str {
        self.id
    }

    /// Returns the path relative to the API base.
    pub fn path(&self) -> &'static str {
        self.path
    }

    /// Returns what this endpoint does.
    pub fn description(&self) -> &'static str {
        self.description
    }

    /// Returns `true` if results are paginated.
    pub fn is_paginated(&self) -> bool {
        self.paginated
    }

    /// Resolves the request URL below `base` and appends `query`.
    ///
    /// ## Errors
    ///
    /// Returns [`CallError::InvalidPath`] if the path is absolute or would
    /// otherwise resolve outside of `base`.
    pub fn url(&self, base: &Url, query: &QueryParams) -> Result<Url, CallError> {
        let invalid = || CallError::InvalidPath {
            path: self.path.to_string(),
        };

        if self.path.starts_with('/') {
            return Err(invalid());
        }

        let mut url = base.join(self.path).map_err(|_| invalid())?;
        if !url.as_str().starts_with(base.as_str()) {
            return Err(invalid());
        }

        if !query.is_empty() {
            url.query_pairs_mut().extend_pairs(query.iter());
        }
        Ok(url)
    }
}

impl<P, F: ResponseFormat> Endpoint<P, F> {
    /// Returns the untyped catalog entry for this endpoint.
    pub const fn info(&self) -> EndpointInfo {
        EndpointInfo {
            id: self.id,
            path: self.path,
            description: self.description,
            content_type: F::CONTENT_TYPE,
            paginated: self.paginated,
        }
    }
}

/// Untyped description of an endpoint, as listed in the catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct EndpointInfo {
    /// Unique identifier.
    pub id: &'static str,
    /// Path relative to the API base.
    pub path: &'static str,
    /// What the endpoint does.
    pub description: &'static str,
    /// Content type of the response.
    pub content_type: &'static str,
    /// Whether `page`/`rp` parameters are accepted.
    pub paginated: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::params::ParamsBuilder;
    use crate::response::{JsonFormat, PngFormat, Response};

    type Json = JsonFormat<Response<Vec<String>>>;

    // Test-only: lets the `Json` alias above satisfy `ResponseFormat`.
    impl crate::response::schema::Validate for String {
        fn validate(&self) -> Result<(), crate::error::SchemaViolation> {
            Ok(())
        }
    }

    fn base() -> Url {
        Url::parse("https://taginfo.openstreetmap.org/api/4/").unwrap()
    }

    #[test]
    fn test_url_without_params() {
        let endpoint: Endpoint<(), PngFormat> = Endpoint::new("m", "key/distribution/nodes", "");
        let url = endpoint.url(&base(), &QueryParams::default()).unwrap();
        assert_eq!(
            url.as_str(),
            "https://taginfo.openstreetmap.org/api/4/key/distribution/nodes"
        );
    }

    #[test]
    fn test_url_with_params() {
        let endpoint: Endpoint<(), Json> = Endpoint::new("p", "tags/popular", "").paginated();
        let query = ParamsBuilder::new().pagination(1, 0).finish().unwrap();
        let url = endpoint.url(&base(), &query).unwrap();
        assert_eq!(url.query(), Some("page=1&rp=0"));
        assert!(endpoint.is_paginated());
    }

    #[test]
    fn test_absolute_path_rejected() {
        let endpoint: Endpoint<(), Json> = Endpoint::new("x", "/api/4/tags/popular", "");
        let err = endpoint.url(&base(), &QueryParams::default()).unwrap_err();
        assert!(matches!(err, CallError::InvalidPath { .. }));
    }

    #[test]
    fn test_escaping_paths_rejected() {
        for path in ["../3/tags", "https://example.com/api/4/", "//example.com/x"] {
            let endpoint: Endpoint<(), Json> = Endpoint::new("x", path, "");
            assert!(
                endpoint.url(&base(), &QueryParams::default()).is_err(),
                "{path} escaped the base"
            );
        }
    }

    #[test]
    fn test_info() {
        const ENDPOINT: Endpoint<(), Json> = Endpoint::new("id", "a/b", "does things").paginated();
        let info = ENDPOINT.info();
        assert_eq!(info.id, "id");
        assert_eq!(info.content_type, "application/json");
        assert!(info.paginated);
        assert_eq!(ENDPOINT.description(), "does things");
    }

    #[test]
    fn test_clone() {
        let endpoint: Endpoint<(), Json> = Endpoint::new("id", "a/b", "");
        let copied = endpoint;
        assert_eq!(copied.id(), endpoint.id());
    }
}
