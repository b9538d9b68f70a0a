//! Typed async client for the OpenStreetMap taginfo API.
//!
//! Every call runs the same pipeline:
//!
//! 1. the typed parameter set is validated and normalized into query
//!    parameters ([`params`]); nothing is sent if that fails
//! 2. a GET request is made below the API base URL with the exact `Accept`
//!    type the endpoint produces ([`client`])
//! 3. the body is decoded and checked against the endpoint's schema
//!    ([`response`])
//!
//! Failures surface as a [`TaginfoError`] of one of three kinds, so callers
//! can tell bad input from a failed exchange or an unexpected payload.
//!
//! ## Endpoints
//!
//! | Method | Path | Result |
//! |--------|------|--------|
//! | [`key_chronology`](TaginfoClient::key_chronology) | `key/chronology` | [`Response<Vec<KeyChronology>>`](api::KeyChronology) |
//! | [`key_combinations`](TaginfoClient::key_combinations) | `key/combinations` | [`Response<Vec<KeyCombination>>`](api::KeyCombination) |
//! | [`key_distribution_nodes`](TaginfoClient::key_distribution_nodes) | `key/distribution/nodes` | [`PngResponse`] |
//! | [`key_distribution_ways`](TaginfoClient::key_distribution_ways) | `key/distribution/ways` | [`PngResponse`] |
//! | [`key_overview`](TaginfoClient::key_overview) | `key/overview` | [`Response<KeyOverview>`](api::KeyOverview) |
//! | [`key_prevalent_values`](TaginfoClient::key_prevalent_values) | `key/prevalent_values` | [`Response<Vec<PrevalentValue>>`](api::PrevalentValue) |
//! | [`key_projects`](TaginfoClient::key_projects) | `key/projects` | [`Response<Vec<KeyProject>>`](api::KeyProject) |
//! | [`key_similar`](TaginfoClient::key_similar) | `key/similar` | [`Response<Vec<SimilarKey>>`](api::SimilarKey) |
//! | [`key_stats`](TaginfoClient::key_stats) | `key/stats` | [`Response<Vec<KeyStats>>`](api::KeyStats) |
//! | [`relation_projects`](TaginfoClient::relation_projects) | `relation/projects` | [`Response<Vec<RelationProject>>`](api::RelationProject) |
//! | [`site_config_geodistribution`](TaginfoClient::site_config_geodistribution) | `site/config/geodistribution` | [`SiteConfigGeodistribution`](api::SiteConfigGeodistribution) |
//! | [`tag_projects`](TaginfoClient::tag_projects) | `tag/projects` | [`Response<Vec<TagProject>>`](api::TagProject) |
//! | [`tags_popular`](TaginfoClient::tags_popular) | `tags/popular` | [`Response<Vec<PopularTag>>`](api::PopularTag) |
//!
//! ## Examples
//!
//! ```rust,no_run
//! use taginfo::api::PopularTagsParams;
//! use taginfo::{Session, TaginfoClient};
//!
//! # async fn run() -> Result<(), taginfo::TaginfoError> {
//! // Share one connection pool across many calls
//! let session = Session::builder().build()?;
//! let client = TaginfoClient::builder().session(session).build();
//!
//! let popular = client.tags_popular(&PopularTagsParams::default()).await?;
//! println!("{} tags as of {}", popular.total, popular.data_until);
//! # Ok(())
//! # }
//! ```

pub mod api;
pub mod catalog;
pub mod client;
pub mod endpoint;
pub mod error;
pub mod params;
pub mod response;
pub mod types;

pub use client::{Session, SessionBuilder, TaginfoClient, TaginfoClientBuilder};
pub use endpoint::{Endpoint, EndpointInfo};
pub use error::{CallError, ErrorKind, TaginfoError, ValidationError, ValueError};
pub use params::Choice;
pub use response::{PngResponse, Response};
pub use types::{ObjectType, PrintingDirection, SortOrder};
