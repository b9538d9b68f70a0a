//! Typed wrappers for each taginfo endpoint.
//!
//! Every module pairs a parameter set, the decoded result records and a
//! `TaginfoClient` method that forwards to
//! [`TaginfoClient::execute`](crate::TaginfoClient::execute). Parameter sets
//! expose their fields publicly; `new` fills in the API's defaults.
//!
//! ## Examples
//!
//! ```rust,no_run
//! use taginfo::api::KeyCombinationsParams;
//! use taginfo::{ObjectType, TaginfoClient};
//!
//! # async fn run() -> Result<(), taginfo::TaginfoError> {
//! let client = TaginfoClient::new();
//! let params = KeyCombinationsParams {
//!     filter: ObjectType::Ways.into(),
//!     rp: 10,
//!     ..KeyCombinationsParams::new("highway")
//! };
//! for combination in client.key_combinations(&params).await?.data {
//!     println!("{} {}", combination.other_key, combination.together_count);
//! }
//! # Ok(())
//! # }
//! ```

pub mod key;
pub mod relation;
pub mod site;
pub mod tag;
pub mod tags;

pub use key::{
    KeyChronology, KeyCombination, KeyCombinationSorting, KeyCombinationsParams, KeyDescription,
    KeyObjectCount, KeyOverview, KeyParams, KeyProject, KeyProjectSorting, KeyProjectsParams,
    KeyStats, KeyWikiPage, PrevalentValue, PrevalentValuesParams, SimilarKey, SimilarKeySorting,
    SimilarKeysParams,
};
pub use relation::{RelationProject, RelationProjectSorting, RelationProjectsParams};
pub use site::SiteConfigGeodistribution;
pub use tag::{TagProject, TagProjectSorting, TagProjectsParams};
pub use tags::{PopularTag, PopularTagSorting, PopularTagsParams};
