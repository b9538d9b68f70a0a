//! The table of implemented endpoints.
//!
//! Each constant binds a path to its parameter set and response format.
//! [`CATALOG`] lists the same entries without their types, for discovery
//! and tooling.

use crate::api::{
    KeyChronology, KeyCombination, KeyCombinationsParams, KeyOverview, KeyParams, KeyProject,
    KeyProjectsParams, KeyStats, PopularTag, PopularTagsParams, PrevalentValue,
    PrevalentValuesParams, RelationProject, RelationProjectsParams, SimilarKey, SimilarKeysParams,
    SiteConfigGeodistribution, TagProject, TagProjectsParams,
};
use crate::endpoint::{Endpoint, EndpointInfo};
use crate::response::{JsonFormat, PngFormat, Response};

type Listing<T> = JsonFormat<Response<Vec<T>>>;

pub const KEY_CHRONOLOGY: Endpoint<KeyParams, Listing<KeyChronology>> = Endpoint::new(
    "key_chronology",
    "key/chronology",
    "Get chronology of key counts",
);

pub const KEY_COMBINATIONS: Endpoint<KeyCombinationsParams, Listing<KeyCombination>> =
    Endpoint::new(
        "key_combinations",
        "key/combinations",
        "Find keys that are used together with a given key",
    )
    .paginated();

pub const KEY_DISTRIBUTION_NODES: Endpoint<KeyParams, PngFormat> = Endpoint::new(
    "key_distribution_nodes",
    "key/distribution/nodes",
    "Get map with distribution of this key in the database (nodes only)",
);

pub const KEY_DISTRIBUTION_WAYS: Endpoint<KeyParams, PngFormat> = Endpoint::new(
    "key_distribution_ways",
    "key/distribution/ways",
    "Get map with distribution of this key in the database (ways only)",
);

pub const KEY_OVERVIEW: Endpoint<KeyParams, JsonFormat<Response<KeyOverview>>> = Endpoint::new(
    "key_overview",
    "key/overview",
    "Show various data for given key",
);

pub const KEY_PREVALENT_VALUES: Endpoint<PrevalentValuesParams, Listing<PrevalentValue>> =
    Endpoint::new(
        "key_prevalent_values",
        "key/prevalent_values",
        "Get most prevalent values used with a given key",
    );

pub const KEY_PROJECTS: Endpoint<KeyProjectsParams, Listing<KeyProject>> = Endpoint::new(
    "key_projects",
    "key/projects",
    "Get projects using a given key",
)
.paginated();

pub const KEY_SIMILAR: Endpoint<SimilarKeysParams, Listing<SimilarKey>> = Endpoint::new(
    "key_similar",
    "key/similar",
    "Find keys that are similar to a given key",
)
.paginated();

pub const KEY_STATS: Endpoint<KeyParams, Listing<KeyStats>> = Endpoint::new(
    "key_stats",
    "key/stats",
    "Show some database statistics for given key",
);

pub const RELATION_PROJECTS: Endpoint<RelationProjectsParams, Listing<RelationProject>> =
    Endpoint::new(
        "relation_projects",
        "relation/projects",
        "Get projects using a given relation type",
    )
    .paginated();

pub const SITE_CONFIG_GEODISTRIBUTION: Endpoint<(), JsonFormat<SiteConfigGeodistribution>> =
    Endpoint::new(
        "site_config_geodistribution",
        "site/config/geodistribution",
        "Get information about the background map for distribution charts",
    );

pub const TAG_PROJECTS: Endpoint<TagProjectsParams, Listing<TagProject>> = Endpoint::new(
    "tag_projects",
    "tag/projects",
    "Get projects using a given tag",
)
.paginated();

pub const TAGS_POPULAR: Endpoint<PopularTagsParams, Listing<PopularTag>> = Endpoint::new(
    "tags_popular",
    "tags/popular",
    "Get list of most often used tags",
)
.paginated();

/// Every implemented endpoint, ordered by id.
pub const CATALOG: &[EndpointInfo] = &[
    KEY_CHRONOLOGY.info(),
    KEY_COMBINATIONS.info(),
    KEY_DISTRIBUTION_NODES.info(),
    KEY_DISTRIBUTION_WAYS.info(),
    KEY_OVERVIEW.info(),
    KEY_PREVALENT_VALUES.info(),
    KEY_PROJECTS.info(),
    KEY_SIMILAR.info(),
    KEY_STATS.info(),
    RELATION_PROJECTS.info(),
    SITE_CONFIG_GEODISTRIBUTION.info(),
    TAG_PROJECTS.info(),
    TAGS_POPULAR.info(),
];

/// Looks up a catalog entry by id.
pub fn find(id: &str) -> Option<&'static EndpointInfo> {
    CATALOG.iter().find(|info| info.id == id)
}
