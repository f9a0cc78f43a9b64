//! Solar deal map engine
//!
//! Turns one CRM page of deal records into everything the map needs:
//! typed projects, per-country power aggregates, (country, type) cluster
//! buckets, cluster icon sizes, country overlays and the named layers
//! that tie them together.
//!
//! Every structure is rebuilt from scratch for each snapshot. Nothing is
//! cached or mutated incrementally.
//!
//! # Example
//!
//! ```rust
//! use dealmap_engine::{build_map, BoundaryCollection, EngineOptions, MapDocument};
//!
//! let document: MapDocument = build_map(&[], &BoundaryCollection::default(), &EngineOptions::default());
//! assert_eq!(document.marker_count(), 0);
//! assert_eq!(document.countries().count(), 0);
//! ```

pub mod aggregate;
pub mod boundary;
pub mod encoder;
pub mod layers;
pub mod listing;
pub mod normalize;
pub mod options;
pub mod overlay;
pub mod router;
pub mod surface;

pub use aggregate::{aggregate_by_country, CountryAggregate, CountryAggregates};
pub use boundary::{BoundaryCollection, BoundaryFeature};
pub use encoder::{ClusterIcon, ClusterStyle};
pub use layers::{build_map, compose, MapLayers, COUNTRIES_OVERLAY};
pub use listing::{debug_listing, ListingRow};
pub use normalize::{intake, normalize_record, parse_coordinate};
pub use options::EngineOptions;
pub use overlay::{build_country_overlays, CountryOverlay, CountryPopup, DrillDownRow};
pub use router::{ClusterBucket, ClusterBuckets, ClusterKey, ClusterRouter};
pub use surface::{ClusterGroup, MapDocument, Marker, MarkerPopup, RenderSurface};
