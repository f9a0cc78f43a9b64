//! Cluster bucket routing.
//!
//! Each mappable project lands in exactly one bucket keyed by
//! (country, project type). A bucket is created on first sight of its key
//! and linked to its type layer at that moment; later projects with the
//! same key reuse it. Buckets of `Unknown` type exist but are not linked
//! to any top-level layer.

use std::collections::{BTreeMap, BTreeSet};

use dealmap_common::{Project, ProjectId, ProjectType};
use serde::{Deserialize, Serialize};

use crate::normalize::is_mappable;
use crate::options::EngineOptions;

/// Composite key of a cluster bucket.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ClusterKey {
    pub country: String,
    pub project_type: ProjectType,
}

impl ClusterKey {
    pub fn new(country: impl Into<String>, project_type: ProjectType) -> Self {
        Self {
            country: country.into(),
            project_type,
        }
    }

    pub fn of(project: &Project) -> Self {
        Self::new(project.country.clone(), project.project_type)
    }
}

impl std::fmt::Display for ClusterKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}", self.country, self.project_type)
    }
}

/// Projects sharing one (country, type) key. Projects are borrowed: the
/// same project also counts towards its country aggregate.
#[derive(Debug, Clone)]
pub struct ClusterBucket<'a> {
    pub key: ClusterKey,
    pub projects: Vec<&'a Project>,
}

impl<'a> ClusterBucket<'a> {
    fn new(key: ClusterKey) -> Self {
        Self {
            key,
            projects: Vec::new(),
        }
    }

    pub fn member_ids(&self) -> BTreeSet<ProjectId> {
        self.projects.iter().map(|p| p.id.clone()).collect()
    }

    pub fn len(&self) -> usize {
        self.projects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.projects.is_empty()
    }
}

/// Routes projects into buckets and records which buckets each type layer
/// exposes.
#[derive(Debug, Default)]
pub struct ClusterRouter<'a> {
    buckets: BTreeMap<ClusterKey, ClusterBucket<'a>>,
    layers: BTreeMap<ProjectType, Vec<ClusterKey>>,
}

impl<'a> ClusterRouter<'a> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Route one project, creating its bucket if needed.
    pub fn route(&mut self, project: &'a Project) {
        let key = ClusterKey::of(project);

        if !self.buckets.contains_key(&key) {
            if project.project_type.is_known() {
                self.layers
                    .entry(project.project_type)
                    .or_default()
                    .push(key.clone());
            }
            self.buckets.insert(key.clone(), ClusterBucket::new(key.clone()));
        }

        if let Some(bucket) = self.buckets.get_mut(&key) {
            bucket.projects.push(project);
        }
    }

    /// Route every project that gets a marker under `options`.
    pub fn route_all(mut self, projects: &'a [Project], options: &EngineOptions) -> Self {
        for project in projects.iter().filter(|p| is_mappable(p, options)) {
            self.route(project);
        }
        self
    }

    pub fn finish(self) -> ClusterBuckets<'a> {
        ClusterBuckets {
            buckets: self.buckets,
            layers: self.layers,
        }
    }
}

/// Result of routing a snapshot.
#[derive(Debug, Clone, Default)]
pub struct ClusterBuckets<'a> {
    buckets: BTreeMap<ClusterKey, ClusterBucket<'a>>,
    layers: BTreeMap<ProjectType, Vec<ClusterKey>>,
}

impl<'a> ClusterBuckets<'a> {
    /// Route the mappable projects of a snapshot.
    pub fn build(projects: &'a [Project], options: &EngineOptions) -> Self {
        ClusterRouter::new().route_all(projects, options).finish()
    }

    pub fn get(&self, key: &ClusterKey) -> Option<&ClusterBucket<'a>> {
        self.buckets.get(key)
    }

    /// All buckets in key order.
    pub fn iter(&self) -> impl Iterator<Item = &ClusterBucket<'a>> {
        self.buckets.values()
    }

    /// Buckets linked to a type layer, in creation order.
    pub fn layer(&self, project_type: ProjectType) -> impl Iterator<Item = &ClusterBucket<'a>> {
        self.layers
            .get(&project_type)
            .into_iter()
            .flatten()
            .filter_map(|key| self.buckets.get(key))
    }

    /// Membership of every bucket, for order-independent comparison.
    pub fn membership(&self) -> BTreeMap<ClusterKey, BTreeSet<ProjectId>> {
        self.buckets
            .iter()
            .map(|(key, bucket)| (key.clone(), bucket.member_ids()))
            .collect()
    }

    pub fn len(&self) -> usize {
        self.buckets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buckets.is_empty()
    }

    pub fn marker_count(&self) -> usize {
        self.buckets.values().map(ClusterBucket::len).sum()
    }
}
