//! Trait catalog: the declared kinds, their weight maps, and the asset behind each
//! attribute.
//!
//! A [`TraitCatalog`] is the configuration side of trait selection. Each declared
//! [`KindId`] owns a [`TraitCategory`] whose interval table is built once on insertion
//! and reused for every draw.
use std::collections::{BTreeMap, HashMap};
use std::path::PathBuf;

use rand::RngCore;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::attribute::{Attribute, AttributeWeightIntervals, AttributeWeightMap, KindId};
use crate::error::{Error, Result};
use crate::piece::blueprint::{Blueprint, SlotDef};

/// Tolerance used when checking that a weight map sums to one.
pub const WEIGHT_SUM_TOLERANCE: f64 = 1e-6;

/// Weights and asset paths for a single kind.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Clone, Debug, Default)]
pub struct TraitCategory {
    pub weights: AttributeWeightMap,
    pub paths: HashMap<Attribute, PathBuf>,
}

impl TraitCategory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds an attribute with its weight and asset path.
    pub fn with_trait(
        mut self,
        attribute: impl Into<Attribute>,
        weight: f64,
        path: impl Into<PathBuf>,
    ) -> Self {
        let attribute = attribute.into();
        self.weights.insert(attribute.clone(), weight);
        self.paths.insert(attribute, path.into());
        self
    }
}

#[derive(Clone, Debug)]
struct CategoryEntry {
    category: TraitCategory,
    intervals: AttributeWeightIntervals,
}

/// Outcome of a successful draw for one slot.
#[derive(Clone, Debug, PartialEq)]
pub struct Selection {
    pub kind: KindId,
    pub attribute: Attribute,
    pub path: PathBuf,
}

/// Declared trait categories keyed by kind.
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(from = "BTreeMap<KindId, TraitCategory>", into = "BTreeMap<KindId, TraitCategory>")
)]
#[derive(Clone, Debug, Default)]
pub struct TraitCatalog {
    categories: BTreeMap<KindId, CategoryEntry>,
}

impl TraitCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Declares `kind`, replacing any previous category for it.
    pub fn insert_category(&mut self, kind: impl Into<KindId>, category: TraitCategory) {
        let intervals = category.weights.intervals();
        self.categories
            .insert(kind.into(), CategoryEntry { category, intervals });
    }

    pub fn with_category(mut self, kind: impl Into<KindId>, category: TraitCategory) -> Self {
        self.insert_category(kind, category);
        self
    }

    pub fn contains(&self, kind: &KindId) -> bool {
        self.categories.contains_key(kind)
    }

    pub fn kinds(&self) -> impl Iterator<Item = &KindId> {
        self.categories.keys()
    }

    pub fn category(&self, kind: &KindId) -> Option<&TraitCategory> {
        self.categories.get(kind).map(|e| &e.category)
    }

    pub fn intervals(&self, kind: &KindId) -> Option<&AttributeWeightIntervals> {
        self.categories.get(kind).map(|e| &e.intervals)
    }

    /// Checks every category: each weighted attribute needs a path. Weight sums that
    /// differ from 1.0 are logged but accepted.
    pub fn validate(&self) -> Result<()> {
        for (kind, entry) in &self.categories {
            for attribute in entry.category.weights.attributes() {
                if !entry.category.paths.contains_key(attribute) {
                    return Err(Error::UnknownAttribute {
                        kind: kind.clone(),
                        attribute: attribute.clone(),
                    });
                }
            }
            let sum = entry.category.weights.sum();
            if (sum - 1.0).abs() > WEIGHT_SUM_TOLERANCE {
                warn!(
                    "Kind '{}' weights sum to {}; some draws will select nothing.",
                    kind, sum
                );
            }
        }
        Ok(())
    }

    /// Rejects blueprints that name a kind this catalog does not declare.
    pub fn validate_blueprint(&self, blueprint: &Blueprint) -> Result<()> {
        fn check(catalog: &TraitCatalog, slots: &[SlotDef]) -> Result<()> {
            for slot in slots {
                if slot.kinds.is_empty() {
                    return Err(Error::InvalidConfig(
                        "slot accepts no kinds".to_string(),
                    ));
                }
                if let Some(kind) = slot.kinds.iter().find(|k| !catalog.contains(k)) {
                    return Err(Error::UnknownKind { kind: kind.clone() });
                }
                check(catalog, &slot.children)?;
            }
            Ok(())
        }
        check(self, &blueprint.slots)
    }

    /// Draws an attribute for `kind`.
    ///
    /// Returns `Ok(None)` when the draw lands past the last interval, which signals a
    /// weight map summing to less than one.
    pub fn select(&self, kind: &KindId, rng: &mut dyn RngCore) -> Result<Option<Selection>> {
        let entry = self
            .categories
            .get(kind)
            .ok_or_else(|| Error::UnknownKind { kind: kind.clone() })?;
        let Some(attribute) = entry.intervals.draw(rng) else {
            warn!("Draw for kind '{}' resolved no attribute.", kind);
            return Ok(None);
        };
        let path = entry
            .category
            .paths
            .get(attribute)
            .ok_or_else(|| Error::UnknownAttribute {
                kind: kind.clone(),
                attribute: attribute.clone(),
            })?;
        Ok(Some(Selection {
            kind: kind.clone(),
            attribute: attribute.clone(),
            path: path.clone(),
        }))
    }
}

impl From<BTreeMap<KindId, TraitCategory>> for TraitCatalog {
    fn from(value: BTreeMap<KindId, TraitCategory>) -> Self {
        let mut catalog = TraitCatalog::new();
        for (kind, category) in value {
            catalog.insert_category(kind, category);
        }
        catalog
    }
}

impl From<TraitCatalog> for BTreeMap<KindId, TraitCategory> {
    fn from(value: TraitCatalog) -> Self {
        value
            .categories
            .into_iter()
            .map(|(kind, entry)| (kind, entry.category))
            .collect()
    }
}
