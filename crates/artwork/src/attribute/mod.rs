//! Attribute weighting: trait identifiers, weight maps and cumulative interval tables.
//!
//! An [`AttributeWeightMap`] assigns each [`Attribute`] a weight. [`AttributeWeightMap::intervals`]
//! turns it into an [`AttributeWeightIntervals`] table sorted by cumulative weight, which
//! resolves a uniform draw to a single attribute with [`AttributeWeightIntervals::resolve`].
//!
//! ```
//! use artwork::attribute::AttributeWeightMap;
//!
//! let weights = AttributeWeightMap::from_pairs([("red", 0.25), ("blue", 0.75)]);
//! let intervals = weights.intervals();
//! assert_eq!(intervals.resolve(0.1).map(|a| a.as_str()), Some("red"));
//! assert_eq!(intervals.resolve(0.5).map(|a| a.as_str()), Some("blue"));
//! ```
use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

pub mod catalog;
pub mod selection;

pub use catalog::{Selection, TraitCatalog, TraitCategory};
pub use selection::rand01;

/// Opaque trait identifier used as a sampling key.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize), serde(transparent))]
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Attribute(String);

impl Attribute {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Attribute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Attribute {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for Attribute {
    fn from(value: String) -> Self {
        Self(value)
    }
}

/// Trait category identifier, such as `"background"` or `"hat"`. The set of valid
/// kinds is the set declared by a [`TraitCatalog`].
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize), serde(transparent))]
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct KindId(String);

impl KindId {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for KindId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for KindId {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for KindId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

/// Mapping from [`Attribute`] to a non-negative weight.
///
/// Weights should sum to 1.0 for the table to describe a proper distribution; this is
/// not enforced. Entries keep their insertion order, and re-inserting an attribute
/// replaces its weight in place, so interval construction is reproducible.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize), serde(transparent))]
#[derive(Clone, Debug, Default, PartialEq)]
pub struct AttributeWeightMap {
    entries: Vec<(Attribute, f64)>,
}

impl AttributeWeightMap {
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    pub fn from_pairs<A, I>(pairs: I) -> Self
    where
        A: Into<Attribute>,
        I: IntoIterator<Item = (A, f64)>,
    {
        let mut map = Self::new();
        for (attribute, weight) in pairs {
            map.insert(attribute, weight);
        }
        map
    }

    /// Sets the weight of `attribute`, returning the previous weight if there was one.
    pub fn insert(&mut self, attribute: impl Into<Attribute>, weight: f64) -> Option<f64> {
        let attribute = attribute.into();
        match self.entries.iter_mut().find(|(a, _)| *a == attribute) {
            Some((_, w)) => Some(std::mem::replace(w, weight)),
            None => {
                self.entries.push((attribute, weight));
                None
            }
        }
    }

    pub fn get(&self, attribute: &Attribute) -> Option<f64> {
        self.entries
            .iter()
            .find(|(a, _)| a == attribute)
            .map(|(_, w)| *w)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&Attribute, f64)> {
        self.entries.iter().map(|(a, w)| (a, *w))
    }

    pub fn attributes(&self) -> impl Iterator<Item = &Attribute> {
        self.entries.iter().map(|(a, _)| a)
    }

    /// Sum of all weights.
    pub fn sum(&self) -> f64 {
        self.entries.iter().map(|(_, w)| w).sum()
    }

    /// Builds the cumulative interval table.
    ///
    /// Entry `i` receives the running sum of the weights before it plus its own weight.
    /// The table is then sorted ascending by cumulative weight.
    pub fn intervals(&self) -> AttributeWeightIntervals {
        let mut running = 0.0;
        let mut intervals: Vec<AttributeWeightInterval> = self
            .entries
            .iter()
            .map(|(attribute, weight)| {
                running += weight;
                AttributeWeightInterval {
                    attribute: attribute.clone(),
                    weight: running,
                }
            })
            .collect();
        intervals.sort_by(|a, b| a.weight.total_cmp(&b.weight));
        AttributeWeightIntervals { intervals }
    }
}

impl<A: Into<Attribute>> FromIterator<(A, f64)> for AttributeWeightMap {
    fn from_iter<I: IntoIterator<Item = (A, f64)>>(iter: I) -> Self {
        Self::from_pairs(iter)
    }
}

/// One point of the cumulative distribution.
#[derive(Clone, Debug, PartialEq)]
pub struct AttributeWeightInterval {
    pub attribute: Attribute,
    /// Cumulative weight up to and including this attribute.
    pub weight: f64,
}

/// Cumulative distribution table sorted ascending by weight.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct AttributeWeightIntervals {
    intervals: Vec<AttributeWeightInterval>,
}

impl AttributeWeightIntervals {
    pub fn len(&self) -> usize {
        self.intervals.len()
    }

    pub fn is_empty(&self) -> bool {
        self.intervals.is_empty()
    }

    pub fn as_slice(&self) -> &[AttributeWeightInterval] {
        &self.intervals
    }

    /// Final cumulative weight, or 0.0 for an empty table.
    pub fn max_weight(&self) -> f64 {
        self.intervals.last().map_or(0.0, |i| i.weight)
    }

    /// Returns the first attribute whose cumulative weight is strictly greater than `f`.
    ///
    /// `None` means `f` fell past the last interval, which only happens when the weights
    /// sum to less than the draw.
    pub fn resolve(&self, f: f64) -> Option<&Attribute> {
        self.intervals
            .iter()
            .find(|interval| f < interval.weight)
            .map(|interval| &interval.attribute)
    }
}
