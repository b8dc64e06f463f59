//! Combinable configuration values.
//!
//! A [`Facet`] is a named option that any number of extensions may
//! contribute to. Contributions are kept in registration order and
//! reduced by the facet's own combine function every time the value
//! is read, so there is no cached effective value to go stale.

use std::fmt;

/// A tagged contribution stored in a [`FacetStore`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FacetValue {
    Number(f64),
    Bool(bool),
}

/// Types that can be contributed to a facet.
pub trait FacetType: Copy + fmt::Debug {
    fn into_value(self) -> FacetValue;
    fn from_value(value: FacetValue) -> Option<Self>;
}

impl FacetType for f64 {
    fn into_value(self) -> FacetValue {
        FacetValue::Number(self)
    }

    fn from_value(value: FacetValue) -> Option<Self> {
        match value {
            FacetValue::Number(n) => Some(n),
            FacetValue::Bool(_) => None,
        }
    }
}

impl FacetType for bool {
    fn into_value(self) -> FacetValue {
        FacetValue::Bool(self)
    }

    fn from_value(value: FacetValue) -> Option<Self> {
        match value {
            FacetValue::Bool(b) => Some(b),
            FacetValue::Number(_) => None,
        }
    }
}

/// A named option with a combine rule over all registered values.
///
/// The combine function receives contributions in registration order
/// and must handle the empty slice by returning the default.
pub struct Facet<T: FacetType> {
    name: &'static str,
    combine: fn(&[T]) -> T,
}

impl<T: FacetType> Facet<T> {
    /// Defines a facet. Usable in `static` items.
    pub const fn define(name: &'static str, combine: fn(&[T]) -> T) -> Self {
        Self { name, combine }
    }

    /// Returns the facet's name.
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Reduces a list of contributions to the effective value.
    pub fn combine(&self, values: &[T]) -> T {
        (self.combine)(values)
    }
}

impl<T: FacetType> fmt::Debug for Facet<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Facet").field("name", &self.name).finish()
    }
}

/// Combine rule: minimum of all values, or `default` when none.
///
/// A NaN contribution is ignored in favour of the other values, following
/// `f64::min`; only an all-NaN list resolves to NaN.
pub fn combine_min(values: &[f64], default: f64) -> f64 {
    values.iter().copied().reduce(f64::min).unwrap_or(default)
}

/// Combine rule: first registered value, or `default` when none.
pub fn combine_first<T: Copy>(values: &[T], default: T) -> T {
    values.first().copied().unwrap_or(default)
}

/// Ordered facet contributions.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FacetStore {
    contributions: Vec<(&'static str, FacetValue)>,
}

impl FacetStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a raw contribution under a facet name.
    pub fn push(&mut self, name: &'static str, value: FacetValue) {
        self.contributions.push((name, value));
    }

    /// Registers a typed contribution.
    pub fn register<T: FacetType>(&mut self, facet: &Facet<T>, value: T) {
        self.push(facet.name, value.into_value());
    }

    /// Appends every contribution of another store, preserving order.
    pub fn extend(&mut self, other: &FacetStore) {
        self.contributions.extend_from_slice(&other.contributions);
    }

    /// Returns the contributions for a facet in registration order.
    pub fn values<T: FacetType>(&self, facet: &Facet<T>) -> Vec<T> {
        self.contributions
            .iter()
            .filter(|(name, _)| *name == facet.name)
            .filter_map(|(_, value)| T::from_value(*value))
            .collect()
    }

    /// Resolves the effective value of a facet.
    pub fn get<T: FacetType>(&self, facet: &Facet<T>) -> T {
        let values = self.values(facet);
        let resolved = facet.combine(&values);
        log::trace!(
            "facet {} resolved to {:?} from {} value(s)",
            facet.name,
            resolved,
            values.len()
        );
        resolved
    }

    /// Returns the number of contributions across all facets.
    pub fn len(&self) -> usize {
        self.contributions.len()
    }

    /// Returns true if nothing has been registered.
    pub fn is_empty(&self) -> bool {
        self.contributions.is_empty()
    }
}
