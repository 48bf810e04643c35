//! Flat aggregate of intersectable objects.

use lux_math::Ray;

use super::{GeoPoint, Intersectable};

/// A list of intersectable objects, scanned linearly.
///
/// Aggregates nest: a `Geometries` is itself `Intersectable`.
#[derive(Default)]
pub struct Geometries {
    items: Vec<Box<dyn Intersectable>>,
}

impl Geometries {
    /// Create a new empty aggregate.
    pub fn new() -> Self {
        Self { items: Vec::new() }
    }

    /// Create an aggregate from already boxed objects.
    pub fn from_items(items: Vec<Box<dyn Intersectable>>) -> Self {
        Self { items }
    }

    /// Add an object to the aggregate.
    pub fn add(&mut self, item: impl Intersectable + 'static) {
        self.items.push(Box::new(item));
    }

    /// Add an already boxed object.
    pub fn push(&mut self, item: Box<dyn Intersectable>) {
        self.items.push(item);
    }

    /// Get the number of direct children.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Check if the aggregate is empty.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl Intersectable for Geometries {
    fn intersect<'a>(&'a self, ray: &Ray) -> Vec<GeoPoint<'a>> {
        self.items
            .iter()
            .flat_map(|item| item.intersect(ray))
            .collect()
    }
}
