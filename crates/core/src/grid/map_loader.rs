//! Parameter map loading
//!
//! The engine never reads files itself. Hosts hand it a [`MapSource`] that
//! resolves map names from the settings file to compressed per-cell fields.
//! [`InMemoryMaps`] is the reference implementation used by drivers and
//! tests.

use crate::core_types::CellField;
use crate::error::MapError;
use rustc_hash::FxHashMap;

/// Named per-cell map provider
pub trait MapSource {
    /// Load the map registered under `name`
    ///
    /// # Errors
    ///
    /// Implementations return [`MapError::NotFound`] for unknown names and
    /// may report any other loading failure through [`MapError`].
    fn load_map(&self, name: &str) -> Result<CellField, MapError>;
}

/// Load a map and check that it covers exactly `expected` cells
///
/// # Errors
///
/// Propagates the source's error, or [`MapError::ShapeMismatch`] if the
/// loaded map has the wrong cell count.
pub fn load_checked<S: MapSource + ?Sized>(
    source: &S,
    name: &str,
    expected: usize,
) -> Result<CellField, MapError> {
    let field = source.load_map(name)?;
    if field.len() != expected {
        return Err(MapError::ShapeMismatch {
            name: name.to_string(),
            expected,
            found: field.len(),
        });
    }
    Ok(field)
}

/// Map source backed by a hash map of already-compressed fields
#[derive(Debug, Clone, Default)]
pub struct InMemoryMaps {
    maps: FxHashMap<String, CellField>,
}

impl InMemoryMaps {
    /// Empty source
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register (or replace) a map
    pub fn insert(&mut self, name: impl Into<String>, field: CellField) -> &mut Self {
        self.maps.insert(name.into(), field);
        self
    }

    /// Builder form of [`insert`](Self::insert)
    #[must_use]
    pub fn with(mut self, name: impl Into<String>, field: CellField) -> Self {
        self.insert(name, field);
        self
    }

    /// Register a map holding the same value in every cell
    pub fn insert_uniform(&mut self, name: impl Into<String>, len: usize, value: f64) -> &mut Self {
        self.insert(name, CellField::with_value(len, value))
    }

    /// Whether a map is registered under `name`
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.maps.contains_key(name)
    }

    /// Number of registered maps
    #[must_use]
    pub fn len(&self) -> usize {
        self.maps.len()
    }

    /// `true` if no map is registered
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.maps.is_empty()
    }
}

impl MapSource for InMemoryMaps {
    fn load_map(&self, name: &str) -> Result<CellField, MapError> {
        self.maps
            .get(name)
            .cloned()
            .ok_or_else(|| MapError::NotFound(name.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_in_memory_lookup() {
        let maps = InMemoryMaps::new().with("RiceFlooding", CellField::with_value(4, 10.0));
        assert!(maps.contains("RiceFlooding"));
        assert_eq!(maps.load_map("RiceFlooding").unwrap().sum(), 40.0);
        assert_eq!(
            maps.load_map("RicePercolation"),
            Err(MapError::NotFound("RicePercolation".to_string()))
        );
    }

    #[test]
    fn test_load_checked_rejects_wrong_shape() {
        let mut maps = InMemoryMaps::new();
        maps.insert_uniform("RicePercolation", 3, 2.0);

        assert!(load_checked(&maps, "RicePercolation", 3).is_ok());
        assert_eq!(
            load_checked(&maps, "RicePercolation", 5),
            Err(MapError::ShapeMismatch {
                name: "RicePercolation".to_string(),
                expected: 5,
                found: 3,
            })
        );
    }
}
