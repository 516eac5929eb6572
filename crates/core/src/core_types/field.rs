//! Per-cell field storage
//!
//! Fields are stored compressed: one value per active cell of the model mask,
//! in mask order. Every field handed to the irrigation engine for one grid
//! shares that length and ordering.

use serde::{Deserialize, Serialize};

/// Values for every active cell of the grid
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct CellField {
    data: Vec<f64>,
}

impl CellField {
    /// Create a field of `len` cells, initialized to zero
    ///
    /// # Arguments
    ///
    /// * `len` - Number of active cells in the mask
    ///
    /// # Returns
    ///
    /// New field initialized to all zeros
    #[must_use]
    pub fn new(len: usize) -> Self {
        Self {
            data: vec![0.0; len],
        }
    }

    /// Create a field of `len` cells, initialized to `value`
    ///
    /// # Arguments
    ///
    /// * `len` - Number of active cells in the mask
    /// * `value` - Value assigned to every cell
    ///
    /// # Returns
    ///
    /// New field with every cell set to `value`
    #[must_use]
    pub fn with_value(len: usize, value: f64) -> Self {
        Self {
            data: vec![value; len],
        }
    }

    /// Wrap existing per-cell values
    ///
    /// # Arguments
    ///
    /// * `data` - One value per active cell, in mask order
    ///
    /// # Returns
    ///
    /// Field taking ownership of `data` without copying
    #[must_use]
    pub fn from_vec(data: Vec<f64>) -> Self {
        Self { data }
    }

    /// Number of cells
    #[must_use]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// `true` for a field over an empty mask
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Get reference to field data
    #[must_use]
    pub fn as_slice(&self) -> &[f64] {
        &self.data
    }

    /// Get mutable reference to field data
    pub fn as_mut_slice(&mut self) -> &mut [f64] {
        &mut self.data
    }

    /// Get value at a cell
    ///
    /// # Panics
    ///
    /// Panics if `cell` is out of bounds
    #[must_use]
    pub fn get(&self, cell: usize) -> f64 {
        assert!(cell < self.data.len(), "Cell index out of bounds");
        self.data[cell]
    }

    /// Set value at a cell
    ///
    /// # Panics
    ///
    /// Panics if `cell` is out of bounds
    pub fn set(&mut self, cell: usize, value: f64) {
        assert!(cell < self.data.len(), "Cell index out of bounds");
        self.data[cell] = value;
    }

    /// Fill entire field with a value
    pub fn fill(&mut self, value: f64) {
        self.data.fill(value);
    }

    /// Sum over all cells
    #[must_use]
    pub fn sum(&self) -> f64 {
        self.data.iter().sum()
    }
}

impl From<Vec<f64>> for CellField {
    fn from(data: Vec<f64>) -> Self {
        Self::from_vec(data)
    }
}

/// Stack of fields indexed by vegetation or land-use class
///
/// Soil states such as `W1` or `UZ` carry one layer per class. The layer for
/// the rice class is picked by index, resolved once at setup.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ClassFields {
    classes: Vec<CellField>,
}

impl ClassFields {
    /// Create `class_count` zeroed layers of `len` cells
    ///
    /// # Arguments
    ///
    /// * `class_count` - Number of vegetation class layers
    /// * `len` - Number of active cells in each layer
    ///
    /// # Returns
    ///
    /// New layers initialized to all zeros
    #[must_use]
    pub fn new(class_count: usize, len: usize) -> Self {
        Self {
            classes: vec![CellField::new(len); class_count],
        }
    }

    /// Create `class_count` layers of `len` cells, all set to `value`
    ///
    /// # Arguments
    ///
    /// * `class_count` - Number of vegetation class layers
    /// * `len` - Number of active cells in each layer
    /// * `value` - Value assigned to every cell of every layer
    ///
    /// # Returns
    ///
    /// New layers with every cell set to `value`
    #[must_use]
    pub fn with_value(class_count: usize, len: usize, value: f64) -> Self {
        Self {
            classes: vec![CellField::with_value(len, value); class_count],
        }
    }

    /// Wrap existing layers (index = class index)
    #[must_use]
    pub fn from_fields(classes: Vec<CellField>) -> Self {
        Self { classes }
    }

    /// Number of class layers
    #[must_use]
    pub fn class_count(&self) -> usize {
        self.classes.len()
    }

    /// Layer for a class, if present
    #[must_use]
    pub fn class(&self, index: usize) -> Option<&CellField> {
        self.classes.get(index)
    }

    /// Mutable layer for a class, if present
    pub fn class_mut(&mut self, index: usize) -> Option<&mut CellField> {
        self.classes.get_mut(index)
    }
}
