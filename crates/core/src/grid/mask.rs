//! Active-cell mask of the model grid
//!
//! All per-cell arrays are compressed to the active cells of this mask, in
//! row-major order.

use crate::core_types::CellField;
use crate::error::RiceError;

/// Grid shape and active-cell mask
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CellMask {
    width: usize,
    height: usize,
    active: Vec<bool>,
    active_count: usize,
}

impl CellMask {
    /// Create a mask from a row-major activity raster
    ///
    /// # Errors
    ///
    /// Returns [`RiceError::ShapeMismatch`] if `active` does not hold
    /// `width * height` entries.
    pub fn new(width: usize, height: usize, active: Vec<bool>) -> Result<Self, RiceError> {
        if active.len() != width * height {
            return Err(RiceError::ShapeMismatch {
                name: "mask",
                expected: width * height,
                found: active.len(),
            });
        }
        let active_count = active.iter().filter(|&&a| a).count();
        Ok(Self {
            width,
            height,
            active,
            active_count,
        })
    }

    /// Mask with every cell active
    #[must_use]
    pub fn all_active(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            active: vec![true; width * height],
            active_count: width * height,
        }
    }

    /// Grid width in cells
    #[must_use]
    pub fn width(&self) -> usize {
        self.width
    }

    /// Grid height in cells
    #[must_use]
    pub fn height(&self) -> usize {
        self.height
    }

    /// Number of active cells (length of every compressed field)
    #[must_use]
    pub fn active_count(&self) -> usize {
        self.active_count
    }

    /// Whether raster position (x, y) is active
    #[must_use]
    pub fn is_active(&self, x: usize, y: usize) -> bool {
        x < self.width && y < self.height && self.active[y * self.width + x]
    }

    /// Zero field over the active cells
    #[must_use]
    pub fn in_zero(&self) -> CellField {
        CellField::new(self.active_count)
    }

    /// Expand a compressed field to a full row-major raster
    ///
    /// Inactive positions receive `fill`.
    ///
    /// # Errors
    ///
    /// Returns [`RiceError::ShapeMismatch`] if `field` is not compressed to
    /// this mask.
    pub fn decompress(&self, field: &CellField, fill: f64) -> Result<Vec<f64>, RiceError> {
        if field.len() != self.active_count {
            return Err(RiceError::ShapeMismatch {
                name: "field",
                expected: self.active_count,
                found: field.len(),
            });
        }
        let mut values = field.as_slice().iter();
        Ok(self
            .active
            .iter()
            .map(|&a| {
                if a {
                    values.next().copied().unwrap_or(fill)
                } else {
                    fill
                }
            })
            .collect())
    }
}
