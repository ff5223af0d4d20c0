//! Horizontal placement of the vertical lines.

use crate::types::Column;
use serde::{Deserialize, Serialize};

/// Evenly spaced columns: column `c` sits at `c * spacing`, leaving
/// one spacing of margin on either side of the canvas.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ColumnLayout {
    pub spacing: f64,
}

impl ColumnLayout {
    pub fn new(spacing: f64) -> Self {
        Self { spacing }
    }

    pub fn for_canvas(width: f64, columns: usize) -> Self {
        Self::new(width / (columns + 1) as f64)
    }

    pub fn x(&self, column: Column) -> f64 {
        column as f64 * self.spacing
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn columns_are_evenly_spaced_inside_canvas() {
        let layout = ColumnLayout::for_canvas(900.0, 2);
        assert_eq!(layout.x(1), 300.0);
        assert_eq!(layout.x(2), 600.0);
    }
}
