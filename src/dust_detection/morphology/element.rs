//! Structuring element definitions for morphological operations

use crate::dust_detection::common::error::{DetectionError, Result};

/// Neighborhood footprint of a morphological operation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StructuringElement {
    /// Square of the given side length
    Square(usize),
    /// Disk of the given radius: every (dr, dc) with dr² + dc² <= r²
    Disk(usize),
}

impl StructuringElement {
    pub fn validate(&self) -> Result<()> {
        match self {
            StructuringElement::Square(0) => Err(DetectionError::InvalidParameter {
                name: "side",
                value: "0".to_string(),
                reason: "square element side must be at least 1".to_string(),
            }),
            _ => Ok(()),
        }
    }

    /// Inclusive offset range covered along one axis.
    ///
    /// An even square has its origin at `side / 2`, so it reaches one cell
    /// further up/left than down/right.
    pub fn extent(&self) -> (isize, isize) {
        match *self {
            StructuringElement::Square(side) => {
                let side = side.max(1) as isize;
                let lo = -(side / 2);
                (lo, lo + side - 1)
            }
            StructuringElement::Disk(r) => (-(r as isize), r as isize),
        }
    }

    /// (dr, dc) offsets of every active cell relative to the origin.
    pub fn offsets(&self) -> Vec<(isize, isize)> {
        let (lo, hi) = self.extent();
        let mut offsets = Vec::new();
        for dr in lo..=hi {
            for dc in lo..=hi {
                if self.contains(dr, dc) {
                    offsets.push((dr, dc));
                }
            }
        }
        offsets
    }

    /// Offsets of the element mirrored through its origin.
    pub fn reflected_offsets(&self) -> Vec<(isize, isize)> {
        self.offsets()
            .into_iter()
            .map(|(dr, dc)| (-dr, -dc))
            .collect()
    }

    fn contains(&self, dr: isize, dc: isize) -> bool {
        match *self {
            StructuringElement::Square(_) => {
                let (lo, hi) = self.extent();
                (lo..=hi).contains(&dr) && (lo..=hi).contains(&dc)
            }
            StructuringElement::Disk(r) => {
                let r = r as isize;
                dr * dr + dc * dc <= r * r
            }
        }
    }
}
