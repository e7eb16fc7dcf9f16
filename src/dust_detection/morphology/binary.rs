use ndarray::Array2;

use crate::dust_detection::common::error::Result;

use super::element::StructuringElement;
use super::rank::{rank_filter, Rank};

/// Boolean mask, shape (height, width)
pub type BinaryMask = Array2<bool>;

pub fn binary_erode(mask: &BinaryMask, element: &StructuringElement) -> Result<BinaryMask> {
    element.validate()?;
    Ok(rank_filter(mask.view(), element, Rank::Min))
}

pub fn binary_dilate(mask: &BinaryMask, element: &StructuringElement) -> Result<BinaryMask> {
    element.validate()?;
    Ok(rank_filter(mask.view(), element, Rank::Max))
}

/// Erosion then dilation; drops foreground blobs the element does not fit in.
pub fn binary_opening(mask: &BinaryMask, element: &StructuringElement) -> Result<BinaryMask> {
    binary_dilate(&binary_erode(mask, element)?, element)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn count(mask: &BinaryMask) -> usize {
        mask.iter().filter(|&&v| v).count()
    }

    #[test]
    fn test_opening_removes_isolated_pixel() {
        let mut mask = BinaryMask::from_elem((9, 9), false);
        mask[[4, 4]] = true;
        let opened = binary_opening(&mask, &StructuringElement::Disk(1)).unwrap();
        assert_eq!(count(&opened), 0);
    }

    #[test]
    fn test_opening_keeps_cross() {
        let mut mask = BinaryMask::from_elem((9, 9), false);
        for (r, c) in [(4, 4), (3, 4), (5, 4), (4, 3), (4, 5)] {
            mask[[r, c]] = true;
        }
        let opened = binary_opening(&mask, &StructuringElement::Disk(1)).unwrap();
        assert_eq!(opened, mask);
    }

    #[test]
    fn test_opening_trims_square_to_cross() {
        let mut mask = BinaryMask::from_elem((9, 9), false);
        for r in 3..6 {
            for c in 3..6 {
                mask[[r, c]] = true;
            }
        }
        let opened = binary_opening(&mask, &StructuringElement::Disk(1)).unwrap();
        assert_eq!(count(&opened), 5);
        assert!(opened[[4, 4]] && opened[[3, 4]] && opened[[4, 5]]);
        assert!(!opened[[3, 3]]);
    }

    #[test]
    fn test_dilate_point_by_disk() {
        let mut mask = BinaryMask::from_elem((15, 15), false);
        mask[[7, 7]] = true;
        let grown = binary_dilate(&mask, &StructuringElement::Disk(3)).unwrap();
        assert_eq!(count(&grown), 29);
        assert!(grown[[4, 7]] && grown[[7, 10]] && grown[[9, 9]]);
        assert!(!grown[[10, 8]]);
    }

    #[test]
    fn test_dilate_clips_at_border() {
        let mut mask = BinaryMask::from_elem((5, 5), false);
        mask[[0, 0]] = true;
        let grown = binary_dilate(&mask, &StructuringElement::Disk(1)).unwrap();
        assert_eq!(count(&grown), 3);
    }

    #[test]
    fn test_erode_keeps_full_mask_at_border() {
        // Out-of-bounds cells are skipped rather than treated as background
        let mask = BinaryMask::from_elem((4, 4), true);
        let eroded = binary_erode(&mask, &StructuringElement::Disk(1)).unwrap();
        assert_eq!(count(&eroded), 16);
    }
}
