//! Mathematical morphology on intensity fields and binary masks
//!
//! - **Erosion**: minimum over the structuring element
//! - **Dilation**: maximum over the reflected structuring element
//! - **Opening**: erosion then dilation (removes small bright features)
//! - **Closing**: dilation then erosion (fills small dark gaps)
//! - **White top-hat**: input minus opening (small bright features)
//! - **Black top-hat**: closing minus input (small dark features)
//!
//! Border policy: footprint samples that fall outside the image are skipped,
//! so every min/max runs over the in-bounds part of the element. For
//! axis-symmetric elements (odd squares, disks) this gives the same result
//! as half-sample reflection of the image at its edges.

mod element;
mod rank;
mod grey;
mod binary;

pub use element::StructuringElement;
pub use grey::{black_tophat, closing, dilate, erode, opening, white_tophat};
pub use binary::{binary_dilate, binary_erode, binary_opening, BinaryMask};
