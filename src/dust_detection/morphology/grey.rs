//! Grey-level morphology on intensity fields

use ndarray::Array2;

use crate::dust_detection::common::error::Result;

use super::element::StructuringElement;
use super::rank::{rank_filter, Rank};

/// Grey erosion: each sample becomes the minimum under the element.
pub fn erode(field: &Array2<f64>, element: &StructuringElement) -> Result<Array2<f64>> {
    element.validate()?;
    Ok(rank_filter(field.view(), element, Rank::Min))
}

/// Grey dilation: each sample becomes the maximum under the reflected element.
pub fn dilate(field: &Array2<f64>, element: &StructuringElement) -> Result<Array2<f64>> {
    element.validate()?;
    Ok(rank_filter(field.view(), element, Rank::Max))
}

pub fn opening(field: &Array2<f64>, element: &StructuringElement) -> Result<Array2<f64>> {
    dilate(&erode(field, element)?, element)
}

pub fn closing(field: &Array2<f64>, element: &StructuringElement) -> Result<Array2<f64>> {
    erode(&dilate(field, element)?, element)
}

/// White top-hat: `field - opening(field)`.
///
/// Non-negative everywhere; large where a bright feature is smaller than the
/// element, zero across bright areas that contain the whole element.
pub fn white_tophat(field: &Array2<f64>, element: &StructuringElement) -> Result<Array2<f64>> {
    let opened = opening(field, element)?;
    Ok(field - &opened)
}

/// Black top-hat: `closing(field) - field`.
pub fn black_tophat(field: &Array2<f64>, element: &StructuringElement) -> Result<Array2<f64>> {
    let closed = closing(field, element)?;
    Ok(&closed - field)
}
