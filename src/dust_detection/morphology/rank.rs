//! Min/max filters shared by the grey and binary operators

use ndarray::{Array2, ArrayView1, ArrayViewMut1, ArrayView2, Axis};

use super::element::StructuringElement;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum Rank {
    /// Erosion: minimum over the element
    Min,
    /// Dilation: maximum over the reflected element
    Max,
}

impl Rank {
    fn prefers<T: PartialOrd>(self, candidate: &T, current: &T) -> bool {
        match self {
            Rank::Min => candidate < current,
            Rank::Max => candidate > current,
        }
    }
}

/// Applies a min or max filter with `element` as footprint.
///
/// Out-of-bounds footprint cells are skipped. Elements always contain their
/// origin, so every window has at least one sample.
pub(super) fn rank_filter<T>(input: ArrayView2<'_, T>, element: &StructuringElement, rank: Rank) -> Array2<T>
where
    T: Copy + PartialOrd,
{
    match element {
        StructuringElement::Square(_) => {
            // A clipped square window is the product of two clipped intervals
            let (lo, hi) = element.extent();
            let (lo, hi) = match rank {
                Rank::Min => (lo, hi),
                Rank::Max => (-hi, -lo),
            };
            let rows_done = line_filter(input, Axis(1), lo, hi, rank);
            line_filter(rows_done.view(), Axis(0), lo, hi, rank)
        }
        StructuringElement::Disk(_) => {
            let offsets = match rank {
                Rank::Min => element.offsets(),
                Rank::Max => element.reflected_offsets(),
            };
            footprint_filter(input, &offsets, rank)
        }
    }
}

fn line_filter<T>(input: ArrayView2<'_, T>, axis: Axis, lo: isize, hi: isize, rank: Rank) -> Array2<T>
where
    T: Copy + PartialOrd,
{
    let mut output = input.to_owned();
    for (src, dst) in input.lanes(axis).into_iter().zip(output.lanes_mut(axis)) {
        filter_lane(src, dst, lo, hi, rank);
    }
    output
}

fn filter_lane<T>(src: ArrayView1<'_, T>, mut dst: ArrayViewMut1<'_, T>, lo: isize, hi: isize, rank: Rank)
where
    T: Copy + PartialOrd,
{
    let n = src.len() as isize;
    for i in 0..n {
        let start = (i + lo).max(0);
        let end = (i + hi).min(n - 1);
        let mut best = src[i as usize];
        for j in start..=end {
            let v = src[j as usize];
            if rank.prefers(&v, &best) {
                best = v;
            }
        }
        dst[i as usize] = best;
    }
}

fn footprint_filter<T>(input: ArrayView2<'_, T>, offsets: &[(isize, isize)], rank: Rank) -> Array2<T>
where
    T: Copy + PartialOrd,
{
    let (rows, cols) = input.dim();
    let (rows_i, cols_i) = (rows as isize, cols as isize);

    Array2::from_shape_fn((rows, cols), |(row, col)| {
        let mut best = input[[row, col]];
        for &(dr, dc) in offsets {
            let r = row as isize + dr;
            let c = col as isize + dc;
            if r < 0 || c < 0 || r >= rows_i || c >= cols_i {
                continue;
            }
            let v = input[[r as usize, c as usize]];
            if rank.prefers(&v, &best) {
                best = v;
            }
        }
        best
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    #[test]
    fn test_square_pass_matches_footprint_pass() {
        let input = Array2::from_shape_fn((9, 11), |(r, c)| ((r * 7 + c * 13) % 17) as f64);
        for side in [1, 2, 3, 4, 5] {
            let se = StructuringElement::Square(side);
            for rank in [Rank::Min, Rank::Max] {
                let offsets = match rank {
                    Rank::Min => se.offsets(),
                    Rank::Max => se.reflected_offsets(),
                };
                let separable = rank_filter(input.view(), &se, rank);
                let direct = footprint_filter(input.view(), &offsets, rank);
                assert_eq!(separable, direct, "side {} rank {:?}", side, rank);
            }
        }
    }

    #[test]
    fn test_border_window_is_clipped() {
        let input = array![[1.0, 5.0, 2.0], [4.0, 3.0, 9.0]];
        let max = rank_filter(input.view(), &StructuringElement::Square(3), Rank::Max);
        assert_eq!(max, array![[5.0, 9.0, 9.0], [5.0, 9.0, 9.0]]);
        let min = rank_filter(input.view(), &StructuringElement::Square(3), Rank::Min);
        assert_eq!(min, array![[1.0, 1.0, 2.0], [1.0, 1.0, 2.0]]);
    }
}
