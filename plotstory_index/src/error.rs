// Copyright 2026 the Plotstory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Errors reported by [`QuadTree`](crate::QuadTree) construction and insertion.

use core::fmt;

use crate::types::Aabb2D;

/// Error produced when building or filling a quad-tree.
#[derive(Clone, Debug, PartialEq)]
pub enum IndexError<T> {
    /// The root region has no area, is inverted, or contains NaN.
    InvalidRegion(Aabb2D<T>),
    /// The node capacity was zero.
    ZeroCapacity,
    /// The minimum size ratio was outside `[0, 1]` or NaN.
    InvalidRatio(f64),
    /// The entry had a negative width or height.
    NegativeSize(Aabb2D<T>),
    /// The entry does not overlap the root region at all.
    OutOfBounds {
        /// Bounds of the rejected entry.
        bounds: Aabb2D<T>,
        /// Root region of the tree.
        region: Aabb2D<T>,
    },
}

impl<T: fmt::Debug> fmt::Display for IndexError<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidRegion(r) => write!(f, "invalid root region {r:?}"),
            Self::ZeroCapacity => f.write_str("node capacity must be at least 1"),
            Self::InvalidRatio(r) => write!(f, "minimum size ratio {r} is not in [0, 1]"),
            Self::NegativeSize(b) => write!(f, "entry {b:?} has a negative extent"),
            Self::OutOfBounds { bounds, region } => {
                write!(f, "entry {bounds:?} lies outside the indexed region {region:?}")
            }
        }
    }
}

impl<T: fmt::Debug> core::error::Error for IndexError<T> {}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::string::ToString as _;

    #[test]
    fn messages_show_the_offending_boxes() {
        let e: IndexError<i64> = IndexError::OutOfBounds {
            bounds: Aabb2D::new(300, 300, 310, 310),
            region: Aabb2D::new(0, 0, 256, 256),
        };
        let msg = e.to_string();
        assert!(msg.contains("300"), "{msg}");
        assert!(msg.contains("256"), "{msg}");
        assert_eq!(
            IndexError::<f64>::ZeroCapacity.to_string(),
            "node capacity must be at least 1"
        );
    }
}
