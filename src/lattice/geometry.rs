//! Periodic hypercubic lattice geometry.

use crate::error::MreError;

/// Site layout of a periodic lattice with extents `dims`.
///
/// Sites are numbered lexicographically with the first direction running
/// fastest.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LatticeGeometry {
    dims: Vec<usize>,
    strides: Vec<usize>,
}

impl LatticeGeometry {
    pub fn new(dims: &[usize]) -> Result<Self, MreError> {
        if dims.is_empty() || dims.contains(&0) {
            return Err(MreError::DimensionMismatch(format!(
                "lattice extents must be non-empty and positive, got {dims:?}"
            )));
        }
        let mut strides = Vec::with_capacity(dims.len());
        let mut s = 1;
        for &d in dims {
            strides.push(s);
            s *= d;
        }
        Ok(Self { dims: dims.to_vec(), strides })
    }

    pub fn ndim(&self) -> usize {
        self.dims.len()
    }

    pub fn dims(&self) -> &[usize] {
        &self.dims
    }

    /// Number of sites.
    pub fn volume(&self) -> usize {
        self.dims.iter().product()
    }

    pub fn index(&self, coords: &[usize]) -> usize {
        debug_assert_eq!(coords.len(), self.ndim());
        coords
            .iter()
            .zip(&self.dims)
            .zip(&self.strides)
            .map(|((&c, &d), &s)| (c % d) * s)
            .sum()
    }

    pub fn coords(&self, site: usize) -> Vec<usize> {
        self.dims
            .iter()
            .zip(&self.strides)
            .map(|(&d, &s)| (site / s) % d)
            .collect()
    }

    /// Site one step forward in direction `mu`, wrapping periodically.
    pub fn forward(&self, site: usize, mu: usize) -> usize {
        let (d, s) = (self.dims[mu], self.strides[mu]);
        let c = (site / s) % d;
        if c + 1 == d { site - c * s } else { site + s }
    }

    /// Site one step backward in direction `mu`, wrapping periodically.
    pub fn backward(&self, site: usize, mu: usize) -> usize {
        let (d, s) = (self.dims[mu], self.strides[mu]);
        let c = (site / s) % d;
        if c == 0 { site + (d - 1) * s } else { site - s }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn index_and_coords_round_trip() {
        let g = LatticeGeometry::new(&[3, 4, 2]).unwrap();
        assert_eq!(g.volume(), 24);
        assert_eq!(g.index(&[2, 1, 1]), 2 + 3 + 12);
        assert_eq!(g.coords(17), vec![2, 1, 1]);
    }

    #[test]
    fn neighbours_wrap() {
        let g = LatticeGeometry::new(&[3, 4]).unwrap();
        let s = g.index(&[2, 3]);
        assert_eq!(g.forward(s, 0), g.index(&[0, 3]));
        assert_eq!(g.forward(s, 1), g.index(&[2, 0]));
        assert_eq!(g.backward(g.index(&[0, 0]), 1), g.index(&[0, 3]));
        for site in 0..g.volume() {
            for mu in 0..2 {
                assert_eq!(g.backward(g.forward(site, mu), mu), site);
            }
        }
    }

    #[test]
    fn rejects_zero_extent() {
        assert!(LatticeGeometry::new(&[4, 0]).is_err());
        assert!(LatticeGeometry::new(&[]).is_err());
    }
}
