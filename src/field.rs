//! Complex lattice field buffers tagged with their memory domain.
//!
//! A `LatticeField` is what the extrapolator sees as a trial vector, an image
//! vector, the guess or the right-hand side. The storage is always a host
//! `Vec<Complex64>`; the location tag records which domain the caller declares
//! the buffer to belong to, and is what the extrapolator validates on entry.

use num_complex::Complex64;

use crate::core::traits::{FieldLocation, Resident};

#[derive(Debug, Clone, PartialEq)]
pub struct LatticeField {
    data: Vec<Complex64>,
    location: FieldLocation,
}

impl LatticeField {
    /// Zero field of length `n` in host memory.
    pub fn zeros(n: usize) -> Self {
        Self {
            data: vec![Complex64::new(0.0, 0.0); n],
            location: FieldLocation::Host,
        }
    }

    pub fn from_vec(data: Vec<Complex64>) -> Self {
        Self { data, location: FieldLocation::Host }
    }

    /// Build from real and imaginary parts.
    pub fn from_parts(re: &[f64], im: &[f64]) -> Self {
        assert_eq!(re.len(), im.len(), "real and imaginary parts differ in length");
        Self::from_vec(re.iter().zip(im).map(|(&r, &i)| Complex64::new(r, i)).collect())
    }

    /// Re-tag the buffer as living in `location`.
    pub fn with_location(mut self, location: FieldLocation) -> Self {
        self.location = location;
        self
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn as_slice(&self) -> &[Complex64] {
        &self.data
    }

    pub fn as_mut_slice(&mut self) -> &mut [Complex64] {
        &mut self.data
    }

    pub fn into_vec(self) -> Vec<Complex64> {
        self.data
    }
}

impl Resident for LatticeField {
    fn location(&self) -> FieldLocation {
        self.location
    }
}

impl Resident for Vec<Complex64> {
    fn location(&self) -> FieldLocation {
        FieldLocation::Host
    }
}

impl AsRef<[Complex64]> for LatticeField {
    fn as_ref(&self) -> &[Complex64] {
        &self.data
    }
}

impl AsMut<[Complex64]> for LatticeField {
    fn as_mut(&mut self) -> &mut [Complex64] {
        &mut self.data
    }
}

impl From<Vec<Complex64>> for LatticeField {
    fn from(data: Vec<Complex64>) -> Self {
        Self::from_vec(data)
    }
}
