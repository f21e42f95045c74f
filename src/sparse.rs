//! Triplet-based sparse matrix builder.
//!
//! Duplicate triplets are summed when converting to a compressed format.

pub type SparseMatrixFaer = faer::sparse::SparseColMat<usize, f64>;

#[derive(Debug, Clone, Default)]
pub struct SparseMatrix {
  nrows: usize,
  ncols: usize,
  triplets: Vec<(usize, usize, f64)>,
}

impl SparseMatrix {
  pub fn zeros(nrows: usize, ncols: usize) -> Self {
    Self::new(nrows, ncols, Vec::new())
  }
  pub fn new(nrows: usize, ncols: usize, triplets: Vec<(usize, usize, f64)>) -> Self {
    assert!(
      triplets.iter().all(|&(r, c, _)| r < nrows && c < ncols),
      "triplet out of bounds for {nrows}x{ncols} matrix"
    );
    Self {
      nrows,
      ncols,
      triplets,
    }
  }

  pub fn identity(n: usize) -> Self {
    Self::new(n, n, (0..n).map(|i| (i, i, 1.0)).collect())
  }

  /// Square matrix with constant values on the given diagonals.
  ///
  /// Offset `0` is the main diagonal, positive offsets are above it.
  pub fn from_const_diagonals(values: &[f64], offsets: &[isize], n: usize) -> Self {
    assert_eq!(values.len(), offsets.len());
    let mut mat = Self::zeros(n, n);
    for (&value, &offset) in values.iter().zip(offsets) {
      let shift = offset.unsigned_abs();
      for k in 0..n.saturating_sub(shift) {
        let (r, c) = if offset >= 0 { (k, k + shift) } else { (k + shift, k) };
        mat.push(r, c, value);
      }
    }
    mat
  }

  pub fn ntriplets(&self) -> usize {
    self.triplets.len()
  }

  pub fn push(&mut self, r: usize, c: usize, v: f64) {
    assert!(r < self.nrows && c < self.ncols);
    if v != 0.0 {
      self.triplets.push((r, c, v));
    }
  }

  /// Kronecker product $A times.circle B$.
  pub fn kronecker(&self, other: &Self) -> Self {
    let nrows = self.nrows * other.nrows;
    let ncols = self.ncols * other.ncols;
    let mut triplets = Vec::with_capacity(self.ntriplets() * other.ntriplets());
    for &(ra, ca, va) in &self.triplets {
      for &(rb, cb, vb) in &other.triplets {
        triplets.push((ra * other.nrows + rb, ca * other.ncols + cb, va * vb));
      }
    }
    Self::new(nrows, ncols, triplets)
  }

  pub fn to_nalgebra_coo(&self) -> nas::CooMatrix<f64> {
    let mut coo = nas::CooMatrix::new(self.nrows, self.ncols);
    for &(r, c, v) in &self.triplets {
      coo.push(r, c, v);
    }
    coo
  }

  pub fn to_nalgebra_csc(&self) -> nas::CscMatrix<f64> {
    (&self.to_nalgebra_coo()).into()
  }

  pub fn to_nalgebra_dense(&self) -> na::DMatrix<f64> {
    (&self.to_nalgebra_coo()).into()
  }
}

/// Sum of two matrices of equal shape, by concatenating triplets.
impl std::ops::Add for SparseMatrix {
  type Output = Self;

  fn add(mut self, other: Self) -> Self {
    assert_eq!((self.nrows, self.ncols), (other.nrows, other.ncols));
    self.triplets.extend(other.triplets);
    self
  }
}

/// Reuses the CSC buffers of a nalgebra matrix for faer.
pub fn nalgebra2faer(m: nas::CscMatrix<f64>) -> SparseMatrixFaer {
  let nrows = m.nrows();
  let ncols = m.ncols();
  let (col_ptrs, row_indices, values) = m.disassemble();

  let symbolic =
    faer::sparse::SymbolicSparseColMat::new_checked(nrows, ncols, col_ptrs, None, row_indices);
  faer::sparse::SparseColMat::new(symbolic, values)
}

#[cfg(test)]
mod test {
  use super::SparseMatrix;

  #[test]
  fn const_diagonals_match_dense() {
    for n in 1..=5 {
      let sparse = SparseMatrix::from_const_diagonals(&[-1.0, 2.0, -1.0], &[-1, 0, 1], n);
      let dense = na::DMatrix::from_fn(n, n, |r, c| match r.abs_diff(c) {
        0 => 2.0,
        1 => -1.0,
        _ => 0.0,
      });
      assert_eq!(sparse.to_nalgebra_dense(), dense);
    }

    let upper = SparseMatrix::from_const_diagonals(&[7.0], &[2], 4).to_nalgebra_dense();
    assert_eq!(upper[(0, 2)], 7.0);
    assert_eq!(upper[(1, 3)], 7.0);
    assert_eq!(upper.iter().filter(|&&v| v != 0.0).count(), 2);
  }

  #[test]
  fn kronecker_matches_dense() {
    #[rustfmt::skip]
    let a = na::DMatrix::from_row_slice(2, 3, &[
      1.0, 0.0, 2.0,
      0.0, 3.0, 0.0,
    ]);
    #[rustfmt::skip]
    let b = na::DMatrix::from_row_slice(2, 2, &[
      0.0, 4.0,
      5.0, 6.0,
    ]);
    let to_sparse = |m: &na::DMatrix<f64>| {
      let mut s = SparseMatrix::zeros(m.nrows(), m.ncols());
      for c in 0..m.ncols() {
        for r in 0..m.nrows() {
          s.push(r, c, m[(r, c)]);
        }
      }
      s
    };
    let kron = to_sparse(&a).kronecker(&to_sparse(&b));
    assert_eq!(kron.to_nalgebra_dense(), a.kronecker(&b));
  }

  #[test]
  fn kronecker_sum_matches_dense() {
    let t = SparseMatrix::from_const_diagonals(&[-1.0, 2.0, -1.0], &[-1, 0, 1], 3);
    let eye = SparseMatrix::identity(3);
    let sparse = eye.kronecker(&t) + t.kronecker(&eye);
    let dense_t = t.to_nalgebra_dense();
    let dense_eye = na::DMatrix::<f64>::identity(3, 3);
    assert_eq!(
      sparse.to_nalgebra_dense(),
      dense_eye.kronecker(&dense_t) + dense_t.kronecker(&dense_eye)
    );
  }

  #[test]
  fn duplicates_are_summed() {
    let mut mat = SparseMatrix::zeros(2, 2);
    mat.push(0, 1, 1.5);
    mat.push(0, 1, 2.5);
    mat.push(1, 1, 0.0);
    assert_eq!(mat.ntriplets(), 2);
    let csc = mat.to_nalgebra_csc();
    assert_eq!(csc.nnz(), 1);
    assert_eq!(mat.to_nalgebra_dense()[(0, 1)], 4.0);
  }
}
