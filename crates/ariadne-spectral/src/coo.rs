//! Coordinate-format sparse matrices.
//!
//! Three parallel sequences `(row, col, value)` of equal length. Duplicate
//! coordinates are permitted and accumulate; parallel edges simply push
//! another triple. The triples are handed to an external sparse
//! linear-algebra facility for eigen-decomposition; this crate only builds
//! them (and can apply them to vectors, which the matrix-free modularity
//! operator relies on).

#[derive(Debug, Clone, PartialEq)]
pub struct CooMatrix {
    pub rows: Vec<usize>,
    pub cols: Vec<usize>,
    pub vals: Vec<f64>,
    shape: (usize, usize),
}

impl CooMatrix {
    pub fn new(shape: (usize, usize)) -> Self {
        Self { rows: Vec::new(), cols: Vec::new(), vals: Vec::new(), shape }
    }

    pub fn with_capacity(shape: (usize, usize), nnz: usize) -> Self {
        Self {
            rows: Vec::with_capacity(nnz),
            cols: Vec::with_capacity(nnz),
            vals: Vec::with_capacity(nnz),
            shape,
        }
    }

    #[inline]
    pub fn push(&mut self, row: usize, col: usize, val: f64) {
        debug_assert!(row < self.shape.0 && col < self.shape.1);
        self.rows.push(row);
        self.cols.push(col);
        self.vals.push(val);
    }

    pub fn shape(&self) -> (usize, usize) {
        self.shape
    }

    pub fn nnz(&self) -> usize {
        self.vals.len()
    }

    pub fn triples(&self) -> impl Iterator<Item = (usize, usize, f64)> + '_ {
        self.rows
            .iter()
            .zip(self.cols.iter())
            .zip(self.vals.iter())
            .map(|((&r, &c), &v)| (r, c, v))
    }

    /// `y = M · x`.
    pub fn matvec(&self, x: &[f64]) -> Vec<f64> {
        debug_assert_eq!(x.len(), self.shape.1);
        let mut y = vec![0.0; self.shape.0];
        for (r, c, v) in self.triples() {
            y[r] += v * x[c];
        }
        y
    }

    /// `y = Mᵀ · x` (adjoint apply).
    pub fn rmatvec(&self, x: &[f64]) -> Vec<f64> {
        debug_assert_eq!(x.len(), self.shape.0);
        let mut y = vec![0.0; self.shape.1];
        for (r, c, v) in self.triples() {
            y[c] += v * x[r];
        }
        y
    }

    /// Per-column sums, accumulated over duplicates.
    pub fn col_sums(&self) -> Vec<f64> {
        let mut sums = vec![0.0; self.shape.1];
        for (_, c, v) in self.triples() {
            sums[c] += v;
        }
        sums
    }

    /// Dense materialization; duplicates accumulate. Test helper; outputs
    /// are quadratic in the shape.
    pub fn to_dense(&self) -> Vec<Vec<f64>> {
        let mut dense = vec![vec![0.0; self.shape.1]; self.shape.0];
        for (r, c, v) in self.triples() {
            dense[r][c] += v;
        }
        dense
    }
}
