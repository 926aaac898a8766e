//! Reusable batch matrix buffer.
//!
//! # Memory Layout
//!
//! A batch is a `rows × cols` matrix (`batch_size × n_variables`) stored
//! row-major in one contiguous `Vec<T>`. Column `j` holds the draws of
//! variable `j`. The buffer is allocated once and reused for every batch;
//! [`reset`](BatchBuffer::reset) marks it empty without releasing memory.

use crate::rng::SampleFloat;

/// Pre-allocated `rows × cols` sample matrix.
///
/// # Examples
///
/// ```rust
/// use sim_engine::engine::BatchBuffer;
///
/// let mut batch = BatchBuffer::<f32>::new(3, 2);
/// batch.set_column(0, &[1.0, 2.0, 3.0]);
/// batch.set_column(1, &[4.0, 5.0, 6.0]);
///
/// assert_eq!(batch.shape(), (3, 2));
/// assert_eq!(batch.row(1), &[2.0, 5.0]);
/// assert_eq!(batch.as_slice(), &[1.0, 4.0, 2.0, 5.0, 3.0, 6.0]);
/// ```
#[derive(Clone, Debug)]
pub struct BatchBuffer<T> {
    data: Vec<T>,
    rows: usize,
    cols: usize,
    filled: bool,
}

impl<T: SampleFloat> BatchBuffer<T> {
    /// Allocates a zeroed `rows × cols` buffer.
    pub fn new(rows: usize, cols: usize) -> Self {
        Self {
            data: vec![T::zero(); rows * cols],
            rows,
            cols,
            filled: false,
        }
    }

    /// Matrix shape as `(rows, cols)`.
    #[inline]
    pub fn shape(&self) -> (usize, usize) {
        (self.rows, self.cols)
    }

    /// Whether the buffer currently holds a sampled batch.
    #[inline]
    pub fn is_filled(&self) -> bool {
        self.filled
    }

    /// Row `i` as a slice of `cols` values.
    ///
    /// # Panics
    ///
    /// If `i >= rows`.
    #[inline]
    pub fn row(&self, i: usize) -> &[T] {
        let start = i * self.cols;
        &self.data[start..start + self.cols]
    }

    /// Iterator over column `j`.
    pub fn column(&self, j: usize) -> impl Iterator<Item = T> + '_ {
        self.data.iter().skip(j).step_by(self.cols.max(1)).copied()
    }

    /// All values, flattened row-major.
    #[inline]
    pub fn as_slice(&self) -> &[T] {
        &self.data
    }

    /// Writes `values` into column `j`, one value per row.
    ///
    /// Copies `min(values.len(), rows)` values; callers check lengths.
    ///
    /// # Panics
    ///
    /// If `j >= cols`.
    pub fn set_column(&mut self, j: usize, values: &[T]) {
        assert!(j < self.cols, "column {} out of range for {} columns", j, self.cols);
        for (row, &value) in self.data.chunks_exact_mut(self.cols).zip(values) {
            row[j] = value;
        }
        self.filled = true;
    }

    /// Marks the buffer empty; capacity is retained for the next batch.
    #[inline]
    pub fn reset(&mut self) {
        self.filled = false;
    }

    /// Bytes held by the buffer.
    #[inline]
    pub fn memory_usage(&self) -> usize {
        self.data.capacity() * std::mem::size_of::<T>()
    }
}
