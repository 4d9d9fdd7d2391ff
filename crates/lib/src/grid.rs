//! Read-only grid views over flat slices.


use core::marker::PhantomData;
use core::ops::Range;

use bstr::ByteSlice;
use thiserror::Error;

mod sealed {
    pub trait Sealed {}
    impl<T> Sealed for [T] {}
}

use self::sealed::Sealed;

/// Error raised when text rows disagree on their shape.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum MalformedGrid {
    /// A row is wider or narrower than the first row.
    #[error("malformed grid: row {row} has {actual} columns, expected {expected}")]
    Width {
        /// The zero-indexed row with the wrong length.
        row: usize,
        /// Length of the first row.
        expected: usize,
        /// Length of the offending row.
        actual: usize,
    },
    /// A row uses a different line ending than the first row.
    #[error("malformed grid: row {row} does not end with `{expected}`")]
    LineEnding {
        /// The zero-indexed row with the wrong line ending.
        row: usize,
        /// The line ending used by the first row.
        expected: &'static str,
    },
}

impl MalformedGrid {
    /// The zero-indexed row the error was raised for.
    pub fn row(&self) -> usize {
        match *self {
            MalformedGrid::Width { row, .. } => row,
            MalformedGrid::LineEnding { row, .. } => row,
        }
    }
}

/// Parse text into a grid of bytes, one row per line.
///
/// The first line decides the width of the grid and whether rows are
/// separated by `\n` or `\r\n`. Trailing whitespace is ignored.
///
/// # Examples
///
/// ```
/// use lib::prelude::*;
///
/// let grid = lib::grid::parse(b"ab.\n.cd\n").unwrap();
/// assert_eq!(grid.rows_len(), 2);
/// assert_eq!(grid.columns_len(), 3);
/// assert_eq!(grid.try_get(1, 2), Some(&b'd'));
/// assert_eq!(grid.try_get(2, 0), None);
///
/// let error = lib::grid::parse(b"ab.\n.c\n").unwrap_err();
/// assert_eq!(error.row(), 1);
/// ```
pub fn parse(data: &[u8]) -> Result<SliceGrid<'_, u8>, MalformedGrid> {
    let data = data.trim_end();

    let Some(first) = memchr::memchr(b'\n', data) else {
        let columns = data.len();
        return Ok(data.as_grid(columns));
    };

    let (columns, stride, ending) = match data.get(..first) {
        Some([.., b'\r']) => (first - 1, 2, "\\r\\n"),
        _ => (first, 1, "\\n"),
    };

    let mut lines = data.split(|&b| b == b'\n').enumerate().peekable();

    while let Some((row, line)) = lines.next() {
        // The last row had its line ending trimmed.
        let crlf = stride == 2 && lines.peek().is_some();

        let cells = match line {
            [cells @ .., b'\r'] if crlf => cells,
            _ if crlf => {
                return Err(MalformedGrid::LineEnding {
                    row,
                    expected: ending,
                });
            }
            _ => line,
        };

        if memchr::memchr(b'\r', cells).is_some() {
            return Err(MalformedGrid::LineEnding {
                row,
                expected: ending,
            });
        }

        if cells.len() != columns {
            return Err(MalformedGrid::Width {
                row,
                expected: columns,
                actual: cells.len(),
            });
        }
    }

    Ok(data.as_grid_with_stride(columns, stride))
}

pub trait GridExt<T>: Sealed {
    /// Convert type into grid with a stride of `0`.
    ///
    /// See [GridExt::as_grid_with_stride].
    #[inline]
    fn as_grid(&self, columns: usize) -> SliceGrid<'_, T> {
        self.as_grid_with_stride(columns, 0)
    }

    /// Convert type into a grid with the given topology.
    ///
    /// The `columns` is the width of a row while `stride` is the number of
    /// elements between each row.
    ///
    /// This allows for specifying a stride that is larger than the number of
    /// columns to skip over separators inside of the data structure. A
    /// trailing partial row is not part of the grid.
    fn as_grid_with_stride(&self, columns: usize, stride: usize) -> SliceGrid<'_, T>;
}

impl<T> GridExt<T> for [T] {
    #[inline]
    fn as_grid_with_stride(&self, columns: usize, stride: usize) -> SliceGrid<'_, T> {
        SliceGrid::new(self, columns, stride)
    }
}

pub trait Grid<T> {
    /// Access the specified row in the grid.
    fn row(&self, row: usize) -> Option<&[T]>;

    /// Get number of rows in the grid.
    fn rows_len(&self) -> usize;

    /// Get number of columns in the grid.
    fn columns_len(&self) -> usize;

    /// Iterate over rows in the grid.
    ///
    /// # Examples
    ///
    /// ```
    /// use lib::prelude::*;
    ///
    /// let values = [1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11, 12];
    /// let grid = values.as_grid(4);
    ///
    /// assert!(grid.rows().flatten().copied().eq([1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11, 12]));
    /// assert_eq!(grid.rows().nth(1), Some(&[5, 6, 7, 8][..]));
    /// ```
    #[inline]
    fn rows(&self) -> Rows<'_, Self, T>
    where
        Self: Sized,
    {
        Rows {
            grid: self,
            range: 0..self.rows_len(),
            _marker: PhantomData,
        }
    }

    /// Get the element at the given row and column.
    ///
    /// # Examples
    ///
    /// ```
    /// use lib::prelude::*;
    ///
    /// let data = [1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11, 12];
    /// let grid = data.as_grid(4);
    ///
    /// assert_eq!(grid.try_get(0, 1), Some(&2));
    /// assert_eq!(grid.try_get(2, 1), Some(&10));
    /// assert_eq!(grid.try_get(3, 0), None);
    /// assert_eq!(grid.try_get(0, 4), None);
    /// ```
    #[inline]
    fn try_get(&self, row: usize, column: usize) -> Option<&T> {
        self.row(row)?.get(column)
    }
}

impl<G, T> Grid<T> for &G
where
    G: Grid<T>,
{
    #[inline]
    fn row(&self, row: usize) -> Option<&[T]> {
        (**self).row(row)
    }

    #[inline]
    fn rows_len(&self) -> usize {
        (**self).rows_len()
    }

    #[inline]
    fn columns_len(&self) -> usize {
        (**self).columns_len()
    }
}

#[derive(Debug, Clone, Copy)]
struct Dims {
    rows: usize,
    columns: usize,
    stride: usize,
}

/// A grid backed by a slice.
#[derive(Debug, Clone, Copy)]
pub struct SliceGrid<'a, T> {
    data: &'a [T],
    dims: Dims,
}

impl<'a, T> SliceGrid<'a, T> {
    fn new(data: &'a [T], columns: usize, stride: usize) -> Self {
        let rows = match columns.checked_add(stride) {
            Some(0) | None => 0,
            Some(step) => data.len().saturating_add(stride) / step,
        };

        Self {
            data,
            dims: Dims {
                rows,
                columns,
                stride,
            },
        }
    }

    fn row_range(&self, row: usize) -> Range<usize> {
        let start = row * (self.dims.columns + self.dims.stride);
        start..start + self.dims.columns
    }
}

impl<T> Grid<T> for SliceGrid<'_, T> {
    #[inline]
    fn row(&self, row: usize) -> Option<&[T]> {
        if row >= self.dims.rows {
            return None;
        }

        self.data.get(self.row_range(row))
    }

    #[inline]
    fn rows_len(&self) -> usize {
        self.dims.rows
    }

    #[inline]
    fn columns_len(&self) -> usize {
        self.dims.columns
    }
}

/// Iterator over rows in a grid, see [Grid::rows].
pub struct Rows<'a, G, T> {
    grid: &'a G,
    range: Range<usize>,
    _marker: PhantomData<fn() -> T>,
}

impl<'a, G, T: 'a> Iterator for Rows<'a, G, T>
where
    G: Grid<T>,
{
    type Item = &'a [T];

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        let row = self.range.next()?;
        self.grid.row(row)
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        self.range.size_hint()
    }
}
