use core::ops::Range;
use std::fs::File;
use std::io::Read;

use anyhow::Context;

use crate::cli::error::LineCol;
use crate::input::{IStr, NL};

/// A byte offset into the input being processed.
#[repr(transparent)]
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Size(usize);

impl Size {
    /// Default zero value.
    pub const ZERO: Self = Self(0);

    #[inline]
    pub(crate) fn usize_range(range: Range<Size>) -> Range<usize> {
        range.start.0..range.end.0
    }

    #[inline]
    pub(crate) fn new(n: usize) -> Self {
        Self(n)
    }

    /// Get the raw offset.
    #[inline]
    pub fn get(self) -> usize {
        self.0
    }

    #[inline]
    pub(crate) fn checked_add(self, b: Size) -> Option<Self> {
        Some(Self(self.0.checked_add(b.0)?))
    }

    #[inline]
    pub(crate) fn saturating_add(self, n: Size) -> Self {
        Self(self.0.saturating_add(n.0))
    }
}

/// Get the line and column of the start of `span` inside of `data`.
pub(crate) fn pos_from(data: &[u8], span: Range<Size>) -> LineCol {
    let span = Size::usize_range(span);

    let Some(d) = data.get(..span.start) else {
        return LineCol::EMPTY;
    };

    let line = memchr::memchr_iter(NL, d).count();

    let start = match memchr::memrchr(NL, d) {
        Some(n) => d.len() - n - 1,
        None => d.len(),
    };

    LineCol::new(line, start)
}

/// Read the input at `read_path`.
///
/// The loaded data is leaked, since it lives for the remainder of the
/// process anyway and handing out `'static` slices is much easier than
/// dealing with lifetimes.
#[inline]
pub fn input(path: &'static str, read_path: &str) -> anyhow::Result<IStr> {
    return inner(read_path).with_context(|| path);

    #[inline]
    fn inner(read_path: &str) -> anyhow::Result<IStr> {
        let mut file = File::open(read_path)?;
        let mut buf = Vec::with_capacity(4096);
        file.read_to_end(&mut buf)?;
        let data: &'static [u8] = Box::leak(buf.into_boxed_slice());
        Ok(IStr::new(data, Size::ZERO))
    }
}

/// Prepare an input processor for a file in the `inputs` directory of the
/// calling package.
///
/// Evaluates to a tuple of the input and its display path.
#[macro_export]
macro_rules! input {
    ($path:literal) => {{
        let path = concat!("inputs/", $path);
        let read_path = concat!(env!("CARGO_MANIFEST_DIR"), "/inputs/", $path);
        ($crate::env::input(path, read_path)?, path)
    }};
}
