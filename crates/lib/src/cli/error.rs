use core::fmt;

use crate::grid::MalformedGrid;
use crate::input::{IStr, IStrError};

/// Associate the position in `data` that an error refers to with the error.
#[doc(hidden)]
pub fn error_context<E>(path: &'static str, data: IStr, error: E) -> anyhow::Error
where
    anyhow::Error: From<E>,
{
    let error = anyhow::Error::from(error);
    let pos = find_pos(data, &error);
    error.context(ErrorContext { path, pos })
}

/// A line and column combination.
#[derive(Default, Debug, Clone, Copy, PartialEq, Eq)]
pub struct LineCol {
    line: usize,
    start: usize,
}

impl LineCol {
    pub(crate) const EMPTY: Self = Self::new(0, 0);

    pub(crate) const fn new(line: usize, start: usize) -> Self {
        Self { line, start }
    }
}

impl fmt::Display for LineCol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line + 1, self.start + 1)
    }
}

/// Need to be able to unwrap an error fully in case it's threaded through
/// multiple layers of processing.
fn find_pos(data: IStr, error: &anyhow::Error) -> LineCol {
    for cause in error.chain() {
        if let Some(e) = cause.downcast_ref::<IStrError>() {
            return crate::env::pos_from(data.as_data(), e.span());
        }

        if let Some(e) = cause.downcast_ref::<MalformedGrid>() {
            return LineCol::new(e.row(), 0);
        }
    }

    LineCol::EMPTY
}

/// The location an error originates from.
#[derive(Debug)]
struct ErrorContext {
    path: &'static str,
    pos: LineCol,
}

impl fmt::Display for ErrorContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{path}:{pos}", path = self.path, pos = self.pos)
    }
}

#[cfg(test)]
mod tests {
    use super::error_context;
    use crate::env::Size;
    use crate::input::IStr;

    #[test]
    fn points_at_input_error() {
        let data = IStr::new(b"1 2\n3 x\n", Size::ZERO);
        let mut input = data;

        input.line::<&str>().unwrap();
        let mut line = input.line::<IStr>().unwrap();
        assert_eq!(line.next::<u32>().unwrap(), 3);
        let error = line.next::<u32>().unwrap_err();

        let error = error_context("inputs/test.txt", data, error);
        assert_eq!(
            format!("{error:#}"),
            "inputs/test.txt:2:3: not an integer or integer overflow `x`"
        );
    }

    #[test]
    fn points_at_malformed_row() {
        let data = IStr::new(b"...\n..\n", Size::ZERO);
        let error = crate::grid::parse(data.as_data()).unwrap_err();

        let error = error_context("inputs/grid.txt", data, error);
        assert_eq!(
            format!("{error:#}"),
            "inputs/grid.txt:2:1: malformed grid: row 1 has 2 columns, expected 3"
        );
    }

    #[test]
    fn unknown_position() {
        let data = IStr::new(b"", Size::ZERO);
        let error = error_context("inputs/empty.txt", data, anyhow::anyhow!("boom"));
        assert_eq!(format!("{error:#}"), "inputs/empty.txt:1:1: boom");
    }
}
