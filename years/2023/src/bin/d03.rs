use lib::prelude::*;

/// Characters which make an adjacent number a part number. Anything else
/// which is not a digit is filler.
const SYMBOLS: &[u8] = b"@#$%&*-=+/";

#[entry(input = "d03.txt", expect = 4361)]
fn main(input: IStr) -> Result<u64> {
    let grid = lib::grid::parse(input.as_data())?;
    part_sum(&grid)
}

/// A maximal run of digits in a single row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Token {
    value: u64,
    row: usize,
    /// First column of the run.
    start: usize,
    /// Last column of the run, inclusive.
    end: usize,
}

/// Sum the values of every number adjacent to a symbol.
fn part_sum<G>(grid: &G) -> Result<u64>
where
    G: Grid<u8>,
{
    let mut sum = 0u64;

    for token in Tokens::new(grid) {
        let token = token?;
        let part = is_part(grid, &token);

        log::debug!(
            "{value} at {row}:{start}..={end}: {kind}",
            value = token.value,
            row = token.row,
            start = token.start,
            end = token.end,
            kind = if part { "part" } else { "not a part" },
        );

        if part {
            sum = sum
                .checked_add(token.value)
                .context("sum of part numbers overflows")?;
        }
    }

    Ok(sum)
}

/// Test if any cell around the token holds a symbol.
fn is_part<G>(grid: &G, token: &Token) -> bool
where
    G: Grid<u8>,
{
    halo(token).any(|(row, column)| {
        grid.try_get(row, column)
            .is_some_and(|c| SYMBOLS.contains(c))
    })
}

/// Coordinates surrounding a token in all eight directions.
///
/// Cells before the first row or column are skipped, cells past the end of
/// the grid are left to the caller to bounds check.
fn halo(token: &Token) -> impl Iterator<Item = (usize, usize)> {
    let &Token { row, start, end, .. } = token;

    let rows = row.saturating_sub(1)..=row.saturating_add(1);
    let columns = start.saturating_sub(1)..=end.saturating_add(1);

    rows.flat_map(move |r| columns.clone().map(move |c| (r, c)))
        .filter(move |&(r, c)| r != row || !(start..=end).contains(&c))
}

/// Iterator over all digit runs in row-major order.
struct Tokens<'a, G> {
    grid: &'a G,
    row: usize,
    column: usize,
}

impl<'a, G> Tokens<'a, G> {
    fn new(grid: &'a G) -> Self {
        Self {
            grid,
            row: 0,
            column: 0,
        }
    }
}

impl<G> Iterator for Tokens<'_, G>
where
    G: Grid<u8>,
{
    type Item = Result<Token>;

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(line) = self.grid.row(self.row) {
            let rest = line.get(self.column..).unwrap_or_default();

            let Some(n) = rest.iter().position(u8::is_ascii_digit) else {
                self.row += 1;
                self.column = 0;
                continue;
            };

            let start = self.column + n;

            let len = line[start..]
                .iter()
                .take_while(|c| c.is_ascii_digit())
                .count();

            let end = start + len - 1;
            self.column = end + 1;

            let digits = &line[start..=end];

            let value = digits.iter().try_fold(0u64, |value, &d| {
                value.checked_mul(10)?.checked_add(u64::from(d - b'0'))
            });

            let Some(value) = value else {
                return Some(Err(anyhow!(
                    "number `{}` at {}:{start} overflows",
                    digits.as_bstr(),
                    self.row,
                )));
            };

            return Some(Ok(Token {
                value,
                row: self.row,
                start,
                end,
            }));
        }

        None
    }
}

#[cfg(test)]
mod tests {
    use lib::grid::{parse, MalformedGrid};
    use lib::prelude::*;

    use super::{halo, is_part, part_sum, Token, Tokens};

    const EXAMPLE: &[u8] = b"\
467..114..
...*......
..35..633.
......#...
617*......
.....+.58.
..592.....
......755.
...$.*....
.664.598..
";

    fn tokens(data: &[u8]) -> Vec<Token> {
        let grid = parse(data).unwrap();
        Tokens::new(&grid).collect::<Result<_>>().unwrap()
    }

    fn sum(data: &[u8]) -> u64 {
        part_sum(&parse(data).unwrap()).unwrap()
    }

    fn token(value: u64, row: usize, start: usize, end: usize) -> Token {
        Token {
            value,
            row,
            start,
            end,
        }
    }

    #[test]
    fn example() {
        assert_eq!(sum(EXAMPLE), 4361);
    }

    #[test]
    fn example_crlf() {
        let data = EXAMPLE.replace("\n", "\r\n");
        assert_eq!(sum(&data), 4361);
    }

    #[test]
    fn example_parts() {
        let grid = parse(EXAMPLE).unwrap();

        let outsiders = Tokens::new(&grid)
            .map(Result::unwrap)
            .filter(|t| !is_part(&grid, t))
            .map(|t| t.value)
            .collect::<Vec<_>>();

        assert_eq!(outsiders, [114, 58]);
    }

    #[test]
    fn idempotent() {
        let grid = parse(EXAMPLE).unwrap();
        assert_eq!(part_sum(&grid).unwrap(), part_sum(&grid).unwrap());
    }

    #[test]
    fn extraction_order() {
        assert_eq!(
            tokens(b"12.3\n....\n"),
            [token(12, 0, 0, 1), token(3, 0, 3, 3)]
        );

        assert_eq!(
            tokens(b"1.22\n333.\n"),
            [token(1, 0, 0, 0), token(22, 0, 2, 3), token(333, 1, 0, 2)]
        );
    }

    #[test]
    fn full_row_token() {
        assert_eq!(tokens(b"98765\n"), [token(98765, 0, 0, 4)]);
    }

    #[test]
    fn leading_zeros() {
        assert_eq!(tokens(b".007*"), [token(7, 0, 1, 3)]);
        assert_eq!(sum(b".007*"), 7);
    }

    #[test]
    fn row_without_digits() {
        assert!(tokens(b"..*.#..").is_empty());
    }

    #[test]
    fn no_symbols() {
        assert_eq!(sum(b"467..114..\n..35..633.\n.664.598..\n"), 0);
        assert_eq!(sum(b"12a\nb.c\n"), 0);
    }

    #[test]
    fn extraction_is_total() {
        let grid = parse(EXAMPLE).unwrap();
        let tokens = Tokens::new(&grid).collect::<Result<Vec<_>>>().unwrap();

        let digits: usize = tokens.iter().map(|t| t.end - t.start + 1).sum();
        let other = grid
            .rows()
            .flatten()
            .filter(|c| !c.is_ascii_digit())
            .count();

        assert_eq!(digits + other, grid.rows_len() * grid.columns_len());
    }

    #[test]
    fn diagonal_touch() {
        // Symbol diagonally before the first digit.
        assert_eq!(sum(b"*....\n.123.\n.....\n"), 123);
        // Symbol diagonally after the last digit.
        assert_eq!(sum(b".....\n.123.\n....#\n"), 123);
        // Symbol orthogonally next to the run.
        assert_eq!(sum(b".....\n.123=\n.....\n"), 123);
        // Two cells off diagonally is too far.
        assert_eq!(sum(b"....*\n123..\n.....\n"), 0);
    }

    #[test]
    fn filler_halo() {
        assert_eq!(sum(b".....\n.123.\n.....\n"), 0);
        assert_eq!(sum(b"abcde\nf123g\nhijkl\n"), 0);
    }

    #[test]
    fn grid_edges() {
        // Token in the top-left corner.
        assert_eq!(sum(b"12.\n..+\n"), 12);
        assert_eq!(sum(b"12.\n...\n"), 0);
        // Token in the bottom-right corner.
        assert_eq!(sum(b"$..\n.99\n"), 99);
        // Token spanning a full single row.
        assert_eq!(sum(b"123"), 0);
        // Symbol directly below the first column.
        assert_eq!(sum(b"5..\n/..\n"), 5);
    }

    #[test]
    fn halo_cells() {
        let cells = halo(&token(0, 1, 1, 2)).collect::<Vec<_>>();

        assert_eq!(
            cells,
            [
                (0, 0),
                (0, 1),
                (0, 2),
                (0, 3),
                (1, 0),
                (1, 3),
                (2, 0),
                (2, 1),
                (2, 2),
                (2, 3)
            ]
        );

        let corner = halo(&token(0, 0, 0, 0)).collect::<Vec<_>>();
        assert_eq!(corner, [(0, 1), (1, 0), (1, 1)]);
    }

    #[test]
    fn ignores_own_digits() {
        let grid = parse(b"1-1\n").unwrap();
        let tokens = Tokens::new(&grid).collect::<Result<Vec<_>>>().unwrap();
        assert_eq!(tokens.len(), 2);
        assert!(tokens.iter().all(|t| is_part(&grid, t)));
    }

    #[test]
    fn malformed_grid() {
        let error = parse(b"467..114..\n...*.....\n").unwrap_err();

        assert_eq!(
            error,
            MalformedGrid::Width {
                row: 1,
                expected: 10,
                actual: 9,
            }
        );
    }

    #[test]
    fn mixed_line_endings() {
        let error = parse(b"..\r\n1.*\n..").unwrap_err();
        assert_eq!(error.row(), 1);

        assert_eq!(sum(b"...\r\n1*.\r\n...\r\n"), 1);
        assert_eq!(sum(b"...\n1*.\n...\n"), 1);
    }

    #[test]
    fn overflowing_number() {
        let grid = parse(b"99999999999999999999999*").unwrap();
        let error = part_sum(&grid).unwrap_err();
        assert_eq!(
            error.to_string(),
            "number `99999999999999999999999` at 0:0 overflows"
        );
    }
}
