use lib::input::{ErrorKind, IStrError};
use lib::prelude::*;

/// Spelled out digits, in order of value starting at one.
const WORDS: [&[u8]; 9] = [
    b"one", b"two", b"three", b"four", b"five", b"six", b"seven", b"eight", b"nine",
];

#[entry(input = "d01.txt", expect = (296, 303))]
fn main(mut input: IStr) -> Result<(u32, u32)> {
    let mut o1 = 0;
    let mut o2 = 0;

    while let Some(line) = input.try_line::<IStr>()? {
        if line.is_empty() {
            continue;
        }

        let (Some(p1), Some(p2)) = (
            calibration(line.as_data(), false),
            calibration(line.as_data(), true),
        ) else {
            return Err(IStrError::new(line.span(), ErrorKind::Expected("a digit")).into());
        };

        log::debug!("{}: {p1} {p2}", line.as_bstr());

        o1 += p1;
        o2 += p2;
    }

    Ok((o1, o2))
}

/// Combine the first and the last digit on a line into a two digit number.
fn calibration(line: &[u8], words: bool) -> Option<u32> {
    let mut it = (0..line.len()).filter_map(|n| digit(&line[n..], words));
    let first = it.next()?;
    let last = it.last().unwrap_or(first);
    Some(first * 10 + last)
}

/// Decode a digit at the start of `rest`.
///
/// Spelled out digits only consume their first letter, so they may overlap
/// as in `eightwo`.
fn digit(rest: &[u8], words: bool) -> Option<u32> {
    let &d = rest.first()?;

    if d.is_ascii_digit() {
        return Some(u32::from(d - b'0'));
    }

    if !words {
        return None;
    }

    let n = WORDS.iter().position(|word| rest.starts_with(word))?;
    Some(n as u32 + 1)
}
