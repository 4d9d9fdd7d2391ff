use core::str::FromStr;

use lib::prelude::*;

/// The most cubes of each colour the bag holds.
const LIMITS: Cubes = Cubes {
    red: 12,
    green: 13,
    blue: 14,
};

#[entry(input = "d02.txt", expect = 8)]
fn main(mut input: IStr) -> Result<u32> {
    let mut sum = 0;

    while let Some(game) = input.try_line::<Game>()? {
        let possible = game.draws.iter().all(|draw| draw.fits(&LIMITS));
        log::debug!("game {}: possible = {possible}", game.id);

        if possible {
            sum += game.id;
        }
    }

    Ok(sum)
}

/// Cubes revealed in a single draw.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
struct Cubes {
    red: u32,
    green: u32,
    blue: u32,
}

impl Cubes {
    /// Test if every colour is within the given limits.
    fn fits(&self, limits: &Cubes) -> bool {
        self.red <= limits.red && self.green <= limits.green && self.blue <= limits.blue
    }
}

impl FromStr for Cubes {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let mut cubes = Cubes::default();
        let mut seen = [false; 3];

        for pull in s.split(',') {
            let (count, colour) = pull
                .trim()
                .split_once(' ')
                .context("expected `<count> <colour>`")?;

            let count = count
                .parse::<u32>()
                .with_context(|| format!("bad count `{count}`"))?;

            let (index, slot) = match colour {
                "red" => (0, &mut cubes.red),
                "green" => (1, &mut cubes.green),
                "blue" => (2, &mut cubes.blue),
                other => bail!("unknown colour `{other}`"),
            };

            ensure!(!seen[index], "colour `{colour}` repeated in one draw");
            seen[index] = true;
            *slot = count;
        }

        Ok(cubes)
    }
}

#[derive(Debug)]
struct Game {
    id: u32,
    draws: Vec<Cubes>,
}

lib::from_input! {
    |line: &'static str| -> Game {
        let (game, rest) = line.split_once(':').context("missing `:`")?;

        let id = game
            .strip_prefix("Game ")
            .context("expected `Game <id>`")?
            .parse::<u32>()
            .context("bad game id")?;

        let draws = rest
            .split(';')
            .map(str::parse::<Cubes>)
            .collect::<Result<Vec<Cubes>>>()?;

        Ok(Game { id, draws })
    }
}

#[cfg(test)]
mod tests {
    use lib::env::Size;
    use lib::input::ErrorKind;
    use lib::prelude::*;

    use super::{Cubes, Game, LIMITS};

    fn game(line: &'static str) -> Result<Game> {
        let mut input = IStr::new(line.as_bytes(), Size::ZERO);
        Ok(input.line::<Game>()?)
    }

    #[test]
    fn parse_game() {
        let game =
            game("Game 3: 8 green, 6 blue, 20 red; 5 blue, 4 red, 13 green; 5 green, 1 red")
                .unwrap();
        assert_eq!(game.id, 3);

        assert_eq!(
            &game.draws[..],
            [
                Cubes {
                    red: 20,
                    green: 8,
                    blue: 6
                },
                Cubes {
                    red: 4,
                    green: 13,
                    blue: 5
                },
                Cubes {
                    red: 1,
                    green: 5,
                    blue: 0
                },
            ]
        );

        assert!(!game.draws.iter().all(|d| d.fits(&LIMITS)));
    }

    #[test]
    fn limits_are_inclusive() {
        let draw = "12 red, 13 green, 14 blue".parse::<Cubes>().unwrap();
        assert!(draw.fits(&LIMITS));

        let draw = "15 blue".parse::<Cubes>().unwrap();
        assert!(!draw.fits(&LIMITS));
    }

    #[test]
    fn unknown_colour() {
        let error = game("Game 1: 3 purple").unwrap_err();
        let error = error.downcast::<lib::input::IStrError>().unwrap();
        assert_eq!(error.span().start, Size::ZERO);
        assert_eq!(error.span().end.get(), 16);

        let ErrorKind::Boxed(inner) = error.kind() else {
            panic!("expected boxed error, got {:?}", error.kind());
        };

        assert_eq!(inner.to_string(), "unknown colour `purple`");
    }

    #[test]
    fn missing_colon() {
        let error = game("Game 1 3 blue").unwrap_err();
        assert_eq!(error.to_string(), "missing `:`");
    }

    #[test]
    fn repeated_colour() {
        let error = "1 red, 2 blue, 3 red".parse::<Cubes>().unwrap_err();
        assert_eq!(error.to_string(), "colour `red` repeated in one draw");
    }

    #[test]
    fn many_draws() {
        let line = format!("Game 7: {}", ["1 red"; 40].join("; "));
        let line: &'static str = Box::leak(line.into_boxed_str());
        let game = game(line).unwrap();
        assert_eq!(game.draws.len(), 40);
    }

    #[test]
    fn huge_count() {
        let error = "99999999999 blue".parse::<Cubes>().unwrap_err();
        assert_eq!(error.to_string(), "bad count `99999999999`");
    }

    #[test]
    fn bad_count() {
        assert!(game("Game 1: many blue").is_err());
        assert!(game("Game x: 1 blue").is_err());
    }
}
