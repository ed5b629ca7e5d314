//! Line-oriented commands understood by the [`crate::Engine`].

use crate::chess::core::Player;
use crate::search::Depth;

/// Number of plies played by `selfplay` when the limit is omitted.
pub(super) const DEFAULT_SELFPLAY_PLIES: u16 = 200;

#[derive(Debug, PartialEq, Eq)]
pub(super) enum Command {
    /// `position startpos` or `position [fen] <FEN>`. `None` is the starting
    /// position.
    Position { fen: Option<String> },
    /// `move <san>` or a single SAN token.
    Move(String),
    /// The side the computer answers for, if any.
    Side(Option<Player>),
    Go,
    SelfPlay { plies: u16 },
    Perft { depth: Depth },
    Divide { depth: Depth },
    Moves,
    Fen,
    Display,
    Resign,
    Quit,
    Empty,
    Unknown(String),
}

fn parse_depth(input: &str, make: impl FnOnce(Depth) -> Command) -> Command {
    input.parse().map_or_else(
        |_| Command::Unknown(format!("depth should be a number, got '{input}'")),
        make,
    )
}

impl Command {
    pub(super) fn parse(input: &str) -> Self {
        let parts: Vec<&str> = input.split_whitespace().collect();

        match parts.as_slice() {
            [] => Self::Empty,
            ["position", "startpos"] => Self::Position { fen: None },
            ["position", "fen", fen @ ..] | ["position", fen @ ..] if !fen.is_empty() => {
                Self::Position {
                    fen: Some(fen.join(" ")),
                }
            },
            ["move", san] => Self::Move((*san).to_string()),
            ["side", "w"] => Self::Side(Some(Player::White)),
            ["side", "b"] => Self::Side(Some(Player::Black)),
            ["side", "none"] => Self::Side(None),
            ["go"] => Self::Go,
            ["selfplay"] => Self::SelfPlay {
                plies: DEFAULT_SELFPLAY_PLIES,
            },
            ["selfplay", plies] => plies.parse().map_or_else(
                |_| Self::Unknown(format!("plies should be a number, got '{plies}'")),
                |plies| Self::SelfPlay { plies },
            ),
            ["perft", depth] => parse_depth(depth, |depth| Self::Perft { depth }),
            ["divide", depth] => parse_depth(depth, |depth| Self::Divide { depth }),
            ["moves"] => Self::Moves,
            ["fen"] => Self::Fen,
            ["d"] => Self::Display,
            ["resign"] => Self::Resign,
            ["quit"] => Self::Quit,
            [san] => Self::Move((*san).to_string()),
            _ => Self::Unknown(parts.join(" ")),
        }
    }
}

#[cfg(test)]
mod test {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn position() {
        assert_eq!(
            Command::parse("position startpos"),
            Command::Position { fen: None }
        );
        assert_eq!(
            Command::parse("position 8/8/8/8/8/8/8/K6k w - - 0 1"),
            Command::Position {
                fen: Some("8/8/8/8/8/8/8/K6k w - - 0 1".to_string())
            }
        );
        assert_eq!(
            Command::parse("position fen 8/8/8/8/8/8/8/K6k w"),
            Command::Position {
                fen: Some("8/8/8/8/8/8/8/K6k w".to_string())
            }
        );
    }

    #[test]
    fn moves() {
        assert_eq!(Command::parse("move Nf3"), Command::Move("Nf3".to_string()));
        assert_eq!(Command::parse("  e4\n"), Command::Move("e4".to_string()));
        assert_eq!(Command::parse("O-O-O"), Command::Move("O-O-O".to_string()));
    }

    #[test]
    fn side() {
        assert_eq!(Command::parse("side w"), Command::Side(Some(Player::White)));
        assert_eq!(Command::parse("side b"), Command::Side(Some(Player::Black)));
        assert_eq!(Command::parse("side none"), Command::Side(None));
        assert_eq!(
            Command::parse("side x"),
            Command::Unknown("side x".to_string())
        );
    }

    #[test]
    fn counting() {
        assert_eq!(Command::parse("perft 3"), Command::Perft { depth: 3 });
        assert_eq!(Command::parse("divide 2"), Command::Divide { depth: 2 });
        assert_eq!(
            Command::parse("perft deep"),
            Command::Unknown("depth should be a number, got 'deep'".to_string())
        );
        assert_eq!(
            Command::parse("selfplay"),
            Command::SelfPlay {
                plies: DEFAULT_SELFPLAY_PLIES
            }
        );
        assert_eq!(Command::parse("selfplay 4"), Command::SelfPlay { plies: 4 });
    }

    #[test]
    fn keywords() {
        assert_eq!(Command::parse("go"), Command::Go);
        assert_eq!(Command::parse("moves"), Command::Moves);
        assert_eq!(Command::parse("fen"), Command::Fen);
        assert_eq!(Command::parse("d"), Command::Display);
        assert_eq!(Command::parse("resign"), Command::Resign);
        assert_eq!(Command::parse("quit"), Command::Quit);
        assert_eq!(Command::parse("   \n"), Command::Empty);
        assert_eq!(
            Command::parse("go fast now"),
            Command::Unknown("go fast now".to_string())
        );
    }
}
