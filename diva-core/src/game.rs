use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Game releases with their own opcode numbering.
#[allow(clippy::upper_case_acronyms)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Game {
    PDA12,
    F2,
    FT,
    PSP1,
    PSP2,
    X,
    F,
}

impl Game {
    pub const ALL: [Game; 7] = [
        Game::PDA12,
        Game::F2,
        Game::FT,
        Game::PSP1,
        Game::PSP2,
        Game::X,
        Game::F,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Game::PDA12 => "PDA12",
            Game::F2 => "F2",
            Game::FT => "FT",
            Game::PSP1 => "PSP1",
            Game::PSP2 => "PSP2",
            Game::X => "X",
            Game::F => "F",
        }
    }
}

impl fmt::Display for Game {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown game '{0}'")]
pub struct UnknownGame(pub String);

impl FromStr for Game {
    type Err = UnknownGame;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Game::ALL
            .iter()
            .copied()
            .find(|g| g.name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| UnknownGame(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn names_round_trip() {
        for g in Game::ALL {
            assert_eq!(g.to_string().parse::<Game>().unwrap(), g);
        }
        assert_eq!("ft".parse::<Game>().unwrap(), Game::FT);
        assert!("FX".parse::<Game>().is_err());
    }
}
