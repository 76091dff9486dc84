use itertools::Itertools;
use regex::Regex;

use crate::quoridor::prelude::*;

// Cells are written as a column letter followed by a 1-based row: "a1" is the top-left cell.
// Fences prefix their anchor cell with an orientation letter: "He3", "Vd5".

fn parse_col(letter: &str) -> Result<usize> {
    let Some(ch) = letter.chars().next() else {
        return Err(anyhow!("missing column letter"));
    };
    Ok((ch.to_ascii_lowercase() as u8 - b'a') as usize)
}

fn parse_row(digits: &str) -> Result<usize> {
    let row = digits.parse::<usize>()?;
    row.checked_sub(1).ok_or_else(|| anyhow!("rows are numbered from 1, received {digits}"))
}

impl std::str::FromStr for Coord {
    type Err = Error;
    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let pattern = Regex::new("^(?<col>[a-zA-Z])(?<row>[0-9]{1,2})$")?;
        let Some(matches) = pattern.captures(s) else {
            return Err(anyhow!("could not parse coordinate {s}"));
        };
        let col = parse_col(&matches["col"])?;
        let row = parse_row(&matches["row"])?;
        Ok(Coord { col, row })
    }
}

impl std::str::FromStr for Fence {
    type Err = Error;
    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let pattern = Regex::new("^(?<orientation>[HVhv])(?<cell>[a-zA-Z][0-9]{1,2})$")?;
        let Some(matches) = pattern.captures(s) else {
            return Err(anyhow!("could not parse fence {s}"));
        };
        let orientation = matches["orientation"].parse::<Orientation>()?;
        let position = matches["cell"].parse::<Coord>()?;
        Ok(Fence { position, orientation })
    }
}

impl std::str::FromStr for Action {
    type Err = Error;
    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        if s == "resign" {
            return Ok(Action::Resign);
        }
        // "h3" is a cell in column h, while "Hh3" is a fence.
        if let Ok(fence) = s.parse::<Fence>() {
            return Ok(Action::Fence(fence));
        }
        s.parse::<Coord>()
            .map(Action::Move)
            .with_context(|| format!("expected a cell, a fence or resign, received {s}"))
    }
}

impl Coord {
    /// Notates the coord, e.g. "e1".
    pub fn notate(&self) -> String {
        format!("{}{}", (b'a' + self.col as u8) as char, self.row + 1)
    }
}

impl Fence {
    /// Notates the fence, e.g. "He3".
    pub fn notate(&self) -> String {
        format!("{}{}", self.orientation.notate(), self.position.notate())
    }
}

impl Action {
    pub fn notate(&self) -> String {
        match self {
            Action::Move(to)     => to.notate(),
            Action::Fence(fence) => fence.notate(),
            Action::Resign       => "resign".into(),
        }
    }
}

impl Path {
    /// Notates the cells the path visits after its start, e.g. "e2 e3 e4".
    pub fn notate(&self) -> String {
        self.moves.iter().map(|m| m.to.notate()).join(" ")
    }
}
