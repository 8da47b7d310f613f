use std::collections::BTreeMap;
use std::ops::RangeInclusive;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::tournament_match::TournamentMatch;
use crate::error::{BracketError, BracketResult};

/// One of the two contestant positions of a match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum Slot {
    Player1,
    Player2,
}

impl Slot {
    /// Even positions feed `player1` of the next round, odd positions `player2`.
    pub fn for_position(position: i32) -> Self {
        if position % 2 == 0 {
            Self::Player1
        } else {
            Self::Player2
        }
    }

    pub fn column(&self) -> &'static str {
        match self {
            Self::Player1 => "player1",
            Self::Player2 => "player2",
        }
    }
}

/// Address of a single contestant slot in the bracket.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SlotRef {
    pub round: i32,
    pub position: i32,
    pub slot: Slot,
}

/// Where a decided winner goes next.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Advancement {
    pub target: SlotRef,
    pub player: String,
}

/// Shape of a single-elimination bracket.
///
/// Rounds are numbered from `first_round` upwards; a challenge that only covers the
/// last eight of a 128 draw starts at round 5. Each round holds half the matches of
/// the previous one and the final holds exactly one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BracketLayout {
    first_round: i32,
    rounds: u32,
}

impl BracketLayout {
    pub fn new(first_round: i32, entrants: u32) -> BracketResult<Self> {
        if first_round < 1 {
            return Err(BracketError::InvalidBracket(format!(
                "first round must be >= 1, got {}",
                first_round
            )));
        }
        if entrants < 2 || !entrants.is_power_of_two() {
            return Err(BracketError::InvalidBracket(format!(
                "entrants must be a power of two >= 2, got {}",
                entrants
            )));
        }

        let rounds = entrants.trailing_zeros();
        if first_round.checked_add(rounds as i32 - 1).is_none() {
            return Err(BracketError::InvalidBracket(format!(
                "first round {} leaves no room for {} rounds",
                first_round, rounds
            )));
        }

        Ok(Self {
            first_round,
            rounds,
        })
    }

    /// Derives the layout from persisted matches, rejecting incomplete grids.
    pub fn from_matches(matches: &[TournamentMatch]) -> BracketResult<Self> {
        let mut by_round: BTreeMap<i32, Vec<i32>> = BTreeMap::new();
        for m in matches {
            by_round.entry(m.round).or_default().push(m.position);
        }

        let (&first_round, first_positions) = by_round
            .iter()
            .next()
            .ok_or_else(|| BracketError::InvalidBracket("bracket has no matches".to_string()))?;

        let entrants = u32::try_from(first_positions.len() * 2).map_err(|_| {
            BracketError::InvalidBracket("first round is too large".to_string())
        })?;
        let layout = Self::new(first_round, entrants)?;

        for round in layout.rounds() {
            let mut positions = by_round.remove(&round).unwrap_or_default();
            positions.sort_unstable();

            let expected = layout.matches_in_round(round).unwrap_or(0) as i32;
            if !positions.iter().copied().eq(0..expected) {
                return Err(BracketError::InvalidBracket(format!(
                    "round {} must hold positions 0..{}, found {:?}",
                    round, expected, positions
                )));
            }
        }

        if let Some(extra) = by_round.keys().next() {
            return Err(BracketError::InvalidBracket(format!(
                "unexpected round {} after the final",
                extra
            )));
        }

        Ok(layout)
    }

    pub fn first_round(&self) -> i32 {
        self.first_round
    }

    pub fn final_round(&self) -> i32 {
        self.first_round + self.rounds as i32 - 1
    }

    pub fn entrants(&self) -> u32 {
        1 << self.rounds
    }

    pub fn total_matches(&self) -> usize {
        self.entrants() as usize - 1
    }

    pub fn rounds(&self) -> RangeInclusive<i32> {
        self.first_round..=self.final_round()
    }

    pub fn matches_in_round(&self, round: i32) -> Option<u32> {
        if !self.rounds().contains(&round) {
            return None;
        }
        Some(1 << (self.final_round() - round))
    }

    pub fn contains(&self, round: i32, position: i32) -> bool {
        self.matches_in_round(round)
            .is_some_and(|count| position >= 0 && (position as u32) < count)
    }

    /// Flat index of a match when rounds are laid out back to back.
    pub fn index_of(&self, round: i32, position: i32) -> Option<usize> {
        if !self.contains(round, position) {
            return None;
        }
        let in_round = self.matches_in_round(round)? as usize;
        Some(self.entrants() as usize - 2 * in_round + position as usize)
    }

    /// Every (round, position) in round-ascending order.
    pub fn positions(&self) -> impl Iterator<Item = (i32, i32)> + '_ {
        self.rounds().flat_map(move |round| {
            let count = self.matches_in_round(round).unwrap_or(0) as i32;
            (0..count).map(move |position| (round, position))
        })
    }

    /// The slot a winner of `(round, position)` moves into, `None` for the final.
    pub fn next_slot(&self, round: i32, position: i32) -> BracketResult<Option<SlotRef>> {
        if !self.contains(round, position) {
            return Err(BracketError::NotFound);
        }
        if round == self.final_round() {
            return Ok(None);
        }

        Ok(Some(SlotRef {
            round: round + 1,
            position: position / 2,
            slot: Slot::for_position(position),
        }))
    }

    /// Validates `winner` against the match contestants and computes where they go.
    pub fn advance(
        &self,
        round: i32,
        position: i32,
        player1: Option<&str>,
        player2: Option<&str>,
        winner: &str,
    ) -> BracketResult<Option<Advancement>> {
        winning_slot(player1, player2, winner)?;

        Ok(self
            .next_slot(round, position)?
            .map(|target| Advancement {
                target,
                player: winner.to_string(),
            }))
    }

    pub fn round_name(&self, round: i32) -> String {
        match self.matches_in_round(round) {
            Some(1) => "Final".to_string(),
            Some(2) => "Semi Finals".to_string(),
            Some(4) => "Quarter Finals".to_string(),
            Some(n) => format!("Round of {}", n * 2),
            None => format!("Round {}", round),
        }
    }
}

/// Exact-name lookup of the winner among the two contestants.
///
/// An empty slot never matches, and a name found in neither slot is rejected.
pub fn winning_slot(
    player1: Option<&str>,
    player2: Option<&str>,
    winner: &str,
) -> BracketResult<Slot> {
    if player1 == Some(winner) {
        Ok(Slot::Player1)
    } else if player2 == Some(winner) {
        Ok(Slot::Player2)
    } else {
        Err(BracketError::InvalidWinner {
            winner: winner.to_string(),
        })
    }
}
