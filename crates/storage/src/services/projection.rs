use std::collections::HashMap;

use uuid::Uuid;

use crate::dto::bracket::{BracketView, MatchView, RoundView};
use crate::error::{BracketError, BracketResult};
use crate::models::{BracketLayout, Pick, Slot, TournamentMatch, winning_slot};

#[derive(Debug, Clone, PartialEq, Eq)]
struct Entry {
    match_id: Uuid,
    round: i32,
    position: i32,
    player1: Option<String>,
    player2: Option<String>,
    pick: Option<String>,
    winner: Option<String>,
    official_winner: Option<String>,
}

impl Entry {
    fn slot_mut(&mut self, slot: Slot) -> &mut Option<String> {
        match slot {
            Slot::Player1 => &mut self.player1,
            Slot::Player2 => &mut self.player2,
        }
    }
}

/// One participant's bracket derived from the official first round and their picks.
///
/// Only first-round contestants come from the stored matches; every later slot is
/// filled by folding picks forward round by round.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BracketProjection {
    challenge_id: Uuid,
    layout: BracketLayout,
    entries: Vec<Entry>,
    by_match: HashMap<Uuid, usize>,
}

impl BracketProjection {
    /// The bracket with no picks applied.
    pub fn new(matches: &[TournamentMatch]) -> BracketResult<Self> {
        let layout = BracketLayout::from_matches(matches)?;

        let challenge_id = matches[0].challenge_id;
        if matches.iter().any(|m| m.challenge_id != challenge_id) {
            return Err(BracketError::InvalidBracket(
                "matches belong to different challenges".to_string(),
            ));
        }

        let mut slots: Vec<Option<Entry>> = vec![None; layout.total_matches()];
        for m in matches {
            let idx = layout
                .index_of(m.round, m.position)
                .ok_or_else(|| BracketError::InvalidBracket("match outside layout".to_string()))?;

            let first_round = m.round == layout.first_round();
            slots[idx] = Some(Entry {
                match_id: m.match_id,
                round: m.round,
                position: m.position,
                player1: if first_round { m.player1.clone() } else { None },
                player2: if first_round { m.player2.clone() } else { None },
                pick: None,
                winner: None,
                official_winner: m.winner.clone(),
            });
        }

        let entries: Vec<Entry> = slots
            .into_iter()
            .collect::<Option<Vec<_>>>()
            .ok_or_else(|| BracketError::InvalidBracket("duplicate match slot".to_string()))?;
        let by_match = entries
            .iter()
            .enumerate()
            .map(|(idx, e)| (e.match_id, idx))
            .collect();

        Ok(Self {
            challenge_id,
            layout,
            entries,
            by_match,
        })
    }

    /// Rebuilds the whole bracket from a stored pick set.
    ///
    /// Picks for matches outside this bracket are ignored; picks that no longer name
    /// a projected contestant stay attached but do not advance.
    pub fn project(matches: &[TournamentMatch], picks: &[Pick]) -> BracketResult<Self> {
        let mut projection = Self::new(matches)?;

        for pick in picks {
            if let Some(&idx) = projection.by_match.get(&pick.match_id) {
                projection.entries[idx].pick = Some(pick.picked_player.clone());
            }
        }

        // Entries are stored round-ascending, so each round settles on a complete
        // previous round.
        for idx in 0..projection.entries.len() {
            projection.settle(idx);
        }

        Ok(projection)
    }

    /// Applies a single pick and re-settles everything downstream of it.
    pub fn apply_pick(&mut self, match_id: Uuid, winner: &str) -> BracketResult<()> {
        let idx = *self.by_match.get(&match_id).ok_or(BracketError::NotFound)?;

        let entry = &self.entries[idx];
        winning_slot(entry.player1.as_deref(), entry.player2.as_deref(), winner)?;

        self.entries[idx].pick = Some(winner.to_string());

        let mut current = Some(idx);
        while let Some(i) = current {
            current = self.settle(i);
        }

        Ok(())
    }

    pub fn contains_match(&self, match_id: Uuid) -> bool {
        self.by_match.contains_key(&match_id)
    }

    /// Recomputes the effective winner at `idx` and pushes it into the next round.
    /// Returns the downstream index when its slot changed.
    fn settle(&mut self, idx: usize) -> Option<usize> {
        let entry = &mut self.entries[idx];
        entry.winner = entry
            .pick
            .as_deref()
            .filter(|pick| {
                winning_slot(entry.player1.as_deref(), entry.player2.as_deref(), pick).is_ok()
            })
            .map(str::to_string);

        let winner = entry.winner.clone();
        let target = self.layout.next_slot(entry.round, entry.position).ok()??;
        let next = self.layout.index_of(target.round, target.position)?;

        let slot = self.entries[next].slot_mut(target.slot);
        if *slot == winner {
            return None;
        }
        *slot = winner;
        Some(next)
    }

    pub fn view(&self, locked: bool) -> BracketView {
        let rounds = self
            .layout
            .rounds()
            .map(|round| RoundView {
                round,
                name: self.layout.round_name(round),
                matches: self
                    .entries
                    .iter()
                    .filter(|e| e.round == round)
                    .map(|e| MatchView {
                        match_id: e.match_id,
                        round: e.round,
                        position: e.position,
                        player1: e.player1.clone(),
                        player2: e.player2.clone(),
                        pick: e.pick.clone(),
                        winner: e.winner.clone(),
                        stale: e.pick.is_some() && e.winner.is_none(),
                        official_winner: e.official_winner.clone(),
                        selectable: !locked && e.player1.is_some() && e.player2.is_some(),
                    })
                    .collect(),
            })
            .collect();

        BracketView {
            challenge_id: self.challenge_id,
            locked,
            rounds,
        }
    }
}
