pub mod actor;
pub mod bracket;
pub mod challenge;
pub mod participant;
pub mod pick;
pub mod tournament_match;

pub use actor::Actor;
pub use bracket::{Advancement, BracketLayout, Slot, SlotRef, winning_slot};
pub use challenge::{Challenge, NewChallenge};
pub use participant::Participant;
pub use pick::Pick;
pub use tournament_match::{MatchStatus, MatchUpdate, NewMatch, TournamentMatch};
