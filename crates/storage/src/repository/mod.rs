pub mod challenge;
pub mod participant;
pub mod pick;
pub mod tournament_match;
