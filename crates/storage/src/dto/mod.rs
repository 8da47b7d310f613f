pub mod bracket;
pub mod challenge;
pub mod pick;
pub mod tournament_match;
