pub mod picks;
pub mod projection;
pub mod results;
pub mod setup;

#[cfg(test)]
pub(crate) mod testing;

pub use projection::BracketProjection;
