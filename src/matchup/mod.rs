mod matrix;
mod outcome;
mod strategy;

pub use matrix::MatchupError;
pub use matrix::Matrix;
pub use outcome::Outcome;
pub use strategy::Strategy;
