mod equilibrium;
mod game;

pub use equilibrium::Equilibrium;
pub use game::Game;
pub use game::Pin;
pub use game::SolveError;
