mod curve;
mod sweeper;
mod table;

pub use curve::Curve;
pub use sweeper::Sweep;
pub use table::Table;
