mod interval;
mod report;

pub use interval::Interval;
pub use report::Report;
