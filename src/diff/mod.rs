pub mod commit;
pub mod file;
pub mod hunk;
pub mod split;

pub use split::SplitDiff;
