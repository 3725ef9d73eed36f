pub mod user;
pub mod commit;
pub mod snapshot;
pub mod scores;
pub mod analysis;
pub mod rating;

pub use user::*;
pub use commit::*;
pub use snapshot::*;
pub use scores::*;
pub use analysis::*;
pub use rating::*;

#[cfg(test)]
pub(crate) mod fixtures;
