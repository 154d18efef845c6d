mod roster;

pub use roster::{RosterLoader, RosterLoaderError, RosterRecord};
