mod roster;

pub use roster::Roster;
