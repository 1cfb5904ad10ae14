//! InMemory Repository 実装

mod roster;

pub use roster::InMemoryRosterRepository;
