//! Challenge store implementations

pub mod memory;

pub use memory::InMemoryChallengeStore;
