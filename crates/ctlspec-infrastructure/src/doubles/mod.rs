//! Double factories

pub mod in_memory;

pub use in_memory::InMemoryDoubleFactory;
