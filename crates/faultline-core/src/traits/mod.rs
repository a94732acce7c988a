pub mod elaborator;
pub mod pattern_store;

pub use elaborator::Elaborator;
pub use pattern_store::PatternStore;
