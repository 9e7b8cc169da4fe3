// ============================================================================
// Storage Module
// Repository implementations
// ============================================================================

mod memory;

pub use memory::InMemoryRepository;
