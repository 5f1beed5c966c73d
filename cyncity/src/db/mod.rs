pub mod backends;
pub mod seed;
pub mod traits;

pub use backends::memory::MemoryBackend;
pub use traits::*;
