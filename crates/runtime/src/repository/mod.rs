//! Hero persistence.
//!
//! [`FileHeroRepository`] writes one bincode file per hero;
//! [`InMemoryHeroRepository`] keeps records in memory for tests.

mod error;
mod file;
mod memory;
mod traits;

pub use error::{RepositoryError, Result};
pub use file::FileHeroRepository;
pub use memory::InMemoryHeroRepository;
pub use traits::HeroRepository;
