//! Session orchestration for the inventory rules.
//!
//! This crate wires the deterministic rules of `inventory-core` to the world
//! outside: it owns the player registry, publishes replication commands on an
//! event bus, persists heroes and sets up logging. Consumers embed
//! [`Session`] and forward [`Event::Replicated`] events between peers.
//!
//! Modules are organized by responsibility:
//! - [`session`] hosts the per-peer session
//! - [`api`] exposes the error types downstream clients interact with
//! - [`events`] provides the topic-based event bus
//! - [`repository`] stores packed heroes
//! - [`runtime`] and [`logging`] configure the host process
pub mod api;
pub mod events;
pub mod logging;
pub mod repository;
pub mod runtime;
pub mod session;

pub use api::{Result, RuntimeError};
pub use events::{Event, EventBus, SessionEvent, Topic};
pub use logging::init_logging;
pub use repository::{
    FileHeroRepository, HeroRepository, InMemoryHeroRepository, RepositoryError,
};
pub use runtime::{RuntimeConfig, default_save_dir};
pub use session::Session;
