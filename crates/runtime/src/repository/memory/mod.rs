mod hero;

pub use hero::InMemoryHeroRepository;
