mod hero;

pub use hero::FileHeroRepository;
