pub mod seaorm;

pub use seaorm::SeaOrmPrincipalRepository;
