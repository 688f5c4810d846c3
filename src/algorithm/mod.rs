/// Build orchestration, configuration, and collaborator traits
pub mod builder;
/// Memoization of nearest-element queries
pub mod cache;
/// Canvas assembly from a color grid
pub mod compositor;
/// Element tiles and the ordered element library
pub mod library;
/// Nearest-color search strategies
pub mod matcher;
