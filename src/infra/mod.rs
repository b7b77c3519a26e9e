//! Инфраструктурный слой вокруг движка:
//! - генерация ID;
//! - RNG-реализации для движка;
//! - экспорт в CSV;
//! - маппинги между domain и API.

pub mod export;
pub mod ids;
pub mod mapping;
pub mod rng;
pub mod rng_seed;

pub use export::*;
pub use ids::*;
pub use mapping::*;
pub use rng::*;
pub use rng_seed::{RngSeed, RngStream};
