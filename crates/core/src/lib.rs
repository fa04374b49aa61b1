//! Core game logic. Keep this crate free of IO and platform concerns.

pub mod cards;
pub mod config;
pub mod deck;
pub mod events;
pub mod game;
pub mod pairs;
pub mod rng;
pub mod scoring;
pub mod state;
pub mod sync;

pub use cards::*;
pub use config::*;
pub use deck::*;
pub use events::*;
pub use game::*;
pub use pairs::*;
pub use rng::*;
pub use scoring::*;
pub use state::*;
pub use sync::*;
