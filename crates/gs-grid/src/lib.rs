//! `gs-grid`: the spatial side of the engine.
//!
//! # Crate layout
//!
//! | Module        | Contents                                                   |
//! |---------------|------------------------------------------------------------|
//! | [`grid`]      | `GridWorld`, `Topology`, `Connectivity`                    |
//! | [`search`]    | `Pathfinder` trait, `BreadthFirst`, `DepthFirst`, `Path`   |
//! | [`pheromone`] | `PheromoneField` (decaying scalar field)                   |
//! | [`error`]     | `GridError`, `SearchError`                                 |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                       |
//! |---------|--------------------------------------------------------------|
//! | `serde` | Derives `Serialize`/`Deserialize` on public enums.           |

pub mod error;
pub mod grid;
pub mod pheromone;
pub mod search;


pub use error::{GridError, GridResult, SearchError, SearchResult};
pub use grid::{Connectivity, GridWorld, Topology};
pub use pheromone::PheromoneField;
pub use search::{BreadthFirst, DepthFirst, Path, Pathfinder, SearchQuery, SearchStrategy};
