//! Grid mask and map loading

pub mod map_loader;
pub mod mask;

pub use map_loader::{load_checked, InMemoryMaps, MapSource};
pub use mask::CellMask;
