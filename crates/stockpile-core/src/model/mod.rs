pub mod item;

pub use item::{Item, ParseEnumError, SortMode};
