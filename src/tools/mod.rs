//! Offline tools — catalog, unit converter, random numbers, favorites.
//!
//! Everything here runs locally without an LLM or database. The HTTP layer
//! in `routes::tools` exposes the catalog, converter and generator.

pub mod catalog;
pub mod convert;
pub mod favorites;
pub mod random;

pub use catalog::{ToolCategory, ToolInfo, all_tools, default_favorites, find_tool, tools_in};
pub use convert::{ConvertError, Unit, UnitCategory, convert, convert_in};
pub use favorites::{FAVORITES_KEY, Favorites};
pub use random::{RandomError, random_in_range};
