//! Mapping between the layout flag and its persisted string.
//!
//! `true` is the grid layout and is stored as `"grid"`; `false` is the list
//! layout and is stored as `"list"`. On load only `"list"` selects the list
//! layout: any other value, or no value, means grid.

pub const GRID: &str = "grid";
pub const LIST: &str = "list";

/// Layout flag for a stored value.
pub fn from_stored(value: Option<&str>) -> bool {
    value != Some(LIST)
}

/// Stored value for a layout flag.
pub fn to_stored(grid: bool) -> &'static str {
    if grid {
        GRID
    } else {
        LIST
    }
}
