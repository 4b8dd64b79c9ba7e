use std::convert::Infallible;

use sarge::ArgumentType;

use crate::cli::{ColorList, RowSelection};

impl ArgumentType for RowSelection {
    type Error = Infallible;

    const REPEATABLE: bool = true;

    fn from_value(val: Option<&str>) -> sarge::ArgResult<Self> {
        // A bare `--rows` selects nothing, which renders every row.
        Some(Ok(val.map(RowSelection::parse).unwrap_or_default()))
    }

    fn default_value() -> Option<Self> {
        Some(RowSelection::default())
    }
}

impl ArgumentType for ColorList {
    type Error = Infallible;

    const REPEATABLE: bool = true;

    fn from_value(val: Option<&str>) -> sarge::ArgResult<Self> {
        Some(Ok(val.map(ColorList::parse).unwrap_or_default()))
    }

    fn default_value() -> Option<Self> {
        Some(ColorList::default())
    }
}
