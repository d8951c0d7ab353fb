//! Extension traits

mod depot;
mod result;
mod view_mode;

pub(crate) use depot::DepotExt as _;
pub(crate) use result::ResultExt as _;
pub(crate) use view_mode::{ViewMode, ViewModeExt as _};
