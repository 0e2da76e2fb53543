mod converse;
mod list_log_groups;
mod search_log_group;
mod wizard;

pub use converse::*;
pub use list_log_groups::*;
pub use search_log_group::*;
pub use wizard::*;
