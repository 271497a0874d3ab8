pub mod apply;
pub mod launch;
pub mod list;
pub mod options;
pub mod validate;

pub use apply::apply_command;
pub use launch::LaunchCommand;
pub use list::list_command;
pub use options::options_command;
pub use validate::validate_command;
