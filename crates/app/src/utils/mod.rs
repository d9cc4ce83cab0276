pub mod command_helpers;
pub mod logging;

pub use command_helpers::execute_action;
pub use logging::{error_label, log_action};
