mod check;
mod context;
mod explain;
mod init;

pub use check::run_check;
pub use explain::run_explain;
pub use init::{generate_config_template, run_init, run_init_impl};
