mod executor;
mod process;

pub use executor::run;
pub use process::{fatal, fork_process, wait_child, EXIT_FAILURE};
