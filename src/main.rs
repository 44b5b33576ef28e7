use log::debug;
use std::error::Error;

use crate::shell::Shell;
use crate::utils::config::Config;
use crate::utils::log::init_logger;

mod shell;
mod utils;

fn main() -> Result<(), Box<dyn Error>> {
    let config = Config::new();
    init_logger(&config);
    debug!("配置加载成功, 历史文件 {}", config.history_file.display());

    let mut shell = Shell::new(&config)?;
    shell.run()
}
