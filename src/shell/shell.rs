use log::{debug, error, warn};
use nix::unistd::ForkResult;
use std::env;
use std::error::Error;
use std::io::{self, IsTerminal, Write};

use crate::shell::executor::{self, fatal, fork_process, wait_child, EXIT_FAILURE};
use crate::shell::parser::Parser;
use crate::shell::readline::{ReadlineError, ReadlineManager};
use crate::shell::signals;
use crate::utils::config::Config;
use crate::utils::theme::{load_theme, Theme};

pub struct Shell<'a> {
    config: &'a Config,
    theme: Theme,
    readline: ReadlineManager<'a>,
    interactive: bool,
}

impl<'a> Shell<'a> {
    pub fn new(config: &'a Config) -> Result<Self, ReadlineError> {
        Ok(Self {
            config,
            theme: load_theme(&config.theme),
            readline: ReadlineManager::new(config)?,
            interactive: io::stdin().is_terminal(),
        })
    }

    pub fn run(&mut self) -> Result<(), Box<dyn Error>> {
        debug!("初始化 xvsh...");

        if self.interactive {
            signals::ignore_interactive_signals();
        }
        self.readline.load_history();

        if self.interactive {
            println!("{}", self.theme.welcome_message);
        }
        debug!("xvsh 准备就绪...");

        self.run_loop()?;
        if let Err(err) = self.readline.save_history() {
            error!("保存历史记录失败: {}", err);
        }

        debug!("退出 xvsh...");
        Ok(())
    }

    fn run_loop(&mut self) -> Result<(), Box<dyn Error>> {
        // 非终端输入时不显示提示符，方便脚本驱动
        let prompt = if self.interactive {
            self.theme.prompt.clone()
        } else {
            String::new()
        };

        loop {
            io::stdout().flush()?;

            match self.readline.readline(&prompt) {
                Ok(line) => {
                    if line.trim() == "exit" {
                        break;
                    }
                    self.handle_input(&line)?;
                }
                Err(ReadlineError::Eof) => {
                    debug!("接收到 EOF，退出 xvsh...");
                    break;
                }
                Err(ReadlineError::Interrupted) => {
                    warn!("接收到中断信号...");
                    eprintln!("{}", (self.theme.warning_style)("^C".to_string()));
                }
                Err(err) => {
                    error!("读取输入失败: {}", err);
                    self.report(&err.to_string());
                    break;
                }
            }
        }
        Ok(())
    }

    fn handle_input(&mut self, line: &str) -> Result<(), Box<dyn Error>> {
        if line.trim().is_empty() {
            return Ok(());
        }

        self.readline.add_history(line.to_string())?;

        if let Some(dir) = cd_target(line) {
            self.builtin_cd(dir);
            return Ok(());
        }

        // fork 前清空缓冲区，避免子进程重复输出
        io::stdout().flush()?;
        let status = match fork_process() {
            Ok(ForkResult::Child) => {
                signals::restore_default_signals();
                run_line(line, self.config.max_args)
            }
            Ok(ForkResult::Parent { child }) => {
                debug!("命令 {:?} 在进程 {} 中运行", line, child);
                wait_child(child)
            }
            Err(e) => {
                error!("fork 失败: {}", e);
                self.report(&format!("fork: {}", e));
                return Ok(());
            }
        };

        if status != 0 {
            self.report(&format!("exit status {}", status));
        }
        Ok(())
    }

    fn builtin_cd(&self, dir: &str) {
        let path = shellexpand::tilde(dir);
        if let Err(e) = env::set_current_dir(path.as_ref()) {
            warn!("cd {} 失败: {}", dir, e);
            self.report(&format!("cannot cd {}: {}", dir, e));
        }
    }

    fn report(&self, message: &str) {
        eprintln!(
            "{} {}",
            self.theme.error_symbol,
            (self.theme.error_style)(message.to_string())
        );
    }
}

/// Parses and runs one line in the process forked for it. Never returns.
fn run_line(line: &str, max_args: usize) -> ! {
    match Parser::with_max_args(line, max_args).parse_command() {
        Ok(command) => executor::run(command),
        Err(e) => fatal(EXIT_FAILURE, e),
    }
}

/// `cd` has to run in the shell itself: a child cannot move its parent.
fn cd_target(line: &str) -> Option<&str> {
    let mut words = line.split_whitespace();
    if words.next() != Some("cd") {
        return None;
    }
    Some(words.next().unwrap_or("~"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cd_target() {
        assert_eq!(cd_target("cd /tmp"), Some("/tmp"));
        assert_eq!(cd_target("  cd\tsrc  "), Some("src"));
        assert_eq!(cd_target("cd"), Some("~"));
        assert_eq!(cd_target("cdrom"), None);
        assert_eq!(cd_target("echo cd"), None);
    }
}
