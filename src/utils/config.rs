use dotenv::dotenv;
use rustyline::EditMode;
use std::env;
use std::fs;
use std::path::PathBuf;

use crate::shell::parser::ast::MAX_ARGS;

pub struct Config {
    pub name: String,
    pub theme: String,
    pub history_file: PathBuf,
    pub editor_mode: String,
    pub logger_level: String,
    pub logger_dir: PathBuf,
    pub max_args: usize,
}

impl Config {
    fn get_config_dir() -> PathBuf {
        if let Ok(home) = env::var("HOME") {
            PathBuf::from(home).join(".config/xvsh")
        } else {
            env::temp_dir().join("xvsh")
        }
    }

    fn default() -> Self {
        let config_dir = Self::get_config_dir();
        Config {
            name: String::from(env!("CARGO_PKG_NAME")),
            theme: String::from("default"),
            history_file: config_dir.join(".xvsh_history"),
            editor_mode: String::from("vi"),
            logger_level: String::from("warn"),
            logger_dir: config_dir.join("logs"),
            max_args: MAX_ARGS,
        }
    }

    pub fn new() -> Self {
        // 优先加载环境变量
        if cfg!(debug_assertions) {
            dotenv::from_filename(".env.development").ok();
        } else {
            dotenv().ok();
        }

        let mut config = Config::default();

        if let Ok(theme) = env::var("XVSH_THEME") {
            config.theme = theme;
        }

        if let Ok(editor) = env::var("XVSH_EDITOR") {
            config.editor_mode = editor;
        }

        if let Ok(history) = env::var("XVSH_HISTORY") {
            config.history_file = PathBuf::from(history);
        }

        if let Ok(level) = env::var("XVSH_LOG") {
            config.logger_level = level;
        }

        if let Ok(dir) = env::var("XVSH_LOG_DIR") {
            config.logger_dir = PathBuf::from(dir);
        }

        if let Ok(max_args) = env::var("XVSH_MAX_ARGS") {
            config.max_args = parse_max_args(&max_args);
        }

        // 确保历史文件目录存在，失败时只是没有历史记录
        if let Some(parent) = config.history_file.parent() {
            let _ = fs::create_dir_all(parent);
        }

        config
    }

    pub fn get_edit_mode(&self) -> EditMode {
        match self.editor_mode.to_lowercase().as_str() {
            "emacs" => EditMode::Emacs,
            _ => EditMode::Vi,
        }
    }
}

/// A stage needs at least one word plus the terminator slot.
fn parse_max_args(value: &str) -> usize {
    match value.trim().parse::<usize>() {
        Ok(n) if n >= 2 => n,
        _ => MAX_ARGS,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_max_args() {
        assert_eq!(parse_max_args("16"), 16);
        assert_eq!(parse_max_args(" 2 "), 2);
        assert_eq!(parse_max_args("1"), MAX_ARGS);
        assert_eq!(parse_max_args("lots"), MAX_ARGS);
    }

    #[test]
    fn test_edit_mode() {
        let mut config = Config::default();
        assert!(matches!(config.get_edit_mode(), EditMode::Vi));
        config.editor_mode = String::from("Emacs");
        assert!(matches!(config.get_edit_mode(), EditMode::Emacs));
    }
}
