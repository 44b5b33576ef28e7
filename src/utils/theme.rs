use colored::Colorize;

pub struct Theme {
    pub prompt: String,
    pub error_symbol: String,
    pub welcome_message: String,
    pub error_style: Box<dyn Fn(String) -> String>,
    pub warning_style: Box<dyn Fn(String) -> String>,
}

impl Default for Theme {
    fn default() -> Self {
        Theme {
            prompt: "xvsh$ ".bright_cyan().to_string(),
            error_symbol: "✗".red().to_string(),
            welcome_message: "xvsh: pipes and redirections, nothing else. Ctrl-D to leave."
                .bright_blue()
                .to_string(),
            error_style: Box::new(|s| s.bright_red().to_string()),
            warning_style: Box::new(|s| s.yellow().to_string()),
        }
    }
}

pub fn load_theme(theme_name: &str) -> Theme {
    match theme_name {
        "plain" => Theme {
            prompt: "xvsh$ ".to_string(),
            error_symbol: "x".to_string(),
            welcome_message: "xvsh: pipes and redirections, nothing else. Ctrl-D to leave."
                .to_string(),
            error_style: Box::new(|s| s),
            warning_style: Box::new(|s| s),
        },
        _ => Theme::default(),
    }
}
