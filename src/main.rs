mod config;
mod edit;
mod error;
mod export;
mod logging;
mod models;
mod preview;
mod sorting;
mod ui;

use std::io;

use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::prelude::*;
use tracing::info;

use crate::config::{config_path, data_dir, load_config};
use crate::error::BuilderError;
use crate::models::{Question, QuestionFormat};
use crate::ui::{App, render};

fn main() -> Result<(), BuilderError> {
    // 配置文件 (~/.config/gmat-builder/config.toml)
    let config = load_config(&config_path()?)?;

    // 日志写入 ~/.local/share/gmat-builder/gmat-builder.log
    let _guard = logging::init(&data_dir()?, &config.log_level)?;
    info!(?config, "启动题目编辑器");

    // 示例题目
    let mut question = Question::example();
    if config.initial_format != QuestionFormat::YesNoStatements {
        question = question.switch_format(config.initial_format);
    }

    // 创建应用状态
    let mut app = App::new(question, &config);

    // 设置终端
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // 主循环
    let result = run_app(&mut terminal, &mut app);

    // 恢复终端
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    info!("退出题目编辑器");
    result
}

fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
) -> Result<(), BuilderError> {
    loop {
        terminal.draw(|f| render(f, app))?;

        if let crossterm::event::Event::Key(key) = crossterm::event::read()? {
            if key.kind == crossterm::event::KeyEventKind::Press
                && ui::handle_key_event(app, key.code)
            {
                break;
            }
        }
    }
    Ok(())
}
