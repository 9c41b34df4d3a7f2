//! 视图层模块
//!
//! 包含主渲染入口和各种视图组件

pub mod components;
pub mod layouts;
pub mod preview;

use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, List, ListItem, ListState, Paragraph, Tabs, Wrap},
};

use super::state::{App, AppMode, ConfirmAction, FieldKind, Tab};
use crate::models::QuestionFormat;
use crate::preview::build_preview;
use components::{render_dialog_framework, render_hint, render_input_widget};
use layouts::centered_rect;

/// 渲染 UI
pub fn render(frame: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // 标题
            Constraint::Length(3), // 标签页
            Constraint::Min(10),   // 内容
            Constraint::Length(3), // 帮助
        ])
        .split(frame.area());

    render_title(frame, app, chunks[0]);
    render_tabs(frame, app, chunks[1]);
    match app.tab {
        Tab::Preview => {
            let doc = build_preview(&app.question, &app.sort, &app.timer_text);
            let cursor = app.question.data_columns.get(app.preview_column).map(|c| c.key.as_str());
            preview::render_preview(frame, chunks[2], &doc, cursor);
        }
        _ => render_fields(frame, app, chunks[2]),
    }
    render_help(frame, app, chunks[3]);

    // 渲染弹窗
    match &app.mode {
        AppMode::Editing(_) => render_edit_dialog(frame, app),
        AppMode::Confirm(action) => render_confirm_dialog(frame, action),
        AppMode::Normal => {}
    }
}

fn render_title(frame: &mut Frame, app: &App, area: Rect) {
    let title = Line::from(vec![
        Span::styled(
            "GMAT 题目编辑器",
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(
            format!("  当前格式: {}", app.question.format.label()),
            Style::default().fg(Color::Gray),
        ),
    ]);
    frame.render_widget(
        Paragraph::new(title).block(Block::default().borders(Borders::ALL)),
        area,
    );
}

fn render_tabs(frame: &mut Frame, app: &App, area: Rect) {
    let titles: Vec<&str> = Tab::ALL
        .iter()
        .map(|t| t.title(app.question.format))
        .collect();
    let tabs = Tabs::new(titles)
        .select(app.tab.index())
        .block(Block::default().borders(Borders::ALL))
        .highlight_style(
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        );
    frame.render_widget(tabs, area);
}

fn render_fields(frame: &mut Frame, app: &App, area: Rect) {
    let items: Vec<ListItem> = app
        .fields
        .iter()
        .enumerate()
        .map(|(i, entry)| {
            let indent = "  ".repeat(entry.depth);
            let content = match entry.field.kind() {
                FieldKind::Add | FieldKind::Note => format!("{}{}", indent, entry.label),
                FieldKind::Toggle => format!("{}{}: <{}>", indent, entry.label, entry.value),
                FieldKind::Text if entry.value.is_empty() => {
                    format!("{}{}: (空)", indent, entry.label)
                }
                FieldKind::Text => format!("{}{}: {}", indent, entry.label, entry.value),
            };

            let style = if i == app.selected_index {
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD | Modifier::REVERSED)
            } else {
                match entry.field.kind() {
                    FieldKind::Add => Style::default().fg(Color::Green),
                    FieldKind::Note => Style::default().fg(Color::Gray),
                    _ => Style::default(),
                }
            };

            ListItem::new(Line::from(vec![Span::styled(content, style)]))
        })
        .collect();

    let list = List::new(items)
        .block(
            Block::default()
                .title(app.tab.title(app.question.format))
                .borders(Borders::ALL),
        )
        .highlight_style(Style::default().add_modifier(Modifier::REVERSED));

    let mut state = ListState::default();
    state.select(Some(app.selected_index));

    frame.render_stateful_widget(list, area, &mut state);
}

fn render_help(frame: &mut Frame, app: &App, area: Rect) {
    let help_text = match (&app.mode, app.tab) {
        (AppMode::Normal, Tab::Preview) => {
            "[h/l] 选择列  [Enter] 排序  [c] 取消排序  [Tab] 切换页  [x] 导出  [q] 退出"
        }
        (AppMode::Normal, _) => {
            "[Enter] 编辑/切换/添加  [d] 删除  [j/k] 导航  [Tab] 切换页  [x] 导出  [q] 退出"
        }
        (AppMode::Editing(_), _) => "[Enter] 保存  [Esc] 取消",
        (AppMode::Confirm(_), _) => "[y] 确认  [n] 取消",
    };

    let message = app.message.as_deref().unwrap_or("");
    let text = if message.is_empty() {
        help_text.to_string()
    } else {
        format!("{}  |  {}", help_text, message)
    };

    let help = Paragraph::new(text)
        .style(Style::default().fg(Color::Gray))
        .block(Block::default().borders(Borders::ALL));

    frame.render_widget(help, area);
}

fn render_edit_dialog(frame: &mut Frame, app: &App) {
    let area = centered_rect(70, 30, frame.area());
    let label = app
        .selected_field()
        .map(|e| e.label.as_str())
        .unwrap_or("编辑");
    let inner = render_dialog_framework(frame, area, "编辑字段");

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(3), Constraint::Length(1)])
        .split(inner);

    render_input_widget(frame, chunks[0], label, &app.input_buffer);
    render_hint(frame, chunks[1], "按 Enter 保存，Esc 取消");
}

fn render_confirm_dialog(frame: &mut Frame, action: &ConfirmAction) {
    let area = centered_rect(50, 20, frame.area());
    frame.render_widget(Clear, area);

    let message = match action {
        ConfirmAction::Remove(collection, index) => {
            format!("确认删除第 {} 个{}？", index + 1, collection.label())
        }
        ConfirmAction::SwitchFormat(format) => {
            let others: Vec<&str> = QuestionFormat::ALL
                .iter()
                .filter(|f| *f != format && **f != QuestionFormat::YesNoStatements)
                .map(|f| f.label())
                .collect();
            format!(
                "切换为 {}？\n{} 的内容将被清空",
                format.label(),
                others.join(" / ")
            )
        }
    };

    let dialog = Paragraph::new(format!("{}\n\n[y] 确认  [n] 取消", message))
        .style(Style::default().fg(Color::Red))
        .wrap(Wrap { trim: true })
        .block(Block::default().title("⚠️ 确认操作").borders(Borders::ALL));

    frame.render_widget(dialog, area);
}
