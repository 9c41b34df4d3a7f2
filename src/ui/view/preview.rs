//! 预览页：把 `PreviewDoc` 画到终端

use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Paragraph, Row, Table, Wrap},
};

use crate::preview::{
    GridPreview, HeaderCell, PreviewBody, PreviewDoc, StatementsPreview, SufficiencyPreview,
};

pub fn render_preview(frame: &mut Frame, area: Rect, doc: &PreviewDoc, cursor: Option<&str>) {
    let block = Block::default().title("题目预览").borders(Borders::ALL);
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(2), Constraint::Min(1)])
        .split(inner);

    render_header(frame, chunks[0], doc);

    match &doc.body {
        PreviewBody::Placeholder(text) => frame.render_widget(
            Paragraph::new(*text).style(Style::default().fg(Color::Gray)),
            chunks[1],
        ),
        PreviewBody::Statements(body) => render_statements(frame, chunks[1], body, cursor),
        PreviewBody::Grid(body) => render_grid(frame, chunks[1], body),
        PreviewBody::Sufficiency(body) => render_sufficiency(frame, chunks[1], body),
    }
}

fn render_header(frame: &mut Frame, area: Rect, doc: &PreviewDoc) {
    let mut lines = vec![Line::from(vec![
        Span::styled(
            doc.title.clone(),
            Style::default().add_modifier(Modifier::BOLD),
        ),
        Span::styled(
            format!("    剩余时间: {}", doc.timer),
            Style::default().fg(Color::Red),
        ),
    ])];
    if let Some(description) = &doc.description {
        lines.push(Line::styled(
            description.clone(),
            Style::default().fg(Color::Gray),
        ));
    }
    frame.render_widget(Paragraph::new(lines), area);
}

fn header_cell(header: &HeaderCell, cursor: Option<&str>) -> Cell<'static> {
    let text = match header.sort {
        Some(order) => format!("{} {}", header.label, order.arrow()),
        None => header.label.clone(),
    };
    let mut style = Style::default().add_modifier(Modifier::BOLD);
    if cursor == Some(header.key.as_str()) {
        style = style.fg(Color::Yellow).add_modifier(Modifier::UNDERLINED);
    }
    Cell::from(text).style(style)
}

fn render_statements(
    frame: &mut Frame,
    area: Rect,
    body: &StatementsPreview,
    cursor: Option<&str>,
) {
    let halves = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(55), Constraint::Percentage(45)])
        .split(area);

    let left = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Percentage(40), Constraint::Percentage(60)])
        .split(halves[0]);

    let context = body.context.clone().unwrap_or_default();
    frame.render_widget(
        Paragraph::new(context).wrap(Wrap { trim: true }),
        left[0],
    );

    let header = Row::new(body.headers.iter().map(|h| header_cell(h, cursor)));
    let rows = body
        .rows
        .iter()
        .map(|cells| Row::new(cells.iter().cloned().map(Cell::from)));
    let widths = vec![Constraint::Fill(1); body.headers.len()];
    let table = Table::new(rows, widths)
        .header(header)
        .block(Block::default().borders(Borders::TOP));
    frame.render_widget(table, left[1]);

    let mut lines = vec![Line::from(body.instructions.clone()), Line::from("")];
    for text in &body.statements {
        lines.push(Line::from(vec![
            Span::styled("( ) Yes  ( ) No   ", Style::default().fg(Color::Cyan)),
            Span::raw(text.clone()),
        ]));
        lines.push(Line::from(""));
    }
    frame.render_widget(
        Paragraph::new(lines)
            .wrap(Wrap { trim: true })
            .block(Block::default().borders(Borders::LEFT)),
        halves[1],
    );
}

fn render_grid(frame: &mut Frame, area: Rect, body: &GridPreview) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(2), Constraint::Min(1)])
        .split(area);

    frame.render_widget(
        Paragraph::new(body.instructions.clone()).wrap(Wrap { trim: true }),
        chunks[0],
    );

    let header = Row::new(
        std::iter::once(Cell::from(""))
            .chain(body.columns.iter().cloned().map(Cell::from)),
    )
    .style(Style::default().add_modifier(Modifier::BOLD));
    let rows = body.options.iter().map(|option| {
        Row::new(
            std::iter::once(Cell::from(option.label.clone()))
                .chain(option.cells.iter().map(|_| Cell::from("( )"))),
        )
    });
    let widths = vec![Constraint::Fill(1); body.columns.len() + 1];
    frame.render_widget(Table::new(rows, widths).header(header), chunks[1]);
}

fn render_sufficiency(frame: &mut Frame, area: Rect, body: &SufficiencyPreview) {
    let mut lines = vec![Line::from(body.question_text.clone()), Line::from("")];
    lines.extend(body.statements.iter().map(|s| Line::from(s.clone())));
    lines.push(Line::from(""));
    lines.extend(body.options.iter().map(|o| {
        Line::from(vec![
            Span::styled("( ) ", Style::default().fg(Color::Cyan)),
            Span::raw(o.clone()),
        ])
    }));
    frame.render_widget(Paragraph::new(lines).wrap(Wrap { trim: true }), area);
}
