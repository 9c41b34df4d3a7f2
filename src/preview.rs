//! 预览组合
//!
//! 把题目和排序配置映射为与具体终端控件无关的显示树，
//! `ui::view` 只负责把它画出来。

use crate::models::{
    ColumnType, DEFAULT_SELECTION_INSTRUCTIONS, DEFAULT_STATEMENT_INSTRUCTIONS, DataColumn,
    DataRow, FormatBody, Question,
};
use crate::sorting::{SortConfig, SortOrder, sorted_rows};

pub const PLACEHOLDER: &str = "配置题目内容后即可预览";

/// 完整的预览文档
#[derive(Debug, Clone, PartialEq)]
pub struct PreviewDoc {
    pub title: String,
    pub description: Option<String>,
    pub timer: String,
    pub body: PreviewBody,
}

#[derive(Debug, Clone, PartialEq)]
pub enum PreviewBody {
    Placeholder(&'static str),
    Statements(StatementsPreview),
    Grid(GridPreview),
    Sufficiency(SufficiencyPreview),
}

#[derive(Debug, Clone, PartialEq)]
pub struct HeaderCell {
    pub key: String,
    pub label: String,
    pub sort: Option<SortOrder>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct StatementsPreview {
    pub context: Option<String>,
    pub headers: Vec<HeaderCell>,
    pub rows: Vec<Vec<String>>,
    pub instructions: String,
    pub statements: Vec<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct GridRow {
    pub label: String,
    pub cells: Vec<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct GridPreview {
    pub instructions: String,
    pub columns: Vec<String>,
    pub options: Vec<GridRow>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SufficiencyPreview {
    pub question_text: String,
    pub statements: Vec<String>,
    pub options: Vec<String>,
}

/// 当前格式的内容是否足以生成预览
pub fn is_ready(question: &Question) -> bool {
    match question.body() {
        FormatBody::YesNoStatements {
            columns,
            rows,
            statements,
            ..
        } => !columns.is_empty() && !rows.is_empty() && !statements.is_empty(),
        FormatBody::MultiColumnSelection { columns, options } => {
            !columns.is_empty() && !options.is_empty()
        }
        FormatBody::DataSufficiency {
            question_text,
            options,
            ..
        } => !question_text.trim().is_empty() && !options.is_empty(),
    }
}

/// 单元格显示文本：百分比列在原值后追加 `%`，缺失的单元格为空
pub fn display_cell(row: &DataRow, column: &DataColumn) -> String {
    match row.get(&column.key) {
        None => String::new(),
        Some(value) if column.column_type == ColumnType::Percentage => {
            format!("{}%", value.raw())
        }
        Some(value) => value.raw(),
    }
}

pub fn build_preview(question: &Question, sort: &SortConfig, timer: &str) -> PreviewDoc {
    let body = if is_ready(question) {
        build_body(question, sort)
    } else {
        PreviewBody::Placeholder(PLACEHOLDER)
    };

    PreviewDoc {
        title: question.title.clone(),
        description: (!question.description.is_empty()).then(|| question.description.clone()),
        timer: timer.to_string(),
        body,
    }
}

fn or_default(text: &str, fallback: &str) -> String {
    if text.is_empty() {
        fallback.to_string()
    } else {
        text.to_string()
    }
}

fn build_body(question: &Question, sort: &SortConfig) -> PreviewBody {
    match question.body() {
        FormatBody::YesNoStatements {
            columns,
            rows,
            statements,
            context_description,
        } => PreviewBody::Statements(StatementsPreview {
            context: (!context_description.is_empty()).then(|| context_description.to_string()),
            headers: columns
                .iter()
                .map(|c| HeaderCell {
                    key: c.key.clone(),
                    label: c.label.clone(),
                    sort: sort.marker(&c.key),
                })
                .collect(),
            rows: sorted_rows(rows, sort)
                .into_iter()
                .map(|row| columns.iter().map(|c| display_cell(row, c)).collect())
                .collect(),
            instructions: or_default(&question.instructions, DEFAULT_STATEMENT_INSTRUCTIONS),
            statements: statements
                .iter()
                .enumerate()
                .map(|(i, s)| or_default(&s.text, &format!("Statement {} text will appear here...", i + 1)))
                .collect(),
        }),
        FormatBody::MultiColumnSelection { columns, options } => PreviewBody::Grid(GridPreview {
            instructions: or_default(&question.instructions, DEFAULT_SELECTION_INSTRUCTIONS),
            columns: columns.to_vec(),
            options: options
                .iter()
                .map(|o| GridRow {
                    label: o.label.clone(),
                    // 按位置对齐：多出的忽略，不足的补空
                    cells: (0..columns.len())
                        .map(|i| o.columns.get(i).cloned().unwrap_or_default())
                        .collect(),
                })
                .collect(),
        }),
        FormatBody::DataSufficiency {
            question_text,
            statements,
            options,
        } => PreviewBody::Sufficiency(SufficiencyPreview {
            question_text: question_text.to_string(),
            statements: statements
                .iter()
                .enumerate()
                .map(|(i, s)| format!("({}) {}", i + 1, s.text))
                .collect(),
            options: options.iter().map(|o| o.text.clone()).collect(),
        }),
    }
}
