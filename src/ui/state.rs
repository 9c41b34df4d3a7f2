//! App 状态定义 (Model)
//!
//! 包含应用状态结构体及相关枚举

use std::path::PathBuf;

use crate::config::AppConfig;
use crate::edit::{Collection, ColumnField, Edit, StatementField, SufficiencyOptionField};
use crate::models::{FormatBody, Question, QuestionFormat};
use crate::sorting::SortConfig;

/// 应用状态
pub struct App {
    pub question: Question,
    pub sort: SortConfig,
    pub tab: Tab,
    pub selected_index: usize,
    pub fields: Vec<FieldEntry>,
    pub mode: AppMode,
    pub input_buffer: String,
    pub message: Option<String>,
    pub preview_column: usize, // 预览表格中光标所在列
    pub export_dir: PathBuf,
    pub timer_text: String,
}

/// 标签页
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tab {
    Basic,
    Data,
    Content,
    Preview,
}

impl Tab {
    pub const ALL: [Tab; 4] = [Tab::Basic, Tab::Data, Tab::Content, Tab::Preview];

    pub fn index(self) -> usize {
        Self::ALL.iter().position(|t| *t == self).unwrap_or(0)
    }

    pub fn next(self) -> Self {
        Self::ALL[(self.index() + 1) % Self::ALL.len()]
    }

    pub fn prev(self) -> Self {
        Self::ALL[(self.index() + Self::ALL.len() - 1) % Self::ALL.len()]
    }

    /// 标签页标题随格式变化
    pub fn title(self, format: QuestionFormat) -> &'static str {
        match (self, format) {
            (Tab::Basic, _) => "基本信息",
            (Tab::Data, QuestionFormat::DataSufficiency) => "题目内容",
            (Tab::Data, _) => "数据表",
            (Tab::Content, QuestionFormat::YesNoStatements) => "陈述",
            (Tab::Content, QuestionFormat::MultiColumnSelection) => "选择选项",
            (Tab::Content, QuestionFormat::DataSufficiency) => "答案选项",
            (Tab::Preview, _) => "预览",
        }
    }
}

/// 应用模式
#[derive(Debug, Clone, PartialEq)]
pub enum AppMode {
    Normal,
    Editing(FieldRef),
    Confirm(ConfirmAction),
}

/// 确认操作类型
#[derive(Debug, Clone, PartialEq)]
pub enum ConfirmAction {
    Remove(Collection, usize),
    SwitchFormat(QuestionFormat),
}

/// 可编辑字段的位置
#[derive(Debug, Clone, PartialEq)]
pub enum FieldRef {
    Format,
    Title,
    Description,
    ContextDescription,
    Instructions,
    QuestionText,
    Add(Collection),
    ColumnLabel(usize),
    ColumnKey(usize),
    ColumnType(usize),
    Cell { row: usize, key: String },
    StatementText(usize),
    StatementAnswer(usize),
    SelectionColumn(usize),
    OptionLabel(usize),
    OptionCell { option: usize, column: usize },
    SufficiencyStatement(usize),
    SufficiencyOptionText(usize),
    SufficiencyOptionCorrect(usize),
    Note,
}

/// 字段的交互方式
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Text,
    Toggle,
    Add,
    Note,
}

impl FieldRef {
    pub fn kind(&self) -> FieldKind {
        match self {
            FieldRef::Format
            | FieldRef::ColumnType(_)
            | FieldRef::StatementAnswer(_)
            | FieldRef::SufficiencyOptionCorrect(_) => FieldKind::Toggle,
            FieldRef::Add(_) => FieldKind::Add,
            FieldRef::Note => FieldKind::Note,
            _ => FieldKind::Text,
        }
    }

    /// 字段所属的集合实体，用于删除
    pub fn owner(&self) -> Option<(Collection, usize)> {
        match self {
            FieldRef::ColumnLabel(i) | FieldRef::ColumnKey(i) | FieldRef::ColumnType(i) => {
                Some((Collection::Columns, *i))
            }
            FieldRef::Cell { row, .. } => Some((Collection::Rows, *row)),
            FieldRef::StatementText(i) | FieldRef::StatementAnswer(i) => {
                Some((Collection::Statements, *i))
            }
            FieldRef::SelectionColumn(i) => Some((Collection::SelectionColumns, *i)),
            FieldRef::OptionLabel(i) | FieldRef::OptionCell { option: i, .. } => {
                Some((Collection::SelectionOptions, *i))
            }
            FieldRef::SufficiencyStatement(i) => Some((Collection::SufficiencyStatements, *i)),
            FieldRef::SufficiencyOptionText(i) | FieldRef::SufficiencyOptionCorrect(i) => {
                Some((Collection::SufficiencyOptions, *i))
            }
            _ => None,
        }
    }

    /// 文本字段提交输入后的编辑命令
    pub fn commit(&self, value: String) -> Option<Edit> {
        let edit = match self {
            FieldRef::Title => Edit::SetTitle(value),
            FieldRef::Description => Edit::SetDescription(value),
            FieldRef::ContextDescription => Edit::SetContextDescription(value),
            FieldRef::Instructions => Edit::SetInstructions(value),
            FieldRef::QuestionText => Edit::SetQuestionText(value),
            FieldRef::ColumnLabel(index) => Edit::UpdateColumn {
                index: *index,
                field: ColumnField::Label(value),
            },
            FieldRef::ColumnKey(index) => Edit::UpdateColumn {
                index: *index,
                field: ColumnField::Key(value),
            },
            FieldRef::Cell { row, key } => Edit::UpdateCell {
                row: *row,
                key: key.clone(),
                value,
            },
            FieldRef::StatementText(index) => Edit::UpdateStatement {
                index: *index,
                field: StatementField::Text(value),
            },
            FieldRef::SelectionColumn(index) => Edit::RenameSelectionColumn {
                index: *index,
                name: value,
            },
            FieldRef::OptionLabel(index) => Edit::UpdateSelectionLabel {
                index: *index,
                label: value,
            },
            FieldRef::OptionCell { option, column } => Edit::UpdateSelectionCell {
                option: *option,
                column: *column,
                value,
            },
            FieldRef::SufficiencyStatement(index) => Edit::UpdateSufficiencyStatement {
                index: *index,
                text: value,
            },
            FieldRef::SufficiencyOptionText(index) => Edit::UpdateSufficiencyOption {
                index: *index,
                field: SufficiencyOptionField::Text(value),
            },
            _ => return None,
        };
        Some(edit)
    }
}

/// 编辑列表中的一行
#[derive(Debug, Clone, PartialEq)]
pub struct FieldEntry {
    pub depth: usize,
    pub field: FieldRef,
    pub label: String,
    pub value: String,
}

impl FieldEntry {
    fn new(depth: usize, field: FieldRef, label: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            depth,
            field,
            label: label.into(),
            value: value.into(),
        }
    }

    fn add(collection: Collection) -> Self {
        Self::new(
            0,
            FieldRef::Add(collection),
            format!("[+] 添加{}", collection.label()),
            "",
        )
    }
}

fn yes_no(flag: bool) -> &'static str {
    if flag { "正确" } else { "错误" }
}

impl App {
    /// 创建新的应用实例
    pub fn new(question: Question, config: &AppConfig) -> Self {
        let mut app = Self {
            question,
            sort: SortConfig::none(),
            tab: Tab::Basic,
            selected_index: 0,
            fields: Vec::new(),
            mode: AppMode::Normal,
            input_buffer: String::new(),
            message: None,
            preview_column: 0,
            export_dir: config.resolved_export_dir(),
            timer_text: config.timer_text.clone(),
        };
        app.refresh_fields();
        app
    }

    /// 刷新当前标签页的字段列表
    pub fn refresh_fields(&mut self) {
        self.fields = build_fields(&self.question, self.tab);

        // 确保选中索引有效
        if self.fields.is_empty() {
            self.selected_index = 0;
        } else if self.selected_index >= self.fields.len() {
            self.selected_index = self.fields.len() - 1;
        }

        let columns = self.question.data_columns.len();
        if self.preview_column >= columns {
            self.preview_column = columns.saturating_sub(1);
        }
    }

    /// 获取当前选中的字段
    pub fn selected_field(&self) -> Option<&FieldEntry> {
        self.fields.get(self.selected_index)
    }
}

fn build_fields(q: &Question, tab: Tab) -> Vec<FieldEntry> {
    let mut fields = Vec::new();
    match tab {
        Tab::Basic => {
            fields.push(FieldEntry::new(0, FieldRef::Format, "题目格式", q.format.label()));
            fields.push(FieldEntry::new(0, FieldRef::Title, "标题", q.title.as_str()));
            fields.push(FieldEntry::new(
                0,
                FieldRef::Description,
                "描述",
                q.description.as_str(),
            ));
            if q.format == QuestionFormat::YesNoStatements {
                fields.push(FieldEntry::new(
                    0,
                    FieldRef::ContextDescription,
                    "背景说明",
                    q.context_description.as_deref().unwrap_or_default(),
                ));
            }
        }
        Tab::Data if q.format == QuestionFormat::DataSufficiency => {
            fields.push(FieldEntry::new(
                0,
                FieldRef::Note,
                "数据充分性题目不需要数据表，题目内容在下一个标签页编辑",
                "",
            ));
        }
        Tab::Data => {
            fields.push(FieldEntry::add(Collection::Columns));
            for (i, column) in q.data_columns.iter().enumerate() {
                fields.push(FieldEntry::new(
                    0,
                    FieldRef::ColumnLabel(i),
                    format!("列 {}", i + 1),
                    column.label.as_str(),
                ));
                fields.push(FieldEntry::new(1, FieldRef::ColumnKey(i), "key", column.key.as_str()));
                fields.push(FieldEntry::new(
                    1,
                    FieldRef::ColumnType(i),
                    "类型",
                    format!("{:?}", column.column_type).to_lowercase(),
                ));
            }
            if !q.data_columns.is_empty() {
                fields.push(FieldEntry::add(Collection::Rows));
            }
            for (row_index, row) in q.data_rows.iter().enumerate() {
                for (i, column) in q.data_columns.iter().enumerate() {
                    let label = if i == 0 {
                        format!("行 {} · {}", row_index + 1, column.label)
                    } else {
                        column.label.clone()
                    };
                    fields.push(FieldEntry::new(
                        usize::from(i > 0),
                        FieldRef::Cell {
                            row: row_index,
                            key: column.key.clone(),
                        },
                        label,
                        row.get(&column.key).map(|v| v.raw()).unwrap_or_default(),
                    ));
                }
            }
        }
        Tab::Content => match q.body() {
            FormatBody::YesNoStatements { statements, .. } => {
                fields.push(FieldEntry::new(
                    0,
                    FieldRef::Instructions,
                    "作答说明",
                    q.instructions.as_str(),
                ));
                fields.push(FieldEntry::add(Collection::Statements));
                for (i, s) in statements.iter().enumerate() {
                    fields.push(FieldEntry::new(
                        0,
                        FieldRef::StatementText(i),
                        format!("陈述 {}", i + 1),
                        s.text.as_str(),
                    ));
                    fields.push(FieldEntry::new(
                        1,
                        FieldRef::StatementAnswer(i),
                        "正确答案",
                        format!("{:?}", s.correct_answer),
                    ));
                }
            }
            FormatBody::MultiColumnSelection { columns, options } => {
                fields.push(FieldEntry::new(
                    0,
                    FieldRef::Instructions,
                    "作答说明",
                    q.instructions.as_str(),
                ));
                fields.push(FieldEntry::add(Collection::SelectionColumns));
                for (i, name) in columns.iter().enumerate() {
                    fields.push(FieldEntry::new(
                        1,
                        FieldRef::SelectionColumn(i),
                        format!("列 {}", i + 1),
                        name.as_str(),
                    ));
                }
                fields.push(FieldEntry::add(Collection::SelectionOptions));
                for (i, option) in options.iter().enumerate() {
                    fields.push(FieldEntry::new(
                        0,
                        FieldRef::OptionLabel(i),
                        format!("选项 {}", i + 1),
                        option.label.as_str(),
                    ));
                    for (c, name) in columns.iter().enumerate() {
                        fields.push(FieldEntry::new(
                            1,
                            FieldRef::OptionCell {
                                option: i,
                                column: c,
                            },
                            name.as_str(),
                            option.columns.get(c).cloned().unwrap_or_default(),
                        ));
                    }
                }
            }
            FormatBody::DataSufficiency {
                question_text,
                statements,
                options,
            } => {
                fields.push(FieldEntry::new(0, FieldRef::QuestionText, "题干", question_text));
                fields.push(FieldEntry::add(Collection::SufficiencyStatements));
                for (i, s) in statements.iter().enumerate() {
                    fields.push(FieldEntry::new(
                        1,
                        FieldRef::SufficiencyStatement(i),
                        format!("({})", i + 1),
                        s.text.as_str(),
                    ));
                }
                fields.push(FieldEntry::add(Collection::SufficiencyOptions));
                for (i, o) in options.iter().enumerate() {
                    fields.push(FieldEntry::new(
                        0,
                        FieldRef::SufficiencyOptionText(i),
                        format!("选项 {}", i + 1),
                        o.text.as_str(),
                    ));
                    fields.push(FieldEntry::new(
                        1,
                        FieldRef::SufficiencyOptionCorrect(i),
                        "是否正确",
                        yes_no(o.is_correct),
                    ));
                }
            }
        },
        Tab::Preview => {}
    }
    fields
}
