//! 题目编辑操作
//!
//! 每个 `Edit` 都是一次原子修改：`Question::apply` 在副本上执行并返回新的题目，
//! 原题目保持不变。新实体的 id 在构造 `Edit` 时生成，`apply` 本身是确定性的。

use tracing::{debug, info};

use crate::error::EditError;
use crate::models::{
    Answer, CellValue, ColumnType, DataColumn, DataRow, DataSufficiencyOption,
    DataSufficiencyStatement, MultiColumnOption, Question, QuestionFormat, QuestionStatement,
    fresh_id,
};

/// 数据列可编辑字段
#[derive(Debug, Clone, PartialEq)]
pub enum ColumnField {
    Label(String),
    Key(String),
    Type(ColumnType),
}

/// 判断题陈述可编辑字段
#[derive(Debug, Clone, PartialEq)]
pub enum StatementField {
    Text(String),
    CorrectAnswer(Answer),
}

/// 充分性选项可编辑字段
#[derive(Debug, Clone, PartialEq)]
pub enum SufficiencyOptionField {
    Text(String),
    IsCorrect(bool),
}

/// 编辑命令
#[derive(Debug, Clone, PartialEq)]
pub enum Edit {
    SetTitle(String),
    SetDescription(String),
    SetInstructions(String),
    SetContextDescription(String),
    SetQuestionText(String),

    AddColumn { key: String },
    UpdateColumn { index: usize, field: ColumnField },
    RemoveColumn { index: usize },

    AddRow { id: String },
    UpdateCell { row: usize, key: String, value: String },
    RemoveRow { index: usize },

    AddStatement { id: String },
    UpdateStatement { index: usize, field: StatementField },
    RemoveStatement { index: usize },

    AddSelectionColumn,
    RenameSelectionColumn { index: usize, name: String },
    RemoveSelectionColumn { index: usize },

    AddSelectionOption { id: String },
    UpdateSelectionLabel { index: usize, label: String },
    UpdateSelectionCell { option: usize, column: usize, value: String },
    RemoveSelectionOption { index: usize },

    AddSufficiencyStatement { id: String },
    UpdateSufficiencyStatement { index: usize, text: String },
    RemoveSufficiencyStatement { index: usize },

    AddSufficiencyOption { id: String },
    UpdateSufficiencyOption { index: usize, field: SufficiencyOptionField },
    RemoveSufficiencyOption { index: usize },
}

/// 可增删的七类集合
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Collection {
    Columns,
    Rows,
    Statements,
    SelectionColumns,
    SelectionOptions,
    SufficiencyStatements,
    SufficiencyOptions,
}

impl Collection {
    /// 追加新实体的命令（带新生成的 id）
    pub fn add(self) -> Edit {
        match self {
            Collection::Columns => Edit::AddColumn {
                key: fresh_id("col"),
            },
            Collection::Rows => Edit::AddRow {
                id: fresh_id("row"),
            },
            Collection::Statements => Edit::AddStatement {
                id: fresh_id("stmt"),
            },
            Collection::SelectionColumns => Edit::AddSelectionColumn,
            Collection::SelectionOptions => Edit::AddSelectionOption {
                id: fresh_id("opt"),
            },
            Collection::SufficiencyStatements => Edit::AddSufficiencyStatement {
                id: fresh_id("stmt"),
            },
            Collection::SufficiencyOptions => Edit::AddSufficiencyOption {
                id: fresh_id("opt"),
            },
        }
    }

    pub fn remove(self, index: usize) -> Edit {
        match self {
            Collection::Columns => Edit::RemoveColumn { index },
            Collection::Rows => Edit::RemoveRow { index },
            Collection::Statements => Edit::RemoveStatement { index },
            Collection::SelectionColumns => Edit::RemoveSelectionColumn { index },
            Collection::SelectionOptions => Edit::RemoveSelectionOption { index },
            Collection::SufficiencyStatements => Edit::RemoveSufficiencyStatement { index },
            Collection::SufficiencyOptions => Edit::RemoveSufficiencyOption { index },
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Collection::Columns => "列",
            Collection::Rows => "行",
            Collection::Statements => "陈述",
            Collection::SelectionColumns => "选择列",
            Collection::SelectionOptions => "选项",
            Collection::SufficiencyStatements => "条件",
            Collection::SufficiencyOptions => "答案选项",
        }
    }
}

pub const NEW_COLUMN_LABEL: &str = "New Column";

fn default_selection_columns() -> Vec<String> {
    vec!["Column 1".to_string(), "Column 2".to_string()]
}

impl Question {
    /// 应用一次编辑，返回新的题目
    ///
    /// 下标越界属于调用方错误，会直接 panic。
    pub fn apply(&self, edit: Edit) -> Result<Question, EditError> {
        debug!(?edit, "应用编辑");
        let mut next = self.clone();
        next.apply_in_place(edit)?;
        Ok(next)
    }

    fn apply_in_place(&mut self, edit: Edit) -> Result<(), EditError> {
        match edit {
            Edit::SetTitle(v) => self.title = v,
            Edit::SetDescription(v) => self.description = v,
            Edit::SetInstructions(v) => self.instructions = v,
            Edit::SetContextDescription(v) => self.context_description = Some(v),
            Edit::SetQuestionText(v) => self.question_text = Some(v),

            Edit::AddColumn { key } => {
                self.check_column_key(&key, None)?;
                for row in &mut self.data_rows {
                    row.cells.entry(key.clone()).or_insert_with(CellValue::empty);
                }
                self.data_columns
                    .push(DataColumn::new(key, NEW_COLUMN_LABEL, ColumnType::Text));
            }
            Edit::UpdateColumn { index, field } => self.update_column(index, field)?,
            Edit::RemoveColumn { index } => {
                let removed = self.data_columns.remove(index);
                for row in &mut self.data_rows {
                    row.cells.shift_remove(&removed.key);
                }
            }

            Edit::AddRow { id } => {
                let mut row = DataRow::new(id);
                for column in &self.data_columns {
                    row.cells.insert(column.key.clone(), CellValue::empty());
                }
                self.data_rows.push(row);
            }
            Edit::UpdateCell { row, key, value } => {
                self.data_rows[row]
                    .cells
                    .insert(key, CellValue::Text(value));
            }
            Edit::RemoveRow { index } => {
                self.data_rows.remove(index);
            }

            Edit::AddStatement { id } => self.statements.push(QuestionStatement {
                id,
                text: String::new(),
                correct_answer: Answer::Yes,
            }),
            Edit::UpdateStatement { index, field } => {
                let statement = &mut self.statements[index];
                match field {
                    StatementField::Text(text) => statement.text = text,
                    StatementField::CorrectAnswer(answer) => statement.correct_answer = answer,
                }
            }
            Edit::RemoveStatement { index } => {
                self.statements.remove(index);
            }

            Edit::AddSelectionColumn => {
                let columns = self.selection_columns.get_or_insert_with(Vec::new);
                columns.push(format!("Column {}", columns.len() + 1));
                for option in self.selection_options.iter_mut().flatten() {
                    option.columns.push(String::new());
                }
            }
            Edit::RenameSelectionColumn { index, name } => {
                self.selection_columns.get_or_insert_with(Vec::new)[index] = name;
            }
            Edit::RemoveSelectionColumn { index } => {
                self.selection_columns
                    .get_or_insert_with(Vec::new)
                    .remove(index);
                for option in self.selection_options.iter_mut().flatten() {
                    if index < option.columns.len() {
                        option.columns.remove(index);
                    }
                }
            }

            Edit::AddSelectionOption { id } => {
                let width = self.selection_columns.as_ref().map_or(0, Vec::len);
                self.selection_options
                    .get_or_insert_with(Vec::new)
                    .push(MultiColumnOption {
                        id,
                        label: String::new(),
                        columns: vec![String::new(); width],
                    });
            }
            Edit::UpdateSelectionLabel { index, label } => {
                self.selection_options.get_or_insert_with(Vec::new)[index].label = label;
            }
            Edit::UpdateSelectionCell {
                option,
                column,
                value,
            } => {
                let width = self.selection_columns.as_ref().map_or(0, Vec::len);
                assert!(
                    column < width,
                    "选择列下标越界: {column} >= {width}"
                );
                let cells = &mut self.selection_options.get_or_insert_with(Vec::new)[option].columns;
                if cells.len() <= column {
                    cells.resize(column + 1, String::new());
                }
                cells[column] = value;
            }
            Edit::RemoveSelectionOption { index } => {
                self.selection_options
                    .get_or_insert_with(Vec::new)
                    .remove(index);
            }

            Edit::AddSufficiencyStatement { id } => self
                .sufficiency_statements
                .get_or_insert_with(Vec::new)
                .push(DataSufficiencyStatement {
                    id,
                    text: String::new(),
                }),
            Edit::UpdateSufficiencyStatement { index, text } => {
                self.sufficiency_statements.get_or_insert_with(Vec::new)[index].text = text;
            }
            Edit::RemoveSufficiencyStatement { index } => {
                self.sufficiency_statements
                    .get_or_insert_with(Vec::new)
                    .remove(index);
            }

            Edit::AddSufficiencyOption { id } => self
                .sufficiency_options
                .get_or_insert_with(Vec::new)
                .push(DataSufficiencyOption {
                    id,
                    text: String::new(),
                    is_correct: false,
                }),
            Edit::UpdateSufficiencyOption { index, field } => {
                let option = &mut self.sufficiency_options.get_or_insert_with(Vec::new)[index];
                match field {
                    SufficiencyOptionField::Text(text) => option.text = text,
                    SufficiencyOptionField::IsCorrect(flag) => option.is_correct = flag,
                }
            }
            Edit::RemoveSufficiencyOption { index } => {
                self.sufficiency_options
                    .get_or_insert_with(Vec::new)
                    .remove(index);
            }
        }
        Ok(())
    }

    fn update_column(&mut self, index: usize, field: ColumnField) -> Result<(), EditError> {
        match field {
            ColumnField::Label(label) => self.data_columns[index].label = label,
            ColumnField::Type(column_type) => self.data_columns[index].column_type = column_type,
            ColumnField::Key(new_key) => {
                let old_key = self.data_columns[index].key.clone();
                if old_key == new_key {
                    return Ok(());
                }
                self.check_column_key(&new_key, Some(index))?;
                // 迁移每行的单元格到新 key
                for row in &mut self.data_rows {
                    if let Some(value) = row.cells.shift_remove(&old_key) {
                        row.cells.insert(new_key.clone(), value);
                    }
                }
                self.data_columns[index].key = new_key;
            }
        }
        Ok(())
    }

    fn check_column_key(&self, key: &str, except: Option<usize>) -> Result<(), EditError> {
        if key.is_empty() {
            return Err(EditError::EmptyColumnKey);
        }
        if key == "id" {
            return Err(EditError::ReservedColumnKey);
        }
        let taken = self
            .data_columns
            .iter()
            .enumerate()
            .any(|(i, c)| Some(i) != except && c.key == key);
        if taken {
            return Err(EditError::DuplicateColumnKey(key.to_string()));
        }
        Ok(())
    }

    /// 切换题目格式
    ///
    /// 目标格式已有的字段组保持不变，缺失时初始化为默认值；
    /// 另一种可选格式的字段组重置为默认值。数据表字段组始终保留。
    pub fn switch_format(&self, format: QuestionFormat) -> Question {
        let mut next = self.clone();
        next.format = format;

        let reset_selection = |q: &mut Question| {
            q.selection_columns = Some(default_selection_columns());
            q.selection_options = Some(Vec::new());
        };
        let reset_sufficiency = |q: &mut Question| {
            q.question_text = Some(String::new());
            q.sufficiency_statements = Some(Vec::new());
            q.sufficiency_options = Some(Vec::new());
        };

        match format {
            QuestionFormat::YesNoStatements => {
                reset_selection(&mut next);
                reset_sufficiency(&mut next);
            }
            QuestionFormat::MultiColumnSelection => {
                next.selection_columns
                    .get_or_insert_with(default_selection_columns);
                next.selection_options.get_or_insert_with(Vec::new);
                reset_sufficiency(&mut next);
            }
            QuestionFormat::DataSufficiency => {
                next.question_text.get_or_insert_with(String::new);
                next.sufficiency_statements.get_or_insert_with(Vec::new);
                next.sufficiency_options.get_or_insert_with(Vec::new);
                reset_selection(&mut next);
            }
        }

        info!(from = ?self.format, to = ?format, "切换题目格式");
        next
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use std::collections::BTreeSet;

    fn apply(q: &Question, edit: Edit) -> Question {
        q.apply(edit).unwrap()
    }

    fn grid() -> Question {
        let mut q = Question::blank(QuestionFormat::MultiColumnSelection);
        q.selection_columns = Some(vec!["A".into(), "B".into(), "C".into()]);
        q.selection_options = Some(vec![
            MultiColumnOption {
                id: "o1".into(),
                label: "one".into(),
                columns: vec!["a1".into(), "b1".into(), "c1".into()],
            },
            MultiColumnOption {
                id: "o2".into(),
                label: "two".into(),
                columns: vec!["a2".into(), "b2".into(), "c2".into()],
            },
        ]);
        q
    }

    fn row_keys(q: &Question) -> BTreeSet<String> {
        q.data_rows
            .iter()
            .flat_map(|r| r.cells.keys().cloned())
            .collect()
    }

    fn column_keys(q: &Question) -> BTreeSet<String> {
        q.data_columns.iter().map(|c| c.key.clone()).collect()
    }

    #[test]
    fn test_apply_leaves_original_untouched() {
        let q = Question::example();
        let next = apply(&q, Edit::SetTitle("T".into()));
        assert_eq!(next.title, "T");
        assert_eq!(q.title, Question::example().title);
    }

    #[test]
    fn test_add_column_defaults() {
        let q = apply(&Question::example(), Collection::Columns.add());
        let column = q.data_columns.last().unwrap();
        assert_eq!(column.label, NEW_COLUMN_LABEL);
        assert_eq!(column.column_type, ColumnType::Text);
        assert!(column.key.starts_with("col_"));
        for row in &q.data_rows {
            assert_eq!(row.get(&column.key), Some(&CellValue::empty()));
        }
    }

    #[test]
    fn test_rapid_adds_get_distinct_ids() {
        let mut q = Question::example();
        for _ in 0..20 {
            q = apply(&q, Collection::Rows.add());
        }
        let ids: BTreeSet<_> = q.data_rows.iter().map(|r| r.id.clone()).collect();
        assert_eq!(ids.len(), q.data_rows.len());
    }

    #[test]
    fn test_add_row_fills_every_column() {
        let q = apply(&Question::example(), Collection::Rows.add());
        let row = q.data_rows.last().unwrap();
        assert_eq!(row.cells.len(), q.data_columns.len());
        assert!(row.id.starts_with("row_"));
    }

    #[test]
    fn test_remove_column_cascades_into_rows() {
        let q = Question::example();
        let index = q.column_index("infoclick").unwrap();
        let q = apply(&q, Edit::RemoveColumn { index });
        assert!(q.column_index("infoclick").is_none());
        assert!(q.data_rows.iter().all(|r| r.get("infoclick").is_none()));
        assert_eq!(row_keys(&q), column_keys(&q));
    }

    #[test]
    fn test_rename_key_migrates_cells() {
        let q = Question::example();
        let before: Vec<_> = q.data_rows.iter().map(|r| r.get("item").cloned()).collect();
        let q = apply(
            &q,
            Edit::UpdateColumn {
                index: 0,
                field: ColumnField::Key("product".into()),
            },
        );
        assert_eq!(q.data_columns[0].key, "product");
        let after: Vec<_> = q.data_rows.iter().map(|r| r.get("product").cloned()).collect();
        assert_eq!(before, after);
        assert!(q.data_rows.iter().all(|r| r.get("item").is_none()));
    }

    #[test]
    fn test_cell_order_after_remove_and_rename() {
        let q = Question::example();
        let q = apply(&q, Edit::RemoveColumn { index: 1 });
        let keys: Vec<&str> = q.data_rows[0].cells.keys().map(String::as_str).collect();
        assert_eq!(keys, ["item", "eye_time", "infoclick", "sales_rank"]);

        let q = apply(
            &q,
            Edit::UpdateColumn {
                index: 0,
                field: ColumnField::Key("product".into()),
            },
        );
        let keys: Vec<&str> = q.data_rows[0].cells.keys().map(String::as_str).collect();
        assert_eq!(keys, ["eye_time", "infoclick", "sales_rank", "product"]);
    }

    #[test]
    fn test_rename_key_rejections() {
        let q = Question::example();
        let rename = |key: &str| Edit::UpdateColumn {
            index: 0,
            field: ColumnField::Key(key.into()),
        };
        assert_eq!(q.apply(rename("")), Err(EditError::EmptyColumnKey));
        assert_eq!(q.apply(rename("id")), Err(EditError::ReservedColumnKey));
        assert_eq!(
            q.apply(rename("placement")),
            Err(EditError::DuplicateColumnKey("placement".into()))
        );
        // 改成自身 key 不算冲突
        assert_eq!(apply(&q, rename("item")), q);
    }

    #[test]
    fn test_update_column_label_and_type() {
        let q = apply(
            &Question::example(),
            Edit::UpdateColumn {
                index: 1,
                field: ColumnField::Label("Placement".into()),
            },
        );
        let q = apply(
            &q,
            Edit::UpdateColumn {
                index: 1,
                field: ColumnField::Type(ColumnType::Number),
            },
        );
        assert_eq!(q.data_columns[1].label, "Placement");
        assert_eq!(q.data_columns[1].column_type, ColumnType::Number);
        assert_eq!(q.data_columns[1].key, "placement");
    }

    #[test]
    fn test_update_and_remove_row() {
        let q = apply(
            &Question::example(),
            Edit::UpdateCell {
                row: 2,
                key: "item".into(),
                value: "Z".into(),
            },
        );
        assert_eq!(q.data_rows[2].get("item"), Some(&CellValue::from("Z")));
        let q = apply(&q, Edit::RemoveRow { index: 0 });
        assert_eq!(q.data_rows.len(), 3);
        assert_eq!(q.data_rows[0].id, "2");
    }

    #[test]
    #[should_panic]
    fn test_remove_out_of_range_panics() {
        let _ = Question::example().apply(Edit::RemoveRow { index: 5 });
    }

    #[test]
    fn test_statement_family() {
        let q = apply(&Question::example(), Collection::Statements.add());
        let last = q.statements.len() - 1;
        assert_eq!(q.statements[last].correct_answer, Answer::Yes);
        assert!(q.statements[last].text.is_empty());

        let q = apply(
            &q,
            Edit::UpdateStatement {
                index: last,
                field: StatementField::CorrectAnswer(Answer::No),
            },
        );
        let q = apply(
            &q,
            Edit::UpdateStatement {
                index: last,
                field: StatementField::Text("new".into()),
            },
        );
        assert_eq!(q.statements[last].correct_answer, Answer::No);
        assert_eq!(q.statements[last].text, "new");

        let q = apply(&q, Collection::Statements.remove(0));
        assert_eq!(q.statements.len(), 2);
        assert_eq!(q.statements[0].id, "2");
    }

    #[test]
    fn test_remove_selection_column_shifts_option_cells() {
        let q = apply(&grid(), Edit::RemoveSelectionColumn { index: 1 });
        assert_eq!(q.selection_columns.as_deref().unwrap(), ["A", "C"]);
        let options = q.selection_options.unwrap();
        assert_eq!(options[0].columns, ["a1", "c1"]);
        assert_eq!(options[1].columns, ["a2", "c2"]);
    }

    #[test]
    fn test_add_selection_column_extends_options() {
        let q = apply(&grid(), Edit::AddSelectionColumn);
        assert_eq!(q.selection_columns.as_ref().unwrap()[3], "Column 4");
        assert!(q
            .selection_options
            .unwrap()
            .iter()
            .all(|o| o.columns.len() == 4));
    }

    #[test]
    fn test_selection_option_family() {
        let q = apply(&grid(), Collection::SelectionOptions.add());
        let options = q.selection_options.as_ref().unwrap();
        assert_eq!(options[2].columns, vec![String::new(); 3]);
        assert!(options[2].id.starts_with("opt_"));

        let q = apply(
            &q,
            Edit::UpdateSelectionCell {
                option: 2,
                column: 1,
                value: "x".into(),
            },
        );
        let q = apply(
            &q,
            Edit::UpdateSelectionLabel {
                index: 2,
                label: "three".into(),
            },
        );
        let q = apply(
            &q,
            Edit::RenameSelectionColumn {
                index: 0,
                name: "First".into(),
            },
        );
        let options = q.selection_options.as_ref().unwrap();
        assert_eq!(options[2].columns[1], "x");
        assert_eq!(options[2].label, "three");
        assert_eq!(q.selection_columns.as_ref().unwrap()[0], "First");

        let q = apply(&q, Edit::RemoveSelectionOption { index: 0 });
        assert_eq!(q.selection_options.unwrap()[0].id, "o2");
    }

    #[test]
    fn test_selection_cell_pads_short_option() {
        let mut q = grid();
        q.selection_options.as_mut().unwrap()[0].columns.truncate(1);
        let q = apply(
            &q,
            Edit::UpdateSelectionCell {
                option: 0,
                column: 2,
                value: "c".into(),
            },
        );
        assert_eq!(q.selection_options.unwrap()[0].columns, ["a1", "", "c"]);
    }

    #[test]
    fn test_selection_edits_create_missing_group() {
        let q = apply(
            &Question::blank(QuestionFormat::YesNoStatements),
            Edit::AddSelectionColumn,
        );
        assert_eq!(q.selection_columns.unwrap(), ["Column 1"]);
    }

    #[test]
    fn test_sufficiency_families() {
        let q = Question::blank(QuestionFormat::DataSufficiency);
        let q = apply(&q, Edit::SetQuestionText("What is x?".into()));
        let q = apply(&q, Collection::SufficiencyStatements.add());
        let q = apply(&q, Collection::SufficiencyOptions.add());
        let q = apply(&q, Collection::SufficiencyOptions.add());
        let q = apply(
            &q,
            Edit::UpdateSufficiencyStatement {
                index: 0,
                text: "x > 0".into(),
            },
        );
        let q = apply(
            &q,
            Edit::UpdateSufficiencyOption {
                index: 1,
                field: SufficiencyOptionField::IsCorrect(true),
            },
        );
        let q = apply(
            &q,
            Edit::UpdateSufficiencyOption {
                index: 1,
                field: SufficiencyOptionField::Text("Both".into()),
            },
        );

        assert_eq!(q.question_text.as_deref(), Some("What is x?"));
        assert_eq!(q.sufficiency_statements.as_ref().unwrap()[0].text, "x > 0");
        let options = q.sufficiency_options.as_ref().unwrap();
        assert!(!options[0].is_correct);
        assert!(options[1].is_correct);
        assert_eq!(options[1].text, "Both");

        let q = apply(&q, Edit::RemoveSufficiencyOption { index: 0 });
        let q = apply(&q, Edit::RemoveSufficiencyStatement { index: 0 });
        assert_eq!(q.sufficiency_options.as_ref().unwrap().len(), 1);
        assert!(q.sufficiency_statements.unwrap().is_empty());
    }

    #[test]
    fn test_switch_format_resets_other_groups() {
        let q = apply(
            &Question::example().switch_format(QuestionFormat::DataSufficiency),
            Edit::SetQuestionText("Is x even?".into()),
        );
        let q = q.switch_format(QuestionFormat::MultiColumnSelection);
        assert_eq!(q.format, QuestionFormat::MultiColumnSelection);
        assert_eq!(q.selection_columns.as_deref().unwrap(), ["Column 1", "Column 2"]);
        assert_eq!(q.question_text.as_deref(), Some(""));
        // 数据表不受影响
        assert_eq!(q.data_rows, Question::example().data_rows);
    }

    #[test]
    fn test_switch_format_keeps_target_group() {
        let q = grid().switch_format(QuestionFormat::MultiColumnSelection);
        assert_eq!(q.sufficiency_options, Some(Vec::new()));
        assert_eq!(q.selection_columns.as_deref().unwrap(), ["A", "B", "C"]);
        assert_eq!(q.selection_options.as_ref().unwrap().len(), 2);
    }

    #[test]
    fn test_switch_format_idempotent() {
        for format in QuestionFormat::ALL {
            let once = grid().switch_format(format);
            let twice = once.switch_format(format);
            assert_eq!(once, twice);
        }
    }

    #[derive(Debug, Clone)]
    enum ColumnOp {
        Add,
        Remove(usize),
        Rename(usize, String),
    }

    fn column_op() -> impl Strategy<Value = ColumnOp> {
        prop_oneof![
            Just(ColumnOp::Add),
            (0usize..8).prop_map(ColumnOp::Remove),
            (0usize..8, "[a-z]{1,6}").prop_map(|(i, k)| ColumnOp::Rename(i, k)),
        ]
    }

    proptest! {
        #[test]
        fn prop_row_keys_match_column_keys(ops in prop::collection::vec(column_op(), 0..30)) {
            let mut q = Question::example();
            for op in ops {
                let len = q.data_columns.len();
                let edit = match op {
                    ColumnOp::Add => Collection::Columns.add(),
                    ColumnOp::Remove(_) if len == 0 => continue,
                    ColumnOp::Remove(i) => Edit::RemoveColumn { index: i % len },
                    ColumnOp::Rename(_, _) if len == 0 => continue,
                    ColumnOp::Rename(i, key) => Edit::UpdateColumn {
                        index: i % len,
                        field: ColumnField::Key(key),
                    },
                };
                if let Ok(next) = q.apply(edit) {
                    q = next;
                }
                prop_assert_eq!(row_keys(&q), column_keys(&q));
            }
        }

        #[test]
        fn prop_remove_selection_column_drops_one_position(index in 0usize..3) {
            let before = grid();
            let after = apply(&before, Edit::RemoveSelectionColumn { index });
            let old = before.selection_options.unwrap();
            let new = after.selection_options.unwrap();
            for (o, n) in old.iter().zip(&new) {
                let mut expected = o.columns.clone();
                expected.remove(index);
                prop_assert_eq!(&n.columns, &expected);
            }
        }
    }
}
