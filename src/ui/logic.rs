//! 业务逻辑处理 (Update/Dispatch)
//!
//! 包含核心的 dispatch 逻辑和各种业务处理方法

use tracing::{error, warn};

use super::actions::Action;
use super::state::{App, AppMode, ConfirmAction, FieldKind, FieldRef, Tab};
use crate::edit::{ColumnField, Edit, StatementField, SufficiencyOptionField};
use crate::export::export_question;
use crate::sorting::SortConfig;

impl App {
    /// 核心逻辑分发，返回 true 表示退出
    pub fn dispatch(&mut self, action: Action) -> bool {
        match action {
            Action::Quit => return true,
            Action::MoveSelectionUp => self.move_up(),
            Action::MoveSelectionDown => self.move_down(),
            Action::NextTab => self.switch_tab(self.tab.next()),
            Action::PrevTab => self.switch_tab(self.tab.prev()),

            Action::Activate => self.activate(),
            Action::StartRemove => self.start_remove(),
            Action::Export => self.export(),

            Action::SortCursorLeft => {
                if self.tab == Tab::Preview {
                    self.preview_column = self.preview_column.saturating_sub(1);
                }
            }
            Action::SortCursorRight => {
                if self.tab == Tab::Preview
                    && self.preview_column + 1 < self.question.data_columns.len()
                {
                    self.preview_column += 1;
                }
            }
            Action::ClearSort => {
                if self.tab == Tab::Preview {
                    self.sort = SortConfig::none();
                }
            }

            Action::Cancel => self.cancel(),

            Action::Submit => match &self.mode {
                AppMode::Editing(field) => {
                    let field = field.clone();
                    self.confirm_edit(field);
                }
                AppMode::Confirm(_) => self.execute_confirm(),
                AppMode::Normal => {}
            },

            Action::Input(c) => {
                if matches!(self.mode, AppMode::Editing(_)) {
                    self.input_buffer.push(c);
                }
            }

            Action::DeleteChar => {
                if matches!(self.mode, AppMode::Editing(_)) {
                    self.input_buffer.pop();
                }
            }
        }
        false
    }

    // ============ 导航相关 ============

    /// 向上移动选择
    pub fn move_up(&mut self) {
        if self.selected_index > 0 {
            self.selected_index -= 1;
        }
    }

    /// 向下移动选择
    pub fn move_down(&mut self) {
        if self.selected_index + 1 < self.fields.len() {
            self.selected_index += 1;
        }
    }

    pub fn switch_tab(&mut self, tab: Tab) {
        self.tab = tab;
        self.selected_index = 0;
        self.refresh_fields();
    }

    // ============ 字段交互 ============

    /// Enter：按字段类型编辑、切换或添加；预览页按光标列排序
    pub fn activate(&mut self) {
        if self.tab == Tab::Preview {
            if let Some(column) = self.question.data_columns.get(self.preview_column) {
                self.sort = self.sort.toggle(&column.key);
            }
            return;
        }

        let Some(entry) = self.selected_field().cloned() else {
            return;
        };
        match entry.field.kind() {
            FieldKind::Text => {
                self.input_buffer = entry.value;
                self.mode = AppMode::Editing(entry.field);
            }
            FieldKind::Toggle => self.toggle(entry.field),
            FieldKind::Add => {
                if let FieldRef::Add(collection) = entry.field {
                    if self.commit(collection.add()) {
                        self.message = Some(format!("已添加{}", collection.label()));
                    }
                }
            }
            FieldKind::Note => {}
        }
    }

    fn toggle(&mut self, field: FieldRef) {
        let q = &self.question;
        let edit = match field {
            FieldRef::Format => {
                self.mode = AppMode::Confirm(ConfirmAction::SwitchFormat(q.format.next()));
                return;
            }
            FieldRef::ColumnType(index) => Edit::UpdateColumn {
                index,
                field: ColumnField::Type(q.data_columns[index].column_type.next()),
            },
            FieldRef::StatementAnswer(index) => Edit::UpdateStatement {
                index,
                field: StatementField::CorrectAnswer(q.statements[index].correct_answer.toggled()),
            },
            FieldRef::SufficiencyOptionCorrect(index) => {
                let current = q
                    .sufficiency_options
                    .as_ref()
                    .is_some_and(|options| options[index].is_correct);
                Edit::UpdateSufficiencyOption {
                    index,
                    field: SufficiencyOptionField::IsCorrect(!current),
                }
            }
            _ => return,
        };
        self.commit(edit);
    }

    /// 确认文本编辑
    pub fn confirm_edit(&mut self, field: FieldRef) {
        let value = std::mem::take(&mut self.input_buffer);
        self.mode = AppMode::Normal;
        if let Some(edit) = field.commit(value) {
            if self.commit(edit) {
                self.message = Some("已更新".to_string());
            }
        }
    }

    /// 应用编辑并刷新视图，失败时题目保持不变
    pub fn commit(&mut self, edit: Edit) -> bool {
        let sort = self.sort_after(&edit);
        match self.question.apply(edit) {
            Ok(question) => {
                self.question = question;
                if let Some(sort) = sort {
                    self.sort = sort;
                }
                self.refresh_fields();
                true
            }
            Err(e) => {
                warn!(error = %e, "编辑被拒绝");
                self.message = Some(e.to_string());
                false
            }
        }
    }

    /// 列改名时排序跟随新 key，排序列被删除时取消排序
    fn sort_after(&self, edit: &Edit) -> Option<SortConfig> {
        if !self.sort.is_active() {
            return None;
        }
        match edit {
            Edit::UpdateColumn {
                index,
                field: ColumnField::Key(key),
            } if self.question.data_columns[*index].key == self.sort.column => Some(SortConfig {
                column: key.clone(),
                order: self.sort.order,
            }),
            Edit::RemoveColumn { index }
                if self.question.data_columns[*index].key == self.sort.column =>
            {
                Some(SortConfig::none())
            }
            _ => None,
        }
    }

    // ============ 删除 / 切换格式 ============

    /// 开始删除光标所在实体
    pub fn start_remove(&mut self) {
        if self.tab == Tab::Preview {
            return;
        }
        if let Some((collection, index)) = self.selected_field().and_then(|e| e.field.owner()) {
            self.mode = AppMode::Confirm(ConfirmAction::Remove(collection, index));
        }
    }

    /// 执行确认操作
    pub fn execute_confirm(&mut self) {
        match &self.mode {
            AppMode::Confirm(ConfirmAction::Remove(collection, index)) => {
                let (collection, index) = (*collection, *index);
                if self.commit(collection.remove(index)) {
                    self.message = Some(format!("已删除{}", collection.label()));
                }
            }
            AppMode::Confirm(ConfirmAction::SwitchFormat(format)) => {
                let format = *format;
                self.question = self.question.switch_format(format);
                self.message = Some(format!("题目格式: {}", format.label()));
                self.refresh_fields();
            }
            _ => {}
        }
        self.mode = AppMode::Normal;
    }

    // ============ 导出 ============

    pub fn export(&mut self) {
        self.message = Some(match export_question(&self.question, &self.export_dir) {
            Ok(path) => format!("已导出到 {}", path.display()),
            Err(e) => {
                error!(error = %e, "导出失败");
                format!("导出失败: {e}")
            }
        });
    }

    // ============ 通用操作 ============

    /// 取消当前操作
    pub fn cancel(&mut self) {
        self.mode = AppMode::Normal;
        self.input_buffer.clear();
        self.message = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AppConfig;
    use crate::edit::Collection;
    use crate::models::{Answer, Question, QuestionFormat};
    use crate::sorting::SortOrder;

    fn app() -> App {
        App::new(Question::example(), &AppConfig::default())
    }

    fn select(app: &mut App, field: &FieldRef) {
        app.selected_index = app
            .fields
            .iter()
            .position(|e| &e.field == field)
            .unwrap();
    }

    fn type_text(app: &mut App, text: &str) {
        for c in text.chars() {
            app.dispatch(Action::Input(c));
        }
    }

    #[test]
    fn test_edit_title_through_buffer() {
        let mut app = app();
        select(&mut app, &FieldRef::Title);
        app.dispatch(Action::Activate);
        assert_eq!(app.mode, AppMode::Editing(FieldRef::Title));
        app.input_buffer.clear();
        type_text(&mut app, "New");
        app.dispatch(Action::DeleteChar);
        app.dispatch(Action::Submit);
        assert_eq!(app.question.title, "Ne");
        assert_eq!(app.mode, AppMode::Normal);
    }

    #[test]
    fn test_cancel_keeps_question() {
        let mut app = app();
        select(&mut app, &FieldRef::Title);
        app.dispatch(Action::Activate);
        type_text(&mut app, "zzz");
        app.dispatch(Action::Cancel);
        assert_eq!(app.question, Question::example());
    }

    #[test]
    fn test_add_and_remove_row_with_confirm() {
        let mut app = app();
        app.dispatch(Action::NextTab);
        assert_eq!(app.tab, Tab::Data);
        select(&mut app, &FieldRef::Add(Collection::Rows));
        app.dispatch(Action::Activate);
        assert_eq!(app.question.data_rows.len(), 5);

        select(
            &mut app,
            &FieldRef::Cell {
                row: 0,
                key: "item".into(),
            },
        );
        app.dispatch(Action::StartRemove);
        assert_eq!(
            app.mode,
            AppMode::Confirm(ConfirmAction::Remove(Collection::Rows, 0))
        );
        app.dispatch(Action::Submit);
        assert_eq!(app.question.data_rows.len(), 4);
        assert_eq!(app.question.data_rows[0].id, "2");
    }

    #[test]
    fn test_rejected_key_rename_shows_message() {
        let mut app = app();
        app.switch_tab(Tab::Data);
        select(&mut app, &FieldRef::ColumnKey(0));
        app.dispatch(Action::Activate);
        app.input_buffer = "placement".into();
        app.dispatch(Action::Submit);
        assert_eq!(app.question, Question::example());
        assert!(app.message.as_deref().unwrap().contains("placement"));
    }

    #[test]
    fn test_toggle_statement_answer() {
        let mut app = app();
        app.switch_tab(Tab::Content);
        select(&mut app, &FieldRef::StatementAnswer(0));
        app.dispatch(Action::Activate);
        assert_eq!(app.question.statements[0].correct_answer, Answer::Yes);
    }

    #[test]
    fn test_format_switch_needs_confirmation() {
        let mut app = app();
        select(&mut app, &FieldRef::Format);
        app.dispatch(Action::Activate);
        assert_eq!(app.question.format, QuestionFormat::YesNoStatements);
        app.dispatch(Action::Submit);
        assert_eq!(app.question.format, QuestionFormat::MultiColumnSelection);

        app.switch_tab(Tab::Content);
        assert!(app
            .fields
            .iter()
            .any(|e| e.field == FieldRef::Add(Collection::SelectionOptions)));
    }

    #[test]
    fn test_preview_sorting_follows_column_changes() {
        let mut app = app();
        app.switch_tab(Tab::Preview);
        app.dispatch(Action::SortCursorRight);
        app.dispatch(Action::Activate);
        assert_eq!(app.sort.column, "placement");
        app.dispatch(Action::Activate);
        assert_eq!(app.sort.order, SortOrder::Desc);

        app.commit(Edit::UpdateColumn {
            index: 1,
            field: ColumnField::Key("where".into()),
        });
        assert_eq!(app.sort.column, "where");
        assert_eq!(app.sort.order, SortOrder::Desc);

        app.commit(Edit::RemoveColumn { index: 1 });
        assert!(!app.sort.is_active());
    }

    #[test]
    fn test_clear_sort() {
        let mut app = app();
        app.switch_tab(Tab::Preview);
        app.dispatch(Action::Activate);
        assert!(app.sort.is_active());
        app.dispatch(Action::ClearSort);
        assert_eq!(app.sort, SortConfig::none());
    }

    #[test]
    fn test_export_writes_into_configured_dir() {
        let dir = tempfile::tempdir().unwrap();
        let config = AppConfig {
            export_dir: Some(dir.path().to_path_buf()),
            ..AppConfig::default()
        };
        let mut app = App::new(Question::example(), &config);
        app.dispatch(Action::Export);
        assert!(dir.path().join(crate::export::EXPORT_FILE_NAME).exists());
        assert!(app.message.unwrap().starts_with("已导出到"));
    }

    #[test]
    fn test_quit() {
        assert!(app().dispatch(Action::Quit));
    }
}
