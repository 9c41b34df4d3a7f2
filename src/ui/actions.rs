//! Action 枚举定义 (Intent)
//!
//! 用户交互转化为明确的语义化 Action

/// 用户操作枚举
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    Quit,
    MoveSelectionUp,
    MoveSelectionDown,
    NextTab,
    PrevTab,

    // 触发特定功能
    Activate,    // 编辑 / 切换 / 添加 / 预览中按列排序
    StartRemove, // 删除光标所在实体
    Export,

    // 预览表格
    SortCursorLeft,
    SortCursorRight,
    ClearSort,

    // 表单/通用交互
    Cancel,      // Esc / n
    Submit,      // Enter / y
    Input(char), // 输入字符
    DeleteChar,  // Backspace
}
