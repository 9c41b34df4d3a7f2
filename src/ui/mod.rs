//! 终端界面
//!
//! 采用 MVI (Model-View-Intent) 架构：
//! - Model (state.rs): App 状态、标签页与可编辑字段列表
//! - View (view/): 纯函数，将 State 映射为 UI
//! - Intent (actions.rs / input.rs): 按键按模式映射为语义化 Action
//! - Update (logic.rs): Action 转为题目编辑命令并应用

pub mod actions;
pub mod input;
pub mod logic;
pub mod state;
pub mod view;

pub use input::handle_key_event;
pub use state::App;
pub use view::render;
