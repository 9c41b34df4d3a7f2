//! 预览表格的派生排序视图
//!
//! 排序只影响显示顺序，存储的行顺序（插入顺序）保持不变。

use std::cmp::Ordering;

use crate::models::{CellValue, DataRow};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortOrder {
    #[default]
    Asc,
    Desc,
}

impl SortOrder {
    pub fn arrow(self) -> &'static str {
        match self {
            SortOrder::Asc => "↑",
            SortOrder::Desc => "↓",
        }
    }
}

/// 排序配置，`column` 为空表示不排序
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SortConfig {
    pub column: String,
    pub order: SortOrder,
}

impl SortConfig {
    pub fn none() -> Self {
        Self::default()
    }

    pub fn is_active(&self) -> bool {
        !self.column.is_empty()
    }

    /// 点击列头：同一列在升序/降序间切换，换列则从升序开始
    pub fn toggle(&self, column: &str) -> Self {
        let order = if self.column == column && self.order == SortOrder::Asc {
            SortOrder::Desc
        } else {
            SortOrder::Asc
        };
        Self {
            column: column.to_string(),
            order,
        }
    }

    /// 当前排序列上的箭头
    pub fn marker(&self, column: &str) -> Option<SortOrder> {
        (self.is_active() && self.column == column).then_some(self.order)
    }
}

/// 按排序配置返回行的显示顺序（稳定排序）
pub fn sorted_rows<'a>(rows: &'a [DataRow], config: &SortConfig) -> Vec<&'a DataRow> {
    let mut view: Vec<&DataRow> = rows.iter().collect();
    if !config.is_active() {
        return view;
    }

    view.sort_by(|a, b| {
        let ordering = compare_cells(a.get(&config.column), b.get(&config.column));
        match config.order {
            SortOrder::Asc => ordering,
            SortOrder::Desc => ordering.reverse(),
        }
    });
    view
}

/// 比较两个单元格
///
/// 两边都是非数字文本时按文字比较，否则去掉末尾的 `%` 后按浮点数比较。
/// 无法解析为数字的文本排在所有数字之后，缺失的单元格排在最后，
/// 这样比较函数始终是全序。
pub fn compare_cells(a: Option<&CellValue>, b: Option<&CellValue>) -> Ordering {
    match (SortKey::of(a), SortKey::of(b)) {
        (SortKey::Number(x), SortKey::Number(y)) => x.total_cmp(&y),
        (SortKey::Text(x), SortKey::Text(y)) => locale_compare(x, y),
        (x, y) => x.rank().cmp(&y.rank()),
    }
}

enum SortKey<'a> {
    Number(f64),
    Text(&'a str),
    Missing,
}

impl<'a> SortKey<'a> {
    fn of(value: Option<&'a CellValue>) -> Self {
        match value {
            Some(CellValue::Number(n)) => SortKey::Number(*n),
            Some(CellValue::Text(s)) => match parse_number(s) {
                Some(n) => SortKey::Number(n),
                None => SortKey::Text(s),
            },
            None => SortKey::Missing,
        }
    }

    fn rank(&self) -> u8 {
        match self {
            SortKey::Number(_) => 0,
            SortKey::Text(_) => 1,
            SortKey::Missing => 2,
        }
    }
}

fn parse_number(s: &str) -> Option<f64> {
    let s = s.trim();
    let s = s.strip_suffix('%').unwrap_or(s).trim_end();
    s.parse::<f64>().ok().filter(|n| !n.is_nan())
}

fn locale_compare(a: &str, b: &str) -> Ordering {
    a.to_lowercase()
        .cmp(&b.to_lowercase())
        .then_with(|| a.cmp(b))
}
