use indexmap::IndexMap;
use serde::{Deserialize, Serialize, Serializer};
use uuid::Uuid;

/// 题目格式
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum QuestionFormat {
    #[default]
    YesNoStatements, // 是/否判断
    MultiColumnSelection, // 多列选择
    DataSufficiency,      // 数据充分性
}

impl QuestionFormat {
    pub const ALL: [QuestionFormat; 3] = [
        QuestionFormat::YesNoStatements,
        QuestionFormat::MultiColumnSelection,
        QuestionFormat::DataSufficiency,
    ];

    pub fn label(self) -> &'static str {
        match self {
            QuestionFormat::YesNoStatements => "Yes/No Statements",
            QuestionFormat::MultiColumnSelection => "Multi-Column Selection",
            QuestionFormat::DataSufficiency => "Data Sufficiency",
        }
    }

    /// 循环切换到下一种格式
    pub fn next(self) -> Self {
        match self {
            QuestionFormat::YesNoStatements => QuestionFormat::MultiColumnSelection,
            QuestionFormat::MultiColumnSelection => QuestionFormat::DataSufficiency,
            QuestionFormat::DataSufficiency => QuestionFormat::YesNoStatements,
        }
    }
}

/// 数据列类型
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ColumnType {
    #[default]
    Text,
    Number,
    Percentage,
}

impl ColumnType {
    pub fn next(self) -> Self {
        match self {
            ColumnType::Text => ColumnType::Number,
            ColumnType::Number => ColumnType::Percentage,
            ColumnType::Percentage => ColumnType::Text,
        }
    }
}

/// 数据表的一列
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DataColumn {
    pub key: String,
    pub label: String,
    #[serde(rename = "type")]
    pub column_type: ColumnType,
}

impl DataColumn {
    pub fn new(key: impl Into<String>, label: impl Into<String>, column_type: ColumnType) -> Self {
        Self {
            key: key.into(),
            label: label.into(),
            column_type,
        }
    }
}

/// 单元格的值，文本或数字
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CellValue {
    Text(String),
    Number(#[serde(serialize_with = "serialize_number")] f64),
}

/// 整数值按整数写出（`4` 而不是 `4.0`）
fn serialize_number<S: Serializer>(n: &f64, serializer: S) -> Result<S::Ok, S::Error> {
    const MAX_EXACT: f64 = 9_007_199_254_740_992.0;
    if n.fract() == 0.0 && n.abs() <= MAX_EXACT {
        serializer.serialize_i64(*n as i64)
    } else {
        serializer.serialize_f64(*n)
    }
}

impl CellValue {
    pub fn empty() -> Self {
        CellValue::Text(String::new())
    }

    /// 单元格的原始字符串形式
    pub fn raw(&self) -> String {
        match self {
            CellValue::Text(s) => s.clone(),
            CellValue::Number(n) => n.to_string(),
        }
    }
}

impl From<&str> for CellValue {
    fn from(value: &str) -> Self {
        CellValue::Text(value.to_string())
    }
}

/// 数据表的一行，按列 key 索引单元格
///
/// 行允许缺少某些列的 key，渲染时按空值处理。
/// 单元格保持插入顺序，导出时与列顺序一致。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DataRow {
    pub id: String,
    #[serde(flatten)]
    pub cells: IndexMap<String, CellValue>,
}

impl DataRow {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            cells: IndexMap::new(),
        }
    }

    pub fn with_cell(mut self, key: impl Into<String>, value: impl Into<CellValue>) -> Self {
        self.cells.insert(key.into(), value.into());
        self
    }

    pub fn get(&self, key: &str) -> Option<&CellValue> {
        self.cells.get(key)
    }
}

/// 判断题答案
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Answer {
    #[default]
    Yes,
    No,
}

impl Answer {
    pub fn toggled(self) -> Self {
        match self {
            Answer::Yes => Answer::No,
            Answer::No => Answer::Yes,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuestionStatement {
    pub id: String,
    pub text: String,
    pub correct_answer: Answer,
}

/// 多列选择题的一个选项，`columns` 按位置对应 `selection_columns`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MultiColumnOption {
    pub id: String,
    pub label: String,
    pub columns: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DataSufficiencyStatement {
    pub id: String,
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DataSufficiencyOption {
    pub id: String,
    pub text: String,
    pub is_correct: bool,
}

/// 题目（根聚合）
///
/// 字段声明顺序即导出 JSON 的 key 顺序。可选字段组只在对应格式下有意义，
/// 缺省时导出中省略。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Question {
    pub title: String,
    pub description: String,
    pub format: QuestionFormat,
    pub data_columns: Vec<DataColumn>,
    pub data_rows: Vec<DataRow>,
    pub statements: Vec<QuestionStatement>,
    pub instructions: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub context_description: Option<String>,

    // 多列选择
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub selection_columns: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub selection_options: Option<Vec<MultiColumnOption>>,

    // 数据充分性
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub question_text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sufficiency_statements: Option<Vec<DataSufficiencyStatement>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sufficiency_options: Option<Vec<DataSufficiencyOption>>,
}

/// 当前格式下有效的字段组
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FormatBody<'a> {
    YesNoStatements {
        columns: &'a [DataColumn],
        rows: &'a [DataRow],
        statements: &'a [QuestionStatement],
        context_description: &'a str,
    },
    MultiColumnSelection {
        columns: &'a [String],
        options: &'a [MultiColumnOption],
    },
    DataSufficiency {
        question_text: &'a str,
        statements: &'a [DataSufficiencyStatement],
        options: &'a [DataSufficiencyOption],
    },
}

impl Question {
    /// 空白题目
    pub fn blank(format: QuestionFormat) -> Self {
        Self {
            title: String::new(),
            description: String::new(),
            format,
            data_columns: Vec::new(),
            data_rows: Vec::new(),
            statements: Vec::new(),
            instructions: String::new(),
            context_description: None,
            selection_columns: None,
            selection_options: None,
            question_text: None,
            sufficiency_statements: None,
            sufficiency_options: None,
        }
    }

    /// 启动时的示例题目
    pub fn example() -> Self {
        let columns = vec![
            DataColumn::new("item", "Item", ColumnType::Text),
            DataColumn::new("placement", "Page placement", ColumnType::Text),
            DataColumn::new("eye_time", "Mean eye time (seconds)", ColumnType::Number),
            DataColumn::new("infoclick", "Infoclick percentage", ColumnType::Percentage),
            DataColumn::new("sales_rank", "Sales rank", ColumnType::Number),
        ];

        let rows = [
            ("1", "A", "upper left", "8.20", "35", "2"),
            ("2", "B", "lower right", "7.15", "67", "3"),
            ("3", "C", "lower left", "7.25", "22", "8"),
            ("4", "D", "upper right", "8.35", "52", "1"),
        ]
        .into_iter()
        .map(|(id, item, placement, eye_time, infoclick, sales_rank)| {
            DataRow::new(id)
                .with_cell("item", item)
                .with_cell("placement", placement)
                .with_cell("eye_time", eye_time)
                .with_cell("infoclick", infoclick)
                .with_cell("sales_rank", sales_rank)
        })
        .collect();

        Self {
            title: "GMAT™ Data Insights Question".to_string(),
            description: "Practice Question - Data Analysis".to_string(),
            data_columns: columns,
            data_rows: rows,
            statements: vec![
                QuestionStatement {
                    id: "1".to_string(),
                    text: "Infoclick percentage is directly proportional to mean eye time."
                        .to_string(),
                    correct_answer: Answer::No,
                },
                QuestionStatement {
                    id: "2".to_string(),
                    text: "The 2 items having the greatest sales were advertised in the upper part of the web page."
                        .to_string(),
                    correct_answer: Answer::Yes,
                },
            ],
            instructions: DEFAULT_STATEMENT_INSTRUCTIONS.to_string(),
            context_description: Some(EXAMPLE_CONTEXT.to_string()),
            ..Self::blank(QuestionFormat::YesNoStatements)
        }
    }

    /// 按当前格式取出有效字段组
    pub fn body(&self) -> FormatBody<'_> {
        match self.format {
            QuestionFormat::YesNoStatements => FormatBody::YesNoStatements {
                columns: &self.data_columns,
                rows: &self.data_rows,
                statements: &self.statements,
                context_description: self.context_description.as_deref().unwrap_or_default(),
            },
            QuestionFormat::MultiColumnSelection => FormatBody::MultiColumnSelection {
                columns: self.selection_columns.as_deref().unwrap_or_default(),
                options: self.selection_options.as_deref().unwrap_or_default(),
            },
            QuestionFormat::DataSufficiency => FormatBody::DataSufficiency {
                question_text: self.question_text.as_deref().unwrap_or_default(),
                statements: self.sufficiency_statements.as_deref().unwrap_or_default(),
                options: self.sufficiency_options.as_deref().unwrap_or_default(),
            },
        }
    }

}

pub const DEFAULT_STATEMENT_INSTRUCTIONS: &str = "For each of the following statements about this data, select Yes if the statement can be inferred from the given information. Otherwise, select No.";

pub const DEFAULT_SELECTION_INSTRUCTIONS: &str = "In the table, select for each option...";

const EXAMPLE_CONTEXT: &str = "The table lists data on each of 4 items advertised by an Internet retailer on a single web page as part of a one-day sale. The term customer refers to anyone who viewed that web page on that day. For each item, the page placement denotes the quadrant of the page on which the item's advertisement appeared; the mean eye time is the average (arithmetic mean) number of seconds that each customer spent viewing the item's advertisement; the infoclick percentage is the percentage of all customers who clicked a button for more information; and the sales rank is the item's ranking based on sales, where a lesser number denotes greater sales.";

/// 生成带前缀的唯一 id（如 `col_…`、`row_…`）
pub fn fresh_id(prefix: &str) -> String {
    format!("{}_{}", prefix, Uuid::new_v4().simple())
}

#[cfg(test)]
impl Question {
    pub fn column_index(&self, key: &str) -> Option<usize> {
        self.data_columns.iter().position(|c| c.key == key)
    }
}
