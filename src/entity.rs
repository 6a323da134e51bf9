//! NamedEntity：带名字的实体记录（id + 可空 name），按值比较。

use crate::insert::InsertBuilder;

/// 简单的命名实体：`id` 默认 0 表示未分配，`name` 可空。
/// 相等与哈希对两个字段做结构化比较，无任何校验逻辑。
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct NamedEntity {
    pub id: i64,
    pub name: Option<String>,
}

impl NamedEntity {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_name(name: impl Into<String>) -> Self {
        Self {
            id: 0,
            name: Some(name.into()),
        }
    }

    /// 生成写入该记录的 InsertBuilder。id 为 0（未分配）时不写入 id 列，
    /// 交给数据库自增；name 为 None 时按默认策略被排除。
    pub fn insert_into(&self, table: &str) -> InsertBuilder {
        let mut ib = InsertBuilder::insert_into(table);
        if self.id != 0 {
            ib.value("id", self.id);
        }
        ib.value("name", self.name.clone());
        ib
    }
}
