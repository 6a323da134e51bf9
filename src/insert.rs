//! InsertBuilder：构建 INSERT / upsert 语句。
//!
//! 列按首次写入顺序排列；重复写入同名列只覆盖绑定值、不移动位置。
//! `ON DUPLICATE KEY UPDATE` 子句在调用 `on_duplicate_update` 时对当前列值
//! 做一次快照，之后对列的修改不会回流到子句里。

use crate::args::Args;
use crate::flavor::Flavor;
use crate::macros::{IntoStrings, collect_into_strings};
use crate::modifiers::{Arg, Builder, escape};
use crate::string_builder::StringBuilder;
use std::cell::RefCell;
use std::rc::Rc;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum InsertVerb {
    Insert,
    InsertIgnore,
    Replace,
}

#[derive(Debug, Clone)]
pub struct InsertBuilder {
    verb: InsertVerb,
    table: String,
    /// 列名（已 escape），首次写入顺序。
    cols: Vec<String>,
    /// 与 `cols` 一一对应的内部占位符（`$n`）。
    placeholders: Vec<String>,
    /// upsert 快照：`(列名, 占位符)`，None 表示未启用。
    dup_updates: Option<Vec<(String, String)>>,
    exclude_null_values: bool,

    args: Rc<RefCell<Args>>,
}

impl InsertBuilder {
    /// 工厂：`INSERT INTO table`。表名不做校验，由调用方保证合法。
    pub fn insert_into(table: &str) -> Self {
        Self::with_verb(InsertVerb::Insert, table)
    }

    /// 工厂：INSERT-IGNORE 形式，动词按 build 时的 flavor 决定
    /// （MySQL `INSERT IGNORE` / SQLite `INSERT OR IGNORE` /
    /// PostgreSQL `INSERT ... ON CONFLICT DO NOTHING`）。
    pub fn insert_ignore_into(table: &str) -> Self {
        Self::with_verb(InsertVerb::InsertIgnore, table)
    }

    /// 工厂：`REPLACE INTO table`（MySQL/SQLite 方言）。
    pub fn replace_into(table: &str) -> Self {
        Self::with_verb(InsertVerb::Replace, table)
    }

    fn with_verb(verb: InsertVerb, table: &str) -> Self {
        Self {
            verb,
            table: escape(table),
            cols: Vec::new(),
            placeholders: Vec::new(),
            dup_updates: None,
            exclude_null_values: true,
            args: Rc::new(RefCell::new(Args::default())),
        }
    }

    pub fn set_flavor(&mut self, flavor: Flavor) -> Flavor {
        let mut a = self.args.borrow_mut();
        let old = a.flavor;
        a.flavor = flavor;
        old
    }

    pub fn flavor(&self) -> Flavor {
        self.args.borrow().flavor
    }

    /// 深拷贝（不与原 builder 共享 Args）。
    pub fn clone_builder(&self) -> Self {
        let mut cloned = self.clone();
        cloned.args = Rc::new(RefCell::new(self.args.borrow().clone()));
        cloned
    }

    /// 写入一列的值。值为 Null 且当前默认策略是排除空值时，本次调用不生效。
    pub fn value(&mut self, column: &str, value: impl Into<Arg>) -> &mut Self {
        let exclude = self.exclude_null_values;
        self.store(column, value.into(), exclude)
    }

    /// 写入一列的值，空值排除策略仅对本次调用使用 `exclude_if_null`，
    /// 不影响后续 `value` 调用的默认策略。
    pub fn value_with(
        &mut self,
        column: &str,
        value: impl Into<Arg>,
        exclude_if_null: bool,
    ) -> &mut Self {
        self.store(column, value.into(), exclude_if_null)
    }

    /// 设置默认的空值排除策略（初始为 true）。只影响之后的 `value` 调用，
    /// 不回溯已写入的列。
    pub fn exclude_null_values(&mut self, exclude: bool) -> &mut Self {
        self.exclude_null_values = exclude;
        self
    }

    fn store(&mut self, column: &str, arg: Arg, exclude_if_null: bool) -> &mut Self {
        if exclude_if_null && arg.is_null() {
            return self;
        }
        let col = escape(column);
        if let Some(i) = self.cols.iter().position(|c| *c == col) {
            // 已有列：原位覆盖绑定值，插入顺序不变
            let ph = self.placeholders[i].clone();
            self.args.borrow_mut().replace(&ph, arg);
        } else {
            let ph = self.args.borrow_mut().add(arg);
            self.cols.push(col);
            self.placeholders.push(ph);
        }
        self
    }

    /// 指定冲突时要更新的列。取候选列名与当前已写入列的交集，并对这些列的
    /// 当前值做快照；之后写入的列或覆盖的值都不会进入子句。重复调用以最后
    /// 一次为准。候选顺序即子句顺序，重复候选名首次出现生效。
    pub fn on_duplicate_update<T>(&mut self, columns: T) -> &mut Self
    where
        T: IntoStrings,
    {
        let mut snapshot: Vec<(String, String)> = Vec::new();
        for name in collect_into_strings(columns) {
            let col = escape(&name);
            if snapshot.iter().any(|(c, _)| *c == col) {
                continue;
            }
            let Some(i) = self.cols.iter().position(|c| *c == col) else {
                continue;
            };
            let current = self.args.borrow().value(&self.placeholders[i]).cloned();
            if let Some(arg) = current {
                let ph = self.args.borrow_mut().add(arg);
                snapshot.push((col, ph));
            }
        }
        self.dup_updates = Some(snapshot);
        self
    }

    /// 渲染 SQL 文本（按 builder 当前 flavor 的占位符）。
    pub fn generate_sql(&self) -> String {
        self.build().0
    }

    pub fn build(&self) -> (String, Vec<Arg>) {
        Builder::build(self)
    }
}

impl Builder for InsertBuilder {
    fn build_with_flavor(&self, flavor: Flavor, initial_arg: &[Arg]) -> (String, Vec<Arg>) {
        let mut buf = StringBuilder::new();

        let verb = match self.verb {
            InsertVerb::Insert => "INSERT",
            InsertVerb::InsertIgnore => flavor.prepare_insert_ignore(),
            InsertVerb::Replace => "REPLACE",
        };
        buf.write_leading(verb);
        buf.write_str(" INTO ");
        buf.write_str(&self.table);

        buf.write_str(" (");
        buf.write_str(&self.cols.join(","));
        buf.write_str(") VALUES (");
        buf.write_str(&self.placeholders.join(","));
        buf.write_char(')');

        if self.verb == InsertVerb::InsertIgnore && flavor == Flavor::PostgreSQL {
            buf.write_str(" ON CONFLICT DO NOTHING");
        }

        if let Some(updates) = &self.dup_updates
            && !updates.is_empty()
        {
            buf.write_str(" ON DUPLICATE KEY UPDATE ");
            let assignments: Vec<String> = updates
                .iter()
                .map(|(col, ph)| format!("{col}={ph}"))
                .collect();
            buf.write_str(&assignments.join(","));
        }

        self.args
            .borrow()
            .compile_with_flavor(&buf.into_string(), flavor, initial_arg)
    }

    fn flavor(&self) -> Flavor {
        self.flavor()
    }
}
