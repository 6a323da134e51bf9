//! insert-builder：MySQL 方言的 INSERT/upsert 语句构建与参数收集库。
//!
//! 核心是 [`InsertBuilder`]：按写入顺序累积列/值、可选的
//! `ON DUPLICATE KEY UPDATE` 快照、可配置的空值排除策略，
//! 最终渲染参数化 SQL 与绑定参数序列。

pub mod args;
#[cfg(test)]
mod args_tests;
pub mod builder;
#[cfg(test)]
mod builder_tests;
pub mod entity;
pub mod flavor;
pub mod insert;
pub mod interpolate;
pub mod macros;
pub use crate::macros::*;
pub mod modifiers;
pub mod string_builder;
pub mod value;

pub use crate::args::Args;
pub use crate::builder::{build, buildf, with_flavor};
pub use crate::entity::NamedEntity;
pub use crate::flavor::{
    Flavor, InterpolateError, default_flavor, set_default_flavor, set_default_flavor_scoped,
};
pub use crate::insert::InsertBuilder;
pub use crate::modifiers::{Arg, Builder, Raw, escape, escape_all, raw};
pub use crate::value::{SqlDateTime, SqlValue};
