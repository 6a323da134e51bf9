//! 参数修饰器与辅助函数。

use crate::flavor::Flavor;
use crate::value::SqlValue;
use dyn_clone::DynClone;

/// Escape：把 `$` 替换为 `$$`，避免标识符被 `Args::compile` 当成表达式。
pub fn escape(ident: &str) -> String {
    ident.replace('$', "$$")
}

/// EscapeAll：批量 Escape。
pub fn escape_all(idents: impl IntoIterator<Item = impl AsRef<str>>) -> Vec<String> {
    idents.into_iter().map(|s| escape(s.as_ref())).collect()
}

/// Raw：标记为原样拼入 SQL（不会成为参数占位符）。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Raw {
    pub(crate) expr: String,
}

pub fn raw(expr: impl Into<String>) -> Arg {
    Arg::Raw(Raw { expr: expr.into() })
}

/// Builder/Args 体系使用的动态参数类型。
#[derive(Clone)]
pub enum Arg {
    Value(SqlValue),
    Raw(Raw),
    Builder(Box<dyn Builder>),
}

impl Arg {
    /// 是否为 Null 标量（空值排除策略只看标量 Null；Raw/嵌套 builder 永远保留）。
    pub fn is_null(&self) -> bool {
        matches!(self, Self::Value(SqlValue::Null))
    }
}

impl std::fmt::Debug for Arg {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Value(v) => f.debug_tuple("Value").field(v).finish(),
            Self::Raw(v) => f.debug_tuple("Raw").field(v).finish(),
            Self::Builder(_) => f.write_str("Builder(..)"),
        }
    }
}

impl PartialEq for Arg {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Value(a), Self::Value(b)) => a == b,
            (Self::Raw(a), Self::Raw(b)) => a == b,
            // builder 参数没有结构化相等语义
            _ => false,
        }
    }
}

/// 可嵌套构建 SQL 的统一接口。
pub trait Builder: DynClone {
    fn build(&self) -> (String, Vec<Arg>) {
        self.build_with_flavor(self.flavor(), &[])
    }

    fn build_with_flavor(&self, flavor: Flavor, initial_arg: &[Arg]) -> (String, Vec<Arg>);

    fn flavor(&self) -> Flavor;
}

dyn_clone::clone_trait_object!(Builder);

impl Builder for Box<dyn Builder> {
    fn build_with_flavor(&self, flavor: Flavor, initial_arg: &[Arg]) -> (String, Vec<Arg>) {
        (**self).build_with_flavor(flavor, initial_arg)
    }

    fn flavor(&self) -> Flavor {
        (**self).flavor()
    }
}

impl From<Box<dyn Builder>> for Arg {
    fn from(v: Box<dyn Builder>) -> Self {
        Self::Builder(v)
    }
}

impl From<SqlValue> for Arg {
    fn from(v: SqlValue) -> Self {
        Self::Value(v)
    }
}

macro_rules! arg_from_value {
    ($($t:ty),+ $(,)?) => {
        $(impl From<$t> for Arg {
            fn from(v: $t) -> Self {
                SqlValue::from(v).into()
            }
        })+
    };
}

arg_from_value!(
    bool,
    i8,
    i16,
    i32,
    i64,
    u8,
    u16,
    u32,
    u64,
    f32,
    f64,
    String,
    &'static str,
    Vec<u8>,
    time::OffsetDateTime,
);

impl<T> From<Option<T>> for Arg
where
    T: Into<SqlValue>,
{
    fn from(v: Option<T>) -> Self {
        SqlValue::from_option(v).into()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_escape() {
        assert_eq!(escape("foo"), "foo");
        assert_eq!(escape("$foo"), "$$foo");
        assert_eq!(escape("$$$"), "$$$$$$");
    }

    #[test]
    fn test_escape_all() {
        assert_eq!(
            escape_all(["foo", "$foo"]),
            vec!["foo".to_string(), "$$foo".to_string()]
        );
    }

    #[test]
    fn arg_is_null() {
        assert!(Arg::from(Option::<i64>::None).is_null());
        assert!(!Arg::from(0_i64).is_null());
        assert!(!raw("NOW()").is_null());
    }
}
