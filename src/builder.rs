//! Build / Buildf 等自由拼接能力：把任意 SQL 片段与参数组合成 `Builder`。

use crate::args::Args;
use crate::flavor::Flavor;
use crate::modifiers::{Arg, Builder, escape};

#[derive(Debug, Clone)]
struct CompiledBuilder {
    args: Args,
    format: String,
}

impl Builder for CompiledBuilder {
    fn build_with_flavor(&self, flavor: Flavor, initial_arg: &[Arg]) -> (String, Vec<Arg>) {
        self.args
            .compile_with_flavor(&self.format, flavor, initial_arg)
    }

    fn flavor(&self) -> Flavor {
        self.args.flavor
    }
}

#[derive(Clone)]
struct FlavoredBuilder {
    inner: Box<dyn Builder>,
    flavor: Flavor,
}

impl Builder for FlavoredBuilder {
    fn build_with_flavor(&self, flavor: Flavor, initial_arg: &[Arg]) -> (String, Vec<Arg>) {
        self.inner.build_with_flavor(flavor, initial_arg)
    }

    fn flavor(&self) -> Flavor {
        self.flavor
    }
}

/// 给 builder 绑定默认 flavor。
pub fn with_flavor(builder: impl Builder + 'static, flavor: Flavor) -> Box<dyn Builder> {
    Box::new(FlavoredBuilder {
        inner: Box::new(builder),
        flavor,
    })
}

/// 使用 `$` 语法（`$$`/`$n`/`$?`）构建自由片段；参数可以是值、Raw 或嵌套 builder。
pub fn build(
    format: impl Into<String>,
    args_in: impl IntoIterator<Item = impl Into<Arg>>,
) -> Box<dyn Builder> {
    let mut args = Args::default();
    for a in args_in {
        args.add(a);
    }
    Box::new(CompiledBuilder {
        args,
        format: format.into(),
    })
}

/// 类似 format! 的自由拼接，只支持 `%v`/`%s`/`%%`。
pub fn buildf(format: &str, args_in: impl IntoIterator<Item = impl Into<Arg>>) -> Box<dyn Builder> {
    let mut args = Args::default();
    let escaped = escape(format);
    let mut out = String::new();

    let mut it = args_in.into_iter();
    let mut chars = escaped.chars().peekable();
    while let Some(c) = chars.next() {
        if c == '%' {
            match chars.peek().copied() {
                Some('v') | Some('s') => {
                    chars.next();
                    if let Some(a) = it.next() {
                        let ph = args.add(a.into());
                        out.push_str(&ph);
                    } else {
                        // 参数不足：按字面输出，保持问题可见
                        out.push('%');
                        out.push('v');
                    }
                }
                Some('%') => {
                    chars.next();
                    out.push('%');
                }
                _ => out.push('%'),
            }
        } else {
            out.push(c);
        }
    }

    Box::new(CompiledBuilder { args, format: out })
}
