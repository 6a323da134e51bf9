//! Args：存储参数，并把含 `$` 语法的 format 编译成最终 SQL 与参数序列。

use crate::flavor::Flavor;
use crate::flavor::default_flavor;
use crate::modifiers::{Arg, Raw};
use crate::string_builder::StringBuilder;

/// Args 存储 SQL 参数。
///
/// format 语法：
/// - `$$`：字面 `$`；
/// - `$<n>`：引用第 n 个参数（0 起）；
/// - `$?`：引用“上一个引用的下一个”参数。
#[derive(Debug, Clone)]
pub struct Args {
    /// 默认 flavor，用于 `compile`。
    pub flavor: Flavor,

    pub(crate) arg_values: Vec<Arg>,
}

impl Default for Args {
    fn default() -> Self {
        Self {
            flavor: default_flavor(),
            arg_values: Vec::new(),
        }
    }
}

impl Args {
    /// 追加一个参数并返回内部占位符（`$0/$1/...`）。
    pub fn add(&mut self, arg: impl Into<Arg>) -> String {
        let idx = self.arg_values.len();
        self.arg_values.push(arg.into());
        format!("${idx}")
    }

    /// 用新参数替换某个 `$n` 占位符对应的值；占位符非法或越界时静默忽略。
    pub fn replace(&mut self, placeholder: &str, arg: impl Into<Arg>) {
        if let Some(idx) = parse_placeholder(placeholder)
            && idx < self.arg_values.len()
        {
            self.arg_values[idx] = arg.into();
        }
    }

    /// 读取某个 `$n` 占位符当前绑定的值。
    pub fn value(&self, placeholder: &str) -> Option<&Arg> {
        self.arg_values.get(parse_placeholder(placeholder)?)
    }

    /// 按默认 flavor 编译 format。
    pub fn compile(&self, format: &str, initial_value: &[Arg]) -> (String, Vec<Arg>) {
        self.compile_with_flavor(format, self.flavor, initial_value)
    }

    /// 编译 format，并用 `flavor` 输出最终占位符。
    pub fn compile_with_flavor(
        &self,
        format: &str,
        flavor: Flavor,
        initial_value: &[Arg],
    ) -> (String, Vec<Arg>) {
        let mut offset = 0usize;
        let mut ctx = CompileContext {
            buf: StringBuilder::new(),
            flavor,
            values: initial_value.to_vec(),
        };

        let mut rest = format;
        while let Some(pos) = rest.find('$') {
            if pos > 0 {
                ctx.buf.write_str(&rest[..pos]);
            }
            rest = &rest[pos + 1..];

            if rest.is_empty() {
                ctx.buf.write_char('$');
                break;
            }

            let b0 = rest.as_bytes()[0];
            match b0 {
                b'$' => {
                    ctx.buf.write_char('$');
                    rest = &rest[1..];
                }
                b'0'..=b'9' => {
                    let (r, off) = self.compile_digits(&mut ctx, rest, offset);
                    rest = r;
                    offset = off;
                }
                b'?' => {
                    let (r, off) = self.compile_successive(&mut ctx, &rest[1..], offset);
                    rest = r;
                    offset = off;
                }
                _ => {
                    ctx.buf.write_char('$');
                }
            }
        }

        if !rest.is_empty() {
            ctx.buf.write_str(rest);
        }

        (ctx.buf.into_string(), ctx.values)
    }

    fn compile_digits<'a>(
        &self,
        ctx: &mut CompileContext,
        format: &'a str,
        offset: usize,
    ) -> (&'a str, usize) {
        let mut i = 0usize;
        for b in format.as_bytes() {
            if b.is_ascii_digit() {
                i += 1;
            } else {
                break;
            }
        }
        let digits = &format[..i];
        let rest = &format[i..];
        if let Ok(pointer) = digits.parse::<usize>() {
            return self.compile_successive(ctx, rest, pointer);
        }
        (rest, offset)
    }

    fn compile_successive<'a>(
        &self,
        ctx: &mut CompileContext,
        format: &'a str,
        offset: usize,
    ) -> (&'a str, usize) {
        if offset >= self.arg_values.len() {
            ctx.buf.write_str("/* INVALID ARG $");
            ctx.buf.write_str(&offset.to_string());
            ctx.buf.write_str(" */");
            return (format, offset);
        }
        let arg = self.arg_values[offset].clone();
        ctx.write_value(&arg);
        (format, offset + 1)
    }
}

fn parse_placeholder(placeholder: &str) -> Option<usize> {
    let digits = placeholder.strip_prefix('$')?;
    if digits.is_empty() || !digits.as_bytes().iter().all(|b| b.is_ascii_digit()) {
        return None;
    }
    digits.parse().ok()
}

#[derive(Debug)]
struct CompileContext {
    buf: StringBuilder,
    flavor: Flavor,
    values: Vec<Arg>,
}

impl CompileContext {
    fn write_value(&mut self, arg: &Arg) {
        match arg {
            Arg::Builder(b) => {
                let (sql, args) = b.build_with_flavor(self.flavor, &self.values);
                self.buf.write_str(&sql);
                self.values = args;
            }
            Arg::Raw(Raw { expr }) => self.buf.write_str(expr),
            Arg::Value(_) => {
                match self.flavor {
                    Flavor::MySQL | Flavor::SQLite => {
                        self.buf.write_char('?');
                    }
                    Flavor::PostgreSQL => {
                        let idx = self.values.len() + 1;
                        self.buf.write_char('$');
                        self.buf.write_str(&idx.to_string());
                    }
                }
                self.values.push(arg.clone());
            }
        }
    }
}
