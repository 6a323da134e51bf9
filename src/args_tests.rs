#[cfg(test)]
mod tests {
    use crate::args::Args;
    use crate::value::SqlValue;
    use crate::{Arg, Flavor, raw};
    use pretty_assertions::assert_eq;

    fn mysql_args() -> Args {
        Args {
            flavor: Flavor::MySQL,
            ..Args::default()
        }
    }

    #[test]
    fn add_returns_sequential_placeholders() {
        let mut args = mysql_args();
        assert_eq!(args.add(1_i64), "$0");
        assert_eq!(args.add("x"), "$1");
    }

    #[test]
    fn replace_swaps_value_in_place() {
        let mut args = mysql_args();
        let ph = args.add(1_i64);
        args.replace(&ph, 9_i64);
        assert_eq!(args.value(&ph), Some(&Arg::Value(SqlValue::I64(9))));
    }

    #[test]
    fn replace_ignores_invalid_placeholders() {
        let mut args = mysql_args();
        let ph = args.add(1_i64);
        args.replace("$9", 2_i64);
        args.replace("abc", 2_i64);
        args.replace("$", 2_i64);
        assert_eq!(args.value(&ph), Some(&Arg::Value(SqlValue::I64(1))));
    }

    #[test]
    fn value_reads_back_current_binding() {
        let mut args = mysql_args();
        let ph = args.add("a");
        assert_eq!(
            args.value(&ph),
            Some(&Arg::Value(SqlValue::String("a".into())))
        );
        assert_eq!(args.value("$7"), None);
        assert_eq!(args.value("x0"), None);
    }

    #[test]
    fn compile_digit_references() {
        let mut args = mysql_args();
        args.add(1_i64);
        args.add(2_i64);
        let (sql, values) = args.compile("a=$0 AND b=$1 AND c=$0", &[]);
        assert_eq!(sql, "a=? AND b=? AND c=?");
        assert_eq!(values.len(), 3);
        assert_eq!(values[2], Arg::Value(SqlValue::I64(1)));
    }

    #[test]
    fn compile_successive_references() {
        let mut args = mysql_args();
        args.add(1_i64);
        args.add(2_i64);
        let (sql, values) = args.compile("($?,$?)", &[]);
        assert_eq!(sql, "(?,?)");
        assert_eq!(values.len(), 2);
    }

    #[test]
    fn compile_escaped_dollar() {
        let args = mysql_args();
        let (sql, values) = args.compile("cost$$usd", &[]);
        assert_eq!(sql, "cost$usd");
        assert!(values.is_empty());
    }

    #[test]
    fn compile_out_of_range_is_visible() {
        let args = mysql_args();
        let (sql, _values) = args.compile("x=$3", &[]);
        assert_eq!(sql, "x=/* INVALID ARG $3 */");
    }

    #[test]
    fn compile_raw_is_inlined() {
        let mut args = mysql_args();
        args.add(raw("NOW()"));
        let (sql, values) = args.compile("t=$0", &[]);
        assert_eq!(sql, "t=NOW()");
        assert!(values.is_empty());
    }

    #[test]
    fn compile_postgres_numbers_after_initial_args() {
        let mut args = mysql_args();
        args.add(1_i64);
        let initial = [Arg::Value(SqlValue::I64(0))];
        let (sql, values) = args.compile_with_flavor("x=$0", Flavor::PostgreSQL, &initial);
        assert_eq!(sql, "x=$2");
        assert_eq!(values.len(), 2);
    }
}
