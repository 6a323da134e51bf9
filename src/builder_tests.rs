#[cfg(test)]
mod tests {
    use crate::modifiers::{Arg, Builder};
    use crate::{Flavor, InsertBuilder, build, buildf, set_default_flavor_scoped, with_flavor};
    use pretty_assertions::assert_eq;

    #[test]
    fn build_with_dollar_syntax() {
        let _g = set_default_flavor_scoped(Flavor::MySQL);
        let b = build("SELECT * FROM t WHERE id=$0 AND status=$1", [1_i64, 2_i64]);
        let (sql, args) = b.build();
        assert_eq!(sql, "SELECT * FROM t WHERE id=? AND status=?");
        assert_eq!(args.len(), 2);
    }

    #[test]
    fn buildf_percent_syntax() {
        let _g = set_default_flavor_scoped(Flavor::MySQL);
        let b = buildf("SET GLOBAL limit=%v", [100_i64]);
        let (sql, args) = b.build();
        assert_eq!(sql, "SET GLOBAL limit=?");
        assert_eq!(args.len(), 1);
    }

    #[test]
    fn buildf_missing_args_stay_literal() {
        let _g = set_default_flavor_scoped(Flavor::MySQL);
        let b = buildf("a=%v b=%v", [1_i64]);
        let (sql, args) = b.build();
        assert_eq!(sql, "a=? b=%v");
        assert_eq!(args.len(), 1);
    }

    #[test]
    fn nested_insert_builder() {
        let _g = set_default_flavor_scoped(Flavor::MySQL);
        let mut ib = InsertBuilder::insert_into("t");
        ib.value("a", 1_i64);

        let b = build("EXPLAIN $?", [Arg::Builder(Box::new(ib))]);
        let (sql, args) = b.build();
        assert_eq!(sql, "EXPLAIN INSERT INTO t (a) VALUES (?)");
        assert_eq!(args.len(), 1);
    }

    #[test]
    fn with_flavor_pins_default() {
        let _g = set_default_flavor_scoped(Flavor::MySQL);
        let mut ib = InsertBuilder::insert_into("t");
        ib.value("a", 1_i64);

        let b = with_flavor(ib, Flavor::PostgreSQL);
        let (sql, _args) = b.build();
        assert_eq!(sql, "INSERT INTO t (a) VALUES ($1)");
    }
}
