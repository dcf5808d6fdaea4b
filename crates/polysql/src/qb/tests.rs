//! Cross-statement scenarios exercising the full build-and-compile path.

use crate::dialect::DialectKind;
use crate::model::{CaseExpr, Direction, WindowSpec};
use crate::qb;
use crate::value::Value;

#[test]
fn select_with_where_on_postgres() {
    let stmt = qb::select(&["id", "name"])
        .unwrap()
        .from("users")
        .unwrap()
        .gt("age", 18i64)
        .unwrap()
        .compile(DialectKind::Postgres)
        .unwrap();
    assert_eq!(stmt.sql, r#"SELECT "id", "name" FROM "users" WHERE "age" > $1"#);
    assert_eq!(stmt.params, vec![Value::Int(18)]);
}

#[test]
fn update_on_mysql() {
    let stmt = qb::update("users")
        .unwrap()
        .set("name", "John")
        .unwrap()
        .eq("id", 1i64)
        .unwrap()
        .compile(DialectKind::MySql)
        .unwrap();
    assert_eq!(stmt.sql, "UPDATE `users` SET `name` = ? WHERE `id` = ?");
    assert_eq!(stmt.params, vec![Value::Text("John".into()), Value::Int(1)]);
}

#[test]
fn delete_without_where_still_compiles() {
    let stmt = qb::delete()
        .from("users")
        .unwrap()
        .compile(DialectKind::Postgres)
        .unwrap();
    assert_eq!(stmt.sql, r#"DELETE FROM "users""#);
    assert!(stmt.params.is_empty());
}

#[test]
fn row_number_window_clause() {
    let spec = WindowSpec::new()
        .partition_by(&["dept"])
        .unwrap()
        .order_by("salary", Direction::Desc)
        .unwrap();
    let stmt = qb::select_all()
        .from("t")
        .unwrap()
        .row_number(spec)
        .compile(DialectKind::Postgres)
        .unwrap();
    assert_eq!(
        stmt.sql,
        r#"SELECT *, ROW_NUMBER() OVER (PARTITION BY "dept" ORDER BY "salary" DESC) FROM "t""#
    );
}

#[test]
fn ntile_zero_is_rejected_before_mutation() {
    let err = qb::select_all()
        .from("t")
        .unwrap()
        .ntile(0, WindowSpec::new())
        .unwrap_err();
    assert!(err.is_validation());
}

#[test]
fn compilation_is_deterministic() {
    let query = qb::select(&["id"])
        .unwrap()
        .from("users")
        .unwrap()
        .eq("status", "active")
        .unwrap()
        .in_list("role", vec!["admin", "user"])
        .unwrap()
        .order_by_desc("created_at")
        .unwrap()
        .limit(10);
    let first = query.compile(DialectKind::Postgres).unwrap();
    let second = query.compile(DialectKind::Postgres).unwrap();
    assert_eq!(first, second);
}

#[test]
fn one_model_recompiles_under_every_dialect() {
    let query = qb::select_all()
        .from("users")
        .unwrap()
        .eq("status", "active")
        .unwrap();
    assert_eq!(
        query.to_sql(DialectKind::Postgres).unwrap(),
        r#"SELECT * FROM "users" WHERE "status" = $1"#
    );
    assert_eq!(
        query.to_sql(DialectKind::MySql).unwrap(),
        "SELECT * FROM `users` WHERE `status` = ?"
    );
    assert_eq!(
        query.to_sql(DialectKind::Sqlite).unwrap(),
        r#"SELECT * FROM "users" WHERE "status" = ?"#
    );
}

#[test]
fn placeholders_align_with_params() {
    let stmt = qb::select_all()
        .from("users")
        .unwrap()
        .eq("status", "active")
        .unwrap()
        .in_list("id", vec![1i64, 2, 3])
        .unwrap()
        .between("age", 18i64, 65i64)
        .unwrap()
        .having_op("COUNT(*)", ">", 5i64)
        .unwrap()
        .compile(DialectKind::Postgres)
        .unwrap();
    for index in 1..=stmt.params.len() {
        assert!(stmt.sql.contains(&format!("${index}")), "missing ${index}");
    }
    assert!(!stmt.sql.contains(&format!("${}", stmt.params.len() + 1)));
    assert_eq!(stmt.params.len(), 7);
}

#[test]
fn or_connective_is_preserved() {
    let stmt = qb::select_all()
        .from("users")
        .unwrap()
        .eq("role", "admin")
        .unwrap()
        .or_where_op("role", "=", "superuser")
        .unwrap()
        .compile(DialectKind::Postgres)
        .unwrap();
    assert_eq!(
        stmt.sql,
        r#"SELECT * FROM "users" WHERE "role" = $1 OR "role" = $2"#
    );
}

#[test]
fn raw_fragment_binds_its_params() {
    let stmt = qb::select_all()
        .from("users")
        .unwrap()
        .where_raw(
            "age > ? AND age < ?",
            vec![Value::Int(18), Value::Int(65)],
        )
        .unwrap()
        .compile(DialectKind::Postgres)
        .unwrap();
    assert_eq!(stmt.sql, r#"SELECT * FROM "users" WHERE age > $1 AND age < $2"#);
    assert_eq!(stmt.params, vec![Value::Int(18), Value::Int(65)]);
}

#[test]
fn empty_in_list_folds_to_false() {
    let stmt = qb::select_all()
        .from("users")
        .unwrap()
        .in_list::<i64>("id", vec![])
        .unwrap()
        .compile(DialectKind::Postgres)
        .unwrap();
    assert_eq!(stmt.sql, r#"SELECT * FROM "users" WHERE 1=0"#);
    let stmt = qb::select_all()
        .from("users")
        .unwrap()
        .not_in::<i64>("id", vec![])
        .unwrap()
        .compile(DialectKind::Postgres)
        .unwrap();
    assert_eq!(stmt.sql, r#"SELECT * FROM "users" WHERE 1=1"#);
}

#[test]
fn join_compares_columns_not_params() {
    let stmt = qb::select_all()
        .from("users")
        .unwrap()
        .inner_join("orders", "users.id", "orders.user_id")
        .unwrap()
        .compile(DialectKind::Postgres)
        .unwrap();
    assert_eq!(
        stmt.sql,
        r#"SELECT * FROM "users" INNER JOIN "orders" ON "users"."id" = "orders"."user_id""#
    );
    assert!(stmt.params.is_empty());
}

#[test]
fn from_subquery_is_parenthesized_and_aliased() {
    let inner = qb::select(&["id"])
        .unwrap()
        .from("orders")
        .unwrap()
        .gt("amount", 100i64)
        .unwrap();
    let stmt = qb::select_all()
        .from_subquery(inner, "big_orders")
        .unwrap()
        .compile(DialectKind::Postgres)
        .unwrap();
    assert_eq!(
        stmt.sql,
        r#"SELECT * FROM (SELECT "id" FROM "orders" WHERE "amount" > $1) AS "big_orders""#
    );
    assert_eq!(stmt.params, vec![Value::Int(100)]);
}

#[test]
fn cte_parameters_share_the_numbering() {
    let active = qb::select(&["id"])
        .unwrap()
        .from("users")
        .unwrap()
        .eq("status", "active")
        .unwrap();
    let stmt = qb::select_all()
        .with("active_users", active)
        .unwrap()
        .from("active_users")
        .unwrap()
        .gt("id", 10i64)
        .unwrap()
        .compile(DialectKind::Postgres)
        .unwrap();
    assert_eq!(
        stmt.sql,
        r#"WITH "active_users" AS (SELECT "id" FROM "users" WHERE "status" = $1) SELECT * FROM "active_users" WHERE "id" > $2"#
    );
    assert_eq!(stmt.params.len(), 2);
}

#[test]
fn recursive_cte_promotes_the_with_list() {
    let base = qb::select(&["id", "parent_id"])
        .unwrap()
        .from("categories")
        .unwrap()
        .is_null("parent_id")
        .unwrap();
    let stmt = qb::select_all()
        .with_recursive("tree", base)
        .unwrap()
        .from("tree")
        .unwrap()
        .compile(DialectKind::Postgres)
        .unwrap();
    assert!(stmt.sql.starts_with("WITH RECURSIVE \"tree\" AS ("));
}

#[test]
fn set_operations_compile_recursively() {
    let other = qb::select(&["id"]).unwrap().from("archived").unwrap();
    let stmt = qb::select(&["id"])
        .unwrap()
        .from("users")
        .unwrap()
        .union(other)
        .compile(DialectKind::Postgres)
        .unwrap();
    assert_eq!(stmt.sql, r#"SELECT "id" FROM "users" UNION SELECT "id" FROM "archived""#);
}

#[test]
fn minus_compiles_as_except() {
    let other = qb::select(&["id"]).unwrap().from("banned").unwrap();
    let stmt = qb::select(&["id"])
        .unwrap()
        .from("users")
        .unwrap()
        .minus(other)
        .compile(DialectKind::Postgres)
        .unwrap();
    assert!(stmt.sql.ends_with(r#"EXCEPT SELECT "id" FROM "banned""#));
}

#[test]
fn pivot_is_gated_per_dialect() {
    let query = qb::select_all()
        .from("sales")
        .unwrap()
        .pivot("SUM(amount)", "month", vec!["jan".into(), "feb".into()])
        .unwrap();

    let stmt = query.compile(DialectKind::Postgres).unwrap();
    assert_eq!(
        stmt.sql,
        r#"SELECT * FROM "sales" PIVOT (SUM(amount) FOR "month" IN ($1, $2))"#
    );

    let err = query.compile(DialectKind::MySql).unwrap_err();
    match err {
        crate::SqlError::Unsupported {
            feature,
            dialect,
            alternative,
        } => {
            assert_eq!(feature, "PIVOT");
            assert_eq!(dialect, "mysql");
            assert_eq!(alternative, "CASE expressions with aggregation");
        }
        other => panic!("expected unsupported error, got {other:?}"),
    }
    assert!(query.compile(DialectKind::Sqlite).is_err());
}

#[test]
fn ordinality_is_postgres_only() {
    let query = qb::select_all()
        .from("events")
        .unwrap()
        .with_ordinality(Some("n"))
        .unwrap();
    assert_eq!(
        query.to_sql(DialectKind::Postgres).unwrap(),
        r#"SELECT * FROM "events" WITH ORDINALITY AS "n""#
    );
    assert!(query.compile(DialectKind::Sqlite).unwrap_err().is_unsupported());
}

#[test]
fn case_expression_binds_branch_results() {
    let case = CaseExpr::new()
        .when("score >= 90", "A")
        .unwrap()
        .when("score >= 80", "B")
        .unwrap()
        .otherwise("F")
        .alias("grade")
        .unwrap();
    let stmt = qb::select_all()
        .select_case(case)
        .unwrap()
        .from("results")
        .unwrap()
        .compile(DialectKind::Postgres)
        .unwrap();
    assert_eq!(
        stmt.sql,
        r#"SELECT CASE WHEN score >= 90 THEN $1 WHEN score >= 80 THEN $2 WHEN 1=1 THEN $3 END AS "grade" FROM "results""#
    );
    assert_eq!(stmt.params.len(), 3);
}

#[test]
fn json_extract_varies_by_dialect() {
    let query = qb::select_all()
        .json_extract("data", "$.user.name", Some("user_name"))
        .unwrap()
        .from("events")
        .unwrap();
    assert_eq!(
        query.to_sql(DialectKind::Postgres).unwrap(),
        r#"SELECT "data" ->> $1 AS "user_name" FROM "events""#
    );
    assert_eq!(
        query.to_sql(DialectKind::Sqlite).unwrap(),
        r#"SELECT JSON_EXTRACT("data", ?) AS "user_name" FROM "events""#
    );
}

#[test]
fn array_slice_is_postgres_only() {
    let query = qb::select_all()
        .array_slice("tags", 1, 3, None)
        .unwrap()
        .from("posts")
        .unwrap();
    assert_eq!(
        query.to_sql(DialectKind::Postgres).unwrap(),
        r#"SELECT ("tags")[1:3] FROM "posts""#
    );
    assert!(query.compile(DialectKind::MySql).unwrap_err().is_unsupported());
}

#[test]
fn batch_insert_emits_one_tuple_per_row() {
    let stmt = qb::insert("users")
        .unwrap()
        .rows(vec![
            vec![("name", "a".into()), ("age", 30i64.into())],
            vec![("name", "b".into()), ("age", 40i64.into())],
        ])
        .unwrap()
        .compile(DialectKind::MySql)
        .unwrap();
    assert_eq!(
        stmt.sql,
        "INSERT INTO `users` (`name`, `age`) VALUES (?, ?), (?, ?)"
    );
    assert_eq!(stmt.params.len(), 4);
}

#[test]
fn upsert_compiles_to_on_conflict_on_postgres() {
    let stmt = qb::insert("users")
        .unwrap()
        .set("email", "alice@example.com")
        .unwrap()
        .on_conflict(&["email"])
        .unwrap()
        .do_update()
        .set_excluded("email")
        .unwrap()
        .finish()
        .unwrap()
        .compile(DialectKind::Postgres)
        .unwrap();
    assert_eq!(
        stmt.sql,
        r#"INSERT INTO "users" ("email") VALUES ($1) ON CONFLICT ("email") DO UPDATE SET "email" = EXCLUDED."email""#
    );
}

#[test]
fn upsert_compiles_to_on_duplicate_key_on_mysql() {
    let insert = qb::insert("users")
        .unwrap()
        .set("email", "alice@example.com")
        .unwrap();

    let update = insert
        .clone()
        .on_conflict(&["email"])
        .unwrap()
        .do_update()
        .set_excluded("email")
        .unwrap()
        .finish()
        .unwrap()
        .compile(DialectKind::MySql)
        .unwrap();
    assert_eq!(
        update.sql,
        "INSERT INTO `users` (`email`) VALUES (?) ON DUPLICATE KEY UPDATE `email` = VALUES(`email`)"
    );

    let nothing = insert
        .on_conflict(&["email"])
        .unwrap()
        .do_nothing()
        .compile(DialectKind::MySql)
        .unwrap();
    assert_eq!(nothing.sql, "INSERT IGNORE INTO `users` (`email`) VALUES (?)");
}

#[test]
fn insert_returning_on_postgres() {
    let stmt = qb::insert("users")
        .unwrap()
        .set("name", "alice")
        .unwrap()
        .returning(&["id"])
        .unwrap()
        .compile(DialectKind::Postgres)
        .unwrap();
    assert_eq!(
        stmt.sql,
        r#"INSERT INTO "users" ("name") VALUES ($1) RETURNING "id""#
    );
}

#[test]
fn values_are_sanitized_before_binding() {
    let stmt = qb::insert("notes")
        .unwrap()
        .set("body", "it's a test")
        .unwrap()
        .compile(DialectKind::Postgres)
        .unwrap();
    assert_eq!(stmt.params, vec![Value::Text("it''s a test".into())]);
}

#[test]
fn group_by_having_order_and_pagination() {
    let stmt = qb::select(&["user_id", "COUNT(*)"])
        .unwrap()
        .from("orders")
        .unwrap()
        .group_by(&["user_id"])
        .unwrap()
        .having_op("COUNT(*)", ">", 5i64)
        .unwrap()
        .order_by_asc("user_id")
        .unwrap()
        .paginate(2, 25)
        .compile(DialectKind::Postgres)
        .unwrap();
    assert_eq!(
        stmt.sql,
        r#"SELECT "user_id", COUNT(*) FROM "orders" GROUP BY "user_id" HAVING COUNT(*) > $1 ORDER BY "user_id" ASC LIMIT 25 OFFSET 25"#
    );
}

#[test]
fn distinct_select() {
    let stmt = qb::select(&["country"])
        .unwrap()
        .from("users")
        .unwrap()
        .distinct()
        .compile(DialectKind::Postgres)
        .unwrap();
    assert_eq!(stmt.sql, r#"SELECT DISTINCT "country" FROM "users""#);
}
