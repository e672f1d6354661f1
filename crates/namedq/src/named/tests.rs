use super::*;

const ALL_STYLES: [BindStyle; 5] = [
    BindStyle::Unknown,
    BindStyle::Question,
    BindStyle::Dollar,
    BindStyle::Named,
    BindStyle::At,
];

fn names(q: &CompiledQuery) -> Vec<&str> {
    q.names().iter().map(String::as_str).collect()
}

#[test]
fn template_without_colons_is_unchanged() {
    let template = "SELECT content, ttl FROM records WHERE disabled = 0 ORDER BY name";
    for style in ALL_STYLES {
        let q = compile(template, style).unwrap();
        assert_eq!(q.sql(), template);
        assert!(q.names().is_empty());
    }
}

#[test]
fn empty_template() {
    let q = compile("", BindStyle::Dollar).unwrap();
    assert_eq!(q.sql(), "");
    assert_eq!(q.placeholder_count(), 0);
}

#[test]
fn single_placeholder_per_style() {
    let cases = [
        (BindStyle::Question, "SELECT * FROM t WHERE a = ? LIMIT 1"),
        (BindStyle::Unknown, "SELECT * FROM t WHERE a = ? LIMIT 1"),
        (BindStyle::Dollar, "SELECT * FROM t WHERE a = $1 LIMIT 1"),
        (BindStyle::At, "SELECT * FROM t WHERE a = @p1 LIMIT 1"),
        (BindStyle::Named, "SELECT * FROM t WHERE a = :x LIMIT 1"),
    ];
    for (style, expected) in cases {
        let q = compile("SELECT * FROM t WHERE a = :x LIMIT 1", style).unwrap();
        assert_eq!(q.sql(), expected, "style {style}");
        assert_eq!(names(&q), ["x"]);
    }
}

#[test]
fn counters_follow_source_order() {
    let q = compile("UPDATE t SET b = :b WHERE a = :a", BindStyle::Dollar).unwrap();
    assert_eq!(q.sql(), "UPDATE t SET b = $1 WHERE a = $2");
    assert_eq!(names(&q), ["b", "a"]);

    let q = compile("UPDATE t SET b = :b WHERE a = :a", BindStyle::At).unwrap();
    assert_eq!(q.sql(), "UPDATE t SET b = @p1 WHERE a = @p2");
}

#[test]
fn repeated_name_gets_its_own_slot() {
    let q = compile(":a = :a", BindStyle::Question).unwrap();
    assert_eq!(q.sql(), "? = ?");
    assert_eq!(names(&q), ["a", "a"]);

    let q = compile(":a = :a", BindStyle::Dollar).unwrap();
    assert_eq!(q.sql(), "$1 = $2");
    assert_eq!(names(&q), ["a", "a"]);
}

#[test]
fn insert_values_list() {
    let q = compile(
        "INSERT INTO foo (a,b,c,d) VALUES (:name, :age, :first, :last)",
        BindStyle::Question,
    )
    .unwrap();
    assert_eq!(q.sql(), "INSERT INTO foo (a,b,c,d) VALUES (?, ?, ?, ?)");
    assert_eq!(names(&q), ["name", "age", "first", "last"]);
}

#[test]
fn adjacent_placeholders_without_spaces() {
    let q = compile(
        "values (:ip,:nameserver,:account)",
        BindStyle::Dollar,
    )
    .unwrap();
    assert_eq!(q.sql(), "values ($1,$2,$3)");
    assert_eq!(names(&q), ["ip", "nameserver", "account"]);
}

#[test]
fn double_colon_is_a_literal_colon() {
    for style in ALL_STYLES {
        let q = compile("a::b", style).unwrap();
        assert_eq!(q.sql(), "a:b");
        assert!(q.names().is_empty());
    }

    let q = compile("SELECT '12::30' AS t, id FROM x WHERE id = :id", BindStyle::Dollar).unwrap();
    assert_eq!(q.sql(), "SELECT '12:30' AS t, id FROM x WHERE id = $1");
    assert_eq!(names(&q), ["id"]);
}

#[test]
fn colon_equals_is_kept() {
    let q = compile("SET @x := :value", BindStyle::Question).unwrap();
    assert_eq!(q.sql(), "SET @x := ?");
    assert_eq!(names(&q), ["value"]);
}

#[test]
fn name_at_end_of_template() {
    let q = compile("select id from domains where name=:domain", BindStyle::At).unwrap();
    assert_eq!(q.sql(), "select id from domains where name=@p1");
    assert_eq!(names(&q), ["domain"]);

    let q = compile(":x", BindStyle::Named).unwrap();
    assert_eq!(q.sql(), ":x");
    assert_eq!(names(&q), ["x"]);
}

#[test]
fn underscore_and_dot_are_part_of_the_name() {
    let q = compile("WHERE id = :domain_id AND k = :meta.kind)", BindStyle::Question).unwrap();
    assert_eq!(q.sql(), "WHERE id = ? AND k = ?)");
    assert_eq!(names(&q), ["domain_id", "meta.kind"]);

    // trailing name char at the very end stays in the name
    let q = compile("WHERE id = :domain_", BindStyle::Dollar).unwrap();
    assert_eq!(q.sql(), "WHERE id = $1");
    assert_eq!(names(&q), ["domain_"]);
}

#[test]
fn unicode_letters_in_names() {
    let q = compile("SELECT :имя, :名前", BindStyle::Dollar).unwrap();
    assert_eq!(q.sql(), "SELECT $1, $2");
    assert_eq!(names(&q), ["имя", "名前"]);
}

#[test]
fn numeric_symbols_end_a_name() {
    let q = compile("SELECT :x² FROM t WHERE a = :a½ AND b = :Ⅻ", BindStyle::Dollar).unwrap();
    assert_eq!(q.sql(), "SELECT $1² FROM t WHERE a = $2½ AND b = $3Ⅻ");
    assert_eq!(names(&q), ["x", "a", ""]);

    // not consumed at the very end either
    let q = compile("WHERE a = :a²", BindStyle::Question).unwrap();
    assert_eq!(q.sql(), "WHERE a = ?²");
    assert_eq!(names(&q), ["a"]);

    let q = compile("WHERE a = :v2", BindStyle::Question).unwrap();
    assert_eq!(names(&q), ["v2"]);
}

#[test]
fn terminator_is_re_emitted() {
    let q = compile("(disabled=0 OR :include_disabled) and domain_id=:domain_id order by name", BindStyle::Dollar)
        .unwrap();
    assert_eq!(
        q.sql(),
        "(disabled=0 OR $1) and domain_id=$2 order by name"
    );
    assert_eq!(names(&q), ["include_disabled", "domain_id"]);
}

#[test]
fn colon_inside_name_is_malformed() {
    let err = compile(":a:b", BindStyle::Question).unwrap_err();
    assert!(matches!(err, DbError::MalformedTemplate { index: 2 }));

    let err = compile("SELECT x FROM t WHERE a = :abc:def", BindStyle::Dollar).unwrap_err();
    assert!(matches!(err, DbError::MalformedTemplate { index: 30 }));
}

#[test]
fn malformed_index_counts_chars_not_bytes() {
    let err = compile("é :a:b", BindStyle::Question).unwrap_err();
    assert!(matches!(err, DbError::MalformedTemplate { index: 4 }));
}

#[test]
fn trailing_lone_colon_is_dropped() {
    let q = compile("SELECT 1:", BindStyle::Question).unwrap();
    assert_eq!(q.sql(), "SELECT 1");
    assert!(q.names().is_empty());
}

#[test]
fn counters_restart_per_compile() {
    let first = compile("a = :a AND b = :b", BindStyle::Dollar).unwrap();
    let second = compile("c = :c", BindStyle::Dollar).unwrap();
    assert_eq!(first.sql(), "a = $1 AND b = $2");
    assert_eq!(second.sql(), "c = $1");
}

#[test]
fn into_parts_matches_accessors() {
    let q = compile("x = :x", BindStyle::At).unwrap();
    let (sql, names) = q.clone().into_parts();
    assert_eq!(sql, q.sql());
    assert_eq!(names, q.names());
}
