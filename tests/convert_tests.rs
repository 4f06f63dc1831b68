// SPDX-FileCopyrightText: 2025 RAprogramm
// SPDX-License-Identifier: MIT

use tsql2snow::{Converter, config::RulesConfig, convert, notice::NoticeKind};

const NIGHTLY_REPORT: &str = "\
-- nightly report
SET NOCOUNT ON;
SELECT TOP 10 [u].[Name], ISNULL([u].[Email], N'none') AS Email, CONVERT(VARCHAR(10), u.CreatedAt, 120) AS Created
FROM [dbo].[Users] u WITH (NOLOCK)
WHERE u.CreatedAt > DATEADD(dd, -7, GETDATE())
ORDER BY u.Name
OPTION (RECOMPILE);
GO
";

const NIGHTLY_REPORT_SNOWFLAKE: &str = "\
-- nightly report
SET NOCOUNT ON;
SELECT \"u\".\"Name\", COALESCE(\"u\".\"Email\", 'none') AS Email, TO_VARCHAR(u.CreatedAt, 'YYYY-MM-DD HH24:MI:SS') AS Created
FROM \"dbo\".\"Users\" u
WHERE u.CreatedAt > DATEADD(day, -7, CURRENT_TIMESTAMP())
ORDER BY u.Name LIMIT 10;
";

fn disabled(ids: &[&str]) -> RulesConfig {
    RulesConfig {
        disabled: ids.iter().map(|id| id.to_string()).collect()
    }
}

#[test]
fn test_empty_input_gives_empty_output() {
    assert_eq!(convert(""), "");
}

#[test]
fn test_conversion_is_deterministic() {
    assert_eq!(convert(NIGHTLY_REPORT), convert(NIGHTLY_REPORT));
}

#[test]
fn test_top_becomes_limit() {
    let out = convert("SELECT TOP 5 * FROM dbo.Users;");
    assert!(out.contains("LIMIT 5"));
    assert!(!out.contains("TOP"));
    assert_eq!(out, "SELECT * FROM dbo.Users LIMIT 5;");
}

#[test]
fn test_isnull_and_brackets() {
    let out = convert("SELECT ISNULL(Name,'N/A') FROM [dbo].[Users];");
    assert!(out.contains("COALESCE(Name,'N/A')"));
    assert!(out.contains("\"dbo\".\"Users\""));
    assert!(!out.contains('['));
    assert!(!out.contains(']'));
}

#[test]
fn test_getdate() {
    assert!(convert("SELECT GETDATE();").contains("CURRENT_TIMESTAMP()"));
}

#[test]
fn test_nolock_and_go_removed() {
    let out = convert("SELECT * FROM T WITH (NOLOCK); GO");
    assert!(!out.contains("NOLOCK"));
    assert!(
        !out.split_whitespace()
            .any(|word| word.eq_ignore_ascii_case("GO"))
    );
    assert_eq!(out, "SELECT * FROM T;");
}

#[test]
fn test_target_dialect_input_is_left_alone() {
    let inputs = [
        "SELECT COALESCE(Name, 'N/A') FROM \"dbo\".\"Users\" LIMIT 5;",
        "SELECT CURRENT_TIMESTAMP(), DATEADD(day, 1, d) FROM t;",
        "SELECT CAST(x AS TIMESTAMP_NTZ), LENGTH(s), SUBSTR(s, 1, 3) FROM t;",
        "SELECT POSITION('a' IN s) FROM t ORDER BY 1 LIMIT 10;",
        "SELECT DATE_PART(year, d), UUID_STRING() FROM t;",
        "SELECT v:items[0], ARRAY_CONSTRUCT(1, 2)[1] FROM t;",
        "SELECT arr[0]:name::STRING FROM t;",
    ];
    for sql in inputs {
        let result = Converter::new().convert(sql);
        assert_eq!(result.sql, sql);
        assert!(result.fired.is_empty(), "{}: {:?}", sql, result.fired);
    }
}

#[test]
fn test_conversion_is_idempotent() {
    let inputs = [
        NIGHTLY_REPORT,
        "SELECT TOP (3) LEFT(name, 2), CHARINDEX('x', name) FROM t",
        "SELECT CONVERT(DATETIME, s), CAST(b AS BIT), NEWID() FROM t",
        "SELECT DATEPART(mm, d) FROM t\nGO\nSELECT LEN(x) FROM u\n",
    ];
    for sql in inputs {
        let once = convert(sql);
        assert_eq!(convert(&once), once, "not idempotent for {}", sql);
    }
}

#[test]
fn test_full_script() {
    let result = Converter::new().convert(NIGHTLY_REPORT);
    assert_eq!(result.sql, NIGHTLY_REPORT_SNOWFLAKE);
    assert_eq!(result.statements.len(), 2);
    assert!(result.notices.is_empty());

    let counts = result.rule_counts();
    let ids: Vec<_> = counts.keys().copied().collect();
    assert_eq!(
        ids,
        vec![
            "IDENT001", "IDENT002", "HINT001", "HINT002", "NULL001", "DATE001", "TYPE001",
            "DATE002", "ROW001", "BATCH001",
        ]
    );
}

#[test]
fn test_literals_and_comments_are_byte_identical() {
    let sql = "SELECT '[x] GETDATE() TOP 5; GO' AS s, \"ISNULL\" /* WITH (NOLOCK) */ FROM t -- LEN(x)\n";
    assert_eq!(convert(sql), sql);
}

#[test]
fn test_bracket_identifier_is_one_token() {
    let result = Converter::new().convert("SELECT TOP 1 [a;b] FROM t;");
    assert_eq!(result.sql, r#"SELECT "a;b" FROM t LIMIT 1;"#);
    assert_eq!(result.statements.len(), 1);

    assert_eq!(
        convert("SELECT [Amount ( USD )], LEN([LEN(x)]) FROM t;"),
        r#"SELECT "Amount ( USD )", LENGTH("LEN(x)") FROM t;"#
    );
}

#[test]
fn test_unterminated_literal_passes_through() {
    let sql = "SELECT ISNULL(a, 'oops";
    assert_eq!(convert(sql), "SELECT COALESCE(a, 'oops");
}

#[test]
fn test_disabled_rule_never_fires() {
    let result = Converter::with_config(&disabled(&["NULL001", "ident001"]))
        .convert("SELECT ISNULL([a], 0) FROM t;");
    assert_eq!(result.sql, "SELECT ISNULL([a], 0) FROM t;");
    assert!(
        result
            .fired
            .iter()
            .all(|h| h.rule_id != "NULL001" && h.rule_id != "IDENT001")
    );
}

#[test]
fn test_top_variable_passes_through_with_notice() {
    let result = Converter::new().convert("SELECT TOP (@n) * FROM t;");
    assert_eq!(result.sql, "SELECT TOP (@n) * FROM t;");
    assert_eq!(result.notices.len(), 1);
    assert_eq!(result.notices[0].kind, NoticeKind::UnrecognizedConstruct);
    assert_eq!(result.notices[0].construct, "TOP");
}

#[test]
fn test_top_in_subquery() {
    assert_eq!(
        convert("SELECT * FROM (SELECT TOP 3 a FROM t ORDER BY a) x;"),
        "SELECT * FROM (SELECT a FROM t ORDER BY a LIMIT 3) x;"
    );
}

#[test]
fn test_top_per_statement() {
    assert_eq!(
        convert("SELECT TOP 1 a FROM t;\nSELECT TOP 2 b FROM u;"),
        "SELECT a FROM t LIMIT 1;\nSELECT b FROM u LIMIT 2;"
    );
}

#[test]
fn test_top_in_statements_without_semicolons() {
    assert_eq!(
        convert("SELECT TOP 1 a FROM t\nSELECT TOP 2 b FROM u\n"),
        "SELECT a FROM t LIMIT 1\nSELECT b FROM u LIMIT 2\n"
    );
    assert_eq!(
        convert("SELECT TOP 3 a FROM t\nINSERT INTO log VALUES (1)\n"),
        "SELECT a FROM t LIMIT 3\nINSERT INTO log VALUES (1)\n"
    );
}

#[test]
fn test_crlf_script() {
    assert_eq!(
        convert("SELECT TOP 1 a\r\nFROM t\r\nGO\r\n"),
        "SELECT a\nFROM t LIMIT 1;\n"
    );
}

#[test]
fn test_validation_reports_parse_failures() {
    let result = Converter::new()
        .validating(true)
        .convert("SELECT TOP 1 a FROM t; SELECT (1 FROM u;");
    assert_eq!(result.notices.len(), 1);
    assert_eq!(result.notices[0].kind, NoticeKind::ParseFailure);
    assert_eq!(result.notices[0].statement_index, 1);
}
