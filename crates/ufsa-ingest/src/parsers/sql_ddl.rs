//! SQL DDL (`CREATE TABLE`) statements.
//!
//! A deliberately small extractor: it finds `CREATE TABLE name (...);`
//! blocks, splits the body on top-level commas and classifies each
//! definition as a column, a foreign key or another constraint. Tables and
//! columns become concepts linked by `broader`/`narrower`; foreign keys add
//! the referenced column to the source column's `related_match`.

use std::sync::LazyLock;

use regex::Regex;
use tracing::debug;
use ufsa_model::notes::{DATA_TYPE, KIND};
use ufsa_model::{ConceptScheme, Kind};
use ufsa_standards::FileTracker;

use crate::error::Result;
use crate::request::ParseRequest;

static CREATE_TABLE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r#"(?is)CREATE\s+TABLE\s+(?:IF\s+NOT\s+EXISTS\s+)?(?P<name>[\w.`"]+)\s*\((?P<body>.*?)\)\s*;"#,
    )
    .expect("valid CREATE TABLE regex")
});

static COLUMN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?i)^\s*[`"']?(?P<col>\w+)[`"']?\s+(?P<type>[\w(),\s]+)"#)
        .expect("valid column regex")
});

static FOREIGN_KEY: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r#"(?i)FOREIGN\s+KEY\s*\(\s*[`"']?(?P<src>\w+)[`"']?\s*\)\s*REFERENCES\s+[`"']?(?P<table>\w+)[`"']?\s*\(\s*[`"']?(?P<col>\w+)[`"']?\s*\)"#,
    )
    .expect("valid foreign key regex")
});

static INLINE_REFERENCE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r#"(?i)\bREFERENCES\s+[`"']?(?P<table>\w+)[`"']?\s*\(\s*[`"']?(?P<col>\w+)[`"']?\s*\)"#,
    )
    .expect("valid references regex")
});

/// Leading keywords of table-level constraints that are not columns.
const CONSTRAINT_KEYWORDS: &[&str] = &["PRIMARY", "UNIQUE", "CHECK", "KEY", "INDEX", "CONSTRAINT"];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Column {
    pub name: String,
    pub data_type: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ForeignKey {
    pub column: String,
    pub target_table: String,
    pub target_column: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Table {
    pub name: String,
    pub columns: Vec<Column>,
    pub foreign_keys: Vec<ForeignKey>,
}

/// Extract tables from DDL text. Unrecognised definitions are skipped.
pub fn parse_tables(sql: &str) -> Vec<Table> {
    let sql = strip_line_comments(sql);
    CREATE_TABLE
        .captures_iter(&sql)
        .map(|caps| {
            let name: String = caps["name"].chars().filter(|c| !matches!(c, '`' | '"')).collect();
            let mut table = Table {
                name,
                columns: Vec::new(),
                foreign_keys: Vec::new(),
            };
            for definition in split_definitions(&caps["body"]) {
                classify(&definition, &mut table);
            }
            table
        })
        .collect()
}

fn classify(definition: &str, table: &mut Table) {
    let upper = definition.to_ascii_uppercase();
    let first_word = upper.split_whitespace().next().unwrap_or("");

    if first_word == "FOREIGN" || (first_word == "CONSTRAINT" && upper.contains("FOREIGN")) {
        match FOREIGN_KEY.captures(definition) {
            Some(caps) => table.foreign_keys.push(ForeignKey {
                column: caps["src"].to_string(),
                target_table: caps["table"].to_string(),
                target_column: caps["col"].to_string(),
            }),
            None => debug!(table = %table.name, definition, "skipping unparsed foreign key"),
        }
        return;
    }
    if CONSTRAINT_KEYWORDS.contains(&first_word) {
        return;
    }

    let Some(caps) = COLUMN.captures(definition) else {
        debug!(table = %table.name, definition, "skipping unparsed column definition");
        return;
    };
    let column = caps["col"].to_string();
    let mut data_type = &caps["type"];
    if let Some(reference) = INLINE_REFERENCE.captures(definition) {
        table.foreign_keys.push(ForeignKey {
            column: column.clone(),
            target_table: reference["table"].to_string(),
            target_column: reference["col"].to_string(),
        });
        if let Some(end) = data_type.to_ascii_uppercase().find("REFERENCES") {
            data_type = &data_type[..end];
        }
    }
    table.columns.push(Column {
        name: column,
        data_type: collapse_whitespace(data_type),
    });
}

/// Split a table body on commas outside parentheses.
/// Drop `--` comments through end of line. Text inside quotes is kept.
fn strip_line_comments(sql: &str) -> String {
    let mut stripped = String::with_capacity(sql.len());
    let mut quote: Option<char> = None;
    let mut chars = sql.chars().peekable();
    while let Some(ch) = chars.next() {
        match quote {
            Some(open) if ch == open => quote = None,
            Some(_) => {}
            None if ch == '\'' || ch == '"' => quote = Some(ch),
            None if ch == '-' && chars.peek() == Some(&'-') => {
                while chars.next_if(|next| *next != '\n').is_some() {}
                continue;
            }
            None => {}
        }
        stripped.push(ch);
    }
    stripped
}

fn split_definitions(body: &str) -> Vec<String> {
    let mut definitions = Vec::new();
    let mut current = String::new();
    let mut depth = 0usize;
    for ch in body.chars() {
        match ch {
            '(' => depth += 1,
            ')' => depth = depth.saturating_sub(1),
            ',' if depth == 0 => {
                definitions.push(std::mem::take(&mut current));
                continue;
            }
            _ => {}
        }
        current.push(ch);
    }
    definitions.push(current);
    definitions
        .into_iter()
        .map(|definition| definition.trim().to_string())
        .filter(|definition| !definition.is_empty())
        .collect()
}

fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

pub fn parse(request: &ParseRequest<'_>, tracker: &mut dyn FileTracker) -> Result<ConceptScheme> {
    let (_, sql) = request.read_fixture(tracker)?;
    let tables = parse_tables(&sql);
    let mut scheme = request.new_scheme();

    for table in &tables {
        let table_id = request.concept_id(&table.name);
        let mut table_concept = request
            .concept(&table.name, table.name.as_str())
            .with_note(KIND, Kind::Table.as_str());
        for column in &table.columns {
            let local = format!("{}.{}", table.name, column.name);
            let mut column_concept = request
                .concept(&local, local.as_str())
                .with_note(DATA_TYPE, column.data_type.as_str())
                .with_note(KIND, Kind::Column.as_str());
            column_concept.broader.push(table_id.clone());
            table_concept.narrower.push(column_concept.id.clone());
            scheme.insert(column_concept);
        }
        scheme.insert(table_concept);
    }

    // Resolved after every table exists so forward references link too.
    for table in &tables {
        for key in &table.foreign_keys {
            let source = request.concept_id(&format!("{}.{}", table.name, key.column));
            let target =
                request.concept_id(&format!("{}.{}", key.target_table, key.target_column));
            if !scheme.contains(&target) {
                debug!(%source, %target, "skipping foreign key to unknown column");
                continue;
            }
            if let Some(concept) = scheme.get_mut(&source)
                && !concept.related_match.contains(&target)
            {
                concept.related_match.push(target);
            }
        }
    }
    Ok(scheme)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn splits_on_top_level_commas_only() {
        let parts = split_definitions("id INTEGER, price DECIMAL(10,2),\n PRIMARY KEY(id)");
        assert_eq!(parts, vec!["id INTEGER", "price DECIMAL(10,2)", "PRIMARY KEY(id)"]);
    }

    #[test]
    fn comment_markers_inside_quotes_are_kept() {
        assert_eq!(
            strip_line_comments("a DEFAULT '--', b INT -- note\nc 'it''s -- fine'"),
            "a DEFAULT '--', b INT \nc 'it''s -- fine'"
        );

        let tables = parse_tables(
            "CREATE TABLE t (\n  sep VARCHAR(2) DEFAULT '--', id INTEGER -- trailing\n);",
        );
        let names: Vec<&str> = tables[0].columns.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["sep", "id"]);
    }

    #[test]
    fn extracts_columns_and_foreign_keys() {
        let tables = parse_tables(
            "CREATE TABLE `orders` (\n  `id` INTEGER NOT NULL,\n  customer_id INT,\n  -- audit\n  total DECIMAL(10, 2),\n  PRIMARY KEY (id),\n  FOREIGN KEY (customer_id) REFERENCES customers(id)\n);",
        );
        assert_eq!(tables.len(), 1);
        let table = &tables[0];
        assert_eq!(table.name, "orders");
        let columns: Vec<(&str, &str)> = table
            .columns
            .iter()
            .map(|c| (c.name.as_str(), c.data_type.as_str()))
            .collect();
        assert_eq!(
            columns,
            vec![
                ("id", "INTEGER NOT NULL"),
                ("customer_id", "INT"),
                ("total", "DECIMAL(10, 2)"),
            ]
        );
        assert_eq!(
            table.foreign_keys,
            vec![ForeignKey {
                column: "customer_id".to_string(),
                target_table: "customers".to_string(),
                target_column: "id".to_string(),
            }]
        );
    }

    #[test]
    fn schema_qualified_names_keep_their_prefix() {
        let tables = parse_tables(r#"create table if not exists "main"."users" (id integer);"#);
        assert_eq!(tables[0].name, "main.users");
    }

    #[test]
    fn inline_references_count_as_foreign_keys() {
        let tables = parse_tables("CREATE TABLE b (a_id INTEGER REFERENCES a(id));");
        assert_eq!(tables[0].foreign_keys[0].target_table, "a");
        assert_eq!(tables[0].columns[0].name, "a_id");
        assert_eq!(tables[0].columns[0].data_type, "INTEGER");
    }
}
