mod common;

use tempfile::TempDir;
use ufsa_ingest::parse_standard;
use ufsa_standards::Tracker;

use common::{standard, write_fixture};

#[test]
fn json_schema_yields_concepts_beyond_the_root() {
    let dir = TempDir::new().unwrap();
    write_fixture(
        dir.path(),
        "fhir/observation.schema.json",
        r#"{
          "title": "Observation",
          "type": "object",
          "properties": {
            "status": { "type": "string", "description": "registered | final" },
            "code": {
              "type": "object",
              "properties": {
                "coding": { "type": "array", "items": { "title": "Coding", "type": "object" } }
              }
            },
            "value": { "type": ["number", "string"] }
          }
        }"#,
    );
    let std = standard(
        "fhir_r4_observation",
        "fhir/observation.schema.json",
        "ufsa_v2.parsers.json_schema_parser",
        "json",
    );

    let scheme = parse_standard(&std, dir.path(), &mut Tracker::in_memory()).unwrap();

    assert_eq!(scheme.len(), 6);
    let root = scheme.get("fhir_r4_observation:").unwrap();
    assert_eq!(root.label, "Observation");
    assert_eq!(root.note("type"), Some("object"));
    let status = scheme.get("fhir_r4_observation:status").unwrap();
    assert_eq!(status.note("description"), Some("registered | final"));
    assert_eq!(
        scheme.get("fhir_r4_observation:code").unwrap().note("valueset_hint"),
        Some("loinc")
    );
    let item = scheme.get("fhir_r4_observation:code.coding[]").unwrap();
    assert_eq!(item.label, "Coding");
    assert_eq!(item.note("valueset_hint"), Some("loinc"));
    assert_eq!(
        scheme.get("fhir_r4_observation:value").unwrap().note("type"),
        Some(r#"["number","string"]"#)
    );
}

#[test]
fn malformed_json_is_an_error() {
    let dir = TempDir::new().unwrap();
    write_fixture(dir.path(), "broken.json", "{ nope");
    let std = standard("broken", "broken.json", "json_schema", "json");
    assert!(parse_standard(&std, dir.path(), &mut Tracker::in_memory()).is_err());
}

const SKOS_TURTLE: &str = r#"
@prefix skos: <http://www.w3.org/2004/02/skos/core#> .
@prefix rdfs: <http://www.w3.org/2000/01/rdf-schema#> .
@prefix ex: <http://example.org/vocab/> .

ex:animal a skos:Concept ;
    skos:prefLabel "Animal"@en ;
    skos:definition "A living organism." ;
    skos:narrower ex:dog .

ex:dog a skos:Concept ;
    rdfs:label "Dog" ;
    skos:notation "D1", "D2" ;
    skos:altLabel "Hound" ;
    skos:broader ex:animal ;
    skos:exactMatch <http://www.wikidata.org/entity/Q144> .

ex:ghost a skos:Concept .
"#;

#[test]
fn rdf_extracts_labelled_skos_concepts_and_relations() {
    let dir = TempDir::new().unwrap();
    write_fixture(dir.path(), "skos/animals.ttl", SKOS_TURTLE);
    let std = standard("animals", "skos/animals.ttl", "ufsa_v2.parsers.rdf_parser", "rdf");

    let scheme = parse_standard(&std, dir.path(), &mut Tracker::in_memory()).unwrap();

    assert_eq!(scheme.len(), 2);
    let animal = scheme.get("animals:http://example.org/vocab/animal").unwrap();
    assert_eq!(animal.label, "Animal");
    assert_eq!(animal.note("description"), Some("A living organism."));
    assert_eq!(animal.narrower, vec!["animals:http://example.org/vocab/dog"]);

    let dog = scheme.get("animals:http://example.org/vocab/dog").unwrap();
    assert_eq!(dog.label, "Dog");
    let mut notations: Vec<&str> = dog.note("notation").unwrap().split(';').collect();
    notations.sort_unstable();
    assert_eq!(notations, vec!["D1", "D2"]);
    assert_eq!(dog.note("altLabel"), Some("Hound"));
    assert_eq!(dog.broader, vec!["animals:http://example.org/vocab/animal"]);
    assert_eq!(dog.exact_match, vec!["http://www.wikidata.org/entity/Q144"]);
}

#[test]
fn rdf_repeated_triples_count_once() {
    let dir = TempDir::new().unwrap();
    let triples = "\
<http://example.org/d> <http://www.w3.org/1999/02/22-rdf-syntax-ns#type> <http://www.w3.org/2004/02/skos/core#Concept> .
<http://example.org/d> <http://www.w3.org/2004/02/skos/core#prefLabel> \"Dog\" .
<http://example.org/d> <http://www.w3.org/2004/02/skos/core#notation> \"D1\" .
<http://example.org/d> <http://www.w3.org/2004/02/skos/core#notation> \"D1\" .
<http://example.org/d> <http://www.w3.org/2004/02/skos/core#related> <http://example.org/c> .
<http://example.org/d> <http://www.w3.org/2004/02/skos/core#related> <http://example.org/c> .
";
    write_fixture(dir.path(), "dogs.nt", triples);
    let std = standard("dogs", "dogs.nt", "rdf", "rdf");

    let scheme = parse_standard(&std, dir.path(), &mut Tracker::in_memory()).unwrap();

    let dog = scheme.get("dogs:http://example.org/d").unwrap();
    assert_eq!(dog.note("notation"), Some("D1"));
    assert_eq!(dog.related, vec!["dogs:http://example.org/c"]);
}

#[test]
fn rdf_without_concepts_falls_back_to_the_scheme() {
    let dir = TempDir::new().unwrap();
    write_fixture(
        dir.path(),
        "empty.nt",
        "<http://example.org/a> <http://www.w3.org/2000/01/rdf-schema#label> \"A\" .\n",
    );
    let std = standard("empty_vocab", "empty.nt", "rdf", "rdf");

    let scheme = parse_standard(&std, dir.path(), &mut Tracker::in_memory()).unwrap();

    assert_eq!(scheme.len(), 1);
    let fallback = scheme
        .get("empty_vocab:http://ufsa.org/v2/standards/empty_vocab")
        .unwrap();
    assert_eq!(fallback.label, "empty_vocab name");
}

#[test]
fn sql_foreign_keys_become_related_matches() {
    let dir = TempDir::new().unwrap();
    write_fixture(
        dir.path(),
        "sql/tiny.sql",
        "CREATE TABLE a (id INTEGER, PRIMARY KEY(id)); CREATE TABLE b (a_id INTEGER, FOREIGN KEY(a_id) REFERENCES a(id));",
    );
    let std = standard("tiny", "sql/tiny.sql", "ufsa_v2.parsers.parser_ast_sql", "sql");

    let scheme = parse_standard(&std, dir.path(), &mut Tracker::in_memory()).unwrap();

    let mut ids: Vec<&str> = scheme.concepts.keys().map(String::as_str).collect();
    ids.sort_unstable();
    assert_eq!(ids, vec!["tiny:a", "tiny:a.id", "tiny:b", "tiny:b.a_id"]);
    let column = scheme.get("tiny:b.a_id").unwrap();
    assert_eq!(column.related_match, vec!["tiny:a.id"]);
    assert_eq!(column.broader, vec!["tiny:b"]);
    assert_eq!(column.note("kind"), Some("column"));
    assert_eq!(column.note("data_type"), Some("INTEGER"));
    let table = scheme.get("tiny:a").unwrap();
    assert_eq!(table.note("kind"), Some("table"));
    assert_eq!(table.narrower, vec!["tiny:a.id"]);
}

#[test]
fn sql_foreign_keys_may_reference_later_tables() {
    let dir = TempDir::new().unwrap();
    write_fixture(
        dir.path(),
        "forward.sql",
        "CREATE TABLE child (\n  parent_id INT,\n  FOREIGN KEY (parent_id) REFERENCES parent(id),\n  FOREIGN KEY (parent_id) REFERENCES parent(id)\n);\nCREATE TABLE parent (\n  id INT\n);\n",
    );
    let std = standard("fwd", "forward.sql", "sql_ddl", "sql");

    let scheme = parse_standard(&std, dir.path(), &mut Tracker::in_memory()).unwrap();

    assert_eq!(
        scheme.get("fwd:child.parent_id").unwrap().related_match,
        vec!["fwd:parent.id"]
    );
}

const SBOM: &str = r#"{
  "bomFormat": "CycloneDX",
  "components": [
    {
      "bom-ref": "pkg:cargo/serde@1.0.0",
      "name": "serde",
      "version": "1.0.0",
      "purl": "pkg:cargo/serde@1.0.0",
      "description": "Serialization framework",
      "licenses": [
        {"license": {"id": "MIT"}},
        {"expression": "Apache-2.0 WITH LLVM-exception"}
      ],
      "hashes": [{"alg": "sha-256", "content": "deadbeef"}],
      "externalReferences": [{"type": "vcs", "url": "https://github.com/serde-rs/serde"}]
    },
    { "name": "itoa", "version": "1.0.9" },
    { "description": "anonymous" }
  ],
  "dependencies": [
    { "ref": "pkg:cargo/serde@1.0.0", "dependsOn": ["itoa@1.0.9", "itoa@1.0.9", "unknown@0"] },
    { "ref": "missing", "dependsOn": ["itoa@1.0.9"] }
  ]
}"#;

#[test]
fn cyclonedx_components_carry_licenses_and_dependencies() {
    let dir = TempDir::new().unwrap();
    write_fixture(dir.path(), "sbom/app.cdx.json", SBOM);
    let std = standard("app_sbom", "sbom/app.cdx.json", "ufsa_v2.parsers.parser_cyclonedx", "sbom");

    let scheme = parse_standard(&std, dir.path(), &mut Tracker::in_memory()).unwrap();

    assert_eq!(scheme.len(), 2);
    let serde = scheme.get("app_sbom:pkg:cargo/serde@1.0.0").unwrap();
    assert_eq!(serde.label, "serde");
    assert_eq!(serde.note("kind"), Some("software_component"));
    assert_eq!(serde.note("notation"), Some("1.0.0"));
    assert_eq!(serde.note("licenses"), Some("MIT;Apache-2.0 WITH LLVM-exception"));
    assert_eq!(serde.note("hashes"), Some("SHA-256:deadbeef"));
    assert_eq!(
        serde.note("externalReferences"),
        Some("https://github.com/serde-rs/serde")
    );
    assert_eq!(serde.related, vec!["app_sbom:itoa@1.0.9"]);

    let itoa = scheme.get("app_sbom:itoa@1.0.9").unwrap();
    assert_eq!(itoa.note("licenses"), Some(""));
    assert!(itoa.related.is_empty());
}
