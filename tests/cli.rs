use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::Value;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::tempdir;

fn data_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join("data")
}

fn dogana() -> Command {
    let mut cmd = Command::cargo_bin("dogana").expect("Failed to find dogana binary");
    cmd.env_remove("DOGANA_DATA_DIR")
        .env_remove("DOGANA_CATALOG")
        .env_remove("DOGANA_GUIDE")
        .env_remove("RUST_LOG");
    cmd
}

fn dogana_with_data() -> Command {
    let mut cmd = dogana();
    cmd.arg("--data-dir").arg(data_dir());
    cmd
}

fn parse_jsonl(stdout: &[u8]) -> Vec<Value> {
    let s = String::from_utf8_lossy(stdout);
    s.lines()
        .filter(|l| !l.trim().is_empty())
        .map(|l| serde_json::from_str::<Value>(l).expect("valid jsonl line"))
        .collect()
}

fn run_jsonl(cmd: &mut Command) -> Vec<Value> {
    let assert = cmd.assert().success();
    parse_jsonl(&assert.get_output().stdout)
}

fn write_file(path: &Path, content: &str) {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(path, content).unwrap();
}

#[test]
fn search_synonym_scores_eight() {
    let items = run_jsonl(dogana_with_data().args(["search", "laptop"]));

    assert_eq!(items.len(), 1);
    assert_eq!(items[0]["kind"], "article");
    assert_eq!(items[0]["title"], "Computer portatile");
    assert_eq!(items[0]["category"], "Elettronica");
    assert_eq!(items[0]["score"], 8);
}

#[test]
fn search_primary_name_scores_ten() {
    let items = run_jsonl(dogana_with_data().args(["search", "COMPUTER"]));

    assert_eq!(items.len(), 1);
    assert_eq!(items[0]["score"], 10);
}

#[test]
fn search_article_card_blocks() {
    let items = run_jsonl(dogana_with_data().args(["search", "laptop"]));
    let blocks = items[0]["fragment"]["blocks"].as_array().unwrap();

    assert_eq!(blocks[0]["type"], "badge");
    assert_eq!(blocks[0]["text"], "✓ Massimo: 2 pezzi");
    assert_eq!(blocks[1]["text"], "💵 Valore massimo per articolo: 1000 USD");
}

#[test]
fn search_ranks_by_score_then_catalog_order() {
    let items = run_jsonl(dogana_with_data().args(["search", "elettr"]));

    let titles: Vec<_> = items
        .iter()
        .map(|v| v["title"].as_str().unwrap().to_string())
        .collect();
    assert_eq!(
        titles,
        vec![
            "Motocicletta elettrica",
            "Computer portatile",
            "Telefono cellulare",
            "Tablet",
            "Frigorifero",
        ]
    );
    assert_eq!(items[0]["score"], 13);
    assert!(items[1..].iter().all(|v| v["score"] == 3));
}

#[test]
fn search_limit_truncates_after_ranking() {
    let items = run_jsonl(dogana_with_data().args(["search", "elettr", "--limit", "2"]));

    assert_eq!(items.len(), 2);
    assert_eq!(items[0]["title"], "Motocicletta elettrica");
    assert_eq!(items[1]["meta"]["truncated"], true);
}

#[test]
fn search_zero_limit_is_usage_error() {
    dogana_with_data()
        .args(["search", "elettr", "--limit", "0"])
        .assert()
        .failure()
        .stdout(predicate::str::is_empty());
}

#[test]
fn search_multiple_words_are_one_query() {
    let items = run_jsonl(dogana_with_data().args(["search", "telefono", "cellulare"]));

    assert_eq!(items.len(), 1);
    assert_eq!(items[0]["title"], "Telefono cellulare");
}

#[test]
fn search_without_match_emits_notice() {
    let items = run_jsonl(dogana_with_data().args(["search", "xyz"]));

    assert_eq!(items.len(), 1);
    assert_eq!(items[0]["kind"], "notice");
    assert_eq!(items[0]["title"], "Nessun risultato");
}

#[test]
fn empty_search_lists_categories() {
    let items = run_jsonl(dogana_with_data().args(["search", "  "]));

    assert_eq!(items.len(), 3);
    assert!(items.iter().all(|v| v["kind"] == "category"));
}

#[test]
fn categories_in_declaration_order() {
    let items = run_jsonl(dogana_with_data().arg("categories"));

    let names: Vec<_> = items.iter().map(|v| v["title"].as_str().unwrap()).collect();
    assert_eq!(
        names,
        vec!["Elettronica", "Elettrodomestici", "Medicinali e salute"]
    );
    assert_eq!(items[0]["key"], "1");
    assert_eq!(items[0]["icon"], "💻");
    assert_eq!(items[0]["data"]["articles"], 3);
}

#[test]
fn browse_by_position_and_prefix() {
    let by_position = run_jsonl(dogana_with_data().args(["browse", "3"]));
    let by_prefix = run_jsonl(dogana_with_data().args(["browse", "MED"]));

    assert_eq!(by_position, by_prefix);
    assert_eq!(by_position[0]["title"], "Medicinali");
}

#[test]
fn browse_unknown_category_reports_error() {
    let items = run_jsonl(dogana_with_data().args(["browse", "sport"]));

    assert_eq!(items[0]["kind"], "error");
    assert_eq!(items[0]["errors"][0]["code"], "UNKNOWN_CATEGORY");
}

#[test]
fn guide_renders_every_section_in_order() {
    let items = run_jsonl(dogana_with_data().arg("guide"));

    let keys: Vec<_> = items.iter().map(|v| v["key"].as_str().unwrap()).collect();
    assert_eq!(
        keys,
        vec![
            "elettricita",
            "internet_sim",
            "moneta_pagamenti",
            "trasporti",
            "ambasciata",
            "emergenze",
            "salute",
            "consigli_pratici",
            "spiagge",
        ]
    );

    let placeholder = &items[8]["fragment"]["blocks"][0];
    assert_eq!(placeholder["text"], "Sezione in costruzione");
}

#[test]
fn guide_adapter_false_renders_no() {
    let items = run_jsonl(dogana_with_data().args(["guide", "electricity"]));

    assert_eq!(items.len(), 1);
    let blocks = items[0]["fragment"]["blocks"].as_array().unwrap();
    let adapter = blocks
        .iter()
        .find(|b| b["label"] == "Adattatore necessario")
        .expect("adapter field");
    assert_eq!(adapter["value"], "❌ NO");
}

#[test]
fn guide_markdown_output() {
    dogana_with_data()
        .args(["guide", "ambasciata", "--format", "md"])
        .assert()
        .success()
        .stdout(predicate::str::contains("### 🇮🇹 Ambasciata d'Italia"))
        .stdout(predicate::str::contains("(mailto:consolare.avana@esteri.it)"))
        .stdout(predicate::str::contains("**Orari:** Lunedì-Venerdì 9:00-12:00"));
}

#[test]
fn guide_unknown_section_argument_is_usage_error() {
    dogana_with_data()
        .args(["guide", "spiagge"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unknown section"));
}

#[test]
fn search_works_without_guide() {
    let temp = tempdir().unwrap();
    fs::copy(
        data_dir().join("aduana_cuba_db.json"),
        temp.path().join("aduana_cuba_db.json"),
    )
    .unwrap();

    let items = run_jsonl(dogana().arg("--data-dir").arg(temp.path()).args(["search", "laptop"]));
    assert_eq!(items[0]["score"], 8);
}

#[test]
fn missing_catalog_is_reported_not_fatal() {
    let temp = tempdir().unwrap();

    let items = run_jsonl(dogana().arg("--data-dir").arg(temp.path()).args(["search", "laptop"]));

    assert_eq!(items.len(), 1);
    assert_eq!(items[0]["kind"], "error");
    assert_eq!(items[0]["errors"][0]["code"], "DATA_UNAVAILABLE");
}

#[test]
fn malformed_guide_is_reported() {
    let temp = tempdir().unwrap();
    write_file(&temp.path().join("guida_viaggiatore_cuba.json"), "{\"sezioni\": [");

    let items = run_jsonl(dogana().arg("--data-dir").arg(temp.path()).arg("guide"));

    assert_eq!(items[0]["errors"][0]["code"], "DATA_MALFORMED");
}

#[test]
fn catalog_override_from_env() {
    let temp = tempdir().unwrap();
    write_file(
        &temp.path().join("custom/db.json"),
        r#"{"categorie": [{"nome_it": "Varie", "icona": "📦", "articoli": [{"nome_it": "Ombrello"}]}]}"#,
    );

    let items = run_jsonl(
        dogana()
            .env("DOGANA_DATA_DIR", temp.path())
            .env("DOGANA_CATALOG", "custom/db.json")
            .args(["search", "ombrello"]),
    );

    assert_eq!(items[0]["title"], "Ombrello");
    assert_eq!(items[0]["score"], 10);
}

#[test]
fn doctor_reports_both_documents() {
    let items = run_jsonl(dogana_with_data().args(["--quiet", "doctor", "--hash", "sha1"]));

    assert_eq!(items.len(), 2);
    assert_eq!(items[0]["kind"], "status");
    assert_eq!(items[0]["key"], "catalog");
    assert_eq!(items[0]["data"]["categories"], 3);
    assert_eq!(items[0]["data"]["articles"], 7);
    assert!(items[0]["meta"]["hash"].as_str().unwrap().starts_with("sha1:"));
    assert_eq!(items[1]["key"], "guide");
    assert_eq!(items[1]["data"]["unrecognized"], 1);
}

#[test]
fn doctor_summary_on_stderr() {
    let temp = tempdir().unwrap();

    dogana()
        .arg("--data-dir")
        .arg(temp.path())
        .args(["--no-color", "doctor"])
        .assert()
        .success()
        .stderr(predicate::str::contains("✗ catalog: DATA_UNAVAILABLE"));
}

#[test]
fn lint_flags_data_issues() {
    let temp = tempdir().unwrap();
    write_file(
        &temp.path().join("aduana_cuba_db.json"),
        r#"{"categorie": [{"nome_it": "Varie"}, {"nome_it": "Libri", "articoli": [{"nome_it": "Romanzo"}]}]}"#,
    );
    write_file(
        &temp.path().join("guida_viaggiatore_cuba.json"),
        r#"{"sezioni": [{"id": "ambasciata", "titolo": "Ambasciata", "contenuto": {"sito_web": "not a url"}}]}"#,
    );

    let items = run_jsonl(dogana().arg("--data-dir").arg(temp.path()).arg("lint"));

    let codes: Vec<_> = items
        .iter()
        .map(|v| v["errors"][0]["code"].as_str().unwrap())
        .collect();
    assert_eq!(codes, vec!["EMPTY_CATEGORY", "MISSING_QUANTITY", "INVALID_URL"]);
    assert_eq!(items[0]["source"], "aduana_cuba_db.json#categorie[0]");
    assert_eq!(items[0]["severity"], "warning");
}

#[test]
fn raw_format_prints_plain_text() {
    dogana_with_data()
        .args(["search", "frigo", "--format", "raw"])
        .assert()
        .success()
        .stdout(predicate::str::starts_with("🏠 Frigorifero\nElettrodomestici\n✓ Massimo: 1 pezzi"));
}
