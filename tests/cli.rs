//! End-to-end runs of the `pdfcat` binary against scratch directories.

use pdfcat_catalog::CatalogRecord;
use rstest::rstest;
use std::fs;
use std::path::Path;
use std::process::{Command, Output};
use tempfile::TempDir;

const TABLE: &str = "csv_data.csv";

struct Workspace {
    dir: TempDir,
    config_home: TempDir,
}

impl Workspace {
    fn new() -> Self {
        Self {
            dir: tempfile::tempdir().unwrap(),
            config_home: tempfile::tempdir().unwrap(),
        }
    }

    fn path(&self) -> &Path {
        self.dir.path()
    }

    fn touch(&self, relative: &str) {
        let path = self.path().join(relative);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, b"%PDF-1.4").unwrap();
    }

    fn run(&self, args: &[&str]) -> Output {
        self.run_with_env(args, &[])
    }

    fn run_with_env(&self, args: &[&str], vars: &[(&str, &str)]) -> Output {
        let mut command = Command::new(env!("CARGO_BIN_EXE_pdfcat"));
        command
            .args(args)
            .current_dir(self.path())
            .env("HOME", self.config_home.path())
            .env("XDG_CONFIG_HOME", self.config_home.path())
            .env_remove("RUST_LOG");
        for var in ["PDFCAT_ROOT", "PDFCAT_OUTPUT", "PDFCAT_SUFFIX", "PDFCAT_IDS"] {
            command.env_remove(var);
        }
        command.envs(vars.iter().copied());
        command.output().unwrap()
    }

    fn table(&self) -> String {
        fs::read_to_string(self.path().join(TABLE)).unwrap()
    }

    fn records(&self) -> Vec<CatalogRecord> {
        csv::Reader::from_path(self.path().join(TABLE))
            .unwrap()
            .deserialize()
            .collect::<Result<_, _>>()
            .unwrap()
    }
}

fn record(id: u64, filename: &str) -> CatalogRecord {
    CatalogRecord { id, filename: filename.to_string() }
}

#[test]
fn empty_tree_creates_header_only_table() {
    let ws = Workspace::new();
    let output = ws.run(&[]);
    assert!(output.status.success());
    assert_eq!(String::from_utf8_lossy(&output.stdout).trim(), "CSV data generated and saved to csv_data.csv");
    assert_eq!(ws.table(), "ID,PDF Filename\n");
}

#[test]
fn nested_tree_creates_rows_in_traversal_order() {
    let ws = Workspace::new();
    ws.touch("a.pdf");
    ws.touch("sub/b.pdf");
    ws.touch("sub/readme.txt");
    assert!(ws.run(&[]).status.success());
    assert_eq!(ws.records(), [record(1, "a.pdf"), record(2, "b.pdf")]);
}

#[test]
fn existing_table_gets_appended_with_restarted_ids() {
    let ws = Workspace::new();
    fs::write(ws.path().join(TABLE), "ID,PDF Filename\n1,x.pdf\n").unwrap();
    ws.touch("docs/y.pdf");
    assert!(ws.run(&["--root", "docs"]).status.success());
    assert_eq!(ws.records(), [record(1, "x.pdf"), record(1, "y.pdf")]);
}

#[test]
fn continue_ids_numbers_after_existing_rows() {
    let ws = Workspace::new();
    fs::write(ws.path().join(TABLE), "ID,PDF Filename\n1,x.pdf\n").unwrap();
    ws.touch("docs/y.pdf");
    assert!(ws.run(&["--root", "docs", "--continue-ids"]).status.success());
    assert_eq!(ws.records(), [record(1, "x.pdf"), record(2, "y.pdf")]);
}

#[test]
fn rerun_duplicates_rows() {
    let ws = Workspace::new();
    ws.touch("papers/a.pdf");
    assert!(ws.run(&["--root", "papers"]).status.success());
    assert!(ws.run(&["--root", "papers"]).status.success());
    assert_eq!(ws.table(), "ID,PDF Filename\n1,a.pdf\n1,a.pdf\n");
}

#[rstest]
#[case::no_table(None)]
#[case::existing_table(Some("ID,PDF Filename\n1,x.pdf\n"))]
fn missing_root_aborts_without_writing(#[case] existing: Option<&str>) {
    let ws = Workspace::new();
    if let Some(existing) = existing {
        fs::write(ws.path().join(TABLE), existing).unwrap();
    }
    let output = ws.run(&["--root", "does-not-exist"]);
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("cannot traverse"));
    match existing {
        Some(existing) => assert_eq!(ws.table(), existing),
        None => assert!(!ws.path().join(TABLE).exists()),
    }
}

#[test]
fn malformed_table_is_left_alone() {
    let ws = Workspace::new();
    let broken = "ID,PDF Filename\n1,x.pdf,unexpected\n";
    fs::write(ws.path().join(TABLE), broken).unwrap();
    ws.touch("y.pdf");
    let output = ws.run(&[]);
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("malformed table file"));
    assert_eq!(ws.table(), broken);
}

#[test]
fn dry_run_never_writes() {
    let ws = Workspace::new();
    ws.touch("a.pdf");
    let output = ws.run(&["--dry-run"]);
    assert!(output.status.success());
    assert!(String::from_utf8_lossy(&output.stdout).contains("1 row(s) would be added"));
    assert!(!ws.path().join(TABLE).exists());
}

#[test]
fn custom_suffix_and_output() {
    let ws = Workspace::new();
    ws.touch("a.pdf");
    ws.touch("b.epub");
    ws.touch("nested/c.epub");
    fs::create_dir(ws.path().join("out")).unwrap();
    assert!(ws.run(&["--suffix", ".epub", "--output", "out/books.csv"]).status.success());
    assert_eq!(fs::read_to_string(ws.path().join("out/books.csv")).unwrap(), "ID,PDF Filename\n1,b.epub\n2,c.epub\n");
}

#[test]
fn config_file_in_working_directory_is_used() {
    let ws = Workspace::new();
    fs::write(ws.path().join("pdfcat.toml"), "output = \"from-config.csv\"\n").unwrap();
    ws.touch("a.pdf");
    assert!(ws.run(&[]).status.success());
    assert_eq!(fs::read_to_string(ws.path().join("from-config.csv")).unwrap(), "ID,PDF Filename\n1,a.pdf\n");
}

#[test]
fn output_in_missing_directory_fails() {
    let ws = Workspace::new();
    ws.touch("a.pdf");
    let output = ws.run(&["--output", "nowhere/table.csv"]);
    assert!(!output.status.success());
    assert!(!ws.path().join("nowhere").exists());
}

#[test]
fn env_suffix_is_taken_verbatim() {
    let ws = Workspace::new();
    ws.touch("a.001");
    ws.touch("b.pdf");
    let output = ws.run_with_env(&[], &[("PDFCAT_SUFFIX", ".001")]);
    assert!(output.status.success(), "{}", String::from_utf8_lossy(&output.stderr));
    assert_eq!(ws.table(), "ID,PDF Filename\n1,a.001\n");
}

#[test]
fn unrelated_env_vars_are_ignored() {
    let ws = Workspace::new();
    ws.touch("a.pdf");
    let output = ws.run_with_env(&[], &[("PDFCAT_LOG", "1")]);
    assert!(output.status.success(), "{}", String::from_utf8_lossy(&output.stderr));
    assert_eq!(ws.table(), "ID,PDF Filename\n1,a.pdf\n");
}

#[test]
fn env_beats_config_file_and_flags_beat_env() {
    let ws = Workspace::new();
    fs::write(ws.path().join("pdfcat.toml"), "suffix = \".txt\"\noutput = \"from-config.csv\"\n").unwrap();
    ws.touch("a.pdf");
    ws.touch("b.epub");
    let vars = [("PDFCAT_SUFFIX", ".epub"), ("PDFCAT_OUTPUT", "from-env.csv")];
    assert!(ws.run_with_env(&[], &vars).status.success());
    assert_eq!(fs::read_to_string(ws.path().join("from-env.csv")).unwrap(), "ID,PDF Filename\n1,b.epub\n");
    assert!(ws.run_with_env(&["--suffix", ".pdf", "--output", TABLE], &vars).status.success());
    assert_eq!(ws.table(), "ID,PDF Filename\n1,a.pdf\n");
    assert!(!ws.path().join("from-config.csv").exists());
}

#[test]
fn continue_ids_past_max_fails_and_keeps_table() {
    let ws = Workspace::new();
    let original = "ID,PDF Filename\n18446744073709551615,x.pdf\n";
    fs::write(ws.path().join(TABLE), original).unwrap();
    ws.touch("y.pdf");
    let output = ws.run(&["--continue-ids"]);
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("no IDs left"));
    assert_eq!(ws.table(), original);
}
