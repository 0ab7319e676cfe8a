//! End-to-end runs of the `tdgen` command against a temporary master directory.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use clap::Parser;
use tdgen_cli::cli::Cli;
use tdgen_cli::commands::run_generate;
use tempfile::TempDir;

fn write_master(dir: &Path) {
    fs::write(dir.join("customers.csv"), "customerNo,name\n12,Ann\n7,Bo\n3,Cy\n").unwrap();
    fs::write(dir.join("flags.csv"), "flag\n0\n1\n").unwrap();
    fs::write(
        dir.join("seats.csv"),
        "floor,area,block,row,seat,grade\n\
         1,A,B1,1,1,S\n\
         1,A,B1,1,2,S\n\
         2,C,B4,3,7,A\n",
    )
    .unwrap();
    fs::write(dir.join("prices.csv"), "price_type,amount\nadult,100\nchild,50\n").unwrap();
    fs::write(dir.join("venues.csv"), "venue\nHall\n").unwrap();
}

fn args(master: &Path, output: &Path, extra: &[&str]) -> tdgen_cli::cli::GenerateArgs {
    let master = master.to_string_lossy().into_owned();
    let output = output.to_string_lossy().into_owned();
    let mut argv = vec![
        "tdgen".to_string(),
        "40".to_string(),
        "--master-dir".to_string(),
        master,
        "--output-dir".to_string(),
        output,
        "--no-progress".to_string(),
    ];
    argv.extend(extra.iter().map(|s| (*s).to_string()));
    Cli::try_parse_from(argv).unwrap().generate
}

fn read_rows(path: &Path) -> Vec<Vec<String>> {
    let bytes = fs::read(path).unwrap();
    let text = std::str::from_utf8(&bytes).unwrap();
    let text = text.strip_prefix('\u{feff}').expect("BOM prefix");
    text.lines()
        .map(|line| line.split(',').map(str::to_string).collect())
        .collect()
}

#[test]
fn writes_sorted_deduplicated_output() {
    let master = TempDir::new().unwrap();
    let out = TempDir::new().unwrap();
    write_master(master.path());

    let result = run_generate(&args(master.path(), out.path(), &["--seed", "11"]), false).unwrap();

    assert_eq!(result.seed, 11);
    assert!(result.seed_fixed);
    assert_eq!(result.requested, 40);
    assert_eq!(result.generated, 40);
    assert_eq!(result.written + result.duplicates_removed, 40);
    assert_eq!(result.universe_size, 3);
    assert_eq!(result.tables.len(), 5);
    assert!(result.tables.iter().any(|t| t.name == "venues" && !t.used));

    let path = result.output.expect("output path");
    assert_eq!(path.parent(), Some(out.path()));
    let name = path.file_name().unwrap().to_string_lossy().into_owned();
    assert!(name.starts_with("generated_combined_data_"));
    assert!(name.ends_with(".csv"));

    let rows = read_rows(&path);
    assert_eq!(
        rows[0],
        ["customerNo", "flag", "price_type", "grade", "floor", "area", "block", "row", "seat"]
    );
    let body = &rows[1..];
    assert_eq!(body.len(), result.written);

    // at most one row per (customerNo, grade, price_type)
    assert!(body.len() <= 3 * 2);

    let ids: Vec<u64> = body.iter().map(|r| r[0].parse().unwrap()).collect();
    assert!(ids.windows(2).all(|w| w[0] <= w[1]));

    let mut per_customer: HashMap<&str, (&str, &str)> = HashMap::new();
    for row in body {
        let entry = per_customer
            .entry(row[0].as_str())
            .or_insert((row[1].as_str(), row[3].as_str()));
        assert_eq!(*entry, (row[1].as_str(), row[3].as_str()));
        if row[1] == "0" {
            assert!(row[4..].iter().all(String::is_empty));
        } else {
            assert!(row[4..].iter().all(|v| !v.is_empty()));
        }
    }
}

#[test]
fn same_seed_same_output() {
    let master = TempDir::new().unwrap();
    write_master(master.path());

    let contents: Vec<Vec<u8>> = (0..2)
        .map(|_| {
            let out = TempDir::new().unwrap();
            let result =
                run_generate(&args(master.path(), out.path(), &["--seed", "99"]), false).unwrap();
            fs::read(result.output.unwrap()).unwrap()
        })
        .collect();

    assert_eq!(contents[0], contents[1]);
}

#[test]
fn dry_run_writes_nothing() {
    let master = TempDir::new().unwrap();
    let out = TempDir::new().unwrap();
    write_master(master.path());
    let target = out.path().join("never");

    let result = run_generate(&args(master.path(), &target, &["--dry-run"]), false).unwrap();

    assert!(result.output.is_none());
    assert!(!result.seed_fixed);
    assert!(!target.exists());
}

#[test]
fn missing_master_dir_reports_context() {
    let out = TempDir::new().unwrap();
    let missing = PathBuf::from(out.path()).join("no_such_dir");

    let err = run_generate(&args(&missing, out.path(), &[]), false).unwrap_err();

    let message = format!("{err:#}");
    assert!(message.contains("load master data"));
    assert!(message.contains("no_such_dir"));
}

#[test]
fn missing_required_table_is_configuration_error() {
    let master = TempDir::new().unwrap();
    let out = TempDir::new().unwrap();
    write_master(master.path());
    fs::remove_file(master.path().join("prices.csv")).unwrap();

    let err = run_generate(&args(master.path(), out.path(), &[]), false).unwrap_err();

    let message = format!("{err:#}");
    assert!(message.contains("generate records"));
    assert!(message.contains("prices"));
    assert_eq!(fs::read_dir(out.path()).unwrap().count(), 0);
}
