use std::fs;
use std::path::Path;

use mapgen_core::export::parse_json;
use mapgen_tools::config::BatchConfig;
use mapgen_tools::emit::{
    FileFormat, PRACTICE_FILE_STEM, RANDOM_FILE_STEM, emit_random, emit_symmetric,
};
use tempfile::tempdir;

fn small_config(output_dir: &Path) -> BatchConfig {
    let mut config = BatchConfig::from_toml_str(
        r#"
        [symmetric]
        trials = { "1P1G" = 2, "1P2G" = 3, "2P2G" = 4 }

        [random]
        count = 5
        practice_count = 2
        "#,
    )
    .expect("config parses");
    config.output_dir = output_dir.to_path_buf();
    config.validate().expect("config is valid");
    config
}

#[test]
fn symmetric_files_are_named_per_condition_and_share_one_index_sequence() {
    let dir = tempdir().expect("tempdir");
    let config = small_config(dir.path());

    let written = emit_symmetric(&config, 42, FileFormat::Script).expect("emit");
    let names: Vec<String> = written
        .iter()
        .map(|file| file.path.file_name().expect("file name").to_string_lossy().into_owned())
        .collect();
    assert_eq!(names, ["MapsFor1P1G.js", "MapsFor1P2G.js", "MapsFor2P2G.js"]);
    assert_eq!(written.iter().map(|file| file.trials).collect::<Vec<_>>(), [2, 3, 4]);

    let script = fs::read_to_string(dir.path().join("MapsFor2P2G.js")).expect("read");
    let json = script
        .strip_prefix("const MapsFor2P2G = ")
        .and_then(|rest| rest.strip_suffix(';'))
        .expect("script wrapper");
    let records = parse_json(json).expect("parse");
    let indices: Vec<usize> = records.iter().map(|(index, _)| *index).collect();
    assert_eq!(indices, [5, 6, 7, 8]);
    assert!(records.iter().all(|(_, record)| record.init_ai_grid.is_some()));
}

#[test]
fn random_batch_writes_practice_prefix() {
    let dir = tempdir().expect("tempdir");
    let config = small_config(dir.path());

    let written = emit_random(&config, 7, FileFormat::Json).expect("emit");
    assert_eq!(written.len(), 2);
    assert_eq!(written[0].path, dir.path().join(format!("{RANDOM_FILE_STEM}.json")));
    assert_eq!(written[1].path, dir.path().join(format!("{PRACTICE_FILE_STEM}.json")));

    let all = parse_json(&fs::read_to_string(&written[0].path).expect("read")).expect("parse");
    let practice = parse_json(&fs::read_to_string(&written[1].path).expect("read")).expect("parse");
    assert_eq!(all.len(), 5);
    assert_eq!(practice.len(), 2);
    assert_eq!(practice[..], all[..2]);
    for (_, record) in &all {
        assert_eq!(record.map_type, "randomMap");
        assert_eq!(record.obstacles.as_deref(), Some(&[][..]));
        assert_eq!(record.noise_step.as_ref().map(Vec::len), Some(3));
    }
}

#[test]
fn zero_practice_count_skips_the_practice_file() {
    let dir = tempdir().expect("tempdir");
    let mut config = small_config(dir.path());
    config.random.practice_count = 0;

    let written = emit_random(&config, 7, FileFormat::Script).expect("emit");
    assert_eq!(written.len(), 1);
    assert!(!dir.path().join(format!("{PRACTICE_FILE_STEM}.js")).exists());
    let script = fs::read_to_string(&written[0].path).expect("read");
    assert!(script.starts_with("const config = {"), "{script}");
}

#[test]
fn same_seed_rewrites_identical_files() {
    let first = tempdir().expect("tempdir");
    let second = tempdir().expect("tempdir");

    let a = emit_symmetric(&small_config(first.path()), 99, FileFormat::Script).expect("emit");
    let b = emit_symmetric(&small_config(second.path()), 99, FileFormat::Script).expect("emit");
    for (left, right) in a.iter().zip(&b) {
        assert_eq!(left.fingerprint, right.fingerprint);
        assert_eq!(
            fs::read_to_string(&left.path).expect("read"),
            fs::read_to_string(&right.path).expect("read")
        );
    }
}

#[test]
fn config_file_is_loaded_from_disk() {
    let dir = tempdir().expect("tempdir");
    let path = dir.path().join("batch.toml");
    fs::write(&path, "grid_size = 21\n[random]\nmin_distance_between_targets = 6\n")
        .expect("write");

    let config = BatchConfig::load(&path).expect("load");
    assert_eq!(config.grid_size, 21);
    assert_eq!(config.random.min_distance_between_targets, 6);

    let missing = BatchConfig::load(&dir.path().join("absent.toml")).expect_err("missing file");
    assert!(format!("{missing:#}").contains("absent.toml"));
}
