use futures::executor::block_on;
use loadkit::prelude::*;
use serde_json::json;
use std::{cell::Cell, rc::Rc};

fn loader_with(source: MemorySource) -> ResourceLoader {
    ResourceLoader::with_source(LoaderConfig::default(), source)
}

#[test]
fn config_json_batch() {
    let source = MemorySource::new().with("/config.json", br#"{"a":1}"#.to_vec());
    let mut loader = loader_with(source);
    loader.register_json("config", "/config.json");

    let calls = Rc::new(Cell::new(0));
    let done = calls.clone();
    loader
        .load_all(move |report| {
            assert!(report.is_success());
            done.set(done.get() + 1);
        })
        .unwrap();

    while !loader.update() {}

    assert_eq!(calls.get(), 1);
    assert_eq!(loader.json("config"), Some(&json!({"a": 1})));
    assert_eq!(loader.pending_jsons().count(), 0);
}

#[test]
fn one_failure_does_not_hide_the_rest() {
    let source = MemorySource::new().with("/config.json", br#"{"a":1}"#.to_vec());
    let mut loader = loader_with(source);
    loader.register_json("config", "/config.json");
    loader.register_json("level", "/level.json");

    let report = block_on(loader.load_all_async()).unwrap();
    assert_eq!(report.len(), 2);
    assert!(loader.json("level").is_none());
    assert!(loader.json("config").is_some());

    let err = report.into_result().unwrap_err();
    assert_eq!(
        err.to_string(),
        "1 of 2 resources failed to load: level"
    );
}

#[test]
fn disk_files_through_default_source() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("pack.json"), r#"{ "json": { "config": "config.json" } }"#)
        .unwrap();
    std::fs::write(dir.path().join("config.json"), r#"{ "speed": 2.5 }"#).unwrap();

    let config = LoaderConfig::new().root(dir.path().to_string_lossy().to_string());
    let mut loader = ResourceLoader::with_config(config).unwrap();

    // the pack is a json document listing the rest
    loader.register_json("pack", "pack.json");
    assert!(block_on(loader.load_all_async()).unwrap().is_success());

    let manifest = Manifest::from_value(loader.json("pack").unwrap()).unwrap();
    loader.register_manifest(&manifest);
    assert!(block_on(loader.load_all_async()).unwrap().is_success());

    assert_eq!(loader.json("config"), Some(&json!({ "speed": 2.5 })));
    assert!(loader.json("pack").is_some());
}
