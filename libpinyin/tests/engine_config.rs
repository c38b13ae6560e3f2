// Engine construction from configuration and shared use across threads.

use std::sync::Arc;

use libpinyin::{Engine, PinyinConfig, UnitKind, PINYIN_ABBREVIATIONS};

fn temp_path(name: &str) -> std::path::PathBuf {
    std::env::temp_dir().join(format!("libpinyin_{}_{}", name, std::process::id()))
}

#[test]
fn engine_from_toml_file() {
    let path = temp_path("engine.toml");
    std::fs::write(
        &path,
        "separator = \"-\"\nmax_cache_size = 4\nabbreviations = [\"zh\", \"ch\", \"sh\"]\n",
    )
    .unwrap();
    let cfg = PinyinConfig::load_toml(&path).unwrap();
    std::fs::remove_file(&path).ok();

    let engine = Engine::from_config(cfg).unwrap();
    assert_eq!(engine.cache_capacity(), 4);

    // "-" is now the separator, "'" is just an unknown character
    let segs = engine.input("xi-an");
    assert_eq!(segs[0].texts(), vec!["xi", "an"]);
    let segs = engine.input("xi'an");
    assert_eq!(segs[0].units().last().map(|u| u.kind), Some(UnitKind::Invalid));

    // "b" is no longer an abbreviation; it is still a syllable prefix
    assert_eq!(engine.parser().classify("b"), UnitKind::Incomplete);
    assert_eq!(engine.parser().classify("sh"), UnitKind::Abbreviated);
}

#[test]
fn engine_with_custom_syllable_table() {
    let path = temp_path("syllables.txt");
    std::fs::write(&path, "ni\nhao\nma\n").unwrap();
    let cfg = PinyinConfig {
        syllable_table: Some(path.clone()),
        abbreviations: vec!["n".into(), "h".into(), "m".into()],
        ..PinyinConfig::default()
    };
    let engine = Engine::from_config(cfg).unwrap();
    std::fs::remove_file(&path).ok();

    let segs = engine.input("nihaoma");
    assert_eq!(segs[0].texts(), vec!["ni", "hao", "ma"]);
    assert!(!engine.parser().contains_syllable("zhong"));
}

#[test]
fn missing_syllable_table_is_reported() {
    let cfg = PinyinConfig {
        syllable_table: Some(temp_path("does_not_exist.txt")),
        ..PinyinConfig::default()
    };
    let err = Engine::from_config(cfg).err().unwrap();
    assert!(format!("{:#}", err).contains("reading syllable table"));
}

#[test]
fn default_config_roundtrips_through_toml() {
    let cfg = PinyinConfig::default();
    let text = cfg.to_toml_string().unwrap();
    let back = PinyinConfig::from_toml_str(&text).unwrap();
    assert_eq!(back, cfg);
    assert_eq!(back.abbreviations.len(), PINYIN_ABBREVIATIONS.len());
}

#[test]
fn one_engine_many_threads() {
    let engine = Engine::default();
    let inputs = ["xian", "xi'an", "bj", "zh", "uu", "nihao"];
    let expected: Vec<_> = inputs
        .iter()
        .map(|i| engine.parser().parse(i))
        .collect();
    let expected = Arc::new(expected);

    let handles: Vec<_> = (0..4)
        .map(|_| {
            let engine = engine.clone();
            let expected = Arc::clone(&expected);
            std::thread::spawn(move || {
                for (input, want) in inputs.iter().zip(expected.iter()) {
                    assert_eq!(*engine.input(input), *want);
                }
            })
        })
        .collect();
    for h in handles {
        h.join().unwrap();
    }
    let (hits, misses) = engine.cache_stats();
    assert_eq!(hits + misses, 24);
}
