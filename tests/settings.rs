use log::LevelFilter;
use vertex_gallery::color::Rgb;
use vertex_gallery::primitive::PrimitiveMode;
use vertex_gallery::settings::{
    count_choices, AudioSource, LaunchConfig, Settings, COUNT_MAX, COUNT_MIN, DEFAULT_AUDIO_URL,
};
use vertex_gallery::GalleryError;

#[test]
fn defaults_match_the_control_surface() {
    let settings = Settings::default();
    assert_eq!(settings.count, 10_000);
    assert_eq!(settings.background, Rgb::BLACK);
    assert_eq!(settings.primitive, PrimitiveMode::Points);
    assert!(!settings.play_sound);
}

#[test]
fn count_is_clamped_into_range() {
    let mut settings = Settings::default();
    assert_eq!(settings.set_count(10), COUNT_MIN);
    assert_eq!(settings.set_count(1_000_000), COUNT_MAX);
    assert_eq!(settings.set_count(5001), 5001);
}

#[test]
fn count_choices_step_by_a_thousand() {
    let choices: Vec<u32> = count_choices().collect();
    assert_eq!(choices.len(), 100);
    assert_eq!(choices.first(), Some(&1_000));
    assert_eq!(choices.last(), Some(&100_000));
}

#[test]
fn settings_json_uses_hex_colors_and_fills_missing_fields() {
    let settings = Settings::from_json(r##"{"background":"#336699","primitive":"lines"}"##)
        .expect("parse settings");
    assert_eq!(settings.background, Rgb::new(0x33, 0x66, 0x99));
    assert_eq!(settings.primitive, PrimitiveMode::Lines);
    assert_eq!(settings.count, 10_000);

    let json = settings.to_json().expect("serialize");
    assert!(json.contains("\"#336699\""));
}

#[test]
fn settings_json_clamps_count_and_rejects_bad_colors() {
    let settings = Settings::from_json(r#"{"count":3}"#).expect("parse settings");
    assert_eq!(settings.count, COUNT_MIN);
    assert!(Settings::from_json(r#"{"background":"red"}"#).is_err());
}

#[test]
fn launch_config_reads_query_pairs() {
    let config = LaunchConfig::from_pairs([
        ("piece", "ring"),
        ("count", "20000"),
        ("bg", "#ff8000"),
        ("mode", "LINE_LOOP"),
        ("audio", "mic"),
        ("log", "debug"),
    ])
    .expect("valid launch config");

    assert_eq!(config.piece.as_deref(), Some("ring"));
    assert_eq!(config.primitive, Some(PrimitiveMode::LineLoop));
    assert_eq!(config.audio, AudioSource::Microphone);
    assert_eq!(config.log_level, LevelFilter::Debug);

    let settings = config.settings();
    assert_eq!(settings.count, 20_000);
    assert_eq!(settings.background, Rgb::new(0xff, 0x80, 0x00));
    assert_eq!(settings.primitive, PrimitiveMode::Points);
}

#[test]
fn launch_config_defaults_to_the_bundled_audio_file() {
    let config = LaunchConfig::from_pairs(Vec::<(String, String)>::new()).expect("empty query");
    assert_eq!(config.audio, AudioSource::File(DEFAULT_AUDIO_URL.to_string()));
    assert_eq!(config.log_level, LevelFilter::Info);
    assert_eq!(config.settings(), Settings::default());
}

#[test]
fn launch_config_accepts_other_audio_sources() {
    let off = LaunchConfig::from_pairs([("audio", "off")]).expect("off");
    assert_eq!(off.audio, AudioSource::Off);
    let url = LaunchConfig::from_pairs([("audio", "media/other.ogg")]).expect("url");
    assert_eq!(url.audio, AudioSource::File("media/other.ogg".into()));
}

#[test]
fn launch_config_rejects_malformed_values() {
    for (key, value) in [("count", "lots"), ("bg", "#12"), ("mode", "quads"), ("log", "loud")] {
        let err = LaunchConfig::from_pairs([(key, value)]).expect_err("malformed value");
        assert!(
            matches!(err, GalleryError::InvalidSetting { .. } | GalleryError::InvalidColor(_)),
            "{key}={value} gave {err}"
        );
    }
}

#[test]
fn launch_config_ignores_unknown_keys() {
    let config = LaunchConfig::from_pairs([("utm_source", "x")]).expect("unknown keys are fine");
    assert_eq!(config, LaunchConfig::default());
}
