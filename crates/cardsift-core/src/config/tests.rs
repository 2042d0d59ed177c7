use super::*;

#[test]
fn test_defaults_when_sections_missing() {
    let cfg: Config = toml::from_str("").unwrap();
    assert_eq!(cfg.target.bot, "leomatchbot");
    assert_eq!(cfg.filter.min_text_len, 80);
    assert_eq!(cfg.filter.include_mode, IncludeMode::Any);
    assert_eq!(cfg.buttons.pending_ttl_secs, 30);
    assert_eq!(cfg.buttons.press_delay_ms, 300);
    assert_eq!(cfg.buttons.dup_delay_ms, 200);
    assert!(!cfg.buttons.dup_numeric);
    assert!(cfg.startup.auto_start);
    assert_eq!(cfg.startup.start_text, "/start");
    assert_eq!(cfg.startup.start_click_text, "🚀 Смотреть анкеты");
    assert!(cfg.channel.telegram.is_none());
}

#[test]
fn test_filter_section_from_toml() {
    let toml_str = r#"
        [filter]
        include_keywords = ["fitness", "travel; books"]
        exclude_keywords = ["курит"]
        include_mode = "all"
        min_text_len = 0
    "#;
    let cfg: Config = toml::from_str(toml_str).unwrap();
    assert_eq!(cfg.filter.include_keywords, vec!["fitness", "travel; books"]);
    assert_eq!(cfg.filter.exclude_keywords, vec!["курит"]);
    assert_eq!(cfg.filter.include_mode, IncludeMode::All);
    assert_eq!(cfg.filter.min_text_len, 0);
}

#[test]
fn test_include_mode_is_lenient() {
    for (raw, expected) in [
        ("ALL", IncludeMode::All),
        (" All ", IncludeMode::All),
        ("any", IncludeMode::Any),
        ("most", IncludeMode::Any),
        ("", IncludeMode::Any),
    ] {
        let toml_str = format!("[filter]\ninclude_mode = \"{raw}\"\n");
        let cfg: Config = toml::from_str(&toml_str).unwrap();
        assert_eq!(cfg.filter.include_mode, expected, "include_mode = {raw:?}");
    }
}

#[test]
fn test_include_mode_must_be_a_string() {
    let toml_str = r#"
        [filter]
        include_mode = 1
    "#;
    assert!(toml::from_str::<Config>(toml_str).is_err());
}

#[test]
fn test_button_durations() {
    let toml_str = r#"
        [buttons]
        like = "❤️"
        press_delay_ms = 50
        pending_ttl_secs = 5
        dup_numeric = true
        dup_delay_ms = 10
    "#;
    let cfg: Config = toml::from_str(toml_str).unwrap();
    assert_eq!(cfg.buttons.like, "❤️");
    assert_eq!(cfg.buttons.skip, "");
    assert_eq!(cfg.buttons.press_delay(), Duration::from_millis(50));
    assert_eq!(cfg.buttons.pending_ttl(), Duration::from_secs(5));
    assert_eq!(cfg.buttons.dup_delay(), Duration::from_millis(10));
    assert!(cfg.buttons.dup_numeric);
}

#[test]
fn test_target_username_strips_at() {
    let target = TargetConfig {
        bot: " @LeoMatchBot ".to_string(),
    };
    assert_eq!(target.username(), "leomatchbot");
}

#[test]
fn test_env_overrides_token_and_target() {
    let mut cfg = Config::default();
    cfg.apply_overrides(|key| match key {
        ENV_TELEGRAM_TOKEN => Some("123:abc".to_string()),
        ENV_TARGET_BOT => Some("@otherbot".to_string()),
        _ => None,
    });
    let tg = cfg.channel.telegram.unwrap();
    assert!(tg.enabled);
    assert_eq!(tg.api_token, "123:abc");
    assert_eq!(tg.api_base, "https://api.telegram.org");
    assert_eq!(tg.callback_method, "getBotCallbackAnswer");
    assert_eq!(cfg.target.username(), "otherbot");
}

#[test]
fn test_telegram_section_from_toml() {
    let toml_str = r#"
        [channel.telegram]
        enabled = true
        api_token = "123:abc"
        api_base = "http://127.0.0.1:8081"
        callback_method = "pressButton"
    "#;
    let cfg: Config = toml::from_str(toml_str).unwrap();
    let tg = cfg.channel.telegram.unwrap();
    assert!(tg.enabled);
    assert_eq!(tg.api_base, "http://127.0.0.1:8081");
    assert_eq!(tg.callback_method, "pressButton");
}

#[test]
fn test_env_overrides_ignore_blank_values() {
    let mut cfg = Config::default();
    cfg.apply_overrides(|_| Some("   ".to_string()));
    assert!(cfg.channel.telegram.is_none());
    assert_eq!(cfg.target.bot, "leomatchbot");
}

#[test]
fn test_env_override_keeps_disabled_flag() {
    let mut cfg: Config = toml::from_str(
        r#"
        [channel.telegram]
        enabled = false
        api_token = "old"
    "#,
    )
    .unwrap();
    cfg.apply_overrides(|key| (key == ENV_TELEGRAM_TOKEN).then(|| "new".to_string()));
    let tg = cfg.channel.telegram.unwrap();
    assert!(!tg.enabled, "override must not force-enable a disabled channel");
    assert_eq!(tg.api_token, "new");
}

#[test]
fn test_load_missing_file_uses_defaults() {
    let cfg = load("/nonexistent/__cardsift_config__.toml").unwrap();
    assert_eq!(cfg.cardsift.name, "cardsift");
    assert_eq!(cfg.memory.db_path, "~/.cardsift/data/decisions.db");
}

#[test]
fn test_load_from_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.toml");
    std::fs::write(
        &path,
        "[target]\nbot = \"datingbot\"\n\n[channel.telegram]\nenabled = true\napi_token = \"t\"\n",
    )
    .unwrap();
    let cfg = load(path.to_str().unwrap()).unwrap();
    assert_eq!(cfg.target.bot, "datingbot");
    assert!(cfg.channel.telegram.unwrap().enabled);
}

#[test]
fn test_load_invalid_toml_is_config_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.toml");
    std::fs::write(&path, "[filter\nmin_text_len = ").unwrap();
    let err = load(path.to_str().unwrap()).unwrap_err();
    assert!(matches!(err, SiftError::Config(_)));
}

#[test]
fn test_shellexpand_leaves_absolute_paths() {
    assert_eq!(shellexpand("/var/lib/x.db"), "/var/lib/x.db");
}
