//! Default value functions used by serde for config deserialization.

pub fn default_name() -> String {
    "cardsift".to_string()
}

pub fn default_data_dir() -> String {
    "~/.cardsift".to_string()
}

pub fn default_log_level() -> String {
    "info".to_string()
}

pub fn default_true() -> bool {
    true
}

pub fn default_target_bot() -> String {
    "leomatchbot".to_string()
}

pub fn default_min_text_len() -> usize {
    80
}

pub fn default_press_delay_ms() -> u64 {
    300
}

pub fn default_pending_ttl_secs() -> u64 {
    30
}

pub fn default_dup_delay_ms() -> u64 {
    200
}

pub fn default_start_text() -> String {
    "/start".to_string()
}

pub fn default_start_click_text() -> String {
    "\u{1f680} Смотреть анкеты".to_string()
}

pub fn default_start_delay_ms() -> u64 {
    1000
}

pub fn default_api_base() -> String {
    "https://api.telegram.org".to_string()
}

pub fn default_db_path() -> String {
    "~/.cardsift/data/decisions.db".to_string()
}

pub fn default_callback_method() -> String {
    "getBotCallbackAnswer".to_string()
}
