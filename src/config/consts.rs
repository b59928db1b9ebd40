// src/config/consts.rs

// Net config
pub const ORIGIN: &str = "https://www.wis-tns.org";
pub const SEARCH_PATH: &str = "/search";
pub const USER_AGENT: &str = concat!("tns_scrape/", env!("CARGO_PKG_VERSION"));
pub const REQUEST_TIMEOUT_SECS: u64 = 60;

// Paging
pub const BATCH_SIZE: usize = 500;
pub const MAX_RETRIES: u32 = 1;
pub const RETRY_DELAY_MS: u64 = 2_000;
pub const REQUEST_PAUSE_MS: u64 = 1_000; // be polite

// Extraction
pub const COMMENT_MAX_CHARS: usize = 750;

// Local
pub const STORE_DIR: &str = ".store";
pub const LOG_FILE: &str = "debug.log";

// Export
pub const DEFAULT_OUT_DIR: &str = "out";
pub const DEFAULT_TABLE_PREFIX: &str = "TNS";
