//! MDK client constants

/// Number of messages fetched per page when a whole conversation is replayed
pub const DEFAULT_MESSAGE_PAGE_SIZE: usize = 50;

/// Maximum number of nested reply envelopes decoded
pub const DEFAULT_MAX_REPLY_DEPTH: usize = 4;

/// File name looked up by [`crate::config::load_client_config_from_dir`]
pub const CONFIG_FILE_NAME: &str = "mdk_config.json";
