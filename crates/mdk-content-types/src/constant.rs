/// Authority that owns every built-in content type
pub const DEFAULT_AUTHORITY: &str = "xmtp.org";

/// Maximum number of reply envelopes that may be nested inside each other
pub(crate) const DEFAULT_MAX_REPLY_DEPTH: usize = 4;

/// How deep the legacy `text` probe walks into unknown variants
pub(crate) const LEGACY_TEXT_PROBE_DEPTH: usize = 8;
