// storage layout constants
pub const DOCUMENT_SUFFIX: &str = ".json";

// database defaults
pub const DEFAULT_BRANCH: &str = "main";
pub const DEFAULT_BASE_PATH: &str = "";
