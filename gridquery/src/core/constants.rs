// =============================================================================
// Application Identity
// =============================================================================

/// Application name in lowercase (for paths and identifiers)
pub const APP_NAME_LOWER: &str = "gridquery";

// =============================================================================
// Configuration Files
// =============================================================================

/// Config file name, looked up in the working directory
pub const CONFIG_FILE_NAME: &str = "gridquery.json";

/// Environment variable for config file path
pub const ENV_CONFIG: &str = "GRIDQUERY_CONFIG";

/// Environment variable for log level/filter
pub const ENV_LOG: &str = "GRIDQUERY_LOG";

// =============================================================================
// SQL Rendering
// =============================================================================

/// Environment variable for the SQL dialect
pub const ENV_DIALECT: &str = "GRIDQUERY_DIALECT";

/// Environment variable for the queried table
pub const ENV_TABLE: &str = "GRIDQUERY_TABLE";

/// Default table name
pub const DEFAULT_TABLE: &str = "rows";
