/// Configuration constants for TFE API
pub mod api {
    /// Base path for TFE API v2
    pub const BASE_PATH: &str = "/api/v2";

    /// Organizations endpoint
    pub const ORGANIZATIONS: &str = "organizations";

    /// Workspaces endpoint
    pub const WORKSPACES: &str = "workspaces";

    /// Runs endpoint
    pub const RUNS: &str = "runs";

    /// Workspace variables endpoint (nested under a workspace)
    pub const VARS: &str = "vars";

    /// Variable sets endpoint
    pub const VARSETS: &str = "varsets";

    /// Default page size for API requests
    pub const DEFAULT_PAGE_SIZE: u32 = 100;

    /// Maximum number of pages fetched concurrently
    pub const MAX_CONCURRENT_PAGE_REQUESTS: usize = 10;
}

/// Configuration constants for credentials
pub mod credentials {
    /// Credentials file name
    pub const FILE_NAME: &str = "terraform.d/credentials.tfrc.json";

    /// Path to Terraform credentials file on Unix (relative to HOME)
    pub const FILE_PATH_UNIX: &str = ".terraform.d/credentials.tfrc.json";

    /// Environment variable names for token (checked in order)
    pub const TOKEN_ENV_VARS: &[&str] = &["TFE_TOKEN", "HCP_TOKEN", "TFC_TOKEN"];
}

/// Configuration constants for host resolution
pub mod host {
    /// Environment variables holding a bare hostname or a full address (checked in order)
    pub const ENV_VARS: &[&str] = &["TFE_HOSTNAME", "TFE_ADDRESS"];
}

/// Configuration constants for the default organization
pub mod organization {
    /// Environment variable holding the default organization
    pub const ENV_VAR: &str = "TFE_ORGANIZATION";
}

/// Run polling and retry settings
pub mod run {
    /// Minimum delay between two polls of a run (milliseconds)
    pub const POLL_BACKOFF_MIN_MS: u64 = 1_000;

    /// Maximum delay between two polls of a run (milliseconds)
    pub const POLL_BACKOFF_MAX_MS: u64 = 3_000;

    /// Default number of retries when a run errors
    pub const DEFAULT_RETRY_ATTEMPTS: u32 = 3;

    /// Default minimum backoff before a retry (seconds)
    pub const DEFAULT_RETRY_BACKOFF_MIN_SECS: u64 = 1;

    /// Default maximum backoff before a retry (seconds)
    pub const DEFAULT_RETRY_BACKOFF_MAX_SECS: u64 = 30;

    /// Message attached to runs created by this tool
    pub const MESSAGE_PREFIX: &str = "Triggered by tfe-datasource";

    /// Comment sent when confirming a run
    pub const APPLY_COMMENT: &str = "Confirmed by tfe-datasource";
}

/// Default values for CLI
pub mod defaults {
    /// Default TFE host
    pub const HOST: &str = "app.terraform.io";

    /// Default log level
    pub const LOG_LEVEL: &str = "warn";
}
