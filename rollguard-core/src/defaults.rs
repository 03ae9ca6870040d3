pub const DEFAULT_MAX_CONTAINER_STARTUP_SECS: u32 = 30;
pub const DEFAULT_TIMEOUT_SECS: u32 = 5;
pub const DEFAULT_CHECK_INTERVAL_ORCHESTRATOR_SECS: u32 = 10;
pub const DEFAULT_CHECK_INTERVAL_LB_SECS: u32 = 30;
pub const DEFAULT_NUM_CHECKS_ORCHESTRATOR: u32 = 2;
pub const DEFAULT_NUM_CHECKS_LB: u32 = 5;
pub const DEFAULT_ENDPOINT_PATH: &str = "/";
pub const DEFAULT_CONTAINER_PORT: u16 = 8000;

/// Slack the LB bound must keep over the orchestrator bound.
pub const RACE_MARGIN_SECS: u64 = 30;

/// Service-level window in which unhealthy tasks are not acted on.
/// Shared by the orchestrator and LB checks, so it is kept small.
pub const SERVICE_GRACE_PERIOD_SECS: u32 = 10;

/// The LB poll interval is only a guideline; assume it can run this much faster.
pub const LB_INTERVAL_JITTER_FLOOR_SECS: u32 = 2;
pub const LB_INTERVAL_JITTER_DIVISOR: u32 = 5;

/// Extra second on top of the HTTP timeout for the orchestrator's own harness.
pub const PROBE_HARNESS_SLACK_SECS: u32 = 1;
