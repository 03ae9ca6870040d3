//! Rollguard Core - health check timing for rolling deployments
//!
//! Computes the orchestrator and load balancer health check settings for a
//! service and checks that, when a deployment is broken, the orchestrator
//! always marks tasks unhealthy before the load balancer does. That ordering is
//! what lets the deployment roll back instead of silently "succeeding".
//!
//! Nothing here probes anything. The two checks are modeled as arithmetic on a
//! [`TimingConfig`], and each derivation either returns configuration that can
//! be embedded as-is or a [`TimingError`].

pub mod defaults;
mod error;
mod lb;
mod orchestrator;
mod plan;
mod service;
mod timing;

pub use error::*;
pub use lb::*;
pub use orchestrator::*;
pub use plan::*;
pub use service::*;
pub use timing::*;
