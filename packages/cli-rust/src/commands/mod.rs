//! CLI command implementations
//!
//! One module per verb. Each command checks its own preconditions, then
//! hands off to the service manager in `servicify-core`.

mod install;
mod list;
mod logs;
mod restart;
mod setup;
mod start;
mod status;
mod stop;
mod uninstall;

pub use install::{InstallArgs, cmd_install};
pub use list::{ListArgs, cmd_list};
pub use logs::{LogsArgs, cmd_logs};
pub use restart::{RestartArgs, cmd_restart};
pub use setup::{SetupArgs, cmd_setup};
pub use start::{StartArgs, cmd_start};
pub use status::{StatusArgs, cmd_status};
pub use stop::{StopArgs, cmd_stop};
pub use uninstall::{UninstallArgs, cmd_uninstall};

use servicify_core::privilege::require_elevated;
use servicify_core::{Config, ServiceError, ServiceManager, get_service_manager};

/// Service manager for a privileged verb
///
/// Root is checked before tooling so a non-root caller fails without any
/// probing of the host.
fn privileged_manager(config: &Config, action: &str) -> Result<Box<dyn ServiceManager>, ServiceError> {
    require_elevated(action)?;
    get_service_manager(config)
}
