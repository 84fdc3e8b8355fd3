pub mod fs_atomic;
pub mod ids;
pub mod logging;

pub use ids::{StepPath, StoreKey};
pub use logging::{wizard_log_path, LogLevel, WizardLog};
