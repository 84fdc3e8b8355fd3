//! YAML configuration for the wizard, read from `~/.virumap/config.yaml`.

pub mod error;
pub mod load;
pub mod paths;
pub mod settings;

pub use error::ConfigError;
pub use load::{load_config_from, load_global_config};
pub use paths::{
    default_config_path, default_state_root, state_root_override, GLOBAL_CONFIG_FILE_NAME,
    GLOBAL_STATE_DIR, STATE_ROOT_ENV,
};
pub use settings::{CaptchaConfig, FlowConfig, GeolocationConfig, WizardConfig};
