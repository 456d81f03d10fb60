//! The `.pyensure` configuration.
//!
//! Layers are found by [`ConfigPaths`], combined by [`merge_configs`],
//! deserialized into [`PyensureConfig`] and then checked by [`validate`].
//! See [`loader`] for where each layer lives.
//!
//! ```
//! use std::fs;
//! use pyensure::config::{load_merged_config, validate};
//!
//! let project = tempfile::tempdir().unwrap();
//! fs::create_dir_all(project.path().join(".pyensure")).unwrap();
//! fs::write(
//!     project.path().join(".pyensure/config.yml"),
//!     "settings:\n  max_attempts: 3\naliases:\n  cv2: opencv-python-headless",
//! )
//! .unwrap();
//!
//! let config = load_merged_config(project.path()).unwrap();
//! validate(&config).unwrap();
//! assert_eq!(config.settings.max_attempts, 3);
//! assert_eq!(config.aliases["cv2"], "opencv-python-headless");
//! ```

pub mod loader;
pub mod merger;
pub mod schema;
pub mod validator;

pub use loader::{
    find_project_root, load_config, load_config_file, load_config_value, load_merged_config,
    parse_config, ConfigPaths, CONFIG_DIR,
};
pub use merger::{deep_merge, merge_configs, overlay_onto};
pub use schema::{IndexConfig, PyensureConfig, Settings};
pub use validator::{validate, validate_config, ValidationError};
