pub mod config;
pub mod file_operations;

pub use config::{find_config_file, SyncConfig, CONFIG_FILE_NAME};
pub use file_operations::{
    definitions_path, get_definition_files, load_definitions, save_report,
    DEFAULT_TEST_CASES_FILE, TEST_CASES_FILE_VAR,
};
