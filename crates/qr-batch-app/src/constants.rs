//! Built-in defaults used when no config file or flag overrides them

/// Application name, used for the config directory
pub const APP_NAME: &str = "qr-batch";

/// Config file name inside the config directory
pub const CONFIG_FILE_NAME: &str = "config.json";

pub const DEFAULT_INPUT: &str = "datosempleadosadd.csv";
pub const DEFAULT_OUTPUT_DIR: &str = "codigos_qr";

/// Column holding the identifier (national ID number)
pub const DEFAULT_ID_FIELD: &str = "cedula";

/// Column holding the display name
pub const DEFAULT_NAME_FIELD: &str = "nombre";

pub const DEFAULT_INPUT_ENCODING: &str = "utf-8";

/// Extension of every written artifact
pub const ARTIFACT_EXTENSION: &str = "png";
