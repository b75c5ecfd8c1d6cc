use crate::core::redistribute::{NormalizeOptions, default_date_formats};
use crate::errors::{AppError, AppResult};
use crate::reader::ReadOptions;
use crate::utils::path::expand_tilde;
use serde::{Deserialize, Serialize};
use serde_yaml::Value;
use std::env;
use std::fs;
use std::io::{self, Write};
use std::path::PathBuf;

/// Every key a complete configuration file carries.
pub const CONFIG_KEYS: [&str; 8] = [
    "database",
    "uploads_dir",
    "export_dir",
    "csv_delimiter",
    "date_formats",
    "sheet",
    "default_company_code",
    "default_support_type",
];

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "default_database")]
    pub database: String,
    #[serde(default = "default_uploads_dir")]
    pub uploads_dir: String,
    #[serde(default = "default_export_dir")]
    pub export_dir: String,
    #[serde(default = "default_csv_delimiter")]
    pub csv_delimiter: String,
    #[serde(default = "default_date_formats")]
    pub date_formats: Vec<String>,
    #[serde(default)]
    pub sheet: Option<String>,
    #[serde(default)]
    pub default_company_code: Option<String>,
    #[serde(default)]
    pub default_support_type: Option<String>,
}

fn default_database() -> String {
    Config::database_file().to_string_lossy().to_string()
}
fn default_uploads_dir() -> String {
    Config::config_dir()
        .join("uploads")
        .to_string_lossy()
        .to_string()
}
fn default_export_dir() -> String {
    ".".to_string()
}
fn default_csv_delimiter() -> String {
    ",".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            database: default_database(),
            uploads_dir: default_uploads_dir(),
            export_dir: default_export_dir(),
            csv_delimiter: default_csv_delimiter(),
            date_formats: default_date_formats(),
            sheet: None,
            default_company_code: None,
            default_support_type: None,
        }
    }
}

impl Config {
    /// Return the standard configuration directory depending on the platform
    pub fn config_dir() -> PathBuf {
        if cfg!(target_os = "windows") {
            let appdata = env::var("APPDATA").unwrap_or_else(|_| ".".to_string());
            PathBuf::from(appdata).join("rcontapyme")
        } else {
            let home = env::var("HOME").unwrap_or_else(|_| ".".to_string());
            PathBuf::from(home).join(".rcontapyme")
        }
    }

    /// Return the full path of the config file
    pub fn config_file() -> PathBuf {
        Self::config_dir().join("rcontapyme.conf")
    }

    /// Return the full path of the SQLite database
    pub fn database_file() -> PathBuf {
        Self::config_dir().join("rcontapyme.sqlite")
    }

    /// Load configuration from file, or return defaults if not found
    pub fn load() -> AppResult<Self> {
        let path = Self::config_file();

        if !path.exists() {
            return Ok(Config::default());
        }

        let content = fs::read_to_string(&path).map_err(|_| AppError::ConfigLoad)?;
        serde_yaml::from_str(&content)
            .map_err(|e| AppError::Config(format!("{}: {}", path.display(), e)))
    }

    /// Keys of `CONFIG_KEYS` absent from the YAML `content`.
    pub fn missing_keys(content: &str) -> AppResult<Vec<&'static str>> {
        let yaml: Value =
            serde_yaml::from_str(content).map_err(|e| AppError::Config(e.to_string()))?;

        let map = yaml
            .as_mapping()
            .ok_or_else(|| AppError::Config("configuration is not a YAML mapping".into()))?;

        Ok(CONFIG_KEYS
            .iter()
            .copied()
            .filter(|k| !map.contains_key(Value::String(k.to_string())))
            .collect())
    }

    /// Uploads directory with `~` expanded.
    pub fn uploads_path(&self) -> PathBuf {
        expand_tilde(&self.uploads_dir)
    }

    /// Export directory with `~` expanded.
    pub fn export_path(&self) -> PathBuf {
        expand_tilde(&self.export_dir)
    }

    pub fn read_options(&self) -> AppResult<ReadOptions> {
        let delimiter = match self.csv_delimiter.as_bytes() {
            [b] => *b,
            _ if self.csv_delimiter == "\\t" => b'\t',
            _ => {
                return Err(AppError::Config(format!(
                    "csv_delimiter must be a single ASCII character, got '{}'",
                    self.csv_delimiter
                )));
            }
        };

        Ok(ReadOptions {
            delimiter,
            sheet: self.sheet.clone(),
        })
    }

    pub fn normalize_options(&self) -> NormalizeOptions {
        let date_formats = if self.date_formats.is_empty() {
            default_date_formats()
        } else {
            self.date_formats.clone()
        };

        NormalizeOptions {
            date_formats,
            default_company_code: self.default_company_code.clone(),
            default_support_type: self.default_support_type.clone(),
        }
    }

    /// Initialize configuration, uploads directory and database file
    pub fn init_all(custom_name: Option<String>, is_test: bool) -> AppResult<Config> {
        let dir = Self::config_dir();
        fs::create_dir_all(&dir)?;

        // DB name: user provided or default
        let db_path = if let Some(name) = custom_name {
            let p = std::path::Path::new(&name);
            if p.is_absolute() {
                p.to_path_buf()
            } else {
                dir.join(p)
            }
        } else {
            Self::database_file()
        };

        let config = Config {
            database: db_path.to_string_lossy().to_string(),
            ..Config::default()
        };

        // Write config file
        if !is_test {
            let yaml = serde_yaml::to_string(&config).map_err(|_| AppError::ConfigSave)?;
            let mut file = fs::File::create(Self::config_file())?;
            file.write_all(yaml.as_bytes())?;
            println!("✅ Config file: {:?}", Self::config_file());
        }

        fs::create_dir_all(config.uploads_path())?;

        // Create empty DB file if not exists
        if !db_path.exists() {
            if let Some(parent) = db_path.parent() {
                fs::create_dir_all(parent)?;
            }
            fs::File::create(&db_path).map_err(|e| {
                io::Error::new(e.kind(), format!("{}: {}", db_path.display(), e))
            })?;
        }

        println!("✅ Database:    {:?}", db_path);

        Ok(config)
    }
}
