use crate::core::report::spreadsheet::SheetLayout;
use crate::core::report::{DEFAULT_JSON_FILE, DEFAULT_XLSX_FILE};
use crate::domain::model::PageQuery;
use crate::utils::error::{EtlError, Result};
use crate::utils::validation::{self, Validate};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

const DEFAULT_TIMEOUT_SECONDS: u64 = 30;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub app: AppSection,
    #[serde(default)]
    pub api_params: PageQuery,
    pub xlsx_formatting: XlsxFormatting,
    #[serde(default)]
    pub output: OutputConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppSection {
    pub base_api_url: String,
    pub max_api_attempts: u32,
    pub email_suffix: String,
    pub timeout_seconds: Option<u64>,
    pub retry_delay_ms: Option<u64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct XlsxFormatting {
    pub headers_color: String,
    pub odd_rows_color: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub directory: String,
    pub json_file: String,
    pub xlsx_file: String,
    pub augment_json_with_email: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            directory: ".".to_string(),
            json_file: DEFAULT_JSON_FILE.to_string(),
            xlsx_file: DEFAULT_XLSX_FILE.to_string(),
            augment_json_with_email: true,
        }
    }
}

impl AppConfig {
    /// Loads and parses a TOML config file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(EtlError::ConfigError {
                message: format!("Missing {} file!", path.display()),
            });
        }

        let content = std::fs::read_to_string(path).map_err(|e| EtlError::ConfigError {
            message: format!("Cannot read {}: {}", path.display(), e),
        })?;
        Self::from_toml_str(&content)
    }

    /// Parses config text after `${VAR}` substitution.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| EtlError::ConfigError {
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// Replaces `${NAME}` with the environment variable's value; unknown names are left in place.
    fn substitute_env_vars(content: &str) -> Result<String> {
        let re = regex::Regex::new(r"\$\{([^}]+)\}").map_err(|e| EtlError::ConfigError {
            message: format!("Invalid substitution pattern: {}", e),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.app.timeout_seconds.unwrap_or(DEFAULT_TIMEOUT_SECONDS))
    }

    pub fn retry_delay(&self) -> Duration {
        Duration::from_millis(self.app.retry_delay_ms.unwrap_or(0))
    }

    /// `Nobel laureates in {from} - {to}` when the year filters are present.
    pub fn sheet_title(&self) -> String {
        match (
            self.api_params.filter_text("nobelPrizeYear"),
            self.api_params.filter_text("yearTo"),
        ) {
            (Some(from), Some(to)) => format!("Nobel laureates in {} - {}", from, to),
            _ => "Nobel laureates".to_string(),
        }
    }

    pub fn sheet_layout(&self) -> Result<SheetLayout> {
        let header_color = validation::parse_hex_color(
            "xlsx_formatting.headers_color",
            &self.xlsx_formatting.headers_color,
        )?;
        let odd_row_color = validation::parse_hex_color(
            "xlsx_formatting.odd_rows_color",
            &self.xlsx_formatting.odd_rows_color,
        )?;
        Ok(SheetLayout::new(&self.sheet_title(), header_color, odd_row_color))
    }
}

impl Validate for AppConfig {
    fn validate(&self) -> Result<()> {
        validation::validate_url("app.base_api_url", &self.app.base_api_url)?;
        validation::validate_positive_number(
            "app.max_api_attempts",
            self.app.max_api_attempts as usize,
            1,
        )?;
        validation::validate_non_empty_string("app.email_suffix", &self.app.email_suffix)?;
        validation::validate_path("output.directory", &self.output.directory)?;
        validation::validate_path("output.json_file", &self.output.json_file)?;
        validation::validate_path("output.xlsx_file", &self.output.xlsx_file)?;
        self.sheet_layout()?;
        Ok(())
    }
}
