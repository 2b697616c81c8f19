use std::str::FromStr;

use anyhow::{Context, Result};

use crate::layout::{PageGeometry, PaperSize};

/// Application configuration loaded from environment variables.
/// Every variable is optional; invalid values fail startup.
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub rust_log: String,
    /// Default page geometry (PAGE_SIZE, PAGE_MARGIN_PT, BLOCK_SPACING_PT).
    pub geometry: PageGeometry,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the config from any key/value source. `from_env` passes the
    /// process environment.
    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let paper = match lookup("PAGE_SIZE") {
            Some(value) => PaperSize::from_str(&value)
                .map_err(anyhow::Error::msg)
                .context("PAGE_SIZE must be 'letter' or 'a4'")?,
            None => PaperSize::Letter,
        };

        let mut geometry = PageGeometry::for_paper(paper);
        if let Some(margin) = optional_var::<f32>(&lookup, "PAGE_MARGIN_PT")? {
            geometry.margin = margin;
        }
        if let Some(spacing) = optional_var::<f32>(&lookup, "BLOCK_SPACING_PT")? {
            geometry.block_spacing = spacing;
        }
        geometry
            .validate()
            .context("Configured page geometry leaves no room for content")?;

        Ok(Config {
            port: optional_var::<u16>(&lookup, "PORT")
                .context("PORT must be a valid port number")?
                .unwrap_or(8080),
            rust_log: lookup("RUST_LOG").unwrap_or_else(|| "info".to_string()),
            geometry,
        })
    }
}

fn optional_var<T>(lookup: impl Fn(&str) -> Option<String>, key: &str) -> Result<Option<T>>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match lookup(key) {
        Some(value) => value
            .trim()
            .parse::<T>()
            .map(Some)
            .with_context(|| format!("Environment variable '{key}' has an invalid value '{value}'")),
        None => Ok(None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn load(vars: &[(&str, &str)]) -> Result<Config> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_defaults_when_nothing_set() {
        let config = load(&[]).unwrap();
        assert_eq!(config.port, 8080);
        assert_eq!(config.rust_log, "info");
        assert_eq!(config.geometry, PageGeometry::letter());
    }

    #[test]
    fn test_overrides_are_applied() {
        let config = load(&[
            ("PORT", "9000"),
            ("PAGE_SIZE", "A4"),
            ("PAGE_MARGIN_PT", " 36 "),
            ("BLOCK_SPACING_PT", "8"),
        ])
        .unwrap();
        assert_eq!(config.port, 9000);
        assert_eq!(config.geometry.page_height, 842.0);
        assert_eq!(config.geometry.margin, 36.0);
        assert_eq!(config.geometry.block_spacing, 8.0);
    }

    #[test]
    fn test_unknown_page_size_fails() {
        let err = load(&[("PAGE_SIZE", "legal")]).unwrap_err();
        assert!(err.to_string().contains("PAGE_SIZE"));
    }

    #[test]
    fn test_margin_leaving_no_content_fails_validation() {
        let err = load(&[("PAGE_MARGIN_PT", "400")]).unwrap_err();
        assert!(err.to_string().contains("no room for content"));
    }

    #[test]
    fn test_malformed_number_fails() {
        assert!(load(&[("PORT", "eighty")]).is_err());
        assert!(load(&[("BLOCK_SPACING_PT", "wide")]).is_err());
    }

    #[test]
    fn test_optional_var_missing_is_none() {
        let value = optional_var::<u16>(|_| None, "PORT").unwrap();
        assert!(value.is_none());
    }
}
