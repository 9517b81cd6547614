use std::{collections::HashMap, fs, path::Path};

use anyhow::{bail, Context};
use url::Url;

pub const DEFAULT_SERVICE_BASE_URL: &str = "http://localhost:8000";
pub const SETTINGS_FILE: &str = "workspace.toml";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkspaceSettings {
    pub service_base_url: Url,
}

impl Default for WorkspaceSettings {
    fn default() -> Self {
        Self {
            service_base_url: Url::parse(DEFAULT_SERVICE_BASE_URL)
                .expect("default service url is valid"),
        }
    }
}

impl WorkspaceSettings {
    pub fn with_base_url(raw: &str) -> anyhow::Result<Self> {
        Ok(Self {
            service_base_url: parse_service_url(raw)?,
        })
    }
}

/// Defaults, then `workspace.toml` in the working directory, then environment.
pub fn load_settings() -> anyhow::Result<WorkspaceSettings> {
    load_settings_from(Path::new(SETTINGS_FILE), |key| std::env::var(key).ok())
}

pub fn load_settings_from(
    settings_file: &Path,
    env: impl Fn(&str) -> Option<String>,
) -> anyhow::Result<WorkspaceSettings> {
    let mut raw_url = DEFAULT_SERVICE_BASE_URL.to_string();

    if let Ok(raw) = fs::read_to_string(settings_file) {
        let file_cfg = toml::from_str::<HashMap<String, String>>(&raw)
            .with_context(|| format!("failed to parse '{}'", settings_file.display()))?;
        if let Some(v) = file_cfg.get("service_base_url") {
            raw_url = v.clone();
        }
    }

    if let Some(v) = env("ASSESSMENT_SERVICE_URL") {
        raw_url = v;
    }
    if let Some(v) = env("APP__SERVICE_BASE_URL") {
        raw_url = v;
    }

    WorkspaceSettings::with_base_url(&raw_url)
}

fn normalize_service_url(raw: &str) -> String {
    raw.trim().trim_end_matches('/').to_string()
}

fn parse_service_url(raw: &str) -> anyhow::Result<Url> {
    let normalized = normalize_service_url(raw);
    if normalized.is_empty() {
        bail!("service base url must not be empty");
    }

    let url = Url::parse(&normalized)
        .with_context(|| format!("invalid service base url '{normalized}'"))?;
    if !matches!(url.scheme(), "http" | "https") {
        bail!(
            "service base url '{normalized}' must use http or https, not '{}'",
            url.scheme()
        );
    }
    Ok(url)
}
