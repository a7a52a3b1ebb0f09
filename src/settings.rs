use std::env;
use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Result, anyhow, bail};
use config::{Config, ConfigError, File};
use serde::Deserialize;

use descry::app_dirs;
use descry::service::{DescriptorType, FilterOption, Method, ServiceConfig};

use crate::cli::CliArgs;

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
struct RawConfig {
    service: ServiceSection,
    request: RequestSection,
    ui: UiSection,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
struct ServiceSection {
    endpoint: Option<String>,
    timeout_secs: Option<u64>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
struct RequestSection {
    descriptor_type: Option<String>,
    method: Option<String>,
    filter_option: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
struct UiSection {
    theme: Option<String>,
}

#[derive(Debug)]
pub struct ResolvedConfig {
    pub csv: Option<PathBuf>,
    pub service: ServiceConfig,
    pub descriptor_type: DescriptorType,
    pub method: Method,
    pub filter_option: FilterOption,
    pub theme: Option<String>,
}

impl ResolvedConfig {
    pub fn print_summary(&self) {
        println!("Effective configuration:");
        match &self.csv {
            Some(path) => println!("  CSV file: {}", path.display()),
            None => println!("  CSV file: (none)"),
        }
        println!("  Endpoint: {}", self.service.endpoint);
        println!("  Timeout: {}s", self.service.timeout.as_secs());
        println!("  Descriptor type: {}", self.descriptor_type);
        println!("  Method: {}", self.method);
        println!("  Filter option: {}", self.filter_option);
        println!(
            "  UI theme: {}",
            self.theme.as_deref().unwrap_or("(default)")
        );
    }
}

pub fn load(cli: &CliArgs) -> Result<ResolvedConfig> {
    let builder = build_config(cli)?;
    let mut raw: RawConfig = builder
        .try_deserialize()
        .map_err(|err| anyhow!("failed to deserialize configuration: {err}"))?;
    raw.apply_cli_overrides(cli);
    raw.resolve(cli.csv.clone())
}

fn build_config(cli: &CliArgs) -> Result<Config> {
    let mut builder = Config::builder();

    if !cli.no_config {
        for path in default_config_files() {
            builder = builder.add_source(File::from(path).required(false));
        }
    }

    for path in &cli.config {
        builder = builder.add_source(File::from(path.clone()).required(true));
    }

    builder = builder.add_source(
        config::Environment::with_prefix("descry")
            .separator("__")
            .try_parsing(true)
            .list_separator(","),
    );

    builder.build().map_err(|err| match err {
        ConfigError::Frozen => anyhow!("configuration builder is frozen"),
        other => other.into(),
    })
}

fn default_config_files() -> Vec<PathBuf> {
    let mut files = Vec::new();

    if let Ok(dir) = app_dirs::get_config_dir() {
        files.push(dir.join("config.toml"));
    }

    if let Ok(current_dir) = env::current_dir() {
        files.push(current_dir.join(".descry.toml"));
        files.push(current_dir.join("descry.toml"));
    }

    files
}

impl RawConfig {
    fn apply_cli_overrides(&mut self, cli: &CliArgs) {
        if let Some(endpoint) = cli.endpoint.clone() {
            self.service.endpoint = Some(endpoint);
        }
        if let Some(timeout) = cli.timeout {
            self.service.timeout_secs = Some(timeout);
        }
        if let Some(value) = cli.descriptor_type.clone() {
            self.request.descriptor_type = Some(value);
        }
        if let Some(value) = cli.method.clone() {
            self.request.method = Some(value);
        }
        if let Some(value) = cli.filter_option.clone() {
            self.request.filter_option = Some(value);
        }
        if let Some(theme) = cli.theme.clone() {
            self.ui.theme = Some(theme);
        }
    }

    fn resolve(self, csv: Option<PathBuf>) -> Result<ResolvedConfig> {
        let mut service = ServiceConfig::default();
        if let Some(endpoint) = self.service.endpoint {
            service.endpoint = endpoint;
        }
        if let Some(secs) = self.service.timeout_secs {
            service.timeout = Duration::from_secs(secs);
        }

        let descriptor_type = match self.request.descriptor_type {
            Some(value) => value.parse::<DescriptorType>().map_err(|err| anyhow!(err))?,
            None => DescriptorType::default(),
        };
        if !descriptor_type.is_available() {
            bail!("descriptor type '{descriptor_type}' is not yet available; use '1D/2D'");
        }
        let method = match self.request.method {
            Some(value) => value.parse::<Method>().map_err(|err| anyhow!(err))?,
            None => Method::default(),
        };
        let filter_option = match self.request.filter_option {
            Some(value) => value.parse::<FilterOption>().map_err(|err| anyhow!(err))?,
            None => FilterOption::default(),
        };

        Ok(ResolvedConfig {
            csv,
            service,
            descriptor_type,
            method,
            filter_option,
            theme: self.ui.theme,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw(request: RequestSection) -> RawConfig {
        RawConfig {
            request,
            ..RawConfig::default()
        }
    }

    #[test]
    fn resolves_defaults_when_nothing_is_configured() {
        let resolved = raw(RequestSection::default())
            .resolve(None)
            .expect("defaults should resolve");
        assert_eq!(resolved.descriptor_type, DescriptorType::OneTwoD);
        assert_eq!(resolved.method, Method::RdKit);
        assert_eq!(resolved.filter_option, FilterOption::None);
        assert_eq!(resolved.service.endpoint, descry::service::DEFAULT_ENDPOINT);
    }

    #[test]
    fn rejects_unavailable_descriptor_types() {
        let err = raw(RequestSection {
            descriptor_type: Some("3D".into()),
            ..RequestSection::default()
        })
        .resolve(None)
        .expect_err("3D descriptors are not available");
        assert!(err.to_string().contains("not yet available"));
    }

    #[test]
    fn rejects_unknown_methods() {
        let err = raw(RequestSection {
            method: Some("OpenBabel".into()),
            ..RequestSection::default()
        })
        .resolve(None)
        .expect_err("unknown method should fail");
        assert!(err.to_string().contains("OpenBabel"));
    }
}
