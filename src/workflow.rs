use std::fs;

use anyhow::{Context, Result, bail};

use descry::service::CalculationRequest;
use descry::ui::{App, ExploreOutcome};
use descry::{theme, validate};

use crate::settings::ResolvedConfig;

/// Coordinates validating the input file and running the interactive grid.
pub(crate) struct CalculationWorkflow {
    app: App<'static>,
}

impl CalculationWorkflow {
    pub(crate) fn from_config(config: ResolvedConfig) -> Result<Self> {
        let ResolvedConfig {
            csv,
            service,
            descriptor_type,
            method,
            filter_option,
            theme: theme_name,
        } = config;

        let Some(path) = csv else {
            bail!("no CSV file given; pass one as the first argument");
        };
        validate::validate_csv(&path)?;
        let bytes = fs::read(&path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        let file_name = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| "molecules.csv".to_string());

        let theme = match theme_name {
            Some(name) => match theme::by_name(&name) {
                Some(theme) => theme,
                None => bail!(
                    "unknown theme '{name}'; available: {}",
                    theme::names().join(", ")
                ),
            },
            None => theme::Theme::default(),
        };

        let request = CalculationRequest {
            file_name,
            csv: bytes,
            descriptor_type,
            method,
            filter_option,
        };
        Ok(Self {
            app: App::new(service, request, theme),
        })
    }

    pub(crate) fn run(mut self) -> Result<ExploreOutcome> {
        self.app.run()
    }
}
