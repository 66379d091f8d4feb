use url::Url;

use super::models::Config;

#[derive(Debug, Clone)]
pub struct ConfigWarning {
    pub message: String,
    pub hint: Option<String>,
}

#[derive(Debug, Default, Clone)]
pub struct ConfigWarnings {
    pub items: Vec<ConfigWarning>,
}

impl ConfigWarnings {
    pub fn push<S: Into<String>>(&mut self, message: S) {
        self.items.push(ConfigWarning {
            message: message.into(),
            hint: None,
        });
    }

    pub fn push_with_hint<S: Into<String>, H: Into<String>>(
        &mut self,
        message: S,
        hint: H,
    ) {
        self.items.push(ConfigWarning {
            message: message.into(),
            hint: Some(hint.into()),
        });
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn extend(&mut self, other: ConfigWarnings) {
        self.items.extend(other.items);
    }

    pub fn iter(&self) -> impl Iterator<Item = &ConfigWarning> {
        self.items.iter()
    }
}

/// Non-fatal problems; the server still starts with any of these.
pub fn collect_warnings(config: &Config) -> ConfigWarnings {
    let mut warnings = ConfigWarnings::default();

    match config.upstream.url.as_deref() {
        None => warnings.push_with_hint(
            "No upstream URL configured; discovery requests will fail",
            "Set SEERR_URL or [upstream].url",
        ),
        Some(raw) => match Url::parse(raw) {
            Ok(url) if matches!(url.scheme(), "http" | "https") => {}
            Ok(url) => warnings.push(format!(
                "Upstream URL uses unsupported scheme `{}`",
                url.scheme()
            )),
            Err(err) => warnings.push_with_hint(
                format!("Upstream URL `{raw}` is not absolute: {err}"),
                "Use a full address such as http://localhost:5055",
            ),
        },
    }

    if config.upstream.url.is_some() && config.upstream.api_key.is_none() {
        warnings.push("No upstream API key configured; requests are sent unauthenticated");
    }

    let timing = &config.loader;
    if timing.scroll_delay > timing.parked_delay {
        warnings.push(format!(
            "loader.scroll_delay ({:?}) exceeds loader.parked_delay ({:?})",
            timing.scroll_delay, timing.parked_delay
        ));
    }

    if config.discovery.max_results == 0 {
        warnings.push("discovery.max_results is 0; person results are not truncated");
    }

    warnings
}
