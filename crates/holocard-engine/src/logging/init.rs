use std::sync::Once;

/// Logger configuration.
///
/// `env_filter` uses `env_logger` filter syntax (e.g. "debug",
/// "holocard_engine=debug,wgpu_core=warn"). When unset, `RUST_LOG` is read.
#[derive(Debug, Clone)]
pub struct LoggingConfig {
    pub env_filter: Option<String>,
    pub write_style: env_logger::WriteStyle,
    /// Caps wgpu/naga internals at `warn` unless the filter names them itself.
    pub quiet_gpu: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            env_filter: None,
            write_style: env_logger::WriteStyle::Auto,
            quiet_gpu: true,
        }
    }
}

const GPU_TARGETS: [&str; 3] = ["wgpu_core", "wgpu_hal", "naga"];

/// Builds the filter string applied to the logger.
pub(crate) fn effective_filter(config: &LoggingConfig, env: Option<String>) -> String {
    let mut filter = config
        .env_filter
        .clone()
        .or(env)
        .unwrap_or_else(|| "info".to_string());

    if config.quiet_gpu {
        for target in GPU_TARGETS {
            if !filter.contains(target) {
                filter.push_str(&format!(",{target}=warn"));
            }
        }
    }

    filter
}

static INIT: Once = Once::new();

/// Initializes the global logger once; later calls are ignored.
pub fn init_logging(config: LoggingConfig) {
    INIT.call_once(|| {
        let filter = effective_filter(&config, std::env::var("RUST_LOG").ok());

        let mut builder = env_logger::Builder::new();
        builder.parse_filters(&filter);
        builder.write_style(config.write_style);
        builder.format_timestamp_millis();
        builder.init();

        log::debug!("logging initialized ({filter})");
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn explicit_filter_wins_over_env() {
        let cfg = LoggingConfig {
            env_filter: Some("debug".into()),
            quiet_gpu: false,
            ..Default::default()
        };
        assert_eq!(effective_filter(&cfg, Some("trace".into())), "debug");
    }

    #[test]
    fn default_is_info_with_quiet_gpu() {
        let f = effective_filter(&LoggingConfig::default(), None);
        assert!(f.starts_with("info"));
        assert!(f.contains("wgpu_core=warn"));
        assert!(f.contains("naga=warn"));
    }

    #[test]
    fn named_gpu_target_is_left_alone() {
        let cfg = LoggingConfig::default();
        let f = effective_filter(&cfg, Some("info,wgpu_hal=debug".into()));
        assert!(f.contains("wgpu_hal=debug"));
        assert!(!f.contains("wgpu_hal=warn"));
    }
}
