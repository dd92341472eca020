use std::io::Write;

/// Logger setup, constructed once at process start
#[derive(Debug, Clone)]
pub struct LogConfig {
    /// Filter used when `RUST_LOG` is not set
    pub default_filter: String,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            default_filter: "warn".to_string(),
        }
    }
}

impl LogConfig {
    pub fn builder(&self) -> env_logger::Builder {
        let env = env_logger::Env::default().default_filter_or(self.default_filter.as_str());
        let mut builder = env_logger::Builder::from_env(env);
        builder.format(|buf, record| {
            writeln!(
                buf,
                "in module {}, {:<8}: [{}:{}] {}",
                record.module_path().unwrap_or("?"),
                record.level(),
                record.file().unwrap_or("?"),
                record.line().unwrap_or(0),
                record.args()
            )
        });
        builder
    }

    pub fn init(&self) {
        self.builder().init();
    }
}
