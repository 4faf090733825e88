use std::fmt;
use std::fs;
use std::time::Duration;
use serde::Deserialize;
use log::LevelFilter;
use url::Url;

use crate::{
    Error,
    core::{
        config::Config,
        Result
    },
};

pub const DEFAULT_API_URL: &str = "https://69265fd926e7e41498fa29b2.mockapi.io/contacts";

#[derive(Clone, Deserialize)]
struct LogCfg {
    #[serde(rename = "level")]
    level   : String,
    #[serde(rename = "logFile")]
    file    : Option<String>,
}

#[derive(Clone, Default, Deserialize)]
struct FileCfg {
    #[serde(rename = "apiUrl")]
    api_url     : Option<String>,
    #[serde(rename = "timeout")]
    timeout     : Option<u64>,
    #[serde(rename = "logger")]
    logger      : Option<LogCfg>,
}

struct Configuration {
    api_url     : Url,
    timeout     : Option<Duration>,
    log_level   : LevelFilter,
    log_file    : Option<String>,
}

pub struct Builder<'a> {
    api_url     : Option<&'a str>,
    timeout     : Option<u64>,

    log_level   : Option<LevelFilter>,
    log_file    : Option<&'a str>,

    cfg         : Option<FileCfg>,
}

impl<'a> Builder<'a> {
    pub fn new() -> Builder<'a> {
        Self {
            api_url     : None,
            timeout     : None,
            log_level   : None,
            log_file    : None,
            cfg         : None,
        }
    }

    pub fn with_api_url(&mut self, url: &'a str) -> &mut Self {
        self.api_url = Some(url);
        self
    }

    /// Client-side timeout for each remote call, in seconds.
    pub fn with_timeout(&mut self, secs: u64) -> &mut Self {
        self.timeout = Some(secs);
        self
    }

    pub fn with_logger(&mut self, level: LevelFilter, file: Option<&'a str>) -> &mut Self {
        self.log_level = Some(level);
        self.log_file = file;
        self
    }

    pub fn load(&mut self, input: &str) -> Result<&mut Self> {
        let data = fs::read_to_string(input).map_err(|e| {
            Error::Io(format!("Reading config error: {}", e))
        })?;

        self.load_str(&data)
    }

    pub fn load_str(&mut self, data: &str) -> Result<&mut Self> {
        let cfg = serde_json::from_str::<FileCfg>(data).map_err(|e| {
            Error::Argument(format!("bad config, error: {}", e))
        })?;

        self.cfg = Some(cfg);
        Ok(self)
    }

    pub fn build(&mut self) -> Result<Box<dyn Config>> {
        Ok(Box::new(Configuration::new(self)?))
    }
}

impl Configuration {
    fn new(b: &Builder) -> Result<Self> {
        let cfg = b.cfg.clone().unwrap_or_default();

        let api_url = b.api_url
            .map(|v| v.to_string())
            .or(cfg.api_url)
            .unwrap_or_else(|| DEFAULT_API_URL.to_string());

        let api_url = Url::parse(&api_url).map_err(|e| {
            Error::Argument(format!("bad api url {}, error: {}", api_url, e))
        })?;

        if api_url.cannot_be_a_base() {
            return Err(Error::Argument(format!("api url {} can not be a base", api_url)));
        }

        let timeout = b.timeout
            .or(cfg.timeout)
            .filter(|v| *v > 0)
            .map(Duration::from_secs);

        let (log_level, log_file) = match (b.log_level, cfg.logger) {
            (Some(level), _) => (level, b.log_file.map(|v| v.to_string())),
            (None, Some(logger)) => (
                logger.level.parse::<LevelFilter>().unwrap_or(LevelFilter::Info),
                logger.file,
            ),
            (None, None) => (LevelFilter::Info, b.log_file.map(|v| v.to_string())),
        };

        Ok(Self {
            api_url,
            timeout,
            log_level,
            log_file,
        })
    }
}

impl Config for Configuration {
    fn api_url(&self) -> &Url {
        &self.api_url
    }

    fn request_timeout(&self) -> Option<Duration> {
        self.timeout
    }

    fn log_level(&self) -> LevelFilter {
        self.log_level
    }

    fn log_file(&self) -> Option<&str> {
        self.log_file.as_deref()
    }

    #[cfg(feature = "inspect")]
    fn dump(&self) {
        println!("config: {}", self);
    }
}

impl fmt::Display for Configuration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "apiUrl:{},", self.api_url)?;
        if let Some(timeout) = self.timeout.as_ref() {
            write!(f, "timeout:{}s,", timeout.as_secs())?;
        }
        write!(f, "logLevel:{}", self.log_level)?;
        if let Some(file) = self.log_file.as_ref() {
            write!(f, ",logFile:{}", file)?;
        }
        Ok(())
    }
}
