//! Shell command strings for the Python and front-end package managers.
//!
//! Nothing here quotes or validates its inputs; callers own shell-safety.

use std::fmt;
use std::time::Duration;

/// A `pip install` invocation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PipInstall {
    /// Leading text such as `cd /srv/app &&` or a virtualenv activation.
    pub prefix: String,
    /// Requirement files, emitted in order, duplicates kept.
    pub requirements: Vec<String>,
    pub timeout: Option<Duration>,
    pub quiet: bool,
    pub proxy: Option<String>,
}

impl fmt::Display for PipInstall {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut parts: Vec<String> = Vec::new();
        if !self.prefix.is_empty() {
            parts.push(self.prefix.clone());
        }
        parts.push("pip install".to_string());
        for requirement in &self.requirements {
            parts.push(format!("--requirement {}", requirement));
        }
        if let Some(timeout) = self.timeout {
            parts.push(format!("--timeout {}", timeout.as_secs()));
        }
        if self.quiet {
            parts.push("--quiet".to_string());
        }
        if let Some(proxy) = &self.proxy {
            parts.push(format!("--proxy {}", proxy));
        }
        f.write_str(&parts.join(" "))
    }
}

/// A `bower <command>` invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BowerCommand {
    pub command: String,
    pub production: bool,
    /// `--config.<key>=<value>` overrides in insertion order.
    pub config: Vec<(String, String)>,
}

impl BowerCommand {
    /// Production mode is on unless turned off explicitly.
    pub fn new(command: impl Into<String>) -> Self {
        Self { command: command.into(), production: true, config: Vec::new() }
    }

    pub fn production(mut self, production: bool) -> Self {
        self.production = production;
        self
    }

    pub fn config<K, V>(mut self, entries: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        self.config.extend(entries.into_iter().map(|(k, v)| (k.into(), v.into())));
        self
    }
}

impl fmt::Display for BowerCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "bower {}", self.command)?;
        if self.production {
            f.write_str(" --production")?;
        }
        for (key, value) in &self.config {
            write!(f, " --config.{}={}", key, value)?;
        }
        Ok(())
    }
}

/// Build a `pip install` command line.
pub fn build_install_command(
    prefix: &str,
    requirements: &[impl AsRef<str>],
    timeout: Option<Duration>,
    quiet: bool,
    proxy: Option<&str>,
) -> String {
    PipInstall {
        prefix: prefix.to_string(),
        requirements: requirements.iter().map(|r| r.as_ref().to_string()).collect(),
        timeout,
        quiet,
        proxy: proxy.map(str::to_string),
    }
    .to_string()
}

/// Build a `bower` command line.
pub fn build_frontend_command<K, V>(
    command: &str,
    production: bool,
    config: impl IntoIterator<Item = (K, V)>,
) -> String
where
    K: Into<String>,
    V: Into<String>,
{
    BowerCommand::new(command).production(production).config(config).to_string()
}
