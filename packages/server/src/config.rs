//! Command-line configuration.
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - 引数なしの既定値（21:00–06:00、messaging スコープ）
//! - スコープ・プレフィックス・時刻の上書き、ゲートの無効化
//! - 不正なプレフィックス・時刻の拒否

use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use chrono::NaiveTime;
use kaiwa_shared::time::parse_time_of_day;
use thiserror::Error;

use crate::domain::{AccessGate, GateScope, RestrictedWindow};

/// Which paths the time window applies to
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum GateScopeArg {
    /// Only the messaging paths (see `--gated-prefix`)
    Messaging,
    /// Everything except the exempt paths (see `--exempt-prefix`)
    AllExceptExempt,
}

/// Messaging REST server
#[derive(Debug, Parser)]
#[command(name = "kaiwa-server", version, about, long_about = None)]
pub struct ServerArgs {
    /// Address to bind
    #[arg(long, default_value = "127.0.0.1")]
    pub host: String,

    /// Port to listen on
    #[arg(short, long, default_value_t = 8080)]
    pub port: u16,

    /// Log level used when RUST_LOG is not set
    #[arg(long, default_value = "info")]
    pub log_level: String,

    /// File that receives one line per request
    #[arg(long, default_value = "requests.log")]
    pub request_log: PathBuf,

    /// Start of the restricted window (HH:MM)
    #[arg(long, default_value = "21:00", value_parser = parse_time_of_day)]
    pub restrict_start: NaiveTime,

    /// End of the restricted window (HH:MM), inclusive
    #[arg(long, default_value = "06:00", value_parser = parse_time_of_day)]
    pub restrict_end: NaiveTime,

    #[arg(long, value_enum, default_value_t = GateScopeArg::Messaging)]
    pub gate_scope: GateScopeArg,

    /// Path prefix restricted in the `messaging` scope. Repeatable.
    #[arg(long = "gated-prefix")]
    pub gated_prefixes: Vec<String>,

    /// Path prefix left open in the `all-except-exempt` scope. Repeatable.
    #[arg(long = "exempt-prefix")]
    pub exempt_prefixes: Vec<String>,

    /// Serve every path at any time of day
    #[arg(long)]
    pub disable_time_gate: bool,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("path prefix must start with '/': {0}")]
    InvalidPrefix(String),
}

/// Validated server settings
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub request_log_path: PathBuf,
    /// `None` when the time gate is disabled
    pub access_gate: Option<AccessGate>,
}

impl ServerArgs {
    pub fn into_config(self) -> Result<ServerConfig, ConfigError> {
        let access_gate = if self.disable_time_gate {
            None
        } else {
            let window = RestrictedWindow::new(self.restrict_start, self.restrict_end);
            let scope = match self.gate_scope {
                GateScopeArg::Messaging if self.gated_prefixes.is_empty() => {
                    GateScope::messaging_default()
                }
                GateScopeArg::Messaging => GateScope::Messaging {
                    gated_prefixes: validate_prefixes(self.gated_prefixes)?,
                },
                GateScopeArg::AllExceptExempt if self.exempt_prefixes.is_empty() => {
                    GateScope::all_except_exempt_default()
                }
                GateScopeArg::AllExceptExempt => GateScope::AllExceptExempt {
                    exempt_prefixes: validate_prefixes(self.exempt_prefixes)?,
                },
            };
            Some(AccessGate::new(window, scope))
        };

        Ok(ServerConfig {
            host: self.host,
            port: self.port,
            request_log_path: self.request_log,
            access_gate,
        })
    }
}

fn validate_prefixes(prefixes: Vec<String>) -> Result<Vec<String>, ConfigError> {
    match prefixes.iter().find(|p| !p.starts_with('/')) {
        Some(bad) => Err(ConfigError::InvalidPrefix(bad.clone())),
        None => Ok(prefixes),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Result<ServerArgs, clap::Error> {
        ServerArgs::try_parse_from(std::iter::once("kaiwa-server").chain(args.iter().copied()))
    }

    fn hm(h: u32, m: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, m, 0).unwrap()
    }

    #[test]
    fn test_defaults() {
        // テスト項目: 引数なしでは 21:00–06:00 の messaging スコープになる
        // given (前提条件):
        let args = parse(&[]).unwrap();

        // when (操作):
        let config = args.into_config().unwrap();

        // then (期待する結果):
        assert_eq!(config.host, "127.0.0.1");
        assert_eq!(config.port, 8080);
        assert_eq!(config.request_log_path, PathBuf::from("requests.log"));
        assert_eq!(
            config.access_gate,
            Some(AccessGate::new(
                RestrictedWindow::new(hm(21, 0), hm(6, 0)),
                GateScope::messaging_default()
            ))
        );
    }

    #[test]
    fn test_all_except_exempt_with_custom_window() {
        // テスト項目: スコープと時間帯を引数で上書きできる
        // given (前提条件):
        let args = parse(&[
            "--gate-scope",
            "all-except-exempt",
            "--restrict-start",
            "22:30",
            "--restrict-end",
            "05:00",
        ])
        .unwrap();

        // when (操作):
        let gate = args.into_config().unwrap().access_gate.unwrap();

        // then (期待する結果):
        assert_eq!(gate.window, RestrictedWindow::new(hm(22, 30), hm(5, 0)));
        assert_eq!(gate.scope, GateScope::all_except_exempt_default());
    }

    #[test]
    fn test_custom_gated_prefixes() {
        // テスト項目: --gated-prefix を複数指定すると既定値を置き換える
        // given (前提条件):
        let args = parse(&["--gated-prefix", "/chats/", "--gated-prefix", "/rooms/"]).unwrap();

        // when (操作):
        let gate = args.into_config().unwrap().access_gate.unwrap();

        // then (期待する結果):
        assert_eq!(
            gate.scope,
            GateScope::Messaging {
                gated_prefixes: vec!["/chats/".to_string(), "/rooms/".to_string()]
            }
        );
    }

    #[test]
    fn test_prefix_without_leading_slash_is_rejected() {
        // テスト項目: '/' で始まらないプレフィックスはエラーになる
        // given (前提条件):
        let args = parse(&["--gated-prefix", "chats/"]).unwrap();

        // when (操作):
        let result = args.into_config();

        // then (期待する結果):
        assert_eq!(
            result.unwrap_err(),
            ConfigError::InvalidPrefix("chats/".to_string())
        );
    }

    #[test]
    fn test_disable_time_gate() {
        // テスト項目: --disable-time-gate でゲートが無効になる
        // given (前提条件):
        let args = parse(&["--disable-time-gate"]).unwrap();

        // when (操作):
        let config = args.into_config().unwrap();

        // then (期待する結果):
        assert_eq!(config.access_gate, None);
    }

    #[test]
    fn test_invalid_time_is_rejected() {
        // テスト項目: 不正な時刻はパース時点で拒否される
        // when (操作):
        let result = parse(&["--restrict-start", "25:00"]);

        // then (期待する結果):
        assert!(result.is_err());
    }
}
