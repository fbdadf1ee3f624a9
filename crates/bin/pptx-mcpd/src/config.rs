use clap::{Parser, builder::BoolishValueParser};
use std::error::Error;
use std::fmt;
use std::net::SocketAddr;
use std::time::Duration;

const DEFAULT_MCP_HTTP_ADDR: &str = "127.0.0.1:4025";
const DEFAULT_SSE_KEEP_ALIVE_SECS: u64 = 15;
const DEFAULT_SSE_RETRY_SECS: u64 = 3;

#[derive(Parser, Debug)]
#[command(name = "pptx-mcpd", version, about = "PowerPoint MCP daemon.")]
struct CliArgs {
    #[arg(
        long = "stdio",
        env = "PPTX_ENABLE_STDIO",
        default_value_t = false,
        value_parser = BoolishValueParser::new()
    )]
    enable_stdio: bool,

    #[arg(
        long,
        env = "PPTX_MCP_SERVE",
        default_value_t = true,
        value_parser = BoolishValueParser::new()
    )]
    mcp_serve: bool,

    #[arg(long, env = "PPTX_MCP_HTTP_ADDR", default_value = DEFAULT_MCP_HTTP_ADDR)]
    mcp_http_addr: SocketAddr,

    #[arg(
        long,
        env = "PPTX_STATEFUL_SESSIONS",
        default_value_t = true,
        value_parser = BoolishValueParser::new()
    )]
    stateful_sessions: bool,

    #[arg(
        long,
        env = "PPTX_SSE_KEEP_ALIVE_SECS",
        default_value_t = DEFAULT_SSE_KEEP_ALIVE_SECS
    )]
    sse_keep_alive_secs: u64,

    #[arg(
        long,
        env = "PPTX_SSE_RETRY_SECS",
        default_value_t = DEFAULT_SSE_RETRY_SECS
    )]
    sse_retry_secs: u64,
}

/// Runtime configuration loaded from CLI arguments and environment variables.
#[derive(Debug, Clone)]
pub struct PptxConfig {
    pub enable_stdio: bool,
    pub mcp_serve: bool,
    pub mcp_http_addr: SocketAddr,
    pub stateful_sessions: bool,
    pub sse_keep_alive: Option<Duration>,
    pub sse_retry: Option<Duration>,
}

#[derive(Debug)]
pub enum ConfigError {
    NoTransport,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NoTransport => {
                write!(f, "no transport enabled: set --stdio or --mcp-serve")
            }
        }
    }
}

impl Error for ConfigError {}

impl PptxConfig {
    pub fn from_args() -> Result<Self, ConfigError> {
        let args = CliArgs::parse();
        Self::try_from(args)
    }
}

impl TryFrom<CliArgs> for PptxConfig {
    type Error = ConfigError;

    fn try_from(args: CliArgs) -> Result<Self, Self::Error> {
        if !args.enable_stdio && !args.mcp_serve {
            return Err(ConfigError::NoTransport);
        }

        Ok(Self {
            enable_stdio: args.enable_stdio,
            mcp_serve: args.mcp_serve,
            mcp_http_addr: args.mcp_http_addr,
            stateful_sessions: args.stateful_sessions,
            sse_keep_alive: duration_or_off(args.sse_keep_alive_secs),
            sse_retry: duration_or_off(args.sse_retry_secs),
        })
    }
}

// Zero means "send no pings" rather than a zero interval.
fn duration_or_off(secs: u64) -> Option<Duration> {
    (secs != 0).then_some(Duration::from_secs(secs))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base_args() -> CliArgs {
        CliArgs {
            enable_stdio: false,
            mcp_serve: true,
            mcp_http_addr: DEFAULT_MCP_HTTP_ADDR.parse().expect("valid MCP addr"),
            stateful_sessions: true,
            sse_keep_alive_secs: DEFAULT_SSE_KEEP_ALIVE_SECS,
            sse_retry_secs: DEFAULT_SSE_RETRY_SECS,
        }
    }

    #[test]
    fn refuses_when_no_transport_is_enabled() {
        let mut args = base_args();
        args.mcp_serve = false;
        args.enable_stdio = false;

        assert!(matches!(
            PptxConfig::try_from(args),
            Err(ConfigError::NoTransport)
        ));
    }

    #[test]
    fn stdio_alone_is_a_valid_transport() {
        let mut args = base_args();
        args.mcp_serve = false;
        args.enable_stdio = true;

        let config = PptxConfig::try_from(args).expect("config should parse");

        assert!(config.enable_stdio);
        assert!(!config.mcp_serve);
    }

    #[test]
    fn zero_keep_alive_turns_sse_pings_off() {
        let mut args = base_args();
        args.sse_keep_alive_secs = 0;

        let config = PptxConfig::try_from(args).expect("config should parse");

        assert_eq!(config.sse_keep_alive, None);
        assert_eq!(config.sse_retry, Some(Duration::from_secs(3)));
    }
}
