//! Server configuration: command-line flags with environment fallbacks.

use std::time::Duration;

use clap::{Parser, ValueEnum};

use crate::{domain::UnknownTargetPolicy, usecase::DEFAULT_WELCOME_MESSAGE};

/// Signing secret used when none is configured. Only fit for local development.
pub const DEV_JWT_SECRET: &str = "madoguchi-dev-secret";
pub const DEV_STAFF_PASSWORD: &str = "support-dev-password";

#[derive(Parser, Debug)]
#[command(name = "madoguchi-server")]
#[command(about = "Live support chat server", long_about = None)]
pub struct ServerArgs {
    /// Host address to bind the server to
    #[arg(short = 'H', long, env = "MADOGUCHI_HOST", default_value = "127.0.0.1")]
    pub host: String,

    /// Port number to bind the server to
    #[arg(short = 'p', long, env = "PORT", default_value_t = 10000)]
    pub port: u16,

    /// HS256 secret for signing bearer tokens
    #[arg(long, env = "JWT_SECRET", default_value = DEV_JWT_SECRET, hide_default_value = true)]
    pub jwt_secret: String,

    /// Lifetime of issued tokens, in hours
    #[arg(long, env = "TOKEN_TTL_HOURS", default_value_t = 24)]
    pub token_ttl_hours: u64,

    /// Participant id of the staff account
    #[arg(long, env = "STAFF_ID", default_value = "support")]
    pub staff_id: String,

    /// Display name of the staff account
    #[arg(long, env = "STAFF_NAME", default_value = "Live Support")]
    pub staff_name: String,

    /// Login password of the staff account
    #[arg(long, env = "STAFF_PASSWORD", default_value = DEV_STAFF_PASSWORD, hide_default_value = true)]
    pub staff_password: String,

    /// First event of every client conversation
    #[arg(long, env = "WELCOME_MESSAGE", default_value = DEFAULT_WELCOME_MESSAGE)]
    pub welcome_message: String,

    /// What a staff reply to a participant without history does
    #[arg(long, env = "UNKNOWN_TARGET_POLICY", value_enum, default_value_t = UnknownTargetArg::Create)]
    pub unknown_target: UnknownTargetArg,

    /// Let `?staff=true` connections without a token join as staff
    #[arg(long, env = "ANONYMOUS_STAFF", default_value_t = true, action = clap::ArgAction::Set)]
    pub anonymous_staff: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum UnknownTargetArg {
    Create,
    Drop,
}

impl From<UnknownTargetArg> for UnknownTargetPolicy {
    fn from(arg: UnknownTargetArg) -> Self {
        match arg {
            UnknownTargetArg::Create => UnknownTargetPolicy::Create,
            UnknownTargetArg::Drop => UnknownTargetPolicy::Drop,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub jwt_secret: String,
    pub token_ttl: Duration,
    pub staff_id: String,
    pub staff_name: String,
    pub staff_password: String,
    pub welcome_message: String,
    pub unknown_target: UnknownTargetPolicy,
    pub anonymous_staff: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 10000,
            jwt_secret: DEV_JWT_SECRET.to_string(),
            token_ttl: Duration::from_secs(24 * 60 * 60),
            staff_id: "support".to_string(),
            staff_name: "Live Support".to_string(),
            staff_password: DEV_STAFF_PASSWORD.to_string(),
            welcome_message: DEFAULT_WELCOME_MESSAGE.to_string(),
            unknown_target: UnknownTargetPolicy::default(),
            anonymous_staff: true,
        }
    }
}

impl From<ServerArgs> for ServerConfig {
    fn from(args: ServerArgs) -> Self {
        Self {
            host: args.host,
            port: args.port,
            jwt_secret: args.jwt_secret,
            token_ttl: Duration::from_secs(args.token_ttl_hours * 60 * 60),
            staff_id: args.staff_id,
            staff_name: args.staff_name,
            staff_password: args.staff_password,
            welcome_message: args.welcome_message,
            unknown_target: args.unknown_target.into(),
            anonymous_staff: args.anonymous_staff,
        }
    }
}
