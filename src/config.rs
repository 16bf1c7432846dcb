use clap::Parser;
use std::net::SocketAddr;

/// Process configuration, read from flags with environment fallbacks
/// (a `.env` file is loaded before parsing).
#[derive(Parser, Debug, Clone)]
#[command(name = "fdge-financas", version, about = "Personal finance tracker API")]
pub struct Config {
    /// SQLite database the tracker stores everything in.
    #[arg(
        long,
        env = "DATABASE_URL",
        default_value = "sqlite://financas.db?mode=rwc"
    )]
    pub database_url: String,

    /// Address the HTTP server binds.
    #[arg(long = "bind", env = "BIND_ADDR", default_value = "127.0.0.1:3000")]
    pub bind_addr: SocketAddr,

    /// Days a login session stays valid.
    #[arg(long, env = "SESSION_TTL_DAYS", default_value_t = 30)]
    pub session_ttl_days: i64,
}
