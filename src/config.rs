use std::ffi::OsString;
use std::path::PathBuf;

use clap::{Parser, ValueEnum};

/// IP protocol version the listening socket is created with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum IpProtocol {
    #[value(name = "4")]
    V4,
    #[value(name = "6")]
    V6,
}

#[derive(Debug, Parser)]
#[command(name = "skiff", about = "Minimal static file server for HTTP/1.0 and HTTP/1.1 GET requests")]
struct Args {
    /// IP protocol version: 4 or 6
    #[arg(value_enum)]
    protocol: IpProtocol,

    /// Port to listen on
    port: u16,

    /// Web root directory that requested paths are served from
    root: PathBuf,
}

#[derive(Debug, Clone)]
pub struct Config {
    pub protocol: IpProtocol,
    pub port: u16,
    pub root: PathBuf,
}

impl Config {
    pub fn from_args() -> anyhow::Result<Self> {
        Self::from_iter(std::env::args_os())
    }

    /// Parses and validates an explicit argument list. No requests can be
    /// served at a root that does not exist, so that is a startup failure.
    pub fn from_iter<I, T>(args: I) -> anyhow::Result<Self>
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString> + Clone,
    {
        let args = Args::try_parse_from(args)?;
        anyhow::ensure!(
            args.root.is_dir(),
            "root path {} is not an existing directory",
            args.root.display()
        );

        Ok(Self {
            protocol: args.protocol,
            port: args.port,
            root: args.root,
        })
    }
}
