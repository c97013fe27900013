use std::net::SocketAddr;
use std::path::PathBuf;

use tokio::net::{TcpListener, TcpSocket};
use tracing::{error, info};

use crate::config::{Config, IpProtocol};
use crate::http::connection::Connection;

const LISTEN_BACKLOG: u32 = 20;

pub async fn run(cfg: &Config) -> anyhow::Result<()> {
    let listener = bind(cfg)?;
    info!("Listening on {}", listener.local_addr()?);

    serve(listener, cfg.root.clone()).await
}

/// Binds the wildcard address of the configured protocol family and starts
/// listening. The address is marked reusable so a restart does not have to
/// wait out TIME_WAIT.
pub fn bind(cfg: &Config) -> anyhow::Result<TcpListener> {
    let (socket, addr) = match cfg.protocol {
        IpProtocol::V4 => (
            TcpSocket::new_v4()?,
            SocketAddr::from(([0, 0, 0, 0], cfg.port)),
        ),
        IpProtocol::V6 => (
            TcpSocket::new_v6()?,
            SocketAddr::from(([0u16; 8], cfg.port)),
        ),
    };

    socket.set_reuseaddr(true)?;
    socket.bind(addr)?;

    Ok(socket.listen(LISTEN_BACKLOG)?)
}

/// Accepts connections until the task is dropped, spawning one detached
/// handler per client. Handlers are never joined; each one owns its socket
/// and request state, sharing only the read-only web root. A failed accept
/// or a failed connection never stops the loop.
pub async fn serve(listener: TcpListener, root: PathBuf) -> anyhow::Result<()> {
    loop {
        let (socket, peer) = match listener.accept().await {
            Ok(accepted) => accepted,
            Err(e) => {
                error!("accept: {}", e);
                continue;
            }
        };
        info!("Accepted connection from {}", peer);

        let root = root.clone();
        tokio::spawn(async move {
            let mut conn = Connection::new(socket, root);
            if let Err(e) = conn.run().await {
                error!("Connection error from {}: {}", peer, e);
            }
        });
    }
}
