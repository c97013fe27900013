use std::io;
use std::os::fd::{AsRawFd, RawFd};

use anyhow::Context;
use tokio::io::{AsyncWriteExt, Interest};
use tokio::net::TcpStream;

use crate::http::response::Response;

/// Upper bound on the bytes handed to a single sendfile call. The kernel
/// caps one transfer at this count.
const SENDFILE_MAX: u64 = 0x7fff_f000;

/// Sends the response header, retrying partial writes until every byte is
/// out or the transport fails.
pub async fn send_header(stream: &mut TcpStream, res: &Response) -> anyhow::Result<()> {
    let header = res.header();
    let mut written = 0;

    while written < header.len() {
        let n = stream.write(&header[written..]).await?;

        if n == 0 {
            return Err(anyhow::anyhow!("connection closed while sending header"));
        }

        written += n;
    }

    Ok(())
}

/// Streams the response body to the socket with sendfile, moving file data
/// to the socket entirely inside the kernel. Repeats until the size the
/// header advertised has been sent or the transport fails. Responses
/// without a body are a no-op.
pub async fn send_body(stream: &TcpStream, res: &Response) -> anyhow::Result<()> {
    let Response::Ok { file, size, .. } = res else {
        return Ok(());
    };

    let sock_fd = stream.as_raw_fd();
    let file_fd = file.as_raw_fd();

    let mut sent: u64 = 0;
    while sent < *size {
        stream.writable().await?;

        let count = (*size - sent).min(SENDFILE_MAX) as usize;
        match stream.try_io(Interest::WRITABLE, || sendfile(sock_fd, file_fd, count)) {
            Ok(0) => anyhow::bail!("connection closed while sending body"),
            Ok(n) => sent += n as u64,
            Err(e) if e.kind() == io::ErrorKind::WouldBlock => continue,
            Err(e) => return Err(e).context("sendfile"),
        }
    }

    Ok(())
}

/// Safe wrapper for `libc::sendfile64`. The offset is left null so the
/// kernel advances the file's own offset across calls.
fn sendfile(sock_fd: RawFd, file_fd: RawFd, count: usize) -> io::Result<usize> {
    let n = unsafe { libc::sendfile64(sock_fd, file_fd, std::ptr::null_mut(), count) };
    if n < 0 {
        Err(io::Error::last_os_error())
    } else {
        Ok(n as usize)
    }
}
