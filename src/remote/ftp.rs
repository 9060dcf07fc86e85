//! FTP implementation of [`RemoteSource`] backed by `suppaftp`.

use std::net::{SocketAddr, TcpStream, ToSocketAddrs};
use std::time::Duration;

use suppaftp::types::FileType;
use suppaftp::FtpStream;

use super::{ConnectionRequest, RemoteError, RemoteSource};

pub const DEFAULT_FTP_PORT: u16 = 21;
/// Bound on connecting and on every read or write of the control connection
pub const SOCKET_TIMEOUT: Duration = Duration::from_secs(30);

/// Split `host[:port]` into its parts, defaulting to port 21.
///
/// Bare IPv6 addresses (more than one colon) are taken as-is.
pub fn split_host_port(host: &str) -> (String, u16) {
    let host = host.trim();
    if host.matches(':').count() == 1 {
        if let Some((name, port)) = host.rsplit_once(':') {
            if let Ok(port) = port.parse::<u16>() {
                return (name.to_string(), port);
            }
        }
    }
    (host.to_string(), DEFAULT_FTP_PORT)
}

/// Reduce an NLST entry to its final path component
pub fn base_name(entry: &str) -> &str {
    let entry = entry.trim();
    entry.rsplit(['/', '\\']).next().unwrap_or(entry)
}

pub struct FtpSource {
    stream: Option<FtpStream>,
    timeout: Duration,
}

impl Default for FtpSource {
    fn default() -> Self {
        Self::with_timeout(SOCKET_TIMEOUT)
    }
}

impl FtpSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_timeout(timeout: Duration) -> Self {
        Self {
            stream: None,
            timeout,
        }
    }

    /// Open the control socket with read and write timeouts set
    fn open_socket(&self, host: &str, addr: SocketAddr) -> Result<TcpStream, RemoteError> {
        let to_error = |e: std::io::Error| RemoteError::Connect {
            host: host.to_string(),
            message: e.to_string(),
        };
        let socket = TcpStream::connect_timeout(&addr, self.timeout).map_err(to_error)?;
        socket.set_read_timeout(Some(self.timeout)).map_err(to_error)?;
        socket.set_write_timeout(Some(self.timeout)).map_err(to_error)?;
        Ok(socket)
    }

    fn resolve(host: &str, port: u16) -> Result<SocketAddr, RemoteError> {
        (host, port)
            .to_socket_addrs()
            .map_err(|e| RemoteError::Connect {
                host: host.to_string(),
                message: e.to_string(),
            })?
            .next()
            .ok_or_else(|| RemoteError::Connect {
                host: host.to_string(),
                message: "no address found".to_string(),
            })
    }

    fn stream(&mut self) -> Result<&mut FtpStream, RemoteError> {
        self.stream.as_mut().ok_or(RemoteError::NotConnected)
    }
}

impl RemoteSource for FtpSource {
    fn connect(&mut self, request: &ConnectionRequest) -> Result<(), RemoteError> {
        // Drop any previous session first
        self.disconnect();

        let (host, port) = split_host_port(&request.host);
        let addr = Self::resolve(&host, port)?;
        tracing::info!("Connecting to FTP server {}:{}", host, port);

        let socket = self.open_socket(&host, addr)?;
        // TODO: passive data connections are opened by suppaftp without a read
        // timeout; a transfer that stalls mid-file still blocks until the
        // server closes it
        let mut stream = FtpStream::connect_with_stream(socket).map_err(|e| RemoteError::Connect {
            host: host.clone(),
            message: e.to_string(),
        })?;

        stream
            .login(request.username.as_str(), request.password.as_str())
            .map_err(|e| RemoteError::Login(e.to_string()))?;

        if !request.directory.trim().is_empty() {
            stream
                .cwd(request.directory.trim())
                .map_err(|e| RemoteError::ChangeDir {
                    directory: request.directory.clone(),
                    message: e.to_string(),
                })?;
        }

        stream
            .transfer_type(FileType::Binary)
            .map_err(|e| RemoteError::Connect {
                host: host.clone(),
                message: e.to_string(),
            })?;

        tracing::debug!("FTP session ready in {}", request.directory);
        self.stream = Some(stream);
        Ok(())
    }

    fn list_files(&mut self) -> Result<Vec<String>, RemoteError> {
        let entries = self
            .stream()?
            .nlst(None)
            .map_err(|e| RemoteError::List(e.to_string()))?;
        Ok(entries
            .iter()
            .map(|entry| base_name(entry).to_string())
            .filter(|name| !name.is_empty())
            .collect())
    }

    fn fetch(&mut self, name: &str) -> Result<String, RemoteError> {
        let cursor = self
            .stream()?
            .retr_as_buffer(name)
            .map_err(|e| RemoteError::Fetch {
                name: name.to_string(),
                message: e.to_string(),
            })?;
        String::from_utf8(cursor.into_inner()).map_err(|_| RemoteError::Decode {
            name: name.to_string(),
        })
    }

    fn disconnect(&mut self) {
        if let Some(mut stream) = self.stream.take() {
            if let Err(e) = stream.quit() {
                tracing::debug!("FTP quit failed: {}", e);
            }
        }
    }
}

impl Drop for FtpSource {
    fn drop(&mut self) {
        self.disconnect();
    }
}
