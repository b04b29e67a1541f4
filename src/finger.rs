//! Finger protocol client (RFC 1288).
//!
//! Used twice by the resolver: once against a login host to turn a username
//! into a full name, and (with the text backend) as the directory itself.
//! The whole exchange (connect, send, read to EOF) shares one deadline.

use std::io::{ErrorKind, Read, Write};
use std::net::{SocketAddr, TcpStream, ToSocketAddrs};
use std::time::{Duration, Instant};

use crate::transport::{DirectoryQuery, ProtocolLookup, TransportError};

/// Well-known finger service port.
pub const FINGER_PORT: u16 = 79;

/// Default bound on a single finger exchange.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Blocking finger client with a configurable timeout.
#[derive(Debug, Clone)]
pub struct FingerClient {
    port: u16,
    timeout: Duration,
}

impl Default for FingerClient {
    fn default() -> Self {
        Self::new(FINGER_PORT, DEFAULT_TIMEOUT)
    }
}

impl FingerClient {
    pub fn new(port: u16, timeout: Duration) -> Self {
        Self { port, timeout }
    }

    pub fn port(&self) -> u16 {
        self.port
    }

    /// Upper bound on one exchange; expiry is reported as [`TransportError::Timeout`].
    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Changes the timeout for subsequent lookups.
    pub fn set_timeout(&mut self, timeout: Duration) {
        self.timeout = timeout;
    }

    fn remaining(&self, deadline: Instant) -> Result<Duration, TransportError> {
        deadline
            .checked_duration_since(Instant::now())
            .filter(|left| !left.is_zero())
            .ok_or(TransportError::Timeout(self.timeout))
    }

    fn connect(&self, host: &str, deadline: Instant) -> Result<TcpStream, TransportError> {
        let addrs: Vec<SocketAddr> = (host, self.port)
            .to_socket_addrs()
            .map_err(|source| TransportError::Resolve {
                host: host.to_string(),
                source,
            })?
            .collect();

        let mut last_err = None;
        for addr in addrs {
            match TcpStream::connect_timeout(&addr, self.remaining(deadline)?) {
                Ok(stream) => return Ok(stream),
                Err(e) if e.kind() == ErrorKind::TimedOut => {
                    return Err(TransportError::Timeout(self.timeout))
                }
                Err(e) => last_err = Some(e),
            }
        }

        Err(match last_err {
            Some(source) => TransportError::Connect {
                host: host.to_string(),
                source,
            },
            None => TransportError::Resolve {
                host: host.to_string(),
                source: std::io::Error::new(ErrorKind::NotFound, "no addresses found"),
            },
        })
    }
}

impl ProtocolLookup for FingerClient {
    fn lookup(&self, query: &str, host: &str) -> Result<String, TransportError> {
        let deadline = Instant::now() + self.timeout;
        let mut stream = self.connect(host, deadline)?;

        stream.set_write_timeout(Some(self.remaining(deadline)?))?;
        stream.write_all(format!("{}\r\n", query).as_bytes())?;

        let mut response = Vec::new();
        let mut buf = [0u8; 4096];
        loop {
            stream.set_read_timeout(Some(self.remaining(deadline)?))?;
            match stream.read(&mut buf) {
                Ok(0) => break,
                Ok(n) => response.extend_from_slice(&buf[..n]),
                Err(e) if e.kind() == ErrorKind::Interrupted => continue,
                Err(e) if matches!(e.kind(), ErrorKind::WouldBlock | ErrorKind::TimedOut) => {
                    return Err(TransportError::Timeout(self.timeout))
                }
                Err(e) => return Err(e.into()),
            }
        }

        Ok(String::from_utf8_lossy(&response).into_owned())
    }
}

/// The text-format directory: finger queries against a fixed directory host.
#[derive(Debug, Clone)]
pub struct FingerDirectory {
    client: FingerClient,
    host: String,
}

impl FingerDirectory {
    pub fn new(client: FingerClient, host: impl Into<String>) -> Self {
        Self {
            client,
            host: host.into(),
        }
    }

    pub fn host(&self) -> &str {
        &self.host
    }
}

impl DirectoryQuery for FingerDirectory {
    fn query(&self, query: &str) -> Result<String, TransportError> {
        self.client.lookup(query, &self.host)
    }
}

/// Pulls the full name out of a finger response (`Name: ...` or `name: ...`).
pub fn parse_full_name(response: &str) -> Option<String> {
    let captures = regex::Regex::new(r"(?m)[Nn]ame: (.*)$")
        .ok()
        .and_then(|re| re.captures(response))?;
    let name = captures.get(1)?.as_str().trim();
    if name.is_empty() {
        None
    } else {
        Some(name.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_full_name() {
        let response = "Student data loaded as of Oct 1\r\nName: Srinivas Devadas\r\nEmail: devadas@MIT.EDU\r\n";
        assert_eq!(parse_full_name(response), Some("Srinivas Devadas".to_string()));
    }

    #[test]
    fn test_parse_full_name_missing() {
        assert_eq!(parse_full_name(""), None);
        assert_eq!(parse_full_name("finger: no_user: no such user.\r\n"), None);
        assert_eq!(parse_full_name("Name:   \r\n"), None);
    }

    #[test]
    fn test_timeout_is_adjustable() {
        let mut client = FingerClient::default();
        assert_eq!(client.timeout(), DEFAULT_TIMEOUT);
        assert_eq!(client.port(), FINGER_PORT);
        client.set_timeout(Duration::from_millis(250));
        assert_eq!(client.timeout(), Duration::from_millis(250));
    }
}
