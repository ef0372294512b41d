use std::fmt;

/// One egress proxy from the proxy list, stored as a full proxy URL.
///
/// Bare `host:port` lines are taken as plain HTTP proxies. Lines that already
/// carry a scheme (`http://`, `https://`, `socks5://`, `socks5h://`), with or
/// without `user:pass@`, are kept verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ProxyEntry {
    url: String,
}

impl ProxyEntry {
    /// Build an entry from a proxy-file line. Returns `None` for blank lines.
    pub fn parse(line: &str) -> Option<Self> {
        let line = line.trim();
        if line.is_empty() {
            return None;
        }
        let url = if line.contains("://") {
            line.to_string()
        } else {
            format!("http://{line}")
        };
        Some(Self { url })
    }

    /// Full proxy URL including credentials, for the HTTP client.
    pub fn url(&self) -> &str {
        &self.url
    }
}

/// Displays the proxy without credentials so it is safe to log.
impl fmt::Display for ProxyEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.url.split_once("://") {
            Some((scheme, rest)) => {
                let host = rest.rsplit_once('@').map_or(rest, |(_, host)| host);
                write!(f, "{scheme}://{host}")
            }
            None => f.write_str(&self.url),
        }
    }
}
