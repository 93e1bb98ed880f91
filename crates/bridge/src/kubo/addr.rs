use std::str::FromStr;

use multiaddr::{Multiaddr, Protocol};
use url::Url;

/// Loopback address of a stock Kubo API listener.
pub const DEFAULT_API_ADDR: &str = "/ip4/127.0.0.1/tcp/5001";

#[derive(Debug, thiserror::Error)]
pub enum AddrError {
    #[error("Invalid API multiaddress '{addr}': {reason}")]
    Parse { addr: String, reason: String },
    #[error("Invalid API multiaddress '{0}': expected /ip4|/ip6|/dns*/<host>/tcp/<port>[/http|/https]")]
    Unsupported(String),
    #[error("Invalid API multiaddress '{addr}': {source}")]
    Url {
        addr: String,
        #[source]
        source: url::ParseError,
    },
}

/// A validated daemon API address, kept in both its multiaddr form
/// (forwarded to the daemon's own tool) and as an HTTP base URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiAddr {
    multiaddr: Multiaddr,
    base_url: Url,
}

impl ApiAddr {
    pub fn parse(addr: &str) -> Result<Self, AddrError> {
        let multiaddr = Multiaddr::from_str(addr).map_err(|e| AddrError::Parse {
            addr: addr.to_string(),
            reason: e.to_string(),
        })?;
        let base_url = to_base_url(addr, &multiaddr)?;
        Ok(Self {
            multiaddr,
            base_url,
        })
    }

    pub fn multiaddr(&self) -> &Multiaddr {
        &self.multiaddr
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }
}

fn to_base_url(raw: &str, addr: &Multiaddr) -> Result<Url, AddrError> {
    let mut host: Option<String> = None;
    let mut port: Option<u16> = None;
    let mut scheme = "http";

    for protocol in addr.iter() {
        match protocol {
            Protocol::Ip4(ip) if host.is_none() => host = Some(ip.to_string()),
            Protocol::Ip6(ip) if host.is_none() => host = Some(format!("[{}]", ip)),
            Protocol::Dns(name) | Protocol::Dns4(name) | Protocol::Dns6(name)
                if host.is_none() =>
            {
                host = Some(name.to_string())
            }
            Protocol::Tcp(p) if host.is_some() && port.is_none() => port = Some(p),
            Protocol::Http if port.is_some() => scheme = "http",
            Protocol::Https if port.is_some() => scheme = "https",
            _ => return Err(AddrError::Unsupported(raw.to_string())),
        }
    }

    match (host, port) {
        (Some(host), Some(port)) => Url::parse(&format!("{}://{}:{}", scheme, host, port))
            .map_err(|source| AddrError::Url {
                addr: raw.to_string(),
                source,
            }),
        _ => Err(AddrError::Unsupported(raw.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_address() {
        let addr = ApiAddr::parse(DEFAULT_API_ADDR).unwrap();
        assert_eq!(addr.base_url().as_str(), "http://127.0.0.1:5001/");
        assert_eq!(addr.multiaddr().to_string(), DEFAULT_API_ADDR);
    }

    #[test]
    fn test_ip6_dns_and_https() {
        let addr = ApiAddr::parse("/ip6/::1/tcp/5001").unwrap();
        assert_eq!(addr.base_url().as_str(), "http://[::1]:5001/");

        let addr = ApiAddr::parse("/dns4/ipfs.local/tcp/443/https").unwrap();
        assert_eq!(addr.base_url().as_str(), "https://ipfs.local/");

        let addr = ApiAddr::parse("/dns/node.example.com/tcp/8080/http").unwrap();
        assert_eq!(addr.base_url().as_str(), "http://node.example.com:8080/");
    }

    #[test]
    fn test_malformed_address() {
        assert!(matches!(
            ApiAddr::parse("127.0.0.1:5001"),
            Err(AddrError::Parse { .. })
        ));
        assert!(matches!(
            ApiAddr::parse("/ip4/127.0.0.1"),
            Err(AddrError::Unsupported(_))
        ));
        assert!(matches!(
            ApiAddr::parse("/ip4/127.0.0.1/udp/5001"),
            Err(AddrError::Unsupported(_))
        ));
    }
}
