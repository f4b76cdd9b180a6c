use crate::RecordType;
use std::fmt;
use std::net::{IpAddr, Ipv4Addr, Ipv6Addr};
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AddressFamily {
    Inet,
    Inet6,
}

impl AddressFamily {
    pub fn of(addr: &IpAddr) -> Self {
        match addr {
            IpAddr::V4(_) => AddressFamily::Inet,
            IpAddr::V6(_) => AddressFamily::Inet6,
        }
    }

    /// Size of one address of this family on the wire.
    pub fn addr_len(&self) -> usize {
        match self {
            AddressFamily::Inet => 4,
            AddressFamily::Inet6 => 16,
        }
    }

    /// Record type that carries addresses of this family.
    pub fn record_type(&self) -> RecordType {
        match self {
            AddressFamily::Inet => RecordType::A,
            AddressFamily::Inet6 => RecordType::AAAA,
        }
    }

    pub fn unspecified(&self) -> IpAddr {
        match self {
            AddressFamily::Inet => IpAddr::V4(Ipv4Addr::UNSPECIFIED),
            AddressFamily::Inet6 => IpAddr::V6(Ipv6Addr::UNSPECIFIED),
        }
    }

    /// Decodes one address from `octets`, which must be exactly `addr_len()` long.
    pub fn addr_from_octets(&self, octets: &[u8]) -> Option<IpAddr> {
        match self {
            AddressFamily::Inet => {
                let raw: [u8; 4] = octets.try_into().ok()?;
                Some(IpAddr::V4(Ipv4Addr::from(raw)))
            }
            AddressFamily::Inet6 => {
                let raw: [u8; 16] = octets.try_into().ok()?;
                Some(IpAddr::V6(Ipv6Addr::from(raw)))
            }
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            AddressFamily::Inet => "IPv4",
            AddressFamily::Inet6 => "IPv6",
        }
    }
}

impl fmt::Display for AddressFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for AddressFamily {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "4" | "ipv4" | "IPv4" | "inet" => Ok(AddressFamily::Inet),
            "6" | "ipv6" | "IPv6" | "inet6" => Ok(AddressFamily::Inet6),
            _ => Err(format!("Unknown address family: {}", s)),
        }
    }
}
