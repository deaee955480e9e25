//! Network-flavoured values: addresses, user agents, host names, URI paths.

use super::pick;
use fake::faker::internet::en::{DomainSuffix, IPv4, MACAddress, UserAgent};
use fake::faker::lorem::en::{Word, Words};
use fake::Fake;
use rand::Rng;

/// Random public-looking IPv4 address.
pub fn ipv4<R: Rng + ?Sized>(rng: &mut R) -> String {
    IPv4().fake_with_rng(rng)
}

/// Random MAC address (`aa:bb:cc:dd:ee:ff`).
pub fn mac_address<R: Rng + ?Sized>(rng: &mut R) -> String {
    MACAddress().fake_with_rng(rng)
}

/// Random browser user agent.
pub fn user_agent<R: Rng + ?Sized>(rng: &mut R) -> String {
    UserAgent().fake_with_rng(rng)
}

/// Host name such as `delta-17.example.org`.
pub fn hostname<R: Rng + ?Sized>(rng: &mut R) -> String {
    let word: String = Word().fake_with_rng(rng);
    let suffix: String = DomainSuffix().fake_with_rng(rng);
    format!("{}-{}.{}", word.to_lowercase(), rng.gen_range(1..100), suffix)
}

/// Relative URI path of one to three segments, e.g. `alpha/beta`.
pub fn uri_path<R: Rng + ?Sized>(rng: &mut R) -> String {
    let words: Vec<String> = Words(1..4).fake_with_rng(rng);
    words.join("/").to_lowercase()
}

/// Host address inside one of `networks` (CIDR notation).
///
/// Private /16 and /24 ranges keep their fixed octets; wider ranges get a
/// random third octet. The last octet is always in `1..=254`.
pub fn host_in<R: Rng + ?Sized>(rng: &mut R, networks: &[&str]) -> String {
    let network = pick(rng, networks);
    let base = network.split('/').next().unwrap_or(network);
    let octets: Vec<&str> = base.split('.').collect();
    let host = rng.gen_range(1..=254);

    if network.starts_with("192.168") {
        format!("{}.{}.{}.{}", octets[0], octets[1], octets[2], host)
    } else {
        format!(
            "{}.{}.{}.{}",
            octets[0],
            octets[1],
            rng.gen_range(0..=255),
            host
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::net::Ipv4Addr;

    #[test]
    fn test_ipv4_parses() {
        let mut rng = StdRng::seed_from_u64(42);
        for _ in 0..50 {
            let ip = ipv4(&mut rng);
            assert!(ip.parse::<Ipv4Addr>().is_ok(), "{ip}");
        }
    }

    #[test]
    fn test_host_in_keeps_network_prefix() {
        let mut rng = StdRng::seed_from_u64(42);
        for _ in 0..100 {
            let ip = host_in(&mut rng, &["192.168.100.0/24"]);
            assert!(ip.starts_with("192.168.100."), "{ip}");
            assert!(ip.parse::<Ipv4Addr>().is_ok());

            let ip = host_in(&mut rng, &["10.0.0.0/16"]);
            assert!(ip.starts_with("10.0."), "{ip}");
            assert!(ip.parse::<Ipv4Addr>().is_ok());
        }
    }

    #[test]
    fn test_hostname_shape() {
        let mut rng = StdRng::seed_from_u64(42);
        let host = hostname(&mut rng);
        assert!(host.contains('-'));
        assert!(host.contains('.'));
    }

    #[test]
    fn test_mac_address_shape() {
        let mut rng = StdRng::seed_from_u64(42);
        let mac = mac_address(&mut rng);
        assert_eq!(mac.split(':').count(), 6, "{mac}");
    }
}
