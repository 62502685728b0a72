//! CIDR helpers used by the network rules.
//!
//! Both functions are total: malformed input is treated as "not public" and
//! as covering zero addresses, so a typo never turns into a finding.

use std::net::IpAddr;

/// Blocks that are never reachable from the public internet.
const RESERVED_V4: &[(&str, u8)] = &[
    ("0.0.0.0", 8),
    ("10.0.0.0", 8),
    ("100.64.0.0", 10),
    ("127.0.0.0", 8),
    ("169.254.0.0", 16),
    ("172.16.0.0", 12),
    ("192.0.0.0", 24),
    ("192.0.2.0", 24),
    ("192.168.0.0", 16),
    ("198.18.0.0", 15),
    ("198.51.100.0", 24),
    ("203.0.113.0", 24),
    ("224.0.0.0", 4),
    ("240.0.0.0", 4),
];

const RESERVED_V6: &[(&str, u8)] = &[
    ("::", 128),
    ("::1", 128),
    ("fc00::", 7),
    ("fe80::", 10),
    ("ff00::", 8),
    ("2001:db8::", 32),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Network {
    bits: u128,
    prefix: u8,
    width: u8,
}

impl Network {
    fn parse(input: &str) -> Option<Self> {
        let input = input.trim();
        let (addr, prefix) = match input.split_once('/') {
            Some((addr, prefix)) => (addr, Some(prefix.parse::<u8>().ok()?)),
            None => (input, None),
        };
        let (bits, width) = match addr.parse::<IpAddr>().ok()? {
            IpAddr::V4(v4) => (u128::from(u32::from(v4)), 32),
            IpAddr::V6(v6) => (u128::from(v6), 128),
        };
        let prefix = prefix.unwrap_or(width);
        if prefix > width {
            return None;
        }
        Some(Self {
            bits: bits & mask(prefix, width),
            prefix,
            width,
        })
    }

    fn within(&self, other: &Network) -> bool {
        self.width == other.width
            && self.prefix >= other.prefix
            && self.bits & mask(other.prefix, other.width) == other.bits
    }

    fn host_bits(&self) -> u8 {
        self.width - self.prefix
    }
}

fn mask(prefix: u8, width: u8) -> u128 {
    let low_bits = |n: u8| {
        if n >= 128 {
            u128::MAX
        } else {
            (1u128 << n) - 1
        }
    };
    low_bits(width) & !low_bits(width - prefix)
}

/// Whether any address in `cidr` is publicly routable. Accepts a bare
/// address as a single-host range.
pub fn is_public(cidr: &str) -> bool {
    let Some(network) = Network::parse(cidr) else {
        return false;
    };
    let reserved = if network.width == 32 {
        RESERVED_V4
    } else {
        RESERVED_V6
    };
    !reserved.iter().any(|(addr, prefix)| {
        Network::parse(&format!("{addr}/{prefix}")).is_some_and(|block| network.within(&block))
    })
}

/// Number of addresses covered by `cidr`, saturating at `u64::MAX`.
/// Malformed input covers zero addresses.
pub fn count_addresses(cidr: &str) -> u64 {
    match Network::parse(cidr) {
        Some(network) if network.host_bits() >= 64 => u64::MAX,
        Some(network) => 1u64 << network.host_bits(),
        None => 0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn open_ranges_are_public() {
        assert!(is_public("0.0.0.0/0"));
        assert!(is_public("::/0"));
        assert!(is_public("8.8.8.8"));
        assert!(is_public("52.0.0.0/8"));
    }

    #[test]
    fn private_ranges_are_not_public() {
        assert!(!is_public("10.0.0.0/16"));
        assert!(!is_public("192.168.1.0/24"));
        assert!(!is_public("172.16.4.4/32"));
        assert!(!is_public("127.0.0.1"));
        assert!(!is_public("fd00::/8"));
        assert!(!is_public("::1/128"));
    }

    #[test]
    fn range_spanning_private_block_is_public() {
        // 10.0.0.0/7 also covers 11.0.0.0/8.
        assert!(is_public("10.0.0.0/7"));
    }

    #[test]
    fn malformed_input_is_harmless() {
        for input in ["", "nope", "10.0.0.0/33", "1.2.3/8", "::/129", "0.0.0.0/x"] {
            assert!(!is_public(input), "{input}");
            assert_eq!(count_addresses(input), 0, "{input}");
        }
    }

    #[test]
    fn address_counts() {
        assert_eq!(count_addresses("1.2.3.4"), 1);
        assert_eq!(count_addresses("1.2.3.4/32"), 1);
        assert_eq!(count_addresses("10.0.0.0/24"), 256);
        assert_eq!(count_addresses("0.0.0.0/0"), 1 << 32);
        assert_eq!(count_addresses("2001:db8::/120"), 256);
        assert_eq!(count_addresses("::/0"), u64::MAX);
        assert_eq!(count_addresses("::/64"), u64::MAX);
    }

    proptest! {
        #[test]
        fn count_is_power_of_two(a in any::<u32>(), prefix in 0u8..=32) {
            let cidr = format!("{}/{}", std::net::Ipv4Addr::from(a), prefix);
            prop_assert_eq!(count_addresses(&cidr), 1u64 << (32 - prefix));
        }

        #[test]
        fn host_bits_do_not_change_classification(a in any::<u32>(), prefix in 0u8..=32) {
            let host = std::net::Ipv4Addr::from(a);
            let network = std::net::Ipv4Addr::from(a & (u32::MAX.checked_shl(32 - u32::from(prefix)).unwrap_or(0)));
            prop_assert_eq!(
                is_public(&format!("{host}/{prefix}")),
                is_public(&format!("{network}/{prefix}"))
            );
        }

        #[test]
        fn arbitrary_strings_never_panic(s in "\\PC*") {
            let _ = is_public(&s);
            let _ = count_addresses(&s);
        }
    }
}
