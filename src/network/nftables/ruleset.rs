//! nftables rule set rendering.
//!
//! The rendered text is fed verbatim to `nft -f -`, so every tab and
//! newline here is part of the contract.

use crate::network::types::LimitSpec;
use std::fmt;
use std::fmt::Formatter;
use std::net::Ipv4Addr;

/// Name of the nftables table owned by this tool.
///
/// Shared by `add` and `purge`; nothing else should create a table
/// under this name.
pub const TABLE_NAME: &str = "akavel_iplimits";

/// Address family of [`TABLE_NAME`].
pub const TABLE_FAMILY: &str = "ip";

/// Netfilter hook a chain is attached to.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Hook {
    Input,
    Output,
}

impl fmt::Display for Hook {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Hook::Input => f.write_str("input"),
            Hook::Output => f.write_str("output"),
        }
    }
}

/// Which header field a rule matches the address against.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Direction {
    /// `ip saddr`, traffic coming from the address
    Source,
    /// `ip daddr`, traffic going to the address
    Destination,
}

impl Direction {
    fn selector(&self) -> &'static str {
        match self {
            Direction::Source => "saddr",
            Direction::Destination => "daddr",
        }
    }
}

/// A rule dropping traffic for one address once it exceeds a rate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LimitRule {
    pub direction: Direction,
    pub address: Ipv4Addr,
    pub rate: String,
}

impl fmt::Display for LimitRule {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "ip {} {} limit rate over {} drop",
            self.direction.selector(),
            self.address,
            self.rate
        )
    }
}

/// A base filter chain with an accept policy and a single rule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Chain {
    pub name: String,
    pub hook: Hook,
    pub rule: LimitRule,
}

impl fmt::Display for Chain {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        writeln!(f, "\t\tchain {} {{", self.name)?;
        writeln!(
            f,
            "\t\t\ttype filter hook {} priority filter; policy accept;",
            self.hook
        )?;
        writeln!(f, "\t\t\t{}", self.rule)?;
        writeln!(f, "\t\t}}")
    }
}

/// A table declaration as loaded by `nft -f`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Table {
    pub family: String,
    pub name: String,
    pub chains: Vec<Chain>,
}

impl Table {
    /// Builds the two-chain table enforcing `spec` in both directions.
    ///
    /// `OUT` matches packets sent to the address, `IN` packets received
    /// from it. Both share the same rate.
    pub fn limits(spec: &LimitSpec, name: &str) -> Self {
        let rate = spec.rate_expression();
        let chain = |name: &str, hook, direction| Chain {
            name: name.to_string(),
            hook,
            rule: LimitRule {
                direction,
                address: spec.address,
                rate: rate.clone(),
            },
        };

        Self {
            family: TABLE_FAMILY.to_string(),
            name: name.to_string(),
            chains: vec![
                chain("OUT", Hook::Output, Direction::Destination),
                chain("IN", Hook::Input, Direction::Source),
            ],
        }
    }
}

impl fmt::Display for Table {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        writeln!(f)?;
        writeln!(f, "\ttable {} {} {{", self.family, self.name)?;
        for (i, chain) in self.chains.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            write!(f, "{}", chain)?;
        }
        writeln!(f, "\t}}")
    }
}

/// Renders the rule set limiting `spec` inside table `table_name`.
pub fn render(spec: &LimitSpec, table_name: &str) -> String {
    Table::limits(spec, table_name).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::network::types::RateUnit;

    const GOLDEN: &str = "
\ttable ip akavel_iplimits {
\t\tchain OUT {
\t\t\ttype filter hook output priority filter; policy accept;
\t\t\tip daddr 1.2.3.4 limit rate over 2 mbytes/second drop
\t\t}

\t\tchain IN {
\t\t\ttype filter hook input priority filter; policy accept;
\t\t\tip saddr 1.2.3.4 limit rate over 2 mbytes/second drop
\t\t}
\t}
";

    #[test]
    fn test_render_golden() {
        let spec = LimitSpec::new(Ipv4Addr::new(1, 2, 3, 4), 2, RateUnit::Mbps);
        assert_eq!(render(&spec, TABLE_NAME), GOLDEN);
    }

    #[test]
    fn test_render_uses_table_name() {
        let spec = LimitSpec::new(Ipv4Addr::new(1, 2, 3, 4), 2, RateUnit::Mbps);
        let text = render(&spec, "other");
        assert!(text.starts_with("\n\ttable ip other {\n"));
    }

    #[test]
    fn test_pps_has_no_space_before_suffix() {
        let spec = LimitSpec::new(Ipv4Addr::new(10, 0, 0, 7), 300, RateUnit::Pps);
        let text = render(&spec, TABLE_NAME);
        assert!(text.contains("ip daddr 10.0.0.7 limit rate over 300/second drop\n"));
        assert!(text.contains("ip saddr 10.0.0.7 limit rate over 300/second drop\n"));
    }

    #[test]
    fn test_both_chains_carry_address_and_rate() {
        for unit in RateUnit::ALL {
            let spec = LimitSpec::new(Ipv4Addr::new(192, 168, 1, 254), u32::MAX, unit);
            let table = Table::limits(&spec, TABLE_NAME);
            assert_eq!(table.chains.len(), 2);

            let text = table.to_string();
            let (out_chain, in_chain) = text.split_once("chain IN").unwrap();
            for body in [out_chain, in_chain] {
                assert!(body.contains("192.168.1.254"));
                assert!(body.contains(&format!("over 4294967295{} drop", unit.suffix())));
            }
        }
    }

    #[test]
    fn test_chain_hooks_and_directions() {
        let spec = LimitSpec::new(Ipv4Addr::new(1, 1, 1, 1), 1, RateUnit::Bps);
        let table = Table::limits(&spec, TABLE_NAME);

        assert_eq!(table.chains[0].name, "OUT");
        assert_eq!(table.chains[0].hook, Hook::Output);
        assert_eq!(table.chains[0].rule.direction, Direction::Destination);
        assert_eq!(table.chains[1].name, "IN");
        assert_eq!(table.chains[1].hook, Hook::Input);
        assert_eq!(table.chains[1].rule.direction, Direction::Source);
    }
}
