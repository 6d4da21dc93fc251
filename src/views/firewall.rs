//! views::firewall
//!
//! Firewall chains and their rules (`<root>.Firewall.Chain.{i}.Rule.{i}`).
//!
//! # Output
//!
//! 1. An overview box with the global firewall settings.
//! 2. One card per chain. Compact layout lists one line per rule with only
//!    the matchers that are set; wide layout renders a rule table.
//! 3. A chain summary table.

use super::common::{non_empty_or, section_banner, status_dot, UNKNOWN};
use super::{join_lines, RenderContext, View};
use crate::core::store::Store;
use crate::layout::boxes::{BoxStyle, Card};
use crate::layout::table::{Column, Table};
use crate::layout::LayoutMode;

/// Firewall chains and rules.
#[derive(Debug, Clone, Copy, Default)]
pub struct FirewallView;

/// IP protocol numbers with a display label.
const PROTOCOLS: &[(&str, &str)] = &[
    ("6", "TCP"),
    ("17", "UDP"),
    ("1", "ICMP"),
    ("58", "ICMPv6"),
    ("-1", "any"),
];

/// Wildcard shown for an unset matcher.
const ANY: &str = "*";

/// Label for a protocol number; unknown numbers show as `proto:<n>`.
pub fn protocol_label(raw: &str) -> String {
    PROTOCOLS
        .iter()
        .find(|(number, _)| *number == raw)
        .map(|(_, label)| label.to_string())
        .unwrap_or_else(|| format!("proto:{}", raw))
}

/// Target with a marker glyph in front.
///
/// Matching is case-insensitive; the spelling from the dump is kept.
pub fn format_target(target: &str) -> String {
    let marker = match target.to_ascii_lowercase().as_str() {
        "accept" => "✅",
        "drop" => "🚫",
        "reject" => "❌",
        _ => "➡",
    };
    format!("{} {}", marker, target)
}

#[derive(Debug, Clone)]
struct Chain {
    id: u32,
    name: String,
    alias: String,
    enabled: bool,
    rule_count: usize,
}

#[derive(Debug, Clone)]
struct Rule {
    order: i64,
    alias: String,
    target: String,
    protocol: String,
    dest_port: String,
    src_port: String,
    src_ip: String,
    dest_ip: String,
    conn_state: String,
}

impl Rule {
    /// Matchers that are set, as `key:value` words.
    fn matchers(&self) -> Vec<String> {
        let mut parts = Vec::new();
        if self.dest_port != ANY {
            parts.push(format!("dst:{}", self.dest_port));
        }
        if self.src_port != ANY {
            parts.push(format!("src:{}", self.src_port));
        }
        if self.src_ip != ANY {
            parts.push(format!("from:{}", self.src_ip));
        }
        if self.dest_ip != ANY {
            parts.push(format!("to:{}", self.dest_ip));
        }
        if !self.conn_state.is_empty() {
            parts.push(format!("state:{}", self.conn_state));
        }
        parts
    }
}

/// A port matcher, `*` when unset (`-1` or missing).
fn port(store: &Store, object: &str, attribute: &str) -> Option<String> {
    match store.get_attr(object, attribute) {
        None | Some("-1") | Some("") => None,
        Some(value) => Some(value.to_string()),
    }
}

fn discover_chains(store: &Store) -> Vec<Chain> {
    let collection = store.object("Firewall.Chain");
    store
        .instances(&collection, "Name")
        .into_iter()
        .map(|id| {
            let object = format!("{}.{}", collection, id);
            Chain {
                id,
                name: store.get_attr(&object, "Name").unwrap_or_default().to_string(),
                alias: store.get_attr(&object, "Alias").unwrap_or_default().to_string(),
                enabled: store.get_attr(&object, "Enable") == Some("1"),
                rule_count: store
                    .get_attr(&object, "RuleNumberOfEntries")
                    .and_then(|v| v.trim().parse().ok())
                    .unwrap_or(0),
            }
        })
        .collect()
}

/// Rules of a chain, sorted by `Order` (instance number when unset).
fn discover_rules(store: &Store, chain_id: u32) -> Vec<Rule> {
    let collection = store.object(&format!("Firewall.Chain.{}.Rule", chain_id));
    let mut rules: Vec<Rule> = store
        .instances(&collection, "Alias")
        .into_iter()
        .map(|id| {
            let object = format!("{}.{}", collection, id);
            let get = |attribute: &str| store.get_attr(&object, attribute).unwrap_or_default();

            let dest_port = match (
                port(store, &object, "DestPort"),
                port(store, &object, "DestPortRangeMax"),
            ) {
                (Some(low), Some(high)) => format!("{}-{}", low, high),
                (Some(low), None) => low,
                (None, _) => ANY.to_string(),
            };

            Rule {
                order: get("Order").trim().parse().unwrap_or(i64::from(id)),
                alias: get("Alias").to_string(),
                target: get("Target").to_string(),
                protocol: protocol_label(non_empty_or(store, &object, "Protocol", "-1")),
                dest_port,
                src_port: port(store, &object, "SourcePort").unwrap_or_else(|| ANY.to_string()),
                src_ip: non_empty_or(store, &object, "SourceIP", ANY).to_string(),
                dest_ip: non_empty_or(store, &object, "DestIP", ANY).to_string(),
                conn_state: get("ConnectionState").to_string(),
            }
        })
        .collect();
    rules.sort_by_key(|rule| rule.order);
    rules
}

fn overview(store: &Store, ctx: &RenderContext) -> Vec<String> {
    let firewall = store.object("Firewall");
    let get = |attribute: &str| non_empty_or(store, &firewall, attribute, UNKNOWN);

    Card::new(BoxStyle::Heavy)
        .title("TR-181 FIREWALL OVERVIEW")
        .section(vec![
            format!(
                "Enable: {}  Type: {}  Config: {}",
                get("Enable"),
                get("Type"),
                get("Config")
            ),
            format!("Policy: {}", get("PolicyLevel")),
            format!("Chains: {}", get("ChainNumberOfEntries")),
        ])
        .render(ctx.width)
}

fn chain_header(chain: &Chain) -> Vec<String> {
    vec![
        format!(
            "{} Chain {}: {} ({})",
            status_dot(chain.enabled),
            chain.id,
            chain.name,
            chain.alias
        ),
        format!("Rules: {}", chain.rule_count),
    ]
}

fn rules_compact(rules: &[Rule]) -> Vec<String> {
    rules
        .iter()
        .map(|rule| {
            let mut line = format!(
                "#{} {}  {}  {}",
                rule.order,
                rule.alias,
                format_target(&rule.target),
                rule.protocol
            );
            let matchers = rule.matchers();
            if !matchers.is_empty() {
                line.push_str("  ");
                line.push_str(&matchers.join(" "));
            }
            line
        })
        .collect()
}

/// Rule table columns.
pub fn rule_columns() -> Vec<Column> {
    vec![
        Column::fixed("order", "#", 4),
        Column::flexible("alias", "Alias", 8, 16),
        Column::flexible("target", "Target", 8, 14),
        Column::fixed("protocol", "Proto", 7),
        Column::fixed("dest_port", "DPort", 7),
        Column::fixed("src_port", "SPort", 7),
        Column::flexible("src_ip", "SrcIP", 4, 16),
        Column::flexible("dest_ip", "DstIP", 4, 40),
        Column::extra("state", "State", 0),
    ]
}

fn rules_wide(rules: &[Rule], ctx: &RenderContext) -> Vec<String> {
    let mut table = Table::new(rule_columns());
    for rule in rules {
        table.push_row(vec![
            rule.order.to_string(),
            rule.alias.clone(),
            format_target(&rule.target),
            rule.protocol.clone(),
            rule.dest_port.clone(),
            rule.src_port.clone(),
            rule.src_ip.clone(),
            rule.dest_ip.clone(),
            rule.conn_state.clone(),
        ]);
    }
    // Two border columns, two padding columns.
    table.render(ctx.width.saturating_sub(4), ctx.overflow)
}

fn chain_card(chain: &Chain, rules: &[Rule], ctx: &RenderContext) -> Vec<String> {
    let body = if rules.is_empty() {
        vec!["(no rules)".to_string()]
    } else {
        match ctx.mode() {
            LayoutMode::Compact => rules_compact(rules),
            LayoutMode::Wide => rules_wide(rules, ctx),
        }
    };

    Card::new(BoxStyle::Light)
        .section(chain_header(chain))
        .section(body)
        .render(ctx.width)
}

fn summary(chains: &[Chain], ctx: &RenderContext) -> Vec<String> {
    let mut table = Table::new(vec![
        Column::fixed("id", "ID", 4),
        Column::flexible("name", "Name", 12, 26),
        Column::flexible("alias", "Alias", 8, 16),
        Column::fixed("enable", "En", 4),
        Column::fixed("rules", "Rules", 6),
    ]);
    for chain in chains {
        table.push_row(vec![
            chain.id.to_string(),
            chain.name.clone(),
            chain.alias.clone(),
            status_dot(chain.enabled).to_string(),
            chain.rule_count.to_string(),
        ]);
    }

    let mut lines = section_banner("CHAIN SUMMARY", ctx.width);
    lines.extend(
        table
            .render(ctx.width.saturating_sub(2), ctx.overflow)
            .into_iter()
            .map(|line| format!("  {}", line)),
    );
    lines
}

impl View for FirewallView {
    fn name(&self) -> &'static str {
        "show_firewall_rules"
    }

    fn description(&self) -> &'static str {
        "Firewall chains and rules"
    }

    fn render(&self, store: &Store, ctx: &RenderContext) -> String {
        let mut lines = overview(store, ctx);
        lines.push(String::new());

        let chains = discover_chains(store);
        if chains.is_empty() {
            lines.push("No firewall chains found.".to_string());
            return join_lines(lines);
        }

        for chain in &chains {
            let rules = discover_rules(store, chain.id);
            lines.extend(chain_card(chain, &rules, ctx));
            lines.push(String::new());
        }

        lines.extend(summary(&chains, ctx));
        join_lines(lines)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::display_width;

    const DUMP: &str = r#"
Device.Firewall.Enable=1
Device.Firewall.Type="Stateful"
Device.Firewall.Config="Advanced"
Device.Firewall.ChainNumberOfEntries=2
Device.Firewall.Chain.1.Name="Base"
Device.Firewall.Chain.1.Alias="base"
Device.Firewall.Chain.1.Enable=1
Device.Firewall.Chain.1.RuleNumberOfEntries=3
Device.Firewall.Chain.1.Rule.1.Alias="r1"
Device.Firewall.Chain.1.Rule.1.Target="accept"
Device.Firewall.Chain.1.Rule.1.Protocol="6"
Device.Firewall.Chain.1.Rule.1.Order=2
Device.Firewall.Chain.1.Rule.1.DestPort=22
Device.Firewall.Chain.1.Rule.2.Alias="r2"
Device.Firewall.Chain.1.Rule.2.Target="Drop"
Device.Firewall.Chain.1.Rule.2.Protocol="17"
Device.Firewall.Chain.1.Rule.2.Order=1
Device.Firewall.Chain.1.Rule.2.DestPort=1000
Device.Firewall.Chain.1.Rule.2.DestPortRangeMax=2000
Device.Firewall.Chain.1.Rule.2.SourceIP="10.0.0.0/8"
Device.Firewall.Chain.1.Rule.3..Alias="r3"
Device.Firewall.Chain.1.Rule.3..Target="Reject"
Device.Firewall.Chain.1.Rule.3..Protocol="99"
Device.Firewall.Chain.1.Rule.3..ConnectionState="ESTABLISHED"
Device.Firewall.Chain.2.Name="Forward"
Device.Firewall.Chain.2.Enable=0
"#;

    fn store() -> Store {
        Store::parse(DUMP, "Device")
    }

    #[test]
    fn protocol_labels() {
        assert_eq!(protocol_label("6"), "TCP");
        assert_eq!(protocol_label("17"), "UDP");
        assert_eq!(protocol_label("1"), "ICMP");
        assert_eq!(protocol_label("58"), "ICMPv6");
        assert_eq!(protocol_label("-1"), "any");
        assert_eq!(protocol_label("47"), "proto:47");
    }

    #[test]
    fn target_markers() {
        assert_eq!(format_target("accept"), "✅ accept");
        assert_eq!(format_target("DROP"), "🚫 DROP");
        assert_eq!(format_target("Reject"), "❌ Reject");
        assert_eq!(format_target("Chain_Lan"), "➡ Chain_Lan");
    }

    #[test]
    fn rules_sorted_by_order() {
        let rules = discover_rules(&store(), 1);
        let aliases: Vec<_> = rules.iter().map(|r| r.alias.as_str()).collect();
        assert_eq!(aliases, vec!["r2", "r1", "r3"]);
    }

    #[test]
    fn rule_fields_defaulted() {
        let rules = discover_rules(&store(), 1);
        let r2 = &rules[0];
        assert_eq!(r2.dest_port, "1000-2000");
        assert_eq!(r2.src_port, "*");
        assert_eq!(r2.src_ip, "10.0.0.0/8");
        assert_eq!(r2.dest_ip, "*");

        let r3 = &rules[2];
        assert_eq!(r3.order, 3);
        assert_eq!(r3.protocol, "proto:99");
        assert_eq!(r3.dest_port, "*");
    }

    #[test]
    fn chain_without_rules() {
        let chains = discover_chains(&store());
        assert_eq!(chains.len(), 2);
        assert!(!chains[1].enabled);
        assert_eq!(chains[1].rule_count, 0);
        assert!(discover_rules(&store(), 2).is_empty());
    }

    #[test]
    fn compact_layout_at_60_columns() {
        let out = FirewallView.render(&store(), &RenderContext::new(60));

        assert!(out.contains("TR-181 FIREWALL OVERVIEW"));
        assert!(out.contains("🟢 Chain 1: Base (base)"));
        assert!(out.contains("#2 r1  ✅ accept  TCP  dst:22"));
        assert!(out.contains("#1 r2  🚫 Drop  UDP  dst:1000-2000 from:10.0.0.0/8"));
        assert!(out.contains("#3 r3  ❌ Reject  proto:99  state:ESTABLISHED"));
        assert!(out.contains("🔴 Chain 2: Forward ()"));
        assert!(out.contains("(no rules)"));
        assert!(!out.contains("DPort"));
    }

    #[test]
    fn wide_layout_at_120_columns() {
        let out = FirewallView.render(&store(), &RenderContext::new(120));
        let lines: Vec<&str> = out.lines().collect();

        let header = lines
            .iter()
            .position(|l| l.contains("Alias") && l.contains("DPort"))
            .expect("rule table header");
        assert!(lines[header].contains("State"));
        assert!(lines[header + 1].contains("────"));
        assert!(lines[header + 2].contains("✅ accept") || lines[header + 2].contains("🚫 Drop"));
        assert!(out.contains("ESTABLISHED"));
    }

    #[test]
    fn wide_card_lines_have_equal_width() {
        let out = FirewallView.render(&store(), &RenderContext::new(120));
        let card: Vec<&str> = out
            .lines()
            .skip_while(|l| !l.starts_with('┌'))
            .take_while(|l| !l.starts_with('└'))
            .collect();
        assert!(!card.is_empty());
        assert!(card.iter().all(|l| display_width(l) == 120));
    }

    #[test]
    fn summary_lists_chains() {
        let out = FirewallView.render(&store(), &RenderContext::new(100));
        assert!(out.contains("  CHAIN SUMMARY"));
        let summary: Vec<&str> = out
            .lines()
            .skip_while(|l| !l.contains("CHAIN SUMMARY"))
            .collect();
        assert!(summary.iter().any(|l| l.contains("Forward") && l.contains("🔴")));
    }

    #[test]
    fn no_chains_message() {
        let store = Store::parse("Device.Firewall.Enable=1\n", "Device");
        let out = FirewallView.render(&store, &RenderContext::new(80));
        assert!(out.contains("Enable: 1  Type: ?  Config: ?"));
        assert!(out.contains("No firewall chains found."));
    }
}
