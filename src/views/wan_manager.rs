//! views::wan_manager
//!
//! WAN modes of the prplOS WAN manager (`<root>.X_PRPLWARE-COM_WANManager`)
//! and the interfaces each mode brings up.

use super::common::{
    non_empty_or, ref_label, section_banner, short_ref, status_dot, MISSING, UNKNOWN,
};
use super::{join_lines, RenderContext, View};
use crate::core::store::Store;
use crate::layout::boxes::{BoxStyle, Card};
use crate::layout::table::{Column, Table};
use crate::layout::LayoutMode;

/// WAN manager modes and interfaces.
#[derive(Debug, Clone, Copy, Default)]
pub struct WanManagerView;

const MANAGER: &str = "X_PRPLWARE-COM_WANManager";

const SENSING: &str = "📡";
const ACTIVE: &str = "★";

#[derive(Debug, Clone)]
struct WanMode {
    id: u32,
    alias: String,
    status: String,
    physical_type: String,
    physical_ref: String,
    dns_mode: String,
    ipv6_dns_mode: String,
    sensing: bool,
    interfaces: Vec<WanIntf>,
}

impl WanMode {
    fn up(&self) -> bool {
        self.status != "Disabled"
    }

    fn heading(&self, active: bool) -> String {
        let mut line = format!("{} WAN.{}: {}", status_dot(self.up()), self.id, self.alias);
        if active {
            line.push_str(&format!(" {} ACTIVE", ACTIVE));
        }
        line
    }

    fn physical(&self, store: &Store) -> String {
        let mut line = format!(
            "Physical: {}  Ref: {}",
            self.physical_type,
            short_ref(store, &self.physical_ref)
        );
        if self.sensing {
            line.push_str(&format!("  {} Sensing", SENSING));
        }
        line
    }
}

#[derive(Debug, Clone)]
struct WanIntf {
    id: u32,
    alias: String,
    ipv4_mode: String,
    ipv6_mode: String,
    kind: String,
    vlan_id: String,
    ipv4_ref: String,
    dhcpv4_ref: String,
    dhcpv6_ref: String,
    default_route: String,
}

impl WanIntf {
    /// VLAN id, only meaningful for `vlan` interfaces.
    fn vlan(&self) -> &str {
        if self.kind == "vlan" {
            &self.vlan_id
        } else {
            MISSING
        }
    }
}

fn value_or(store: &Store, object: &str, attribute: &str, default: &str) -> String {
    non_empty_or(store, object, attribute, default).to_string()
}

fn discover_interfaces(store: &Store, mode_object: &str) -> Vec<WanIntf> {
    let collection = format!("{}.Intf", mode_object);
    store
        .instances(&collection, "Alias")
        .into_iter()
        .map(|id| {
            let object = format!("{}.{}", collection, id);
            let get = |attribute: &str, default: &str| value_or(store, &object, attribute, default);
            WanIntf {
                id,
                alias: get("Alias", ""),
                ipv4_mode: get("IPv4Mode", MISSING),
                ipv6_mode: get("IPv6Mode", MISSING),
                kind: get("Type", MISSING),
                vlan_id: get("VlanID", MISSING),
                ipv4_ref: get("IPv4Reference", ""),
                dhcpv4_ref: get("DHCPv4Reference", ""),
                dhcpv6_ref: get("DHCPv6Reference", ""),
                default_route: get("DefaultRouteReference", ""),
            }
        })
        .collect()
}

fn discover_modes(store: &Store) -> Vec<WanMode> {
    let collection = store.object(&format!("{}.WAN", MANAGER));
    store
        .instances(&collection, "Alias")
        .into_iter()
        .map(|id| {
            let object = format!("{}.{}", collection, id);
            let get = |attribute: &str, default: &str| value_or(store, &object, attribute, default);
            WanMode {
                id,
                alias: get("Alias", ""),
                status: get("Status", UNKNOWN),
                physical_type: get("PhysicalType", UNKNOWN),
                physical_ref: get("PhysicalReference", ""),
                dns_mode: get("DNSMode", UNKNOWN),
                ipv6_dns_mode: get("IPv6DNSMode", UNKNOWN),
                sensing: store.get_attr(&object, "EnableSensing") == Some("1"),
                interfaces: discover_interfaces(store, &object),
            }
        })
        .collect()
}

fn overview(store: &Store, ctx: &RenderContext) -> Vec<String> {
    let manager = store.object(MANAGER);
    let get = |attribute: &str| value_or(store, &manager, attribute, UNKNOWN);

    Card::new(BoxStyle::Heavy)
        .title("WAN MANAGER OVERVIEW")
        .section(vec![
            format!(
                "OperationMode: {}   SensingPolicy: {}   SensingTimeout: {}s",
                get("OperationMode"),
                get("SensingPolicy"),
                get("SensingTimeout")
            ),
            format!("Active WANMode: {}", get("WANMode")),
        ])
        .render(ctx.width)
}

fn interfaces_compact(store: &Store, interfaces: &[WanIntf]) -> Vec<String> {
    let mut lines = Vec::new();
    for intf in interfaces {
        let mut line = format!(
            "Intf.{} \"{}\"  IPv4:{}  IPv6:{}  {}",
            intf.id, intf.alias, intf.ipv4_mode, intf.ipv6_mode, intf.kind
        );
        if intf.kind == "vlan" {
            line.push_str(&format!(" vlan:{}", intf.vlan_id));
        }
        lines.push(line);

        let refs: Vec<String> = [
            ("IPv4", &intf.ipv4_ref),
            ("DHCPv4", &intf.dhcpv4_ref),
            ("DHCPv6", &intf.dhcpv6_ref),
            ("Route", &intf.default_route),
        ]
        .into_iter()
        .filter(|(_, reference)| !reference.is_empty())
        .map(|(label, reference)| format!("{}→{}", label, ref_label(store, reference)))
        .collect();
        if !refs.is_empty() {
            lines.push(format!("  {}", refs.join(" | ")));
        }
    }
    lines
}

fn interfaces_wide(store: &Store, interfaces: &[WanIntf], ctx: &RenderContext) -> Vec<String> {
    let mut table = Table::new(vec![
        Column::fixed("id", "Intf", 6),
        Column::flexible("alias", "Alias", 10, 16),
        Column::fixed("ipv4_mode", "IPv4Mode", 10),
        Column::fixed("ipv6_mode", "IPv6Mode", 10),
        Column::fixed("type", "Type", 10),
        Column::fixed("vlan", "VLAN", 6),
        Column::flexible("ipv4_ref", "IPv4Ref", 20, 32),
        Column::flexible("route", "DefRoute", 10, 40),
    ]);
    for intf in interfaces {
        table.push_row(vec![
            intf.id.to_string(),
            intf.alias.clone(),
            intf.ipv4_mode.clone(),
            intf.ipv6_mode.clone(),
            intf.kind.clone(),
            intf.vlan().to_string(),
            ref_label(store, &intf.ipv4_ref),
            ref_label(store, &intf.default_route),
        ]);
    }
    table.render(ctx.width.saturating_sub(4), ctx.overflow)
}

fn mode_card(store: &Store, mode: &WanMode, active: bool, ctx: &RenderContext) -> Vec<String> {
    let dns = format!(
        "DNS: {}  IPv6DNS: {}  Status: {}",
        mode.dns_mode, mode.ipv6_dns_mode, mode.status
    );
    let header = match ctx.mode() {
        LayoutMode::Compact => vec![mode.heading(active), mode.physical(store), dns],
        LayoutMode::Wide => vec![
            mode.heading(active),
            format!("{}  {}", mode.physical(store), dns),
        ],
    };

    let body = if mode.interfaces.is_empty() {
        vec!["(no interfaces)".to_string()]
    } else {
        match ctx.mode() {
            LayoutMode::Compact => interfaces_compact(store, &mode.interfaces),
            LayoutMode::Wide => interfaces_wide(store, &mode.interfaces, ctx),
        }
    };

    Card::new(BoxStyle::Light)
        .section(header)
        .section(body)
        .render(ctx.width)
}

fn summary(modes: &[WanMode], active_mode: &str, ctx: &RenderContext) -> Vec<String> {
    let wide = ctx.mode() == LayoutMode::Wide;
    let columns = if wide {
        vec![
            Column::fixed("id", "ID", 4),
            Column::flexible("alias", "Alias", 12, 20),
            Column::fixed("physical", "PhysType", 10),
            Column::fixed("status", "Status", 12),
            Column::fixed("dns", "DNS", 10),
            Column::fixed("sensing", "Sens", 5),
            Column::fixed("interfaces", "Intfs", 6),
        ]
    } else {
        vec![
            Column::fixed("id", "ID", 3),
            Column::flexible("alias", "Alias", 8, 16),
            Column::fixed("physical", "Phys", 9),
            Column::fixed("status", "St", 4),
            Column::fixed("sensing", "Sn", 4),
            Column::fixed("interfaces", "If", 4),
        ]
    };

    let mut table = Table::new(columns);
    for mode in modes {
        let marker = if mode.alias == active_mode { ACTIVE } else { " " };
        let sensing = if mode.sensing { SENSING } else { "" };
        let id = format!("{}{}", marker, mode.id);
        let row = if wide {
            vec![
                id,
                mode.alias.clone(),
                mode.physical_type.clone(),
                format!("{} {}", status_dot(mode.up()), mode.status),
                mode.dns_mode.clone(),
                sensing.to_string(),
                mode.interfaces.len().to_string(),
            ]
        } else {
            vec![
                id,
                mode.alias.clone(),
                mode.physical_type.clone(),
                status_dot(mode.up()).to_string(),
                sensing.to_string(),
                mode.interfaces.len().to_string(),
            ]
        };
        table.push_row(row);
    }

    let mut lines = section_banner("WAN MODE SUMMARY", ctx.width);
    lines.extend(
        table
            .render(ctx.width.saturating_sub(2), ctx.overflow)
            .into_iter()
            .map(|line| format!("  {}", line)),
    );
    lines
}

impl View for WanManagerView {
    fn name(&self) -> &'static str {
        "show_wan_manager"
    }

    fn description(&self) -> &'static str {
        "WAN manager modes and their interfaces"
    }

    fn render(&self, store: &Store, ctx: &RenderContext) -> String {
        let mut lines = overview(store, ctx);
        lines.push(String::new());

        let modes = discover_modes(store);
        if modes.is_empty() {
            lines.push("No WANManager WAN modes found.".to_string());
            return join_lines(lines);
        }

        let active_mode = store
            .get_attr(&store.object(MANAGER), "WANMode")
            .unwrap_or_default();
        for mode in &modes {
            let active = !active_mode.is_empty() && mode.alias == active_mode;
            lines.extend(mode_card(store, mode, active, ctx));
            lines.push(String::new());
        }

        lines.extend(summary(&modes, active_mode, ctx));
        join_lines(lines)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::display_width;

    const DUMP: &str = r#"
Device.X_PRPLWARE-COM_WANManager.OperationMode="Auto"
Device.X_PRPLWARE-COM_WANManager.SensingPolicy="Sequential"
Device.X_PRPLWARE-COM_WANManager.SensingTimeout=30
Device.X_PRPLWARE-COM_WANManager.WANMode="Ethernet_DHCP"
Device.X_PRPLWARE-COM_WANManager.WAN.1.Alias="Ethernet_DHCP"
Device.X_PRPLWARE-COM_WANManager.WAN.1.Status="Enabled"
Device.X_PRPLWARE-COM_WANManager.WAN.1.PhysicalType="Ethernet"
Device.X_PRPLWARE-COM_WANManager.WAN.1.PhysicalReference="Device.Ethernet.Interface.5."
Device.X_PRPLWARE-COM_WANManager.WAN.1.DNSMode="Dynamic"
Device.X_PRPLWARE-COM_WANManager.WAN.1.EnableSensing=1
Device.X_PRPLWARE-COM_WANManager.WAN.1.Intf.1.Alias="data"
Device.X_PRPLWARE-COM_WANManager.WAN.1.Intf.1.IPv4Mode="dhcp4"
Device.X_PRPLWARE-COM_WANManager.WAN.1.Intf.1.IPv6Mode="dhcp6"
Device.X_PRPLWARE-COM_WANManager.WAN.1.Intf.1.Type="vlan"
Device.X_PRPLWARE-COM_WANManager.WAN.1.Intf.1.VlanID=100
Device.X_PRPLWARE-COM_WANManager.WAN.1.Intf.1.IPv4Reference="Device.IP.Interface.2."
Device.X_PRPLWARE-COM_WANManager.WAN.1.Intf.1.DefaultRouteReference="Device.Routing.Router.1.IPv4Forwarding.1."
Device.X_PRPLWARE-COM_WANManager.WAN.1.Intf.2..Alias="voice"
Device.X_PRPLWARE-COM_WANManager.WAN.1.Intf.2..Type="ethernet"
Device.X_PRPLWARE-COM_WANManager.WAN.1.Intf.2..VlanID=200
Device.X_PRPLWARE-COM_WANManager.WAN.2.Alias="PPPoE"
Device.X_PRPLWARE-COM_WANManager.WAN.2.Status="Disabled"
Device.IP.Interface.2.Alias="wan"
"#;

    fn store() -> Store {
        Store::parse(DUMP, "Device")
    }

    #[test]
    fn modes_and_interfaces_discovered() {
        let modes = discover_modes(&store());
        assert_eq!(modes.len(), 2);
        assert_eq!(modes[0].interfaces.len(), 2);
        assert!(modes[0].sensing);
        assert!(modes[1].interfaces.is_empty());
        assert!(!modes[1].up());
        assert_eq!(modes[1].physical_type, "?");
    }

    #[test]
    fn vlan_only_for_vlan_type() {
        let modes = discover_modes(&store());
        assert_eq!(modes[0].interfaces[0].vlan(), "100");
        assert_eq!(modes[0].interfaces[1].vlan(), "-");
    }

    #[test]
    fn overview_values() {
        let out = WanManagerView.render(&store(), &RenderContext::new(80));
        assert!(out.contains("WAN MANAGER OVERVIEW"));
        assert!(out.contains(
            "OperationMode: Auto   SensingPolicy: Sequential   SensingTimeout: 30s"
        ));
        assert!(out.contains("Active WANMode: Ethernet_DHCP"));
    }

    #[test]
    fn active_mode_marked_once() {
        let out = WanManagerView.render(&store(), &RenderContext::new(80));
        assert!(out.contains("🟢 WAN.1: Ethernet_DHCP ★ ACTIVE"));
        assert!(out.contains("🔴 WAN.2: PPPoE"));
        assert_eq!(out.matches("★ ACTIVE").count(), 1);
    }

    #[test]
    fn compact_interface_lines() {
        let out = WanManagerView.render(&store(), &RenderContext::new(80));
        assert!(out.contains("Physical: Ethernet  Ref: Ethernet.Interface.5  📡 Sensing"));
        assert!(out.contains("Intf.1 \"data\"  IPv4:dhcp4  IPv6:dhcp6  vlan vlan:100"));
        assert!(out.contains("Intf.2 \"voice\"  IPv4:-  IPv6:-  ethernet"));
        assert!(!out.contains("vlan:200"));
        assert!(out.contains(
            "  IPv4→IP.Interface.2 (wan) | Route→Routing.Router.1.IPv4Forwarding.1"
        ));
        assert!(out.contains("(no interfaces)"));
    }

    #[test]
    fn wide_interface_table() {
        let out = WanManagerView.render(&store(), &RenderContext::new(120));
        assert!(out.contains("IPv4Mode"));
        assert!(out.contains("DefRoute"));
        let row = out
            .lines()
            .find(|l| l.contains("data") && l.contains("dhcp4"))
            .expect("interface row");
        assert!(row.contains("100"));
        assert!(row.contains("IP.Interface.2 (wan)"));
    }

    #[test]
    fn wide_card_lines_have_equal_width() {
        let out = WanManagerView.render(&store(), &RenderContext::new(120));
        let card: Vec<&str> = out
            .lines()
            .skip_while(|l| !l.starts_with('┌'))
            .take_while(|l| !l.starts_with('└'))
            .collect();
        assert!(card.len() > 3);
        let widths: Vec<usize> = card.iter().map(|l| display_width(l)).collect();
        assert!(widths.iter().all(|&w| w == widths[0]), "{:?}", widths);
    }

    #[test]
    fn summary_variants() {
        let wide = WanManagerView.render(&store(), &RenderContext::new(120));
        assert!(wide.contains("WAN MODE SUMMARY"));
        assert!(wide.contains("PhysType"));
        assert!(wide.contains("🔴 Disabled"));

        let compact = WanManagerView.render(&store(), &RenderContext::new(60));
        assert!(compact.contains("WAN MODE SUMMARY"));
        assert!(!compact.contains("PhysType"));
        assert!(compact.contains("★1"));
    }

    #[test]
    fn no_modes() {
        let store = Store::parse("Device.X_PRPLWARE-COM_WANManager.WANMode=\"\"\n", "Device");
        let out = WanManagerView.render(&store, &RenderContext::new(80));
        assert!(out.contains("Active WANMode: ?"));
        assert!(out.contains("No WANManager WAN modes found."));
    }
}
