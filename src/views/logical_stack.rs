//! views::logical_stack
//!
//! Logical interfaces and the interface stack below each of them, following
//! the TR-181 InterfaceStack model (`LowerLayers` references, top first).

use super::common::{section_banner, UNKNOWN};
use super::{join_lines, RenderContext, View};
use crate::core::store::Store;
use crate::core::walker::{lower_layers, resolve_name, walk_with, WalkStep};
use crate::layout::boxes::{BoxStyle, Card};
use crate::layout::table::{Column, Table};
use crate::layout::{hline, LayoutMode};

/// Logical interface stacks.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogicalStackView;

/// Role of a logical interface.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    Wan,
    Lan,
    Unknown,
}

impl Role {
    fn label(self) -> &'static str {
        match self {
            Role::Wan => "WAN",
            Role::Lan => "LAN",
            Role::Unknown => UNKNOWN,
        }
    }
}

/// WAN when the vendor WAN extension is enabled, else LAN when the LAN one
/// is, else unknown.
pub fn role(store: &Store, object: &str) -> Role {
    let enabled = |attribute: &str| store.get_attr(object, attribute) == Some("Enabled");
    if enabled("X_PRPLWARE-COM_WAN.Status") {
        Role::Wan
    } else if enabled("X_PRPLWARE-COM_LAN.Status") {
        Role::Lan
    } else {
        Role::Unknown
    }
}

/// Tree line for one walked node.
fn node_line(store: &Store, step: &WalkStep) -> String {
    let mut label = store.shorten(&step.path);

    let name = resolve_name(store, &step.path);
    if !name.is_empty() {
        label.push_str(&format!("  ({})", name));
    }
    if let Some(status) = store.get_attr(&step.path, "Status").filter(|s| !s.is_empty()) {
        label.push_str(&format!("  [{}]", status));
    }
    if step.cycle {
        label.push_str("  ↻ cycle");
    }
    if step.depth_capped {
        label.push_str("  … depth limit");
    }

    let indent = "    ".repeat(step.depth);
    let connector = if step.depth > 0 { "└── " } else { "" };
    format!("{}{}{}", indent, connector, label)
}

fn stack_lines(store: &Store, object: &str, ctx: &RenderContext) -> Vec<String> {
    walk_with(store, object, ctx.walk)
        .map(|step| node_line(store, &step))
        .collect()
}

/// First lower layer of `object`, if any.
fn first_lower(store: &Store, object: &str) -> Option<String> {
    lower_layers(store, object).into_iter().next()
}

/// IP interface, Ethernet link and bottom layer below a logical interface,
/// following the first lower layer at each step.
struct StackSummary {
    ip_interface: String,
    eth_link: String,
    bottom: String,
}

fn stack_summary(store: &Store, object: &str) -> StackSummary {
    let mut summary = StackSummary {
        ip_interface: String::new(),
        eth_link: String::new(),
        bottom: String::new(),
    };

    let Some(ip) = first_lower(store, object) else {
        return summary;
    };
    summary.ip_interface = store.shorten(&ip);

    let Some(link) = first_lower(store, &ip) else {
        return summary;
    };
    summary.eth_link = store.shorten(&link);

    if let Some(bottom) = first_lower(store, &link) {
        let name = resolve_name(store, &bottom);
        summary.bottom = store.shorten(&bottom);
        if !name.is_empty() {
            summary.bottom.push_str(&format!(" ({})", name));
        }
    }
    summary
}

struct Logical {
    id: u32,
    object: String,
    name: String,
    alias: String,
    status: String,
    role: Role,
}

fn discover(store: &Store) -> Vec<Logical> {
    let collection = store.object("Logical.Interface");
    store
        .instances(&collection, "Name")
        .into_iter()
        .map(|id| {
            let object = format!("{}.{}", collection, id);
            Logical {
                id,
                name: resolve_name(store, &object),
                alias: store.get_attr(&object, "Alias").unwrap_or_default().to_string(),
                status: store.get_attr(&object, "Status").unwrap_or_default().to_string(),
                role: role(store, &object),
                object,
            }
        })
        .collect()
}

fn summary_wide(store: &Store, interfaces: &[Logical], ctx: &RenderContext) -> Vec<String> {
    let mut table = Table::new(vec![
        Column::fixed("id", "#", 4),
        Column::flexible("alias", "Alias", 8, 16),
        Column::fixed("role", "Role", 6),
        Column::fixed("status", "Status", 8),
        Column::flexible("ip", "IP Interface", 12, 22),
        Column::flexible("link", "Eth Link", 12, 22),
        Column::extra("bottom", "Bottom Layer", 0),
    ]);
    for logical in interfaces {
        let stack = stack_summary(store, &logical.object);
        table.push_row(vec![
            logical.id.to_string(),
            logical.alias.clone(),
            logical.role.label().to_string(),
            logical.status.clone(),
            stack.ip_interface,
            stack.eth_link,
            stack.bottom,
        ]);
    }
    table.render(ctx.width, ctx.overflow)
}

fn summary_compact(store: &Store, interfaces: &[Logical]) -> Vec<String> {
    let mut lines = Vec::new();
    for logical in interfaces {
        let stack = stack_summary(store, &logical.object);
        lines.push(format!(
            "#{} {}  {}  {}",
            logical.id, logical.alias, logical.role.label(), logical.status
        ));
        let mut layers = Vec::new();
        if !stack.ip_interface.is_empty() {
            layers.push(format!("IP:{}", stack.ip_interface));
        }
        if !stack.eth_link.is_empty() {
            layers.push(format!("Eth:{}", stack.eth_link));
        }
        if !stack.bottom.is_empty() {
            layers.push(format!("Bottom:{}", stack.bottom));
        }
        if !layers.is_empty() {
            lines.push(format!("    {}", layers.join("  ")));
        }
    }
    lines
}

impl View for LogicalStackView {
    fn name(&self) -> &'static str {
        "show_logical_stack"
    }

    fn description(&self) -> &'static str {
        "Logical interfaces and their interface stacks"
    }

    fn render(&self, store: &Store, ctx: &RenderContext) -> String {
        let logical = store.object("Logical");
        let total = store
            .get_attr(&logical, "InterfaceNumberOfEntries")
            .unwrap_or(UNKNOWN);

        let mut lines = vec![
            format!("{}.InterfaceNumberOfEntries = {}", logical, total),
            hline('═', ctx.width, "", ""),
        ];

        let interfaces = discover(store);
        if interfaces.is_empty() {
            lines.push("No logical interfaces found.".to_string());
            return join_lines(lines);
        }

        for interface in &interfaces {
            let banner = format!(
                "Logical.Interface.{} \"{}\"  (Role: {})",
                interface.id,
                interface.name,
                interface.role.label()
            );
            lines.push(String::new());
            lines.extend(
                Card::new(BoxStyle::Heavy)
                    .banner()
                    .section(vec![banner])
                    .render(ctx.width),
            );
            lines.push(String::new());
            lines.extend(stack_lines(store, &interface.object, ctx));
        }

        lines.push(String::new());
        lines.extend(section_banner("LOGICAL INTERFACE SUMMARY", ctx.width));
        lines.extend(match ctx.mode() {
            LayoutMode::Compact => summary_compact(store, &interfaces),
            LayoutMode::Wide => summary_wide(store, &interfaces, ctx),
        });
        join_lines(lines)
    }
}
