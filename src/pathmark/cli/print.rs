use colored::Colorize;
use pathmark::commands::{CmdMessage, ItemView, MessageLevel, NodeSummary};
use pathmark::config::PathmarkConfig;
use pathmark::model::PathKind;
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

const LINE_WIDTH: usize = 100;
const KIND_WIDTH: usize = 7;
const INDENT: &str = "  ";

pub(super) fn print_messages(messages: &[CmdMessage]) {
    for message in messages {
        match message.level {
            MessageLevel::Info => println!("{}", message.content.dimmed()),
            MessageLevel::Success => println!("{}", message.content.green()),
            MessageLevel::Warning => println!("{}", message.content.yellow()),
            MessageLevel::Error => println!("{}", message.content.red()),
        }
    }
}

pub(super) fn print_tree(nodes: &[NodeSummary]) {
    for node in nodes {
        let prefix = INDENT.repeat(node.depth);
        let count = if node.item_count > 0 {
            format!(" ({})", node.item_count)
        } else {
            String::new()
        };
        let available = LINE_WIDTH.saturating_sub(prefix.width() + count.width());
        let name = truncate_to_width(&node.name, available);
        if node.depth == 0 {
            println!("{}{}{}", prefix, name.bold(), count.dimmed());
        } else {
            println!("{}{}{}", prefix, name, count.dimmed());
        }
    }
}

fn kind_colored(kind: PathKind) -> colored::ColoredString {
    let label = format!("{:<width$}", kind.label(), width = KIND_WIDTH);
    match kind {
        PathKind::Url | PathKind::Ftp => label.cyan(),
        PathKind::Unc => label.magenta(),
        PathKind::Local => label.normal(),
        PathKind::Empty => label.dimmed(),
    }
}

/// One line per item: position, name, path and kind.
///
/// With `show_node` the owning node's path is printed before the name, which
/// is what search results need.
pub(super) fn print_items(items: &[ItemView], show_node: bool) {
    for item in items {
        let idx = format!("{:>3}. ", item.position);
        let name = item.name.as_deref().unwrap_or("(unnamed)");
        let label = if show_node {
            format!("{}#{} {}", item.node_path, item.position, name)
        } else {
            name.to_string()
        };
        let path = item.path.as_deref().unwrap_or("");

        let fixed = idx.width() + KIND_WIDTH + 2;
        let available = LINE_WIDTH.saturating_sub(fixed);
        let label_display = truncate_to_width(&label, available / 2);
        let path_display = truncate_to_width(path, available.saturating_sub(label_display.width() + 2));
        let padding = available.saturating_sub(label_display.width() + path_display.width());

        let idx_colored = if show_node { "".normal() } else { idx.yellow() };
        println!(
            "{}{}  {}{}{}",
            idx_colored,
            label_display,
            path_display.dimmed(),
            " ".repeat(padding),
            kind_colored(item.kind)
        );
    }
}

pub(super) fn print_item_detail(item: &ItemView) {
    let name = item.name.as_deref().unwrap_or("(unnamed)");
    println!("{}", name.bold());
    println!("--------------------------------");
    println!("{:<9}{}", "path", item.path.as_deref().unwrap_or("-"));
    println!("{:<9}{}", "kind", item.kind.label());
    println!("{:<9}{}", "comment", item.comment.as_deref().unwrap_or("-"));
    println!("{:<9}{}#{}", "node", item.node_path, item.position);
    println!("{:<9}{}", "id", item.id.dimmed());
}

pub(super) fn print_config(config: &PathmarkConfig) {
    for key in PathmarkConfig::KEYS {
        if let Some(value) = config.get(key) {
            println!("{} = {}", key, value);
        }
    }
}

fn truncate_to_width(s: &str, max_width: usize) -> String {
    if s.width() <= max_width {
        return s.to_string();
    }

    let mut result = String::new();
    let mut current_width = 0;
    for c in s.chars() {
        let char_width = c.width().unwrap_or(0);
        if current_width + char_width > max_width.saturating_sub(1) {
            break;
        }
        result.push(c);
        current_width += char_width;
    }
    result.push('…');
    result
}
