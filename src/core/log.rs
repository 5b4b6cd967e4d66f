use crate::db::log::LogEntry;
use ansi_term::Colour;
use unicode_width::UnicodeWidthStr;

const MAX_OP_WIDTH: usize = 60;

fn color_for_operation(op: &str) -> Colour {
    match op {
        "project_add" | "member_add" | "check_in" => Colour::Green,
        "project_del" | "member_del" | "check_in_del" | "purge" => Colour::Red,
        "check_in_edit" | "project_passwd" => Colour::Yellow,
        "purge_failed" => Colour::RGB(255, 153, 51),
        "migration_applied" => Colour::Purple,
        "init" => Colour::Blue,
        _ => Colour::White,
    }
}

fn truncate(s: &str, max: usize) -> String {
    if s.width() <= max {
        return s.to_string();
    }
    let mut out = String::new();
    for c in s.chars() {
        if out.width() + 3 >= max {
            break;
        }
        out.push(c);
    }
    out.push_str("...");
    out
}

/// Render the internal log, one line per entry, operation coloured.
pub fn format_log(entries: &[LogEntry]) -> Vec<String> {
    let labels: Vec<String> = entries
        .iter()
        .map(|e| {
            let label = if e.target.is_empty() {
                e.operation.clone()
            } else {
                format!("{} ({})", e.operation, e.target)
            };
            truncate(&label, MAX_OP_WIDTH)
        })
        .collect();

    let op_w = labels.iter().map(|l| l.width()).max().unwrap_or(10);
    let id_w = entries
        .iter()
        .map(|e| e.id.to_string().len())
        .max()
        .unwrap_or(1);
    let date_w = entries.iter().map(|e| e.date.len()).max().unwrap_or(10);

    entries
        .iter()
        .zip(labels)
        .map(|(e, label)| {
            let color = color_for_operation(&e.operation);
            let padding = " ".repeat(op_w.saturating_sub(label.width()));

            // only the operation word is coloured
            let painted = match label.split_once(' ') {
                Some((op, rest)) => format!("{} {}", color.paint(op), rest),
                None => color.paint(label.as_str()).to_string(),
            };

            format!(
                "{:>id_w$}: {:<date_w$} | {}{} => {}",
                e.id,
                e.date,
                painted,
                padding,
                e.message,
                id_w = id_w,
                date_w = date_w
            )
        })
        .collect()
}

pub fn print_log(title: &str, entries: &[LogEntry]) {
    println!("📜 {title}:\n");
    if entries.is_empty() {
        println!("(empty)");
        return;
    }
    for line in format_log(entries) {
        println!("{line}");
    }
}
