//! `stock list` — print the display rows for a filter and sort mode.

use crate::cmd::StoreContext;
use crate::output::{OutputMode, pretty_section, render_mode};
use clap::Args;
use serde::Serialize;
use std::io::{self, Write};
use stockpile_core::model::SortMode;
use stockpile_core::view::{DisplayRow, project};

#[derive(Args, Debug)]
pub struct ListArgs {
    /// Only show items whose name contains this text (case-insensitive).
    #[arg(long, short)]
    pub filter: Option<String>,

    /// Order rows by inventory.
    #[arg(long, short, default_value = "unsorted")]
    pub sort: SortMode,
}

#[derive(Debug, Serialize)]
struct ListOutput {
    sort: SortMode,
    filter: String,
    total: usize,
    rows: Vec<DisplayRow>,
}

fn render_text(out: &ListOutput, w: &mut dyn Write) -> io::Result<()> {
    for row in &out.rows {
        writeln!(w, "{}\t{}", row.name, row.inventory)?;
    }
    Ok(())
}

fn render_pretty(out: &ListOutput, w: &mut dyn Write) -> io::Result<()> {
    let heading = if out.filter.is_empty() {
        format!("Inventory  {} {}", out.sort.icon(), out.sort)
    } else {
        format!(
            "Inventory  {} {}  filter: \"{}\"  ({} of {})",
            out.sort.icon(),
            out.sort,
            out.filter,
            out.rows.len(),
            out.total
        )
    };
    pretty_section(w, &heading)?;
    if out.rows.is_empty() {
        return writeln!(w, "No items.");
    }
    let width = out
        .rows
        .iter()
        .map(|r| r.name.chars().count())
        .max()
        .unwrap_or(0);
    for row in &out.rows {
        writeln!(
            w,
            "{:<width$}  Inventory: {}",
            row.name,
            row.inventory,
            width = width
        )?;
    }
    Ok(())
}

pub fn run_list(args: &ListArgs, output: OutputMode, ctx: &StoreContext) -> anyhow::Result<()> {
    let items = ctx.gateway().load();
    let filter = args.filter.clone().unwrap_or_default();
    let rows = project(&items, &filter, args.sort);
    tracing::debug!(shown = rows.len(), total = items.len(), "listing items");

    let out = ListOutput {
        sort: args.sort,
        filter,
        total: items.len(),
        rows,
    };
    render_mode(output, &out, render_text, render_pretty)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> ListOutput {
        ListOutput {
            sort: SortMode::Descending,
            filter: String::new(),
            total: 2,
            rows: vec![
                DisplayRow {
                    position: 0,
                    name: "Eggs".into(),
                    inventory: 12,
                },
                DisplayRow {
                    position: 1,
                    name: "Tea".into(),
                    inventory: 1,
                },
            ],
        }
    }

    #[test]
    fn text_is_tab_separated() {
        let mut buf = Vec::new();
        render_text(&sample(), &mut buf).unwrap();
        assert_eq!(String::from_utf8(buf).unwrap(), "Eggs\t12\nTea\t1\n");
    }

    #[test]
    fn pretty_aligns_names_and_labels_inventory() {
        let mut buf = Vec::new();
        render_pretty(&sample(), &mut buf).unwrap();
        let text = String::from_utf8(buf).unwrap();
        assert!(text.starts_with("Inventory  ↓ descending\n"));
        assert!(text.contains("Eggs  Inventory: 12\n"));
        assert!(text.contains("Tea   Inventory: 1\n"));
    }

    #[test]
    fn pretty_reports_empty_list() {
        let mut out = sample();
        out.rows.clear();
        out.filter = "zz".into();
        let mut buf = Vec::new();
        render_pretty(&out, &mut buf).unwrap();
        let text = String::from_utf8(buf).unwrap();
        assert!(text.contains("filter: \"zz\"  (0 of 2)"));
        assert!(text.ends_with("No items.\n"));
    }
}
