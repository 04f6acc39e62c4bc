//! `stock inc` / `stock dec` — change an item's inventory.
//!
//! Inventory never goes below zero; a decrement past zero clamps.

use crate::cmd::{StoreContext, ensure_persisted, item_not_found};
use crate::output::{OutputMode, render};
use clap::Args;
use serde::Serialize;

#[derive(Args, Debug)]
pub struct AdjustArgs {
    /// Exact item name. With duplicates, the first one is adjusted.
    pub name: String,

    /// Amount to change the inventory by.
    #[arg(long, default_value_t = 1, value_parser = clap::value_parser!(u32).range(1..))]
    pub by: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Increment,
    Decrement,
}

impl Direction {
    fn delta(self, by: u32) -> i64 {
        match self {
            Self::Increment => i64::from(by),
            Self::Decrement => -i64::from(by),
        }
    }
}

#[derive(Debug, Serialize)]
struct AdjustOutput {
    ok: bool,
    name: String,
    delta: i64,
    inventory: u64,
}

pub fn run_adjust(
    args: &AdjustArgs,
    direction: Direction,
    output: OutputMode,
    ctx: &StoreContext,
) -> anyhow::Result<()> {
    let delta = direction.delta(args.by);
    let mut session = ctx.open_session();
    if !session.adjust_item(&args.name, delta) {
        return item_not_found(&args.name, output);
    }
    ensure_persisted(&session, output)?;

    let inventory = session
        .store()
        .get(&args.name)
        .map_or(0, |item| item.inventory);
    let out = AdjustOutput {
        ok: true,
        name: args.name.clone(),
        delta,
        inventory,
    };
    render(output, &out, |o, w| {
        writeln!(w, "✓ {}  Inventory: {}", o.name, o.inventory)
    })
}

#[cfg(test)]
mod tests {
    use super::Direction;

    #[test]
    fn direction_sets_sign() {
        assert_eq!(Direction::Increment.delta(3), 3);
        assert_eq!(Direction::Decrement.delta(3), -3);
        assert_eq!(Direction::Decrement.delta(u32::MAX), -i64::from(u32::MAX));
    }
}
