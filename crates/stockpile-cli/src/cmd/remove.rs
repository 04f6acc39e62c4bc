//! `stock rm` — delete an item by name.

use crate::cmd::{StoreContext, ensure_persisted, item_not_found};
use crate::output::{OutputMode, render};
use clap::Args;
use serde::Serialize;

#[derive(Args, Debug)]
pub struct RemoveArgs {
    /// Exact item name. With duplicates, the first one is removed.
    pub name: String,
}

#[derive(Debug, Serialize)]
struct RemoveOutput {
    ok: bool,
    name: String,
    remaining: usize,
}

pub fn run_remove(args: &RemoveArgs, output: OutputMode, ctx: &StoreContext) -> anyhow::Result<()> {
    let mut session = ctx.open_session();
    if !session.remove_item(&args.name) {
        return item_not_found(&args.name, output);
    }
    ensure_persisted(&session, output)?;

    let out = RemoveOutput {
        ok: true,
        name: args.name.clone(),
        remaining: session.items().len(),
    };
    render(output, &out, |o, w| writeln!(w, "✓ Removed '{}'", o.name))
}
