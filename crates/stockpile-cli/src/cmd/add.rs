//! `stock add` — append a new item at zero inventory.

use crate::cmd::{StoreContext, ensure_persisted};
use crate::output::{CliError, OutputMode, render, render_error};
use clap::Args;
use serde::Serialize;
use stockpile_core::error::ErrorCode;
use stockpile_core::session::EMPTY_NAME_NOTICE;

#[derive(Args, Debug)]
pub struct AddArgs {
    /// Name of the new item. Duplicates are allowed.
    pub name: String,
}

#[derive(Debug, Serialize)]
struct AddOutput {
    ok: bool,
    name: String,
    inventory: u64,
    total: usize,
}

pub fn run_add(args: &AddArgs, output: OutputMode, ctx: &StoreContext) -> anyhow::Result<()> {
    let mut session = ctx.open_session();
    if !session.on_add_item(&args.name) {
        render_error(
            output,
            &CliError::from_code(ErrorCode::EmptyItemName, EMPTY_NAME_NOTICE),
        )?;
        anyhow::bail!("{EMPTY_NAME_NOTICE}");
    }
    ensure_persisted(&session, output)?;

    let out = AddOutput {
        ok: true,
        name: args.name.clone(),
        inventory: 0,
        total: session.items().len(),
    };
    render(output, &out, |o, w| {
        writeln!(w, "✓ Added '{}' ({} items)", o.name, o.total)
    })
}
