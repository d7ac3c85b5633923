use anyhow::Result;
use clap::Subcommand;
use newsdesk_lib::validation;
use newsdesk_lib::SourcePreferences;

use super::Context;

#[derive(Subcommand)]
pub enum SourceCommand {
    /// Print the selected source id
    Show,
    /// Select the source used by `headlines`
    Set {
        /// Source id (e.g. abc-news-au)
        id: String,
    },
    /// Go back to the default source
    Reset,
}

pub fn run(cmd: &SourceCommand, ctx: &Context) -> Result<()> {
    let db = ctx.open_db()?;
    let prefs = SourcePreferences::new(&db);

    match cmd {
        SourceCommand::Show => println!("{}", prefs.selected_source_id()?),
        SourceCommand::Set { id } => {
            let id = validation::validate_source_id(id)?;
            prefs.set_selected_source_id(&id)?;
            eprintln!("Selected source: {}", id);
        }
        SourceCommand::Reset => {
            prefs.reset()?;
            eprintln!("Selected source: {}", prefs.selected_source_id()?);
        }
    }
    Ok(())
}
