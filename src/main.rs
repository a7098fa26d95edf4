// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::Result;

use inex::commands::{self, Context};
use inex::session::SessionStore;
use inex::{cli, config, logging};

fn main() -> Result<()> {
    let cli = cli::build_cli();
    let matches = cli.get_matches();

    logging::init(matches.get_count("verbose"));

    let settings_path = config::settings_path()?;
    let settings = config::load()?;
    let sessions = SessionStore::at(config::session_path()?);
    let session = sessions.load()?;
    tracing::debug!(api_url = %settings.api_url, logged_in = session.is_some(), "starting");

    let ctx = Context {
        settings,
        settings_path,
        sessions,
        session,
    };

    match matches.subcommand() {
        Some(("signup", sub)) => commands::auth::signup(&ctx, sub)?,
        Some(("login", sub)) => commands::auth::login(&ctx, sub)?,
        Some(("logout", _)) => commands::auth::logout(&ctx)?,
        Some(("whoami", _)) => commands::auth::whoami(&ctx)?,
        Some(("tx", sub)) => commands::transactions::handle(&ctx, sub)?,
        Some(("view", sub)) => commands::view::handle(&ctx, sub)?,
        Some(("export", sub)) => commands::exporter::handle(&ctx, sub)?,
        Some(("config", sub)) => commands::settings::handle(&ctx, sub)?,
        _ => {
            cli::build_cli().print_help()?;
            println!();
        }
    }
    Ok(())
}
