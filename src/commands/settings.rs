// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::Result;

use super::Context;
use crate::config::{validate_api_url, Settings};
use crate::utils::pretty_table;

pub fn handle(ctx: &Context, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("show", _)) => show(ctx),
        Some(("set-url", sub)) => {
            let url = validate_api_url(sub.get_one::<String>("url").unwrap())?;
            // Persist the file's own values, not env overrides.
            let stored = Settings::load_from(&ctx.settings_path)?;
            Settings {
                api_url: url.clone(),
                ..stored
            }
            .save_to(&ctx.settings_path)?;
            println!("API url set to {}", url);
            Ok(())
        }
        _ => Ok(()),
    }
}

fn show(ctx: &Context) -> Result<()> {
    let user = ctx
        .session
        .as_ref()
        .map(|s| s.username.clone())
        .unwrap_or_else(|| "(not logged in)".to_string());
    let rows = vec![
        vec!["api_url".to_string(), ctx.settings.api_url.clone()],
        vec!["timeout_secs".to_string(), ctx.settings.timeout_secs.to_string()],
        vec![
            "settings_file".to_string(),
            ctx.settings_path.display().to_string(),
        ],
        vec![
            "session_file".to_string(),
            ctx.sessions.path().display().to_string(),
        ],
        vec!["user".to_string(), user],
    ];
    println!("{}", pretty_table(&["Key", "Value"], rows));
    Ok(())
}
