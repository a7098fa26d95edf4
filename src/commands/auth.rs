// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::{bail, Result};
use once_cell::sync::Lazy;
use regex::Regex;
use tracing::info;

use super::Context;
use crate::error::ApiError;
use crate::session::Session;

static EMAIL: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[A-Za-z0-9._%+\-]+@[A-Za-z0-9\-]+(\.[A-Za-z0-9\-]+)*$").unwrap()
});

pub const MIN_USERNAME_LEN: usize = 3;
pub const MIN_PASSWORD_LEN: usize = 6;

pub fn validate_signup(username: &str, email: &str, password: &str, confirm: &str) -> Result<()> {
    if username.trim().chars().count() < MIN_USERNAME_LEN {
        bail!("Username must be at least {} characters", MIN_USERNAME_LEN);
    }
    if !EMAIL.is_match(email.trim()) {
        bail!("'{}' is not a valid email address", email);
    }
    if password.chars().count() < MIN_PASSWORD_LEN {
        bail!("Password must be at least {} characters", MIN_PASSWORD_LEN);
    }
    if password != confirm {
        bail!("Passwords do not match");
    }
    Ok(())
}

pub fn signup(ctx: &Context, sub: &clap::ArgMatches) -> Result<()> {
    let username = sub.get_one::<String>("username").unwrap();
    let email = sub.get_one::<String>("email").unwrap();
    let password = sub.get_one::<String>("password").unwrap();
    let confirm = sub.get_one::<String>("confirm").unwrap();
    validate_signup(username, email, password, confirm)?;

    let res = ctx
        .client()?
        .signup(username.trim(), email.trim(), password)?;
    if !res.success {
        let msg = if res.message.is_empty() {
            "Registration failed. Please try again.".to_string()
        } else {
            res.message
        };
        bail!(msg);
    }
    println!("Registration successful! Please login with your credentials.");
    Ok(())
}

pub fn login(ctx: &Context, sub: &clap::ArgMatches) -> Result<()> {
    let username = sub.get_one::<String>("username").unwrap();
    let password = sub.get_one::<String>("password").unwrap();

    let res = match ctx.client()?.login(username.trim(), password) {
        Ok(res) => res,
        Err(ApiError::Unauthorized) => bail!("Invalid username or password"),
        Err(err) => return Err(err.into()),
    };
    let session = session_from_login(username.trim(), res.username, res.token, &res.message)?;
    ctx.sessions.save(&session)?;
    info!(user = %session.username, "logged in");
    println!("Logged in as {}", session.username);
    Ok(())
}

/// Only a response carrying a token opens a session.
pub fn session_from_login(
    requested: &str,
    username: String,
    token: String,
    message: &str,
) -> Result<Session> {
    if token.trim().is_empty() {
        if message.is_empty() {
            bail!("Login failed: no token returned");
        }
        bail!("Login failed: {}", message);
    }
    let username = if username.trim().is_empty() {
        requested.to_string()
    } else {
        username
    };
    Ok(Session { username, token })
}

pub fn logout(ctx: &Context) -> Result<()> {
    ctx.sessions.clear()?;
    match &ctx.session {
        Some(s) => println!("Logged out {}", s.username),
        None => println!("Not logged in"),
    }
    Ok(())
}

pub fn whoami(ctx: &Context) -> Result<()> {
    match &ctx.session {
        Some(s) => println!("{}", s.username),
        None => println!("Not logged in"),
    }
    Ok(())
}
