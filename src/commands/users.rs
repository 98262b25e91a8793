// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::{Context, Result};

use crate::db::Store;
use crate::models::{NewUser, User, UserPatch};
use crate::utils::{owner, pretty_table, print_json_if_asked};

pub fn handle(store: &Store, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("register", sub)) => register(store, sub)?,
        Some(("login", sub)) => login(store, sub)?,
        Some(("show", sub)) => {
            let user = store.get_user(owner(sub)?)?;
            print_user(sub, &user)?;
        }
        Some(("update", sub)) => update(store, sub)?,
        Some(("password", sub)) => {
            let id = owner(sub)?;
            let current = sub.get_one::<String>("current").context("--current")?;
            let new = sub.get_one::<String>("new").context("--new")?;
            store.change_password(id, current, new)?;
            println!("Password changed");
        }
        _ => {}
    }
    Ok(())
}

fn register(store: &Store, sub: &clap::ArgMatches) -> Result<()> {
    let new = NewUser {
        name: sub.get_one::<String>("name").cloned().unwrap_or_default(),
        email: sub.get_one::<String>("email").cloned().unwrap_or_default(),
        password: sub.get_one::<String>("password").cloned().unwrap_or_default(),
    };
    let user = store.register_user(new)?;
    if !print_json_if_asked(sub, &user)? {
        println!(
            "Registered {} <{}> as user {} (pass --user {} from now on)",
            user.name, user.email, user.id, user.id
        );
    }
    Ok(())
}

fn login(store: &Store, sub: &clap::ArgMatches) -> Result<()> {
    let email = sub.get_one::<String>("email").context("--email")?;
    let password = sub.get_one::<String>("password").context("--password")?;
    let user = store.authenticate(email, password)?;
    if !print_json_if_asked(sub, &user)? {
        println!("Welcome back, {} (user {})", user.name, user.id);
    }
    Ok(())
}

fn update(store: &Store, sub: &clap::ArgMatches) -> Result<()> {
    let profile_photo = if sub.get_flag("clear-photo") {
        Some(None)
    } else {
        sub.get_one::<String>("photo").map(|p| Some(p.clone()))
    };
    let patch = UserPatch {
        name: sub.get_one::<String>("name").cloned(),
        email: sub.get_one::<String>("email").cloned(),
        profile_photo,
    };
    let user = store.update_profile(owner(sub)?, patch)?;
    print_user(sub, &user)
}

fn print_user(sub: &clap::ArgMatches, user: &User) -> Result<()> {
    if !print_json_if_asked(sub, user)? {
        let rows = vec![vec![
            user.id.to_string(),
            user.name.clone(),
            user.email.clone(),
            user.profile_photo.clone().unwrap_or_default(),
            user.created_at.clone(),
        ]];
        println!(
            "{}",
            pretty_table(&["ID", "Name", "Email", "Photo", "Joined"], rows)
        );
    }
    Ok(())
}
