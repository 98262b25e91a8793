// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::{Context, Result};

use crate::db::Store;
use crate::models::{Category, CategoryPatch, NewCategory};
use crate::utils::{opt_enum, owner, pretty_table, print_json_if_asked};

pub fn handle(store: &Store, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => {
            let new = NewCategory {
                name: sub.get_one::<String>("name").cloned().unwrap_or_default(),
                r#type: opt_enum(sub, "type")?.context("--type")?,
                icon: sub.get_one::<String>("icon").cloned(),
                color: sub.get_one::<String>("color").cloned(),
            };
            let c = store.create_category(owner(sub)?, new)?;
            if !print_json_if_asked(sub, &c)? {
                println!("Added {} category {} '{}'", c.r#type, c.id, c.name);
            }
        }
        Some(("list", sub)) => {
            let cats = store.list_categories(owner(sub)?, opt_enum(sub, "type")?)?;
            print_categories(sub, &cats)?;
        }
        Some(("edit", sub)) => {
            let id = *sub.get_one::<i64>("id").context("category id")?;
            let patch = CategoryPatch {
                name: sub.get_one::<String>("name").cloned(),
                r#type: opt_enum(sub, "type")?,
                icon: sub.get_one::<String>("icon").cloned(),
                color: sub.get_one::<String>("color").cloned(),
            };
            let c = store.update_category(owner(sub)?, id, patch)?;
            print_categories(sub, std::slice::from_ref(&c))?;
        }
        Some(("rm", sub)) => {
            let id = *sub.get_one::<i64>("id").context("category id")?;
            store.delete_category(owner(sub)?, id)?;
            println!("Deleted category {}", id);
        }
        _ => {}
    }
    Ok(())
}

fn print_categories(sub: &clap::ArgMatches, cats: &[Category]) -> Result<()> {
    if !print_json_if_asked(sub, &cats)? {
        let rows = cats
            .iter()
            .map(|c| {
                vec![
                    c.id.to_string(),
                    format!("{} {}", c.icon, c.name),
                    c.r#type.to_string(),
                    c.color.clone(),
                ]
            })
            .collect();
        println!("{}", pretty_table(&["ID", "Category", "Type", "Color"], rows));
    }
    Ok(())
}
