//! `list` command: print the catalog, optionally filtered.

use fontbrowser::catalog::Catalog;

use crate::error::CliError;

pub fn run(query: Option<&str>) -> Result<(), CliError> {
    let catalog = Catalog::builtin();
    let names = catalog.filter(query.unwrap_or(""));

    for name in &names {
        println!("{}", name);
    }
    println!();
    println!("{}", summary(names.len(), catalog.len(), query));

    Ok(())
}

fn summary(shown: usize, total: usize, query: Option<&str>) -> String {
    match query {
        Some(q) if !q.is_empty() => format!("{} of {} fonts match '{}'", shown, total, q),
        _ => format!("{} fonts available", total),
    }
}
