//! Record command handlers

use anyhow::{bail, Result};

use roster_core::{SortKey, StudentRecord};

use super::{explain, position, FileRoster};
use crate::output::{Output, Row};
use crate::prompt::{confirm, is_interactive, prompt_with_default};

/// Add a new record
pub fn add(
    roster: &mut FileRoster,
    id: String,
    name: String,
    email: String,
    output: &Output,
) -> Result<()> {
    let record = StudentRecord::new(id, name, email);
    roster.submit(record, None).map_err(explain)?;

    let index = roster.len() - 1;
    let record = roster.get(index).map_err(explain)?;
    output.success(&format!("Added {} ({})", record.name, record.id));
    output.print_record(&Row::at(index, record));
    Ok(())
}

/// Replace the record at row `number`
pub fn update(
    roster: &mut FileRoster,
    number: usize,
    id: String,
    name: String,
    email: String,
    output: &Output,
) -> Result<()> {
    let index = position(number)?;
    let record = StudentRecord::new(id, name, email);
    roster.submit(record, Some(index)).map_err(explain)?;

    output.success(&format!("Updated record {}", number));
    output.print_record(&Row::at(index, roster.get(index).map_err(explain)?));
    Ok(())
}

/// Edit the record at row `number`, prompting for each field
pub fn edit(roster: &mut FileRoster, number: usize, output: &Output) -> Result<()> {
    let index = position(number)?;
    let current = roster.get(index).map_err(explain)?.clone();

    if !is_interactive() {
        bail!("`edit` needs an interactive terminal. Use `roster update` instead.");
    }

    println!("Editing record {}", number);
    println!("Press Enter to keep current value, or type new value.\n");

    let mut edited = current.clone();
    if let Some(id) = prompt_with_default("ID", &current.id)? {
        edited.id = id;
    }
    if let Some(name) = prompt_with_default("Name", &current.name)? {
        edited.name = name;
    }
    if let Some(email) = prompt_with_default("Email", &current.email)? {
        edited.email = email;
    }

    if edited == current {
        output.message("No changes.");
        return Ok(());
    }

    roster.update(index, edited).map_err(explain)?;

    output.success(&format!("Updated record {}", number));
    output.print_record(&Row::at(index, roster.get(index).map_err(explain)?));
    Ok(())
}

/// Delete the record at row `number`
pub fn delete(roster: &mut FileRoster, number: usize, yes: bool, output: &Output) -> Result<()> {
    let index = position(number)?;
    let record = roster.get(index).map_err(explain)?;

    if !yes && output.should_prompt() {
        println!("Delete record {}: {} - {}", number, record.id, record.name);
        if !confirm("Remove this record from the roster?")? {
            println!("Cancelled.");
            return Ok(());
        }
    }

    let removed = roster.delete(index).map_err(explain)?;
    output.success(&format!("Deleted {} ({})", removed.name, removed.id));
    Ok(())
}

/// List all records
pub fn list(roster: &FileRoster, output: &Output) -> Result<()> {
    let rows: Vec<Row<'_>> = roster
        .records()
        .iter()
        .enumerate()
        .map(|(i, r)| Row::at(i, r))
        .collect();
    output.print_records(&rows);
    Ok(())
}

/// Show a single record
pub fn show(roster: &FileRoster, number: usize, output: &Output) -> Result<()> {
    let index = position(number)?;
    let record = roster.get(index).map_err(explain)?;
    output.print_record(&Row::at(index, record));
    Ok(())
}

/// Sort the roster and print it in its new order
pub fn sort(roster: &mut FileRoster, key: SortKey, output: &Output) -> Result<()> {
    roster.sort(key).map_err(explain)?;
    output.success(&format!("Sorted by {}", key));
    list(roster, output)
}

/// Search records
pub fn search(roster: &FileRoster, query: String, output: &Output) -> Result<()> {
    let rows: Vec<Row<'_>> = roster
        .search_indexed(&query)
        .into_iter()
        .map(|(i, r)| Row::at(i, r))
        .collect();
    output.print_records(&rows);
    Ok(())
}
