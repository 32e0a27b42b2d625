//! Interactive prompts for connection details and table selection.

use crate::theme::dialoguer_theme;
use anyhow::{Context, Result};
use dialoguer::{Input, MultiSelect, Password, Select};
use seedb_core::config::validate_host;
use seedb_core::{DatabaseEngine, DbOptions};

/// Asks for every connection field, in the order a user would fill a form.
pub fn prompt_db_options() -> Result<DbOptions> {
    let theme = dialoguer_theme();

    let engines = DatabaseEngine::IDENTIFIERS;
    let engine_index = Select::with_theme(&theme)
        .with_prompt("Choose your database engine")
        .items(&engines)
        .default(0)
        .interact()
        .context("Failed to read database engine")?;
    let engine: DatabaseEngine = engines[engine_index].parse()?;

    let user: String = Input::with_theme(&theme)
        .with_prompt("Enter your database username")
        .default("root".to_string())
        .validate_with(|input: &String| required(input, "username"))
        .interact_text()
        .context("Failed to read username")?;

    let password = Password::with_theme(&theme)
        .with_prompt("Enter your database password")
        .interact()
        .context("Failed to read password")?;

    let database: String = Input::with_theme(&theme)
        .with_prompt("Enter your database name")
        .validate_with(|input: &String| required(input, "database name"))
        .interact_text()
        .context("Failed to read database name")?;

    let schema: String = Input::with_theme(&theme)
        .with_prompt("Enter your database schema")
        .default("public".to_string())
        .validate_with(|input: &String| required(input, "database schema"))
        .interact_text()
        .context("Failed to read database schema")?;

    let host: String = Input::with_theme(&theme)
        .with_prompt("Enter your database host")
        .default("127.0.0.1".to_string())
        .validate_with(|input: &String| validate_host(input).map_err(|e| e.to_string()))
        .interact_text()
        .context("Failed to read database host")?;

    let port: u16 = Input::with_theme(&theme)
        .with_prompt("Enter your database port")
        .default(engine.default_port())
        .validate_with(|input: &u16| {
            if *input > 0 {
                Ok(())
            } else {
                Err("port must be greater than 0".to_string())
            }
        })
        .interact_text()
        .context("Failed to read database port")?;

    Ok(DbOptions::new(engine, database)
        .with_user(user)
        .with_password(password)
        .with_schema(schema)
        .with_host(host)
        .with_port(port))
}

/// Reads the password without echo.
pub fn prompt_password() -> Result<String> {
    rpassword::prompt_password("Database password: ").context("Failed to read password")
}

/// Lets the user pick tables; every table starts checked.
pub fn select_tables(tables: &[String]) -> Result<Vec<String>> {
    let defaults = vec![true; tables.len()];
    let chosen = MultiSelect::with_theme(&dialoguer_theme())
        .with_prompt("Select tables to populate")
        .items(tables)
        .defaults(&defaults)
        .interact()
        .context("Failed to read table selection")?;

    Ok(chosen
        .into_iter()
        .map(|index| tables[index].clone())
        .collect())
}

fn required(input: &str, field: &str) -> std::result::Result<(), String> {
    if input.trim().is_empty() {
        Err(format!("{} is required", field))
    } else {
        Ok(())
    }
}
