//! CLI output formatting utilities

use colored::Colorize;
use comfy_table::{presets::UTF8_FULL, Cell, Color, ContentArrangement, Table};
use indicatif::{ProgressBar, ProgressStyle};
use serde::Serialize;
use std::future::Future;
use std::time::Duration;

use crate::api::{Food, Meal};
use crate::auth::{Role, User};
use crate::cli::OutputFormat;

/// Print a success message
pub fn success(message: &str) {
    println!("{} {}", "✓".green(), message);
}

/// Print an error message
pub fn error(message: &str) {
    eprintln!("{} {}", "✗".red(), message);
}

/// Print a warning message
pub fn warn(message: &str) {
    println!("{} {}", "⚠".yellow(), message);
}

/// Print an info message
pub fn info(message: &str) {
    println!("{} {}", "ℹ".blue(), message);
}

/// Format a role as a colored string
pub fn format_role(role: Role) -> String {
    match role {
        Role::Admin => role.to_string().magenta().to_string(),
        Role::User => role.to_string().cyan().to_string(),
    }
}

/// Run a request behind a spinner; the loading indicator every screen
/// shows while a call is in flight.
pub async fn with_spinner<T>(message: &str, fut: impl Future<Output = T>) -> T {
    let spinner = ProgressBar::new_spinner();
    spinner.set_style(ProgressStyle::default_spinner());
    spinner.set_message(message.to_string());
    spinner.enable_steady_tick(Duration::from_millis(80));

    let result = fut.await;
    spinner.finish_and_clear();
    result
}

/// Print a list in the requested format, falling back to the table renderer
fn print_list<T: Serialize>(
    items: &[T],
    format: OutputFormat,
    table: impl FnOnce(&[T]),
) -> anyhow::Result<()> {
    match format {
        OutputFormat::Table => table(items),
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(items)?),
        OutputFormat::Yaml => print!("{}", serde_yaml::to_string(items)?),
    }
    Ok(())
}

/// Print a table of foods with a calorie total
pub fn print_food_table(foods: &[Food]) {
    if foods.is_empty() {
        info("No foods yet. Add one with 'foodtrack foods add --name <name> --calories <kcal>'");
        return;
    }

    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec![
            Cell::new("Id").fg(Color::Cyan),
            Cell::new("Name").fg(Color::Cyan),
            Cell::new("Calories").fg(Color::Cyan),
        ]);

    for food in foods {
        table.add_row(vec![
            Cell::new(food.id),
            Cell::new(&food.name),
            Cell::new(food.calories),
        ]);
    }

    let total: i64 = foods.iter().map(|f| f.calories).sum();
    table.add_row(vec![
        Cell::new(""),
        Cell::new("Total").fg(Color::Yellow),
        Cell::new(total).fg(Color::Yellow),
    ]);

    println!("{table}");
}

pub fn print_food_list(foods: &[Food], format: OutputFormat) -> anyhow::Result<()> {
    print_list(foods, format, print_food_table)
}

/// Print a table of meals with calorie and protein totals
pub fn print_meal_table(meals: &[Meal]) {
    if meals.is_empty() {
        info("No meals tracked yet. Start logging with 'foodtrack meals add'");
        return;
    }

    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec![
            Cell::new("Id").fg(Color::Cyan),
            Cell::new("Name").fg(Color::Cyan),
            Cell::new("Date").fg(Color::Cyan),
            Cell::new("Calories").fg(Color::Cyan),
            Cell::new("Protein (g)").fg(Color::Cyan),
        ]);

    for meal in meals {
        let date = meal
            .date
            .map(|d| d.format("%Y-%m-%d").to_string())
            .unwrap_or_else(|| "-".to_string());

        table.add_row(vec![
            Cell::new(meal.id),
            Cell::new(&meal.name),
            Cell::new(date),
            Cell::new(meal.calories),
            Cell::new(format!("{:.1}", meal.protein)),
        ]);
    }

    let calories: i64 = meals.iter().map(|m| m.calories).sum();
    let protein: f64 = meals.iter().map(|m| m.protein).sum();
    table.add_row(vec![
        Cell::new(""),
        Cell::new("Total").fg(Color::Yellow),
        Cell::new(""),
        Cell::new(calories).fg(Color::Yellow),
        Cell::new(format!("{:.1}", protein)).fg(Color::Yellow),
    ]);

    println!("{table}");
}

pub fn print_meal_list(meals: &[Meal], format: OutputFormat) -> anyhow::Result<()> {
    print_list(meals, format, print_meal_table)
}

/// Print a table of user accounts
pub fn print_user_table(users: &[User]) {
    if users.is_empty() {
        info("No accounts found");
        return;
    }

    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec![
            Cell::new("Id").fg(Color::Cyan),
            Cell::new("Name").fg(Color::Cyan),
            Cell::new("Email").fg(Color::Cyan),
            Cell::new("Role").fg(Color::Cyan),
        ]);

    for user in users {
        let role_color = match user.role {
            Role::Admin => Color::Magenta,
            Role::User => Color::Cyan,
        };
        table.add_row(vec![
            Cell::new(user.id),
            Cell::new(&user.name),
            Cell::new(&user.email),
            Cell::new(user.role).fg(role_color),
        ]);
    }

    println!("{table}");
}

pub fn print_user_list(users: &[User], format: OutputFormat) -> anyhow::Result<()> {
    print_list(users, format, print_user_table)
}

/// Print a single profile in detail
pub fn print_user_detail(user: &User) {
    println!("{}", "Profile".bold().underline());
    println!();
    println!("  {} {}", "Id:".bold(), user.id);
    println!("  {} {}", "Name:".bold(), user.name);
    println!("  {} {}", "Email:".bold(), user.email);
    println!("  {} {}", "Role:".bold(), format_role(user.role));
}

/// Print the admin dashboard stat cards
pub fn print_admin_stats(users: usize, foods: usize, meals: usize) {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_header(vec![
            Cell::new("Users").fg(Color::Cyan),
            Cell::new("Foods").fg(Color::Green),
            Cell::new("Meals").fg(Color::Magenta),
        ])
        .add_row(vec![Cell::new(users), Cell::new(foods), Cell::new(meals)]);

    println!("{table}");
}

/// Print a backend-defined JSON document under a heading
pub fn print_document(title: &str, value: &serde_json::Value) -> anyhow::Result<()> {
    println!("{}", title.bold().underline());
    println!();
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// Confirm an action with the user
pub fn confirm(message: &str) -> bool {
    use std::io::{self, Write};

    print!("{} [y/N] ", message);
    let _ = io::stdout().flush();

    let mut input = String::new();
    if io::stdin().read_line(&mut input).is_err() {
        return false;
    }

    matches!(input.trim().to_lowercase().as_str(), "y" | "yes")
}
