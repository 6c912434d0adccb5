//! The interactive menu.
//!
//! The inventory is loaded once when the menu starts and only written back by
//! "Save & Exit". Interrupting the menu discards the session's changes.

use std::{
    io::{self, BufRead, IsTerminal, Write},
    str::FromStr,
};

use clap::Parser;
use dialoguer::{Input, Select};
use stockroom::{Inventory, Product, ProductEdit, category, table};
use tracing::instrument;

use super::{
    Session,
    list::{OutputFormat, print_products},
    terminal::Colorize,
};

/// Invalid numeric entries tolerated before a prompt gives up.
const MAX_ATTEMPTS: usize = 3;

/// Command arguments for `inv menu`.
#[derive(Debug, Parser)]
pub struct Menu {}

impl Menu {
    /// Runs the menu on the terminal, or on plain input lines when stdin is
    /// not a terminal.
    #[instrument(level = "debug", skip(session))]
    pub fn run(self, session: &Session) -> anyhow::Result<()> {
        let inventory = session.load()?;
        let stdin = io::stdin();
        if stdin.is_terminal() {
            run_loop(session, inventory, &mut Terminal)
        } else {
            tracing::debug!("stdin is not a terminal, reading plain lines");
            run_loop(session, inventory, &mut Lines::new(stdin.lock()))
        }
    }
}

/// Serves menu actions until "Save & Exit", which writes `inventory` back.
///
/// Any prompt error ends the loop without saving.
fn run_loop(
    session: &Session,
    mut inventory: Inventory,
    prompter: &mut impl Prompter,
) -> anyhow::Result<()> {
    let labels: Vec<&str> = Action::ALL.iter().map(|action| action.label()).collect();

    loop {
        println!();
        println!("{}", "=== Smart Inventory Management ===".heading());
        let Some(action) = prompter
            .choose("Select an option", &labels)?
            .and_then(|choice| Action::ALL.get(choice).copied())
        else {
            println!("{}", "Invalid option. Try again.".warning());
            continue;
        };
        tracing::debug!(?action, "menu selection");

        if action == Action::SaveAndExit {
            session.save(&inventory)?;
            println!("{}", "Saved. Goodbye!".success());
            return Ok(());
        }
        action.perform(&mut inventory, prompter)?;
    }
}

/// Source of answers to menu prompts.
trait Prompter {
    /// Asks `prompt` and returns the trimmed answer, which may be empty.
    fn text(&mut self, prompt: &str) -> anyhow::Result<String>;

    /// Asks for one of `options` and returns its index.
    ///
    /// Options are numbered from 1. An answer that names none of them is
    /// `None`.
    fn choose(&mut self, prompt: &str, options: &[&str]) -> anyhow::Result<Option<usize>> {
        for (number, option) in (1..).zip(options) {
            println!("{number}. {option}");
        }
        let answer = self.text(prompt)?;
        Ok(answer
            .parse::<usize>()
            .ok()
            .and_then(|number| number.checked_sub(1))
            .filter(|&index| index < options.len()))
    }
}

/// Prompts on the controlling terminal.
struct Terminal;

impl Prompter for Terminal {
    fn text(&mut self, prompt: &str) -> anyhow::Result<String> {
        let answer = Input::<String>::new()
            .with_prompt(prompt)
            .allow_empty(true)
            .interact_text()?;
        Ok(answer.trim().to_string())
    }

    fn choose(&mut self, prompt: &str, options: &[&str]) -> anyhow::Result<Option<usize>> {
        let choice = Select::new()
            .with_prompt(prompt)
            .items(options)
            .default(0)
            .interact()?;
        Ok(Some(choice))
    }
}

/// Reads one answer per line, for piped or redirected input.
struct Lines<R> {
    input: R,
}

impl<R: BufRead> Lines<R> {
    const fn new(input: R) -> Self {
        Self { input }
    }
}

impl<R: BufRead> Prompter for Lines<R> {
    fn text(&mut self, prompt: &str) -> anyhow::Result<String> {
        print!("{prompt}: ");
        io::stdout().flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            anyhow::bail!("input ended before Save & Exit; changes discarded");
        }
        Ok(line.trim().to_string())
    }
}

/// Asks for a number, re-prompting up to [`MAX_ATTEMPTS`] times.
///
/// Returns `None` once the attempts are used up.
fn prompt_number<T: FromStr>(
    prompter: &mut impl Prompter,
    prompt: &str,
    hint: &str,
) -> anyhow::Result<Option<T>> {
    for _ in 0..MAX_ATTEMPTS {
        if let Ok(value) = prompter.text(prompt)?.parse() {
            return Ok(Some(value));
        }
        println!("{}", hint.warning());
    }
    println!("{}", "Too many invalid attempts.".warning());
    Ok(None)
}

fn prompt_int(prompter: &mut impl Prompter, prompt: &str) -> anyhow::Result<Option<i64>> {
    prompt_number(prompter, prompt, "Please enter a valid integer.")
}

fn prompt_price(prompter: &mut impl Prompter, prompt: &str) -> anyhow::Result<Option<f64>> {
    prompt_number(prompter, prompt, "Please enter a valid number (e.g., 12.50).")
}

/// An answer to an edit prompt, where an empty answer keeps the old value.
#[derive(Debug, PartialEq)]
enum FieldInput<T> {
    Keep,
    Set(T),
    Invalid,
}

impl<T: FromStr> FieldInput<T> {
    fn parse(text: &str) -> Self {
        if text.is_empty() {
            return Self::Keep;
        }
        text.parse().map_or(Self::Invalid, Self::Set)
    }

    fn into_option(self, warning: &str) -> Option<T> {
        match self {
            Self::Set(value) => Some(value),
            Self::Keep => None,
            Self::Invalid => {
                println!("{}", warning.warning());
                None
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Action {
    List,
    Search,
    Add,
    Remove,
    Edit,
    Sell,
    Restock,
    LowStock,
    Summary,
    ByCategory,
    SaveAndExit,
}

impl Action {
    const ALL: [Self; 11] = [
        Self::List,
        Self::Search,
        Self::Add,
        Self::Remove,
        Self::Edit,
        Self::Sell,
        Self::Restock,
        Self::LowStock,
        Self::Summary,
        Self::ByCategory,
        Self::SaveAndExit,
    ];

    const fn label(self) -> &'static str {
        match self {
            Self::List => "List all products",
            Self::Search => "Search products",
            Self::Add => "Add product",
            Self::Remove => "Remove product",
            Self::Edit => "Edit product",
            Self::Sell => "Sell product",
            Self::Restock => "Restock product",
            Self::LowStock => "Low stock report",
            Self::Summary => "Inventory summary",
            Self::ByCategory => "List by category",
            Self::SaveAndExit => "Save & Exit",
        }
    }

    /// Runs one menu action against the in-memory inventory.
    ///
    /// Saving is not an action of its own here; the menu loop handles it.
    fn perform(
        self,
        inventory: &mut Inventory,
        prompter: &mut impl Prompter,
    ) -> anyhow::Result<()> {
        match self {
            Self::List => {
                let products: Vec<&Product> = inventory.iter().collect();
                print_products(&products, OutputFormat::Table, None)?;
            }
            Self::Search => {
                let term = prompter.text("Enter name or category to search")?;
                let found = inventory.search(&term);
                print_products(&found, OutputFormat::Table, Some("No matches."))?;
            }
            Self::Add => add(inventory, prompter)?,
            Self::Remove => remove(inventory, prompter)?,
            Self::Edit => edit(inventory, prompter)?,
            Self::Sell => sell(inventory, prompter)?,
            Self::Restock => restock(inventory, prompter)?,
            Self::LowStock => {
                let lows = inventory.low_stock();
                if !lows.is_empty() {
                    println!("{}", "=== Low Stock Items ===".heading());
                }
                print_products(
                    &lows,
                    OutputFormat::Table,
                    Some("No products below reorder level."),
                )?;
            }
            Self::Summary => println!("{}", table::render_summary(&inventory.summary())),
            Self::ByCategory => by_category(inventory, prompter)?,
            Self::SaveAndExit => {}
        }
        Ok(())
    }
}

fn prompt_category(prompter: &mut impl Prompter) -> anyhow::Result<Option<i64>> {
    let index = prompt_int(prompter, "Enter category index (0-9)")?;
    match index {
        Some(index) if category::is_valid(index) => Ok(Some(index)),
        _ => {
            println!("{}", "Invalid category index.".warning());
            Ok(None)
        }
    }
}

fn add(inventory: &mut Inventory, prompter: &mut impl Prompter) -> anyhow::Result<()> {
    let id = prompter.text("Enter product ID")?;
    if inventory.find_index_by_id(&id).is_some() {
        println!("{}", "ID already exists.".warning());
        return Ok(());
    }
    let name = prompter.text("Enter product name")?;
    let Some(category) = prompt_category(prompter)? else {
        return Ok(());
    };
    let Some(quantity) = prompt_int(prompter, "Enter quantity (integer)")? else {
        return Ok(());
    };
    let Some(price) = prompt_price(prompter, "Enter price (e.g., 19.99)")? else {
        return Ok(());
    };
    let Some(reorder_level) = prompt_int(prompter, "Enter reorder level (integer)")? else {
        return Ok(());
    };

    inventory.add(
        Product::new(id, name, category)
            .with_quantity(quantity)
            .with_price(price)
            .with_reorder_level(reorder_level),
    );
    println!("{}", "Product added.".success());
    Ok(())
}

fn remove(inventory: &mut Inventory, prompter: &mut impl Prompter) -> anyhow::Result<()> {
    let id = prompter.text("Enter product ID to remove")?;
    if inventory.remove_by_id(&id).is_some() {
        println!("{}", "Product removed.".success());
    } else {
        println!("{}", "Product not found.".warning());
    }
    Ok(())
}

fn edit(inventory: &mut Inventory, prompter: &mut impl Prompter) -> anyhow::Result<()> {
    let id = prompter.text("Enter product ID to edit")?;
    let Some(current) = inventory.find(&id).cloned() else {
        println!("{}", "Product not found.".warning());
        return Ok(());
    };
    println!("Leave a field empty to keep current value.");

    let name = prompter.text(&format!("New name [{}]", current.name()))?;
    let name = (!name.is_empty()).then_some(name);

    let category = FieldInput::parse(
        &prompter.text(&format!("New category index (0-9) [{}]", current.category()))?,
    )
    .into_option("Invalid category index; keeping old.");
    let category = match category {
        Some(index) if !category::is_valid(index) => {
            println!("{}", "Invalid category index; keeping old.".warning());
            None
        }
        other => other,
    };

    let price = FieldInput::parse(&prompter.text(&format!("New price [{:.2}]", current.price()))?)
        .into_option("Invalid price; keeping old.");

    let reorder_level = FieldInput::parse(
        &prompter.text(&format!("New reorder level [{}]", current.reorder_level()))?,
    )
    .into_option("Invalid reorder level; keeping old.");

    inventory.edit(
        &id,
        ProductEdit {
            name,
            category,
            price,
            reorder_level,
        },
    )?;
    println!("{}", "Product updated.".success());
    Ok(())
}

fn sell(inventory: &mut Inventory, prompter: &mut impl Prompter) -> anyhow::Result<()> {
    let id = prompter.text("Enter product ID to sell")?;
    if inventory.find_index_by_id(&id).is_none() {
        println!("{}", "Product not found.".warning());
        return Ok(());
    }
    let Some(amount) = prompt_int(prompter, "Enter quantity to sell")? else {
        return Ok(());
    };
    match inventory.sell(&id, amount) {
        Ok(_) => println!("{}", "Sale successful.".success()),
        Err(e) => {
            tracing::debug!("sale refused: {e}");
            println!("{}", "Not enough stock or invalid amount.".warning());
        }
    }
    Ok(())
}

fn restock(inventory: &mut Inventory, prompter: &mut impl Prompter) -> anyhow::Result<()> {
    let id = prompter.text("Enter product ID to restock")?;
    if inventory.find_index_by_id(&id).is_none() {
        println!("{}", "Product not found.".warning());
        return Ok(());
    }
    let Some(amount) = prompt_int(prompter, "Enter restock amount")? else {
        return Ok(());
    };
    match inventory.restock(&id, amount) {
        Ok(_) => println!("{}", "Restocked successfully.".success()),
        Err(e) => {
            tracing::debug!("restock refused: {e}");
            println!("{}", "Invalid restock amount.".warning());
        }
    }
    Ok(())
}

fn by_category(inventory: &Inventory, prompter: &mut impl Prompter) -> anyhow::Result<()> {
    let Some(index) = prompt_category(prompter)? else {
        return Ok(());
    };
    print_products(
        &inventory.filter_by_category(index),
        OutputFormat::Table,
        Some("No products in selected category."),
    )
}
