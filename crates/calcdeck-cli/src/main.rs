//! Calcdeck CLI - define, store, and evaluate named formulas

use anyhow::{bail, Context, Result};
use calcdeck::prelude::*;
use clap::{Parser, Subcommand};
use std::collections::{BTreeMap, HashMap};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "calcdeck")]
#[command(author, version, about = "Define, store, and evaluate named formulas")]
struct Cli {
    /// Path of the calculator document
    #[arg(long, global = true, default_value = "calculators.json")]
    file: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List stored calculators, newest first
    #[command(alias = "ls")]
    List,

    /// Show a single calculator
    Show {
        /// Calculator id
        id: Uuid,
    },

    /// Create a calculator
    New {
        /// Display name
        #[arg(short, long)]
        title: String,

        /// Formula, e.g. "3.14159*r^2"
        #[arg(short, long)]
        formula: String,

        /// Optional description
        #[arg(short, long)]
        description: Option<String>,

        /// Variable label as name=text, e.g. -l r=Radius (repeatable)
        #[arg(short = 'l', long = "label")]
        labels: Vec<String>,
    },

    /// Update an existing calculator
    Edit {
        /// Calculator id
        id: Uuid,

        /// Display name
        #[arg(short, long)]
        title: String,

        /// Formula
        #[arg(short, long)]
        formula: String,

        /// New description (unchanged if omitted)
        #[arg(short, long)]
        description: Option<String>,

        /// Replacement variable labels (unchanged if omitted)
        #[arg(short = 'l', long = "label")]
        labels: Vec<String>,
    },

    /// Delete a calculator
    #[command(alias = "rm")]
    Delete {
        /// Calculator id
        id: Uuid,
    },

    /// Evaluate a formula or a stored calculator
    Eval {
        /// Ad-hoc formula (alternative to --id)
        #[arg(short, long, conflicts_with = "id")]
        formula: Option<String>,

        /// Stored calculator id
        #[arg(long)]
        id: Option<Uuid>,

        /// Variable binding as name=value, e.g. -s r=5 (repeatable)
        #[arg(short = 's', long = "set")]
        bindings: Vec<String>,
    },

    /// Print the free variables of a formula
    Vars {
        /// Formula to inspect
        formula: String,
    },
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();
    let store = CalculatorStore::open(StoreConfig::new(&cli.file));

    match cli.command {
        Commands::List => list(&store),
        Commands::Show { id } => show(&store, id),
        Commands::New {
            title,
            formula,
            description,
            labels,
        } => create(&store, title, formula, description, &labels),
        Commands::Edit {
            id,
            title,
            formula,
            description,
            labels,
        } => edit(&store, id, title, formula, description, &labels),
        Commands::Delete { id } => delete(&store, id),
        Commands::Eval {
            formula,
            id,
            bindings,
        } => eval(&store, formula, id, &bindings),
        Commands::Vars { formula } => vars(&formula),
    }
}

fn list(store: &CalculatorStore) -> Result<()> {
    let mut records = store.list().context("reading calculator document")?;
    // Newest first; display order only
    records.sort_by(|a, b| b.created_at.cmp(&a.created_at));

    if records.is_empty() {
        println!("No calculators stored.");
        return Ok(());
    }

    for record in records {
        let variables: String = record.variables.iter().collect();
        println!(
            "{}  {}  [{}]  {}",
            record.id,
            record.created_at.format("%Y-%m-%d"),
            variables,
            record.title
        );
    }
    Ok(())
}

fn show(store: &CalculatorStore, id: Uuid) -> Result<()> {
    let Some(record) = store.get(id)? else {
        bail!("no calculator with id {id}");
    };

    println!("Title:    {}", record.title);
    if let Some(description) = &record.description {
        println!("About:    {description}");
    }
    println!("Formula:  {}", record.formula);
    for variable in &record.variables {
        println!("  {variable} = {}", record.label_for(*variable));
    }
    println!("Created:  {}", record.created_at.to_rfc3339());
    println!("Updated:  {}", record.updated_at.to_rfc3339());
    Ok(())
}

fn create(
    store: &CalculatorStore,
    title: String,
    formula: String,
    description: Option<String>,
    labels: &[String],
) -> Result<()> {
    let mut draft = CalculatorDraft::new(title, formula);
    draft.description = description;
    draft.variable_labels = parse_labels(labels)?;

    let record = store.create(draft)?;
    println!("Created {} ({})", record.id, record.title);
    Ok(())
}

fn edit(
    store: &CalculatorStore,
    id: Uuid,
    title: String,
    formula: String,
    description: Option<String>,
    labels: &[String],
) -> Result<()> {
    let mut draft = CalculatorDraft::new(title, formula);
    draft.description = description;
    draft.variable_labels = parse_labels(labels)?;

    let Some(record) = store.update(id, draft)? else {
        bail!("no calculator with id {id}");
    };
    println!("Updated {} ({})", record.id, record.title);
    Ok(())
}

fn delete(store: &CalculatorStore, id: Uuid) -> Result<()> {
    if store.delete(id)? {
        println!("Deleted {id}");
        Ok(())
    } else {
        bail!("no calculator with id {id}");
    }
}

fn eval(
    store: &CalculatorStore,
    formula: Option<String>,
    id: Option<Uuid>,
    bindings: &[String],
) -> Result<()> {
    let formula = match (formula, id) {
        (Some(formula), None) => formula,
        (None, Some(id)) => {
            let Some(record) = store.get(id)? else {
                bail!("no calculator with id {id}");
            };
            record.formula
        }
        _ => bail!("provide either --formula or --id"),
    };

    let bindings = parse_bindings(bindings)?;
    let result = evaluate(&formula, &bindings)?;
    println!("{result}");
    Ok(())
}

fn vars(formula: &str) -> Result<()> {
    let variables = try_extract_variables(formula)?;
    for variable in variables {
        println!("{variable}");
    }
    Ok(())
}

/// Parse repeated `name=value` bindings into an evaluation map
fn parse_bindings(pairs: &[String]) -> Result<HashMap<char, f64>> {
    let mut bindings = HashMap::new();
    for pair in pairs {
        let (name, value) = split_pair(pair)?;
        let value: f64 = value
            .parse()
            .with_context(|| format!("binding '{pair}': value is not a number"))?;
        bindings.insert(name, value);
    }
    Ok(bindings)
}

/// Parse repeated `name=label` pairs; empty input means "not supplied"
fn parse_labels(pairs: &[String]) -> Result<Option<BTreeMap<char, String>>> {
    if pairs.is_empty() {
        return Ok(None);
    }
    let mut labels = BTreeMap::new();
    for pair in pairs {
        let (name, label) = split_pair(pair)?;
        labels.insert(name, label.to_string());
    }
    Ok(Some(labels))
}

/// Split `x=rest`, requiring a single-lowercase-letter variable name
fn split_pair(pair: &str) -> Result<(char, &str)> {
    let Some((name, rest)) = pair.split_once('=') else {
        bail!("'{pair}' is not of the form name=value");
    };
    let mut chars = name.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) if c.is_ascii_lowercase() => Ok((c, rest)),
        _ => bail!("'{name}' is not a variable name (single lowercase letter)"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_bindings() {
        let bindings = parse_bindings(&["r=5".into(), "x=2.5".into()]).unwrap();
        assert_eq!(bindings.get(&'r'), Some(&5.0));
        assert_eq!(bindings.get(&'x'), Some(&2.5));
    }

    #[test]
    fn test_parse_bindings_rejects_bad_input() {
        assert!(parse_bindings(&["r".into()]).is_err());
        assert!(parse_bindings(&["rr=5".into()]).is_err());
        assert!(parse_bindings(&["r=five".into()]).is_err());
    }

    #[test]
    fn test_parse_labels_absent_means_unsupplied() {
        assert_eq!(parse_labels(&[]).unwrap(), None);
        let labels = parse_labels(&["r=Radius".into()]).unwrap().unwrap();
        assert_eq!(labels.get(&'r').map(String::as_str), Some("Radius"));
    }
}
