use anyhow::{Context, Result};
use oom_units::{registry, Assumption, BaseType, Quantity, UnitExpr};
use serde_json::{json, Value as JsonValue};

use crate::config::{Command, OutputFormat};

pub fn run(command: Command, output: OutputFormat) -> Result<()> {
    match command {
        Command::Convert {
            quantity,
            target,
            assume,
        } => convert(&quantity, &target, assume, output),
        Command::Cgs { quantity } => cgs(&quantity, output),
        Command::Reduce { unit } => reduce(&unit, output),
        Command::BaseType { unit } => base_type(&unit, output),
        Command::Units => units(output),
        Command::Constants { cgs } => constants(cgs, output),
    }
}

fn parse_quantity(text: &str) -> Result<Quantity> {
    text.parse()
        .with_context(|| format!("Failed to parse quantity '{text}'"))
}

fn convert(text: &str, target: &str, assume: Option<Assumption>, output: OutputFormat) -> Result<()> {
    let mut quantity = parse_quantity(text)?;
    if let Some(assumption) = assume {
        quantity = quantity.with_assumption(assumption);
    }
    let converted = quantity
        .to(target)
        .with_context(|| format!("Failed to convert '{quantity}' to '{target}'"))?;
    tracing::info!(from = %quantity, to = %converted, "converted");
    print_quantity(&converted, output)
}

fn cgs(text: &str, output: OutputFormat) -> Result<()> {
    let quantity = parse_quantity(text)?;
    let converted = quantity
        .to_cgs()
        .with_context(|| format!("Failed to express '{quantity}' in cgs units"))?;
    print_quantity(&converted, output)
}

fn reduce(unit: &str, output: OutputFormat) -> Result<()> {
    let reduced = registry()
        .reduce(unit)
        .with_context(|| format!("Failed to reduce '{unit}'"))?;
    match output {
        OutputFormat::Text => println!("{reduced}"),
        OutputFormat::Json => print_json(&reduce_json(&reduced))?,
    }
    Ok(())
}

fn reduce_json(reduced: &UnitExpr) -> JsonValue {
    json!({
        "coefficient": reduced.coefficient,
        "unit": reduced.exponents.to_string(),
    })
}

fn base_type(unit: &str, output: OutputFormat) -> Result<()> {
    let base_type = registry()
        .base_type(unit)
        .with_context(|| format!("Failed to classify '{unit}'"))?;
    match output {
        OutputFormat::Text => println!("{base_type}"),
        OutputFormat::Json => print_json(&base_type_json(&base_type))?,
    }
    Ok(())
}

/// Dimension name → exponent rendered as `"n"` or `"n/d"`.
fn base_type_json(base_type: &BaseType) -> JsonValue {
    let dimensions: serde_json::Map<String, JsonValue> = base_type
        .iter()
        .map(|(dimension, exponent)| (dimension.to_string(), json!(exponent.to_string())))
        .collect();
    JsonValue::Object(dimensions)
}

fn units(output: OutputFormat) -> Result<()> {
    let registry = registry();
    let symbols: Vec<&str> = registry.unit_symbols().collect();
    let prefixes: Vec<(char, f64)> = registry.prefixes().collect();

    match output {
        OutputFormat::Text => {
            println!("units: {}", symbols.join(" "));
            let rendered: Vec<String> = prefixes
                .iter()
                .map(|(prefix, factor)| format!("{prefix}={factor:e}"))
                .collect();
            println!("prefixes: {}", rendered.join(" "));
        }
        OutputFormat::Json => {
            let prefixes: serde_json::Map<String, JsonValue> = prefixes
                .into_iter()
                .map(|(prefix, factor)| (prefix.to_string(), json!(factor)))
                .collect();
            print_json(&json!({ "units": symbols, "prefixes": prefixes }))?;
        }
    }
    Ok(())
}

fn constants(cgs: bool, output: OutputFormat) -> Result<()> {
    let registry = registry();
    let constants = match cgs {
        true => registry.constants_cgs(),
        false => registry.constants(),
    };
    let constants = constants.context("Failed to load constants")?;

    match output {
        OutputFormat::Text => {
            let width = constants.iter().map(|(name, _)| name.len()).max().unwrap_or(0);
            for (name, quantity) in &constants {
                println!("{name:<width$}  {quantity}");
            }
        }
        OutputFormat::Json => {
            let entries: serde_json::Map<String, JsonValue> = constants
                .into_iter()
                .map(|(name, quantity)| Ok((name.to_string(), serde_json::to_value(quantity)?)))
                .collect::<Result<_>>()?;
            print_json(&JsonValue::Object(entries))?;
        }
    }
    Ok(())
}

fn print_quantity(quantity: &Quantity, output: OutputFormat) -> Result<()> {
    match output {
        OutputFormat::Text => println!("{quantity}"),
        OutputFormat::Json => print_json(&serde_json::to_value(quantity)?)?,
    }
    Ok(())
}

fn print_json(value: &JsonValue) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
