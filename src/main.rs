// Carbon Calc - Command Line Tool
// Runs the three calculation operations against a local SQLite store

use anyhow::{anyhow, Context, Result};
use std::env;
use std::str::FromStr;
use std::sync::Arc;

use carbon_calc::{
    CarbonCalculationService, SqliteStore, StartCalcRequest, TransportationEntry,
    TransportationType, UpdateCalcInfoRequest,
};

const DEFAULT_DB_PATH: &str = "carbon_calc.db";

fn main() -> Result<()> {
    let args: Vec<String> = env::args().collect();

    if args.len() < 2 {
        print_usage();
        return Ok(());
    }

    let db_path = env::var("CARBON_CALC_DB").unwrap_or_else(|_| DEFAULT_DB_PATH.to_string());
    let store = SqliteStore::open(&db_path)
        .map_err(|e| anyhow!("Failed to open store at {}: {}", db_path, e))?;
    let service = CarbonCalculationService::new(Arc::new(store));

    match args[1].as_str() {
        "start" => run_start(&service, &args[2..]),
        "update" => run_update(&service, &args[2..]),
        "result" => run_result(&service, &args[2..]),
        other => {
            eprintln!("Unknown command: {}", other);
            print_usage();
            std::process::exit(1);
        }
    }
}

fn print_usage() {
    println!("🌱 Carbon Calc - personal carbon emission estimator");
    println!();
    println!("Usage:");
    println!("  carbon-calc start <name> <email> <UF> <phone>");
    println!("  carbon-calc update <id> <energy-kwh> <waste-kg> <recycle-pct> [MODE=km ...]");
    println!("  carbon-calc result <id>");
    println!();
    println!("Transport modes: CAR, MOTORCYCLE, PUBLIC_TRANSPORT, BICYCLE");
    println!("Store path: $CARBON_CALC_DB (default: {})", DEFAULT_DB_PATH);
}

fn run_start(service: &CarbonCalculationService, args: &[String]) -> Result<()> {
    if args.len() != 4 {
        return Err(anyhow!("start expects: <name> <email> <UF> <phone>"));
    }

    let request = StartCalcRequest {
        name: Some(args[0].clone()),
        email: Some(args[1].clone()),
        uf: Some(args[2].clone()),
        phone_number: Some(args[3].clone()),
    };

    let id = service.start_calculation(&request)?;

    println!("✓ Calculation started");
    println!("  id: {}", id);

    Ok(())
}

fn run_update(service: &CarbonCalculationService, args: &[String]) -> Result<()> {
    if args.len() < 4 {
        return Err(anyhow!(
            "update expects: <id> <energy-kwh> <waste-kg> <recycle-pct> [MODE=km ...]"
        ));
    }

    let id = args[0].clone();
    let energy_consumption: f64 = args[1].parse().context("energy-kwh must be a number")?;
    let solid_waste_total: f64 = args[2].parse().context("waste-kg must be a number")?;
    let recycle_percentage: f64 = args[3].parse().context("recycle-pct must be a number")?;

    let mut transportation = Vec::new();
    for arg in &args[4..] {
        transportation.push(parse_transportation(arg)?);
    }

    let request = UpdateCalcInfoRequest {
        id,
        energy_consumption,
        solid_waste_total,
        recycle_percentage,
        transportation,
    };

    service.update_info(&request)?;
    println!("✓ Calculation updated");

    Ok(())
}

fn run_result(service: &CarbonCalculationService, args: &[String]) -> Result<()> {
    if args.len() != 1 {
        return Err(anyhow!("result expects: <id>"));
    }

    let result = service.get_result(&args[0])?;

    match result.total {
        Some(_) => {
            println!("🌱 Carbon emission estimate");
            println!("  energy:         {:>10.2}", result.energy.unwrap_or(0.0));
            println!(
                "  transportation: {:>10.2}",
                result.transportation.unwrap_or(0.0)
            );
            println!(
                "  solid waste:    {:>10.2}",
                result.solid_waste.unwrap_or(0.0)
            );
            println!("  total:          {:>10.2}", result.total.unwrap_or(0.0));
        }
        None => {
            println!("Calculation exists but has not been computed yet.");
            println!("Run: carbon-calc update <id> ...");
        }
    }

    Ok(())
}

/// Parse a "MODE=km" CLI argument into a transportation entry.
fn parse_transportation(arg: &str) -> Result<TransportationEntry> {
    let (mode, distance) = arg
        .split_once('=')
        .ok_or_else(|| anyhow!("Expected MODE=km, got: {}", arg))?;

    let transportation_type =
        TransportationType::from_str(mode).map_err(|e| anyhow!(e))?;
    let monthly_distance: f64 = distance
        .parse()
        .with_context(|| format!("Bad distance in {}", arg))?;

    Ok(TransportationEntry::new(transportation_type, monthly_distance))
}
