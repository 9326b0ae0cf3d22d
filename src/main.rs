//! Command-line key generator for the Aura plugin.
//!
//! Three modes, mirroring the issuing workflow:
//!
//! ```bash
//! aura-keygen --machine AB12CD34 --customer 0001   # single key
//! aura-keygen --machine AB12CD34 --batch 10        # sequential batch
//! aura-keygen --validate AURA-... --machine AB12CD34
//! aura-keygen                                      # interactive shell
//! ```

use std::io::{self, BufRead, Write};
use std::process::ExitCode;

use clap::Parser;
use log::LevelFilter;

use aura_license::config::get_config;
use aura_license::errors::LicenseResult;
use aura_license::hardware::derive_machine_id;
use aura_license::license_key::{generate_key, validate_key};

#[derive(Parser, Debug)]
#[command(
    name = "aura-keygen",
    version,
    about = "Aura license key generator (machine-bound, offline)"
)]
struct Cli {
    /// 8-character machine id shown in the plugin's license dialog
    #[arg(short, long)]
    machine: Option<String>,

    /// 4-character customer number (default from config)
    #[arg(short, long)]
    customer: Option<String>,

    /// Generate this many keys with sequential customer numbers
    #[arg(short, long)]
    batch: Option<u32>,

    /// First customer number in batch mode (default from config)
    #[arg(short, long)]
    start: Option<u32>,

    /// Validate the given key against --machine
    #[arg(short = 'v', long)]
    validate: Option<String>,

    /// Print the machine id derived for this machine and exit
    #[arg(long)]
    machine_id: bool,
}

fn init_logging() {
    let (enabled, level) = match get_config() {
        Ok(config) => (config.logging.enabled, config.logging.level.clone()),
        Err(_) => (false, "info".to_string()),
    };

    let filter = if enabled {
        level.parse().unwrap_or(LevelFilter::Info)
    } else {
        LevelFilter::Off
    };

    env_logger::Builder::from_default_env()
        .filter_level(filter)
        .init();
}

fn run(cli: Cli) -> LicenseResult<ExitCode> {
    let config = get_config()?;

    // Self-report mode: print this machine's id.
    if cli.machine_id {
        println!("{}", derive_machine_id());
        return Ok(ExitCode::SUCCESS);
    }

    // Validation mode.
    if let Some(key) = &cli.validate {
        let machine = match &cli.machine {
            Some(machine) => machine.clone(),
            None => derive_machine_id(),
        };
        let result = validate_key(key, &machine);
        let verdict = if result.valid { "VALID" } else { "INVALID" };
        println!("{}: {}", verdict, result.message);
        return Ok(if result.valid {
            ExitCode::SUCCESS
        } else {
            ExitCode::FAILURE
        });
    }

    // Batch mode.
    if let (Some(count), Some(machine)) = (cli.batch, &cli.machine) {
        let start = cli.start.unwrap_or(config.generator.batch_start);
        println!("Batch: {} keys for machine {}", count, machine.to_uppercase());
        for i in start..start + count {
            let cid = format!("{:04}", i);
            let key = generate_key(&cid, machine)?;
            println!("  Customer {}: {}", cid, key);
        }
        return Ok(ExitCode::SUCCESS);
    }

    // Single key mode.
    if let Some(machine) = &cli.machine {
        let customer = cli
            .customer
            .unwrap_or_else(|| config.generator.default_customer_id.clone());
        let key = generate_key(&customer, machine)?;
        println!("Generated key: {}", key);
        println!("  Customer: {}", customer.to_uppercase());
        println!("  Machine:  {}", machine.to_uppercase());
        let check = validate_key(&key, machine);
        println!("  Check:    {}", check.message);
        return Ok(ExitCode::SUCCESS);
    }

    interactive_shell(&config.generator.default_customer_id)?;
    Ok(ExitCode::SUCCESS)
}

/// Interactive fallback when no mode flag is given.
fn interactive_shell(default_customer: &str) -> LicenseResult<()> {
    println!("Aura License Key Generator (machine-bound)");
    println!();
    println!("  Key format: AURA-CCCC-MMMM-SSSSSSSS");
    println!();
    println!("  Commands:");
    println!("    g <machine_id> [customer]  - generate a key");
    println!("    v <key> <machine_id>       - validate a key");
    println!("    b <machine_id> <count>     - generate a batch");
    println!("    quit                       - exit");

    let stdin = io::stdin();
    loop {
        print!("\n> ");
        let _ = io::stdout().flush();

        let mut line = String::new();
        match stdin.lock().read_line(&mut line) {
            Ok(0) | Err(_) => break,
            Ok(_) => {}
        }

        let parts: Vec<&str> = line.split_whitespace().collect();
        let Some(&cmd) = parts.first() else { continue };

        match cmd.to_lowercase().as_str() {
            "quit" | "q" | "exit" => break,
            "g" if parts.len() >= 2 => {
                let customer = parts.get(2).copied().unwrap_or(default_customer);
                match generate_key(customer, parts[1]) {
                    Ok(key) => {
                        println!("  Key: {}", key);
                        let check = validate_key(&key, parts[1]);
                        println!("  Check: {}", check.message);
                    }
                    Err(e) => println!("  ERROR: {}", e),
                }
            }
            "v" if parts.len() >= 3 => {
                let result = validate_key(parts[1], parts[2]);
                let verdict = if result.valid { "VALID" } else { "INVALID" };
                println!("  {}: {}", verdict, result.message);
            }
            "b" if parts.len() >= 3 => match parts[2].parse::<u32>() {
                Ok(count) => {
                    for i in 1..=count {
                        let cid = format!("{:04}", i);
                        match generate_key(&cid, parts[1]) {
                            Ok(key) => println!("  {:03}: {}", i, key),
                            Err(e) => {
                                println!("  ERROR: {}", e);
                                break;
                            }
                        }
                    }
                }
                Err(_) => println!("  ERROR: count must be a number"),
            },
            _ => println!("  Unknown command. Help: g/v/b/quit"),
        }
    }

    Ok(())
}

fn main() -> ExitCode {
    init_logging();

    match run(Cli::parse()) {
        Ok(code) => code,
        Err(e) => {
            eprintln!("ERROR: {}", e);
            ExitCode::FAILURE
        }
    }
}
