//! Contract template instance CLI.
//!
//! Builds, decodes and disassembles template instance scripts.
//!
//! # Usage
//! ```text
//! contract [--no-timestamp] <command> [ARGS]
//! ```
//!
//! # Commands
//! - `list`: Show every template with its parameters and body hash
//! - `pay <template> <arg>...`: Build an instance script
//! - `parse <script-hex> [--template <name>]`: Decode an instance script
//! - `disasm <script-hex>`: Print a script as assembly text
//!
//! # Examples
//! ```text
//! contract list
//! contract pay PriceChanger 250 <asset-hex> <key-hex> 00141111111111111111111111111111111111111111
//! contract parse 0164...00c0 --template CallOption
//! contract disasm 7400c0
//! ```

use contract_templates::contract::errors::ContractError;
use contract_templates::contract::param::ContractArg;
use contract_templates::contract::template::{ContractTemplate, find, identify, templates};
use contract_templates::utils::log::{SHOW_TIMESTAMP, init_from_env};
use contract_templates::virtual_machine::instruction::disassemble;
use contract_templates::{error, info};
use std::env;
use std::process;
use std::sync::atomic::Ordering;

#[derive(Debug, PartialEq, Eq)]
enum Command {
    List,
    Pay {
        template: String,
        args: Vec<String>,
    },
    Parse {
        script: String,
        template: Option<String>,
    },
    Disasm {
        script: String,
    },
    Help,
}

fn main() {
    init_from_env();

    let args: Vec<String> = env::args().collect();
    let program = args.first().map(String::as_str).unwrap_or("contract");

    let mut rest = &args[args.len().min(1)..];
    if rest.first().map(String::as_str) == Some("--no-timestamp") {
        SHOW_TIMESTAMP.store(false, Ordering::Relaxed);
        rest = &rest[1..];
    }

    let command = match parse_command(rest) {
        Ok(command) => command,
        Err(e) => {
            error!("{}", e);
            eprintln!("\n{}", usage(program));
            process::exit(1);
        }
    };

    let result = match command {
        Command::Help => {
            println!("{}", usage(program));
            Ok(())
        }
        Command::List => {
            list();
            Ok(())
        }
        Command::Pay { template, args } => pay(&template, &args),
        Command::Parse { script, template } => parse(&script, template.as_deref()),
        Command::Disasm { script } => decode_hex(&script)
            .and_then(|bytes| disassemble(&bytes).map_err(|e| e.to_string()))
            .map(|text| println!("{text}")),
    };

    if let Err(e) = result {
        error!("{}", e);
        process::exit(1);
    }
}

fn parse_command(args: &[String]) -> Result<Command, String> {
    let Some((name, rest)) = args.split_first() else {
        return Err("missing command".to_string());
    };

    match name.as_str() {
        "-h" | "--help" | "help" => Ok(Command::Help),
        "list" => {
            if let Some(extra) = rest.first() {
                return Err(format!("Unexpected argument: {extra}"));
            }
            Ok(Command::List)
        }
        "pay" => {
            let Some((template, args)) = rest.split_first() else {
                return Err("pay requires a template name".to_string());
            };
            Ok(Command::Pay {
                template: template.clone(),
                args: args.to_vec(),
            })
        }
        "parse" => {
            let mut script = None;
            let mut template = None;
            let mut i = 0;
            while i < rest.len() {
                match rest[i].as_str() {
                    k @ ("--template" | "-t") => {
                        i += 1;
                        let Some(name) = rest.get(i) else {
                            return Err(format!("{k} requires an argument"));
                        };
                        template = Some(name.clone());
                    }
                    other if script.is_none() => script = Some(other.to_string()),
                    other => return Err(format!("Unexpected argument: {other}")),
                }
                i += 1;
            }
            let script = script.ok_or("parse requires a script")?;
            Ok(Command::Parse { script, template })
        }
        "disasm" => match rest {
            [script] => Ok(Command::Disasm {
                script: script.clone(),
            }),
            [] => Err("disasm requires a script".to_string()),
            [_, extra, ..] => Err(format!("Unexpected argument: {extra}")),
        },
        other => Err(format!("Unknown command: {other}")),
    }
}

fn lookup(name: &str) -> Result<&'static ContractTemplate, String> {
    find(name).ok_or_else(|| {
        let known: Vec<&str> = templates().iter().map(|t| t.name).collect();
        format!("Unknown template {name:?} (known: {})", known.join(", "))
    })
}

fn decode_hex(text: &str) -> Result<Vec<u8>, String> {
    let digits = text.strip_prefix("0x").unwrap_or(text);
    hex::decode(digits).map_err(|e| format!("Invalid script hex: {e}"))
}

fn list() {
    for template in templates() {
        let params: Vec<String> = template.params.iter().map(|p| p.to_string()).collect();
        println!("{}", template.name);
        println!("    params: {}", params.join(", "));
        println!("    quorum: {}", template.quorum);
        println!("    body:   {} bytes, sha3 {}", template.body.len(), template.body_hash());
    }
}

fn pay(name: &str, texts: &[String]) -> Result<(), String> {
    let template = lookup(name)?;
    if texts.len() != template.arg_count() {
        return Err(ContractError::ArgumentCount {
            got: texts.len(),
            want: template.arg_count(),
        }
        .to_string());
    }

    let args = template
        .params
        .iter()
        .zip(texts)
        .map(|(param, text)| ContractArg::parse(param, text))
        .collect::<Result<Vec<_>, _>>()
        .map_err(|e| e.to_string())?;

    let script = template.instantiate(&args).map_err(|e| e.to_string())?;
    println!("{script}");
    info!("{} instance ({} bytes), sha3 {}", template.name, script.len(), script.hash());
    Ok(())
}

fn parse(text: &str, name: Option<&str>) -> Result<(), String> {
    let script = decode_hex(text)?;

    let (template, args) = match name {
        Some(name) => {
            let template = lookup(name)?;
            let args = template.parse(&script).map_err(|e| e.to_string())?;
            (template, args)
        }
        None => identify(&script).ok_or("Script matches no known template")?,
    };

    println!("{}", template.name);
    for (param, arg) in template.params.iter().zip(&args) {
        println!("    {}: {}", param, hex::encode(arg));
    }
    Ok(())
}

const USAGE: &str = "\
Contract Template Instances

USAGE:
    {program} [--no-timestamp] <command> [ARGS]

COMMANDS:
    list                                   Show every template
    pay <template> <arg>...                Build an instance script
    parse <script-hex> [--template <name>] Decode an instance script
    disasm <script-hex>                    Print a script as assembly text

ARGUMENTS:
    Amount and Integer arguments are decimal, Boolean is true or false,
    every other type is hex (an optional 0x prefix is accepted).

OPTIONS:
    --no-timestamp   Omit timestamps from log lines
    -h, --help       Print this help message

ENVIRONMENT:
    CONTRACT_LOG             Minimum log level (debug, info, warn, error)
    CONTRACT_LOG_TIMESTAMP   Set to 0 to omit timestamps

EXAMPLES:
    # Show the available templates
    {program} list

    # Sniff which template produced a script
    {program} parse 0164...00c0

    # Decode against a specific template
    {program} parse 0164...00c0 --template CallOption
";

/// Printed with `println!`/`eprintln!`, never through the leveled logger.
fn usage(program: &str) -> String {
    USAGE.replace("{program}", program)
}
