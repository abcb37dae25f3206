//! credql CLI: driving adapter for the matcher engine.
//!
//! Subcommands:
//! - `eval <spec> [--username NAME] [--prop key=value...] [--trace]`:
//!   evaluate a spec against an ad-hoc credential
//! - `describe <spec>`: print the spec's CQL rendering
//! - `check <spec>`: validate that a spec loads and builds

use std::process;

use credql::{CollectingSink, CredentialMatcher, MatcherSpec, PropertyValue};
use credql_test::TestCredential;

fn main() {
    let args: Vec<String> = std::env::args().collect();

    if args.len() < 2 {
        print_usage();
        process::exit(1);
    }

    let result = match args[1].as_str() {
        "eval" => cmd_eval(&args[2..]),
        "describe" => cmd_describe(&args[2..]),
        "check" => cmd_check(&args[2..]),
        "--help" | "-h" | "help" => {
            print_usage();
            Ok(())
        }
        other => {
            eprintln!("error: unknown command \"{other}\"");
            print_usage();
            process::exit(1);
        }
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        process::exit(1);
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// Commands
// ═══════════════════════════════════════════════════════════════════════════════

fn cmd_eval(args: &[String]) -> Result<(), String> {
    if args.is_empty() {
        return Err("eval requires a spec file path".into());
    }

    let spec = load_spec(&args[0])?;
    let matcher = spec
        .build()
        .map_err(|e| format!("spec build failed: {e}"))?;

    let (credential, trace) = parse_credential(&args[1..])?;

    let matched = if trace {
        let sink = CollectingSink::new();
        let matched = matcher.matches_traced(&credential, &sink);
        for record in sink.records() {
            eprintln!("[{:?}] {}: {}", record.level, record.matcher, record.message);
        }
        matched
    } else {
        matcher.matches(&credential)
    };

    println!("{}", if matched { "match" } else { "no match" });
    Ok(())
}

fn cmd_describe(args: &[String]) -> Result<(), String> {
    if args.is_empty() {
        return Err("describe requires a spec file path".into());
    }

    let spec = load_spec(&args[0])?;
    let matcher = spec
        .build()
        .map_err(|e| format!("spec build failed: {e}"))?;

    match matcher.describe() {
        Some(cql) => println!("{cql}"),
        None => println!("(not describable)"),
    }
    Ok(())
}

fn cmd_check(args: &[String]) -> Result<(), String> {
    if args.is_empty() {
        return Err("check requires a spec file path".into());
    }

    let spec = load_spec(&args[0])?;
    spec.build().map_err(|e| format!("spec invalid: {e}"))?;

    println!("Spec valid");
    Ok(())
}

// ═══════════════════════════════════════════════════════════════════════════════
// Spec loading
// ═══════════════════════════════════════════════════════════════════════════════

fn load_spec(path: &str) -> Result<MatcherSpec, String> {
    let content =
        std::fs::read_to_string(path).map_err(|e| format!("failed to read \"{path}\": {e}"))?;

    let is_json = std::path::Path::new(path)
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));

    if is_json {
        MatcherSpec::from_json(&content).map_err(|e| e.to_string())
    } else {
        // Default to YAML (handles .yaml and .yml)
        serde_yaml::from_str(&content).map_err(|e| format!("YAML parse error: {e}"))
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// Argument parsing
// ═══════════════════════════════════════════════════════════════════════════════

fn parse_credential(args: &[String]) -> Result<(TestCredential, bool), String> {
    let mut credential = TestCredential::new();
    let mut trace = false;
    let mut i = 0;

    while i < args.len() {
        match args[i].as_str() {
            "--username" => {
                i += 1;
                let username = args
                    .get(i)
                    .ok_or_else(|| "--username requires a value".to_string())?;
                credential = credential.with_username(username.as_str());
                i += 1;
            }
            "--prop" => {
                i += 1;
                while i < args.len() && !args[i].starts_with("--") {
                    let pair = &args[i];
                    let (key, value) = pair.split_once('=').ok_or_else(|| {
                        format!("invalid property pair \"{pair}\", expected key=value")
                    })?;
                    credential = credential.with(key, parse_value(value));
                    i += 1;
                }
            }
            "--trace" => {
                trace = true;
                i += 1;
            }
            other => return Err(format!("unexpected argument \"{other}\"")),
        }
    }

    Ok((credential, trace))
}

/// Infer a property value from its textual form: `null`, booleans and
/// numbers parse as themselves, everything else is a string.
fn parse_value(raw: &str) -> PropertyValue {
    match raw {
        "null" => return PropertyValue::Null,
        "true" => return PropertyValue::Bool(true),
        "false" => return PropertyValue::Bool(false),
        _ => {}
    }
    if let Ok(i) = raw.parse::<i64>() {
        return PropertyValue::Int(i);
    }
    if let Ok(v) = raw.parse::<f64>() {
        return PropertyValue::Float(v);
    }
    PropertyValue::from(raw)
}

fn print_usage() {
    eprintln!(
        "Usage: credql <command> [options]

Commands:
  eval <spec> [--username NAME] [--prop key=value...] [--trace]
                                           Evaluate spec against a credential
  describe <spec>                          Print the spec's CQL rendering
  check <spec>                             Validate spec
  help                                     Show this help

Spec files are JSON (.json) or YAML (anything else). Property values are
inferred: null, true/false, integers and floats parse as themselves; all
other values are strings."
    );
}
