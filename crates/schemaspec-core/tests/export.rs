// crates/schemaspec-core/tests/export.rs
// ============================================================================
// Module: Export Tests
// Description: Golden text and reload checks for format_export.
// Purpose: Keep exported configuration byte-for-byte stable and reloadable.
// ============================================================================
//! ## Overview
//! Integration tests for `SchemaTable::format_export` layouts, selectors and
//! failure reporting.

#![allow(
    clippy::panic,
    clippy::print_stdout,
    clippy::print_stderr,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::use_debug,
    clippy::dbg_macro,
    clippy::panic_in_result_fn,
    clippy::unwrap_in_result,
    reason = "Test-only output and panic-based assertions are permitted."
)]

mod support;

use schemaspec_core::ErrorKind;
use schemaspec_core::ErrorMode;
use schemaspec_core::ExportOptions;
use schemaspec_core::Namespace;
use schemaspec_core::Record;
use schemaspec_core::SchemaError;
use schemaspec_core::Value;
use support::TestResult;
use support::demo_schema;
use support::ensure;
use support::settings_schema;
use support::toml_map;

/// Empty selector list: export everything.
const NO_KEYS: [&str; 0] = [];

// ============================================================================
// SECTION: Golden Layouts
// ============================================================================

#[test]
fn exports_items_then_tables_with_headers() -> TestResult {
    let schema = settings_schema()?;
    let text = schema.format_export(&schema.defaults(), &NO_KEYS, false, false)?;
    let expected = "\
mods_home = \"mods/home\"
alpha = \"enabled\"

[default_game]
name = \"Guilty Gear Strive\"
enabled = true

[games]
[games.guilty_gear_strive]
name = \"guilty_gear_strive\"
game_path = \"~/.steam/root/steamapps/common/GUILTY GEAR STRIVE/\"";
    ensure(text == expected, format!("unexpected export:\n{text}"))?;
    Ok(())
}

#[test]
fn exports_full_names_without_headers() -> TestResult {
    let schema = settings_schema()?;
    let text = schema.format_export(&schema.defaults(), &NO_KEYS, true, false)?;
    let expected = "\
mods_home = \"mods/home\"
alpha = \"enabled\"

default_game.name = \"Guilty Gear Strive\"
default_game.enabled = true

games.guilty_gear_strive.name = \"guilty_gear_strive\"
games.guilty_gear_strive.game_path = \"~/.steam/root/steamapps/common/GUILTY GEAR STRIVE/\"";
    ensure(text == expected, format!("unexpected export:\n{text}"))?;
    Ok(())
}

#[test]
fn exports_help_as_comments() -> TestResult {
    let schema = demo_schema()?;
    let text = schema.format_export(&schema.defaults(), &NO_KEYS, false, true)?;
    let expected = "\
# Demo settings

# port = <integer>
#   Port to listen on.
#   Default: 8080
port = 8080

[log]
# Logging

# level = \"info\" | \"debug\"
#   Default: \"info\"
level = \"info\"";
    ensure(text == expected, format!("unexpected export:\n{text}"))?;
    Ok(())
}

#[test]
fn help_entries_are_separated_by_blank_lines() -> TestResult {
    let schema = settings_schema()?;
    let text = schema.format_export(&schema.defaults(), &["default_game"], false, true)?;
    let expected = "\
[default_game]
# name = \"<string>\"
#   Default: \"Guilty Gear Strive\"
name = \"Guilty Gear Strive\"

# enabled = true | false
#   Default: true
enabled = true";
    ensure(text == expected, format!("unexpected export:\n{text}"))?;
    Ok(())
}

// ============================================================================
// SECTION: Selectors
// ============================================================================

#[test]
fn dotted_selector_scopes_to_one_item() -> TestResult {
    let schema = settings_schema()?;
    let text = schema.format_export(&schema.defaults(), &["default_game.enabled"], false, false)?;
    ensure(text == "[default_game]\nenabled = true", format!("unexpected export:\n{text}"))?;
    Ok(())
}

#[test]
fn selectors_keep_caller_order() -> TestResult {
    let schema = settings_schema()?;
    let text = schema.format_export(&schema.defaults(), &["alpha", "mods_home"], true, false)?;
    ensure(text == "alpha = \"enabled\"\nmods_home = \"mods/home\"", "caller order kept")?;
    Ok(())
}

#[test]
fn deep_selector_with_full_names() -> TestResult {
    let schema = settings_schema()?;
    let options =
        ExportOptions::default().keys(["games.guilty_gear_strive.name"]).use_fullname(true);
    let text = schema.export_with(&schema.defaults(), &options)?;
    ensure(text == "games.guilty_gear_strive.name = \"guilty_gear_strive\"", text.clone())?;
    Ok(())
}

#[test]
fn selectors_sharing_a_table_write_one_header() -> TestResult {
    let schema = settings_schema()?;
    let keys = ["default_game.name", "alpha", "default_game.enabled", "alpha"];
    let text = schema.format_export(&schema.defaults(), &keys, false, false)?;
    let expected = "\
alpha = \"enabled\"

[default_game]
name = \"Guilty Gear Strive\"
enabled = true";
    ensure(text == expected, format!("unexpected export:\n{text}"))?;
    Ok(())
}

#[test]
fn bare_table_selector_covers_its_dotted_siblings() -> TestResult {
    let schema = settings_schema()?;
    let keys = ["default_game.enabled", "default_game", "default_game.name"];
    let text = schema.format_export(&schema.defaults(), &keys, false, false)?;
    let expected = "[default_game]\nname = \"Guilty Gear Strive\"\nenabled = true";
    ensure(text == expected, format!("unexpected export:\n{text}"))?;
    Ok(())
}

#[test]
fn grouped_selectors_reload_identically() -> TestResult {
    let schema = settings_schema()?;
    let defaults = schema.defaults();
    let keys = [
        "games.guilty_gear_strive.game_path",
        "default_game.name",
        "games.guilty_gear_strive.name",
        "default_game.enabled",
        "mods_home",
        "mods_home",
    ];
    for use_fullname in [false, true] {
        let text = schema.format_export(&defaults, &keys, use_fullname, true)?;
        let reloaded = schema.parse_fresh(toml_map(&text)?, ErrorMode::Fail)?;
        ensure(reloaded == defaults, format!("reload differs for:\n{text}"))?;
    }
    let text = schema.format_export(&defaults, &keys, false, false)?;
    ensure(text.matches("[games.guilty_gear_strive]").count() == 1, text.clone())?;
    ensure(text.matches("[default_game]").count() == 1, text.clone())?;
    ensure(text.matches("mods_home =").count() == 1, text.clone())?;
    Ok(())
}

#[test]
fn unknown_selector_is_a_lookup_error() -> TestResult {
    let schema = settings_schema()?;
    let result = schema.format_export(&schema.defaults(), &["default_game.missing"], false, false);
    ensure(
        result
            == Err(SchemaError::Lookup {
                table: "default_game".to_string(),
                key: "missing".to_string(),
            }),
        "missing child named with its table",
    )?;
    Ok(())
}

#[test]
fn selector_past_an_item_is_a_lookup_error() -> TestResult {
    let schema = settings_schema()?;
    let result = schema.format_export(&schema.defaults(), &["alpha.beta"], false, false);
    ensure(
        result.err().map(|error| error.kind()) == Some(ErrorKind::Lookup),
        "items have no children",
    )?;
    Ok(())
}

// ============================================================================
// SECTION: Export Failures
// ============================================================================

#[test]
fn unset_fields_fail_loudly() -> TestResult {
    let schema = demo_schema()?;
    let mut record = schema.defaults();
    record.remove("port");
    let result = schema.format_export(&record, &NO_KEYS, false, false);
    ensure(
        result.err().map(|error| error.kind()) == Some(ErrorKind::Export),
        "unset field is an export error",
    )?;
    Ok(())
}

#[test]
fn none_and_mistyped_values_fail_loudly() -> TestResult {
    let schema = demo_schema()?;
    for value in [Value::None, Value::from("8080")] {
        let mut record = schema.defaults();
        record.set("port", value);
        let Err(error) = schema.format_export(&record, &["port"], false, false) else {
            return Err("value outside the item declaration must not export".into());
        };
        ensure(error.kind() == ErrorKind::Export, "export kind")?;
        ensure(error.to_string().starts_with("cannot export port"), error.to_string())?;
    }
    Ok(())
}

// ============================================================================
// SECTION: Reload
// ============================================================================

#[test]
fn exported_defaults_reload_identically() -> TestResult {
    let schema = settings_schema()?;
    let defaults = schema.defaults();
    for (use_fullname, show_help) in [(false, false), (true, false), (false, true), (true, true)] {
        let text = schema.format_export(&defaults, &NO_KEYS, use_fullname, show_help)?;
        let reloaded = schema.parse_fresh(toml_map(&text)?, ErrorMode::Fail)?;
        ensure(reloaded == defaults, format!("reload differs for:\n{text}"))?;
    }
    Ok(())
}

#[test]
fn exported_overrides_reload_identically() -> TestResult {
    let schema = settings_schema()?;
    let document = "alpha = \"quoted \\\"text\\\"\\n\"\n\
                    [games.guilty_gear_strive]\ngame_path = false\n";
    let parsed = schema.parse_fresh(toml_map(document)?, ErrorMode::Fail)?;
    let strive = parsed.table("games").and_then(|games| games.table("guilty_gear_strive"));
    ensure(
        strive.and_then(|strive| strive.field("game_path")) == Some(&Value::Bool(false)),
        "false selects the boolean adapter",
    )?;
    let text = schema.format_export(&parsed, &NO_KEYS, false, false)?;
    ensure(text.contains("game_path = false"), text.clone())?;
    let reloaded: Record = schema.parse_fresh(toml_map(&text)?, ErrorMode::Fail)?;
    ensure(reloaded == parsed, format!("reload differs for:\n{text}"))?;
    Ok(())
}
