use std::fmt::Write as _;

use atty::Stream;
use color_eyre::Result;
use serde_json::Value;
use tuf_core::{diag_commands, CommandGroup, CommandInfo, ExecutionOutcome};

use crate::style::Style;

#[derive(Clone, Copy, Debug)]
pub struct OutputOptions {
    pub quiet: bool,
    pub json: bool,
    pub no_color: bool,
}

pub fn emit_output(opts: &OutputOptions, info: CommandInfo, outcome: &ExecutionOutcome) -> Result<i32> {
    let code = outcome.status.exit_code();

    if opts.json {
        let payload = tuf_core::to_json_response(info, outcome);
        println!("{}", serde_json::to_string_pretty(&payload)?);
        return Ok(code);
    }

    if outcome.is_success() {
        if !opts.quiet {
            let style = Style::new(opts.no_color, atty::is(Stream::Stdout));
            let message = tuf_core::format_status_message(info, &outcome.message);
            println!("{}", style.status(outcome.status, &message));
            for line in success_lines(info, &outcome.details) {
                println!("{}", style.info(&line));
            }
        }
    } else if opts.quiet {
        let style = Style::new(opts.no_color, atty::is(Stream::Stderr));
        eprint!("{}", render_failure(&style, info, outcome));
    } else {
        let style = Style::new(opts.no_color, atty::is(Stream::Stdout));
        print!("{}", render_failure(&style, info, outcome));
    }

    Ok(code)
}

fn render_failure(style: &Style, info: CommandInfo, outcome: &ExecutionOutcome) -> String {
    let mut out = String::new();
    let header = format!("{}  {}", error_code(info, &outcome.details), outcome.message);
    let _ = writeln!(out, "{}", style.error_header(outcome.status, &header));
    let _ = writeln!(out);
    let _ = writeln!(out, "Why:");
    for reason in collect_why_bullets(&outcome.details, &outcome.message) {
        let _ = writeln!(out, "  • {reason}");
    }
    let fixes = collect_fix_bullets(&outcome.details);
    if !fixes.is_empty() {
        let _ = writeln!(out);
        let _ = writeln!(out, "Fix:");
        for fix in fixes {
            let _ = writeln!(out, "{}", style.fix_bullet(&format!("  • {fix}")));
        }
    }
    out
}

fn success_lines(info: CommandInfo, details: &Value) -> Vec<String> {
    match info.group {
        CommandGroup::Init => details
            .get("workspaces")
            .and_then(Value::as_array)
            .map(|workspaces| {
                workspaces
                    .iter()
                    .filter_map(|ws| {
                        let root = ws.get("root")?.as_str()?;
                        let files = ws.get("files")?.as_u64()?;
                        Some(format!("  {root} ({files} file(s))"))
                    })
                    .collect()
            })
            .unwrap_or_default(),
        CommandGroup::Mv => {
            let start = details.get("start").and_then(Value::as_u64);
            let end = details.get("end").and_then(Value::as_u64);
            match (start, end) {
                (Some(start), Some(end)) => vec![format!("  bytes {start}..{end}")],
                _ => Vec::new(),
            }
        }
        CommandGroup::Validate => Vec::new(),
    }
}

fn error_code(info: CommandInfo, details: &Value) -> String {
    if let Some(code) = details.get("code").and_then(Value::as_str) {
        return code.to_string();
    }
    match info.group {
        CommandGroup::Init => diag_commands::INIT,
        CommandGroup::Mv => diag_commands::MV,
        CommandGroup::Validate => diag_commands::VALIDATE,
    }
    .to_string()
}

fn hint_from_details(details: &Value) -> Option<&str> {
    details
        .as_object()
        .and_then(|map| map.get("hint"))
        .and_then(Value::as_str)
}

fn collect_why_bullets(details: &Value, fallback: &str) -> Vec<String> {
    let mut bullets = Vec::new();
    if let Some(reason) = details.get("reason").and_then(Value::as_str) {
        if let Some(display) = reason_display(reason) {
            push_unique(&mut bullets, display);
        }
    }
    for key in ["problems", "issues"] {
        if let Some(entries) = details.get(key).and_then(Value::as_array) {
            for entry in entries.iter().filter_map(Value::as_str) {
                push_unique(&mut bullets, entry);
            }
        }
    }
    if let Some(error) = details.get("error").and_then(Value::as_str) {
        push_unique(&mut bullets, error);
    }
    if bullets.is_empty() {
        bullets.push(fallback.to_string());
    }
    bullets
}

fn collect_fix_bullets(details: &Value) -> Vec<String> {
    let mut fixes = Vec::new();
    if let Some(hint) = hint_from_details(details) {
        push_unique(&mut fixes, hint);
    }
    if fixes.is_empty() {
        fixes.push("Re-run with --help for usage or inspect the output above.".to_string());
    }
    fixes
}

fn push_unique(vec: &mut Vec<String>, text: impl Into<String>) {
    let entry = text.into();
    if entry.trim().is_empty() {
        return;
    }
    if !vec.iter().any(|existing| existing == &entry) {
        vec.push(entry);
    }
}

fn reason_display(code: &str) -> Option<&'static str> {
    match code {
        "invalid_address" => Some("The address is not module.<name> or <resource_type>.<name>."),
        "invalid_request" => Some("The move needs exactly one source and one destination."),
        "block_not_found" => Some("No block with that address exists in the scanned files."),
        "parse_failure" => Some("A candidate file is not valid HCL."),
        "not_a_directory" => Some("A workspace path is not a directory."),
        "duplicate_workspace" => Some("The same workspace was listed more than once."),
        "state_exists" => Some("A migration state file already exists."),
        "state_missing" => Some("No migration state file was found."),
        "state_corrupt" => Some("The migration state file could not be read."),
        "workspace_validation_failed" => Some("Recorded workspaces changed since `tuf init`."),
        _ => None,
    }
}
