//! Safe SQL identifier handling.
//!
//! Every table/column name and whitelisted function-call expression passes
//! through [`sanitize`] before the compiler embeds it in SQL text. Accepted
//! input is returned verbatim; anything containing a character outside the
//! identifier whitelist is rejected, never silently corrected.
//!
//! Raw WHERE fragments are the one deliberate bypass of this layer; see
//! `Select::where_raw`.

use crate::error::{SqlError, SqlResult};
use regex::Regex;
use std::sync::OnceLock;

/// Maximum total identifier length.
const MAX_IDENT_LEN: usize = 63;
/// Maximum length of a single dot-separated part.
const MAX_PART_LEN: usize = 30;
/// Maximum function-name length.
const MAX_FUNC_LEN: usize = 31;

fn func_shape_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"(?s)^([A-Za-z_][A-Za-z0-9_]*)\s*\((.*)\)$")
            .expect("invalid built-in function-shape regex")
    })
}

fn complex_expr_res() -> &'static [Regex] {
    static RES: OnceLock<Vec<Regex>> = OnceLock::new();
    RES.get_or_init(|| {
        [
            // EXTRACT(field FROM source)
            r"(?i)^EXTRACT\s*\(\s*[A-Za-z_]+\s+FROM\s+[A-Za-z0-9_.]+\s*\)$",
            // DATE(...) with simple arguments
            r"(?i)^DATE\s*\(\s*[A-Za-z0-9_., ]*\s*\)$",
            // Common aggregates over * or a column
            r"(?i)^(COUNT|AVG|SUM|MAX|MIN)\s*\(\s*(\*|[A-Za-z0-9_.]+)\s*\)$",
            // CASE ... END accepted as a whole
            r"(?is)^CASE\s+.+\s+END$",
            // Generic NAME(args) with whitelisted argument characters
            r"^[A-Za-z_][A-Za-z0-9_]*\s*\(\s*[A-Za-z0-9_.,* ]*\s*\)$",
            // Generic NAME FROM NAME
            r"(?i)^[A-Za-z0-9_]+\s+FROM\s+[A-Za-z0-9_]+(\.[A-Za-z0-9_]+)?$",
        ]
        .iter()
        .map(|p| Regex::new(p).expect("invalid built-in expression regex"))
        .collect()
    })
}

fn complex_param_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        // Bare integer literal, or KEYWORDS FROM identifier[.identifier]
        Regex::new(r"(?i)^(\d+|[A-Za-z]+(\s+[A-Za-z]+)*\s+FROM\s+[A-Za-z0-9_]+(\.[A-Za-z0-9_]+)?)$")
            .expect("invalid built-in parameter regex")
    })
}

/// Validate a candidate identifier or whitelisted expression.
///
/// Accepted input is returned unchanged, so `sanitize(x)? == x` for every
/// valid identifier. Rejection is [`SqlError::Identifier`] carrying the
/// offending text.
pub fn sanitize(input: &str) -> SqlResult<&str> {
    if input.is_empty() {
        return Err(SqlError::identifier(input, "identifier cannot be empty"));
    }

    // Function-call shape: validate the name and each argument.
    if let Some(caps) = func_shape_re().captures(input) {
        let name = caps.get(1).map_or("", |m| m.as_str());
        let args = caps.get(2).map_or("", |m| m.as_str());
        validate_function_name(input, name)?;
        for arg in split_top_level_args(args) {
            let arg = arg.trim();
            if arg.is_empty() {
                continue;
            }
            if !is_valid_function_arg(arg) {
                return Err(SqlError::identifier(
                    input,
                    format!("invalid function argument '{arg}'"),
                ));
            }
        }
        return Ok(input);
    }

    // Whole-string whitelisted complex expression.
    if complex_expr_res().iter().any(|re| re.is_match(input)) {
        return Ok(input);
    }

    // Any character outside the identifier whitelist is proof of tampering.
    let stripped: String = input
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '.' | '(' | ')' | ' '))
        .collect();
    if stripped != input {
        return Err(SqlError::identifier(
            input,
            "contains characters outside the identifier whitelist",
        ));
    }

    check_plain_identifier(input)?;
    Ok(input)
}

/// Validate a plain identifier: at most two dot-separated parts, each part
/// starting with a letter or underscore and containing word characters only.
fn check_plain_identifier(input: &str) -> SqlResult<()> {
    if input.len() > MAX_IDENT_LEN {
        return Err(SqlError::identifier(
            input,
            format!("longer than {MAX_IDENT_LEN} characters"),
        ));
    }
    let parts: Vec<&str> = input.split('.').collect();
    if parts.len() > 2 {
        return Err(SqlError::identifier(
            input,
            "more than two dot-separated parts",
        ));
    }
    for part in parts {
        if part.is_empty() {
            return Err(SqlError::identifier(input, "empty identifier part"));
        }
        if part.len() > MAX_PART_LEN {
            return Err(SqlError::identifier(
                input,
                format!("part '{part}' longer than {MAX_PART_LEN} characters"),
            ));
        }
        let mut chars = part.chars();
        let first = chars.next().expect("non-empty part");
        if !(first.is_ascii_alphabetic() || first == '_') {
            return Err(SqlError::identifier(
                input,
                format!("part '{part}' must start with a letter or underscore"),
            ));
        }
        if !chars.all(|c| c.is_ascii_alphanumeric() || c == '_') {
            return Err(SqlError::identifier(
                input,
                format!("part '{part}' contains non-word characters"),
            ));
        }
    }
    Ok(())
}

/// Whether the input is a plain (unquoted, possibly two-part) identifier.
///
/// The compiler quotes plain identifiers per dialect and emits whitelisted
/// expressions verbatim.
pub fn is_plain(input: &str) -> bool {
    check_plain_identifier(input).is_ok()
}

fn validate_function_name(input: &str, name: &str) -> SqlResult<()> {
    if name.len() > MAX_FUNC_LEN {
        return Err(SqlError::identifier(
            input,
            format!("function name '{name}' longer than {MAX_FUNC_LEN} characters"),
        ));
    }
    // The shape regex already constrains the character class.
    Ok(())
}

fn is_valid_function_arg(arg: &str) -> bool {
    arg == "*"
        || check_plain_identifier(arg).is_ok()
        || complex_expr_res().iter().any(|re| re.is_match(arg))
        || complex_param_re().is_match(arg)
}

/// Split a function argument list at top-level commas, respecting nesting.
fn split_top_level_args(args: &str) -> Vec<&str> {
    let mut out = Vec::new();
    let mut depth = 0usize;
    let mut start = 0usize;
    for (i, ch) in args.char_indices() {
        match ch {
            '(' => depth += 1,
            ')' => depth = depth.saturating_sub(1),
            ',' if depth == 0 => {
                out.push(&args[start..i]);
                start = i + 1;
            }
            _ => {}
        }
    }
    out.push(&args[start..]);
    out
}
