//! PDF417 parameter extraction for the `b` command.
//!
//! The 2D barcode command carries its configuration as a run of one-letter
//! flag tokens (`s3`, `x2`, `r12`, ...). Each token's first character selects
//! a named key; the remainder is an integer value.

use std::collections::BTreeMap;

use super::diagnostics::Diagnostic;
use super::directive::SymbolParam;

/// Row count forced onto every PDF417 directive.
///
/// The printer normalizes PDF417 row geometry to 40 rows no matter what the
/// command encodes, and the output must reproduce that exactly.
pub const PDF417_ROWS: i32 = 40;

/// Extract named PDF417 parameters from flag/value tokens.
///
/// The first unrecognized or malformed token stops extraction immediately:
/// a diagnostic is recorded and whatever accumulated so far is returned.
/// This is a local condition; the directive is still produced.
pub fn parse_pdf417_params(
    tokens: &[&str],
    line: usize,
    diagnostics: &mut Vec<Diagnostic>,
) -> BTreeMap<SymbolParam, i32> {
    let mut params = BTreeMap::new();

    for token in tokens {
        let token = token.trim();
        let Some(flag) = token.chars().next() else {
            continue;
        };
        let Some(key) = SymbolParam::from_flag(flag) else {
            diagnostics.push(Diagnostic::UnknownFlag {
                line,
                token: token.to_string(),
            });
            break;
        };
        let Ok(value) = token[flag.len_utf8()..].parse::<i32>() else {
            diagnostics.push(Diagnostic::UnknownFlag {
                line,
                token: token.to_string(),
            });
            break;
        };

        let value = match key {
            SymbolParam::Rows => PDF417_ROWS,
            _ => value,
        };
        params.insert(key, value);
    }

    params
}
