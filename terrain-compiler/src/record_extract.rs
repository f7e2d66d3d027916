use std::{borrow::Cow, fs, path::Path, str::FromStr};

use itertools::Itertools;
use tracing::{debug, info};
use util::{MoveCosts, MoveType, RepairType, TerrainRecord};

use crate::error::{CompileError, Result};

/// Columns per catalogue row: name, short name, eight movement costs,
/// defense, income, repair, hideaway, vision, land, shallow, value, description.
pub const FIELD_COUNT: usize = 19;

const NOT_APPLICABLE: &str = "-";

pub fn load_records(path: impl AsRef<Path>) -> Result<Vec<TerrainRecord>> {
    let path = path.as_ref();
    let text = fs::read_to_string(path).map_err(|e| CompileError::io(path, e))?;

    let records = parse_records(&text)?;
    info!(path = %path.display(), count = records.len(), "loaded terrain catalogue");

    Ok(records)
}

/// Decodes every row after the header, in file order. Any row that fails to
/// decode, a blank one included, aborts the whole load.
pub fn parse_records(text: &str) -> Result<Vec<TerrainRecord>> {
    text.lines()
        .enumerate()
        .skip(1)
        .map(|(idx, line)| {
            let line_number = idx + 1;
            let tokens = shlex::split(&escape_comment_marks(line))
                .ok_or_else(|| malformed(line_number, "unbalanced quotes".to_string()))?;
            parse_record(&tokens, line_number)
        })
        .collect()
}

/// `shlex` reads a word starting with `#` as a comment. Rows have no comments,
/// so every `#` outside quotes is backslash-escaped before splitting.
fn escape_comment_marks(line: &str) -> Cow<'_, str> {
    if !line.contains('#') {
        return Cow::Borrowed(line);
    }

    let mut escaped = String::with_capacity(line.len() + 4);
    let mut quote = None;
    let mut chars = line.chars();
    while let Some(c) = chars.next() {
        match (quote, c) {
            (None, '#') => escaped.push_str("\\#"),
            (None, '\'' | '"') => {
                quote = Some(c);
                escaped.push(c);
            }
            (Some(open), _) if c == open => {
                quote = None;
                escaped.push(c);
            }
            (None | Some('"'), '\\') => {
                escaped.push(c);
                if let Some(next) = chars.next() {
                    escaped.push(next);
                }
            }
            _ => escaped.push(c),
        }
    }

    Cow::Owned(escaped)
}

pub fn parse_record(tokens: &[String], line: usize) -> Result<TerrainRecord> {
    let fields: &[String; FIELD_COUNT] = tokens.try_into().map_err(|_| {
        malformed(
            line,
            format!("expected {FIELD_COUNT} fields, found {}", tokens.len()),
        )
    })?;

    let [
        name,
        short_name,
        costs @ ..,
        defense,
        income,
        repair,
        hideaway,
        vision,
        land,
        shallow,
        value,
        description,
    ] = fields;

    let mut move_costs = MoveCosts::default();
    for (token, move_type) in costs.iter().zip_eq(MoveType::ALL) {
        move_costs.0[move_type.index()] = parse_number(token, move_type.tag_name(), line)?;
    }

    let record = TerrainRecord {
        name: name.clone(),
        short_name: short_name.clone(),
        description: description.clone(),
        move_costs,
        defense: parse_number(defense, "defense", line)?,
        generates_income: flag(income),
        repair_type: RepairType::from_code(repair),
        hides_units: flag(hideaway),
        vision: if vision == NOT_APPLICABLE {
            0
        } else {
            parse_number(vision, "vision", line)?
        },
        is_land: flag(land),
        is_shallow_water: flag(shallow),
        // any concrete token marks a value-bearing tile, not just "1"
        has_capturable_value: value != NOT_APPLICABLE,
    };

    debug!(
        line,
        name = %record.name,
        impassable = %MoveType::ALL
            .iter()
            .filter(|&&move_type| !record.move_costs.is_passable(move_type))
            .map(|move_type| move_type.tag_name())
            .join(","),
        "decoded terrain row"
    );

    Ok(record)
}

fn flag(token: &str) -> bool {
    token == "1"
}

fn parse_number<T: FromStr>(token: &str, column: &str, line: usize) -> Result<T> {
    token.parse().map_err(|_| {
        malformed(
            line,
            format!("column `{column}` expects a non-negative integer, found {token:?}"),
        )
    })
}

fn malformed(line: usize, reason: String) -> CompileError {
    CompileError::MalformedRow { line, reason }
}
