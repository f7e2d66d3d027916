use std::{
    fs,
    io::Write,
    path::{Path, PathBuf},
};

use itertools::Itertools;
use tempfile::NamedTempFile;
use tracing::{debug, trace};
use util::{MoveType, TerrainRecord, VALUE_MAX, VALUE_MIN};

use crate::{
    config::Sentinels,
    error::{CompileError, Result},
    substitution::{bool_literal, repair_literal, string_literal, Substitutions},
};

/// Stands for the generated class name inside the template.
pub const CLASS_NAME_PLACEHOLDER: &str = "Template";

/// Injected in place of the `value` tag for value-bearing tiles.
pub fn value_stub() -> String {
    format!(
        "
        _value = 0;
        get value() {{ return this._value; }}
        set value(n) {{ this._value = Common.bindValue(n, {VALUE_MIN}, {VALUE_MAX}); }}
"
    )
}

/// A host file split around its template region.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HostTemplate {
    /// Everything before the start sentinel, line endings included.
    pub prefix: String,
    /// Lines strictly between the start and end sentinels.
    pub template: String,
}

impl HostTemplate {
    pub fn load(path: impl AsRef<Path>, sentinels: &Sentinels) -> Result<Self> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|e| CompileError::io(path, e))?;
        Self::parse(&text, sentinels, path)
    }

    /// Lines after the end sentinel are dropped, the terminator written by
    /// [`stamp`] takes their place.
    pub fn parse(text: &str, sentinels: &Sentinels, origin: &Path) -> Result<Self> {
        let missing = |sentinel: &str| CompileError::MissingSentinel {
            sentinel: sentinel.to_string(),
            path: PathBuf::from(origin),
        };

        let start = sentinels.start.trim();
        let end = sentinels.end.trim();

        let mut lines = text.split_inclusive('\n').enumerate();

        let mut prefix = String::new();
        let mut found_start = false;
        for (idx, line) in lines.by_ref() {
            if line.trim() == start {
                trace!(line = idx + 1, "template region starts");
                found_start = true;
                break;
            }
            prefix.push_str(line);
        }
        if !found_start {
            return Err(missing(start));
        }

        let mut template = String::new();
        for (idx, line) in lines {
            if line.trim() == end {
                trace!(line = idx + 1, "template region ends");
                return Ok(Self { prefix, template });
            }
            template.push_str(line);
        }

        Err(missing(end))
    }

    pub fn expand(&self, record: &TerrainRecord, serial: usize) -> String {
        record_substitutions(record, serial).apply(&self.template)
    }
}

/// The replacements for one record, in the order they are applied.
pub fn record_substitutions(record: &TerrainRecord, serial: usize) -> Substitutions {
    let mut subs = Substitutions::new();

    subs.literal(CLASS_NAME_PLACEHOLDER, record.class_name())
        .tag("serial", serial.to_string())
        .tag("land", bool_literal(record.is_land))
        .tag("shallow", bool_literal(record.is_shallow_water))
        .tag("name", string_literal(&record.name))
        .tag("short name", string_literal(&record.short_name))
        .tag("defense", record.defense.to_string())
        .tag("income", bool_literal(record.generates_income))
        .tag("repair", repair_literal(record.repair_type))
        .tag("hideaway", bool_literal(record.hides_units))
        .tag("vision", record.vision.to_string())
        .tag("desc", string_literal(&record.description));

    for move_type in MoveType::ALL {
        subs.tag(
            move_type.tag_name(),
            record.move_costs.get(move_type).to_string(),
        );
    }
    subs.tag(
        "move costs",
        record.move_costs.iter().map(|(_, cost)| cost).join(", "),
    );

    if record.has_capturable_value {
        subs.tag("value", value_stub());
    } else {
        subs.tag("value", "");
    }

    subs
}

/// Prefix, then one expansion per record each preceded by a newline, then
/// `terminator` once.
pub fn stamp(host: &HostTemplate, records: &[TerrainRecord], terminator: &str) -> String {
    if let Some(first) = records.first() {
        for needle in record_substitutions(first, 0)
            .needles()
            .filter(|needle| !host.template.contains(needle))
        {
            trace!(placeholder = needle, "not used by template");
        }
    }

    let mut out = host.prefix.clone();
    for (serial, record) in records.iter().enumerate() {
        debug!(serial, class = %record.class_name(), "stamping terrain class");
        out.push('\n');
        out.push_str(&host.expand(record, serial));
    }
    out.push_str(terminator);

    out
}

/// Replaces `path` with `contents` in one step. A failed write leaves any
/// previous file at `path` untouched.
pub fn write_output(path: impl AsRef<Path>, contents: &str) -> Result<()> {
    let path = path.as_ref();
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let mut file = NamedTempFile::new_in(dir).map_err(|e| CompileError::io(dir, e))?;
    file.write_all(contents.as_bytes())
        .map_err(|e| CompileError::io(path, e))?;
    file.persist(path)
        .map_err(|e| CompileError::io(path, e.error))?;

    Ok(())
}
