//! MLS level and range strings.
//!
//! A level renders as its sensitivity followed by its categories, e.g.
//! `s0:c0.c3,c5`. Runs of three or more consecutive categories collapse to
//! `first.last`; a run of two is written out as `a,b`. A range renders as
//! `low-high`, or just `low` when both ends are the same level.

use sepol_core::error::PolicyError;
use sepol_core::Result;
use sepol_policydb::{Ebitmap, MlsLevel, MlsRange, NameTable, PolicyDb};

/// Render a level.
pub fn render_level(db: &PolicyDb, level: &MlsLevel) -> Result<String> {
    let mut out = db.val_to_name(NameTable::Sensitivity, level.sens)?.to_string();

    let mut runs: Vec<(u32, u32)> = Vec::new();
    for bit in level.cat.iter() {
        match runs.last_mut() {
            Some((_, end)) if *end + 1 == bit => *end = bit,
            _ => runs.push((bit, bit)),
        }
    }

    let mut parts: Vec<String> = Vec::new();
    parts.try_reserve(runs.len())?;
    for (start, end) in runs {
        let first = db.bit_to_name(NameTable::Category, start)?;
        match end - start {
            0 => parts.push(first.to_string()),
            1 => parts.push(format!("{},{}", first, db.bit_to_name(NameTable::Category, end)?)),
            _ => parts.push(format!("{}.{}", first, db.bit_to_name(NameTable::Category, end)?)),
        }
    }

    if !parts.is_empty() {
        out.push(':');
        out.push_str(&parts.join(","));
    }
    Ok(out)
}

/// Render a range.
pub fn render_range(db: &PolicyDb, range: &MlsRange) -> Result<String> {
    let low = render_level(db, &range.low)?;
    if range.low == range.high {
        return Ok(low);
    }
    Ok(format!("{}-{}", low, render_level(db, &range.high)?))
}

/// Parse a level string against the sensitivities and categories of `db`.
pub fn parse_level(db: &PolicyDb, text: &str) -> Result<MlsLevel> {
    let (sens, cats) = match text.split_once(':') {
        Some((sens, cats)) => (sens, Some(cats)),
        None => (text, None),
    };
    let sens = db
        .name_to_val(NameTable::Sensitivity, sens.trim())
        .ok_or_else(|| unknown("sensitivity", sens))?;

    let mut cat = Ebitmap::new();
    for item in cats.into_iter().flat_map(|c| c.split(',')) {
        let item = item.trim();
        let (first, last) = item.split_once('.').unwrap_or((item, item));
        let first = category(db, first)?;
        let last = category(db, last)?;
        if first > last {
            return Err(unknown("category range", item).into());
        }
        for value in first..=last {
            cat.set(value - 1);
        }
    }
    Ok(MlsLevel { sens, cat })
}

/// Parse a range string (`low` or `low-high`).
pub fn parse_range(db: &PolicyDb, text: &str) -> Result<MlsRange> {
    match text.split_once('-') {
        Some((low, high)) => Ok(MlsRange {
            low: parse_level(db, low)?,
            high: parse_level(db, high)?,
        }),
        None => {
            let level = parse_level(db, text)?;
            Ok(MlsRange {
                low: level.clone(),
                high: level,
            })
        }
    }
}

fn category(db: &PolicyDb, name: &str) -> std::result::Result<u32, PolicyError> {
    db.name_to_val(NameTable::Category, name.trim())
        .ok_or_else(|| unknown("category", name))
}

fn unknown(kind: &'static str, name: &str) -> PolicyError {
    PolicyError::UnknownName {
        kind,
        name: name.to_string(),
    }
}
