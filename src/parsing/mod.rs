use std::str::FromStr;

use nom::{
    bytes::complete::{tag, take_until},
    character::complete::space0,
    combinator::map,
    sequence::{pair, terminated, tuple},
    IResult,
};
use tracing::debug;

use crate::{
    error::{Error, Result},
    ledger::{Ledger, DEFAULT_CAPACITY},
    model::*,
};


/// The four fields of a table row, untrimmed.
#[derive(Debug, PartialEq)]
struct RawRecord<'a> {
    id: &'a str,
    name: &'a str,
    balance: &'a str,
    percentage: &'a str,
}

/// Text up to the next `|`, consuming the pipe and the spaces after it.
fn field(i: &str) -> IResult<&str, &str> {
    terminated(take_until("|"), pair(tag("|"), space0))(i)
}

fn last_field(i: &str) -> IResult<&str, &str> {
    terminated(take_until("|"), tag("|"))(i)
}

fn raw_record(i: &str) -> IResult<&str, RawRecord> {
    map(
        tuple((field, field, field, last_field)),
        |(id, name, balance, percentage)| RawRecord {
            id,
            name,
            balance,
            percentage,
        },
    )(i)
}

/// Names end at the first whitespace.
fn first_word(raw: &str) -> &str {
    raw.split(char::is_whitespace).next().unwrap_or_default()
}

/// Drops everything that can't be part of a number.
fn numeric_token(raw: &str) -> String {
    raw.chars()
        .filter(|c| c.is_ascii_digit() || *c == '.' || *c == '-')
        .collect()
}

fn decimal(raw: &str, line: usize, what: &str) -> Result<BigDecimal> {
    let token = numeric_token(raw);
    if token.is_empty() {
        return Err(Error::invalid_record(line, format!("missing {}", what)));
    }
    BigDecimal::from_str(&token)
        .map_err(|_| Error::invalid_record(line, format!("malformed {} {:?}", what, raw.trim())))
}

fn parse_record(text: &str, line: usize) -> Result<Category> {
    let (_, raw) = raw_record(text)
        .map_err(|_| Error::invalid_record(line, "expected four `|` terminated fields"))?;

    let id = numeric_token(raw.id);
    if id.is_empty() {
        return Err(Error::invalid_record(line, "missing id"));
    }
    let id: CategoryId = id
        .parse()
        .map_err(|_| Error::invalid_record(line, format!("malformed id {:?}", raw.id.trim())))?;
    if id == 0 {
        return Err(Error::invalid_record(line, "ids start at 1"));
    }

    let name = first_word(raw.name.trim_start());
    if name.is_empty() {
        return Err(Error::invalid_record(line, "missing name"));
    }

    let balance = decimal(raw.balance, line, "balance")?;
    let share = decimal(raw.percentage, line, "percentage")? / BigDecimal::from(100);

    Ok(Category::new(id, name, balance, share))
}

/// Parses stored rows, skipping the header and the stored Total row which is
/// always recomputed instead.
pub fn parse_records(text: &str) -> Result<Vec<Category>> {
    let mut lines = text.lines().enumerate();

    if lines.next().is_none() {
        return Err(Error::invalid_record(1, "missing header"));
    }
    let _total = lines.next();

    let records = lines
        .filter(|(_, line)| !line.trim().is_empty())
        .map(|(i, line)| parse_record(line, i + 1))
        .collect::<Result<Vec<_>>>()?;

    debug!(records = records.len(), "parsed");

    Ok(records)
}

pub fn parse(text: &str) -> Result<Ledger> {
    parse_with_capacity(text, DEFAULT_CAPACITY)
}

pub fn parse_with_capacity(text: &str, capacity: usize) -> Result<Ledger> {
    Ledger::load_with_capacity(parse_records(text)?, capacity)
}
