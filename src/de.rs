//! Bracketed-table parsing.
//!
//! This module provides the [`Parser`], a single-pass character scanner driven
//! by an explicit finite-state machine. It turns text such as
//!
//! ```text
//! foods = {
//! <"milk", 0.89>
//! <"bread", 2.49>
//! };
//! ```
//!
//! into [`Tables`]: table name to rows of raw [`Value`]s, in the order tables
//! appear. Rows are not checked against any schema, so rows of one table may
//! have different lengths.
//!
//! ## States
//!
//! | State | Meaning |
//! |-------|---------|
//! | [`State::None`] | outside any table, collecting a table name |
//! | [`State::Table`] | inside `{ ... }`, between rows |
//! | [`State::Row`] | inside `< ... >`, at the start of a field |
//! | [`State::Field`] | just closed a quoted string, expecting `,` or `>` |
//! | [`State::String`] | inside a quoted string |
//! | [`State::Number`] | collecting a bare numeric token |
//!
//! Whitespace, `{` and `;` are skipped everywhere except inside strings. The
//! only escape inside strings is `\"`.
//!
//! ## Usage
//!
//! Most users should use [`from_str`](crate::from_str):
//!
//! ```rust
//! use opl_text::{from_str, Value};
//!
//! let tables = from_str("a={<1,\"x\">};").unwrap();
//! assert_eq!(tables["a"], vec![vec![Value::from(1), Value::from("x")]]);
//! ```
//!
//! The parser can also be fed one character at a time:
//!
//! ```rust
//! use opl_text::{OplOptions, Parser, State};
//!
//! let mut parser = Parser::new(OplOptions::default());
//! for ch in "t = { <".chars() {
//!     parser.feed(ch).unwrap();
//! }
//! assert_eq!(parser.state(), State::Row);
//! ```

use crate::{Error, OplOptions, Result, Value};
use indexmap::IndexMap;
use log::{debug, trace};
use std::borrow::Cow;
use std::fmt;

/// One parsed row: field values in text order.
pub type Row = Vec<Value>;

/// Parsed tables keyed by name, in order of appearance.
pub type Tables = IndexMap<String, Vec<Row>>;

/// Characters with a fixed meaning in at least one state.
const DELIMITERS: &[char] = &['=', '<', '>', ',', '"', '}'];

/// Parser states.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum State {
    None,
    Table,
    Row,
    Field,
    String,
    Number,
}

impl fmt::Display for State {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            State::None => "outside any table",
            State::Table => "inside a table body",
            State::Row => "at the start of a field",
            State::Field => "after a field",
            State::String => "inside a string",
            State::Number => "inside a number",
        })
    }
}

/// A character position with its line and column.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct Mark {
    position: usize,
    line: usize,
    col: usize,
}

impl Default for Mark {
    fn default() -> Self {
        Mark {
            position: 0,
            line: 1,
            col: 1,
        }
    }
}

impl Mark {
    fn advance(&mut self, ch: char) {
        self.position += 1;
        if ch == '\n' {
            self.line += 1;
            self.col = 1;
        } else {
            self.col += 1;
        }
    }
}

/// The bracketed-table parser.
///
/// Feed characters with [`Parser::feed`] and collect the result with
/// [`Parser::finish`], or use [`Parser::parse`] for a whole string.
pub struct Parser {
    options: OplOptions,
    state: State,
    tables: Tables,
    table_name: String,
    row: Row,
    field: String,
    field_start: Mark,
    prev: Option<char>,
    mark: Mark,
}

impl Parser {
    #[must_use]
    pub fn new(options: OplOptions) -> Self {
        Parser {
            options,
            state: State::None,
            tables: Tables::new(),
            table_name: String::new(),
            row: Row::new(),
            field: String::new(),
            field_start: Mark::default(),
            prev: None,
            mark: Mark::default(),
        }
    }

    #[must_use]
    pub fn state(&self) -> State {
        self.state
    }

    /// Number of characters consumed so far.
    #[must_use]
    pub fn position(&self) -> usize {
        self.mark.position
    }

    /// Parses a complete document.
    ///
    /// # Errors
    ///
    /// Returns the first syntax, duplicate-table or number error, or
    /// [`Error::UnexpectedEof`] if the document is truncated and the options are strict.
    pub fn parse(mut self, input: &str) -> Result<Tables> {
        for ch in input.chars() {
            self.feed(ch)?;
        }
        self.finish()
    }

    /// Consumes one character.
    ///
    /// # Errors
    ///
    /// Returns an error if `ch` is not allowed in the current state. The parser
    /// should not be fed further after an error.
    pub fn feed(&mut self, ch: char) -> Result<()> {
        let at = self.mark;
        self.state = self.step(ch, at)?;
        self.prev = Some(ch);
        self.mark.advance(ch);
        Ok(())
    }

    /// Ends the input and returns the parsed tables.
    ///
    /// # Errors
    ///
    /// With strict options, returns [`Error::UnexpectedEof`] unless the input
    /// ended between tables. Otherwise returns the complete rows collected so far.
    pub fn finish(self) -> Result<Tables> {
        if self.state != State::None || !self.table_name.is_empty() {
            let open = self.describe_open();
            if self.options.strict {
                return Err(Error::unexpected_eof(&open, self.mark.position));
            }
            debug!("lenient parse stopped early: {}", open);
        }
        debug!(
            "parsed {} table(s) from {} character(s)",
            self.tables.len(),
            self.mark.position
        );
        Ok(self.tables)
    }

    /// Applies one transition, returning the next state.
    fn step(&mut self, ch: char, at: Mark) -> Result<State> {
        let state = self.state;
        if state != State::String && (ch.is_whitespace() || ch == '{' || ch == ';') {
            return Ok(state);
        }

        match (state, ch) {
            (State::String, '"') if self.prev == Some('\\') => {
                self.field.pop();
                self.field.push('"');
                Ok(State::String)
            }
            (State::String, '"') => Ok(State::Field),
            (State::String, c) => {
                self.field.push(c);
                Ok(State::String)
            }
            (State::None, '=') => {
                self.open_table(at)?;
                Ok(State::Table)
            }
            (State::Table, '<') => Ok(State::Row),
            (State::Row | State::Field | State::Number, ',') => {
                let value = self.take_field(state)?;
                self.row.push(value);
                Ok(State::Row)
            }
            (State::Row, '"') => {
                self.field_start = at;
                Ok(State::String)
            }
            (State::Table, '}') => {
                self.row.clear();
                self.table_name.clear();
                Ok(State::None)
            }
            (State::Row | State::Field | State::Number, '>') => {
                self.close_row(state)?;
                Ok(State::Table)
            }
            (State::None, c) if !DELIMITERS.contains(&c) => {
                self.table_name.push(c);
                Ok(State::None)
            }
            (State::Row | State::Field | State::Number, c) if !DELIMITERS.contains(&c) => {
                if state == State::Row {
                    self.field_start = at;
                }
                self.field.push(c);
                Ok(State::Number)
            }
            (state, c) => Err(Error::syntax(
                at.position,
                at.line,
                at.col,
                c,
                &format!("unrecognized '{}' {}", c, state),
            )),
        }
    }

    fn open_table(&mut self, at: Mark) -> Result<()> {
        if self.table_name.is_empty() {
            return Err(Error::syntax(
                at.position,
                at.line,
                at.col,
                '=',
                "table name can't be blank",
            ));
        }
        if self.tables.contains_key(&self.table_name) {
            return Err(Error::duplicate_table(
                &self.table_name,
                at.position,
                at.line,
                at.col,
            ));
        }
        trace!("table '{}' opened at {}", self.table_name, at.position);
        self.tables.insert(self.table_name.clone(), Vec::new());
        Ok(())
    }

    /// Converts the field buffer into a value; quoted and empty fields stay strings.
    fn take_field(&mut self, state: State) -> Result<Value> {
        let field = std::mem::take(&mut self.field);
        if state != State::Number {
            return Ok(Value::String(field));
        }
        strip_digit_separators(&field)
            .and_then(|digits| digits.parse::<f64>().ok())
            .map(Value::Number)
            .ok_or_else(|| {
                let at = self.field_start;
                Error::invalid_number(&field, at.position, at.line, at.col)
            })
    }

    fn close_row(&mut self, state: State) -> Result<()> {
        if state != State::Row {
            let value = self.take_field(state)?;
            self.row.push(value);
        }
        let row = std::mem::take(&mut self.row);
        trace!(
            "row of {} value(s) added to '{}'",
            row.len(),
            self.table_name
        );
        if let Some(rows) = self.tables.get_mut(&self.table_name) {
            rows.push(row);
        }
        Ok(())
    }

    fn describe_open(&self) -> String {
        match self.state {
            State::None => format!("dangling table name '{}'", self.table_name),
            State::Table => format!("table '{}' is missing its closing '}}'", self.table_name),
            State::String => format!("unterminated string in table '{}'", self.table_name),
            State::Row | State::Field | State::Number => {
                format!("row in table '{}' is missing its closing '>'", self.table_name)
            }
        }
    }
}

/// Drops `_` digit separators, which are only allowed between two digits.
fn strip_digit_separators(token: &str) -> Option<Cow<'_, str>> {
    if !token.contains('_') {
        return Some(Cow::Borrowed(token));
    }
    let chars: Vec<char> = token.chars().collect();
    let mut digits = String::with_capacity(token.len());
    for (i, &ch) in chars.iter().enumerate() {
        if ch != '_' {
            digits.push(ch);
            continue;
        }
        let before = i.checked_sub(1).and_then(|j| chars.get(j));
        let after = chars.get(i + 1);
        match (before, after) {
            (Some(b), Some(a)) if b.is_ascii_digit() && a.is_ascii_digit() => {}
            _ => return None,
        }
    }
    Some(Cow::Owned(digits))
}
