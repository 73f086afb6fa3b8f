// crates/wilayah-core/src/loader/sql_dump.rs

//! Minimal reader for MySQL-style dumps.
//!
//! The public region dataset ships as a `mysqldump`-like file: a
//! `CREATE TABLE ... ENGINE=...;` header, optional `CREATE INDEX` lines and
//! one or more `INSERT INTO t (a, b) VALUES (...), (...);` statements. Only
//! the INSERTs carry data, so everything else is skipped statement by
//! statement.
//!
//! Supported value syntax: single or double quoted strings (with `''` and
//! backslash escapes), bare numbers and `NULL`.

use crate::error::{Result, WilayahError};

/// One `INSERT` statement.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SqlInsert {
    pub table: String,
    pub columns: Vec<String>,
    /// `NULL` is `None`; numbers keep their textual form.
    pub rows: Vec<Vec<Option<String>>>,
}

/// Parse every `INSERT` statement in `src`.
pub fn parse_inserts(src: &str) -> Result<Vec<SqlInsert>> {
    let mut sc = Scanner::new(src);
    let mut out = Vec::new();

    loop {
        sc.skip_trivia();
        if sc.at_end() {
            break;
        }
        if sc.eat_keyword("INSERT") {
            out.push(sc.insert_body()?);
        } else {
            sc.skip_statement()?;
        }
    }

    Ok(out)
}

/// Flatten every row of every INSERT into `(first, second)` column pairs.
///
/// Rows with fewer than two columns or a `NULL` in either position are an
/// error: the dumps this reads never contain them.
pub fn parse_pairs(src: &str) -> Result<Vec<(String, String)>> {
    let mut pairs = Vec::new();
    for insert in parse_inserts(src)? {
        for (i, row) in insert.rows.into_iter().enumerate() {
            let mut it = row.into_iter();
            match (it.next().flatten(), it.next().flatten()) {
                (Some(a), Some(b)) => pairs.push((a, b)),
                _ => {
                    return Err(WilayahError::InvalidData(format!(
                        "row {} of INSERT INTO {} needs two non-NULL values",
                        i + 1,
                        insert.table
                    )))
                }
            }
        }
    }
    Ok(pairs)
}

struct Scanner<'a> {
    src: &'a [u8],
    pos: usize,
    line: usize,
}

impl<'a> Scanner<'a> {
    fn new(src: &'a str) -> Self {
        Self {
            src: src.as_bytes(),
            pos: 0,
            line: 1,
        }
    }

    fn at_end(&self) -> bool {
        self.pos >= self.src.len()
    }

    fn peek(&self) -> Option<u8> {
        self.src.get(self.pos).copied()
    }

    fn peek_at(&self, offset: usize) -> Option<u8> {
        self.src.get(self.pos + offset).copied()
    }

    fn bump(&mut self) -> Option<u8> {
        let b = self.peek()?;
        self.pos += 1;
        if b == b'\n' {
            self.line += 1;
        }
        Some(b)
    }

    fn error(&self, msg: impl Into<String>) -> WilayahError {
        WilayahError::Parse {
            line: self.line,
            msg: msg.into(),
        }
    }

    /// Whitespace, `-- ...`, `# ...` and `/* ... */` comments.
    fn skip_trivia(&mut self) {
        loop {
            match self.peek() {
                Some(b) if b.is_ascii_whitespace() => {
                    self.bump();
                }
                Some(b'-') if self.peek_at(1) == Some(b'-') => self.skip_line(),
                Some(b'#') => self.skip_line(),
                Some(b'/') if self.peek_at(1) == Some(b'*') => {
                    self.bump();
                    self.bump();
                    while !self.at_end() {
                        if self.peek() == Some(b'*') && self.peek_at(1) == Some(b'/') {
                            self.bump();
                            self.bump();
                            break;
                        }
                        self.bump();
                    }
                }
                _ => break,
            }
        }
    }

    fn skip_line(&mut self) {
        while let Some(b) = self.bump() {
            if b == b'\n' {
                break;
            }
        }
    }

    /// Consume up to and including the next `;` outside quotes.
    fn skip_statement(&mut self) -> Result<()> {
        while let Some(b) = self.peek() {
            match b {
                b';' => {
                    self.bump();
                    return Ok(());
                }
                b'\'' | b'"' | b'`' => {
                    self.quoted(b)?;
                }
                _ => {
                    self.bump();
                }
            }
        }
        Ok(())
    }

    fn eat_keyword(&mut self, kw: &str) -> bool {
        let end = self.pos + kw.len();
        let Some(word) = self.src.get(self.pos..end) else {
            return false;
        };
        let boundary = self
            .src
            .get(end)
            .map_or(true, |b| !(b.is_ascii_alphanumeric() || *b == b'_'));
        if boundary && word.eq_ignore_ascii_case(kw.as_bytes()) {
            self.pos = end;
            true
        } else {
            false
        }
    }

    fn expect(&mut self, b: u8) -> Result<()> {
        self.skip_trivia();
        match self.peek() {
            Some(got) if got == b => {
                self.bump();
                Ok(())
            }
            Some(got) => Err(self.error(format!(
                "expected '{}', found '{}'",
                b as char, got as char
            ))),
            None => Err(self.error(format!("expected '{}', found end of input", b as char))),
        }
    }

    /// `[IGNORE] INTO name [(cols)] VALUES (..), (..) ;`
    fn insert_body(&mut self) -> Result<SqlInsert> {
        self.skip_trivia();
        self.eat_keyword("IGNORE");
        self.skip_trivia();
        if !self.eat_keyword("INTO") {
            return Err(self.error("expected INTO after INSERT"));
        }
        self.skip_trivia();
        let mut table = self.identifier()?;
        while self.peek() == Some(b'.') {
            self.bump();
            table = self.identifier()?;
        }

        self.skip_trivia();
        let mut columns = Vec::new();
        if self.peek() == Some(b'(') {
            self.bump();
            loop {
                self.skip_trivia();
                columns.push(self.identifier()?);
                self.skip_trivia();
                match self.bump() {
                    Some(b',') => continue,
                    Some(b')') => break,
                    _ => return Err(self.error("malformed column list")),
                }
            }
        }

        self.skip_trivia();
        if !(self.eat_keyword("VALUES") || self.eat_keyword("VALUE")) {
            return Err(self.error(format!("expected VALUES in INSERT INTO {table}")));
        }

        let mut rows = Vec::new();
        loop {
            rows.push(self.tuple()?);
            self.skip_trivia();
            match self.peek() {
                Some(b',') => {
                    self.bump();
                }
                Some(b';') => {
                    self.bump();
                    break;
                }
                None => break,
                Some(got) => {
                    return Err(self.error(format!(
                        "unexpected '{}' after VALUES tuple",
                        got as char
                    )))
                }
            }
        }

        Ok(SqlInsert {
            table,
            columns,
            rows,
        })
    }

    fn identifier(&mut self) -> Result<String> {
        match self.peek() {
            Some(q @ (b'`' | b'"')) => self.quoted(q),
            Some(b) if b.is_ascii_alphanumeric() || b == b'_' => {
                let start = self.pos;
                while self
                    .peek()
                    .is_some_and(|b| b.is_ascii_alphanumeric() || b == b'_' || b == b'$')
                {
                    self.bump();
                }
                Ok(String::from_utf8_lossy(&self.src[start..self.pos]).into_owned())
            }
            _ => Err(self.error("expected identifier")),
        }
    }

    fn tuple(&mut self) -> Result<Vec<Option<String>>> {
        self.expect(b'(')?;
        let mut values = Vec::new();
        loop {
            self.skip_trivia();
            values.push(self.value()?);
            self.skip_trivia();
            match self.bump() {
                Some(b',') => continue,
                Some(b')') => break,
                Some(got) => {
                    return Err(self.error(format!("unexpected '{}' in VALUES tuple", got as char)))
                }
                None => return Err(self.error("unterminated VALUES tuple")),
            }
        }
        Ok(values)
    }

    fn value(&mut self) -> Result<Option<String>> {
        match self.peek() {
            Some(q @ (b'\'' | b'"')) => self.quoted(q).map(Some),
            Some(_) => {
                let start = self.pos;
                while self
                    .peek()
                    .is_some_and(|b| b != b',' && b != b')' && !b.is_ascii_whitespace())
                {
                    self.bump();
                }
                let token = String::from_utf8_lossy(&self.src[start..self.pos]).into_owned();
                if token.is_empty() {
                    Err(self.error("empty value"))
                } else if token.eq_ignore_ascii_case("NULL") {
                    Ok(None)
                } else {
                    Ok(Some(token))
                }
            }
            None => Err(self.error("unexpected end of input in VALUES")),
        }
    }

    /// Quoted string or identifier; the opening quote is at `pos`.
    fn quoted(&mut self, quote: u8) -> Result<String> {
        let start_line = self.line;
        self.bump();
        let mut buf = Vec::new();
        loop {
            let Some(b) = self.bump() else {
                return Err(WilayahError::Parse {
                    line: start_line,
                    msg: "unterminated quoted string".into(),
                });
            };
            if b == quote {
                if self.peek() == Some(quote) {
                    self.bump();
                    buf.push(quote);
                    continue;
                }
                break;
            }
            if b == b'\\' && quote != b'`' {
                let Some(esc) = self.bump() else { continue };
                buf.push(match esc {
                    b'n' => b'\n',
                    b't' => b'\t',
                    b'r' => b'\r',
                    b'0' => b'\0',
                    other => other,
                });
                continue;
            }
            buf.push(b);
        }
        String::from_utf8(buf).map_err(|_| self.error("invalid UTF-8 in quoted string"))
    }
}
