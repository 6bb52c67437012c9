use std::borrow::Cow;
use std::ops::Index;

/// Containers nested deeper than this are rejected.
const MAX_DEPTH: usize = 128;

#[derive(Debug, Clone, Copy, thiserror::Error, PartialEq, Eq)]
pub enum ParserError {
    #[error("Unexpected end of JSON input")]
    UnexpectedEnd,
    #[error("Unexpected character {ch:?} at position {pos}")]
    UnexpectedChar { ch: char, pos: usize },
    #[error("Invalid number at position {0}")]
    InvalidNumber(usize),
    #[error("Invalid escape sequence at position {0}")]
    InvalidEscape(usize),
    #[error("Unexpected non-whitespace character after JSON at position {0}")]
    TrailingCharacters(usize),
    #[error("Nesting too deep at position {0}")]
    DepthLimit(usize),
    #[error("Invalid UTF-8 at position {0}")]
    InvalidUtf8(usize),
}

#[derive(Debug, Clone, PartialEq)]
pub enum JsonValue<'input> {
    String(Cow<'input, str>),
    Number(f64),
    Object(Vec<(Cow<'input, str>, JsonValue<'input>)>),
    List(Vec<JsonValue<'input>>),
    Boolean(bool),
    Null,
}

static NULL: JsonValue<'static> = JsonValue::Null;

impl<'input> JsonValue<'input> {
    /// Looks up an object member. Duplicate keys resolve to the last one.
    pub fn get(&self, key: &str) -> Option<&JsonValue<'input>> {
        match self {
            JsonValue::Object(members) => members
                .iter()
                .rev()
                .find(|(k, _)| k.as_ref() == key)
                .map(|(_, value)| value),
            _ => None,
        }
    }

    pub fn get_index(&self, idx: usize) -> Option<&JsonValue<'input>> {
        match self {
            JsonValue::List(values) => values.get(idx),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            JsonValue::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            JsonValue::Number(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            JsonValue::Boolean(b) => Some(*b),
            _ => None,
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, JsonValue::Null)
    }
}

/// Missing indexes and non-list values yield `Null`.
impl<'input> Index<usize> for JsonValue<'input> {
    type Output = JsonValue<'input>;

    fn index(&self, idx: usize) -> &Self::Output {
        self.get_index(idx).unwrap_or(&NULL)
    }
}

/// Missing keys and non-object values yield `Null`.
impl<'input> Index<&str> for JsonValue<'input> {
    type Output = JsonValue<'input>;

    fn index(&self, key: &str) -> &Self::Output {
        self.get(key).unwrap_or(&NULL)
    }
}

struct Parser<'input> {
    input: &'input str,
    bytes: &'input [u8],
    current: usize,
    depth: usize,
}

impl<'input> Parser<'input> {
    fn new(input: &'input str) -> Self {
        Self {
            input,
            bytes: input.as_bytes(),
            current: 0,
            depth: 0,
        }
    }

    fn peek(&self) -> Option<u8> {
        self.bytes.get(self.current).copied()
    }

    fn skip_whitespace(&mut self) {
        while let Some(b' ' | b'\t' | b'\n' | b'\r') = self.peek() {
            self.current += 1;
        }
    }

    fn unexpected(&self) -> ParserError {
        match self.input.get(self.current..).and_then(|rest| rest.chars().next()) {
            Some(ch) => ParserError::UnexpectedChar {
                ch,
                pos: self.current,
            },
            None => ParserError::UnexpectedEnd,
        }
    }

    fn expect(&mut self, byte: u8) -> Result<(), ParserError> {
        self.skip_whitespace();
        if self.peek() == Some(byte) {
            self.current += 1;
            Ok(())
        } else {
            Err(self.unexpected())
        }
    }

    fn descend(&mut self) -> Result<(), ParserError> {
        if self.depth == MAX_DEPTH {
            return Err(ParserError::DepthLimit(self.current));
        }
        self.depth += 1;
        Ok(())
    }

    fn value(&mut self) -> Result<JsonValue<'input>, ParserError> {
        self.skip_whitespace();
        match self.peek() {
            None => Err(ParserError::UnexpectedEnd),
            Some(b'{') => self.object(),
            Some(b'[') => self.list(),
            Some(b'"') => Ok(JsonValue::String(self.string()?)),
            Some(b't') => self.literal("true", JsonValue::Boolean(true)),
            Some(b'f') => self.literal("false", JsonValue::Boolean(false)),
            Some(b'n') => self.literal("null", JsonValue::Null),
            Some(b'-' | b'0'..=b'9') => self.number(),
            Some(_) => Err(self.unexpected()),
        }
    }

    fn literal(
        &mut self,
        word: &'static str,
        value: JsonValue<'input>,
    ) -> Result<JsonValue<'input>, ParserError> {
        for expected in word.bytes() {
            match self.peek() {
                Some(b) if b == expected => self.current += 1,
                _ => return Err(self.unexpected()),
            }
        }
        Ok(value)
    }

    fn object(&mut self) -> Result<JsonValue<'input>, ParserError> {
        self.descend()?;
        self.current += 1;
        let mut members = Vec::new();

        self.skip_whitespace();
        if self.peek() == Some(b'}') {
            self.current += 1;
            self.depth -= 1;
            return Ok(JsonValue::Object(members));
        }

        loop {
            self.skip_whitespace();
            if self.peek() != Some(b'"') {
                return Err(self.unexpected());
            }
            let key = self.string()?;
            self.expect(b':')?;
            let value = self.value()?;
            members.push((key, value));

            self.skip_whitespace();
            match self.peek() {
                Some(b',') => self.current += 1,
                Some(b'}') => {
                    self.current += 1;
                    break;
                }
                _ => return Err(self.unexpected()),
            }
        }

        self.depth -= 1;
        Ok(JsonValue::Object(members))
    }

    fn list(&mut self) -> Result<JsonValue<'input>, ParserError> {
        self.descend()?;
        self.current += 1;
        let mut values = Vec::new();

        self.skip_whitespace();
        if self.peek() == Some(b']') {
            self.current += 1;
            self.depth -= 1;
            return Ok(JsonValue::List(values));
        }

        loop {
            values.push(self.value()?);

            self.skip_whitespace();
            match self.peek() {
                Some(b',') => self.current += 1,
                Some(b']') => {
                    self.current += 1;
                    break;
                }
                _ => return Err(self.unexpected()),
            }
        }

        self.depth -= 1;
        Ok(JsonValue::List(values))
    }

    // Borrows from the input unless an escape forces a copy.
    fn string(&mut self) -> Result<Cow<'input, str>, ParserError> {
        self.current += 1;
        let start = self.current;

        loop {
            match self.peek() {
                None => return Err(ParserError::UnexpectedEnd),
                Some(b'"') => {
                    let s = &self.input[start..self.current];
                    self.current += 1;
                    return Ok(Cow::Borrowed(s));
                }
                Some(b'\\') => break,
                Some(b) if b < 0x20 => return Err(self.unexpected()),
                Some(_) => self.current += 1,
            }
        }

        let mut owned = String::from(&self.input[start..self.current]);
        loop {
            match self.peek() {
                None => return Err(ParserError::UnexpectedEnd),
                Some(b'"') => {
                    self.current += 1;
                    return Ok(Cow::Owned(owned));
                }
                Some(b'\\') => owned.push(self.escape()?),
                Some(b) if b < 0x20 => return Err(self.unexpected()),
                Some(_) => {
                    let run = self.current;
                    while let Some(b) = self.peek() {
                        if b == b'"' || b == b'\\' || b < 0x20 {
                            break;
                        }
                        self.current += 1;
                    }
                    owned.push_str(&self.input[run..self.current]);
                }
            }
        }
    }

    fn escape(&mut self) -> Result<char, ParserError> {
        let at = self.current;
        self.current += 1;
        let Some(b) = self.peek() else {
            return Err(ParserError::UnexpectedEnd);
        };
        self.current += 1;
        let c = match b {
            b'"' => '"',
            b'\\' => '\\',
            b'/' => '/',
            b'b' => '\u{8}',
            b'f' => '\u{c}',
            b'n' => '\n',
            b'r' => '\r',
            b't' => '\t',
            b'u' => return self.unicode_escape(at),
            _ => return Err(ParserError::InvalidEscape(at)),
        };
        Ok(c)
    }

    fn unicode_escape(&mut self, at: usize) -> Result<char, ParserError> {
        let first = self.hex4(at)?;
        match first {
            0xD800..=0xDBFF => {
                if self.bytes.get(self.current..self.current + 2) != Some(&b"\\u"[..]) {
                    return Err(ParserError::InvalidEscape(at));
                }
                self.current += 2;
                let second = self.hex4(at)?;
                if !(0xDC00..=0xDFFF).contains(&second) {
                    return Err(ParserError::InvalidEscape(at));
                }
                let code =
                    0x10000 + ((u32::from(first) - 0xD800) << 10) + (u32::from(second) - 0xDC00);
                char::from_u32(code).ok_or(ParserError::InvalidEscape(at))
            }
            0xDC00..=0xDFFF => Err(ParserError::InvalidEscape(at)),
            _ => char::from_u32(u32::from(first)).ok_or(ParserError::InvalidEscape(at)),
        }
    }

    fn hex4(&mut self, at: usize) -> Result<u16, ParserError> {
        let digits = self
            .bytes
            .get(self.current..self.current + 4)
            .ok_or(ParserError::UnexpectedEnd)?;
        let mut unit = 0u16;
        for &d in digits {
            let nibble = char::from(d)
                .to_digit(16)
                .ok_or(ParserError::InvalidEscape(at))?;
            unit = (unit << 4) | nibble as u16;
        }
        self.current += 4;
        Ok(unit)
    }

    fn digits(&mut self) -> usize {
        let start = self.current;
        while let Some(b'0'..=b'9') = self.peek() {
            self.current += 1;
        }
        self.current - start
    }

    fn number(&mut self) -> Result<JsonValue<'input>, ParserError> {
        let start = self.current;
        if self.peek() == Some(b'-') {
            self.current += 1;
        }

        // no leading zeros: "0" stands alone, anything after it is not part of the number
        match self.peek() {
            Some(b'0') => self.current += 1,
            Some(b'1'..=b'9') => {
                self.digits();
            }
            _ => return Err(ParserError::InvalidNumber(start)),
        }

        if self.peek() == Some(b'.') {
            self.current += 1;
            if self.digits() == 0 {
                return Err(ParserError::InvalidNumber(start));
            }
        }

        if let Some(b'e' | b'E') = self.peek() {
            self.current += 1;
            if let Some(b'+' | b'-') = self.peek() {
                self.current += 1;
            }
            if self.digits() == 0 {
                return Err(ParserError::InvalidNumber(start));
            }
        }

        self.input[start..self.current]
            .parse::<f64>()
            .map(JsonValue::Number)
            .map_err(|_| ParserError::InvalidNumber(start))
    }
}

/// Parses exactly one JSON value, surrounded by optional whitespace.
pub fn from_str(input: &str) -> Result<JsonValue<'_>, ParserError> {
    let mut parser = Parser::new(input);
    let value = parser.value()?;
    parser.skip_whitespace();
    if parser.current == input.len() {
        Ok(value)
    } else {
        Err(ParserError::TrailingCharacters(parser.current))
    }
}

pub fn from_slice(input: &[u8]) -> Result<JsonValue<'_>, ParserError> {
    let input =
        std::str::from_utf8(input).map_err(|e| ParserError::InvalidUtf8(e.valid_up_to()))?;
    from_str(input)
}
