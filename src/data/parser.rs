use super::types::{DataError, Listing};

/// Classifies a raw data-server reply and extracts the listing records.
///
/// The first line decides the outcome: an `ERROR` marker is passed through,
/// anything that is not an `OK RESULT` success marker is rejected, and an
/// empty reply means the transport never delivered anything. A success line
/// that declares a non-zero count while the body yields no extractable record
/// is treated as a parse failure rather than an empty success; the reverse
/// mismatch (declared zero, records present) is taken as a benign over-report.
pub fn parse_response(raw: &str) -> Result<Vec<Listing>, DataError> {
    if raw.is_empty() {
        return Err(DataError::NoResponse);
    }

    let first = raw.lines().next().unwrap_or("").trim();

    if starts_with_ci(first, "ERROR") {
        let msg = match first.split_once(' ') {
            Some((_, rest)) => rest.to_string(),
            None => "data server error".to_string(),
        };
        return Err(DataError::Backend(msg));
    }

    if !starts_with_ci(first, "OK RESULT") {
        return Err(DataError::UnexpectedResponse);
    }

    let listings = extract_listings(raw);

    let declared = first
        .split_whitespace()
        .last()
        .and_then(|tok| tok.parse::<u64>().ok());
    if let Some(n) = declared {
        if n > 0 && listings.is_empty() {
            return Err(DataError::UnparsableListings);
        }
    }

    Ok(listings)
}

/// Scans the reply body for listing records.
///
/// A record is the five-field sequence `id=..;city=..;address=..;price=..;
/// bedrooms=..` with case-insensitive keys, optional whitespace around `=`
/// and `;`, and values optionally wrapped in `<`/`>` markers. Records may sit
/// one per line or concatenated. A candidate that fails mid-record (missing
/// field, non-numeric id/price/bedrooms) is skipped and the scan resumes,
/// so one malformed record never poisons the rest of the reply.
pub fn extract_listings(raw: &str) -> Vec<Listing> {
    let mut listings = Vec::new();
    let mut pos = 0;

    while let Some(off) = find_ci(&raw[pos..], "id") {
        let start = pos + off;
        let mut scanner = Scanner {
            text: raw,
            pos: start,
        };
        match scanner.record() {
            Some(listing) => {
                listings.push(listing);
                pos = scanner.pos;
            }
            // Not a record after all; step past this candidate.
            None => pos = start + 1,
        }
    }

    listings
}

fn starts_with_ci(text: &str, prefix: &str) -> bool {
    text.get(..prefix.len())
        .is_some_and(|head| head.eq_ignore_ascii_case(prefix))
}

/// Byte offset of the first case-insensitive occurrence of an ASCII needle.
fn find_ci(haystack: &str, needle: &str) -> Option<usize> {
    let h = haystack.as_bytes();
    let n = needle.as_bytes();
    if n.is_empty() || h.len() < n.len() {
        return None;
    }
    (0..=h.len() - n.len()).find(|&i| h[i..i + n.len()].eq_ignore_ascii_case(n))
}

/// Cursor over the reply text; all helpers advance `pos` only on success of
/// the piece they consumed, so a failed `record()` leaves the caller free to
/// resume from the next candidate.
struct Scanner<'a> {
    text: &'a str,
    pos: usize,
}

impl<'a> Scanner<'a> {
    fn record(&mut self) -> Option<Listing> {
        let id = self.numeric_field("id")?;
        self.semicolon()?;
        let city = self.text_field("city")?;
        self.semicolon()?;
        let address = self.text_field("address")?;
        self.semicolon()?;
        let price = self.numeric_field("price")?;
        self.semicolon()?;
        let bedrooms = self.numeric_field("bedrooms")?;

        Some(Listing {
            id,
            city,
            address,
            price,
            bedrooms,
        })
    }

    fn numeric_field(&mut self, key: &str) -> Option<u64> {
        self.key_equals(key)?;
        self.eat('<');
        let n = self.digits()?;
        self.eat('>');
        Some(n)
    }

    fn text_field(&mut self, key: &str) -> Option<String> {
        self.key_equals(key)?;
        self.eat('<');
        let value = self.value_chars()?;
        self.eat('>');
        Some(value.trim().to_string())
    }

    /// `<key> \s* = \s*` with a case-insensitive key.
    fn key_equals(&mut self, key: &str) -> Option<()> {
        self.skip_ws();
        if !starts_with_ci(self.rest(), key) {
            return None;
        }
        self.pos += key.len();
        self.skip_ws();
        if !self.eat('=') {
            return None;
        }
        self.skip_ws();
        Some(())
    }

    fn semicolon(&mut self) -> Option<()> {
        self.skip_ws();
        if self.eat(';') {
            Some(())
        } else {
            None
        }
    }

    /// One or more ASCII digits parsed as an integer.
    fn digits(&mut self) -> Option<u64> {
        let rest = self.rest();
        let len = rest.bytes().take_while(|b| b.is_ascii_digit()).count();
        if len == 0 {
            return None;
        }
        let parsed = rest[..len].parse::<u64>().ok()?;
        self.pos += len;
        Some(parsed)
    }

    /// One or more characters that are not a field separator or a delimiter
    /// marker.
    fn value_chars(&mut self) -> Option<&'a str> {
        let rest = self.rest();
        let len = rest
            .char_indices()
            .find(|&(_, c)| c == ';' || c == '<' || c == '>')
            .map(|(i, _)| i)
            .unwrap_or(rest.len());
        if len == 0 {
            return None;
        }
        self.pos += len;
        Some(&rest[..len])
    }

    fn rest(&self) -> &'a str {
        &self.text[self.pos..]
    }

    fn skip_ws(&mut self) {
        let skipped = self
            .rest()
            .char_indices()
            .find(|&(_, c)| !c.is_whitespace())
            .map(|(i, _)| i)
            .unwrap_or(self.rest().len());
        self.pos += skipped;
    }

    fn eat(&mut self, expected: char) -> bool {
        if self.rest().starts_with(expected) {
            self.pos += expected.len_utf8();
            true
        } else {
            false
        }
    }
}
