//! Streaming decoder for a JSON array of strings.
//!
//! Accepts exactly one shape, `[ "..." , "..." ]`, from an untrusted byte
//! span with an explicit length. Anything else is rejected with a
//! [`ParseError`] and no partial result.
//!
//! Compatibility limitation: escape sequences are not interpreted. A
//! backslash only prevents the following byte from terminating the
//! string; both bytes are kept verbatim. `["a\"b"]` decodes to the four
//! bytes `a\"b`, and `\n` or `\u00e9` likewise stay as written.
//!
//! Separators are permissive: repeated or trailing commas are skipped and
//! adjacent strings need no comma between them. Bytes after the closing
//! `]` are ignored.

use crate::errors::ParseError;

/// Capacity reserved before the first element is decoded.
pub const INITIAL_CAPACITY: usize = 10;

/// Owned, ordered list of raw strings decoded from a JSON array.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct DecodedTextList {
    items: Vec<Vec<u8>>,
}

impl DecodedTextList {
    /// Number of elements.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether the array was empty.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Reserved element slots.
    pub fn capacity(&self) -> usize {
        self.items.capacity()
    }

    /// Element `i`, as the raw bytes between its quotes.
    pub fn get(&self, i: usize) -> Option<&[u8]> {
        self.items.get(i).map(Vec::as_slice)
    }

    /// Iterate elements in array order.
    pub fn iter(&self) -> impl Iterator<Item = &[u8]> + '_ {
        self.items.iter().map(Vec::as_slice)
    }

    /// Borrowed views of every element, in order.
    pub fn as_slices(&self) -> Vec<&[u8]> {
        self.iter().collect()
    }

    /// Take ownership of the elements.
    pub fn into_inner(self) -> Vec<Vec<u8>> {
        self.items
    }
}

struct Cursor<'a> {
    bytes: &'a [u8],
    pos: usize,
}

impl<'a> Cursor<'a> {
    fn new(bytes: &'a [u8]) -> Self {
        Self { bytes, pos: 0 }
    }

    fn peek(&self) -> Option<u8> {
        self.bytes.get(self.pos).copied()
    }

    fn skip_whitespace(&mut self) {
        while matches!(self.peek(), Some(b' ' | b'\t' | b'\n' | b'\r')) {
            self.pos += 1;
        }
    }

    /// Consume a string token; the cursor must sit on its opening quote.
    fn string_token(&mut self) -> Result<&'a [u8], ParseError> {
        let open = self.pos;
        let start = open + 1;
        let mut i = start;
        while i < self.bytes.len() {
            match self.bytes[i] {
                b'"' => {
                    self.pos = i + 1;
                    return Ok(&self.bytes[start..i]);
                }
                b'\\' if i + 1 < self.bytes.len() => i += 2,
                _ => i += 1,
            }
        }
        Err(ParseError::UnterminatedString { start: open })
    }
}

/// Decode a JSON array of strings.
///
/// An empty array yields an empty list, not an error.
pub fn decode_string_array(input: &[u8]) -> Result<DecodedTextList, ParseError> {
    let mut cursor = Cursor::new(input);

    cursor.skip_whitespace();
    if cursor.peek() != Some(b'[') {
        return Err(ParseError::MissingOpenBracket { offset: cursor.pos });
    }
    cursor.pos += 1;

    let mut items: Vec<Vec<u8>> = Vec::with_capacity(INITIAL_CAPACITY);
    loop {
        cursor.skip_whitespace();
        match cursor.peek() {
            None => return Err(ParseError::MissingCloseBracket),
            Some(b']') => break,
            Some(b',') => cursor.pos += 1,
            Some(b'"') => items.push(cursor.string_token()?.to_vec()),
            Some(byte) => {
                return Err(ParseError::UnexpectedByte {
                    byte,
                    offset: cursor.pos,
                });
            }
        }
    }

    Ok(DecodedTextList { items })
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    fn decode(input: &str) -> Result<Vec<Vec<u8>>, ParseError> {
        decode_string_array(input.as_bytes()).map(DecodedTextList::into_inner)
    }

    // ── accepted shapes ─────────────────────────────────────────────

    #[test]
    fn two_strings() {
        assert_eq!(decode(r#"["a","b"]"#).unwrap(), vec![b"a".to_vec(), b"b".to_vec()]);
    }

    #[test]
    fn empty_array_is_empty_list() {
        let list = decode_string_array(b"[]").unwrap();
        assert!(list.is_empty());
        assert_eq!(list.len(), 0);
        assert!(decode_string_array(b"  [ \n ]").unwrap().is_empty());
    }

    #[test]
    fn whitespace_everywhere() {
        let list = decode(" \t\r\n[ \"x\" ,\n\t\"y z\" ] ").unwrap();
        assert_eq!(list, vec![b"x".to_vec(), b"y z".to_vec()]);
    }

    #[test]
    fn empty_strings_kept() {
        assert_eq!(decode(r#"["",""]"#).unwrap(), vec![Vec::<u8>::new(), Vec::new()]);
    }

    #[test]
    fn escapes_are_copied_verbatim() {
        let list = decode(r#"["a\"b","c\\","\n","\u00e9"]"#).unwrap();
        assert_eq!(list[0], br#"a\"b"#.to_vec());
        assert_eq!(list[1], br"c\\".to_vec());
        assert_eq!(list[2], br"\n".to_vec());
        assert_eq!(list[3], br"\u00e9".to_vec());
    }

    #[test]
    fn escaped_quote_does_not_end_string() {
        let list = decode(r#"["say \"hi\"", "next"]"#).unwrap();
        assert_eq!(list.len(), 2);
        assert_eq!(list[0], br#"say \"hi\""#.to_vec());
    }

    #[test]
    fn permissive_separators() {
        assert_eq!(decode(r#"[,"a",,"b",]"#).unwrap().len(), 2);
        assert_eq!(decode(r#"["a""b"]"#).unwrap().len(), 2);
    }

    #[test]
    fn trailing_content_after_close_ignored() {
        assert_eq!(decode(r#"["a"] garbage {"#).unwrap(), vec![b"a".to_vec()]);
    }

    #[test]
    fn utf8_bytes_preserved() {
        let list = decode(r#"["héllo", "日本"]"#).unwrap();
        assert_eq!(list[0], "héllo".as_bytes());
        assert_eq!(list[1], "日本".as_bytes());
    }

    #[test]
    fn explicit_length_respected() {
        let buf = br#"["a","b"]"#;
        assert_matches!(
            decode_string_array(&buf[..5]),
            Err(ParseError::MissingCloseBracket)
        );
    }

    // ── rejected shapes ─────────────────────────────────────────────

    #[test]
    fn missing_open_bracket() {
        assert_matches!(
            decode(r#""a","b"]"#),
            Err(ParseError::MissingOpenBracket { offset: 0 })
        );
        assert_matches!(
            decode("   {}"),
            Err(ParseError::MissingOpenBracket { offset: 3 })
        );
        assert_matches!(decode(""), Err(ParseError::MissingOpenBracket { offset: 0 }));
        assert_matches!(decode("  "), Err(ParseError::MissingOpenBracket { offset: 2 }));
    }

    #[test]
    fn missing_close_bracket() {
        assert_matches!(decode(r#"["a","b""#), Err(ParseError::MissingCloseBracket));
        assert_matches!(decode("["), Err(ParseError::MissingCloseBracket));
        assert_matches!(decode(r#"["a", "#), Err(ParseError::MissingCloseBracket));
    }

    #[test]
    fn unterminated_string() {
        assert_matches!(
            decode(r#"["a","bc"#),
            Err(ParseError::UnterminatedString { start: 5 })
        );
        assert_matches!(
            decode(r#"["abc\"]"#),
            Err(ParseError::UnterminatedString { start: 1 })
        );
    }

    #[test]
    fn backslash_as_last_byte() {
        assert_matches!(
            decode(r#"["a\"#),
            Err(ParseError::UnterminatedString { start: 1 })
        );
    }

    #[test]
    fn non_string_elements() {
        assert_matches!(
            decode(r#"["a", 1]"#),
            Err(ParseError::UnexpectedByte { byte: b'1', offset: 6 })
        );
        assert_matches!(
            decode(r#"[null]"#),
            Err(ParseError::UnexpectedByte { byte: b'n', .. })
        );
        assert_matches!(
            decode(r#"[["a"]]"#),
            Err(ParseError::UnexpectedByte { byte: b'[', .. })
        );
        assert_matches!(
            decode(r#"[{"a":"b"}]"#),
            Err(ParseError::UnexpectedByte { byte: b'{', .. })
        );
        assert_matches!(
            decode(r#"['a']"#),
            Err(ParseError::UnexpectedByte { byte: b'\'', .. })
        );
    }

    // ── growth ──────────────────────────────────────────────────────

    #[test]
    fn starts_with_initial_capacity() {
        let list = decode_string_array(br#"["only"]"#).unwrap();
        assert!(list.capacity() >= INITIAL_CAPACITY);
    }

    #[test]
    fn growth_keeps_order_and_contents() {
        let expected: Vec<String> = (0..37).map(|i| format!("text-{i}")).collect();
        let literal = format!(
            "[{}]",
            expected
                .iter()
                .map(|s| format!("\"{s}\""))
                .collect::<Vec<_>>()
                .join(",")
        );

        let list = decode_string_array(literal.as_bytes()).unwrap();
        assert_eq!(list.len(), 37);
        assert!(list.capacity() >= 37);
        for (i, item) in list.iter().enumerate() {
            assert_eq!(item, expected[i].as_bytes());
        }
        assert_eq!(list.get(36), Some(&b"text-36"[..]));
        assert_eq!(list.get(37), None);
    }

    #[test]
    fn error_after_growth_returns_no_partial_list() {
        let mut literal = String::from("[");
        for i in 0..25 {
            literal.push_str(&format!("\"{i}\","));
        }
        literal.push_str("42]");
        assert_matches!(
            decode_string_array(literal.as_bytes()),
            Err(ParseError::UnexpectedByte { byte: b'4', .. })
        );
    }

    #[test]
    fn as_slices_borrows_in_order() {
        let list = decode_string_array(br#"["x","yy"]"#).unwrap();
        assert_eq!(list.as_slices(), vec![&b"x"[..], &b"yy"[..]]);
    }

    // ── properties ──────────────────────────────────────────────────

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        fn plain_string() -> impl Strategy<Value = String> {
            "[a-zA-Z0-9 .,:;!?_-]{0,24}"
        }

        fn json_string_with_escapes() -> impl Strategy<Value = String> {
            proptest::collection::vec(
                prop_oneof![
                    "[a-z ]{1,4}",
                    Just(r#"\""#.to_string()),
                    Just(r"\\".to_string()),
                    Just(r"\n".to_string()),
                    Just("A".to_string()),
                ],
                0..6,
            )
            .prop_map(|parts| parts.concat())
        }

        fn literal(items: &[String], sep: &str) -> String {
            let quoted: Vec<String> = items.iter().map(|s| format!("\"{s}\"")).collect();
            format!("[{}]", quoted.join(sep))
        }

        proptest! {
            #[test]
            fn decodes_every_element_in_order(
                items in proptest::collection::vec(plain_string(), 0..40),
                sep in prop_oneof![Just(","), Just(", "), Just(" ,\n\t")],
            ) {
                let list = decode_string_array(literal(&items, sep).as_bytes()).unwrap();
                prop_assert_eq!(list.len(), items.len());
                for (got, want) in list.iter().zip(&items) {
                    prop_assert_eq!(got, want.as_bytes());
                }
            }

            #[test]
            fn escaped_elements_match_raw_text(
                items in proptest::collection::vec(json_string_with_escapes(), 0..16),
            ) {
                let list = decode_string_array(literal(&items, ",").as_bytes()).unwrap();
                prop_assert_eq!(list.len(), items.len());
                for (got, want) in list.iter().zip(&items) {
                    prop_assert_eq!(got, want.as_bytes());
                }
            }

            #[test]
            fn dropping_the_close_bracket_fails(
                items in proptest::collection::vec(plain_string(), 0..8),
            ) {
                let full = literal(&items, ",");
                let truncated = &full.as_bytes()[..full.len() - 1];
                prop_assert!(decode_string_array(truncated).is_err());
            }

            #[test]
            fn arbitrary_bytes_never_panic(input in proptest::collection::vec(any::<u8>(), 0..256)) {
                let _ = decode_string_array(&input);
            }
        }
    }
}
