use super::tree::Attributes;

#[derive(Debug, Clone, PartialEq, Eq)]
enum Token {
    Key(String),
    Value(String),
}

impl Token {
    fn into_text(self) -> String {
        match self {
            Self::Key(text) | Self::Value(text) => text,
        }
    }
}

/// Lexes the attribute list of a tag (`HREF="…" ADD_DATE="…"`) into a map.
///
/// Tokens are paired positionally, so a malformed list pairs unpredictably
/// instead of failing. An unterminated quote runs to the end of the input and
/// a trailing unpaired token is dropped.
pub fn tokenize_attributes(raw: &str) -> Attributes {
    let mut tokens = lex(raw).into_iter();
    let mut attributes = Attributes::new();

    while let (Some(key), Some(value)) = (tokens.next(), tokens.next()) {
        attributes.insert(key.into_text(), value.into_text());
    }

    attributes
}

fn lex(raw: &str) -> Vec<Token> {
    let mut tokens = Vec::new();
    let mut buffer = String::new();
    let mut chars = raw.chars();

    while let Some(ch) = chars.next() {
        match ch {
            '"' => {
                let value: String = chars.by_ref().take_while(|&c| c != '"').collect();
                tokens.push(Token::Value(value));
                buffer.clear();
            }
            '=' => tokens.push(Token::Key(std::mem::take(&mut buffer))),
            ' ' => buffer.clear(),
            _ => buffer.push(ch),
        }
    }

    tokens
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pairs_keys_with_quoted_values() {
        let attributes = tokenize_attributes(r#"HREF="http://x" ADD_DATE="123""#);
        assert_eq!(attributes.get("HREF"), Some("http://x"));
        assert_eq!(attributes.get("ADD_DATE"), Some("123"));
        assert_eq!(attributes.len(), 2);
    }

    #[test]
    fn quoted_values_keep_spaces_and_equals_signs() {
        let attributes = tokenize_attributes(r#"HREF="http://x/?a=1&b=2" TITLE="two words""#);
        assert_eq!(attributes.get("HREF"), Some("http://x/?a=1&b=2"));
        assert_eq!(attributes.get("TITLE"), Some("two words"));
    }

    #[test]
    fn preserves_first_appearance_order() {
        let attributes = tokenize_attributes(r#"B="2" A="1" C="3""#);
        let keys: Vec<_> = attributes.iter().map(|(key, _)| key).collect();
        assert_eq!(keys, vec!["B", "A", "C"]);
    }

    #[test]
    fn empty_input_yields_empty_map() {
        assert!(tokenize_attributes("").is_empty());
        assert!(tokenize_attributes("   ").is_empty());
    }

    #[test]
    fn unterminated_quote_and_dangling_key_do_not_panic() {
        let attributes = tokenize_attributes(r#"HREF="http://x"#);
        assert_eq!(attributes.get("HREF"), Some("http://x"));

        let attributes = tokenize_attributes(r#"HREF="http://x" ADD_DATE="#);
        assert_eq!(attributes.get("HREF"), Some("http://x"));
        assert_eq!(attributes.get("ADD_DATE"), None);
    }

    #[test]
    fn missing_value_shifts_pairing() {
        let attributes = tokenize_attributes(r#"A= B="2""#);
        assert_eq!(attributes.get("A"), Some("B"));
        assert_eq!(attributes.len(), 1);
    }
}
