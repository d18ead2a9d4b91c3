/// Split one line into whitespace separated tokens. A double quote starts a
/// run that extends to the matching quote (or the end of the line), so string
/// constants may contain whitespace. Tokens are never empty.
pub fn tokenize(line: &str) -> Vec<&str> {
    let mut tokens = Vec::new();
    let mut chars = line.char_indices().peekable();

    loop {
        while chars.next_if(|(_, c)| c.is_whitespace()).is_some() {}
        let start = match chars.peek() {
            Some(&(i, _)) => i,
            None => break,
        };

        let mut end = line.len();
        while let Some(&(i, c)) = chars.peek() {
            if c.is_whitespace() {
                end = i;
                break;
            }
            chars.next();
            if c == '"' {
                for (_, c) in chars.by_ref() {
                    if c == '"' {
                        break;
                    }
                }
            }
        }
        tokens.push(&line[start..end]);
    }
    tokens
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tokenize() {
        assert_eq!(tokenize("istore 7"), vec!["istore", "7"]);
        assert_eq!(tokenize("  \tinvokevirtual   Foo.bar:(I)V  "), vec!["invokevirtual", "Foo.bar:(I)V"]);
        assert_eq!(tokenize("L1:"), vec!["L1:"]);
    }

    #[test]
    fn test_blank() {
        assert!(tokenize("").is_empty());
        assert!(tokenize(" \t  ").is_empty());
    }

    #[test]
    fn test_quoted() {
        assert_eq!(tokenize(r#"ldc "hello world""#), vec!["ldc", r#""hello world""#]);
        assert_eq!(tokenize(r#"ldc "a  b"c d"#), vec!["ldc", r#""a  b"c"#, "d"]);
        // unterminated quote swallows the rest of the line
        assert_eq!(tokenize(r#"ldc "oops x y"#), vec!["ldc", r#""oops x y"#]);
        assert_eq!(tokenize(r#"ldc """#), vec!["ldc", r#""""#]);
    }
}
