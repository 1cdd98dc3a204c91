//! Quote-aware splitting of a single CSV line.

/// Split one CSV line into trimmed fields.
///
/// A `"` toggles the in-quotes state and is dropped; a `,` outside quotes
/// ends the current field. The trailing field is always flushed, so an
/// empty line yields one empty field.
pub fn split_csv_line(line: &str) -> Vec<String> {
    let mut fields = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;

    for ch in line.chars() {
        match ch {
            '"' => in_quotes = !in_quotes,
            ',' if !in_quotes => {
                fields.push(current.trim().to_string());
                current.clear();
            }
            _ => current.push(ch),
        }
    }
    fields.push(current.trim().to_string());
    fields
}

#[cfg(test)]
mod tests {
    use super::split_csv_line;

    #[test]
    fn test_plain_fields() {
        assert_eq!(split_csv_line("a,b,c"), vec!["a", "b", "c"]);
    }

    #[test]
    fn test_quoted_field_keeps_commas() {
        let fields = split_csv_line(r#"7,"Planta Norte, Sector 2",Co1,"$1,000,000",2020-01-01"#);
        assert_eq!(
            fields,
            vec!["7", "Planta Norte, Sector 2", "Co1", "$1,000,000", "2020-01-01"]
        );
    }

    #[test]
    fn test_trims_whitespace_and_trailing_cr() {
        assert_eq!(split_csv_line(" a , b ,c\r"), vec!["a", "b", "c"]);
    }

    #[test]
    fn test_empty_and_trailing_fields() {
        assert_eq!(split_csv_line(""), vec![""]);
        assert_eq!(split_csv_line("a,,"), vec!["a", "", ""]);
    }

    #[test]
    fn test_unterminated_quote_swallows_rest() {
        assert_eq!(split_csv_line(r#"a,"b,c"#), vec!["a", "b,c"]);
    }
}
