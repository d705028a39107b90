use crate::shared::i18n::Language;

/// Formats an amount with two decimals and thousands separators
/// following the configured language (en: 1,234.56 / de: 1.234,56).
pub fn format_amount(value: f64, language: Language) -> String {
    let (decimal_sep, group_sep) = match language {
        Language::En => ('.', ','),
        Language::De => (',', '.'),
    };

    let negative = value < 0.0;
    let rounded = format!("{:.2}", value.abs());
    let (int_part, frac_part) = rounded.split_once('.').unwrap_or((rounded.as_str(), "00"));

    // Insert a group separator every three digits, counting from the right
    let mut grouped = String::new();
    let digits: Vec<char> = int_part.chars().collect();
    for (i, ch) in digits.iter().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(group_sep);
        }
        grouped.push(*ch);
    }

    let mut result = String::new();
    if negative {
        result.push('-');
    }
    result.push_str(&grouped);
    result.push(decimal_sep);
    result.push_str(frac_part);
    result
}
