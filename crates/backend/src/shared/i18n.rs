/// Supported output languages
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Language {
    En,
    De,
}

impl Language {
    pub fn from_code(code: &str) -> Self {
        match code.to_ascii_lowercase().as_str() {
            "de" => Language::De,
            _ => Language::En,
        }
    }
}

/// Fixed labels used in the table and CSV output
#[derive(Debug, Clone, Copy)]
pub struct Labels {
    /// Placeholder for rows whose sub-group value is empty
    pub unassigned: &'static str,
    /// Filler cell for group levels below the deepest nesting
    pub total: &'static str,
    /// Column header suffix for the difference column
    pub delta: &'static str,
}

impl Labels {
    pub fn for_language(language: Language) -> Self {
        match language {
            Language::En => Labels {
                unassigned: "not assigned",
                total: "total",
                delta: "delta",
            },
            Language::De => Labels {
                unassigned: "nicht zugeordnet",
                total: "Gesamt",
                delta: "Differenz",
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_codes_fall_back_to_english() {
        assert_eq!(Language::from_code("de"), Language::De);
        assert_eq!(Language::from_code("DE"), Language::De);
        assert_eq!(Language::from_code("en"), Language::En);
        assert_eq!(Language::from_code("fr"), Language::En);
        assert_eq!(Language::from_code(""), Language::En);
    }

    #[test]
    fn labels_match_the_language() {
        let en = Labels::for_language(Language::En);
        assert_eq!(en.unassigned, "not assigned");
        assert_eq!(en.total, "total");

        let de = Labels::for_language(Language::De);
        assert_eq!(de.unassigned, "nicht zugeordnet");
        assert_eq!(de.delta, "Differenz");
    }
}
