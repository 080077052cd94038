//! Human-readable labels for form field keys
//!
//! Field keys follow the camelCase JSON shape of the forms (`businessName`,
//! `addressLine1`, `monday.openTime`). Default validation messages refer to
//! the field by a sentence-cased label derived from that key.

/// Utility for turning field keys into display labels
pub struct Labeler;

impl Labeler {
    /// Convert a field key into a sentence-cased label
    ///
    /// # Examples
    ///
    /// ```
    /// use onboard::core::label::Labeler;
    ///
    /// assert_eq!(Labeler::humanize("businessName"), "Business name");
    /// assert_eq!(Labeler::humanize("postal_code"), "Postal code");
    /// assert_eq!(Labeler::humanize("addressLine1"), "Address line 1");
    /// assert_eq!(Labeler::humanize("monday.openTime"), "Monday open time");
    /// ```
    pub fn humanize(key: &str) -> String {
        let mut words: Vec<String> = Vec::new();
        let mut current = String::new();
        let mut prev: Option<char> = None;

        for c in key.chars() {
            match c {
                '_' | '-' | '.' | ' ' => {
                    if !current.is_empty() {
                        words.push(std::mem::take(&mut current));
                    }
                }
                c if c.is_uppercase() => {
                    // Start a new word unless we are inside an acronym
                    if !current.is_empty() && !prev.is_some_and(char::is_uppercase) {
                        words.push(std::mem::take(&mut current));
                    }
                    current.push(c);
                }
                c if c.is_ascii_digit() => {
                    if !current.is_empty() && !prev.is_some_and(|p| p.is_ascii_digit()) {
                        words.push(std::mem::take(&mut current));
                    }
                    current.push(c);
                }
                c => {
                    if prev.is_some_and(|p| p.is_ascii_digit()) && !current.is_empty() {
                        words.push(std::mem::take(&mut current));
                    } else if prev.is_some_and(char::is_uppercase)
                        && current.chars().count() > 1
                        && current.chars().all(char::is_uppercase)
                    {
                        // "IDNumber": the last capital of the run opens the next word
                        if let Some(last) = current.pop() {
                            words.push(std::mem::take(&mut current));
                            current.push(last);
                        }
                    }
                    current.push(c);
                }
            }
            prev = Some(c);
        }
        if !current.is_empty() {
            words.push(current);
        }

        let sentence = words
            .iter()
            .map(|w| {
                // Keep acronyms such as "URL" intact
                if w.len() > 1 && w.chars().all(|c| c.is_uppercase()) {
                    w.clone()
                } else {
                    w.to_lowercase()
                }
            })
            .collect::<Vec<_>>()
            .join(" ");

        Self::capitalize(&sentence)
    }

    /// Uppercase the first character, leave the rest untouched
    ///
    /// ```
    /// use onboard::core::label::Labeler;
    ///
    /// assert_eq!(Labeler::capitalize("city"), "City");
    /// assert_eq!(Labeler::capitalize(""), "");
    /// ```
    pub fn capitalize(s: &str) -> String {
        let mut chars = s.chars();
        match chars.next() {
            Some(first) => first.to_uppercase().chain(chars).collect(),
            None => String::new(),
        }
    }
}
