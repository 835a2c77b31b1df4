use regex::{NoExpand, Regex};

/// Replacement for nicknames and detected personal information
pub const DEFAULT_PLACEHOLDER: &str = "<>";

const EMAIL_PATTERN: &str = r"\b[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}\b";

// The number itself is capture group 1. The trailing `(?:\D|$)` stands in for
// a "no digit after" look-ahead; "no digit before" is checked in `mask_phones`.
const PHONE_PATTERN: &str = r"(?x)
    (
        (?:\+?\d{1,3}[\s.-]?)?   # optional country code
        (?:\d{2,4}[\s.-]?){2,3}
        \d{2,4}
    )
    (?:\D|$)
";

const TRAILING_HASH_PATTERN: &str = r"\s*\([0-9a-fA-F]{8,}\)\s*$";

/// Masks e-mail addresses and phone-number-like digit runs
pub struct Redactor {
    placeholder: String,
    email: Regex,
    phone: Regex,
    digit: Regex,
    trailing_hash: Regex,
}

impl Redactor {
    pub fn new(placeholder: impl Into<String>) -> Self {
        Self {
            placeholder: placeholder.into(),
            email: Regex::new(EMAIL_PATTERN).expect("email pattern is valid"),
            phone: Regex::new(PHONE_PATTERN).expect("phone pattern is valid"),
            digit: Regex::new(r"^\d$").expect("digit pattern is valid"),
            trailing_hash: Regex::new(TRAILING_HASH_PATTERN).expect("hash pattern is valid"),
        }
    }

    pub fn placeholder(&self) -> &str {
        &self.placeholder
    }

    /// Replace e-mail addresses, then phone numbers, with the placeholder
    pub fn mask(&self, text: &str) -> String {
        let masked = self.email.replace_all(text, NoExpand(&self.placeholder));
        self.mask_phones(&masked)
    }

    /// Remove a trailing `(hex)` user hash of 8 or more hex digits
    pub fn strip_trailing_hash<'a>(&self, text: &'a str) -> std::borrow::Cow<'a, str> {
        self.trailing_hash.replace(text, "")
    }

    /// Rewrite one log line: drop the nickname and trailing user hash, mask
    /// personal information and keep the bracketed prefix as-is.
    ///
    /// The result always ends with exactly one `\n`.
    pub fn mask_line(&self, line: &str) -> String {
        let stripped = line.strip_suffix('\n').unwrap_or(line);
        let stripped = stripped.strip_suffix('\r').unwrap_or(stripped);

        if !stripped.starts_with('[') {
            return format!("{}\n", self.mask(stripped).trim());
        }

        let Some(end) = stripped.find(']') else {
            return format!("{}\n", self.mask(stripped));
        };

        let (prefix, remainder) = stripped.split_at(end + 1);
        let body = match remainder.split_once(':') {
            Some((_nickname, message)) => message,
            None => remainder,
        };

        let masked = self.mask(&self.strip_trailing_hash(body));
        let masked = masked.trim_start();
        if masked.is_empty() {
            format!("{}\n", prefix)
        } else {
            format!("{} {}\n", prefix, masked)
        }
    }

    fn mask_phones(&self, text: &str) -> String {
        let mut result = String::with_capacity(text.len());
        let mut copied = 0;
        let mut pos = 0;

        while let Some(number) = self
            .phone
            .captures_at(text, pos)
            .and_then(|caps| caps.get(1))
        {
            let preceded_by_digit = text[..number.start()]
                .chars()
                .next_back()
                .is_some_and(|c| self.digit.is_match(c.encode_utf8(&mut [0; 4])));

            if preceded_by_digit {
                // Retry one character later, like a failed look-behind would.
                pos = number.start()
                    + text[number.start()..]
                        .chars()
                        .next()
                        .map_or(1, char::len_utf8);
                continue;
            }

            result.push_str(&text[copied..number.start()]);
            result.push_str(&self.placeholder);
            copied = number.end();
            pos = number.end();
        }

        result.push_str(&text[copied..]);
        result
    }
}

impl Default for Redactor {
    fn default() -> Self {
        Self::new(DEFAULT_PLACEHOLDER)
    }
}
