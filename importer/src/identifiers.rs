use std::collections::HashSet;

const FALLBACK: &str = "Item";

/// Decodes `_xHHHH_` escapes produced when XML names were encoded.
pub fn decode_name(name: &str) -> String {
    let chars = name.chars().collect::<Vec<_>>();
    let mut result = String::with_capacity(name.len());
    let mut index = 0;

    while index < chars.len() {
        if let Some(decoded) = decode_escape(&chars[index..]) {
            result.push(decoded);
            index += 7;
        } else {
            result.push(chars[index]);
            index += 1;
        }
    }

    result
}

fn decode_escape(chars: &[char]) -> Option<char> {
    if chars.len() < 7 || chars[0] != '_' || chars[1] != 'x' || chars[6] != '_' {
        return None;
    }

    let hex = chars[2..6].iter().collect::<String>();
    u32::from_str_radix(&hex, 16).ok().and_then(char::from_u32)
}

/// Drops characters that cannot appear in an identifier.
pub fn make_valid(identifier: &str) -> String {
    let mut result = String::with_capacity(identifier.len());

    for c in identifier.chars().filter(|c| c.is_alphanumeric() || *c == '_') {
        if result.is_empty() && !(c.is_alphabetic() || c == '_') {
            result.push_str(FALLBACK);
        }

        result.push(c);
    }

    if result.is_empty() {
        FALLBACK.to_owned()
    } else {
        result
    }
}

pub fn make_pascal(identifier: &str) -> String {
    let mut chars = identifier.chars();

    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// A scope of names in use; new names get a numeric suffix until unique.
#[derive(Debug, Clone)]
pub struct CodeIdentifiers {
    names: HashSet<String>,
    case_sensitive: bool,
}

impl Default for CodeIdentifiers {
    fn default() -> Self {
        Self::new(true)
    }
}

impl CodeIdentifiers {
    pub fn new(case_sensitive: bool) -> Self {
        Self {
            names: HashSet::new(),
            case_sensitive,
        }
    }

    pub fn is_in_use(&self, identifier: &str) -> bool {
        self.names.contains(&self.key(identifier))
    }

    pub fn add_reserved(&mut self, identifier: &str) {
        self.names.insert(self.key(identifier));
    }

    pub fn make_unique(&self, identifier: &str) -> String {
        if !self.is_in_use(identifier) {
            return identifier.to_owned();
        }

        (1..)
            .map(|suffix| format!("{}{}", identifier, suffix))
            .find(|candidate| !self.is_in_use(candidate))
            .unwrap_or_else(|| identifier.to_owned())
    }

    pub fn add_unique(&mut self, identifier: &str) -> String {
        let unique = self.make_unique(identifier);
        self.add_reserved(&unique);
        unique
    }

    fn key(&self, identifier: &str) -> String {
        if self.case_sensitive {
            identifier.to_owned()
        } else {
            identifier.to_lowercase()
        }
    }
}
