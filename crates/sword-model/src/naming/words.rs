//! Word-level helpers: tokenizing, singularizing and case folding
//!
//! The inflection rules are deliberately approximate. They must not be
//! "improved": changing any of them renames previously generated types.

/// Any character other than a letter or digit separates words. Accented
/// and other non-ASCII letters belong to the word.
pub fn is_separator(c: char) -> bool {
    !c.is_alphanumeric()
}

/// Split a physical name into words.
///
/// Names containing separators are split on runs of separators. Otherwise
/// the name is split on case transitions: lower to upper, digit to letter,
/// and before the last capital of an acronym followed by a lowercase letter
/// ("PBSCode" becomes "PBS", "Code"). Empty words are dropped.
pub fn split_words(name: &str) -> Vec<String> {
    if name.chars().any(is_separator) {
        return name
            .split(is_separator)
            .filter(|part| !part.is_empty())
            .map(str::to_string)
            .collect();
    }
    split_case_transitions(name)
}

fn split_case_transitions(name: &str) -> Vec<String> {
    let chars: Vec<char> = name.chars().collect();
    let mut words = Vec::new();
    let mut current = String::new();

    for (i, &c) in chars.iter().enumerate() {
        if i > 0 {
            let prev = chars[i - 1];
            let next = chars.get(i + 1).copied();
            let boundary = (prev.is_ascii_lowercase() && c.is_ascii_uppercase())
                || (prev.is_ascii_digit() && c.is_ascii_alphabetic())
                || (prev.is_ascii_uppercase()
                    && c.is_ascii_uppercase()
                    && next.is_some_and(|n| n.is_ascii_lowercase()));
            if boundary && !current.is_empty() {
                words.push(std::mem::take(&mut current));
            }
        }
        current.push(c);
    }
    if !current.is_empty() {
        words.push(current);
    }
    words
}

/// Heuristic English singular of a lowercase word
pub fn singularize(word: &str) -> String {
    let len = word.len();
    if len > 3 && word.ends_with("ies") {
        return format!("{}y", &word[..len - 3]);
    }
    if len > 3
        && ["ses", "xes", "zes", "ches", "shes"]
            .iter()
            .any(|suffix| word.ends_with(suffix))
    {
        return word[..len - 2].to_string();
    }
    if len > 1 && word.ends_with('s') {
        return word[..len - 1].to_string();
    }
    word.to_string()
}

/// Append "s" unless the word already ends in s/S
pub fn pluralize(word: &str) -> String {
    if word.is_empty() || word.ends_with(['s', 'S']) {
        word.to_string()
    } else {
        format!("{}s", word)
    }
}

/// First character upper case, the rest lower case
pub fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + &chars.as_str().to_lowercase(),
        None => String::new(),
    }
}

/// Lower-case only the first character
pub fn lower_first(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_lowercase().chain(chars).collect(),
        None => String::new(),
    }
}

fn is_acronym(word: &str) -> bool {
    word.chars().filter(|c| c.is_ascii_alphabetic()).count() > 1
        && !word.chars().any(|c| c.is_ascii_lowercase())
}

/// Derive an entity (type) name from a table name.
///
/// Each word is singularized and capitalized, then the words are joined:
/// "intervention_subcategories" becomes "InterventionSubcategory". Acronyms
/// split off by a case transition keep their trailing "s". A run-on
/// lowercase name has no boundaries to split on, so
/// "incidentsmaintenance" stays one word.
pub fn derive_entity_name(table: &str) -> String {
    if table.trim().is_empty() {
        return table.to_string();
    }

    let case_split = !table.chars().any(is_separator);
    let words = split_words(table);
    if words.is_empty() {
        return capitalize(table);
    }

    let keep_acronyms = case_split && words.len() > 1;
    words
        .iter()
        .map(|word| {
            if keep_acronyms && is_acronym(word) {
                capitalize(word)
            } else {
                capitalize(&singularize(&word.to_lowercase()))
            }
        })
        .collect()
}

/// Derive a field name from a column name.
///
/// Separated names are camel-folded ("problem_id" becomes "problemId").
/// Names without a separator keep their casing apart from the first
/// character, so "PBSCode" becomes "pBSCode" and derivation is idempotent.
pub fn derive_field_name(column: &str) -> String {
    if column.trim().is_empty() {
        return column.to_string();
    }
    if !column.chars().any(is_separator) {
        return lower_first(column);
    }

    let mut parts = column.split(is_separator);
    let first = parts.next().unwrap_or_default();
    let rest: Vec<&str> = parts.filter(|part| !part.is_empty()).collect();
    if first.is_empty() && rest.is_empty() {
        return column.to_string();
    }

    let mut name = first.to_lowercase();
    for part in rest {
        name.push_str(&capitalize(part));
    }
    name
}
