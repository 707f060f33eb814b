use std::collections::HashSet;

use heck::ToPascalCase;
use indexmap::IndexMap;

/// Irregular plural → singular pairs, keyed by the lowercase plural.
const IRREGULAR_PLURALS: &[(&str, &str)] = &[
    ("people", "person"),
    ("children", "child"),
    ("men", "man"),
    ("women", "woman"),
    ("teeth", "tooth"),
    ("feet", "foot"),
    ("mice", "mouse"),
    ("geese", "goose"),
    ("oxen", "ox"),
    ("criteria", "criterion"),
    ("phenomena", "phenomenon"),
    ("data", "datum"),
    ("media", "medium"),
    ("analyses", "analysis"),
    ("theses", "thesis"),
    ("crises", "crisis"),
    ("diagnoses", "diagnosis"),
    ("parentheses", "parenthesis"),
    ("emphases", "emphasis"),
    ("neuroses", "neurosis"),
    ("oases", "oasis"),
    ("axes", "axis"),
    ("atlases", "atlas"),
];

/// Suffix rewrites tried in order; the first match wins.
const SINGULAR_RULES: &[(&str, &str)] = &[
    ("ies", "y"),
    ("ves", "ve"),
    ("oes", "o"),
    ("sses", "ss"),
    ("shes", "sh"),
    ("ches", "ch"),
    ("xes", "x"),
    ("ses", "s"),
];

/// Abbreviated field names whose interface names cannot be recovered by case conversion.
const INTERFACE_NAME_OVERRIDES: &[(&str, &str)] = &[
    ("forminfo", "FormInfo"),
    ("reserveinfo", "ReserveInfo"),
    ("estimateinfos", "EstimateInfos"),
    ("userinfo", "UserInfo"),
    ("companyinfo", "CompanyInfo"),
    ("carinfo", "CarInfo"),
];

fn irregular_singular(lower: &str) -> Option<&'static str> {
    IRREGULAR_PLURALS
        .iter()
        .find(|(plural, _)| *plural == lower)
        .map(|(_, singular)| *singular)
}

/// `word` without `suffix`, compared ASCII case-insensitively.
fn strip_suffix_ignore_case<'a>(word: &'a str, suffix: &str) -> Option<&'a str> {
    let cut = word.len().checked_sub(suffix.len())?;
    if !word.is_char_boundary(cut) {
        return None;
    }
    let (head, tail) = word.split_at(cut);
    tail.eq_ignore_ascii_case(suffix).then_some(head)
}

fn capitalize_first(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Whether a field name reads like it holds a collection.
pub fn is_array_field_name(name: &str) -> bool {
    let lower = name.to_lowercase();
    lower.ends_with("list")
        || lower.ends_with("array")
        || lower.ends_with('s')
        || irregular_singular(&lower).is_some()
}

/// Convert a plural word to its singular form.
///
/// Irregular plurals keep an uppercase first letter; regular plurals are
/// rewritten by the first matching suffix rule.
pub fn to_singular(word: &str) -> String {
    if word.is_empty() {
        return String::new();
    }

    let lower = word.to_lowercase();
    if let Some(singular) = irregular_singular(&lower) {
        let starts_upper = word.chars().next().is_some_and(char::is_uppercase);
        return if starts_upper {
            capitalize_first(singular)
        } else {
            singular.to_string()
        };
    }

    if !lower.ends_with('s') {
        return word.to_string();
    }

    for (suffix, replacement) in SINGULAR_RULES {
        if let Some(stem) = strip_suffix_ignore_case(word, suffix) {
            return format!("{stem}{replacement}");
        }
    }

    strip_suffix_ignore_case(word, "s")
        .unwrap_or(word)
        .to_string()
}

/// Derive an element interface name from an array field name.
///
/// `books` → `Book`, `userList` → `User`, `people` → `Person`.
pub fn type_name_from_array_field(name: &str) -> String {
    let stem = strip_suffix_ignore_case(name, "list")
        .or_else(|| strip_suffix_ignore_case(name, "array"))
        .filter(|stem| !stem.is_empty())
        .unwrap_or(name);
    capitalize_first(&to_singular(stem))
}

/// Derive the interface name for a nested object field.
///
/// Configured aliases win, then the built-in abbreviation table (matched on
/// the lowercase name). Otherwise the first letter is uppercased and the rest
/// kept as written (`userID` → `UserID`); only names with `_`, `-` or spaces
/// go through PascalCase conversion.
pub fn interface_name_for(name: &str, aliases: &IndexMap<String, String>) -> String {
    if let Some(alias) = aliases.get(name) {
        return alias.clone();
    }
    let lower = name.to_lowercase();
    if let Some((_, fixed)) = INTERFACE_NAME_OVERRIDES.iter().find(|(k, _)| *k == lower) {
        return fixed.to_string();
    }
    if name.contains(['_', '-', ' ']) {
        let pascal = name.to_pascal_case();
        if !pascal.is_empty() {
            return pascal;
        }
    }
    capitalize_first(name)
}

/// Generate a unique name, appending numeric suffixes if needed.
pub fn unique_name(base: &str, used_names: &mut HashSet<String>) -> String {
    if used_names.insert(base.to_string()) {
        return base.to_string();
    }
    let mut i = 2;
    loop {
        let candidate = format!("{base}{i}");
        if used_names.insert(candidate.clone()) {
            return candidate;
        }
        i += 1;
    }
}
