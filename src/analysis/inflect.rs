//! English inflection heuristics for canonical type names.
//!
//! Association reference tokens arrive as singular or plural snake_case
//! words (`:author`, `:blog_posts`). The canonical type name is derived by
//! the pluralize-then-classify idiom: normalize the token to its plural,
//! singularize that, and camelize the result. The rule tables are the
//! classic Rails-style suffix rewrites; they are a best-effort heuristic
//! and are not dictionary-complete for irregular English.

use regex::Regex;
use std::sync::OnceLock;

static PLURAL_RULES: OnceLock<Vec<(Regex, &'static str)>> = OnceLock::new();
static SINGULAR_RULES: OnceLock<Vec<(Regex, &'static str)>> = OnceLock::new();

/// Words identical in singular and plural form.
const UNCOUNTABLE: &[&str] = &[
    "equipment",
    "information",
    "rice",
    "money",
    "species",
    "series",
    "fish",
    "sheep",
    "jeans",
    "police",
];

/// Whole-word irregular pairs, singular → plural.
const IRREGULAR: &[(&str, &str)] = &[
    ("person", "people"),
    ("man", "men"),
    ("woman", "women"),
    ("child", "children"),
    ("move", "moves"),
];

/// Suffix rewrites producing a plural, most specific first.
fn plural_rules() -> &'static [(Regex, &'static str)] {
    PLURAL_RULES.get_or_init(|| {
        compile_rules(&[
            (r"(?i)(quiz)$", "${1}zes"),
            (r"(?i)^(oxen)$", "${1}"),
            (r"(?i)^(ox)$", "${1}en"),
            (r"(?i)^([ml])ice$", "${1}ice"),
            (r"(?i)^([ml])ouse$", "${1}ice"),
            (r"(?i)(matr|vert|ind)(?:ix|ex)$", "${1}ices"),
            (r"(?i)(x|ch|ss|sh)$", "${1}es"),
            (r"(?i)([^aeiouy]|qu)y$", "${1}ies"),
            (r"(?i)(hive)$", "${1}s"),
            (r"(?i)([lr])f$", "${1}ves"),
            (r"(?i)([^f])fe$", "${1}ves"),
            (r"(?i)sis$", "ses"),
            (r"(?i)([ti])a$", "${1}a"),
            (r"(?i)([ti])um$", "${1}a"),
            (r"(?i)(buffal|tomat)o$", "${1}oes"),
            (r"(?i)(bu)s$", "${1}ses"),
            (r"(?i)(alias|status)$", "${1}es"),
            (r"(?i)(octop|vir)i$", "${1}i"),
            (r"(?i)(octop|vir)us$", "${1}i"),
            (r"(?i)^(ax|test)is$", "${1}es"),
            (r"(?i)s$", "s"),
            (r"$", "s"),
        ])
    })
}

/// Suffix rewrites producing a singular, most specific first.
fn singular_rules() -> &'static [(Regex, &'static str)] {
    SINGULAR_RULES.get_or_init(|| {
        compile_rules(&[
            (r"(?i)(database)s$", "${1}"),
            (r"(?i)(quiz)zes$", "${1}"),
            (r"(?i)(matr)ices$", "${1}ix"),
            (r"(?i)(vert|ind)ices$", "${1}ex"),
            (r"(?i)^(ox)en$", "${1}"),
            (r"(?i)(alias|status)(es)?$", "${1}"),
            (r"(?i)(octop|vir)(us|i)$", "${1}us"),
            (r"(?i)^(a)x[ie]s$", "${1}xis"),
            (r"(?i)(cris|test)(is|es)$", "${1}is"),
            (r"(?i)(shoe)s$", "${1}"),
            (r"(?i)(o)es$", "${1}"),
            (r"(?i)(bus)(es)?$", "${1}"),
            (r"(?i)^([ml])ice$", "${1}ouse"),
            (r"(?i)(x|ch|ss|sh)es$", "${1}"),
            (r"(?i)(m)ovies$", "${1}ovie"),
            (r"(?i)(s)eries$", "${1}eries"),
            (r"(?i)([^aeiouy]|qu)ies$", "${1}y"),
            (r"(?i)([lr])ves$", "${1}f"),
            (r"(?i)(tive)s$", "${1}"),
            (r"(?i)(hive)s$", "${1}"),
            (r"(?i)([^f])ves$", "${1}fe"),
            (
                r"(?i)(analy|ba|diagno|parenthe|progno|synop|the)(sis|ses)$",
                "${1}sis",
            ),
            (r"(?i)([ti])a$", "${1}um"),
            (r"(?i)(n)ews$", "${1}ews"),
            (r"(?i)(ss)$", "${1}"),
            (r"(?i)s$", ""),
        ])
    })
}

fn compile_rules(rules: &[(&str, &'static str)]) -> Vec<(Regex, &'static str)> {
    rules
        .iter()
        .map(|(pattern, replacement)| (Regex::new(pattern).unwrap(), *replacement))
        .collect()
}

fn apply_rules(word: &str, rules: &[(Regex, &'static str)]) -> String {
    for (pattern, replacement) in rules {
        if pattern.is_match(word) {
            return pattern.replace(word, *replacement).into_owned();
        }
    }
    word.to_string()
}

fn is_uncountable(word: &str) -> bool {
    UNCOUNTABLE.iter().any(|u| word.eq_ignore_ascii_case(u))
}

/// Returns the plural form of `word`.
pub fn pluralize(word: &str) -> String {
    if word.is_empty() || is_uncountable(word) {
        return word.to_string();
    }
    for (singular, plural) in IRREGULAR {
        if word.eq_ignore_ascii_case(singular) {
            return (*plural).to_string();
        }
        if word.eq_ignore_ascii_case(plural) {
            return word.to_string();
        }
    }
    apply_rules(word, plural_rules())
}

/// Returns the singular form of `word`.
pub fn singularize(word: &str) -> String {
    if word.is_empty() || is_uncountable(word) {
        return word.to_string();
    }
    for (singular, plural) in IRREGULAR {
        if word.eq_ignore_ascii_case(plural) {
            return (*singular).to_string();
        }
    }
    apply_rules(word, singular_rules())
}

/// Converts a snake_case term to CamelCase; `/` separators become `::`.
pub fn camelize(term: &str) -> String {
    term.split('/')
        .map(|part| {
            part.split('_')
                .map(capitalize_first)
                .collect::<String>()
        })
        .collect::<Vec<_>>()
        .join("::")
}

fn capitalize_first(segment: &str) -> String {
    let mut chars = segment.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}

/// The conventional type name for a collection-style reference token:
/// pluralize, singularize, camelize.
pub fn canonical_class_name(token: &str) -> String {
    camelize(&singularize(&pluralize(token)))
}
