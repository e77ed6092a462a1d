//! Static type name lookup.
//!
//! Maps Python annotation names to C++ type names without any inference.
//! Subscripted annotations map recursively, declared classes map to
//! themselves, and anything else falls back to `auto`.

use crate::first_pass::SymbolTable;
use crate::helpers::{find_matching_bracket, split_top_level};

const TYPE_MAP: &[(&str, &str)] = &[
    ("int", "int"),
    ("str", "std::string"),
    ("float", "double"),
    ("list", "std::vector"),
    ("dict", "std::map"),
    ("bool", "bool"),
    ("tuple", "std::tuple"),
    ("set", "std::set"),
    ("None", "void"),
    ("List", "std::vector"),
    ("Dict", "std::map"),
    ("Tuple", "std::tuple"),
    ("Set", "std::set"),
];

fn lookup(name: &str) -> Option<&'static str> {
    TYPE_MAP.iter().find(|(py, _)| *py == name).map(|(_, cpp)| *cpp)
}

/// Resolve a Python annotation to a C++ type.
pub fn resolve_type(annotation: &str, symbols: &SymbolTable) -> String {
    let ann = annotation.trim().trim_matches(|c| c == '"' || c == '\'');

    if let Some(open) = ann.find('[') {
        let base = ann[..open].trim();
        let close = find_matching_bracket(&ann[open..]).map(|c| open + c);
        if let (Some(cpp_base), Some(close)) = (lookup(base), close) {
            if close == ann.len() - 1 {
                let args: Vec<String> = split_top_level(&ann[open + 1..close], ',')
                    .into_iter()
                    .map(|a| resolve_type(a, symbols))
                    .collect();
                return format!("{}<{}>", cpp_base, args.join(", "));
            }
        }
        return "auto".to_string();
    }

    if let Some(cpp) = lookup(ann) {
        return cpp.to_string();
    }
    if symbols.is_class(ann) {
        return ann.to_string();
    }
    "auto".to_string()
}
