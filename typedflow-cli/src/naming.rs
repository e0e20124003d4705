//! Identifier helpers shared by the extractor and the templates

/// Strip the surrounding double quotes of a raw string literal
pub fn format_string(s: &str) -> String {
    s.trim_matches('"').to_string()
}

/// Uppercase the first character, after stripping quotes
pub fn uppercase_first(s: &str) -> String {
    let s = format_string(s);
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Lowercase the first character, after stripping quotes
pub fn lowercase_first(s: &str) -> String {
    let s = format_string(s);
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_lowercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// `sayHello`, `say_hello` and `say-hello` all become `SayHello`
pub fn to_pascal_case(s: &str) -> String {
    let s = format_string(s);
    let mut result = String::new();
    let mut capitalize_next = true;

    for c in s.chars() {
        if c == '_' || c == '-' || c == ' ' {
            capitalize_next = true;
        } else if capitalize_next {
            result.extend(c.to_uppercase());
            capitalize_next = false;
        } else {
            result.push(c);
        }
    }
    result
}

/// `sayHello2` becomes `say_hello2`, `HTTPFetch` becomes `http_fetch`
pub fn to_snake_case(s: &str) -> String {
    let s = format_string(s);
    let chars: Vec<char> = s.chars().collect();
    let mut result = String::new();

    for (i, &c) in chars.iter().enumerate() {
        if c == '-' || c == ' ' || c == '_' {
            if !result.is_empty() && !result.ends_with('_') {
                result.push('_');
            }
            continue;
        }

        if c.is_uppercase() {
            let prev = if i > 0 { Some(chars[i - 1]) } else { None };
            let next = chars.get(i + 1);
            let boundary = match prev {
                Some(p) if p.is_lowercase() || p.is_ascii_digit() => true,
                Some(p) if p.is_uppercase() => next.map(|n| n.is_lowercase()).unwrap_or(false),
                _ => false,
            };
            if boundary && !result.ends_with('_') {
                result.push('_');
            }
            result.extend(c.to_lowercase());
        } else {
            result.push(c);
        }
    }

    while result.ends_with('_') {
        result.pop();
    }
    result
}

/// Whether `name` can be spliced into an identifier
///
/// Allows the separators `to_pascal_case` and `to_snake_case` understand.
pub fn is_valid_identifier(name: &str) -> bool {
    let mut chars = name.chars();

    // First character must be letter or underscore
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {}
        _ => return false,
    }

    chars.all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
}
