//! Conversion between snake_case attribute names and camelCase GraphQL
//! names.
//!
//! Leading and trailing underscores are preserved as-is in both directions,
//! so `_private_field` becomes `_privateField` and `type_` stays `type_`.

/// Converts a snake_case attribute name into its camelCase GraphQL name.
///
/// Interior underscores are dropped and the character that follows them is
/// uppercased (`full_name` -> `fullName`, `a__b` -> `aB`).
pub fn convert_python_name_to_graphql(name: &str) -> String {
    if name.chars().all(|c| c == '_') {
        return name.to_string();
    }

    let core = name.trim_matches('_');
    let leading_len = name.len() - name.trim_start_matches('_').len();
    let trailing_len = name.len() - name.trim_end_matches('_').len();

    let mut graphql_name = String::with_capacity(name.len());
    graphql_name.push_str(&name[..leading_len]);

    let mut uppercase_next = false;
    for c in core.chars() {
        if c == '_' {
            uppercase_next = true;
        } else if uppercase_next {
            graphql_name.extend(c.to_uppercase());
            uppercase_next = false;
        } else {
            graphql_name.push(c);
        }
    }

    graphql_name.push_str(&name[name.len() - trailing_len..]);
    graphql_name
}

/// Converts a camelCase GraphQL name into a snake_case attribute name.
///
/// Every uppercase character after the first position becomes an
/// underscore followed by its lowercase form. Acronyms are not grouped:
/// `userID` becomes `user_i_d`, which converts back to `userID`.
pub fn convert_graphql_name_to_python(name: &str) -> String {
    let mut python_name = String::with_capacity(name.len() + 4);
    for (i, c) in name.chars().enumerate() {
        if i > 0 && c.is_uppercase() {
            python_name.push('_');
            python_name.extend(c.to_lowercase());
        } else if i == 0 {
            python_name.extend(c.to_lowercase());
        } else {
            python_name.push(c);
        }
    }
    python_name
}
