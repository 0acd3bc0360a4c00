/// Normalizes a declared description into the text stored on an SDL node.
///
/// Empty (or whitespace-only) descriptions produce no node. Otherwise the
/// common leading indentation is removed and surrounding blank space is
/// trimmed. Descriptions that still span multiple lines are printed as
/// block strings.
pub fn get_description_node(description: Option<&str>) -> Option<String> {
    let description = description?;
    if description.trim().is_empty() {
        return None;
    }

    Some(dedent(description).trim().to_string())
}

fn dedent(text: &str) -> String {
    let common_indent = text
        .lines()
        .filter(|line| !line.trim().is_empty())
        .map(|line| line.len() - line.trim_start_matches([' ', '\t']).len())
        .min()
        .unwrap_or(0);

    text.lines()
        .map(|line| {
            if line.trim().is_empty() {
                ""
            } else {
                &line[common_indent..]
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}
