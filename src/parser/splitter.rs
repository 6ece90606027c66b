//! Paren-aware splitting of clause bodies into field expressions.

/// Split a clause body on commas that sit outside parentheses.
///
/// Function-call argument lists are never split internally: a comma only
/// separates expressions at parenthesis depth zero. Depth tracking handles
/// arbitrarily nested calls; an unmatched closing paren clamps at depth
/// zero rather than underflowing. Expression order is preserved, since it
/// feeds the alias/group-by distinction in aggregate clauses.
///
/// The result always contains at least one element; an empty body yields a
/// single empty expression, mirroring how downstream validation rejects it.
///
/// # Examples
///
/// ```rust
/// use kql_field_engine::parser::split_expressions;
///
/// let exprs = split_expressions("a=strcat(x,y), b=z");
/// assert_eq!(exprs, vec!["a=strcat(x,y)", "b=z"]);
/// ```
pub fn split_expressions(body: &str) -> Vec<String> {
    let mut expressions = Vec::new();
    let mut current = String::new();
    let mut depth: u32 = 0;

    for ch in body.chars() {
        match ch {
            '(' => {
                depth += 1;
                current.push(ch);
            }
            ')' => {
                depth = depth.saturating_sub(1);
                current.push(ch);
            }
            ',' if depth == 0 => {
                expressions.push(current.trim().to_string());
                current.clear();
            }
            _ => current.push(ch),
        }
    }

    expressions.push(current.trim().to_string());
    expressions
}
