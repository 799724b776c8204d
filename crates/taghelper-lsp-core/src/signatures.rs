//! Signature reduction for tag helper tooltips
//!
//! Compiler metadata names types and members by their fully qualified
//! signature (`Microsoft.AspNetCore.Mvc.TagHelpers.AnchorTagHelper`). A tooltip
//! only has room for the last segment, so these helpers locate the top-level
//! `.` that separates the owner path from the simple name.
//!
//! Owner paths can contain dots of their own inside nested groups:
//! generic arguments (`Dictionary<System.String, System.Int32>`), parameter
//! lists (`Process(System.String)`) and the brace form cref values use for
//! generics (`List{System.String}`). The scan runs right to left and treats
//! every balanced group as inert text.

use once_cell::sync::Lazy;
use std::collections::HashMap;

/// Bracket families, balanced in this order at every scan position.
const GROUPS: [(u8, u8); 3] = [(b'<', b'>'), (b'(', b')'), (b'{', b'}')];

/// Display aliases for the built-in scalar types, keyed by qualified name
static PRIMITIVE_ALIASES: Lazy<HashMap<&'static str, &'static str>> = Lazy::new(|| {
    HashMap::from([
        ("System.Byte", "byte"),
        ("System.SByte", "sbyte"),
        ("System.Int32", "int"),
        ("System.UInt32", "uint"),
        ("System.Int16", "short"),
        ("System.UInt16", "ushort"),
        ("System.Int64", "long"),
        ("System.UInt64", "ulong"),
        ("System.Single", "float"),
        ("System.Double", "double"),
        ("System.Char", "char"),
        ("System.Boolean", "bool"),
        ("System.Object", "object"),
        ("System.String", "string"),
        ("System.Decimal", "decimal"),
    ])
});

/// Reduce a signature to its last top-level segment.
///
/// ```
/// use taghelper_lsp_core::reduce;
///
/// assert_eq!(reduce("Outer.Inner<System.String>"), "Inner<System.String>");
/// assert_eq!(reduce("Microsoft.AspNetCore.AnchorTagHelper"), "AnchorTagHelper");
/// ```
pub fn reduce(signature: &str) -> &str {
    match signature.len() {
        0 => "",
        len => reduce_from(signature, len - 1),
    }
}

/// Reduce the prefix of `signature` that ends at `from_index` (inclusive).
///
/// Returns the text after the nearest top-level `.` at or before
/// `from_index`. Without such a dot, or when a group cannot be balanced
/// before the start of the string, the whole prefix is returned.
/// `from_index` is a byte offset; it is clamped to the string and widened to
/// the end of the character it falls in.
pub fn reduce_from(signature: &str, from_index: usize) -> &str {
    if signature.is_empty() {
        return "";
    }

    let end = char_end(signature, from_index);
    let bytes = signature.as_bytes();
    let mut i = end - 1;

    loop {
        for &(open, close) in &GROUPS {
            match skip_group(bytes, i, open, close) {
                Some(pos) => i = pos,
                None => {
                    tracing::debug!(signature, "unbalanced group, keeping unreduced prefix");
                    return &signature[..end];
                }
            }
        }

        if bytes[i] == b'.' {
            return &signature[i + 1..end];
        }

        if i == 0 {
            return &signature[..end];
        }
        i -= 1;
    }
}

/// Reduce a member signature to `Owner.Member`.
///
/// The member name is reduced first; the owner is then reduced from the
/// position just before the separating dot.
pub fn reduce_member(signature: &str) -> String {
    let member = reduce(signature);
    if member.len() == signature.len() {
        return member.to_string();
    }

    // One byte for the separator, one to step onto the owner's last character.
    match signature.len().checked_sub(member.len() + 2) {
        Some(owner_end) => format!("{}.{}", reduce_from(signature, owner_end), member),
        None => member.to_string(),
    }
}

/// Short display name for built-in scalar types, or the name itself
pub fn display_type_name(type_name: &str) -> &str {
    PRIMITIVE_ALIASES
        .get(type_name)
        .copied()
        .unwrap_or(type_name)
}

/// If `i` closes a group, walk left to its opening bracket.
///
/// Returns `None` when the start of the string is reached first.
fn skip_group(bytes: &[u8], mut i: usize, open: u8, close: u8) -> Option<usize> {
    if bytes[i] != close {
        return Some(i);
    }

    let mut depth = 1usize;
    while depth > 0 {
        i = i.checked_sub(1)?;
        if bytes[i] == close {
            depth += 1;
        } else if bytes[i] == open {
            depth -= 1;
        }
    }
    Some(i)
}

fn char_end(s: &str, from_index: usize) -> usize {
    let mut end = from_index.saturating_add(1).min(s.len());
    while !s.is_char_boundary(end) {
        end += 1;
    }
    end
}
