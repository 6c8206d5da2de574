//! Summary rendering

use formview_html::escape_text;

use crate::entries::FieldEntries;

/// Render entries as `<b>name</b>: value<br />` fragments, in order
///
/// Names and values are inserted verbatim unless `escape` is set.
pub fn format_entries(entries: &FieldEntries, escape: bool) -> String {
    let mut html = String::new();
    for entry in entries {
        html.push_str("<b>");
        push(&mut html, &entry.name, escape);
        html.push_str("</b>: ");
        push(&mut html, &entry.value, escape);
        html.push_str("<br />");
    }
    html
}

fn push(html: &mut String, text: &str, escape: bool) {
    if escape {
        escape_text(text, html);
    } else {
        html.push_str(text);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format() {
        let mut entries = FieldEntries::new();
        entries.insert("user", "alice");
        entries.insert("bio", "Unknown");

        assert_eq!(
            format_entries(&entries, false),
            "<b>user</b>: alice<br /><b>bio</b>: Unknown<br />"
        );
    }

    #[test]
    fn test_format_empty() {
        assert_eq!(format_entries(&FieldEntries::new(), false), "");
    }

    #[test]
    fn test_escape() {
        let mut entries = FieldEntries::new();
        entries.insert("note", "<i>hi</i> & bye");

        assert_eq!(
            format_entries(&entries, false),
            "<b>note</b>: <i>hi</i> & bye<br />"
        );
        assert_eq!(
            format_entries(&entries, true),
            "<b>note</b>: &lt;i&gt;hi&lt;/i&gt; &amp; bye<br />"
        );
    }
}
