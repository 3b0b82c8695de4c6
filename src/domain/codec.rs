//! Line codec for decision trees
//!
//! One line per node, pre-order (node, yes subtree, no subtree):
//! `[Q]<question>` for internal nodes, `[A]<answer>` for leaves.

use tracing::{debug, instrument, trace};

use crate::domain::error::{DomainError, DomainResult};
use crate::domain::tree::DecisionTree;

pub const QUESTION_TAG: &str = "[Q]";
pub const ANSWER_TAG: &str = "[A]";
const TAG_LEN: usize = 3;

/// Kind of node a store line describes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tag {
    Question,
    Answer,
}

impl Tag {
    pub fn as_str(self) -> &'static str {
        match self {
            Tag::Question => QUESTION_TAG,
            Tag::Answer => ANSWER_TAG,
        }
    }
}

/// Serialize a tree into its store lines, without line terminators.
#[instrument(level = "debug", skip(tree))]
pub fn serialize(tree: &DecisionTree) -> DomainResult<Vec<String>> {
    tree.iter()
        .map(|(_, node)| {
            let content = node.content();
            if content.contains(['\n', '\r']) {
                return Err(DomainError::MultilineContent(content.to_string()));
            }
            let tag = if node.is_leaf() { Tag::Answer } else { Tag::Question };
            Ok(format!("{}{}", tag.as_str(), content))
        })
        .collect()
}

/// Serialize a tree into store text; every line ends with `\n`.
pub fn encode(tree: &DecisionTree) -> DomainResult<String> {
    let mut text = String::new();
    for line in serialize(tree)? {
        text.push_str(&line);
        text.push('\n');
    }
    Ok(text)
}

/// Split a store line into its tag and payload.
///
/// `line_no` is 1-based and only used for error reporting.
pub fn parse_line(line_no: usize, line: &str) -> DomainResult<(Tag, &str)> {
    let prefix = line.get(..TAG_LEN).ok_or_else(|| {
        DomainError::malformed(line_no, format!("missing [Q]/[A] tag in {:?}", line))
    })?;
    let tag = match prefix.as_bytes() {
        [b'[', b'Q', b']'] => Tag::Question,
        [b'[', b'A', b']'] => Tag::Answer,
        _ => {
            return Err(DomainError::malformed(
                line_no,
                format!("unknown tag {:?}", prefix),
            ))
        }
    };
    Ok((tag, &line[TAG_LEN..]))
}

/// Rebuild a tree from store lines.
///
/// Consumes exactly the lines the tree needs: missing children and
/// trailing lines are both rejected.
#[instrument(level = "debug", skip(lines))]
pub fn deserialize<I, S>(lines: I) -> DomainResult<DecisionTree>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut tree = DecisionTree::new(String::new());
    // nodes whose line has not been read yet, next one on top
    let mut pending = vec![tree.root()];
    let mut line_no = 0;

    for line in lines {
        line_no += 1;
        let line = line.as_ref();
        let Some(id) = pending.pop() else {
            return Err(DomainError::malformed(
                line_no,
                "unexpected line after the tree is complete",
            ));
        };
        let (tag, payload) = parse_line(line_no, line)?;
        trace!("line {}: {:?} {:?}", line_no, tag, payload);
        tree.set_content(id, payload)?;
        if tag == Tag::Question {
            let (yes, no) = tree.expand_leaf(id)?;
            pending.push(no);
            pending.push(yes);
        }
    }

    if line_no == 0 {
        return Err(DomainError::malformed(1, "store is empty"));
    }
    if !pending.is_empty() {
        return Err(DomainError::malformed(
            line_no + 1,
            format!("unexpected end of store, {} node(s) missing", pending.len()),
        ));
    }
    debug!("decoded {} nodes from {} lines", tree.len(), line_no);
    Ok(tree)
}

/// Rebuild a tree from store text. Accepts `\n` and `\r\n` line endings.
pub fn decode(text: &str) -> DomainResult<DecisionTree> {
    deserialize(text.lines())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_line_splits_tag_and_payload() {
        assert_eq!(
            parse_line(1, "[Q]Does it fly?").unwrap(),
            (Tag::Question, "Does it fly?")
        );
        assert_eq!(parse_line(1, "[A]bird").unwrap(), (Tag::Answer, "bird"));
        assert_eq!(parse_line(1, "[A]").unwrap(), (Tag::Answer, ""));
    }

    #[test]
    fn test_parse_line_keeps_leading_space_of_payload() {
        assert_eq!(parse_line(1, "[A] owl").unwrap(), (Tag::Answer, " owl"));
    }

    #[test]
    fn test_parse_line_rejects_short_and_unknown_tags() {
        assert!(matches!(
            parse_line(4, "[Q"),
            Err(DomainError::MalformedStore { line: 4, .. })
        ));
        assert!(matches!(
            parse_line(2, "[X]what"),
            Err(DomainError::MalformedStore { line: 2, .. })
        ));
        assert!(matches!(
            parse_line(1, "(Q)what"),
            Err(DomainError::MalformedStore { line: 1, .. })
        ));
    }

    #[test]
    fn test_parse_line_handles_multibyte_prefix() {
        // byte 3 falls inside the second 'é'
        assert!(parse_line(1, "ééQ]x").is_err());
    }
}
