/*
Questions are prefixed with "? ", the yes-branch is printed above the no-branch:

? Does it fly?
├── bird
└── dog

Lines use the termtree glyphs. Nodes deeper than MAX_INDENT_LEVELS keep the
indentation of that level and are labelled with their level instead.
 */
use termtree::GlyphPalette;
use tracing::instrument;

use crate::domain::tree::{DecisionTree, NodeId};

/// Levels below the root that get their own indentation.
pub const MAX_INDENT_LEVELS: usize = 32;

pub trait ToTreeString {
    fn to_tree_string(&self) -> String;
}

struct Line {
    id: NodeId,
    level: usize,
    last: bool,
    indent: String,
}

impl ToTreeString for DecisionTree {
    #[instrument(level = "debug", skip(self))]
    fn to_tree_string(&self) -> String {
        let glyphs = GlyphPalette::new();
        let mut out = String::new();
        let mut stack = vec![Line {
            id: self.root(),
            level: 0,
            last: true,
            indent: String::new(),
        }];

        while let Some(Line {
            id,
            level,
            last,
            indent,
        }) = stack.pop()
        {
            let Ok(node) = self.node(id) else {
                continue;
            };
            if level > 0 {
                out.push_str(&indent);
                out.push_str(if last {
                    glyphs.last_item
                } else {
                    glyphs.middle_item
                });
                out.push_str(glyphs.item_indent);
            }
            if level > MAX_INDENT_LEVELS {
                out.push_str(&format!("[{}] ", level));
            }
            if !node.is_leaf() {
                out.push_str("? ");
            }
            out.push_str(node.content());
            out.push('\n');

            let Ok(branches) = self.branches(id) else {
                continue;
            };
            let child_indent = if level == 0 || level >= MAX_INDENT_LEVELS {
                indent
            } else {
                let skip = if last {
                    glyphs.last_skip
                } else {
                    glyphs.middle_skip
                };
                format!("{}{}{}", indent, skip, glyphs.skip_indent)
            };
            stack.push(Line {
                id: branches.no,
                level: level + 1,
                last: true,
                indent: child_indent.clone(),
            });
            stack.push(Line {
                id: branches.yes,
                level: level + 1,
                last: false,
                indent: child_indent,
            });
        }
        out
    }
}
