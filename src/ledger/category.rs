//! Hierarchical category taxonomy used to validate and group records.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::errors::{LedgerError, Result};

/// A named category owning an ordered list of sub-categories.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CategoryNode {
    pub name: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<CategoryNode>,
}

impl CategoryNode {
    pub fn leaf(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            children: Vec::new(),
        }
    }

    pub fn branch(name: impl Into<String>, children: Vec<CategoryNode>) -> Self {
        Self {
            name: name.into(),
            children,
        }
    }

    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }

    fn collect_into(&self, out: &mut BTreeSet<String>) {
        out.insert(self.name.clone());
        for child in &self.children {
            child.collect_into(out);
        }
    }
}

/// Immutable taxonomy rooted at an anonymous list of top-level categories.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryTree {
    roots: Vec<CategoryNode>,
}

impl Default for CategoryTree {
    fn default() -> Self {
        Self {
            roots: default_taxonomy(),
        }
    }
}

impl CategoryTree {
    /// Builds a tree from explicit nodes. Every name must be a single non-empty
    /// token so records stay parseable in the whitespace-separated file format.
    pub fn from_nodes(roots: Vec<CategoryNode>) -> Result<Self> {
        if roots.is_empty() {
            return Err(LedgerError::InvalidTaxonomy(
                "taxonomy must define at least one category".into(),
            ));
        }
        let mut stack: Vec<&CategoryNode> = roots.iter().collect();
        while let Some(node) = stack.pop() {
            if node.name.is_empty() || node.name.chars().any(char::is_whitespace) {
                return Err(LedgerError::InvalidTaxonomy(format!(
                    "category name `{}` must be a single word",
                    node.name
                )));
            }
            stack.extend(node.children.iter());
        }
        Ok(Self { roots })
    }

    pub fn roots(&self) -> &[CategoryNode] {
        &self.roots
    }

    /// Returns true when `name` labels any node, branch or leaf, at any depth.
    pub fn is_valid(&self, name: &str) -> bool {
        self.list().any(|entry| entry.name == name)
    }

    /// Returns `name` together with every descendant name. Occurrences of
    /// `name` at several positions contribute their subtrees to one union.
    /// An unknown name yields an empty set.
    pub fn expand(&self, name: &str) -> BTreeSet<String> {
        let mut found = BTreeSet::new();
        let mut stack: Vec<&CategoryNode> = self.roots.iter().collect();
        while let Some(node) = stack.pop() {
            if node.name == name {
                node.collect_into(&mut found);
            } else {
                stack.extend(node.children.iter());
            }
        }
        found
    }

    /// Lazily walks the tree depth-first in pre-order. Each call starts a fresh
    /// traversal.
    pub fn list(&self) -> Entries<'_> {
        Entries {
            stack: self.roots.iter().rev().map(|node| (0, node)).collect(),
        }
    }
}

/// One line of a tree listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TreeEntry<'a> {
    pub depth: usize,
    pub name: &'a str,
}

impl TreeEntry<'_> {
    /// Renders the entry with two spaces of indent per level.
    pub fn render(&self) -> String {
        format!("{}- {}", "  ".repeat(self.depth), self.name)
    }
}

/// Pre-order iterator returned by [`CategoryTree::list`].
pub struct Entries<'a> {
    stack: Vec<(usize, &'a CategoryNode)>,
}

impl<'a> Iterator for Entries<'a> {
    type Item = TreeEntry<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        let (depth, node) = self.stack.pop()?;
        self.stack
            .extend(node.children.iter().rev().map(|child| (depth + 1, child)));
        Some(TreeEntry {
            depth,
            name: &node.name,
        })
    }
}

/// Built-in taxonomy used when no custom one is configured.
pub fn default_taxonomy() -> Vec<CategoryNode> {
    vec![
        CategoryNode::branch(
            "expense",
            vec![
                CategoryNode::branch(
                    "food",
                    vec![
                        CategoryNode::leaf("meal"),
                        CategoryNode::leaf("snack"),
                        CategoryNode::leaf("drink"),
                    ],
                ),
                CategoryNode::branch(
                    "transportation",
                    vec![CategoryNode::leaf("bus"), CategoryNode::leaf("railway")],
                ),
            ],
        ),
        CategoryNode::branch(
            "income",
            vec![CategoryNode::leaf("salary"), CategoryNode::leaf("bonus")],
        ),
    ]
}
