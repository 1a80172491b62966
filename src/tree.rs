use std::collections::HashMap;

use serde::Serialize;
use tracing::debug;

use crate::error::{Error, Result};
use crate::ir::{AgentId, AgentRecord, HierarchyInput};

/// An agent together with the recruits it owns, in the order the records
/// were supplied.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HierarchyNode {
    pub id: AgentId,
    pub display_name: String,
    pub rank: String,
    pub children: Vec<HierarchyNode>,
}

impl HierarchyNode {
    pub fn leaf(record: &AgentRecord) -> Self {
        Self {
            id: record.id,
            display_name: record.display_name.clone(),
            rank: record.rank.clone(),
            children: Vec::new(),
        }
    }

    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }

    pub fn node_count(&self) -> usize {
        self.iter().count()
    }

    /// Number of rows below this node; a lone node has depth 0.
    pub fn depth(&self) -> usize {
        let mut deepest = 0;
        let mut stack = vec![(self, 0)];
        while let Some((node, depth)) = stack.pop() {
            deepest = deepest.max(depth);
            stack.extend(node.children.iter().map(|child| (child, depth + 1)));
        }
        deepest
    }

    pub fn find(&self, id: AgentId) -> Option<&HierarchyNode> {
        self.iter().find(|node| node.id == id)
    }

    /// Pre-order walk, parents before their recruits.
    pub fn iter(&self) -> impl Iterator<Item = &HierarchyNode> {
        let mut stack = vec![self];
        std::iter::from_fn(move || {
            let node = stack.pop()?;
            stack.extend(node.children.iter().rev());
            Some(node)
        })
    }
}

// Recruiter chains can be arbitrarily long, so children are unlinked onto a
// heap stack instead of being dropped one native frame per level.
impl Drop for HierarchyNode {
    fn drop(&mut self) {
        let mut pending = std::mem::take(&mut self.children);
        while let Some(mut node) = pending.pop() {
            pending.append(&mut node.children);
        }
    }
}

/// Where a row ended up after its recruiter pointer was resolved. `Resolved`
/// holds the recruiter's slot in the builder's row table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ParentLink {
    Resolved(usize),
    FallbackToRoot,
}

/// Counts of the input repairs made while building, for diagnostics only.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BuildReport {
    pub rows: usize,
    pub duplicates: usize,
    pub root_rows: usize,
    pub orphans: usize,
    pub self_parented: usize,
    pub cycles_broken: usize,
}

impl BuildReport {
    pub fn is_clean(&self) -> bool {
        self.duplicates == 0
            && self.root_rows == 0
            && self.orphans == 0
            && self.self_parented == 0
            && self.cycles_broken == 0
    }
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum Anchor {
    Unknown,
    OnPath,
    Anchored,
}

enum Visit {
    Enter(usize),
    Exit(usize),
}

const ROOT_SLOT: usize = 0;

/// Builds the tree rooted at `root` from the flat downline `rows`.
///
/// Never fails: rows whose recruiter is unknown, missing, themselves, or
/// part of a recruiter cycle are attached directly under the root, and a
/// repeated id keeps only its first occurrence.
pub fn build_tree(root: &AgentRecord, rows: &[AgentRecord]) -> HierarchyNode {
    build_tree_with_report(root, rows).0
}

pub fn build_tree_with_report(
    root: &AgentRecord,
    rows: &[AgentRecord],
) -> (HierarchyNode, BuildReport) {
    let mut report = BuildReport {
        rows: rows.len(),
        ..Default::default()
    };

    let mut slots: Vec<&AgentRecord> = vec![root];
    let mut index: HashMap<AgentId, usize> = HashMap::with_capacity(rows.len() + 1);
    index.insert(root.id, ROOT_SLOT);
    for row in rows {
        if row.id == root.id {
            report.root_rows += 1;
            continue;
        }
        if index.contains_key(&row.id) {
            report.duplicates += 1;
            continue;
        }
        index.insert(row.id, slots.len());
        slots.push(row);
    }

    let mut links: Vec<ParentLink> = Vec::with_capacity(slots.len());
    links.push(ParentLink::FallbackToRoot);
    for (slot, record) in slots.iter().enumerate().skip(1) {
        let link = match record.parent_id.and_then(|id| index.get(&id).copied()) {
            Some(parent) if parent == slot => {
                report.self_parented += 1;
                ParentLink::FallbackToRoot
            }
            Some(parent) => ParentLink::Resolved(parent),
            None => {
                if record.parent_id.is_some() {
                    report.orphans += 1;
                }
                ParentLink::FallbackToRoot
            }
        };
        links.push(link);
    }
    report.cycles_broken = break_cycles(&mut links);

    let mut children: Vec<Vec<usize>> = vec![Vec::new(); slots.len()];
    for (slot, link) in links.iter().enumerate().skip(1) {
        let parent = match link {
            ParentLink::Resolved(parent) => *parent,
            ParentLink::FallbackToRoot => ROOT_SLOT,
        };
        children[parent].push(slot);
    }

    let tree = assemble(&slots, &children);
    debug!(
        root = root.id,
        nodes = slots.len(),
        duplicates = report.duplicates,
        orphans = report.orphans,
        self_parented = report.self_parented,
        cycles_broken = report.cycles_broken,
        "built hierarchy tree"
    );
    (tree, report)
}

/// Re-points every recruiter cycle at the root. The node cut is the first
/// cycle member reached when walking up from the earliest row in the cycle.
fn break_cycles(links: &mut [ParentLink]) -> usize {
    let mut anchors = vec![Anchor::Unknown; links.len()];
    anchors[ROOT_SLOT] = Anchor::Anchored;
    let mut broken = 0;
    let mut path = Vec::new();

    for start in 1..links.len() {
        let mut current = start;
        loop {
            match anchors[current] {
                Anchor::Anchored => break,
                Anchor::OnPath => {
                    links[current] = ParentLink::FallbackToRoot;
                    broken += 1;
                    break;
                }
                Anchor::Unknown => {
                    anchors[current] = Anchor::OnPath;
                    path.push(current);
                    current = match links[current] {
                        ParentLink::Resolved(parent) => parent,
                        ParentLink::FallbackToRoot => ROOT_SLOT,
                    };
                }
            }
        }
        for slot in path.drain(..) {
            anchors[slot] = Anchor::Anchored;
        }
    }
    broken
}

/// Builds the owned tree bottom-up over an explicit stack. Each finished
/// subtree is pushed onto `finished`, so a node's children are always the
/// last `children[slot].len()` entries when it is exited.
fn assemble(slots: &[&AgentRecord], children: &[Vec<usize>]) -> HierarchyNode {
    let mut finished: Vec<HierarchyNode> = Vec::with_capacity(slots.len());
    let mut stack: Vec<Visit> = children[ROOT_SLOT]
        .iter()
        .rev()
        .map(|&slot| Visit::Enter(slot))
        .collect();
    while let Some(visit) = stack.pop() {
        match visit {
            Visit::Enter(slot) => {
                stack.push(Visit::Exit(slot));
                stack.extend(children[slot].iter().rev().map(|&child| Visit::Enter(child)));
            }
            Visit::Exit(slot) => {
                let mut node = HierarchyNode::leaf(slots[slot]);
                node.children = finished.split_off(finished.len() - children[slot].len());
                finished.push(node);
            }
        }
    }
    let mut root = HierarchyNode::leaf(slots[ROOT_SLOT]);
    root.children = finished;
    root
}

impl HierarchyInput {
    /// Builds the tree for this record set, failing only when no root agent
    /// was supplied.
    pub fn into_tree(self) -> Result<HierarchyNode> {
        let root = self.root.ok_or(Error::MissingRoot)?;
        Ok(build_tree(&root, &self.rows))
    }
}
