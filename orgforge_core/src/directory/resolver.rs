//! OU-name resolution over the directory hierarchy
//!
//! Resolution is a pre-order depth-first traversal with an explicit worklist:
//! at every node the paginated child listing is drained exhaustively before
//! any descent, so the visit order is top-down, then left-to-right among
//! siblings exactly as the backend pages them. Names are compared
//! case-insensitively and the FIRST match in traversal order wins. That
//! first-match policy is the documented tie-break for ambiguous names;
//! callers that need a specific node among duplicates must disambiguate by
//! id, not name.

use std::sync::Arc;
use std::time::Duration;

use log::{debug, warn};
use serde::Serialize;

use crate::CoreConfig;
use crate::directory::service::{DirectoryService, timed};
use crate::directory::types::OuNode;
use crate::error::directory::{DirectoryError, DirectoryResult};

/// An OU visited by [`OuResolver::list_all`], annotated with its depth
///
/// Depth 1 is a direct child of the traversal root.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OuEntry {
    pub node: OuNode,
    pub depth: usize,
}

/// Resolves OU names to tree nodes by traversing the directory hierarchy
///
/// Traversal state is purely call-local; concurrent resolutions are fully
/// independent and may run in parallel tasks.
#[derive(Clone)]
pub struct OuResolver {
    directory: Arc<dyn DirectoryService>,
    max_depth: usize,
    call_timeout: Duration,
}

impl OuResolver {
    pub fn new(directory: Arc<dyn DirectoryService>, config: &CoreConfig) -> Self {
        Self {
            directory,
            max_depth: config.max_ou_depth,
            call_timeout: config.call_timeout(),
        }
    }

    /// Resolve an OU name to its node within the tree rooted at `root_id`
    ///
    /// Returns `OuNotFound` when the tree is exhausted without a match, and
    /// `MalformedHierarchy` if the hierarchy descends past the configured
    /// depth guard instead of trusting the backend to return an acyclic tree.
    pub async fn resolve(&self, name: &str, root_id: &str) -> DirectoryResult<OuNode> {
        let target = name.to_lowercase();

        let mut stack: Vec<(OuNode, usize)> = Vec::new();
        self.expand(root_id, 0, &target, &mut stack).await?;

        while let Some((node, depth)) = stack.pop() {
            if node.name.to_lowercase() == target {
                debug!("resolved OU '{}' to {} at depth {depth}", name, node.id);
                return Ok(node);
            }
            self.expand(&node.id, depth, &target, &mut stack).await?;
        }

        Err(DirectoryError::ou_not_found(name))
    }

    /// Collect every OU under `root_id` in visit order, annotated with depth
    ///
    /// Same traversal as [`resolve`](Self::resolve); used for inventory
    /// display by the presentation layer.
    pub async fn list_all(&self, root_id: &str) -> DirectoryResult<Vec<OuEntry>> {
        let mut out = Vec::new();

        let mut stack: Vec<(OuNode, usize)> = Vec::new();
        self.expand(root_id, 0, "", &mut stack).await?;

        while let Some((node, depth)) = stack.pop() {
            self.expand(&node.id, depth, "", &mut stack).await?;
            out.push(OuEntry { node, depth });
        }

        Ok(out)
    }

    /// Return the first organization root
    pub async fn default_root(&self) -> DirectoryResult<OuNode> {
        let roots = timed(self.call_timeout, self.directory.list_roots()).await?;
        roots.into_iter().next().ok_or(DirectoryError::NoRoot)
    }

    /// Drain the paginated child listing of `parent_id` and push the children
    /// onto the worklist so the leftmost subtree is explored first
    async fn expand(
        &self,
        parent_id: &str,
        parent_depth: usize,
        target: &str,
        stack: &mut Vec<(OuNode, usize)>,
    ) -> DirectoryResult<()> {
        let children = self.children_of(parent_id).await?;
        if children.is_empty() {
            return Ok(());
        }

        let child_depth = parent_depth + 1;
        if child_depth > self.max_depth {
            return Err(DirectoryError::malformed(format!(
                "hierarchy descends past depth {} below {parent_id}",
                self.max_depth
            )));
        }

        if !target.is_empty() {
            let hits = children
                .iter()
                .filter(|child| child.name.to_lowercase() == target)
                .count();
            if hits > 1 {
                warn!(
                    "ambiguous OU name '{target}' under {parent_id}: {hits} siblings match, using first"
                );
            }
        }

        for child in children.into_iter().rev() {
            stack.push((child, child_depth));
        }

        Ok(())
    }

    /// Consume the child listing exhaustively before any descent
    async fn children_of(&self, parent_id: &str) -> DirectoryResult<Vec<OuNode>> {
        let mut children = Vec::new();
        let mut cursor: Option<String> = None;

        loop {
            let page = timed(
                self.call_timeout,
                self.directory
                    .list_ous_for_parent(parent_id, cursor.as_deref()),
            )
            .await?;
            children.extend(page.items);

            match page.next_cursor {
                Some(next) => cursor = Some(next),
                None => break,
            }
        }

        Ok(children)
    }
}
