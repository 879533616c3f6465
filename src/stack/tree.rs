use crate::errors::Result;
use crate::stack::context::RepoContext;
use crate::stack::graph::StackGraph;
use std::collections::HashSet;

/// One row of the rendered stack tree
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TreeLine {
    pub branch: String,
    pub depth: usize,
    /// Box-drawing connector drawn before the branch name
    pub prefix: String,
}

/// Depth-first rendering of the tracked branches below `root`.
///
/// Children appear in branch-listing order. A branch reachable twice (only
/// possible through a hand-edited cycle) is drawn once.
pub fn stack_tree(ctx: RepoContext<'_>, root: &str) -> Result<Vec<TreeLine>> {
    let graph = StackGraph::new(ctx);
    let mut lines = vec![TreeLine {
        branch: root.to_string(),
        depth: 0,
        prefix: String::new(),
    }];
    let mut seen = HashSet::from([root.to_string()]);
    walk(&graph, root, 1, "", &mut seen, &mut lines)?;
    Ok(lines)
}

fn walk(
    graph: &StackGraph<'_>,
    branch: &str,
    depth: usize,
    indent: &str,
    seen: &mut HashSet<String>,
    lines: &mut Vec<TreeLine>,
) -> Result<()> {
    let children: Vec<String> = graph
        .get_children(branch)?
        .into_iter()
        .filter(|child| seen.insert(child.clone()))
        .collect();

    for (i, child) in children.iter().enumerate() {
        let is_last = i + 1 == children.len();
        let connector = if is_last { "└─ " } else { "├─ " };
        let vertical = if is_last { "   " } else { "│  " };

        lines.push(TreeLine {
            branch: child.clone(),
            depth,
            prefix: format!("{indent}{connector}"),
        });
        walk(graph, child, depth + 1, &format!("{indent}{vertical}"), seen, lines)?;
    }
    Ok(())
}
