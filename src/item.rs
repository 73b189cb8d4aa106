use tracing::info;

use crate::error::Result;
use crate::hn_client::HnApi;
use crate::models::{parse_timestamp, FlatComment, ItemNode, ItemView};

pub const LATEST_COMMENTS: usize = 5;

/// Pre-order walk of the tree below `node`. Nodes without a body are skipped but
/// their replies are still visited.
pub fn flatten_comments(node: &ItemNode) -> Vec<FlatComment> {
    let mut acc = Vec::new();
    collect(node, &mut acc);
    acc
}

fn collect(node: &ItemNode, acc: &mut Vec<FlatComment>) {
    for child in &node.children {
        if let Some(text) = child.text.as_deref().filter(|t| !t.is_empty()) {
            acc.push(FlatComment {
                author: child.author.clone().unwrap_or_default(),
                text: text.to_string(),
                created_at: child.created_at.as_deref().and_then(parse_timestamp),
            });
        }
        collect(child, acc);
    }
}

/// Newest comments anywhere in the tree, not per branch. Undated comments sort last.
pub fn latest_comments(mut comments: Vec<FlatComment>, limit: usize) -> Vec<FlatComment> {
    comments.sort_by(|a, b| b.created_at.cmp(&a.created_at));
    comments.truncate(limit);
    comments
}

pub fn build_item_view(requested_id: &str, root: ItemNode) -> ItemView {
    let flattened = flatten_comments(&root);
    let total_comments = flattened.len();
    ItemView {
        id: root
            .id
            .map(|id| id.to_string())
            .unwrap_or_else(|| requested_id.to_string()),
        title: root.title.unwrap_or_default(),
        author: root.author.unwrap_or_default(),
        points: root.points.unwrap_or(0),
        created_at: root.created_at.as_deref().and_then(parse_timestamp),
        url: root.url.filter(|u| !u.is_empty()),
        latest_comments: latest_comments(flattened, LATEST_COMMENTS),
        total_comments,
    }
}

pub fn load_item(api: &dyn HnApi, id: &str) -> Result<ItemView> {
    let root = api.item(id)?;
    let view = build_item_view(id, root);
    info!(id, comments = view.total_comments, "Loaded item");
    Ok(view)
}
