//! Narrowing a block collection down to what one page view renders.

use super::{BlockType, ContentBlock};

/// Ascending by `order`. The sort is stable: equal orders keep input order.
pub fn sort_blocks_by_order(mut blocks: Vec<ContentBlock>) -> Vec<ContentBlock> {
    blocks.sort_by_key(|b| b.order);
    blocks
}

pub fn filter_blocks_by_page(blocks: Vec<ContentBlock>, page: &str) -> Vec<ContentBlock> {
    blocks
        .into_iter()
        .filter(|b| b.page.as_deref() == Some(page))
        .collect()
}

pub fn filter_blocks_by_type(blocks: Vec<ContentBlock>, block_type: &BlockType) -> Vec<ContentBlock> {
    blocks
        .into_iter()
        .filter(|b| &b.block_type == block_type)
        .collect()
}

pub fn should_render_block(block: &ContentBlock) -> bool {
    block.visible
}

/// Visible blocks of `page` in render order.
pub fn get_page_blocks(blocks: Vec<ContentBlock>, page: &str) -> Vec<ContentBlock> {
    let visible = blocks
        .into_iter()
        .filter(|b| b.page.as_deref() == Some(page) && should_render_block(b))
        .collect();
    sort_blocks_by_order(visible)
}
