// Report content: the block model, assembly from an analysis, Markdown export
// and the HTTP handlers that drive pagination.

pub mod assembly;
pub mod blocks;
pub mod handlers;
pub mod markdown;
