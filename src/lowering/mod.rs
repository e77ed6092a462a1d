//! Lowering Module
//!
//! Structural phases of translation that sit around the per-line rewrite:
//! indentation measurement, brace emission driven by the scope stack, and
//! the deferred entry-point section.

// Depth tracking
pub mod depth_tracking_lowering;

// Block structure
pub mod block_lowering;

// Entry point handling
pub mod entry_point_lowering;

// Re-exports for convenience
pub use depth_tracking_lowering::{indentation, is_blank, measure_indent, SourceLine, INDENT_UNIT};
pub use block_lowering::{attach_continuation, close_all, close_frames, emit_rewrite};
pub use entry_point_lowering::{defer_blank, defer_line, synthesize_entry, DeferralBuffer, DeferredLine};
