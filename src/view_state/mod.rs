//! View-state layer - Layout, scrolling, and hit-testing
//!
//! Pure geometry shared by the operator and the mirror surface. Nothing here
//! renders or owns a clock; both surfaces feed it their own viewport and get
//! identical line breaks for identical content and style.
//!
//! # Module Structure
//!
//! - `types`: ViewportDimensions
//! - `measure`: TextMeasure capability and bundled measurers
//! - `wrap`: character-granular greedy wrapping
//! - `height_index`: HeightIndex - O(log n) prefix sums via Fenwick tree
//! - `layout_params`: LayoutParams - geometry inputs and derived metrics
//! - `layout`: Layout / LayoutBlock - positioned verse blocks
//! - `scroll`: ScrollState and percent/pixel conversion
//! - `hit_test`: point-to-verse lookup and scroll targets

pub mod height_index;
pub mod layout;
pub mod layout_params;
pub mod measure;
pub mod scroll;
pub mod types;
pub mod wrap;

pub use hit_test::{hit_test, scroll_target_for_verse, verse_at_point, HitTestResult};
pub use layout::{Layout, LayoutBlock};
pub use layout_params::LayoutParams;
pub use measure::{FixedAdvanceMeasure, FontSpec, MonospaceMeasure, TextMeasure};
pub use scroll::{to_percent, to_pixels, ScrollState};
pub use types::ViewportDimensions;
pub use wrap::wrap;
