//! Book Context - 被追踪图书
//!
//! 职责:
//! - 图书摘要（定价建议的输入）
//! - 分类标签解析与同类判断
//! - 价格/评分变动检测（生成通知）

mod change_detector;
mod entities;

pub use change_detector::{detect_changes, ChangeKind, ChangeNotice, ChangeThresholds, PriceSnapshot};
pub use entities::{parse_category_tags, BookSummary};
