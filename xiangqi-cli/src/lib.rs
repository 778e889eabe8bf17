//! 中国象棋命令行驱动
//!
//! 包含:
//! - 对局会话（走法校验、执行与胜负判定）
//! - 引擎设置加载

pub mod session;
pub mod settings;

pub use session::{EndReason, GameSession, Outcome};
pub use settings::{load_ai_config, EngineSettings};
