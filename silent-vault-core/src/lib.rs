//! Silent Vault 核心类型和模型
//!
//! 本 crate 提供 Silent Vault 各模块共享的核心数据结构，包括：
//! - 文件、版本、块及版本-块引用模型
//! - 版本状态机
//! - 统计与列表视图
//! - 版本化文件存储 trait

mod models;
mod storage;

pub use models::*;
pub use storage::*;
