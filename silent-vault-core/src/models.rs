//! 数据模型
//!
//! 文件（FileRecord）拥有多个版本（FileVersion），版本通过有序的
//! 版本-块引用（VersionChunkRef）指向共享的、带引用计数的块（ChunkRecord）。

use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// 逻辑文件
///
/// 同一所有者下 `(owner_id, name)` 唯一，重复上传同名文件只会新增版本。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileRecord {
    /// 文件ID
    pub file_id: String,
    /// 所有者ID
    pub owner_id: String,
    /// 文件名
    pub name: String,
    /// 当前大小（最高编号的活跃版本大小）
    pub size: u64,
    /// 创建时间
    pub created_at: DateTime<Local>,
    /// 是否在回收站中
    #[serde(default)]
    pub is_deleted: bool,
    /// 移入回收站的时间
    #[serde(default)]
    pub deleted_at: Option<DateTime<Local>>,
}

impl FileRecord {
    pub fn new(file_id: String, owner_id: &str, name: &str) -> Self {
        Self {
            file_id,
            owner_id: owner_id.to_string(),
            name: name.to_string(),
            size: 0,
            created_at: Local::now(),
            is_deleted: false,
            deleted_at: None,
        }
    }

    pub fn is_owned_by(&self, owner_id: &str) -> bool {
        self.owner_id == owner_id
    }

    /// 移入回收站
    pub fn trash(&mut self, at: DateTime<Local>) {
        self.is_deleted = true;
        self.deleted_at = Some(at);
    }

    /// 从回收站恢复
    pub fn restore(&mut self) {
        self.is_deleted = false;
        self.deleted_at = None;
    }
}

/// 版本写入状态
///
/// `Uploading` -> `Committed`，上传失败时 `Uploading` -> `Aborted`。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum VersionState {
    /// 块仍在写入
    #[default]
    Uploading,
    /// 大小已确定，内容稳定
    Committed,
    /// 上传失败，块引用已释放
    Aborted,
}

impl VersionState {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Uploading => "uploading",
            Self::Committed => "committed",
            Self::Aborted => "aborted",
        }
    }
}

impl std::fmt::Display for VersionState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// 文件版本
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileVersion {
    /// 版本ID
    pub version_id: String,
    /// 所属文件ID
    pub file_id: String,
    /// 版本号（文件现存版本的最大版本号加一，从 1 开始）
    pub version_no: u32,
    /// 上传时间
    pub uploaded_at: DateTime<Local>,
    /// 总字节数（提交后确定）
    pub size: u64,
    /// 块数量
    pub chunk_count: u32,
    /// 写入状态
    pub state: VersionState,
    /// 是否在回收站中（与文件级回收站状态独立）
    #[serde(default)]
    pub is_deleted: bool,
    /// 移入回收站的时间
    #[serde(default)]
    pub deleted_at: Option<DateTime<Local>>,
    /// 文件记录由本次上传创建
    #[serde(default)]
    pub created_file: bool,
}

impl FileVersion {
    pub fn new(version_id: String, file_id: &str, version_no: u32) -> Self {
        Self {
            version_id,
            file_id: file_id.to_string(),
            version_no,
            uploaded_at: Local::now(),
            size: 0,
            chunk_count: 0,
            state: VersionState::Uploading,
            is_deleted: false,
            deleted_at: None,
            created_file: false,
        }
    }

    pub fn is_committed(&self) -> bool {
        self.state == VersionState::Committed
    }

    /// 已提交且不在回收站中
    pub fn is_active(&self) -> bool {
        self.is_committed() && !self.is_deleted
    }

    pub fn trash(&mut self, at: DateTime<Local>) {
        self.is_deleted = true;
        self.deleted_at = Some(at);
    }

    pub fn restore(&mut self) {
        self.is_deleted = false;
        self.deleted_at = None;
    }
}

/// 块记录
///
/// 以内容哈希为键；同一哈希的字节一经写入不再修改。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChunkRecord {
    /// 内容哈希（十六进制）
    pub hash: String,
    /// 存储路径
    pub path: PathBuf,
    /// 块大小
    pub size: u64,
    /// 引用计数
    pub ref_count: u64,
    /// 创建时间
    pub created_at: DateTime<Local>,
}

/// 版本与块的有序绑定
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VersionChunkRef {
    /// 版本ID
    pub version_id: String,
    /// 从 0 开始连续的序号
    pub sequence_no: u32,
    /// 块哈希
    pub chunk_hash: String,
}

/// 版本列表视图
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VersionSummary {
    pub version_id: String,
    pub file_id: String,
    pub file_name: String,
    pub version_no: u32,
    pub uploaded_at: DateTime<Local>,
    pub size: u64,
    pub state: VersionState,
    pub is_deleted: bool,
}

impl VersionSummary {
    pub fn from_version(file: &FileRecord, version: &FileVersion) -> Self {
        Self {
            version_id: version.version_id.clone(),
            file_id: file.file_id.clone(),
            file_name: file.name.clone(),
            version_no: version.version_no,
            uploaded_at: version.uploaded_at,
            size: version.size,
            state: version.state,
            is_deleted: version.is_deleted,
        }
    }
}

/// 用户统计
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserStats {
    /// 不在回收站中的文件数
    pub active_file_count: usize,
    /// 活跃文件的活跃版本字节总和
    pub used_bytes: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_trash_and_restore() {
        let mut file = FileRecord::new("f_1".to_string(), "alice", "a.txt");
        assert!(file.is_owned_by("alice"));
        assert!(!file.is_owned_by("bob"));

        file.trash(Local::now());
        assert!(file.is_deleted);
        assert!(file.deleted_at.is_some());

        file.restore();
        assert!(!file.is_deleted);
        assert!(file.deleted_at.is_none());
    }

    #[test]
    fn test_version_activity() {
        let mut version = FileVersion::new("v_1".to_string(), "f_1", 1);
        assert_eq!(version.state, VersionState::Uploading);
        assert!(!version.is_active());

        version.state = VersionState::Committed;
        assert!(version.is_active());

        version.trash(Local::now());
        assert!(!version.is_active());

        version.restore();
        assert!(version.is_active());

        version.state = VersionState::Aborted;
        assert!(!version.is_active());
    }

    #[test]
    fn test_version_state_display() {
        assert_eq!(VersionState::Uploading.to_string(), "uploading");
        assert_eq!(VersionState::Committed.to_string(), "committed");
        assert_eq!(VersionState::Aborted.to_string(), "aborted");
    }

    #[test]
    fn test_file_record_defaults_on_deserialize() {
        let json = r#"{
            "file_id": "f_1",
            "owner_id": "alice",
            "name": "a.txt",
            "size": 5,
            "created_at": "2024-01-01T00:00:00+00:00"
        }"#;
        let file: FileRecord = serde_json::from_str(json).unwrap();
        assert!(!file.is_deleted);
        assert!(file.deleted_at.is_none());
    }

    #[test]
    fn test_version_defaults_on_deserialize() {
        let json = r#"{
            "version_id": "v_1",
            "file_id": "f_1",
            "version_no": 1,
            "uploaded_at": "2024-01-01T00:00:00+00:00",
            "size": 5,
            "chunk_count": 1,
            "state": "Committed"
        }"#;
        let version: FileVersion = serde_json::from_str(json).unwrap();
        assert!(!version.is_deleted);
        assert!(!version.created_file);
    }
}
