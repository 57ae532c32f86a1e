//! 版本化文件存储 trait 定义
//!
//! 传输层（HTTP 等）只依赖此接口；调用方身份由外部认证层提供，
//! 所有操作都必须拒绝跨所有者访问。

use crate::{FileRecord, FileVersion, UserStats, VersionSummary};
use async_trait::async_trait;
use bytes::Bytes;
use futures::stream::BoxStream;
use tokio::io::AsyncRead;

/// 按序号拼接的版本字节流
///
/// 出错时流以 `Err` 结束，不会返回被截断的数据。
pub type ByteStream<E> = BoxStream<'static, Result<Bytes, E>>;

/// 版本化文件存储 trait
#[async_trait]
pub trait VersionedFileStore: Send + Sync {
    /// 错误类型
    type Error: std::error::Error + Send + Sync + 'static;

    /// 上传文件的新版本
    ///
    /// 同名文件复用已有的文件记录；文件在回收站中时先隐式恢复。
    /// 失败时不会留下已提交的版本。
    async fn upload<R>(
        &self,
        owner_id: &str,
        file_name: &str,
        reader: &mut R,
    ) -> Result<FileVersion, Self::Error>
    where
        R: AsyncRead + Unpin + Send;

    /// 列出不在回收站中的文件
    async fn list_files(&self, owner_id: &str) -> Result<Vec<FileRecord>, Self::Error>;

    /// 列出回收站中的文件
    async fn list_trash(&self, owner_id: &str) -> Result<Vec<FileRecord>, Self::Error>;

    /// 列出文件版本（最新的在前）
    async fn list_versions(
        &self,
        file_id: &str,
        owner_id: &str,
    ) -> Result<Vec<VersionSummary>, Self::Error>;

    /// 下载版本内容
    async fn download(
        &self,
        version_id: &str,
        owner_id: &str,
    ) -> Result<ByteStream<Self::Error>, Self::Error>;

    /// 文件移入回收站
    async fn trash_file(&self, file_id: &str, owner_id: &str) -> Result<(), Self::Error>;

    /// 从回收站恢复文件及其所有版本
    async fn restore_file(&self, file_id: &str, owner_id: &str) -> Result<(), Self::Error>;

    /// 永久删除文件及其所有版本
    async fn delete_file_permanently(
        &self,
        file_id: &str,
        owner_id: &str,
    ) -> Result<(), Self::Error>;

    /// 版本移入回收站
    async fn delete_version(&self, version_id: &str, owner_id: &str) -> Result<(), Self::Error>;

    /// 从回收站恢复版本
    async fn restore_version(&self, version_id: &str, owner_id: &str) -> Result<(), Self::Error>;

    /// 用户统计
    async fn get_stats(&self, owner_id: &str) -> Result<UserStats, Self::Error>;
}
