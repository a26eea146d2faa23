//! Error types for the checkpoint server
//! 检查点服务的错误类型

use thiserror::Error;

/// Boxed error from engine collaborators
/// 引擎协作方返回的装箱错误
pub type BoxErr = Box<dyn std::error::Error + Send + Sync>;

#[derive(Debug, Error)]
pub enum Error {
  #[error("in-memory configuration incompatible with checkpoints / 内存模式与检查点不兼容")]
  IncompatibleConfig,

  #[error("invalid checkpoint name {name:?}: {reason}")]
  InvalidName { name: String, reason: &'static str },

  #[error("invalid value for {key}: {val:?}")]
  InvalidValue { key: &'static str, val: String },

  #[error("{key} out of range: {val} > {max}")]
  OutOfRange {
    key: &'static str,
    val: u64,
    max: u64,
  },

  #[error("session: {0}")]
  Session(BoxErr),

  #[error("spawn checkpoint server: {0}")]
  Spawn(#[from] std::io::Error),

  /// Worker loop failed, checkpoints can no longer be taken
  /// 工作循环失败，无法继续检查点
  #[error("checkpoint server error: {0}")]
  Fatal(BoxErr),

  #[error("checkpoint server thread panicked")]
  Panicked,

  #[error("teardown: {}", join(.0))]
  Teardown(Vec<Error>),
}

fn join(li: &[Error]) -> String {
  li.iter()
    .map(ToString::to_string)
    .collect::<Vec<_>>()
    .join("; ")
}

pub type Result<T> = std::result::Result<T, Error>;
