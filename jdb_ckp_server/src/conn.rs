//! Engine side of the checkpoint server
//! 检查点服务依赖的引擎接口

use crate::{BoxErr, Error};

/// Dedicated execution context owned by the checkpoint thread
/// 检查点线程独占的执行上下文
pub trait Session: Send + 'static {
  /// Take a checkpoint, blocks until durable. `None` uses the default name.
  /// 执行检查点，阻塞直到落盘。`None` 使用默认名称。
  fn checkpoint(&mut self, name: Option<&str>) -> Result<(), BoxErr>;

  fn close(self) -> Result<(), BoxErr>;
}

/// Engine connection / 引擎连接
pub trait Conn: Send + Sync + 'static {
  type Session: Session;

  /// Open a session able to block on I/O
  /// 打开可阻塞 I/O 的会话
  fn open_session(&self, name: &str) -> Result<Self::Session, BoxErr>;

  /// Write-ahead log is on / 预写日志已开启
  fn log_enabled(&self) -> bool;

  /// Zero the log bytes written since last checkpoint
  /// 清零自上次检查点以来写入的日志字节数
  fn log_written_reset(&self);

  /// The checkpoint thread hit an unrecoverable error and has exited.
  /// The engine must abort in a controlled way, durability is no longer upheld.
  /// 检查点线程遇到不可恢复错误并已退出。引擎必须受控中止，持久性已无法保证。
  fn fatal(&self, err: Error);
}
