//! Checkpoint server lifecycle
//! 检查点服务生命周期

use std::{
  sync::Arc,
  thread::{self, JoinHandle},
};

use log::{info, warn};

use crate::{
  Conf, Error, Policy, Result, conf,
  conn::{Conn, Session},
  gate::Gate,
  run::run,
};

/// Thread and session name / 线程与会话名称
pub const THREAD_NAME: &str = "checkpoint-server";

struct Handle<S> {
  gate: Arc<Gate>,
  thread: JoinHandle<S>,
}

/// Checkpoint server of one engine connection
/// 单个引擎连接的检查点服务
///
/// Configure, reconfigure and shutdown take `&mut self`, callers serialize them.
/// Writers report log growth through [`Server::gate`] from any thread.
/// 配置、重新配置与关闭需要 `&mut self`，由调用方串行化。
/// 写入者可在任意线程通过 [`Server::gate`] 上报日志增长。
pub struct Server<C: Conn> {
  conn: Arc<C>,
  policy: Option<Policy>,
  handle: Option<Handle<C::Session>>,
}

impl<C: Conn> Server<C> {
  pub fn new(conn: Arc<C>) -> Self {
    Self {
      conn,
      policy: None,
      handle: None,
    }
  }

  /// Stop any running server, resolve config, start if active
  /// 停止已运行的服务，解析配置，需要时启动
  pub fn configure(&mut self, conf: &[Conf]) -> Result<()> {
    if self.handle.is_some() {
      self.stop()?;
    }

    let policy = Policy::resolve(conf, self.conn.log_enabled());
    if !matches!(policy, Err(Error::IncompatibleConfig)) {
      // Growth accounting starts from zero / 增长计数从零开始
      self.conn.log_written_reset();
    }

    match policy? {
      Some(policy) => self.start(policy),
      None => {
        info!("checkpoint server disabled");
        Ok(())
      }
    }
  }

  /// Same as [`Server::configure`] from raw engine key/value pairs
  /// 与 [`Server::configure`] 相同，输入为引擎原始键值对
  pub fn configure_kv<'a>(
    &mut self,
    kv: impl IntoIterator<Item = (&'a str, &'a str)>,
  ) -> Result<()> {
    let li = conf::parse(kv)?;
    self.configure(&li)
  }

  fn start(&mut self, policy: Policy) -> Result<()> {
    if self.handle.is_some() {
      return Ok(());
    }

    // Checkpoint does enough I/O that it gets its own session
    // 检查点 I/O 较多，使用独立会话
    let session = self
      .conn
      .open_session(THREAD_NAME)
      .map_err(Error::Session)?;
    let gate = Arc::new(Gate::new(policy.log_size));

    let thread = {
      let conn = self.conn.clone();
      let gate = gate.clone();
      let policy = policy.clone();
      thread::Builder::new()
        .name(THREAD_NAME.into())
        .spawn(move || run(conn, gate, policy, session))?
    };

    info!(
      "checkpoint server started: wait={:?} log_size={} name={:?}",
      policy.wait, policy.log_size, policy.name
    );
    self.handle = Some(Handle { gate, thread });
    self.policy = Some(policy);
    Ok(())
  }

  /// Stop the server, safe to call repeatedly
  /// 停止服务，可重复调用
  ///
  /// Every teardown step runs even if an earlier one failed.
  /// 即使前面的步骤失败，所有清理步骤仍会执行。
  pub fn stop(&mut self) -> Result<()> {
    let mut err = Vec::new();

    if let Some(Handle { gate, thread }) = self.handle.take() {
      gate.stop();
      match thread.join() {
        Ok(session) => {
          if let Err(e) = session.close() {
            err.push(Error::Session(e));
          }
        }
        Err(_) => err.push(Error::Panicked),
      }
      info!("checkpoint server stopped");
    }
    self.policy = None;

    if err.is_empty() {
      Ok(())
    } else {
      Err(Error::Teardown(err))
    }
  }

  /// Engine shutdown / 引擎关闭
  #[inline]
  pub fn shutdown(&mut self) -> Result<()> {
    self.stop()
  }

  /// Report log growth, returns true if it woke the server
  /// 上报日志增长，唤醒了服务则返回 true
  ///
  /// No-op unless the policy has a log size trigger.
  /// 策略未启用日志大小触发时不做任何事。
  pub fn notify(&self, written: u64) -> bool {
    match (&self.handle, &self.policy) {
      (Some(h), Some(p)) if p.by_log() => h.gate.notify(written),
      _ => false,
    }
  }

  /// Gate for writer threads, `None` when not running
  /// 供写入线程使用的闸门，未运行时为 `None`
  pub fn gate(&self) -> Option<Arc<Gate>> {
    self.handle.as_ref().map(|h| h.gate.clone())
  }

  #[inline]
  pub fn policy(&self) -> Option<&Policy> {
    self.policy.as_ref()
  }

  #[inline]
  pub fn is_running(&self) -> bool {
    self.handle.is_some()
  }
}

impl<C: Conn> Drop for Server<C> {
  fn drop(&mut self) {
    if let Err(e) = self.stop() {
      warn!("checkpoint server drop: {e}");
    }
  }
}
