//! Log growth gate / 日志增长闸门
//!
//! State shared by writers and the checkpoint thread. Writers report log growth,
//! at most one wakeup is delivered per checkpoint cycle.
//! 写入者与检查点线程共享的状态。写入者上报日志增长，每个检查点周期最多唤醒一次。

use std::{
  sync::atomic::{
    AtomicBool,
    Ordering::{AcqRel, Acquire, Release},
  },
  time::Duration,
};

use crate::cond::Cond;

pub struct Gate {
  log_size: u64,
  signalled: AtomicBool,
  run: AtomicBool,
  cond: Cond,
}

impl Gate {
  pub(crate) fn new(log_size: u64) -> Self {
    Self {
      log_size,
      signalled: AtomicBool::new(false),
      run: AtomicBool::new(true),
      cond: Cond::new(),
    }
  }

  /// Report log bytes written since last checkpoint, returns true if this call woke the server
  /// 上报自上次检查点以来写入的日志字节数，本次调用唤醒了服务则返回 true
  ///
  /// Only valid when the policy has a log size trigger.
  /// 仅在策略启用日志大小触发时调用。
  pub fn notify(&self, written: u64) -> bool {
    debug_assert!(self.log_size != 0, "notify without log size trigger");
    if written < self.log_size || self.signalled.load(Acquire) {
      return false;
    }
    if self
      .signalled
      .compare_exchange(false, true, AcqRel, Acquire)
      .is_err()
    {
      return false;
    }
    self.cond.signal();
    true
  }

  /// Threshold in bytes / 阈值字节数
  #[inline]
  pub fn log_size(&self) -> u64 {
    self.log_size
  }

  /// A wakeup is pending for this cycle / 本周期已发出唤醒
  #[inline]
  pub fn signalled(&self) -> bool {
    self.signalled.load(Acquire)
  }

  /// Open the gate for the next cycle / 为下个周期打开闸门
  #[inline]
  pub(crate) fn reset(&self) {
    self.signalled.store(false, Release);
  }

  #[inline]
  pub(crate) fn running(&self) -> bool {
    self.run.load(Acquire)
  }

  /// Re-deliver the signal if the gate is already closed for this cycle
  /// 若本周期闸门已关闭则重新发出信号
  #[inline]
  pub(crate) fn rearm(&self) {
    if self.signalled.load(Acquire) {
      self.cond.signal();
    }
  }

  /// Ask the thread to exit and wake it / 请求线程退出并唤醒
  pub(crate) fn stop(&self) {
    self.run.store(false, Release);
    self.cond.signal();
  }

  #[inline]
  pub(crate) fn wait(&self, timeout: Option<Duration>) -> bool {
    self.cond.wait(timeout)
  }
}
