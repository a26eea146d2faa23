//! Condition with sticky signal / 带粘滞信号的条件变量
//!
//! A signal sent while nobody waits is kept until the next wait consumes it.
//! 无人等待时发送的信号会保留，直到下一次等待将其消费。

use std::time::{Duration, Instant};

use parking_lot::{Condvar, Mutex};

pub(crate) struct Cond {
  pending: Mutex<bool>,
  cvar: Condvar,
}

impl Cond {
  pub fn new() -> Self {
    Self {
      pending: Mutex::new(false),
      cvar: Condvar::new(),
    }
  }

  /// Wake the waiter or leave a pending signal
  /// 唤醒等待者，或留下待处理信号
  pub fn signal(&self) {
    let mut pending = self.pending.lock();
    *pending = true;
    self.cvar.notify_one();
  }

  /// Wait for a signal, `None` waits forever. Returns true if signalled.
  /// 等待信号，`None` 表示无限等待。收到信号返回 true。
  pub fn wait(&self, timeout: Option<Duration>) -> bool {
    let mut pending = self.pending.lock();
    // Deadline past the clock range waits forever / 超出时钟范围的截止时间视为无限等待
    match timeout.and_then(|t| Instant::now().checked_add(t)) {
      Some(deadline) => {
        // Spurious wakeups loop back / 伪唤醒重新等待
        while !*pending {
          if self.cvar.wait_until(&mut pending, deadline).timed_out() {
            break;
          }
        }
      }
      None => {
        while !*pending {
          self.cvar.wait(&mut pending);
        }
      }
    }
    std::mem::take(&mut *pending)
  }
}
