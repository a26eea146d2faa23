//! Checkpoint thread main loop
//! 检查点线程主循环

use std::sync::Arc;

use log::{debug, error, trace};

use crate::{
  BoxErr, Error, Policy,
  conf::DRAIN,
  conn::{Conn, Session},
  gate::Gate,
};

/// Run until stopped, then hand the session back for closing
/// 运行直到停止，然后交回会话以便关闭
pub(crate) fn run<C: Conn>(
  conn: Arc<C>,
  gate: Arc<Gate>,
  policy: Policy,
  mut session: C::Session,
) -> C::Session {
  if let Err(e) = run_loop(&*conn, &gate, &policy, &mut session) {
    error!("checkpoint server error: {e}");
    conn.fatal(Error::Fatal(e));
  }
  session
}

fn run_loop<C: Conn>(
  conn: &C,
  gate: &Gate,
  policy: &Policy,
  session: &mut C::Session,
) -> Result<(), BoxErr> {
  let timeout = policy.timeout();
  let name = policy.name.as_deref();

  while gate.running() {
    // Log size only: no timeout, wait for a signal
    // 仅日志大小触发：无超时，等待信号
    let signalled = gate.wait(timeout);
    if !gate.running() {
      break;
    }
    trace!(
      "checkpoint wake by {}",
      if signalled { "signal" } else { "timeout" }
    );

    let begin = coarsetime::Instant::now();
    session.checkpoint(name)?;
    debug!("checkpoint done in {}ms", begin.elapsed().as_millis());

    if policy.by_log() {
      conn.log_written_reset();
      gate.reset();
      // Log limit may have been crossed during the checkpoint, clear that
      // signal so we don't checkpoint again immediately
      // 检查点期间可能越过日志阈值，清掉该信号以免立即再次检查点
      gate.wait(Some(DRAIN));
      // A crossing of the new cycle may have been eaten by the drain
      // 新周期的越界信号可能被上面的等待吃掉
      gate.rearm();
    }
  }
  Ok(())
}
