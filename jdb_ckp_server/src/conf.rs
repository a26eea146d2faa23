//! Checkpoint server configuration
//! 检查点服务配置

use std::time::Duration;

use crate::{Error, Result, name};

/// Key for time trigger / 时间触发键
pub const KEY_WAIT: &str = "checkpoint.wait";
/// Key for log growth trigger / 日志增长触发键
pub const KEY_LOG_SIZE: &str = "checkpoint.log_size";
/// Key for checkpoint name / 检查点名称键
pub const KEY_NAME: &str = "checkpoint.name";
/// Key for in-memory engine / 内存模式键
pub const KEY_IN_MEMORY: &str = "in_memory";

/// Max wait in seconds / 最大等待秒数
pub const MAX_WAIT_SEC: u64 = 100_000;
/// Max log size in bytes (2GB) / 最大日志字节数
pub const MAX_LOG_SIZE: u64 = 2 << 30;

/// Short wait after a checkpoint to absorb a stray growth signal
/// 检查点后的短暂等待，用于吸收残留的增长信号
pub const DRAIN: Duration = Duration::from_millis(1);

/// Configuration item, later items override earlier ones
/// 配置项，后出现的覆盖先出现的
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Conf {
  /// Checkpoint every interval, zero disables
  /// 每隔该时长检查点一次，0 表示禁用
  Wait(Duration),
  /// Checkpoint after this many log bytes, zero disables
  /// 写入该字节数日志后检查点，0 表示禁用
  LogSize(u64),
  /// Checkpoint name override
  /// 检查点名称
  Name(String),
  /// Engine keeps no durable state
  /// 引擎为纯内存模式
  InMemory(bool),
}

/// Resolved trigger policy, replaced wholesale on reconfigure
/// 解析后的触发策略，重新配置时整体替换
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Policy {
  pub wait: Duration,
  pub log_size: u64,
  pub name: Option<String>,
}

impl Policy {
  /// Resolve policy from config, `None` means the server should not run
  /// 从配置解析策略，`None` 表示不启动服务
  pub fn resolve(conf: &[Conf], log_enabled: bool) -> Result<Option<Self>> {
    let mut wait = Duration::ZERO;
    let mut log_size = 0;
    let mut ckp_name = "";
    let mut in_memory = false;
    for c in conf {
      match c {
        Conf::Wait(d) => wait = *d,
        Conf::LogSize(n) => log_size = *n,
        Conf::Name(s) => ckp_name = s.as_str(),
        Conf::InMemory(b) => in_memory = *b,
      }
    }

    let max = MAX_WAIT_SEC * 1000;
    let wait_ms = u64::try_from(wait.as_millis()).unwrap_or(u64::MAX);
    if wait_ms > max {
      return Err(Error::OutOfRange {
        key: KEY_WAIT,
        val: wait_ms,
        max,
      });
    }

    let by_time = !wait.is_zero();
    let by_log = log_size != 0;

    if (by_time || by_log) && in_memory {
      return Err(Error::IncompatibleConfig);
    }

    // Log size alone can never fire without logging
    // 未开启日志时仅靠日志大小永远不会触发
    if (!by_time && !by_log) || (by_log && !by_time && !log_enabled) {
      return Ok(None);
    }

    Ok(Some(Self {
      wait,
      log_size,
      name: name::resolve(ckp_name)?,
    }))
  }

  /// Timeout for the main wait, `None` waits for a signal
  /// 主等待的超时，`None` 表示一直等待信号
  #[inline]
  pub fn timeout(&self) -> Option<Duration> {
    if self.wait.is_zero() {
      None
    } else {
      Some(self.wait)
    }
  }

  #[inline]
  pub fn by_log(&self) -> bool {
    self.log_size != 0
  }
}

/// Parse engine key/value pairs, unrelated keys are skipped
/// 解析引擎键值对，忽略无关键
pub fn parse<'a>(kv: impl IntoIterator<Item = (&'a str, &'a str)>) -> Result<Vec<Conf>> {
  let mut li = Vec::new();
  for (k, v) in kv {
    if let Some(c) = Conf::parse(k, v)? {
      li.push(c);
    }
  }
  Ok(li)
}

impl Conf {
  /// Parse one key/value pair
  /// 解析单个键值对
  pub fn parse(key: &str, val: &str) -> Result<Option<Self>> {
    let val = val.trim();
    Ok(Some(match key {
      KEY_WAIT => Self::Wait(wait(val)?),
      KEY_LOG_SIZE => Self::LogSize(log_size(val)?),
      KEY_NAME => Self::Name(val.to_owned()),
      KEY_IN_MEMORY => Self::InMemory(boolean(val)?),
      _ => return Ok(None),
    }))
  }
}

fn invalid(key: &'static str, val: &str) -> Error {
  Error::InvalidValue {
    key,
    val: val.to_owned(),
  }
}

/// Split "123abc" into (123, "abc")
/// 拆分数字与后缀
fn num_unit(key: &'static str, val: &str) -> Result<(u64, String)> {
  let pos = val
    .find(|c: char| !c.is_ascii_digit())
    .unwrap_or(val.len());
  let (n, unit) = val.split_at(pos);
  let n = n.parse::<u64>().map_err(|_| invalid(key, val))?;
  Ok((n, unit.trim().to_ascii_lowercase()))
}

fn wait(val: &str) -> Result<Duration> {
  let (n, unit) = num_unit(KEY_WAIT, val)?;
  let ms = match unit.as_str() {
    "" | "s" => n.checked_mul(1000),
    "ms" => Some(n),
    _ => None,
  }
  .ok_or_else(|| invalid(KEY_WAIT, val))?;

  let max = MAX_WAIT_SEC * 1000;
  if ms > max {
    return Err(Error::OutOfRange {
      key: KEY_WAIT,
      val: ms,
      max,
    });
  }
  Ok(Duration::from_millis(ms))
}

fn log_size(val: &str) -> Result<u64> {
  let (n, unit) = num_unit(KEY_LOG_SIZE, val)?;
  let shift = match unit.as_str() {
    "" | "b" => 0,
    "k" | "kb" => 10,
    "m" | "mb" => 20,
    "g" | "gb" => 30,
    "t" | "tb" => 40,
    _ => return Err(invalid(KEY_LOG_SIZE, val)),
  };
  let bytes = n
    .checked_mul(1 << shift)
    .ok_or_else(|| invalid(KEY_LOG_SIZE, val))?;

  if bytes > MAX_LOG_SIZE {
    return Err(Error::OutOfRange {
      key: KEY_LOG_SIZE,
      val: bytes,
      max: MAX_LOG_SIZE,
    });
  }
  Ok(bytes)
}

fn boolean(val: &str) -> Result<bool> {
  match val.to_ascii_lowercase().as_str() {
    "true" | "1" | "on" => Ok(true),
    "false" | "0" | "off" | "" => Ok(false),
    _ => Err(invalid(KEY_IN_MEMORY, val)),
  }
}
